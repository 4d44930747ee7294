//! Property tests for bedtime arithmetic.

use proptest::prelude::*;
use sleepcalc_core::{
    bedtime_from_wake, predict_bedtime, ClockFormat, CoffeeIntake, ModelError, PredictionInput,
    SleepAmount, WakeTime,
};

fn wake_time() -> impl Strategy<Value = WakeTime> {
    (0u32..24, 0u32..60).prop_map(|(h, m)| WakeTime::new(h, m).unwrap())
}

fn sleep_amount() -> impl Strategy<Value = SleepAmount> {
    (16u32..=48).prop_map(|quarters| SleepAmount::new(f64::from(quarters) * 0.25).unwrap())
}

proptest! {
    #[test]
    fn bedtime_is_always_a_valid_time_of_day(wake in wake_time(), minutes in 0u32..(48 * 60)) {
        let hours = f64::from(minutes) / 60.0;
        let bedtime = bedtime_from_wake(wake, hours).unwrap();

        let wake_minutes = i64::from(wake.seconds_since_midnight() / 60);
        let expected = (wake_minutes - i64::from(minutes)).rem_euclid(24 * 60);
        let shown = bedtime.format(ClockFormat::TwentyFourHour);
        prop_assert_eq!(shown, format!("{:02}:{:02}", expected / 60, expected % 60));
        prop_assert!(bedtime.day_offset <= 0);
    }

    #[test]
    fn rolls_to_previous_day_exactly_when_sleep_exceeds_time_since_midnight(
        wake in wake_time(),
        minutes in 0u32..(24 * 60),
    ) {
        let hours = f64::from(minutes) / 60.0;
        let bedtime = bedtime_from_wake(wake, hours).unwrap();
        let since_midnight = wake.seconds_since_midnight() / 60;
        prop_assert_eq!(bedtime.is_previous_day(), minutes > since_midnight);
    }

    #[test]
    fn prediction_is_idempotent(
        wake in wake_time(),
        sleep in sleep_amount(),
        cups in 0u32..=20,
    ) {
        let model = |input: &PredictionInput| {
            Ok::<_, ModelError>(input.estimated_sleep + 0.1 * input.coffee + input.wake / 86_400.0)
        };
        let coffee = CoffeeIntake::new(cups).unwrap();

        let first = predict_bedtime(wake, sleep, coffee, &model).unwrap();
        let second = predict_bedtime(wake, sleep, coffee, &model).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn failing_model_never_yields_a_time(
        wake in wake_time(),
        sleep in sleep_amount(),
        cups in 0u32..=20,
    ) {
        let model = |_: &PredictionInput| Err::<f64, _>(ModelError::Runtime("down".into()));
        let result = predict_bedtime(wake, sleep, CoffeeIntake::new(cups).unwrap(), &model);
        prop_assert!(result.is_err());
    }
}
