//! Bedtime calculation command.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use sleepcalc_core::{
    calculate, CalculationOutcome, CalculationRequest, ClockFormat, CoffeeIntake, Config,
    LinearSleepModel, SleepAmount, WakeTime,
};

#[derive(Args)]
pub struct CalculateArgs {
    /// Desired wake time (HH:MM, 24-hour)
    #[arg(long)]
    wake: Option<WakeTime>,
    /// Desired amount of sleep in hours (4-12, quarter-hour steps)
    #[arg(long)]
    sleep: Option<SleepAmount>,
    /// Daily coffee intake in cups (0-20)
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=20))]
    coffee: Option<u32>,
    /// Model artifact path (overrides config)
    #[arg(long)]
    model: Option<PathBuf>,
    /// Clock style: 12h or 24h (overrides config)
    #[arg(long)]
    clock: Option<ClockFormat>,
    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct CalculationReport<'a> {
    #[serde(flatten)]
    request: &'a CalculationRequest,
    #[serde(flatten)]
    outcome: &'a CalculationOutcome,
}

pub fn run(args: CalculateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    let mut request = config.default_request();
    if let Some(wake) = args.wake {
        request.wake_time = wake;
    }
    if let Some(sleep) = args.sleep {
        request.sleep_amount = sleep;
    }
    if let Some(cups) = args.coffee {
        request.coffee_intake = CoffeeIntake::new(cups)?;
    }

    let model_path = match args.model {
        Some(path) => path,
        None => config.model_path()?,
    };
    let clock = args.clock.unwrap_or(config.display.clock);
    tracing::debug!(path = %model_path.display(), "using model artifact");

    let outcome = calculate(&request, clock, || LinearSleepModel::load(&model_path));

    if args.json {
        let report = CalculationReport {
            request: &request,
            outcome: &outcome,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if outcome.is_success() {
        println!("Wake up:  {}", request.wake_time);
        println!("Sleep:    {} hours", request.sleep_amount);
        println!("Coffee:   {}", request.coffee_intake.label());
        println!();
        println!("{}", outcome.title);
        println!("{}", outcome.message);
    } else {
        eprintln!("{}", outcome.title);
        eprintln!("{}", outcome.message);
    }

    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
