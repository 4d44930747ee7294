//! Model artifact inspection.

use std::path::PathBuf;

use clap::Subcommand;
use sleepcalc_core::{Config, LinearSleepModel};

#[derive(Subcommand)]
pub enum ModelAction {
    /// Show the coefficients of the model artifact
    Show {
        /// Model artifact path (overrides config)
        #[arg(long)]
        model: Option<PathBuf>,
    },
    /// Print the resolved model artifact path
    Path,
}

pub fn run(action: ModelAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    match action {
        ModelAction::Show { model } => {
            let path = match model {
                Some(path) => path,
                None => config.model_path()?,
            };
            let model = LinearSleepModel::load(&path)?;
            let params = model.params();
            println!("Model: {}", params.name);
            println!("  Path:            {}", path.display());
            println!("  Intercept:       {}", params.intercept);
            println!("  wake:            {}", params.coefficients.wake);
            println!("  estimated_sleep: {}", params.coefficients.estimated_sleep);
            println!("  coffee:          {}", params.coefficients.coffee);
        }
        ModelAction::Path => {
            println!("{}", config.model_path()?.display());
        }
    }
    Ok(())
}
