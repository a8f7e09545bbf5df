pub mod achievements;
pub mod budget;
pub mod config;
pub mod goal;
pub mod product;
pub mod replay;

use chrono::NaiveDate;
use clap::Args;
use goalbank_core::{seed, Config, EngineState, SavingsEngine};

/// Options shared by every command that opens a session.
#[derive(Args, Clone, Debug)]
pub struct SessionOpts {
    /// Date to treat as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,
    /// Start from an empty session instead of the sample data
    #[arg(long, global = true)]
    pub empty: bool,
}

/// A fresh engine plus the config it was built from.
pub fn open_session(opts: &SessionOpts) -> Result<(SavingsEngine, Config), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let state = if opts.empty {
        EngineState::default()
    } else {
        seed::sample_state()
    };
    let mut engine = SavingsEngine::new(state, config.settings());
    if let Some(today) = opts.today {
        engine = engine.with_today(today);
    }
    Ok((engine, config))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
