// HomeAce - personal planner
// Prints the effective agenda for a day (today unless a YYYY-MM-DD is given).

use homeace::utils::logging::{init_logging, log_error_with_context};
use homeace::{validate_config, AppState, Config, DateKey, Database};
use log::{error, info};
use std::process::ExitCode;

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    validate_config(&config)?;

    let date = match std::env::args().nth(1) {
        Some(arg) => DateKey::parse(&arg)?,
        None => DateKey::today(),
    };

    let db = Database::new(&config).await?;
    let state = AppState::load(db).await?;

    let day = state.resolve(date).await;
    {
        let planner = state.planner.read().await;
        let month = date.month_key();
        let busy_days = planner
            .month_summary(month)
            .iter()
            .filter(|summary| summary.responsibilities + summary.todos_total > 0)
            .count();
        info!("{} has {} days with planned items", month, busy_days);
        if let Some(goal) = planner.month_goal(month) {
            info!("Goal for {}: {}", month, goal);
        }
    }

    println!("{}", serde_json::to_string_pretty(&day)?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!("Starting HomeAce");
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error_with_context(&e, "homeace");
            error!("Exiting with failure");
            ExitCode::FAILURE
        }
    }
}
