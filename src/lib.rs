pub mod app;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;

use config::{app_data_dir, AppConfig};
use error::AppError;
use infra::init_db;

fn init_logging(level: log::LevelFilter) {
    // stderr keeps log lines out of the session transcript on stdout.
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .try_init();
}

/// Runs one interactive session against the local database.
pub fn run() -> Result<(), AppError> {
    let data_dir = app_data_dir();
    let config = AppConfig::load(&data_dir)?;
    init_logging(config.level_filter());

    let db_path = config.db_path(&data_dir);
    log::info!("DB path: {:?}", db_path);

    let pool = init_db(&db_path).map_err(|e| {
        log::error!("DB init failed: {}", e);
        e
    })?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let outcome =
        commands::run_session(&pool, stdin.lock(), stdout.lock(), config.leaderboard_size)?;
    log::debug!("Session ended: {:?}", outcome);
    Ok(())
}
