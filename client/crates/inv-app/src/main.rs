use inv_app::{Session, logger};
use inv_config::Config;

use std::error::Error;

use log::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    let log_file_path = match config.logging.file {
        Some(ref filename) => {
            let config_dir = Config::config_dir()?;
            std::fs::create_dir_all(&config_dir)?;
            Some(config_dir.join(filename))
        }
        None => None,
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting inventory-client v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let (session, mut navigation) = Session::from_config(&config)?;

    let outcome = session.evaluate_guard().await;
    match session.redirect_path(&outcome) {
        Some(path) => info!("Guard ({:?}) redirects to {path}", outcome.state),
        None => info!("Guard ({:?}) allows entry", outcome.state),
    }

    while let Ok(route) = navigation.try_recv() {
        warn!(
            "Navigation requested during startup: {}",
            session.route_table().path(route)
        );
    }

    Ok(())
}
