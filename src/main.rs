use std::fs;
use std::process::ExitCode;

use epiforecast_dashboard::{Dashboard, DashboardConfig};
use log::{error, info, LevelFilter};

fn run() -> epiforecast_dashboard::Result<()> {
    let config = DashboardConfig::from_env()?;

    let default_level = if config.cf_instance {
        LevelFilter::Info
    } else {
        LevelFilter::Debug
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();

    info!(
        "Starting {} server: {}:{}",
        if config.cf_instance { "CF" } else { "local" },
        config.host,
        config.port
    );
    info!("WML URL: {}", config.base_url()?);
    info!("WML instance ID: {}", config.instance_id()?);

    let dashboard = Dashboard::from_config(config)?;
    let html = dashboard.render()?;

    match std::env::args().nth(1) {
        Some(path) => {
            fs::write(&path, html)?;
            info!("Dashboard written to {}", path);
        }
        None => println!("{}", html),
    }
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
