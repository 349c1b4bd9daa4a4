mod app_constants;
mod app_setup;
mod cli;
mod metrics;
mod routes;

use crate::cli::CliConfig;
use app_setup::build_rocket;
use clap::{crate_name, Parser};
use extremenotes::config::app_config::AppConfig;
use extremenotes::config::figment::FigmentExt;
use extremenotes::error_exit;
use extremenotes::logging::init_daemon_logging;
use figment::Figment;
use log::info;

fn main() {
    init_daemon_logging();

    info!("{} starting up", crate_name!());

    let cli_config = CliConfig::parse();
    if let Some(ref config_file) = cli_config.config_file
        && !config_file.exists()
    {
        error_exit!(
            "configuration file at {} does not exist",
            config_file.display(),
        )
    }
    let figment = Figment::from(rocket::Config::default())
        .setup_app_config(cli_config.config_file.as_ref());
    let app_config: AppConfig = figment.extract()
        .unwrap_or_else(|e| error_exit!("invalid configuration: {e}"));

    let result = rocket::execute(
        build_rocket(figment, app_config).launch()
    );
    if let Err(e) = result {
        error_exit!("failed to launch rocket: {}", e);
    }
}
