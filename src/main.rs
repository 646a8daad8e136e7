mod builder;
mod catalog;
mod config;
mod model;
mod translit;

use builder::{load_regions, load_tariffs, CityDataBuilder};
use config::load_config;
use tracing::{error, info, warn};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration from file (absent file means defaults)
    let config = match load_config("citygen.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            std::process::exit(1);
        }
    };

    let regions = match load_regions(&config.regions_path) {
        Ok(regions) => regions,
        Err(e) => {
            error!("Failed to load regions from {}: {}", config.regions_path, e);
            std::process::exit(1);
        }
    };

    let tariffs = match load_tariffs(&config.tariffs_path) {
        Ok(tariffs) => tariffs,
        Err(e) => {
            error!("Failed to load tariffs from {}: {}", config.tariffs_path, e);
            std::process::exit(1);
        }
    };

    info!(
        "Loaded {} regions, {} tariff records",
        regions.len(),
        tariffs.len()
    );

    let builder = CityDataBuilder::new(&config, &tariffs);
    if builder.services().is_empty() {
        warn!("Tariff catalog is empty, documents will carry no services");
    }
    info!("Catalog grouped into {} services", builder.services().len());

    match builder.run(&regions) {
        Ok(report) => {
            info!(
                "Generated {} city documents in {}",
                report.written, config.output_dir
            );
            println!("{}", report.written);
        }
        Err(e) => {
            error!("Build failed: {}", e);
            std::process::exit(1);
        }
    }
}
