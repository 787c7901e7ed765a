pub mod settings;

pub use settings::{AppConfig, DatabaseConfig, JwtConfig};

use log::{error, info};
use once_cell::sync::OnceCell;

static CONFIG: OnceCell<AppConfig> = OnceCell::new();

const DEFAULT_CONFIG_PATH: &str = "./config.json";

/// Path of the JSON configuration file, `BLOG_CONFIG` if set.
pub fn config_path() -> String {
    std::env::var("BLOG_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// Load the configuration exactly once. A missing or malformed file ends the process.
pub fn load() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let path = config_path();
        match AppConfig::from_file(&path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path);
                config
            }
            Err(e) => {
                error!("Unable to load configuration: {}", e);
                std::process::exit(1);
            }
        }
    })
}

pub fn get_config() -> &'static AppConfig {
    match CONFIG.get() {
        Some(config) => config,
        None => load(),
    }
}
