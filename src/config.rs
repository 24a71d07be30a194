use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::{ExtractOptions, PairingMode};

const DEFAULT_DATASET_URL: &str =
    "https://drive.google.com/uc?id=1L69uaQbqFQuAYGcZAkBMsvUQ-jdycY0FMfvjZ9WZ7HI";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_address: String,
    pub max_workers: usize,
    pub dataset_url: String,
    pub dataset_path: PathBuf,
    pub download_timeout_secs: u64,
    pub max_price_pairs: usize,
    pub pairing: PairingMode,
}

impl Settings {
    /// Defaults, then `config.toml` if present, then `APP_*` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Config::builder()
            .set_default("server_address", "127.0.0.1:3000")?
            .set_default("max_workers", 8)?
            .set_default("dataset_url", DEFAULT_DATASET_URL)?
            .set_default("dataset_path", "Zillow_Data_Complete.xlsx")?
            .set_default("download_timeout_secs", 360)?
            .set_default("max_price_pairs", 10)?
            .set_default("pairing", "independent")?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            max_pairs: self.max_price_pairs,
            pairing: self.pairing,
        }
    }
}
