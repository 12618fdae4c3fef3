use serde::Deserialize;
use std::path::PathBuf;
use crate::analytics::NextMonthHorizon;
use crate::i18n::Language;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub display: DisplayConfig,
    pub forecast: ForecastConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,  // in bytes
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub data_dir: String,
    pub users_file: String,
    pub expenses_file: String,
    pub salary_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    pub default_language: Language,
    pub templates_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    pub next_month_horizon: NextMonthHorizon,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

impl StorageConfig {
    pub fn users_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.users_file)
    }

    pub fn expenses_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.expenses_file)
    }

    pub fn salary_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(&self.salary_file)
    }
}
