//! Runtime configuration

use std::path::PathBuf;

/// Configuration for the ordering core
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the durable store file
    pub data_dir: PathBuf,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Self {
        // .env is optional; real env vars win
        let _ = dotenv::dotenv();
        Self {
            data_dir: std::env::var("MENULINK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Path of the redb database file
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("menulink.redb")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
