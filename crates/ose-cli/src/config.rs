//! Settings loading from `ose.toml`, environment variables, and flags.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

/// Default database location, relative to the working directory.
pub const DEFAULT_DATABASE: &str = "data/campaign.sqlite";

/// Resolved settings for one invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Campaign database path.
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// RNG seed; a fresh one is drawn when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_database() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: default_database(),
            seed: None,
        }
    }
}

impl Settings {
    /// Load `ose.toml` (optional) and `OSE__*` variables, then apply flag
    /// overrides.
    pub fn load(db: Option<PathBuf>, seed: Option<u64>) -> Result<Self, String> {
        let loaded: Settings = Config::builder()
            .add_source(File::with_name("ose").required(false))
            .add_source(
                Environment::with_prefix("OSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| format!("failed to build config: {e}"))?
            .try_deserialize()
            .map_err(|e| format!("failed to read config: {e}"))?;

        Ok(loaded.with_database(db).with_seed(seed))
    }

    /// Override the database path when one is given.
    pub fn with_database(mut self, db: Option<PathBuf>) -> Self {
        if let Some(db) = db {
            self.database = db;
        }
        self
    }

    /// Override the seed when one is given.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }
}
