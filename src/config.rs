//! Application configuration, loaded from `config/{env}.yaml`.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    /// "hourly", "daily" or "never".
    pub rotation: String,
    /// When absent, the in-memory store is used.
    pub postgres_url: Option<String>,
    pub paystack: PaystackConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaystackConfig {
    pub secret_key: String,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "miles-ledger.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
            postgres_url: None,
            paystack: PaystackConfig::default(),
        }
    }
}

impl Default for PaystackConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Reads `config/{env}.yaml`; falls back to defaults when the file is
    /// missing. A present-but-unparsable file is a startup failure.
    pub fn load(env: &str) -> Self {
        let path = format!("config/{env}.yaml");
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                serde_yaml::from_str(&contents).unwrap_or_else(|e| panic!("bad config {path}: {e}"))
            }
            Err(_) => Self::default(),
        }
    }
}
