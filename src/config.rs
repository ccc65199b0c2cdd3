use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the JSON journal document.
    pub journal_file: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            journal_file: env("JOURNAL_FILE", "journal/journal.json"),
            log_level: env("LOG_LEVEL", "INFO"),
        }
    }
}
