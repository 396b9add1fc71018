use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub apify_token: String,
    pub apify_task_id: String,
    /// Directory brief snapshots are written to. One JSON file per generate call.
    pub snapshot_dir: PathBuf,
    pub wkhtmltopdf_bin: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            apify_token: require_env("APIFY_TOKEN")?,
            apify_task_id: std::env::var("APIFY_TASK_ID")
                .unwrap_or_else(|_| "sleftdogceo~google-maps-scraper-task".to_string()),
            snapshot_dir: std::env::var("SNAPSHOT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            wkhtmltopdf_bin: std::env::var("WKHTMLTOPDF_BIN")
                .unwrap_or_else(|_| "wkhtmltopdf".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
