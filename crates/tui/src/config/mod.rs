use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend project base URL, without the /rest/v1 suffix.
    pub base_url: String,
    /// API key, sent both as `apikey` and as the bearer token.
    pub api_key: String,
    /// Owner of every row this client reads and writes.
    pub user_id: String,
    /// Storage bucket holding uploaded resource files.
    pub bucket: String,
    pub log_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:54321".to_string(),
            api_key: String::new(),
            user_id: String::new(),
            bucket: "resources".to_string(),
            log_file: "quaderno_tui.log".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "quaderno_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:54321).
    #[arg(long)]
    base_url: Option<String>,
    /// Override user id (UUID).
    #[arg(long)]
    user_id: Option<String>,
    /// Override storage bucket name.
    #[arg(long)]
    bucket: Option<String>,
    /// Override log file path.
    #[arg(long)]
    log_file: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("QUADERNO_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(user_id) = args.user_id {
        settings.user_id = user_id;
    }
    if let Some(bucket) = args.bucket {
        settings.bucket = bucket;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }

    Ok(settings)
}
