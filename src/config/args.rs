
use crate::config::toml_config::AppConfig;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "zipcode-lookup")]
#[command(about = "Look up Japanese addresses by postal code")]
pub struct CliConfig {
    #[arg(help = "Postal codes to look up (NNN-NNNN or NNNNNNN); reads stdin when omitted")]
    pub codes: Vec<String>,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Search endpoint, overrides [api].endpoint")]
    pub api_endpoint: Option<String>,

    #[arg(long, help = "Request timeout in seconds, overrides [api].timeout_seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Directory for the session history, enables persistence")]
    pub session_dir: Option<String>,

    #[arg(long, help = "Session slot name, overrides [session].key")]
    pub session_key: Option<String>,

    #[arg(long, help = "History page to show after the lookups (1-based)")]
    pub page: Option<usize>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 先讀設定檔，再以命令列參數覆蓋
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(endpoint) = &self.api_endpoint {
            config.api.endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.api.timeout_seconds = Some(timeout);
        }
        if let Some(dir) = &self.session_dir {
            config.session.enabled = true;
            config.session.storage_dir = Some(dir.clone());
        }
        if let Some(key) = &self.session_key {
            config.session.key = key.clone();
        }

        Ok(config)
    }
}
