use crate::core::history::DEFAULT_SESSION_KEY;
use crate::core::ConfigProvider;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_API_ENDPOINT: &str = "https://zipcloud.ibsnet.co.jp/api/search";

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub enabled: bool,
    pub storage_dir: Option<String>,
    #[serde(default = "default_session_key")]
    pub key: String,
}

fn default_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_session_key() -> String {
    DEFAULT_SESSION_KEY.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            storage_dir: None,
            key: default_session_key(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ZIPCODE_API}); 未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for AppConfig {
    fn api_endpoint(&self) -> &str {
        &self.api.endpoint
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.api.timeout_seconds
    }

    fn session_dir(&self) -> Option<&str> {
        if self.session.enabled {
            self.session.storage_dir.as_deref()
        } else {
            None
        }
    }

    fn session_key(&self) -> &str {
        &self.session.key
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_url("api.endpoint", &self.api.endpoint)?;

        if let Some(timeout) = self.api.timeout_seconds {
            validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }

        if self.session.enabled {
            let dir = validate_required_field("session.storage_dir", &self.session.storage_dir)?;
            validate_path("session.storage_dir", dir)?;
        }
        validate_storage_key("session.key", &self.session.key)?;

        Ok(())
    }
}
