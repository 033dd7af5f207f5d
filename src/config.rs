use crate::error::ConfigError;
use clap::Args;
use reqwest::Url;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TAG: &str = "freshservice_kb";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub freshservice: FreshserviceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FreshserviceConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub ticket_url: String,
    #[serde(default)]
    pub knowledge_base_url: String,
    #[serde(default)]
    pub folder_id: u64,
    #[serde(default)]
    pub group_id: Option<u64>,
    /// Tag attached to every ticket this service creates.
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FreshserviceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            ticket_url: String::new(),
            knowledge_base_url: String::new(),
            folder_id: 0,
            group_id: None,
            tag: default_tag(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FreshserviceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Settings that can be given on the command line or through the environment.
/// Anything set here wins over the YAML file.
#[derive(Debug, Default, Clone, Args)]
pub struct ConfigArgs {
    /// Path to a YAML config file
    #[arg(long, env = "KB_SYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Freshservice API key
    #[arg(long, env = "FRESH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Ticket endpoint, e.g. https://acme.freshservice.com/api/v2/tickets
    #[arg(long, env = "TICKET_URL")]
    pub ticket_url: Option<String>,

    /// Solution article endpoint
    #[arg(long, env = "KNOWLEDGE_BASE_URL")]
    pub knowledge_base_url: Option<String>,

    /// Folder new articles are created in and looked up from
    #[arg(long, env = "FOLDER_ID")]
    pub folder_id: Option<u64>,

    /// Agent group assigned to notification tickets
    #[arg(long, env = "GROUP_ID")]
    pub group_id: Option<u64>,
}

impl Config {
    /// Builds the configuration from an optional YAML file plus overrides and
    /// validates it.
    pub fn load(args: &ConfigArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(args);
        config.validated()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&config_str)
    }

    pub fn from_yaml(config_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(config_str)?)
    }

    fn apply(&mut self, args: &ConfigArgs) {
        let settings = &mut self.freshservice;
        if let Some(api_key) = &args.api_key {
            settings.api_key = api_key.clone();
        }
        if let Some(ticket_url) = &args.ticket_url {
            settings.ticket_url = ticket_url.clone();
        }
        if let Some(kb_url) = &args.knowledge_base_url {
            settings.knowledge_base_url = kb_url.clone();
        }
        if let Some(folder_id) = args.folder_id {
            settings.folder_id = folder_id;
        }
        if let Some(group_id) = args.group_id {
            settings.group_id = Some(group_id);
        }
    }

    /// Normalizes and checks the settings, failing on the first missing or
    /// malformed value.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        let settings = &mut self.freshservice;

        settings.api_key = settings.api_key.trim().to_string();
        if settings.api_key.is_empty() {
            return Err(ConfigError::Missing("freshservice.api_key"));
        }

        settings.ticket_url = check_url("freshservice.ticket_url", &settings.ticket_url)?;
        settings.knowledge_base_url =
            check_url("freshservice.knowledge_base_url", &settings.knowledge_base_url)?;

        if settings.folder_id == 0 {
            return Err(ConfigError::Missing("freshservice.folder_id"));
        }
        if settings.group_id == Some(0) {
            settings.group_id = None;
        }
        if settings.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "freshservice.timeout_secs",
                reason: "must be greater than zero",
            });
        }

        Ok(self)
    }
}

/// Returns the URL without a trailing slash so ids can be appended. Query
/// strings and fragments are refused for the same reason.
fn check_url(field: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Missing(field));
    }
    match Url::parse(value) {
        Ok(url)
            if matches!(url.scheme(), "http" | "https")
                && url.query().is_none()
                && url.fragment().is_none() =>
        {
            Ok(value.trim_end_matches('/').to_string())
        }
        _ => Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}
