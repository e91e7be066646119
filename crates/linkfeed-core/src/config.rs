use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::form::ClearPolicy;
use crate::upload::CurlUploader;

/// HTTP limits for the upload call (optional `[http]` section in config.toml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Seconds to wait for the TCP/TLS connection; absent = libcurl default.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Seconds for the whole upload; absent = wait until the server answers.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Global configuration loaded from `~/.config/linkfeed/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkfeedConfig {
    /// Full URL of the upload endpoint.
    pub endpoint: String,
    /// Bot used when none is given on the command line.
    #[serde(default)]
    pub default_bot: Option<String>,
    /// Known bots. When non-empty, only these may be selected.
    #[serde(default)]
    pub bots: Vec<String>,
    /// Whether an accepted upload empties the fields: "always" (default) or "when-new".
    #[serde(default)]
    pub clear_on_success: Option<ClearPolicy>,
    #[serde(default)]
    pub http: Option<HttpConfig>,
    /// Extra multipart fields sent with every upload.
    #[serde(default)]
    pub extra_fields: BTreeMap<String, String>,
}

impl Default for LinkfeedConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000/upload".to_string(),
            default_bot: None,
            bots: Vec::new(),
            clear_on_success: None,
            http: None,
            extra_fields: BTreeMap::new(),
        }
    }
}

impl LinkfeedConfig {
    pub fn clear_policy(&self) -> ClearPolicy {
        self.clear_on_success.unwrap_or_default()
    }

    /// Uploader for `endpoint` with the configured HTTP limits.
    pub fn uploader(&self) -> CurlUploader {
        let http = self.http.clone().unwrap_or_default();
        CurlUploader::new(self.endpoint.clone())
            .with_connect_timeout(http.connect_timeout_secs.map(Duration::from_secs))
            .with_timeout(http.timeout_secs.map(Duration::from_secs))
    }

    /// Extra fields in key order.
    pub fn extra_field_pairs(&self) -> Vec<(String, String)> {
        self.extra_fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Checks a bot name against `bots`. Any non-empty name passes when no
    /// bots are configured.
    pub fn is_known_bot(&self, name: &str) -> bool {
        self.bots.is_empty() || self.bots.iter().any(|b| b == name)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("linkfeed")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LinkfeedConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = LinkfeedConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path. The file must exist.
pub fn load_from(path: &Path) -> Result<LinkfeedConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: LinkfeedConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
