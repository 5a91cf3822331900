use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

// Host conventions — must match the plugin host's on-disk layout and control API
pub const DEFAULT_PLUGINS_ROOT: &str = "./data/plugins";
pub const DEFAULT_ENTRY_FILE: &str = "main.py";
pub const DEFAULT_RELOAD_URL: &str = "http://localhost:6185";
pub const RELOAD_PATH: &str = "/api/plugin/reload";

/// Top-level config (plugctl.toml + PLUGCTL_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlugctlConfig {
    #[serde(default)]
    pub plugins: PluginsConfig,
    #[serde(default)]
    pub reload: ReloadConfig,
}

/// Where the host keeps its plugins and what each plugin's entry file is called.
///
/// The target path for an edit is always `<root>/<plugin-name>/<entry>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginsConfig {
    #[serde(default = "default_plugins_root")]
    pub root: String,
    #[serde(default = "default_entry_file")]
    pub entry: String,
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            root: default_plugins_root(),
            entry: default_entry_file(),
        }
    }
}

/// The host's local control endpoint. Only the base URL is configurable;
/// the reload path itself is fixed by the host API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadConfig {
    #[serde(default = "default_reload_url")]
    pub url: String,
}

impl Default for ReloadConfig {
    fn default() -> Self {
        Self {
            url: default_reload_url(),
        }
    }
}

impl ReloadConfig {
    /// Full URL of the plugin reload endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), RELOAD_PATH)
    }
}

impl PlugctlConfig {
    /// Load config: explicit path > PLUGCTL_CONFIG env > ~/.plugctl/plugctl.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: PlugctlConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("PLUGCTL_").split("_"))
            .extract()
            .map_err(|e| crate::error::PlugctlError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.plugctl/plugctl.toml", home)
}

fn default_plugins_root() -> String {
    DEFAULT_PLUGINS_ROOT.to_string()
}

fn default_entry_file() -> String {
    DEFAULT_ENTRY_FILE.to_string()
}

fn default_reload_url() -> String {
    DEFAULT_RELOAD_URL.to_string()
}
