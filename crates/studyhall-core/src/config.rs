//! Runtime settings: environment variables over a TOML config file over
//! built-in defaults. The CWD `.studyhall.toml` overlays the platform config.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BIND: &str = "0.0.0.0:5100";

/// On-disk TOML configuration. All fields optional so partial configs work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub api: Option<ApiConfig>,
    pub storage: Option<StorageConfig>,
    pub server: Option<ServerConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub db_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
}

/// Resolved settings the binaries run with.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model: String,
    pub db_path: PathBuf,
    pub bind: String,
}

impl Settings {
    /// Resolve settings: `STUDYHALL_*` environment variables win over the
    /// config file, which wins over defaults.
    pub fn load() -> Self {
        let file = load_config();
        let api = file.api.unwrap_or_default();
        let storage = file.storage.unwrap_or_default();
        let server = file.server.unwrap_or_default();

        let api_key = env_var("STUDYHALL_API_KEY").or(api.key);
        let api_base = env_var("STUDYHALL_API_BASE").or(api.base_url);
        let model = env_var("STUDYHALL_MODEL")
            .or(api.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let db_path = env_var("STUDYHALL_DB_PATH")
            .or(storage.db_path)
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);
        let bind = env_var("STUDYHALL_BIND")
            .or(server.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        Settings {
            api_key,
            api_base,
            model,
            db_path,
            bind,
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("studyhall").join("studyhall.db"))
        .unwrap_or_else(|| PathBuf::from("studyhall.db"))
}

/// Platform config file path: `<config_dir>/studyhall/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("studyhall").join("config.toml"))
}

/// Load config by cascading CWD `.studyhall.toml` over the platform config.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".studyhall.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. `None` if missing or unparseable.
pub fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_api = base.api.unwrap_or_default();
    let over_api = overlay.api.unwrap_or_default();
    let base_storage = base.storage.unwrap_or_default();
    let over_storage = overlay.storage.unwrap_or_default();
    let base_server = base.server.unwrap_or_default();
    let over_server = overlay.server.unwrap_or_default();

    ConfigFile {
        api: Some(ApiConfig {
            key: over_api.key.or(base_api.key),
            base_url: over_api.base_url.or(base_api.base_url),
            model: over_api.model.or(base_api.model),
        }),
        storage: Some(StorageConfig {
            db_path: over_storage.db_path.or(base_storage.db_path),
        }),
        server: Some(ServerConfig {
            bind: over_server.bind.or(base_server.bind),
        }),
    }
}
