//! Configuration management for the MCP server.
//!
//! Values are layered, later sources winning:
//!
//! 1. defaults
//! 2. a JSON config file (`--config`, else `./.kb-cloud-mcp-server.json`,
//!    else `$HOME/.kb-cloud-mcp-server.json`)
//! 3. `KB_CLOUD_MCP_*` environment variables
//! 4. the legacy `KB_CLOUD_API_KEY_NAME` / `KB_CLOUD_API_KEY_SECRET` /
//!    `KB_CLOUD_SITE` variables
//! 5. command-line flags

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::{Error, Result};
use crate::domains::cloud::credentials::is_truthy;

/// Name of the config file looked up in the working and home directories.
pub const CONFIG_FILE_NAME: &str = ".kb-cloud-mcp-server.json";

/// Prefix of the environment variables read by [`Config::load`].
pub const ENV_PREFIX: &str = "KB_CLOUD_MCP_";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Process-level KB Cloud credentials.
    pub cloud: CloudConfig,

    /// Translation export settings.
    pub translations: TranslationsConfig,

    /// The config file that was read, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Append JSON logs to this file instead of writing to stderr.
    pub file: Option<PathBuf>,
}

/// Process-level KB Cloud credentials, the fallback tier of credential resolution.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CloudConfig {
    /// API key name.
    pub api_key: Option<String>,

    /// API key secret.
    pub api_secret: Option<String>,

    /// Site URL or host.
    pub site: Option<String>,

    /// Log upstream requests.
    pub debug: bool,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CloudConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[REDACTED]"))
            .field("site", &self.site)
            .field("debug", &self.debug)
            .finish()
    }
}

/// Translation export settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationsConfig {
    /// Write the resolved translation map at startup.
    pub export: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "kb-cloud-mcp-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Command-line values, applied last.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub site_url: Option<String>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Keys accepted in the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct FileConfig {
    api_key: Option<String>,
    api_secret: Option<String>,
    site_url: Option<String>,
    log_file: Option<PathBuf>,
    log_level: Option<String>,
}

impl Config {
    /// Load configuration from the config file, the process environment
    /// (after reading `.env`) and the given overrides.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_with(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration reading environment variables through `env`.
    pub fn load_with<F>(overrides: &ConfigOverrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some((path, file)) = read_config_file(overrides.config_file.as_deref(), &env)? {
            config.apply_file(file);
            config.source = Some(path);
        }

        config.apply_env(&env);
        config.apply_overrides(overrides);

        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if file.api_key.is_some() {
            self.cloud.api_key = file.api_key;
        }
        if file.api_secret.is_some() {
            self.cloud.api_secret = file.api_secret;
        }
        if file.site_url.is_some() {
            self.cloud.site = file.site_url;
        }
        if file.log_file.is_some() {
            self.logging.file = file.log_file;
        }
        if let Some(level) = file.log_level {
            self.logging.level = level;
        }
    }

    fn apply_env(&mut self, env: &impl Fn(&str) -> Option<String>) {
        let prefixed = |name: &str| env(&format!("{ENV_PREFIX}{name}"));

        if let Some(v) = prefixed("API_KEY") {
            self.cloud.api_key = Some(v);
        }
        if let Some(v) = prefixed("API_SECRET") {
            self.cloud.api_secret = Some(v);
        }
        if let Some(v) = prefixed("SITE_URL") {
            self.cloud.site = Some(v);
        }
        if let Some(v) = prefixed("LOG_FILE") {
            self.logging.file = Some(PathBuf::from(v));
        }
        if let Some(v) = prefixed("LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = prefixed("EXPORT_TRANSLATIONS") {
            self.translations.export = is_truthy(&v);
        }

        // Legacy names win over the prefixed ones
        if let Some(v) = env("KB_CLOUD_API_KEY_NAME") {
            self.cloud.api_key = Some(v);
        }
        if let Some(v) = env("KB_CLOUD_API_KEY_SECRET") {
            self.cloud.api_secret = Some(v);
        }
        if let Some(v) = env("KB_CLOUD_SITE") {
            self.cloud.site = Some(v);
        }
        if let Some(v) = env("KB_CLOUD_DEBUG") {
            self.cloud.debug = is_truthy(&v);
        }
    }

    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(v) = &overrides.api_key {
            self.cloud.api_key = Some(v.clone());
        }
        if let Some(v) = &overrides.api_secret {
            self.cloud.api_secret = Some(v.clone());
        }
        if let Some(v) = &overrides.site_url {
            self.cloud.site = Some(v.clone());
        }
        if let Some(v) = &overrides.log_file {
            self.logging.file = Some(v.clone());
        }
        if let Some(v) = &overrides.log_level {
            self.logging.level = v.clone();
        }
    }
}

/// Read the config file.
///
/// An explicit path must exist and parse. Discovered files are optional and
/// skipped when they cannot be parsed.
fn read_config_file(
    explicit: Option<&Path>,
    env: &impl Fn(&str) -> Option<String>,
) -> Result<Option<(PathBuf, FileConfig)>> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read config file {}: {}", path.display(), e))
        })?;
        let file = serde_json::from_str(&content).map_err(|e| {
            Error::config(format!("failed to parse config file {}: {}", path.display(), e))
        })?;
        return Ok(Some((path.to_path_buf(), file)));
    }

    let mut candidates = vec![PathBuf::from(".").join(CONFIG_FILE_NAME)];
    if let Some(home) = env("HOME") {
        candidates.push(PathBuf::from(home).join(CONFIG_FILE_NAME));
    }

    for path in candidates {
        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };
        if let Ok(file) = serde_json::from_str(&content) {
            return Ok(Some((path, file)));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::load_with(&ConfigOverrides::default(), env_from(&[])).unwrap();
        assert_eq!(config.server.name, "kb-cloud-mcp-server");
        assert_eq!(config.logging.level, "info");
        assert!(config.cloud.api_key.is_none());
        assert!(!config.translations.export);
    }

    #[test]
    fn test_prefixed_env() {
        let env = env_from(&[
            ("KB_CLOUD_MCP_API_KEY", "key"),
            ("KB_CLOUD_MCP_API_SECRET", "secret"),
            ("KB_CLOUD_MCP_SITE_URL", "api.example.com"),
            ("KB_CLOUD_MCP_LOG_LEVEL", "debug"),
            ("KB_CLOUD_MCP_EXPORT_TRANSLATIONS", "1"),
        ]);

        let config = Config::load_with(&ConfigOverrides::default(), env).unwrap();

        assert_eq!(config.cloud.api_key.as_deref(), Some("key"));
        assert_eq!(config.cloud.api_secret.as_deref(), Some("secret"));
        assert_eq!(config.cloud.site.as_deref(), Some("api.example.com"));
        assert_eq!(config.logging.level, "debug");
        assert!(config.translations.export);
    }

    #[test]
    fn test_legacy_env_wins_over_prefixed() {
        let env = env_from(&[
            ("KB_CLOUD_MCP_API_KEY", "prefixed"),
            ("KB_CLOUD_API_KEY_NAME", "legacy"),
            ("KB_CLOUD_API_KEY_SECRET", ""),
            ("KB_CLOUD_MCP_API_SECRET", "prefixed-secret"),
            ("KB_CLOUD_DEBUG", "true"),
        ]);

        let config = Config::load_with(&ConfigOverrides::default(), env).unwrap();

        assert_eq!(config.cloud.api_key.as_deref(), Some("legacy"));
        // empty legacy values are ignored
        assert_eq!(config.cloud.api_secret.as_deref(), Some("prefixed-secret"));
        assert!(config.cloud.debug);
    }

    #[test]
    fn test_flags_win_over_everything() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{ "api-key": "file", "log-level": "warn" }"#);
        let env = env_from(&[("KB_CLOUD_API_KEY_NAME", "legacy")]);
        let overrides = ConfigOverrides {
            config_file: Some(path.clone()),
            api_key: Some("flag".to_string()),
            ..Default::default()
        };

        let config = Config::load_with(&overrides, env).unwrap();

        assert_eq!(config.cloud.api_key.as_deref(), Some("flag"));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.source, Some(path));
    }

    #[test]
    fn test_env_wins_over_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{ "api-key": "file", "api-secret": "file-secret", "site-url": "file.example.com" }"#,
        );
        let env = env_from(&[("KB_CLOUD_MCP_SITE_URL", "env.example.com")]);
        let overrides = ConfigOverrides {
            config_file: Some(path),
            ..Default::default()
        };

        let config = Config::load_with(&overrides, env).unwrap();

        assert_eq!(config.cloud.api_key.as_deref(), Some("file"));
        assert_eq!(config.cloud.api_secret.as_deref(), Some("file-secret"));
        assert_eq!(config.cloud.site.as_deref(), Some("env.example.com"));
    }

    #[test]
    fn test_explicit_config_file_missing_is_error() {
        let overrides = ConfigOverrides {
            config_file: Some(PathBuf::from("/nonexistent/kb-cloud.json")),
            ..Default::default()
        };
        let result = Config::load_with(&overrides, env_from(&[]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_explicit_config_file_malformed_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "api-key: yaml");
        let overrides = ConfigOverrides {
            config_file: Some(path),
            ..Default::default()
        };
        assert!(Config::load_with(&overrides, env_from(&[])).is_err());
    }

    #[test]
    fn test_home_config_discovered() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "api-secret": "from-home" }"#,
        )
        .unwrap();
        let env = env_from(&[("HOME", dir.path().to_str().unwrap())]);

        let config = Config::load_with(&ConfigOverrides::default(), env).unwrap();

        assert_eq!(config.cloud.api_secret.as_deref(), Some("from-home"));
    }

    #[test]
    fn test_cloud_config_redacted_in_debug() {
        let cloud = CloudConfig {
            api_key: Some("key".to_string()),
            api_secret: Some("super_secret_key".to_string()),
            site: None,
            debug: false,
        };
        let debug_str = format!("{:?}", cloud);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }
}
