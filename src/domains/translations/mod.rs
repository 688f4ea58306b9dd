//! Translations domain module.
//!
//! Tool and parameter descriptions go through a [`Translator`] so they can be
//! overridden without code changes. A lookup resolves a key once, in order:
//!
//! 1. a value already resolved for the key,
//! 2. the environment variable `KB_CLOUD_MCP_<KEY>`,
//! 3. the override file `kb-cloud-mcp-server-config.json`, if present,
//! 4. the supplied default.
//!
//! The first resolution is kept for the lifetime of the translator, later
//! environment changes are not observed. [`Translator::flush`] exports the
//! resolved map in the override file format.

mod error;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use tracing::{debug, warn};

pub use error::TranslationError;

/// Prefix of the environment variables consulted by lookups.
pub const ENV_PREFIX: &str = "KB_CLOUD_MCP_";

/// File name used for both the override file and exports.
pub const EXPORT_FILE: &str = "kb-cloud-mcp-server-config.json";

/// Memoizing key/value lookup for overridable strings.
#[derive(Debug)]
pub struct Translator {
    prefix: String,
    file_values: HashMap<String, String>,
    resolved: RwLock<HashMap<String, String>>,
}

impl Translator {
    /// Create a translator using [`ENV_PREFIX`] and the override file in the
    /// working directory. A missing file is fine, a malformed one is ignored.
    pub fn new() -> Self {
        let file_values = match load_file(EXPORT_FILE) {
            Ok(values) => values,
            Err(TranslationError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                HashMap::new()
            }
            Err(e) => {
                warn!("Could not read {}: {}", EXPORT_FILE, e);
                HashMap::new()
            }
        };

        Self::with_sources(ENV_PREFIX, file_values)
    }

    /// Create a translator with an explicit environment prefix and file values.
    pub fn with_sources(prefix: impl Into<String>, file_values: HashMap<String, String>) -> Self {
        let file_values = file_values
            .into_iter()
            .map(|(k, v)| (k.to_uppercase(), v))
            .collect();

        Self {
            prefix: prefix.into(),
            file_values,
            resolved: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve `key`, falling back to `default`.
    pub fn lookup(&self, key: &str, default: &str) -> String {
        let key = key.to_uppercase();

        if let Some(value) = self
            .resolved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return value.clone();
        }

        let mut resolved = self.resolved.write().unwrap_or_else(PoisonError::into_inner);
        resolved
            .entry(key)
            .or_insert_with_key(|key| {
                if let Ok(value) = std::env::var(format!("{}{}", self.prefix, key)) {
                    debug!("Translation {} overridden from environment", key);
                    return value;
                }
                if let Some(value) = self.file_values.get(key) {
                    debug!("Translation {} overridden from {}", key, EXPORT_FILE);
                    return value.clone();
                }
                default.to_string()
            })
            .clone()
    }

    /// Copy of the resolved map, ordered by key.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.resolved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Write the resolved map to [`EXPORT_FILE`] in the working directory.
    pub fn flush(&self) -> Result<(), TranslationError> {
        self.flush_to(EXPORT_FILE)
    }

    /// Write the resolved map as pretty-printed JSON to `path`.
    pub fn flush_to(&self, path: impl AsRef<Path>) -> Result<(), TranslationError> {
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a JSON object of strings, as written by [`Translator::flush_to`].
pub fn load_file(path: impl AsRef<Path>) -> Result<HashMap<String, String>, TranslationError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn isolated() -> Translator {
        Translator::with_sources("KB_CLOUD_MCP_UNIT_TEST_UNSET_", HashMap::new())
    }

    #[test]
    fn test_lookup_returns_default() {
        let t = isolated();
        assert_eq!(t.lookup("tool_list_organizations_description", "List orgs"), "List orgs");
    }

    #[test]
    fn test_lookup_is_memoized() {
        let t = isolated();
        assert_eq!(t.lookup("some_key", "first"), "first");
        assert_eq!(t.lookup("some_key", "second"), "first");
        assert_eq!(t.lookup("SOME_KEY", "third"), "first");
    }

    #[test]
    fn test_keys_are_uppercased() {
        let t = isolated();
        t.lookup("mixed_Case", "value");
        assert!(t.snapshot().contains_key("MIXED_CASE"));
    }

    #[test]
    fn test_env_override() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("KB_CLOUD_MCP_TR_TEST_ENV_KEY", "from env");
        }

        let t = Translator::with_sources("KB_CLOUD_MCP_", HashMap::new());
        assert_eq!(t.lookup("tr_test_env_key", "default"), "from env");

        // later environment changes are not observed
        unsafe {
            std::env::set_var("KB_CLOUD_MCP_TR_TEST_ENV_KEY", "changed");
        }
        assert_eq!(t.lookup("tr_test_env_key", "default"), "from env");

        unsafe {
            std::env::remove_var("KB_CLOUD_MCP_TR_TEST_ENV_KEY");
        }
    }

    #[test]
    fn test_file_values_used_before_default() {
        let mut file = HashMap::new();
        file.insert("tool_get_backup_description".to_string(), "From file".to_string());
        let t = Translator::with_sources("KB_CLOUD_MCP_UNIT_TEST_UNSET_", file);

        assert_eq!(t.lookup("TOOL_GET_BACKUP_DESCRIPTION", "default"), "From file");
    }

    #[test]
    fn test_flush_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(EXPORT_FILE);

        let t = isolated();
        t.lookup("alpha", "A");
        t.lookup("beta", "B \"quoted\"");
        t.flush_to(&path).unwrap();

        let reloaded = load_file(&path).unwrap();
        let expected: HashMap<_, _> = t.snapshot().into_iter().collect();
        assert_eq!(reloaded, expected);
    }

    #[test]
    fn test_flushed_file_overrides_next_translator() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(EXPORT_FILE);

        let first = isolated();
        first.lookup("gamma", "exported");
        first.flush_to(&path).unwrap();

        let second =
            Translator::with_sources("KB_CLOUD_MCP_UNIT_TEST_UNSET_", load_file(&path).unwrap());
        assert_eq!(second.lookup("gamma", "other"), "exported");
    }

    #[test]
    fn test_load_file_rejects_non_object() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        assert!(matches!(load_file(&path), Err(TranslationError::Json(_))));
    }
}
