//! File-based config discovery for CLI use
//!
//! Finds a Tandem configuration file, layers `TANDEM_` environment variables
//! over it with figment, and extracts a [`TandemConfig`].

use std::fs;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde_json::Value;
use tracing::debug;

use crate::config::TandemConfig;
use crate::error::{ConfigError, Result};

/// Primary config file name.
pub const CONFIG_FILE: &str = "tandem.toml";

/// Prefix for environment overrides; nested keys are separated by `__`
/// (`TANDEM_SERVER__PORT=5000`).
pub const ENV_PREFIX: &str = "TANDEM_";

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use tandem_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. `tandem.toml`
    /// 2. `package.json` with a non-null `tandem` field
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed = serde_json::from_str::<Value>(&content).ok()?;
        match parsed.get("tandem") {
            Some(value) if !value.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Load config from the discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<TandemConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        self.load_from(&path)
    }

    /// Load config and apply a profile
    pub fn load_with_profile(&self, profile: &str) -> Result<TandemConfig> {
        self.load()?.materialize_profile(Some(profile))
    }

    /// Load config from a specific file, relative paths resolving against the root.
    pub fn load_from(&self, path: &Path) -> Result<TandemConfig> {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        if !path.exists() {
            return Err(ConfigError::NotFound);
        }

        debug!(path = %path.display(), "loading config");

        let figment = if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            Figment::from(Serialized::defaults(read_package_field(&path)?))
        } else {
            Figment::from(Toml::file(&path))
        };

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::InvalidValue {
                field: "configuration".to_string(),
                hint: Some(e.to_string()),
            })
    }
}

fn read_package_field(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;

    let parsed: Value = serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
        field: "package.json".to_string(),
        hint: Some(format!("Invalid JSON: {e}")),
    })?;

    match parsed.get("tandem") {
        Some(value) if !value.is_null() => Ok(value.clone()),
        Some(_) => Err(ConfigError::InvalidValue {
            field: "tandem".to_string(),
            hint: Some("The 'tandem' field cannot be null".to_string()),
        }),
        None => Err(ConfigError::InvalidValue {
            field: "tandem".to_string(),
            hint: Some("Add a 'tandem' field to your package.json".to_string()),
        }),
    }
}

/// Discover and load config from the current directory
pub fn discover() -> Result<TandemConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}

/// Discover and load config from the current directory with a profile applied
pub fn discover_with_profile(profile: &str) -> Result<TandemConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load_with_profile(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn find_skips_package_json_without_field() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "app" }"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn toml_takes_precedence_over_package_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[server]\nport = 1420\n").unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{ "tandem": { "server": { "port": 3000 } } }"#,
        )
        .unwrap();

        let found = ConfigDiscovery::new(dir.path()).find().unwrap();
        assert_eq!(found.file_name().unwrap(), CONFIG_FILE);
    }

    #[test]
    fn load_returns_not_found_when_no_config() {
        let dir = TempDir::new().unwrap();
        let result = ConfigDiscovery::new(dir.path()).load();
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn load_from_rejects_null_package_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{ "tandem": null }"#).unwrap();

        let result = ConfigDiscovery::new(dir.path()).load_from(&path);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "tandem"
        ));
    }
}
