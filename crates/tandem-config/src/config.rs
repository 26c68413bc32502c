//! File-level configuration model and profile merging.
//!
//! `TandemConfig` mirrors what users write in `tandem.toml` (or the `tandem`
//! field of `package.json`). It is converted into a [`ConfigRequest`] before
//! resolution. For file discovery, see the `discovery` module.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result as ConfigResult};
use crate::plugin::PluginRegistry;
use crate::resolve::{CompanionBuild, ConfigRequest};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TandemConfig {
    #[serde(default)]
    pub server: ServerOptions,

    /// Integration plugin names, resolved through a [`PluginRegistry`].
    #[serde(default)]
    pub plugins: Vec<String>,

    #[serde(default)]
    pub companions: Vec<CompanionBuild>,

    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,

    #[serde(default)]
    pub strict: bool,

    #[serde(default)]
    pub fallback_ports: Vec<i64>,

    #[serde(default)]
    pub clear_screen: bool,

    #[serde(default)]
    pub watch: WatchOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchOptions {
    /// Glob patterns, relative to the project root, hidden from the watcher.
    #[serde(default)]
    pub ignored: Vec<String>,
}

/// Partial overrides applied on top of the base config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub server: Value,

    #[serde(default)]
    pub plugins: Value,

    #[serde(default)]
    pub companions: Value,
}

impl TandemConfig {
    /// Create from `serde_json::Value` (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use tandem_config::TandemConfig;
    /// use serde_json::json;
    ///
    /// let value = json!({
    ///     "server": {
    ///         "port": 1420,
    ///         "strict": true,
    ///         "watch": { "ignored": ["**/src-tauri/**"] }
    ///     }
    /// });
    ///
    /// let config = TandemConfig::from_value(value).unwrap();
    /// assert_eq!(config.server.port, Some(1420));
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to `serde_json::Value`
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Apply the named profile on top of the base sections.
    ///
    /// Objects merge key by key; arrays and scalars replace. Naming a profile
    /// that does not exist is an error.
    pub fn materialize_profile(mut self, profile: Option<&str>) -> ConfigResult<Self> {
        let Some(name) = profile else {
            return Ok(self);
        };

        let overrides = self.profiles.get(name).cloned().ok_or_else(|| {
            ConfigError::InvalidProfileOverride {
                message: format!("profile '{name}' is not defined"),
            }
        })?;

        if !overrides.server.is_null() {
            self.server = merge_section(&self.server, &overrides.server)?;
        }
        if !overrides.plugins.is_null() {
            self.plugins = merge_section(&self.plugins, &overrides.plugins)?;
        }
        if !overrides.companions.is_null() {
            self.companions = merge_section(&self.companions, &overrides.companions)?;
        }

        Ok(self)
    }

    /// Build a resolver request, looking plugin names up in `registry`.
    pub fn to_request(&self, registry: &PluginRegistry) -> ConfigResult<ConfigRequest> {
        Ok(ConfigRequest {
            port: self.server.port,
            strict: self.server.strict,
            fallback_ports: self.server.fallback_ports.clone(),
            host: self.server.host.clone(),
            ignored_patterns: self.server.watch.ignored.clone(),
            plugins: registry.resolve_names(&self.plugins)?,
            companions: self.companions.clone(),
            clear_screen: self.server.clear_screen,
        })
    }
}

fn merge_section<T>(base: &T, update: &Value) -> ConfigResult<T>
where
    T: Serialize + serde::de::DeserializeOwned,
{
    let mut merged = serde_json::to_value(base).map_err(|err| {
        ConfigError::InvalidProfileOverride {
            message: err.to_string(),
        }
    })?;
    merge_values(&mut merged, update);
    serde_json::from_value(merged).map_err(|err| ConfigError::InvalidProfileOverride {
        message: err.to_string(),
    })
}

fn merge_values(target: &mut Value, update: &Value) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_values(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
        (target_slot, _) => {
            *target_slot = update.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_value_creates_config() {
        let value = json!({
            "server": { "port": 1420, "strict": true },
            "plugins": ["sveltekit"]
        });

        let config = TandemConfig::from_value(value).unwrap();
        assert_eq!(config.server.port, Some(1420));
        assert!(config.server.strict);
        assert_eq!(config.plugins, vec!["sveltekit"]);
    }

    #[test]
    fn from_value_rejects_wrong_types() {
        let value = json!({ "server": { "port": "fourteen-twenty" } });
        assert!(matches!(
            TandemConfig::from_value(value),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn to_value_serializes_config() {
        let mut config = TandemConfig::default();
        config.server.port = Some(3000);
        config.server.watch.ignored = vec!["dist/**".to_string()];

        let value = config.to_value().unwrap();
        assert_eq!(value["server"]["port"], json!(3000));
        assert_eq!(value["server"]["watch"]["ignored"], json!(["dist/**"]));
    }

    #[test]
    fn profile_merges_nested_server_options() {
        let value = json!({
            "server": {
                "port": 1420,
                "strict": true,
                "watch": { "ignored": ["**/src-tauri/**"] }
            },
            "profiles": {
                "ci": {
                    "server": { "strict": false, "fallback_ports": [1500] }
                }
            }
        });

        let config = TandemConfig::from_value(value)
            .unwrap()
            .materialize_profile(Some("ci"))
            .unwrap();

        assert_eq!(config.server.port, Some(1420));
        assert!(!config.server.strict);
        assert_eq!(config.server.fallback_ports, vec![1500]);
        assert_eq!(config.server.watch.ignored, vec!["**/src-tauri/**"]);
    }

    #[test]
    fn profile_arrays_replace() {
        let value = json!({
            "plugins": ["sveltekit", "inspector"],
            "profiles": { "release": { "plugins": ["sveltekit"] } }
        });

        let config = TandemConfig::from_value(value)
            .unwrap()
            .materialize_profile(Some("release"))
            .unwrap();
        assert_eq!(config.plugins, vec!["sveltekit"]);
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let result = TandemConfig::default().materialize_profile(Some("staging"));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidProfileOverride { .. })
        ));
    }

    #[test]
    fn to_request_resolves_plugin_names() {
        let value = json!({
            "server": { "port": 5173 },
            "plugins": ["sveltekit", "sveltekit"]
        });
        let config = TandemConfig::from_value(value).unwrap();
        let registry = PluginRegistry::with_names(["sveltekit"]);

        let request = config.to_request(&registry).unwrap();
        assert_eq!(request.port, Some(5173));
        assert_eq!(request.plugins.len(), 2);
        assert!(request.plugins[0].same_instance(&request.plugins[1]));
    }
}
