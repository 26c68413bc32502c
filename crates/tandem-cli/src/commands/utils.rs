//! Shared configuration loading for command implementations.

use crate::cli::ConfigArgs;
use crate::error::{CliError, Result};
use crate::ui;
use std::path::{Path, PathBuf};
use tandem_config::{resolve, ConfigDiscovery, ConfigError, EffectiveConfig, PluginRegistry, TandemConfig};

/// Framework integrations the CLI can reference by name from config files.
pub const KNOWN_INTEGRATIONS: &[&str] = &[
    "sveltekit", "svelte", "react", "preact", "vue", "solid", "qwik", "lit",
];

/// Resolve the project root from `--cwd` or the current directory.
pub fn project_root(args: &ConfigArgs) -> Result<PathBuf> {
    let root = match &args.cwd {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => std::env::current_dir()?.join(dir),
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        return Err(CliError::FileNotFound(root));
    }
    Ok(root)
}

/// Load the file configuration and apply the selected profile.
///
/// Without `--config`, a missing config file falls back to defaults with a warning.
pub fn load_config(root: &Path, args: &ConfigArgs) -> Result<TandemConfig> {
    let discovery = ConfigDiscovery::new(root);
    let config = match &args.config {
        Some(path) => discovery.load_from(path).map_err(|err| match err {
            ConfigError::NotFound => CliError::FileNotFound(resolve_path(path, root)),
            other => other.into(),
        })?,
        None => match discovery.load() {
            Ok(config) => config,
            Err(ConfigError::NotFound) => {
                ui::warning("No tandem.toml found, using defaults");
                TandemConfig::default()
            }
            Err(err) => return Err(err.into()),
        },
    };

    Ok(config.materialize_profile(args.profile.as_deref())?)
}

/// Turn file configuration into an effective configuration.
pub fn resolve_config(config: &TandemConfig) -> Result<EffectiveConfig> {
    let registry = PluginRegistry::with_names(KNOWN_INTEGRATIONS.iter().copied());
    let request = config.to_request(&registry)?;
    Ok(resolve(&request)?)
}

fn resolve_path(path: &Path, root: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args_for(dir: &Path) -> ConfigArgs {
        ConfigArgs {
            cwd: Some(dir.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path(), &args_for(dir.path())).unwrap();
        let effective = resolve_config(&config).unwrap();
        assert_eq!(effective.binding.port, tandem_config::DEFAULT_PORT);
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let args = ConfigArgs {
            config: Some(PathBuf::from("nope.toml")),
            ..args_for(dir.path())
        };
        assert!(matches!(
            load_config(dir.path(), &args),
            Err(CliError::FileNotFound(path)) if path.ends_with("nope.toml")
        ));
    }

    #[test]
    fn known_integrations_resolve() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("tandem.toml"),
            "plugins = [\"sveltekit\", \"sveltekit\"]\n",
        )
        .unwrap();

        let config = load_config(dir.path(), &args_for(dir.path())).unwrap();
        let effective = resolve_config(&config).unwrap();
        assert_eq!(effective.plugins.names(), vec!["sveltekit"]);
    }

    #[test]
    fn project_root_must_exist() {
        let args = ConfigArgs {
            cwd: Some(PathBuf::from("/definitely/not/here")),
            ..Default::default()
        };
        assert!(matches!(project_root(&args), Err(CliError::FileNotFound(_))));
    }
}
