//! Framework-integration plugins applied on top of the base bundler configuration.
//!
//! The resolver treats plugins as opaque: it only keeps their order and drops
//! repeated references to the same instance.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// Hook supplied by a UI framework integration.
pub trait IntegrationPlugin: fmt::Debug + Send + Sync {
    /// Name used in diagnostics and config files.
    fn name(&self) -> &str;
}

/// Shared reference to a plugin. Equality is identity, not structure.
#[derive(Clone)]
pub struct PluginHandle(Arc<dyn IntegrationPlugin>);

impl PluginHandle {
    pub fn new(plugin: impl IntegrationPlugin + 'static) -> Self {
        Self(Arc::new(plugin))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn same_instance(&self, other: &PluginHandle) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl From<Arc<dyn IntegrationPlugin>> for PluginHandle {
    fn from(plugin: Arc<dyn IntegrationPlugin>) -> Self {
        Self(plugin)
    }
}

impl PartialEq for PluginHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
    }
}

impl Eq for PluginHandle {}

impl fmt::Debug for PluginHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PluginHandle").field(&self.0).finish()
    }
}

impl Serialize for PluginHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Ordered, duplicate-free sequence of plugins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IntegrationPluginSet {
    plugins: Vec<PluginHandle>,
}

impl IntegrationPluginSet {
    /// Keep the first occurrence of every instance.
    ///
    /// Returns the set together with the positions (in `plugins`) of the
    /// references that were dropped.
    pub fn dedup(plugins: &[PluginHandle]) -> (Self, Vec<usize>) {
        let mut kept: Vec<PluginHandle> = Vec::with_capacity(plugins.len());
        let mut dropped = Vec::new();

        for (position, plugin) in plugins.iter().enumerate() {
            if kept.iter().any(|k| k.same_instance(plugin)) {
                dropped.push(position);
            } else {
                kept.push(plugin.clone());
            }
        }

        (Self { plugins: kept }, dropped)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginHandle> {
        self.plugins.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(PluginHandle::name).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

/// Plugin known only by name, used for integrations declared in config files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedPlugin {
    name: String,
}

impl NamedPlugin {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl IntegrationPlugin for NamedPlugin {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Maps plugin names from config files onto shared handles.
///
/// Looking up the same name twice yields the same instance, so repeated names
/// in a config file deduplicate like repeated references in code.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, PluginHandle>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with a handle for each given name.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for name in names {
            registry.register(PluginHandle::new(NamedPlugin::new(name)));
        }
        registry
    }

    /// Register a plugin under its own name, replacing any previous entry.
    pub fn register(&mut self, plugin: PluginHandle) -> &mut Self {
        self.plugins.insert(plugin.name().to_string(), plugin);
        self
    }

    pub fn get(&self, name: &str) -> Result<PluginHandle> {
        self.plugins
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownPlugin {
                name: name.to_string(),
            })
    }

    pub fn resolve_names<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<PluginHandle>> {
        names.iter().map(|n| self.get(n.as_ref())).collect()
    }
}
