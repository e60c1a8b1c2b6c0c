//! Template registry loaded from embedded or runtime YAML.
//!
//! Maps template ids (e.g. `dva`, `umi`) to repository locators. The registry
//! is loaded once at startup and only read afterwards.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Registry bundled into the binary
const EMBEDDED_YAML: &str = include_str!("../templates/templates.yaml");

/// Registry file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub version: Option<String>,
    pub templates: BTreeMap<String, TemplateEntry>,
}

/// Single registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Repository locator, e.g. `owner/name` or `gitlab:owner/name#dev`
    pub repository: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Immutable template id → repository locator mapping
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, TemplateEntry>,
}

impl TemplateRegistry {
    /// Load the registry bundled with the binary
    pub fn from_embedded() -> Result<Self> {
        Self::from_yaml(EMBEDDED_YAML)
    }

    /// Load a registry from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("Loading template registry from {:?}", path.as_ref());
        let yaml = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&yaml)
    }

    /// Load a registry from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: RegistryConfig = serde_yaml_ng::from_str(yaml)?;
        if config.templates.is_empty() {
            return Err(Error::EmptyRegistry);
        }
        Ok(Self {
            templates: config.templates,
        })
    }

    /// Build a registry from `(id, locator)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let templates: BTreeMap<_, _> = pairs
            .into_iter()
            .map(|(id, repository)| {
                (
                    id.into(),
                    TemplateEntry {
                        repository: repository.into(),
                        description: None,
                    },
                )
            })
            .collect();

        if templates.is_empty() {
            return Err(Error::EmptyRegistry);
        }
        Ok(Self { templates })
    }

    /// Repository locator registered for `id`
    pub fn locate(&self, id: &str) -> Result<&str> {
        self.templates
            .get(id)
            .map(|entry| entry.repository.as_str())
            .ok_or_else(|| Error::template_not_found(id, self.ids().join(", ")))
    }

    /// Template ids in stable (sorted) order
    pub fn ids(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    pub fn description(&self, id: &str) -> Option<&str> {
        self.templates.get(id)?.description.as_deref()
    }

    /// Iterate over `(id, entry)` in stable order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TemplateEntry)> {
        self.templates.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
