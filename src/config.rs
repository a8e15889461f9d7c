//! Configuration file support for pending-releases.
//!
//! Provides YAML-based configuration through `pending-releases.config.yml`
//! files: the master catalog location, up to three instance connections and
//! an optional product catalog override. Everything is validated before the
//! first prompt or query.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::reconciliation::domain::{
    CatalogFilter, ProductCatalog, ProductDescriptor, MAX_INSTANCES,
};
use crate::shared::error::ReleaseError;
use crate::shared::security::{validate_regular_file, MAX_CONFIG_FILE_SIZE};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "pending-releases.config.yml";

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

const CONFIG_HINT: &str = "Please check the config.";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub ga_releases_only: bool,
    pub catalog: Option<CatalogConfig>,
    #[serde(default)]
    pub instances: Vec<InstanceEntry>,
    pub connect_timeout_secs: Option<u64>,
    pub products: Option<Vec<ProductDescriptor>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Location of the master release catalog.
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
}

/// One `instances` entry as written in the file; every field may be missing.
#[derive(Debug, Deserialize, Default)]
pub struct InstanceEntry {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub name: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub label: Option<String>,
}

/// Complete connection details of one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub label: Option<String>,
}

impl InstanceConfig {
    /// Column header for this instance: the label, or the database name
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub catalog_path: PathBuf,
    pub catalog_filter: CatalogFilter,
    pub instances: Vec<InstanceConfig>,
    pub connect_timeout: Duration,
    pub products: ProductCatalog,
}

fn configuration_error(details: impl Into<String>) -> ReleaseError {
    ReleaseError::Configuration {
        details: details.into(),
        hint: CONFIG_HINT.to_string(),
    }
}

/// Trimmed value, with blank treated as missing.
fn required(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl InstanceEntry {
    /// Validates the entry; `number` is 1-based for error messages.
    fn validate(&self, number: usize) -> std::result::Result<InstanceConfig, ReleaseError> {
        let missing = || configuration_error(format!("Missing connection detail for instance {}", number));

        Ok(InstanceConfig {
            host: required(&self.host).ok_or_else(missing)?,
            port: self.port.filter(|p| *p != 0).ok_or_else(missing)?,
            name: required(&self.name).ok_or_else(missing)?,
            user: required(&self.user).ok_or_else(missing)?,
            password: required(&self.password).ok_or_else(missing)?,
            label: required(&self.label),
        })
    }
}

/// Report columns are keyed by label, so two instances cannot share one.
fn reject_duplicate_labels(instances: &[InstanceConfig]) -> std::result::Result<(), ReleaseError> {
    for (i, instance) in instances.iter().enumerate() {
        if let Some(earlier) = instances[..i]
            .iter()
            .position(|other| other.display_label() == instance.display_label())
        {
            return Err(configuration_error(format!(
                "Instances {} and {} share the label '{}'; set a distinct `label` for one of them",
                earlier + 1,
                i + 1,
                instance.display_label()
            )));
        }
    }
    Ok(())
}

impl ConfigFile {
    /// Validates the file contents into run settings.
    ///
    /// A relative catalog path is resolved against `base_dir`, the directory
    /// holding the config file.
    pub fn into_settings(self, base_dir: &Path) -> Result<Settings> {
        let catalog_path = self
            .catalog
            .and_then(|c| c.path)
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| configuration_error("Missing catalog path"))?;
        let catalog_path = if catalog_path.is_relative() {
            base_dir.join(catalog_path)
        } else {
            catalog_path
        };

        if self.instances.is_empty() {
            return Err(configuration_error("No instances configured").into());
        }
        if self.instances.len() > MAX_INSTANCES {
            return Err(configuration_error(format!(
                "At most {} instances can be compared, found {}",
                MAX_INSTANCES,
                self.instances.len()
            ))
            .into());
        }

        let instances = self
            .instances
            .iter()
            .enumerate()
            .map(|(i, entry)| entry.validate(i + 1))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        reject_duplicate_labels(&instances)?;

        let products = match self.products {
            Some(products) => ProductCatalog::new(
                products
                    .into_iter()
                    .map(ProductDescriptor::normalized)
                    .collect(),
            )
            .map_err(|e| configuration_error(format!("Invalid products list: {}", e)))?,
            None => ProductCatalog::default(),
        };

        let timeout_secs = self
            .connect_timeout_secs
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(configuration_error("connect_timeout_secs must be greater than 0").into());
        }

        Ok(Settings {
            catalog_path,
            catalog_filter: CatalogFilter::from_ga_only(self.ga_releases_only),
            instances,
            connect_timeout: Duration::from_secs(timeout_secs),
            products,
        })
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Err(configuration_error(format!("File {} does not exist.", path.display())).into());
    }
    validate_regular_file(path, "config file", MAX_CONFIG_FILE_SIZE)?;

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Loads and validates the settings for a run.
///
/// Uses `explicit` when given, otherwise `pending-releases.config.yml` in
/// `working_dir`.
pub fn load_settings(explicit: Option<&Path>, working_dir: &Path) -> Result<Settings> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => working_dir.join(CONFIG_FILENAME),
    };

    let config = match explicit {
        Some(_) => load_config_from_path(&path)?,
        None => discover_config(working_dir)?.ok_or_else(|| {
            configuration_error(format!("File {} does not exist.", path.display()))
        })?,
    };

    let base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(working_dir);
    config.into_settings(base_dir)
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
