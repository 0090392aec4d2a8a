//! Configuration handling for the scaffolder.
//! Loads the YAML configuration file, resolves the paths of its `init` section
//! and turns the whole document into the rendering context.

use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Paths every scaffolder configuration must provide.
#[derive(Debug, Deserialize)]
struct InitSection {
    basedir: PathBuf,
    templates: PathBuf,
    structure: PathBuf,
}

/// Parsed scaffolder configuration.
#[derive(Debug)]
pub struct Config {
    /// Directory the structure is materialized into
    pub basedir: PathBuf,
    /// Template directory backing the catalog
    pub templates: PathBuf,
    /// Structure descriptor template
    pub structure: PathBuf,
    /// Whole configuration document, with the resolved `init` paths written back
    pub context: serde_json::Value,
}

/// Loads a configuration file.
///
/// Relative paths in the `init` section are resolved against the directory
/// containing the configuration file.
///
/// # Errors
/// * `Error::ConfigError` if the file does not exist or `init` is incomplete
/// * `Error::YamlError` if the file is not valid YAML
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<Config> {
    let config_path = config_path.as_ref();
    if !config_path.is_file() {
        return Err(Error::ConfigError(format!(
            "configuration file '{}' not found",
            config_path.display()
        )));
    }
    debug!("Loading configuration from {}", config_path.display());
    let content = std::fs::read_to_string(config_path)?;
    let config_dir = config_path.parent().unwrap_or_else(|| Path::new(""));
    parse_config(&content, config_dir)
}

/// Parses configuration text, resolving relative paths against `config_dir`.
pub fn parse_config(content: &str, config_dir: &Path) -> Result<Config> {
    let mut context: serde_json::Value = serde_yaml::from_str(content)?;

    let init = context
        .get("init")
        .cloned()
        .ok_or_else(|| Error::ConfigError("missing 'init' section".to_string()))?;
    let init: InitSection = serde_json::from_value(init)
        .map_err(|e| Error::ConfigError(format!("invalid 'init' section: {e}")))?;

    let basedir = resolve_path(config_dir, &init.basedir)?;
    let templates = resolve_path(config_dir, &init.templates)?;
    let structure = resolve_path(config_dir, &init.structure)?;

    debug!("basedir: {}", basedir.display());
    debug!("templates: {}", templates.display());
    debug!("structure: {}", structure.display());

    if let Some(section) = context.get_mut("init").and_then(|v| v.as_object_mut()) {
        let resolved = [
            ("basedir", &basedir),
            ("templates", &templates),
            ("structure", &structure),
        ];
        for (key, path) in resolved {
            let value = serde_json::Value::String(path.display().to_string());
            section.insert(key.to_string(), value);
        }
    }

    Ok(Config {
        basedir,
        templates,
        structure,
        context,
    })
}

fn resolve_path(config_dir: &Path, path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::path::absolute(config_dir.join(path))?)
}
