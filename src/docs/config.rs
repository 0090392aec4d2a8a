//! Optional YAML configuration of the documentation pipeline.

use crate::constants::DEFAULT_DOCS_INCLUDE;
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Tool producing DocBook from AsciiDoc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Asciidoctor,
    Asciidoc,
}

/// Layout options handed to pandoc when producing PDF.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PdfOptions {
    pub main_font: String,
    pub mono_font: String,
    pub font_size: String,
    pub margin: String,
    pub paper_size: String,
    pub document_class: String,
    pub highlight_style: String,
    /// LaTeX header included with `-H`
    pub header: Option<PathBuf>,
    /// Lua filter applied during conversion
    pub lua_filter: Option<PathBuf>,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            main_font: "SF Pro".to_string(),
            mono_font: "Fira Code".to_string(),
            font_size: "11pt".to_string(),
            margin: "0.5in".to_string(),
            paper_size: "a4".to_string(),
            document_class: "article".to_string(),
            highlight_style: "tango".to_string(),
            header: None,
            lua_filter: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    pub backend: Backend,
    /// Glob patterns, relative to the source root, selecting the documents to convert
    pub include: Vec<String>,
    pub pdf: PdfOptions,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            include: vec![DEFAULT_DOCS_INCLUDE.to_string()],
            pdf: PdfOptions::default(),
        }
    }
}

/// Loads the pipeline configuration.
///
/// `pdf.header` and `pdf.lua_filter` are resolved against the directory of the
/// configuration file. An empty file yields the defaults.
pub fn load_docs_config<P: AsRef<Path>>(path: P) -> Result<DocsConfig> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::ConfigError(format!(
            "configuration file '{}' not found",
            path.display()
        )));
    }
    debug!("Loading pipeline configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let mut config: DocsConfig = if content.trim().is_empty() {
        DocsConfig::default()
    } else {
        serde_yaml::from_str(&content)?
    };

    let config_dir = path.parent().unwrap_or_else(|| Path::new(""));
    for option in [&mut config.pdf.header, &mut config.pdf.lua_filter] {
        if let Some(file) = option.take() {
            *option = Some(if file.is_absolute() { file } else { config_dir.join(file) });
        }
    }
    Ok(config)
}
