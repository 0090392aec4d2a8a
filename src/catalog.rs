//! Template catalog: resolves template names to template source text.

use crate::error::Result;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory of templates referenced by name from a structure descriptor.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    root: PathBuf,
}

impl TemplateCatalog {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Location a template name resolves to, whether or not it exists.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Reads the source of the named template.
    ///
    /// # Returns
    /// * `Ok(None)` if no file exists under that name
    /// * `Ok(Some(source))` with the template text otherwise
    ///
    /// # Errors
    /// * `Error::IoError` if the file exists but cannot be read
    pub fn source(&self, name: &str) -> Result<Option<String>> {
        let path = self.path_of(name);
        if !path.is_file() {
            debug!("Template not found: {}", path.display());
            return Ok(None);
        }
        debug!("Loading template {}", path.display());
        Ok(Some(fs::read_to_string(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_source() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("main.tpl"), "# {{ name }}").unwrap();
        fs::create_dir(temp_dir.path().join("nested")).unwrap();

        let catalog = TemplateCatalog::new(temp_dir.path());
        assert_eq!(catalog.source("main.tpl").unwrap().as_deref(), Some("# {{ name }}"));
        assert!(catalog.source("missing.tpl").unwrap().is_none());
        // A directory is not a template.
        assert!(catalog.source("nested").unwrap().is_none());
    }
}
