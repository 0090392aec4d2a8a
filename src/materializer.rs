//! Tree materialization: turns a structure descriptor into directories and
//! rendered files under a base path.

use crate::catalog::TemplateCatalog;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::structure::{Node, Structure};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of a materialization run.
#[derive(Debug, Default, PartialEq)]
pub struct Materialized {
    /// Every directory and file written, in walk order
    pub created: Vec<PathBuf>,
    /// Non-fatal problems, one per missing template
    pub warnings: Vec<String>,
}

/// Walks a [`Structure`] and writes it to disk.
///
/// The context is shared read-only by every render call of the run.
pub struct Materializer<'a> {
    catalog: &'a TemplateCatalog,
    renderer: &'a dyn TemplateRenderer,
    context: &'a serde_json::Value,
}

impl<'a> Materializer<'a> {
    pub fn new(
        catalog: &'a TemplateCatalog,
        renderer: &'a dyn TemplateRenderer,
        context: &'a serde_json::Value,
    ) -> Self {
        Self {
            catalog,
            renderer,
            context,
        }
    }

    /// Creates every entry of `structure` under `base_path`.
    ///
    /// Existing directories are reused and existing files are overwritten, so
    /// running twice with the same input yields the same tree.
    ///
    /// # Errors
    /// * `Error::EntryConflict` when a file is requested where a directory
    ///   exists, or a directory where something else exists
    /// * `Error::TemplateRenderError` when a template fails to render; the run
    ///   stops at that entry
    pub fn materialize<P: AsRef<Path>>(
        &self,
        structure: &Structure,
        base_path: P,
    ) -> Result<Materialized> {
        let mut outcome = Materialized::default();
        self.walk(structure, base_path.as_ref(), &mut outcome)?;
        Ok(outcome)
    }

    fn walk(
        &self,
        structure: &Structure,
        base_path: &Path,
        outcome: &mut Materialized,
    ) -> Result<()> {
        for (name, node) in structure {
            let path = base_path.join(name);
            match node {
                Node::Directory(children) => {
                    ensure_dir(&path)?;
                    outcome.created.push(path.clone());
                    self.walk(children, &path, outcome)?;
                }
                Node::Empty => {
                    ensure_dir(&path)?;
                    outcome.created.push(path);
                }
                Node::Template(template) => {
                    let content = match self.catalog.source(template)? {
                        Some(source) => self.renderer.render(&source, self.context)?,
                        None => {
                            let message = format!(
                                "Template '{}' not found. Creating an empty file '{}'.",
                                template,
                                path.display()
                            );
                            warn!("{message}");
                            outcome.warnings.push(message);
                            String::new()
                        }
                    };
                    write_file(&path, &content)?;
                    outcome.created.push(path);
                }
            }
        }
        Ok(())
    }
}

/// Convenience wrapper around [`Materializer::materialize`].
pub fn materialize<P: AsRef<Path>>(
    structure: &Structure,
    base_path: P,
    catalog: &TemplateCatalog,
    renderer: &dyn TemplateRenderer,
    context: &serde_json::Value,
) -> Result<Materialized> {
    Materializer::new(catalog, renderer, context).materialize(structure, base_path)
}

fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        debug!("Directory exists: {}", path.display());
        return Ok(());
    }
    if fs::symlink_metadata(path).is_ok() {
        return Err(Error::EntryConflict {
            path: path.to_path_buf(),
            expected: "directory",
            found: "file",
        });
    }
    debug!("Creating directory: {}", path.display());
    fs::create_dir_all(path)?;
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if path.is_dir() {
        return Err(Error::EntryConflict {
            path: path.to_path_buf(),
            expected: "file",
            found: "directory",
        });
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    debug!("Writing file: {}", path.display());
    fs::write(path, content)?;
    Ok(())
}
