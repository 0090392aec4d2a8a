//! Stencil materializes project skeletons from declarative structure descriptors
//! and removes them again, and converts AsciiDoc documentation trees into
//! DocBook, Markdown and PDF.

/// Template directory lookups
pub mod catalog;

/// Command-line interfaces of the `stencil` and `stencil-docs` binaries
pub mod cli;

/// Scaffolder configuration (YAML)
pub mod config;

/// Common constants
pub mod constants;

/// Removal of materialized trees
pub mod demolisher;

/// AsciiDoc conversion pipeline
pub mod docs;

/// Error types and handling
pub mod error;

/// Logger setup shared by the binaries
pub mod logger;

/// Creation of directories and rendered files from a structure descriptor
pub mod materializer;

/// Template rendering
pub mod renderer;

/// Structure descriptor model and loading
pub mod structure;
