//! Common constants used throughout stencil.

/// Scaffolder configuration file looked up when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "stencil.yaml";

/// Default AsciiDoc source tree of the documentation pipeline
pub const DEFAULT_DOCS_SOURCE: &str = "docs/adoc";

/// Default output root of the documentation pipeline
pub const DEFAULT_DOCS_OUTPUT: &str = "docs/gen";

/// Source files picked up by the documentation pipeline unless configured otherwise
pub const DEFAULT_DOCS_INCLUDE: &str = "**/*.adoc";
