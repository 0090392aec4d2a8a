//! External converters invoked by the documentation pipeline.

use crate::docs::config::{Backend, PdfOptions};
use crate::error::{Error, Result};
use log::{debug, info, warn};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Converts one file into another.
pub trait Converter {
    /// Produces `output` from `input`.
    ///
    /// # Errors
    /// * `Error::ExternalToolError` if the conversion fails
    fn convert(&self, input: &Path, output: &Path) -> Result<()>;
}

/// Converter backed by a command line tool invoked as
/// `<program> <args...> -o <output> <input>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalConverter {
    program: String,
    args: Vec<OsString>,
}

impl ExternalConverter {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg<S: Into<OsString>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// `asciidoctor -b docbook --trace`
    pub fn asciidoctor() -> Self {
        Self::new("asciidoctor").args(["-b", "docbook", "--trace"])
    }

    /// `asciidoc -b docbook`
    pub fn asciidoc() -> Self {
        Self::new("asciidoc").args(["-b", "docbook"])
    }

    pub fn docbook(backend: Backend) -> Self {
        match backend {
            Backend::Asciidoctor => Self::asciidoctor(),
            Backend::Asciidoc => Self::asciidoc(),
        }
    }

    /// `pandoc -f docbook -t markdown`
    pub fn pandoc_markdown() -> Self {
        Self::new("pandoc").args(["-f", "docbook", "-t", "markdown"])
    }

    /// pandoc through xelatex with the given layout.
    pub fn pandoc_pdf(options: &PdfOptions) -> Self {
        let mut converter = Self::new("pandoc").args(["-f", "docbook", "--pdf-engine=xelatex"]);
        if let Some(header) = &options.header {
            converter = converter.arg("-H").arg(header.as_os_str());
        }
        if let Some(filter) = &options.lua_filter {
            let mut arg = OsString::from("--lua-filter=");
            arg.push(filter.as_os_str());
            converter = converter.arg(arg);
        }
        for variable in [
            format!("documentclass={}", options.document_class),
            format!("papersize={}", options.paper_size),
            format!("mainfont={}", options.main_font),
            format!("monofont={}", options.mono_font),
            format!("fontsize={}", options.font_size),
            format!("geometry:margin={}", options.margin),
        ] {
            converter = converter.arg("-V").arg(variable);
        }
        converter
            .arg(format!("--highlight-style={}", options.highlight_style))
            .args(["-V", "colorlinks=true", "-V", "linkcolor=blue"])
    }

    /// Full command line for a conversion, for diagnostics.
    pub fn command_line(&self, input: &Path, output: &Path) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        format!("{line} -o {} {}", output.display(), input.display())
    }
}

impl Converter for ExternalConverter {
    fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        let command = self.command_line(input, output);
        info!("Executing: {command}");

        let result = Command::new(&self.program)
            .args(&self.args)
            .arg("-o")
            .arg(output)
            .arg(input)
            .output()
            .map_err(|e| Error::ExternalToolError {
                command: command.clone(),
                status: "failure to start".to_string(),
                stderr: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&result.stdout);
        let stderr = String::from_utf8_lossy(&result.stderr);
        if !stdout.trim().is_empty() {
            debug!("{}: {}", self.program, stdout.trim_end());
        }

        if !result.status.success() {
            return Err(Error::ExternalToolError {
                command,
                status: result.status.to_string(),
                stderr: stderr.trim_end().to_string(),
            });
        }
        if !stderr.trim().is_empty() {
            warn!("{}: {}", self.program, stderr.trim_end());
        }
        Ok(())
    }
}
