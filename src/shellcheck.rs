//! Shellcheck invocation against a scratch copy of one desugared fragment.
//!
//! Each invocation writes the fragment to a uniquely named temporary file,
//! runs shellcheck over it, and captures stdout. The scratch file is removed
//! on every exit path, including invocation failure.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;
use thiserror::Error;

/// Dialect passed to shellcheck's `-s` flag.
pub const SHELL_DIALECT: &str = "bash";

/// Checks suppressed on desugared fragments:
/// - SC2034 (variable appears unused): interpolation placeholders are
///   assigned by Groovy, not the script, so they always look unused.
/// - SC1090/SC1091 (cannot follow `source`): paths sourced by a scratch
///   file never resolve.
pub const EXCLUDED_CHECKS: &[&str] = &["SC2034", "SC1090", "SC1091"];

/// Error invoking the external linter.
#[derive(Debug, Error)]
pub enum ShellcheckError {
    #[error("failed to write scratch file: {0}")]
    Scratch(#[source] std::io::Error),
    #[error("failed to run '{binary}': {source}")]
    Invoke {
        binary: String,
        #[source]
        source: std::io::Error,
    },
}

/// Captured result of one shellcheck run.
#[derive(Debug, Clone)]
pub struct CheckOutput {
    /// Raw stdout, the diagnostic source of truth. Stderr is not inspected.
    pub stdout: String,
    /// The scratch path shellcheck saw, needed to remap its diagnostics.
    pub scratch_path: String,
}

/// Runs shellcheck subprocesses. The binary name is configurable so tests
/// can substitute a stub.
pub struct ShellcheckRunner {
    binary: String,
}

impl ShellcheckRunner {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Lint one desugared fragment, blocking until shellcheck exits.
    ///
    /// A non-zero exit is not an error here: shellcheck exits non-zero
    /// whenever it has findings, and empty stdout means a clean fragment.
    pub fn check(&self, script: &str) -> Result<CheckOutput, ShellcheckError> {
        let mut scratch = NamedTempFile::with_suffix(".sh").map_err(ShellcheckError::Scratch)?;
        scratch
            .write_all(script.as_bytes())
            .and_then(|()| scratch.flush())
            .map_err(ShellcheckError::Scratch)?;

        let scratch_path = scratch.path().to_string_lossy().into_owned();
        log::debug!("running {} on {}", self.binary, scratch_path);

        let output = Command::new(&self.binary)
            .arg("-s")
            .arg(SHELL_DIALECT)
            .arg("-e")
            .arg(EXCLUDED_CHECKS.join(","))
            .arg(scratch.path())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| ShellcheckError::Invoke {
                binary: self.binary.clone(),
                source,
            })?;

        Ok(CheckOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            scratch_path,
        })
        // `scratch` drops here, deleting the file.
    }
}

impl Default for ShellcheckRunner {
    fn default() -> Self {
        Self::new("shellcheck")
    }
}
