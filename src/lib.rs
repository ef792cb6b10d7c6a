//! Lint bash embedded in Groovy files with shellcheck.
//!
//! Jenkins pipelines routinely embed shell scripts as quoted arguments to
//! the `sh` step. This crate locates those fragments, rewrites Groovy's
//! `${EXPR}` interpolation into plain shell variable references, runs
//! shellcheck over each fragment, and remaps the resulting diagnostics back
//! to the Groovy file's path and line numbers.
//!
//! The pipeline is strictly sequential: one document at a time, one
//! fragment at a time, one blocking shellcheck subprocess at a time.

pub mod desugar;
pub mod exit_codes;
pub mod locator;
pub mod remap;
pub mod shellcheck;

pub use locator::{Fragment, FragmentLocator, Notice, ScanEvent};
pub use shellcheck::{CheckOutput, ShellcheckError, ShellcheckRunner};

/// Everything one document's linting pass produced.
#[derive(Debug, Default)]
pub struct LintReport {
    /// One rendered diagnostic block per fragment shellcheck flagged.
    pub findings: Vec<String>,
    /// Scanner notices (keyword without quotes, unterminated fragment).
    pub notices: Vec<Notice>,
}

/// Lint every embedded shell fragment in one document.
///
/// Runs locate → desugar → shellcheck → remap for each fragment in
/// document order. A shellcheck invocation failure aborts the whole
/// document: once the subprocess cannot run, no diagnostics can be trusted.
pub fn lint_shell_fragments(
    content: &str,
    document_path: &str,
    runner: &ShellcheckRunner,
) -> Result<LintReport, ShellcheckError> {
    let mut report = LintReport::default();

    for event in FragmentLocator::new(content) {
        match event {
            ScanEvent::Notice(notice) => report.notices.push(notice),
            ScanEvent::Fragment(fragment) => {
                let desugared = desugar::desugar(fragment.text);
                let output = runner.check(&desugared.text)?;
                if let Some(block) = remap::remap(
                    &output.stdout,
                    &output.scratch_path,
                    document_path,
                    fragment.keyword_line,
                ) {
                    report.findings.push(block);
                }
            }
        }
    }

    Ok(report)
}
