//! Remapping shellcheck diagnostics from the scratch file back to the
//! original Groovy document.
//!
//! Shellcheck's default output introduces each finding with a header of the
//! form `In <file> line <n>:`. The output is parsed into structured records
//! first, then re-rendered with the document path and an absolute line
//! number computed per record.

use std::sync::LazyLock;

use regex::Regex;

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^In (.+) line (\d+):$").expect("valid header pattern"));

/// One shellcheck finding, split out of the raw stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line within the scratch file, as reported by shellcheck.
    pub relative_line: usize,
    /// Everything after the header up to the next header (or end of output).
    pub body: String,
}

/// Parse raw shellcheck stdout into one record per header that names the
/// scratch path. Output with no such header yields no records.
pub fn parse_diagnostics(stdout: &str, scratch_path: &str) -> Vec<Diagnostic> {
    let headers: Vec<_> = HEADER
        .captures_iter(stdout)
        .filter(|caps| &caps[1] == scratch_path)
        .collect();

    let mut diagnostics = Vec::with_capacity(headers.len());
    for (i, caps) in headers.iter().enumerate() {
        let whole = caps.get(0).expect("capture 0 always present");
        let body_end = headers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(stdout.len(), |m| m.start());
        let relative_line = caps[2].parse().unwrap_or(0);
        diagnostics.push(Diagnostic {
            relative_line,
            body: stdout[whole.end()..body_end].to_string(),
        });
    }
    diagnostics
}

/// Render remapped diagnostics as one printable block.
///
/// The absolute line is recomputed per record as `keyword_line +
/// relative_line`, so later findings in a multi-finding fragment are as
/// accurate as the first. Scratch-path mentions inside bodies are replaced
/// too.
pub fn render(
    diagnostics: &[Diagnostic],
    document_path: &str,
    scratch_path: &str,
    keyword_line: usize,
) -> String {
    let mut out = String::new();
    for diagnostic in diagnostics {
        let absolute_line = keyword_line + diagnostic.relative_line;
        out.push_str(&format!("In {document_path} line {absolute_line}:"));
        out.push_str(&diagnostic.body.replace(scratch_path, document_path));
    }
    out
}

/// Parse and render in one step. `None` when the output holds no findings
/// for the scratch file.
pub fn remap(
    stdout: &str,
    scratch_path: &str,
    document_path: &str,
    keyword_line: usize,
) -> Option<String> {
    let diagnostics = parse_diagnostics(stdout, scratch_path);
    if diagnostics.is_empty() {
        None
    } else {
        Some(render(&diagnostics, document_path, scratch_path, keyword_line))
    }
}
