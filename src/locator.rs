//! Fragment location: finding `sh` steps and their quoted bodies in Groovy text.
//!
//! This is an explicit scanner over byte positions rather than a regex: find
//! the next whole-word `sh`, find the nearest quote delimiter after it
//! (longest form first), then find the matching unescaped closing delimiter.

/// A span of document text identified as embedded shell content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment<'a> {
    /// The text strictly between the quote delimiters.
    pub text: &'a str,
    /// Byte offset of the first content character (end of the opening quote).
    pub start: usize,
    /// Byte offset of the closing quote (one past the last content character).
    pub end: usize,
    /// 0-based line of the `sh` keyword that introduced this fragment.
    pub keyword_line: usize,
}

/// A non-fatal problem reported while scanning a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// An `sh` keyword with no quote delimiter anywhere after it.
    NoQuotes { keyword_line: usize },
    /// An opening quote with no matching unescaped closing quote. Scanning
    /// of the document stops after this.
    NoEndQuotes { keyword_line: usize },
}

/// One event produced by the scan: a located fragment or a notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent<'a> {
    Fragment(Fragment<'a>),
    Notice(Notice),
}

/// Lazy left-to-right scanner producing [`ScanEvent`]s for one document.
///
/// Fragments never overlap: the cursor moves past each closing delimiter
/// before the next keyword search, so an `sh` inside a fragment body is
/// never treated as a new step.
pub struct FragmentLocator<'a> {
    text: &'a str,
    cursor: usize,
    done: bool,
}

const KEYWORD: &str = "sh";

/// Delimiter alternatives in match order. Triple forms come first so a
/// tripled quote is never read as a lone quote followed by two more.
const DELIMITERS: [&str; 4] = ["\"\"\"", "\"", "'''", "'"];

impl<'a> FragmentLocator<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            cursor: 0,
            done: false,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Find the next whole-word `sh` at or after `from`.
///
/// The previous character must not be a word character, and must not be a
/// dot: `foo.sh` is a filename, not a pipeline step.
fn find_keyword(text: &str, from: usize) -> Option<(usize, usize)> {
    let mut search = from;
    while let Some(rel) = text[search..].find(KEYWORD) {
        let start = search + rel;
        let end = start + KEYWORD.len();
        let prev_ok = text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !is_word_char(c) && c != '.');
        let next_ok = text[end..].chars().next().is_none_or(|c| !is_word_char(c));
        if prev_ok && next_ok {
            return Some((start, end));
        }
        search = start + 1;
    }
    None
}

/// Find the first quote delimiter at or after `from`, trying the tripled
/// form before the single form at each position.
fn find_opening_delimiter(text: &str, from: usize) -> Option<(usize, &'static str)> {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] == b'"' || bytes[i] == b'\'' {
            let delim = DELIMITERS
                .iter()
                .find(|d| text[i..].starts_with(**d))
                .copied()?;
            return Some((i, delim));
        }
        i += 1;
    }
    None
}

/// Find the first occurrence of `delim` at or after `from` that is not
/// preceded by a backslash (escaped delimiters belong to the fragment body).
fn find_closing_delimiter(text: &str, from: usize, delim: &str) -> Option<usize> {
    let mut search = from;
    while let Some(rel) = text[search..].find(delim) {
        let pos = search + rel;
        if text[..pos].chars().next_back() != Some('\\') {
            return Some(pos);
        }
        search = pos + 1;
    }
    None
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].bytes().filter(|&b| b == b'\n').count()
}

impl<'a> Iterator for FragmentLocator<'a> {
    type Item = ScanEvent<'a>;

    fn next(&mut self) -> Option<ScanEvent<'a>> {
        if self.done {
            return None;
        }

        let (kw_start, kw_end) = match find_keyword(self.text, self.cursor) {
            Some(span) => span,
            None => {
                self.done = true;
                return None;
            }
        };
        let keyword_line = line_of(self.text, kw_start);
        self.cursor = kw_end;

        let (open_pos, delim) = match find_opening_delimiter(self.text, kw_end) {
            Some(found) => found,
            None => {
                // Keep scanning: a later keyword may still have quotes.
                return Some(ScanEvent::Notice(Notice::NoQuotes { keyword_line }));
            }
        };

        let content_start = open_pos + delim.len();
        let close_pos = match find_closing_delimiter(self.text, content_start, delim) {
            Some(pos) => pos,
            None => {
                // An unterminated fragment leaves the rest of the document
                // ambiguous, so stop scanning it entirely.
                self.done = true;
                return Some(ScanEvent::Notice(Notice::NoEndQuotes { keyword_line }));
            }
        };

        self.cursor = close_pos + delim.len();
        log::debug!(
            "fragment at line {} ({} bytes)",
            keyword_line,
            close_pos - content_start
        );
        Some(ScanEvent::Fragment(Fragment {
            text: &self.text[content_start..close_pos],
            start: content_start,
            end: close_pos,
            keyword_line,
        }))
    }
}
