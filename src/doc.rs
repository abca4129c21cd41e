//! Line-oriented detection of public Java declarations that lack a preceding
//! Javadoc comment.
//!
//! This is a textual heuristic, not a parser. Each line is trimmed and matched
//! against keyword patterns; a declaration counts as documented when the
//! nearest line above it that is neither blank nor an annotation ends with
//! `*/`. Multi-line signatures, comment tokens inside string literals and
//! nested comments are not understood.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

const DOC_OPEN: &str = "/**";
const COMMENT_CLOSE: &str = "*/";
const ANNOTATION_MARKER: &str = "@";
const VISIBILITY: &str = "public";
const TYPE_KEYWORDS: [&str; 4] = ["class ", "interface ", "enum ", "record "];
const CONSTRUCTION: &str = "new ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    Class,
    Method,
}

impl FindingKind {
    pub fn label(self) -> &'static str {
        match self {
            FindingKind::Class => "Class/Interface",
            FindingKind::Method => "Method",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A public declaration without a Javadoc comment directly above it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    /// 1-based line number.
    pub line: usize,
    /// The declaration line with surrounding whitespace removed.
    pub text: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at line {}", self.kind, self.text, self.line)
    }
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl SourceFile {
    /// Reads the whole file and splits it into lines. The file handle is
    /// closed before this returns. Bytes that are not valid UTF-8 are replaced
    /// rather than rejected; every token the checks look for is ASCII.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read source file: {}", path.display()))?;
        let content = String::from_utf8_lossy(&bytes);
        if matches!(content, Cow::Owned(_)) {
            debug!(path = %path.display(), "source is not valid UTF-8, decoding lossily");
        }
        Ok(Self::from_source(path, &content))
    }

    pub fn from_source(path: &Path, content: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: split_lines(content).into_iter().map(str::to_string).collect(),
        }
    }

    pub fn check(&self) -> Vec<Finding> {
        self.scan().findings
    }

    pub fn scan(&self) -> LineScan {
        scan_lines(self.lines.as_slice())
    }
}

/// Tracks whether the scan is inside a `/** ... */` span.
#[derive(Debug, Default)]
struct CommentTracker {
    in_comment: bool,
    spans: usize,
    last_comment_end: Option<usize>,
}

impl CommentTracker {
    fn observe(&mut self, index: usize, trimmed: &str) {
        if trimmed.starts_with(DOC_OPEN) {
            self.in_comment = true;
        }

        if self.in_comment && trimmed.ends_with(COMMENT_CLOSE) {
            self.in_comment = false;
            self.spans += 1;
            self.last_comment_end = Some(index);
        }
    }
}

pub fn check_file(path: &Path) -> Result<Vec<Finding>> {
    Ok(SourceFile::read(path)?.check())
}

pub fn check_source(content: &str) -> Vec<Finding> {
    check_lines(&split_lines(content))
}

/// Splits on `\n`, `\r\n` and a lone `\r`. A trailing terminator does not
/// produce an extra empty line.
pub fn split_lines(content: &str) -> Vec<&str> {
    let bytes = content.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&content[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&content[start..i]);
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }

    if start < bytes.len() {
        lines.push(&content[start..]);
    }
    lines
}

pub fn check_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Finding> {
    scan_lines(lines).findings
}

/// Outcome of a single pass over one file's lines.
#[derive(Debug, Clone, Default)]
pub struct LineScan {
    pub findings: Vec<Finding>,
    /// Number of `/** ... */` spans that were closed.
    pub doc_comments: usize,
    /// 0-based index of the line closing the last span.
    pub last_comment_end: Option<usize>,
    /// The file ended inside an unclosed span.
    pub unterminated_comment: bool,
}

/// Runs both declaration checks over every line in order. Findings come out
/// sorted by line number; a line matching both checks yields the class
/// finding first.
pub fn scan_lines<S: AsRef<str>>(lines: &[S]) -> LineScan {
    let mut tracker = CommentTracker::default();
    let mut findings = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.as_ref().trim();
        tracker.observe(index, trimmed);

        if is_class_declaration(trimmed) && !has_doc_comment_before(lines, index) {
            findings.push(Finding {
                kind: FindingKind::Class,
                line: index + 1,
                text: trimmed.to_string(),
            });
        }

        if is_method_declaration(trimmed) && !has_doc_comment_before(lines, index) {
            findings.push(Finding {
                kind: FindingKind::Method,
                line: index + 1,
                text: trimmed.to_string(),
            });
        }
    }

    LineScan {
        findings,
        doc_comments: tracker.spans,
        last_comment_end: tracker.last_comment_end,
        unterminated_comment: tracker.in_comment,
    }
}

pub fn is_class_declaration(trimmed: &str) -> bool {
    trimmed.contains(VISIBILITY) && TYPE_KEYWORDS.iter().any(|kw| trimmed.contains(kw))
}

pub fn is_method_declaration(trimmed: &str) -> bool {
    trimmed.contains(VISIBILITY)
        && trimmed.contains('(')
        && trimmed.contains(')')
        && trimmed.contains('{')
        && !trimmed.contains(CONSTRUCTION)
        && !trimmed.contains('=')
}

/// Walks upward from the line before `index`, skipping blank lines and
/// annotations. Only the first other line decides.
fn has_doc_comment_before<S: AsRef<str>>(lines: &[S], index: usize) -> bool {
    lines[..index]
        .iter()
        .rev()
        .map(|l| l.as_ref().trim())
        .find(|l| !l.is_empty() && !l.starts_with(ANNOTATION_MARKER))
        .is_some_and(|l| l.ends_with(COMMENT_CLOSE))
}
