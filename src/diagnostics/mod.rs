use crate::span::Span;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    #[error("incompatible language version {version}, expected {min}..={max}")]
    IncompatibleVersion { version: u32, min: u32, max: u32 },

    #[error("malformed grammar table: {msg}")]
    MalformedTable { msg: String },

    #[error("invalid magic number: not a grammar table artifact")]
    InvalidMagic,

    #[error("truncated grammar table artifact: need {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    #[error("grammar table encode error: {msg}")]
    Encode { msg: String },

    #[error("grammar table decode error: {msg}")]
    Decode { msg: String },
}

impl LanguageError {
    pub fn incompatible(version: u32) -> Self {
        Self::IncompatibleVersion {
            version,
            min: crate::language::MIN_COMPATIBLE_LANGUAGE_VERSION,
            max: crate::language::LANGUAGE_VERSION,
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedTable { msg: msg.into() }
    }

    pub fn truncated(expected: usize, actual: usize) -> Self {
        Self::Truncated { expected, actual }
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode { msg: msg.into() }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode { msg: msg.into() }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {msg}", path.display())]
    Io { msg: String, path: PathBuf },

    #[error("invalid config {}: {msg}", path.display())]
    Invalid { msg: String, path: PathBuf },
}

impl ConfigError {
    pub fn io(msg: impl Into<String>, path: PathBuf) -> Self {
        Self::Io { msg: msg.into(), path }
    }

    pub fn invalid(msg: impl Into<String>, path: PathBuf) -> Self {
        Self::Invalid { msg: msg.into(), path }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxErrorKind {
    /// Bytes no token matches.
    Lexical,
    /// A token the grammar does not allow here.
    Syntactic,
    /// A token was inserted to continue.
    Missing,
}

impl SyntaxErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SyntaxErrorKind::Lexical => "lexical",
            SyntaxErrorKind::Syntactic => "syntax",
            SyntaxErrorKind::Missing => "missing token",
        }
    }
}

/// A recoverable problem found while parsing. Never fatal; collected on the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub span: Span,
    pub message: String,
}

impl SyntaxError {
    pub fn lexical(msg: impl Into<String>, span: Span) -> Self {
        Self { kind: SyntaxErrorKind::Lexical, span, message: msg.into() }
    }

    pub fn syntactic(msg: impl Into<String>, span: Span) -> Self {
        Self { kind: SyntaxErrorKind::Syntactic, span, message: msg.into() }
    }

    pub fn missing(msg: impl Into<String>, span: Span) -> Self {
        Self { kind: SyntaxErrorKind::Missing, span, message: msg.into() }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error at {}..{}: {}", self.kind.as_str(), self.span.start, self.span.end, self.message)
    }
}

/// ariadne counts characters, the parser counts bytes.
fn char_offset(source: &str, byte: usize) -> usize {
    let mut byte = byte.min(source.len());
    while !source.is_char_boundary(byte) {
        byte -= 1;
    }
    source[..byte].chars().count()
}

/// Render syntax errors with ariadne into `out`.
pub fn write_syntax_errors<W: Write>(source: &str, errors: &[SyntaxError], mut out: W) -> io::Result<()> {
    use ariadne::{Config, Label, Report, ReportKind, Source};

    for err in errors {
        let start = char_offset(source, err.span.start);
        let end = char_offset(source, err.span.end);
        Report::build(ReportKind::Error, (), start)
            .with_config(Config::default().with_color(false))
            .with_message(format!("{} error", err.kind.as_str()))
            .with_label(Label::new(start..end).with_message(&err.message))
            .finish()
            .write(Source::from(source), &mut out)?;
    }
    Ok(())
}

/// Render syntax errors with ariadne for nice terminal output.
pub fn render_syntax_errors(source: &str, errors: &[SyntaxError]) {
    use ariadne::{Label, Report, ReportKind, Source};

    for err in errors {
        let start = char_offset(source, err.span.start);
        let end = char_offset(source, err.span.end);
        let printed = Report::build(ReportKind::Error, (), start)
            .with_message(format!("{} error", err.kind.as_str()))
            .with_label(Label::new(start..end).with_message(&err.message))
            .finish()
            .eprint(Source::from(source));
        if printed.is_err() {
            eprintln!("error: {err}");
        }
    }
}
