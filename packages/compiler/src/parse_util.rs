//! Parse Utilities
//!
//! Source files, locations and spans used for error reporting across every
//! compilation phase.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::chars;

/// A template source. Content is shared so spans stay cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSourceFile {
    pub content: Arc<str>,
    pub url: String,
}

impl ParseSourceFile {
    pub fn new(content: &str, url: &str) -> Self {
        ParseSourceFile {
            content: Arc::from(content),
            url: url.to_string(),
        }
    }

    /// Location of a byte offset. Offsets past the end clamp to the end.
    pub fn location_at(&self, offset: usize) -> ParseLocation {
        let offset = offset.min(self.content.len());
        ParseLocation::START.advance(&self.content[..offset], offset)
    }

    pub fn span(&self, start: usize, end: usize) -> ParseSourceSpan {
        ParseSourceSpan::new(self.location_at(start), self.location_at(end))
    }
}

/// Zero-based line/column location plus the absolute byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct ParseLocation {
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub const START: ParseLocation = ParseLocation { offset: 0, line: 0, col: 0 };

    pub fn new(offset: usize, line: usize, col: usize) -> Self {
        ParseLocation { offset, line, col }
    }

    /// Move forward by `delta` bytes of `text`, where `text` starts at `self`.
    pub fn advance(&self, text: &str, delta: usize) -> ParseLocation {
        let mut loc = *self;
        for (idx, ch) in text.char_indices() {
            if idx >= delta {
                break;
            }
            loc.offset += ch.len_utf8();
            if ch == chars::LF {
                loc.line += 1;
                loc.col = 0;
            } else {
                loc.col += 1;
            }
        }
        loc
    }
}

impl fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan { start, end }
    }

    /// Sub-span of `text` (which begins at `self.start`) covering `[start, end)`.
    pub fn sub_span(&self, text: &str, start: usize, end: usize) -> ParseSourceSpan {
        ParseSourceSpan::new(self.start.advance(text, start), self.start.advance(text, end))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseErrorKind {
    UnterminatedInterpolation,
    MalformedBindingSyntax,
    UnclosedElement,
    UnexpectedClosingTag,
    MalformedTag,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::UnterminatedInterpolation => "UnterminatedInterpolation",
            Self::MalformedBindingSyntax => "MalformedBindingSyntax",
            Self::UnclosedElement => "UnclosedElement",
            Self::UnexpectedClosingTag => "UnexpectedClosingTag",
            Self::MalformedTag => "MalformedTag",
        };
        write!(f, "{}", s)
    }
}

/// A fatal template parse error. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind}: {msg} ({url}@{position})", position = .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub msg: String,
    pub url: String,
    pub span: ParseSourceSpan,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, msg: impl Into<String>, url: &str, span: ParseSourceSpan) -> Self {
        ParseError {
            kind,
            msg: msg.into(),
            url: url.to_string(),
            span,
        }
    }
}
