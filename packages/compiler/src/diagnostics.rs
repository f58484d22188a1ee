//! Diagnostics
//!
//! User-facing `{kind, message, position}` records. Every phase's errors
//! convert into these; the pipeline orders them by source position before
//! reporting.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parse_util::{ParseErrorKind, ParseLocation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    // Parser
    UnterminatedInterpolation,
    MalformedBindingSyntax,
    UnclosedElement,
    UnexpectedClosingTag,
    MalformedTag,
    // Resolver
    UnknownSymbol,
    SentinelOutOfContext,
    NotCallable,
    UninvokedMethod,
    // Validator
    PrivateMemberAccess,
    ArityMismatch,
    NonExportableFactory,
    // Metadata loader
    InvalidComponentDecl,
}

impl DiagnosticKind {
    /// Stable numeric code: 1xxx parse, 2xxx resolve, 3xxx validate,
    /// 4xxx metadata.
    pub fn code(&self) -> u32 {
        match self {
            Self::UnterminatedInterpolation => 1001,
            Self::MalformedBindingSyntax => 1002,
            Self::UnclosedElement => 1003,
            Self::UnexpectedClosingTag => 1004,
            Self::MalformedTag => 1005,
            Self::UnknownSymbol => 2001,
            Self::SentinelOutOfContext => 2002,
            Self::NotCallable => 2003,
            Self::UninvokedMethod => 2004,
            Self::PrivateMemberAccess => 3001,
            Self::ArityMismatch => 3002,
            Self::NonExportableFactory => 3003,
            Self::InvalidComponentDecl => 4001,
        }
    }
}

impl From<ParseErrorKind> for DiagnosticKind {
    fn from(kind: ParseErrorKind) -> Self {
        match kind {
            ParseErrorKind::UnterminatedInterpolation => Self::UnterminatedInterpolation,
            ParseErrorKind::MalformedBindingSyntax => Self::MalformedBindingSyntax,
            ParseErrorKind::UnclosedElement => Self::UnclosedElement,
            ParseErrorKind::UnexpectedClosingTag => Self::UnexpectedClosingTag,
            ParseErrorKind::MalformedTag => Self::MalformedTag,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::UnterminatedInterpolation => "UnterminatedInterpolation",
            Self::MalformedBindingSyntax => "MalformedBindingSyntax",
            Self::UnclosedElement => "UnclosedElement",
            Self::UnexpectedClosingTag => "UnexpectedClosingTag",
            Self::MalformedTag => "MalformedTag",
            Self::UnknownSymbol => "UnknownSymbol",
            Self::SentinelOutOfContext => "SentinelOutOfContext",
            Self::NotCallable => "NotCallable",
            Self::UninvokedMethod => "UninvokedMethod",
            Self::PrivateMemberAccess => "PrivateMemberAccess",
            Self::ArityMismatch => "ArityMismatch",
            Self::NonExportableFactory => "NonExportableFactory",
            Self::InvalidComponentDecl => "InvalidComponentDecl",
        };
        write!(f, "{}", s)
    }
}

/// Which input a diagnostic points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DiagnosticOrigin {
    Template,
    Component,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub position: ParseLocation,
    pub origin: DiagnosticOrigin,
}

impl Diagnostic {
    pub fn template(kind: DiagnosticKind, message: impl Into<String>, position: ParseLocation) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
            position,
            origin: DiagnosticOrigin::Template,
        }
    }

    pub fn component(kind: DiagnosticKind, message: impl Into<String>, position: ParseLocation) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
            position,
            origin: DiagnosticOrigin::Component,
        }
    }

    pub fn code(&self) -> String {
        format!("VC{}", self.kind.code())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {} [{}]", self.code(), self.position, self.message, self.kind)
    }
}

/// Template diagnostics in source order, then component diagnostics in
/// declaration order. The sort is stable, so diagnostics at the same offset
/// keep the order their phase produced them in.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(|d| match d.origin {
        DiagnosticOrigin::Template => (d.origin, d.position.offset),
        DiagnosticOrigin::Component => (d.origin, 0),
    });
}

/// Render diagnostics as a report, one per line, prefixed with the file they
/// belong to.
pub fn format_diagnostics(diagnostics: &[Diagnostic], template_url: &str, component: &str) -> String {
    diagnostics
        .iter()
        .map(|d| {
            let file = match d.origin {
                DiagnosticOrigin::Template => template_url,
                DiagnosticOrigin::Component => component,
            };
            format!("{}:{} - error {}: {}", file, d.position, d.code(), d.message)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
