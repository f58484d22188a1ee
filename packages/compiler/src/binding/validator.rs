//! Validator
//!
//! Static rules over a resolved template and its component: visibility, call
//! arity and factory exportability. Every rule family runs over everything;
//! nothing short-circuits.

use super::bound_ast::{BoundBinding, ResolvedTemplate};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::metadata::{ComponentMetadata, ProviderMetadata};
use crate::parse_util::{ParseLocation, ParseSourceSpan};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Member `{member}` is private and cannot be referenced from the template")]
    PrivateMemberAccess { member: String, span: ParseSourceSpan },
    #[error("Method `{member}` expects {expected} argument(s) but the template supplies {actual}")]
    ArityMismatch {
        member: String,
        expected: usize,
        actual: usize,
        span: ParseSourceSpan,
    },
    #[error("Provider `{token}` uses factory `{factory}`, which is not a named top-level function")]
    NonExportableFactory {
        token: String,
        factory: String,
        position: ParseLocation,
    },
}

impl ValidationError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let message = self.to_string();
        match self {
            ValidationError::PrivateMemberAccess { span, .. } => {
                Diagnostic::template(DiagnosticKind::PrivateMemberAccess, message, span.start)
            }
            ValidationError::ArityMismatch { span, .. } => {
                Diagnostic::template(DiagnosticKind::ArityMismatch, message, span.start)
            }
            ValidationError::NonExportableFactory { position, .. } => {
                Diagnostic::component(DiagnosticKind::NonExportableFactory, message, *position)
            }
        }
    }
}

pub fn validate(resolved: &ResolvedTemplate<'_>, metadata: &ComponentMetadata) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    for binding in &resolved.bindings {
        check_visibility(binding, &mut errors);
        check_arity(binding, &mut errors);
    }
    for provider in &metadata.providers {
        check_factory(provider, &mut errors);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_visibility(binding: &BoundBinding<'_>, errors: &mut Vec<ValidationError>) {
    for (member, span) in binding.expression.referenced_members() {
        if !member.is_public() {
            errors.push(ValidationError::PrivateMemberAccess {
                member: member.name.clone(),
                span,
            });
        }
    }
}

fn check_arity(binding: &BoundBinding<'_>, errors: &mut Vec<ValidationError>) {
    let expression = &binding.expression;
    if let Some(call) = &expression.call {
        let expected = expression.member.arity();
        let actual = call.arg_count();
        if expected != actual {
            errors.push(ValidationError::ArityMismatch {
                member: expression.member.name.clone(),
                expected,
                actual,
                span: call.span,
            });
        }
    }
}

fn check_factory(provider: &ProviderMetadata, errors: &mut Vec<ValidationError>) {
    if let Some(factory) = &provider.factory {
        if !factory.is_exportable() {
            errors.push(ValidationError::NonExportableFactory {
                token: provider.token.clone(),
                factory: factory.describe().to_string(),
                position: provider.position,
            });
        }
    }
}
