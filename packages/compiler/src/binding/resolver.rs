//! Binding Resolver
//!
//! Links every binding expression to a symbol table entry. Matching is exact
//! and case-sensitive. This is a collecting pass: every error in the template
//! is reported, and whatever did resolve is kept so validation can still run
//! over it.

use bitflags::bitflags;

use super::bound_ast::*;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::expression_parser::ast::{ASTWithSource, Head, AST, EVENT_SENTINEL};
use crate::expression_parser::serialize;
use crate::metadata::{MemberDescriptor, SymbolTable};
use crate::ml_parser::ast::{Element, Node, Template};
use crate::parse_util::ParseSourceSpan;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct ResolveContext: u8 {
        /// Inside an event binding; `$event` is in scope.
        const EVENT = 1 << 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveErrorKind {
    UnknownSymbol,
    SentinelOutOfContext,
    NotCallable,
    UninvokedMethod,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ResolveError {
    pub kind: ResolveErrorKind,
    pub name: String,
    pub message: String,
    pub span: ParseSourceSpan,
}

impl ResolveError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        let kind = match self.kind {
            ResolveErrorKind::UnknownSymbol => DiagnosticKind::UnknownSymbol,
            ResolveErrorKind::SentinelOutOfContext => DiagnosticKind::SentinelOutOfContext,
            ResolveErrorKind::NotCallable => DiagnosticKind::NotCallable,
            ResolveErrorKind::UninvokedMethod => DiagnosticKind::UninvokedMethod,
        };
        Diagnostic::template(kind, self.message.clone(), self.span.start)
    }
}

/// Resolve a template, failing if anything is unresolvable.
pub fn resolve<'t>(template: &Template, symbols: &'t SymbolTable) -> Result<ResolvedTemplate<'t>, Vec<ResolveError>> {
    let (resolved, errors) = resolve_collecting(template, symbols);
    if errors.is_empty() {
        Ok(resolved)
    } else {
        Err(errors)
    }
}

/// Resolve a template, returning the bindings that resolved alongside the
/// errors for those that did not.
pub fn resolve_collecting<'t>(
    template: &Template,
    symbols: &'t SymbolTable,
) -> (ResolvedTemplate<'t>, Vec<ResolveError>) {
    let mut resolver = Resolver {
        symbols,
        bindings: Vec::new(),
        errors: Vec::new(),
    };
    let mut path = Vec::new();
    resolver.visit_nodes(&template.nodes, &mut path);
    (
        ResolvedTemplate {
            bindings: resolver.bindings,
        },
        resolver.errors,
    )
}

struct Resolver<'t> {
    symbols: &'t SymbolTable,
    bindings: Vec<BoundBinding<'t>>,
    errors: Vec<ResolveError>,
}

/// A binding before resolution, in source order within its element.
struct PendingBinding<'n> {
    kind: BindingKind,
    name: &'n str,
    expression: &'n ASTWithSource,
    source_span: ParseSourceSpan,
}

impl<'t> Resolver<'t> {
    fn visit_nodes(&mut self, nodes: &[Node], path: &mut Vec<usize>) {
        for (index, node) in nodes.iter().enumerate() {
            path.push(index);
            match node {
                Node::Text(_) => {}
                Node::Interpolation(interpolation) => {
                    let target = TargetPath::property(path.clone(), TEXT_CONTENT);
                    self.bind(
                        BindingKind::Interpolation,
                        target,
                        None,
                        &interpolation.expression,
                        interpolation.source_span,
                    );
                }
                Node::Element(element) => {
                    self.visit_element(element, path);
                    self.visit_nodes(&element.children, path);
                }
            }
            path.pop();
        }
    }

    fn visit_element(&mut self, element: &Element, path: &[usize]) {
        let mut pending: Vec<PendingBinding<'_>> = element
            .property_bindings
            .iter()
            .map(|b| PendingBinding {
                kind: BindingKind::Property,
                name: &b.name,
                expression: &b.value,
                source_span: b.source_span,
            })
            .chain(element.event_bindings.iter().map(|b| PendingBinding {
                kind: BindingKind::Event,
                name: &b.name,
                expression: &b.handler,
                source_span: b.source_span,
            }))
            .collect();
        pending.sort_by_key(|b| b.source_span.start.offset);

        for binding in pending {
            let (target, event_name) = match binding.kind {
                BindingKind::Event => (TargetPath::node(path.to_vec()), Some(binding.name.to_string())),
                _ => (TargetPath::property(path.to_vec(), binding.name), None),
            };
            self.bind(binding.kind, target, event_name, binding.expression, binding.source_span);
        }
    }

    fn bind(
        &mut self,
        kind: BindingKind,
        target: TargetPath,
        event_name: Option<String>,
        expression: &ASTWithSource,
        source_span: ParseSourceSpan,
    ) {
        let context = if kind == BindingKind::Event {
            ResolveContext::EVENT
        } else {
            ResolveContext::empty()
        };
        if let Some(bound) = self.resolve_expression(expression, context) {
            self.bindings.push(BoundBinding {
                kind,
                target,
                event_name,
                expression: bound,
                source_span,
            });
        }
    }

    fn error(&mut self, kind: ResolveErrorKind, name: &str, message: String, span: ParseSourceSpan) {
        self.errors.push(ResolveError {
            kind,
            name: name.to_string(),
            message,
            span,
        });
    }

    fn lookup(&mut self, name: &str, span: ParseSourceSpan) -> Option<&'t MemberDescriptor> {
        let symbols = self.symbols;
        let found = symbols.lookup(name);
        if found.is_none() {
            self.error(
                ResolveErrorKind::UnknownSymbol,
                name,
                format!("Unknown symbol `{}` on component {}", name, symbols.component()),
                span,
            );
        }
        found
    }

    fn sentinel_out_of_context(&mut self, span: ParseSourceSpan) {
        self.error(
            ResolveErrorKind::SentinelOutOfContext,
            EVENT_SENTINEL,
            format!("`{}` can only be used inside an event binding", EVENT_SENTINEL),
            span,
        );
    }

    fn resolve_expression(
        &mut self,
        expression: &ASTWithSource,
        context: ResolveContext,
    ) -> Option<BoundExpression<'t>> {
        let ast = &expression.ast;
        let in_event = context.contains(ResolveContext::EVENT);

        match ast {
            AST::Call(call) => {
                let callee = call.receiver.member_path().join(".");
                let shown = serialize(ast);
                let member = match call.receiver.head()? {
                    Head::Sentinel(sentinel) => {
                        if in_event {
                            self.error(
                                ResolveErrorKind::NotCallable,
                                &callee,
                                format!("`{}` is not a component method", shown),
                                sentinel.source_span,
                            );
                        } else {
                            self.sentinel_out_of_context(sentinel.source_span);
                        }
                        None
                    }
                    Head::Member(read) => match self.lookup(&read.name, read.name_span) {
                        Some(_) if !is_bare_member(&call.receiver) => {
                            self.error(
                                ResolveErrorKind::NotCallable,
                                &callee,
                                format!("`{}` cannot be resolved statically; only component methods can be called", shown),
                                call.source_span,
                            );
                            None
                        }
                        Some(member) if !member.is_method() => {
                            self.error(
                                ResolveErrorKind::NotCallable,
                                &callee,
                                format!("`{}` is a field, not a method, and cannot be called", shown),
                                call.source_span,
                            );
                            None
                        }
                        found => found.map(|member| (member, read.name_span)),
                    },
                };

                // Arguments resolve independently so their errors are reported too.
                let args: Vec<Option<BoundArgument<'t>>> = call
                    .args
                    .iter()
                    .map(|arg| self.resolve_argument(arg, context))
                    .collect();

                let (member, span) = member?;
                let args = args.into_iter().collect::<Option<Vec<_>>>()?;
                Some(BoundExpression {
                    ast: ast.clone(),
                    source: expression.source.clone(),
                    member,
                    path: Vec::new(),
                    call: Some(BoundCall {
                        args,
                        span: call.source_span,
                    }),
                    span,
                })
            }
            AST::PropertyRead(_) | AST::EventSentinel(_) => {
                let path = ast.member_path();
                let display = path.join(".");
                let shown = serialize(ast);
                match ast.head()? {
                    Head::Sentinel(sentinel) => {
                        if in_event {
                            self.error(
                                ResolveErrorKind::NotCallable,
                                &display,
                                format!("Event bindings must invoke a component method, found `{}`", shown),
                                sentinel.source_span,
                            );
                        } else {
                            self.sentinel_out_of_context(sentinel.source_span);
                        }
                        None
                    }
                    Head::Member(read) => {
                        let member = self.lookup(&read.name, read.name_span)?;
                        if member.is_method() {
                            self.error(
                                ResolveErrorKind::UninvokedMethod,
                                &read.name,
                                format!("Method `{}` is referenced but not invoked", read.name),
                                read.name_span,
                            );
                            return None;
                        }
                        if in_event {
                            self.error(
                                ResolveErrorKind::NotCallable,
                                &display,
                                format!("Event bindings must invoke a component method, found field `{}`", shown),
                                ast.source_span(),
                            );
                            return None;
                        }
                        Some(BoundExpression {
                            ast: ast.clone(),
                            source: expression.source.clone(),
                            member,
                            path: path[1..].iter().map(|s| s.to_string()).collect(),
                            call: None,
                            span: read.name_span,
                        })
                    }
                }
            }
            // The parser only lets member chains and calls through at the top level.
            AST::LiteralPrimitive(_) | AST::ImplicitReceiver(_) => None,
        }
    }

    fn resolve_argument(&mut self, arg: &AST, context: ResolveContext) -> Option<BoundArgument<'t>> {
        if let AST::LiteralPrimitive(literal) = arg {
            return Some(BoundArgument::Literal(literal.value.clone()));
        }
        let path = arg.member_path();
        match arg.head()? {
            Head::Sentinel(sentinel) => {
                if context.contains(ResolveContext::EVENT) {
                    Some(BoundArgument::Event {
                        path: path[1..].iter().map(|s| s.to_string()).collect(),
                    })
                } else {
                    self.sentinel_out_of_context(sentinel.source_span);
                    None
                }
            }
            Head::Member(read) => {
                let member = self.lookup(&read.name, read.name_span)?;
                if member.is_method() {
                    self.error(
                        ResolveErrorKind::UninvokedMethod,
                        &read.name,
                        format!("Method `{}` is passed as an argument but not invoked", read.name),
                        read.name_span,
                    );
                    return None;
                }
                Some(BoundArgument::Member {
                    member,
                    path: path[1..].iter().map(|s| s.to_string()).collect(),
                    span: read.name_span,
                })
            }
        }
    }
}

fn is_bare_member(ast: &AST) -> bool {
    matches!(ast, AST::PropertyRead(read) if read.is_bare())
}
