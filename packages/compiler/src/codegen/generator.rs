//! View Descriptor generator
//!
//! Builds each slot's statement as output AST and renders it. Generation is
//! pure and deterministic: the same resolved template and metadata always
//! produce the same descriptor.
//!
//! Event slots compile to
//!
//! ```text
//! if ($event.type === 'click') {
//!   const result = ctx.onAdd($event);
//!   return (result !== false) && callerSuppress;
//! }
//! ```
//!
//! and interpolation/property slots to a compare-and-write against the slot's
//! previous value, using `Object.is` so a `NaN` value is written only once.

use indexmap::IndexMap;

use super::view_descriptor::*;
use crate::binding::{BindingKind, BoundArgument, BoundBinding, BoundExpression, ResolvedTemplate};
use crate::config::CompilerConfig;
use crate::expression_parser::ast::LiteralValue;
use crate::metadata::{ComponentMetadata, FactoryReference, ProviderMetadata, ProviderStrategy, ReturnKind};
use crate::output::emitter::{emit_expression, emit_statements};
use crate::output::output_ast as o;

const EVENT_VAR: &str = "$event";
const CALLER_SUPPRESS_VAR: &str = "callerSuppress";
const RESULT_VAR: &str = "result";
const CURRENT_VAR: &str = "current";
const SLOT_VAR: &str = "slot";
const SURFACE_VAR: &str = "surface";

pub fn generate(resolved: &ResolvedTemplate<'_>, metadata: &ComponentMetadata, config: &CompilerConfig) -> ViewDescriptor {
    let ctx = o::variable(config.context_name.clone());
    let slots = resolved
        .bindings
        .iter()
        .enumerate()
        .map(|(index, binding)| generate_slot(index, binding, &ctx))
        .collect();

    ViewDescriptor {
        component: metadata.name.clone(),
        mode: config.mode,
        context_name: config.context_name.clone(),
        slots,
        factories: generate_factory_table(&metadata.providers),
    }
}

fn generate_slot(index: usize, binding: &BoundBinding<'_>, ctx: &o::Expression) -> Slot {
    let expression = &binding.expression;
    let op = slot_op(expression);
    let statements = match binding.kind {
        BindingKind::Event => event_statements(binding, ctx),
        BindingKind::Interpolation | BindingKind::Property => update_statements(binding, ctx),
    };
    Slot {
        index,
        kind: binding.kind,
        target: binding.target.clone(),
        event_name: binding.event_name.clone(),
        source: expression.source.clone(),
        op,
        statement: emit_statements(&statements),
    }
}

fn slot_op(expression: &BoundExpression<'_>) -> SlotOp {
    match &expression.call {
        Some(call) => SlotOp::Invoke {
            method: expression.member.name.clone(),
            args: call.args.iter().map(arg_op).collect(),
            returns: expression.member.returns,
        },
        None => SlotOp::Read {
            member: expression.member.name.clone(),
            path: expression.path.clone(),
        },
    }
}

fn arg_op(arg: &BoundArgument<'_>) -> ArgOp {
    match arg {
        BoundArgument::Member { member, path, .. } => ArgOp::Member {
            member: member.name.clone(),
            path: path.clone(),
        },
        BoundArgument::Event { path } => ArgOp::Event { path: path.clone() },
        BoundArgument::Literal(value) => ArgOp::Literal { value: value.clone() },
    }
}

/// `receiver.a.b.c`
fn read_path(receiver: &o::Expression, path: &[String]) -> Box<o::Expression> {
    path.iter()
        .fold(Box::new(receiver.clone()), |expr, name| expr.prop(name.clone()))
}

fn convert_literal(value: &LiteralValue) -> Box<o::Expression> {
    match value {
        LiteralValue::String(s) => o::literal(s.as_str()),
        LiteralValue::Number(n) => o::literal(*n),
        LiteralValue::Boolean(b) => o::literal(*b),
        LiteralValue::Null => o::literal(o::LiteralValue::Null),
        LiteralValue::Undefined => o::undefined_expr(),
    }
}

/// The value expression of a binding: a member read or a method call.
fn value_expression(expression: &BoundExpression<'_>, ctx: &o::Expression) -> Box<o::Expression> {
    let member = ctx.prop(expression.member.name.clone());
    match &expression.call {
        Some(call) => {
            let event = o::variable(EVENT_VAR);
            let args = call
                .args
                .iter()
                .map(|arg| match arg {
                    BoundArgument::Member { member, path, .. } => *read_path(&ctx.prop(member.name.clone()), path),
                    BoundArgument::Event { path } => *read_path(&event, path),
                    BoundArgument::Literal(value) => *convert_literal(value),
                })
                .collect();
            member.call_fn(args, Some(call.span))
        }
        None => read_path(&member, &expression.path),
    }
}

fn event_statements(binding: &BoundBinding<'_>, ctx: &o::Expression) -> Vec<o::Statement> {
    let event_name = binding.event_name.clone().unwrap_or_default();
    let condition = o::variable(EVENT_VAR).prop("type").identical(o::literal(event_name));
    let invocation = value_expression(&binding.expression, ctx);

    // A void method's result is never observed; the flag sees `undefined`.
    let (mut body, result) = match binding.expression.member.returns {
        ReturnKind::Value => (
            vec![o::declare_const(RESULT_VAR, invocation)],
            o::variable(RESULT_VAR),
        ),
        ReturnKind::Void => (vec![invocation.to_stmt()], o::undefined_expr()),
    };
    let suppress = result
        .not_identical(o::literal(false))
        .and(o::variable(CALLER_SUPPRESS_VAR));
    body.push(o::return_stmt(suppress));

    vec![o::if_stmt(condition, body)]
}

fn update_statements(binding: &BoundBinding<'_>, ctx: &o::Expression) -> Vec<o::Statement> {
    let slot = o::variable(SLOT_VAR);
    let current = o::variable(CURRENT_VAR);
    let target = &binding.target;
    let property = target.property.clone().unwrap_or_default();
    let path = o::literal_arr(target.nodes.iter().map(|n| *o::literal(*n as f64)).collect());

    let same = o::variable("Object")
        .prop("is")
        .call_fn(vec![*slot.prop("previous"), *current.clone()], None);
    let changed = o::not(slot.prop("attached")).or(o::not(same));
    let write = o::variable(SURFACE_VAR)
        .prop("setProperty")
        .call_fn(vec![*path, *o::literal(property), *current.clone()], None);

    let mut body = vec![write.to_stmt()];
    if let Some(store) = slot.prop("previous").set(current.clone()) {
        body.push(store.to_stmt());
    }
    if let Some(attach) = slot.prop("attached").set(o::literal(true)) {
        body.push(attach.to_stmt());
    }

    vec![
        o::declare_const(CURRENT_VAR, value_expression(&binding.expression, ctx)),
        o::if_stmt(changed, body),
    ]
}

fn factory_expression(kind: &FactoryKind) -> Box<o::Expression> {
    match kind {
        FactoryKind::Function { name } => o::variable(name.clone()),
        FactoryKind::Class { class_name } => {
            o::arrow_fn(o::variable(class_name.clone()).instantiate(Vec::new()))
        }
    }
}

/// Closure factories have no entry; in strict mode the validator has already
/// rejected them.
fn generate_factory_table(providers: &[ProviderMetadata]) -> IndexMap<String, FactoryEntry> {
    let mut table = IndexMap::new();
    for provider in providers {
        let kind = match (provider.strategy, &provider.factory, &provider.class_name) {
            (ProviderStrategy::Factory, Some(FactoryReference::TopLevel { name }), _) => {
                FactoryKind::Function { name: name.clone() }
            }
            (ProviderStrategy::Class, _, Some(class_name)) => FactoryKind::Class {
                class_name: class_name.clone(),
            },
            _ => continue,
        };
        let expression = factory_expression(&kind);
        table.insert(
            provider.token.clone(),
            FactoryEntry {
                token: provider.token.clone(),
                kind,
                expression: emit_expression(&expression),
            },
        );
    }
    table
}

/// The factory table as an object literal, `token: factoryFn` per entry.
pub fn emit_factory_table(descriptor: &ViewDescriptor) -> String {
    let entries = descriptor
        .factories
        .values()
        .map(|entry| o::LiteralMapEntry {
            key: entry.token.clone(),
            value: factory_expression(&entry.kind),
            quoted: false,
        })
        .collect();
    emit_expression(&o::literal_map(entries))
}
