//! JavaScript Emitter
//!
//! Renders output AST statements and expressions as JavaScript-shaped source
//! text with two-space indentation.

use crate::output::output_ast as o;
use crate::util::{escape_identifier, escape_string};

const INDENT_WITH: &str = "  ";

#[derive(Debug, Clone)]
struct EmittedLine {
    parts: Vec<String>,
    indent: usize,
}

impl EmittedLine {
    fn new(indent: usize) -> Self {
        EmittedLine {
            parts: Vec::new(),
            indent,
        }
    }
}

/// Line buffer the emitter prints into.
pub struct EmitterVisitorContext {
    lines: Vec<EmittedLine>,
    indent: usize,
}

impl EmitterVisitorContext {
    pub fn create_root() -> Self {
        EmitterVisitorContext::new(0)
    }

    pub fn new(indent: usize) -> Self {
        EmitterVisitorContext {
            lines: vec![EmittedLine::new(indent)],
            indent,
        }
    }

    pub fn print(&mut self, part: &str) {
        if part.is_empty() {
            return;
        }
        match self.lines.last_mut() {
            Some(line) => line.parts.push(part.to_string()),
            None => {
                let mut line = EmittedLine::new(self.indent);
                line.parts.push(part.to_string());
                self.lines.push(line);
            }
        }
    }

    pub fn println(&mut self, last_part: &str) {
        self.print(last_part);
        self.lines.push(EmittedLine::new(self.indent));
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
        self.reindent_empty_line();
    }

    pub fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.reindent_empty_line();
    }

    fn reindent_empty_line(&mut self) {
        let indent = self.indent;
        if let Some(line) = self.lines.last_mut() {
            if line.parts.is_empty() {
                line.indent = indent;
            }
        }
    }

    pub fn to_source(&self) -> String {
        let mut lines: &[EmittedLine] = &self.lines;
        if let Some((last, rest)) = lines.split_last() {
            if last.parts.is_empty() {
                lines = rest;
            }
        }
        lines
            .iter()
            .map(|l| {
                if l.parts.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", INDENT_WITH.repeat(l.indent), l.parts.join(""))
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Default)]
pub struct JsEmitterVisitor;

impl JsEmitterVisitor {
    pub fn new() -> Self {
        JsEmitterVisitor
    }

    pub fn visit_all_statements(&mut self, statements: &[o::Statement], ctx: &mut EmitterVisitorContext) {
        for statement in statements {
            statement.visit_statement(self, ctx);
        }
    }

    fn visit_all_expressions(&mut self, expressions: &[o::Expression], ctx: &mut EmitterVisitorContext) {
        for (i, expr) in expressions.iter().enumerate() {
            if i > 0 {
                ctx.print(", ");
            }
            expr.visit_expression(self, ctx);
        }
    }

    /// Binary operands that are themselves binary operations are wrapped so
    /// precedence never depends on the operators involved.
    fn visit_operand(&mut self, operand: &o::Expression, ctx: &mut EmitterVisitorContext) {
        if matches!(operand, o::Expression::BinaryOp(_)) {
            ctx.print("(");
            operand.visit_expression(self, ctx);
            ctx.print(")");
        } else {
            operand.visit_expression(self, ctx);
        }
    }
}

impl o::ExpressionVisitor<EmitterVisitorContext> for JsEmitterVisitor {
    fn visit_read_var_expr(&mut self, expr: &o::ReadVarExpr, ctx: &mut EmitterVisitorContext) {
        ctx.print(&expr.name);
    }

    fn visit_read_prop_expr(&mut self, expr: &o::ReadPropExpr, ctx: &mut EmitterVisitorContext) {
        expr.receiver.visit_expression(self, ctx);
        ctx.print(".");
        ctx.print(&expr.name);
    }

    fn visit_write_prop_expr(&mut self, expr: &o::WritePropExpr, ctx: &mut EmitterVisitorContext) {
        expr.receiver.visit_expression(self, ctx);
        ctx.print(".");
        ctx.print(&expr.name);
        ctx.print(" = ");
        expr.value.visit_expression(self, ctx);
    }

    fn visit_invoke_function_expr(&mut self, expr: &o::InvokeFunctionExpr, ctx: &mut EmitterVisitorContext) {
        expr.fn_.visit_expression(self, ctx);
        ctx.print("(");
        self.visit_all_expressions(&expr.args, ctx);
        ctx.print(")");
    }

    fn visit_instantiate_expr(&mut self, expr: &o::InstantiateExpr, ctx: &mut EmitterVisitorContext) {
        ctx.print("new ");
        expr.class_expr.visit_expression(self, ctx);
        ctx.print("(");
        self.visit_all_expressions(&expr.args, ctx);
        ctx.print(")");
    }

    fn visit_literal_expr(&mut self, expr: &o::LiteralExpr, ctx: &mut EmitterVisitorContext) {
        let value = match &expr.value {
            o::LiteralValue::Undefined => "undefined".to_string(),
            o::LiteralValue::Null => "null".to_string(),
            o::LiteralValue::String(s) => escape_string(s),
            o::LiteralValue::Number(n) => n.to_string(),
            o::LiteralValue::Bool(b) => b.to_string(),
        };
        ctx.print(&value);
    }

    fn visit_literal_array_expr(&mut self, expr: &o::LiteralArrayExpr, ctx: &mut EmitterVisitorContext) {
        ctx.print("[");
        self.visit_all_expressions(&expr.entries, ctx);
        ctx.print("]");
    }

    fn visit_literal_map_expr(&mut self, expr: &o::LiteralMapExpr, ctx: &mut EmitterVisitorContext) {
        if expr.entries.is_empty() {
            ctx.print("{}");
            return;
        }
        ctx.println("{");
        ctx.inc_indent();
        for (i, entry) in expr.entries.iter().enumerate() {
            let key = if entry.quoted {
                escape_string(&entry.key)
            } else {
                escape_identifier(&entry.key)
            };
            ctx.print(&key);
            ctx.print(": ");
            entry.value.visit_expression(self, ctx);
            if i + 1 < expr.entries.len() {
                ctx.println(",");
            } else {
                ctx.println("");
            }
        }
        ctx.dec_indent();
        ctx.print("}");
    }

    fn visit_binary_operator_expr(&mut self, expr: &o::BinaryOperatorExpr, ctx: &mut EmitterVisitorContext) {
        self.visit_operand(&expr.lhs, ctx);
        ctx.print(" ");
        ctx.print(expr.operator.as_str());
        ctx.print(" ");
        self.visit_operand(&expr.rhs, ctx);
    }

    fn visit_not_expr(&mut self, expr: &o::NotExpr, ctx: &mut EmitterVisitorContext) {
        ctx.print("!");
        self.visit_operand(&expr.condition, ctx);
    }

    fn visit_arrow_function_expr(&mut self, expr: &o::ArrowFunctionExpr, ctx: &mut EmitterVisitorContext) {
        ctx.print("() => ");
        expr.body.visit_expression(self, ctx);
    }
}

impl o::StatementVisitor<EmitterVisitorContext> for JsEmitterVisitor {
    fn visit_declare_var_stmt(&mut self, stmt: &o::DeclareVarStmt, ctx: &mut EmitterVisitorContext) {
        ctx.print("const ");
        ctx.print(&stmt.name);
        ctx.print(" = ");
        stmt.value.visit_expression(self, ctx);
        ctx.println(";");
    }

    fn visit_expression_stmt(&mut self, stmt: &o::ExpressionStatement, ctx: &mut EmitterVisitorContext) {
        stmt.expr.visit_expression(self, ctx);
        ctx.println(";");
    }

    fn visit_return_stmt(&mut self, stmt: &o::ReturnStatement, ctx: &mut EmitterVisitorContext) {
        ctx.print("return ");
        stmt.value.visit_expression(self, ctx);
        ctx.println(";");
    }

    fn visit_if_stmt(&mut self, stmt: &o::IfStmt, ctx: &mut EmitterVisitorContext) {
        ctx.print("if (");
        stmt.condition.visit_expression(self, ctx);
        ctx.println(") {");
        ctx.inc_indent();
        self.visit_all_statements(&stmt.true_case, ctx);
        ctx.dec_indent();
        ctx.println("}");
    }
}

/// Render statements as source text, one statement per line.
pub fn emit_statements(statements: &[o::Statement]) -> String {
    let mut ctx = EmitterVisitorContext::create_root();
    JsEmitterVisitor::new().visit_all_statements(statements, &mut ctx);
    ctx.to_source()
}

/// Render a single expression as source text.
pub fn emit_expression(expr: &o::Expression) -> String {
    let mut ctx = EmitterVisitorContext::create_root();
    expr.visit_expression(&mut JsEmitterVisitor::new(), &mut ctx);
    ctx.to_source()
}
