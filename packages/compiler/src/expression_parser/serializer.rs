/**
 * Binding Expression Serializer
 *
 * Serializes an AST back to its canonical source form. The resolver quotes
 * expressions with it in diagnostic messages.
 */
use super::ast::*;

/// Serialize AST to string
pub fn serialize(ast: &AST) -> String {
    ast.visit(&mut SerializeExpressionVisitor)
}

struct SerializeExpressionVisitor;

impl AstVisitor for SerializeExpressionVisitor {
    type Result = String;

    fn visit_implicit_receiver(&mut self, _ast: &ImplicitReceiver) -> String {
        String::new()
    }

    fn visit_event_sentinel(&mut self, _ast: &EventSentinel) -> String {
        EVENT_SENTINEL.to_string()
    }

    fn visit_property_read(&mut self, ast: &PropertyRead) -> String {
        if ast.is_bare() {
            ast.name.clone()
        } else {
            format!("{}.{}", ast.receiver.visit(self), ast.name)
        }
    }

    fn visit_call(&mut self, ast: &Call) -> String {
        let args: Vec<String> = ast.args.iter().map(|arg| arg.visit(self)).collect();
        format!("{}({})", ast.receiver.visit(self), args.join(", "))
    }

    fn visit_literal_primitive(&mut self, ast: &LiteralPrimitive) -> String {
        match &ast.value {
            LiteralValue::String(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            LiteralValue::Number(n) => n.to_string(),
            LiteralValue::Boolean(b) => b.to_string(),
            LiteralValue::Null => "null".to_string(),
            LiteralValue::Undefined => "undefined".to_string(),
        }
    }
}
