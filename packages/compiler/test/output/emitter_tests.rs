/**
 * Emitter Tests
 */

#[cfg(test)]
mod tests {
    use view_compiler::output::output_ast as o;
    use view_compiler::output::{emit_expression, emit_statements, EmitterVisitorContext};

    mod expressions {
        use super::*;

        #[test]
        fn should_emit_reads_and_calls() {
            let expr = o::variable("ctx")
                .prop("user")
                .prop("save")
                .call_fn(vec![*o::variable("$event").prop("target"), *o::literal(1.5)], None);
            assert_eq!(emit_expression(&expr), "ctx.user.save($event.target, 1.5)");
        }

        #[test]
        fn should_emit_literals() {
            assert_eq!(emit_expression(&o::literal("it's")), "'it\\'s'");
            assert_eq!(emit_expression(&o::literal(3.0)), "3");
            assert_eq!(emit_expression(&o::literal(false)), "false");
            assert_eq!(emit_expression(&o::literal(o::LiteralValue::Null)), "null");
            assert_eq!(emit_expression(&o::undefined_expr()), "undefined");
            assert_eq!(
                emit_expression(&o::literal_arr(vec![*o::literal(0.0), *o::literal(2.0)])),
                "[0, 2]"
            );
        }

        #[test]
        fn should_parenthesize_nested_binary_operands() {
            let expr = o::variable("a").or(o::variable("b").and(o::variable("c")));
            assert_eq!(emit_expression(&expr), "a || (b && c)");
            let negated = o::not(o::variable("x").identical(o::variable("y")));
            assert_eq!(emit_expression(&negated), "!(x === y)");
        }

        #[test]
        fn should_emit_instantiation_and_arrow_functions() {
            let factory = o::arrow_fn(o::variable("HttpClient").instantiate(Vec::new()));
            assert_eq!(emit_expression(&factory), "() => new HttpClient()");

            let with_args = o::arrow_fn(
                o::variable("Logger").instantiate(vec![*o::literal("app"), *o::literal(2.0)]),
            );
            assert_eq!(emit_expression(&with_args), "() => new Logger('app', 2)");
        }

        #[test]
        fn should_quote_map_keys_that_are_not_identifiers() {
            let map = o::literal_map(vec![
                o::LiteralMapEntry {
                    key: "Logger".to_string(),
                    value: o::variable("createLogger"),
                    quoted: false,
                },
                o::LiteralMapEntry {
                    key: "data-id".to_string(),
                    value: o::literal(1.0),
                    quoted: false,
                },
            ]);
            assert_eq!(emit_expression(&map), "{\n  Logger: createLogger,\n  'data-id': 1\n}");
            assert_eq!(emit_expression(&o::literal_map(Vec::new())), "{}");
        }

        #[test]
        fn should_only_assign_to_property_reads() {
            assert!(o::variable("slot").prop("previous").set(o::variable("current")).is_some());
            assert!(o::variable("slot").set(o::variable("current")).is_none());
        }
    }

    mod statements {
        use super::*;

        #[test]
        fn should_emit_declarations_and_returns() {
            let statements = vec![
                o::declare_const("result", o::variable("ctx").prop("onAdd").call_fn(Vec::new(), None)),
                o::return_stmt(o::variable("result")),
            ];
            assert_eq!(emit_statements(&statements), "const result = ctx.onAdd();\nreturn result;");
        }

        #[test]
        fn should_indent_nested_blocks() {
            let inner = o::if_stmt(o::variable("b"), vec![o::variable("f").call_fn(Vec::new(), None).to_stmt()]);
            let outer = o::if_stmt(o::variable("a"), vec![inner]);
            assert_eq!(emit_statements(&[outer]), "if (a) {\n  if (b) {\n    f();\n  }\n}");
        }

        #[test]
        fn should_always_declare_constants() {
            let stmt = o::declare_const("current", o::variable("ctx").prop("message"));
            assert_eq!(emit_statements(&[stmt]), "const current = ctx.message;");
        }
    }

    mod context {
        use super::*;

        #[test]
        fn should_join_parts_into_indented_lines() {
            let mut ctx = EmitterVisitorContext::create_root();
            ctx.println("{");
            ctx.inc_indent();
            ctx.print("a");
            ctx.println(";");
            ctx.dec_indent();
            ctx.print("}");
            assert_eq!(ctx.to_source(), "{\n  a;\n}");
        }

        #[test]
        fn should_never_indent_below_zero() {
            let mut ctx = EmitterVisitorContext::create_root();
            ctx.dec_indent();
            ctx.print("x");
            assert_eq!(ctx.to_source(), "x");
        }
    }
}
