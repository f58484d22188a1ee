/**
 * Template Parser Tests
 *
 * Markup, interpolation and binding classification.
 */

#[cfg(test)]
mod tests {
    use view_compiler::expression_parser::serialize;
    use view_compiler::ml_parser::{parse_template, Element, Node, ParseOptions, Parser, Template};
    use view_compiler::parse_util::{ParseError, ParseErrorKind};

    fn parse(source: &str) -> Template {
        parse_template(source, "test.html").unwrap_or_else(|e| panic!("failed to parse {}: {}", source, e))
    }

    fn parse_error(source: &str) -> ParseError {
        match parse_template(source, "test.html") {
            Ok(_) => panic!("expected {} to fail", source),
            Err(err) => err,
        }
    }

    fn element(node: &Node) -> &Element {
        match node {
            Node::Element(el) => el,
            other => panic!("expected an element, got {:?}", other),
        }
    }

    mod text_and_interpolation {
        use super::*;

        #[test]
        fn should_split_text_into_literal_runs_and_interpolations() {
            let template = parse("Hello {{ name }}!");
            assert_eq!(template.nodes.len(), 3);
            match (&template.nodes[0], &template.nodes[1], &template.nodes[2]) {
                (Node::Text(a), Node::Interpolation(i), Node::Text(b)) => {
                    assert_eq!(a.value, "Hello ");
                    assert_eq!(serialize(&i.expression.ast), "name");
                    assert_eq!(i.expression.source, " name ");
                    assert_eq!(b.value, "!");
                }
                other => panic!("unexpected nodes {:?}", other),
            }
        }

        #[test]
        fn should_preserve_whitespace_verbatim() {
            let template = parse("<p>  two  spaces\n</p>");
            let p = element(&template.nodes[0]);
            match &p.children[0] {
                Node::Text(text) => assert_eq!(text.value, "  two  spaces\n"),
                other => panic!("unexpected node {:?}", other),
            }
        }

        #[test]
        fn should_drop_whitespace_only_text_when_asked() {
            let parser = Parser::with_options(ParseOptions {
                preserve_whitespaces: false,
            });
            let template = parser.parse("<ul>\n  <li>a</li>\n</ul>", "test.html").unwrap();
            let ul = element(&template.nodes[0]);
            assert_eq!(ul.children.len(), 1);
        }

        #[test]
        fn should_record_positions_of_interpolation_expressions() {
            let template = parse("ab\n  {{ user }}");
            let interpolation = template
                .nodes
                .iter()
                .find_map(|n| match n {
                    Node::Interpolation(i) => Some(i),
                    _ => None,
                })
                .unwrap();
            assert_eq!(interpolation.source_span.start.line, 1);
            assert_eq!(interpolation.source_span.start.col, 2);
            assert_eq!(interpolation.expression.source_span.start.offset, 7);
        }

        #[test]
        fn should_skip_comments() {
            let template = parse("<!-- note -->{{ a }}");
            assert_eq!(template.nodes.len(), 1);
            assert!(matches!(template.nodes[0], Node::Interpolation(_)));
        }
    }

    mod attributes {
        use super::*;

        #[test]
        fn should_classify_plain_property_and_event_attributes() {
            let template = parse(r#"<button type="button" [disabled]="busy" (click)="onAdd()">Add</button>"#);
            let button = element(&template.nodes[0]);
            assert_eq!(button.name, "button");
            assert_eq!(button.attributes.len(), 1);
            assert_eq!(button.attributes[0].name, "type");
            assert_eq!(button.attributes[0].value.as_deref(), Some("button"));
            assert_eq!(button.property_bindings.len(), 1);
            assert_eq!(button.property_bindings[0].name, "disabled");
            assert_eq!(button.property_bindings[0].value.source, "busy");
            assert_eq!(button.event_bindings.len(), 1);
            assert_eq!(button.event_bindings[0].name, "click");
            assert_eq!(serialize(&button.event_bindings[0].handler.ast), "onAdd()");
        }

        #[test]
        fn should_support_canonical_prefixes() {
            let template = parse(r#"<input bind-value="name" on-input="setName($event.target.value)">"#);
            let input = element(&template.nodes[0]);
            assert_eq!(input.property_bindings[0].name, "value");
            assert_eq!(input.event_bindings[0].name, "input");
        }

        #[test]
        fn should_keep_attributes_without_values() {
            let template = parse("<input disabled>");
            let input = element(&template.nodes[0]);
            assert_eq!(input.attributes[0].name, "disabled");
            assert_eq!(input.attributes[0].value, None);
        }

        #[test]
        fn should_leave_interpolation_in_plain_attributes_verbatim() {
            let template = parse(r#"<a title="{{ x }}"></a>"#);
            let a = element(&template.nodes[0]);
            assert_eq!(a.attributes[0].value.as_deref(), Some("{{ x }}"));
            assert!(a.property_bindings.is_empty());
        }

        #[test]
        fn should_reject_two_way_bindings() {
            let err = parse_error(r#"<input [(ngModel)]="name">"#);
            assert_eq!(err.kind, ParseErrorKind::MalformedBindingSyntax);
        }

        #[test]
        fn should_reject_event_modifiers() {
            let err = parse_error(r#"<input (keyup.enter)="go()">"#);
            assert_eq!(err.kind, ParseErrorKind::MalformedBindingSyntax);
            assert!(err.msg.contains("(keyup.enter)"));

            let err = parse_error(r#"<input on-keyup.enter="go()">"#);
            assert_eq!(err.kind, ParseErrorKind::MalformedBindingSyntax);
        }

        #[test]
        fn should_keep_dotted_property_names() {
            let template = parse(r#"<div [class.active]="on"></div>"#);
            assert_eq!(element(&template.nodes[0]).property_bindings[0].name, "class.active");
        }

        #[test]
        fn should_reject_empty_binding_names() {
            let err = parse_error(r#"<div []="x"></div>"#);
            assert_eq!(err.kind, ParseErrorKind::MalformedBindingSyntax);
        }

        #[test]
        fn should_reject_bindings_without_an_expression() {
            let err = parse_error("<div [title]></div>");
            assert_eq!(err.kind, ParseErrorKind::MalformedBindingSyntax);
        }

        #[test]
        fn should_reject_malformed_expressions() {
            let err = parse_error(r#"<div [title]="a + b"></div>"#);
            assert_eq!(err.kind, ParseErrorKind::MalformedBindingSyntax);
            assert!(err.span.start.offset >= 14);
        }
    }

    mod elements {
        use super::*;

        #[test]
        fn should_nest_children() {
            let template = parse("<ul><li>{{ a }}</li><li>b</li></ul>");
            let ul = element(&template.nodes[0]);
            assert_eq!(ul.children.len(), 2);
            let first = element(&ul.children[0]);
            assert!(matches!(first.children[0], Node::Interpolation(_)));
            assert!(ul.end_source_span.is_some());
        }

        #[test]
        fn should_not_expect_closing_tags_for_void_or_self_closing_elements() {
            let template = parse("<div><br><img src=\"a.png\"/><x-icon/></div>");
            let div = element(&template.nodes[0]);
            assert_eq!(div.children.len(), 3);
        }

        #[test]
        fn should_report_unclosed_elements() {
            let err = parse_error("<div><span></div>");
            assert_eq!(err.kind, ParseErrorKind::UnclosedElement);
            assert!(err.msg.contains("<span>"));
        }

        #[test]
        fn should_report_elements_open_at_end_of_input() {
            let err = parse_error("<div>text");
            assert_eq!(err.kind, ParseErrorKind::UnclosedElement);
        }

        #[test]
        fn should_report_unexpected_closing_tags() {
            assert_eq!(parse_error("</div>").kind, ParseErrorKind::UnexpectedClosingTag);
            assert_eq!(parse_error("<input></input>").kind, ParseErrorKind::UnexpectedClosingTag);
        }

        #[test]
        fn should_report_malformed_tags() {
            assert_eq!(parse_error("<div class=\"a").kind, ParseErrorKind::MalformedTag);
            assert_eq!(parse_error("<div").kind, ParseErrorKind::MalformedTag);
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn should_report_unterminated_interpolations() {
            let err = parse_error("<p>{{ name </p>");
            assert_eq!(err.kind, ParseErrorKind::UnterminatedInterpolation);
            assert_eq!(err.span.start.offset, 3);
            assert_eq!(err.url, "test.html");
        }

        #[test]
        fn should_be_deterministic() {
            let source = r#"<button (click)="onAdd($event)">{{ label }}</button>"#;
            assert_eq!(parse(source), parse(source));
        }
    }
}
