/**
 * View Descriptor Generation Tests
 */

#[cfg(test)]
mod tests {
    use view_compiler::binding::{resolve, BindingKind, TargetPath, TEXT_CONTENT};
    use view_compiler::codegen::*;
    use view_compiler::config::{CompilationMode, CompilerConfig};
    use view_compiler::metadata::{load, ComponentDecl, MemberDecl, ProviderDecl, ReturnKind, SymbolTable};
    use view_compiler::ml_parser::parse_template;

    fn generate_for(source: &str, decl: &ComponentDecl, config: &CompilerConfig) -> ViewDescriptor {
        let metadata = load(decl).unwrap();
        let symbols = SymbolTable::build(&metadata);
        let template = parse_template(source, "test.html").unwrap();
        let resolved = resolve(&template, &symbols).unwrap();
        generate(&resolved, &metadata, config)
    }

    fn todo_component() -> ComponentDecl {
        ComponentDecl::new("TodoComponent")
            .with_member(MemberDecl::field("message"))
            .with_member(MemberDecl::field("user"))
            .with_member(MemberDecl::method("onAdd", &[]).returning_void())
            .with_member(MemberDecl::method("save", &["target"]))
    }

    mod slots {
        use super::*;

        #[test]
        fn should_emit_one_slot_per_binding_in_template_order() {
            let descriptor = generate_for(
                r#"<button (click)="onAdd()" [title]="message">{{ user.name }}</button>"#,
                &todo_component(),
                &CompilerConfig::default(),
            );
            assert_eq!(descriptor.component, "TodoComponent");
            assert_eq!(descriptor.slots.len(), 3);
            let indices: Vec<usize> = descriptor.slots.iter().map(|s| s.index).collect();
            assert_eq!(indices, vec![0, 1, 2]);
            assert_eq!(descriptor.slots_of_kind(BindingKind::Event).count(), 1);
            assert_eq!(descriptor.slots[2].target, TargetPath::property(vec![0, 0], TEXT_CONTENT));
            assert_eq!(descriptor.slots[2].source, " user.name ");
        }

        #[test]
        fn should_describe_reads_and_invocations() {
            let descriptor = generate_for(
                r#"<input (change)="save($event.target)" [value]="user.name">"#,
                &todo_component(),
                &CompilerConfig::default(),
            );
            assert_eq!(
                descriptor.slots[0].op,
                SlotOp::Invoke {
                    method: "save".to_string(),
                    args: vec![ArgOp::Event {
                        path: vec!["target".to_string()]
                    }],
                    returns: ReturnKind::Value,
                }
            );
            assert_eq!(
                descriptor.slots[1].op,
                SlotOp::Read {
                    member: "user".to_string(),
                    path: vec!["name".to_string()]
                }
            );
            assert_eq!(descriptor.slots[1].op.member(), "user");
        }

        #[test]
        fn should_emit_the_suppression_expression_for_void_handlers() {
            let descriptor = generate_for(
                r#"<button (click)="onAdd()">Add</button>"#,
                &todo_component(),
                &CompilerConfig::default(),
            );
            let slot = &descriptor.slots[0];
            assert_eq!(slot.event_name.as_deref(), Some("click"));
            assert_eq!(
                slot.statement,
                "if ($event.type === 'click') {\n  ctx.onAdd();\n  return (undefined !== false) && callerSuppress;\n}"
            );
            assert!(slot.statement.contains("(undefined !== false) && callerSuppress"));
        }

        #[test]
        fn should_return_the_handler_result_for_value_methods() {
            let descriptor = generate_for(
                r#"<input (change)="save($event.target)">"#,
                &todo_component(),
                &CompilerConfig::default(),
            );
            assert_eq!(
                descriptor.slots[0].statement,
                "if ($event.type === 'change') {\n  const result = ctx.save($event.target);\n  return (result !== false) && callerSuppress;\n}"
            );
        }

        #[test]
        fn should_compare_against_the_previous_value_before_writing() {
            let descriptor = generate_for("<p>{{ message }}</p>", &todo_component(), &CompilerConfig::default());
            assert_eq!(
                descriptor.slots[0].statement,
                [
                    "const current = ctx.message;",
                    "if (!slot.attached || !Object.is(slot.previous, current)) {",
                    "  surface.setProperty([0, 0], 'textContent', current);",
                    "  slot.previous = current;",
                    "  slot.attached = true;",
                    "}",
                ]
                .join("\n")
            );
        }

        #[test]
        fn should_use_the_configured_context_name() {
            let config = CompilerConfig {
                context_name: "component".to_string(),
                ..CompilerConfig::default()
            };
            let descriptor = generate_for("{{ message }}", &todo_component(), &config);
            assert_eq!(descriptor.context_name, "component");
            assert!(descriptor.slots[0].statement.starts_with("const current = component.message;"));
        }

        #[test]
        fn should_generate_identically_twice() {
            let source = r#"<button (click)="onAdd()">{{ message }}</button>"#;
            let config = CompilerConfig::default();
            assert_eq!(
                generate_for(source, &todo_component(), &config),
                generate_for(source, &todo_component(), &config)
            );
        }
    }

    mod factories {
        use super::*;

        #[test]
        fn should_reference_top_level_functions_and_instantiate_classes() {
            let decl = todo_component()
                .with_provider(ProviderDecl::named_factory("Logger", "createLogger"))
                .with_provider(ProviderDecl::class("Store", "StoreImpl"));
            let descriptor = generate_for("", &decl, &CompilerConfig::default());
            assert_eq!(descriptor.factories.len(), 2);
            let logger = &descriptor.factories["Logger"];
            assert_eq!(
                logger.kind,
                FactoryKind::Function {
                    name: "createLogger".to_string()
                }
            );
            assert_eq!(logger.expression, "createLogger");
            assert_eq!(descriptor.factories["Store"].expression, "() => new StoreImpl()");
            assert_eq!(
                emit_factory_table(&descriptor),
                "{\n  Logger: createLogger,\n  Store: () => new StoreImpl()\n}"
            );
        }

        #[test]
        fn should_leave_closures_out_of_the_table() {
            let decl = todo_component()
                .with_provider(ProviderDecl::inline_factory("Logger", "() => new Logger(config)"))
                .with_provider(ProviderDecl::named_factory("Clock", "systemClock"));
            let config = CompilerConfig::default().with_mode(CompilationMode::FastUnchecked);
            let descriptor = generate_for("", &decl, &config);
            let tokens: Vec<&str> = descriptor.factories.keys().map(|k| k.as_str()).collect();
            assert_eq!(tokens, vec!["Clock"]);
            assert_eq!(descriptor.mode, CompilationMode::FastUnchecked);
        }

        #[test]
        fn should_emit_an_empty_table_without_providers() {
            let descriptor = generate_for("", &todo_component(), &CompilerConfig::default());
            assert_eq!(emit_factory_table(&descriptor), "{}");
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn should_serialize_with_camel_case_keys_and_tagged_ops() {
            let decl = todo_component().with_provider(ProviderDecl::class("Store", "StoreImpl"));
            let descriptor = generate_for(r#"<button (click)="onAdd()"></button>"#, &decl, &CompilerConfig::default());
            let json: serde_json::Value = serde_json::from_str(&descriptor.to_json().unwrap()).unwrap();
            assert_eq!(json["mode"], "strict-static");
            assert_eq!(json["contextName"], "ctx");
            assert_eq!(json["slots"][0]["kind"], "event");
            assert_eq!(json["slots"][0]["eventName"], "click");
            assert_eq!(json["slots"][0]["op"]["op"], "invoke");
            assert_eq!(json["slots"][0]["op"]["returns"], "void");
            assert_eq!(json["factories"]["Store"]["kind"], "class");
            assert_eq!(json["factories"]["Store"]["className"], "StoreImpl");
        }

        #[test]
        fn should_read_back_what_it_writes() {
            let decl = todo_component().with_provider(ProviderDecl::named_factory("Logger", "createLogger"));
            let descriptor = generate_for(
                r#"<input (change)="save($event.target)" [value]="user.name">"#,
                &decl,
                &CompilerConfig::default(),
            );
            let restored = ViewDescriptor::from_json(&descriptor.to_json().unwrap()).unwrap();
            assert_eq!(restored, descriptor);
        }
    }
}
