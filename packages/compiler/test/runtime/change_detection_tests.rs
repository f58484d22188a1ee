/**
 * Change Detection and Event Dispatch Tests
 *
 * Runs compiled descriptors against the reference runtime.
 */

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use indexmap::IndexMap;
    use serde_json::json;
    use view_compiler::binding::TargetPath;
    use view_compiler::logging::NullLogger;
    use view_compiler::metadata::{ComponentDecl, MemberDecl};
    use view_compiler::runtime::*;
    use view_compiler::{compile, CompilationUnit, CompilerConfig, ViewDescriptor};

    fn descriptor(template: &str, component: ComponentDecl) -> Rc<ViewDescriptor> {
        let unit = CompilationUnit::new(template, component);
        Rc::new(compile(&unit, &CompilerConfig::default(), &NullLogger).unwrap())
    }

    fn clicks(component: &DynamicComponent) -> f64 {
        match component.field("clicks") {
            Some(Value::Number(n)) => *n,
            _ => 0.0,
        }
    }

    /// A method body that counts its calls in the `clicks` field.
    fn counting(result: Value) -> impl FnMut(&mut IndexMap<String, Value>, &[Value]) -> Value {
        move |fields: &mut IndexMap<String, Value>, _args: &[Value]| {
            let count = match fields.get("clicks") {
                Some(Value::Number(n)) => *n,
                _ => 0.0,
            };
            fields.insert("clicks".to_string(), Value::from(count + 1.0));
            result.clone()
        }
    }

    mod detection {
        use super::*;

        fn greeting() -> (Rc<ViewDescriptor>, DynamicComponent) {
            let decl = ComponentDecl::new("GreetingComponent").with_member(MemberDecl::field("message").with_initial(json!("hello")));
            let descriptor = descriptor("<p>{{ message }}</p>", decl.clone());
            let metadata = view_compiler::metadata::load(&decl).unwrap();
            (descriptor, DynamicComponent::from_metadata(&metadata))
        }

        #[test]
        fn should_write_every_slot_on_the_first_cycle() {
            let (descriptor, component) = greeting();
            let mut view = ViewInstance::new(descriptor, component);
            let mut surface = RecordingSurface::new();
            assert_eq!(view.slot_state(0), Some(&SlotState::Unattached));
            assert_eq!(view.detect_changes(&mut surface).unwrap(), 1);
            assert_eq!(
                surface.writes(),
                &[(TargetPath::property(vec![0, 0], "textContent"), Value::from("hello"))]
            );
            assert_eq!(view.slot_state(0), Some(&SlotState::Attached(Value::from("hello"))));
        }

        #[test]
        fn should_not_write_when_nothing_changed() {
            let (descriptor, component) = greeting();
            let mut view = ViewInstance::new(descriptor, component);
            let mut surface = RecordingSurface::new();
            view.detect_changes(&mut surface).unwrap();
            surface.take_writes();
            assert_eq!(view.detect_changes(&mut surface).unwrap(), 0);
            assert!(surface.writes().is_empty());
        }

        #[test]
        fn should_write_exactly_once_per_change() {
            let (descriptor, component) = greeting();
            let mut view = ViewInstance::new(descriptor, component);
            let mut surface = RecordingSurface::new();
            view.detect_changes(&mut surface).unwrap();
            surface.take_writes();

            view.component_mut().set_field("message", Value::from("world"));
            assert_eq!(view.detect_changes(&mut surface).unwrap(), 1);
            assert_eq!(view.detect_changes(&mut surface).unwrap(), 0);
            let writes = surface.take_writes();
            assert_eq!(writes.len(), 1);
            assert_eq!(writes[0].1, Value::from("world"));
        }

        #[test]
        fn should_treat_nan_as_unchanged() {
            let decl = ComponentDecl::new("RatioComponent").with_member(MemberDecl::field("ratio"));
            let descriptor = descriptor("<p>{{ ratio }}</p>", decl);
            let component = DynamicComponent::new().with_field("ratio", Value::from(f64::NAN));
            let mut view = ViewInstance::new(descriptor, component);
            let mut surface = RecordingSurface::new();
            assert_eq!(view.detect_changes(&mut surface).unwrap(), 1);
            assert_eq!(view.detect_changes(&mut surface).unwrap(), 0);

            view.component_mut().set_field("ratio", Value::from(f64::NAN));
            assert_eq!(view.detect_changes(&mut surface).unwrap(), 0);
            view.component_mut().set_field("ratio", Value::from(0.5));
            assert_eq!(view.detect_changes(&mut surface).unwrap(), 1);
            assert_eq!(surface.writes().len(), 2);
        }

        #[test]
        fn should_compare_composites_by_identity() {
            let decl = ComponentDecl::new("ListComponent").with_member(MemberDecl::field("items"));
            let descriptor = descriptor(r#"<ul [items]="items"></ul>"#, decl);
            let items = Value::array(vec![Value::from(1.0)]);
            let component = DynamicComponent::new().with_field("items", items.clone());
            let mut view = ViewInstance::new(descriptor, component);
            let mut surface = RecordingSurface::new();
            view.detect_changes(&mut surface).unwrap();

            view.component_mut().set_field("items", items);
            assert_eq!(view.detect_changes(&mut surface).unwrap(), 0);

            view.component_mut().set_field("items", Value::array(vec![Value::from(1.0)]));
            assert_eq!(view.detect_changes(&mut surface).unwrap(), 1);
        }

        #[test]
        fn should_walk_member_paths_and_read_missing_properties_as_undefined() {
            let decl = ComponentDecl::new("ProfileComponent").with_member(MemberDecl::field("user"));
            let descriptor = descriptor("{{ user.name }}{{ user.address.city }}", decl);
            let component = DynamicComponent::new().with_field("user", Value::object([("name", Value::from("Ada"))]));
            let mut view = ViewInstance::new(descriptor, component);
            let mut surface = RecordingSurface::new();
            assert_eq!(view.detect_changes(&mut surface).unwrap(), 2);
            assert_eq!(surface.writes()[0].1, Value::from("Ada"));
            assert_eq!(surface.writes()[1].1, Value::Undefined);
        }

        #[test]
        fn should_evaluate_method_calls_on_every_cycle() {
            let decl = ComponentDecl::new("C").with_member(MemberDecl::method("label", &[]));
            let descriptor = descriptor(r#"<span [title]="label()"></span>"#, decl);
            let component = DynamicComponent::new().with_method("label", counting(Value::from("same")));
            let mut view = ViewInstance::new(descriptor, component);
            let mut surface = RecordingSurface::new();
            view.detect_changes(&mut surface).unwrap();
            view.detect_changes(&mut surface).unwrap();
            assert_eq!(clicks(view.component()), 2.0);
            assert_eq!(surface.writes().len(), 1);
        }

        #[test]
        fn should_report_members_the_instance_lacks() {
            let decl = ComponentDecl::new("C").with_member(MemberDecl::field("message"));
            let descriptor = descriptor("{{ message }}", decl);
            let mut view = ViewInstance::new(descriptor, DynamicComponent::new());
            let mut surface = RecordingSurface::new();
            assert_eq!(
                view.detect_changes(&mut surface),
                Err(RuntimeError::UnknownField("message".to_string()))
            );
        }
    }

    mod events {
        use super::*;

        fn todo() -> Rc<ViewDescriptor> {
            let decl = ComponentDecl::new("TodoComponent")
                .with_member(MemberDecl::method("onAdd", &[]).returning_void())
                .with_member(MemberDecl::method("onKey", &["key"]));
            descriptor(
                r#"<button (click)="onAdd()">Add</button><input (keydown)="onKey($event.key)">"#,
                decl,
            )
        }

        #[test]
        fn should_keep_the_caller_flag_for_void_handlers() {
            let component = DynamicComponent::new()
                .with_method("onAdd", counting(Value::from(false)))
                .with_method("onKey", counting(Value::Undefined));
            let mut view = ViewInstance::new(todo(), component);
            // A void method's own return value is never observed.
            assert!(view.dispatch_event(&[0], &Value::event("click"), true).unwrap());
            assert!(!view.dispatch_event(&[0], &Value::event("click"), false).unwrap());
            assert_eq!(clicks(view.component()), 2.0);
        }

        #[test]
        fn should_suppress_when_a_value_handler_returns_false() {
            let component = DynamicComponent::new()
                .with_method("onAdd", counting(Value::Undefined))
                .with_method("onKey", |_fields: &mut IndexMap<String, Value>, args: &[Value]| {
                    Value::Bool(args.first().and_then(Value::as_str) != Some("Enter"))
                });
            let mut view = ViewInstance::new(todo(), component);
            let enter = Value::object([("type", Value::from("keydown")), ("key", Value::from("Enter"))]);
            let tab = Value::object([("type", Value::from("keydown")), ("key", Value::from("Tab"))]);
            assert!(!view.dispatch_event(&[1], &enter, true).unwrap());
            assert!(view.dispatch_event(&[1], &tab, true).unwrap());
        }

        #[test]
        fn should_ignore_events_of_another_type() {
            let component = DynamicComponent::new()
                .with_method("onAdd", counting(Value::Undefined))
                .with_method("onKey", counting(Value::Undefined));
            let mut view = ViewInstance::new(todo(), component);
            assert!(view.dispatch_event(&[0], &Value::event("dblclick"), true).unwrap());
            assert!(!view.dispatch_event(&[0], &Value::event("dblclick"), false).unwrap());
            assert_eq!(clicks(view.component()), 0.0);
        }

        #[test]
        fn should_combine_handlers_on_the_same_element_in_order() {
            let decl = ComponentDecl::new("C")
                .with_member(MemberDecl::method("first", &[]))
                .with_member(MemberDecl::method("second", &[]));
            let descriptor = descriptor(r#"<a (click)="first()" on-click="second()"></a>"#, decl);
            let component = DynamicComponent::new()
                .with_method("first", counting(Value::from(false)))
                .with_method("second", counting(Value::from(true)));
            let mut view = ViewInstance::new(descriptor, component);
            assert!(!view.dispatch_event(&[0], &Value::event("click"), true).unwrap());
            assert_eq!(clicks(view.component()), 2.0);
        }

        #[test]
        fn should_deliver_surface_events_through_attached_listeners() {
            let component = DynamicComponent::new()
                .with_method("onAdd", counting(Value::Undefined))
                .with_method("onKey", counting(Value::from(false)));
            let view = Rc::new(RefCell::new(ViewInstance::new(todo(), component)));
            let mut surface = RecordingSurface::new();
            ViewInstance::attach_listeners(&view, &mut surface);
            assert_eq!(surface.listener_count(), 2);

            assert!(surface.fire(&[0], &Value::event("click"), true).unwrap());
            assert!(!surface.fire(&[1], &Value::event("keydown"), true).unwrap());
            assert_eq!(clicks(view.borrow().component()), 2.0);

            view.borrow_mut().detach();
            assert_eq!(surface.listener_count(), 0);
            assert!(surface.fire(&[0], &Value::event("click"), true).unwrap());
            assert_eq!(clicks(view.borrow().component()), 2.0);
        }

        #[test]
        fn should_leave_the_flag_alone_once_the_view_is_gone() {
            let component = DynamicComponent::new()
                .with_method("onAdd", counting(Value::Undefined))
                .with_method("onKey", counting(Value::from(false)));
            let view = Rc::new(RefCell::new(ViewInstance::new(todo(), component)));
            let mut surface = RecordingSurface::new();
            ViewInstance::attach_listeners(&view, &mut surface);
            drop(view);
            assert!(surface.fire(&[1], &Value::event("keydown"), true).unwrap());
        }
    }
}
