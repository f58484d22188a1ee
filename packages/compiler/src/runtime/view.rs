//! View instances
//!
//! One per rendered template. Holds the component, the descriptor and the
//! per-slot change detection state.
//!
//! Slot state machine: every interpolation and property slot starts
//! `Unattached` and moves to `Attached(previous)` on the first detection
//! cycle, which always writes. Later cycles write only when the current value
//! is not identical to `previous`. There is no teardown state.

use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::component::ComponentInstance;
use super::surface::{BindableSurface, Disposer};
use super::value::Value;
use super::RuntimeError;
use crate::binding::BindingKind;
use crate::codegen::{ArgOp, Slot, SlotOp, ViewDescriptor};
use crate::metadata::ReturnKind;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SlotState {
    #[default]
    Unattached,
    Attached(Value),
}

type Args = SmallVec<[Value; 4]>;

pub struct ViewInstance<C: ComponentInstance> {
    descriptor: Rc<ViewDescriptor>,
    component: C,
    states: Vec<SlotState>,
    disposers: Vec<Disposer>,
}

impl<C: ComponentInstance> ViewInstance<C> {
    pub fn new(descriptor: Rc<ViewDescriptor>, component: C) -> Self {
        let states = vec![SlotState::Unattached; descriptor.slots.len()];
        ViewInstance {
            descriptor,
            component,
            states,
            disposers: Vec::new(),
        }
    }

    pub fn descriptor(&self) -> &ViewDescriptor {
        &self.descriptor
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    pub fn slot_state(&self, index: usize) -> Option<&SlotState> {
        self.states.get(index)
    }

    /// Runs one detection cycle over the interpolation and property slots in
    /// declaration order. Returns the number of surface writes.
    pub fn detect_changes(&mut self, surface: &mut dyn BindableSurface) -> Result<usize, RuntimeError> {
        let descriptor = Rc::clone(&self.descriptor);
        let mut writes = 0;
        for (index, slot) in descriptor.slots.iter().enumerate() {
            if slot.kind == BindingKind::Event {
                continue;
            }
            let current = self.evaluate(slot, &Value::Undefined)?;
            let state = &mut self.states[index];
            let changed = match state {
                SlotState::Unattached => true,
                SlotState::Attached(previous) => !previous.is_identical(&current),
            };
            if changed {
                surface.set_property(&slot.target, &current);
                *state = SlotState::Attached(current);
                writes += 1;
            }
        }
        Ok(writes)
    }

    /// Runs every event slot on `nodes` whose declared event matches the
    /// event's `type`, in declaration order. Each handler's `result !== false`
    /// is ANDed into the flag, starting from `caller_suppress`.
    pub fn dispatch_event(&mut self, nodes: &[usize], event: &Value, caller_suppress: bool) -> Result<bool, RuntimeError> {
        let descriptor = Rc::clone(&self.descriptor);
        let mut suppress = caller_suppress;
        for slot in &descriptor.slots {
            if slot.kind == BindingKind::Event && slot.target.nodes == nodes {
                suppress = self.run_event_slot(slot, event, suppress)?;
            }
        }
        Ok(suppress)
    }

    fn run_event_slot(&mut self, slot: &Slot, event: &Value, caller_suppress: bool) -> Result<bool, RuntimeError> {
        let event_type = event.get("type");
        if event_type.as_str() != slot.event_name.as_deref() {
            return Ok(caller_suppress);
        }
        let result = self.evaluate(slot, event)?;
        Ok(result.is_not_false() && caller_suppress)
    }

    fn evaluate(&mut self, slot: &Slot, event: &Value) -> Result<Value, RuntimeError> {
        match &slot.op {
            SlotOp::Read { member, path } => Ok(self.component.read(member)?.get_path(path)),
            SlotOp::Invoke { method, args, returns } => {
                let args = args
                    .iter()
                    .map(|arg| self.argument(arg, event))
                    .collect::<Result<Args, _>>()?;
                let result = self.component.invoke(method, &args)?;
                // Void results are never observed.
                Ok(match returns {
                    ReturnKind::Void => Value::Undefined,
                    ReturnKind::Value => result,
                })
            }
        }
    }

    fn argument(&self, arg: &ArgOp, event: &Value) -> Result<Value, RuntimeError> {
        match arg {
            ArgOp::Member { member, path } => Ok(self.component.read(member)?.get_path(path)),
            ArgOp::Event { path } => Ok(event.get_path(path)),
            ArgOp::Literal { value } => Ok(Value::from(value)),
        }
    }

    /// Registers one listener per event slot. The handlers hold the view
    /// weakly; once it is dropped they leave the caller's flag unchanged.
    pub fn attach_listeners(view: &Rc<RefCell<Self>>, surface: &mut dyn BindableSurface)
    where
        C: 'static,
    {
        let descriptor = Rc::clone(&view.borrow().descriptor);
        let mut disposers = Vec::new();
        for (index, slot) in descriptor.slots.iter().enumerate() {
            if slot.kind != BindingKind::Event {
                continue;
            }
            let Some(event_name) = slot.event_name.as_deref() else {
                continue;
            };
            let weak: Weak<RefCell<Self>> = Rc::downgrade(view);
            let handler = Box::new(move |event: &Value, caller_suppress: bool| {
                let Some(view) = weak.upgrade() else {
                    return Ok(caller_suppress);
                };
                let descriptor = Rc::clone(&view.borrow().descriptor);
                let Some(slot) = descriptor.slots.get(index) else {
                    return Ok(caller_suppress);
                };
                let mut view = view.borrow_mut();
                view.run_event_slot(slot, event, caller_suppress)
            });
            disposers.push(surface.add_event_listener(&slot.target.element(), event_name, handler));
        }
        view.borrow_mut().disposers.extend(disposers);
    }

    /// Disposes every listener registered by [`attach_listeners`](Self::attach_listeners).
    pub fn detach(&mut self) {
        for disposer in self.disposers.drain(..) {
            disposer.dispose();
        }
    }
}
