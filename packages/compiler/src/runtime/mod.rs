//! Reference runtime
//!
//! Interprets a [`ViewDescriptor`](crate::codegen::ViewDescriptor) against a
//! component instance and a bindable surface. It executes the same slot
//! semantics the generated statements encode, so change detection and event
//! suppression can be exercised without a JavaScript host.

pub mod component;
pub mod surface;
pub mod value;
pub mod view;

pub use component::{ComponentInstance, DynamicComponent, MethodFn};
pub use surface::{BindableSurface, Disposer, EventHandler, RecordingSurface};
pub use value::Value;
pub use view::{SlotState, ViewInstance};

/// A descriptor asked for something the component instance does not have.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error("component has no field `{0}`")]
    UnknownField(String),
    #[error("component has no method `{0}`")]
    UnknownMethod(String),
}
