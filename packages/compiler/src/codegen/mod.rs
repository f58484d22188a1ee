//! Code generation: turns a resolved, validated template into a View
//! Descriptor.

pub mod generator;
pub mod view_descriptor;

pub use generator::{emit_factory_table, generate};
pub use view_descriptor::{ArgOp, FactoryEntry, FactoryKind, Slot, SlotOp, ViewDescriptor};
