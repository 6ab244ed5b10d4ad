//! Benchmark profiles for the slotframe layout engine.
//!
//! - [`wide_fixed`]: a fixed-shape type with [`WIDE_SLOTS`] slots and both
//!   auxiliary slots
//! - [`long_variable`]: a variable-shape type with capacity
//!   [`LONG_CAPACITY`], a mapping slot and two trailing fields
//! - [`block_for`]: a zeroed word buffer sized for one instance

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use slotframe_core::{HostLayout, SlotPlan, TypeDescriptor};

/// Slot count of the [`wide_fixed`] profile.
pub const WIDE_SLOTS: usize = 64;

/// Element capacity of the [`long_variable`] profile.
pub const LONG_CAPACITY: usize = 1024;

/// Fixed shape, [`WIDE_SLOTS`] data slots, mapping and weak slots.
pub fn wide_fixed() -> TypeDescriptor {
    SlotPlan::fixed(WIDE_SLOTS)
        .with_dict()
        .with_weakref()
        .describe("Wide", HostLayout::native())
        .unwrap()
}

/// Variable shape, [`LONG_CAPACITY`] elements, a mapping slot and two
/// trailing fields.
pub fn long_variable() -> TypeDescriptor {
    SlotPlan::variable(LONG_CAPACITY)
        .with_dict()
        .with_trailing_fields(2)
        .describe("Long", HostLayout::native())
        .unwrap()
}

/// A zeroed buffer large enough for one instance of `ty`.
pub fn block_for(ty: &TypeDescriptor) -> Vec<usize> {
    vec![0; ty.instance_words()]
}
