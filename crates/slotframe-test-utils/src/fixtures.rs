//! Canned host layouts and descriptors.
//!
//! The "scenario" host has a 16-byte header, a 24-byte extended header and
//! 8-byte words, which is also the native layout on 64-bit targets.

use std::sync::Arc;

use slotframe_core::{HostLayout, SlotPlan, TypeDescriptor};

/// Header 16, extended header 24, word 8.
pub fn scenario_host() -> HostLayout {
    HostLayout::new(16, 24, 8)
}

/// Describe `plan` against the native host, panicking on failure.
pub fn describe(name: &str, plan: SlotPlan) -> Arc<TypeDescriptor> {
    Arc::new(
        plan.describe(name, HostLayout::native())
            .unwrap_or_else(|e| panic!("fixture '{name}' is invalid: {e}")),
    )
}

/// Fixed shape, 4 data slots, no auxiliary slots.
pub fn quad() -> Arc<TypeDescriptor> {
    describe("Quad", SlotPlan::fixed(4))
}

/// Fixed shape, 3 data slots plus a mapping slot, in the same allocation
/// as [`quad`].
pub fn quad_with_dict() -> Arc<TypeDescriptor> {
    describe("QuadDict", SlotPlan::fixed(3).with_dict())
}

/// Fixed shape with both auxiliary slots.
pub fn attributed(data_slots: usize) -> Arc<TypeDescriptor> {
    describe("Attributed", SlotPlan::fixed(data_slots).with_dict().with_weakref())
}

/// Variable shape with the given element capacity.
pub fn row(capacity: usize) -> Arc<TypeDescriptor> {
    describe("Row", SlotPlan::variable(capacity))
}

/// Variable shape with a mapping slot and `trailing` named fields.
pub fn record_row(capacity: usize, trailing: usize) -> Arc<TypeDescriptor> {
    describe(
        "RecordRow",
        SlotPlan::variable(capacity)
            .with_dict()
            .with_trailing_fields(trailing),
    )
}
