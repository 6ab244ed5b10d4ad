//! Type-definition-time layout planning.
//!
//! A [`SlotPlan`] states what a type needs (a slot count, optional mapping
//! and weak-reference slots, optional trailing fields) and computes the
//! byte offsets a host would otherwise fill in by hand. Auxiliary slots are
//! placed directly after the last data slot, mapping slot first.

use std::sync::Arc;

use crate::descriptor::TypeDescriptor;
use crate::error::LayoutError;
use crate::host::HostLayout;
use crate::shape::ShapeKind;

/// Requested shape of a record type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct SlotPlan {
    /// Layout family.
    pub kind: ShapeKind,
    /// Data slots (fixed) or element capacity (variable).
    pub data_slots: usize,
    /// Reserve a mapping-attachment slot.
    pub dict: bool,
    /// Reserve a weak-reference slot.
    pub weak: bool,
    /// Fixed fields appended after the allocation (variable shapes only).
    pub trailing_fields: usize,
}

impl SlotPlan {
    /// A fixed-shape type with `data_slots` slots.
    pub fn fixed(data_slots: usize) -> Self {
        Self {
            kind: ShapeKind::Fixed,
            data_slots,
            dict: false,
            weak: false,
            trailing_fields: 0,
        }
    }

    /// A variable-shape type holding at most `capacity` elements.
    pub fn variable(capacity: usize) -> Self {
        Self {
            kind: ShapeKind::Variable,
            ..Self::fixed(capacity)
        }
    }

    /// A plan for a type extending `base` with `extra` data slots.
    ///
    /// The derived type keeps the base's family and auxiliary slots. The
    /// base's trailing fields are not inherited; declare them again if
    /// needed.
    pub fn extending(base: &TypeDescriptor, extra: usize) -> Self {
        Self {
            kind: base.kind(),
            data_slots: base.data_slot_count() + extra,
            dict: base.has_dict_slot(),
            weak: base.has_weak_slot(),
            trailing_fields: 0,
        }
    }

    /// Also reserve a mapping-attachment slot.
    pub fn with_dict(mut self) -> Self {
        self.dict = true;
        self
    }

    /// Also reserve a weak-reference slot.
    pub fn with_weakref(mut self) -> Self {
        self.weak = true;
        self
    }

    /// Append `count` trailing fixed fields.
    pub fn with_trailing_fields(mut self, count: usize) -> Self {
        self.trailing_fields = count;
        self
    }

    /// Bytes for header, data slots and auxiliary slots under `host`, or
    /// `None` if the total does not fit in a `usize`.
    pub fn allocation_size(&self, host: &HostLayout) -> Option<usize> {
        let header = match self.kind {
            ShapeKind::Fixed => host.header_size,
            ShapeKind::Variable => host.var_header_size,
        };
        let aux = usize::from(self.dict) + usize::from(self.weak);
        self.data_slots
            .checked_add(aux)?
            .checked_mul(host.word_size)?
            .checked_add(header)
    }

    /// Compute offsets and build a validated descriptor.
    pub fn describe(
        &self,
        name: impl Into<String>,
        host: HostLayout,
    ) -> Result<TypeDescriptor, LayoutError> {
        self.builder(name.into(), host)?.build()
    }

    /// Like [`describe`](Self::describe), recording `base` as the shared
    /// prefix and using its host geometry.
    pub fn describe_derived(
        &self,
        name: impl Into<String>,
        base: &Arc<TypeDescriptor>,
    ) -> Result<TypeDescriptor, LayoutError> {
        self.builder(name.into(), base.host())?
            .base(Arc::clone(base))
            .build()
    }

    fn builder(
        &self,
        name: String,
        host: HostLayout,
    ) -> Result<crate::TypeDescriptorBuilder, LayoutError> {
        let header = match self.kind {
            ShapeKind::Fixed => host.header_size,
            ShapeKind::Variable => host.var_header_size,
        };
        let Some(size) = self.allocation_size(&host) else {
            return Err(LayoutError::SizeOverflow { name });
        };
        // Bounded by `size`, so neither step can overflow.
        let mut cursor = header + self.data_slots * host.word_size;
        let mut builder = TypeDescriptor::builder(name, host)
            .kind(self.kind)
            .total_allocation_size(size);
        if self.dict {
            builder = builder.dict_offset(cursor);
            cursor += host.word_size;
        }
        if self.weak {
            builder = builder.weak_offset(cursor);
        }
        if self.trailing_fields > 0 {
            builder = builder.trailing_fields(size, self.trailing_fields);
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> HostLayout {
        HostLayout::new(16, 24, 8)
    }

    #[test]
    fn plain_fixed_plan() {
        let desc = SlotPlan::fixed(4).describe("Quad", host()).unwrap();
        assert_eq!(desc.total_allocation_size(), 48);
        assert_eq!(desc.data_slot_count(), 4);
    }

    #[test]
    fn dict_and_weakref_follow_the_data_run() {
        let desc = SlotPlan::fixed(3)
            .with_dict()
            .with_weakref()
            .describe("Obj", host())
            .unwrap();
        assert_eq!(desc.total_allocation_size(), 16 + 5 * 8);
        assert_eq!(desc.dict_slot_offset(), 40);
        assert_eq!(desc.weak_slot_offset(), 48);
        assert_eq!(desc.data_slot_count(), 3);
    }

    #[test]
    fn variable_plan_with_trailing_fields() {
        let desc = SlotPlan::variable(4)
            .with_dict()
            .with_trailing_fields(2)
            .describe("Row", host())
            .unwrap();
        assert_eq!(desc.base_header_size(), 24);
        assert_eq!(desc.total_allocation_size(), 24 + 5 * 8);
        assert_eq!(desc.data_slot_count(), 4);
        let trailing = desc.trailing().unwrap();
        assert_eq!(trailing.offset, 64);
        assert_eq!(trailing.count, 2);
        assert_eq!(desc.instance_size(), 80);
    }

    #[test]
    fn trailing_fields_on_fixed_plan_fail() {
        let err = SlotPlan::fixed(1)
            .with_trailing_fields(1)
            .describe("Bad", host())
            .unwrap_err();
        assert!(matches!(err, LayoutError::TrailingOverlap { .. }));
    }

    #[test]
    fn slot_count_past_address_space_is_rejected() {
        let plan = SlotPlan::fixed(usize::MAX);
        assert_eq!(plan.allocation_size(&host()), None);
        let err = plan.describe("Huge", host()).unwrap_err();
        assert!(matches!(err, LayoutError::SizeOverflow { .. }));

        let err = SlotPlan::variable(usize::MAX / 8)
            .with_dict()
            .with_weakref()
            .describe("Huge", host())
            .unwrap_err();
        assert!(matches!(err, LayoutError::SizeOverflow { .. }));
    }

    #[test]
    fn trailing_count_past_address_space_is_rejected() {
        let err = SlotPlan::variable(2)
            .with_trailing_fields(usize::MAX / 8 + 1)
            .describe("Huge", host())
            .unwrap_err();
        assert!(matches!(err, LayoutError::TrailingOverlap { .. }));
    }

    #[test]
    fn extending_inherits_aux_slots() {
        let base = Arc::new(
            SlotPlan::fixed(2)
                .with_dict()
                .describe("Point", host())
                .unwrap(),
        );
        let plan = SlotPlan::extending(&base, 1);
        assert_eq!(plan.data_slots, 3);
        assert!(plan.dict);
        assert!(!plan.weak);

        let derived = plan.describe_derived("Point3", &base).unwrap();
        assert_eq!(derived.data_slot_count(), 3);
        assert!(derived.has_dict_slot());
        assert_eq!(derived.dict_slot_offset(), 16 + 3 * 8);
        assert_eq!(derived.base().unwrap().name(), "Point");
    }

    #[test]
    fn extending_with_zero_extra_keeps_shape() {
        let base = Arc::new(SlotPlan::variable(2).describe("Row", host()).unwrap());
        let derived = SlotPlan::extending(&base, 0)
            .describe_derived("Row2", &base)
            .unwrap();
        assert_eq!(derived.total_allocation_size(), base.total_allocation_size());
        assert!(derived.is_variable_shape());
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn planned_types_round_trip_their_slot_count(
                slots in 0usize..128,
                dict in any::<bool>(),
                weak in any::<bool>(),
                variable in any::<bool>(),
            ) {
                let mut plan = if variable {
                    SlotPlan::variable(slots)
                } else {
                    SlotPlan::fixed(slots)
                };
                plan.dict = dict;
                plan.weak = weak;
                let host = host();
                let desc = plan.describe("T", host).unwrap();
                prop_assert_eq!(desc.data_slot_count(), slots);
                prop_assert_eq!(Some(desc.total_allocation_size()), plan.allocation_size(&host));
                prop_assert_eq!(desc.has_dict_slot(), dict);
                prop_assert_eq!(desc.has_weak_slot(), weak);
            }
        }
    }
}
