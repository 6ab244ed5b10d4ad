//! Auxiliary slot location.
//!
//! The mapping-attachment and weak-reference slots are found through the
//! byte offsets stored in the descriptor, taken verbatim. They are never
//! derived from the data-slot count and never reachable through slot
//! indexing.

use slotframe_core::AuxSlot;

use crate::record::Record;

/// Byte offset of an auxiliary slot of `record`.
///
/// # Panics
///
/// Panics if the record's type does not declare the slot.
pub fn aux_slot_offset(record: &Record<'_>, slot: AuxSlot) -> usize {
    let ty = record.descriptor();
    match slot {
        AuxSlot::Mapping => ty.dict_slot_offset(),
        AuxSlot::Weak => ty.weak_slot_offset(),
    }
}

/// Address of the mapping-attachment slot of `record`.
///
/// # Panics
///
/// Panics if the record's type has no mapping slot.
pub fn dict_slot_addr(record: &Record<'_>) -> usize {
    record.addr() + aux_slot_offset(record, AuxSlot::Mapping)
}

/// Address of the weak-reference slot of `record`.
///
/// # Panics
///
/// Panics if the record's type has no weak-reference slot.
pub fn weak_slot_addr(record: &Record<'_>) -> usize {
    record.addr() + aux_slot_offset(record, AuxSlot::Weak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotframe_core::{HostLayout, SlotPlan, TypeDescriptor};

    const W: usize = HostLayout::NATIVE_WORD;

    #[test]
    fn offsets_come_from_the_descriptor() {
        let host = HostLayout::native();
        // Weak slot first, mapping slot last: the locator must not assume an order.
        let ty = TypeDescriptor::builder("Swapped", host)
            .total_allocation_size(host.header_size + 4 * W)
            .weak_offset(host.header_size + 2 * W)
            .dict_offset(host.header_size + 3 * W)
            .build()
            .unwrap();
        let mut words = vec![0usize; ty.instance_words()];
        let rec = Record::from_words(&mut words, &ty).unwrap();
        assert_eq!(dict_slot_addr(&rec), rec.addr() + host.header_size + 3 * W);
        assert_eq!(weak_slot_addr(&rec), rec.addr() + host.header_size + 2 * W);
    }

    #[test]
    fn variable_shape_aux_slots_trail_the_capacity() {
        let host = HostLayout::native();
        let ty = SlotPlan::variable(3)
            .with_dict()
            .with_weakref()
            .describe("Row", host)
            .unwrap();
        let mut words = vec![0usize; ty.instance_words()];
        let rec = Record::with_length(&mut words, &ty, 1).unwrap();
        assert_eq!(
            aux_slot_offset(&rec, AuxSlot::Mapping),
            host.var_header_size + 3 * W
        );
        assert_eq!(
            aux_slot_offset(&rec, AuxSlot::Weak),
            host.var_header_size + 4 * W
        );
    }

    #[test]
    #[should_panic(expected = "has no weak-reference slot")]
    fn absent_weak_slot_panics() {
        let ty = SlotPlan::fixed(1)
            .with_dict()
            .describe("Obj", HostLayout::native())
            .unwrap();
        let mut words = vec![0usize; ty.instance_words()];
        let rec = Record::from_words(&mut words, &ty).unwrap();
        let _ = weak_slot_addr(&rec);
    }
}
