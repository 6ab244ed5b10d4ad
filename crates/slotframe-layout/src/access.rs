//! The accessor facade: indexed reads and writes on a [`Record`].
//!
//! Every access recomputes the [`SlotRun`], checks the index against it and
//! then performs a single word load or store. An index outside
//! `[0, len)` is a contract violation and panics; it is never wrapped or
//! clamped. Stores are raw: releasing whatever the slot held before is the
//! host's business, which [`Record::replace_slot`] and
//! [`Record::set_slot_with`] make explicit.

use slotframe_core::{AuxSlot, SlotValue};

use crate::auxiliary::aux_slot_offset;
use crate::raw;
use crate::record::Record;
use crate::run::SlotRun;

impl Record<'_> {
    /// The current data-slot run.
    pub fn slot_run(&self) -> SlotRun {
        SlotRun::of(self)
    }

    /// Number of data slots.
    pub fn len(&self) -> usize {
        self.slot_run().len()
    }

    /// Whether the record holds no data slots.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read data slot `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn get_slot(&self, i: usize) -> SlotValue {
        let offset = self.checked_slot_offset(i);
        SlotValue::from_addr(raw::load(self, offset))
    }

    /// Overwrite data slot `i` with `value`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn set_slot(&mut self, i: usize, value: SlotValue) {
        let offset = self.checked_slot_offset(i);
        raw::store(self, offset, value.addr());
    }

    /// Overwrite data slot `i` and return what it held.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn replace_slot(&mut self, i: usize, value: SlotValue) -> SlotValue {
        let offset = self.checked_slot_offset(i);
        let previous = SlotValue::from_addr(raw::load(self, offset));
        raw::store(self, offset, value.addr());
        previous
    }

    /// Overwrite data slot `i`, then hand the previous value to `release`.
    ///
    /// Whatever `release` returns is passed through untouched. The new value
    /// stays stored even if `release` fails.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn set_slot_with<E, F>(&mut self, i: usize, value: SlotValue, release: F) -> Result<(), E>
    where
        F: FnOnce(SlotValue) -> Result<(), E>,
    {
        let previous = self.replace_slot(i, value);
        release(previous)
    }

    /// Address of the mapping-attachment slot.
    ///
    /// # Panics
    ///
    /// Panics if the type has no mapping slot.
    pub fn dict_slot_addr(&self) -> usize {
        crate::auxiliary::dict_slot_addr(self)
    }

    /// Address of the weak-reference slot.
    ///
    /// # Panics
    ///
    /// Panics if the type has no weak-reference slot.
    pub fn weak_slot_addr(&self) -> usize {
        crate::auxiliary::weak_slot_addr(self)
    }

    /// Read the mapping-attachment slot.
    ///
    /// # Panics
    ///
    /// Panics if the type has no mapping slot.
    pub fn dict_slot(&self) -> SlotValue {
        self.aux_slot(AuxSlot::Mapping)
    }

    /// Overwrite the mapping-attachment slot.
    ///
    /// # Panics
    ///
    /// Panics if the type has no mapping slot.
    pub fn set_dict_slot(&mut self, value: SlotValue) {
        self.set_aux_slot(AuxSlot::Mapping, value);
    }

    /// Read the weak-reference slot.
    ///
    /// # Panics
    ///
    /// Panics if the type has no weak-reference slot.
    pub fn weak_slot(&self) -> SlotValue {
        self.aux_slot(AuxSlot::Weak)
    }

    /// Overwrite the weak-reference slot.
    ///
    /// # Panics
    ///
    /// Panics if the type has no weak-reference slot.
    pub fn set_weak_slot(&mut self, value: SlotValue) {
        self.set_aux_slot(AuxSlot::Weak, value);
    }

    /// Number of trailing fixed fields (zero unless the type declares them).
    pub fn trailing_len(&self) -> usize {
        self.descriptor().trailing().map_or(0, |t| t.count)
    }

    /// Read trailing field `j`.
    ///
    /// # Panics
    ///
    /// Panics if `j >= self.trailing_len()`.
    pub fn get_trailing(&self, j: usize) -> SlotValue {
        let offset = self.checked_trailing_offset(j);
        SlotValue::from_addr(raw::load(self, offset))
    }

    /// Overwrite trailing field `j`.
    ///
    /// # Panics
    ///
    /// Panics if `j >= self.trailing_len()`.
    pub fn set_trailing(&mut self, j: usize, value: SlotValue) {
        let offset = self.checked_trailing_offset(j);
        raw::store(self, offset, value.addr());
    }

    fn aux_slot(&self, slot: AuxSlot) -> SlotValue {
        let offset = aux_slot_offset(self, slot);
        SlotValue::from_addr(raw::load(self, offset))
    }

    fn set_aux_slot(&mut self, slot: AuxSlot, value: SlotValue) {
        let offset = aux_slot_offset(self, slot);
        raw::store(self, offset, value.addr());
    }

    fn checked_slot_offset(&self, i: usize) -> usize {
        let run = self.slot_run();
        assert!(
            run.contains(i),
            "slot index {i} out of range for '{}' of length {}",
            self.descriptor().name(),
            run.len()
        );
        run.slot_offset(i)
    }

    fn checked_trailing_offset(&self, j: usize) -> usize {
        let ty = self.descriptor();
        match ty.trailing() {
            Some(t) if j < t.count => t.offset + j * ty.host().word_size,
            other => panic!(
                "trailing field {j} out of range for '{}' with {} trailing fields",
                ty.name(),
                other.map_or(0, |t| t.count)
            ),
        }
    }
}
