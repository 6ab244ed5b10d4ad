//! Slot address calculation.
//!
//! A [`SlotRun`] is the derived view of a record's indexed data slots: where
//! the run starts and how many slots it holds. It is recomputed from the
//! descriptor and, for variable shapes, the instance's length word on every
//! call. Nothing is cached, so a run never outlives the state it was
//! computed from.

use slotframe_core::Shape;

use crate::record::Record;

/// Base address and length of a record's data-slot run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct SlotRun {
    base_addr: usize,
    base_offset: usize,
    len: usize,
    word_size: usize,
}

impl SlotRun {
    /// Compute the run of `record`.
    ///
    /// - Fixed shape: starts after the minimal header, length is the
    ///   type's `data_slot_count()`.
    /// - Variable shape: starts after the extended header, length is the
    ///   instance's stored `declared_length`.
    pub fn of(record: &Record<'_>) -> Self {
        let ty = record.descriptor();
        let base_offset = ty.base_header_size();
        let len = match ty.shape() {
            Shape::Fixed => ty.data_slot_count(),
            Shape::Variable { .. } => record.declared_length().unwrap_or(0),
        };
        Self {
            base_addr: record.addr() + base_offset,
            base_offset,
            len,
            word_size: ty.host().word_size,
        }
    }

    /// Address of slot 0.
    pub fn base_addr(&self) -> usize {
        self.base_addr
    }

    /// Byte offset of slot 0 from the instance pointer.
    pub fn base_offset(&self) -> usize {
        self.base_offset
    }

    /// Number of data slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the run holds no slots.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `i` indexes a slot of this run.
    pub fn contains(&self, i: usize) -> bool {
        i < self.len
    }

    /// Byte offset of slot `i` from the instance pointer. Unchecked.
    pub fn slot_offset(&self, i: usize) -> usize {
        self.base_offset + i * self.word_size
    }

    /// Address of slot `i`. Unchecked.
    pub fn slot_addr(&self, i: usize) -> usize {
        self.base_addr + i * self.word_size
    }

    /// One past the last byte of the run.
    pub fn end_addr(&self) -> usize {
        self.slot_addr(self.len)
    }

    /// Whether `addr` falls inside the run.
    pub fn covers(&self, addr: usize) -> bool {
        addr >= self.base_addr && addr < self.end_addr()
    }
}
