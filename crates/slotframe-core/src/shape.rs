//! The two layout families.

use std::fmt;

/// Which header layout and slot-count formula a type uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    /// Slot count is a property of the type ("dataobject").
    Fixed,
    /// Slot count is stored per instance ("datatuple").
    Variable,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Variable => write!(f, "variable"),
        }
    }
}

/// Fixed named fields appended to a variable-shape type.
///
/// The group is located by its own byte offset, at or past the type's
/// `total_allocation_size`, and holds `count` word slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TrailingFields {
    /// Byte offset of the first trailing slot from the instance pointer.
    pub offset: usize,
    /// Number of trailing slots.
    pub count: usize,
}

impl TrailingFields {
    /// One past the last byte of the group, or `None` if that lies beyond
    /// the address space.
    pub fn end(&self, word_size: usize) -> Option<usize> {
        self.count
            .checked_mul(word_size)
            .and_then(|len| self.offset.checked_add(len))
    }
}

/// Layout family plus the family-specific fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Header, then `data_slot_count` slots, then any auxiliary slots.
    Fixed,
    /// Extended header holding the length word, then the per-instance run.
    Variable {
        /// Optional fixed fields outside the variable run.
        trailing: Option<TrailingFields>,
    },
}

impl Shape {
    /// The family tag.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Fixed => ShapeKind::Fixed,
            Self::Variable { .. } => ShapeKind::Variable,
        }
    }

    /// Whether slot count is stored per instance.
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable { .. })
    }

    /// The trailing field group, if any.
    pub fn trailing(&self) -> Option<TrailingFields> {
        match self {
            Self::Variable { trailing } => *trailing,
            Self::Fixed => None,
        }
    }
}
