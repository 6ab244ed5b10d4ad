//! Layout validation errors.
//!
//! These are the recoverable failures: a host populating a descriptor or
//! handing the engine a block it cannot use. Contract violations at access
//! time (bad index, absent auxiliary slot) are not represented here; they
//! panic.

use std::error::Error;
use std::fmt;

/// Which auxiliary slot an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuxSlot {
    /// The mapping-attachment slot.
    Mapping,
    /// The weak-reference anchor slot.
    Weak,
}

impl fmt::Display for AuxSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapping => write!(f, "mapping slot"),
            Self::Weak => write!(f, "weak-reference slot"),
        }
    }
}

/// Errors raised while validating host layouts, type descriptors and
/// instance blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The host header constants are inconsistent.
    InvalidHost {
        /// Why the host layout was rejected.
        reason: String,
    },
    /// `total_allocation_size` cannot hold the header and the reserved
    /// auxiliary slots.
    AllocationTooSmall {
        /// Type name.
        name: String,
        /// Bytes needed at minimum.
        required: usize,
        /// Bytes declared.
        declared: usize,
    },
    /// The layout's byte size cannot be represented in a `usize`.
    SizeOverflow {
        /// Type name.
        name: String,
    },
    /// The bytes past the header are not a whole number of words.
    MisalignedSize {
        /// Type name.
        name: String,
        /// Declared `total_allocation_size`.
        size: usize,
        /// Host word size.
        word_size: usize,
    },
    /// An auxiliary or trailing offset is not word aligned.
    MisalignedOffset {
        /// Type name.
        name: String,
        /// The offending byte offset.
        offset: usize,
    },
    /// An auxiliary slot lies in the header or outside the allocation.
    AuxiliaryOutOfBounds {
        /// Type name.
        name: String,
        /// Which slot.
        slot: AuxSlot,
        /// Its declared byte offset.
        offset: usize,
    },
    /// An auxiliary slot overlaps another region of the layout.
    AuxiliaryCollision {
        /// Type name.
        name: String,
        /// Which slot.
        slot: AuxSlot,
        /// Its declared byte offset.
        offset: usize,
    },
    /// The trailing field group starts inside `total_allocation_size`, or
    /// was declared on a fixed-shape type.
    TrailingOverlap {
        /// Type name.
        name: String,
        /// Declared trailing offset.
        offset: usize,
        /// Declared `total_allocation_size`.
        allocation: usize,
    },
    /// The base type does not form a prefix of the derived type.
    BaseMismatch {
        /// Derived type name.
        name: String,
        /// Base type name.
        base: String,
        /// What disagrees.
        reason: String,
    },
    /// A variable-shape instance declares more elements than its type can hold.
    LengthExceedsCapacity {
        /// Type name.
        name: String,
        /// Stored `declared_length`.
        length: usize,
        /// Type-level data slot capacity.
        capacity: usize,
    },
    /// The block handed to the engine is shorter than the instance needs.
    BlockTooSmall {
        /// Type name.
        name: String,
        /// Bytes the instance occupies.
        required: usize,
        /// Bytes the block provides.
        available: usize,
    },
    /// The descriptor's word size is not the native pointer width, so its
    /// slots cannot be accessed in memory.
    ForeignWordSize {
        /// Type name.
        name: String,
        /// Host word size.
        word_size: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHost { reason } => write!(f, "invalid host layout: {reason}"),
            Self::AllocationTooSmall {
                name,
                required,
                declared,
            } => write!(
                f,
                "type '{name}': allocation of {declared} bytes is below the {required} bytes required"
            ),
            Self::SizeOverflow { name } => {
                write!(f, "type '{name}': layout size overflows the address space")
            }
            Self::MisalignedSize {
                name,
                size,
                word_size,
            } => write!(
                f,
                "type '{name}': allocation size {size} leaves a partial word past the header (word size {word_size})"
            ),
            Self::MisalignedOffset { name, offset } => {
                write!(f, "type '{name}': offset {offset} is not word aligned")
            }
            Self::AuxiliaryOutOfBounds { name, slot, offset } => write!(
                f,
                "type '{name}': {slot} at offset {offset} lies outside the slot area"
            ),
            Self::AuxiliaryCollision { name, slot, offset } => write!(
                f,
                "type '{name}': {slot} at offset {offset} overlaps another region"
            ),
            Self::TrailingOverlap {
                name,
                offset,
                allocation,
            } => write!(
                f,
                "type '{name}': trailing fields at offset {offset} must start at or past {allocation} on a variable-shape type"
            ),
            Self::BaseMismatch { name, base, reason } => {
                write!(f, "type '{name}' cannot extend '{base}': {reason}")
            }
            Self::LengthExceedsCapacity {
                name,
                length,
                capacity,
            } => write!(
                f,
                "type '{name}': declared length {length} exceeds capacity {capacity}"
            ),
            Self::BlockTooSmall {
                name,
                required,
                available,
            } => write!(
                f,
                "type '{name}': block of {available} bytes is smaller than the {required} bytes required"
            ),
            Self::ForeignWordSize { name, word_size } => write!(
                f,
                "type '{name}': word size {word_size} does not match the native pointer width"
            ),
        }
    }
}

impl Error for LayoutError {}
