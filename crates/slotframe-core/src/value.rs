//! Slot contents and optional slot offsets.

use std::fmt;

/// One word stored in a slot: an opaque reference owned by the host.
///
/// The engine copies these in and out of memory and never interprets them.
/// A zero word is the conventional "empty" value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SlotValue(usize);

impl SlotValue {
    /// The empty slot.
    pub const NULL: Self = Self(0);

    /// Wrap a raw address.
    pub const fn from_addr(addr: usize) -> Self {
        Self(addr)
    }

    /// Wrap a pointer, keeping only its address.
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize)
    }

    /// The stored address.
    pub const fn addr(self) -> usize {
        self.0
    }

    /// The stored address as a pointer.
    pub fn as_ptr<T>(self) -> *mut T {
        self.0 as *mut T
    }

    /// Whether the slot holds the empty value.
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for SlotValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<usize> for SlotValue {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// Byte offset of an optional auxiliary slot within an instance.
///
/// Absence is its own variant, so a slot at offset zero would still be
/// distinguishable from no slot at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SlotOffset {
    /// The type does not reserve this slot.
    #[default]
    Absent,
    /// The slot lives this many bytes past the instance pointer.
    At(usize),
}

impl SlotOffset {
    /// Whether the slot is reserved.
    pub const fn is_present(self) -> bool {
        matches!(self, Self::At(_))
    }

    /// The byte offset, if reserved.
    pub const fn get(self) -> Option<usize> {
        match self {
            Self::At(offset) => Some(offset),
            Self::Absent => None,
        }
    }
}

impl From<Option<usize>> for SlotOffset {
    fn from(v: Option<usize>) -> Self {
        match v {
            Some(offset) => Self::At(offset),
            None => Self::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_default() {
        assert_eq!(SlotValue::default(), SlotValue::NULL);
        assert!(SlotValue::NULL.is_null());
        assert!(!SlotValue::from_addr(0x10).is_null());
    }

    #[test]
    fn pointer_round_trip_keeps_address() {
        let x = 7u64;
        let v = SlotValue::from_ptr(&x as *const u64);
        assert_eq!(v.as_ptr::<u64>() as *const u64, &x as *const u64);
    }

    #[test]
    fn zero_offset_is_present() {
        let off = SlotOffset::At(0);
        assert!(off.is_present());
        assert_eq!(off.get(), Some(0));
        assert!(!SlotOffset::Absent.is_present());
        assert_eq!(SlotOffset::from(None), SlotOffset::Absent);
    }
}
