//! Binding an instance block to its descriptor.
//!
//! A [`Record`] is the pair every engine operation takes: the address of a
//! host-owned instance and the [`TypeDescriptor`] describing it. Callers
//! carry both together; the engine never looks a type up from the block.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use slotframe_core::{HostLayout, LayoutError, TypeDescriptor};

use crate::raw;

/// A host-owned instance block paired with its type.
///
/// The record borrows the block for `'a`; it never allocates, frees or
/// takes ownership of it.
pub struct Record<'a> {
    ptr: NonNull<u8>,
    ty: &'a TypeDescriptor,
    _block: PhantomData<&'a mut [usize]>,
}

impl<'a> Record<'a> {
    /// Bind a raw instance pointer.
    ///
    /// # Safety
    ///
    /// - `ptr` must be aligned to the native word and valid for reads and
    ///   writes of `ty.instance_size()` bytes for `'a`.
    /// - The block must have been laid out for `ty`. For variable shapes
    ///   its length word must be initialised and at most
    ///   `ty.data_slot_count()`.
    /// - `ty.host()` must use the native word size.
    /// - Nothing else may access the block while the record is alive,
    ///   unless the host synchronises that access itself.
    #[allow(unsafe_code)]
    pub unsafe fn from_raw(ptr: NonNull<u8>, ty: &'a TypeDescriptor) -> Self {
        debug_assert!(
            ty.host().is_native_word(),
            "type '{}' does not use the native word size",
            ty.name()
        );
        debug_assert_eq!(
            ptr.as_ptr() as usize % HostLayout::NATIVE_WORD,
            0,
            "instance pointer is not word aligned"
        );
        Self {
            ptr,
            ty,
            _block: PhantomData,
        }
    }

    /// Bind a host-owned word buffer holding one instance.
    ///
    /// For variable shapes the length word must already be written; use
    /// [`with_length`](Self::with_length) to initialise it.
    pub fn from_words(words: &'a mut [usize], ty: &'a TypeDescriptor) -> Result<Self, LayoutError> {
        check_block(words, ty)?;
        if ty.is_variable_shape() {
            let length = words[ty.host().length_offset / HostLayout::NATIVE_WORD];
            check_length(ty, length)?;
        }
        log::trace!("bound {}-word block to '{}'", words.len(), ty.name());
        Ok(Self {
            ptr: NonNull::from(words).cast::<u8>(),
            ty,
            _block: PhantomData,
        })
    }

    /// Write a variable-shape instance's length word, then bind the buffer.
    ///
    /// # Panics
    ///
    /// Panics if `ty` is fixed-shape: such instances have no length word.
    pub fn with_length(
        words: &'a mut [usize],
        ty: &'a TypeDescriptor,
        length: usize,
    ) -> Result<Self, LayoutError> {
        assert!(
            ty.is_variable_shape(),
            "type '{}' is fixed-shape and has no length word",
            ty.name()
        );
        check_block(words, ty)?;
        check_length(ty, length)?;
        words[ty.host().length_offset / HostLayout::NATIVE_WORD] = length;
        Self::from_words(words, ty)
    }

    /// The descriptor this record was bound with.
    pub fn descriptor(&self) -> &'a TypeDescriptor {
        self.ty
    }

    /// Address of the instance, for offset arithmetic and diagnostics.
    pub fn addr(&self) -> usize {
        self.ptr.as_ptr() as usize
    }

    /// The per-instance element count of a variable-shape record, read
    /// fresh from the header. `None` for fixed shapes.
    pub fn declared_length(&self) -> Option<usize> {
        if self.ty.is_variable_shape() {
            Some(raw::load(self, self.ty.host().length_offset))
        } else {
            None
        }
    }

    pub(crate) fn base(&self) -> NonNull<u8> {
        self.ptr
    }
}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("type", &self.ty.name())
            .field("addr", &format_args!("{:#x}", self.addr()))
            .field("declared_length", &self.declared_length())
            .finish()
    }
}

fn check_block(words: &[usize], ty: &TypeDescriptor) -> Result<(), LayoutError> {
    let word_size = ty.host().word_size;
    if word_size != HostLayout::NATIVE_WORD {
        return Err(LayoutError::ForeignWordSize {
            name: ty.name().to_owned(),
            word_size,
        });
    }
    let available = std::mem::size_of_val(words);
    let required = ty.instance_size();
    if available < required {
        return Err(LayoutError::BlockTooSmall {
            name: ty.name().to_owned(),
            required,
            available,
        });
    }
    Ok(())
}

fn check_length(ty: &TypeDescriptor, length: usize) -> Result<(), LayoutError> {
    let capacity = ty.data_slot_count();
    if length > capacity {
        return Err(LayoutError::LengthExceedsCapacity {
            name: ty.name().to_owned(),
            length,
            capacity,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotframe_core::SlotPlan;

    fn native() -> HostLayout {
        HostLayout::native()
    }

    #[test]
    fn from_words_binds_fixed_record() {
        let ty = SlotPlan::fixed(3).describe("Triple", native()).unwrap();
        let mut words = vec![0usize; ty.instance_words()];
        let addr = words.as_ptr() as usize;
        let rec = Record::from_words(&mut words, &ty).unwrap();
        assert_eq!(rec.addr(), addr);
        assert_eq!(rec.declared_length(), None);
        assert_eq!(rec.descriptor().name(), "Triple");
    }

    #[test]
    fn short_block_is_rejected() {
        let ty = SlotPlan::fixed(3).describe("Triple", native()).unwrap();
        let mut words = vec![0usize; ty.instance_words() - 1];
        let err = Record::from_words(&mut words, &ty).unwrap_err();
        assert!(matches!(err, LayoutError::BlockTooSmall { .. }));
    }

    #[test]
    fn foreign_word_size_is_rejected() {
        let host = HostLayout::new(8, 12, 4);
        let ty = SlotPlan::fixed(2).describe("Narrow", host).unwrap();
        let mut words = vec![0usize; 8];
        let result = Record::from_words(&mut words, &ty);
        if HostLayout::NATIVE_WORD != 4 {
            assert!(matches!(
                result,
                Err(LayoutError::ForeignWordSize { word_size: 4, .. })
            ));
        }
    }

    #[test]
    fn with_length_writes_the_length_word() {
        let ty = SlotPlan::variable(8).describe("Row", native()).unwrap();
        let mut words = vec![0usize; ty.instance_words()];
        let rec = Record::with_length(&mut words, &ty, 5).unwrap();
        assert_eq!(rec.declared_length(), Some(5));
        drop(rec);
        assert_eq!(words[native().length_offset / HostLayout::NATIVE_WORD], 5);
    }

    #[test]
    fn stored_length_over_capacity_is_rejected() {
        let ty = SlotPlan::variable(2).describe("Row", native()).unwrap();
        let mut words = vec![0usize; ty.instance_words()];
        words[native().length_offset / HostLayout::NATIVE_WORD] = 3;
        let err = Record::from_words(&mut words, &ty).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::LengthExceedsCapacity {
                length: 3,
                capacity: 2,
                ..
            }
        ));
    }

    #[test]
    fn with_length_over_capacity_leaves_block_untouched() {
        let ty = SlotPlan::variable(2).describe("Row", native()).unwrap();
        let mut words = vec![0usize; ty.instance_words()];
        assert!(Record::with_length(&mut words, &ty, 9).is_err());
        assert!(words.iter().all(|&w| w == 0));
    }

    #[test]
    #[should_panic(expected = "has no length word")]
    fn with_length_on_fixed_shape_panics() {
        let ty = SlotPlan::fixed(2).describe("Pair", native()).unwrap();
        let mut words = vec![0usize; ty.instance_words()];
        let _ = Record::with_length(&mut words, &ty, 1);
    }

    #[test]
    #[allow(unsafe_code)]
    fn from_raw_matches_from_words() {
        let ty = SlotPlan::variable(4).describe("Row", native()).unwrap();
        let mut words = vec![0usize; ty.instance_words()];
        words[native().length_offset / HostLayout::NATIVE_WORD] = 2;
        let ptr = NonNull::new(words.as_mut_ptr().cast::<u8>()).unwrap();
        // SAFETY: `words` is an aligned, live buffer of `instance_words()`
        // words laid out for `ty`, with an in-range length word.
        let rec = unsafe { Record::from_raw(ptr, &ty) };
        assert_eq!(rec.declared_length(), Some(2));
    }
}
