//! Word loads and stores inside a bound record.
//!
//! The only module that dereferences instance memory. Every function takes
//! a [`Record`], whose constructors establish that the block is word
//! aligned and covers `instance_size()` bytes. Callers pass offsets they
//! have already bounds-checked against the descriptor; the instance bound
//! is asserted again here in every build profile.

#![allow(unsafe_code)]

use crate::record::Record;

fn checked_offset(record: &Record<'_>, offset: usize) -> usize {
    let ty = record.descriptor();
    let word = ty.host().word_size;
    debug_assert_eq!(offset % word, 0, "offset {offset} is not word aligned");
    let size = ty.instance_size();
    assert!(
        offset.checked_add(word).is_some_and(|end| end <= size),
        "offset {offset} lies outside the {size}-byte instance of '{}'",
        ty.name()
    );
    offset
}

/// Read the word at `offset` bytes past the instance pointer.
pub(crate) fn load(record: &Record<'_>, offset: usize) -> usize {
    let offset = checked_offset(record, offset);
    // SAFETY: the record's block is valid for reads of `instance_size()`
    // bytes and word aligned; `offset` is an aligned word inside it.
    unsafe { record.base().as_ptr().add(offset).cast::<usize>().read() }
}

/// Overwrite the word at `offset` bytes past the instance pointer.
pub(crate) fn store(record: &mut Record<'_>, offset: usize, value: usize) {
    let offset = checked_offset(record, offset);
    // SAFETY: as in `load`, and `&mut Record` is the unique accessor of the
    // block for the duration of the write.
    unsafe {
        record
            .base()
            .as_ptr()
            .add(offset)
            .cast::<usize>()
            .write(value)
    }
}
