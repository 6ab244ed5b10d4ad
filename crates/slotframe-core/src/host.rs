//! Host header constants.
//!
//! The engine never inspects a header; it only needs to know how large the
//! two header families are and where the per-instance length word sits.
//! The host fills these in once, before any type is described.

use crate::error::LayoutError;

/// Header geometry supplied by the host object system.
///
/// Immutable after construction and copied into every
/// [`TypeDescriptor`](crate::TypeDescriptor) built against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HostLayout {
    /// Size in bytes of the minimal object header (identity + type tag).
    ///
    /// Fixed-shape slot runs start here.
    pub header_size: usize,

    /// Size in bytes of the extended header used by variable-shape
    /// objects. Includes the per-instance length word.
    pub var_header_size: usize,

    /// Byte offset of the per-instance length word within the extended
    /// header.
    pub length_offset: usize,

    /// Size in bytes of one slot. Every offset is a multiple of it.
    pub word_size: usize,
}

impl HostLayout {
    /// Native pointer width of the running platform.
    pub const NATIVE_WORD: usize = std::mem::size_of::<usize>();

    /// Default minimal header: reference count + type pointer.
    pub const DEFAULT_HEADER_WORDS: usize = 2;

    /// Default extended header: minimal header + length word.
    pub const DEFAULT_VAR_HEADER_WORDS: usize = 3;

    /// Build a host layout from explicit byte sizes.
    ///
    /// The length word is assumed to be the last word of the extended
    /// header. Call [`validate`](Self::validate) before use, or let the
    /// descriptor builder do it.
    pub fn new(header_size: usize, var_header_size: usize, word_size: usize) -> Self {
        Self {
            header_size,
            var_header_size,
            length_offset: var_header_size.saturating_sub(word_size),
            word_size,
        }
    }

    /// The layout of a two-word header object system on this platform.
    pub fn native() -> Self {
        Self::new(
            Self::DEFAULT_HEADER_WORDS * Self::NATIVE_WORD,
            Self::DEFAULT_VAR_HEADER_WORDS * Self::NATIVE_WORD,
            Self::NATIVE_WORD,
        )
    }

    /// Whether slots laid out with this geometry can be read as native
    /// pointer-sized words.
    pub fn is_native_word(&self) -> bool {
        self.word_size == Self::NATIVE_WORD
    }

    /// Check the header constants for internal consistency.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let invalid = |reason: String| Err(LayoutError::InvalidHost { reason });
        let word = self.word_size;
        if word == 0 || !word.is_power_of_two() {
            return invalid(format!("word size {word} is not a nonzero power of two"));
        }
        if self.header_size == 0 || self.header_size % word != 0 {
            return invalid(format!(
                "header size {} is not a positive multiple of the word size {word}",
                self.header_size
            ));
        }
        if self.var_header_size % word != 0 {
            return invalid(format!(
                "extended header size {} is not a multiple of the word size {word}",
                self.var_header_size
            ));
        }
        let min_var_header = self.header_size.checked_add(word);
        if min_var_header.is_none_or(|min| self.var_header_size < min) {
            return invalid(format!(
                "extended header size {} leaves no room for a length word past the {}-byte header",
                self.var_header_size, self.header_size
            ));
        }
        let length_end = self.length_offset.checked_add(word);
        if self.length_offset % word != 0
            || self.length_offset < self.header_size
            || length_end.is_none_or(|end| end > self.var_header_size)
        {
            return invalid(format!(
                "length word at offset {} is not an aligned word inside the extended header",
                self.length_offset
            ));
        }
        Ok(())
    }
}

impl Default for HostLayout {
    fn default() -> Self {
        Self::native()
    }
}
