//! Test fixtures and a mock host allocation for slotframe development.
//!
//! [`TestBlock`] plays the host object system: it owns a zeroed,
//! word-aligned buffer sized for one instance and hands out [`Record`]s
//! bound to it. The [`fixtures`] module holds canned descriptors.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::sync::Arc;

use slotframe_core::{HostLayout, TypeDescriptor};
use slotframe_layout::Record;

/// A zeroed instance block owned by the test, standing in for a host
/// allocation.
pub struct TestBlock {
    ty: Arc<TypeDescriptor>,
    words: Vec<usize>,
}

impl TestBlock {
    /// Allocate a block for a fixed-shape instance of `ty`.
    pub fn new(ty: Arc<TypeDescriptor>) -> Self {
        let words = vec![0; ty.instance_words()];
        Self { ty, words }
    }

    /// Allocate a block for a variable-shape instance holding `length`
    /// elements.
    ///
    /// # Panics
    ///
    /// Panics if `ty` is fixed-shape or `length` exceeds its capacity.
    pub fn with_length(ty: Arc<TypeDescriptor>, length: usize) -> Self {
        let mut block = Self::new(ty);
        let ty = Arc::clone(&block.ty);
        Record::with_length(&mut block.words, &ty, length)
            .unwrap_or_else(|e| panic!("cannot initialise test block: {e}"));
        block
    }

    /// Bind a record to this block.
    pub fn record(&mut self) -> Record<'_> {
        Record::from_words(&mut self.words, &self.ty)
            .unwrap_or_else(|e| panic!("cannot bind test block: {e}"))
    }

    /// The block's type.
    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.ty
    }

    /// Raw words, header included, for asserting on memory directly.
    pub fn words(&self) -> &[usize] {
        &self.words
    }

    /// Overwrite the length word, bypassing capacity checks, to simulate a
    /// host changing an instance's length between accesses.
    pub fn set_length_word(&mut self, length: usize) {
        let index = self.ty.host().length_offset / HostLayout::NATIVE_WORD;
        self.words[index] = length;
    }

    /// Address of the instance.
    pub fn addr(&self) -> usize {
        self.words.as_ptr() as usize
    }
}
