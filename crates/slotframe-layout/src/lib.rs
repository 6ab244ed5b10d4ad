//! Instance-level address arithmetic for slotframe records.
//!
//! Given a host-owned instance block and its
//! [`TypeDescriptor`](slotframe_core::TypeDescriptor), this crate finds the
//! data-slot run, the optional auxiliary slots and any trailing fields, and
//! offers indexed get/set over them. It never allocates, frees or
//! reference-counts; the host owns every block. This crate is the only one
//! in the workspace that may contain `unsafe` code.
//!
//! # Architecture
//!
//! ```text
//! Record (instance pointer + &TypeDescriptor)
//! ├── SlotRun::of          data-slot base address + count, recomputed per call
//! ├── auxiliary            mapping / weak-reference slot addresses (verbatim offsets)
//! ├── access               get/set/len facade, bounds-checked
//! └── raw                  the word loads and stores themselves
//! ```
//!
//! # Contract violations
//!
//! Out-of-range indices and queries for auxiliary slots a type does not
//! declare panic. Binding a block that is too small, too long for its
//! type, or laid out with a foreign word size returns
//! [`LayoutError`](slotframe_core::LayoutError).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

mod access;
pub mod auxiliary;
mod raw;
pub mod record;
pub mod run;

pub use record::Record;
pub use run::SlotRun;
