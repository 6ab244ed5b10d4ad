//! Slotframe: a slot layout engine for host-allocated records.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the slotframe sub-crates. A host describes each record type once with a
//! [`TypeDescriptor`](types::TypeDescriptor), allocates instance blocks
//! itself, and uses [`Record`](layout::Record) to read and write the
//! indexed data slots and the optional mapping and weak-reference slots.
//!
//! # Quick start
//!
//! ```rust
//! use slotframe::prelude::*;
//!
//! // A variable-shape type holding up to 8 elements plus a mapping slot.
//! let ty = SlotPlan::variable(8)
//!     .with_dict()
//!     .describe("Row", HostLayout::native())
//!     .unwrap();
//!
//! // The host owns the block; here it is a plain word buffer.
//! let mut words = vec![0usize; ty.instance_words()];
//! let mut row = Record::with_length(&mut words, &ty, 3).unwrap();
//!
//! row.set_slot(2, SlotValue::from_addr(0x1000));
//! row.set_dict_slot(SlotValue::from_addr(0x2000));
//! assert_eq!(row.len(), 3);
//! assert_eq!(row.get_slot(2), SlotValue::from_addr(0x1000));
//! assert!(row.get_slot(0).is_null());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `slotframe-core` | Host geometry, descriptors, plans, the descriptor cache, errors |
//! | [`layout`] | `slotframe-layout` | Record binding, slot runs, accessors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Type-definition-time layout (`slotframe-core`).
///
/// Contains [`types::HostLayout`], [`types::TypeDescriptor`] and its
/// builder, [`types::SlotPlan`], [`types::DescriptorCache`] and
/// [`types::LayoutError`].
pub use slotframe_core as types;

/// Instance-level slot access (`slotframe-layout`).
///
/// [`layout::Record`] binds a block to its descriptor;
/// [`layout::SlotRun`] exposes the computed data-slot run.
pub use slotframe_layout as layout;

/// Common imports for typical slotframe usage.
///
/// ```rust
/// use slotframe::prelude::*;
/// ```
pub mod prelude {
    // Type definition
    pub use slotframe_core::{
        DescriptorCache, HostLayout, Shape, ShapeKind, SlotPlan, TypeDescriptor,
        TypeDescriptorBuilder,
    };

    // Values
    pub use slotframe_core::{SlotOffset, SlotValue};

    // Errors
    pub use slotframe_core::LayoutError;

    // Instances
    pub use slotframe_layout::{Record, SlotRun};
}
