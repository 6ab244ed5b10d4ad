//! Core types for the slotframe record layout engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! type-level half of the engine: the host's header geometry, the
//! [`TypeDescriptor`] protocol (slot counts, header sizes, auxiliary slot
//! offsets), the [`SlotPlan`] layout planner and a [`DescriptorCache`].
//! Nothing here touches instance memory; see `slotframe-layout` for that.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod descriptor;
pub mod error;
pub mod host;
pub mod plan;
pub mod shape;
pub mod value;

pub use cache::DescriptorCache;
pub use descriptor::{Region, RegionKind, Regions, TypeDescriptor, TypeDescriptorBuilder};
pub use error::{AuxSlot, LayoutError};
pub use host::HostLayout;
pub use plan::SlotPlan;
pub use shape::{Shape, ShapeKind, TrailingFields};
pub use value::{SlotOffset, SlotValue};
