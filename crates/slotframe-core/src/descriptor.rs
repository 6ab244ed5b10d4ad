//! Type descriptors: the shape metadata shared by every instance of a type.
//!
//! A [`TypeDescriptor`] answers the type-level questions the layout engine
//! needs: which header family applies, how many data slots follow it, and
//! where the optional mapping and weak-reference slots sit. Descriptors are
//! validated once by [`TypeDescriptorBuilder::build`] and immutable
//! afterwards; hosts share them between instances via `Arc`.
//!
//! ```text
//! fixed     [ header | slot 0 .. slot n-1 | dict? | weak? ]
//! variable  [ ext. header (len) | slot 0 .. capacity-1 | dict? | weak? ] [ trailing.. ]
//!           ^ instance pointer                         total_allocation_size ^
//! ```

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::error::{AuxSlot, LayoutError};
use crate::host::HostLayout;
use crate::shape::{Shape, ShapeKind, TrailingFields};
use crate::value::SlotOffset;

/// What occupies a [`Region`] of an instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// The minimal or extended object header.
    Header,
    /// The indexed data slots (for variable shapes, the full capacity).
    DataRun,
    /// The mapping-attachment slot.
    MappingSlot,
    /// The weak-reference anchor slot.
    WeakSlot,
    /// The trailing fixed fields of a variable-shape type.
    Trailing,
}

/// A half-open byte range `[start, end)` within an instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    /// What lives here.
    pub kind: RegionKind,
    /// First byte.
    pub start: usize,
    /// One past the last byte.
    pub end: usize,
}

impl Region {
    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the region covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether two regions share at least one byte.
    pub fn overlaps(&self, other: &Region) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Region list of one type; five entries cover every layout.
pub type Regions = SmallVec<[Region; 5]>;

/// Immutable shape metadata for one record type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: String,
    host: HostLayout,
    shape: Shape,
    total_allocation_size: usize,
    dict_offset: SlotOffset,
    weak_offset: SlotOffset,
    base: Option<Arc<TypeDescriptor>>,
}

impl TypeDescriptor {
    /// Start describing a type against the given host geometry.
    pub fn builder(name: impl Into<String>, host: HostLayout) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            name: name.into(),
            host,
            kind: ShapeKind::Fixed,
            total_allocation_size: 0,
            dict_offset: SlotOffset::Absent,
            weak_offset: SlotOffset::Absent,
            trailing: None,
            base: None,
        }
    }

    /// Type name, for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The host geometry this type was laid out against.
    pub fn host(&self) -> HostLayout {
        self.host
    }

    /// Layout family and its family-specific fields.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Layout family tag.
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Whether the slot count is stored per instance.
    pub fn is_variable_shape(&self) -> bool {
        self.shape.is_variable()
    }

    /// Bytes reserved for the header plus all slots, excluding any
    /// trailing field group.
    pub fn total_allocation_size(&self) -> usize {
        self.total_allocation_size
    }

    /// Declared offset of the mapping-attachment slot.
    pub fn dict_offset(&self) -> SlotOffset {
        self.dict_offset
    }

    /// Declared offset of the weak-reference slot.
    pub fn weak_offset(&self) -> SlotOffset {
        self.weak_offset
    }

    /// The type this one shares a layout prefix with.
    pub fn base(&self) -> Option<&Arc<TypeDescriptor>> {
        self.base.as_ref()
    }

    /// The trailing field group of a variable-shape type.
    pub fn trailing(&self) -> Option<TrailingFields> {
        self.shape.trailing()
    }

    /// Whether instances carry a mapping-attachment slot.
    pub fn has_dict_slot(&self) -> bool {
        self.dict_offset.is_present()
    }

    /// Whether instances carry a weak-reference slot.
    pub fn has_weak_slot(&self) -> bool {
        self.weak_offset.is_present()
    }

    /// Size of the header that precedes the data slots.
    ///
    /// Fixed shapes use the minimal header; variable shapes use the
    /// extended header that also holds the length word.
    pub fn base_header_size(&self) -> usize {
        match self.shape {
            Shape::Fixed => self.host.header_size,
            Shape::Variable { .. } => self.host.var_header_size,
        }
    }

    /// Number of indexed data slots the type reserves.
    ///
    /// For fixed shapes this is every instance's length. For variable
    /// shapes it is the capacity that bounds each instance's stored length.
    ///
    /// # Panics
    ///
    /// Panics if the allocation cannot hold the header and the reserved
    /// auxiliary slots. Built descriptors never do.
    pub fn data_slot_count(&self) -> usize {
        let header = self.base_header_size();
        assert!(
            self.total_allocation_size >= header,
            "type '{}': allocation of {} bytes is smaller than its {header}-byte header",
            self.name,
            self.total_allocation_size
        );
        let words = (self.total_allocation_size - header) / self.host.word_size;
        let reserved = self.reserved_aux_slots();
        assert!(
            words >= reserved,
            "type '{}': {words} words past the header cannot hold {reserved} auxiliary slots",
            self.name
        );
        words - reserved
    }

    /// Byte offset of data slot `i` from the instance pointer.
    ///
    /// Pure arithmetic: the caller is responsible for bounds.
    pub fn data_slot_offset(&self, i: usize) -> usize {
        self.base_header_size() + i * self.host.word_size
    }

    /// Byte offset of the mapping-attachment slot.
    ///
    /// # Panics
    ///
    /// Panics if the type declares no mapping slot.
    pub fn dict_slot_offset(&self) -> usize {
        match self.dict_offset {
            SlotOffset::At(offset) => offset,
            SlotOffset::Absent => panic!("type '{}' has no mapping slot", self.name),
        }
    }

    /// Byte offset of the weak-reference slot.
    ///
    /// # Panics
    ///
    /// Panics if the type declares no weak-reference slot.
    pub fn weak_slot_offset(&self) -> usize {
        match self.weak_offset {
            SlotOffset::At(offset) => offset,
            SlotOffset::Absent => panic!("type '{}' has no weak-reference slot", self.name),
        }
    }

    /// Bytes an instance occupies, trailing fields included.
    ///
    /// A variable-shape run lives inside the capacity reserved by
    /// `total_allocation_size`, so the stored length never widens a block.
    pub fn instance_size(&self) -> usize {
        match self.trailing() {
            Some(t) => self.total_allocation_size.max(self.trailing_end(t)),
            None => self.total_allocation_size,
        }
    }

    /// [`instance_size`](Self::instance_size) rounded up to whole words.
    pub fn instance_words(&self) -> usize {
        self.instance_size().div_ceil(self.host.word_size)
    }

    /// Occupied byte ranges, ordered by start offset.
    pub fn regions(&self) -> Regions {
        let word = self.host.word_size;
        let header = self.base_header_size();
        let mut regions = Regions::new();
        regions.push(Region {
            kind: RegionKind::Header,
            start: 0,
            end: header,
        });
        regions.push(Region {
            kind: RegionKind::DataRun,
            start: header,
            end: header + self.data_slot_count() * word,
        });
        if let SlotOffset::At(start) = self.dict_offset {
            regions.push(Region {
                kind: RegionKind::MappingSlot,
                start,
                end: start + word,
            });
        }
        if let SlotOffset::At(start) = self.weak_offset {
            regions.push(Region {
                kind: RegionKind::WeakSlot,
                start,
                end: start + word,
            });
        }
        if let Some(t) = self.trailing() {
            regions.push(Region {
                kind: RegionKind::Trailing,
                start: t.offset,
                end: self.trailing_end(t),
            });
        }
        regions.sort_by_key(|r| (r.start, r.end));
        regions
    }

    // Built descriptors have a representable trailing end.
    fn trailing_end(&self, t: TrailingFields) -> usize {
        t.end(self.host.word_size).unwrap_or(usize::MAX)
    }

    fn reserved_aux_slots(&self) -> usize {
        usize::from(self.has_dict_slot()) + usize::from(self.has_weak_slot())
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, size={}, slots={}",
            self.name,
            self.kind(),
            self.total_allocation_size,
            self.data_slot_count()
        )?;
        if self.has_dict_slot() {
            write!(f, ", dict")?;
        }
        if self.has_weak_slot() {
            write!(f, ", weakref")?;
        }
        write!(f, ")")
    }
}

/// Collects the host-populated fields of a [`TypeDescriptor`] and
/// validates them on [`build`](Self::build).
///
/// Offsets are taken verbatim; nothing is derived. Use
/// [`SlotPlan`](crate::SlotPlan) to compute them from a slot count.
#[derive(Clone, Debug)]
#[must_use]
pub struct TypeDescriptorBuilder {
    name: String,
    host: HostLayout,
    kind: ShapeKind,
    total_allocation_size: usize,
    dict_offset: SlotOffset,
    weak_offset: SlotOffset,
    trailing: Option<TrailingFields>,
    base: Option<Arc<TypeDescriptor>>,
}

impl TypeDescriptorBuilder {
    /// Use the minimal header and a type-level slot count (the default).
    pub fn fixed(mut self) -> Self {
        self.kind = ShapeKind::Fixed;
        self
    }

    /// Use the extended header and a per-instance slot count.
    pub fn variable(mut self) -> Self {
        self.kind = ShapeKind::Variable;
        self
    }

    /// Select the family explicitly.
    pub fn kind(mut self, kind: ShapeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Bytes reserved for header, data slots and auxiliary slots.
    pub fn total_allocation_size(mut self, size: usize) -> Self {
        self.total_allocation_size = size;
        self
    }

    /// Reserve the mapping-attachment slot at `offset`.
    pub fn dict_offset(mut self, offset: usize) -> Self {
        self.dict_offset = SlotOffset::At(offset);
        self
    }

    /// Reserve the weak-reference slot at `offset`.
    pub fn weak_offset(mut self, offset: usize) -> Self {
        self.weak_offset = SlotOffset::At(offset);
        self
    }

    /// Append `count` fixed fields at `offset` (variable shapes only).
    pub fn trailing_fields(mut self, offset: usize, count: usize) -> Self {
        self.trailing = Some(TrailingFields { offset, count });
        self
    }

    /// Record the type this one extends.
    pub fn base(mut self, base: Arc<TypeDescriptor>) -> Self {
        self.base = Some(base);
        self
    }

    /// Validate and freeze the descriptor.
    pub fn build(self) -> Result<TypeDescriptor, LayoutError> {
        self.host.validate()?;
        let word = self.host.word_size;
        let size = self.total_allocation_size;
        let header = match self.kind {
            ShapeKind::Fixed => self.host.header_size,
            ShapeKind::Variable => self.host.var_header_size,
        };
        let reserved =
            usize::from(self.dict_offset.is_present()) + usize::from(self.weak_offset.is_present());

        let Some(required) = reserved
            .checked_mul(word)
            .and_then(|aux| header.checked_add(aux))
        else {
            return Err(LayoutError::SizeOverflow { name: self.name });
        };
        if size < required {
            return Err(LayoutError::AllocationTooSmall {
                name: self.name,
                required,
                declared: size,
            });
        }
        if (size - header) % word != 0 {
            return Err(LayoutError::MisalignedSize {
                name: self.name,
                size,
                word_size: word,
            });
        }

        for (slot, offset) in [
            (AuxSlot::Mapping, self.dict_offset),
            (AuxSlot::Weak, self.weak_offset),
        ] {
            let SlotOffset::At(offset) = offset else {
                continue;
            };
            if offset % word != 0 {
                return Err(LayoutError::MisalignedOffset {
                    name: self.name,
                    offset,
                });
            }
            let end = offset.checked_add(word);
            if offset < header || end.is_none_or(|end| end > size) {
                return Err(LayoutError::AuxiliaryOutOfBounds {
                    name: self.name,
                    slot,
                    offset,
                });
            }
        }

        let shape = match (self.kind, self.trailing) {
            (ShapeKind::Fixed, None) => Shape::Fixed,
            (ShapeKind::Fixed, Some(t)) => {
                return Err(LayoutError::TrailingOverlap {
                    name: self.name,
                    offset: t.offset,
                    allocation: size,
                });
            }
            (ShapeKind::Variable, Some(t)) if t.offset % word != 0 => {
                return Err(LayoutError::MisalignedOffset {
                    name: self.name,
                    offset: t.offset,
                });
            }
            (ShapeKind::Variable, Some(t)) if t.offset < size || t.end(word).is_none() => {
                return Err(LayoutError::TrailingOverlap {
                    name: self.name,
                    offset: t.offset,
                    allocation: size,
                });
            }
            (ShapeKind::Variable, trailing) => Shape::Variable { trailing },
        };

        let desc = TypeDescriptor {
            name: self.name,
            host: self.host,
            shape,
            total_allocation_size: size,
            dict_offset: self.dict_offset,
            weak_offset: self.weak_offset,
            base: self.base,
        };
        check_regions(&desc)?;
        if let Some(base) = &desc.base {
            check_base(&desc, base)?;
        }

        log::debug!(
            "described record type {desc}: header {} bytes, instance {} bytes",
            desc.base_header_size(),
            desc.instance_size()
        );
        Ok(desc)
    }
}

/// Reject auxiliary slots that overlap the data run or each other.
fn check_regions(desc: &TypeDescriptor) -> Result<(), LayoutError> {
    let regions = desc.regions();
    for region in &regions {
        let slot = match region.kind {
            RegionKind::MappingSlot => AuxSlot::Mapping,
            RegionKind::WeakSlot => AuxSlot::Weak,
            _ => continue,
        };
        let collides = regions
            .iter()
            .any(|other| other != region && other.overlaps(region));
        if collides {
            return Err(LayoutError::AuxiliaryCollision {
                name: desc.name.clone(),
                slot,
                offset: region.start,
            });
        }
    }
    Ok(())
}

/// A base must describe a prefix of the derived layout.
fn check_base(desc: &TypeDescriptor, base: &TypeDescriptor) -> Result<(), LayoutError> {
    let mismatch = |reason: String| {
        Err(LayoutError::BaseMismatch {
            name: desc.name.clone(),
            base: base.name.clone(),
            reason,
        })
    };
    if base.host != desc.host {
        return mismatch("host layouts differ".into());
    }
    if base.kind() != desc.kind() {
        return mismatch(format!(
            "base is {}-shape, derived is {}-shape",
            base.kind(),
            desc.kind()
        ));
    }
    if base.data_slot_count() > desc.data_slot_count() {
        return mismatch(format!(
            "base has {} data slots, derived only {}",
            base.data_slot_count(),
            desc.data_slot_count()
        ));
    }
    if base.has_dict_slot() && !desc.has_dict_slot() {
        return mismatch("base reserves a mapping slot the derived type drops".into());
    }
    if base.has_weak_slot() && !desc.has_weak_slot() {
        return mismatch("base reserves a weak-reference slot the derived type drops".into());
    }
    Ok(())
}
