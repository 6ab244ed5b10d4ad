//! Memoised descriptors keyed by name and plan.
//!
//! Hosts that define record types on demand (often with the same name and
//! shape over and over) can route through a [`DescriptorCache`] so every
//! request for an identical type returns the same shared descriptor.
//! The cache is an ordinary value owned by the host; there is no global
//! registry.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::descriptor::TypeDescriptor;
use crate::error::LayoutError;
use crate::host::HostLayout;
use crate::plan::SlotPlan;

/// Descriptors built against one [`HostLayout`], in creation order.
#[derive(Clone, Debug)]
pub struct DescriptorCache {
    host: HostLayout,
    entries: IndexMap<(String, SlotPlan), Arc<TypeDescriptor>>,
}

impl DescriptorCache {
    /// An empty cache for `host`.
    pub fn new(host: HostLayout) -> Self {
        Self {
            host,
            entries: IndexMap::new(),
        }
    }

    /// The host geometry every cached descriptor uses.
    pub fn host(&self) -> HostLayout {
        self.host
    }

    /// Return the cached descriptor for `(name, plan)`, describing it on
    /// first request.
    ///
    /// Failed descriptions are not cached.
    pub fn get_or_describe(
        &mut self,
        name: &str,
        plan: SlotPlan,
    ) -> Result<Arc<TypeDescriptor>, LayoutError> {
        let key = (name.to_owned(), plan);
        if let Some(desc) = self.entries.get(&key) {
            log::trace!("descriptor cache hit for '{name}'");
            return Ok(Arc::clone(desc));
        }
        let desc = Arc::new(plan.describe(name, self.host)?);
        log::debug!(
            "descriptor cache miss for '{name}', {} entries cached",
            self.entries.len() + 1
        );
        self.entries.insert(key, Arc::clone(&desc));
        Ok(desc)
    }

    /// Look up a previously described type without describing it.
    pub fn get(&self, name: &str, plan: SlotPlan) -> Option<&Arc<TypeDescriptor>> {
        self.entries.get(&(name.to_owned(), plan))
    }

    /// Iterate over cached descriptors in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TypeDescriptor>> {
        self.entries.values()
    }

    /// Number of cached descriptors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached descriptor.
    ///
    /// Descriptors still referenced elsewhere stay alive.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for DescriptorCache {
    fn default() -> Self {
        Self::new(HostLayout::native())
    }
}
