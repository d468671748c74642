//! Named sub-regions of a validated blob.

use indexmap::IndexMap;

/// A byte range inside a blob. `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn new(start: usize, end: usize) -> Self {
        Region { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Signature-keyed region index, kept in blob order.
///
/// Entry-point validation fills it; repeated signatures overwrite the
/// earlier range, so a lookup always resolves to the last occurrence.
#[derive(Debug, Clone, Default)]
pub struct RegionIndex {
    regions: IndexMap<String, Region>,
}

impl RegionIndex {
    pub fn new() -> Self {
        RegionIndex {
            regions: IndexMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, signature: &str, region: Region) {
        self.regions.insert(signature.to_owned(), region);
    }

    /// Looks up the region for `signature`, if the blob carried one.
    pub fn get(&self, signature: &str) -> Option<Region> {
        self.regions.get(signature).copied()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterates regions in the order their tables appear in the blob.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Region)> {
        self.regions.iter().map(|(sig, region)| (sig.as_str(), *region))
    }
}
