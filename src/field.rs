//! Ground-motion field container

use crate::site::SiteId;

/// Mapping from site to ground-motion amount, in the units the model
/// produces (typically natural-log intensity).
///
/// Entries are kept in input-site order, so iteration is deterministic for
/// a fixed RNG sequence. A field always holds exactly one entry per input
/// site and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundMotionField {
    entries: Vec<(SiteId, f64)>,
}

impl GroundMotionField {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, id: SiteId, value: f64) {
        self.entries.push((id, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value for the given site, if the site is part of this field.
    pub fn get(&self, id: SiteId) -> Option<f64> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, value)| *value)
    }

    /// Site at the given input-order index.
    pub fn site_at(&self, index: usize) -> SiteId {
        self.entries[index].0
    }

    /// Value at the given input-order index.
    pub fn value_at(&self, index: usize) -> f64 {
        self.entries[index].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (SiteId, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, value)| *value)
    }

    /// Add a residual to the value at one input-order index.
    pub(crate) fn add_at(&mut self, index: usize, delta: f64) {
        self.entries[index].1 += delta;
    }

    /// Add the same residual to every site, e.g. a shared inter-event term.
    pub(crate) fn add_to_all(&mut self, delta: f64) {
        for entry in &mut self.entries {
            entry.1 += delta;
        }
    }
}
