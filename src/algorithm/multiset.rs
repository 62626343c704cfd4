//! Weighted multiset of pattern identities
//!
//! Each entry maps a pattern identity to a positive count. Entries are kept
//! sorted by identity so iteration order is deterministic, and a count of zero
//! is never stored: removing an identity drops it entirely.

use crate::math::probability::RandomSelector;

/// Identity → count mapping with deterministic iteration order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeightedMultiset {
    entries: Vec<(usize, usize)>,
}

impl WeightedMultiset {
    /// Create an empty multiset
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from `(identity, count)` pairs, merging repeats and skipping zero counts
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut multiset = Self::new();
        for (id, count) in counts {
            multiset.insert(id, count);
        }
        multiset
    }

    /// A single instance of one identity
    pub fn singleton(id: usize) -> Self {
        Self {
            entries: vec![(id, 1)],
        }
    }

    /// Add `count` instances of `id`
    pub fn insert(&mut self, id: usize, count: usize) {
        if count == 0 {
            return;
        }
        match self.entries.binary_search_by_key(&id, |&(key, _)| key) {
            Ok(index) => {
                if let Some(entry) = self.entries.get_mut(index) {
                    entry.1 += count;
                }
            }
            Err(index) => self.entries.insert(index, (id, count)),
        }
    }

    /// Drop every instance of `id`
    pub fn remove(&mut self, id: usize) {
        if let Ok(index) = self.entries.binary_search_by_key(&id, |&(key, _)| key) {
            self.entries.remove(index);
        }
    }

    /// Number of instances of `id` (0 when absent)
    pub fn count(&self, id: usize) -> usize {
        self.entries
            .binary_search_by_key(&id, |&(key, _)| key)
            .ok()
            .and_then(|index| self.entries.get(index))
            .map_or(0, |&(_, count)| count)
    }

    /// Whether `id` is present at least once
    pub fn contains(&self, id: usize) -> bool {
        self.count(id) > 0
    }

    /// Total number of instances, counting repetitions
    pub fn total(&self) -> usize {
        self.entries.iter().map(|&(_, count)| count).sum()
    }

    /// Number of distinct identities
    pub fn distinct_len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the multiset holds nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The identity if exactly one distinct identity remains
    pub fn single(&self) -> Option<usize> {
        match self.entries.as_slice() {
            [(id, _)] => Some(*id),
            _ => None,
        }
    }

    /// Iterate `(identity, count)` pairs in ascending identity order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.entries.iter().copied()
    }

    /// Iterate distinct identities in ascending order
    pub fn ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|&(id, _)| id)
    }

    /// Whether every count here is at most the count in `other`
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.entries
            .iter()
            .all(|&(id, count)| count <= other.count(id))
    }

    /// Replace every count by 1 when only one distinct identity remains
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if let [(_, count)] = self.entries.as_mut_slice() {
            *count = 1;
        }
        self
    }

    /// Draw an identity with probability proportional to its count
    pub fn sample(&self, selector: &mut RandomSelector) -> Option<usize> {
        let counts: Vec<usize> = self.entries.iter().map(|&(_, count)| count).collect();
        let index = selector.weighted_index(&counts)?;
        self.entries.get(index).map(|&(id, _)| id)
    }
}

impl FromIterator<usize> for WeightedMultiset {
    /// Collect a sequence with repetition, one instance per element
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::from_counts(iter.into_iter().map(|id| (id, 1)))
    }
}
