use bitvec::prelude::*;

/// Fixed-size bitset over pattern identities
///
/// Identities are 0-based catalog indices. Used by propagation to narrow the
/// distinct candidates of a cell before counting multiplicities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternBitset {
    bits: BitVec,
}

impl PatternBitset {
    /// Create a bitset with no patterns present
    pub fn new(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![0; pattern_count],
        }
    }

    /// Insert a pattern identity; out-of-range identities are ignored
    pub fn insert(&mut self, id: usize) {
        if id < self.bits.len() {
            self.bits.set(id, true);
        }
    }

    /// Test pattern membership
    pub fn contains(&self, id: usize) -> bool {
        self.bits.get(id).as_deref() == Some(&true)
    }

    /// Add every pattern present in `other`
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Present identities in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}
