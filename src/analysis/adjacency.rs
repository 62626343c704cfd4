//! Adjacency rule table
//!
//! For every pattern and direction the table holds a weighted multiset of the
//! patterns that may be anchored at that neighbor. Two derivations exist:
//! structural overlap of the windows, or co-occurrence of anchored patterns in
//! the scanned sample. Both are symmetric: if `b` is listed for `(a, d)` then
//! `a` is listed for `(b, d.opposite())`.

use crate::algorithm::bitset::PatternBitset;
use crate::algorithm::multiset::WeightedMultiset;
use crate::analysis::catalog::PatternCatalog;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::direction::Direction;
use crate::spatial::pattern::patterns_overlap;

/// How compatibility between patterns is derived
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AdjacencyMode {
    /// Windows must agree on every overlapping cell; each compatible
    /// neighbor is listed as many times as its occurrence weight
    #[default]
    Overlap,
    /// Patterns anchored next to each other in the sample are compatible;
    /// each observed pairing adds one to the neighbor's count
    CoOccurrence,
}

/// Read-only `(pattern, direction) → neighbor multiset` table
#[derive(Clone, Debug)]
pub struct AdjacencyRules {
    neighbors: Vec<[WeightedMultiset; 4]>,
    masks: Vec<[PatternBitset; 4]>,
}

impl AdjacencyRules {
    /// Empty table for `pattern_count` patterns (nothing is compatible)
    pub fn new(pattern_count: usize) -> Self {
        Self {
            neighbors: vec![std::array::from_fn(|_| WeightedMultiset::new()); pattern_count],
            masks: vec![std::array::from_fn(|_| PatternBitset::new(pattern_count)); pattern_count],
        }
    }

    /// Derive the table from a catalog
    ///
    /// # Errors
    ///
    /// Returns an error if co-occurrence is requested for a catalog that has
    /// no scanned sample (hand-built catalogs).
    pub fn build(catalog: &PatternCatalog, mode: AdjacencyMode) -> Result<Self> {
        match mode {
            AdjacencyMode::Overlap => Ok(Self::from_overlap(catalog)),
            AdjacencyMode::CoOccurrence => Self::from_co_occurrence(catalog),
        }
    }

    /// Structural derivation: compare every ordered pair in every direction
    pub fn from_overlap(catalog: &PatternCatalog) -> Self {
        let mut rules = Self::new(catalog.len());
        for a in catalog.patterns() {
            for b in catalog.patterns() {
                for direction in Direction::ALL {
                    if patterns_overlap(a.cells(), b.cells(), direction) {
                        rules.record(a.id(), direction, b.id(), b.weight());
                    }
                }
            }
        }
        rules
    }

    /// Sample derivation: record the pattern anchored at each cardinal neighbor
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog was not built from a sample.
    pub fn from_co_occurrence(catalog: &PatternCatalog) -> Result<Self> {
        if catalog.anchor_maps().is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "co-occurrence adjacency needs a catalog scanned from a sample"
                    .to_string(),
            });
        }

        let mut rules = Self::new(catalog.len());
        for anchors in catalog.anchor_maps() {
            for ((row, col), &id) in anchors.indexed_iter() {
                for direction in Direction::ALL {
                    let [n_row, n_col] = direction.step([row, col], anchors.dim());
                    if let Some(&neighbor) = anchors.get([n_row, n_col]) {
                        rules.record(id, direction, neighbor, 1);
                    }
                }
            }
        }
        Ok(rules)
    }

    /// Allow `b` next to `a` in `direction` (and `a` next to `b` the other way)
    ///
    /// # Errors
    ///
    /// Returns an error if either identity is outside the table.
    pub fn allow(&mut self, a: usize, direction: Direction, b: usize) -> Result<()> {
        let pattern_count = self.pattern_count();
        for id in [a, b] {
            if id >= pattern_count {
                return Err(AlgorithmError::InvalidPatternIndex {
                    index: id,
                    pattern_count,
                });
            }
        }
        self.record(a, direction, b, 1);
        self.record(b, direction.opposite(), a, 1);
        Ok(())
    }

    fn record(&mut self, a: usize, direction: Direction, b: usize, weight: usize) {
        if weight == 0 {
            return;
        }
        if let Some(list) = self
            .neighbors
            .get_mut(a)
            .and_then(|lists| lists.get_mut(direction.index()))
        {
            list.insert(b, weight);
        }
        if let Some(mask) = self
            .masks
            .get_mut(a)
            .and_then(|masks| masks.get_mut(direction.index()))
        {
            mask.insert(b);
        }
    }

    /// Number of patterns the table covers
    pub fn pattern_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Weighted neighbors allowed next to `pattern` in `direction`
    pub fn allowed(&self, pattern: usize, direction: Direction) -> Option<&WeightedMultiset> {
        self.neighbors
            .get(pattern)
            .and_then(|lists| lists.get(direction.index()))
    }

    /// Distinct neighbors allowed next to `pattern` in `direction`
    pub fn mask(&self, pattern: usize, direction: Direction) -> Option<&PatternBitset> {
        self.masks
            .get(pattern)
            .and_then(|masks| masks.get(direction.index()))
    }

    /// Whether `b` may be anchored next to `a` in `direction`
    pub fn compatible(&self, a: usize, b: usize, direction: Direction) -> bool {
        self.mask(a, direction).is_some_and(|mask| mask.contains(b))
    }

    /// Whether every rule has its mirrored counterpart
    pub fn is_symmetric(&self) -> bool {
        (0..self.pattern_count()).all(|a| {
            Direction::ALL.iter().all(|&direction| {
                self.mask(a, direction).is_some_and(|mask| {
                    mask.to_vec()
                        .into_iter()
                        .all(|b| self.compatible(b, a, direction.opposite()))
                })
            })
        })
    }
}
