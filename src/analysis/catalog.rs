//! Pattern catalog extraction
//!
//! Slides an N×N window over every position of the sample with toroidal
//! wraparound. With symmetry enabled the whole sample is scanned in all eight
//! dihedral orientations; the windows of a rotated torus are exactly the
//! rotated windows of the original, so this registers every window under its
//! mirror and rotations. Identical windows share one identity, assigned in
//! first-seen order (orientation-major, then row-major).

use ndarray::{Array2, ArrayView2};
use std::collections::HashMap;

use crate::algorithm::multiset::WeightedMultiset;
use crate::analysis::sample::Sample;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::pattern::{Pattern, extract_window, orientations, window_key};

/// Deduplicated pattern list with reverse lookup
#[derive(Clone, Debug)]
pub struct PatternCatalog {
    size: usize,
    patterns: Vec<Pattern>,
    lookup: HashMap<Vec<usize>, usize>,
    anchor_maps: Vec<Array2<usize>>,
}

impl PatternCatalog {
    /// Extract every distinct `size`×`size` window of the sample
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `size` is zero
    /// - `size` exceeds the sample's row or column count
    pub fn build(sample: &Sample, size: usize, symmetry: bool) -> Result<Self> {
        validate_size(size, sample.data().dim())?;

        let scans = if symmetry {
            orientations(sample.data())
        } else {
            vec![sample.data().clone()]
        };

        let mut catalog = Self {
            size,
            patterns: Vec::new(),
            lookup: HashMap::new(),
            anchor_maps: Vec::with_capacity(scans.len()),
        };

        for scan in &scans {
            let (rows, cols) = scan.dim();
            let mut anchors = Array2::zeros((rows, cols));
            for row in 0..rows {
                for col in 0..cols {
                    let window = extract_window(scan, row, col, size);
                    let id = catalog.register(window);
                    if let Some(anchor) = anchors.get_mut([row, col]) {
                        *anchor = id;
                    }
                }
            }
            catalog.anchor_maps.push(anchors);
        }

        Ok(catalog)
    }

    /// Build a catalog from explicit windows and weights
    ///
    /// Identities follow the input order. A weight of zero keeps the pattern
    /// in the catalog but leaves it out of the initial superposition.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `size` is zero
    /// - A window is not `size`×`size`
    /// - Two windows have identical content
    pub fn from_parts(size: usize, windows: Vec<(Array2<usize>, usize)>) -> Result<Self> {
        if size == 0 {
            return Err(invalid_parameter(
                "pattern_size",
                &size,
                &"must be at least 1",
            ));
        }

        let mut catalog = Self {
            size,
            patterns: Vec::with_capacity(windows.len()),
            lookup: HashMap::new(),
            anchor_maps: Vec::new(),
        };

        for (cells, weight) in windows {
            if cells.dim() != (size, size) {
                return Err(invalid_parameter(
                    "window",
                    &format!("{:?}", cells.dim()),
                    &format!("expected {size}x{size}"),
                ));
            }
            let key = window_key(&cells);
            if catalog.lookup.contains_key(&key) {
                return Err(invalid_parameter(
                    "window",
                    &format!("{key:?}"),
                    &"duplicate pattern content",
                ));
            }
            let id = catalog.patterns.len();
            catalog.lookup.insert(key, id);
            catalog.patterns.push(Pattern::new(id, cells, weight));
        }

        Ok(catalog)
    }

    fn register(&mut self, window: Array2<usize>) -> usize {
        let key = window_key(&window);
        if let Some(&id) = self.lookup.get(&key) {
            if let Some(pattern) = self.patterns.get_mut(id) {
                pattern.add_occurrence();
            }
            return id;
        }
        let id = self.patterns.len();
        self.lookup.insert(key, id);
        self.patterns.push(Pattern::new(id, window, 1));
        id
    }

    /// Pattern side length N
    pub const fn size(&self) -> usize {
        self.size
    }

    /// All patterns, indexed by identity
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Pattern with the given identity
    pub fn pattern(&self, id: usize) -> Option<&Pattern> {
        self.patterns.get(id)
    }

    /// Pattern with the given identity or an `InvalidPatternIndex` error
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the catalog.
    pub fn try_pattern(&self, id: usize) -> Result<&Pattern> {
        self.patterns
            .get(id)
            .ok_or(AlgorithmError::InvalidPatternIndex {
                index: id,
                pattern_count: self.patterns.len(),
            })
    }

    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the catalog holds no pattern
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Identity of a window's content, if known
    pub fn id_of(&self, window: ArrayView2<'_, usize>) -> Option<usize> {
        let key: Vec<usize> = window.iter().copied().collect();
        self.lookup.get(&key).copied()
    }

    /// Whether a window's content is a known pattern
    pub fn contains(&self, window: ArrayView2<'_, usize>) -> bool {
        self.id_of(window).is_some()
    }

    /// Occurrence weight per identity
    pub fn weights(&self) -> Vec<usize> {
        self.patterns.iter().map(Pattern::weight).collect()
    }

    /// Pattern identity anchored at every position of every scanned orientation
    ///
    /// Empty for hand-built catalogs.
    pub fn anchor_maps(&self) -> &[Array2<usize>] {
        &self.anchor_maps
    }

    /// Full superposition: every pattern replicated by its weight
    pub fn initial_states(&self) -> WeightedMultiset {
        WeightedMultiset::from_counts(self.patterns.iter().map(|p| (p.id(), p.weight())))
    }
}

fn validate_size(size: usize, sample_dimensions: (usize, usize)) -> Result<()> {
    if size == 0 {
        return Err(invalid_parameter(
            "pattern_size",
            &size,
            &"must be at least 1",
        ));
    }
    if size > sample_dimensions.0 || size > sample_dimensions.1 {
        return Err(AlgorithmError::PatternTooLarge {
            size,
            sample_dimensions,
        });
    }
    Ok(())
}
