//! Sample ingestion into integer-labeled grids
//!
//! A sample is a rectangular grid of symbolic values (text characters or RGBA
//! pixels). Each distinct symbol receives a palette index in first-seen
//! row-major order; the rest of the system only sees those indices.

use ndarray::Array2;
use std::collections::HashMap;
use std::path::Path;

use crate::io::error::{AlgorithmError, Result};

/// A symbolic sample value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// A character from a text sample
    Char(char),
    /// An RGBA pixel from an image sample
    Rgba([u8; 4]),
}

impl Symbol {
    /// Glyph used by text renderers
    pub const fn glyph(self) -> char {
        match self {
            Self::Char(c) => c,
            Self::Rgba(_) => '#',
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<[u8; 4]> for Symbol {
    fn from(rgba: [u8; 4]) -> Self {
        Self::Rgba(rgba)
    }
}

/// Rectangular grid of palette indices plus the palette itself
#[derive(Clone, Debug)]
pub struct Sample {
    data: Array2<usize>,
    palette: Vec<Symbol>,
}

impl Sample {
    /// Build a sample from rows of symbols
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are no rows, or the first row is empty
    /// - Any row's length differs from the first row's
    pub fn from_rows<T>(rows: &[Vec<T>]) -> Result<Self>
    where
        T: Copy + Into<Symbol>,
    {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "sample has no values".to_string(),
            });
        }
        if let Some((row, found)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != width)
            .map(|(i, r)| (i, r.len()))
        {
            return Err(AlgorithmError::RaggedSample {
                row,
                expected: width,
                found,
            });
        }

        let mut palette = Vec::new();
        let mut lookup: HashMap<Symbol, usize> = HashMap::new();
        let mut labels = Vec::with_capacity(rows.len() * width);

        for value in rows.iter().flat_map(|r| r.iter()) {
            let symbol: Symbol = (*value).into();
            let index = *lookup.entry(symbol).or_insert_with(|| {
                palette.push(symbol);
                palette.len() - 1
            });
            labels.push(index);
        }

        let data = Array2::from_shape_vec((rows.len(), width), labels).map_err(|e| {
            AlgorithmError::InvalidSourceData {
                reason: e.to_string(),
            }
        })?;

        Ok(Self { data, palette })
    }

    /// Parse a text sample, one row per line
    ///
    /// Trailing carriage returns and trailing blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is empty or its lines differ in length.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut rows: Vec<Vec<char>> = text
            .split('\n')
            .map(|line| line.trim_end_matches('\r').chars().collect())
            .collect();
        while rows.last().is_some_and(Vec::is_empty) {
            rows.pop();
        }
        Self::from_rows(&rows)
    }

    /// Load a text sample from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid sample.
    pub fn from_text_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "read sample",
            source: e,
        })?;
        Self::from_text(&text)
    }

    /// Load an image sample, one symbol per RGBA pixel
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or read
    /// - The file is not a valid image format
    pub fn from_png_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        let rgba_img = img.to_rgba8();

        let rows: Vec<Vec<[u8; 4]>> = rgba_img
            .rows()
            .map(|row| row.map(|pixel| pixel.0).collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// Palette indices, `(rows, cols)` shaped
    pub const fn data(&self) -> &Array2<usize> {
        &self.data
    }

    /// Symbols indexed by palette index
    pub fn palette(&self) -> &[Symbol] {
        &self.palette
    }

    /// Symbol for a palette index
    pub fn symbol(&self, index: usize) -> Option<Symbol> {
        self.palette.get(index).copied()
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// RGBA colour for each palette index
    ///
    /// Pixel symbols keep their colour; character symbols are spread evenly
    /// over grey levels in palette order.
    pub fn color_mapping(&self) -> Vec<[u8; 4]> {
        let steps = self.palette.len().saturating_sub(1).max(1);
        self.palette
            .iter()
            .enumerate()
            .map(|(index, symbol)| match symbol {
                Symbol::Rgba(rgba) => *rgba,
                Symbol::Char(_) => {
                    let level = (index * 255 / steps) as u8;
                    [level, level, level, 255]
                }
            })
            .collect()
    }
}
