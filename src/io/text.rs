//! Text rendering of the wave grid

use crate::analysis::catalog::PatternCatalog;
use crate::analysis::sample::Symbol;
use crate::io::configuration::{CONTRADICTION_GLYPH, SUPERPOSED_GLYPH};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::{CellView, WaveGrid};
use std::path::Path;

/// Glyph for one cell given its view
pub fn cell_glyph(view: CellView, catalog: &PatternCatalog, palette: &[Symbol]) -> char {
    match view {
        CellView::Collapsed(id) => catalog
            .pattern(id)
            .and_then(|p| p.anchor_value())
            .and_then(|value| palette.get(value))
            .map_or(CONTRADICTION_GLYPH, |symbol| symbol.glyph()),
        CellView::Superposed(_) => SUPERPOSED_GLYPH,
        CellView::Contradiction => CONTRADICTION_GLYPH,
    }
}

/// Render the grid as lines of glyphs, one line per row, newline terminated
pub fn render_text(grid: &WaveGrid, catalog: &PatternCatalog, palette: &[Symbol]) -> String {
    let mut out = String::with_capacity(grid.rows() * (grid.cols() + 1));
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let view = grid.view([row, col]).unwrap_or(CellView::Contradiction);
            out.push(cell_glyph(view, catalog, palette));
        }
        out.push('\n');
    }
    out
}

/// Write the text rendering to disk
///
/// # Errors
///
/// Returns an error if the parent directory or file cannot be written.
pub fn export_grid_as_text<P: AsRef<Path>>(
    grid: &WaveGrid,
    catalog: &PatternCatalog,
    palette: &[Symbol],
    output_path: P,
) -> Result<()> {
    let path = output_path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    std::fs::write(path, render_text(grid, catalog, palette)).map_err(|e| {
        AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "write text output",
            source: e,
        }
    })
}
