//! PNG export of the wave grid

use crate::analysis::catalog::PatternCatalog;
use crate::io::configuration::CONTRADICTION_COLOR;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::{Cell, WaveGrid};
use image::{ImageBuffer, Rgba, RgbaImage};

/// Colour of one cell
///
/// Collapsed cells take the palette colour of their anchor value. Superposed
/// cells blend the colours of their candidates' anchor values, weighted by
/// count. Cells in contradiction are magenta.
pub fn cell_color(cell: &Cell, catalog: &PatternCatalog, color_mapping: &[[u8; 4]]) -> [u8; 4] {
    if cell.is_contradiction() {
        return CONTRADICTION_COLOR;
    }

    let mut sums = [0usize; 4];
    let mut total = 0usize;
    for (id, count) in cell.states().iter() {
        let Some(color) = catalog
            .pattern(id)
            .and_then(|p| p.anchor_value())
            .and_then(|value| color_mapping.get(value))
        else {
            continue;
        };
        for (sum, &channel) in sums.iter_mut().zip(color) {
            *sum += usize::from(channel) * count;
        }
        total += count;
    }

    if total == 0 {
        return CONTRADICTION_COLOR;
    }
    sums.map(|sum| (sum / total) as u8)
}

/// Render the grid one pixel per cell
pub fn render_image(
    grid: &WaveGrid,
    catalog: &PatternCatalog,
    color_mapping: &[[u8; 4]],
) -> RgbaImage {
    let mut img = ImageBuffer::new(grid.cols() as u32, grid.rows() as u32);
    for ([row, col], cell) in grid.iter() {
        let color = cell_color(cell, catalog, color_mapping);
        img.put_pixel(col as u32, row as u32, Rgba(color));
    }
    img
}

/// Export the grid as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(
    grid: &WaveGrid,
    catalog: &PatternCatalog,
    color_mapping: &[[u8; 4]],
    output_path: &str,
) -> Result<()> {
    let img = render_image(grid, catalog, color_mapping);

    if let Some(parent) = std::path::Path::new(output_path).parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.into(),
            source: e,
        })?;

    Ok(())
}
