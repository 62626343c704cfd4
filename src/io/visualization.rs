//! Frame capture and GIF generation for the collapse order

use crate::io::configuration::{CONTRADICTION_COLOR, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{AlgorithmError, Result};
use image::{Frame, Rgba, RgbaImage};

/// What happened to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The cell resolved to this sample value
    Collapse(usize),
    /// The cell ran out of candidates
    Contradiction,
}

/// A single cell event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapseEvent {
    /// Grid position (row, col)
    pub position: [usize; 2],
    /// Event kind
    pub kind: EventKind,
}

/// Captures cell collapses for visualization
///
/// Records events during a run so the order in which the grid resolved can
/// be replayed as an animation afterwards.
pub struct VisualizationCapture {
    events: Vec<CollapseEvent>,
    dims: (usize, usize),
    color_mapping: Vec<[u8; 4]>,
    empty_color: [u8; 4],
}

impl VisualizationCapture {
    /// The average of all palette colors is used for unresolved cells
    pub fn new(rows: usize, cols: usize, color_mapping: Vec<[u8; 4]>) -> Self {
        let empty_color = average_color(&color_mapping);
        Self {
            events: Vec::with_capacity(rows * cols),
            dims: (rows, cols),
            color_mapping,
            empty_color,
        }
    }

    /// Records a cell resolving to a sample value
    pub fn record_collapse(&mut self, position: [usize; 2], value: usize) {
        self.events.push(CollapseEvent {
            position,
            kind: EventKind::Collapse(value),
        });
    }

    /// Records a cell running out of candidates
    pub fn record_contradiction(&mut self, position: [usize; 2]) {
        self.events.push(CollapseEvent {
            position,
            kind: EventKind::Contradiction,
        });
    }

    /// Drop all events (used when a run restarts)
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Returns all recorded events
    pub fn events(&self) -> &[CollapseEvent] {
        &self.events
    }

    /// Returns the total number of recorded events
    pub const fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// If the requested delay is below what viewers support, frames are
    /// skipped so the apparent speed is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No events were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &str, frame_delay_ms: u32) -> Result<()> {
        if self.events.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "No collapse events captured for visualization".to_string(),
            });
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms)
        } else {
            1
        };

        let frames = self.generate_frames(effective_delay_ms, skip_factor as usize)?;

        if let Some(parent) = std::path::Path::new(output_path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.into(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.into(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Result<Vec<Frame>> {
        let (rows, cols) = self.dims;
        let mut img = RgbaImage::from_pixel(cols as u32, rows as u32, Rgba(self.empty_color));
        let mut frames = vec![frame(img.clone(), delay_ms)];
        let skip_factor = skip_factor.max(1);

        for (count, event) in self.events.iter().enumerate() {
            let [row, col] = event.position;
            if row >= rows || col >= cols {
                continue;
            }
            let color = match event.kind {
                EventKind::Collapse(value) => self.color_mapping.get(value).copied().ok_or(
                    AlgorithmError::InvalidPatternIndex {
                        index: value,
                        pattern_count: self.color_mapping.len(),
                    },
                )?,
                EventKind::Contradiction => CONTRADICTION_COLOR,
            };
            img.put_pixel(col as u32, row as u32, Rgba(color));

            if (count + 1) % skip_factor == 0 {
                frames.push(frame(img.clone(), delay_ms));
            }
        }

        if self.events.len() % skip_factor != 0 {
            frames.push(frame(img.clone(), delay_ms));
        }

        // Final frame displays longer for better visibility
        frames.push(frame(img, delay_ms * 25));

        Ok(frames)
    }
}

fn frame(img: RgbaImage, delay_ms: u32) -> Frame {
    Frame::from_parts(img, 0, 0, image::Delay::from_numer_denom_ms(delay_ms, 1))
}

/// Channel-wise mean of a palette, mid grey for an empty one
pub fn average_color(colors: &[[u8; 4]]) -> [u8; 4] {
    if colors.is_empty() {
        return [128, 128, 128, 255];
    }
    let mut sums = [0u32; 4];
    for color in colors {
        for (sum, &channel) in sums.iter_mut().zip(color) {
            *sum += u32::from(channel);
        }
    }
    let count = colors.len() as u32;
    sums.map(|sum| (sum / count) as u8)
}
