//! Algorithm constants and runtime configuration defaults

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default side length N of extracted patterns
pub const DEFAULT_PATTERN_SIZE: usize = 3;

/// Default output width in cells
pub const DEFAULT_OUTPUT_WIDTH: usize = 48;

/// Default output height in cells
pub const DEFAULT_OUTPUT_HEIGHT: usize = 48;

/// Default number of runs attempted per sample before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

// Selection
/// Upper bound of the uniform noise added to entropies to break ties
pub const ENTROPY_JITTER: f64 = 0.01;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Glyph for cells that still hold several candidates
pub const SUPERPOSED_GLYPH: char = '░';
/// Glyph for cells in contradiction
pub const CONTRADICTION_GLYPH: char = '!';
/// Pixel colour for cells in contradiction
pub const CONTRADICTION_COLOR: [u8; 4] = [255, 0, 255, 255];
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
