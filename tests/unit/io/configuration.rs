//! Tests for the relationships between configuration constants

#[cfg(test)]
mod tests {
    use wavetile::algorithm::executor::AlgorithmConfig;
    use wavetile::io::configuration::{
        CONTRADICTION_GLYPH, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_PATTERN_SIZE,
        ENTROPY_JITTER, GIF_FRAME_DELAY_MS, MAX_GRID_DIMENSION, OUTPUT_SUFFIX, SUPERPOSED_GLYPH,
        VIEWER_MIN_FRAME_DELAY_MS,
    };

    // Tests the defaults form a valid configuration
    // Verified by setting the default width above the maximum
    #[test]
    fn test_defaults_validate() {
        let config = AlgorithmConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pattern_size, DEFAULT_PATTERN_SIZE);
        assert_eq!(config.width, DEFAULT_OUTPUT_WIDTH);
        assert_eq!(config.height, DEFAULT_OUTPUT_HEIGHT);
        assert!(DEFAULT_OUTPUT_WIDTH.max(DEFAULT_OUTPUT_HEIGHT) <= MAX_GRID_DIMENSION);
    }

    // Tests jitter stays far below the entropy of a binary choice
    // Verified by raising the jitter to 1.0
    #[test]
    fn test_jitter_below_binary_entropy() {
        assert!(ENTROPY_JITTER > 0.0);
        assert!(ENTROPY_JITTER < 2.0_f64.ln() / 10.0);
    }

    // Tests rendering markers cannot be mistaken for each other
    // Verified by using the same glyph for both markers
    #[test]
    fn test_glyphs_distinct() {
        assert_ne!(SUPERPOSED_GLYPH, CONTRADICTION_GLYPH);
        assert!(!OUTPUT_SUFFIX.is_empty());
    }

    // Tests the GIF delay triggers frame skipping
    // Verified by setting the frame delay above the viewer minimum
    #[test]
    fn test_frame_delay_below_viewer_minimum() {
        assert!(GIF_FRAME_DELAY_MS < VIEWER_MIN_FRAME_DELAY_MS);
        assert!(GIF_FRAME_DELAY_MS > 0);
    }
}
