//! Tests for sample ingestion from rows, text and images

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use ndarray::array;
    use wavetile::AlgorithmError;
    use wavetile::analysis::sample::{Sample, Symbol};

    // Tests palette indices are assigned in first-seen row-major order
    // Verified by sorting the palette
    #[test]
    fn test_text_palette_first_seen() {
        let sample = Sample::from_text("BA\nAB\n").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(sample.palette(), &[Symbol::Char('B'), Symbol::Char('A')]);
        assert_eq!(sample.data(), &array![[0, 1], [1, 0]]);
        assert_eq!(sample.rows(), 2);
        assert_eq!(sample.cols(), 2);
    }

    // Tests ragged rows are rejected with the offending row
    // Verified by padding short rows
    #[test]
    fn test_ragged_rows_rejected() {
        let result = Sample::from_text("ABC\nAB\nABC");
        assert!(matches!(
            result,
            Err(AlgorithmError::RaggedSample {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
    }

    // Tests empty input is rejected
    // Verified by returning an empty 0x0 sample
    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            Sample::from_text(""),
            Err(AlgorithmError::InvalidSourceData { .. })
        ));
        assert!(matches!(
            Sample::from_rows::<char>(&[]),
            Err(AlgorithmError::InvalidSourceData { .. })
        ));
    }

    // Tests carriage returns and trailing blank lines are ignored
    // Verified by keeping the trailing empty rows
    #[test]
    fn test_crlf_and_trailing_lines() {
        let sample = Sample::from_text("XY\r\nYX\r\n\n").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(sample.rows(), 2);
        assert_eq!(sample.cols(), 2);
        assert_eq!(sample.palette().len(), 2);
    }

    // Tests pixel rows keep their colours in the palette and mapping
    // Verified by mapping every symbol to grey levels
    #[test]
    fn test_rgba_rows() {
        let red: [u8; 4] = [255, 0, 0, 255];
        let blue: [u8; 4] = [0, 0, 255, 255];
        let sample =
            Sample::from_rows(&[vec![red, blue], vec![blue, blue]]).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(sample.symbol(0), Some(Symbol::Rgba(red)));
        assert_eq!(sample.color_mapping(), vec![red, blue]);
        assert_eq!(sample.data(), &array![[0, 1], [1, 1]]);
    }

    // Tests character palettes spread over grey levels
    // Verified by giving every character the same colour
    #[test]
    fn test_char_color_mapping() {
        let sample = Sample::from_text("ab").unwrap_or_else(|e| panic!("{e}"));
        let expected: Vec<[u8; 4]> = vec![[0, 0, 0, 255], [255, 255, 255, 255]];
        assert_eq!(sample.color_mapping(), expected);
        assert_eq!(Symbol::Char('a').glyph(), 'a');
    }

    // Tests loading a text sample from disk
    // Verified by reading only the first line
    #[test]
    fn test_from_text_file() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let path = dir.path().join("sample.txt");
        std::fs::write(&path, "~~#\n#~~\n").unwrap_or_else(|e| panic!("{e}"));
        let sample = Sample::from_text_file(&path).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(sample.data().dim(), (2, 3));
    }

    // Tests a missing file is a file system error
    // Verified by returning an empty sample for missing files
    #[test]
    fn test_missing_text_file() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let result = Sample::from_text_file(dir.path().join("absent.txt"));
        assert!(matches!(result, Err(AlgorithmError::FileSystem { .. })));
    }

    // Tests loading a PNG sample reads one symbol per pixel
    // Verified by transposing rows and columns
    #[test]
    fn test_from_png_file() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let path = dir.path().join("sample.png");
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([0, 0, 0, 255]));
        img.put_pixel(2, 0, Rgba([255, 255, 255, 255]));
        img.save(&path).unwrap_or_else(|e| panic!("{e}"));

        let sample = Sample::from_png_file(&path).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(sample.data().dim(), (2, 3));
        assert_eq!(sample.data().get([0, 2]), Some(&1));
        assert_eq!(sample.palette().len(), 2);
    }
}
