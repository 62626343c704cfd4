//! Tests for command-line parsing and batch file processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use wavetile::algorithm::propagation::PropagationOrder;
    use wavetile::analysis::adjacency::AdjacencyMode;
    use wavetile::io::cli::{Cli, FileProcessor, SampleFormat};
    use wavetile::io::configuration::{
        DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT_WIDTH, DEFAULT_PATTERN_SIZE, DEFAULT_SEED,
    };

    fn cli(target: &Path, extra: &[&str]) -> Cli {
        let mut args = vec![
            "wavetile".to_string(),
            target.to_string_lossy().into_owned(),
            "-n".to_string(),
            "2".to_string(),
            "--quiet".to_string(),
        ];
        args.extend(extra.iter().map(ToString::to_string));
        Cli::parse_from(args)
    }

    /// A 4x4 run of the checkerboard sample
    fn checker_cli(target: &Path, extra: &[&str]) -> Cli {
        let mut args = vec!["-w", "4", "-H", "4"];
        args.extend_from_slice(extra);
        cli(target, &args)
    }

    fn write_checker(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, "AB\nBA\n").unwrap_or_else(|e| panic!("{e}"));
        path
    }

    // Tests parsing with only the target uses the defaults
    // Verified by changing a default value
    #[test]
    fn test_parse_minimal_args() {
        let cli = Cli::parse_from(["wavetile", "sample.txt"]);
        assert_eq!(cli.target, PathBuf::from("sample.txt"));
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.width, DEFAULT_OUTPUT_WIDTH);
        assert_eq!(cli.pattern_size, DEFAULT_PATTERN_SIZE);
        assert_eq!(cli.attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(cli.adjacency, AdjacencyMode::Overlap);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
    }

    // Tests every option reaches the generation parameters
    // Verified by ignoring the symmetry flag in algorithm_config
    #[test]
    fn test_parse_all_args() {
        let cli = Cli::parse_from([
            "wavetile",
            "in.png",
            "-s",
            "7",
            "-w",
            "20",
            "-H",
            "10",
            "-n",
            "2",
            "-S",
            "-a",
            "co-occurrence",
            "-t",
            "3",
            "--seed-cell",
            "--halt-on-contradiction",
            "-v",
            "-q",
            "--no-skip",
        ]);
        let config = cli.algorithm_config();

        assert_eq!(cli.seed, 7);
        assert_eq!(cli.attempts, 3);
        assert!(cli.visualize);
        assert!(!cli.skip_existing());
        assert!(!cli.should_show_progress());
        assert_eq!((config.width, config.height), (20, 10));
        assert_eq!(config.pattern_size, 2);
        assert!(config.symmetry);
        assert_eq!(config.adjacency, AdjacencyMode::CoOccurrence);
        assert!(config.seed_random_cell);
        assert!(config.halt_on_contradiction);
        assert_eq!(config.propagation_order, PropagationOrder::Fifo);
    }

    // Tests the sample format follows the extension
    // Verified by treating every file as text
    #[test]
    fn test_sample_format() {
        assert_eq!(SampleFormat::from_path(Path::new("a.txt")), Some(SampleFormat::Text));
        assert_eq!(SampleFormat::from_path(Path::new("a.png")), Some(SampleFormat::Png));
        assert_eq!(SampleFormat::from_path(Path::new("a.jpg")), None);
        assert_eq!(SampleFormat::from_path(Path::new("noext")), None);
    }

    // Tests outputs are written next to the input with a suffix
    // Verified by dropping the extension from the output name
    #[test]
    fn test_output_path() {
        assert_eq!(
            FileProcessor::get_output_path(Path::new("dir/sample.txt")),
            PathBuf::from("dir/sample_result.txt")
        );
        assert_eq!(
            FileProcessor::get_output_path(Path::new("tiles.png")),
            PathBuf::from("tiles_result.png")
        );
    }

    // Tests a missing target is an error
    // Verified by returning an empty file list for missing targets
    #[test]
    fn test_missing_target() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("{e}"));
        let cli = checker_cli(&dir.path().join("absent.txt"), &[]);
        assert!(FileProcessor::new(cli).process().is_err());
    }

    // Tests unsupported file types are rejected
    // Verified by removing the extension check
    #[test]
    fn test_unsupported_file_type() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("{e}"));
        let path = dir.path().join("sample.bmp");
        fs::write(&path, "AB").unwrap_or_else(|e| panic!("{e}"));
        assert!(FileProcessor::new(checker_cli(&path, &[])).process().is_err());
    }

    // Tests zero attempts are rejected before any file is read
    // Verified by removing the attempts check
    #[test]
    fn test_zero_attempts_rejected() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("{e}"));
        let path = write_checker(&dir, "sample.txt");
        let cli = checker_cli(&path, &["-t", "0"]);
        assert!(FileProcessor::new(cli).process().is_err());
        assert!(!FileProcessor::get_output_path(&path).exists());
    }

    // Tests a text sample produces a text grid of the requested size
    // Verified by writing the output transposed
    #[test]
    fn test_process_text_sample() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("{e}"));
        let path = write_checker(&dir, "sample.txt");
        let mut processor = FileProcessor::new(checker_cli(&path, &[]));
        assert!(processor.process().is_ok());

        let output = FileProcessor::get_output_path(&path);
        let text = fs::read_to_string(&output).unwrap_or_else(|e| panic!("{e}"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        for line in &lines {
            assert_eq!(line.chars().count(), 4);
            assert!(line == &"ABAB" || line == &"BABA");
        }
    }

    // Tests a PNG sample produces a PNG grid and an optional GIF
    // Verified by skipping visualization export
    #[test]
    fn test_process_png_sample_with_visualization() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("{e}"));
        let path = dir.path().join("tiles.png");
        let mut img = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, image::Rgba([255, 255, 255, 255]));
        img.put_pixel(0, 1, image::Rgba([255, 255, 255, 255]));
        img.save(&path).unwrap_or_else(|e| panic!("{e}"));

        let mut processor = FileProcessor::new(checker_cli(&path, &["--visualize"]));
        assert!(processor.process().is_ok());

        let output = image::open(FileProcessor::get_output_path(&path))
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!((output.width(), output.height()), (4, 4));
        assert!(dir.path().join("tiles_visualization.gif").exists());
    }

    // Tests existing outputs are skipped unless --no-skip is given
    // Verified by inverting the skip check
    #[test]
    fn test_skip_existing_output() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("{e}"));
        let path = write_checker(&dir, "sample.txt");
        let output = FileProcessor::get_output_path(&path);
        fs::write(&output, "keep").unwrap_or_else(|e| panic!("{e}"));

        assert!(FileProcessor::new(checker_cli(&path, &[])).process().is_ok());
        assert_eq!(fs::read_to_string(&output).ok().as_deref(), Some("keep"));

        assert!(FileProcessor::new(checker_cli(&path, &["--no-skip"])).process().is_ok());
        assert_ne!(fs::read_to_string(&output).ok().as_deref(), Some("keep"));
    }

    // Tests directories yield sorted samples and leave generated outputs out
    // Verified by collecting every file in the directory
    #[test]
    fn test_collect_directory() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("{e}"));
        write_checker(&dir, "b.txt");
        write_checker(&dir, "a.txt");
        write_checker(&dir, "c_result.txt");
        fs::write(dir.path().join("notes.md"), "#").unwrap_or_else(|e| panic!("{e}"));

        let processor = FileProcessor::new(checker_cli(dir.path(), &["--no-skip"]));
        let files = processor.collect_files().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            files,
            vec![dir.path().join("a.txt"), dir.path().join("b.txt")]
        );
    }

    // Tests a sample that cannot tile still writes diagnostic output
    // Verified by returning an error when every attempt contradicts
    #[test]
    fn test_failed_run_writes_output() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("{e}"));
        let path = write_checker(&dir, "odd.txt");
        let odd = cli(&path, &["-w", "3", "-H", "3", "-t", "2"]);
        assert!(FileProcessor::new(odd).process().is_ok());

        let text = fs::read_to_string(FileProcessor::get_output_path(&path))
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(text.contains('!'));
    }
}
