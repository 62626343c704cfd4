//! Command-line interface for batch generation from text and PNG samples

use crate::algorithm::executor::{AlgorithmConfig, RunOutcome, WaveCollapse};
use crate::algorithm::propagation::PropagationOrder;
use crate::analysis::adjacency::AdjacencyMode;
use crate::analysis::sample::Sample;
use crate::io::configuration::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_PATTERN_SIZE,
    DEFAULT_SEED, ENTROPY_JITTER, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressManager;
use crate::io::text::export_grid_as_text;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "wavetile")]
#[command(
    version,
    about = "Generate tiling grids from a sample with overlapping wave function collapse"
)]
/// Command-line arguments for the generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input sample (.txt or .png) or a directory of samples
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_OUTPUT_WIDTH)]
    pub width: usize,

    /// Output height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_OUTPUT_HEIGHT)]
    pub height: usize,

    /// Side length N of the extracted patterns
    #[arg(short = 'n', long, default_value_t = DEFAULT_PATTERN_SIZE)]
    pub pattern_size: usize,

    /// Also extract the rotated and mirrored variants of every pattern
    #[arg(short = 'S', long)]
    pub symmetry: bool,

    /// How adjacency between patterns is derived
    #[arg(short, long, value_enum, default_value_t = AdjacencyMode::Overlap)]
    pub adjacency: AdjacencyMode,

    /// Runs to try per sample; each retry restarts with the next seed
    #[arg(short = 't', long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub attempts: usize,

    /// Collapse one random cell before the lowest-entropy loop starts
    #[arg(long)]
    pub seed_cell: bool,

    /// Stop a run at its first contradiction
    #[arg(long)]
    pub halt_on_contradiction: bool,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Generation parameters selected on the command line
    pub const fn algorithm_config(&self) -> AlgorithmConfig {
        AlgorithmConfig {
            pattern_size: self.pattern_size,
            width: self.width,
            height: self.height,
            symmetry: self.symmetry,
            adjacency: self.adjacency,
            seed_random_cell: self.seed_cell,
            halt_on_contradiction: self.halt_on_contradiction,
            propagation_order: PropagationOrder::Fifo,
            entropy_jitter: ENTROPY_JITTER,
        }
    }
}

/// Sample file formats understood by the CLI
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleFormat {
    /// One row of characters per line
    Text,
    /// One symbol per RGBA pixel
    Png,
}

impl SampleFormat {
    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("txt") => Some(Self::Text),
            Some("png") => Some(Self::Png),
            _ => None,
        }
    }

    /// Load a sample in this format
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid sample.
    pub fn load(self, path: &Path) -> Result<Sample> {
        match self {
            Self::Text => Sample::from_text_file(path),
            Self::Png => Sample::from_png_file(path),
        }
    }
}

/// Orchestrates batch processing of sample files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// A run that ends in contradiction is not an error: its diagnostic
    /// rendering is still written and a warning is printed.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, sample loading, configuration
    /// or output fails
    pub fn process(&mut self) -> Result<()> {
        self.cli.algorithm_config().validate()?;
        if self.cli.attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &self.cli.attempts,
                &"must be at least 1",
            ));
        }

        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Sample files selected by the target argument, sorted
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a sample file nor a
    /// readable directory.
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if SampleFormat::from_path(target).is_none() {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"sample file must be .txt or .png",
                ));
            }
            if self.should_process_file(target) {
                Ok(vec![target.clone()])
            } else {
                Ok(vec![])
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if SampleFormat::from_path(&path).is_some()
                    && !Self::is_generated_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a sample file or directory",
            ))
        }
    }

    fn is_generated_output(path: &Path) -> bool {
        path.file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print for user feedback on failed runs
    #[allow(clippy::print_stderr)]
    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let format = SampleFormat::from_path(input_path).ok_or_else(|| {
            invalid_parameter(
                "target",
                &input_path.display(),
                &"sample file must be .txt or .png",
            )
        })?;
        let sample = format.load(input_path)?;
        let config = self.cli.algorithm_config();
        let attempts = self.cli.attempts;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, config.width * config.height, attempts);
        }

        let mut executor = WaveCollapse::from_sample(&sample, config, self.cli.seed)?;
        if self.cli.visualize {
            executor.enable_visualization(sample.color_mapping());
        }

        let outcome = self.run_attempts(&mut executor, index)?;

        let output_path = Self::get_output_path(input_path);
        match format {
            SampleFormat::Text => export_grid_as_text(
                executor.grid(),
                executor.catalog(),
                sample.palette(),
                &output_path,
            )?,
            SampleFormat::Png => export_grid_as_png(
                executor.grid(),
                executor.catalog(),
                &sample.color_mapping(),
                &path_str(&output_path)?,
            )?,
        }

        if self.cli.visualize {
            let viz_path = Self::get_visualization_path(input_path);
            executor.export_visualization(&path_str(&viz_path)?)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, outcome.success);
        }

        if !outcome.success && !self.cli.quiet {
            eprintln!(
                "Warning: {} ended with {} contradiction(s) after {attempts} attempt(s); wrote diagnostic output to {}",
                input_path.display(),
                outcome.contradictions.len(),
                output_path.display()
            );
        }

        Ok(())
    }

    /// Run until a success or the attempt budget is spent, reseeding each retry
    fn run_attempts(&mut self, executor: &mut WaveCollapse, index: usize) -> Result<RunOutcome> {
        let mut attempt = 1;
        loop {
            let progress = &mut self.progress_manager;
            let outcome = executor.run_with_progress(|collapsed, _| {
                if let Some(pm) = progress.as_mut() {
                    pm.update_collapsed(index, collapsed);
                }
            })?;

            if outcome.success || attempt >= self.cli.attempts {
                return Ok(outcome);
            }

            attempt += 1;
            executor.restart(self.cli.seed.wrapping_add(attempt as u64 - 1));
            if let Some(ref mut pm) = self.progress_manager {
                pm.start_attempt(index, attempt);
            }
        }
    }

    /// Output path for an input: `<stem>_result.<ext>` next to it
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }

    fn get_visualization_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let viz_name = format!("{}_visualization.gif", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(viz_name)
        } else {
            PathBuf::from(viz_name)
        }
    }
}

fn path_str(path: &Path) -> Result<String> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        invalid_parameter("path", &path.display(), &"output path is not valid UTF-8")
    })
}
