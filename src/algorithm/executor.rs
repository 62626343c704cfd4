use crate::{
    algorithm::{
        multiset::WeightedMultiset,
        propagation::{PropagationOrder, PropagationReport, Propagator},
        selection::{choose_pattern, select_lowest_entropy},
        validation::{ValidationReport, validate, value_grid},
    },
    analysis::{
        adjacency::{AdjacencyMode, AdjacencyRules},
        catalog::PatternCatalog,
        sample::Sample,
    },
    io::{
        configuration::{
            DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_PATTERN_SIZE, ENTROPY_JITTER,
            GIF_FRAME_DELAY_MS, MAX_GRID_DIMENSION,
        },
        error::{AlgorithmError, Result, invalid_parameter, invariant_violation},
        visualization::VisualizationCapture,
    },
    math::probability::RandomSelector,
    spatial::{
        direction::Direction,
        grid::{CellView, WaveGrid},
    },
};
use ndarray::Array2;

/// Parameters of one generation run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlgorithmConfig {
    /// Side length N of extracted patterns
    pub pattern_size: usize,
    /// Output width in cells
    pub width: usize,
    /// Output height in cells
    pub height: usize,
    /// Whether to scan all eight orientations of the sample
    pub symmetry: bool,
    /// How adjacency rules are derived
    pub adjacency: AdjacencyMode,
    /// Collapse one uniformly random cell before the main loop
    pub seed_random_cell: bool,
    /// Stop at the first contradiction instead of filling the rest of the grid
    pub halt_on_contradiction: bool,
    /// Visiting order of the propagation worklist
    pub propagation_order: PropagationOrder,
    /// Upper bound of the uniform tie-break noise added to entropies
    pub entropy_jitter: f64,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            pattern_size: DEFAULT_PATTERN_SIZE,
            width: DEFAULT_OUTPUT_WIDTH,
            height: DEFAULT_OUTPUT_HEIGHT,
            symmetry: false,
            adjacency: AdjacencyMode::Overlap,
            seed_random_cell: false,
            halt_on_contradiction: false,
            propagation_order: PropagationOrder::Fifo,
            entropy_jitter: ENTROPY_JITTER,
        }
    }
}

impl AlgorithmConfig {
    /// Reject configurations that cannot produce a grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pattern size is zero
    /// - Width or height is zero or above `MAX_GRID_DIMENSION`
    /// - The entropy jitter is negative, not finite, or above `ENTROPY_JITTER`
    pub fn validate(&self) -> Result<()> {
        if self.pattern_size == 0 {
            return Err(invalid_parameter(
                "pattern_size",
                &self.pattern_size,
                &"must be at least 1",
            ));
        }
        if self.width == 0 || self.height == 0 {
            return Err(invalid_parameter(
                "dimensions",
                &format!("{}x{}", self.width, self.height),
                &"output grid must have at least one row and one column",
            ));
        }
        if self.width > MAX_GRID_DIMENSION || self.height > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "dimensions",
                &format!("{}x{}", self.width, self.height),
                &format!("each dimension must be at most {MAX_GRID_DIMENSION}"),
            ));
        }
        if !(0.0..=ENTROPY_JITTER).contains(&self.entropy_jitter) {
            return Err(invalid_parameter(
                "entropy_jitter",
                &self.entropy_jitter,
                &format!("must lie in [0, {ENTROPY_JITTER}]"),
            ));
        }
        Ok(())
    }
}

/// Lifecycle of a run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Cells remain to be collapsed
    Running,
    /// Every cell is collapsed and none is in contradiction
    Done,
    /// The run finished with at least one contradiction
    DoneWithError,
}

/// Final report of a run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    /// Terminal state
    pub state: RunState,
    /// True iff no cell is in contradiction
    pub success: bool,
    /// Contradicted cells in the order they were discovered
    pub contradictions: Vec<[usize; 2]>,
    /// Number of selection steps taken
    pub iterations: usize,
    /// Number of collapsed cells at the end
    pub collapsed: usize,
}

/// One observe-collapse-propagate step
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepRecord {
    /// Cell chosen by entropy selection
    pub position: [usize; 2],
    /// Pattern it collapsed to
    pub pattern: usize,
    /// What propagation did afterwards
    pub report: PropagationReport,
}

/// Overlapping wave function collapse over a toroidal grid
///
/// Owns the catalog, the rule table, the wave grid and the run's random
/// source. A run is `clear` → optional seed → repeated steps until no cell is
/// selectable. There is no backtracking; the caller restarts with a new seed.
pub struct WaveCollapse {
    catalog: PatternCatalog,
    rules: AdjacencyRules,
    config: AlgorithmConfig,
    initial: WeightedMultiset,
    grid: WaveGrid,
    random_selector: RandomSelector,
    propagator: Propagator,
    state: RunState,
    iteration: usize,
    contradictions: Vec<[usize; 2]>,
    seed: u64,
    /// Optional visualization capture
    pub visualization: Option<VisualizationCapture>,
}

impl WaveCollapse {
    /// Build catalog and rules from a sample and prepare a fully superposed grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The pattern size exceeds the sample
    pub fn from_sample(sample: &Sample, config: AlgorithmConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let catalog = PatternCatalog::build(sample, config.pattern_size, config.symmetry)?;
        let rules = AdjacencyRules::build(&catalog, config.adjacency)?;
        Self::with_rules(catalog, rules, config, seed)
    }

    /// Use an existing catalog and rule table
    ///
    /// `config.pattern_size`, `symmetry` and `adjacency` are ignored here; the
    /// catalog and rules are taken as given.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output dimensions or jitter are invalid
    /// - The rule table covers a different number of patterns than the catalog
    pub fn with_rules(
        catalog: PatternCatalog,
        rules: AdjacencyRules,
        config: AlgorithmConfig,
        seed: u64,
    ) -> Result<Self> {
        AlgorithmConfig {
            pattern_size: catalog.size(),
            ..config
        }
        .validate()?;
        if rules.pattern_count() != catalog.len() {
            return Err(invalid_parameter(
                "rules",
                &rules.pattern_count(),
                &format!("rule table must cover the {} catalog patterns", catalog.len()),
            ));
        }

        let initial = self_neighbor_states(
            catalog.initial_states(),
            &rules,
            config.height,
            config.width,
        );
        let grid = WaveGrid::new(config.height, config.width, &initial)?;

        Ok(Self {
            catalog,
            rules,
            config,
            initial,
            grid,
            random_selector: RandomSelector::new(seed),
            propagator: Propagator::new(config.propagation_order),
            state: RunState::Running,
            iteration: 0,
            contradictions: Vec::new(),
            seed,
            visualization: None,
        })
    }

    /// Reset every cell to full superposition
    ///
    /// The random source keeps its position; use [`Self::restart`] for a
    /// fresh seed.
    pub fn clear(&mut self) {
        self.grid.clear(&self.initial);
        self.state = RunState::Running;
        self.iteration = 0;
        self.contradictions.clear();
        if let Some(viz) = &mut self.visualization {
            viz.clear();
        }
    }

    /// Clear the grid and reseed the random source
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.random_selector = RandomSelector::new(seed);
        self.propagator = Propagator::new(self.config.propagation_order);
        self.clear();
    }

    /// Collapse one uniformly random selectable cell and propagate
    ///
    /// Returns the chosen position, or `None` if nothing is selectable.
    ///
    /// # Errors
    ///
    /// Returns an error if collapse or propagation breaks an invariant.
    pub fn seed_random_cell(&mut self) -> Result<Option<[usize; 2]>> {
        let candidates: Vec<[usize; 2]> = self
            .grid
            .iter()
            .filter(|(_, cell)| !cell.is_collapsed() && !cell.is_contradiction())
            .map(|(position, _)| position)
            .collect();
        let Some(position) = self
            .random_selector
            .index(candidates.len())
            .and_then(|index| candidates.get(index).copied())
        else {
            return Ok(None);
        };

        self.collapse_cell(position)?;
        self.propagate(position)?;
        Ok(Some(position))
    }

    /// Draw one pattern for the cell, weighted by its candidate counts
    ///
    /// Does not propagate.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The position is outside the grid
    /// - The cell is already collapsed (the cell is left unchanged)
    /// - The cell is in contradiction
    pub fn collapse_cell(&mut self, position: [usize; 2]) -> Result<usize> {
        let cell = self.grid.try_cell_mut(position)?;
        if cell.is_collapsed() {
            return Err(AlgorithmError::CellAlreadyCollapsed { position });
        }
        if cell.is_contradiction() {
            return Err(AlgorithmError::CellInContradiction { position });
        }

        let pattern = choose_pattern(cell, &mut self.random_selector).ok_or_else(|| {
            invariant_violation("collapse", Some(position), &"weighted draw found no candidate")
        })?;
        cell.collapse_to(pattern, position)?;

        if let Some(viz) = &mut self.visualization {
            viz.record_collapse(position, anchor_value(&self.catalog, pattern, position)?);
        }
        Ok(pattern)
    }

    /// Propagate the consequences of a change at `origin`
    ///
    /// # Errors
    ///
    /// Returns an error if propagation breaks an invariant.
    pub fn propagate(&mut self, origin: [usize; 2]) -> Result<PropagationReport> {
        let report = self.propagator.propagate(&mut self.grid, &self.rules, origin)?;

        if let Some(viz) = &mut self.visualization {
            for &position in &report.collapsed {
                let id = self
                    .grid
                    .cell(position)
                    .and_then(|cell| cell.collapsed_id())
                    .ok_or_else(|| {
                        invariant_violation(
                            "visualize",
                            Some(position),
                            &"reported collapse is not collapsed",
                        )
                    })?;
                viz.record_collapse(position, anchor_value(&self.catalog, id, position)?);
            }
            for &position in &report.contradictions {
                viz.record_contradiction(position);
            }
        }

        self.contradictions.extend_from_slice(&report.contradictions);
        if self.config.halt_on_contradiction && report.has_contradiction() {
            self.state = RunState::DoneWithError;
        }
        Ok(report)
    }

    /// Select the lowest-entropy cell, collapse it and propagate
    ///
    /// Returns `None` once the run has finished; [`Self::state`] then tells
    /// how it ended.
    ///
    /// # Errors
    ///
    /// Returns an error if an internal invariant is broken.
    pub fn step(&mut self) -> Result<Option<StepRecord>> {
        if self.state != RunState::Running {
            return Ok(None);
        }

        let Some(position) = select_lowest_entropy(
            &self.grid,
            &mut self.random_selector,
            self.config.entropy_jitter,
        ) else {
            self.state = if self.grid.contradictions().is_empty() {
                RunState::Done
            } else {
                RunState::DoneWithError
            };
            return Ok(None);
        };

        self.iteration += 1;
        let pattern = self.collapse_cell(position)?;
        let report = self.propagate(position)?;

        Ok(Some(StepRecord {
            position,
            pattern,
            report,
        }))
    }

    /// Run to completion from the current state
    ///
    /// # Errors
    ///
    /// Returns an error only for invariant violations; contradictions are
    /// reported in the outcome.
    pub fn run(&mut self) -> Result<RunOutcome> {
        self.run_with_progress(|_, _| {})
    }

    /// Run to completion, reporting `(collapsed, total)` cells after each step
    ///
    /// # Errors
    ///
    /// Returns an error only for invariant violations.
    pub fn run_with_progress<F>(&mut self, mut on_step: F) -> Result<RunOutcome>
    where
        F: FnMut(usize, usize),
    {
        if self.config.seed_random_cell && self.iteration == 0 && self.grid.collapsed_count() == 0 {
            self.seed_random_cell()?;
        }

        while self.step()?.is_some() {
            on_step(self.grid.collapsed_count(), self.grid.len());
        }

        Ok(self.outcome())
    }

    /// Report of the run so far
    pub fn outcome(&self) -> RunOutcome {
        RunOutcome {
            state: self.state,
            success: self.grid.contradictions().is_empty(),
            contradictions: self.contradictions.clone(),
            iterations: self.iteration,
            collapsed: self.grid.collapsed_count(),
        }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Number of selection steps taken since the last clear
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Seed of the current random source
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Run parameters
    pub const fn config(&self) -> &AlgorithmConfig {
        &self.config
    }

    /// The wave grid
    pub const fn grid(&self) -> &WaveGrid {
        &self.grid
    }

    /// The pattern catalog
    pub const fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// The adjacency rule table
    pub const fn rules(&self) -> &AdjacencyRules {
        &self.rules
    }

    /// Renderer view of every cell
    pub fn views(&self) -> Array2<CellView> {
        Array2::from_shape_fn(self.grid.dim(), |(row, col)| {
            self.grid
                .view([row, col])
                .unwrap_or(CellView::Contradiction)
        })
    }

    /// Sample value rendered at each collapsed cell (the anchored pattern's top-left value)
    pub fn value_grid(&self) -> Array2<Option<usize>> {
        value_grid(&self.grid, &self.catalog)
    }

    /// Check every N×N window of the current grid against the catalog
    pub fn validate(&self) -> ValidationReport {
        validate(&self.grid, &self.catalog)
    }

    /// Enable GIF recording of the collapse order
    pub fn enable_visualization(&mut self, color_mapping: Vec<[u8; 4]>) {
        self.visualization = Some(VisualizationCapture::new(
            self.grid.rows(),
            self.grid.cols(),
            color_mapping,
        ));
    }

    /// Export visualization as GIF if enabled
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Visualization was not enabled
    /// - GIF export fails
    pub fn export_visualization(&self, output_path: &str) -> Result<()> {
        self.visualization.as_ref().map_or_else(
            || {
                Err(invalid_parameter(
                    "visualization",
                    &"disabled",
                    &"Visualization was not enabled for this run",
                ))
            },
            |viz| viz.export_gif(output_path, GIF_FRAME_DELAY_MS),
        )
    }
}

/// Top-left sample value of a catalog pattern
fn anchor_value(catalog: &PatternCatalog, id: usize, position: [usize; 2]) -> Result<usize> {
    catalog
        .pattern(id)
        .and_then(|pattern| pattern.anchor_value())
        .ok_or_else(|| {
            invariant_violation("visualize", Some(position), &"pattern has no anchor value")
        })
}

/// Drop identities that cannot border themselves across a wrapping dimension
/// of size 1
///
/// A one-column grid makes every cell its own left and right neighbor (one
/// row does the same vertically). Propagation never re-checks a cell against
/// itself, so those constraints are applied once to the initial states.
fn self_neighbor_states(
    mut initial: WeightedMultiset,
    rules: &AdjacencyRules,
    rows: usize,
    cols: usize,
) -> WeightedMultiset {
    let mut wrapping = Vec::new();
    if cols == 1 {
        wrapping.extend([Direction::Left, Direction::Right]);
    }
    if rows == 1 {
        wrapping.extend([Direction::Up, Direction::Down]);
    }

    let rejected: Vec<usize> = initial
        .ids()
        .filter(|&id| wrapping.iter().any(|&d| !rules.compatible(id, id, d)))
        .collect();
    for id in rejected {
        initial.remove(id);
    }
    initial
}
