use crate::{
    algorithm::{bitset::PatternBitset, multiset::WeightedMultiset},
    analysis::adjacency::AdjacencyRules,
    io::error::Result,
    math::probability::RandomSelector,
    spatial::{
        direction::Direction,
        grid::{Narrowing, WaveGrid},
    },
};
use bitvec::prelude::*;
use std::collections::VecDeque;

/// Order in which queued cells are re-evaluated
///
/// Non-contradictory fixpoints do not depend on the order; the option exists
/// so that property can be exercised.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PropagationOrder {
    /// Oldest queued cell first
    #[default]
    Fifo,
    /// Most recently queued cell first
    Lifo,
    /// Uniformly random queued cell, drawn from a dedicated seeded source
    Shuffled {
        /// Seed of the dedicated source
        seed: u64,
    },
}

/// Summary of one propagation pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Number of times a cell's candidates shrank
    pub narrowed: usize,
    /// Cells that ended up with a single instance during this pass
    pub collapsed: Vec<[usize; 2]>,
    /// Cells that ran out of candidates during this pass
    pub contradictions: Vec<[usize; 2]>,
    /// Number of cells dequeued and inspected
    pub visits: usize,
}

impl PropagationReport {
    /// Whether the pass produced at least one contradiction
    pub fn has_contradiction(&self) -> bool {
        !self.contradictions.is_empty()
    }
}

/// Deduplicated queue of cells awaiting re-evaluation
#[derive(Debug)]
pub struct Worklist {
    queue: VecDeque<[usize; 2]>,
    pending: BitVec,
    cols: usize,
}

impl Worklist {
    /// Create an empty worklist for a `(rows, cols)` grid
    pub fn new(dims: (usize, usize)) -> Self {
        Self {
            queue: VecDeque::new(),
            pending: bitvec![0; dims.0 * dims.1],
            cols: dims.1,
        }
    }

    /// Queue a position unless it is already waiting
    ///
    /// Returns whether the position was added.
    pub fn push(&mut self, position: [usize; 2]) -> bool {
        let index = position[0] * self.cols + position[1];
        if self.pending.get(index).as_deref() != Some(&false) {
            return false;
        }
        self.pending.set(index, true);
        self.queue.push_back(position);
        true
    }

    /// Take the next position according to `order`
    pub fn pop(
        &mut self,
        order: PropagationOrder,
        shuffler: Option<&mut RandomSelector>,
    ) -> Option<[usize; 2]> {
        let position = match (order, shuffler) {
            (PropagationOrder::Lifo, _) => self.queue.pop_back(),
            (PropagationOrder::Shuffled { .. }, Some(selector)) => {
                let index = selector.index(self.queue.len())?;
                self.queue.swap_remove_back(index)
            }
            _ => self.queue.pop_front(),
        }?;
        let index = position[0] * self.cols + position[1];
        if index < self.pending.len() {
            self.pending.set(index, false);
        }
        Some(position)
    }

    /// Number of queued positions
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Worklist-driven constraint propagation
///
/// Starting from a cell that just changed, repeatedly recompute the allowed
/// multiset of each affected neighbor until nothing changes. Updates are
/// monotone: a count can only go down.
#[derive(Debug)]
pub struct Propagator {
    order: PropagationOrder,
    shuffler: Option<RandomSelector>,
}

impl Default for Propagator {
    fn default() -> Self {
        Self::new(PropagationOrder::default())
    }
}

impl Propagator {
    /// Create a propagator visiting cells in the given order
    pub fn new(order: PropagationOrder) -> Self {
        let shuffler = match order {
            PropagationOrder::Shuffled { seed } => Some(RandomSelector::new(seed)),
            PropagationOrder::Fifo | PropagationOrder::Lifo => None,
        };
        Self { order, shuffler }
    }

    /// Visiting order
    pub const fn order(&self) -> PropagationOrder {
        self.order
    }

    /// Propagate the consequences of a change at `origin` to a fixpoint
    ///
    /// Contradictions are recorded in the report and on the grid; they do not
    /// stop the pass.
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolation` if a recomputation would grow a cell.
    pub fn propagate(
        &mut self,
        grid: &mut WaveGrid,
        rules: &AdjacencyRules,
        origin: [usize; 2],
    ) -> Result<PropagationReport> {
        let mut report = PropagationReport::default();
        let mut worklist = Worklist::new(grid.dim());
        enqueue_neighbors(grid, &mut worklist, origin);

        while let Some(position) = worklist.pop(self.order, self.shuffler.as_mut()) {
            report.visits += 1;

            let Some(cell) = grid.cell(position) else {
                continue;
            };
            if cell.is_collapsed() || cell.is_contradiction() {
                continue;
            }

            let next = allowed_states(grid, rules, position);
            let outcome = grid.try_cell_mut(position)?.narrow(next, position)?;
            match outcome {
                Narrowing::Unchanged => {}
                Narrowing::Narrowed => {
                    report.narrowed += 1;
                    if grid.cell(position).is_some_and(|cell| cell.is_collapsed()) {
                        report.collapsed.push(position);
                    }
                    enqueue_neighbors(grid, &mut worklist, position);
                }
                Narrowing::Contradiction => {
                    report.narrowed += 1;
                    report.contradictions.push(position);
                }
            }
        }

        Ok(report)
    }
}

fn enqueue_neighbors(grid: &WaveGrid, worklist: &mut Worklist, position: [usize; 2]) {
    for neighbor in grid.neighbors(position) {
        if neighbor != position {
            worklist.push(neighbor);
        }
    }
}

/// Candidates of the cell at `position` that every neighbor still supports
///
/// For each direction, the support of identity `p` is the sum over the
/// neighbor's distinct candidates `s` of how often `p` is listed for
/// `(s, opposite direction)`. The new count is the minimum of the current
/// count and every direction's support. Neighbors in contradiction impose no
/// constraint. A single surviving identity is normalised to count 1.
pub fn allowed_states(
    grid: &WaveGrid,
    rules: &AdjacencyRules,
    position: [usize; 2],
) -> WeightedMultiset {
    let Some(cell) = grid.cell(position) else {
        return WeightedMultiset::new();
    };
    let mut counts: Vec<(usize, usize)> = cell.states().iter().collect();

    for direction in Direction::ALL {
        let Some(neighbor) = grid.cell(grid.neighbor(position, direction)) else {
            continue;
        };
        if neighbor.is_contradiction() {
            continue;
        }
        let back = direction.opposite();

        let mut reachable = PatternBitset::new(rules.pattern_count());
        for s in neighbor.states().ids() {
            if let Some(mask) = rules.mask(s, back) {
                reachable.union_with(mask);
            }
        }
        counts.retain(|&(id, _)| reachable.contains(id));

        for (id, count) in &mut counts {
            let support: usize = neighbor
                .states()
                .ids()
                .filter_map(|s| rules.allowed(s, back))
                .map(|allowed| allowed.count(*id))
                .sum();
            *count = (*count).min(support);
        }
        counts.retain(|&(_, count)| count > 0);

        if counts.is_empty() {
            break;
        }
    }

    WeightedMultiset::from_counts(counts).normalized()
}
