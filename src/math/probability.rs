use num_traits::ToPrimitive;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Shannon entropy (natural log) of the distribution implied by `weights`
///
/// Each weight is normalised by the total; zero weights contribute nothing.
/// Returns 0.0 for an empty or all-zero input.
pub fn shannon_entropy<I, T>(weights: I) -> f64
where
    I: IntoIterator<Item = T>,
    T: ToPrimitive,
{
    let values: Vec<f64> = weights
        .into_iter()
        .filter_map(|w| w.to_f64())
        .filter(|&w| w > 0.0)
        .collect();
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    values
        .iter()
        .map(|&w| {
            let p = w / total;
            -p * p.ln()
        })
        .sum()
}

/// Seeded random source for one generation run
///
/// Every stochastic choice of a run (collapse draws, entropy jitter, seeding)
/// goes through one instance so a fixed seed reproduces the run exactly.
#[derive(Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Exact integer-weighted selection
    ///
    /// An index with weight k is k times as likely as one with weight 1.
    /// Returns `None` when all weights are zero.
    pub fn weighted_index(&mut self, weights: &[usize]) -> Option<usize> {
        let total: usize = weights.iter().sum();
        if total == 0 {
            return None;
        }

        let mut remaining = self.rng.random_range(0..total);
        for (i, &weight) in weights.iter().enumerate() {
            if remaining < weight {
                return Some(i);
            }
            remaining -= weight;
        }
        None
    }

    /// Uniform index in `0..len`, `None` for an empty range
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Uniform value in `[0, max)` used to break entropy ties
    pub fn jitter(&mut self, max: f64) -> f64 {
        self.rng.random::<f64>() * max
    }
}
