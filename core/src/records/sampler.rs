use crate::error::{CoreError, CoreResult};
use rand::Rng;

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Categorical distribution over a fixed table of values, drawn by
/// inverting the cumulative weights against a uniform `[0, 1)` sample.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    values: Vec<T>,
    cumulative: Vec<f64>,
    fallback: usize,
}

impl<T: Copy> WeightedTable<T> {
    pub fn new(entries: &[(T, f64)]) -> CoreResult<Self> {
        if entries.is_empty() {
            return Err(CoreError::InvalidConfig(
                "weighted table needs at least one entry".to_string(),
            ));
        }
        let mut values = Vec::with_capacity(entries.len());
        let mut cumulative = Vec::with_capacity(entries.len());
        let mut running = 0.0;
        for (idx, (value, weight)) in entries.iter().enumerate() {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(CoreError::InvalidConfig(format!(
                    "weight at index {} must be finite and non-negative, got {}",
                    idx, weight
                )));
            }
            running += weight;
            values.push(*value);
            cumulative.push(running);
        }
        if (running - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(CoreError::InvalidConfig(format!(
                "weights must sum to 1, got {}",
                running
            )));
        }
        // Rounding can leave the last cumulative bound just under 1.0; draws
        // past it land on the last entry that can actually be chosen.
        let fallback = entries
            .iter()
            .rposition(|(_, w)| *w > 0.0)
            .unwrap_or(entries.len() - 1);

        Ok(WeightedTable {
            values,
            cumulative,
            fallback,
        })
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        let x: f64 = rng.gen();
        let idx = self
            .cumulative
            .iter()
            .position(|bound| x < *bound)
            .unwrap_or(self.fallback);
        self.values[idx]
    }
}

/// Uniform pick from a non-empty constant table.
pub fn pick_uniform<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}
