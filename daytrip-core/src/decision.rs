//! Precomputed "next POI" scores consumed greedily by the rollout driver.

use crate::ConfigError;

/// Dense score table indexed by `[current POI][candidate POI]`.
///
/// The table is produced offline and never updated during planning. Scores
/// must be finite so the greedy choice is always well defined.
///
/// # Examples
/// ```
/// use daytrip_core::DecisionTable;
///
/// # fn main() -> Result<(), daytrip_core::ConfigError> {
/// let table = DecisionTable::new(vec![
///     vec![0.0, 2.0, 1.0],
///     vec![0.5, 0.0, 3.0],
///     vec![1.0, 1.0, 0.0],
/// ])?;
/// assert_eq!(table.best_action(0), Some(1));
/// assert_eq!(table.best_action(2), Some(0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTable {
    size: usize,
    scores: Vec<f64>,
}

impl DecisionTable {
    /// Validate and construct a table from rows.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DecisionTableNotSquare`] when a row length
    /// differs from the row count, and [`ConfigError::NonFiniteScore`] when
    /// a score is `NaN` or infinite.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, ConfigError> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(ConfigError::DecisionTableNotSquare {
                    row,
                    expected: size,
                    found: values.len(),
                });
            }
            if let Some(column) = values.iter().position(|score| !score.is_finite()) {
                return Err(ConfigError::NonFiniteScore { row, column });
            }
            scores.extend(values);
        }
        Ok(Self { size, scores })
    }

    /// Number of rows (and columns).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Scores for every candidate when standing at `current`.
    #[must_use]
    pub fn row(&self, current: usize) -> Option<&[f64]> {
        if current >= self.size {
            return None;
        }
        let start = current * self.size;
        self.scores.get(start..start + self.size)
    }

    /// Highest-scored candidate from `current`; ties go to the lowest index.
    #[must_use]
    pub fn best_action(&self, current: usize) -> Option<usize> {
        let row = self.row(current)?;
        let mut best: Option<(usize, f64)> = None;
        for (candidate, &score) in row.iter().enumerate() {
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((candidate, score));
            }
        }
        best.map(|(candidate, _)| candidate)
    }
}
