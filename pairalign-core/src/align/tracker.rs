//! Optimum tracking over the cells an alignment may end in.

use super::config::FreeEndGaps;
use crate::error::{DpError, DpResult};
use crate::matrix::MatrixCoordinate;
use crate::score::{Score, SimdScore};

/// Receives the cells of the last matrix row and column as they are computed.
pub trait Tracker<S> {
    fn track(&mut self, coordinate: MatrixCoordinate, score: S);
}

/// Scalar optimum over the admissible end cells.
///
/// The final cell is always admissible; the last row is admissible when the
/// trailing gap of the first sequence is free, the last column when the
/// trailing gap of the second sequence is free. Ties go to the later cell.
#[derive(Clone, Debug)]
pub struct OptimumTracker<S> {
    optimum: S,
    coordinate: MatrixCoordinate,
    last: MatrixCoordinate,
    track_last_row: bool,
    track_last_column: bool,
}

impl<S: Score + Ord> OptimumTracker<S> {
    pub fn new(column_count: usize, row_count: usize, free_end_gaps: &FreeEndGaps) -> Self {
        Self {
            optimum: S::lowest(),
            coordinate: MatrixCoordinate::default(),
            last: MatrixCoordinate::new(
                column_count.saturating_sub(1),
                row_count.saturating_sub(1),
            ),
            track_last_row: free_end_gaps.seq1_trailing,
            track_last_column: free_end_gaps.seq2_trailing,
        }
    }

    pub fn optimum(&self) -> S {
        self.optimum
    }

    pub fn coordinate(&self) -> MatrixCoordinate {
        self.coordinate
    }

    fn admissible(&self, coordinate: MatrixCoordinate) -> bool {
        let on_last_row = coordinate.row == self.last.row;
        let on_last_column = coordinate.column == self.last.column;
        (on_last_row && on_last_column)
            || (on_last_row && self.track_last_row)
            || (on_last_column && self.track_last_column)
    }
}

impl<S: Score + Ord> Tracker<S> for OptimumTracker<S> {
    #[inline]
    fn track(&mut self, coordinate: MatrixCoordinate, score: S) {
        if self.admissible(coordinate) && score >= self.optimum {
            self.optimum = score;
            self.coordinate = coordinate;
        }
    }
}

/// Lane-wise optimum of a vectorised global alignment.
///
/// Every lane aligns its own pair of sequences, padded at the end to the
/// longest sequence of the batch. A lane's optimum is the padded matrix cell
/// `(len1 + offset, len2 + offset)` with `offset` the padding both sequences
/// of the lane share; it lies on the last row or last column of the padded
/// matrix.
#[derive(Clone, Debug)]
pub struct SimdOptimumTracker<V: SimdScore> {
    optimum: V,
    target_column: V,
    target_row: V,
    padding_offsets: Vec<usize>,
}

impl<V: SimdScore> Default for SimdOptimumTracker<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: SimdScore> SimdOptimumTracker<V> {
    pub fn new() -> Self {
        Self {
            optimum: V::lowest(),
            target_column: V::default(),
            target_row: V::default(),
            padding_offsets: Vec::new(),
        }
    }

    /// Sets up the per-lane targets for a batch and resets the optimum.
    pub fn initialise_tracker<T>(&mut self, seq1_batch: &[&[T]], seq2_batch: &[&[T]]) -> DpResult<()> {
        if seq1_batch.len() > V::LANES || seq2_batch.len() > V::LANES {
            return Err(DpError::BatchSize {
                size: seq1_batch.len().max(seq2_batch.len()),
                lanes: V::LANES,
            });
        }
        debug_assert_eq!(seq1_batch.len(), seq2_batch.len());

        let max1 = seq1_batch.iter().map(|s| s.len()).max().unwrap_or(0);
        let max2 = seq2_batch.iter().map(|s| s.len()).max().unwrap_or(0);
        let to_scalar = |value: usize| {
            V::scalar_from_i64(value as i64).ok_or(DpError::ScoreOverflow {
                value: value as i64,
            })
        };

        self.padding_offsets.clear();
        let mut columns = Vec::with_capacity(seq1_batch.len());
        let mut rows = Vec::with_capacity(seq1_batch.len());
        for (seq1, seq2) in seq1_batch.iter().zip(seq2_batch) {
            let offset = (max1 - seq1.len()).min(max2 - seq2.len());
            columns.push(to_scalar(seq1.len() + offset)?);
            rows.push(to_scalar(seq2.len() + offset)?);
            self.padding_offsets.push(offset);
        }

        self.target_column = V::from_lanes(&columns, to_scalar(max1)?);
        self.target_row = V::from_lanes(&rows, to_scalar(max2)?);
        self.reset_optimum();
        Ok(())
    }

    /// Takes `score` into the lanes whose target is `(column, row)`.
    #[inline]
    pub fn update(&mut self, column: V, row: V, score: V) {
        let mask = column.lanes_eq(self.target_column) & row.lanes_eq(self.target_row);
        self.optimum = mask.select(score, self.optimum);
    }

    pub fn reset_optimum(&mut self) {
        self.optimum = V::lowest();
    }

    pub fn optimum(&self) -> V {
        self.optimum
    }

    /// Shared padding of each lane's sequences, in batch order.
    pub fn padding_offsets(&self) -> &[usize] {
        &self.padding_offsets
    }
}

impl<V: SimdScore> Tracker<V> for SimdOptimumTracker<V> {
    #[inline]
    fn track(&mut self, coordinate: MatrixCoordinate, score: V) {
        let column = V::scalar_from_i64(coordinate.column as i64);
        let row = V::scalar_from_i64(coordinate.row as i64);
        if let (Some(column), Some(row)) = (column, row) {
            self.update(V::splat(column), V::splat(row), score);
        }
    }
}
