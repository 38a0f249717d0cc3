//! Score and trace matrices driven column by column by the alignment kernels.
//!
//! Columns index the first sequence and rows the second one, so a matrix for
//! sequences of length `m` and `n` has `m + 1` columns of `n + 1` cells. Every
//! matrix hands out one column at a time; computing a column overwrites the
//! storage the previous column was read from, so all outstanding column views
//! are invalidated by moving to the next column or by resizing.

mod banded;
mod cell;
mod combined;
mod coordinate;
mod edit_distance_trace;
mod score_matrix;
mod trace_directions;
mod trace_matrix;
mod trace_path;
mod two_dimensional;

pub use banded::{
    trim_sequences, Band, BandGeometry, BandTrim, BandedScoreColumn, BandedScoreMatrix,
    BandedTraceColumn, BandedTraceMatrix,
};
pub use cell::{AffineCell, ScoreCell, ScoreTraceCell, TraceCell, TraceTriple};
pub use combined::{CombinedColumn, CombinedScoreTraceMatrix};
pub use coordinate::{
    AdvanceableCoordinate, Axis, ColumnAxis, CoordinateRange, MatrixCoordinate, RowAxis,
};
pub use edit_distance_trace::{EditDistanceTraceMatrixFull, TraceWord};
pub use score_matrix::{ScoreColumn, ScoreMatrixFull, ScoreMatrixSingleColumn};
pub use trace_directions::TraceDirections;
pub use trace_matrix::{TraceColumn, TraceMatrixFull};
pub use trace_path::{trace_path, GapModel, TracePath, TraceSource, TracebackPath};
pub use two_dimensional::{MatrixMajor, TwoDimensionalMatrix};

use crate::error::DpResult;

#[cfg(test)]
mod tests;

/// One column of an alignment matrix, seen by the kernel that computes it.
///
/// Offsets are positions within the column; [`MatrixColumn::coordinates`]
/// maps them to matrix coordinates.
pub trait MatrixColumn {
    type Cell: Copy;

    fn column_index(&self) -> usize;

    /// Number of cells the current column may write.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Matrix coordinates of the cells, first to last.
    fn coordinates(&self) -> CoordinateRange<RowAxis>;

    /// The values cell `offset` is computed from: best and horizontal of its
    /// left neighbour and the vertical value carried down from the cell above.
    ///
    /// Must be read before `store(offset, ..)`.
    fn predecessor(&self, offset: usize) -> Self::Cell;

    /// Predecessor of the cell above the first one, when that cell lies in
    /// the matrix but outside this column's stored range.
    fn leading_diagonal(&self) -> Option<Self::Cell> {
        None
    }

    fn store(&mut self, offset: usize, cell: Self::Cell);

    /// True if the last cell of this column is on the last matrix row.
    fn touches_last_row(&self) -> bool {
        true
    }
}

/// A matrix exposing forward-only column access.
pub trait AlignmentMatrix {
    type Cell: Copy;

    type Column<'a>: MatrixColumn<Cell = Self::Cell>
    where
        Self: 'a;

    fn column_count(&self) -> usize;

    fn row_count(&self) -> usize;

    /// Sets the dimensions and rewinds to the first column.
    fn resize(&mut self, column_count: usize, row_count: usize) -> DpResult<()>;

    /// Index of the column [`AlignmentMatrix::current_column`] returns.
    fn column_position(&self) -> usize;

    fn current_column(&mut self) -> Self::Column<'_>;

    fn go_next_column(&mut self);
}

/// Single-pass walk over the columns of a matrix.
///
/// Columns borrow the cursor, so only one column is alive at a time.
pub struct ColumnCursor<'m, M> {
    matrix: &'m mut M,
    started: bool,
}

impl<'m, M: AlignmentMatrix> ColumnCursor<'m, M> {
    pub fn new(matrix: &'m mut M) -> Self {
        Self {
            matrix,
            started: false,
        }
    }

    /// Advances to the next column; the first call yields the current one.
    pub fn next_column(&mut self) -> Option<M::Column<'_>> {
        if self.started {
            self.matrix.go_next_column();
        } else {
            self.started = true;
        }
        if self.is_end() {
            return None;
        }
        Some(self.matrix.current_column())
    }

    pub fn is_end(&self) -> bool {
        self.matrix.column_position() >= self.matrix.column_count()
    }
}
