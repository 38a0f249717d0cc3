use super::cell::{AffineCell, TraceCell};
use super::coordinate::{AdvanceableCoordinate, CoordinateRange, MatrixCoordinate, RowAxis};
use super::trace_directions::TraceDirections;
use super::trace_path::{trace_path, GapModel, TracePath, TraceSource};
use super::two_dimensional::{MatrixMajor, TwoDimensionalMatrix};
use super::{AlignmentMatrix, MatrixColumn};
use crate::error::{try_reserve_total, DpResult};

/// A column of a [`TraceMatrixFull`].
pub struct TraceColumn<'a> {
    index: usize,
    best: &'a mut [TraceDirections],
    horizontal: &'a mut [TraceDirections],
    vertical: &'a mut TraceDirections,
}

impl MatrixColumn for TraceColumn<'_> {
    type Cell = TraceCell;

    #[inline]
    fn column_index(&self) -> usize {
        self.index
    }

    #[inline]
    fn len(&self) -> usize {
        self.best.len()
    }

    fn coordinates(&self) -> CoordinateRange<RowAxis> {
        AdvanceableCoordinate::new(self.index, 0)
            .range_to(AdvanceableCoordinate::new(self.index, self.best.len()))
    }

    #[inline]
    fn predecessor(&self, offset: usize) -> TraceCell {
        AffineCell((TraceDirections::NONE, self.horizontal[offset], *self.vertical))
    }

    #[inline]
    fn store(&mut self, offset: usize, cell: TraceCell) {
        let (best, horizontal, vertical) = cell.into_inner();
        self.best[offset] = best;
        self.horizontal[offset] = horizontal;
        *self.vertical = vertical;
    }
}

/// Dense trace matrix for affine alignments.
///
/// Each column is one contiguous run of best-trace values. Horizontal traces
/// live in a single row-length buffer that is overwritten column by column,
/// and the vertical trace is carried down the current column.
#[derive(Clone, Debug)]
pub struct TraceMatrixFull {
    traces: TwoDimensionalMatrix<TraceDirections>,
    horizontal: Vec<TraceDirections>,
    vertical: TraceDirections,
    position: usize,
}

impl Default for TraceMatrixFull {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceMatrixFull {
    pub fn new() -> Self {
        Self {
            traces: TwoDimensionalMatrix::new(MatrixMajor::Column),
            horizontal: Vec::new(),
            vertical: TraceDirections::NONE,
            position: 0,
        }
    }

    /// Stored directions at `coordinate`, `None` outside the matrix.
    pub fn at(&self, coordinate: MatrixCoordinate) -> Option<TraceDirections> {
        self.traces.get(coordinate.row, coordinate.column).copied()
    }

    /// Traceback starting at `start`.
    pub fn trace_path(&self, start: MatrixCoordinate) -> DpResult<TracePath<'_, Self>> {
        trace_path(self, start)
    }

    /// The best-trace values, column-major.
    pub fn traces(&self) -> &TwoDimensionalMatrix<TraceDirections> {
        &self.traces
    }
}

impl AlignmentMatrix for TraceMatrixFull {
    type Cell = TraceCell;
    type Column<'a> = TraceColumn<'a> where Self: 'a;

    fn column_count(&self) -> usize {
        self.traces.columns()
    }

    fn row_count(&self) -> usize {
        self.traces.rows()
    }

    fn resize(&mut self, column_count: usize, row_count: usize) -> DpResult<()> {
        log::debug!(
            "full trace matrix: {} columns x {} rows",
            column_count,
            row_count
        );
        self.traces
            .resize(row_count, column_count, TraceDirections::NONE)?;
        self.horizontal.clear();
        try_reserve_total(&mut self.horizontal, row_count)?;
        self.horizontal.resize(row_count, TraceDirections::NONE);
        self.vertical = TraceDirections::NONE;
        self.position = 0;
        Ok(())
    }

    fn column_position(&self) -> usize {
        self.position
    }

    fn current_column(&mut self) -> TraceColumn<'_> {
        TraceColumn {
            index: self.position,
            best: self.traces.column_mut(self.position),
            horizontal: &mut self.horizontal,
            vertical: &mut self.vertical,
        }
    }

    fn go_next_column(&mut self) {
        self.position += 1;
    }
}

impl TraceSource for TraceMatrixFull {
    fn trace_dimensions(&self) -> (usize, usize) {
        (self.traces.columns(), self.traces.rows())
    }

    fn trace_at(&self, coordinate: MatrixCoordinate) -> TraceDirections {
        self.at(coordinate).unwrap_or(TraceDirections::NONE)
    }

    fn gap_model(&self) -> GapModel {
        GapModel::Affine
    }
}
