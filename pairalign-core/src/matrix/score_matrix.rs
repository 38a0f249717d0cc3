use super::cell::{AffineCell, ScoreCell};
use super::coordinate::{AdvanceableCoordinate, CoordinateRange, MatrixCoordinate, RowAxis};
use super::two_dimensional::{MatrixMajor, TwoDimensionalMatrix};
use super::{AlignmentMatrix, MatrixColumn};
use crate::error::{try_reserve_total, DpResult};
use crate::score::Score;

/// A column of an unbanded score matrix.
///
/// Before a cell is stored, its slot still holds the left neighbour, so the
/// column doubles as the predecessor column.
pub struct ScoreColumn<'a, S> {
    index: usize,
    best: &'a mut [S],
    horizontal: &'a mut [S],
    vertical: &'a mut S,
    vertical_record: Option<&'a mut [S]>,
}

impl<'a, S: Score> ScoreColumn<'a, S> {
    /// Proxy over the storage of cell `offset`.
    #[inline]
    pub fn cell_mut(&mut self, offset: usize) -> AffineCell<(&mut S, &mut S, &mut S)> {
        AffineCell((
            &mut self.best[offset],
            &mut self.horizontal[offset],
            &mut *self.vertical,
        ))
    }
}

impl<S: Score> MatrixColumn for ScoreColumn<'_, S> {
    type Cell = ScoreCell<S>;

    #[inline]
    fn column_index(&self) -> usize {
        self.index
    }

    #[inline]
    fn len(&self) -> usize {
        self.best.len()
    }

    fn coordinates(&self) -> CoordinateRange<RowAxis> {
        let begin = AdvanceableCoordinate::new(self.index, 0);
        let end = AdvanceableCoordinate::new(self.index, self.best.len());
        begin.range_to(end)
    }

    #[inline]
    fn predecessor(&self, offset: usize) -> ScoreCell<S> {
        AffineCell((self.best[offset], self.horizontal[offset], *self.vertical))
    }

    #[inline]
    fn store(&mut self, offset: usize, cell: ScoreCell<S>) {
        let vertical = *cell.vertical();
        self.cell_mut(offset).store(cell);
        if let Some(record) = self.vertical_record.as_deref_mut() {
            record[offset] = vertical;
        }
    }
}

/// Score-only matrix in linear memory: one physical column is reused for
/// every logical column.
#[derive(Clone, Debug, Default)]
pub struct ScoreMatrixSingleColumn<S> {
    best: Vec<S>,
    horizontal: Vec<S>,
    vertical: S,
    columns: usize,
    position: usize,
}

impl<S: Score> ScoreMatrixSingleColumn<S> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Score> AlignmentMatrix for ScoreMatrixSingleColumn<S> {
    type Cell = ScoreCell<S>;
    type Column<'a> = ScoreColumn<'a, S> where Self: 'a;

    fn column_count(&self) -> usize {
        self.columns
    }

    fn row_count(&self) -> usize {
        self.best.len()
    }

    fn resize(&mut self, column_count: usize, row_count: usize) -> DpResult<()> {
        log::debug!(
            "single column score matrix: {} columns x {} rows",
            column_count,
            row_count
        );
        for buffer in [&mut self.best, &mut self.horizontal] {
            buffer.clear();
            try_reserve_total(buffer, row_count)?;
            buffer.resize(row_count, S::neg_infinity());
        }
        self.vertical = S::neg_infinity();
        self.columns = column_count;
        self.position = 0;
        Ok(())
    }

    fn column_position(&self) -> usize {
        self.position
    }

    fn current_column(&mut self) -> ScoreColumn<'_, S> {
        ScoreColumn {
            index: self.position,
            best: &mut self.best,
            horizontal: &mut self.horizontal,
            vertical: &mut self.vertical,
            vertical_record: None,
        }
    }

    fn go_next_column(&mut self) {
        self.position += 1;
    }
}

/// Dense score matrix keeping every cell.
#[derive(Clone, Debug)]
pub struct ScoreMatrixFull<S> {
    best: TwoDimensionalMatrix<S>,
    horizontal: TwoDimensionalMatrix<S>,
    vertical: TwoDimensionalMatrix<S>,
    carried: S,
    position: usize,
}

impl<S: Score> Default for ScoreMatrixFull<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Score> ScoreMatrixFull<S> {
    pub fn new() -> Self {
        Self {
            best: TwoDimensionalMatrix::new(MatrixMajor::Column),
            horizontal: TwoDimensionalMatrix::new(MatrixMajor::Column),
            vertical: TwoDimensionalMatrix::new(MatrixMajor::Column),
            carried: S::neg_infinity(),
            position: 0,
        }
    }

    /// The stored cell at `coordinate`.
    ///
    /// # Panics
    /// If `coordinate` lies outside the matrix.
    pub fn at(&self, coordinate: MatrixCoordinate) -> ScoreCell<S> {
        AffineCell((
            self.best[coordinate],
            self.horizontal[coordinate],
            self.vertical[coordinate],
        ))
    }

    /// Best scores, column-major.
    pub fn best_scores(&self) -> &TwoDimensionalMatrix<S> {
        &self.best
    }
}

impl<S: Score> AlignmentMatrix for ScoreMatrixFull<S> {
    type Cell = ScoreCell<S>;
    type Column<'a> = ScoreColumn<'a, S> where Self: 'a;

    fn column_count(&self) -> usize {
        self.best.columns()
    }

    fn row_count(&self) -> usize {
        self.best.rows()
    }

    fn resize(&mut self, column_count: usize, row_count: usize) -> DpResult<()> {
        log::debug!(
            "full score matrix: {} columns x {} rows",
            column_count,
            row_count
        );
        let fill = S::neg_infinity();
        self.best.resize(row_count, column_count, fill)?;
        self.horizontal.resize(row_count, column_count, fill)?;
        self.vertical.resize(row_count, column_count, fill)?;
        self.carried = fill;
        self.position = 0;
        Ok(())
    }

    fn column_position(&self) -> usize {
        self.position
    }

    fn current_column(&mut self) -> ScoreColumn<'_, S> {
        ScoreColumn {
            index: self.position,
            best: self.best.column_mut(self.position),
            horizontal: self.horizontal.column_mut(self.position),
            vertical: &mut self.carried,
            vertical_record: Some(self.vertical.column_mut(self.position)),
        }
    }

    fn go_next_column(&mut self) {
        self.position += 1;
        if self.position < self.best.columns() {
            self.best.copy_column(self.position - 1, self.position);
            self.horizontal.copy_column(self.position - 1, self.position);
        }
    }
}
