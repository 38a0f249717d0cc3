//! Banded matrices: only the diagonals `lower..=upper` of the full matrix are
//! computed, with `diagonal = column - row`.
//!
//! A band column lives in one buffer of `band_size + 1` slots that is reused
//! for every column. Cell `(column, row)` sits at slot
//! `row - column + band_column_index`, so the left neighbour of a cell is the
//! next slot of the same buffer, still holding the previous column. The last
//! slot is a sentinel that stays at minus infinity.

use std::ops::Range;

use super::cell::{AffineCell, ScoreCell, TraceCell};
use super::coordinate::{AdvanceableCoordinate, CoordinateRange, MatrixCoordinate, RowAxis};
use super::trace_directions::TraceDirections;
use super::trace_path::{trace_path, GapModel, TracePath, TraceSource};
use super::{AlignmentMatrix, MatrixColumn};
use crate::error::{try_reserve_total, DpError, DpResult};
use crate::score::Score;

/// Diagonal bounds of a band, `lower <= upper`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Band {
    pub lower: i64,
    pub upper: i64,
}

impl Band {
    pub const fn new(lower: i64, upper: i64) -> Self {
        Self { lower, upper }
    }

    /// True if `coordinate` lies on one of the band's diagonals.
    pub fn contains(&self, coordinate: MatrixCoordinate) -> bool {
        let diagonal = coordinate.column as i64 - coordinate.row as i64;
        self.lower <= diagonal && diagonal <= self.upper
    }
}

/// Result of [`trim_sequences`]: the sub-ranges the band spans corner to
/// corner and the band expressed relative to them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BandTrim {
    pub seq1: Range<usize>,
    pub seq2: Range<usize>,
    pub band: Band,
}

impl BandTrim {
    /// Maps a coordinate of the trimmed matrix back to the untrimmed one.
    pub fn to_original(&self, coordinate: MatrixCoordinate) -> MatrixCoordinate {
        MatrixCoordinate::new(
            coordinate.column + self.seq1.start,
            coordinate.row + self.seq2.start,
        )
    }
}

/// Trims both sequences so that `band` starts at the origin and ends at the
/// sink of the trimmed matrix.
pub fn trim_sequences<T>(seq1: &[T], seq2: &[T], band: Band) -> DpResult<BandTrim> {
    let m = seq1.len() as i64;
    let n = seq2.len() as i64;
    if band.lower > band.upper || band.lower > m || band.upper < -n {
        return Err(DpError::InvalidBand {
            lower: band.lower,
            upper: band.upper,
        });
    }

    let begin1 = band.lower.max(0);
    let end1 = (band.upper + n).min(m);
    let begin2 = (-band.upper).max(0);
    let end2 = (m - band.lower).min(n);

    let trim = BandTrim {
        seq1: begin1 as usize..end1.max(begin1) as usize,
        seq2: begin2 as usize..end2.max(begin2) as usize,
        band: Band::new(band.lower - begin1 + begin2, band.upper - begin1 + begin2),
    };
    if trim.seq1.len() != seq1.len() || trim.seq2.len() != seq2.len() {
        log::debug!(
            "band [{}, {}] trims sequences to {:?} and {:?}",
            band.lower,
            band.upper,
            trim.seq1,
            trim.seq2
        );
    }
    Ok(trim)
}

/// Shape of a band inside a `columns x rows` matrix.
///
/// Shared by the banded score and trace matrices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BandGeometry {
    columns: usize,
    rows: usize,
    band_column_index: usize,
    band_row_index: usize,
    band_size: usize,
}

impl BandGeometry {
    /// Clamps `band` to the matrix extents.
    pub fn new(columns: usize, rows: usize, band: Band) -> Self {
        let max_column = columns.saturating_sub(1);
        let max_row = rows.saturating_sub(1);
        let upper = band.upper.max(0) as u64;
        let lower = band.lower.min(0).unsigned_abs();
        // Upper diagonals are bounded by the column count, lower ones by the row count.
        let band_column_index = upper.min(max_column as u64) as usize;
        let band_row_index = lower.min(max_row as u64) as usize;
        if upper > max_column as u64 || lower > max_row as u64 {
            log::warn!(
                "band [{}, {}] exceeds a {}x{} matrix; narrowed to [-{}, {}]",
                band.lower,
                band.upper,
                columns,
                rows,
                band_row_index,
                band_column_index
            );
        }
        Self {
            columns,
            rows,
            band_column_index,
            band_row_index,
            band_size: band_column_index + band_row_index + 1,
        }
    }

    #[inline]
    pub fn band_column_index(&self) -> usize {
        self.band_column_index
    }

    #[inline]
    pub fn band_row_index(&self) -> usize {
        self.band_row_index
    }

    #[inline]
    pub fn band_size(&self) -> usize {
        self.band_size
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Buffer slot of the first cell of `column`.
    #[inline]
    pub fn cursor(&self, column: usize) -> usize {
        self.band_column_index.saturating_sub(column)
    }

    /// First matrix row of `column` inside the band.
    #[inline]
    pub fn first_row(&self, column: usize) -> usize {
        column.saturating_sub(self.band_column_index)
    }

    /// Number of cells of `column` inside both the band and the matrix.
    pub fn current_band_size(&self, column: usize) -> usize {
        let remaining_rows = self.rows.saturating_sub(self.first_row(column));
        debug_assert!(remaining_rows > 0);
        remaining_rows.min(self.band_size - self.cursor(column))
    }

    /// Rows skipped above the band in `column`, counted without row 0.
    ///
    /// Only defined once the band has left the first row.
    pub fn second_range_begin_offset(&self, column: usize) -> usize {
        debug_assert!(column > self.band_column_index);
        column - self.band_column_index - 1
    }

    /// True if the band part of `column` reaches the last matrix row.
    pub fn band_touches_last_row(&self, column: usize) -> bool {
        if column > self.band_column_index {
            self.second_range_begin_offset(column) + self.current_band_size(column) + 1 == self.rows
        } else {
            self.current_band_size(column) >= self.rows
        }
    }

    /// Converts `(column, buffer slot)` into `(column, row)`.
    pub fn map_banded_coordinate_to_range_position(
        &self,
        coordinate: MatrixCoordinate,
    ) -> MatrixCoordinate {
        MatrixCoordinate::new(
            coordinate.column,
            coordinate.row + coordinate.column - self.band_column_index,
        )
    }

    /// Buffer slot of `coordinate`, `None` outside the band.
    pub fn slot(&self, coordinate: MatrixCoordinate) -> Option<usize> {
        let shifted = coordinate.row + self.band_column_index;
        if coordinate.column > shifted {
            return None;
        }
        let slot = shifted - coordinate.column;
        (slot < self.band_size).then_some(slot)
    }

    fn coordinates(&self, column: usize) -> CoordinateRange<RowAxis> {
        let first = self.map_banded_coordinate_to_range_position(MatrixCoordinate::new(
            column,
            self.cursor(column),
        ));
        let begin = AdvanceableCoordinate::<RowAxis>::from(first);
        begin.range_to(begin + self.current_band_size(column) as isize)
    }
}

/// A column of a [`BandedScoreMatrix`].
pub struct BandedScoreColumn<'a, S> {
    index: usize,
    geometry: BandGeometry,
    best: &'a mut [S],
    horizontal: &'a mut [S],
    vertical: &'a mut S,
}

impl<S: Score> MatrixColumn for BandedScoreColumn<'_, S> {
    type Cell = ScoreCell<S>;

    #[inline]
    fn column_index(&self) -> usize {
        self.index
    }

    #[inline]
    fn len(&self) -> usize {
        self.geometry.current_band_size(self.index)
    }

    fn coordinates(&self) -> CoordinateRange<RowAxis> {
        self.geometry.coordinates(self.index)
    }

    #[inline]
    fn predecessor(&self, offset: usize) -> ScoreCell<S> {
        AffineCell((self.best[offset + 1], self.horizontal[offset + 1], *self.vertical))
    }

    fn leading_diagonal(&self) -> Option<ScoreCell<S>> {
        (self.geometry.first_row(self.index) > 0)
            .then(|| AffineCell((self.best[0], self.horizontal[0], *self.vertical)))
    }

    #[inline]
    fn store(&mut self, offset: usize, cell: ScoreCell<S>) {
        debug_assert!(offset < self.len());
        let (best, horizontal, vertical) = cell.into_inner();
        self.best[offset] = best;
        self.horizontal[offset] = horizontal;
        *self.vertical = vertical;
    }

    fn touches_last_row(&self) -> bool {
        self.geometry.band_touches_last_row(self.index)
    }
}

/// Score-only banded matrix in `O(band_size)` memory.
#[derive(Clone, Debug)]
pub struct BandedScoreMatrix<S> {
    band: Band,
    geometry: BandGeometry,
    best: Vec<S>,
    horizontal: Vec<S>,
    vertical: S,
    position: usize,
}

impl<S: Score> BandedScoreMatrix<S> {
    pub fn new(band: Band) -> Self {
        Self {
            band,
            geometry: BandGeometry::default(),
            best: Vec::new(),
            horizontal: Vec::new(),
            vertical: S::neg_infinity(),
            position: 0,
        }
    }

    /// Sizes the matrix for `seq1 x seq2` under `band`.
    pub fn allocate_matrix<T>(&mut self, seq1: &[T], seq2: &[T], band: Band) -> DpResult<()> {
        self.band = band;
        self.resize(seq1.len() + 1, seq2.len() + 1)
    }

    pub fn geometry(&self) -> &BandGeometry {
        &self.geometry
    }

    pub fn current_band_size(&self) -> usize {
        self.geometry.current_band_size(self.position)
    }

    pub fn band_touches_last_row(&self) -> bool {
        self.geometry.band_touches_last_row(self.position)
    }

    pub fn map_banded_coordinate_to_range_position(
        &self,
        coordinate: MatrixCoordinate,
    ) -> MatrixCoordinate {
        self.geometry.map_banded_coordinate_to_range_position(coordinate)
    }
}

impl<S: Score> AlignmentMatrix for BandedScoreMatrix<S> {
    type Cell = ScoreCell<S>;
    type Column<'a> = BandedScoreColumn<'a, S> where Self: 'a;

    fn column_count(&self) -> usize {
        self.geometry.columns()
    }

    fn row_count(&self) -> usize {
        self.geometry.rows()
    }

    fn resize(&mut self, column_count: usize, row_count: usize) -> DpResult<()> {
        self.geometry = BandGeometry::new(column_count, row_count, self.band);
        let slots = self.geometry.band_size() + 1;
        log::debug!(
            "banded score matrix: {} columns x {} rows, band size {}",
            column_count,
            row_count,
            self.geometry.band_size()
        );
        for buffer in [&mut self.best, &mut self.horizontal] {
            buffer.clear();
            try_reserve_total(buffer, slots)?;
            buffer.resize(slots, S::neg_infinity());
        }
        self.vertical = S::neg_infinity();
        self.position = 0;
        Ok(())
    }

    fn column_position(&self) -> usize {
        self.position
    }

    fn current_column(&mut self) -> BandedScoreColumn<'_, S> {
        let cursor = self.geometry.cursor(self.position);
        BandedScoreColumn {
            index: self.position,
            geometry: self.geometry,
            best: &mut self.best[cursor..],
            horizontal: &mut self.horizontal[cursor..],
            vertical: &mut self.vertical,
        }
    }

    fn go_next_column(&mut self) {
        self.position += 1;
        if self.geometry.first_row(self.position) > 0 {
            self.vertical = S::neg_infinity();
        }
    }
}

/// A column of a [`BandedTraceMatrix`].
pub struct BandedTraceColumn<'a> {
    index: usize,
    geometry: BandGeometry,
    best: &'a mut [TraceDirections],
    horizontal: &'a mut [TraceDirections],
    vertical: &'a mut TraceDirections,
}

impl MatrixColumn for BandedTraceColumn<'_> {
    type Cell = TraceCell;

    #[inline]
    fn column_index(&self) -> usize {
        self.index
    }

    #[inline]
    fn len(&self) -> usize {
        self.geometry.current_band_size(self.index)
    }

    fn coordinates(&self) -> CoordinateRange<RowAxis> {
        self.geometry.coordinates(self.index)
    }

    #[inline]
    fn predecessor(&self, offset: usize) -> TraceCell {
        AffineCell((
            TraceDirections::NONE,
            self.horizontal[offset + 1],
            *self.vertical,
        ))
    }

    fn leading_diagonal(&self) -> Option<TraceCell> {
        (self.geometry.first_row(self.index) > 0).then(|| {
            AffineCell((TraceDirections::NONE, self.horizontal[0], *self.vertical))
        })
    }

    #[inline]
    fn store(&mut self, offset: usize, cell: TraceCell) {
        let (best, horizontal, vertical) = cell.into_inner();
        self.best[offset] = best;
        self.horizontal[offset] = horizontal;
        *self.vertical = vertical;
    }

    fn touches_last_row(&self) -> bool {
        self.geometry.band_touches_last_row(self.index)
    }
}

/// Banded trace matrix keeping `band_size` trace cells per column.
#[derive(Clone, Debug)]
pub struct BandedTraceMatrix {
    band: Band,
    geometry: BandGeometry,
    traces: Vec<TraceDirections>,
    horizontal: Vec<TraceDirections>,
    vertical: TraceDirections,
    position: usize,
}

impl BandedTraceMatrix {
    pub fn new(band: Band) -> Self {
        Self {
            band,
            geometry: BandGeometry::default(),
            traces: Vec::new(),
            horizontal: Vec::new(),
            vertical: TraceDirections::NONE,
            position: 0,
        }
    }

    pub fn geometry(&self) -> &BandGeometry {
        &self.geometry
    }

    /// Stored directions at `coordinate`; cells outside the band have none.
    pub fn at(&self, coordinate: MatrixCoordinate) -> TraceDirections {
        if coordinate.column >= self.geometry.columns() || coordinate.row >= self.geometry.rows()
        {
            return TraceDirections::NONE;
        }
        match self.geometry.slot(coordinate) {
            Some(slot) => self.traces[coordinate.column * self.geometry.band_size() + slot],
            None => TraceDirections::NONE,
        }
    }

    pub fn trace_path(&self, start: MatrixCoordinate) -> DpResult<TracePath<'_, Self>> {
        trace_path(self, start)
    }
}

impl AlignmentMatrix for BandedTraceMatrix {
    type Cell = TraceCell;
    type Column<'a> = BandedTraceColumn<'a> where Self: 'a;

    fn column_count(&self) -> usize {
        self.geometry.columns()
    }

    fn row_count(&self) -> usize {
        self.geometry.rows()
    }

    fn resize(&mut self, column_count: usize, row_count: usize) -> DpResult<()> {
        self.geometry = BandGeometry::new(column_count, row_count, self.band);
        let band_size = self.geometry.band_size();
        let cells = column_count.saturating_mul(band_size);
        log::debug!(
            "banded trace matrix: {} columns x {} band cells",
            column_count,
            band_size
        );
        self.traces.clear();
        try_reserve_total(&mut self.traces, cells)?;
        self.traces.resize(cells, TraceDirections::NONE);
        self.horizontal.clear();
        try_reserve_total(&mut self.horizontal, band_size + 1)?;
        self.horizontal.resize(band_size + 1, TraceDirections::NONE);
        self.vertical = TraceDirections::NONE;
        self.position = 0;
        Ok(())
    }

    fn column_position(&self) -> usize {
        self.position
    }

    fn current_column(&mut self) -> BandedTraceColumn<'_> {
        let band_size = self.geometry.band_size();
        let cursor = self.geometry.cursor(self.position);
        let start = self.position * band_size;
        BandedTraceColumn {
            index: self.position,
            geometry: self.geometry,
            best: &mut self.traces[start + cursor..start + band_size],
            horizontal: &mut self.horizontal[cursor..],
            vertical: &mut self.vertical,
        }
    }

    fn go_next_column(&mut self) {
        self.position += 1;
        if self.geometry.first_row(self.position) > 0 {
            self.vertical = TraceDirections::NONE;
        }
    }
}

impl TraceSource for BandedTraceMatrix {
    fn trace_dimensions(&self) -> (usize, usize) {
        (self.geometry.columns(), self.geometry.rows())
    }

    fn trace_at(&self, coordinate: MatrixCoordinate) -> TraceDirections {
        self.at(coordinate)
    }

    fn gap_model(&self) -> GapModel {
        GapModel::Affine
    }
}
