use super::coordinate::MatrixCoordinate;
use super::trace_directions::TraceDirections;
use super::trace_path::{trace_path, GapModel, TracePath, TraceSource};
use crate::error::{try_reserve_total, DpResult};

/// Machine word holding one trace bit per row.
pub trait TraceWord: Copy + Default + std::fmt::Debug {
    const BITS: usize;

    /// True if bit `offset` (counted from the least significant bit) is set.
    fn bit(self, offset: usize) -> bool;
}

macro_rules! impl_trace_word {
    ($($t:ty),*) => {$(
        impl TraceWord for $t {
            const BITS: usize = <$t>::BITS as usize;

            #[inline]
            fn bit(self, offset: usize) -> bool {
                (self >> offset) & 1 == 1
            }
        }
    )*};
}

impl_trace_word!(u8, u16, u32, u64);

#[derive(Clone, Debug, Default)]
struct WordColumn<W> {
    left: Vec<W>,
    diagonal: Vec<W>,
    up: Vec<W>,
    max_rows: usize,
}

/// Trace matrix of the bit-vector edit distance.
///
/// Every column stores, per block of `W::BITS` rows, one word each for the
/// left, diagonal and up flags of rows `1..`. Row 0 is implicit: a leading
/// gap in global mode, no predecessor in semi-global mode. With a max-error
/// bound every column also records how many rows are valid; rows below that
/// read as [`TraceDirections::NONE`].
#[derive(Clone, Debug)]
pub struct EditDistanceTraceMatrixFull<W = u64> {
    rows: usize,
    semi_global: bool,
    use_max_errors: bool,
    columns: Vec<WordColumn<W>>,
}

impl<W: TraceWord> EditDistanceTraceMatrixFull<W> {
    /// Empty matrix with `rows` rows (query length + 1) and no columns.
    pub fn new(rows: usize, semi_global: bool, use_max_errors: bool) -> Self {
        Self {
            rows,
            semi_global,
            use_max_errors,
            columns: Vec::new(),
        }
    }

    /// Makes room for at least `capacity` columns.
    pub fn reserve(&mut self, capacity: usize) -> DpResult<()> {
        try_reserve_total(&mut self.columns, capacity)
    }

    /// Appends a column whose rows are all valid.
    pub fn add_column(&mut self, left: Vec<W>, diagonal: Vec<W>, up: Vec<W>) -> DpResult<()> {
        debug_assert!(!self.use_max_errors);
        let rows = self.rows;
        self.push(left, diagonal, up, rows)
    }

    /// Appends a column of which only the first `max_rows` rows are valid.
    pub fn add_column_bounded(
        &mut self,
        left: Vec<W>,
        diagonal: Vec<W>,
        up: Vec<W>,
        max_rows: usize,
    ) -> DpResult<()> {
        debug_assert!(self.use_max_errors);
        self.push(left, diagonal, up, max_rows)
    }

    fn push(&mut self, left: Vec<W>, diagonal: Vec<W>, up: Vec<W>, max_rows: usize) -> DpResult<()> {
        debug_assert!(left.len() == diagonal.len() && diagonal.len() == up.len());
        let len = self.columns.len() + 1;
        try_reserve_total(&mut self.columns, len)?;
        self.columns.push(WordColumn {
            left,
            diagonal,
            up,
            max_rows,
        });
        Ok(())
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    /// Decodes the directions stored at `coordinate`.
    pub fn at(&self, coordinate: MatrixCoordinate) -> TraceDirections {
        let MatrixCoordinate { column, row } = coordinate;
        debug_assert!(row < self.rows && column < self.columns.len());
        let words = &self.columns[column];

        if self.use_max_errors && row >= words.max_rows {
            return TraceDirections::NONE;
        }

        if row == 0 {
            return if self.semi_global || column == 0 {
                TraceDirections::NONE
            } else {
                TraceDirections::LEFT
            };
        }

        let index = (row - 1) / W::BITS;
        let offset = (row - 1) % W::BITS;
        let flag = |words: &[W], direction: TraceDirections| match words.get(index) {
            Some(word) if word.bit(offset) => direction,
            _ => TraceDirections::NONE,
        };

        flag(&words.left, TraceDirections::LEFT)
            | flag(&words.diagonal, TraceDirections::DIAGONAL)
            | flag(&words.up, TraceDirections::UP)
    }

    /// Traceback starting at `start`, resolving every cell on its own.
    pub fn trace_path(&self, start: MatrixCoordinate) -> DpResult<TracePath<'_, Self>> {
        trace_path(self, start)
    }
}

impl<W: TraceWord> TraceSource for EditDistanceTraceMatrixFull<W> {
    fn trace_dimensions(&self) -> (usize, usize) {
        (self.cols(), self.rows())
    }

    fn trace_at(&self, coordinate: MatrixCoordinate) -> TraceDirections {
        self.at(coordinate)
    }

    fn gap_model(&self) -> GapModel {
        GapModel::Linear
    }
}
