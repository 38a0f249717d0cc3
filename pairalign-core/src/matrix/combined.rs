use super::cell::{AffineCell, ScoreCell, ScoreTraceCell, TraceCell};
use super::coordinate::{CoordinateRange, MatrixCoordinate, RowAxis};
use super::trace_directions::TraceDirections;
use super::trace_path::{trace_path, TracePath, TraceSource};
use super::{AlignmentMatrix, MatrixColumn};
use crate::error::DpResult;
use crate::score::Score;

/// Column of a [`CombinedScoreTraceMatrix`]: the score and trace columns
/// advanced in lockstep.
pub struct CombinedColumn<SC, TC> {
    score: SC,
    trace: TC,
}

impl<S, SC, TC> MatrixColumn for CombinedColumn<SC, TC>
where
    S: Score,
    SC: MatrixColumn<Cell = ScoreCell<S>>,
    TC: MatrixColumn<Cell = TraceCell>,
{
    type Cell = ScoreTraceCell<S>;

    #[inline]
    fn column_index(&self) -> usize {
        self.score.column_index()
    }

    #[inline]
    fn len(&self) -> usize {
        debug_assert_eq!(self.score.len(), self.trace.len());
        self.score.len()
    }

    fn coordinates(&self) -> CoordinateRange<RowAxis> {
        self.score.coordinates()
    }

    #[inline]
    fn predecessor(&self, offset: usize) -> ScoreTraceCell<S> {
        let score = self.score.predecessor(offset);
        let trace = self.trace.predecessor(offset);
        score.with_trace(trace.into_inner())
    }

    fn leading_diagonal(&self) -> Option<ScoreTraceCell<S>> {
        let none = (TraceDirections::NONE, TraceDirections::NONE, TraceDirections::NONE);
        let trace = self.trace.leading_diagonal().map_or(none, AffineCell::into_inner);
        self.score
            .leading_diagonal()
            .map(|score| score.with_trace(trace))
    }

    #[inline]
    fn store(&mut self, offset: usize, cell: ScoreTraceCell<S>) {
        let (score, trace) = cell.split();
        self.score.store(offset, score);
        self.trace.store(offset, trace);
    }

    fn touches_last_row(&self) -> bool {
        self.score.touches_last_row()
    }
}

/// A score matrix and a trace matrix seen as one matrix of score-and-trace
/// cells. Both parts always have the same dimensions.
#[derive(Clone, Debug, Default)]
pub struct CombinedScoreTraceMatrix<SM, TM> {
    score: SM,
    trace: TM,
}

impl<SM, TM> CombinedScoreTraceMatrix<SM, TM> {
    pub fn new(score: SM, trace: TM) -> Self {
        Self { score, trace }
    }

    pub fn score_matrix(&self) -> &SM {
        &self.score
    }

    pub fn trace_matrix(&self) -> &TM {
        &self.trace
    }

    pub fn into_parts(self) -> (SM, TM) {
        (self.score, self.trace)
    }

    /// Traceback through the trace part.
    pub fn trace_path(&self, start: MatrixCoordinate) -> DpResult<TracePath<'_, TM>>
    where
        TM: TraceSource,
    {
        trace_path(&self.trace, start)
    }
}

impl<S, SM, TM> AlignmentMatrix for CombinedScoreTraceMatrix<SM, TM>
where
    S: Score,
    SM: AlignmentMatrix<Cell = ScoreCell<S>>,
    TM: AlignmentMatrix<Cell = TraceCell>,
{
    type Cell = ScoreTraceCell<S>;
    type Column<'a> = CombinedColumn<SM::Column<'a>, TM::Column<'a>> where Self: 'a;

    fn column_count(&self) -> usize {
        debug_assert_eq!(self.score.column_count(), self.trace.column_count());
        self.score.column_count()
    }

    fn row_count(&self) -> usize {
        self.score.row_count()
    }

    fn resize(&mut self, column_count: usize, row_count: usize) -> DpResult<()> {
        self.score.resize(column_count, row_count)?;
        self.trace.resize(column_count, row_count)
    }

    fn column_position(&self) -> usize {
        self.score.column_position()
    }

    fn current_column(&mut self) -> Self::Column<'_> {
        CombinedColumn {
            score: self.score.current_column(),
            trace: self.trace.current_column(),
        }
    }

    fn go_next_column(&mut self) {
        self.score.go_next_column();
        self.trace.go_next_column();
    }
}
