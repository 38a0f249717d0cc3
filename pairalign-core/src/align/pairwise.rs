//! Column-wise driver of the affine alignment recursion.

use super::aligned_sequence::{AlignedSequence, AlignedSequenceBuilder, Gapped};
use super::banded::align_banded;
use super::config::{AlignConfig, OutputConfig, Symbol};
use super::recursion::{AffineRecursion, AffineTraceRecursion, Recursion};
use super::tracker::{OptimumTracker, Tracker};
use super::types::AlignmentResult;
use crate::error::{DpError, DpResult};
use crate::matrix::{
    AlignmentMatrix, ColumnCursor, CombinedScoreTraceMatrix, MatrixColumn, MatrixCoordinate,
    ScoreMatrixSingleColumn, TraceMatrixFull, TraceSource,
};
use crate::score::Score;

/// Fills `matrix` for sequences of `seq1_len` columns and `seq2_len` rows.
///
/// `score(i, j)` is the substitution score of `seq1[i]` against `seq2[j]`.
/// Every computed cell of the last column and the last computed cell of each
/// column reaching the last row are handed to `tracker`.
pub fn compute_matrix<M, R, F, K>(
    matrix: &mut M,
    recursion: &R,
    seq1_len: usize,
    seq2_len: usize,
    score: F,
    tracker: &mut K,
) -> DpResult<()>
where
    M: AlignmentMatrix<Cell = R::Cell>,
    R: Recursion,
    F: Fn(usize, usize) -> R::Score,
    K: Tracker<R::Score>,
{
    matrix.resize(seq1_len + 1, seq2_len + 1)?;
    let last_column = seq1_len;
    let mut cursor = ColumnCursor::new(matrix);

    while let Some(mut column) = cursor.next_column() {
        let column_index = column.column_index();
        let mut diagonal = column.leading_diagonal().map(|cell| R::best(&cell));
        let mut last = None;

        for (offset, coordinate) in column.coordinates().enumerate() {
            let coordinate = MatrixCoordinate::from(coordinate);
            let prev = column.predecessor(offset);
            let cell = match (coordinate.column, coordinate.row) {
                (0, 0) => recursion.origin(),
                (0, _) => recursion.first_column(prev),
                (_, 0) => recursion.first_row(prev),
                (c, r) => recursion.inner(
                    diagonal.unwrap_or_else(<R::Score as Score>::neg_infinity),
                    prev,
                    score(c - 1, r - 1),
                ),
            };
            diagonal = Some(R::best(&prev));
            column.store(offset, cell);

            let best = R::best(&cell);
            if column_index == last_column {
                tracker.track(coordinate, best);
            }
            last = Some((coordinate, best));
        }

        if column_index != last_column && column.touches_last_row() {
            if let Some((coordinate, best)) = last {
                tracker.track(coordinate, best);
            }
        }
    }
    Ok(())
}

/// Rejects inputs whose scores could leave the `i32` range.
pub(crate) fn check_score_range(config: &AlignConfig, seq1_len: usize, seq2_len: usize) -> DpResult<()> {
    let per_column = config.scoring.max_abs_score() as i64
        + config.gaps.open.unsigned_abs() as i64
        + config.gaps.extension.unsigned_abs() as i64;
    let bound = per_column.saturating_mul((seq1_len + seq2_len + 1) as i64);
    if bound > (i32::MAX / 4) as i64 {
        return Err(DpError::ScoreOverflow { value: bound });
    }
    Ok(())
}

/// Aligns `seq1` against `seq2` with owned gapped output.
pub fn align_pairwise<T: Symbol>(
    seq1: &[T],
    seq2: &[T],
    config: &AlignConfig,
) -> DpResult<AlignmentResult<Vec<Gapped<T>>>> {
    align_pairwise_as(seq1, seq2, config)
}

/// Aligns `seq1` against `seq2`, building the aligned sequences as `A`.
pub fn align_pairwise_as<'a, T, A>(
    seq1: &'a [T],
    seq2: &'a [T],
    config: &AlignConfig,
) -> DpResult<AlignmentResult<A>>
where
    T: Symbol,
    A: AlignedSequence<'a, Symbol = T>,
{
    if let Some(band) = config.band {
        return align_banded(seq1, seq2, band, config);
    }
    check_score_range(config, seq1.len(), seq2.len())?;

    let score = |i: usize, j: usize| config.scoring.score(seq1[i], seq2[j]);
    let mut tracker = OptimumTracker::<i32>::new(seq1.len() + 1, seq2.len() + 1, &config.free_end_gaps);

    match config.output {
        OutputConfig::ScoreOnly => {
            let recursion = AffineRecursion::<i32>::new(&config.gaps, &config.free_end_gaps);
            let mut matrix = ScoreMatrixSingleColumn::<i32>::new();
            compute_matrix(&mut matrix, &recursion, seq1.len(), seq2.len(), score, &mut tracker)?;
            Ok(AlignmentResult::score_only(tracker.optimum(), tracker.coordinate()))
        }
        OutputConfig::Alignment => {
            let recursion = AffineTraceRecursion::<i32>::new(&config.gaps, &config.free_end_gaps);
            let mut matrix =
                CombinedScoreTraceMatrix::new(ScoreMatrixSingleColumn::<i32>::new(), TraceMatrixFull::new());
            compute_matrix(&mut matrix, &recursion, seq1.len(), seq2.len(), score, &mut tracker)?;
            let (_, traces) = matrix.into_parts();
            traceback(&traces, seq1, seq2, tracker.optimum(), tracker.coordinate())
        }
    }
}

/// Traces back from `end` and builds the alignment result.
pub(crate) fn traceback<'a, T, A, M>(
    traces: &M,
    seq1: &'a [T],
    seq2: &'a [T],
    score: i32,
    end: MatrixCoordinate,
) -> DpResult<AlignmentResult<A>>
where
    T: Copy,
    A: AlignedSequence<'a, Symbol = T>,
    M: TraceSource,
{
    let path = crate::matrix::trace_path(traces, end)?;
    let (alignment, ranges) = AlignedSequenceBuilder::new(seq1, seq2).build::<A, _>(path);
    Ok(AlignmentResult {
        score,
        end,
        begin: Some(MatrixCoordinate::new(ranges.seq1.start, ranges.seq2.start)),
        alignment: Some(alignment),
        ranges: Some(ranges),
    })
}
