//! Cell recursions of affine gap alignment.
//!
//! A recursion turns the predecessor of a cell (left neighbour's best and
//! horizontal values, vertical value carried from the cell above) into the
//! cell's own values. Gap costs are charged when a gap value is passed on, so
//! a stored horizontal or vertical value is already the candidate for the
//! neighbour to the right or below.

use super::config::{FreeEndGaps, GapScheme};
use crate::matrix::{AffineCell, ScoreCell, ScoreTraceCell, TraceDirections};
use crate::score::Score;

pub trait Recursion {
    type Score: Score;
    type Cell: Copy;

    /// Cell `(0, 0)`.
    fn origin(&self) -> Self::Cell;

    /// Cell on row 0 right of the origin.
    fn first_row(&self, prev: Self::Cell) -> Self::Cell;

    /// Cell in column 0 below the origin.
    fn first_column(&self, prev: Self::Cell) -> Self::Cell;

    /// Any other cell; `diagonal` is the best score of the upper-left neighbour.
    fn inner(&self, diagonal: Self::Score, prev: Self::Cell, score: Self::Score) -> Self::Cell;

    fn best(cell: &Self::Cell) -> Self::Score;
}

/// Score-only affine recursion, scalar or lane-wise.
#[derive(Clone, Copy, Debug)]
pub struct AffineRecursion<S> {
    gap_open: S,
    gap_extension: S,
    first_row_free: bool,
    first_column_free: bool,
}

impl<S: Score> AffineRecursion<S> {
    pub fn new(gaps: &GapScheme, free_end_gaps: &FreeEndGaps) -> Self {
        Self {
            gap_open: S::from_i32(gaps.first_gap()),
            gap_extension: S::from_i32(gaps.extension),
            first_row_free: free_end_gaps.seq1_leading,
            first_column_free: free_end_gaps.seq2_leading,
        }
    }
}

impl<S: Score> Recursion for AffineRecursion<S> {
    type Score = S;
    type Cell = ScoreCell<S>;

    fn origin(&self) -> ScoreCell<S> {
        let zero = S::from_i32(0);
        let horizontal = if self.first_row_free { zero } else { self.gap_open };
        let vertical = if self.first_column_free { zero } else { self.gap_open };
        AffineCell((zero, horizontal, vertical))
    }

    #[inline]
    fn first_row(&self, prev: ScoreCell<S>) -> ScoreCell<S> {
        let best = prev.into_horizontal();
        let horizontal = if self.first_row_free {
            best
        } else {
            best + self.gap_extension
        };
        AffineCell((best, horizontal, best + self.gap_open))
    }

    #[inline]
    fn first_column(&self, prev: ScoreCell<S>) -> ScoreCell<S> {
        let best = prev.into_vertical();
        let vertical = if self.first_column_free {
            best
        } else {
            best + self.gap_extension
        };
        AffineCell((best, best + self.gap_open, vertical))
    }

    #[inline]
    fn inner(&self, diagonal: S, prev: ScoreCell<S>, score: S) -> ScoreCell<S> {
        let (_, horizontal, vertical) = prev.into_inner();
        let best = (diagonal + score).max_score(vertical).max_score(horizontal);
        let open = best + self.gap_open;
        AffineCell((
            best,
            (horizontal + self.gap_extension).max_score(open),
            (vertical + self.gap_extension).max_score(open),
        ))
    }

    #[inline]
    fn best(cell: &ScoreCell<S>) -> S {
        *cell.best()
    }
}

/// Affine recursion that also records trace directions.
#[derive(Clone, Copy, Debug)]
pub struct AffineTraceRecursion<S> {
    scores: AffineRecursion<S>,
}

impl<S: Score + Ord> AffineTraceRecursion<S> {
    pub fn new(gaps: &GapScheme, free_end_gaps: &FreeEndGaps) -> Self {
        Self {
            scores: AffineRecursion::new(gaps, free_end_gaps),
        }
    }
}

impl<S: Score + Ord> Recursion for AffineTraceRecursion<S> {
    type Score = S;
    type Cell = ScoreTraceCell<S>;

    fn origin(&self) -> ScoreTraceCell<S> {
        self.scores.origin().with_trace((
            TraceDirections::NONE,
            TraceDirections::LEFT_OPEN,
            TraceDirections::UP_OPEN,
        ))
    }

    fn first_row(&self, prev: ScoreTraceCell<S>) -> ScoreTraceCell<S> {
        let (scores, traces) = prev.split();
        let (_, horizontal_trace, _) = traces.into_inner();
        let best_trace = if self.scores.first_row_free {
            TraceDirections::NONE
        } else {
            TraceDirections::LEFT | (horizontal_trace & TraceDirections::LEFT_OPEN)
        };
        self.scores.first_row(scores).with_trace((
            best_trace,
            TraceDirections::LEFT,
            TraceDirections::UP_OPEN,
        ))
    }

    fn first_column(&self, prev: ScoreTraceCell<S>) -> ScoreTraceCell<S> {
        let (scores, traces) = prev.split();
        let (_, _, vertical_trace) = traces.into_inner();
        let best_trace = if self.scores.first_column_free {
            TraceDirections::NONE
        } else {
            TraceDirections::UP | (vertical_trace & TraceDirections::UP_OPEN)
        };
        self.scores.first_column(scores).with_trace((
            best_trace,
            TraceDirections::LEFT_OPEN,
            TraceDirections::UP,
        ))
    }

    #[inline]
    fn inner(&self, diagonal: S, prev: ScoreTraceCell<S>, score: S) -> ScoreTraceCell<S> {
        let ((_, horizontal, vertical), (_, horizontal_trace, vertical_trace)) = prev.into_inner();
        let from_diagonal = diagonal + score;
        let best = from_diagonal.max(vertical).max(horizontal);

        let mut best_trace = (vertical_trace & TraceDirections::UP_OPEN)
            | (horizontal_trace & TraceDirections::LEFT_OPEN);
        if from_diagonal == best {
            best_trace |= TraceDirections::DIAGONAL;
        }
        if vertical == best {
            best_trace |= TraceDirections::UP;
        }
        if horizontal == best {
            best_trace |= TraceDirections::LEFT;
        }

        let open = best + self.scores.gap_open;
        let horizontal = horizontal + self.scores.gap_extension;
        let vertical = vertical + self.scores.gap_extension;
        let (next_horizontal, next_horizontal_trace) = if open >= horizontal {
            (open, TraceDirections::LEFT_OPEN)
        } else {
            (horizontal, TraceDirections::LEFT)
        };
        let (next_vertical, next_vertical_trace) = if open >= vertical {
            (open, TraceDirections::UP_OPEN)
        } else {
            (vertical, TraceDirections::UP)
        };

        AffineCell((
            (best, next_horizontal, next_vertical),
            (best_trace, next_horizontal_trace, next_vertical_trace),
        ))
    }

    #[inline]
    fn best(cell: &ScoreTraceCell<S>) -> S {
        *cell.best()
    }
}
