use std::iter::FusedIterator;

use super::coordinate::MatrixCoordinate;
use super::trace_directions::TraceDirections;
use super::two_dimensional::TwoDimensionalMatrix;
use crate::error::{DpError, DpResult};

/// How a traceback follows gaps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GapModel {
    /// Every cell is resolved on its own.
    Linear,
    /// A gap is followed until the cell where it was opened.
    Affine,
}

/// Random access to stored trace directions.
pub trait TraceSource {
    /// `(columns, rows)` of the stored matrix.
    fn trace_dimensions(&self) -> (usize, usize);

    /// Directions stored at `coordinate`, which lies inside the matrix.
    fn trace_at(&self, coordinate: MatrixCoordinate) -> TraceDirections;

    fn gap_model(&self) -> GapModel;
}

/// A traceback that reports where it currently is.
pub trait TracebackPath: Iterator<Item = TraceDirections> {
    /// The cell the next move starts from; after exhaustion, the cell where
    /// the path ended.
    fn coordinate(&self) -> MatrixCoordinate;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Resolve,
    Up,
    Left,
    Done,
}

/// Lazy traceback from a start cell towards the origin.
///
/// Yields one resolved move per step and stops at the first cell without a
/// predecessor, which is not yielded.
#[derive(Clone, Debug)]
pub struct TracePath<'m, M: ?Sized> {
    matrix: &'m M,
    coordinate: MatrixCoordinate,
    state: State,
}

/// Starts a traceback at `start`.
pub fn trace_path<M: TraceSource + ?Sized>(
    matrix: &M,
    start: MatrixCoordinate,
) -> DpResult<TracePath<'_, M>> {
    let (columns, rows) = matrix.trace_dimensions();
    if start.column >= columns || start.row >= rows {
        return Err(DpError::CoordinateOutOfBounds {
            column: start.column,
            row: start.row,
            columns,
            rows,
        });
    }
    Ok(TracePath {
        matrix,
        coordinate: start,
        state: State::Resolve,
    })
}

impl<M: TraceSource + ?Sized> TracePath<'_, M> {
    fn step(&mut self, direction: TraceDirections, flags: TraceDirections) {
        let affine = self.matrix.gap_model() == GapModel::Affine;
        let c = &mut self.coordinate;
        match direction {
            TraceDirections::DIAGONAL => {
                c.column = c.column.saturating_sub(1);
                c.row = c.row.saturating_sub(1);
                self.state = State::Resolve;
            }
            TraceDirections::UP => {
                let opened = !affine || flags.contains(TraceDirections::UP_OPEN);
                c.row = c.row.saturating_sub(1);
                self.state = if opened { State::Resolve } else { State::Up };
            }
            _ => {
                let opened = !affine || flags.contains(TraceDirections::LEFT_OPEN);
                c.column = c.column.saturating_sub(1);
                self.state = if opened { State::Resolve } else { State::Left };
            }
        }
    }
}

impl<M: TraceSource + ?Sized> TracebackPath for TracePath<'_, M> {
    fn coordinate(&self) -> MatrixCoordinate {
        self.coordinate
    }
}

impl<M: TraceSource + ?Sized> Iterator for TracePath<'_, M> {
    type Item = TraceDirections;

    fn next(&mut self) -> Option<TraceDirections> {
        loop {
            let c = self.coordinate;
            let direction = match self.state {
                State::Done => return None,
                State::Resolve => {
                    let direction = self.matrix.trace_at(c).resolve();
                    if direction.is_none() {
                        self.state = State::Done;
                        return None;
                    }
                    direction
                }
                // A gap can not run past the border; resolve the border cell.
                State::Up if c.row == 0 => {
                    self.state = State::Resolve;
                    continue;
                }
                State::Left if c.column == 0 => {
                    self.state = State::Resolve;
                    continue;
                }
                State::Up => TraceDirections::UP,
                State::Left => TraceDirections::LEFT,
            };
            let flags = self.matrix.trace_at(c);
            self.step(direction, flags);
            return Some(direction);
        }
    }
}

impl<M: TraceSource + ?Sized> FusedIterator for TracePath<'_, M> {}

/// A plain matrix of directions is read with affine gap semantics.
impl TraceSource for TwoDimensionalMatrix<TraceDirections> {
    fn trace_dimensions(&self) -> (usize, usize) {
        (self.columns(), self.rows())
    }

    fn trace_at(&self, coordinate: MatrixCoordinate) -> TraceDirections {
        self.get(coordinate.row, coordinate.column)
            .copied()
            .unwrap_or(TraceDirections::NONE)
    }

    fn gap_model(&self) -> GapModel {
        GapModel::Affine
    }
}
