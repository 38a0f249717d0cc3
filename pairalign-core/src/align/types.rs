use super::aligned_sequence::{AlignedPair, AlignedRanges};
use crate::matrix::MatrixCoordinate;

/// CIGAR operations consume sequence coordinates.
/// Ins consumes the first sequence (gap in the second), Del consumes the
/// second sequence (gap in the first).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CigarOp {
    /// Consumes both sequences.
    Match,
    /// Consumes the first sequence, gap in the second.
    Ins,
    /// Consumes the second sequence, gap in the first.
    Del,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Cigar {
    pub ops: Vec<(CigarOp, usize)>,
}

impl Cigar {
    pub fn push(&mut self, op: CigarOp, len: usize) {
        if len == 0 {
            return;
        }
        if let Some((last_op, last_len)) = self.ops.last_mut() {
            if *last_op == op {
                *last_len += len;
                return;
            }
        }
        self.ops.push((op, len));
    }

    pub fn len(&self) -> usize {
        self.ops.iter().map(|(_, n)| *n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of symbols of `(first, second)` the operations consume.
    pub fn consumed(&self) -> (usize, usize) {
        self.ops
            .iter()
            .fold((0, 0), |(first, second), &(op, len)| match op {
                CigarOp::Match => (first + len, second + len),
                CigarOp::Ins => (first + len, second),
                CigarOp::Del => (first, second + len),
            })
    }
}

impl std::fmt::Display for Cigar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (op, len) in &self.ops {
            let symbol = match op {
                CigarOp::Match => 'M',
                CigarOp::Ins => 'I',
                CigarOp::Del => 'D',
            };
            write!(f, "{len}{symbol}")?;
        }
        Ok(())
    }
}

/// Outcome of a pairwise alignment.
///
/// Coordinates are matrix coordinates: `column` counts symbols of the first
/// sequence, `row` symbols of the second one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignmentResult<A> {
    pub score: i32,
    pub end: MatrixCoordinate,
    pub begin: Option<MatrixCoordinate>,
    pub alignment: Option<AlignedPair<A>>,
    pub ranges: Option<AlignedRanges>,
}

impl<A> AlignmentResult<A> {
    pub(crate) fn score_only(score: i32, end: MatrixCoordinate) -> Self {
        Self {
            score,
            end,
            begin: None,
            alignment: None,
            ranges: None,
        }
    }
}
