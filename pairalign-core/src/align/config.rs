use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{DpError, DpResult};
pub use crate::matrix::Band;

/// A sequence symbol with a dense rank used to index scoring matrices.
pub trait Symbol: Copy + Eq + Hash + Debug + Send + Sync {
    fn rank(self) -> usize;
}

impl Symbol for u8 {
    #[inline]
    fn rank(self) -> usize {
        self as usize
    }
}

impl Symbol for u16 {
    #[inline]
    fn rank(self) -> usize {
        self as usize
    }
}

impl Symbol for char {
    #[inline]
    fn rank(self) -> usize {
        self as usize
    }
}

/// Substitution scores: either match/mismatch or a square matrix indexed by
/// symbol rank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scoring {
    pub match_score: i32,
    pub mismatch_score: i32,
    pub matrix: Option<Vec<i32>>,
    pub alphabet_size: Option<usize>,
}

impl Scoring {
    pub fn simple(match_score: i32, mismatch_score: i32) -> Self {
        Self {
            match_score,
            mismatch_score,
            matrix: None,
            alphabet_size: None,
        }
    }

    /// Row-major `alphabet_size x alphabet_size` matrix.
    pub fn with_matrix(matrix: Vec<i32>, alphabet_size: usize) -> DpResult<Self> {
        if matrix.len() != alphabet_size * alphabet_size {
            return Err(DpError::InvalidScoring {
                msg: format!(
                    "matrix has {} entries, expected {} for an alphabet of {}",
                    matrix.len(),
                    alphabet_size * alphabet_size,
                    alphabet_size
                ),
            });
        }
        Ok(Self {
            match_score: 0,
            mismatch_score: 0,
            matrix: Some(matrix),
            alphabet_size: Some(alphabet_size),
        })
    }

    #[inline]
    pub fn is_simple(&self) -> bool {
        self.matrix.is_none()
    }

    /// Score of aligning `a` against `b`. Symbols outside the matrix alphabet
    /// score as a mismatch of the matrix minimum.
    #[inline]
    pub fn score<T: Symbol>(&self, a: T, b: T) -> i32 {
        match (&self.matrix, self.alphabet_size) {
            (Some(matrix), Some(alpha)) => {
                let (ra, rb) = (a.rank(), b.rank());
                if ra < alpha && rb < alpha {
                    matrix[ra * alpha + rb]
                } else {
                    matrix.iter().copied().min().unwrap_or(0)
                }
            }
            _ if a == b => self.match_score,
            _ => self.mismatch_score,
        }
    }

    pub fn max_abs_score(&self) -> u32 {
        let mut max_abs = self
            .match_score
            .unsigned_abs()
            .max(self.mismatch_score.unsigned_abs());
        if let Some(matrix) = &self.matrix {
            for &v in matrix {
                max_abs = max_abs.max(v.unsigned_abs());
            }
        }
        max_abs
    }
}

/// Affine gap costs. A gap of length `k` costs `open + k * extension`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GapScheme {
    pub open: i32,
    pub extension: i32,
}

impl GapScheme {
    pub fn affine(open: i32, extension: i32) -> DpResult<Self> {
        if open > 0 || extension > 0 {
            return Err(DpError::InvalidScoring {
                msg: format!("gap costs must be <= 0, got open {open} and extension {extension}"),
            });
        }
        Ok(Self { open, extension })
    }

    pub fn linear(extension: i32) -> DpResult<Self> {
        Self::affine(0, extension)
    }

    /// Cost of the first gap position.
    #[inline]
    pub fn first_gap(&self) -> i32 {
        self.open + self.extension
    }

    /// Cost of a gap of `len` positions.
    pub fn cost(&self, len: usize) -> i32 {
        if len == 0 {
            0
        } else {
            self.open + self.extension * len as i32
        }
    }
}

/// Which end gaps are not charged.
///
/// `seq1_leading` frees the first matrix row (a prefix of the first sequence
/// is skipped), `seq1_trailing` lets the alignment end anywhere on the last
/// row. The `seq2_*` flags do the same for the first and last column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FreeEndGaps {
    pub seq1_leading: bool,
    pub seq1_trailing: bool,
    pub seq2_leading: bool,
    pub seq2_trailing: bool,
}

impl FreeEndGaps {
    /// Global alignment.
    pub fn none() -> Self {
        Self::default()
    }

    /// Overlap alignment: every end gap is free.
    pub fn all() -> Self {
        Self {
            seq1_leading: true,
            seq1_trailing: true,
            seq2_leading: true,
            seq2_trailing: true,
        }
    }

    /// The second sequence is placed anywhere inside the first one.
    pub fn semi_global() -> Self {
        Self {
            seq1_leading: true,
            seq1_trailing: true,
            ..Self::default()
        }
    }

    pub fn is_global(&self) -> bool {
        *self == Self::none()
    }
}

/// What an alignment call computes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputConfig {
    /// Score and end coordinate only, in linear memory.
    ScoreOnly,
    /// Score, both coordinates and the aligned sequences.
    #[default]
    Alignment,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignConfig {
    pub scoring: Scoring,
    pub gaps: GapScheme,
    pub free_end_gaps: FreeEndGaps,
    pub band: Option<Band>,
    pub output: OutputConfig,
}

impl AlignConfig {
    pub fn new(scoring: Scoring, gaps: GapScheme) -> Self {
        Self {
            scoring,
            gaps,
            free_end_gaps: FreeEndGaps::none(),
            band: None,
            output: OutputConfig::default(),
        }
    }

    pub fn with_free_end_gaps(mut self, free_end_gaps: FreeEndGaps) -> Self {
        self.free_end_gaps = free_end_gaps;
        self
    }

    pub fn with_band(mut self, band: Band) -> Self {
        self.band = Some(band);
        self
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }
}

/// Unit-cost edit distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditDistanceConfig {
    /// Free leading and trailing gaps in the first sequence.
    pub semi_global: bool,
    /// Give up once the distance exceeds this bound.
    pub max_errors: Option<usize>,
    pub output: OutputConfig,
}

impl EditDistanceConfig {
    pub fn global() -> Self {
        Self::default()
    }

    pub fn semi_global() -> Self {
        Self {
            semi_global: true,
            ..Self::default()
        }
    }

    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = Some(max_errors);
        self
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }
}
