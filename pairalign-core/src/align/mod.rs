pub mod aligned_sequence;
pub mod banded;
pub mod config;
pub mod edit_distance;
#[cfg(feature = "simd")]
pub mod global_simd;
pub mod pairwise;
pub mod recursion;
pub mod tracker;
pub mod types;

pub use aligned_sequence::{
    AlignedPair, AlignedRanges, AlignedSequence, AlignedSequenceBuilder, GapDecorator, Gapped,
};
pub use banded::align_banded;
pub use config::{
    AlignConfig, Band, EditDistanceConfig, FreeEndGaps, GapScheme, OutputConfig, Scoring, Symbol,
};
pub use edit_distance::{edit_distance, edit_distance_as};
#[cfg(feature = "simd")]
pub use global_simd::align_global_batch;
pub use pairwise::{align_pairwise, align_pairwise_as, compute_matrix};
pub use recursion::{AffineRecursion, AffineTraceRecursion, Recursion};
pub use tracker::{OptimumTracker, SimdOptimumTracker, Tracker};
pub use types::{AlignmentResult, Cigar, CigarOp};

use crate::error::{DpError, DpResult};


/// Aligns every pair independently, in parallel with the `parallel` feature.
pub fn align_pairs<T: Symbol>(
    pairs: &[(&[T], &[T])],
    config: &AlignConfig,
) -> DpResult<Vec<AlignmentResult<Vec<Gapped<T>>>>> {
    log::debug!("aligning {} pairs", pairs.len());
    par_try_map!(pairs, |&(seq1, seq2)| align_pairwise(seq1, seq2, config))
}

/// Global alignment scores of any number of pairs, [`global_simd::LANES`]
/// pairs per vectorised batch.
#[cfg(feature = "simd")]
pub fn align_global_batches<T: Symbol>(
    pairs: &[(&[T], &[T])],
    config: &AlignConfig,
) -> DpResult<Vec<i32>> {
    let batches: Vec<&[(&[T], &[T])]> = pairs.chunks(global_simd::LANES).collect();
    let scores: DpResult<Vec<Vec<i32>>> =
        par_try_map!(batches, |batch| align_global_batch(batch, config));
    Ok(scores?.into_iter().flatten().collect())
}

/// Score of an alignment given as a CIGAR over `seq1` and `seq2` from their
/// starts, charging every gap as in a global alignment.
///
/// Fails if the CIGAR consumes more symbols than either sequence holds.
pub fn score_cigar<T: Symbol>(
    seq1: &[T],
    seq2: &[T],
    cigar: &Cigar,
    config: &AlignConfig,
) -> DpResult<i32> {
    let (consumed1, consumed2) = cigar.consumed();
    if consumed1 > seq1.len() || consumed2 > seq2.len() {
        return Err(DpError::CigarLength {
            consumed1,
            consumed2,
            len1: seq1.len(),
            len2: seq2.len(),
        });
    }
    let (mut i, mut j) = (0usize, 0usize);
    let mut score = 0;
    for &(op, len) in &cigar.ops {
        match op {
            CigarOp::Match => {
                for k in 0..len {
                    score += config.scoring.score(seq1[i + k], seq2[j + k]);
                }
                i += len;
                j += len;
            }
            CigarOp::Ins => {
                score += config.gaps.cost(len);
                i += len;
            }
            CigarOp::Del => {
                score += config.gaps.cost(len);
                j += len;
            }
        }
    }
    Ok(score)
}
