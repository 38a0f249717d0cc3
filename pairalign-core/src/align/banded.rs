//! Banded alignment: only cells on the diagonals of a band are computed.

use super::aligned_sequence::AlignedSequence;
use super::config::{AlignConfig, Band, OutputConfig, Symbol};
use super::pairwise::{check_score_range, compute_matrix, traceback};
use super::recursion::{AffineRecursion, AffineTraceRecursion};
use super::tracker::OptimumTracker;
use super::types::AlignmentResult;
use crate::error::DpResult;
use crate::matrix::{
    trim_sequences, BandTrim, BandedScoreMatrix, BandedTraceMatrix, CombinedScoreTraceMatrix,
};

/// Aligns `seq1` against `seq2` inside `band`.
///
/// The sequences are first trimmed to the part the band spans from corner to
/// corner; prefixes and suffixes cut off this way are not scored. Returned
/// coordinates refer to the untrimmed sequences.
pub fn align_banded<'a, T, A>(
    seq1: &'a [T],
    seq2: &'a [T],
    band: Band,
    config: &AlignConfig,
) -> DpResult<AlignmentResult<A>>
where
    T: Symbol,
    A: AlignedSequence<'a, Symbol = T>,
{
    let trim = trim_sequences(seq1, seq2, band)?;
    let trimmed1 = &seq1[trim.seq1.clone()];
    let trimmed2 = &seq2[trim.seq2.clone()];
    check_score_range(config, trimmed1.len(), trimmed2.len())?;

    let score = |i: usize, j: usize| config.scoring.score(trimmed1[i], trimmed2[j]);
    let mut tracker = OptimumTracker::<i32>::new(
        trimmed1.len() + 1,
        trimmed2.len() + 1,
        &config.free_end_gaps,
    );

    let result = match config.output {
        OutputConfig::ScoreOnly => {
            let recursion = AffineRecursion::<i32>::new(&config.gaps, &config.free_end_gaps);
            let mut matrix = BandedScoreMatrix::<i32>::new(trim.band);
            compute_matrix(&mut matrix, &recursion, trimmed1.len(), trimmed2.len(), score, &mut tracker)?;
            AlignmentResult::score_only(tracker.optimum(), tracker.coordinate())
        }
        OutputConfig::Alignment => {
            let recursion = AffineTraceRecursion::<i32>::new(&config.gaps, &config.free_end_gaps);
            let mut matrix = CombinedScoreTraceMatrix::new(
                BandedScoreMatrix::<i32>::new(trim.band),
                BandedTraceMatrix::new(trim.band),
            );
            compute_matrix(&mut matrix, &recursion, trimmed1.len(), trimmed2.len(), score, &mut tracker)?;
            let (_, traces) = matrix.into_parts();
            traceback(&traces, trimmed1, trimmed2, tracker.optimum(), tracker.coordinate())?
        }
    };
    Ok(untrim(result, &trim))
}

fn untrim<A>(mut result: AlignmentResult<A>, trim: &BandTrim) -> AlignmentResult<A> {
    result.end = trim.to_original(result.end);
    result.begin = result.begin.map(|begin| trim.to_original(begin));
    if let Some(ranges) = result.ranges.as_mut() {
        let (offset1, offset2) = (trim.seq1.start, trim.seq2.start);
        ranges.seq1 = ranges.seq1.start + offset1..ranges.seq1.end + offset1;
        ranges.seq2 = ranges.seq2.start + offset2..ranges.seq2.end + offset2;
    }
    result
}
