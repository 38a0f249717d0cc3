//! Global alignment scores of up to eight pairs at once, one pair per simd lane.
//!
//! Shorter sequences are padded at the end to the longest sequence of the
//! batch. The padding symbol scores as a match against anything, so with
//! `match >= mismatch` and `match >= 0` the padded optimum of a lane is its
//! true optimum plus one match per padding position both sequences share.

use wide::i32x8;

use super::config::{AlignConfig, FreeEndGaps, Symbol};
use super::pairwise::{check_score_range, compute_matrix};
use super::recursion::AffineRecursion;
use super::tracker::SimdOptimumTracker;
use crate::error::{DpError, DpResult};
use crate::matrix::ScoreMatrixSingleColumn;
use crate::score::{Score, SimdScore};

/// Pairs aligned per batch.
pub const LANES: usize = <i32x8 as SimdScore>::LANES;

const PADDING_SYMBOL: i32 = i32::MIN;

fn check_batch_config(config: &AlignConfig) -> DpResult<()> {
    let scoring = &config.scoring;
    let reason = if !config.free_end_gaps.is_global() {
        Some("vectorised alignment supports global alignment only")
    } else if config.band.is_some() {
        Some("vectorised alignment does not support bands")
    } else if !scoring.is_simple() {
        Some("vectorised alignment requires match/mismatch scoring")
    } else if scoring.match_score < scoring.mismatch_score || scoring.match_score < 0 {
        Some("vectorised alignment requires match >= mismatch and match >= 0")
    } else {
        None
    };
    match reason {
        Some(msg) => Err(DpError::InvalidScoring {
            msg: msg.to_string(),
        }),
        None => Ok(()),
    }
}

/// Symbols at `position` of every sequence of the batch, padded.
fn lane_symbols<T: Symbol>(batch: &[&[T]], position: usize) -> DpResult<i32x8> {
    let mut lanes = [PADDING_SYMBOL; LANES];
    for (slot, seq) in lanes.iter_mut().zip(batch) {
        if let Some(symbol) = seq.get(position) {
            let rank = symbol.rank();
            *slot = i32::try_from(rank).map_err(|_| DpError::ScoreOverflow {
                value: rank as i64,
            })?;
        }
    }
    Ok(i32x8::from(lanes))
}

/// Global alignment scores of `pairs`, in order.
///
/// Only the score is computed. At most [`LANES`] pairs are accepted.
pub fn align_global_batch<T: Symbol>(pairs: &[(&[T], &[T])], config: &AlignConfig) -> DpResult<Vec<i32>> {
    if pairs.len() > LANES {
        return Err(DpError::BatchSize {
            size: pairs.len(),
            lanes: LANES,
        });
    }
    if pairs.is_empty() {
        return Ok(Vec::new());
    }
    check_batch_config(config)?;

    let seq1_batch: Vec<&[T]> = pairs.iter().map(|&(seq1, _)| seq1).collect();
    let seq2_batch: Vec<&[T]> = pairs.iter().map(|&(_, seq2)| seq2).collect();
    let len1 = seq1_batch.iter().map(|s| s.len()).max().unwrap_or(0);
    let len2 = seq2_batch.iter().map(|s| s.len()).max().unwrap_or(0);
    check_score_range(config, len1, len2)?;
    log::debug!(
        "vectorised batch of {} pairs padded to {}x{}",
        pairs.len(),
        len1,
        len2
    );

    let mut tracker = SimdOptimumTracker::<i32x8>::new();
    tracker.initialise_tracker(&seq1_batch, &seq2_batch)?;

    let columns = (0..len1)
        .map(|i| lane_symbols(&seq1_batch, i))
        .collect::<DpResult<Vec<_>>>()?;
    let rows = (0..len2)
        .map(|j| lane_symbols(&seq2_batch, j))
        .collect::<DpResult<Vec<_>>>()?;

    let zero = i32x8::from_i32(0);
    let match_score = i32x8::from_i32(config.scoring.match_score);
    let mismatch_score = i32x8::from_i32(config.scoring.mismatch_score);
    let score = |i: usize, j: usize| {
        columns[i]
            .xor(rows[j])
            .lanes_gt(zero)
            .select(mismatch_score, match_score)
    };

    let recursion = AffineRecursion::<i32x8>::new(&config.gaps, &FreeEndGaps::none());
    let mut matrix = ScoreMatrixSingleColumn::<i32x8>::new();
    compute_matrix(&mut matrix, &recursion, len1, len2, score, &mut tracker)?;

    let optimum = tracker.optimum();
    Ok(tracker
        .padding_offsets()
        .iter()
        .enumerate()
        .map(|(lane, &offset)| optimum.lane(lane) - offset as i32 * config.scoring.match_score)
        .collect())
}
