//! Unit-cost edit distance with the bit-parallel algorithm of Myers, in the
//! formulation of Hyyrö.
//!
//! The first sequence runs along the columns, the second one along the rows.
//! Each column of vertical deltas is held as two bit vectors (`vp` for +1,
//! `vn` for -1) split into 64-bit words, so a column costs `O(n / 64)`.

use std::collections::HashMap;

use super::aligned_sequence::{AlignedSequence, Gapped};
use super::config::{EditDistanceConfig, OutputConfig, Symbol};
use super::pairwise::traceback;
use super::types::AlignmentResult;
use crate::error::{DpError, DpResult};
use crate::matrix::{EditDistanceTraceMatrixFull, MatrixCoordinate};

const WORD_BITS: usize = u64::BITS as usize;

/// Match masks of the second sequence, keyed by symbol rank.
struct PatternBitmasks {
    masks: HashMap<usize, Vec<u64>>,
    empty: Vec<u64>,
}

impl PatternBitmasks {
    fn new<T: Symbol>(pattern: &[T], words: usize) -> Self {
        let mut masks: HashMap<usize, Vec<u64>> = HashMap::new();
        for (row, symbol) in pattern.iter().enumerate() {
            let mask = masks
                .entry(symbol.rank())
                .or_insert_with(|| vec![0; words]);
            mask[row / WORD_BITS] |= 1 << (row % WORD_BITS);
        }
        Self {
            masks,
            empty: vec![0; words],
        }
    }

    fn get<T: Symbol>(&self, symbol: T) -> &[u64] {
        self.masks.get(&symbol.rank()).unwrap_or(&self.empty)
    }
}

/// Trace words of one column.
struct ColumnTrace {
    left: Vec<u64>,
    diagonal: Vec<u64>,
    up: Vec<u64>,
}

impl ColumnTrace {
    fn new(words: usize) -> Self {
        Self {
            left: vec![0; words],
            diagonal: vec![0; words],
            up: vec![0; words],
        }
    }
}

/// Vertical deltas of the current column.
struct BitVectorState {
    vp: Vec<u64>,
    vn: Vec<u64>,
    /// Horizontal delta entering row 0: 1 in global mode, 0 in semi-global.
    first_row_carry: u64,
    rows: usize,
}

impl BitVectorState {
    fn new(query_len: usize, words: usize, semi_global: bool) -> Self {
        Self {
            vp: vec![u64::MAX; words],
            vn: vec![0; words],
            first_row_carry: u64::from(!semi_global),
            rows: query_len + 1,
        }
    }

    /// Advances to the next column and returns the horizontal delta of the
    /// last row.
    fn advance(&mut self, eq: &[u64], trace: &mut ColumnTrace) -> i64 {
        let last_bit = self.rows.saturating_sub(2);
        let mut carry_d0 = false;
        let mut carry_hp = self.first_row_carry;
        let mut carry_hn = 0u64;
        let mut delta = 0;

        for (w, &b) in eq.iter().enumerate() {
            let vp = self.vp[w];
            let vn = self.vn[w];

            let x = b | vn;
            let (sum, c1) = vp.overflowing_add(x & vp);
            let (sum, c2) = sum.overflowing_add(u64::from(carry_d0));
            carry_d0 = c1 || c2;
            let d0 = (sum ^ vp) | x;
            let hn = vp & d0;
            let hp = vn | !(vp | d0);

            if w == last_bit / WORD_BITS {
                let offset = last_bit % WORD_BITS;
                delta = ((hp >> offset) & 1) as i64 - ((hn >> offset) & 1) as i64;
            }

            let x = (hp << 1) | carry_hp;
            carry_hp = hp >> (WORD_BITS - 1);
            self.vn[w] = x & d0;
            self.vp[w] = (hn << 1) | !(x | d0) | carry_hn;
            carry_hn = hn >> (WORD_BITS - 1);

            trace.left[w] = hp;
            trace.up[w] = self.vp[w];
            trace.diagonal[w] = b | !d0;
        }
        delta
    }

    /// One past the last row whose distance is at most `max_errors`, given the
    /// distance `top` of row 0.
    fn max_rows(&self, top: usize, max_errors: usize) -> usize {
        let mut value = top as i64;
        let mut last = (top <= max_errors).then_some(0);
        for row in 1..self.rows {
            let (w, offset) = ((row - 1) / WORD_BITS, (row - 1) % WORD_BITS);
            value += ((self.vp[w] >> offset) & 1) as i64 - ((self.vn[w] >> offset) & 1) as i64;
            if value <= max_errors as i64 {
                last = Some(row);
            }
        }
        last.map_or(0, |row| row + 1)
    }
}

/// Edit distance of `seq1` and `seq2` with owned gapped output.
///
/// Returns `Ok(None)` when a `max_errors` bound is set and exceeded.
pub fn edit_distance<T: Symbol>(
    seq1: &[T],
    seq2: &[T],
    config: &EditDistanceConfig,
) -> DpResult<Option<AlignmentResult<Vec<Gapped<T>>>>> {
    edit_distance_as(seq1, seq2, config)
}

/// Edit distance of `seq1` and `seq2`, building the aligned sequences as `A`.
///
/// The score of the result is the negated distance. In semi-global mode the
/// second sequence is placed anywhere inside the first one; of several equally
/// good end columns the last one is reported.
pub fn edit_distance_as<'a, T, A>(
    seq1: &'a [T],
    seq2: &'a [T],
    config: &EditDistanceConfig,
) -> DpResult<Option<AlignmentResult<A>>>
where
    T: Symbol,
    A: AlignedSequence<'a, Symbol = T>,
{
    let Some(run) = run_edit_distance(seq1, seq2, config)? else {
        return Ok(None);
    };
    let score = i32::try_from(run.distance).map_err(|_| DpError::ScoreOverflow {
        value: run.distance as i64,
    })?;
    match &run.trace {
        Some(trace) => traceback(trace, seq1, seq2, -score, run.end).map(Some),
        None => Ok(Some(AlignmentResult::score_only(-score, run.end))),
    }
}

/// Distance, end cell and, when an alignment is requested, the filled trace
/// matrix of one edit-distance computation.
pub(crate) struct EditDistanceRun {
    pub distance: usize,
    pub end: MatrixCoordinate,
    pub trace: Option<EditDistanceTraceMatrixFull<u64>>,
}

pub(crate) fn run_edit_distance<T: Symbol>(
    seq1: &[T],
    seq2: &[T],
    config: &EditDistanceConfig,
) -> DpResult<Option<EditDistanceRun>> {
    let query_len = seq2.len();
    let words = query_len.div_ceil(WORD_BITS);
    let bitmasks = PatternBitmasks::new(seq2, words);
    let mut state = BitVectorState::new(query_len, words, config.semi_global);

    let record_trace = config.output == OutputConfig::Alignment;
    let bounded_trace = record_trace && config.max_errors.is_some();
    let mut trace =
        EditDistanceTraceMatrixFull::<u64>::new(query_len + 1, config.semi_global, bounded_trace);
    if record_trace {
        trace.reserve(seq1.len() + 1)?;
        let first = ColumnTrace::new(words);
        let up = vec![u64::MAX; words];
        push_column(&mut trace, &state, first.left, first.diagonal, up, 0, config.max_errors)?;
    }

    let mut distance = query_len;
    let mut best = (distance, 0);
    for (column, &symbol) in seq1.iter().enumerate() {
        let column = column + 1;
        let mut words_out = ColumnTrace::new(words);
        let delta = state.advance(bitmasks.get(symbol), &mut words_out);
        distance = if query_len == 0 {
            if config.semi_global {
                0
            } else {
                column
            }
        } else {
            (distance as i64 + delta) as usize
        };
        if distance <= best.0 || !config.semi_global {
            best = (distance, column);
        }

        if record_trace {
            let top = if config.semi_global { 0 } else { column };
            let max_rows = push_column(
                &mut trace,
                &state,
                words_out.left,
                words_out.diagonal,
                words_out.up,
                top,
                config.max_errors,
            )?;
            if !config.semi_global && max_rows == 0 {
                log::debug!("edit distance: column {} exceeds the error bound", column);
                return Ok(exceeded(config));
            }
        }
    }

    let (distance, end_column) = best;
    if let Some(max_errors) = config.max_errors {
        if distance > max_errors {
            return Ok(exceeded(config));
        }
    }

    Ok(Some(EditDistanceRun {
        distance,
        end: MatrixCoordinate::new(end_column, query_len),
        trace: record_trace.then_some(trace),
    }))
}

fn push_column(
    trace: &mut EditDistanceTraceMatrixFull<u64>,
    state: &BitVectorState,
    left: Vec<u64>,
    diagonal: Vec<u64>,
    up: Vec<u64>,
    top: usize,
    max_errors: Option<usize>,
) -> DpResult<usize> {
    match max_errors {
        Some(max_errors) => {
            let max_rows = state.max_rows(top, max_errors);
            trace.add_column_bounded(left, diagonal, up, max_rows)?;
            Ok(max_rows)
        }
        None => {
            trace.add_column(left, diagonal, up)?;
            Ok(trace.rows())
        }
    }
}

fn exceeded<R>(config: &EditDistanceConfig) -> Option<R> {
    let max_errors = config.max_errors.unwrap_or_default();
    if config.semi_global {
        log::debug!("semi-global edit distance exceeds {} errors", max_errors);
    } else {
        log::warn!("global edit distance exceeds {} errors", max_errors);
    }
    None
}
