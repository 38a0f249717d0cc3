//! Gapped sequences and their reconstruction from a traceback.

use std::ops::Range;

use super::types::{Cigar, CigarOp};
use crate::matrix::{TraceDirections, TracebackPath};

/// One column of an aligned sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gapped<T> {
    Symbol(T),
    Gap,
}

impl<T: Copy> Gapped<T> {
    #[inline]
    pub fn is_gap(&self) -> bool {
        matches!(self, Gapped::Gap)
    }

    #[inline]
    pub fn symbol(&self) -> Option<T> {
        match self {
            Gapped::Symbol(s) => Some(*s),
            Gapped::Gap => None,
        }
    }
}

/// A sequence into which gaps can be inserted.
pub trait AlignedSequence<'a>: Sized {
    type Symbol: Copy + 'a;

    /// Ungapped sequence over `slice`.
    fn from_slice(slice: &'a [Self::Symbol]) -> Self;

    /// Inserts `count` gaps before aligned position `position`.
    fn insert_gaps(&mut self, position: usize, count: usize);

    /// Length including gaps.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<Gapped<Self::Symbol>>;

    fn to_gapped(&self) -> Vec<Gapped<Self::Symbol>> {
        (0..self.len()).filter_map(|i| self.get(i)).collect()
    }

    /// Symbols without gaps.
    fn ungapped(&self) -> Vec<Self::Symbol> {
        (0..self.len())
            .filter_map(|i| self.get(i).and_then(|g| g.symbol()))
            .collect()
    }

    /// Renders the sequence with `gap` for gap columns.
    fn render(&self, gap: char) -> String
    where
        Self::Symbol: Into<char>,
    {
        (0..self.len())
            .filter_map(|i| self.get(i))
            .map(|g| g.symbol().map_or(gap, Into::into))
            .collect()
    }
}

impl<'a, T: Copy + 'a> AlignedSequence<'a> for Vec<Gapped<T>> {
    type Symbol = T;

    fn from_slice(slice: &'a [T]) -> Self {
        slice.iter().copied().map(Gapped::Symbol).collect()
    }

    fn insert_gaps(&mut self, position: usize, count: usize) {
        debug_assert!(position <= Vec::len(self));
        self.splice(position..position, std::iter::repeat(Gapped::Gap).take(count));
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<Gapped<T>> {
        self.as_slice().get(index).copied()
    }
}

/// Gapped view over a borrowed sequence.
///
/// Gaps are kept as sorted runs `(source position, length)`: a run sits
/// directly before the source symbol at `source position`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GapDecorator<'a, T> {
    source: &'a [T],
    gaps: Vec<(usize, usize)>,
}

impl<'a, T> GapDecorator<'a, T> {
    pub fn source(&self) -> &'a [T] {
        self.source
    }

    pub fn gap_runs(&self) -> &[(usize, usize)] {
        &self.gaps
    }
}

impl<'a, T: Copy> AlignedSequence<'a> for GapDecorator<'a, T> {
    type Symbol = T;

    fn from_slice(slice: &'a [T]) -> Self {
        Self {
            source: slice,
            gaps: Vec::new(),
        }
    }

    fn insert_gaps(&mut self, position: usize, count: usize) {
        if count == 0 {
            return;
        }
        let mut gaps_before = 0;
        for index in 0..self.gaps.len() {
            let (source, len) = self.gaps[index];
            let run_start = source + gaps_before;
            if position < run_start {
                self.gaps.insert(index, (position - gaps_before, count));
                return;
            }
            if position <= run_start + len {
                self.gaps[index].1 += count;
                return;
            }
            gaps_before += len;
        }
        debug_assert!(position - gaps_before <= self.source.len());
        self.gaps.push((position - gaps_before, count));
    }

    fn len(&self) -> usize {
        self.source.len() + self.gaps.iter().map(|&(_, len)| len).sum::<usize>()
    }

    fn get(&self, index: usize) -> Option<Gapped<T>> {
        let mut gaps_before = 0;
        for &(source, len) in &self.gaps {
            let run_start = source + gaps_before;
            if index < run_start {
                break;
            }
            if index < run_start + len {
                return Some(Gapped::Gap);
            }
            gaps_before += len;
        }
        self.source
            .get(index - gaps_before)
            .copied()
            .map(Gapped::Symbol)
    }
}

/// Two aligned sequences of equal length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignedPair<A> {
    pub first: A,
    pub second: A,
}

impl<A> AlignedPair<A> {
    /// Run-length encoded columns of the alignment.
    pub fn cigar<'a>(&self) -> Cigar
    where
        A: AlignedSequence<'a>,
    {
        debug_assert_eq!(self.first.len(), self.second.len());
        let mut cigar = Cigar::default();
        for i in 0..self.first.len() {
            let op = match (self.first.get(i), self.second.get(i)) {
                (Some(Gapped::Gap), _) => CigarOp::Del,
                (_, Some(Gapped::Gap)) => CigarOp::Ins,
                _ => CigarOp::Match,
            };
            cigar.push(op, 1);
        }
        cigar
    }

    /// Copies both sequences into owned gapped vectors.
    pub fn to_gapped_pair<'a>(&self) -> AlignedPair<Vec<Gapped<A::Symbol>>>
    where
        A: AlignedSequence<'a>,
    {
        AlignedPair {
            first: self.first.to_gapped(),
            second: self.second.to_gapped(),
        }
    }
}

/// Half-open ranges of both sequences covered by an alignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignedRanges {
    pub seq1: Range<usize>,
    pub seq2: Range<usize>,
}

/// Turns a traceback into two gapped sequences.
///
/// The column axis of the traced matrix is `seq1` and the row axis `seq2`: a
/// left move consumes `seq1` against a gap, an up move consumes `seq2`.
#[derive(Clone, Copy, Debug)]
pub struct AlignedSequenceBuilder<'a, T> {
    seq1: &'a [T],
    seq2: &'a [T],
}

impl<'a, T: Copy> AlignedSequenceBuilder<'a, T> {
    pub fn new(seq1: &'a [T], seq2: &'a [T]) -> Self {
        Self { seq1, seq2 }
    }

    /// Consumes `path` and builds the alignment it describes.
    pub fn build<A, P>(&self, mut path: P) -> (AlignedPair<A>, AlignedRanges)
    where
        A: AlignedSequence<'a, Symbol = T>,
        P: TracebackPath,
    {
        let end = path.coordinate();
        let mut segments: Vec<(TraceDirections, usize)> = Vec::new();
        for direction in path.by_ref() {
            match segments.last_mut() {
                Some((last, len)) if *last == direction => *len += 1,
                _ => segments.push((direction, 1)),
            }
        }
        let begin = path.coordinate();

        let ranges = AlignedRanges {
            seq1: begin.column..end.column,
            seq2: begin.row..end.row,
        };
        let mut first = A::from_slice(&self.seq1[ranges.seq1.clone()]);
        let mut second = A::from_slice(&self.seq2[ranges.seq2.clone()]);

        let mut cursor = 0;
        for &(direction, len) in segments.iter().rev() {
            match direction {
                TraceDirections::LEFT => second.insert_gaps(cursor, len),
                TraceDirections::UP => first.insert_gaps(cursor, len),
                _ => debug_assert_eq!(direction, TraceDirections::DIAGONAL),
            }
            cursor += len;
        }
        debug_assert_eq!(first.len(), second.len());

        (AlignedPair { first, second }, ranges)
    }
}
