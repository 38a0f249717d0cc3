//! Named access to the `(best, horizontal, vertical)` triple of an affine cell.
//!
//! [`AffineCell`] wraps either a score triple `(B, H, V)` or a pair of a score
//! triple and a trace triple `((B, H, V), (BT, HT, VT))`. The fields may be owned
//! values or references into matrix buffers; every accessor comes in a shared
//! (`best`), exclusive (`best_mut`) and consuming (`into_best`) form so the
//! wrapper never copies or re-borrows beyond what the underlying storage gives.

use super::trace_directions::TraceDirections;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AffineCell<T>(pub T);

/// Score-only cell holding owned values.
pub type ScoreCell<S> = AffineCell<(S, S, S)>;

/// Score-and-trace cell holding owned values.
pub type ScoreTraceCell<S> = AffineCell<((S, S, S), TraceTriple)>;

/// Trace-only cell holding owned values.
pub type TraceCell = AffineCell<TraceTriple>;

pub type TraceTriple = (TraceDirections, TraceDirections, TraceDirections);

impl<T> AffineCell<T> {
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for AffineCell<T> {
    #[inline]
    fn from(inner: T) -> Self {
        Self(inner)
    }
}

impl<B, H, V> AffineCell<(B, H, V)> {
    /// Converting construction from a cell whose fields convert field by field.
    #[inline]
    pub fn from_compatible<B2, H2, V2>(other: AffineCell<(B2, H2, V2)>) -> Self
    where
        B2: Into<B>,
        H2: Into<H>,
        V2: Into<V>,
    {
        let (best, horizontal, vertical) = other.0;
        Self((best.into(), horizontal.into(), vertical.into()))
    }

    #[inline]
    pub fn best(&self) -> &B {
        let (v, _, _) = &self.0;
        v
    }

    #[inline]
    pub fn best_mut(&mut self) -> &mut B {
        let (v, _, _) = &mut self.0;
        v
    }

    #[inline]
    pub fn into_best(self) -> B {
        let (v, _, _) = self.0;
        v
    }

    #[inline]
    pub fn horizontal(&self) -> &H {
        let (_, v, _) = &self.0;
        v
    }

    #[inline]
    pub fn horizontal_mut(&mut self) -> &mut H {
        let (_, v, _) = &mut self.0;
        v
    }

    #[inline]
    pub fn into_horizontal(self) -> H {
        let (_, v, _) = self.0;
        v
    }

    #[inline]
    pub fn vertical(&self) -> &V {
        let (_, _, v) = &self.0;
        v
    }

    #[inline]
    pub fn vertical_mut(&mut self) -> &mut V {
        let (_, _, v) = &mut self.0;
        v
    }

    #[inline]
    pub fn into_vertical(self) -> V {
        let (_, _, v) = self.0;
        v
    }
}

impl<B, H, V, BT, HT, VT> AffineCell<((B, H, V), (BT, HT, VT))> {
    #[inline]
    pub fn best(&self) -> &B {
        let ((v, _, _), _) = &self.0;
        v
    }

    #[inline]
    pub fn best_mut(&mut self) -> &mut B {
        let ((v, _, _), _) = &mut self.0;
        v
    }

    #[inline]
    pub fn into_best(self) -> B {
        let ((v, _, _), _) = self.0;
        v
    }

    #[inline]
    pub fn horizontal(&self) -> &H {
        let ((_, v, _), _) = &self.0;
        v
    }

    #[inline]
    pub fn horizontal_mut(&mut self) -> &mut H {
        let ((_, v, _), _) = &mut self.0;
        v
    }

    #[inline]
    pub fn into_horizontal(self) -> H {
        let ((_, v, _), _) = self.0;
        v
    }

    #[inline]
    pub fn vertical(&self) -> &V {
        let ((_, _, v), _) = &self.0;
        v
    }

    #[inline]
    pub fn vertical_mut(&mut self) -> &mut V {
        let ((_, _, v), _) = &mut self.0;
        v
    }

    #[inline]
    pub fn into_vertical(self) -> V {
        let ((_, _, v), _) = self.0;
        v
    }

    #[inline]
    pub fn best_trace(&self) -> &BT {
        let (_, (v, _, _)) = &self.0;
        v
    }

    #[inline]
    pub fn best_trace_mut(&mut self) -> &mut BT {
        let (_, (v, _, _)) = &mut self.0;
        v
    }

    #[inline]
    pub fn into_best_trace(self) -> BT {
        let (_, (v, _, _)) = self.0;
        v
    }

    #[inline]
    pub fn horizontal_trace(&self) -> &HT {
        let (_, (_, v, _)) = &self.0;
        v
    }

    #[inline]
    pub fn horizontal_trace_mut(&mut self) -> &mut HT {
        let (_, (_, v, _)) = &mut self.0;
        v
    }

    #[inline]
    pub fn into_horizontal_trace(self) -> HT {
        let (_, (_, v, _)) = self.0;
        v
    }

    #[inline]
    pub fn vertical_trace(&self) -> &VT {
        let (_, (_, _, v)) = &self.0;
        v
    }

    #[inline]
    pub fn vertical_trace_mut(&mut self) -> &mut VT {
        let (_, (_, _, v)) = &mut self.0;
        v
    }

    #[inline]
    pub fn into_vertical_trace(self) -> VT {
        let (_, (_, _, v)) = self.0;
        v
    }

    /// Splits into the score part and the trace part.
    #[inline]
    pub fn split(self) -> (AffineCell<(B, H, V)>, AffineCell<(BT, HT, VT)>) {
        let (score, trace) = self.0;
        (AffineCell(score), AffineCell(trace))
    }
}

impl<S: Copy> AffineCell<(S, S, S)> {
    /// Pairs this score triple with a trace triple.
    #[inline]
    pub fn with_trace(self, trace: TraceTriple) -> ScoreTraceCell<S> {
        AffineCell((self.0, trace))
    }
}

impl<'a, S: Copy> AffineCell<(&'a mut S, &'a mut S, &'a mut S)> {
    /// Reads the referenced cell into an owned one.
    #[inline]
    pub fn load(&self) -> ScoreCell<S> {
        let (best, horizontal, vertical) = &self.0;
        AffineCell((**best, **horizontal, **vertical))
    }

    /// Writes an owned cell through the references.
    #[inline]
    pub fn store(&mut self, cell: ScoreCell<S>) {
        let (best, horizontal, vertical) = cell.0;
        let (best_slot, horizontal_slot, vertical_slot) = &mut self.0;
        **best_slot = best;
        **horizontal_slot = horizontal;
        **vertical_slot = vertical;
    }
}
