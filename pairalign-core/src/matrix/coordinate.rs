use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A cell position in an alignment matrix.
///
/// Columns index the first sequence, rows the second one. Ordering is
/// lexicographic over `(column, row)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatrixCoordinate {
    pub column: usize,
    pub row: usize,
}

impl MatrixCoordinate {
    #[inline]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for MatrixCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.column, self.row)
    }
}

/// Marker for the axis an [`AdvanceableCoordinate`] moves along.
pub trait Axis: Copy + Default + fmt::Debug {
    /// Picks the active component of `(column, row)`.
    fn active_mut<'a>(column: &'a mut usize, row: &'a mut usize) -> &'a mut usize;
    fn get(column: usize, row: usize) -> usize;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnAxis;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowAxis;

impl Axis for ColumnAxis {
    #[inline]
    fn active_mut<'a>(column: &'a mut usize, _row: &'a mut usize) -> &'a mut usize {
        column
    }

    #[inline]
    fn get(column: usize, _row: usize) -> usize {
        column
    }
}

impl Axis for RowAxis {
    #[inline]
    fn active_mut<'a>(_column: &'a mut usize, row: &'a mut usize) -> &'a mut usize {
        row
    }

    #[inline]
    fn get(_column: usize, row: usize) -> usize {
        row
    }
}

/// A coordinate that moves along one axis only, so a matrix column (or row)
/// can be walked as a linear, randomly-accessible index sequence.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdvanceableCoordinate<A: Axis> {
    pub column: usize,
    pub row: usize,
    axis: PhantomData<A>,
}

impl<A: Axis> AdvanceableCoordinate<A> {
    #[inline]
    pub const fn new(column: usize, row: usize) -> Self {
        Self {
            column,
            row,
            axis: PhantomData,
        }
    }

    #[inline]
    fn active_mut(&mut self) -> &mut usize {
        A::active_mut(&mut self.column, &mut self.row)
    }

    #[inline]
    fn active(&self) -> usize {
        A::get(self.column, self.row)
    }

    /// Re-targets the coordinate to walk along another axis.
    pub fn with_axis<B: Axis>(self) -> AdvanceableCoordinate<B> {
        AdvanceableCoordinate::new(self.column, self.row)
    }

    /// Half-open range `[self, end)` over the active axis.
    pub fn range_to(self, end: Self) -> CoordinateRange<A> {
        debug_assert!(end.active() >= self.active());
        CoordinateRange { front: self, back: end }
    }
}

impl<A: Axis> From<AdvanceableCoordinate<A>> for MatrixCoordinate {
    fn from(c: AdvanceableCoordinate<A>) -> Self {
        MatrixCoordinate::new(c.column, c.row)
    }
}

impl<A: Axis> From<MatrixCoordinate> for AdvanceableCoordinate<A> {
    fn from(c: MatrixCoordinate) -> Self {
        AdvanceableCoordinate::new(c.column, c.row)
    }
}

impl<A: Axis> PartialEq for AdvanceableCoordinate<A> {
    fn eq(&self, other: &Self) -> bool {
        (self.column, self.row) == (other.column, other.row)
    }
}

impl<A: Axis> Eq for AdvanceableCoordinate<A> {}

impl<A: Axis> PartialOrd for AdvanceableCoordinate<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A: Axis> Ord for AdvanceableCoordinate<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.column, self.row).cmp(&(other.column, other.row))
    }
}

impl<A: Axis> AddAssign<isize> for AdvanceableCoordinate<A> {
    #[inline]
    fn add_assign(&mut self, offset: isize) {
        let slot = self.active_mut();
        *slot = slot.wrapping_add_signed(offset);
    }
}

impl<A: Axis> SubAssign<isize> for AdvanceableCoordinate<A> {
    #[inline]
    fn sub_assign(&mut self, offset: isize) {
        let slot = self.active_mut();
        *slot = slot.wrapping_add_signed(offset.wrapping_neg());
    }
}

impl<A: Axis> Add<isize> for AdvanceableCoordinate<A> {
    type Output = Self;

    #[inline]
    fn add(mut self, offset: isize) -> Self {
        self += offset;
        self
    }
}

impl<A: Axis> Sub<isize> for AdvanceableCoordinate<A> {
    type Output = Self;

    #[inline]
    fn sub(mut self, offset: isize) -> Self {
        self -= offset;
        self
    }
}

/// Signed distance along the active axis.
impl<A: Axis> Sub for AdvanceableCoordinate<A> {
    type Output = isize;

    #[inline]
    fn sub(self, other: Self) -> isize {
        self.active() as isize - other.active() as isize
    }
}

/// Iterator over consecutive coordinates of one axis.
#[derive(Clone, Debug)]
pub struct CoordinateRange<A: Axis> {
    front: AdvanceableCoordinate<A>,
    back: AdvanceableCoordinate<A>,
}

impl<A: Axis> Iterator for CoordinateRange<A> {
    type Item = AdvanceableCoordinate<A>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front.active() >= self.back.active() {
            return None;
        }
        let current = self.front;
        self.front += 1;
        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back.active().saturating_sub(self.front.active());
        (len, Some(len))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let remaining = self.len();
        if n >= remaining {
            self.front = self.back;
            return None;
        }
        self.front += n as isize;
        self.next()
    }
}

impl<A: Axis> DoubleEndedIterator for CoordinateRange<A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front.active() >= self.back.active() {
            return None;
        }
        self.back -= 1;
        Some(self.back)
    }
}

impl<A: Axis> ExactSizeIterator for CoordinateRange<A> {}

impl<A: Axis> FusedIterator for CoordinateRange<A> {}
