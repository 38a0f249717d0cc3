use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

/// Predecessor flags of a matrix cell.
///
/// `LEFT`, `UP` and `DIAGONAL` mark predecessors tied for the optimal score.
/// `LEFT_OPEN` and `UP_OPEN` record that the horizontal/vertical gap ending in
/// the cell was opened from the neighbouring cell's best score rather than
/// extended from its gap score; only affine trace matrices set them.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TraceDirections(u8);

impl TraceDirections {
    pub const NONE: Self = Self(0);
    pub const DIAGONAL: Self = Self(0b0_0001);
    pub const UP_OPEN: Self = Self(0b0_0010);
    pub const UP: Self = Self(0b0_0100);
    pub const LEFT_OPEN: Self = Self(0b0_1000);
    pub const LEFT: Self = Self(0b1_0000);

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1_1111)
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// True if every flag of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if any flag of `other` is set in `self`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Resolves co-optimal predecessors to a single move with priority
    /// left > up > diagonal. Gap-origin flags are not predecessors and are ignored.
    pub const fn resolve(self) -> Self {
        if self.contains(Self::LEFT) {
            Self::LEFT
        } else if self.contains(Self::UP) {
            Self::UP
        } else if self.contains(Self::DIAGONAL) {
            Self::DIAGONAL
        } else {
            Self::NONE
        }
    }

    /// The predecessor flags without the gap-origin flags.
    #[inline]
    pub const fn predecessors(self) -> Self {
        Self(self.0 & (Self::LEFT.0 | Self::UP.0 | Self::DIAGONAL.0))
    }

    /// Single-character rendering used by matrix dumps.
    pub fn symbol(self) -> char {
        match self.resolve() {
            Self::DIAGONAL => '\\',
            Self::UP => '|',
            Self::LEFT => '-',
            _ => 'N',
        }
    }
}

impl BitOr for TraceDirections {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TraceDirections {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for TraceDirections {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for TraceDirections {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl fmt::Debug for TraceDirections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("N");
        }
        let names = [
            (Self::DIAGONAL, "D"),
            (Self::UP_OPEN, "UO"),
            (Self::UP, "U"),
            (Self::LEFT_OPEN, "LO"),
            (Self::LEFT, "L"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
