/// The position of a slot in the sequence buffer of a [`Constructor`].
///
/// A position is meaningful only for buffers of length greater than its
/// value; see [`Position::partner`] for the bounds check performed before
/// a number is placed.
///
/// [`Constructor`]: `crate::Constructor`
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone)]
#[repr(transparent)]
pub(crate) struct Position(usize);

impl Position {
    /// The leftmost slot of every sequence.
    pub const FIRST: Self = Self::new(0);

    /// Creates a new position.
    #[must_use]
    pub const fn new(ix: usize) -> Self {
        Self(ix)
    }

    /// Returns the position value as a primitive type.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns the position of the next slot in the buffer.
    ///
    /// The result is meaningful only if `self` is less than [`usize::MAX`].
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the slot that must hold the second copy of `num` when its
    /// first copy sits at `self`, namely $i+k+1$ for $i=$ `self` and $k=$
    /// `num`; or [`None`], if that slot falls outside a buffer of length
    /// `len`.
    #[must_use]
    pub fn partner(self, num: usize, len: usize) -> Option<Self> {
        let ix = self.0.checked_add(num)?.checked_add(1)?;
        (ix < len).then_some(Self(ix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_get() {
        assert_eq!(Position::FIRST.get(), 0);
        assert_eq!(Position::new(7).get(), 7);
        assert_eq!(Position::new(123456).get(), 123456);
    }

    #[test]
    fn position_increment() {
        assert_eq!(Position::FIRST.increment(), Position::new(1));
        assert_eq!(Position::new(41).increment(), Position::new(42));
    }

    #[test]
    fn partner_leaves_exactly_num_slots_between() {
        assert_eq!(Position::new(0).partner(1, 6), Some(Position::new(2)));
        assert_eq!(Position::new(1).partner(3, 6), Some(Position::new(5)));
        assert_eq!(Position::new(2).partner(2, 8), Some(Position::new(5)));
    }

    #[test]
    fn partner_out_of_bounds() {
        // The last slot of a buffer of length 6 is 5.
        assert_eq!(Position::new(2).partner(3, 6), None);
        assert_eq!(Position::new(0).partner(1, 2), None);
        assert_eq!(Position::FIRST.partner(0, 0), None);
        assert_eq!(Position::new(usize::MAX).partner(1, usize::MAX), None);
    }
}
