use crate::position::Position;
use std::collections::TryReserveError;
use std::ops::ControlFlow;
use tracing::{debug, trace};

/// The value of a slot that holds no number yet.
pub const EMPTY: i64 = 0;

/// Visits the Langford pairings of order $n$ by means of depth-first
/// backtracking.
///
/// The numbers $1,2,\dots,n$ are placed one at a time, in increasing order.
/// Number $k$ goes into the leftmost pair of empty slots $(i,i+k+1)$ that
/// lies within the buffer of $2n$ slots; when no such pair remains, the
/// search backs up to number $k-1$ and moves it to its next available pair
/// of slots. Pairings are therefore visited in a fixed order, and the first
/// one visited is the one returned by [`construct`].
///
/// # Examples
///
/// ```
/// use std::ops::ControlFlow;
/// use langford::Constructor;
///
/// let mut constructor = Constructor::new(3);
/// let mut pairings = Vec::new();
/// constructor.solve(|sequence| {
///     pairings.push(sequence.to_vec());
///     ControlFlow::Continue(())
/// });
/// assert_eq!(pairings, [[3, 1, 2, 1, 3, 2], [2, 3, 1, 2, 1, 3]]);
/// ```
#[derive(Debug, Clone)]
pub struct Constructor {
    /// The number of distinct values to place.
    order: usize,
    /// The $2n$ slots of the sequence under construction, each of which is
    /// either [`EMPTY`] or holds a number that has been placed.
    sequence: Vec<i64>,
    /// A stack of slot positions used for backtracking. Its $k$th element
    /// is the leftmost slot occupied by number $k$, so the number to be
    /// placed next is always `positions.len() + 1`.
    positions: Vec<Position>,
    /// The number of tentative placements made by the last search.
    placements: u64,
}

impl Constructor {
    /// Creates a solver for the Langford pairings of the given order, with
    /// all slots empty.
    ///
    /// # Panics
    ///
    /// This function panics if the buffer of $2n$ slots cannot be allocated.
    /// Use [`Self::try_new`] to handle this case.
    #[must_use]
    pub fn new(order: usize) -> Self {
        Self::try_new(order).expect("sequence buffer should fit in memory")
    }

    /// Creates a solver for the Langford pairings of the given order, or
    /// returns an error if the buffer of $2n$ slots cannot be allocated.
    pub fn try_new(order: usize) -> Result<Self, TryReserveError> {
        // An overflowing length is reported as a capacity overflow by
        // `try_reserve_exact`, before anything is written.
        let len = order.checked_mul(2).unwrap_or(usize::MAX);
        let mut sequence = Vec::new();
        sequence.try_reserve_exact(len)?;
        sequence.resize(len, EMPTY);
        let mut positions = Vec::new();
        positions.try_reserve_exact(order)?;
        Ok(Self {
            order,
            sequence,
            positions,
            placements: 0,
        })
    }

    /// Returns the order $n$ of the pairings being sought.
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the current contents of the buffer.
    ///
    /// After [`Self::solve`] returns, the buffer holds the last pairing
    /// visited if the closure stopped the search, and is entirely
    /// [`EMPTY`] otherwise.
    #[must_use]
    pub fn sequence(&self) -> &[i64] {
        &self.sequence
    }

    /// Returns the number of tentative placements made by the last search.
    #[must_use]
    pub fn placements(&self) -> u64 {
        self.placements
    }

    /// Calls a closure on each Langford pairing of order $n$.
    ///
    /// The search continues until the closure returns [`ControlFlow::Break`]
    /// or all pairings have been visited, whichever occurs first. Every
    /// call starts over from an empty buffer.
    pub fn solve<F>(&mut self, mut visit: F)
    where
        F: FnMut(&[i64]) -> ControlFlow<()>,
    {
        self.reset();
        debug!(order = self.order, "searching for langford pairings");
        'outer: loop {
            // Place as many numbers as possible, without backtracking.
            loop {
                let num = self.positions.len() + 1;
                if num > self.order {
                    // All numbers have been placed; visit the pairing.
                    trace!(sequence = ?self.sequence, "found pairing");
                    if visit(&self.sequence).is_break() {
                        debug!(placements = self.placements, "search stopped");
                        return;
                    }
                    break;
                }
                if let Some(ix) = self.first_fit(num, Position::FIRST) {
                    self.place(num, ix);
                } else {
                    // There is no room left for `num`; backtrack.
                    break;
                }
            }
            // Leave the current level until we find a number that can be
            // moved further to the right.
            while let Some(ix) = self.positions.pop() {
                let num = self.positions.len() + 1;
                self.unplace(num, ix);
                if let Some(next_ix) = self.first_fit(num, ix.increment()) {
                    self.place(num, next_ix);
                    continue 'outer;
                }
            }
            // We have explored the entire search tree; all slots are empty
            // again.
            debug!(placements = self.placements, "search exhausted");
            return;
        }
    }

    /// Searches for the first pairing in search order, leaving it in the
    /// buffer. Returns [`None`] if no pairing exists.
    pub fn find_first(&mut self) -> Option<&[i64]> {
        let mut found = false;
        self.solve(|_| {
            found = true;
            ControlFlow::Break(())
        });
        found.then_some(self.sequence.as_slice())
    }

    /// Returns the leftmost position $i\ge$ `start` such that slots $i$ and
    /// $i+k+1$ are both empty and lie within the buffer, where $k=$ `num`.
    fn first_fit(&self, num: usize, start: Position) -> Option<Position> {
        let len = self.sequence.len();
        let mut ix = start;
        while let Some(partner) = ix.partner(num, len) {
            if self.slot(ix) == EMPTY && self.slot(partner) == EMPTY {
                return Some(ix);
            }
            ix = ix.increment();
        }
        None
    }

    /// Puts both copies of `num` into the buffer, the first one at `ix`,
    /// and records the placement on the backtracking stack.
    ///
    /// # Panics
    ///
    /// This function panics if the second slot lies outside the buffer.
    fn place(&mut self, num: usize, ix: Position) {
        let partner = ix
            .partner(num, self.sequence.len())
            .expect("placement should fit in the buffer");
        // `num` never exceeds the order, which indexes a `Vec`.
        let value = num as i64;
        self.sequence[ix.get()] = value;
        self.sequence[partner.get()] = value;
        self.positions.push(ix);
        self.placements += 1;
    }

    /// Undoes the updates made by the last [placement](`Self::place`),
    /// whose stack entry the caller has already popped.
    fn unplace(&mut self, num: usize, ix: Position) {
        let partner = ix
            .partner(num, self.sequence.len())
            .expect("placement should fit in the buffer");
        self.sequence[ix.get()] = EMPTY;
        self.sequence[partner.get()] = EMPTY;
    }

    /// Empties every slot, discarding the state of a stopped search.
    fn reset(&mut self) {
        self.sequence.fill(EMPTY);
        self.positions.clear();
        self.placements = 0;
    }

    /// Returns the contents of the slot at the given position.
    ///
    /// # Panics
    ///
    /// This function panics if the position is out of bounds.
    fn slot(&self, ix: Position) -> i64 {
        self.sequence[ix.get()]
    }
}

/// Finds the first Langford pairing of order $n$ visited by a
/// [`Constructor`], or returns [`None`] if no such pairing exists.
///
/// # Examples
///
/// ```
/// use langford::construct;
///
/// assert_eq!(construct(0), Some(vec![]));
/// assert_eq!(construct(1), None);
/// assert_eq!(construct(3), Some(vec![3, 1, 2, 1, 3, 2]));
/// ```
#[must_use]
pub fn construct(order: usize) -> Option<Vec<i64>> {
    Constructor::new(order).find_first().map(<[i64]>::to_vec)
}

/// Returns the number of Langford pairings of order $n$, counting each
/// pairing and its reversal separately.
#[must_use]
pub fn count_pairings(order: usize) -> usize {
    let mut count = 0;
    Constructor::new(order).solve(|_| {
        count += 1;
        ControlFlow::Continue(())
    });
    count
}

/// Returns whether a Langford pairing of order $n\ge1$ exists.
///
/// A Langford pairing can exist only when $n$ is congruent to 0 or 3 modulo
/// 4. The two copies of an odd number either both go in even or both go in
/// odd positions, while the copies of an even number fall in positions of
/// different parity. There are $\lfloor n/2\rfloor$ even numbers in
/// $\\{1,\dots,n\\}$, so $n-\lfloor n/2\rfloor=\lceil n/2\rceil$ positions of
/// each parity remain for the odd numbers. These come in pairs of the same
/// parity, so $\lceil n/2\rceil$ must be even. R. O. Davies showed in 1959
/// that the condition is also sufficient.
///
/// The degenerate order zero is reported as having a pairing, the empty
/// sequence.
#[must_use]
pub fn pairing_exists(order: usize) -> bool {
    matches!(order % 4, 0 | 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_langford_pairing;

    #[test]
    fn new_constructor_is_empty() {
        let constructor = Constructor::new(4);
        assert_eq!(constructor.order(), 4);
        assert_eq!(constructor.sequence(), &[EMPTY; 8]);
        assert_eq!(constructor.placements(), 0);
    }

    #[test]
    fn oversized_orders_are_rejected() {
        assert!(Constructor::try_new(usize::MAX).is_err());
        assert!(Constructor::try_new(usize::MAX / 2).is_err());
        assert!(Constructor::try_new(3).is_ok());
    }

    #[test]
    #[should_panic]
    fn oversized_order_panics() {
        let _ = Constructor::new(usize::MAX);
    }

    #[test]
    fn find_first_leaves_the_pairing_in_place() {
        let mut constructor = Constructor::new(4);
        assert_eq!(constructor.find_first(), Some(&[4, 1, 3, 1, 2, 4, 3, 2][..]));
        assert_eq!(constructor.sequence(), &[4, 1, 3, 1, 2, 4, 3, 2]);
        assert_eq!(Constructor::new(5).find_first(), None);
    }

    #[test]
    fn order_zero_yields_the_empty_sequence() {
        assert_eq!(construct(0), Some(vec![]));
        assert_eq!(count_pairings(0), 1);
    }

    #[test]
    fn orders_without_pairings() {
        for order in [1, 2, 5, 6] {
            assert_eq!(construct(order), None, "order {order}");
            assert_eq!(count_pairings(order), 0, "order {order}");
        }
    }

    #[test]
    fn first_pairing_is_deterministic() {
        assert_eq!(construct(3), Some(vec![3, 1, 2, 1, 3, 2]));
        assert_eq!(construct(4), Some(vec![4, 1, 3, 1, 2, 4, 3, 2]));
        assert_eq!(
            construct(7),
            Some(vec![1, 7, 1, 2, 5, 6, 2, 3, 4, 7, 5, 3, 6, 4])
        );
        assert_eq!(
            construct(8),
            Some(vec![1, 7, 1, 2, 8, 6, 2, 3, 5, 7, 4, 3, 6, 8, 5, 4])
        );
    }

    #[test]
    fn constructed_sequences_are_pairings() {
        for order in 0..=8 {
            match construct(order) {
                Some(sequence) => {
                    assert_eq!(sequence.len(), 2 * order);
                    assert!(is_langford_pairing(&sequence), "order {order}");
                }
                None => assert!(!pairing_exists(order), "order {order}"),
            }
        }
    }

    #[test]
    fn visits_every_pairing_in_search_order() {
        let mut pairings = Vec::new();
        Constructor::new(4).solve(|sequence| {
            pairings.push(sequence.to_vec());
            ControlFlow::Continue(())
        });
        assert_eq!(
            pairings,
            [[4, 1, 3, 1, 2, 4, 3, 2], [2, 3, 4, 2, 1, 3, 1, 4]]
        );
    }

    #[test]
    fn counts_all_pairings() {
        assert_eq!(count_pairings(3), 2);
        assert_eq!(count_pairings(4), 2);
        assert_eq!(count_pairings(7), 52);
        assert_eq!(count_pairings(8), 300);
    }

    #[test]
    fn every_visited_sequence_is_a_pairing() {
        let mut constructor = Constructor::new(7);
        constructor.solve(|sequence| {
            assert!(is_langford_pairing(sequence), "{sequence:?}");
            ControlFlow::Continue(())
        });
    }

    #[test]
    fn exhausted_search_restores_empty_buffer() {
        for order in [2, 3, 5] {
            let mut constructor = Constructor::new(order);
            constructor.solve(|_| ControlFlow::Continue(()));
            assert!(constructor.sequence().iter().all(|&v| v == EMPTY));
            assert!(constructor.placements() > 0);
        }
    }

    #[test]
    fn stopped_search_keeps_the_pairing() {
        let mut constructor = Constructor::new(3);
        constructor.solve(|_| ControlFlow::Break(()));
        assert_eq!(constructor.sequence(), &[3, 1, 2, 1, 3, 2]);

        // A new search starts over from an empty buffer.
        let mut count = 0;
        constructor.solve(|_| {
            count += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(count, 2);
        assert_eq!(constructor.sequence(), &[EMPTY; 6]);
    }

    #[test]
    fn existence_criterion_matches_search() {
        for order in 0..=8 {
            assert_eq!(pairing_exists(order), count_pairings(order) > 0, "order {order}");
        }
    }
}
