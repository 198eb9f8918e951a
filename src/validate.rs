use std::fmt;
use tracing::debug;

/// The first rule of a Langford pairing that a sequence breaks, as reported
/// by [`validate`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Violation {
    /// The sequence has an odd number of entries, so it cannot contain
    /// two copies of each of $1,\dots,n$.
    OddLength { len: usize },
    /// An entry lies outside the range $1\le v\le n$, where $2n$ is the
    /// length of the sequence.
    OutOfRange {
        position: usize,
        value: i64,
        order: usize,
    },
    /// The second copy of `value` does not sit exactly `value + 1` slots
    /// after the first one.
    Misplaced {
        value: usize,
        first: usize,
        second: usize,
    },
    /// A third copy of `value` appears at `position`.
    Repeated { value: usize, position: usize },
    /// `value` does not appear twice in the sequence.
    Missing { value: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::OddLength { len } => {
                write!(f, "sequence has odd length {}", len)
            }
            Violation::OutOfRange {
                position,
                value,
                order,
            } => {
                write!(
                    f,
                    "value {} at position {} is outside 1..={}",
                    value, position, order
                )
            }
            Violation::Misplaced {
                value,
                first,
                second,
            } => {
                write!(
                    f,
                    "second {} at position {} should be at position {}",
                    value,
                    second,
                    first + value + 1
                )
            }
            Violation::Repeated { value, position } => {
                write!(f, "value {} appears a third time at position {}", value, position)
            }
            Violation::Missing { value } => {
                write!(f, "value {} does not appear twice", value)
            }
        }
    }
}

impl std::error::Error for Violation {}

/// How often a value has been seen during the left-to-right scan.
#[derive(Copy, Clone)]
enum Occurrence {
    Unseen,
    /// Seen once, at the given position.
    Once(usize),
    /// Both copies seen, at the correct distance.
    Paired,
}

/// Returns whether `sequence` is a Langford pairing: a sequence of length
/// $2n$ that contains every integer $1\le k\le n$ exactly twice, with
/// exactly $k$ entries between the two copies of $k$.
///
/// The empty sequence is a (degenerate) Langford pairing of order zero.
///
/// # Examples
///
/// ```
/// use langford::is_langford_pairing;
///
/// assert!(is_langford_pairing(&[2, 3, 1, 2, 1, 3]));
/// assert!(!is_langford_pairing(&[1, 2, 1, 2]));
/// assert!(!is_langford_pairing(&[1, 1]));
/// ```
#[must_use]
pub fn is_langford_pairing(sequence: &[i64]) -> bool {
    validate(sequence).is_ok()
}

/// Checks that `sequence` is a Langford pairing, reporting the first
/// [violation](`Violation`) found while scanning it from left to right.
///
/// See [`is_langford_pairing`] for the definition.
pub fn validate(sequence: &[i64]) -> Result<(), Violation> {
    let len = sequence.len();
    if len % 2 != 0 {
        return Err(Violation::OddLength { len });
    }
    let order = len / 2;
    // `seen[v - 1]` records the occurrences of value $v$.
    let mut seen = vec![Occurrence::Unseen; order];
    for (position, &value) in sequence.iter().enumerate() {
        let num = match usize::try_from(value) {
            Ok(num) if (1..=order).contains(&num) => num,
            _ => {
                return Err(Violation::OutOfRange {
                    position,
                    value,
                    order,
                })
            }
        };
        let state = &mut seen[num - 1];
        *state = match *state {
            Occurrence::Unseen => Occurrence::Once(position),
            Occurrence::Once(first) if position == first + num + 1 => Occurrence::Paired,
            Occurrence::Once(first) => {
                return Err(Violation::Misplaced {
                    value: num,
                    first,
                    second: position,
                })
            }
            Occurrence::Paired => {
                return Err(Violation::Repeated {
                    value: num,
                    position,
                })
            }
        };
    }
    // Every value in $1,\dots,n$ must have been paired.
    if let Some(ix) = seen
        .iter()
        .position(|state| !matches!(state, Occurrence::Paired))
    {
        return Err(Violation::Missing { value: ix + 1 });
    }
    debug!(order, "sequence is a langford pairing");
    Ok(())
}
