//! This crate validates and constructs _Langford pairings_.
//!
//! A Langford pairing of order $n$ is a sequence of $2n$ numbers that
//! contains two copies of each of $1,2,\dots,n$, arranged so that there are
//! exactly $k$ entries between the two appearances of $k$, for all
//! $1\le k\le n$. For example, $3\\,1\\,2\\,1\\,3\\,2$ is a Langford pairing of
//! order 3. The problem of finding such arrangements was first described by
//! C. D. Langford [[_The Mathematical Gazette_ 42 (October 1958), 228][mathgaz]].
//! Pairings exist if and only if $n$ is congruent to 0 or 3 modulo 4; see
//! [`pairing_exists`] for the parity argument behind the necessity of this
//! condition.
//!
//! The library has two independent parts:
//! - [`is_langford_pairing`] and [`validate`] decide whether an arbitrary
//!   sequence of integers is a Langford pairing. The latter also reports
//!   the first [`Violation`] of the definition.
//! - [`Constructor`] visits the Langford pairings of a given order by
//!   depth-first backtracking, placing the numbers $1,2,\dots,n$ one at a time
//!   into the leftmost pair of free slots. [`construct`] returns the first
//!   pairing it finds, and [`count_pairings`] counts them all.
//!
//! The [`cli`] module implements the `langford` command-line tool on top of
//! these functions.
//!
//! # Examples
//!
//! ```
//! use langford::{construct, is_langford_pairing};
//!
//! let sequence = construct(4).expect("order 4 has a pairing");
//! assert_eq!(sequence, [4, 1, 3, 1, 2, 4, 3, 2]);
//! assert!(is_langford_pairing(&sequence));
//!
//! // No pairing exists for order 5, because 5 is congruent to 1 modulo 4.
//! assert_eq!(construct(5), None);
//! ```
//!
//! [mathgaz]: https://www.cambridge.org/core/journals/mathematical-gazette/article/abs/problem/557F7BBB739F5B3E0D152C270642B102

pub mod cli;
mod construct;
mod position;
mod validate;

pub use construct::{construct, count_pairings, pairing_exists, Constructor, EMPTY};
pub use validate::{is_langford_pairing, validate, Violation};
