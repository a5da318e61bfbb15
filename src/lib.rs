//! This crate provides [`Interval`], an automatically-merged disjunction of
//! atomic intervals over any totally-ordered type, and [`IntervalDict`], a
//! map from intervals to values based off [`BTreeMap`].
//!
//! An interval is a union of zero or more disjoint atomic intervals, each
//! being a lower and an upper [`Value`] with a closed or open [`Bound`] on
//! either side. Values extend the point type with two infinities so
//! unbounded intervals are ordinary intervals. Every operation keeps
//! intervals in a canonical form, so two intervals covering the same
//! points are always equal.
//!
//! ## Example using the set operations
//!
//! ```rust
//! use disjunct::{
//! 	closed, closedopen, empty, open, openclosed, singleton, Value,
//! };
//!
//! let a = closed(0, 2) | closed(4, 6);
//!
//! assert_eq!(a.len(), 2);
//! assert_eq!(a.to_string(), "[0,2] | [4,6]");
//! assert_eq!(&a | &closed(1, 5), closed(0, 6));
//! assert_eq!(&a & &open(1, 5), openclosed(1, 2) | closedopen(4, 5));
//! assert_eq!(&a - &a, empty());
//! assert_eq!(!closed(0, Value::PosInf), open(Value::NegInf, 0));
//!
//! assert!(a.contains_value(&5));
//! assert!(!a.contains_value(&3));
//! assert!(a.contains(&singleton(1)));
//! ```
//!
//! ## Example using an `IntervalDict`
//!
//! ```rust
//! use disjunct::{closed, closedopen, IntervalDict};
//!
//! let mut dict = IntervalDict::new();
//!
//! dict.insert(&closed(0, 3), "banana");
//! dict.insert(&closed(2, 4), "orange");
//!
//! assert_eq!(dict.get_at(&1), Ok(&"banana"));
//! assert_eq!(dict.find(&"banana"), closedopen(0, 2));
//! assert_eq!(dict.to_string(), r#"{[0,2): "banana", [2,4]: "orange"}"#);
//! ```
//!
//! ## Example using a discrete domain
//!
//! Over a [`Discrete`] point type, such as the integers, open bounds are
//! rewritten as closed bounds on the neighbouring point and atomic
//! intervals one step apart are merged.
//!
//! ```rust
//! use disjunct::DiscreteInterval;
//!
//! let a = DiscreteInterval::closed(0, 2) | DiscreteInterval::closed(3, 5);
//!
//! assert_eq!(a, DiscreteInterval::closed(0, 5));
//! assert_eq!(DiscreteInterval::open(0, 5), DiscreteInterval::closed(1, 4));
//! ```
//!
//! # Features
//!
//! This crate currently has only one feature, `serde`, which implements
//! `Serialize` and `Deserialize` for every public type. Deserializing goes
//! through the same validation as construction.
//!
//! # Incomparable values
//!
//! Points only need to be [`PartialOrd`]. Constructors taking bounds from
//! the caller come in a panicking flavour and a `try_` flavour returning
//! [`IntervalError::TypeMismatch`] when the bounds are not comparable, such
//! as a float `NaN`.
//!
//! [`BTreeMap`]: https://doc.rust-lang.org/std/collections/struct.BTreeMap.html

#![cfg_attr(not(test), no_std)]
#![allow(clippy::tabs_in_doc_comments)]
#![allow(clippy::needless_return)]

extern crate alloc;

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

#[cfg(test)]
pub(crate) mod test_intervals;
pub(crate) mod bound_ord;
pub(crate) mod utils;

pub mod atomic;
pub mod bound;
pub mod dict;
pub mod discrete;
pub mod domain;
pub mod error;
pub mod interval;
pub mod value;

pub use crate::atomic::Atomic;
pub use crate::bound::Bound;
pub use crate::dict::IntervalDict;
pub use crate::discrete::Discrete;
pub use crate::domain::{ContinuousDomain, DiscreteDomain, Domain};
pub use crate::error::IntervalError;
pub use crate::interval::{
	closed, closedopen, empty, open, openclosed, singleton, Applied, Interval,
	Replace,
};
pub use crate::value::Value;

/// An [`Interval`] over a [`Discrete`] point type.
pub type DiscreteInterval<T> = Interval<T, DiscreteDomain>;

/// An [`IntervalDict`] keyed by intervals over a [`Discrete`] point type.
pub type DiscreteIntervalDict<T, V> = IntervalDict<T, V, DiscreteDomain>;
