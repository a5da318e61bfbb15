//! A module containing the [`Domain`] trait, the policy an
//! [`Interval`](crate::Interval) uses to normalize its atomic components,
//! and its two implementations [`ContinuousDomain`] and [`DiscreteDomain`].

use core::cmp::Ordering;

use crate::atomic::Atomic;
use crate::bound::Bound;
use crate::discrete::Discrete;
use crate::value::Value;

/// The construction policy of an interval.
///
/// Every atomic interval goes through [`Domain::canonicalize()`] before
/// being merged, and two atomic components are fused into one whenever
/// [`Domain::mergeable()`] says so.
///
/// Implementations must agree with each other: two canonical atomics that
/// overlap must always be mergeable, and `mergeable` must be symmetric.
pub trait Domain<T> {
	/// Rewrites an atomic interval into the canonical form of this domain.
	fn canonicalize(atomic: Atomic<T>) -> Atomic<T>;

	/// Returns `true` if the union of the two canonical atomic intervals is
	/// a single atomic interval in this domain.
	fn mergeable(a: &Atomic<T>, b: &Atomic<T>) -> bool;
}

/// The default domain where points form a continuum: two atomic intervals
/// merge if they overlap or if they touch with at least one closed side.
///
/// # Examples
/// ```
/// use disjunct::{closed, closedopen, open, Interval};
///
/// assert!((closedopen(0, 1) | closed(1, 2)).is_atomic());
/// assert!(!(closedopen(0, 1) | open(1, 2)).is_atomic());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContinuousDomain;

impl<T> Domain<T> for ContinuousDomain
where
	T: PartialOrd + Clone,
{
	fn canonicalize(atomic: Atomic<T>) -> Atomic<T> {
		atomic
	}

	fn mergeable(a: &Atomic<T>, b: &Atomic<T>) -> bool {
		a.touches_or_overlaps(b)
	}
}

/// A domain for [`Discrete`] point types: finite open bounds become closed
/// bounds on the neighbouring point, and closed atomics one step apart are
/// merged.
///
/// # Examples
/// ```
/// use disjunct::DiscreteInterval;
///
/// assert_eq!(DiscreteInterval::open(0, 2), DiscreteInterval::singleton(1));
/// assert_eq!(
/// 	DiscreteInterval::singleton(1) | DiscreteInterval::singleton(2),
/// 	DiscreteInterval::closed(1, 2)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DiscreteDomain;

impl<T> Domain<T> for DiscreteDomain
where
	T: PartialOrd + Clone + Discrete,
{
	fn canonicalize(atomic: Atomic<T>) -> Atomic<T> {
		if atomic.is_empty() {
			return atomic;
		}

		let (left, lower, upper, right) = atomic.into_parts();

		let (left, lower) = match (left.is_open(), lower) {
			(true, Value::Finite(point)) => match point.up() {
				Some(next) => (Bound::Closed, Value::Finite(next)),
				None => return Atomic::empty(),
			},
			(_, lower) => (left, lower),
		};
		let (right, upper) = match (right.is_open(), upper) {
			(true, Value::Finite(point)) => match point.down() {
				Some(previous) => (Bound::Closed, Value::Finite(previous)),
				None => return Atomic::empty(),
			},
			(_, upper) => (right, upper),
		};

		Atomic::canonical(left, lower, upper, right)
	}

	fn mergeable(a: &Atomic<T>, b: &Atomic<T>) -> bool {
		if a.touches_or_overlaps(b) {
			return true;
		}

		let (first, second) = a.sorted_with(b);

		if first.right().is_open() || second.left().is_open() {
			return false;
		}

		match first.upper().finite().and_then(Discrete::up) {
			Some(next) => Value::Finite(next).total_cmp(second.lower()) == Ordering::Equal,
			None => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn a(left: Bound, lower: i8, upper: i8, right: Bound) -> Atomic<i8> {
		Atomic::new(left, lower, upper, right)
	}

	#[test]
	fn discrete_canonicalize() {
		assert_eq!(
			DiscreteDomain::canonicalize(a(Bound::Open, 0, 2, Bound::Open)),
			a(Bound::Closed, 1, 1, Bound::Closed)
		);
		assert_eq!(
			DiscreteDomain::canonicalize(a(Bound::Open, 1, 2, Bound::Closed)),
			a(Bound::Closed, 2, 2, Bound::Closed)
		);
		assert_eq!(
			DiscreteDomain::canonicalize(a(Bound::Open, 1, 2, Bound::Open)),
			Atomic::empty()
		);
		assert_eq!(
			DiscreteDomain::canonicalize(Atomic::<i8>::new(
				Bound::Open,
				Value::Finite(i8::MAX),
				Value::PosInf,
				Bound::Open
			)),
			Atomic::empty()
		);
		assert_eq!(
			DiscreteDomain::canonicalize(Atomic::<i8>::new(
				Bound::Open,
				Value::NegInf,
				Value::Finite(3),
				Bound::Open
			)),
			Atomic::<i8>::new(Bound::Open, Value::NegInf, Value::Finite(2), Bound::Closed)
		);
	}

	#[test]
	fn discrete_mergeable() {
		let one = a(Bound::Closed, 1, 1, Bound::Closed);
		let two = a(Bound::Closed, 2, 2, Bound::Closed);
		let four = a(Bound::Closed, 4, 4, Bound::Closed);

		assert!(DiscreteDomain::mergeable(&one, &two));
		assert!(DiscreteDomain::mergeable(&two, &one));
		assert!(!DiscreteDomain::mergeable(&two, &four));
		assert!(!ContinuousDomain::mergeable(&one, &two));
	}
}
