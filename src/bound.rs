//! A module containing [`Bound`], the kind of an interval endpoint.

use core::fmt;
use core::ops::Not;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether an endpoint of an interval is part of the interval or not.
///
/// `!` flips a bound to the other kind.
///
/// # Examples
/// ```
/// use disjunct::Bound;
///
/// assert_eq!(!Bound::Closed, Bound::Open);
/// assert_eq!(!!Bound::Open, Bound::Open);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Bound {
	/// The endpoint is included.
	Closed,
	/// The endpoint is excluded.
	Open,
}

impl Bound {
	/// Returns `true` for [`Bound::Closed`].
	pub fn is_closed(self) -> bool {
		self == Bound::Closed
	}
	/// Returns `true` for [`Bound::Open`].
	pub fn is_open(self) -> bool {
		self == Bound::Open
	}
}

impl Not for Bound {
	type Output = Bound;

	fn not(self) -> Self::Output {
		match self {
			Bound::Closed => Bound::Open,
			Bound::Open => Bound::Closed,
		}
	}
}

impl fmt::Display for Bound {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Bound::Closed => f.write_str("CLOSED"),
			Bound::Open => f.write_str("OPEN"),
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn not_is_involutive() {
		for bound in [Bound::Closed, Bound::Open] {
			assert_eq!(!!bound, bound);
			assert_ne!(!bound, bound);
		}
	}

	#[test]
	fn predicates() {
		assert!(Bound::Closed.is_closed());
		assert!(!Bound::Closed.is_open());
		assert!(Bound::Open.is_open());
		assert!(!Bound::Open.is_closed());
	}
}
