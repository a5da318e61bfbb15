//! A module containing [`Value`], a point of the bound domain extended with
//! the two infinities.

use core::cmp::Ordering;
use core::fmt;
use core::ops::Neg;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::incomparable_panic;

/// A bound value: either a finite point of type `T` or one of the two
/// infinities.
///
/// [`Value::NegInf`] is smaller, and [`Value::PosInf`] greater, than every
/// finite value. The infinities are plain enum variants so they are equal
/// to themselves and hash consistently whatever `T` is.
///
/// Any `T` converts into a finite `Value<T>`, so the constructors of this
/// crate accept both plain points and infinities.
///
/// # Examples
/// ```
/// use disjunct::Value;
///
/// assert!(Value::NegInf < Value::Finite(i32::MIN));
/// assert!(Value::Finite(i32::MAX) < Value::PosInf);
/// assert_eq!(-Value::<i32>::PosInf, Value::NegInf);
/// assert_eq!(Value::from(4), Value::Finite(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value<T> {
	/// Negative infinity.
	NegInf,
	/// A finite point.
	Finite(T),
	/// Positive infinity.
	PosInf,
}

impl<T> Value<T> {
	/// Returns `true` for either infinity.
	pub fn is_infinite(&self) -> bool {
		!self.is_finite()
	}
	/// Returns `true` for [`Value::Finite`].
	pub fn is_finite(&self) -> bool {
		matches!(self, Value::Finite(_))
	}

	/// Returns a reference to the finite point, if any.
	pub fn finite(&self) -> Option<&T> {
		match self {
			Value::Finite(point) => Some(point),
			_ => None,
		}
	}

	/// Consumes the value returning the finite point, if any.
	pub fn into_finite(self) -> Option<T> {
		match self {
			Value::Finite(point) => Some(point),
			_ => None,
		}
	}

	/// Maps the finite point with `f`, infinities are kept as they are.
	///
	/// # Examples
	/// ```
	/// use disjunct::Value;
	///
	/// assert_eq!(Value::Finite(1).map(|x| x + 1), Value::Finite(2));
	/// assert_eq!(Value::PosInf.map(|x: i32| x + 1), Value::PosInf);
	/// ```
	pub fn map<U, F>(self, f: F) -> Value<U>
	where
		F: FnOnce(T) -> U,
	{
		match self {
			Value::NegInf => Value::NegInf,
			Value::Finite(point) => Value::Finite(f(point)),
			Value::PosInf => Value::PosInf,
		}
	}

	/// Converts from `&Value<T>` to `Value<&T>`.
	pub fn as_ref(&self) -> Value<&T> {
		match self {
			Value::NegInf => Value::NegInf,
			Value::Finite(point) => Value::Finite(point),
			Value::PosInf => Value::PosInf,
		}
	}

	fn rank(&self) -> u8 {
		match self {
			Value::NegInf => 0,
			Value::Finite(_) => 1,
			Value::PosInf => 2,
		}
	}
}

impl<T> Value<T>
where
	T: PartialOrd,
{
	/// Compares two values, failing with `None` when the finite points are
	/// incomparable.
	pub(crate) fn try_cmp(&self, other: &Self) -> Option<Ordering> {
		match (self, other) {
			(Value::Finite(a), Value::Finite(b)) => a.partial_cmp(b),
			_ => Some(self.rank().cmp(&other.rank())),
		}
	}

	/// Compares two values that are known to be comparable.
	///
	/// # Panics
	///
	/// Panics if they are not.
	pub(crate) fn total_cmp(&self, other: &Self) -> Ordering {
		self.try_cmp(other).unwrap_or_else(|| incomparable_panic())
	}

	/// A value is valid as a bound if it is comparable with itself, which
	/// rules out things like a float `NaN`.
	pub(crate) fn is_self_comparable(&self) -> bool {
		self.try_cmp(self).is_some()
	}
}

impl<T> PartialOrd for Value<T>
where
	T: PartialOrd,
{
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		self.try_cmp(other)
	}
}

impl<T> From<T> for Value<T> {
	fn from(point: T) -> Self {
		Value::Finite(point)
	}
}

impl<T> Neg for Value<T>
where
	T: Neg<Output = T>,
{
	type Output = Value<T>;

	fn neg(self) -> Self::Output {
		match self {
			Value::NegInf => Value::PosInf,
			Value::Finite(point) => Value::Finite(-point),
			Value::PosInf => Value::NegInf,
		}
	}
}

impl<T> fmt::Display for Value<T>
where
	T: fmt::Display,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::NegInf => f.write_str("-inf"),
			Value::Finite(point) => point.fmt(f),
			Value::PosInf => f.write_str("+inf"),
		}
	}
}

#[cfg(test)]
mod tests {
	use alloc::format;

	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn infinities_are_extreme() {
		for x in [i8::MIN, -1, 0, 1, i8::MAX] {
			assert!(Value::NegInf < Value::Finite(x));
			assert!(Value::Finite(x) < Value::PosInf);
			assert!(Value::Finite(x) > Value::NegInf);
			assert!(Value::PosInf > Value::Finite(x));
		}
		assert!(Value::<i8>::NegInf < Value::PosInf);
		assert_eq!(Value::<i8>::PosInf, Value::PosInf);
		assert_eq!(Value::<i8>::NegInf, Value::NegInf);
		assert_ne!(Value::<i8>::NegInf, Value::PosInf);
	}

	#[test]
	fn finite_values_use_their_own_order() {
		assert!(Value::Finite(1) < Value::Finite(2));
		assert_eq!(
			Value::Finite(2).partial_cmp(&Value::Finite(2)),
			Some(Ordering::Equal)
		);
		assert!(Value::Finite("a") < Value::Finite("b"));
	}

	#[test]
	fn nan_is_incomparable() {
		let nan = Value::Finite(f64::NAN);

		assert_eq!(nan.partial_cmp(&Value::Finite(1.0)), None);
		assert!(!nan.is_self_comparable());
		assert!(Value::Finite(1.0).is_self_comparable());
		// infinities stay comparable with anything
		assert_eq!(nan.partial_cmp(&Value::PosInf), Some(Ordering::Less));
	}

	#[test]
	#[should_panic(expected = "not comparable")]
	fn total_cmp_panics_on_incomparable_values() {
		let _ = Value::Finite(f64::NAN).total_cmp(&Value::Finite(0.0));
	}

	#[test]
	fn neg_swaps_infinities() {
		assert_eq!(-Value::<i32>::PosInf, Value::NegInf);
		assert_eq!(-Value::<i32>::NegInf, Value::PosInf);
		assert_eq!(-Value::Finite(3), Value::Finite(-3));
	}

	#[test]
	fn display() {
		assert_eq!(format!("{}", Value::<i32>::NegInf), "-inf");
		assert_eq!(format!("{}", Value::<i32>::PosInf), "+inf");
		assert_eq!(format!("{}", Value::Finite(7)), "7");
	}
}
