//! A module containing [`Atomic`], a single contiguous interval.

use core::cmp::Ordering;

use crate::bound::Bound;
use crate::bound_ord::BoundOrd;
use crate::error::IntervalError;
use crate::utils::incomparable_panic;
use crate::value::Value;

/// A single contiguous interval described by its two endpoints and their
/// bound kinds.
///
/// An `Atomic` is always canonical:
///
/// - an endpoint at an infinity is [`Bound::Open`],
/// - every empty shape (`lower > upper`, or `lower == upper` with an open
///   side) is the single empty atomic `(Open, +inf, -inf, Open)`.
///
/// So equality and hashing are structural.
///
/// # Examples
/// ```
/// use disjunct::{Atomic, Bound, Value};
///
/// let atomic = Atomic::new(Bound::Closed, 0, Value::PosInf, Bound::Closed);
/// assert_eq!(atomic.right(), Bound::Open);
///
/// assert_eq!(Atomic::new(Bound::Open, 1, 1, Bound::Closed), Atomic::empty());
/// assert_eq!(Atomic::new(Bound::Closed, 2, 1, Bound::Closed), Atomic::empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atomic<T> {
	left: Bound,
	lower: Value<T>,
	upper: Value<T>,
	right: Bound,
}

impl<T> Atomic<T> {
	/// The canonical empty atomic interval.
	pub fn empty() -> Self {
		Atomic {
			left: Bound::Open,
			lower: Value::PosInf,
			upper: Value::NegInf,
			right: Bound::Open,
		}
	}

	/// The left bound kind.
	pub fn left(&self) -> Bound {
		self.left
	}
	/// The lower bound value.
	pub fn lower(&self) -> &Value<T> {
		&self.lower
	}
	/// The upper bound value.
	pub fn upper(&self) -> &Value<T> {
		&self.upper
	}
	/// The right bound kind.
	pub fn right(&self) -> Bound {
		self.right
	}

	/// Consumes the atomic interval returning its four components.
	pub fn into_parts(self) -> (Bound, Value<T>, Value<T>, Bound) {
		(self.left, self.lower, self.upper, self.right)
	}

	pub(crate) fn start_ord(&self) -> BoundOrd<'_, T> {
		BoundOrd::start(self.left, &self.lower)
	}
	pub(crate) fn end_ord(&self) -> BoundOrd<'_, T> {
		BoundOrd::end(self.right, &self.upper)
	}
}

impl<T> Atomic<T>
where
	T: PartialOrd + Clone,
{
	/// Creates a canonical atomic interval.
	///
	/// # Panics
	///
	/// Panics if `lower` and `upper` are not comparable with each other and
	/// with themselves, see [`IntervalError::TypeMismatch`].
	pub fn new<L, U>(left: Bound, lower: L, upper: U, right: Bound) -> Self
	where
		L: Into<Value<T>>,
		U: Into<Value<T>>,
	{
		Atomic::try_new(left, lower, upper, right)
			.unwrap_or_else(|_| incomparable_panic())
	}

	/// Creates a canonical atomic interval, failing with
	/// [`IntervalError::TypeMismatch`] if the bound values cannot be compared.
	///
	/// # Examples
	/// ```
	/// use disjunct::{Atomic, Bound, IntervalError};
	///
	/// assert_eq!(
	/// 	Atomic::try_new(Bound::Closed, 0.0, f64::NAN, Bound::Closed),
	/// 	Err(IntervalError::TypeMismatch)
	/// );
	/// assert!(Atomic::try_new(Bound::Closed, 0.0, 1.0, Bound::Closed).is_ok());
	/// ```
	pub fn try_new<L, U>(
		left: Bound,
		lower: L,
		upper: U,
		right: Bound,
	) -> Result<Self, IntervalError>
	where
		L: Into<Value<T>>,
		U: Into<Value<T>>,
	{
		let lower = lower.into();
		let upper = upper.into();

		if !lower.is_self_comparable()
			|| !upper.is_self_comparable()
			|| lower.try_cmp(&upper).is_none()
		{
			return Err(IntervalError::TypeMismatch);
		}

		Ok(Atomic::canonical(left, lower, upper, right))
	}

	/// Builds a canonical atomic from values that are known to be
	/// comparable.
	pub(crate) fn canonical(
		left: Bound,
		lower: Value<T>,
		upper: Value<T>,
		right: Bound,
	) -> Self {
		let left = if lower.is_infinite() { Bound::Open } else { left };
		let right = if upper.is_infinite() { Bound::Open } else { right };

		let atomic = Atomic {
			left,
			lower,
			upper,
			right,
		};

		if atomic.start_ord() > atomic.end_ord() {
			Atomic::empty()
		} else {
			atomic
		}
	}

	pub(crate) fn from_ords(start: BoundOrd<'_, T>, end: BoundOrd<'_, T>) -> Self {
		Atomic::canonical(
			start.bound(),
			start.value().clone(),
			end.value().clone(),
			end.bound(),
		)
	}

	/// Returns `true` if this is the empty atomic interval.
	pub fn is_empty(&self) -> bool {
		self.start_ord() > self.end_ord()
	}

	/// Returns `true` if the given value lies within this atomic interval.
	///
	/// # Examples
	/// ```
	/// use disjunct::{Atomic, Bound, Value};
	///
	/// let atomic = Atomic::new(Bound::Closed, 0, 2, Bound::Open);
	///
	/// assert!(atomic.contains_value(&Value::Finite(0)));
	/// assert!(!atomic.contains_value(&Value::Finite(2)));
	/// ```
	pub fn contains_value(&self, value: &Value<T>) -> bool {
		let point = BoundOrd::Included(value);

		point >= self.start_ord() && point <= self.end_ord()
	}

	/// Returns `true` if `other` lies entirely within this atomic interval.
	/// The empty atomic lies within everything.
	pub fn contains(&self, other: &Self) -> bool {
		other.is_empty()
			|| (self.start_ord() <= other.start_ord()
				&& other.end_ord() <= self.end_ord())
	}

	/// Returns `true` if the two atomic intervals share at least one point.
	pub fn overlaps(&self, other: &Self) -> bool {
		!self.is_empty()
			&& !other.is_empty()
			&& self.start_ord() <= other.end_ord()
			&& other.start_ord() <= self.end_ord()
	}

	/// Returns `true` if the union of the two atomic intervals is itself an
	/// atomic interval, that is if they overlap, touch, or one of them is
	/// empty.
	///
	/// # Examples
	/// ```
	/// use disjunct::{Atomic, Bound};
	///
	/// let a = Atomic::new(Bound::Closed, 0, 1, Bound::Open);
	/// let b = Atomic::new(Bound::Closed, 1, 2, Bound::Closed);
	/// let c = Atomic::new(Bound::Open, 1, 2, Bound::Closed);
	///
	/// assert!(a.touches_or_overlaps(&b));
	/// assert!(!a.touches_or_overlaps(&c));
	/// ```
	pub fn touches_or_overlaps(&self, other: &Self) -> bool {
		if self.is_empty() || other.is_empty() {
			return true;
		}

		let (first, second) = self.sorted_with(other);

		match first.upper.total_cmp(&second.lower) {
			Ordering::Equal => first.right.is_closed() || second.left.is_closed(),
			Ordering::Greater => true,
			Ordering::Less => false,
		}
	}

	/// Returns the two atomics ordered by their start, `self` first on ties.
	pub(crate) fn sorted_with<'a>(&'a self, other: &'a Self) -> (&'a Self, &'a Self) {
		if other.start_ord() < self.start_ord() {
			(other, self)
		} else {
			(self, other)
		}
	}

	/// The largest atomic interval contained in both.
	pub fn intersection(&self, other: &Self) -> Self {
		if self.is_empty() || other.is_empty() {
			return Atomic::empty();
		}

		let start = self.start_ord().max(other.start_ord());
		let end = self.end_ord().min(other.end_ord());

		Atomic::from_ords(start, end)
	}

	/// The smallest atomic interval containing both.
	pub fn hull(&self, other: &Self) -> Self {
		if self.is_empty() {
			return other.clone();
		}
		if other.is_empty() {
			return self.clone();
		}

		let start = self.start_ord().min(other.start_ord());
		let end = self.end_ord().max(other.end_ord());

		Atomic::from_ords(start, end)
	}

	/// Orders atomics by their start then by their end, the order in which
	/// the merge sweep visits them.
	pub(crate) fn try_sweep_cmp(&self, other: &Self) -> Option<Ordering> {
		match self.start_ord().try_cmp(&other.start_ord())? {
			Ordering::Equal => self.end_ord().try_cmp(&other.end_ord()),
			x => Some(x),
		}
	}
}

#[cfg(feature = "serde")]
mod serde {
	use serde::de::Error;
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	use super::Atomic;
	use crate::bound::Bound;
	use crate::value::Value;

	impl<T> Serialize for Atomic<T>
	where
		T: Serialize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			(&self.left, &self.lower, &self.upper, &self.right).serialize(serializer)
		}
	}

	// deserialized atomics go through the same validation as constructed ones
	impl<'de, T> Deserialize<'de> for Atomic<T>
	where
		T: Deserialize<'de> + PartialOrd + Clone,
	{
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			let (left, lower, upper, right) =
				<(Bound, Value<T>, Value<T>, Bound)>::deserialize(deserializer)?;

			Atomic::try_new(left, lower, upper, right).map_err(D::Error::custom)
		}
	}
}
