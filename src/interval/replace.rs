//! [`Interval::replace()`] and [`Interval::apply()`], the two ways of
//! deriving a new interval from the bounds of an existing one.

use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;

use crate::atomic::Atomic;
use crate::bound::Bound;
use crate::domain::Domain;
use crate::error::IntervalError;
use crate::interval::Interval;
use crate::value::Value;

enum Field<'a, X> {
	Keep,
	Set(X),
	With(Box<dyn FnOnce(X) -> X + 'a>),
}

impl<X> Field<'_, X> {
	fn resolve(self, current: X, skip_transform: bool) -> X {
		match self {
			Field::Keep => current,
			Field::Set(x) => x,
			Field::With(_) if skip_transform => current,
			Field::With(f) => f(current),
		}
	}
}

/// A builder returned by [`Interval::replace()`] describing new enclosure
/// bounds for an interval.
///
/// Each of the four bounds can be kept (the default), set to a new value or
/// computed from its current value with a transform. Transforms on `lower`
/// and `upper` are not called on infinite bounds unless
/// [`Replace::ignore_inf()`] is set to `false`.
///
/// Nothing is computed until [`Replace::build()`] is called.
///
/// # Examples
/// ```
/// use disjunct::{closed, closedopen, openclosed, Bound};
///
/// let interval = closed(0, 2);
///
/// assert_eq!(
/// 	interval.replace().right(Bound::Open).build(),
/// 	Ok(closedopen(0, 2))
/// );
/// assert_eq!(
/// 	interval
/// 		.replace()
/// 		.left_with(|bound| !bound)
/// 		.upper_with(|upper| upper.map(|x| x * 2))
/// 		.build(),
/// 	Ok(openclosed(0, 4))
/// );
/// ```
#[must_use = "a Replace does nothing until built"]
pub struct Replace<'a, T, D> {
	interval: &'a Interval<T, D>,
	left: Field<'a, Bound>,
	lower: Field<'a, Value<T>>,
	upper: Field<'a, Value<T>>,
	right: Field<'a, Bound>,
	ignore_inf: bool,
}

impl<'a, T, D> Replace<'a, T, D>
where
	T: PartialOrd + Clone,
	D: Domain<T>,
{
	/// Sets the new left bound kind.
	pub fn left(mut self, left: Bound) -> Self {
		self.left = Field::Set(left);
		self
	}
	/// Computes the new left bound kind from the current one.
	pub fn left_with<F>(mut self, f: F) -> Self
	where
		F: FnOnce(Bound) -> Bound + 'a,
	{
		self.left = Field::With(Box::new(f));
		self
	}

	/// Sets the new lower bound value.
	pub fn lower<L>(mut self, lower: L) -> Self
	where
		L: Into<Value<T>>,
	{
		self.lower = Field::Set(lower.into());
		self
	}
	/// Computes the new lower bound value from the current one.
	pub fn lower_with<F>(mut self, f: F) -> Self
	where
		F: FnOnce(Value<T>) -> Value<T> + 'a,
	{
		self.lower = Field::With(Box::new(f));
		self
	}

	/// Sets the new upper bound value.
	pub fn upper<U>(mut self, upper: U) -> Self
	where
		U: Into<Value<T>>,
	{
		self.upper = Field::Set(upper.into());
		self
	}
	/// Computes the new upper bound value from the current one.
	pub fn upper_with<F>(mut self, f: F) -> Self
	where
		F: FnOnce(Value<T>) -> Value<T> + 'a,
	{
		self.upper = Field::With(Box::new(f));
		self
	}

	/// Sets the new right bound kind.
	pub fn right(mut self, right: Bound) -> Self {
		self.right = Field::Set(right);
		self
	}
	/// Computes the new right bound kind from the current one.
	pub fn right_with<F>(mut self, f: F) -> Self
	where
		F: FnOnce(Bound) -> Bound + 'a,
	{
		self.right = Field::With(Box::new(f));
		self
	}

	/// Whether transforms given to [`Replace::lower_with()`] and
	/// [`Replace::upper_with()`] are skipped for infinite bounds, `true` by
	/// default.
	pub fn ignore_inf(mut self, ignore_inf: bool) -> Self {
		self.ignore_inf = ignore_inf;
		self
	}

	/// Builds the new interval.
	///
	/// An atomic interval is simply rebuilt from the new bounds. A
	/// non-atomic one is restricted to the new enclosure, then its first
	/// and last components are stretched to reach the new lower and upper
	/// bounds.
	///
	/// Fails with [`IntervalError::InvalidArgument`] if the new bounds
	/// cannot be compared with each other.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, Value};
	///
	/// let interval = closed(0, 1) | closed(3, 4) | closed(6, 7);
	///
	/// assert_eq!(
	/// 	interval.replace().lower(-1).upper(5).build(),
	/// 	Ok(closed(-1, 1) | closed(3, 5))
	/// );
	/// assert_eq!(
	/// 	interval.replace().upper(Value::PosInf).build(),
	/// 	Ok(closed(0, 1) | closed(3, 4) | closed(6, Value::PosInf))
	/// );
	/// ```
	pub fn build(self) -> Result<Interval<T, D>, IntervalError> {
		let (left, lower, upper, right) = self.interval.enclosure_atomic().into_parts();

		let skip_lower = self.ignore_inf && lower.is_infinite();
		let skip_upper = self.ignore_inf && upper.is_infinite();

		let left = self.left.resolve(left, false);
		let lower = self.lower.resolve(lower, skip_lower);
		let upper = self.upper.resolve(upper, skip_upper);
		let right = self.right.resolve(right, false);

		let new = Atomic::try_new(left, lower, upper, right)
			.map_err(|error| IntervalError::InvalidArgument(format!("replace: {error}")))?;

		if self.interval.is_atomic() {
			return Ok(Interval::from_atomics_unchecked([new]));
		}

		let restricted =
			self.interval & Interval::<T, D>::from_atomics_unchecked([new.clone()]);

		if restricted.is_atomic() {
			return Ok(Interval::from_atomics_unchecked([new]));
		}

		let (left, lower, upper, right) = new.into_parts();
		let atomics = restricted.atomics();
		let (first, last) = (&atomics[0], &atomics[atomics.len() - 1]);

		let lowest = Atomic::canonical(left, lower, first.upper().clone(), first.right());
		let highest = Atomic::canonical(last.left(), last.lower().clone(), upper, right);
		let middle = atomics[1..atomics.len() - 1].iter().cloned();

		Ok(Interval::from_atomics_unchecked(
			core::iter::once(lowest)
				.chain(middle)
				.chain(core::iter::once(highest)),
		))
	}
}

/// What the closure given to [`Interval::apply()`] may return for each
/// component: an interval, or the four parts of an atomic interval.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied<T, D> {
	/// A whole interval, possibly empty or non-atomic.
	Interval(Interval<T, D>),
	/// The `(left, lower, upper, right)` parts of an atomic interval.
	Bounds(Bound, Value<T>, Value<T>, Bound),
}

impl<T, D> From<Interval<T, D>> for Applied<T, D> {
	fn from(interval: Interval<T, D>) -> Self {
		Applied::Interval(interval)
	}
}

impl<T, D> From<(Bound, Value<T>, Value<T>, Bound)> for Applied<T, D> {
	fn from((left, lower, upper, right): (Bound, Value<T>, Value<T>, Bound)) -> Self {
		Applied::Bounds(left, lower, upper, right)
	}
}

impl<T, D> Interval<T, D>
where
	T: PartialOrd + Clone,
	D: Domain<T>,
{
	/// Starts describing new enclosure bounds for this interval, see
	/// [`Replace`].
	pub fn replace(&self) -> Replace<'_, T, D> {
		Replace {
			interval: self,
			left: Field::Keep,
			lower: Field::Keep,
			upper: Field::Keep,
			right: Field::Keep,
			ignore_inf: true,
		}
	}

	/// Calls `f` on every atomic component and returns the union of the
	/// results.
	///
	/// Fails with [`IntervalError::InvalidArgument`] if `f` returns bounds
	/// which cannot be compared with each other.
	///
	/// # Examples
	/// ```
	/// use disjunct::closed;
	///
	/// let interval = closed(0, 1) | closed(3, 4);
	///
	/// // shifting every component right
	/// let shifted = interval.apply(|component| {
	/// 	(
	/// 		component.left(),
	/// 		component.lower().map(|x| x + 1),
	/// 		component.upper().map(|x| x + 1),
	/// 		component.right(),
	/// 	)
	/// });
	/// assert_eq!(shifted, Ok(closed(1, 2) | closed(4, 5)));
	///
	/// // components which grow into each other are merged
	/// let grown = interval.apply(|component| {
	/// 	component.replace().upper_with(|x| x.map(|x| x + 2)).build().unwrap()
	/// });
	/// assert_eq!(grown, Ok(closed(0, 6)));
	/// ```
	pub fn apply<F, R>(&self, mut f: F) -> Result<Self, IntervalError>
	where
		F: FnMut(Interval<T, D>) -> R,
		R: Into<Applied<T, D>>,
	{
		let mut atomics = Vec::new();

		for component in self.iter() {
			match f(component).into() {
				Applied::Interval(interval) => {
					atomics.extend(interval.atomics().iter().cloned());
				}
				Applied::Bounds(left, lower, upper, right) => {
					let atomic = Atomic::try_new(left, lower, upper, right).map_err(|error| {
						IntervalError::InvalidArgument(format!("apply: {error}"))
					})?;
					atomics.push(atomic);
				}
			}
		}

		Interval::try_from_atomics(atomics)
			.map_err(|error| IntervalError::InvalidArgument(format!("apply: {error}")))
	}
}
