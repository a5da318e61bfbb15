//! A module containing [`Interval`], a canonical disjunction of atomic
//! intervals, and the free functions used to construct one.
//!
//! Every [`Interval`] is kept in a single canonical form: its atomic
//! components are sorted, non-empty and pairwise non-mergeable, so two
//! intervals are equal exactly when they contain the same points.
//!
//! # Examples
//! ```
//! use disjunct::{closed, closedopen, empty, open};
//!
//! let interval = closed(0, 2) | closed(5, 6) | open(2, 3);
//!
//! assert_eq!(interval.len(), 2);
//! assert_eq!(interval, closedopen(0, 3) | closed(5, 6));
//! assert!(interval.contains_value(&5));
//! assert!(!interval.contains_value(&4));
//!
//! assert_eq!(closed(2, 1), empty());
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::{Bound as RangeBound, RangeBounds};

use smallvec::{smallvec, SmallVec};

use crate::atomic::Atomic;
use crate::bound::Bound;
use crate::domain::{ContinuousDomain, Domain};
use crate::error::IntervalError;
use crate::utils::incomparable_panic;
use crate::value::Value;

mod ops;
mod replace;

pub use replace::{Applied, Replace};

pub(crate) type Atomics<T> = SmallVec<[Atomic<T>; 2]>;

/// A union of disjoint atomic intervals, kept in canonical form.
///
/// The canonical form is maintained by every constructor: components are
/// sorted, empty components are dropped and any two components that the
/// domain `D` considers mergeable are fused. See [`Domain`] for how
/// [`ContinuousDomain`] (the default) and
/// [`DiscreteDomain`](crate::DiscreteDomain) differ.
///
/// `Interval`s are immutable values, every operation returns a new one.
///
/// # Examples
/// ```
/// use disjunct::{closed, open, Bound, Value};
///
/// let interval = closed(1, 2) | closed(3, 4) | closed(2, 3);
///
/// assert!(interval.is_atomic());
/// assert_eq!(interval.left(), Bound::Closed);
/// assert_eq!(interval.lower(), &Value::Finite(1));
/// assert_eq!(interval.upper(), &Value::Finite(4));
///
/// assert_eq!(!closed(0, 1), open(Value::NegInf, 0) | open(1, Value::PosInf));
/// ```
pub struct Interval<T, D = ContinuousDomain> {
	/// Never empty, the empty interval holds exactly one empty atomic.
	atomics: Atomics<T>,
	phantom: PhantomData<D>,
}

/// Creates the interval `[lower, upper]`.
///
/// # Panics
///
/// Panics if `lower` and `upper` are not comparable, see
/// [`IntervalError::TypeMismatch`].
pub fn closed<T, L, U>(lower: L, upper: U) -> Interval<T>
where
	T: PartialOrd + Clone,
	L: Into<Value<T>>,
	U: Into<Value<T>>,
{
	Interval::closed(lower, upper)
}

/// Creates the interval `(lower, upper)`.
///
/// # Panics
///
/// Panics if `lower` and `upper` are not comparable, see
/// [`IntervalError::TypeMismatch`].
pub fn open<T, L, U>(lower: L, upper: U) -> Interval<T>
where
	T: PartialOrd + Clone,
	L: Into<Value<T>>,
	U: Into<Value<T>>,
{
	Interval::open(lower, upper)
}

/// Creates the interval `(lower, upper]`.
///
/// # Panics
///
/// Panics if `lower` and `upper` are not comparable, see
/// [`IntervalError::TypeMismatch`].
pub fn openclosed<T, L, U>(lower: L, upper: U) -> Interval<T>
where
	T: PartialOrd + Clone,
	L: Into<Value<T>>,
	U: Into<Value<T>>,
{
	Interval::openclosed(lower, upper)
}

/// Creates the interval `[lower, upper)`.
///
/// # Panics
///
/// Panics if `lower` and `upper` are not comparable, see
/// [`IntervalError::TypeMismatch`].
pub fn closedopen<T, L, U>(lower: L, upper: U) -> Interval<T>
where
	T: PartialOrd + Clone,
	L: Into<Value<T>>,
	U: Into<Value<T>>,
{
	Interval::closedopen(lower, upper)
}

/// Creates the interval `[value]`.
///
/// # Panics
///
/// Panics if `value` is not comparable with itself, such as a float `NaN`.
pub fn singleton<T>(value: T) -> Interval<T>
where
	T: PartialOrd + Clone,
{
	Interval::singleton(value)
}

/// Creates the empty interval.
pub fn empty<T>() -> Interval<T> {
	Interval::empty()
}

impl<T, D> Interval<T, D> {
	/// Creates the empty interval.
	pub fn empty() -> Self {
		Interval::from_sorted_disjoint(SmallVec::new())
	}

	/// Wraps components which are already sorted, canonical and pairwise
	/// non-mergeable.
	pub(crate) fn from_sorted_disjoint(atomics: Atomics<T>) -> Self {
		let atomics = if atomics.is_empty() {
			smallvec![Atomic::empty()]
		} else {
			atomics
		};

		Interval {
			atomics,
			phantom: PhantomData,
		}
	}

	/// Returns `true` if the interval contains no point.
	pub fn is_empty(&self) -> bool {
		// only the empty atomic starts at +inf
		matches!(self.atomics[0].lower(), Value::PosInf)
	}

	/// Returns `true` if the interval is made of a single atomic interval.
	/// The empty interval is atomic.
	pub fn is_atomic(&self) -> bool {
		self.atomics.len() == 1
	}

	/// The number of atomic components, `0` for the empty interval.
	pub fn len(&self) -> usize {
		if self.is_empty() {
			0
		} else {
			self.atomics.len()
		}
	}

	/// The atomic components in ascending order, none for the empty
	/// interval.
	pub fn atomics(&self) -> &[Atomic<T>] {
		if self.is_empty() {
			&[]
		} else {
			&self.atomics
		}
	}

	/// The left bound kind of the enclosure.
	pub fn left(&self) -> Bound {
		self.first().left()
	}
	/// The lower bound value of the enclosure, `+inf` for the empty
	/// interval.
	pub fn lower(&self) -> &Value<T> {
		self.first().lower()
	}
	/// The upper bound value of the enclosure, `-inf` for the empty
	/// interval.
	pub fn upper(&self) -> &Value<T> {
		self.last().upper()
	}
	/// The right bound kind of the enclosure.
	pub fn right(&self) -> Bound {
		self.last().right()
	}

	fn first(&self) -> &Atomic<T> {
		&self.atomics[0]
	}
	fn last(&self) -> &Atomic<T> {
		&self.atomics[self.atomics.len() - 1]
	}

	/// Returns an iterator over the atomic components, each as its own
	/// single-component `Interval`.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, singleton, Interval};
	///
	/// let interval = closed(0, 1) | singleton(3);
	///
	/// let components: Vec<Interval<i32>> = interval.iter().collect();
	/// assert_eq!(components, [closed(0, 1), singleton(3)]);
	///
	/// assert_eq!(Interval::<i32>::empty().iter().count(), 0);
	/// ```
	pub fn iter(&self) -> Iter<'_, T, D> {
		Iter {
			atomics: self.atomics().iter(),
			phantom: PhantomData,
		}
	}

	fn resolve_index(&self, index: isize) -> Option<usize> {
		let len = self.len() as isize;
		let resolved = if index < 0 { index + len } else { index };

		(0..len).contains(&resolved).then_some(resolved as usize)
	}

	/// Resolves a negative index then clamps it into `0..=len`.
	fn clamp_slice_bound(&self, index: isize) -> usize {
		let len = self.len() as isize;
		let resolved = if index < 0 { index + len } else { index };

		resolved.clamp(0, len) as usize
	}
}

impl<T, D> Interval<T, D>
where
	T: Clone,
{
	/// Returns the atomic component at `index` as an `Interval`. Negative
	/// indexes count from the end.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, singleton, IntervalError};
	///
	/// let interval = closed(0, 1) | singleton(3) | closed(5, 6);
	///
	/// assert_eq!(interval.get(1), Ok(singleton(3)));
	/// assert_eq!(interval.get(-1), Ok(closed(5, 6)));
	/// assert_eq!(
	/// 	interval.get(3),
	/// 	Err(IntervalError::IndexOutOfRange { index: 3, len: 3 })
	/// );
	/// ```
	pub fn get(&self, index: isize) -> Result<Self, IntervalError> {
		let resolved =
			self.resolve_index(index)
				.ok_or(IntervalError::IndexOutOfRange {
					index,
					len: self.len(),
				})?;

		Ok(Interval::from_sorted_disjoint(smallvec![
			self.atomics[resolved].clone()
		]))
	}

	/// Returns the union of the atomic components whose indexes fall in
	/// `range`. Negative indexes count from the end, and like slicing a
	/// Python list out of range bounds are clamped and a reversed range
	/// gives the empty interval.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, singleton};
	///
	/// let interval = closed(0, 1) | singleton(3) | closed(5, 6);
	///
	/// assert_eq!(interval.slice(1..), singleton(3) | closed(5, 6));
	/// assert_eq!(interval.slice(..-1), closed(0, 1) | singleton(3));
	/// assert_eq!(interval.slice(..10), interval);
	/// assert!(interval.slice(1..1).is_empty());
	/// assert!(interval.slice(2..1).is_empty());
	/// ```
	pub fn slice<R>(&self, range: R) -> Self
	where
		R: RangeBounds<isize>,
	{
		let start = match range.start_bound() {
			RangeBound::Included(index) => self.clamp_slice_bound(*index),
			RangeBound::Excluded(index) => self.clamp_slice_bound(index.saturating_add(1)),
			RangeBound::Unbounded => 0,
		};
		let end = match range.end_bound() {
			RangeBound::Included(index) => self.clamp_slice_bound(index.saturating_add(1)),
			RangeBound::Excluded(index) => self.clamp_slice_bound(*index),
			RangeBound::Unbounded => self.len(),
		};

		if start >= end {
			return Interval::empty();
		}

		Interval::from_sorted_disjoint(self.atomics()[start..end].iter().cloned().collect())
	}
}

impl<T, D> Interval<T, D>
where
	T: PartialOrd + Clone,
	D: Domain<T>,
{
	/// Creates an interval from a single atomic interval given by its four
	/// components.
	///
	/// # Panics
	///
	/// Panics if `lower` and `upper` are not comparable, see
	/// [`IntervalError::TypeMismatch`].
	///
	/// # Examples
	/// ```
	/// use disjunct::{closedopen, Bound, Interval};
	///
	/// assert_eq!(
	/// 	Interval::from_atomic(Bound::Closed, 0, 1, Bound::Open),
	/// 	closedopen(0, 1)
	/// );
	/// ```
	pub fn from_atomic<L, U>(left: Bound, lower: L, upper: U, right: Bound) -> Self
	where
		L: Into<Value<T>>,
		U: Into<Value<T>>,
	{
		Interval::from_atomics_unchecked([Atomic::new(left, lower, upper, right)])
	}

	/// Creates an interval from a single atomic interval given by its four
	/// components, failing with [`IntervalError::TypeMismatch`] if the
	/// bound values cannot be compared.
	pub fn try_from_atomic<L, U>(
		left: Bound,
		lower: L,
		upper: U,
		right: Bound,
	) -> Result<Self, IntervalError>
	where
		L: Into<Value<T>>,
		U: Into<Value<T>>,
	{
		Interval::try_from_atomics([Atomic::try_new(left, lower, upper, right)?])
	}

	/// Creates the interval `[lower, upper]`.
	///
	/// # Panics
	///
	/// Panics if `lower` and `upper` are not comparable, see
	/// [`IntervalError::TypeMismatch`].
	pub fn closed<L, U>(lower: L, upper: U) -> Self
	where
		L: Into<Value<T>>,
		U: Into<Value<T>>,
	{
		Interval::from_atomic(Bound::Closed, lower, upper, Bound::Closed)
	}

	/// Creates the interval `(lower, upper)`.
	///
	/// # Panics
	///
	/// Panics if `lower` and `upper` are not comparable, see
	/// [`IntervalError::TypeMismatch`].
	pub fn open<L, U>(lower: L, upper: U) -> Self
	where
		L: Into<Value<T>>,
		U: Into<Value<T>>,
	{
		Interval::from_atomic(Bound::Open, lower, upper, Bound::Open)
	}

	/// Creates the interval `(lower, upper]`.
	///
	/// # Panics
	///
	/// Panics if `lower` and `upper` are not comparable, see
	/// [`IntervalError::TypeMismatch`].
	pub fn openclosed<L, U>(lower: L, upper: U) -> Self
	where
		L: Into<Value<T>>,
		U: Into<Value<T>>,
	{
		Interval::from_atomic(Bound::Open, lower, upper, Bound::Closed)
	}

	/// Creates the interval `[lower, upper)`.
	///
	/// # Panics
	///
	/// Panics if `lower` and `upper` are not comparable, see
	/// [`IntervalError::TypeMismatch`].
	pub fn closedopen<L, U>(lower: L, upper: U) -> Self
	where
		L: Into<Value<T>>,
		U: Into<Value<T>>,
	{
		Interval::from_atomic(Bound::Closed, lower, upper, Bound::Open)
	}

	/// Creates the interval `[value]`.
	///
	/// # Panics
	///
	/// Panics if `value` is not comparable with itself, such as a float
	/// `NaN`.
	pub fn singleton(value: T) -> Self {
		Interval::from_atomic(Bound::Closed, value.clone(), value, Bound::Closed)
	}

	/// Creates the interval containing every point of every given atomic
	/// interval, failing with [`IntervalError::TypeMismatch`] if two of them
	/// cannot be ordered.
	///
	/// This is the merge constructor every other constructor and set
	/// operation goes through: components are canonicalized by the domain,
	/// empty ones dropped, the rest sorted and swept once, fusing each with
	/// the run before it whenever the domain says they are mergeable.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, Atomic, Bound, Interval};
	///
	/// let interval = Interval::try_from_atomics([
	/// 	Atomic::new(Bound::Closed, 3, 4, Bound::Closed),
	/// 	Atomic::new(Bound::Closed, 1, 2, Bound::Closed),
	/// 	Atomic::new(Bound::Closed, 2, 3, Bound::Closed),
	/// ]);
	///
	/// assert_eq!(interval, Ok(closed(1, 4)));
	/// ```
	pub fn try_from_atomics<I>(atomics: I) -> Result<Self, IntervalError>
	where
		I: IntoIterator<Item = Atomic<T>>,
	{
		let mut sorted: Atomics<T> = atomics
			.into_iter()
			.map(D::canonicalize)
			.filter(|atomic| !atomic.is_empty())
			.collect();

		let mut incomparable = false;
		sorted.sort_by(|a, b| {
			a.try_sweep_cmp(b).unwrap_or_else(|| {
				incomparable = true;
				Ordering::Equal
			})
		});
		if incomparable {
			return Err(IntervalError::TypeMismatch);
		}

		let input_len = sorted.len();
		let mut merged = Atomics::new();

		let mut sorted = sorted.into_iter();
		if let Some(mut current) = sorted.next() {
			for next in sorted {
				if D::mergeable(&current, &next) {
					current = current.hull(&next);
				} else {
					merged.push(core::mem::replace(&mut current, next));
				}
			}
			merged.push(current);
		}

		tracing::trace!(input_len, output_len = merged.len(), "merged atomic intervals");

		Ok(Interval::from_sorted_disjoint(merged))
	}

	/// [`Interval::try_from_atomics()`] for atomics already known to be
	/// comparable with each other.
	pub(crate) fn from_atomics_unchecked<I>(atomics: I) -> Self
	where
		I: IntoIterator<Item = Atomic<T>>,
	{
		Interval::try_from_atomics(atomics).unwrap_or_else(|_| incomparable_panic())
	}

	/// The smallest atomic interval containing this interval.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, open, openclosed};
	///
	/// assert_eq!((open(0, 1) | closed(2, 3)).enclosure(), openclosed(0, 3));
	/// ```
	pub fn enclosure(&self) -> Self {
		Interval::from_sorted_disjoint(smallvec![self.enclosure_atomic()])
	}

	pub(crate) fn enclosure_atomic(&self) -> Atomic<T> {
		if self.is_empty() {
			return Atomic::empty();
		}

		Atomic::canonical(
			self.left(),
			self.lower().clone(),
			self.upper().clone(),
			self.right(),
		)
	}
}

impl<T, D> Default for Interval<T, D> {
	fn default() -> Self {
		Interval::empty()
	}
}

impl<T, D> Clone for Interval<T, D>
where
	T: Clone,
{
	fn clone(&self) -> Self {
		Interval {
			atomics: self.atomics.clone(),
			phantom: PhantomData,
		}
	}
}

impl<T, D> PartialEq for Interval<T, D>
where
	T: PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.atomics == other.atomics
	}
}

impl<T, D> Eq for Interval<T, D> where T: Eq {}

impl<T, D> Hash for Interval<T, D>
where
	T: Hash,
{
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.atomics.hash(state);
	}
}

impl<T, D> fmt::Debug for Interval<T, D>
where
	T: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Interval").field(&self.atomics()).finish()
	}
}

/// Formats an interval the usual mathematical way, `[0,1) | [2]` or `()`
/// when empty.
impl<T, D> fmt::Display for Interval<T, D>
where
	T: fmt::Display + PartialEq,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_empty() {
			return f.write_str("()");
		}

		for (i, atomic) in self.atomics().iter().enumerate() {
			if i > 0 {
				f.write_str(" | ")?;
			}

			if atomic.lower() == atomic.upper() {
				write!(f, "[{}]", atomic.lower())?;
			} else {
				let open = match atomic.left() {
					Bound::Closed => '[',
					Bound::Open => '(',
				};
				let close = match atomic.right() {
					Bound::Closed => ']',
					Bound::Open => ')',
				};
				write!(f, "{open}{},{}{close}", atomic.lower(), atomic.upper())?;
			}
		}

		Ok(())
	}
}

impl<T, D> FromIterator<Interval<T, D>> for Interval<T, D>
where
	T: PartialOrd + Clone,
	D: Domain<T>,
{
	fn from_iter<I: IntoIterator<Item = Interval<T, D>>>(iter: I) -> Self {
		Interval::from_atomics_unchecked(
			iter.into_iter()
				.flat_map(|interval| interval.atomics.into_iter()),
		)
	}
}

/// # Panics
///
/// Panics if two of the atomics cannot be ordered, use
/// [`Interval::try_from_atomics()`] to handle that case.
impl<T, D> FromIterator<Atomic<T>> for Interval<T, D>
where
	T: PartialOrd + Clone,
	D: Domain<T>,
{
	fn from_iter<I: IntoIterator<Item = Atomic<T>>>(iter: I) -> Self {
		Interval::from_atomics_unchecked(iter)
	}
}

impl<'a, T, D> IntoIterator for &'a Interval<T, D>
where
	T: Clone,
{
	type Item = Interval<T, D>;
	type IntoIter = Iter<'a, T, D>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// An iterator over the atomic components of an [`Interval`], see
/// [`Interval::iter()`].
pub struct Iter<'a, T, D> {
	atomics: core::slice::Iter<'a, Atomic<T>>,
	phantom: PhantomData<D>,
}

impl<T, D> Iterator for Iter<'_, T, D>
where
	T: Clone,
{
	type Item = Interval<T, D>;

	fn next(&mut self) -> Option<Self::Item> {
		self.atomics
			.next()
			.map(|atomic| Interval::from_sorted_disjoint(smallvec![atomic.clone()]))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.atomics.size_hint()
	}
}

impl<T, D> DoubleEndedIterator for Iter<'_, T, D>
where
	T: Clone,
{
	fn next_back(&mut self) -> Option<Self::Item> {
		self.atomics
			.next_back()
			.map(|atomic| Interval::from_sorted_disjoint(smallvec![atomic.clone()]))
	}
}

impl<T, D> ExactSizeIterator for Iter<'_, T, D> where T: Clone {}
impl<T, D> FusedIterator for Iter<'_, T, D> where T: Clone {}

#[cfg(feature = "serde")]
mod serde {
	use alloc::vec::Vec;

	use serde::de::Error;
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	use super::Interval;
	use crate::atomic::Atomic;
	use crate::domain::Domain;

	impl<T, D> Serialize for Interval<T, D>
	where
		T: Serialize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			self.atomics().serialize(serializer)
		}
	}

	impl<'de, T, D> Deserialize<'de> for Interval<T, D>
	where
		T: Deserialize<'de> + PartialOrd + Clone,
		D: Domain<T>,
	{
		fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
		where
			De: Deserializer<'de>,
		{
			let atomics = Vec::<Atomic<T>>::deserialize(deserializer)?;

			Interval::try_from_atomics(atomics).map_err(De::Error::custom)
		}
	}
}
