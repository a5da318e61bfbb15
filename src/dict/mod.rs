//! A module containing [`IntervalDict`], an ordered map from disjoint
//! intervals to values.

use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{BitOr, BitOrAssign};

use btree_monstrousity::btree_map::{IntoIter as BTreeMapIntoIter, SearchBoundCustom};
use btree_monstrousity::BTreeMap;
use itertools::Itertools;
use smallvec::smallvec;

use crate::atomic::Atomic;
use crate::bound_ord::BoundOrd;
use crate::domain::{ContinuousDomain, Domain};
use crate::error::IntervalError;
use crate::interval::{Atomics, Interval};
use crate::utils::{
	mergeable_after_comp, mergeable_before_comp, overlapping_comp,
	same_start_comp, starts_comp,
};
use crate::value::Value;

mod combine;

/// An ordered map from disjoint intervals to values, based on
/// [`BTreeMap`].
///
/// Keys are stored as disjoint non-empty atomic intervals. Assigning a
/// value to an interval overwrites whatever the interval covered before,
/// splitting existing entries where needed, and fuses the new entry with
/// neighbouring entries holding an equal value. So two dicts are equal
/// exactly when they map the same points to the same values.
///
/// The views ([`IntervalDict::items()`], [`IntervalDict::keys()`],
/// [`IntervalDict::values()`]) merge every entry holding the same value
/// into one, possibly non-atomic, interval.
///
/// # Examples
/// ```
/// use disjunct::{closed, closedopen, IntervalDict};
///
/// let mut dict = IntervalDict::new();
///
/// dict.insert(&closed(0, 3), "banana");
/// dict.insert(&closed(2, 4), "orange");
///
/// assert_eq!(
/// 	dict.items(),
/// 	[(closedopen(0, 2), &"banana"), (closed(2, 4), &"orange")]
/// );
/// assert_eq!(dict.get_at(&1), Ok(&"banana"));
/// assert_eq!(dict.get_at(&3), Ok(&"orange"));
/// assert!(dict.get_at(&5).is_err());
/// ```
///
/// [`BTreeMap`]: https://doc.rust-lang.org/std/collections/struct.BTreeMap.html
pub struct IntervalDict<T, V, D = ContinuousDomain> {
	inner: BTreeMap<Atomic<T>, V>,
	phantom: PhantomData<D>,
}

impl<T, V, D> IntervalDict<T, V, D>
where
	T: PartialOrd + Clone,
	D: Domain<T>,
{
	/// Returns a reference to the value at the given point.
	///
	/// Fails with [`IntervalError::KeyNotFound`] if no entry covers the
	/// point.
	pub fn get_at(&self, point: &T) -> Result<&V, IntervalError> {
		let point = Value::Finite(point.clone());
		if !point.is_self_comparable() {
			return Err(IntervalError::KeyNotFound);
		}

		self.inner
			.get_key_value(overlapping_comp(BoundOrd::Included(&point)))
			.map(|(_, value)| value)
			.ok_or(IntervalError::KeyNotFound)
	}

	/// Returns `true` if an entry covers the given point.
	pub fn contains_value(&self, point: &T) -> bool {
		self.get_at(point).is_ok()
	}

	/// Returns `true` if every point of `interval` is covered by an entry.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, open, IntervalDict};
	///
	/// let dict = IntervalDict::from([(closed(0, 2), 'a'), (open(2, 4), 'b')]);
	///
	/// assert!(dict.contains(&closed(1, 3)));
	/// assert!(!dict.contains(&closed(1, 4)));
	/// ```
	pub fn contains(&self, interval: &Interval<T, D>) -> bool {
		self.domain().contains(interval)
	}

	/// Returns `true` if any entry overlaps `interval`.
	pub fn overlaps(&self, interval: &Interval<T, D>) -> bool {
		interval
			.atomics()
			.iter()
			.any(|atomic| self.overlapping(atomic).next().is_some())
	}

	/// Returns the union of every key.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, openclosed, IntervalDict};
	///
	/// let dict = IntervalDict::from([
	/// 	(closed(0, 2), 'a'),
	/// 	(openclosed(2, 4), 'b'),
	/// 	(closed(6, 7), 'a'),
	/// ]);
	///
	/// assert_eq!(dict.domain(), closed(0, 4) | closed(6, 7));
	/// ```
	pub fn domain(&self) -> Interval<T, D> {
		Interval::from_atomics_unchecked(self.inner.iter().map(|(key, _)| key.clone()))
	}

	/// Returns the interval holding exactly the given value, possibly empty.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, empty, IntervalDict};
	///
	/// let dict = IntervalDict::from([
	/// 	(closed(0, 1), 'a'),
	/// 	(closed(2, 3), 'b'),
	/// 	(closed(4, 5), 'a'),
	/// ]);
	///
	/// assert_eq!(dict.find(&'a'), closed(0, 1) | closed(4, 5));
	/// assert_eq!(dict.find(&'z'), empty());
	/// ```
	pub fn find(&self, value: &V) -> Interval<T, D>
	where
		V: PartialEq,
	{
		// equal values are never stored on mergeable keys
		Interval::from_sorted_disjoint(
			self.inner
				.iter()
				.filter(|(_, inner_value)| *inner_value == value)
				.map(|(key, _)| key.clone())
				.collect(),
		)
	}

	/// Returns every distinct value together with the interval holding it,
	/// ordered by the lower bound of those intervals.
	///
	/// Values are only compared for equality, so grouping costs up to one
	/// comparison per distinct value for every stored entry.
	pub fn items(&self) -> Vec<(Interval<T, D>, &V)>
	where
		V: PartialEq,
	{
		let mut groups: Vec<(Atomics<T>, &V)> = Vec::new();
		let mut last: Option<usize> = None;

		for (key, value) in self.inner.iter() {
			let index = match last {
				Some(index) if groups[index].1 == value => index,
				_ => match groups.iter().position(|(_, group_value)| *group_value == value) {
					Some(index) => index,
					None => {
						groups.push((Atomics::new(), value));
						groups.len() - 1
					}
				},
			};

			groups[index].0.push(key.clone());
			last = Some(index);
		}

		groups
			.into_iter()
			.map(|(atomics, value)| (Interval::from_sorted_disjoint(atomics), value))
			.collect()
	}

	/// The intervals of [`IntervalDict::items()`].
	pub fn keys(&self) -> Vec<Interval<T, D>>
	where
		V: PartialEq,
	{
		self.items().into_iter().map(|(key, _)| key).collect()
	}

	/// The values of [`IntervalDict::items()`].
	pub fn values(&self) -> Vec<&V>
	where
		V: PartialEq,
	{
		let mut distinct: Vec<&V> = Vec::new();

		for (_, value) in self.inner.iter() {
			if distinct.last() != Some(&value) && !distinct.contains(&value) {
				distinct.push(value);
			}
		}

		distinct
	}

	/// The number of distinct values, that is the length of
	/// [`IntervalDict::items()`].
	pub fn len(&self) -> usize
	where
		V: PartialEq,
	{
		self.values().len()
	}

	/// Returns the entries of the dict as owned pairs, one per distinct
	/// value or, if `atomic` is set, one per atomic key.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, IntervalDict};
	///
	/// let dict = IntervalDict::from([(closed(0, 1) | closed(2, 3), 'a')]);
	///
	/// assert_eq!(dict.to_entries(false), [(closed(0, 1) | closed(2, 3), 'a')]);
	/// assert_eq!(
	/// 	dict.to_entries(true),
	/// 	[(closed(0, 1), 'a'), (closed(2, 3), 'a')]
	/// );
	/// ```
	pub fn to_entries(&self, atomic: bool) -> Vec<(Interval<T, D>, V)>
	where
		V: Clone + PartialEq,
	{
		if atomic {
			self.inner
				.iter()
				.map(|(key, value)| {
					(Interval::from_sorted_disjoint(smallvec![key.clone()]), value.clone())
				})
				.collect()
		} else {
			self.items()
				.into_iter()
				.map(|(key, value)| (key, value.clone()))
				.collect()
		}
	}

	/// Returns a new dict restricted to `interval`.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, open, IntervalDict};
	///
	/// let dict = IntervalDict::from([(closed(0, 2), 'a'), (open(2, 4), 'b')]);
	///
	/// assert_eq!(
	/// 	dict.get(&closed(1, 3)),
	/// 	IntervalDict::from([(closed(1, 2), 'a'), (disjunct::openclosed(2, 3), 'b')])
	/// );
	/// assert!(dict.get(&closed(5, 6)).is_empty());
	/// ```
	pub fn get(&self, interval: &Interval<T, D>) -> Self
	where
		V: Clone,
	{
		let mut result = IntervalDict::new();

		for atomic in interval.atomics() {
			for (key, value) in self.overlapping(atomic) {
				result.insert_unchecked(key.intersection(atomic), value.clone());
			}
		}

		result
	}

	/// Returns a new dict restricted to `interval` where every point of
	/// `interval` not covered by this dict maps to `default`.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, openclosed, IntervalDict};
	///
	/// let dict = IntervalDict::from([(closed(0, 2), 'a')]);
	///
	/// assert_eq!(
	/// 	dict.get_or(&closed(1, 4), 'z'),
	/// 	IntervalDict::from([(closed(1, 2), 'a'), (openclosed(2, 4), 'z')])
	/// );
	/// ```
	pub fn get_or(&self, interval: &Interval<T, D>, default: V) -> Self
	where
		V: Clone + PartialEq,
	{
		let mut result = self.get(interval);
		let gaps = interval - result.domain();
		result.insert(&gaps, default);

		result
	}

	/// Maps every point of `interval` to `value`.
	///
	/// Existing entries are cut where they overlap `interval`, and entries
	/// with a value equal to `value` which touch or overlap `interval` are
	/// fused with it.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, closedopen, IntervalDict};
	///
	/// let mut dict = IntervalDict::from([(closed(0, 3), "banana")]);
	///
	/// dict.insert(&closed(2, 4), "orange");
	/// assert_eq!(
	/// 	dict,
	/// 	IntervalDict::from([(closedopen(0, 2), "banana"), (closed(2, 4), "orange")])
	/// );
	///
	/// dict.insert(&closed(4, 6), "orange");
	/// assert_eq!(dict.find(&"orange"), closed(2, 6));
	/// ```
	pub fn insert(&mut self, interval: &Interval<T, D>, value: V)
	where
		V: Clone + PartialEq,
	{
		if interval.is_empty() {
			return;
		}

		let affected = interval
			.atomics()
			.iter()
			.flat_map(|atomic| self.mergeable_with(atomic))
			.dedup_by(|(x, _), (y, _)| x == y)
			.map(|(key, value)| (key.clone(), value.clone()))
			.collect::<Vec<_>>();

		let mut region = interval.clone();
		let mut removed = Vec::new();
		let mut fragments = Vec::new();

		for (key, old_value) in affected {
			let key_interval = Interval::from_sorted_disjoint(smallvec![key.clone()]);

			if old_value == value {
				region = region | key_interval;
				removed.push(key);
			} else if key_interval.overlaps(interval) {
				fragments.extend(
					(key_interval - interval)
						.atomics()
						.iter()
						.map(|fragment| (fragment.clone(), old_value.clone())),
				);
				removed.push(key);
			}
		}

		tracing::trace!(
			removed = removed.len(),
			fragments = fragments.len(),
			inserted = region.len(),
			"inserting interval into dict"
		);

		for key in removed.iter() {
			self.inner.remove(same_start_comp(key));
		}
		for (fragment, old_value) in fragments {
			self.insert_unchecked(fragment, old_value);
		}
		for atomic in region.atomics() {
			self.insert_unchecked(atomic.clone(), value.clone());
		}
	}

	/// Maps the single point `point` to `value`, see
	/// [`IntervalDict::insert()`].
	///
	/// # Panics
	///
	/// Panics if `point` is not comparable with itself, such as a float
	/// `NaN`.
	pub fn insert_at(&mut self, point: T, value: V)
	where
		V: Clone + PartialEq,
	{
		self.insert(&Interval::singleton(point), value);
	}

	/// Removes every point of `interval` from the dict, cutting the
	/// entries which overlap it.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, closedopen, openclosed, IntervalDict};
	///
	/// let mut dict = IntervalDict::from([(closed(0, 4), 'a')]);
	///
	/// dict.remove(&closed(1, 2));
	/// assert_eq!(dict.find(&'a'), closedopen(0, 1) | openclosed(2, 4));
	/// ```
	pub fn remove(&mut self, interval: &Interval<T, D>)
	where
		V: Clone,
	{
		let affected = interval
			.atomics()
			.iter()
			.flat_map(|atomic| self.overlapping(atomic))
			.dedup_by(|(x, _), (y, _)| x == y)
			.map(|(key, value)| (key.clone(), value.clone()))
			.collect::<Vec<_>>();

		let mut fragments = Vec::new();
		for (key, value) in affected.iter() {
			let key_interval = Interval::<T, D>::from_sorted_disjoint(smallvec![key.clone()]);

			fragments.extend(
				(key_interval - interval)
					.atomics()
					.iter()
					.map(|fragment| (fragment.clone(), value.clone())),
			);
		}

		tracing::trace!(
			removed = affected.len(),
			fragments = fragments.len(),
			"removing interval from dict"
		);

		for (key, _) in affected.iter() {
			self.inner.remove(same_start_comp(key));
		}
		for (fragment, value) in fragments {
			self.insert_unchecked(fragment, value);
		}
	}

	/// Removes the single point `point` from the dict.
	///
	/// Fails with [`IntervalError::KeyNotFound`], leaving the dict
	/// untouched, if no entry covers the point.
	pub fn remove_at(&mut self, point: &T) -> Result<(), IntervalError>
	where
		V: Clone,
	{
		if !self.contains_value(point) {
			return Err(IntervalError::KeyNotFound);
		}

		self.remove(&Interval::singleton(point.clone()));

		Ok(())
	}

	/// Removes `interval` from the dict returning what it covered, see
	/// [`IntervalDict::get()`].
	pub fn pop(&mut self, interval: &Interval<T, D>) -> Self
	where
		V: Clone,
	{
		let result = self.get(interval);
		self.remove(interval);

		result
	}

	/// Removes `interval` from the dict returning what it covered, see
	/// [`IntervalDict::get_or()`].
	pub fn pop_or(&mut self, interval: &Interval<T, D>, default: V) -> Self
	where
		V: Clone + PartialEq,
	{
		let result = self.get_or(interval, default);
		self.remove(interval);

		result
	}

	/// Removes the single point `point` from the dict returning its value.
	///
	/// Fails with [`IntervalError::KeyNotFound`] if no entry covers the
	/// point.
	pub fn pop_at(&mut self, point: &T) -> Result<V, IntervalError>
	where
		V: Clone,
	{
		let value = self.get_at(point)?.clone();
		self.remove(&Interval::singleton(point.clone()));

		Ok(value)
	}

	/// Removes the last item of [`IntervalDict::items()`] and returns it.
	///
	/// Fails with [`IntervalError::KeyNotFound`] if the dict is empty.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, IntervalDict};
	///
	/// let mut dict = IntervalDict::from([
	/// 	(closed(0, 1), 'a'),
	/// 	(closed(2, 3), 'b'),
	/// 	(closed(4, 5), 'a'),
	/// ]);
	///
	/// assert_eq!(dict.pop_item(), Ok((closed(2, 3), 'b')));
	/// assert_eq!(dict.pop_item(), Ok((closed(0, 1) | closed(4, 5), 'a')));
	/// assert!(dict.pop_item().is_err());
	/// ```
	pub fn pop_item(&mut self) -> Result<(Interval<T, D>, V), IntervalError>
	where
		V: PartialEq,
	{
		let interval = self
			.items()
			.into_iter()
			.last()
			.map(|(interval, _)| interval)
			.ok_or(IntervalError::KeyNotFound)?;

		let mut value = None;
		for atomic in interval.atomics() {
			value = self.inner.remove(same_start_comp(atomic));
		}

		value
			.map(|value| (interval, value))
			.ok_or(IntervalError::KeyNotFound)
	}

	/// Returns what this dict holds over `interval`, first filling the
	/// points of `interval` it does not cover with `default`.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, openclosed, IntervalDict};
	///
	/// let mut dict = IntervalDict::from([(closed(0, 2), 'a')]);
	///
	/// let covered = dict.set_default(&closed(1, 4), 'z');
	///
	/// assert_eq!(
	/// 	covered,
	/// 	IntervalDict::from([(closed(1, 2), 'a'), (openclosed(2, 4), 'z')])
	/// );
	/// assert_eq!(dict.find(&'z'), openclosed(2, 4));
	/// ```
	pub fn set_default(&mut self, interval: &Interval<T, D>, default: V) -> Self
	where
		V: Clone + PartialEq,
	{
		let result = self.get_or(interval, default);
		self.update(result.to_entries(false));

		result
	}

	/// Returns the value at `point`, first mapping `point` to `default` if
	/// no entry covers it.
	///
	/// # Panics
	///
	/// Panics if `point` is not comparable with itself, such as a float
	/// `NaN`.
	pub fn set_default_at(&mut self, point: T, default: V) -> V
	where
		V: Clone + PartialEq,
	{
		if let Ok(value) = self.get_at(&point) {
			return value.clone();
		}

		self.insert_at(point, default.clone());

		default
	}

	/// Inserts every given entry in order, see [`IntervalDict::insert()`].
	pub fn update<I>(&mut self, entries: I)
	where
		I: IntoIterator<Item = (Interval<T, D>, V)>,
		V: Clone + PartialEq,
	{
		for (interval, value) in entries {
			self.insert(&interval, value);
		}
	}

	fn insert_unchecked(&mut self, atomic: Atomic<T>, value: V) {
		self.inner.insert(atomic, value, starts_comp());
	}

	fn overlapping<'a>(
		&'a self,
		atomic: &'a Atomic<T>,
	) -> impl DoubleEndedIterator<Item = (&'a Atomic<T>, &'a V)> {
		self.inner.range(
			overlapping_comp(atomic.start_ord()),
			SearchBoundCustom::Included,
			overlapping_comp(atomic.end_ord()),
			SearchBoundCustom::Included,
		)
	}

	/// The keys overlapping `atomic` plus the at most two keys touching it
	/// from either side which it could be merged with, in ascending order.
	fn mergeable_with<'a>(
		&'a self,
		atomic: &'a Atomic<T>,
	) -> impl Iterator<Item = (&'a Atomic<T>, &'a V)> {
		let before = self
			.inner
			.get_key_value(mergeable_before_comp::<T, D>(atomic));
		let after = self
			.inner
			.get_key_value(mergeable_after_comp::<T, D>(atomic));

		before
			.into_iter()
			.chain(self.overlapping(atomic))
			.chain(after)
	}
}

impl<T, V, D> IntervalDict<T, V, D> {
	/// Makes a new, empty `IntervalDict`.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `true` if the dict holds no entry.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Removes every entry.
	pub fn clear(&mut self) {
		self.inner = BTreeMap::default();
	}

	/// Returns an iterator over every stored entry, one per atomic key, in
	/// ascending order.
	pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Atomic<T>, &V)> {
		self.inner.iter()
	}
}

// Trait Impls ==========================

impl<T, V, D> Clone for IntervalDict<T, V, D>
where
	T: Clone,
	V: Clone,
{
	fn clone(&self) -> Self {
		IntervalDict {
			inner: self.inner.clone(),
			phantom: PhantomData,
		}
	}
}

impl<T, V, D> PartialEq for IntervalDict<T, V, D>
where
	T: PartialEq,
	V: PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T, V, D> Eq for IntervalDict<T, V, D>
where
	T: Eq,
	V: Eq,
{
}

impl<T, V, D> fmt::Debug for IntervalDict<T, V, D>
where
	T: fmt::Debug,
	V: fmt::Debug,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.inner.iter()).finish()
	}
}

impl<T, V, D> Default for IntervalDict<T, V, D> {
	fn default() -> Self {
		IntervalDict {
			inner: BTreeMap::default(),
			phantom: PhantomData,
		}
	}
}

impl<T, V, D> IntoIterator for IntervalDict<T, V, D> {
	type Item = (Atomic<T>, V);
	type IntoIter = IntoIter<T, V>;
	fn into_iter(self) -> Self::IntoIter {
		IntoIter {
			inner: self.inner.into_iter(),
		}
	}
}

/// An owning iterator over the stored entries of an [`IntervalDict`], one
/// per atomic key, in ascending order.
pub struct IntoIter<T, V> {
	inner: BTreeMapIntoIter<Atomic<T>, V>,
}
impl<T, V> Iterator for IntoIter<T, V> {
	type Item = (Atomic<T>, V);
	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next()
	}
}

impl<T, V, D> Extend<(Interval<T, D>, V)> for IntervalDict<T, V, D>
where
	T: PartialOrd + Clone,
	V: Clone + PartialEq,
	D: Domain<T>,
{
	fn extend<I: IntoIterator<Item = (Interval<T, D>, V)>>(&mut self, iter: I) {
		self.update(iter);
	}
}

impl<T, V, D> FromIterator<(Interval<T, D>, V)> for IntervalDict<T, V, D>
where
	T: PartialOrd + Clone,
	V: Clone + PartialEq,
	D: Domain<T>,
{
	fn from_iter<I: IntoIterator<Item = (Interval<T, D>, V)>>(iter: I) -> Self {
		let mut dict = IntervalDict::new();
		dict.update(iter);
		dict
	}
}

impl<T, V, D, const N: usize> From<[(Interval<T, D>, V); N]> for IntervalDict<T, V, D>
where
	T: PartialOrd + Clone,
	V: Clone + PartialEq,
	D: Domain<T>,
{
	fn from(entries: [(Interval<T, D>, V); N]) -> Self {
		entries.into_iter().collect()
	}
}

/// The union of two dicts, where `other` wins on the points both cover.
impl<T, V, D> BitOr<&IntervalDict<T, V, D>> for &IntervalDict<T, V, D>
where
	T: PartialOrd + Clone,
	V: Clone + PartialEq,
	D: Domain<T>,
{
	type Output = IntervalDict<T, V, D>;

	fn bitor(self, other: &IntervalDict<T, V, D>) -> Self::Output {
		let mut result = self.clone();
		result |= other;
		result
	}
}

impl<T, V, D> BitOrAssign<&IntervalDict<T, V, D>> for IntervalDict<T, V, D>
where
	T: PartialOrd + Clone,
	V: Clone + PartialEq,
	D: Domain<T>,
{
	fn bitor_assign(&mut self, other: &IntervalDict<T, V, D>) {
		self.update(other.to_entries(true));
	}
}

/// Formats a dict as its merged items, `{[0,2): "banana", [2,4]: "orange"}`.
impl<T, V, D> fmt::Display for IntervalDict<T, V, D>
where
	T: PartialOrd + Clone + fmt::Display,
	V: PartialEq + fmt::Debug,
	D: Domain<T>,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("{")?;
		for (i, (interval, value)) in self.items().into_iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{interval}: {value:?}")?;
		}
		f.write_str("}")
	}
}

#[cfg(feature = "serde")]
mod serde {
	use core::marker::PhantomData;

	use serde::de::{SeqAccess, Visitor};
	use serde::ser::SerializeSeq;
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	use crate::atomic::Atomic;
	use crate::domain::Domain;
	use crate::{Interval, IntervalDict};

	impl<T, V, D> Serialize for IntervalDict<T, V, D>
	where
		T: Serialize,
		V: Serialize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			let mut seq = serializer.serialize_seq(Some(self.inner.len()))?;
			for (atomic, value) in self.iter() {
				seq.serialize_element(&(atomic, value))?;
			}
			seq.end()
		}
	}

	impl<'de, T, V, D> Deserialize<'de> for IntervalDict<T, V, D>
	where
		T: PartialOrd + Clone + Deserialize<'de>,
		V: Clone + PartialEq + Deserialize<'de>,
		D: Domain<T>,
	{
		fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
		where
			De: Deserializer<'de>,
		{
			deserializer.deserialize_seq(IntervalDictVisitor {
				t: PhantomData,
				v: PhantomData,
				d: PhantomData,
			})
		}
	}

	struct IntervalDictVisitor<T, V, D> {
		t: PhantomData<T>,
		v: PhantomData<V>,
		d: PhantomData<D>,
	}

	impl<'de, T, V, D> Visitor<'de> for IntervalDictVisitor<T, V, D>
	where
		T: PartialOrd + Clone + Deserialize<'de>,
		V: Clone + PartialEq + Deserialize<'de>,
		D: Domain<T>,
	{
		type Value = IntervalDict<T, V, D>;

		fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
			formatter.write_str("an IntervalDict")
		}

		fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
		where
			A: SeqAccess<'de>,
		{
			let mut dict = IntervalDict::new();
			while let Some((atomic, value)) = access.next_element::<(Atomic<T>, V)>()? {
				let interval = Interval::from_atomics_unchecked([atomic]);
				if dict.overlaps(&interval) {
					return Err(serde::de::Error::custom("intervals overlap"));
				}
				dict.insert(&interval, value);
			}
			Ok(dict)
		}
	}

}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use quickcheck::{Arbitrary, Gen};

	use super::*;
	use crate::domain::DiscreteDomain;
	use crate::interval::{empty, singleton};
	use crate::test_intervals::{ee, ei, eu, ie, ii, iu, ue, uu, ArbInterval};
	use crate::{DiscreteInterval, DiscreteIntervalDict};

	fn basic() -> IntervalDict<i8, char> {
		IntervalDict::from([(ie(0, 2), 'a'), (ii(2, 4), 'b'), (ee(6, 8), 'a'), (iu(10), 'c')])
	}

	fn assert_entries<const N: usize>(dict: &IntervalDict<i8, char>, expected: [(Interval<i8>, char); N]) {
		assert_eq!(dict.to_entries(true), expected);
	}

	#[test]
	fn insert_splits_existing_entries() {
		let mut dict = IntervalDict::from([(ii(0, 3), "banana")]);
		dict.insert(&ii(2, 4), "orange");

		assert_eq!(
			dict.to_entries(true),
			[(ie(0, 2), "banana"), (ii(2, 4), "orange")]
		);

		let mut dict = IntervalDict::from([(ii(0, 10), 'a')]);
		dict.insert(&ii(4, 6), 'b');
		assert_eq!(
			dict.to_entries(true),
			[(ie(0, 4), 'a'), (ii(4, 6), 'b'), (ei(6, 10), 'a')]
		);
		assert_eq!(dict.items(), [(ie(0, 4) | ei(6, 10), &'a'), (ii(4, 6), &'b')]);
		assert_eq!(dict.len(), 2);
	}

	#[test]
	fn insert_fuses_equal_values() {
		let mut dict = basic();

		// touches [2,4] but holds another value, fuses with (6,8)
		dict.insert(&ei(4, 6), 'a');
		assert_entries(&dict, [(ie(0, 2), 'a'), (ii(2, 4), 'b'), (ee(4, 8), 'a'), (iu(10), 'c')]);

		dict.insert(&ii(8, 10), 'c');
		assert_entries(&dict, [(ie(0, 2), 'a'), (ii(2, 4), 'b'), (ee(4, 8), 'a'), (iu(8), 'c')]);

		dict.insert(&ii(2, 4), 'a');
		assert_entries(&dict, [(ie(0, 8), 'a'), (iu(8), 'c')]);
	}

	#[test]
	fn insert_non_atomic_intervals() {
		let mut dict = IntervalDict::from([(ii(0, 10), 'a')]);

		dict.insert(&(ii(1, 2) | ii(5, 6)), 'b');
		assert_eq!(dict.find(&'b'), ii(1, 2) | ii(5, 6));
		assert_eq!(dict.find(&'a'), ie(0, 1) | ee(2, 5) | ei(6, 10));

		dict.insert(&empty(), 'z');
		assert_eq!(dict.find(&'z'), empty());
		assert_eq!(dict.domain(), ii(0, 10));
	}

	#[test]
	fn get_tests() {
		let dict = basic();

		assert_eq!(dict.get_at(&0), Ok(&'a'));
		assert_eq!(dict.get_at(&2), Ok(&'b'));
		assert_eq!(dict.get_at(&6), Err(IntervalError::KeyNotFound));
		assert_eq!(dict.get_at(&100), Ok(&'c'));
		assert!(dict.contains_value(&7));
		assert!(!dict.contains_value(&9));

		assert_entries(&dict.get(&ii(1, 7)), [(ie(1, 2), 'a'), (ii(2, 4), 'b'), (ei(6, 7), 'a')]);
		assert_entries(&dict.get(&ii(1, 1)), [(singleton(1), 'a')]);
		assert!(dict.get(&ee(4, 6)).is_empty());
		assert!(dict.get(&empty()).is_empty());
	}

	#[test]
	fn get_or_fills_gaps() {
		let dict = basic();

		assert_eq!(
			dict.get_or(&ii(3, 7), 'z').to_entries(true),
			[(ii(3, 4), 'b'), (ei(4, 6), 'z'), (ei(6, 7), 'a')]
		);
	}

	#[test]
	fn remove_tests() {
		let mut dict = basic();

		dict.remove(&ii(1, 7));
		assert_entries(&dict, [(ie(0, 1), 'a'), (ee(7, 8), 'a'), (iu(10), 'c')]);

		dict.remove(&uu());
		assert!(dict.is_empty());

		let mut dict = basic();
		assert_eq!(dict.remove_at(&3), Ok(()));
		assert_entries(&dict, [(ie(0, 2), 'a'), (ie(2, 3), 'b'), (ei(3, 4), 'b'), (ee(6, 8), 'a'), (iu(10), 'c')]);
		assert_eq!(dict.remove_at(&3), Err(IntervalError::KeyNotFound));
		assert_eq!(dict.remove_at(&9), Err(IntervalError::KeyNotFound));
	}

	#[test]
	fn pop_tests() {
		let mut dict = basic();

		let popped = dict.pop(&ii(3, 7));
		assert_entries(&popped, [(ii(3, 4), 'b'), (ei(6, 7), 'a')]);
		assert_eq!(dict.find(&'b'), ie(2, 3));

		let mut dict = basic();
		let popped = dict.pop_or(&ii(8, 12), 'z');
		assert_eq!(popped.to_entries(true), [(ie(8, 10), 'z'), (ii(10, 12), 'c')]);
		assert_eq!(dict.find(&'c'), eu(12));

		let mut dict = basic();
		assert_eq!(dict.pop_at(&1), Ok('a'));
		assert_eq!(dict.pop_at(&1), Err(IntervalError::KeyNotFound));
		assert_eq!(dict.find(&'a'), ie(0, 1) | ee(1, 2) | ee(6, 8));
	}

	#[test]
	fn pop_item_tests() {
		let mut dict = basic();

		assert_eq!(dict.pop_item(), Ok((iu(10), 'c')));
		assert_eq!(dict.pop_item(), Ok((ii(2, 4), 'b')));
		assert_eq!(dict.pop_item(), Ok((ie(0, 2) | ee(6, 8), 'a')));
		assert_eq!(dict.pop_item(), Err(IntervalError::KeyNotFound));
	}

	#[test]
	fn set_default_tests() {
		let mut dict = basic();

		assert_eq!(dict.set_default_at(3, 'z'), 'b');
		assert_eq!(dict.set_default_at(5, 'z'), 'z');
		assert_eq!(dict.get_at(&5), Ok(&'z'));

		let mut dict = basic();
		let covered = dict.set_default(&ii(3, 7), 'z');
		assert_eq!(covered.find(&'z'), ei(4, 6));
		assert_eq!(dict.find(&'z'), ei(4, 6));
		assert_eq!(dict.domain(), ie(0, 8) | iu(10));
	}

	#[test]
	fn views() {
		let dict = basic();

		assert_eq!(dict.keys(), [ie(0, 2) | ee(6, 8), ii(2, 4), iu(10)]);
		assert_eq!(dict.values(), [&'a', &'b', &'c']);
		assert_eq!(dict.find(&'a'), ie(0, 2) | ee(6, 8));
		assert_eq!(dict.find(&'z'), empty());
		assert_eq!(dict.domain(), ii(0, 4) | ee(6, 8) | iu(10));
		assert!(dict.contains(&ii(0, 3)));
		assert!(!dict.contains(&ii(0, 6)));
		assert!(dict.overlaps(&ii(5, 7)));
		assert!(!dict.overlaps(&ii(8, 9)));
		assert_eq!(dict.iter().count(), 4);
		assert_eq!(dict.clone().into_iter().count(), 4);
	}

	#[test]
	fn equality_is_semantic() {
		let mut built_in_pieces = IntervalDict::new();
		built_in_pieces.insert(&ii(0, 1), 'a');
		built_in_pieces.insert(&ei(1, 2), 'a');
		built_in_pieces.insert(&ii(5, 6), 'b');
		built_in_pieces.insert(&ii(3, 6), 'b');

		assert_eq!(built_in_pieces, IntervalDict::from([(ii(0, 2), 'a'), (ii(3, 6), 'b')]));
	}

	#[test]
	fn update_and_union() {
		let mut dict = IntervalDict::from([(ii(0, 4), 'a')]);
		let other = IntervalDict::from([(ii(2, 6), 'b')]);

		assert_entries(&(&dict | &other), [(ie(0, 2), 'a'), (ii(2, 6), 'b')]);
		assert_entries(&(&other | &dict), [(ii(0, 4), 'a'), (ei(4, 6), 'b')]);

		dict |= &other;
		assert_entries(&dict, [(ie(0, 2), 'a'), (ii(2, 6), 'b')]);

		dict.extend([(ue(0), 'c')]);
		assert_entries(&dict, [(ue(0), 'c'), (ie(0, 2), 'a'), (ii(2, 6), 'b')]);

		dict.clear();
		assert!(dict.is_empty());
	}

	#[test]
	fn display() {
		let dict = IntervalDict::from([(ii(0, 3), "banana"), (ii(2, 4), "orange")]);

		assert_eq!(format!("{dict}"), r#"{[0,2): "banana", [2,4]: "orange"}"#);
		assert_eq!(format!("{}", IntervalDict::<i8, char>::new()), "{}");
	}

	#[test]
	fn discrete_dict() {
		let mut dict = DiscreteIntervalDict::new();

		dict.insert(&DiscreteInterval::closed(0, 2), 'a');
		dict.insert(&DiscreteInterval::closed(3, 5), 'a');
		dict.insert(&DiscreteInterval::singleton(4), 'b');

		assert_eq!(
			dict.find(&'a'),
			DiscreteInterval::closed(0, 3) | DiscreteInterval::singleton(5)
		);
		assert_eq!(dict.iter().count(), 3);
	}

	#[test]
	fn inserting_then_reading_back() {
		let mut dict = IntervalDict::new();
		let writes = [(ii(0, 10), 'a'), (ee(2, 5), 'b'), (ii(4, 8), 'c'), (singleton(6), 'a')];

		for (interval, value) in writes.iter() {
			dict.insert(interval, *value);
		}

		for point in -1..12 {
			let expected = writes
				.iter()
				.rev()
				.find(|(interval, _)| interval.contains_value(&point))
				.map(|(_, value)| value);

			assert_eq!(dict.get_at(&point).ok(), expected);
		}
	}

	#[test]
	fn insert_over_several_keys() {
		let mut dict = IntervalDict::from([(ii(0, 1), 'a'), (ii(2, 3), 'b'), (ii(4, 5), 'a')]);
		dict.insert(&ii(0, 5), 'z');
		assert_entries(&dict, [(ii(0, 5), 'z')]);

		let mut dict = IntervalDict::from([
			(ii(0, 1), 'a'),
			(ii(2, 3), 'b'),
			(ii(4, 5), 'a'),
			(ii(7, 8), 'a'),
		]);
		dict.insert(&ei(1, 6), 'a');
		assert_entries(&dict, [(ii(0, 6), 'a'), (ii(7, 8), 'a')]);

		let mut dict = IntervalDict::from([(ii(0, 4), 'a'), (ii(5, 9), 'b')]);
		dict.insert(&ii(2, 7), 'c');
		assert_entries(&dict, [(ie(0, 2), 'a'), (ii(2, 7), 'c'), (ei(7, 9), 'b')]);

		let mut dict = DiscreteIntervalDict::from([
			(DiscreteInterval::closed(0, 2), 'a'),
			(DiscreteInterval::closed(4, 5), 'b'),
			(DiscreteInterval::closed(7, 9), 'a'),
		]);
		dict.insert(&DiscreteInterval::closed(3, 6), 'a');
		assert_eq!(dict.to_entries(true), [(DiscreteInterval::closed(0, 9), 'a')]);
	}

	/// A domain behaving like [`ContinuousDomain`] without deriving anything.
	struct Bare;

	impl Domain<i8> for Bare {
		fn canonicalize(atomic: Atomic<i8>) -> Atomic<i8> {
			atomic
		}

		fn mergeable(a: &Atomic<i8>, b: &Atomic<i8>) -> bool {
			a.touches_or_overlaps(b)
		}
	}

	#[test]
	fn traits_do_not_need_a_cloneable_domain() {
		let ours = IntervalDict::<i8, char, Bare>::from([(Interval::closed(0, 4), 'a')]);
		let theirs = IntervalDict::<i8, char, Bare>::from([(Interval::closed(2, 6), 'b')]);

		let union = &ours | &theirs;
		assert_eq!(union.clone(), union);
		assert_ne!(union, ours);
		assert_eq!(union.find(&'a'), Interval::closedopen(0, 2));
		assert!(format!("{union:?}").contains("'a'"));
	}

	/// A random write to a dict over small `i8` points.
	#[derive(Debug, Clone)]
	enum Write {
		Insert(ArbInterval, u8),
		Remove(ArbInterval),
	}

	impl Arbitrary for Write {
		fn arbitrary(g: &mut Gen) -> Self {
			let interval = ArbInterval::arbitrary(g);
			if u8::arbitrary(g) % 4 == 0 {
				Write::Remove(interval)
			} else {
				Write::Insert(interval, u8::arbitrary(g) % 3)
			}
		}
	}

	fn in_domain<D: Domain<i8>>(interval: &ArbInterval) -> Interval<i8, D> {
		Interval::try_from_atomics(interval.0.atomics().iter().cloned()).unwrap()
	}

	fn apply_writes<D: Domain<i8>>(writes: &[Write]) -> IntervalDict<i8, u8, D> {
		let mut dict = IntervalDict::new();
		for write in writes {
			match write {
				Write::Insert(interval, value) => dict.insert(&in_domain(interval), *value),
				Write::Remove(interval) => dict.remove(&in_domain(interval)),
			}
		}
		dict
	}

	/// The value of the last write covering `point`.
	fn written_at(writes: &[Write], point: i8) -> Option<u8> {
		writes.iter().rev().find_map(|write| match write {
			Write::Insert(interval, value) if interval.0.contains_value(&point) => {
				Some(Some(*value))
			}
			Write::Remove(interval) if interval.0.contains_value(&point) => Some(None),
			_ => None,
		})?
	}

	/// Keys are non-empty, sorted, pairwise disjoint, and equal values are
	/// never left on mergeable keys.
	fn is_canonical<D: Domain<i8>>(dict: &IntervalDict<i8, u8, D>) -> bool {
		let entries = dict.iter().collect::<Vec<_>>();

		entries.iter().all(|(key, _)| !key.is_empty())
			&& entries.windows(2).all(|pair| {
				let ((a, x), (b, y)) = (pair[0], pair[1]);
				a.end_ord() < b.start_ord() && !(x == y && D::mergeable(a, b))
			})
	}

	fn writes_agree_with_model<D: Domain<i8>>(writes: &[Write]) -> bool {
		let dict = apply_writes::<D>(writes);
		let rebuilt = dict.to_entries(false).into_iter().collect::<IntervalDict<_, _, D>>();

		is_canonical(&dict)
			&& rebuilt == dict
			&& (-17..=17).all(|point| dict.get_at(&point).ok().copied() == written_at(writes, point))
	}

	#[quickcheck]
	fn writes_match_pointwise_model(writes: Vec<Write>) -> bool {
		writes_agree_with_model::<ContinuousDomain>(&writes)
			&& writes_agree_with_model::<DiscreteDomain>(&writes)
	}

	fn combine_agrees_with_model<D: Domain<i8>>(
		ours: &[Write],
		theirs: &[Write],
		missing: Option<u8>,
	) -> bool {
		let (ours, theirs) = (apply_writes::<D>(ours), apply_writes::<D>(theirs));
		let how = |x: &u8, y: &u8| x.wrapping_mul(7).wrapping_add(*y);

		let combined = ours.combine(&theirs, how, missing.as_ref());

		is_canonical(&combined)
			&& combined.domain() == ours.domain() | theirs.domain()
			&& (-17..=17).all(|point| {
				let expected = match (ours.get_at(&point).ok(), theirs.get_at(&point).ok(), &missing) {
					(Some(x), Some(y), _) => Some(how(x, y)),
					(Some(x), None, Some(m)) => Some(how(x, m)),
					(None, Some(y), Some(m)) => Some(how(m, y)),
					(Some(x), None, None) => Some(*x),
					(None, Some(y), None) => Some(*y),
					(None, None, _) => None,
				};
				combined.get_at(&point).ok().copied() == expected
			})
	}

	#[quickcheck]
	fn combine_matches_pointwise_model(
		ours: Vec<Write>,
		theirs: Vec<Write>,
		missing: Option<u8>,
	) -> bool {
		combine_agrees_with_model::<ContinuousDomain>(&ours, &theirs, missing)
			&& combine_agrees_with_model::<DiscreteDomain>(&ours, &theirs, missing)
	}
}
