use alloc::vec::Vec;

use crate::domain::Domain;
use crate::interval::{Atomics, Interval};

use super::IntervalDict;

impl<T, V, D> IntervalDict<T, V, D>
where
	T: PartialOrd + Clone,
	D: Domain<T>,
{
	/// Combines two dicts into a new one.
	///
	/// Points covered by both dicts map to `how(ours, theirs)`. Points
	/// covered by only one of them keep their value, or if `missing` is
	/// given, map to `how(ours, missing)` or `how(missing, theirs)`.
	///
	/// `how` is called once per pair of distinct values rather than once per
	/// stored entry.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, closedopen, openclosed, IntervalDict};
	///
	/// let ours = IntervalDict::from([(closed(0, 2), 1)]);
	/// let theirs = IntervalDict::from([(closed(1, 3), 10)]);
	///
	/// assert_eq!(
	/// 	ours.combine(&theirs, |a, b| a + b, None),
	/// 	IntervalDict::from([
	/// 		(closedopen(0, 1), 1),
	/// 		(closed(1, 2), 11),
	/// 		(openclosed(2, 3), 10),
	/// 	])
	/// );
	/// assert_eq!(
	/// 	ours.combine(&theirs, |a, b| a + b, Some(&100)),
	/// 	IntervalDict::from([
	/// 		(closedopen(0, 1), 101),
	/// 		(closed(1, 2), 11),
	/// 		(openclosed(2, 3), 110),
	/// 	])
	/// );
	/// ```
	pub fn combine<F>(&self, other: &Self, mut how: F, missing: Option<&V>) -> Self
	where
		F: FnMut(&V, &V) -> V,
		V: Clone + PartialEq,
	{
		self.combine_with_interval(other, |ours, theirs, _| how(ours, theirs), missing)
	}

	/// [`IntervalDict::combine()`] where `how` also receives the interval
	/// the combined value will be stored on.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, IntervalDict};
	///
	/// let ours = IntervalDict::from([(closed(0, 2), 1)]);
	/// let theirs = IntervalDict::from([(closed(1, 3), 10)]);
	///
	/// let combined = ours.combine_with_interval(
	/// 	&theirs,
	/// 	|a, b, interval| if interval.contains_value(&0) { *a } else { a + b },
	/// 	Some(&0),
	/// );
	///
	/// assert_eq!(combined.get_at(&0), Ok(&1));
	/// assert_eq!(combined.get_at(&2), Ok(&11));
	/// assert_eq!(combined.get_at(&3), Ok(&10));
	/// ```
	pub fn combine_with_interval<F>(&self, other: &Self, mut how: F, missing: Option<&V>) -> Self
	where
		F: FnMut(&V, &V, &Interval<T, D>) -> V,
		V: Clone + PartialEq,
	{
		let (ours, theirs) = (self.domain(), other.domain());
		let mut result = IntervalDict::new();

		for (interval, value) in self.get(&(&ours - &theirs)).items() {
			let value = match missing {
				Some(missing) => how(value, missing, &interval),
				None => value.clone(),
			};
			result.insert(&interval, value);
		}
		for (interval, value) in other.get(&(&theirs - &ours)).items() {
			let value = match missing {
				Some(missing) => how(missing, value, &interval),
				None => value.clone(),
			};
			result.insert(&interval, value);
		}

		let overlaps = self.overlapping_pairs(other);
		tracing::debug!(
			pairs = overlaps.len(),
			with_missing = missing.is_some(),
			"combining interval dicts"
		);

		for (atomics, ours, theirs) in overlaps {
			let interval = Interval::from_sorted_disjoint(atomics);
			let value = how(ours, theirs, &interval);
			result.insert(&interval, value);
		}

		result
	}

	/// Walks both trees in step and groups the non-empty intersections of
	/// their keys by the pair of values they hold.
	///
	/// The intersections come out sorted, and two intersections holding the
	/// same pair of values are never mergeable since at least one side was
	/// not.
	fn overlapping_pairs<'a>(&'a self, other: &'a Self) -> Vec<(Atomics<T>, &'a V, &'a V)>
	where
		V: PartialEq,
	{
		let ours = self.inner.iter().collect::<Vec<_>>();
		let theirs = other.inner.iter().collect::<Vec<_>>();

		let mut groups: Vec<(Atomics<T>, &V, &V)> = Vec::new();
		let mut last = None;
		let (mut i, mut j) = (0, 0);

		while let (Some(&(our_key, our_value)), Some(&(their_key, their_value))) =
			(ours.get(i), theirs.get(j))
		{
			let piece = our_key.intersection(their_key);

			if !piece.is_empty() {
				let same_pair = |(_, x, y): &(Atomics<T>, &V, &V)| {
					*x == our_value && *y == their_value
				};

				let index = match last {
					Some(index) if same_pair(&groups[index]) => index,
					_ => match groups.iter().position(same_pair) {
						Some(index) => index,
						None => {
							groups.push((Atomics::new(), our_value, their_value));
							groups.len() - 1
						}
					},
				};

				groups[index].0.push(piece);
				last = Some(index);
			}

			if our_key.end_ord() < their_key.end_ord() {
				i += 1;
			} else {
				j += 1;
			}
		}

		groups
	}
}

#[cfg(test)]
mod tests {
	use alloc::string::String;

	use pretty_assertions::assert_eq;

	use super::*;
	use crate::test_intervals::{ee, ei, ie, ii};

	fn s(value: &str) -> String {
		String::from(value)
	}

	fn concat(a: &String, b: &String) -> String {
		let mut out = a.clone();
		out.push_str(b);
		out
	}

	#[test]
	fn combine_without_missing() {
		let ours = IntervalDict::from([(ii(0, 2), s("banana"))]);
		let theirs = IntervalDict::from([(ii(1, 3), s("orange"))]);

		assert_eq!(
			ours.combine(&theirs, concat, None).to_entries(true),
			[
				(ie(0, 1), s("banana")),
				(ii(1, 2), s("bananaorange")),
				(ei(2, 3), s("orange")),
			]
		);
	}

	#[test]
	fn combine_with_missing() {
		let ours = IntervalDict::from([(ii(0, 2), s("banana"))]);
		let theirs = IntervalDict::from([(ii(1, 3), s("orange"))]);
		let kiwi = s("kiwi");

		assert_eq!(
			ours.combine(&theirs, concat, Some(&kiwi)).to_entries(true),
			[
				(ie(0, 1), s("bananakiwi")),
				(ii(1, 2), s("bananaorange")),
				(ei(2, 3), s("kiwiorange")),
			]
		);
	}

	#[test]
	fn combine_calls_how_once_per_value_pair() {
		let ours = IntervalDict::from([(ii(0, 1) | ii(4, 5), 'a'), (ii(2, 3), 'b')]);
		let theirs = IntervalDict::from([(ii(0, 10), 'x')]);

		let mut calls = Vec::new();
		let combined = ours.combine_with_interval(
			&theirs,
			|a, b, interval| {
				calls.push((*a, *b, interval.clone()));
				if *a == 'a' { 'p' } else { 'q' }
			},
			None,
		);

		assert_eq!(
			calls,
			[('a', 'x', ii(0, 1) | ii(4, 5)), ('b', 'x', ii(2, 3))]
		);
		assert_eq!(combined.find(&'p'), ii(0, 1) | ii(4, 5));
		assert_eq!(combined.find(&'q'), ii(2, 3));
		assert_eq!(combined.find(&'x'), ee(1, 2) | ee(3, 4) | ei(5, 10));
	}

	#[test]
	fn combine_with_empty() {
		let ours = IntervalDict::from([(ii(0, 2), 1)]);
		let empty = IntervalDict::new();

		assert_eq!(ours.combine(&empty, |a, b| a + b, None), ours);
		assert_eq!(empty.combine(&ours, |a, b| a + b, Some(&5)).get_at(&1), Ok(&6));
	}
}
