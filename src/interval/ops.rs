//! The set operations, containment tests and ordering relations of
//! [`Interval`].

use core::ops::{BitAnd, BitOr, Not, Sub};

use crate::atomic::Atomic;
use crate::bound::Bound;
use crate::bound_ord::BoundOrd;
use crate::domain::Domain;
use crate::interval::{Atomics, Interval};
use crate::value::Value;

impl<T, D> Interval<T, D>
where
	T: PartialOrd + Clone,
	D: Domain<T>,
{
	/// Returns the interval containing every point of either interval.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, empty};
	///
	/// assert_eq!(closed(0, 2).union(&closed(2, 4)), closed(0, 4));
	/// assert_eq!(closed(0, 2).union(&empty()), closed(0, 2));
	/// ```
	pub fn union(&self, other: &Self) -> Self {
		Interval::from_atomics_unchecked(
			self.atomics().iter().chain(other.atomics()).cloned(),
		)
	}

	/// Returns the interval containing every point of both intervals.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, empty, open};
	///
	/// assert_eq!(closed(0, 4).intersection(&open(2, 3)), open(2, 3));
	/// assert_eq!(closed(0, 2).intersection(&closed(3, 4)), empty());
	/// ```
	pub fn intersection(&self, other: &Self) -> Self {
		let (ours, theirs) = (self.atomics(), other.atomics());
		let (mut i, mut j) = (0, 0);

		let mut output = Atomics::new();
		while i < ours.len() && j < theirs.len() {
			let intersection = ours[i].intersection(&theirs[j]);
			if !intersection.is_empty() {
				output.push(intersection);
			}

			// whichever ends first cannot meet anything further along
			if ours[i].end_ord() < theirs[j].end_ord() {
				i += 1;
			} else {
				j += 1;
			}
		}

		Interval::from_sorted_disjoint(output)
	}

	/// Returns the interval containing every point not in this interval.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, empty, open, Interval, Value};
	///
	/// assert_eq!(
	/// 	closed(0, 1).complement(),
	/// 	open(Value::NegInf, 0) | open(1, Value::PosInf)
	/// );
	/// assert_eq!(empty::<i32>().complement(), open(Value::NegInf, Value::PosInf));
	/// ```
	pub fn complement(&self) -> Self {
		let atomics = self.atomics();

		let (first, last) = match (atomics.first(), atomics.last()) {
			(Some(first), Some(last)) => (first, last),
			_ => {
				return Interval::from_atomics_unchecked([Atomic::canonical(
					Bound::Open,
					Value::NegInf,
					Value::PosInf,
					Bound::Open,
				)]);
			}
		};

		let head = Atomic::canonical(
			Bound::Open,
			Value::NegInf,
			first.lower().clone(),
			!first.left(),
		);
		let gaps = atomics.windows(2).map(|pair| {
			Atomic::canonical(
				!pair[0].right(),
				pair[0].upper().clone(),
				pair[1].lower().clone(),
				!pair[1].left(),
			)
		});
		let tail = Atomic::canonical(
			!last.right(),
			last.upper().clone(),
			Value::PosInf,
			Bound::Open,
		);

		Interval::from_atomics_unchecked(
			core::iter::once(head).chain(gaps).chain(core::iter::once(tail)),
		)
	}

	/// Returns the interval containing the points of this interval which are
	/// not in `other`.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, closedopen, openclosed};
	///
	/// assert_eq!(
	/// 	closed(0, 4).difference(&closed(1, 2)),
	/// 	closedopen(0, 1) | openclosed(2, 4)
	/// );
	/// ```
	pub fn difference(&self, other: &Self) -> Self {
		self.intersection(&other.complement())
	}

	/// Returns `true` if `value` lies within this interval.
	///
	/// Values which are not comparable with themselves, like a float `NaN`,
	/// lie within no interval.
	pub fn contains_value(&self, value: &T) -> bool {
		let value = Value::Finite(value.clone());
		if !value.is_self_comparable() {
			return false;
		}

		let point = BoundOrd::Included(&value);
		let atomics = self.atomics();
		let index = atomics.partition_point(|atomic| atomic.end_ord() < point);

		atomics
			.get(index)
			.is_some_and(|atomic| atomic.contains_value(&value))
	}

	/// Returns `true` if every point of `other` lies within this interval.
	/// The empty interval is contained in every interval.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, empty, open};
	///
	/// let interval = closed(0, 2) | closed(4, 6);
	///
	/// assert!(interval.contains(&(open(0, 1) | closed(5, 6))));
	/// assert!(!interval.contains(&closed(1, 5)));
	/// assert!(interval.contains(&empty()));
	/// ```
	pub fn contains(&self, other: &Self) -> bool {
		let ours = self.atomics();
		let mut i = 0;

		for theirs in other.atomics() {
			while i < ours.len() && ours[i].end_ord() < theirs.start_ord() {
				i += 1;
			}

			match ours.get(i) {
				Some(atomic) if atomic.contains(theirs) => {}
				_ => return false,
			}
		}

		true
	}

	/// Returns `true` if the two intervals share at least one point.
	pub fn overlaps(&self, other: &Self) -> bool {
		let (ours, theirs) = (self.atomics(), other.atomics());
		let (mut i, mut j) = (0, 0);

		while i < ours.len() && j < theirs.len() {
			if ours[i].overlaps(&theirs[j]) {
				return true;
			}

			if ours[i].end_ord() < theirs[j].end_ord() {
				i += 1;
			} else {
				j += 1;
			}
		}

		false
	}

	/// Returns `true` if the two intervals do not overlap and their union is
	/// a single atomic interval.
	///
	/// For non-atomic intervals this means each one exactly fills the gaps
	/// of the other.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, closedopen, open, openclosed};
	///
	/// assert!(closedopen(0, 1).adjacent(&closed(1, 2)));
	/// assert!(!closed(0, 1).adjacent(&closed(1, 2)));
	/// assert!(!closedopen(0, 1).adjacent(&openclosed(1, 2)));
	///
	/// let gappy = closedopen(0, 1) | openclosed(2, 3);
	/// assert!(gappy.adjacent(&closed(1, 2)));
	/// assert!(!gappy.adjacent(&open(1, 2)));
	/// ```
	pub fn adjacent(&self, other: &Self) -> bool {
		!self.overlaps(other) && self.union(other).is_atomic()
	}

	/// Returns `true` if this interval lies entirely to the left of `other`
	/// without touching it. Always `false` when either interval is empty.
	///
	/// Like the other ordering relations this is a partial order: two
	/// overlapping intervals are neither less nor greater than each other.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, closedopen, empty};
	///
	/// assert!(closedopen(0, 1).lt(&closed(1, 2)));
	/// assert!(!closed(0, 1).lt(&closed(1, 2)));
	/// assert!(!empty().lt(&closed(1, 2)));
	/// ```
	pub fn lt(&self, other: &Self) -> bool {
		self.both_non_empty(other)
			&& self.enclosure_end() < other.enclosure_start()
	}

	/// Returns `true` if no point of this interval lies to the right of the
	/// upper bound of `other`. Always `false` when either interval is empty.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, closedopen};
	///
	/// assert!(closed(0, 1).le(&closed(0, 2)));
	/// assert!(closedopen(0, 1).le(&closed(0, 1)));
	/// assert!(!closed(0, 1).le(&closedopen(0, 1)));
	/// ```
	pub fn le(&self, other: &Self) -> bool {
		self.both_non_empty(other)
			&& self.enclosure_end() <= other.enclosure_end()
	}

	/// Returns `true` if this interval lies entirely to the right of `other`
	/// without touching it. Always `false` when either interval is empty.
	pub fn gt(&self, other: &Self) -> bool {
		other.lt(self)
	}

	/// Returns `true` if no point of this interval lies to the left of the
	/// lower bound of `other`. Always `false` when either interval is empty.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, openclosed};
	///
	/// assert!(closed(1, 2).ge(&closed(0, 2)));
	/// assert!(openclosed(0, 1).ge(&closed(0, 1)));
	/// assert!(!closed(0, 1).ge(&openclosed(0, 1)));
	/// ```
	pub fn ge(&self, other: &Self) -> bool {
		self.both_non_empty(other)
			&& self.enclosure_start() >= other.enclosure_start()
	}

	/// Returns `true` if every point of this interval lies to the left of
	/// `point`. Always `false` when the interval is empty or `point` is not
	/// comparable with itself.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, closedopen};
	///
	/// assert!(closed(0, 1).lt_value(&2));
	/// assert!(closedopen(0, 1).lt_value(&1));
	/// assert!(!closed(0, 1).lt_value(&1));
	/// ```
	pub fn lt_value(&self, point: &T) -> bool {
		let point = Value::Finite(point.clone());
		self.orderable_with(&point) && self.enclosure_end() < BoundOrd::Included(&point)
	}

	/// Returns `true` if this interval starts at or before `point`. Always
	/// `false` when the interval is empty or `point` is not comparable with
	/// itself.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, openclosed};
	///
	/// assert!(closed(0, 1).le_value(&0));
	/// assert!(closed(0, 1).le_value(&5));
	/// assert!(!openclosed(0, 1).le_value(&0));
	/// ```
	pub fn le_value(&self, point: &T) -> bool {
		let point = Value::Finite(point.clone());
		self.orderable_with(&point) && self.enclosure_start() <= BoundOrd::Included(&point)
	}

	/// Returns `true` if every point of this interval lies to the right of
	/// `point`. Always `false` when the interval is empty or `point` is not
	/// comparable with itself.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, openclosed};
	///
	/// assert!(closed(1, 2).gt_value(&0));
	/// assert!(openclosed(1, 2).gt_value(&1));
	/// assert!(!closed(1, 2).gt_value(&1));
	/// ```
	pub fn gt_value(&self, point: &T) -> bool {
		let point = Value::Finite(point.clone());
		self.orderable_with(&point) && self.enclosure_start() > BoundOrd::Included(&point)
	}

	/// Returns `true` if this interval ends at or after `point`. Always
	/// `false` when the interval is empty or `point` is not comparable with
	/// itself.
	///
	/// # Examples
	/// ```
	/// use disjunct::{closed, closedopen};
	///
	/// assert!(closed(0, 1).ge_value(&1));
	/// assert!(closed(0, 1).ge_value(&-5));
	/// assert!(!closedopen(0, 1).ge_value(&1));
	/// ```
	pub fn ge_value(&self, point: &T) -> bool {
		let point = Value::Finite(point.clone());
		self.orderable_with(&point) && self.enclosure_end() >= BoundOrd::Included(&point)
	}

	fn orderable_with(&self, point: &Value<T>) -> bool {
		!self.is_empty() && point.is_self_comparable()
	}

	fn both_non_empty(&self, other: &Self) -> bool {
		!self.is_empty() && !other.is_empty()
	}

	fn enclosure_start(&self) -> BoundOrd<'_, T> {
		BoundOrd::start(self.left(), self.lower())
	}
	fn enclosure_end(&self) -> BoundOrd<'_, T> {
		BoundOrd::end(self.right(), self.upper())
	}
}

macro_rules! binary_op {
	($trait:ident, $method:ident, $op:ident) => {
		impl<T, D> $trait for Interval<T, D>
		where
			T: PartialOrd + Clone,
			D: Domain<T>,
		{
			type Output = Interval<T, D>;

			fn $method(self, rhs: Self) -> Self::Output {
				Interval::$op(&self, &rhs)
			}
		}

		impl<T, D> $trait<&Interval<T, D>> for Interval<T, D>
		where
			T: PartialOrd + Clone,
			D: Domain<T>,
		{
			type Output = Interval<T, D>;

			fn $method(self, rhs: &Interval<T, D>) -> Self::Output {
				Interval::$op(&self, rhs)
			}
		}

		impl<T, D> $trait<Interval<T, D>> for &Interval<T, D>
		where
			T: PartialOrd + Clone,
			D: Domain<T>,
		{
			type Output = Interval<T, D>;

			fn $method(self, rhs: Interval<T, D>) -> Self::Output {
				Interval::$op(self, &rhs)
			}
		}

		impl<T, D> $trait<&Interval<T, D>> for &Interval<T, D>
		where
			T: PartialOrd + Clone,
			D: Domain<T>,
		{
			type Output = Interval<T, D>;

			fn $method(self, rhs: &Interval<T, D>) -> Self::Output {
				Interval::$op(self, rhs)
			}
		}
	};
}

binary_op!(BitAnd, bitand, intersection);
binary_op!(BitOr, bitor, union);
binary_op!(Sub, sub, difference);

impl<T, D> Not for Interval<T, D>
where
	T: PartialOrd + Clone,
	D: Domain<T>,
{
	type Output = Interval<T, D>;

	fn not(self) -> Self::Output {
		self.complement()
	}
}

impl<T, D> Not for &Interval<T, D>
where
	T: PartialOrd + Clone,
	D: Domain<T>,
{
	type Output = Interval<T, D>;

	fn not(self) -> Self::Output {
		self.complement()
	}
}
