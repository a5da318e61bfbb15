use core::cmp::Ordering;

use crate::atomic::Atomic;
use crate::bound_ord::BoundOrd;
use crate::domain::Domain;
use crate::error::IntervalError;

pub(crate) fn incomparable_panic() -> ! {
	panic!("{}", IntervalError::TypeMismatch);
}

/// Orders a point relative to an atomic interval: `Less` if the point lies
/// before it, `Equal` if inside it and `Greater` if after it.
pub(crate) fn cmp_point_with_atomic<T>(
	point: &BoundOrd<'_, T>,
	atomic: &Atomic<T>,
) -> Ordering
where
	T: PartialOrd,
{
	if *point < atomic.start_ord() {
		Ordering::Less
	} else if *point > atomic.end_ord() {
		Ordering::Greater
	} else {
		Ordering::Equal
	}
}

/// The comparator used to insert a new key into a tree of disjoint atomics.
pub(crate) fn starts_comp<T>() -> impl FnMut(&Atomic<T>, &Atomic<T>) -> Ordering
where
	T: PartialOrd,
{
	|inner_atomic: &Atomic<T>, new_atomic: &Atomic<T>| {
		new_atomic.start_ord().cmp(&inner_atomic.start_ord())
	}
}

/// Finds the key which starts exactly where `atomic` starts.
pub(crate) fn same_start_comp<T>(
	atomic: &Atomic<T>,
) -> impl FnMut(&Atomic<T>) -> Ordering + '_
where
	T: PartialOrd,
{
	move |inner_atomic: &Atomic<T>| {
		atomic.start_ord().cmp(&inner_atomic.start_ord())
	}
}

/// Finds the keys containing the given point, used as both ends of a range
/// search it finds every key overlapping the points in between.
pub(crate) fn overlapping_comp<'a, T>(
	point: BoundOrd<'a, T>,
) -> impl FnMut(&Atomic<T>) -> Ordering + 'a
where
	T: PartialOrd,
{
	move |inner_atomic: &Atomic<T>| cmp_point_with_atomic(&point, inner_atomic)
}

/// Finds the key lying entirely before `atomic` which is mergeable with it
/// under the domain `D`, a tree of disjoint atomics holds at most one.
pub(crate) fn mergeable_before_comp<T, D>(
	atomic: &Atomic<T>,
) -> impl FnMut(&Atomic<T>) -> Ordering + '_
where
	T: PartialOrd + Clone,
	D: Domain<T>,
{
	move |inner_atomic: &Atomic<T>| {
		if inner_atomic.end_ord() >= atomic.start_ord() {
			Ordering::Less
		} else if D::mergeable(inner_atomic, atomic) {
			Ordering::Equal
		} else {
			Ordering::Greater
		}
	}
}

/// Finds the key lying entirely after `atomic` which is mergeable with it
/// under the domain `D`, a tree of disjoint atomics holds at most one.
pub(crate) fn mergeable_after_comp<T, D>(
	atomic: &Atomic<T>,
) -> impl FnMut(&Atomic<T>) -> Ordering + '_
where
	T: PartialOrd + Clone,
	D: Domain<T>,
{
	move |inner_atomic: &Atomic<T>| {
		if inner_atomic.start_ord() <= atomic.end_ord() {
			Ordering::Greater
		} else if D::mergeable(atomic, inner_atomic) {
			Ordering::Equal
		} else {
			Ordering::Less
		}
	}
}
