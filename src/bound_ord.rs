use core::cmp::Ordering;

use crate::bound::Bound;
use crate::utils::incomparable_panic;
use crate::value::Value;

/// An endpoint of an atomic interval seen as a position on the line, which
/// makes start and end bounds of different kinds totally ordered.
///
/// An excluded start sits just after its value, an excluded end just
/// before it, and an included bound exactly on it. Infinities are always
/// excluded so they need no variants of their own.
#[derive(Debug)]
pub(crate) enum BoundOrd<'a, T> {
	/// An included start or end.
	/// There is no need for different Start and End variations as the
	/// Ord implementations are equivalent.
	Included(&'a Value<T>),
	/// An excluded start.
	StartExcluded(&'a Value<T>),
	/// An excluded end.
	EndExcluded(&'a Value<T>),
}

impl<T> Clone for BoundOrd<'_, T> {
	fn clone(&self) -> Self {
		*self
	}
}
impl<T> Copy for BoundOrd<'_, T> {}

impl<'a, T> BoundOrd<'a, T> {
	pub(crate) fn start(bound: Bound, value: &'a Value<T>) -> Self {
		match bound {
			Bound::Closed => BoundOrd::Included(value),
			Bound::Open => BoundOrd::StartExcluded(value),
		}
	}
	pub(crate) fn end(bound: Bound, value: &'a Value<T>) -> Self {
		match bound {
			Bound::Closed => BoundOrd::Included(value),
			Bound::Open => BoundOrd::EndExcluded(value),
		}
	}

	pub(crate) fn bound(&self) -> Bound {
		match self {
			BoundOrd::Included(_) => Bound::Closed,
			BoundOrd::StartExcluded(_) | BoundOrd::EndExcluded(_) => Bound::Open,
		}
	}
	pub(crate) fn value(&self) -> &'a Value<T> {
		match self {
			BoundOrd::Included(value)
			| BoundOrd::StartExcluded(value)
			| BoundOrd::EndExcluded(value) => value,
		}
	}
}

impl<T> BoundOrd<'_, T>
where
	T: PartialOrd,
{
	/// Compares two cuts, failing with `None` when their values are
	/// incomparable.
	#[rustfmt::skip]
	pub(crate) fn try_cmp(&self, other: &Self) -> Option<Ordering> {
		match (self, other) {
			(BoundOrd::Included(a), BoundOrd::Included(b)) => a.try_cmp(b),
			(BoundOrd::Included(a), BoundOrd::StartExcluded(b)) => cmp_with_priority(a, b, true),
			(BoundOrd::Included(a), BoundOrd::EndExcluded(b)) => cmp_with_priority(a, b, false),

			(BoundOrd::StartExcluded(a), BoundOrd::StartExcluded(b)) => a.try_cmp(b),
			(BoundOrd::StartExcluded(a), BoundOrd::Included(b)) => cmp_with_priority(a, b, false),
			(BoundOrd::StartExcluded(a), BoundOrd::EndExcluded(b)) => cmp_with_priority(a, b, false),

			(BoundOrd::EndExcluded(a), BoundOrd::EndExcluded(b)) => a.try_cmp(b),
			(BoundOrd::EndExcluded(a), BoundOrd::Included(b)) => cmp_with_priority(a, b, true),
			(BoundOrd::EndExcluded(a), BoundOrd::StartExcluded(b)) => cmp_with_priority(a, b, true),
		}
	}
}

impl<T> Ord for BoundOrd<'_, T>
where
	T: PartialOrd,
{
	fn cmp(&self, other: &Self) -> Ordering {
		self.try_cmp(other).unwrap_or_else(|| incomparable_panic())
	}
}

impl<T> PartialOrd for BoundOrd<'_, T>
where
	T: PartialOrd,
{
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl<T> PartialEq for BoundOrd<'_, T>
where
	T: PartialOrd,
{
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other).is_eq()
	}
}

impl<T> Eq for BoundOrd<'_, T> where T: PartialOrd {}

/// If they are equal say the item with priority is larger
/// where false means left has priority and true means right.
fn cmp_with_priority<T>(
	left: &Value<T>,
	right: &Value<T>,
	priority: bool,
) -> Option<Ordering>
where
	T: PartialOrd,
{
	Some(match left.try_cmp(right)? {
		Ordering::Equal => match priority {
			false => Ordering::Greater,
			true => Ordering::Less,
		},
		x => x,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mass_bound_ord_test() {
		let zero = Value::Finite(0);
		let two = Value::Finite(2);
		let neg_inf = Value::NegInf;
		let pos_inf = Value::PosInf;

		//Included
		assert!(BoundOrd::Included(&two) == BoundOrd::Included(&two));
		assert!(BoundOrd::Included(&two) <= BoundOrd::Included(&two));
		assert!(BoundOrd::Included(&two) >= BoundOrd::Included(&two));
		assert!(BoundOrd::Included(&zero) < BoundOrd::Included(&two));
		assert!(BoundOrd::Included(&two) > BoundOrd::Included(&zero));

		assert!(BoundOrd::Included(&two) < BoundOrd::StartExcluded(&two));
		assert!(BoundOrd::Included(&zero) < BoundOrd::StartExcluded(&two));
		assert!(BoundOrd::Included(&two) > BoundOrd::StartExcluded(&zero));

		assert!(BoundOrd::Included(&two) > BoundOrd::StartExcluded(&neg_inf));

		assert!(BoundOrd::Included(&two) > BoundOrd::EndExcluded(&two));
		assert!(BoundOrd::Included(&zero) < BoundOrd::EndExcluded(&two));
		assert!(BoundOrd::Included(&two) > BoundOrd::EndExcluded(&zero));

		assert!(BoundOrd::Included(&two) < BoundOrd::EndExcluded(&pos_inf));

		//StartExcluded
		assert!(BoundOrd::StartExcluded(&two) == BoundOrd::StartExcluded(&two));
		assert!(BoundOrd::StartExcluded(&zero) < BoundOrd::StartExcluded(&two));

		assert!(BoundOrd::StartExcluded(&two) > BoundOrd::StartExcluded(&neg_inf));

		assert!(BoundOrd::StartExcluded(&two) > BoundOrd::EndExcluded(&two));
		assert!(BoundOrd::StartExcluded(&two) > BoundOrd::EndExcluded(&zero));
		assert!(BoundOrd::StartExcluded(&zero) < BoundOrd::EndExcluded(&two));

		assert!(BoundOrd::StartExcluded(&two) < BoundOrd::EndExcluded(&pos_inf));

		//EndExcluded
		assert!(BoundOrd::EndExcluded(&two) == BoundOrd::EndExcluded(&two));
		assert!(BoundOrd::EndExcluded(&zero) < BoundOrd::EndExcluded(&two));
		assert!(BoundOrd::EndExcluded(&two) > BoundOrd::EndExcluded(&zero));

		//Infinities
		assert!(BoundOrd::StartExcluded(&neg_inf) < BoundOrd::EndExcluded(&pos_inf));
		assert!(BoundOrd::StartExcluded(&pos_inf) > BoundOrd::EndExcluded(&neg_inf));
	}

	#[test]
	fn accessors() {
		let one = Value::Finite(1);

		let start = BoundOrd::start(Bound::Open, &one);
		assert!(matches!(start, BoundOrd::StartExcluded(_)));
		assert_eq!(start.bound(), Bound::Open);
		assert_eq!(start.value(), &one);

		let end = BoundOrd::end(Bound::Closed, &one);
		assert!(matches!(end, BoundOrd::Included(_)));
		assert_eq!(end.bound(), Bound::Closed);
	}
}
