//! Short constructors and generators for the `i8` intervals used across the
//! unit tests.
//!
//! The two letters name the lower then the upper bound: `i` included, `e`
//! excluded and `u` unbounded.

use quickcheck::{Arbitrary, Gen};

use crate::atomic::Atomic;
use crate::bound::Bound;
use crate::interval::Interval;
use crate::value::Value;

pub fn uu() -> Interval<i8> {
	Interval::open(Value::NegInf, Value::PosInf)
}
pub fn ui(x: i8) -> Interval<i8> {
	Interval::from_atomic(Bound::Open, Value::NegInf, x, Bound::Closed)
}
pub fn ue(x: i8) -> Interval<i8> {
	Interval::open(Value::NegInf, x)
}
pub fn iu(x: i8) -> Interval<i8> {
	Interval::closedopen(x, Value::PosInf)
}
pub fn eu(x: i8) -> Interval<i8> {
	Interval::open(x, Value::PosInf)
}
pub fn ii(x1: i8, x2: i8) -> Interval<i8> {
	Interval::closed(x1, x2)
}
pub fn ie(x1: i8, x2: i8) -> Interval<i8> {
	Interval::closedopen(x1, x2)
}
pub fn ei(x1: i8, x2: i8) -> Interval<i8> {
	Interval::openclosed(x1, x2)
}
pub fn ee(x1: i8, x2: i8) -> Interval<i8> {
	Interval::open(x1, x2)
}

//only every other number to allow the mathematical definitions to be
//checked on the points in between
const NUMBERS: &[i8] = &[2, 4, 6, 8];

/// Every atomic interval over [`NUMBERS`] and the infinities, plus a few
/// non-atomic ones.
pub fn all_test_intervals() -> Vec<Interval<i8>> {
	let values = NUMBERS
		.iter()
		.map(|x| Value::Finite(*x))
		.chain([Value::NegInf, Value::PosInf]);
	let bounds = [Bound::Closed, Bound::Open];

	let mut output = Vec::new();
	for lower in values.clone() {
		for upper in values.clone() {
			for left in bounds {
				for right in bounds {
					let interval = Interval::from_atomic(left, lower, upper, right);
					if !output.contains(&interval) {
						output.push(interval);
					}
				}
			}
		}
	}

	output.extend([
		ii(2, 4) | ee(6, 8),
		ie(2, 4) | ei(4, 6),
		ue(2) | ii(4, 6) | eu(8),
		ui(2) | iu(8),
		ee(2, 4) | ee(4, 6) | ee(6, 8),
	]);

	output
}

/// A small random interval for property tests.
#[derive(Debug, Clone)]
pub struct ArbInterval(pub Interval<i8>);

impl Arbitrary for ArbInterval {
	fn arbitrary(g: &mut Gen) -> Self {
		let count = usize::arbitrary(g) % 5;

		let mut atomics = Vec::new();
		for _ in 0..count {
			let left = arbitrary_bound(g);
			let lower = arbitrary_value(g);
			let upper = arbitrary_value(g);
			let right = arbitrary_bound(g);

			atomics.push(Atomic::new(left, lower, upper, right));
		}

		ArbInterval(atomics.into_iter().collect())
	}
}

fn arbitrary_value(g: &mut Gen) -> Value<i8> {
	match u8::arbitrary(g) % 10 {
		0 => Value::NegInf,
		1 => Value::PosInf,
		_ => Value::Finite(i8::arbitrary(g) % 16),
	}
}

fn arbitrary_bound(g: &mut Gen) -> Bound {
	if bool::arbitrary(g) {
		Bound::Closed
	} else {
		Bound::Open
	}
}
