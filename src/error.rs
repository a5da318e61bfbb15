//! A module containing [`IntervalError`], the error type shared by every
//! fallible operation in this crate.

use alloc::string::String;

use thiserror::Error;

/// The error returned by fallible interval and interval-dict operations.
///
/// Every operation returning this error leaves its inputs untouched, an
/// [`IntervalDict`](crate::IntervalDict) in particular is never left
/// partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalError {
	/// Two bound values could not be compared with each other, for example
	/// a float `NaN`.
	#[error("bound values are not comparable with each other")]
	TypeMismatch,
	/// No entry of an [`IntervalDict`](crate::IntervalDict) covers the
	/// requested point.
	#[error("no entry covers the requested key")]
	KeyNotFound,
	/// An index given to [`Interval::get()`](crate::Interval::get) lies
	/// outside of the atomic components of the interval.
	#[error("index {index} is out of range for {len} atomic components")]
	IndexOutOfRange {
		/// The index as it was given.
		index: isize,
		/// The number of atomic components of the indexed interval.
		len: usize,
	},
	/// A transform given to [`Interval::replace()`](crate::Interval::replace)
	/// or [`Interval::apply()`](crate::Interval::apply) produced a malformed
	/// interval.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
}
