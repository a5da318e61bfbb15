//! A module containing the [`Discrete`] trait and trait impls for the
//! primitive integer datatypes and [`char`].

/// A trait for point types where every value has a well defined next and
/// previous value, such as the integers.
///
/// Implementing this trait lets a type be used with
/// [`DiscreteDomain`](crate::DiscreteDomain), under which `open(0, 2)` is
/// the same interval as `singleton(1)`.
pub trait Discrete {
	/// The smallest value greater than `self` if one exists.
	fn up(&self) -> Option<Self>
	where
		Self: Sized;

	/// The greatest value smaller than `self` if one exists.
	fn down(&self) -> Option<Self>
	where
		Self: Sized;
}

macro_rules! discrete_int {
	() => {};
	($ident:ident, $($t:tt)*) => {
		impl Discrete for $ident {
			fn up(&self) -> Option<Self> {
				self.checked_add(1)
			}
			fn down(&self) -> Option<Self> {
				self.checked_sub(1)
			}
		}

		discrete_int!($($t)*);
	};
}

discrete_int!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, usize, isize,);

// the surrogate range is not made of chars so stepping skips over it
impl Discrete for char {
	fn up(&self) -> Option<Self> {
		match *self {
			'\u{D7FF}' => Some('\u{E000}'),
			x => char::from_u32(u32::from(x) + 1),
		}
	}
	fn down(&self) -> Option<Self> {
		match *self {
			'\u{E000}' => Some('\u{D7FF}'),
			x => u32::from(x).checked_sub(1).and_then(char::from_u32),
		}
	}
}
