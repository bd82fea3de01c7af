// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! By-value checked arithmetic traits.
//!
//! Companions to the saturating traits for the places where overflow must
//! surface as `None` rather than clamp (e.g. weight configuration checks
//! in the normalizer).

use core::ops::{Add, Mul, Sub};

macro_rules! checked_impl_binary_val {
    ($trait_name:ident, $method:ident, $t:ty, $src_method:ident) => {
        impl $trait_name for $t {
            #[inline(always)]
            fn $method(self, v: Self) -> Option<Self> {
                <$t>::$src_method(self, v)
            }
        }
    };
}

/// Checked addition by value.
///
/// # Examples
///
/// ```rust
/// # use rota_core::num::ops::checked_arithmetic::CheckedAddVal;
///
/// assert_eq!(3i64.checked_add_val(4), Some(7));
/// assert_eq!(i64::MAX.checked_add_val(1), None);
/// ```
pub trait CheckedAddVal: Sized + Add<Self, Output = Self> {
    /// Performs checked addition by value.
    fn checked_add_val(self, v: Self) -> Option<Self>;
}

/// Checked subtraction by value.
pub trait CheckedSubVal: Sized + Sub<Self, Output = Self> {
    /// Performs checked subtraction by value.
    fn checked_sub_val(self, v: Self) -> Option<Self>;
}

/// Checked multiplication by value.
///
/// # Examples
///
/// ```rust
/// # use rota_core::num::ops::checked_arithmetic::CheckedMulVal;
///
/// assert_eq!(6i64.checked_mul_val(7), Some(42));
/// assert_eq!(i64::MAX.checked_mul_val(2), None);
/// ```
pub trait CheckedMulVal: Sized + Mul<Self, Output = Self> {
    /// Performs checked multiplication by value.
    fn checked_mul_val(self, v: Self) -> Option<Self>;
}

checked_impl_binary_val!(CheckedAddVal, checked_add_val, u8, checked_add);
checked_impl_binary_val!(CheckedAddVal, checked_add_val, u16, checked_add);
checked_impl_binary_val!(CheckedAddVal, checked_add_val, u32, checked_add);
checked_impl_binary_val!(CheckedAddVal, checked_add_val, u64, checked_add);
checked_impl_binary_val!(CheckedAddVal, checked_add_val, usize, checked_add);
checked_impl_binary_val!(CheckedAddVal, checked_add_val, i8, checked_add);
checked_impl_binary_val!(CheckedAddVal, checked_add_val, i16, checked_add);
checked_impl_binary_val!(CheckedAddVal, checked_add_val, i32, checked_add);
checked_impl_binary_val!(CheckedAddVal, checked_add_val, i64, checked_add);
checked_impl_binary_val!(CheckedAddVal, checked_add_val, isize, checked_add);

checked_impl_binary_val!(CheckedSubVal, checked_sub_val, u8, checked_sub);
checked_impl_binary_val!(CheckedSubVal, checked_sub_val, u16, checked_sub);
checked_impl_binary_val!(CheckedSubVal, checked_sub_val, u32, checked_sub);
checked_impl_binary_val!(CheckedSubVal, checked_sub_val, u64, checked_sub);
checked_impl_binary_val!(CheckedSubVal, checked_sub_val, usize, checked_sub);
checked_impl_binary_val!(CheckedSubVal, checked_sub_val, i8, checked_sub);
checked_impl_binary_val!(CheckedSubVal, checked_sub_val, i16, checked_sub);
checked_impl_binary_val!(CheckedSubVal, checked_sub_val, i32, checked_sub);
checked_impl_binary_val!(CheckedSubVal, checked_sub_val, i64, checked_sub);
checked_impl_binary_val!(CheckedSubVal, checked_sub_val, isize, checked_sub);

checked_impl_binary_val!(CheckedMulVal, checked_mul_val, u8, checked_mul);
checked_impl_binary_val!(CheckedMulVal, checked_mul_val, u16, checked_mul);
checked_impl_binary_val!(CheckedMulVal, checked_mul_val, u32, checked_mul);
checked_impl_binary_val!(CheckedMulVal, checked_mul_val, u64, checked_mul);
checked_impl_binary_val!(CheckedMulVal, checked_mul_val, usize, checked_mul);
checked_impl_binary_val!(CheckedMulVal, checked_mul_val, i8, checked_mul);
checked_impl_binary_val!(CheckedMulVal, checked_mul_val, i16, checked_mul);
checked_impl_binary_val!(CheckedMulVal, checked_mul_val, i32, checked_mul);
checked_impl_binary_val!(CheckedMulVal, checked_mul_val, i64, checked_mul);
checked_impl_binary_val!(CheckedMulVal, checked_mul_val, isize, checked_mul);
