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

use rota_core::num::constants;
use num_traits::Signed;

/// A grid cell that may be absent.
///
/// Instead of `Option<T>`, this type uses a sentinel encoding to avoid the
/// discriminant `Option` introduces for integer types. The model stores
/// one pinned start per visit and the search tracks one arrival rank per
/// patient in dense vectors; keeping each entry to a single machine word
/// keeps those vectors cache-friendly.
///
/// Encoding:
/// - Non-negative values (>= 0) represent a concrete cell.
/// - Negative values (<= -1) indicate absence.
///
/// Valid cells are always non-negative; negative cells have no meaning in
/// the scheduling domain, so the sentinel loses nothing.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StartCell<T>(T)
where
    T: Signed;

impl<T> StartCell<T>
where
    T: Copy + Signed + constants::MinusOne,
{
    const NONE_SENTINEL: T = T::MINUS_ONE;

    /// Creates a `StartCell` from an `Option<T>`.
    #[inline]
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => StartCell(v),
            None => StartCell(Self::NONE_SENTINEL),
        }
    }

    /// Creates a `StartCell` representing a concrete cell.
    ///
    /// # Panics
    ///
    /// Panics if the provided value is negative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rota_model::time::StartCell;
    ///
    /// let cell = StartCell::some(4i64);
    /// assert!(cell.is_some());
    /// assert_eq!(cell.raw(), 4);
    /// ```
    pub fn some(value: T) -> Self
    where
        T: PartialOrd + std::fmt::Display,
    {
        assert!(
            value > Self::NONE_SENTINEL,
            "called `StartCell::some` with a negative value: {}",
            value
        );

        StartCell(value)
    }

    /// Creates a `StartCell` representing absence.
    #[inline]
    pub fn none() -> Self {
        StartCell(Self::NONE_SENTINEL)
    }

    /// Returns `true` if no cell is present.
    #[inline]
    pub fn is_none(&self) -> bool
    where
        T: PartialOrd,
    {
        self.0 <= Self::NONE_SENTINEL
    }

    /// Returns `true` if a concrete cell is present.
    #[inline]
    pub fn is_some(&self) -> bool
    where
        T: PartialOrd,
    {
        !self.is_none()
    }

    /// Converts back into an `Option<T>`.
    #[inline]
    pub fn get(&self) -> Option<T>
    where
        T: PartialOrd,
    {
        if self.is_some() { Some(self.0) } else { None }
    }

    /// Returns the raw stored value, sentinel included.
    #[inline]
    pub fn raw(&self) -> T {
        self.0
    }

    /// Returns the contained cell.
    ///
    /// # Panics
    ///
    /// Panics if no cell is present.
    #[inline]
    pub fn unwrap(&self) -> T
    where
        T: PartialOrd,
    {
        assert!(
            self.is_some(),
            "called `StartCell::unwrap` on an absent cell"
        );
        self.0
    }
}

impl<T> std::fmt::Debug for StartCell<T>
where
    T: Copy + Signed + constants::MinusOne + PartialOrd + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.get() {
            Some(v) => write!(f, "StartCell({:?})", v),
            None => write!(f, "StartCell(None)"),
        }
    }
}

impl<T> std::fmt::Display for StartCell<T>
where
    T: Copy + Signed + constants::MinusOne + PartialOrd + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.get() {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_some_and_none_roundtrip() {
        let some = StartCell::some(3i64);
        assert!(some.is_some());
        assert_eq!(some.get(), Some(3));
        assert_eq!(some.unwrap(), 3);

        let none: StartCell<i64> = StartCell::none();
        assert!(none.is_none());
        assert_eq!(none.get(), None);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(StartCell::from_option(Some(5i64)).get(), Some(5));
        assert!(StartCell::<i64>::from_option(None).is_none());
    }

    #[test]
    #[should_panic(expected = "negative value")]
    fn test_some_rejects_negative() {
        let _ = StartCell::some(-2i64);
    }

    #[test]
    #[should_panic(expected = "absent cell")]
    fn test_unwrap_panics_on_none() {
        let none: StartCell<i64> = StartCell::none();
        let _ = none.unwrap();
    }

    #[test]
    fn test_zero_is_a_valid_cell() {
        let cell = StartCell::some(0i64);
        assert!(cell.is_some());
        assert_eq!(cell.unwrap(), 0);
    }
}
