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

use num_traits::PrimInt;

/// A half-open span `[start, end)` of cells on the discrete time grid.
///
/// A visit occupying `duration` cells starting at `start` covers exactly
/// the cells of `CellSpan::new(start, start + duration)`. Half-open bounds
/// make adjacency natural: two back-to-back visits share a bound but do
/// not overlap.
///
/// # Invariants
/// `start() <= end()` always holds.
///
/// # Examples
///
/// ```rust
/// # use rota_core::math::span::CellSpan;
///
/// let a = CellSpan::new(0, 2);
/// let b = CellSpan::new(2, 4);
/// assert!(!a.overlaps(&b)); // adjacent, not overlapping
/// assert!(a.contains(1));
/// assert!(!a.contains(2));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellSpan<T>
where
    T: PrimInt,
{
    start_inclusive: T,
    end_exclusive: T,
}

impl<T> CellSpan<T>
where
    T: PrimInt,
{
    /// Creates a new `CellSpan`.
    ///
    /// # Panics
    ///
    /// Panics if `start_inclusive > end_exclusive`.
    #[inline]
    pub fn new(start_inclusive: T, end_exclusive: T) -> Self {
        assert!(
            start_inclusive <= end_exclusive,
            "invalid span: start_inclusive must be less than or equal to end_exclusive"
        );
        Self {
            start_inclusive,
            end_exclusive,
        }
    }

    /// Creates a new `CellSpan` if the bounds are ordered, `None` otherwise.
    #[inline]
    pub fn try_new(start_inclusive: T, end_exclusive: T) -> Option<Self> {
        if start_inclusive <= end_exclusive {
            Some(Self {
                start_inclusive,
                end_exclusive,
            })
        } else {
            None
        }
    }

    /// Returns the inclusive start cell.
    #[inline]
    pub fn start(&self) -> T {
        self.start_inclusive
    }

    /// Returns the exclusive end cell.
    #[inline]
    pub fn end(&self) -> T {
        self.end_exclusive
    }

    /// Returns the number of cells covered by the span.
    #[inline]
    pub fn len(&self) -> T {
        self.end_exclusive - self.start_inclusive
    }

    /// Returns `true` if the span covers no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start_inclusive == self.end_exclusive
    }

    /// Returns `true` if `cell` lies within the span.
    #[inline]
    pub fn contains(&self, cell: T) -> bool {
        self.start_inclusive <= cell && cell < self.end_exclusive
    }

    /// Returns `true` if the two spans share at least one cell.
    ///
    /// Empty spans overlap nothing, including themselves.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_inclusive < other.end_exclusive && other.start_inclusive < self.end_exclusive
    }

    /// Returns `true` if `other` is fully contained in `self`.
    #[inline]
    pub fn covers(&self, other: &Self) -> bool {
        self.start_inclusive <= other.start_inclusive && other.end_exclusive <= self.end_exclusive
    }
}

impl<T> std::fmt::Debug for CellSpan<T>
where
    T: PrimInt + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CellSpan({:?}..{:?})",
            self.start_inclusive, self.end_exclusive
        )
    }
}

impl<T> std::fmt::Display for CellSpan<T>
where
    T: PrimInt + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}
