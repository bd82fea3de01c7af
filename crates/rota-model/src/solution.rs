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

use crate::index::VisitIndex;
use fixedbitset::FixedBitSet;
use num_traits::{PrimInt, Signed};

/// The final solution to one scheduling instance.
///
/// Structure of Arrays layout, indexed directly by `VisitIndex`:
/// `start_cells[v]` is only meaningful when the corresponding `placed`
/// bit is set. The objective carried here is the engine's internal
/// span-form objective; the facade converts it to the reported value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution<T> {
    /// The total internal objective of this solution.
    objective_value: T,

    /// The assigned start cell for each visit (meaningful iff placed).
    start_cells: Vec<usize>,

    /// One bit per visit: set iff the visit is part of the schedule.
    placed: FixedBitSet,
}

impl<T> Solution<T>
where
    T: PrimInt + Signed + Copy,
{
    /// Constructs a new `Solution`.
    ///
    /// # Panics
    ///
    /// Panics if `start_cells` and `placed` have different lengths.
    pub fn new(objective_value: T, start_cells: Vec<usize>, placed: FixedBitSet) -> Self {
        assert_eq!(
            start_cells.len(),
            placed.len(),
            "called Solution::new with inconsistent lengths: start_cells.len() = {}, placed.len() = {}",
            start_cells.len(),
            placed.len()
        );

        Self {
            objective_value,
            start_cells,
            placed,
        }
    }

    /// Returns the number of visits covered by this solution.
    #[inline]
    pub fn num_visits(&self) -> usize {
        self.start_cells.len()
    }

    /// Returns the total internal objective value of this solution.
    #[inline]
    pub fn objective_value(&self) -> T {
        self.objective_value
    }

    /// Returns `true` if the specified visit is part of the schedule.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `visit` is out of bounds.
    #[inline]
    pub fn is_placed(&self, visit: VisitIndex) -> bool {
        debug_assert!(
            visit.get() < self.num_visits(),
            "called `Solution::is_placed` with visit index out of bounds: the len is {} but the index is {}",
            self.num_visits(),
            visit.get()
        );

        self.placed.contains(visit.get())
    }

    /// Returns the start cell of the specified visit.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `visit` is out of bounds or not placed.
    #[inline]
    pub fn start_cell(&self, visit: VisitIndex) -> usize {
        debug_assert!(
            visit.get() < self.num_visits(),
            "called `Solution::start_cell` with visit index out of bounds: the len is {} but the index is {}",
            self.num_visits(),
            visit.get()
        );
        debug_assert!(
            self.placed.contains(visit.get()),
            "called `Solution::start_cell` for a visit that is not placed: the index is {}",
            visit.get()
        );

        self.start_cells[visit.get()]
    }

    /// Returns the placed bitset.
    #[inline]
    pub fn placed(&self) -> &FixedBitSet {
        &self.placed
    }

    /// Returns a slice of start cells for all visits.
    #[inline]
    pub fn start_cells(&self) -> &[usize] {
        &self.start_cells
    }

    /// Iterates the placed visits as (visit, start cell) pairs.
    #[inline]
    pub fn placed_visits(&self) -> impl Iterator<Item = (VisitIndex, usize)> + '_ {
        self.placed
            .ones()
            .map(|v| (VisitIndex::new(v), self.start_cells[v]))
    }
}

impl<T> std::fmt::Display for Solution<T>
where
    T: PrimInt + Signed + Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution Summary")?;
        writeln!(f, "   Objective Value: {}", self.objective_value)?;
        writeln!(f)?;

        if self.placed.count_ones(..) == 0 {
            writeln!(f, "   (No visits placed)")?;
            return Ok(());
        }

        writeln!(f, "   {:<10} | {:<12}", "Visit", "Start Cell")?;
        writeln!(f, "   {:-<10}-+-{:-<12}", "", "")?;
        for (visit, start) in self.placed_visits() {
            writeln!(f, "   {:<10} | {:<12}", visit.get(), start)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vi(i: usize) -> VisitIndex {
        VisitIndex::new(i)
    }

    fn placed_bits(len: usize, set: &[usize]) -> FixedBitSet {
        let mut bits = FixedBitSet::with_capacity(len);
        for &i in set {
            bits.insert(i);
        }
        bits
    }

    #[test]
    fn test_new_and_accessors() {
        let sol = Solution::new(42i64, vec![0, 3, 1], placed_bits(3, &[0, 2]));

        assert_eq!(sol.objective_value(), 42);
        assert_eq!(sol.num_visits(), 3);
        assert!(sol.is_placed(vi(0)));
        assert!(!sol.is_placed(vi(1)));
        assert!(sol.is_placed(vi(2)));
        assert_eq!(sol.start_cell(vi(0)), 0);
        assert_eq!(sol.start_cell(vi(2)), 1);
    }

    #[test]
    #[should_panic(expected = "inconsistent lengths")]
    fn test_new_panics_on_length_mismatch() {
        let _ = Solution::new(0i64, vec![0, 1], placed_bits(3, &[]));
    }

    #[test]
    fn test_placed_visits_iterates_in_index_order() {
        let sol = Solution::new(7i64, vec![5, 2, 9, 0], placed_bits(4, &[1, 3]));
        let pairs: Vec<(usize, usize)> = sol
            .placed_visits()
            .map(|(v, start)| (v.get(), start))
            .collect();
        assert_eq!(pairs, vec![(1, 2), (3, 0)]);
    }

    #[test]
    fn test_empty_solution_is_valid() {
        let sol = Solution::new(0i64, Vec::new(), FixedBitSet::with_capacity(0));
        assert_eq!(sol.num_visits(), 0);
        assert_eq!(sol.objective_value(), 0);
    }

    #[test]
    fn test_clone_and_eq() {
        let sol = Solution::new(5i64, vec![1, 2], placed_bits(2, &[0, 1]));
        let copy = sol.clone();
        assert_eq!(sol, copy);
    }
}
