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

//! # Shared Incumbent (Best Solution Holder)
//!
//! A concurrent container for the best schedule discovered so far. It
//! exposes a fast, lock-free upper bound via an atomic and stores the
//! actual `Solution<T>` behind a `Mutex` as the source of truth. Portfolio
//! workers consult the atomic bound to prune without locking and take the
//! mutex only when installing a strict improvement.
//!
//! The bound starts at `i64::MAX`, meaning "no incumbent yet"; the solver
//! minimizes, so any real solution improves on the sentinel.

use num_traits::{PrimInt, Signed, ToPrimitive};
use rota_model::solution::Solution;
use std::sync::{Mutex, atomic::AtomicI64, atomic::Ordering};

/// A concurrent holder for the best (incumbent) solution found during
/// search.
///
/// Concurrency and memory ordering: the upper bound is loaded/stored with
/// `Ordering::Relaxed`. That is sufficient because the bound is only a
/// heuristic to short-circuit work; all correctness-sensitive state (the
/// solution and its objective) is synchronized via the `Mutex`.
#[derive(Debug)]
pub struct SharedIncumbent<T> {
    /// Objective of the incumbent stored as `i64` for atomic access.
    upper_bound: AtomicI64,

    /// The incumbent solution; the source of truth.
    solution: Mutex<Option<Solution<T>>>,
}

impl<T> Default for SharedIncumbent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SharedIncumbent<T> {
    /// Creates a new shared incumbent with no solution installed.
    #[inline]
    pub fn new() -> Self {
        SharedIncumbent {
            upper_bound: AtomicI64::new(i64::MAX),
            solution: Mutex::new(None),
        }
    }

    /// Returns the current upper bound (fast atomic read).
    #[inline]
    pub fn upper_bound(&self) -> i64 {
        self.upper_bound.load(Ordering::Relaxed)
    }

    /// Returns the current upper bound converted to type `T`.
    #[inline]
    pub fn upper_bound_as(&self) -> Result<T, <T as std::convert::TryFrom<i64>>::Error>
    where
        T: TryFrom<i64>,
    {
        T::try_from(self.upper_bound.load(Ordering::Relaxed))
    }

    /// Returns a cloned snapshot of the current incumbent, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<Solution<T>>
    where
        T: Clone,
    {
        let guard = self.solution.lock().unwrap();
        guard.clone()
    }

    /// Attempts to install the candidate as the new incumbent.
    ///
    /// Returns `true` iff the candidate was strictly better than the
    /// stored solution and is now the incumbent.
    pub fn try_install(&self, candidate: &Solution<T>) -> bool
    where
        T: PrimInt + Signed + Copy + ToPrimitive,
    {
        let candidate_bound = candidate.objective_value().to_i64().unwrap_or(i64::MAX);

        // Cheap pre-check: obviously worse candidates never take the lock.
        if candidate_bound >= self.upper_bound() {
            return false;
        }

        let mut guard = self.solution.lock().unwrap();
        let improves = match guard.as_ref() {
            Some(current) => candidate.objective_value() < current.objective_value(),
            None => true,
        };

        if improves {
            *guard = Some(candidate.clone());
            self.upper_bound.store(candidate_bound, Ordering::Relaxed);
        }
        improves
    }
}

impl<T> std::fmt::Display for SharedIncumbent<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Incumbent(upper_bound: {})", self.upper_bound())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixedbitset::FixedBitSet;

    fn solution(objective: i64) -> Solution<i64> {
        Solution::new(objective, Vec::new(), FixedBitSet::with_capacity(0))
    }

    #[test]
    fn test_starts_without_incumbent() {
        let incumbent: SharedIncumbent<i64> = SharedIncumbent::new();
        assert_eq!(incumbent.upper_bound(), i64::MAX);
        assert!(incumbent.snapshot().is_none());
    }

    #[test]
    fn test_install_improving_candidate() {
        let incumbent = SharedIncumbent::new();
        assert!(incumbent.try_install(&solution(100)));
        assert_eq!(incumbent.upper_bound(), 100);
        assert_eq!(incumbent.snapshot().unwrap().objective_value(), 100);
    }

    #[test]
    fn test_reject_non_improving_candidate() {
        let incumbent = SharedIncumbent::new();
        assert!(incumbent.try_install(&solution(100)));
        assert!(!incumbent.try_install(&solution(100)));
        assert!(!incumbent.try_install(&solution(150)));
        assert_eq!(incumbent.upper_bound(), 100);
    }

    #[test]
    fn test_strictly_better_replaces() {
        let incumbent = SharedIncumbent::new();
        assert!(incumbent.try_install(&solution(100)));
        assert!(incumbent.try_install(&solution(42)));
        assert_eq!(incumbent.upper_bound(), 42);
        assert_eq!(incumbent.snapshot().unwrap().objective_value(), 42);
    }

    #[test]
    fn test_upper_bound_as() {
        let incumbent = SharedIncumbent::new();
        incumbent.try_install(&solution(7));
        assert_eq!(incumbent.upper_bound_as(), Ok(7i64));
    }
}
