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

use crate::stats::SolverStatistics;
use num_traits::{PrimInt, Signed};
use rota_model::solution::Solution;

/// The result of a search after termination.
///
/// An aborted search without a solution is `Unknown`, never `Infeasible`:
/// infeasibility is a proof, and a search cut short by a deadline or an
/// interrupt has not produced one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// Proven that no feasible schedule exists.
    Infeasible,
    /// A solution with a proof of optimality.
    Optimal(Solution<T>),
    /// A feasible solution without a proof of optimality.
    Feasible(Solution<T>),
    /// Terminated without a solution and without proving infeasibility.
    Unknown,
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: PrimInt + Signed + Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(solution) => {
                write!(f, "Optimal(objective={})", solution.objective_value())
            }
            SolverResult::Feasible(solution) => {
                write!(f, "Feasible(objective={})", solution.objective_value())
            }
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

impl<T> SolverResult<T>
where
    T: PrimInt + Signed + Copy,
{
    /// Returns the objective value if a solution was found.
    #[inline]
    pub fn objective_value(&self) -> Option<T> {
        match self {
            SolverResult::Optimal(sol) | SolverResult::Feasible(sol) => {
                Some(sol.objective_value())
            }
            _ => None,
        }
    }

    /// Returns the contained solution if one was found.
    #[inline]
    pub fn solution(&self) -> Option<&Solution<T>> {
        match self {
            SolverResult::Optimal(sol) | SolverResult::Feasible(sol) => Some(sol),
            _ => None,
        }
    }
}

/// The reason the search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The search found a solution and proved its optimality.
    OptimalityProven,
    /// The search proved that the instance is infeasible.
    InfeasibilityProven,
    /// The search was cut short (time limit, interrupt, solution limit).
    /// The string names the cause.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// The complete outcome of a solve: result, termination reason, and
/// aggregate statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome<T>
where
    T: PrimInt + Signed + Copy,
{
    result: SolverResult<T>,
    reason: TerminationReason,
    statistics: SolverStatistics,
}

impl<T> SolverOutcome<T>
where
    T: PrimInt + Signed + Copy,
{
    /// Creates an outcome for a proven-optimal solution.
    #[inline]
    pub fn optimal(solution: Solution<T>, statistics: SolverStatistics) -> Self {
        Self {
            result: SolverResult::Optimal(solution),
            reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    /// Creates an outcome for a proven-infeasible instance.
    #[inline]
    pub fn infeasible(statistics: SolverStatistics) -> Self {
        Self {
            result: SolverResult::Infeasible,
            reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    /// Creates an outcome for a feasible solution found before abortion.
    #[inline]
    pub fn feasible<R>(solution: Solution<T>, abort_reason: R, statistics: SolverStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            result: SolverResult::Feasible(solution),
            reason: TerminationReason::Aborted(abort_reason.into()),
            statistics,
        }
    }

    /// Creates an outcome for an abort without any solution.
    #[inline]
    pub fn unknown<R>(abort_reason: R, statistics: SolverStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            result: SolverResult::Unknown,
            reason: TerminationReason::Aborted(abort_reason.into()),
            statistics,
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn reason(&self) -> &TerminationReason {
        &self.reason
    }

    /// Returns the solve statistics.
    #[inline]
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    /// Returns `true` for a proven-optimal outcome.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    /// Returns `true` for a feasible-but-unproven outcome.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self.result, SolverResult::Feasible(_))
    }

    /// Returns `true` for a proven-infeasible outcome.
    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, SolverResult::Infeasible)
    }

    /// Returns `true` if any solution was found.
    #[inline]
    pub fn has_solution(&self) -> bool {
        matches!(
            self.result,
            SolverResult::Optimal(_) | SolverResult::Feasible(_)
        )
    }
}

impl<T> std::fmt::Display for SolverOutcome<T>
where
    T: PrimInt + Signed + Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result: {}", self.result)?;
        writeln!(f, "Termination: {}", self.reason)?;
        write!(f, "{}", self.statistics)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::SolverStatisticsBuilder;
    use fixedbitset::FixedBitSet;

    fn solution(objective: i64) -> Solution<i64> {
        Solution::new(objective, Vec::new(), FixedBitSet::with_capacity(0))
    }

    fn stats() -> SolverStatistics {
        SolverStatisticsBuilder::new().build()
    }

    #[test]
    fn test_optimal_outcome() {
        let outcome = SolverOutcome::optimal(solution(5), stats());
        assert!(outcome.is_optimal());
        assert!(outcome.has_solution());
        assert_eq!(outcome.reason(), &TerminationReason::OptimalityProven);
        assert_eq!(outcome.result().objective_value(), Some(5));
    }

    #[test]
    fn test_infeasible_outcome() {
        let outcome: SolverOutcome<i64> = SolverOutcome::infeasible(stats());
        assert!(outcome.is_infeasible());
        assert!(!outcome.has_solution());
        assert_eq!(outcome.result().objective_value(), None);
    }

    #[test]
    fn test_feasible_outcome_keeps_abort_reason() {
        let outcome = SolverOutcome::feasible(solution(9), "time limit reached", stats());
        assert!(outcome.is_feasible());
        assert_eq!(
            outcome.reason(),
            &TerminationReason::Aborted("time limit reached".into())
        );
    }

    #[test]
    fn test_unknown_outcome_has_no_solution() {
        let outcome: SolverOutcome<i64> = SolverOutcome::unknown("interrupted", stats());
        assert!(!outcome.has_solution());
        assert!(!outcome.is_infeasible());
        assert_eq!(outcome.result(), &SolverResult::Unknown);
    }
}
