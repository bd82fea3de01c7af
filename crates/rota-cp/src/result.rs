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

use crate::stats::CpSolverStatistics;
use num_traits::{PrimInt, Signed};
use rota_model::solution::Solution;
use rota_search::{
    portfolio::PortfolioWorkerResult,
    result::{SolverResult, TerminationReason},
};

/// Result of one branch-and-bound run.
#[derive(Debug, Clone)]
pub struct CpSolverOutcome<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    statistics: CpSolverStatistics<T>,
}

impl<T> CpSolverOutcome<T> {
    #[inline]
    pub fn optimal(solution: Solution<T>, statistics: CpSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Optimal(solution),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: CpSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    /// An aborted run: `Feasible` with the best solution if one exists,
    /// `Unknown` otherwise. Never `Infeasible`, which would claim a
    /// proof the cut-short search does not have.
    #[inline]
    pub fn aborted<R>(
        solution: Option<Solution<T>>,
        reason: R,
        statistics: CpSolverStatistics<T>,
    ) -> Self
    where
        R: Into<String>,
    {
        let result = match solution {
            Some(sol) => SolverResult::Feasible(sol),
            None => SolverResult::Unknown,
        };

        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason.into()),
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
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the run statistics.
    #[inline]
    pub fn statistics(&self) -> &CpSolverStatistics<T> {
        &self.statistics
    }
}

impl<T> From<CpSolverOutcome<T>> for PortfolioWorkerResult<T>
where
    T: PrimInt + Signed,
{
    fn from(outcome: CpSolverOutcome<T>) -> Self {
        PortfolioWorkerResult::new(
            outcome.result,
            outcome.termination_reason,
            outcome.statistics.nodes_explored,
            outcome.statistics.solutions_found,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixedbitset::FixedBitSet;

    type IntegerType = i64;

    fn solution(objective: IntegerType) -> Solution<IntegerType> {
        Solution::new(objective, Vec::new(), FixedBitSet::with_capacity(0))
    }

    fn stats() -> CpSolverStatistics<IntegerType> {
        CpSolverStatistics::default()
    }

    #[test]
    fn test_aborted_without_solution_is_unknown() {
        let outcome = CpSolverOutcome::<IntegerType>::aborted(None, "time limit", stats());
        assert_eq!(outcome.result(), &SolverResult::Unknown);
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted("time limit".into())
        );
    }

    #[test]
    fn test_aborted_with_solution_is_feasible() {
        let outcome = CpSolverOutcome::aborted(Some(solution(9)), "interrupted", stats());
        assert!(matches!(outcome.result(), SolverResult::Feasible(_)));
    }

    #[test]
    fn test_into_portfolio_result_carries_counters() {
        let mut statistics = stats();
        statistics.on_node_explored();
        statistics.on_node_explored();
        statistics.on_solution_found();

        let outcome = CpSolverOutcome::optimal(solution(5), statistics);
        let worker: PortfolioWorkerResult<IntegerType> = outcome.into();
        assert_eq!(worker.nodes_explored(), 2);
        assert_eq!(worker.solutions_found(), 1);
        assert!(matches!(worker.result(), SolverResult::Optimal(_)));
    }
}
