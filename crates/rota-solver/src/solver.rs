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

//! The portfolio solver.
//!
//! Runs every registered search strategy on its own scoped thread against
//! a shared incumbent. Each worker carries a composite monitor stack: an
//! interrupt monitor wired to the internal stop signal (raised when any
//! worker proves optimality), an optional caller cancellation flag, and
//! optional solution/time budgets. Determinism follows from configuration:
//! a single registered worker explores one fixed tree, so identical
//! requests produce identical schedules.

use rota_model::{model::Model, solution::Solution};
use rota_search::{
    incumbent::SharedIncumbent,
    monitor::{
        composite::CompositeMonitor, interrupt::InterruptMonitor,
        solution_limit::SolutionLimitMonitor, time_limit::TimeLimitMonitor,
    },
    num::SolverNumeric,
    portfolio::{PortfolioContext, PortfolioSolver, PortfolioWorkerResult},
    result::{SolverOutcome, SolverResult, TerminationReason},
    stats::{SolverStatistics, SolverStatisticsBuilder},
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// A portfolio of exact search strategies over one model.
pub struct Solver<'a, T> {
    workers: Vec<Box<dyn PortfolioSolver<T> + Send + 'a>>,
    incumbent: SharedIncumbent<T>,
    global_solution_count: AtomicU64,
    /// Raised when a worker proves optimality so its siblings stop early.
    stop_signal: AtomicBool,
    solution_limit: Option<u64>,
    time_limit: Option<std::time::Duration>,
}

impl<'a, T> Solver<'a, T>
where
    T: SolverNumeric,
{
    /// Adds another search strategy to the portfolio.
    #[inline]
    pub fn add_solver<S>(&mut self, solver: S)
    where
        S: PortfolioSolver<T> + Send + 'a,
    {
        self.workers.push(Box::new(solver));
    }

    /// Returns the shared incumbent.
    #[inline]
    pub fn incumbent(&self) -> &SharedIncumbent<T> {
        &self.incumbent
    }

    /// Returns the configured time limit, if any.
    #[inline]
    pub fn time_limit(&self) -> Option<std::time::Duration> {
        self.time_limit
    }

    /// Runs the portfolio to termination.
    pub fn solve(&mut self, model: &Model) -> SolverOutcome<T> {
        self.solve_with(model, None, None)
    }

    /// Runs the portfolio with an optional warm-start solution and an
    /// optional caller cancellation flag.
    pub fn solve_with(
        &mut self,
        model: &Model,
        warm_start: Option<&Solution<T>>,
        cancel: Option<&AtomicBool>,
    ) -> SolverOutcome<T> {
        assert!(
            !self.workers.is_empty(),
            "called `Solver::solve` with no portfolio solvers added"
        );

        let start_time = std::time::Instant::now();

        self.stop_signal.store(false, Ordering::Relaxed);
        self.global_solution_count.store(0, Ordering::Relaxed);

        let results = self.run_portfolio_parallel(model, warm_start, cancel);
        self.construct_outcome(start_time, results, cancel)
    }

    /// Spawns one scoped thread per worker and collects the results.
    fn run_portfolio_parallel(
        &mut self,
        model: &Model,
        warm_start: Option<&Solution<T>>,
        cancel: Option<&AtomicBool>,
    ) -> Vec<PortfolioWorkerResult<T>> {
        let solution_limit = self.solution_limit;
        let time_limit = self.time_limit;
        let incumbent = &self.incumbent;
        let global_solution_count = &self.global_solution_count;
        let stop_signal = &self.stop_signal;

        let mut results = Vec::with_capacity(self.workers.len());

        std::thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.workers.len());

            for worker in &mut self.workers {
                let handle = scope.spawn(move || {
                    let mut monitor = CompositeMonitor::<T>::new();

                    // Always wired so a sibling's optimality proof (or a
                    // caller cancellation) stops this thread.
                    monitor.add_monitor(InterruptMonitor::new(stop_signal));
                    if let Some(cancel_flag) = cancel {
                        monitor.add_monitor(InterruptMonitor::new(cancel_flag));
                    }
                    if let Some(limit) = solution_limit {
                        monitor
                            .add_monitor(SolutionLimitMonitor::new(global_solution_count, limit));
                    }
                    if let Some(limit) = time_limit {
                        monitor.add_monitor(TimeLimitMonitor::new(limit));
                    }

                    log::debug!("portfolio worker '{}' starting", worker.name());
                    let context =
                        PortfolioContext::new(model, incumbent, &mut monitor, warm_start);
                    let result = worker.invoke(context);

                    if matches!(result.result(), SolverResult::Optimal(_)) {
                        log::info!(
                            "portfolio worker '{}' proved optimality, signaling stop",
                            worker.name()
                        );
                        stop_signal.store(true, Ordering::Relaxed);
                    }

                    result
                });
                handles.push(handle);
            }

            for handle in handles {
                results.push(handle.join().expect("portfolio worker thread panicked"));
            }
        });

        results
    }

    /// Aggregates the worker results into the final outcome.
    fn construct_outcome(
        &self,
        start_time: std::time::Instant,
        results: Vec<PortfolioWorkerResult<T>>,
        cancel: Option<&AtomicBool>,
    ) -> SolverOutcome<T> {
        let statistics = self.build_statistics(start_time, &results);

        let optimality_proven = results
            .iter()
            .any(|r| matches!(r.result(), SolverResult::Optimal(_)));

        // Every registered strategy is complete, so a single worker's
        // infeasibility proof settles the instance.
        let infeasibility_proven = results
            .iter()
            .any(|r| matches!(r.result(), SolverResult::Infeasible));

        let best_solution = self.find_best_solution(&results);
        let best_result = self.find_best_result(&results);

        if let Some(solution) = best_solution {
            if optimality_proven {
                return SolverOutcome::optimal(solution, statistics);
            }
            let reason = self.determine_abort_reason(best_result, cancel);
            return SolverOutcome::feasible(solution, reason, statistics);
        }

        if infeasibility_proven {
            return SolverOutcome::infeasible(statistics);
        }

        let reason = self.determine_abort_reason(None, cancel);
        SolverOutcome::unknown(reason, statistics)
    }

    /// Finds the best solution among the worker results and the shared
    /// incumbent.
    fn find_best_solution(&self, results: &[PortfolioWorkerResult<T>]) -> Option<Solution<T>> {
        let worker_solutions = results.iter().filter_map(|r| match r.result() {
            SolverResult::Optimal(s) | SolverResult::Feasible(s) => Some(s),
            _ => None,
        });

        let incumbent_snapshot = self.incumbent.snapshot();

        worker_solutions
            .chain(incumbent_snapshot.as_ref())
            .min_by_key(|s| s.objective_value())
            .cloned()
    }

    /// Finds the result wrapper of the worker that produced the best
    /// solution, to borrow its specific abort message.
    fn find_best_result<'r>(
        &self,
        results: &'r [PortfolioWorkerResult<T>],
    ) -> Option<&'r PortfolioWorkerResult<T>> {
        results
            .iter()
            .filter(|r| {
                matches!(
                    r.result(),
                    SolverResult::Optimal(_) | SolverResult::Feasible(_)
                )
            })
            .min_by_key(|r| match r.result() {
                SolverResult::Optimal(s) | SolverResult::Feasible(s) => s.objective_value(),
                _ => unreachable!("filtered above"),
            })
    }

    fn build_statistics(
        &self,
        start_time: std::time::Instant,
        results: &[PortfolioWorkerResult<T>],
    ) -> SolverStatistics {
        SolverStatisticsBuilder::new()
            .solutions_found(results.iter().map(|r| r.solutions_found()).sum())
            .nodes_explored(results.iter().map(|r| r.nodes_explored()).sum())
            .used_workers(results.len())
            .solve_duration(start_time.elapsed())
            .build()
    }

    /// Determines the reason string for an aborted outcome.
    ///
    /// Priority: caller cancellation, then the specific message of the
    /// best worker, then the stop signal, then the configured limits.
    fn determine_abort_reason(
        &self,
        best_result: Option<&PortfolioWorkerResult<T>>,
        cancel: Option<&AtomicBool>,
    ) -> String {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return "cancelled".to_string();
        }

        best_result
            .and_then(|result| match result.termination_reason() {
                TerminationReason::Aborted(reason) => Some(reason.clone()),
                _ => None,
            })
            .or_else(|| {
                self.stop_signal
                    .load(Ordering::Relaxed)
                    .then(|| "interrupt signal received".to_string())
            })
            .or_else(|| {
                self.time_limit
                    .map(|limit| format!("time limit reached after {:.3}s", limit.as_secs_f64()))
            })
            .or_else(|| {
                self.solution_limit
                    .map(|limit| format!("solution limit {} reached", limit))
            })
            .unwrap_or_else(|| "portfolio finished without proving optimality".to_string())
    }
}

/// Builder for the portfolio `Solver`.
pub struct SolverBuilder<'a, T> {
    workers: Vec<Box<dyn PortfolioSolver<T> + Send + 'a>>,
    solution_limit: Option<u64>,
    time_limit: Option<std::time::Duration>,
}

impl<'a, T> Default for SolverBuilder<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> SolverBuilder<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            workers: Vec::new(),
            solution_limit: None,
            time_limit: None,
        }
    }

    #[inline]
    pub fn with_solution_limit(mut self, limit: u64) -> Self {
        self.solution_limit = Some(limit);
        self
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: std::time::Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[inline]
    pub fn add_solver<S>(mut self, solver: S) -> Self
    where
        S: PortfolioSolver<T> + Send + 'a,
    {
        self.workers.push(Box::new(solver));
        self
    }

    #[inline]
    pub fn build(self) -> Solver<'a, T> {
        Solver {
            workers: self.workers,
            incumbent: SharedIncumbent::new(),
            global_solution_count: AtomicU64::new(0),
            stop_signal: AtomicBool::new(false),
            solution_limit: self.solution_limit,
            time_limit: self.time_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_cp::branching::{input_order::InputOrderBuilder, priority_rank::PriorityRankBuilder};
    use rota_cp::eval::weighted::{CostWeights, WeightedCostEvaluator};
    use rota_cp::portfolio::CpPortfolioSolver;
    use rota_cp::warmstart::greedy_schedule;
    use rota_model::index::{PatientIndex, UnitIndex};
    use rota_model::model::ModelBuilder;

    type IntegerType = i64;

    fn clinic_model() -> Model {
        let mut builder = ModelBuilder::new(3, 2, 12);
        builder.set_unit_duration_cells(UnitIndex::new(0), 2);
        builder.set_unit_priority(UnitIndex::new(1), 1);
        builder.set_patient_arrival_cell(PatientIndex::new(1), 2);
        builder.build()
    }

    fn worker() -> CpPortfolioSolver<IntegerType, InputOrderBuilder, WeightedCostEvaluator<IntegerType>>
    {
        CpPortfolioSolver::new(
            InputOrderBuilder,
            WeightedCostEvaluator::new(CostWeights::default()),
        )
    }

    #[test]
    fn test_single_worker_proves_optimality() {
        let model = clinic_model();
        let mut solver = SolverBuilder::<IntegerType>::new().add_solver(worker()).build();

        let outcome = solver.solve(&model);
        assert!(outcome.is_optimal());
        assert_eq!(outcome.statistics().used_workers, 1);
    }

    #[test]
    fn test_two_workers_agree() {
        let model = clinic_model();

        let single = {
            let mut solver = SolverBuilder::<IntegerType>::new().add_solver(worker()).build();
            solver.solve(&model)
        };

        let mut portfolio = SolverBuilder::<IntegerType>::new()
            .add_solver(worker())
            .add_solver(CpPortfolioSolver::new(
                PriorityRankBuilder,
                WeightedCostEvaluator::new(CostWeights::default()),
            ))
            .build();
        let double = portfolio.solve(&model);

        assert!(double.is_optimal() || double.is_feasible());
        assert_eq!(
            single.result().objective_value(),
            double.result().objective_value()
        );
    }

    #[test]
    fn test_infeasible_instance() {
        let mut builder = ModelBuilder::new(2, 1, 12);
        builder.set_patient_arrival_cell(PatientIndex::new(0), 11);
        let model = builder.build();

        let mut solver = SolverBuilder::<IntegerType>::new().add_solver(worker()).build();
        assert!(solver.solve(&model).is_infeasible());
    }

    #[test]
    fn test_preset_cancellation_with_warm_start_is_feasible() {
        let model = clinic_model();
        let mut evaluator = WeightedCostEvaluator::<IntegerType>::new(CostWeights::default());
        let warm = greedy_schedule(&model, &mut evaluator).unwrap();

        let cancel = AtomicBool::new(true);
        let mut solver = SolverBuilder::<IntegerType>::new().add_solver(worker()).build();
        let outcome = solver.solve_with(&model, Some(&warm), Some(&cancel));

        assert!(outcome.is_feasible());
        assert_eq!(
            outcome.reason(),
            &TerminationReason::Aborted("cancelled".to_string())
        );
    }

    #[test]
    fn test_preset_cancellation_without_solution_is_unknown() {
        let model = clinic_model();
        let cancel = AtomicBool::new(true);
        let mut solver = SolverBuilder::<IntegerType>::new().add_solver(worker()).build();
        let outcome = solver.solve_with(&model, None, Some(&cancel));

        assert!(!outcome.has_solution());
        assert!(!outcome.is_infeasible());
        assert_eq!(
            outcome.reason(),
            &TerminationReason::Aborted("cancelled".to_string())
        );
    }

    #[test]
    #[should_panic(expected = "no portfolio solvers added")]
    fn test_empty_portfolio_panics() {
        let model = clinic_model();
        let mut solver = SolverBuilder::<IntegerType>::new().build();
        let _ = solver.solve(&model);
    }
}
