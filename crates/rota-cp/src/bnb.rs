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

use crate::{
    branching::decision::{Decision, DecisionBuilder},
    eval::evaluator::ObjectiveEvaluator,
    pin::PinnedVisit,
    result::CpSolverOutcome,
    stack::SearchStack,
    state::SearchState,
    stats::CpSolverStatistics,
    trail::SearchTrail,
    tree_search_monitor::{PruneReason, TreeSearchMonitor},
};
use rota_model::{index::VisitIndex, model::Model, solution::Solution};
use rota_search::{
    incumbent::SharedIncumbent, monitor::search_monitor::SearchCommand, num::SolverNumeric,
    result::TerminationReason,
};

/// A constraint branch-and-bound solver for the clinic visit scheduling
/// problem, using depth-first backtracking search with incremental
/// occupancy propagation and objective bounding. This is only the
/// execution engine: construction and navigation of the search tree is
/// delegated to a `DecisionBuilder`, evaluation of objectives and bounds
/// to an `ObjectiveEvaluator`.
#[derive(Clone, Debug, Default)]
pub struct CpSolver<T> {
    trail: SearchTrail<T>,
    stack: SearchStack,
}

impl<T> CpSolver<T>
where
    T: SolverNumeric,
{
    /// Creates a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            trail: SearchTrail::new(),
            stack: SearchStack::new(),
        }
    }

    /// Creates a solver with storage preallocated for a problem size.
    ///
    /// The solver ensures sufficient capacity on every solve anyway; this
    /// only moves the allocation cost to construction time.
    #[inline]
    pub fn preallocated(num_visits: usize, horizon: usize) -> Self {
        Self {
            trail: SearchTrail::preallocated(num_visits),
            stack: SearchStack::preallocated(num_visits, horizon),
        }
    }

    /// Runs the search to completion with no warm start and no shared
    /// incumbent.
    #[inline]
    pub fn solve<B, E, S>(
        &mut self,
        model: &Model,
        builder: &mut B,
        evaluator: &mut E,
        monitor: S,
    ) -> CpSolverOutcome<T>
    where
        B: DecisionBuilder<T>,
        E: ObjectiveEvaluator<T>,
        S: TreeSearchMonitor<T>,
    {
        self.solve_with_context(model, builder, evaluator, monitor, None, None)
    }

    /// Runs the search with an optional warm-start solution (seeds the
    /// local incumbent) and an optional shared incumbent (portfolio runs).
    pub fn solve_with_context<B, E, S>(
        &mut self,
        model: &Model,
        builder: &mut B,
        evaluator: &mut E,
        mut monitor: S,
        warm_start: Option<&Solution<T>>,
        incumbent: Option<&SharedIncumbent<T>>,
    ) -> CpSolverOutcome<T>
    where
        B: DecisionBuilder<T>,
        E: ObjectiveEvaluator<T>,
        S: TreeSearchMonitor<T>,
    {
        let session = CpSearchSession::new(
            self,
            model,
            builder,
            evaluator,
            &mut monitor,
            warm_start,
            incumbent,
        );
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Resets the trail and stack state, keeping allocations.
    #[inline]
    fn reset(&mut self) {
        self.trail.reset();
        self.stack.reset();
    }
}

/// A child node generated from a decision.
#[derive(Clone, Copy, Debug)]
struct ChildNode<T> {
    new_objective: T,
    start_cell: usize,
    visit: VisitIndex,
}

/// The result of a single search step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchStep {
    /// The search should continue.
    Continue,
    /// The search tree is exhausted.
    Finished,
}

/// How initialization left the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InitOutcome {
    /// The root is set up; the main loop may run.
    Ready,
    /// The pins cannot coexist under the hard constraints.
    PinConflict,
    /// The root bound proves no completion exists.
    ProvenInfeasible,
}

/// One search run. Encapsulates the state and logic of a single
/// invocation of the solver.
struct CpSearchSession<'a, T, B, E, S> {
    solver: &'a mut CpSolver<T>,
    model: &'a Model,
    builder: &'a mut B,
    evaluator: &'a mut E,
    monitor: &'a mut S,
    warm_start: Option<&'a Solution<T>>,
    incumbent: Option<&'a SharedIncumbent<T>>,
    state: SearchState<T>,
    best_objective: T,
    best_solution: Option<Solution<T>>,
    /// Set once the shared incumbent tightened our bound below anything
    /// we found locally; exhaustion then proves nothing about our own
    /// best, only about the shared one.
    external_bound: bool,
    stats: CpSolverStatistics<T>,
    start_time: std::time::Instant,
}

impl<'a, T, B, E, S> CpSearchSession<'a, T, B, E, S>
where
    T: SolverNumeric,
    B: DecisionBuilder<T>,
    E: ObjectiveEvaluator<T>,
    S: TreeSearchMonitor<T>,
{
    #[inline]
    fn new(
        solver: &'a mut CpSolver<T>,
        model: &'a Model,
        builder: &'a mut B,
        evaluator: &'a mut E,
        monitor: &'a mut S,
        warm_start: Option<&'a Solution<T>>,
        incumbent: Option<&'a SharedIncumbent<T>>,
    ) -> Self {
        let state = SearchState::new(model);

        Self {
            solver,
            model,
            builder,
            evaluator,
            monitor,
            warm_start,
            incumbent,
            state,
            best_objective: T::max_value(),
            best_solution: None,
            external_bound: false,
            stats: CpSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Runs the search session to termination.
    fn run(mut self) -> CpSolverOutcome<T> {
        self.monitor.on_enter_search(self.model, &self.stats);

        let termination_reason = match self.initialize() {
            InitOutcome::PinConflict | InitOutcome::ProvenInfeasible => {
                TerminationReason::InfeasibilityProven
            }
            InitOutcome::Ready => loop {
                self.tighten_bound();
                self.monitor.on_step(&self.state, &self.stats);

                if let SearchCommand::Terminate(reason) =
                    self.monitor.search_command(&self.state, &self.stats)
                {
                    break TerminationReason::Aborted(reason);
                }

                match self.step() {
                    SearchStep::Continue => {}
                    SearchStep::Finished => break self.exhaustion_reason(),
                }
            },
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize_result(termination_reason)
    }

    /// Classifies a naturally exhausted search tree.
    ///
    /// Exhaustion proves: no schedule beats `best_objective`. That means
    /// optimality of our best solution if we hold one at that bound,
    /// infeasibility if the bound was never tightened at all, and only
    /// "some other worker holds the proof" if the shared incumbent
    /// tightened past us.
    fn exhaustion_reason(&self) -> TerminationReason {
        match &self.best_solution {
            Some(solution) if solution.objective_value() <= self.best_objective => {
                TerminationReason::OptimalityProven
            }
            Some(_) => TerminationReason::Aborted(
                "search space exhausted under shared incumbent bound".to_string(),
            ),
            None if self.external_bound => TerminationReason::Aborted(
                "search space exhausted under shared incumbent bound".to_string(),
            ),
            None => TerminationReason::InfeasibilityProven,
        }
    }

    /// Folds the shared incumbent's bound into the local one.
    #[inline]
    fn tighten_bound(&mut self) {
        if let Some(incumbent) = self.incumbent {
            let shared: T = <T as From<i64>>::from(incumbent.upper_bound());
            if shared < self.best_objective {
                self.best_objective = shared;
                self.external_bound = true;
            }
        }
    }

    /// Consumes the session into the final outcome.
    fn finalize_result(self, reason: TerminationReason) -> CpSolverOutcome<T> {
        match reason {
            TerminationReason::OptimalityProven => {
                let solution = self
                    .best_solution
                    .expect("expected an incumbent solution when termination is OptimalityProven");
                CpSolverOutcome::optimal(solution, self.stats)
            }
            TerminationReason::InfeasibilityProven => CpSolverOutcome::infeasible(self.stats),
            TerminationReason::Aborted(reason) => {
                CpSolverOutcome::aborted(self.best_solution, reason, self.stats)
            }
        }
    }

    /// Sets up the root: applies pins, seeds the warm start, computes the
    /// root bound, and enqueues the first decisions.
    fn initialize(&mut self) -> InitOutcome {
        self.solver.trail.ensure_capacity(self.model.num_visits());
        self.solver
            .stack
            .ensure_capacity(self.model.num_visits(), self.model.horizon());

        // Pins are applied beneath the root frame, in deterministic
        // order, and are never undone. The normalizer already rejected
        // ill-formed pin sets; what can still fail here is cross-patient
        // unit capacity, which is genuine model infeasibility.
        for pin in PinnedVisit::collect_sorted(self.model) {
            if !self.state.can_place(self.model, pin.visit, pin.start_cell) {
                return InitOutcome::PinConflict;
            }
            let Some(cost) = self.evaluator.evaluate_visit_assignment(
                self.model,
                &self.state,
                pin.visit,
                pin.start_cell,
            ) else {
                return InitOutcome::PinConflict;
            };
            let new_objective = self.state.current_objective().saturating_add_val(cost);
            self.state
                .apply(self.model, pin.visit, pin.start_cell, new_objective);
        }

        if let Some(seed) = self.warm_start {
            self.best_objective = seed.objective_value();
            self.best_solution = Some(seed.clone());
            if let Some(incumbent) = self.incumbent {
                incumbent.try_install(seed);
            }
        }

        // Root frame. Crucial to have this before pushing decisions!
        self.solver.trail.push_frame();
        self.solver.stack.push_frame();
        self.stats.on_node_explored();

        // All-pinned (or empty) instances are complete at the root.
        if self.state.is_complete() {
            let objective = self.state.current_objective();
            self.handle_complete_solution(objective);
            return InitOutcome::Ready;
        }

        match self.evaluator.lower_bound(self.model, &self.state) {
            None => {
                debug_assert!(
                    self.best_solution.is_none(),
                    "a warm start contradicts a root infeasibility proof"
                );
                return InitOutcome::ProvenInfeasible;
            }
            Some(bound) => {
                self.stats.set_root_lower_bound(bound);
                if self.best_solution.is_some() && bound >= self.best_objective {
                    // The warm start already meets the root bound; leave
                    // the root frame empty and let exhaustion prove it.
                    return InitOutcome::Ready;
                }
            }
        }

        let count_before = self.solver.stack.num_entries();
        let decisions = self.builder.next_decision(self.model, &self.state);
        self.solver.stack.extend(decisions);
        let count_after = self.solver.stack.num_entries();
        self.monitor
            .on_decisions_enqueued(&self.state, count_after - count_before, &self.stats);

        InitOutcome::Ready
    }

    /// Performs a single search step.
    #[inline]
    fn step(&mut self) -> SearchStep {
        if self.solver.stack.is_current_level_empty() {
            if self.solver.stack.depth() <= 1 {
                return SearchStep::Finished;
            }
            self.backtrack_step();
            return SearchStep::Continue;
        }

        self.process_next_decision();
        SearchStep::Continue
    }

    #[inline]
    fn backtrack_step(&mut self) {
        self.stats.on_backtrack();
        self.monitor.on_backtrack(&self.state, &self.stats);

        self.solver.trail.backtrack(&mut self.state, self.model);
        self.solver.stack.pop_frame();
    }

    /// Pops and processes the next decision from the current level.
    #[inline]
    fn process_next_decision(&mut self) {
        debug_assert!(
            !self.solver.stack.is_current_level_empty(),
            "called `CpSearchSession::process_next_decision` with empty decision stack"
        );

        let Some(decision) = self.solver.stack.pop() else {
            return;
        };
        self.stats.on_decision_generated();

        let Some(child) = self.build_child(&decision) else {
            // Pruned inside build_child (infeasible or bound-dominated).
            return;
        };
        self.descend(child, decision);
    }

    /// Builds a child node from the given decision, or prunes it.
    ///
    /// Decisions were feasibility-checked when generated, but siblings
    /// are re-checked here so a builder that over-generates cannot break
    /// the hard constraints.
    fn build_child(&mut self, decision: &Decision) -> Option<ChildNode<T>> {
        let (visit, start_cell) = (decision.visit(), decision.start_cell());

        if !self.state.can_place(self.model, visit, start_cell) {
            self.stats.on_pruning_infeasible();
            self.monitor
                .on_prune(&self.state, PruneReason::Infeasible, &self.stats);
            return None;
        }

        let move_cost =
            match self
                .evaluator
                .evaluate_visit_assignment(self.model, &self.state, visit, start_cell)
            {
                Some(cost) => cost,
                None => {
                    self.stats.on_pruning_infeasible();
                    self.monitor
                        .on_prune(&self.state, PruneReason::Infeasible, &self.stats);
                    return None;
                }
            };

        let new_objective = self.state.current_objective().saturating_add_val(move_cost);
        if new_objective >= self.best_objective {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
            return None;
        }

        Some(ChildNode {
            visit,
            start_cell,
            new_objective,
        })
    }

    /// Descends into the given child node, applying its assignment.
    fn descend(&mut self, child: ChildNode<T>, original_decision: Decision) {
        self.solver.trail.push_frame();
        self.solver.trail.apply_assignment(
            &mut self.state,
            self.model,
            child.visit,
            child.start_cell,
            child.new_objective,
        );
        self.solver.stack.push_frame();

        self.stats.on_node_explored();
        self.stats.on_depth_update(self.solver.stack.depth() as u64);
        self.monitor
            .on_descend(&self.state, original_decision, &self.stats);

        if self.state.is_complete() {
            self.handle_complete_solution(child.new_objective);
            return;
        }

        // Node-level bound check and child decision generation.
        if self.should_backtrack_after_expand() {
            self.backtrack_step();
        }
    }

    /// Handles a complete schedule at the current node.
    fn handle_complete_solution(&mut self, new_objective: T) {
        if new_objective < self.best_objective {
            match Solution::try_from(self.state.clone()) {
                Ok(solution) => {
                    self.best_objective = new_objective;
                    self.external_bound = false;
                    if let Some(incumbent) = self.incumbent {
                        incumbent.try_install(&solution);
                    }
                    self.stats.on_solution_found();
                    self.monitor.on_solution_found(&solution, &self.stats);
                    self.best_solution = Some(solution);
                }
                Err(err) => {
                    debug_assert!(false, "complete state failed to convert: {}", err);
                }
            }
        } else {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
        }
    }

    /// Determines whether to backtrack right after expanding a node, and
    /// otherwise enqueues the node's decisions.
    fn should_backtrack_after_expand(&mut self) -> bool {
        let remaining = match self.evaluator.estimate_remaining_cost(self.model, &self.state) {
            None => {
                self.stats.on_pruning_infeasible();
                self.monitor
                    .on_prune(&self.state, PruneReason::Infeasible, &self.stats);
                return true;
            }
            Some(remaining) => remaining,
        };

        let node_lower_bound = self.state.current_objective().saturating_add_val(remaining);
        if node_lower_bound >= self.best_objective {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
            return true;
        }

        let count_before = self.solver.stack.num_entries();
        let decisions = self.builder.next_decision(self.model, &self.state);
        self.solver.stack.extend(decisions);
        let count_after = self.solver.stack.num_entries();
        self.monitor
            .on_decisions_enqueued(&self.state, count_after - count_before, &self.stats);

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::input_order::InputOrderBuilder;
    use crate::branching::priority_rank::PriorityRankBuilder;
    use crate::eval::validation::validate_solution;
    use crate::eval::weighted::{CostWeights, WeightedCostEvaluator};
    use crate::tree_search_monitor::{NoOperationMonitor, SearchMonitorBridge};
    use rota_model::index::{PatientIndex, UnitIndex};
    use rota_model::model::ModelBuilder;
    use rota_search::monitor::time_limit::TimeLimitMonitor;
    use rota_search::result::SolverResult;

    type IntegerType = i64;

    fn pi(i: usize) -> PatientIndex {
        PatientIndex::new(i)
    }

    fn ui(i: usize) -> UnitIndex {
        UnitIndex::new(i)
    }

    fn solve(model: &Model) -> CpSolverOutcome<IntegerType> {
        let mut solver = CpSolver::new();
        let mut builder = InputOrderBuilder;
        let mut evaluator = WeightedCostEvaluator::new(CostWeights::default());
        solver.solve(model, &mut builder, &mut evaluator, NoOperationMonitor::new())
    }

    #[test]
    fn test_single_visit_smoke() {
        let model = ModelBuilder::new(1, 1, 12).build();
        let outcome = solve(&model);

        let SolverResult::Optimal(solution) = outcome.result() else {
            panic!("expected optimal, got {:?}", outcome.termination_reason());
        };
        assert_eq!(solution.start_cell(model.visit_index(pi(0), ui(0))), 0);
        // One cell of span plus one cell of makespan.
        assert_eq!(solution.objective_value(), 1000 + 10);
        assert_eq!(validate_solution(&model, solution), Ok(()));
    }

    #[test]
    fn test_two_visits_pack_contiguously() {
        let mut model_builder = ModelBuilder::new(2, 1, 12);
        model_builder.set_unit_duration_cells(ui(0), 2);
        model_builder.set_unit_duration_cells(ui(1), 1);
        let model = model_builder.build();
        let outcome = solve(&model);

        let SolverResult::Optimal(solution) = outcome.result() else {
            panic!("expected optimal");
        };
        // Three cells of span, three cells of makespan, no gaps.
        assert_eq!(solution.objective_value(), 3 * 1000 + 3 * 10);
        assert_eq!(validate_solution(&model, solution), Ok(()));

        let starts: Vec<usize> = (0..2)
            .map(|u| solution.start_cell(model.visit_index(pi(0), ui(u))))
            .collect();
        let mut spans: Vec<(usize, usize)> = starts
            .iter()
            .zip([2usize, 1])
            .map(|(&s, d)| (s, s + d))
            .collect();
        spans.sort();
        assert_eq!(spans[0].0, 0);
        assert_eq!(spans[0].1, spans[1].0); // back to back
        assert_eq!(spans[1].1, 3);
    }

    #[test]
    fn test_infeasible_when_day_is_too_short() {
        let mut model_builder = ModelBuilder::new(2, 1, 12);
        model_builder.set_patient_arrival_cell(pi(0), 11);
        let model = model_builder.build(); // two one-cell visits from cell 11
        let outcome = solve(&model);

        assert!(matches!(outcome.result(), SolverResult::Infeasible));
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::InfeasibilityProven
        );
    }

    #[test]
    fn test_pin_is_honored() {
        let mut model_builder = ModelBuilder::new(3, 1, 12);
        model_builder.pin_visit(pi(0), ui(2), 2);
        let model = model_builder.build();
        let outcome = solve(&model);

        let SolverResult::Optimal(solution) = outcome.result() else {
            panic!("expected optimal");
        };
        assert_eq!(solution.start_cell(model.visit_index(pi(0), ui(2))), 2);
        assert_eq!(validate_solution(&model, solution), Ok(()));
        // The free visits fill the two cells before the pin: no idle.
        assert_eq!(solution.objective_value(), 3 * 1000 + 3 * 10);
    }

    #[test]
    fn test_conflicting_pins_across_patients_are_infeasible() {
        // Two patients pinned to the same capacity-1 unit at the same
        // cell. The normalizer admits this (pins of different patients);
        // the model is infeasible.
        let mut model_builder = ModelBuilder::new(1, 2, 4);
        model_builder.pin_visit(pi(0), ui(0), 1);
        model_builder.pin_visit(pi(1), ui(0), 1);
        let model = model_builder.build();
        let outcome = solve(&model);

        assert!(matches!(outcome.result(), SolverResult::Infeasible));
    }

    #[test]
    fn test_capacity_two_shares_a_cell() {
        let mut model_builder = ModelBuilder::new(1, 3, 12);
        model_builder.set_unit_capacity(ui(0), 2);
        let model = model_builder.build();
        let outcome = solve(&model);

        let SolverResult::Optimal(solution) = outcome.result() else {
            panic!("expected optimal");
        };
        assert_eq!(validate_solution(&model, solution), Ok(()));

        let starts: Vec<usize> = (0..3)
            .map(|p| solution.start_cell(model.visit_index(pi(p), ui(0))))
            .collect();
        // Two patients share the first cell; the third follows.
        assert_eq!(starts.iter().filter(|&&s| s == 0).count(), 2);
        assert_eq!(starts.iter().filter(|&&s| s == 1).count(), 1);
    }

    #[test]
    fn test_all_pinned_instance_is_complete_at_root() {
        let mut model_builder = ModelBuilder::new(2, 1, 8);
        model_builder.pin_visit(pi(0), ui(0), 0);
        model_builder.pin_visit(pi(0), ui(1), 1);
        let model = model_builder.build();
        let outcome = solve(&model);

        let SolverResult::Optimal(solution) = outcome.result() else {
            panic!("expected optimal");
        };
        assert_eq!(solution.start_cell(model.visit_index(pi(0), ui(0))), 0);
        assert_eq!(solution.start_cell(model.visit_index(pi(0), ui(1))), 1);
    }

    #[test]
    fn test_empty_instance_is_trivially_optimal() {
        let model = ModelBuilder::new(0, 0, 4).build();
        let outcome = solve(&model);
        assert!(matches!(outcome.result(), SolverResult::Optimal(_)));
    }

    #[test]
    fn test_warm_start_is_returned_when_already_optimal() {
        let model = ModelBuilder::new(1, 1, 12).build();

        // Build the known optimum by hand.
        let warm = {
            let mut state = SearchState::<IntegerType>::new(&model);
            state.apply(&model, model.visit_index(pi(0), ui(0)), 0, 1010);
            Solution::try_from(state).unwrap()
        };

        let mut solver = CpSolver::new();
        let mut builder = InputOrderBuilder;
        let mut evaluator = WeightedCostEvaluator::new(CostWeights::default());
        let outcome = solver.solve_with_context(
            &model,
            &mut builder,
            &mut evaluator,
            NoOperationMonitor::new(),
            Some(&warm),
            None,
        );

        let SolverResult::Optimal(solution) = outcome.result() else {
            panic!("expected optimal");
        };
        assert_eq!(solution.objective_value(), 1010);
    }

    #[test]
    fn test_expired_time_limit_aborts_without_solution() {
        let mut model_builder = ModelBuilder::new(4, 3, 24);
        for u in 0..4 {
            model_builder.set_unit_duration_cells(ui(u), 2);
        }
        let model = model_builder.build();

        let mut time_monitor =
            TimeLimitMonitor::<IntegerType>::with_clock_check_mask(std::time::Duration::ZERO, 0);
        let mut solver = CpSolver::new();
        let mut builder = InputOrderBuilder;
        let mut evaluator = WeightedCostEvaluator::new(CostWeights::default());
        let outcome = solver.solve(
            &model,
            &mut builder,
            &mut evaluator,
            SearchMonitorBridge::new(&mut time_monitor),
        );

        assert!(matches!(outcome.result(), SolverResult::Unknown));
        assert!(matches!(
            outcome.termination_reason(),
            TerminationReason::Aborted(reason) if reason.contains("time limit")
        ));
    }

    #[test]
    fn test_identical_runs_yield_identical_solutions() {
        let mut model_builder = ModelBuilder::new(3, 2, 12);
        model_builder.set_unit_priority(ui(0), 1);
        model_builder.set_unit_priority(ui(1), 0);
        model_builder.set_unit_duration_cells(ui(2), 2);
        let model = model_builder.build();

        let first = solve(&model);
        let second = solve(&model);
        assert_eq!(first.result(), second.result());
    }

    #[test]
    fn test_both_builders_agree_on_the_optimum() {
        let mut model_builder = ModelBuilder::new(2, 2, 12);
        model_builder.set_unit_priority(ui(0), 0);
        model_builder.set_unit_priority(ui(1), 1);
        let model = model_builder.build();

        let input_order = solve(&model);

        let mut solver = CpSolver::new();
        let mut builder = PriorityRankBuilder;
        let mut evaluator = WeightedCostEvaluator::new(CostWeights::default());
        let by_priority = solver.solve(
            &model,
            &mut builder,
            &mut evaluator,
            NoOperationMonitor::new(),
        );

        assert_eq!(
            input_order.result().objective_value(),
            by_priority.result().objective_value()
        );
    }
}
