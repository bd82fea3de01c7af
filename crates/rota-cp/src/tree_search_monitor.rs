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

//! Engine-level search observation.
//!
//! `TreeSearchMonitor` exposes the branch-and-bound lifecycle at node
//! granularity (descents, backtracks, prunes, bounds). A
//! `SearchMonitorBridge` adapts the coarser `rota-search` monitors
//! (time limits, interrupts, solution budgets) onto this interface, and
//! `TraceMonitor` feeds the events to the `log` facade.

use crate::{branching::decision::Decision, state::SearchState, stats::CpSolverStatistics};
use num_traits::{PrimInt, Signed};
use rota_core::num::constants::Zero;
use rota_model::{model::Model, solution::Solution};
use rota_search::monitor::search_monitor::{SearchCommand, SearchMonitor};

/// Reasons for pruning a search node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The subtree violates a hard constraint.
    Infeasible,
    /// The subtree is dominated by the current bound.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// Node-granular hooks for observing and controlling the engine.
pub trait TreeSearchMonitor<T>
where
    T: PrimInt + Signed,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, model: &Model, statistics: &CpSolverStatistics<T>);
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &CpSolverStatistics<T>);
    /// Called to determine the next action of the search.
    fn search_command(
        &mut self,
        _state: &SearchState<T>,
        _statistics: &CpSolverStatistics<T>,
    ) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called at each step of the search loop.
    fn on_step(&mut self, state: &SearchState<T>, statistics: &CpSolverStatistics<T>);
    /// Called when a node is pruned.
    fn on_prune(
        &mut self,
        state: &SearchState<T>,
        reason: PruneReason,
        statistics: &CpSolverStatistics<T>,
    );
    /// Called when decisions are enqueued for exploration.
    fn on_decisions_enqueued(
        &mut self,
        state: &SearchState<T>,
        count: usize,
        statistics: &CpSolverStatistics<T>,
    );
    /// Called when descending into a child node.
    fn on_descend(
        &mut self,
        state: &SearchState<T>,
        decision: Decision,
        statistics: &CpSolverStatistics<T>,
    );
    /// Called when backtracking to a parent node.
    fn on_backtrack(&mut self, state: &SearchState<T>, statistics: &CpSolverStatistics<T>);
    /// Called when a new improving solution is found.
    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &CpSolverStatistics<T>);
}

/// A monitor that does nothing and never terminates the search.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct NoOperationMonitor<T>
where
    T: PrimInt + Signed,
{
    _phantom: std::marker::PhantomData<T>,
}

impl<T> NoOperationMonitor<T>
where
    T: PrimInt + Signed,
{
    /// Creates a new `NoOperationMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> TreeSearchMonitor<T> for NoOperationMonitor<T>
where
    T: PrimInt + Signed,
{
    #[inline(always)]
    fn name(&self) -> &str {
        "NoOperationMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, _model: &Model, _statistics: &CpSolverStatistics<T>) {}

    #[inline(always)]
    fn on_exit_search(&mut self, _statistics: &CpSolverStatistics<T>) {}

    #[inline(always)]
    fn on_step(&mut self, _state: &SearchState<T>, _statistics: &CpSolverStatistics<T>) {}

    #[inline(always)]
    fn on_prune(
        &mut self,
        _state: &SearchState<T>,
        _reason: PruneReason,
        _statistics: &CpSolverStatistics<T>,
    ) {
    }

    #[inline(always)]
    fn on_decisions_enqueued(
        &mut self,
        _state: &SearchState<T>,
        _count: usize,
        _statistics: &CpSolverStatistics<T>,
    ) {
    }

    #[inline(always)]
    fn on_descend(
        &mut self,
        _state: &SearchState<T>,
        _decision: Decision,
        _statistics: &CpSolverStatistics<T>,
    ) {
    }

    #[inline(always)]
    fn on_backtrack(&mut self, _state: &SearchState<T>, _statistics: &CpSolverStatistics<T>) {}

    #[inline(always)]
    fn on_solution_found(
        &mut self,
        _solution: &Solution<T>,
        _statistics: &CpSolverStatistics<T>,
    ) {
    }
}

/// Adapts a `rota-search` `SearchMonitor` onto the engine interface.
///
/// Lifecycle events are forwarded; node-granular events only tick the
/// inner monitor's step counter. This is how time limits, interrupts,
/// and solution budgets reach the engine.
pub struct SearchMonitorBridge<'a, T>
where
    T: PrimInt + Signed,
{
    inner: &'a mut dyn SearchMonitor<T>,
}

impl<'a, T> SearchMonitorBridge<'a, T>
where
    T: PrimInt + Signed,
{
    #[inline]
    pub fn new(inner: &'a mut dyn SearchMonitor<T>) -> Self {
        Self { inner }
    }
}

impl<'a, T> TreeSearchMonitor<T> for SearchMonitorBridge<'a, T>
where
    T: PrimInt + Signed,
{
    fn name(&self) -> &str {
        "SearchMonitorBridge"
    }

    fn on_enter_search(&mut self, model: &Model, _statistics: &CpSolverStatistics<T>) {
        self.inner.on_enter_search(model);
    }

    fn on_exit_search(&mut self, _statistics: &CpSolverStatistics<T>) {
        self.inner.on_exit_search();
    }

    fn search_command(
        &mut self,
        _state: &SearchState<T>,
        _statistics: &CpSolverStatistics<T>,
    ) -> SearchCommand {
        self.inner.search_command()
    }

    #[inline(always)]
    fn on_step(&mut self, _state: &SearchState<T>, _statistics: &CpSolverStatistics<T>) {
        self.inner.on_step();
    }

    fn on_prune(
        &mut self,
        _state: &SearchState<T>,
        _reason: PruneReason,
        _statistics: &CpSolverStatistics<T>,
    ) {
    }

    fn on_decisions_enqueued(
        &mut self,
        _state: &SearchState<T>,
        _count: usize,
        _statistics: &CpSolverStatistics<T>,
    ) {
    }

    fn on_descend(
        &mut self,
        _state: &SearchState<T>,
        _decision: Decision,
        _statistics: &CpSolverStatistics<T>,
    ) {
    }

    fn on_backtrack(&mut self, _state: &SearchState<T>, _statistics: &CpSolverStatistics<T>) {}

    fn on_solution_found(&mut self, solution: &Solution<T>, _statistics: &CpSolverStatistics<T>) {
        self.inner.on_solution_found(solution);
    }
}

/// A monitor that narrates the search through the `log` facade.
///
/// Descents and prunes log at `trace`, improving solutions at `debug`;
/// intended for debugging small instances, not production solves.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceMonitor<T>
where
    T: PrimInt + Signed,
{
    _phantom: std::marker::PhantomData<T>,
}

impl<T> TraceMonitor<T>
where
    T: PrimInt + Signed,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T> TreeSearchMonitor<T> for TraceMonitor<T>
where
    T: PrimInt + Signed + Zero + std::fmt::Display,
{
    fn name(&self) -> &str {
        "TraceMonitor"
    }

    fn on_enter_search(&mut self, model: &Model, _statistics: &CpSolverStatistics<T>) {
        log::debug!(
            "search started: {} patients, {} units, horizon {}",
            model.num_patients(),
            model.num_units(),
            model.horizon()
        );
    }

    fn on_exit_search(&mut self, statistics: &CpSolverStatistics<T>) {
        log::debug!(
            "search finished: {} nodes, {} backtracks, {} solutions",
            statistics.nodes_explored,
            statistics.backtracks,
            statistics.solutions_found
        );
    }

    fn on_step(&mut self, _state: &SearchState<T>, _statistics: &CpSolverStatistics<T>) {}

    fn on_prune(
        &mut self,
        state: &SearchState<T>,
        reason: PruneReason,
        _statistics: &CpSolverStatistics<T>,
    ) {
        log::trace!("prune ({}) at {} placed visits", reason, state.num_placed());
    }

    fn on_decisions_enqueued(
        &mut self,
        _state: &SearchState<T>,
        count: usize,
        _statistics: &CpSolverStatistics<T>,
    ) {
        log::trace!("enqueued {} decisions", count);
    }

    fn on_descend(
        &mut self,
        _state: &SearchState<T>,
        decision: Decision,
        _statistics: &CpSolverStatistics<T>,
    ) {
        log::trace!("descend {}", decision);
    }

    fn on_backtrack(&mut self, state: &SearchState<T>, _statistics: &CpSolverStatistics<T>) {
        log::trace!("backtrack to {} placed visits", state.num_placed());
    }

    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &CpSolverStatistics<T>) {
        log::debug!(
            "improving solution #{} with objective {}",
            statistics.solutions_found,
            solution.objective_value()
        );
    }
}
