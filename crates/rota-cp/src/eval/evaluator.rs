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

use crate::state::SearchState;
use num_traits::{PrimInt, Signed};
use rota_core::num::constants::Zero;
use rota_core::num::ops::saturating_arithmetic::SaturatingAddVal;
use rota_model::{index::VisitIndex, model::Model};

/// A strategy for scoring assignments and computing a global lower bound.
///
/// `ObjectiveEvaluator` decouples the engine from a particular objective.
/// The engine calls:
/// - `evaluate_visit_assignment` for the incremental cost of starting a
///   visit at a cell in the current state,
/// - `estimate_remaining_cost` for an optimistic prediction of the cost
///   still needed to complete the schedule.
///
/// # Requirements
///
/// The incremental costs **must be non-negative** and the remaining-cost
/// estimate **must never exceed** the true optimal completion cost. The
/// engine prunes any branch whose running objective reaches the incumbent
/// bound; a negative move cost or an over-estimate would let it discard
/// optimal schedules.
pub trait ObjectiveEvaluator<T>
where
    T: PrimInt + Signed + Zero,
{
    /// Returns the name of the objective evaluator.
    fn name(&self) -> &str;

    /// Evaluates the incremental cost of starting `visit` at `start_cell`
    /// in the current state.
    ///
    /// Returns `Some(cost)` if the assignment is admissible, `None` if it
    /// violates a hard constraint the evaluator can see.
    fn evaluate_visit_assignment(
        &mut self,
        model: &Model,
        state: &SearchState<T>,
        visit: VisitIndex,
        start_cell: usize,
    ) -> Option<T>;

    /// Computes an optimistic bound on the cost still required to place
    /// every remaining required visit.
    ///
    /// Returns `None` when the state provably cannot be completed at all;
    /// the engine treats that as an infeasibility proof for the subtree.
    fn estimate_remaining_cost(&mut self, model: &Model, state: &SearchState<T>) -> Option<T>;

    /// Computes the total lower bound `f(n) = g(n) + h(n)` for the
    /// current branch: cost already incurred plus the estimated remaining
    /// cost.
    fn lower_bound(&mut self, model: &Model, state: &SearchState<T>) -> Option<T>
    where
        T: SaturatingAddVal,
    {
        let remaining = self.estimate_remaining_cost(model, state)?;
        Some(state.current_objective().saturating_add_val(remaining))
    }
}

impl<T> std::fmt::Debug for dyn ObjectiveEvaluator<T>
where
    T: PrimInt + Signed + Zero,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectiveEvaluator({})", self.name())
    }
}
