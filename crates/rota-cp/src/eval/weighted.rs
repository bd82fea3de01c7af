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

//! The weighted clinic objective.
//!
//! The reported objective is
//! `W1·Σ idle + W2·makespan + W3·Σ priority_violations + W4·Σ arrival_order_violations`.
//! Internally the evaluator scores the equivalent span form: per-patient
//! idle is `span − busy`, and since every required visit is placed in any
//! feasible schedule, `Σ busy` is a per-instance constant. Scoring span
//! growth instead of idle keeps every move cost non-negative, which the
//! engine's bound pruning requires; the facade subtracts `W1·Σ busy` once
//! when reporting.
//!
//! Each term accrues at the moment it becomes decided:
//! - span/makespan growth when a visit extends the patient's day or the
//!   global day,
//! - a priority violation when the second visit of an ordered unit pair
//!   is placed,
//! - an arrival-order penalty when both neighbors of an arrival-group
//!   pair have received their at-arrival unit.

use crate::{eval::evaluator::ObjectiveEvaluator, state::SearchState};
use rota_model::{
    index::{PatientIndex, UnitIndex, VisitIndex},
    model::Model,
};
use rota_search::num::SolverNumeric;

/// The four objective weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostWeights<T> {
    pub idle: T,
    pub makespan: T,
    pub priority: T,
    pub arrival_priority: T,
}

impl<T> Default for CostWeights<T>
where
    T: From<i64>,
{
    /// The default weights (1000, 10, 100, 50): idle time dominates,
    /// makespan breaks idle ties, priority enters when the schedule is
    /// otherwise indifferent.
    fn default() -> Self {
        Self {
            idle: T::from(1000),
            makespan: T::from(10),
            priority: T::from(100),
            arrival_priority: T::from(50),
        }
    }
}

/// The shipped objective evaluator.
#[derive(Debug, Clone, Copy)]
pub struct WeightedCostEvaluator<T> {
    weights: CostWeights<T>,
}

impl<T> WeightedCostEvaluator<T>
where
    T: SolverNumeric,
{
    /// Creates an evaluator with the given weights.
    #[inline]
    pub fn new(weights: CostWeights<T>) -> Self {
        Self { weights }
    }

    /// Returns the configured weights.
    #[inline]
    pub fn weights(&self) -> &CostWeights<T> {
        &self.weights
    }

    #[inline]
    fn cells(n: usize) -> T {
        <T as From<i64>>::from(n as i64)
    }
}

impl<T> ObjectiveEvaluator<T> for WeightedCostEvaluator<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "WeightedCostEvaluator"
    }

    fn evaluate_visit_assignment(
        &mut self,
        model: &Model,
        state: &SearchState<T>,
        visit: VisitIndex,
        start_cell: usize,
    ) -> Option<T> {
        let patient = model.visit_patient(visit);
        let unit = model.visit_unit(visit);
        let duration = model.unit_duration_cells(unit);
        let end = start_cell + duration;
        let arrival = model.patient_arrival_cell(patient);

        if start_cell < arrival || end > model.horizon() {
            return None;
        }

        let mut cost = T::ZERO;

        // Span growth: the patient's day gets longer.
        let last_end = state.last_end(patient);
        if end > last_end {
            cost = cost.saturating_add_val(
                self.weights
                    .idle
                    .saturating_mul_val(Self::cells(end - last_end)),
            );
        }

        // Makespan growth: the whole day gets longer.
        if end > state.makespan() {
            cost = cost.saturating_add_val(
                self.weights
                    .makespan
                    .saturating_mul_val(Self::cells(end - state.makespan())),
            );
        }

        // Priority violations decided by this assignment: for every placed
        // visit of the same patient, the pair's order is now fixed.
        let priority = model.unit_priority(unit);
        for other in 0..model.num_units() {
            if other == unit.get() {
                continue;
            }
            let other_unit = UnitIndex::new(other);
            let other_visit = model.visit_index(patient, other_unit);
            if !state.is_placed(other_visit) {
                continue;
            }

            let other_priority = model.unit_priority(other_unit);
            let other_start = state.start_cell(other_visit);
            let violated = if priority < other_priority {
                // This unit should come first but starts later.
                start_cell > other_start
            } else if other_priority < priority {
                // The placed unit should come first but starts later.
                other_start > start_cell
            } else {
                false
            };
            if violated {
                cost = cost.saturating_add_val(self.weights.priority);
            }
        }

        // Arrival-order penalties: if this visit starts exactly at the
        // patient's arrival, the patient's at-arrival rank becomes known
        // and any adjacent arrival-group pair with both ranks known is
        // decided. A pair pays when the earlier patient (input order)
        // received a worse-ranked unit than the later one.
        if start_cell == arrival {
            let rank = model.unit_priority_rank(unit) as i64;
            if let Some(prev) = model.arrival_group_prev(patient) {
                if let Some(prev_rank) = state.arrival_rank(prev).get() {
                    if prev_rank > rank {
                        cost = cost.saturating_add_val(self.weights.arrival_priority);
                    }
                }
            }
            if let Some(next) = model.arrival_group_next(patient) {
                if let Some(next_rank) = state.arrival_rank(next).get() {
                    if rank > next_rank {
                        cost = cost.saturating_add_val(self.weights.arrival_priority);
                    }
                }
            }
        }

        Some(cost)
    }

    fn estimate_remaining_cost(&mut self, model: &Model, state: &SearchState<T>) -> Option<T> {
        let mut bound = T::ZERO;
        let mut latest_unfinished_end = 0usize;

        for p in 0..model.num_patients() {
            let patient = PatientIndex::new(p);
            let busy_total = model.patient_busy_total(patient);
            if busy_total == 0 {
                continue;
            }
            let arrival = model.patient_arrival_cell(patient);

            // The patient's required visits are pairwise disjoint and all
            // start at or after arrival, so they cannot complete before
            // arrival + busy_total. Past the horizon means no completion
            // exists at all.
            if arrival + busy_total > model.horizon() {
                return None;
            }

            let span_so_far = state.last_end(patient) - arrival;
            if busy_total > span_so_far {
                bound = bound.saturating_add_val(
                    self.weights
                        .idle
                        .saturating_mul_val(Self::cells(busy_total - span_so_far)),
                );
            }

            // Patients with unplaced visits still push the makespan to at
            // least their earliest possible completion.
            if state.placed_busy(patient) < busy_total {
                latest_unfinished_end = latest_unfinished_end.max(arrival + busy_total);
            }
        }

        if latest_unfinished_end > state.makespan() {
            bound = bound.saturating_add_val(
                self.weights
                    .makespan
                    .saturating_mul_val(Self::cells(latest_unfinished_end - state.makespan())),
            );
        }

        Some(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_model::index::{PatientIndex, UnitIndex};
    use rota_model::model::ModelBuilder;

    type IntegerType = i64;

    fn pi(i: usize) -> PatientIndex {
        PatientIndex::new(i)
    }

    fn ui(i: usize) -> UnitIndex {
        UnitIndex::new(i)
    }

    fn evaluator() -> WeightedCostEvaluator<IntegerType> {
        WeightedCostEvaluator::new(CostWeights::default())
    }

    #[test]
    fn test_first_visit_costs_span_and_makespan_growth() {
        let model = ModelBuilder::new(1, 1, 8).build(); // one unit, duration 1
        let state = SearchState::<IntegerType>::new(&model);
        let visit = model.visit_index(pi(0), ui(0));

        let cost = evaluator()
            .evaluate_visit_assignment(&model, &state, visit, 0)
            .unwrap();
        // Span grows by one cell, makespan grows by one cell.
        assert_eq!(cost, 1000 + 10);
    }

    #[test]
    fn test_gap_costs_the_whole_span_growth() {
        let model = ModelBuilder::new(1, 1, 8).build();
        let state = SearchState::<IntegerType>::new(&model);
        let visit = model.visit_index(pi(0), ui(0));

        // Starting two cells late leaves a two-cell gap: span grows by 3.
        let cost = evaluator()
            .evaluate_visit_assignment(&model, &state, visit, 2)
            .unwrap();
        assert_eq!(cost, 3 * 1000 + 3 * 10);
    }

    #[test]
    fn test_filling_a_gap_costs_nothing_extra() {
        let mut builder = ModelBuilder::new(2, 1, 8);
        builder.set_unit_duration_cells(ui(1), 1);
        let model = builder.build();
        let mut state = SearchState::<IntegerType>::new(&model);

        // First visit at cell 2 leaves the gap 0..2.
        state.apply(&model, model.visit_index(pi(0), ui(0)), 2, 0);

        // Placing the second visit inside the gap grows neither span nor
        // makespan and violates no priority order (equal priorities).
        let cost = evaluator()
            .evaluate_visit_assignment(&model, &state, model.visit_index(pi(0), ui(1)), 0)
            .unwrap();
        assert_eq!(cost, 0);
    }

    #[test]
    fn test_horizon_violation_is_inadmissible() {
        let mut builder = ModelBuilder::new(1, 1, 4);
        builder.set_unit_duration_cells(ui(0), 2);
        let model = builder.build();
        let state = SearchState::<IntegerType>::new(&model);
        let visit = model.visit_index(pi(0), ui(0));

        assert!(evaluator()
            .evaluate_visit_assignment(&model, &state, visit, 3)
            .is_none());
    }

    #[test]
    fn test_priority_violation_accrues_when_pair_is_decided() {
        let mut builder = ModelBuilder::new(2, 1, 8);
        builder.set_unit_priority(ui(0), 0);
        builder.set_unit_priority(ui(1), 1);
        let model = builder.build();
        let mut state = SearchState::<IntegerType>::new(&model);

        // The low-priority unit takes the arrival cell first.
        state.apply(&model, model.visit_index(pi(0), ui(1)), 0, 0);

        // Now the high-priority unit can only start later: violation.
        let cost = evaluator()
            .evaluate_visit_assignment(&model, &state, model.visit_index(pi(0), ui(0)), 1)
            .unwrap();
        // One cell of span growth, one of makespan, one violation.
        assert_eq!(cost, 1000 + 10 + 100);
    }

    #[test]
    fn test_equal_priorities_never_violate() {
        let model = ModelBuilder::new(2, 1, 8).build();
        let mut state = SearchState::<IntegerType>::new(&model);
        state.apply(&model, model.visit_index(pi(0), ui(1)), 0, 0);

        let cost = evaluator()
            .evaluate_visit_assignment(&model, &state, model.visit_index(pi(0), ui(0)), 1)
            .unwrap();
        assert_eq!(cost, 1000 + 10);
    }

    #[test]
    fn test_arrival_order_penalty() {
        let mut builder = ModelBuilder::new(2, 2, 8);
        builder.set_unit_priority(ui(0), 0);
        builder.set_unit_priority(ui(1), 1);
        let model = builder.build();
        let mut state = SearchState::<IntegerType>::new(&model);

        // Patient 0 (earlier input order) receives the worse-ranked unit
        // at arrival.
        state.apply(&model, model.visit_index(pi(0), ui(1)), 0, 0);

        // Patient 1 receiving the better-ranked unit at arrival decides
        // the (patient 0, patient 1) pair against input order.
        let cost = evaluator()
            .evaluate_visit_assignment(&model, &state, model.visit_index(pi(1), ui(0)), 0)
            .unwrap();
        // Patient 1's span grows by one cell; makespan is already 1.
        assert_eq!(cost, 1000 + 50);
    }

    #[test]
    fn test_arrival_order_in_input_order_costs_nothing() {
        let mut builder = ModelBuilder::new(2, 2, 8);
        builder.set_unit_priority(ui(0), 0);
        builder.set_unit_priority(ui(1), 1);
        let model = builder.build();
        let mut state = SearchState::<IntegerType>::new(&model);

        state.apply(&model, model.visit_index(pi(0), ui(0)), 0, 0);

        let cost = evaluator()
            .evaluate_visit_assignment(&model, &state, model.visit_index(pi(1), ui(1)), 0)
            .unwrap();
        assert_eq!(cost, 1000);
    }

    #[test]
    fn test_remaining_cost_bounds_span_and_makespan() {
        let model = ModelBuilder::new(2, 1, 8).build(); // two one-cell units
        let state = SearchState::<IntegerType>::new(&model);

        // Two cells of busy time remain: at least 2 cells of span and a
        // makespan of at least 2.
        let bound = evaluator()
            .estimate_remaining_cost(&model, &state)
            .unwrap();
        assert_eq!(bound, 2 * 1000 + 2 * 10);
    }

    #[test]
    fn test_remaining_cost_detects_horizon_infeasibility() {
        let mut builder = ModelBuilder::new(2, 1, 2);
        builder.set_patient_arrival_cell(pi(0), 1);
        let model = builder.build(); // two one-cell units from cell 1: needs 3 cells
        let state = SearchState::<IntegerType>::new(&model);

        assert!(evaluator().estimate_remaining_cost(&model, &state).is_none());
    }

    #[test]
    fn test_remaining_cost_is_zero_when_complete() {
        let model = ModelBuilder::new(1, 1, 4).build();
        let mut state = SearchState::<IntegerType>::new(&model);
        state.apply(&model, model.visit_index(pi(0), ui(0)), 0, 1010);

        let bound = evaluator()
            .estimate_remaining_cost(&model, &state)
            .unwrap();
        assert_eq!(bound, 0);
    }
}
