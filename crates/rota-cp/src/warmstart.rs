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

//! Greedy warm start.
//!
//! An earliest-fit pass that seeds the branch-and-bound with an initial
//! incumbent: pins first, then per patient (input order) each remaining
//! required visit in unit priority-rank order, each at its earliest
//! feasible start. The result is scored through the same evaluator the
//! search uses, so the seeded bound is exact.
//!
//! This is an accelerator only. The returned schedule of a solve always
//! comes from the exact search, which either proves the greedy schedule
//! optimal or finds a better one.

use crate::{eval::evaluator::ObjectiveEvaluator, pin::PinnedVisit, state::SearchState};
use rota_model::{
    index::{PatientIndex, UnitIndex},
    model::Model,
    solution::Solution,
};
use rota_search::num::SolverNumeric;
use smallvec::SmallVec;

/// Builds a greedy earliest-fit schedule, or `None` if the greedy order
/// gets stuck (which proves nothing about the instance).
pub fn greedy_schedule<T, E>(model: &Model, evaluator: &mut E) -> Option<Solution<T>>
where
    T: SolverNumeric,
    E: ObjectiveEvaluator<T>,
{
    let mut state = SearchState::<T>::new(model);

    for pin in PinnedVisit::collect_sorted(model) {
        if !state.can_place(model, pin.visit, pin.start_cell) {
            return None;
        }
        let cost = evaluator.evaluate_visit_assignment(model, &state, pin.visit, pin.start_cell)?;
        let objective = state.current_objective().saturating_add_val(cost);
        state.apply(model, pin.visit, pin.start_cell, objective);
    }

    // Units in priority-rank order, mirroring how the original greedy
    // pass handed out high-priority work first.
    let mut unit_order: SmallVec<[usize; 8]> = (0..model.num_units()).collect();
    unit_order.sort_by_key(|&u| model.unit_priority_rank(UnitIndex::new(u)));

    for p in 0..model.num_patients() {
        let patient = PatientIndex::new(p);
        let arrival = model.patient_arrival_cell(patient);

        for &u in &unit_order {
            let visit = model.visit_index(patient, UnitIndex::new(u));
            if !model.visit_is_required(visit) || state.is_placed(visit) {
                continue;
            }

            let latest = model.latest_start(visit)?;
            let start = (arrival..=latest).find(|&c| state.can_place(model, visit, c))?;
            let cost = evaluator.evaluate_visit_assignment(model, &state, visit, start)?;
            let objective = state.current_objective().saturating_add_val(cost);
            state.apply(model, visit, start, objective);
        }
    }

    Solution::try_from(state).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::validation::validate_solution;
    use crate::eval::weighted::{CostWeights, WeightedCostEvaluator};
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
    fn test_greedy_fills_from_the_arrival_cell() {
        let mut builder = ModelBuilder::new(2, 1, 8);
        builder.set_unit_duration_cells(ui(0), 2);
        let model = builder.build();

        let solution = greedy_schedule(&model, &mut evaluator()).unwrap();
        assert_eq!(validate_solution(&model, &solution), Ok(()));
        // Contiguous from cell 0: span 3, makespan 3.
        assert_eq!(solution.objective_value(), 3 * 1000 + 3 * 10);
    }

    #[test]
    fn test_greedy_hands_out_priority_order() {
        let mut builder = ModelBuilder::new(2, 1, 8);
        builder.set_unit_priority(ui(0), 5);
        builder.set_unit_priority(ui(1), 0);
        let model = builder.build();

        let solution = greedy_schedule(&model, &mut evaluator()).unwrap();
        // The high-priority unit gets the earlier slot.
        assert_eq!(solution.start_cell(model.visit_index(pi(0), ui(1))), 0);
        assert_eq!(solution.start_cell(model.visit_index(pi(0), ui(0))), 1);
    }

    #[test]
    fn test_greedy_respects_pins() {
        let mut builder = ModelBuilder::new(2, 1, 8);
        builder.pin_visit(pi(0), ui(0), 3);
        let model = builder.build();

        let solution = greedy_schedule(&model, &mut evaluator()).unwrap();
        assert_eq!(solution.start_cell(model.visit_index(pi(0), ui(0))), 3);
        assert_eq!(validate_solution(&model, &solution), Ok(()));
    }

    #[test]
    fn test_greedy_fails_on_an_overfull_day() {
        let mut builder = ModelBuilder::new(2, 1, 2);
        builder.set_unit_duration_cells(ui(0), 2);
        builder.set_unit_duration_cells(ui(1), 2);
        let model = builder.build();

        assert!(greedy_schedule(&model, &mut evaluator()).is_none());
    }
}
