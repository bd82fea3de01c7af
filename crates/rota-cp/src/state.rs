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

//! Search state management for the branch-and-bound engine.
//!
//! `SearchState` is the compact, mutable container tracking the partial
//! schedule during search:
//! - per-visit start cells and a placed bitset,
//! - per-patient busy bitsets over the horizon (the no-overlap resource),
//! - per-unit per-cell load counts (the cumulative capacity resource),
//! - per-patient running last-end and placed-duration totals,
//! - the running makespan, per-patient arrival ranks, and the running
//!   internal objective.
//!
//! Mutations go through `apply` and `undo`, which the trail drives; the
//! rest of the engine reads through the checked accessors. Debug
//! assertions document the invariants without costing release builds.

use fixedbitset::FixedBitSet;
use num_traits::{PrimInt, Signed};
use rota_core::num::constants::Zero;
use rota_model::{
    index::{PatientIndex, UnitIndex, VisitIndex},
    model::Model,
    solution::Solution,
    time::StartCell,
};

/// The incremental search state for one branch-and-bound run.
#[derive(Debug, Clone)]
pub struct SearchState<T> {
    // Per-visit data.
    start_cells: Vec<usize>,
    placed: FixedBitSet,

    // Per-patient data.
    patient_busy: Vec<FixedBitSet>,
    last_ends: Vec<usize>,
    placed_busy: Vec<usize>,
    arrival_ranks: Vec<StartCell<i64>>,

    // Per-(unit, cell) load counts, flattened unit-major.
    unit_loads: Vec<u8>,

    // Scalars.
    current_objective: T,
    makespan: usize,
    num_placed: usize,
    num_required: usize,
    horizon: usize,
    num_units: usize,
}

impl<T> SearchState<T>
where
    T: PrimInt + Signed + Zero,
{
    /// Creates the empty state for a model: nothing placed, every patient
    /// idle at their arrival cell, objective zero.
    pub fn new(model: &Model) -> Self {
        let num_visits = model.num_visits();
        let num_patients = model.num_patients();
        let horizon = model.horizon();

        let last_ends = (0..num_patients)
            .map(|p| model.patient_arrival_cell(PatientIndex::new(p)))
            .collect();

        Self {
            start_cells: vec![0; num_visits],
            placed: FixedBitSet::with_capacity(num_visits),
            patient_busy: vec![FixedBitSet::with_capacity(horizon); num_patients],
            last_ends,
            placed_busy: vec![0; num_patients],
            arrival_ranks: vec![StartCell::none(); num_patients],
            unit_loads: vec![0; model.num_units() * horizon],
            current_objective: T::ZERO,
            makespan: 0,
            num_placed: 0,
            num_required: model.num_required_visits(),
            horizon,
            num_units: model.num_units(),
        }
    }

    /// Returns the number of visits tracked by this state.
    #[inline]
    pub fn num_visits(&self) -> usize {
        self.start_cells.len()
    }

    /// Returns the number of placed visits.
    #[inline]
    pub fn num_placed(&self) -> usize {
        self.num_placed
    }

    /// Returns `true` once every required visit is placed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.num_placed == self.num_required
    }

    /// Returns the running internal objective.
    #[inline]
    pub fn current_objective(&self) -> T
    where
        T: Copy,
    {
        self.current_objective
    }

    /// Returns the running makespan (latest end over placed visits).
    #[inline]
    pub fn makespan(&self) -> usize {
        self.makespan
    }

    /// Returns `true` if the specified visit is placed.
    #[inline]
    pub fn is_placed(&self, visit: VisitIndex) -> bool {
        debug_assert!(
            visit.get() < self.num_visits(),
            "called `SearchState::is_placed` with visit index out of bounds: the len is {} but the index is {}",
            self.num_visits(),
            visit.get()
        );

        self.placed.contains(visit.get())
    }

    /// Returns the start cell of a placed visit.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the visit is out of bounds or unplaced.
    #[inline]
    pub fn start_cell(&self, visit: VisitIndex) -> usize {
        debug_assert!(
            self.placed.contains(visit.get()),
            "called `SearchState::start_cell` for a visit that is not placed: the index is {}",
            visit.get()
        );

        self.start_cells[visit.get()]
    }

    /// Returns the running last visit end for a patient (their arrival
    /// cell while nothing is placed).
    #[inline]
    pub fn last_end(&self, patient: PatientIndex) -> usize {
        debug_assert!(
            patient.get() < self.last_ends.len(),
            "called `SearchState::last_end` with patient index out of bounds: the len is {} but the index is {}",
            self.last_ends.len(),
            patient.get()
        );

        self.last_ends[patient.get()]
    }

    /// Returns the summed duration of the patient's placed visits.
    #[inline]
    pub fn placed_busy(&self, patient: PatientIndex) -> usize {
        debug_assert!(
            patient.get() < self.placed_busy.len(),
            "called `SearchState::placed_busy` with patient index out of bounds: the len is {} but the index is {}",
            self.placed_busy.len(),
            patient.get()
        );

        self.placed_busy[patient.get()]
    }

    /// Returns the priority rank of the unit whose visit starts exactly at
    /// the patient's arrival cell, sentinel-absent if there is none yet.
    #[inline]
    pub fn arrival_rank(&self, patient: PatientIndex) -> StartCell<i64> {
        debug_assert!(
            patient.get() < self.arrival_ranks.len(),
            "called `SearchState::arrival_rank` with patient index out of bounds: the len is {} but the index is {}",
            self.arrival_ranks.len(),
            patient.get()
        );

        self.arrival_ranks[patient.get()]
    }

    /// Returns the load of a unit at a cell.
    #[inline]
    pub fn unit_load(&self, unit: UnitIndex, cell: usize) -> usize {
        debug_assert!(
            unit.get() < self.num_units && cell < self.horizon,
            "called `SearchState::unit_load` out of bounds: unit {} of {}, cell {} of {}",
            unit.get(),
            self.num_units,
            cell,
            self.horizon
        );

        self.unit_loads[unit.get() * self.horizon + cell] as usize
    }

    /// Checks whether a visit can be placed at a start cell in the
    /// current state: inside the release/horizon window, patient free,
    /// unit below capacity over the whole span.
    pub fn can_place(&self, model: &Model, visit: VisitIndex, start_cell: usize) -> bool {
        let patient = model.visit_patient(visit);
        let unit = model.visit_unit(visit);
        let duration = model.unit_duration_cells(unit);
        let end = start_cell + duration;

        if self.placed.contains(visit.get()) {
            return false;
        }
        if start_cell < model.patient_arrival_cell(patient) || end > self.horizon {
            return false;
        }

        let busy = &self.patient_busy[patient.get()];
        let capacity = model.unit_capacity(unit);
        let load_base = unit.get() * self.horizon;
        for cell in start_cell..end {
            if busy.contains(cell) {
                return false;
            }
            if self.unit_loads[load_base + cell] as usize >= capacity {
                return false;
            }
        }

        true
    }

    /// Applies an assignment: occupies the span, advances the patient's
    /// last end, the makespan, the arrival rank, and the objective.
    ///
    /// The caller (the trail) is responsible for recording the prior
    /// values needed to undo this.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the placement is not feasible in the
    /// current state.
    pub fn apply(&mut self, model: &Model, visit: VisitIndex, start_cell: usize, new_objective: T) {
        debug_assert!(
            self.can_place(model, visit, start_cell),
            "called `SearchState::apply` with an infeasible placement: visit {} at cell {}",
            visit.get(),
            start_cell
        );

        let patient = model.visit_patient(visit);
        let unit = model.visit_unit(visit);
        let duration = model.unit_duration_cells(unit);
        let end = start_cell + duration;

        self.start_cells[visit.get()] = start_cell;
        self.placed.insert(visit.get());
        self.num_placed += 1;

        let busy = &mut self.patient_busy[patient.get()];
        let load_base = unit.get() * self.horizon;
        for cell in start_cell..end {
            busy.insert(cell);
            self.unit_loads[load_base + cell] += 1;
        }

        self.placed_busy[patient.get()] += duration;
        if end > self.last_ends[patient.get()] {
            self.last_ends[patient.get()] = end;
        }
        if end > self.makespan {
            self.makespan = end;
        }
        if start_cell == model.patient_arrival_cell(patient) {
            self.arrival_ranks[patient.get()] =
                StartCell::some(model.unit_priority_rank(unit) as i64);
        }

        self.current_objective = new_objective;
    }

    /// Undoes one assignment, restoring the recorded prior metadata.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the visit is not placed at the given
    /// start cell.
    pub fn undo(
        &mut self,
        model: &Model,
        visit: VisitIndex,
        start_cell: usize,
        old_last_end: usize,
        old_makespan: usize,
        old_arrival_rank: StartCell<i64>,
        old_objective: T,
    ) {
        debug_assert!(
            self.placed.contains(visit.get()) && self.start_cells[visit.get()] == start_cell,
            "called `SearchState::undo` for a visit that is not placed at cell {}: the index is {}",
            start_cell,
            visit.get()
        );

        let patient = model.visit_patient(visit);
        let unit = model.visit_unit(visit);
        let duration = model.unit_duration_cells(unit);
        let end = start_cell + duration;

        self.placed.remove(visit.get());
        self.num_placed -= 1;

        let busy = &mut self.patient_busy[patient.get()];
        let load_base = unit.get() * self.horizon;
        for cell in start_cell..end {
            busy.remove(cell);
            self.unit_loads[load_base + cell] -= 1;
        }

        self.placed_busy[patient.get()] -= duration;
        self.last_ends[patient.get()] = old_last_end;
        self.makespan = old_makespan;
        self.arrival_ranks[patient.get()] = old_arrival_rank;
        self.current_objective = old_objective;
    }
}

/// Error converting an incomplete state into a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncompleteStateError {
    pub placed: usize,
    pub required: usize,
}

impl std::fmt::Display for IncompleteStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "state holds {} placed visits but {} are required",
            self.placed, self.required
        )
    }
}

impl std::error::Error for IncompleteStateError {}

impl<T> TryFrom<SearchState<T>> for Solution<T>
where
    T: PrimInt + Signed + Copy + Zero,
{
    type Error = IncompleteStateError;

    fn try_from(state: SearchState<T>) -> Result<Self, Self::Error> {
        if !state.is_complete() {
            return Err(IncompleteStateError {
                placed: state.num_placed,
                required: state.num_required,
            });
        }

        Ok(Solution::new(
            state.current_objective,
            state.start_cells,
            state.placed,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_model::model::ModelBuilder;

    type IntegerType = i64;

    fn pi(i: usize) -> PatientIndex {
        PatientIndex::new(i)
    }

    fn ui(i: usize) -> UnitIndex {
        UnitIndex::new(i)
    }

    fn two_unit_model() -> Model {
        let mut builder = ModelBuilder::new(2, 2, 8);
        builder.set_unit_duration_cells(ui(0), 2);
        builder.set_unit_duration_cells(ui(1), 1);
        builder.set_patient_arrival_cell(pi(1), 2);
        builder.build()
    }

    #[test]
    fn test_new_state_is_empty() {
        let model = two_unit_model();
        let state = SearchState::<IntegerType>::new(&model);

        assert_eq!(state.num_placed(), 0);
        assert!(!state.is_complete());
        assert_eq!(state.makespan(), 0);
        assert_eq!(state.current_objective(), 0);
        // Last end starts at the arrival cell.
        assert_eq!(state.last_end(pi(0)), 0);
        assert_eq!(state.last_end(pi(1)), 2);
        assert!(state.arrival_rank(pi(0)).is_none());
    }

    #[test]
    fn test_can_place_respects_release_and_horizon() {
        let model = two_unit_model();
        let state = SearchState::<IntegerType>::new(&model);
        let visit = model.visit_index(pi(1), ui(0)); // duration 2, arrival 2

        assert!(!state.can_place(&model, visit, 1)); // before arrival
        assert!(state.can_place(&model, visit, 2));
        assert!(state.can_place(&model, visit, 6)); // ends exactly at horizon
        assert!(!state.can_place(&model, visit, 7)); // would run past horizon
    }

    #[test]
    fn test_apply_updates_occupancy_and_metadata() {
        let model = two_unit_model();
        let mut state = SearchState::<IntegerType>::new(&model);
        let visit = model.visit_index(pi(0), ui(0)); // duration 2, arrival 0

        state.apply(&model, visit, 0, 42);

        assert!(state.is_placed(visit));
        assert_eq!(state.start_cell(visit), 0);
        assert_eq!(state.num_placed(), 1);
        assert_eq!(state.last_end(pi(0)), 2);
        assert_eq!(state.makespan(), 2);
        assert_eq!(state.placed_busy(pi(0)), 2);
        assert_eq!(state.current_objective(), 42);
        assert_eq!(state.unit_load(ui(0), 0), 1);
        assert_eq!(state.unit_load(ui(0), 1), 1);
        assert_eq!(state.unit_load(ui(0), 2), 0);
        // Started at arrival, so the arrival rank is recorded.
        assert_eq!(state.arrival_rank(pi(0)).get(), Some(0));
    }

    #[test]
    fn test_patient_no_overlap_is_enforced() {
        let model = two_unit_model();
        let mut state = SearchState::<IntegerType>::new(&model);

        state.apply(&model, model.visit_index(pi(0), ui(0)), 0, 0);
        let second = model.visit_index(pi(0), ui(1));
        assert!(!state.can_place(&model, second, 1)); // inside the span
        assert!(state.can_place(&model, second, 2)); // adjacent is fine
    }

    #[test]
    fn test_unit_capacity_is_enforced_across_patients() {
        let model = two_unit_model(); // capacities default to 1
        let mut state = SearchState::<IntegerType>::new(&model);

        state.apply(&model, model.visit_index(pi(0), ui(1)), 3, 0);
        let other = model.visit_index(pi(1), ui(1));
        assert!(!state.can_place(&model, other, 3)); // unit busy at cell 3
        assert!(state.can_place(&model, other, 4));
    }

    #[test]
    fn test_capacity_two_allows_two_concurrent_patients() {
        let mut builder = ModelBuilder::new(1, 3, 4);
        builder.set_unit_capacity(ui(0), 2);
        let model = builder.build();
        let mut state = SearchState::<IntegerType>::new(&model);

        state.apply(&model, model.visit_index(pi(0), ui(0)), 0, 0);
        state.apply(&model, model.visit_index(pi(1), ui(0)), 0, 0);
        assert_eq!(state.unit_load(ui(0), 0), 2);
        assert!(!state.can_place(&model, model.visit_index(pi(2), ui(0)), 0));
        assert!(state.can_place(&model, model.visit_index(pi(2), ui(0)), 1));
    }

    #[test]
    fn test_undo_restores_everything() {
        let model = two_unit_model();
        let mut state = SearchState::<IntegerType>::new(&model);
        let reference = state.clone();
        let visit = model.visit_index(pi(0), ui(0));

        let old_last_end = state.last_end(pi(0));
        let old_makespan = state.makespan();
        let old_rank = state.arrival_rank(pi(0));
        let old_objective = state.current_objective();

        state.apply(&model, visit, 0, 42);
        state.undo(
            &model,
            visit,
            0,
            old_last_end,
            old_makespan,
            old_rank,
            old_objective,
        );

        assert_eq!(state.num_placed(), reference.num_placed());
        assert_eq!(state.last_end(pi(0)), reference.last_end(pi(0)));
        assert_eq!(state.makespan(), reference.makespan());
        assert_eq!(state.current_objective(), reference.current_objective());
        assert!(!state.is_placed(visit));
        assert_eq!(state.unit_load(ui(0), 0), 0);
        assert!(state.can_place(&model, visit, 0));
    }

    #[test]
    fn test_try_into_solution_requires_completion() {
        let model = two_unit_model();
        let mut state = SearchState::<IntegerType>::new(&model);

        let err = Solution::try_from(state.clone()).unwrap_err();
        assert_eq!(err.placed, 0);
        assert_eq!(err.required, 4);

        state.apply(&model, model.visit_index(pi(0), ui(0)), 0, 0);
        state.apply(&model, model.visit_index(pi(0), ui(1)), 2, 0);
        state.apply(&model, model.visit_index(pi(1), ui(0)), 2, 0);
        state.apply(&model, model.visit_index(pi(1), ui(1)), 4, 7);

        let solution = Solution::try_from(state).unwrap();
        assert_eq!(solution.objective_value(), 7);
        assert_eq!(solution.placed().count_ones(..), 4);
    }
}
