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
    index::{PatientIndex, UnitIndex, VisitIndex},
    time::StartCell,
};
use fixedbitset::FixedBitSet;

#[inline(always)]
fn flatten_index(num_units: usize, patient: PatientIndex, unit: UnitIndex) -> usize {
    patient.get() * num_units + unit.get()
}

/// The immutable data model describing one day of clinic scheduling.
///
/// This struct holds all pre-validated, queryable data in Structure of
/// Arrays form:
/// - `arrival_cells[patient]`: the earliest cell at which the patient may
///   receive a visit.
/// - `duration_cells[unit]`, `priorities[unit]`, `capacities[unit]`: the
///   per-unit attributes the solver consumes.
/// - `priority_ranks[unit]`: the unit's position in the total
///   (priority, input index) order; lower ranks are handed out first.
/// - `required`: one bit per visit; set iff the unit auto-schedules or the
///   visit is pinned. Only required visits are placed.
/// - `pinned_starts[visit]`: the pinned start cell, sentinel-absent when
///   the visit is free.
///
/// Visits flatten the (patient, unit) pair in row-major patient × unit
/// order; see `Model::visit_index`.
///
/// Construction:
/// - Use `ModelBuilder` and call `ModelBuilder::build` to obtain a `Model`.
///   Requests from the solve boundary go through the normalizer, which
///   performs all validation before touching the builder.
#[derive(Debug, Clone)]
pub struct Model {
    horizon: usize,
    num_units: usize,
    arrival_cells: Vec<usize>,           // len = num_patients
    duration_cells: Vec<usize>,          // len = num_units
    priorities: Vec<i64>,                // len = num_units
    priority_ranks: Vec<usize>,          // len = num_units
    capacities: Vec<usize>,              // len = num_units
    auto_units: FixedBitSet,             // len = num_units
    required: FixedBitSet,               // len = num_patients * num_units
    pinned_starts: Vec<StartCell<i64>>,  // len = num_patients * num_units
    busy_totals: Vec<usize>,             // len = num_patients
    arrival_prev: Vec<Option<PatientIndex>>, // len = num_patients
    arrival_next: Vec<Option<PatientIndex>>, // len = num_patients
    num_required: usize,
}

impl Model {
    /// Returns the number of patients in the model.
    #[inline]
    pub fn num_patients(&self) -> usize {
        self.arrival_cells.len()
    }

    /// Returns the number of schedulable units in the model.
    #[inline]
    pub fn num_units(&self) -> usize {
        self.num_units
    }

    /// Returns the total number of visits (patients × units).
    #[inline]
    pub fn num_visits(&self) -> usize {
        self.required.len()
    }

    /// Returns the number of visits that must be placed.
    #[inline]
    pub fn num_required_visits(&self) -> usize {
        self.num_required
    }

    /// Returns the grid horizon `H` in cells.
    #[inline]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Flattens a (patient, unit) pair into its visit index.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either index is out of bounds.
    #[inline]
    pub fn visit_index(&self, patient: PatientIndex, unit: UnitIndex) -> VisitIndex {
        debug_assert!(
            patient.get() < self.num_patients(),
            "called `Model::visit_index` with patient index out of bounds: the len is {} but the index is {}",
            self.num_patients(),
            patient.get()
        );
        debug_assert!(
            unit.get() < self.num_units(),
            "called `Model::visit_index` with unit index out of bounds: the len is {} but the index is {}",
            self.num_units(),
            unit.get()
        );

        VisitIndex::new(flatten_index(self.num_units, patient, unit))
    }

    /// Returns the patient a visit belongs to.
    #[inline]
    pub fn visit_patient(&self, visit: VisitIndex) -> PatientIndex {
        debug_assert!(
            visit.get() < self.num_visits(),
            "called `Model::visit_patient` with visit index out of bounds: the len is {} but the index is {}",
            self.num_visits(),
            visit.get()
        );

        PatientIndex::new(visit.get() / self.num_units)
    }

    /// Returns the unit a visit references.
    #[inline]
    pub fn visit_unit(&self, visit: VisitIndex) -> UnitIndex {
        debug_assert!(
            visit.get() < self.num_visits(),
            "called `Model::visit_unit` with visit index out of bounds: the len is {} but the index is {}",
            self.num_visits(),
            visit.get()
        );

        UnitIndex::new(visit.get() % self.num_units)
    }

    /// Returns the arrival cell for the specified patient.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `patient` is out of bounds.
    #[inline]
    pub fn patient_arrival_cell(&self, patient: PatientIndex) -> usize {
        debug_assert!(
            patient.get() < self.num_patients(),
            "called `Model::patient_arrival_cell` with patient index out of bounds: the len is {} but the index is {}",
            self.num_patients(),
            patient.get()
        );

        self.arrival_cells[patient.get()]
    }

    /// Returns the summed duration in cells of the patient's required visits.
    #[inline]
    pub fn patient_busy_total(&self, patient: PatientIndex) -> usize {
        debug_assert!(
            patient.get() < self.num_patients(),
            "called `Model::patient_busy_total` with patient index out of bounds: the len is {} but the index is {}",
            self.num_patients(),
            patient.get()
        );

        self.busy_totals[patient.get()]
    }

    /// Returns the previous patient (in input order) sharing this
    /// patient's arrival cell, if any.
    ///
    /// Used by the arrival-priority preference: patients arriving together
    /// should be handed units in priority order, earlier input positions
    /// first.
    #[inline]
    pub fn arrival_group_prev(&self, patient: PatientIndex) -> Option<PatientIndex> {
        debug_assert!(
            patient.get() < self.num_patients(),
            "called `Model::arrival_group_prev` with patient index out of bounds: the len is {} but the index is {}",
            self.num_patients(),
            patient.get()
        );

        self.arrival_prev[patient.get()]
    }

    /// Returns the next patient (in input order) sharing this patient's
    /// arrival cell, if any.
    #[inline]
    pub fn arrival_group_next(&self, patient: PatientIndex) -> Option<PatientIndex> {
        debug_assert!(
            patient.get() < self.num_patients(),
            "called `Model::arrival_group_next` with patient index out of bounds: the len is {} but the index is {}",
            self.num_patients(),
            patient.get()
        );

        self.arrival_next[patient.get()]
    }

    /// Returns the duration in cells for the specified unit.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `unit` is out of bounds.
    #[inline]
    pub fn unit_duration_cells(&self, unit: UnitIndex) -> usize {
        debug_assert!(
            unit.get() < self.num_units(),
            "called `Model::unit_duration_cells` with unit index out of bounds: the len is {} but the index is {}",
            self.num_units(),
            unit.get()
        );

        self.duration_cells[unit.get()]
    }

    /// Returns the raw priority for the specified unit (lower = higher).
    #[inline]
    pub fn unit_priority(&self, unit: UnitIndex) -> i64 {
        debug_assert!(
            unit.get() < self.num_units(),
            "called `Model::unit_priority` with unit index out of bounds: the len is {} but the index is {}",
            self.num_units(),
            unit.get()
        );

        self.priorities[unit.get()]
    }

    /// Returns the unit's rank in the total (priority, input index) order.
    #[inline]
    pub fn unit_priority_rank(&self, unit: UnitIndex) -> usize {
        debug_assert!(
            unit.get() < self.num_units(),
            "called `Model::unit_priority_rank` with unit index out of bounds: the len is {} but the index is {}",
            self.num_units(),
            unit.get()
        );

        self.priority_ranks[unit.get()]
    }

    /// Returns the concurrent-patient capacity for the specified unit.
    #[inline]
    pub fn unit_capacity(&self, unit: UnitIndex) -> usize {
        debug_assert!(
            unit.get() < self.num_units(),
            "called `Model::unit_capacity` with unit index out of bounds: the len is {} but the index is {}",
            self.num_units(),
            unit.get()
        );

        self.capacities[unit.get()]
    }

    /// Returns `true` if the specified unit auto-schedules.
    #[inline]
    pub fn unit_is_auto(&self, unit: UnitIndex) -> bool {
        debug_assert!(
            unit.get() < self.num_units(),
            "called `Model::unit_is_auto` with unit index out of bounds: the len is {} but the index is {}",
            self.num_units(),
            unit.get()
        );

        self.auto_units.contains(unit.get())
    }

    /// Returns `true` if the visit must be placed (auto unit or pinned).
    #[inline]
    pub fn visit_is_required(&self, visit: VisitIndex) -> bool {
        debug_assert!(
            visit.get() < self.num_visits(),
            "called `Model::visit_is_required` with visit index out of bounds: the len is {} but the index is {}",
            self.num_visits(),
            visit.get()
        );

        self.required.contains(visit.get())
    }

    /// Returns the pinned start cell for the visit, sentinel-absent when
    /// the visit is free to move.
    #[inline]
    pub fn visit_pinned_start(&self, visit: VisitIndex) -> StartCell<i64> {
        debug_assert!(
            visit.get() < self.num_visits(),
            "called `Model::visit_pinned_start` with visit index out of bounds: the len is {} but the index is {}",
            self.num_visits(),
            visit.get()
        );

        self.pinned_starts[visit.get()]
    }

    /// Returns the duration in cells of the specified visit's unit.
    #[inline]
    pub fn visit_duration_cells(&self, visit: VisitIndex) -> usize {
        self.unit_duration_cells(self.visit_unit(visit))
    }

    /// Returns the latest start cell at which the visit still ends at or
    /// before the horizon, or `None` if it cannot fit at all.
    #[inline]
    pub fn latest_start(&self, visit: VisitIndex) -> Option<usize> {
        self.horizon.checked_sub(self.visit_duration_cells(visit))
    }

    /// Returns the summed duration in cells over all required visits.
    ///
    /// This is the constant that separates the engine's span-form
    /// objective from the reported idle-form objective.
    #[inline]
    pub fn total_required_cells(&self) -> usize {
        self.busy_totals.iter().sum()
    }

    /// Iterates the indices of all required visits in flat order.
    #[inline]
    pub fn required_visits(&self) -> impl Iterator<Item = VisitIndex> + '_ {
        self.required.ones().map(VisitIndex::new)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Model(num_patients: {}, num_units: {}, horizon: {})",
            self.num_patients(),
            self.num_units(),
            self.horizon
        )
    }
}

/// A mutable builder for `Model`.
///
/// The builder starts from permissive defaults (every patient arrives at
/// cell 0, every unit lasts one cell, has priority 0, capacity 1, and
/// auto-schedules); constraints are layered on via the setters. `build`
/// derives everything the search needs (required bitset, priority ranks,
/// arrival groups, busy totals).
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    horizon: usize,
    num_units: usize,
    num_patients: usize,
    arrival_cells: Vec<usize>,
    duration_cells: Vec<usize>,
    priorities: Vec<i64>,
    capacities: Vec<usize>,
    auto_units: FixedBitSet,
    pinned_starts: Vec<StartCell<i64>>,
}

impl ModelBuilder {
    /// Creates a new builder for the given problem dimensions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rota_model::model::ModelBuilder;
    ///
    /// let model = ModelBuilder::new(3, 2, 12).build();
    /// assert_eq!(model.num_units(), 3);
    /// assert_eq!(model.num_patients(), 2);
    /// assert_eq!(model.horizon(), 12);
    /// assert_eq!(model.num_visits(), 6);
    /// ```
    pub fn new(num_units: usize, num_patients: usize, horizon: usize) -> Self {
        let mut auto_units = FixedBitSet::with_capacity(num_units);
        auto_units.insert_range(..);

        Self {
            horizon,
            num_units,
            num_patients,
            arrival_cells: vec![0; num_patients],
            duration_cells: vec![1; num_units],
            priorities: vec![0; num_units],
            capacities: vec![1; num_units],
            auto_units,
            pinned_starts: vec![StartCell::none(); num_patients * num_units],
        }
    }

    /// Returns the number of units configured.
    #[inline]
    pub fn num_units(&self) -> usize {
        self.num_units
    }

    /// Returns the number of patients configured.
    #[inline]
    pub fn num_patients(&self) -> usize {
        self.num_patients
    }

    /// Sets the arrival cell for the specified patient.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `patient` is out of bounds or the cell
    /// is outside the horizon.
    #[inline]
    pub fn set_patient_arrival_cell(
        &mut self,
        patient: PatientIndex,
        arrival_cell: usize,
    ) -> &mut Self {
        debug_assert!(
            patient.get() < self.num_patients,
            "called `ModelBuilder::set_patient_arrival_cell` with patient index out of bounds: the len is {} but the index is {}",
            self.num_patients,
            patient.get()
        );
        debug_assert!(
            arrival_cell < self.horizon,
            "called `ModelBuilder::set_patient_arrival_cell` with arrival cell past the horizon: the horizon is {} but the cell is {}",
            self.horizon,
            arrival_cell
        );

        self.arrival_cells[patient.get()] = arrival_cell;
        self
    }

    /// Sets the duration in cells for the specified unit.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `unit` is out of bounds or the duration
    /// is zero.
    #[inline]
    pub fn set_unit_duration_cells(&mut self, unit: UnitIndex, duration_cells: usize) -> &mut Self {
        debug_assert!(
            unit.get() < self.num_units,
            "called `ModelBuilder::set_unit_duration_cells` with unit index out of bounds: the len is {} but the index is {}",
            self.num_units,
            unit.get()
        );
        debug_assert!(
            duration_cells >= 1,
            "called `ModelBuilder::set_unit_duration_cells` with a zero duration"
        );

        self.duration_cells[unit.get()] = duration_cells;
        self
    }

    /// Sets the priority for the specified unit (lower = higher priority).
    #[inline]
    pub fn set_unit_priority(&mut self, unit: UnitIndex, priority: i64) -> &mut Self {
        debug_assert!(
            unit.get() < self.num_units,
            "called `ModelBuilder::set_unit_priority` with unit index out of bounds: the len is {} but the index is {}",
            self.num_units,
            unit.get()
        );

        self.priorities[unit.get()] = priority;
        self
    }

    /// Sets the concurrent-patient capacity for the specified unit.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `unit` is out of bounds or the capacity
    /// is zero.
    #[inline]
    pub fn set_unit_capacity(&mut self, unit: UnitIndex, capacity: usize) -> &mut Self {
        debug_assert!(
            unit.get() < self.num_units,
            "called `ModelBuilder::set_unit_capacity` with unit index out of bounds: the len is {} but the index is {}",
            self.num_units,
            unit.get()
        );
        debug_assert!(
            capacity >= 1,
            "called `ModelBuilder::set_unit_capacity` with a zero capacity"
        );

        self.capacities[unit.get()] = capacity;
        self
    }

    /// Sets whether the specified unit auto-schedules.
    ///
    /// Non-auto units are placed only through pins.
    #[inline]
    pub fn set_unit_auto_schedule(&mut self, unit: UnitIndex, auto_schedule: bool) -> &mut Self {
        debug_assert!(
            unit.get() < self.num_units,
            "called `ModelBuilder::set_unit_auto_schedule` with unit index out of bounds: the len is {} but the index is {}",
            self.num_units,
            unit.get()
        );

        self.auto_units.set(unit.get(), auto_schedule);
        self
    }

    /// Pins the (patient, unit) visit to a fixed start cell.
    ///
    /// Pinning marks the visit required regardless of the unit's
    /// auto-schedule flag. The normalizer is responsible for rejecting
    /// conflicting pins before they reach the builder.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either index is out of bounds or the
    /// start cell lies outside the horizon.
    #[inline]
    pub fn pin_visit(
        &mut self,
        patient: PatientIndex,
        unit: UnitIndex,
        start_cell: usize,
    ) -> &mut Self {
        debug_assert!(
            patient.get() < self.num_patients,
            "called `ModelBuilder::pin_visit` with patient index out of bounds: the len is {} but the index is {}",
            self.num_patients,
            patient.get()
        );
        debug_assert!(
            unit.get() < self.num_units,
            "called `ModelBuilder::pin_visit` with unit index out of bounds: the len is {} but the index is {}",
            self.num_units,
            unit.get()
        );
        debug_assert!(
            start_cell < self.horizon,
            "called `ModelBuilder::pin_visit` with start cell past the horizon: the horizon is {} but the cell is {}",
            self.horizon,
            start_cell
        );

        let flat = flatten_index(self.num_units, patient, unit);
        self.pinned_starts[flat] = StartCell::some(start_cell as i64);
        self
    }

    /// Builds the immutable `Model`, deriving the search-facing tables.
    pub fn build(&self) -> Model {
        let num_visits = self.num_patients * self.num_units;

        // Required = auto unit, or pinned regardless of the auto flag.
        let mut required = FixedBitSet::with_capacity(num_visits);
        for visit in 0..num_visits {
            let unit = visit % self.num_units;
            if self.auto_units.contains(unit) || self.pinned_starts[visit].is_some() {
                required.insert(visit);
            }
        }
        let num_required = required.count_ones(..);

        // Rank units by (priority, input index); lower rank = handed out first.
        let mut order: Vec<usize> = (0..self.num_units).collect();
        order.sort_by_key(|&u| (self.priorities[u], u));
        let mut priority_ranks = vec![0usize; self.num_units];
        for (rank, &unit) in order.iter().enumerate() {
            priority_ranks[unit] = rank;
        }

        // Per-patient busy totals over required visits.
        let mut busy_totals = vec![0usize; self.num_patients];
        for visit in required.ones() {
            let patient = visit / self.num_units;
            let unit = visit % self.num_units;
            busy_totals[patient] += self.duration_cells[unit];
        }

        // Arrival groups: for each patient, the previous patient in input
        // order sharing the same arrival cell.
        let mut arrival_prev = vec![None; self.num_patients];
        let mut arrival_next = vec![None; self.num_patients];
        for patient in 0..self.num_patients {
            arrival_prev[patient] = (0..patient)
                .rev()
                .find(|&earlier| self.arrival_cells[earlier] == self.arrival_cells[patient])
                .map(PatientIndex::new);
            arrival_next[patient] = ((patient + 1)..self.num_patients)
                .find(|&later| self.arrival_cells[later] == self.arrival_cells[patient])
                .map(PatientIndex::new);
        }

        Model {
            horizon: self.horizon,
            num_units: self.num_units,
            arrival_cells: self.arrival_cells.clone(),
            duration_cells: self.duration_cells.clone(),
            priorities: self.priorities.clone(),
            priority_ranks,
            capacities: self.capacities.clone(),
            auto_units: self.auto_units.clone(),
            required,
            pinned_starts: self.pinned_starts.clone(),
            busy_totals,
            arrival_prev,
            arrival_next,
            num_required,
        }
    }
}
