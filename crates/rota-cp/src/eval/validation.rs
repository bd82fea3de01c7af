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

//! Post-hoc schedule validation.
//!
//! Re-checks every hard constraint on a finished `Solution` against its
//! `Model`, independently of the search that produced it. Used by tests
//! and as a safety net behind engine changes.

use num_traits::{PrimInt, Signed};
use rota_core::math::span::CellSpan;
use rota_model::{
    index::{PatientIndex, UnitIndex, VisitIndex},
    model::Model,
    solution::Solution,
};

/// A violated hard constraint found in a finished schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required visit is missing from the schedule.
    MissingRequiredVisit { visit: usize },
    /// A visit is placed although its unit neither auto-schedules nor is
    /// pinned.
    UnexpectedVisit { visit: usize },
    /// A visit starts before its patient's arrival.
    StartsBeforeArrival { visit: usize, start_cell: usize },
    /// A visit runs past the end of the day.
    RunsPastHorizon { visit: usize, end_cell: usize },
    /// Two visits of one patient overlap.
    PatientOverlap { first: usize, second: usize },
    /// A unit serves more patients than its capacity at some cell.
    CapacityExceeded { unit: usize, cell: usize },
    /// A pinned visit does not start at its pinned cell.
    PinNotHonored { visit: usize, start_cell: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequiredVisit { visit } => {
                write!(f, "required visit {} is not placed", visit)
            }
            Self::UnexpectedVisit { visit } => {
                write!(f, "visit {} is placed but not required", visit)
            }
            Self::StartsBeforeArrival { visit, start_cell } => write!(
                f,
                "visit {} starts at cell {} before the patient's arrival",
                visit, start_cell
            ),
            Self::RunsPastHorizon { visit, end_cell } => write!(
                f,
                "visit {} ends at cell {} past the horizon",
                visit, end_cell
            ),
            Self::PatientOverlap { first, second } => {
                write!(f, "visits {} and {} of one patient overlap", first, second)
            }
            Self::CapacityExceeded { unit, cell } => {
                write!(f, "unit {} exceeds its capacity at cell {}", unit, cell)
            }
            Self::PinNotHonored { visit, start_cell } => write!(
                f,
                "pinned visit {} starts at cell {} instead of its pin",
                visit, start_cell
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Checks every hard constraint on a finished schedule.
///
/// Returns the first violation found, scanning visits in flat order.
pub fn validate_solution<T>(model: &Model, solution: &Solution<T>) -> Result<(), ValidationError>
where
    T: PrimInt + Signed + Copy,
{
    // Placement set matches the required set, pins are honored, windows
    // are respected.
    for visit_flat in 0..model.num_visits() {
        let visit = VisitIndex::new(visit_flat);
        let required = model.visit_is_required(visit);
        let placed = solution.is_placed(visit);

        if required && !placed {
            return Err(ValidationError::MissingRequiredVisit { visit: visit_flat });
        }
        if placed && !required {
            return Err(ValidationError::UnexpectedVisit { visit: visit_flat });
        }
        if !placed {
            continue;
        }

        let start_cell = solution.start_cell(visit);
        let end_cell = start_cell + model.visit_duration_cells(visit);
        let patient = model.visit_patient(visit);

        if start_cell < model.patient_arrival_cell(patient) {
            return Err(ValidationError::StartsBeforeArrival {
                visit: visit_flat,
                start_cell,
            });
        }
        if end_cell > model.horizon() {
            return Err(ValidationError::RunsPastHorizon {
                visit: visit_flat,
                end_cell,
            });
        }
        if let Some(pinned) = model.visit_pinned_start(visit).get() {
            if start_cell != pinned as usize {
                return Err(ValidationError::PinNotHonored {
                    visit: visit_flat,
                    start_cell,
                });
            }
        }
    }

    // Per-patient no-overlap.
    for p in 0..model.num_patients() {
        let patient = PatientIndex::new(p);
        for a in 0..model.num_units() {
            let first = model.visit_index(patient, UnitIndex::new(a));
            if !solution.is_placed(first) {
                continue;
            }
            let first_start = solution.start_cell(first);
            let first_span =
                CellSpan::new(first_start, first_start + model.visit_duration_cells(first));

            for b in (a + 1)..model.num_units() {
                let second = model.visit_index(patient, UnitIndex::new(b));
                if !solution.is_placed(second) {
                    continue;
                }
                let second_start = solution.start_cell(second);
                let second_span =
                    CellSpan::new(second_start, second_start + model.visit_duration_cells(second));

                if first_span.overlaps(&second_span) {
                    return Err(ValidationError::PatientOverlap {
                        first: first.get(),
                        second: second.get(),
                    });
                }
            }
        }
    }

    // Per-unit cumulative capacity.
    for u in 0..model.num_units() {
        let unit = UnitIndex::new(u);
        let capacity = model.unit_capacity(unit);
        let mut load = vec![0usize; model.horizon()];

        for p in 0..model.num_patients() {
            let visit = model.visit_index(PatientIndex::new(p), unit);
            if !solution.is_placed(visit) {
                continue;
            }
            let start_cell = solution.start_cell(visit);
            for cell in start_cell..start_cell + model.unit_duration_cells(unit) {
                load[cell] += 1;
                if load[cell] > capacity {
                    return Err(ValidationError::CapacityExceeded { unit: u, cell });
                }
            }
        }
    }

    Ok(())
}
