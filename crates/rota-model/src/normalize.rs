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

//! Request normalization.
//!
//! Turns a `SolveRequest` into a validated `Instance`: a `TimeGrid`, an
//! immutable `Model`, and the name tables needed to project results back
//! into caller vocabulary. Every structural defect is rejected here with
//! an error naming the offending field; the search engine never sees an
//! ill-formed instance.
//!
//! The error taxonomy distinguishes plain input defects (duplicate names,
//! unknown references, a broken grid) from pin defects (a pin before the
//! patient's arrival, past the horizon, or colliding with another pin).
//! Both surface as errors at the solve boundary: an ill-formed pin set is
//! a caller mistake, not a proven infeasibility.

use crate::{
    grid::{TimeGrid, TimeGridError},
    index::{PatientIndex, UnitIndex},
    model::{Model, ModelBuilder},
    request::SolveRequest,
};
use fixedbitset::FixedBitSet;
use rangemap::RangeSet;
use std::collections::HashMap;

/// Classification of a normalization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request fails structural validation.
    InvalidInput,
    /// The request is structurally sound but a pin is unsatisfiable as
    /// stated.
    InfeasiblePin,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "invalid input"),
            Self::InfeasiblePin => write!(f, "infeasible pin"),
        }
    }
}

/// The error type for request normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The time grid is malformed.
    Grid(TimeGridError),
    /// A patient entry has an empty name.
    EmptyPatientName { position: usize },
    /// Two patients share a name.
    DuplicatePatient { name: String },
    /// A patient's arrival label is not on the grid.
    UnknownArrival { patient: String, label: String },
    /// A schedulable entry has an empty id.
    EmptyUnitId { position: usize },
    /// Two schedulables share an id.
    DuplicateUnit { id: String },
    /// A schedulable has a zero duration.
    ZeroDuration { unit: String },
    /// A schedulable has a zero capacity.
    ZeroCapacity { unit: String },
    /// A pin references an unknown patient.
    UnknownPinPatient { name: String },
    /// A pin references an unknown schedulable.
    UnknownPinUnit { id: String },
    /// A pin's time slot is not on the grid.
    UnknownPinSlot { label: String },
    /// Two pins target the same (patient, schedulable) visit.
    DuplicatePin { patient: String, unit: String },
    /// A pin starts before the patient's arrival.
    PinBeforeArrival {
        patient: String,
        unit: String,
        label: String,
    },
    /// A pinned visit ends past the end of the day.
    PinPastHorizon {
        patient: String,
        unit: String,
        label: String,
    },
    /// Two pins for one patient overlap in time.
    PinOverlap { patient: String, label: String },
}

impl NormalizeError {
    /// Maps the error onto the solve boundary's error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PinBeforeArrival { .. }
            | Self::PinPastHorizon { .. }
            | Self::PinOverlap { .. } => ErrorKind::InfeasiblePin,
            _ => ErrorKind::InvalidInput,
        }
    }
}

impl std::fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "{}", e),
            Self::EmptyPatientName { position } => {
                write!(f, "patients[{}] has an empty name", position)
            }
            Self::DuplicatePatient { name } => {
                write!(f, "patient name '{}' appears more than once", name)
            }
            Self::UnknownArrival { patient, label } => write!(
                f,
                "arrival_time '{}' of patient '{}' is not one of time_slots",
                label, patient
            ),
            Self::EmptyUnitId { position } => {
                write!(f, "schedulables[{}] has an empty id", position)
            }
            Self::DuplicateUnit { id } => {
                write!(f, "schedulable id '{}' appears more than once", id)
            }
            Self::ZeroDuration { unit } => {
                write!(f, "schedulable '{}' has a zero duration", unit)
            }
            Self::ZeroCapacity { unit } => {
                write!(f, "schedulable '{}' has a zero capacity", unit)
            }
            Self::UnknownPinPatient { name } => {
                write!(f, "pinned slot references unknown patient '{}'", name)
            }
            Self::UnknownPinUnit { id } => {
                write!(f, "pinned slot references unknown schedulable '{}'", id)
            }
            Self::UnknownPinSlot { label } => {
                write!(f, "pinned slot '{}' is not one of time_slots", label)
            }
            Self::DuplicatePin { patient, unit } => write!(
                f,
                "two pins target the visit of patient '{}' with schedulable '{}'",
                patient, unit
            ),
            Self::PinBeforeArrival {
                patient,
                unit,
                label,
            } => write!(
                f,
                "pin of schedulable '{}' at '{}' starts before patient '{}' arrives",
                unit, label, patient
            ),
            Self::PinPastHorizon {
                patient,
                unit,
                label,
            } => write!(
                f,
                "pin of schedulable '{}' at '{}' for patient '{}' ends past the end of the day",
                unit, label, patient
            ),
            Self::PinOverlap { patient, label } => write!(
                f,
                "pin at '{}' overlaps another pin of patient '{}'",
                label, patient
            ),
        }
    }
}

impl std::error::Error for NormalizeError {}

impl From<TimeGridError> for NormalizeError {
    fn from(e: TimeGridError) -> Self {
        Self::Grid(e)
    }
}

/// A validated problem instance: the model plus the vocabulary needed to
/// translate results back into caller terms.
#[derive(Debug, Clone)]
pub struct Instance {
    pub grid: TimeGrid,
    pub model: Model,
    pub patient_names: Vec<String>,
    pub unit_ids: Vec<String>,
    /// One bit per visit: set iff the visit was pinned in the request.
    pub pinned: FixedBitSet,
}

/// Validates a request and resolves it into an `Instance`.
pub fn normalize(request: &SolveRequest) -> Result<Instance, NormalizeError> {
    let grid = TimeGrid::from_labels(&request.time_slots)?;
    let horizon = grid.horizon();

    // Patients: unique non-empty names, arrivals on the grid.
    let mut patient_lookup: HashMap<&str, usize> = HashMap::with_capacity(request.patients.len());
    let mut arrival_cells = Vec::with_capacity(request.patients.len());
    for (position, patient) in request.patients.iter().enumerate() {
        if patient.name.is_empty() {
            return Err(NormalizeError::EmptyPatientName { position });
        }
        if patient_lookup.insert(&patient.name, position).is_some() {
            return Err(NormalizeError::DuplicatePatient {
                name: patient.name.clone(),
            });
        }
        let arrival = match &patient.arrival_time {
            Some(label) => grid.cell(label).ok_or_else(|| NormalizeError::UnknownArrival {
                patient: patient.name.clone(),
                label: label.clone(),
            })?,
            None => 0,
        };
        arrival_cells.push(arrival);
    }

    // Units: unique non-empty ids, positive durations and capacities.
    let mut unit_lookup: HashMap<&str, usize> = HashMap::with_capacity(request.schedulables.len());
    let mut duration_cells = Vec::with_capacity(request.schedulables.len());
    for (position, unit) in request.schedulables.iter().enumerate() {
        if unit.id.is_empty() {
            return Err(NormalizeError::EmptyUnitId { position });
        }
        if unit_lookup.insert(&unit.id, position).is_some() {
            return Err(NormalizeError::DuplicateUnit {
                id: unit.id.clone(),
            });
        }
        if unit.duration == 0 {
            return Err(NormalizeError::ZeroDuration {
                unit: unit.id.clone(),
            });
        }
        if unit.capacity == 0 {
            return Err(NormalizeError::ZeroCapacity {
                unit: unit.id.clone(),
            });
        }
        duration_cells.push(grid.cells_for_duration(unit.duration));
    }

    let num_patients = request.patients.len();
    let num_units = request.schedulables.len();

    let mut builder = ModelBuilder::new(num_units, num_patients, horizon);
    for (index, &arrival) in arrival_cells.iter().enumerate() {
        builder.set_patient_arrival_cell(PatientIndex::new(index), arrival);
    }
    for (index, unit) in request.schedulables.iter().enumerate() {
        let ui = UnitIndex::new(index);
        builder
            .set_unit_duration_cells(ui, duration_cells[index])
            .set_unit_priority(ui, unit.priority)
            .set_unit_capacity(ui, unit.capacity as usize)
            .set_unit_auto_schedule(ui, unit.auto_schedule);
    }

    // Pins: resolve references, reject duplicates, enforce the edge
    // policy, and detect same-patient overlaps via per-patient range sets.
    let mut pinned = FixedBitSet::with_capacity(num_patients * num_units);
    let mut pin_spans: Vec<RangeSet<u32>> = vec![RangeSet::new(); num_patients];
    for pin in &request.pinned_slots {
        let patient = *patient_lookup.get(pin.patient_name.as_str()).ok_or_else(|| {
            NormalizeError::UnknownPinPatient {
                name: pin.patient_name.clone(),
            }
        })?;
        let unit = *unit_lookup.get(pin.schedulable_id.as_str()).ok_or_else(|| {
            NormalizeError::UnknownPinUnit {
                id: pin.schedulable_id.clone(),
            }
        })?;
        let start = grid
            .cell(&pin.time_slot)
            .ok_or_else(|| NormalizeError::UnknownPinSlot {
                label: pin.time_slot.clone(),
            })?;

        let visit = patient * num_units + unit;
        if pinned.contains(visit) {
            return Err(NormalizeError::DuplicatePin {
                patient: pin.patient_name.clone(),
                unit: pin.schedulable_id.clone(),
            });
        }

        let duration = duration_cells[unit];
        if start + duration > horizon {
            return Err(NormalizeError::PinPastHorizon {
                patient: pin.patient_name.clone(),
                unit: pin.schedulable_id.clone(),
                label: pin.time_slot.clone(),
            });
        }
        if start < arrival_cells[patient] {
            return Err(NormalizeError::PinBeforeArrival {
                patient: pin.patient_name.clone(),
                unit: pin.schedulable_id.clone(),
                label: pin.time_slot.clone(),
            });
        }

        let span = (start as u32)..((start + duration) as u32);
        if pin_spans[patient].overlaps(&span) {
            return Err(NormalizeError::PinOverlap {
                patient: pin.patient_name.clone(),
                label: pin.time_slot.clone(),
            });
        }
        pin_spans[patient].insert(span);

        pinned.insert(visit);
        builder.pin_visit(PatientIndex::new(patient), UnitIndex::new(unit), start);
    }

    Ok(Instance {
        grid,
        model: builder.build(),
        patient_names: request.patients.iter().map(|p| p.name.clone()).collect(),
        unit_ids: request.schedulables.iter().map(|u| u.id.clone()).collect(),
        pinned,
    })
}
