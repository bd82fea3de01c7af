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

//! The result projector.
//!
//! Materializes every placed visit as a `(patient_name, start_label,
//! schedulable_id, pinned)` record. Only the start of each visit is
//! emitted; continuation cells of multi-cell visits are implicit from the
//! unit's duration. Output order: patients in request order, each
//! patient's visits by start cell.

use num_traits::{PrimInt, Signed};
use rota_model::{
    index::{PatientIndex, UnitIndex},
    normalize::Instance,
    request::SlotRecord,
    solution::Solution,
};
use smallvec::SmallVec;

/// Projects a solved schedule back into caller vocabulary.
pub fn project_slots<T>(instance: &Instance, solution: &Solution<T>) -> Vec<SlotRecord>
where
    T: PrimInt + Signed + Copy,
{
    let model = &instance.model;
    let mut records = Vec::with_capacity(solution.placed().count_ones(..));

    for p in 0..model.num_patients() {
        let patient = PatientIndex::new(p);

        let mut visits: SmallVec<[(usize, usize); 8]> = SmallVec::new();
        for u in 0..model.num_units() {
            let visit = model.visit_index(patient, UnitIndex::new(u));
            if solution.is_placed(visit) {
                visits.push((solution.start_cell(visit), u));
            }
        }
        // Visits of one patient never share a start cell (durations are
        // positive and overlap-free), so sorting by start is total.
        visits.sort_unstable();

        for (start_cell, u) in visits {
            let visit = model.visit_index(patient, UnitIndex::new(u));
            records.push(SlotRecord {
                patient_name: instance.patient_names[p].clone(),
                time_slot: instance.grid.label(start_cell).to_string(),
                schedulable_id: instance.unit_ids[u].clone(),
                pinned: instance.pinned.contains(visit.get()),
            });
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixedbitset::FixedBitSet;
    use rota_model::normalize::normalize;
    use rota_model::request::{PatientSpec, PinSpec, SolveOptions, SolveRequest, UnitSpec};

    fn request() -> SolveRequest {
        SolveRequest {
            time_slots: ["8:00", "8:30", "9:00", "9:30"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            patients: vec![
                PatientSpec {
                    name: "A".into(),
                    arrival_time: None,
                },
                PatientSpec {
                    name: "B".into(),
                    arrival_time: None,
                },
            ],
            schedulables: vec![
                UnitSpec {
                    id: "u1".into(),
                    name: "U1".into(),
                    duration: 30,
                    priority: 0,
                    auto_schedule: true,
                    capacity: 1,
                },
                UnitSpec {
                    id: "u2".into(),
                    name: "U2".into(),
                    duration: 30,
                    priority: 0,
                    auto_schedule: true,
                    capacity: 1,
                },
            ],
            pinned_slots: vec![PinSpec {
                patient_name: "A".into(),
                time_slot: "9:00".into(),
                schedulable_id: "u2".into(),
            }],
            options: SolveOptions::default(),
        }
    }

    fn solution(num_visits: usize, placements: &[(usize, usize)]) -> Solution<i64> {
        let mut start_cells = vec![0; num_visits];
        let mut placed = FixedBitSet::with_capacity(num_visits);
        for &(visit, start) in placements {
            start_cells[visit] = start;
            placed.insert(visit);
        }
        Solution::new(0, start_cells, placed)
    }

    #[test]
    fn test_projection_orders_by_patient_then_start() {
        let instance = normalize(&request()).unwrap();
        // A: u2 @ cell 2 (pinned), u1 @ cell 0. B: u1 @ cell 1, u2 @ cell 0.
        let sol = solution(4, &[(0, 0), (1, 2), (2, 1), (3, 0)]);

        let records = project_slots(&instance, &sol);
        let as_tuples: Vec<(&str, &str, &str, bool)> = records
            .iter()
            .map(|r| {
                (
                    r.patient_name.as_str(),
                    r.time_slot.as_str(),
                    r.schedulable_id.as_str(),
                    r.pinned,
                )
            })
            .collect();

        assert_eq!(
            as_tuples,
            vec![
                ("A", "8:00", "u1", false),
                ("A", "9:00", "u2", true),
                ("B", "8:00", "u2", false),
                ("B", "8:30", "u1", false),
            ]
        );
    }

    #[test]
    fn test_unplaced_visits_are_omitted() {
        let instance = normalize(&request()).unwrap();
        let sol = solution(4, &[(0, 0)]);

        let records = project_slots(&instance, &sol);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].patient_name, "A");
    }
}
