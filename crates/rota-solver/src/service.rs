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

//! The solve boundary.
//!
//! One synchronous call per request: normalize, warm-start, search,
//! project. The solver holds no state between calls; the hosting layer is
//! responsible for offloading the (blocking) call from latency-sensitive
//! threads and may run many solves in parallel.
//!
//! Status mapping:
//! - structural defects and ill-formed pins → `ERROR` with the
//!   normalizer's field-naming message,
//! - proven infeasibility → `INFEASIBLE`,
//! - a deadline with no solution → `ERROR` "timeout", a cancellation with
//!   no solution → `ERROR` "cancelled",
//! - otherwise `OPTIMAL` or `FEASIBLE` with the placed slots and the
//!   objective of the returned schedule.

use crate::{project::project_slots, solver::SolverBuilder};
use rota_cp::{
    branching::input_order::InputOrderBuilder,
    eval::weighted::{CostWeights, WeightedCostEvaluator},
    portfolio::CpPortfolioSolver,
    warmstart::greedy_schedule,
};
use rota_model::{
    normalize::{Instance, normalize},
    request::{SolveRequest, SolveResponse, SolveStatus, WeightSpec},
    solution::Solution,
};
use rota_search::result::{SolverResult, TerminationReason};
use std::sync::atomic::AtomicBool;
use std::time::Duration;

/// The objective type the boundary solves with.
type Objective = i64;

/// Default wall-clock budget when the request does not override it.
const DEFAULT_TIME_LIMIT_MS: u64 = 10_000;

/// Upper clamp for caller-supplied time limits.
const MAX_TIME_LIMIT_MS: u64 = 60_000;

/// Solves one request to completion.
pub fn solve_request(request: &SolveRequest) -> SolveResponse {
    solve_request_with_cancel(request, None)
}

/// Solves one request, honoring a caller-owned cancellation flag.
///
/// If the flag is raised mid-solve, the response is `FEASIBLE` when a
/// solution was already found, else `ERROR` with reason "cancelled".
pub fn solve_request_with_cancel(
    request: &SolveRequest,
    cancel: Option<&AtomicBool>,
) -> SolveResponse {
    let started = std::time::Instant::now();

    let instance = match normalize(request) {
        Ok(instance) => instance,
        Err(error) => {
            return SolveResponse {
                status: SolveStatus::Error,
                slots: Vec::new(),
                solve_time_ms: started.elapsed().as_millis() as u64,
                message: format!("{}: {}", error.kind(), error),
                objective: None,
            };
        }
    };

    let weight_spec = request.options.weights.unwrap_or_default();
    let weights = CostWeights::<Objective> {
        idle: weight_spec.idle,
        makespan: weight_spec.makespan,
        priority: weight_spec.priority,
        arrival_priority: weight_spec.arrival_priority,
    };
    let time_limit = Duration::from_millis(
        request
            .options
            .time_limit_ms
            .unwrap_or(DEFAULT_TIME_LIMIT_MS)
            .clamp(1, MAX_TIME_LIMIT_MS),
    );

    // Greedy warm start: seeds the incumbent bound; never the final word.
    let mut warm_evaluator = WeightedCostEvaluator::new(weights);
    let warm_start = greedy_schedule::<Objective, _>(&instance.model, &mut warm_evaluator);

    // One worker by default: the search tree is fixed, so identical
    // requests produce byte-identical schedules.
    let mut solver = SolverBuilder::<Objective>::new()
        .with_time_limit(time_limit)
        .add_solver(CpPortfolioSolver::new(
            InputOrderBuilder,
            WeightedCostEvaluator::new(weights),
        ))
        .build();

    let outcome = solver.solve_with(&instance.model, warm_start.as_ref(), cancel);
    let solve_time_ms = started.elapsed().as_millis() as u64;

    match outcome.result() {
        SolverResult::Optimal(solution) => {
            success_response(SolveStatus::Optimal, &instance, solution, &weight_spec, solve_time_ms)
        }
        SolverResult::Feasible(solution) => success_response(
            SolveStatus::Feasible,
            &instance,
            solution,
            &weight_spec,
            solve_time_ms,
        ),
        SolverResult::Infeasible => SolveResponse {
            status: SolveStatus::Infeasible,
            slots: Vec::new(),
            solve_time_ms,
            message: "no feasible schedule exists for the given constraints".to_string(),
            objective: None,
        },
        SolverResult::Unknown => {
            let reason = match outcome.reason() {
                TerminationReason::Aborted(reason) => reason.as_str(),
                _ => "internal",
            };
            SolveResponse {
                status: SolveStatus::Error,
                slots: Vec::new(),
                solve_time_ms,
                message: classify_abort_reason(reason),
                objective: None,
            }
        }
    }
}

fn success_response(
    status: SolveStatus,
    instance: &Instance,
    solution: &Solution<Objective>,
    weights: &WeightSpec,
    solve_time_ms: u64,
) -> SolveResponse {
    let objective = reported_objective(instance, solution, weights);
    SolveResponse {
        status,
        slots: project_slots(instance, solution),
        solve_time_ms,
        message: format!(
            "solved in {}ms with objective value {}",
            solve_time_ms, objective
        ),
        objective: Some(objective),
    }
}

/// Converts the engine's span-form objective into the reported one.
///
/// Per-patient idle is `span − busy` and every required visit is placed,
/// so the two forms differ by exactly `idle_weight · Σ duration_cells`
/// over the required visits.
fn reported_objective(
    instance: &Instance,
    solution: &Solution<Objective>,
    weights: &WeightSpec,
) -> Objective {
    solution.objective_value() - weights.idle * instance.model.total_required_cells() as Objective
}

/// Maps an abort reason onto the boundary's error vocabulary.
fn classify_abort_reason(reason: &str) -> String {
    if reason.contains("cancelled") {
        "cancelled".to_string()
    } else if reason.contains("time limit") {
        "timeout".to_string()
    } else {
        format!("internal: {}", reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_model::request::{PatientSpec, PinSpec, SlotRecord, SolveOptions, UnitSpec};
    use std::collections::{HashMap, HashSet};

    /// Twelve 30-minute cells starting at 8:00 (the H = 12 grid the
    /// scenario suite uses).
    fn grid12() -> Vec<String> {
        (0..12)
            .map(|i| format!("{}:{:02}", 8 + i / 2, (i % 2) * 30))
            .collect()
    }

    fn patient(name: &str, arrival: &str) -> PatientSpec {
        PatientSpec {
            name: name.into(),
            arrival_time: Some(arrival.into()),
        }
    }

    fn unit(id: &str, duration: u32, priority: i64) -> UnitSpec {
        UnitSpec {
            id: id.into(),
            name: id.to_uppercase(),
            duration,
            priority,
            auto_schedule: true,
            capacity: 1,
        }
    }

    fn pin(patient: &str, slot: &str, unit: &str) -> PinSpec {
        PinSpec {
            patient_name: patient.into(),
            time_slot: slot.into(),
            schedulable_id: unit.into(),
        }
    }

    fn request(
        patients: Vec<PatientSpec>,
        schedulables: Vec<UnitSpec>,
        pinned_slots: Vec<PinSpec>,
    ) -> SolveRequest {
        SolveRequest {
            time_slots: grid12(),
            patients,
            schedulables,
            pinned_slots,
            options: SolveOptions::default(),
        }
    }

    /// Re-checks the universal schedule invariants directly on the
    /// response, using only request vocabulary.
    fn check_invariants(request: &SolveRequest, response: &SolveResponse) {
        let cell_of: HashMap<&str, usize> = request
            .time_slots
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), i))
            .collect();
        let units: HashMap<&str, &UnitSpec> = request
            .schedulables
            .iter()
            .map(|u| (u.id.as_str(), u))
            .collect();
        let arrivals: HashMap<&str, usize> = request
            .patients
            .iter()
            .map(|p| {
                let arrival = p
                    .arrival_time
                    .as_deref()
                    .map(|label| cell_of[label])
                    .unwrap_or(0);
                (p.name.as_str(), arrival)
            })
            .collect();
        let horizon = request.time_slots.len();
        let duration_cells = |u: &UnitSpec| (u.duration as usize).div_ceil(30).max(1);

        let mut patient_spans: HashMap<&str, Vec<(usize, usize)>> = HashMap::new();
        let mut unit_load: HashMap<&str, Vec<usize>> = HashMap::new();

        for slot in &response.slots {
            let start = cell_of[slot.time_slot.as_str()];
            let spec = units[slot.schedulable_id.as_str()];
            let end = start + duration_cells(spec);

            // Invariant 3: release time and horizon.
            assert!(start >= arrivals[slot.patient_name.as_str()]);
            assert!(end <= horizon);

            patient_spans
                .entry(slot.patient_name.as_str())
                .or_default()
                .push((start, end));
            let load = unit_load
                .entry(slot.schedulable_id.as_str())
                .or_insert_with(|| vec![0; horizon]);
            for cell in start..end {
                load[cell] += 1;
            }
        }

        // Invariant 1: per-patient no-overlap.
        for spans in patient_spans.values() {
            for (i, a) in spans.iter().enumerate() {
                for b in spans.iter().skip(i + 1) {
                    assert!(a.1 <= b.0 || b.1 <= a.0, "patient visits overlap");
                }
            }
        }

        // Invariant 2: per-unit capacity.
        for (id, load) in &unit_load {
            let capacity = units[*id].capacity as usize;
            assert!(load.iter().all(|&l| l <= capacity), "capacity exceeded");
        }

        // Invariant 4: every pin appears unchanged and flagged.
        for pinned in &request.pinned_slots {
            assert!(
                response.slots.iter().any(|s| {
                    s.patient_name == pinned.patient_name
                        && s.time_slot == pinned.time_slot
                        && s.schedulable_id == pinned.schedulable_id
                        && s.pinned
                }),
                "pin missing from output"
            );
        }

        // Invariant 5: one visit per (patient, auto unit), none otherwise.
        for p in &request.patients {
            for u in &request.schedulables {
                let count = response
                    .slots
                    .iter()
                    .filter(|s| s.patient_name == p.name && s.schedulable_id == u.id)
                    .count();
                let is_pinned = request
                    .pinned_slots
                    .iter()
                    .any(|ps| ps.patient_name == p.name && ps.schedulable_id == u.id);
                if u.auto_schedule || is_pinned {
                    assert_eq!(count, 1, "visit count for {}/{}", p.name, u.id);
                } else {
                    assert_eq!(count, 0, "unexpected visit for {}/{}", p.name, u.id);
                }
            }
        }
    }

    #[test]
    fn test_s1_smoke() {
        let req = request(
            vec![patient("A", "8:00")],
            vec![unit("U", 30, 0)],
            Vec::new(),
        );
        let response = solve_request(&req);

        assert_eq!(response.status, SolveStatus::Optimal);
        assert_eq!(response.slots.len(), 1);
        assert_eq!(response.slots[0].patient_name, "A");
        assert_eq!(response.slots[0].time_slot, "8:00");
        assert_eq!(response.slots[0].schedulable_id, "U");
        // Zero idle, makespan of one cell.
        assert_eq!(response.objective, Some(10));
        check_invariants(&req, &response);
    }

    #[test]
    fn test_s2_priority_tiebreak_at_arrival() {
        let req = request(
            vec![patient("P0", "8:00"), patient("P1", "8:00")],
            vec![unit("u_hi", 30, 0), unit("u_lo", 30, 1)],
            Vec::new(),
        );
        let response = solve_request(&req);

        assert_eq!(response.status, SolveStatus::Optimal);
        check_invariants(&req, &response);

        let first_slots: HashSet<(String, String)> = response
            .slots
            .iter()
            .filter(|s| s.time_slot == "8:00")
            .map(|s| (s.patient_name.clone(), s.schedulable_id.clone()))
            .collect();
        // Earlier input position gets the higher-priority unit at arrival.
        assert!(first_slots.contains(&("P0".to_string(), "u_hi".to_string())));
        assert!(first_slots.contains(&("P1".to_string(), "u_lo".to_string())));
    }

    #[test]
    fn test_s3_pin_honored() {
        let req = request(
            vec![patient("P", "8:00")],
            vec![unit("u1", 30, 0), unit("u2", 30, 0), unit("u3", 30, 0)],
            vec![pin("P", "9:00", "u3")],
        );
        let response = solve_request(&req);

        assert_eq!(response.status, SolveStatus::Optimal);
        check_invariants(&req, &response);

        let u3 = response
            .slots
            .iter()
            .find(|s| s.schedulable_id == "u3")
            .unwrap();
        assert_eq!(u3.time_slot, "9:00");
        assert!(u3.pinned);

        // The free units fill 8:00 and 8:30: no idle, makespan 3.
        let times: HashSet<&str> = response.slots.iter().map(|s| s.time_slot.as_str()).collect();
        assert_eq!(times, HashSet::from(["8:00", "8:30", "9:00"]));
        assert_eq!(response.objective, Some(30));
    }

    #[test]
    fn test_s4_multi_cell_no_overlap() {
        let req = request(
            vec![patient("P", "8:00")],
            vec![unit("u_60", 60, 0), unit("u_30", 30, 0)],
            Vec::new(),
        );
        let response = solve_request(&req);

        assert_eq!(response.status, SolveStatus::Optimal);
        assert_eq!(response.slots.len(), 2);
        check_invariants(&req, &response);
        // Both placed back to back: zero idle, makespan of three cells.
        assert_eq!(response.objective, Some(30));
    }

    #[test]
    fn test_s5_capacity_two() {
        let mut shared = unit("u", 30, 0);
        shared.capacity = 2;
        let req = request(
            vec![
                patient("P0", "8:00"),
                patient("P1", "8:00"),
                patient("P2", "8:00"),
            ],
            vec![shared],
            Vec::new(),
        );
        let response = solve_request(&req);

        assert_eq!(response.status, SolveStatus::Optimal);
        check_invariants(&req, &response);

        let mut by_time: HashMap<&str, usize> = HashMap::new();
        for slot in &response.slots {
            *by_time.entry(slot.time_slot.as_str()).or_default() += 1;
        }
        assert_eq!(by_time["8:00"], 2);
        assert_eq!(by_time["8:30"], 1);
        // One patient waits one cell; makespan is two cells.
        assert_eq!(response.objective, Some(1000 + 20));
    }

    #[test]
    fn test_s6_infeasible() {
        let req = request(
            vec![patient("P", "13:30")],
            vec![unit("u1", 30, 0), unit("u2", 30, 0)],
            Vec::new(),
        );
        let response = solve_request(&req);

        assert_eq!(response.status, SolveStatus::Infeasible);
        assert!(response.slots.is_empty());
        assert!(!response.message.is_empty());
        assert_eq!(response.objective, None);
    }

    #[test]
    fn test_property_6_reruns_are_byte_identical() {
        let req = request(
            vec![patient("A", "8:00"), patient("B", "8:30")],
            vec![unit("u1", 60, 0), unit("u2", 30, 1), unit("u3", 30, 2)],
            vec![pin("A", "10:00", "u3")],
        );

        let first = solve_request(&req);
        let second = solve_request(&req);

        assert_eq!(first.status, SolveStatus::Optimal);
        let first_bytes = serde_json::to_string(&first.slots).unwrap();
        let second_bytes = serde_json::to_string(&second.slots).unwrap();
        assert_eq!(first_bytes, second_bytes);
        assert_eq!(first.objective, second.objective);
    }

    #[test]
    fn test_property_7_pinning_the_output_reproduces_it() {
        let req = request(
            vec![patient("P", "8:00")],
            vec![unit("u1", 30, 0), unit("u2", 30, 0), unit("u3", 30, 0)],
            vec![pin("P", "9:00", "u3")],
        );
        let first = solve_request(&req);
        assert_eq!(first.status, SolveStatus::Optimal);

        let mut pinned_again = req.clone();
        pinned_again.pinned_slots = first
            .slots
            .iter()
            .map(|s| pin(&s.patient_name, &s.time_slot, &s.schedulable_id))
            .collect();
        let second = solve_request(&pinned_again);

        assert_eq!(second.status, SolveStatus::Optimal);
        assert!(second.objective.unwrap() <= first.objective.unwrap());

        let as_triples = |slots: &[SlotRecord]| -> HashSet<(String, String, String)> {
            slots
                .iter()
                .map(|s| {
                    (
                        s.patient_name.clone(),
                        s.time_slot.clone(),
                        s.schedulable_id.clone(),
                    )
                })
                .collect()
        };
        assert_eq!(as_triples(&first.slots), as_triples(&second.slots));
    }

    #[test]
    fn test_property_8_overfull_day_is_infeasible() {
        let req = SolveRequest {
            time_slots: vec!["8:00".into(), "8:30".into()],
            patients: vec![patient("P", "8:00")],
            schedulables: vec![unit("u1", 60, 0), unit("u2", 60, 0)],
            pinned_slots: Vec::new(),
            options: SolveOptions::default(),
        };
        let response = solve_request(&req);
        assert_eq!(response.status, SolveStatus::Infeasible);
    }

    #[test]
    fn test_property_9_duplicate_pins_are_invalid_input() {
        let req = request(
            vec![patient("P", "8:00")],
            vec![unit("u1", 30, 0)],
            vec![pin("P", "8:00", "u1"), pin("P", "8:30", "u1")],
        );
        let response = solve_request(&req);

        assert_eq!(response.status, SolveStatus::Error);
        assert!(response.message.starts_with("invalid input"));
        assert!(response.message.contains("u1"));
    }

    #[test]
    fn test_property_10_pin_before_arrival_is_an_infeasible_pin() {
        let req = request(
            vec![patient("P", "9:00")],
            vec![unit("u1", 30, 0)],
            vec![pin("P", "8:00", "u1")],
        );
        let response = solve_request(&req);

        assert_eq!(response.status, SolveStatus::Error);
        assert!(response.message.starts_with("infeasible pin"));
    }

    #[test]
    fn test_no_patients_is_trivially_optimal() {
        let req = request(Vec::new(), vec![unit("u1", 30, 0)], Vec::new());
        let response = solve_request(&req);

        assert_eq!(response.status, SolveStatus::Optimal);
        assert!(response.slots.is_empty());
    }

    #[test]
    fn test_non_auto_units_appear_only_through_pins() {
        let mut extra = unit("u_extra", 30, 0);
        extra.auto_schedule = false;
        let req = request(
            vec![patient("P", "8:00")],
            vec![unit("u1", 30, 0), extra],
            vec![pin("P", "9:00", "u_extra")],
        );
        let response = solve_request(&req);

        assert_eq!(response.status, SolveStatus::Optimal);
        check_invariants(&req, &response);
        let extra_slot = response
            .slots
            .iter()
            .find(|s| s.schedulable_id == "u_extra")
            .unwrap();
        assert!(extra_slot.pinned);
        assert_eq!(extra_slot.time_slot, "9:00");
    }

    #[test]
    fn test_conflicting_cross_patient_pins_are_infeasible() {
        let req = request(
            vec![patient("A", "8:00"), patient("B", "8:00")],
            vec![unit("u1", 30, 0)],
            vec![pin("A", "8:00", "u1"), pin("B", "8:00", "u1")],
        );
        let response = solve_request(&req);
        assert_eq!(response.status, SolveStatus::Infeasible);
    }

    #[test]
    fn test_custom_weights_reach_the_objective() {
        let mut req = request(
            vec![patient("A", "8:00")],
            vec![unit("u1", 30, 0)],
            Vec::new(),
        );
        req.options.weights = Some(WeightSpec {
            idle: 1,
            makespan: 7,
            priority: 1,
            arrival_priority: 1,
        });
        let response = solve_request(&req);

        assert_eq!(response.status, SolveStatus::Optimal);
        // Zero idle, one cell of makespan at weight 7.
        assert_eq!(response.objective, Some(7));
    }

    #[test]
    fn test_preset_cancellation_returns_the_warm_start_as_feasible() {
        let req = request(
            vec![patient("A", "8:00")],
            vec![unit("u1", 30, 0), unit("u2", 30, 0)],
            Vec::new(),
        );
        let cancel = AtomicBool::new(true);
        let response = solve_request_with_cancel(&req, Some(&cancel));

        // The greedy warm start was found before the abort.
        assert_eq!(response.status, SolveStatus::Feasible);
        check_invariants(&req, &response);
    }

    #[test]
    fn test_abort_reason_classification() {
        assert_eq!(classify_abort_reason("cancelled"), "cancelled");
        assert_eq!(classify_abort_reason("time limit reached"), "timeout");
        assert_eq!(
            classify_abort_reason("solver exploded"),
            "internal: solver exploded"
        );
    }

    #[test]
    fn test_solver_is_stateless_between_calls() {
        let feasible = request(
            vec![patient("A", "8:00")],
            vec![unit("u1", 30, 0)],
            Vec::new(),
        );
        let infeasible = request(
            vec![patient("P", "13:30")],
            vec![unit("u1", 30, 0), unit("u2", 30, 0)],
            Vec::new(),
        );

        assert_eq!(solve_request(&infeasible).status, SolveStatus::Infeasible);
        assert_eq!(solve_request(&feasible).status, SolveStatus::Optimal);
        assert_eq!(solve_request(&infeasible).status, SolveStatus::Infeasible);
    }
}
