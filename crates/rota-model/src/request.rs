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

//! The solve boundary documents.
//!
//! These are the only shapes the solver consumes and produces. The hosting
//! transport (out of scope here) frames them however it likes; the solver
//! is agnostic to whether `schedulables` carries care teams or single
//! specialties.

use serde::{Deserialize, Serialize};

/// A patient entry in the solve request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientSpec {
    /// Unique, non-empty display name.
    pub name: String,
    /// Arrival label; must be one of `time_slots`. Defaults to the first
    /// cell when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
}

/// A schedulable unit (team or specialty) in the solve request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSpec {
    /// Opaque unique identifier.
    pub id: String,
    /// Display name; not interpreted by the solver.
    pub name: String,
    /// Visit duration in minutes (>= 1); rounded up to whole cells.
    pub duration: u32,
    /// Soft ordering; lower = higher priority. Defaults to 0.
    #[serde(default)]
    pub priority: i64,
    /// Whether every patient automatically receives this unit once.
    #[serde(default = "default_auto_schedule")]
    pub auto_schedule: bool,
    /// Concurrent patients the unit may serve (>= 1). Defaults to 1.
    #[serde(default = "default_capacity")]
    pub capacity: u32,
}

fn default_auto_schedule() -> bool {
    true
}

fn default_capacity() -> u32 {
    1
}

/// A user-fixed visit: this (patient, unit) visit begins at this slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinSpec {
    pub patient_name: String,
    pub time_slot: String,
    pub schedulable_id: String,
}

/// Objective weights; see the weighted objective in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightSpec {
    #[serde(default = "default_idle_weight")]
    pub idle: i64,
    #[serde(default = "default_makespan_weight")]
    pub makespan: i64,
    #[serde(default = "default_priority_weight")]
    pub priority: i64,
    #[serde(default = "default_arrival_priority_weight")]
    pub arrival_priority: i64,
}

fn default_idle_weight() -> i64 {
    1000
}

fn default_makespan_weight() -> i64 {
    10
}

fn default_priority_weight() -> i64 {
    100
}

fn default_arrival_priority_weight() -> i64 {
    50
}

impl Default for WeightSpec {
    fn default() -> Self {
        Self {
            idle: default_idle_weight(),
            makespan: default_makespan_weight(),
            priority: default_priority_weight(),
            arrival_priority: default_arrival_priority_weight(),
        }
    }
}

/// Optional solve configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveOptions {
    /// Wall-clock budget in milliseconds; clamped to [1, 60000].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit_ms: Option<u64>,
    /// Objective weights; defaults to (1000, 10, 100, 50).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightSpec>,
    /// Reserved for randomized strategies; the shipped search is
    /// deterministic and records but does not consume the seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// One solve request: the full problem instance for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Ordered, equally-spaced `H:MM` labels (min 2, max 192).
    pub time_slots: Vec<String>,
    pub patients: Vec<PatientSpec>,
    pub schedulables: Vec<UnitSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pinned_slots: Vec<PinSpec>,
    #[serde(default)]
    pub options: SolveOptions,
}

/// The outcome classification of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SolveStatus {
    /// Proven optimum found.
    Optimal,
    /// Feasible solution found, optimality not proven.
    Feasible,
    /// Proven that no feasible schedule exists.
    Infeasible,
    /// Rejected input, timeout without a solution, cancellation, or an
    /// internal failure.
    Error,
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Optimal => write!(f, "OPTIMAL"),
            Self::Feasible => write!(f, "FEASIBLE"),
            Self::Infeasible => write!(f, "INFEASIBLE"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// One placed visit in the response.
///
/// Only the start of each visit is emitted; continuation cells of
/// multi-cell visits are implicit from the unit's duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    pub patient_name: String,
    pub time_slot: String,
    pub schedulable_id: String,
    #[serde(default)]
    pub pinned: bool,
}

/// The solve response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResponse {
    pub status: SolveStatus,
    #[serde(default)]
    pub slots: Vec<SlotRecord>,
    #[serde(default)]
    pub solve_time_ms: u64,
    /// Human-readable diagnostic; always present for `INFEASIBLE` and
    /// `ERROR`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// The integer objective of the returned schedule; absent for
    /// `INFEASIBLE` and `ERROR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<i64>,
}
