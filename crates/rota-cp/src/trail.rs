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

//! A linear undo log with frame markers for efficient backtracking.
//!
//! Each `TrailEntry` records one applied assignment plus the per-patient
//! metadata it displaced (last end, makespan, arrival rank, objective);
//! the occupancy itself is recomputed from the (visit, start) pair when
//! undoing. Frames mark decision levels: one frame per descend, undone in
//! reverse order on backtrack.

use crate::state::SearchState;
use num_traits::{PrimInt, Signed};
use rota_model::{index::VisitIndex, model::Model, time::StartCell};

/// A compact record of a single assignment applied to the search state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TrailEntry<T> {
    visit: VisitIndex,
    start_cell: usize,
    old_last_end: usize,
    old_makespan: usize,
    old_arrival_rank: StartCell<i64>,
    old_objective: T,
}

impl<T> TrailEntry<T>
where
    T: Copy,
{
    /// Returns the visit this entry assigned.
    #[inline]
    pub fn visit(&self) -> VisitIndex {
        self.visit
    }

    /// Returns the assigned start cell.
    #[inline]
    pub fn start_cell(&self) -> usize {
        self.start_cell
    }
}

/// The undo log. Typical usage:
/// 1. `push_frame()` before expanding a node,
/// 2. `apply_assignment(...)` for the decision taken,
/// 3. `backtrack(state, model)` to restore the state to the frame start.
#[derive(Debug, Clone)]
pub struct SearchTrail<T> {
    /// The linear history of all state mutations.
    entries: Vec<TrailEntry<T>>,
    /// `frames[i]` stores the index in `entries` where depth `i` began.
    frames: Vec<usize>,
}

impl<T> Default for SearchTrail<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SearchTrail<T> {
    /// Creates a new, empty trail.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Creates a trail preallocated for the given number of visits.
    #[inline]
    pub fn preallocated(num_visits: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_visits),
            frames: Vec::with_capacity(num_visits + 1),
        }
    }

    /// Ensures the trail can hold a full-depth search without resizing.
    pub fn ensure_capacity(&mut self, num_visits: usize) {
        if self.entries.capacity() < num_visits {
            self.entries.reserve(num_visits - self.entries.capacity());
        }
        if self.frames.capacity() < num_visits + 1 {
            self.frames
                .reserve((num_visits + 1) - self.frames.capacity());
        }
    }

    /// Returns the number of recorded entries.
    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Returns the current depth (number of open frames).
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Marks the start of a new decision level.
    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(self.entries.len());
    }

    /// Clears all entries and frames, keeping allocated capacity.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }
}

impl<T> SearchTrail<T>
where
    T: PrimInt + Signed + Copy + rota_core::num::constants::Zero,
{
    /// Applies an assignment to the state, recording what is needed to
    /// undo it.
    pub fn apply_assignment(
        &mut self,
        state: &mut SearchState<T>,
        model: &Model,
        visit: VisitIndex,
        start_cell: usize,
        new_objective: T,
    ) {
        let patient = model.visit_patient(visit);
        self.entries.push(TrailEntry {
            visit,
            start_cell,
            old_last_end: state.last_end(patient),
            old_makespan: state.makespan(),
            old_arrival_rank: state.arrival_rank(patient),
            old_objective: state.current_objective(),
        });

        state.apply(model, visit, start_cell, new_objective);
    }

    /// Pops the current frame, undoing its assignments in reverse order.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if no frame is open.
    pub fn backtrack(&mut self, state: &mut SearchState<T>, model: &Model) {
        debug_assert!(
            !self.frames.is_empty(),
            "called `SearchTrail::backtrack` with no open frame"
        );

        let Some(frame_start) = self.frames.pop() else {
            return;
        };

        while self.entries.len() > frame_start {
            // The length check above guarantees the pop succeeds.
            let entry = self.entries.pop().unwrap();
            state.undo(
                model,
                entry.visit,
                entry.start_cell,
                entry.old_last_end,
                entry.old_makespan,
                entry.old_arrival_rank,
                entry.old_objective,
            );
        }
    }
}
