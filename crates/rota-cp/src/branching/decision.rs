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

use crate::state::SearchState;
use num_traits::{PrimInt, Signed};
use rota_core::num::constants::Zero;
use rota_model::{index::VisitIndex, model::Model};
use std::iter::FusedIterator;

/// A distinct decision in the search tree: start a specific visit at a
/// specific cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Decision {
    visit: VisitIndex,
    start_cell: usize,
}

impl Decision {
    /// Creates a new decision.
    #[inline(always)]
    pub const fn new(visit: VisitIndex, start_cell: usize) -> Self {
        Self { visit, start_cell }
    }

    #[inline(always)]
    pub const fn visit(&self) -> VisitIndex {
        self.visit
    }

    #[inline(always)]
    pub const fn start_cell(&self) -> usize {
        self.start_cell
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Decision(v: {}, start: {})", self.visit, self.start_cell)
    }
}

/// A pluggable branching strategy.
///
/// At each node the builder selects one unassigned required visit and
/// enumerates its feasible start cells. Enumerating every feasible start
/// of the chosen visit keeps the search complete: any feasible schedule
/// assigns that visit somewhere, so no branch is lost by fixing the
/// variable order.
pub trait DecisionBuilder<T>
where
    T: PrimInt + Signed,
{
    /// The iterator type returned by `next_decision`.
    type DecisionIterator<'a>: Iterator<Item = Decision> + FusedIterator + 'a
    where
        Self: 'a,
        T: 'a;

    /// Returns the name of the decision builder.
    fn name(&self) -> &str;

    /// Returns an iterator over the decisions to try at this node.
    fn next_decision<'a>(
        &'a mut self,
        model: &'a Model,
        state: &'a SearchState<T>,
    ) -> Self::DecisionIterator<'a>;
}

/// Iterator over the feasible start cells of one visit, latest first.
///
/// Descending order is deliberate: the engine's decision stack is LIFO,
/// so pushing latest-first means the earliest feasible start is explored
/// first, which reaches compact low-idle schedules early and tightens the
/// bound for the rest of the search.
#[derive(Debug, Clone)]
pub struct StartCellIter<'a, T> {
    model: &'a Model,
    state: &'a SearchState<T>,
    visit: VisitIndex,
    next_candidate: Option<usize>,
    earliest: usize,
}

impl<'a, T> StartCellIter<'a, T>
where
    T: PrimInt + Signed,
{
    /// Creates an iterator over the feasible starts of `visit`.
    pub fn for_visit(model: &'a Model, state: &'a SearchState<T>, visit: VisitIndex) -> Self {
        let earliest = model.patient_arrival_cell(model.visit_patient(visit));
        let next_candidate = model
            .latest_start(visit)
            .filter(|&latest| latest >= earliest);

        Self {
            model,
            state,
            visit,
            next_candidate,
            earliest,
        }
    }

    /// Creates an exhausted iterator (no visit left to branch on).
    pub fn empty(model: &'a Model, state: &'a SearchState<T>) -> Self {
        Self {
            model,
            state,
            visit: VisitIndex::new(0),
            next_candidate: None,
            earliest: 0,
        }
    }
}

impl<'a, T> Iterator for StartCellIter<'a, T>
where
    T: PrimInt + Signed + Zero,
{
    type Item = Decision;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(candidate) = self.next_candidate {
            self.next_candidate = if candidate > self.earliest {
                Some(candidate - 1)
            } else {
                None
            };

            if self.state.can_place(self.model, self.visit, candidate) {
                return Some(Decision::new(self.visit, candidate));
            }
        }
        None
    }
}

impl<'a, T> FusedIterator for StartCellIter<'a, T> where T: PrimInt + Signed + Zero {}
