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
    branching::decision::{DecisionBuilder, StartCellIter},
    state::SearchState,
};
use num_traits::{PrimInt, Signed};
use rota_core::num::constants::Zero;
use rota_model::model::Model;

/// The default branching strategy: pick the first unassigned required
/// visit in flat (patient × unit) input order and branch over its
/// feasible start cells.
///
/// Deterministic by construction: the visit order is the request order
/// and start cells are explored earliest-first, which is what makes
/// repeated solves byte-identical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InputOrderBuilder;

impl<T> DecisionBuilder<T> for InputOrderBuilder
where
    T: PrimInt + Signed + Zero,
{
    type DecisionIterator<'a>
        = StartCellIter<'a, T>
    where
        T: 'a,
        Self: 'a;

    fn name(&self) -> &str {
        "InputOrderBuilder"
    }

    fn next_decision<'a>(
        &'a mut self,
        model: &'a Model,
        state: &'a SearchState<T>,
    ) -> Self::DecisionIterator<'a> {
        match model.required_visits().find(|&v| !state.is_placed(v)) {
            Some(visit) => StartCellIter::for_visit(model, state, visit),
            None => StartCellIter::empty(model, state),
        }
    }
}
