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

//! # Rota CP
//!
//! **The exact search engine of the Rota clinic visit scheduler.**
//!
//! A depth-first constraint branch-and-bound over (visit, start-cell)
//! decisions. The engine is only the execution machinery: construction of
//! the search tree is delegated to a `DecisionBuilder`, and scoring and
//! bounding to an `ObjectiveEvaluator`.
//!
//! * **`state`**: the incremental occupancy and objective state.
//! * **`trail`** / **`stack`**: the undo log and the frame-structured
//!   decision stack backing depth-first backtracking.
//! * **`branching`**: decision representation and the shipped builders.
//! * **`eval`**: the evaluator contract, the weighted clinic objective,
//!   and the post-hoc solution validator.
//! * **`pin`**: pre-placed visits applied beneath the root.
//! * **`warmstart`**: a greedy earliest-fit seed schedule.
//! * **`bnb`**: the search session itself.
//! * **`tree_search_monitor`**: engine-level observation hooks.

pub mod bnb;
pub mod branching;
pub mod eval;
pub mod pin;
pub mod portfolio;
pub mod result;
pub mod stack;
pub mod state;
pub mod stats;
pub mod trail;
pub mod tree_search_monitor;
pub mod warmstart;
