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

//! # Rota Search
//!
//! **Engine-agnostic search infrastructure for the Rota scheduler.**
//!
//! This crate defines the contracts between a search engine (such as the
//! branch-and-bound engine in `rota-cp`) and the machinery around it:
//!
//! * **`monitor`**: the `SearchMonitor` lifecycle trait plus ready-made
//!   time-limit, interrupt, solution-limit, and composite monitors.
//! * **`incumbent`**: a concurrent best-solution holder shared between
//!   portfolio workers.
//! * **`result`**: the `SolverResult` / `TerminationReason` /
//!   `SolverOutcome` vocabulary every engine speaks.
//! * **`stats`**: aggregate statistics across a whole solve.
//! * **`num`**: the `SolverNumeric` trait alias bounding objective types.
//! * **`portfolio`**: the worker contract for running several strategies
//!   against one instance.
//!
//! Nothing here walks a search tree; that lives in the engine crates.

pub mod incumbent;
pub mod monitor;
pub mod num;
pub mod portfolio;
pub mod result;
pub mod stats;
