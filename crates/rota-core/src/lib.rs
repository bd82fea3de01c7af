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

//! # Rota Core
//!
//! **Shared primitives for the Rota clinic-scheduling workspace.**
//!
//! This crate carries the small, policy-free building blocks the rest of
//! the workspace relies on:
//!
//! * **`math`**: half-open cell spans over the discrete time grid.
//! * **`num`**: integer constant traits and by-value saturating/checked
//!   arithmetic used to keep the solver generic over its time type.
//! * **`utils`**: zero-cost phantom-typed indices that keep patient, unit,
//!   and visit index spaces from mixing.
//!
//! Nothing in this crate knows about patients, visits, or schedules; it is
//! deliberately the bottom of the dependency graph.

pub mod math;
pub mod num;
pub mod utils;
