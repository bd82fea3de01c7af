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

//! # Rota Solver
//!
//! **The facade of the Rota clinic visit scheduler.**
//!
//! * **`solver`**: the portfolio `Solver` — runs one or more exact search
//!   strategies on scoped worker threads against a shared incumbent, with
//!   interrupt, time-limit, and solution-limit monitoring.
//! * **`project`**: the result projector — placed visits back into caller
//!   vocabulary, patients in input order, visits per patient by start.
//! * **`service`**: the solve boundary — `SolveRequest` in,
//!   `SolveResponse` out, with the status and error classification the
//!   boundary promises.
//!
//! One call does everything:
//!
//! ```no_run
//! use rota_model::request::SolveRequest;
//! use rota_solver::service::solve_request;
//!
//! let request: SolveRequest = serde_json::from_str("...").unwrap();
//! let response = solve_request(&request);
//! println!("{:?}: {} slots", response.status, response.slots.len());
//! ```

pub mod project;
pub mod service;
pub mod solver;
