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

//! # Rota Model
//!
//! **The Core Domain Model for the Rota Clinic Visit Scheduler.**
//!
//! This crate defines the data structures representing one day of clinic
//! scheduling: a discrete time grid, patients with arrival times,
//! schedulable units (care teams or specialties; the solver treats them
//! uniformly), pinned visits, and the solver-facing immutable `Model`.
//! It is the data interchange layer between the solve boundary (JSON
//! documents) and the search engine (`rota-cp`).
//!
//! ## Architecture
//!
//! * **`index`**: Strongly-typed `PatientIndex` / `UnitIndex` /
//!   `VisitIndex` wrappers to prevent logical indexing errors.
//! * **`grid`**: The uniform time grid — label parsing and cell math.
//! * **`time`**: Sentinel-based optional start cells for hot loops.
//! * **`model`**: The immutable `Model` (optimized for search) and the
//!   mutable `ModelBuilder` (optimized for configuration).
//! * **`solution`**: The solver's output format.
//! * **`request`**: The serde documents exchanged at the solve boundary.
//! * **`normalize`**: Request validation and index resolution.
//!
//! ## Design Philosophy
//!
//! 1. **Type Safety**: Index spaces are distinct types; a `PatientIndex`
//!    cannot address a unit.
//! 2. **Memory Layout**: Per-entity data is stored in Structure of Arrays
//!    form (flattened vectors) for cache locality during search.
//! 3. **Fail-Fast**: The normalizer rejects malformed requests with
//!    precise, field-naming errors before a model is ever built.

pub mod grid;
pub mod index;
pub mod model;
pub mod normalize;
pub mod request;
pub mod solution;
pub mod time;
