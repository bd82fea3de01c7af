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

//! The portfolio worker contract.
//!
//! A portfolio runs one search strategy per worker against the same
//! instance, sharing an incumbent so every worker prunes against the best
//! bound found anywhere. Each worker receives a `PortfolioContext` and
//! returns a `PortfolioWorkerResult`.

use crate::{
    incumbent::SharedIncumbent,
    monitor::search_monitor::SearchMonitor,
    result::{SolverResult, TerminationReason},
};
use num_traits::{PrimInt, Signed};
use rota_model::{model::Model, solution::Solution};

/// Everything a portfolio worker needs for one run.
pub struct PortfolioContext<'a, T>
where
    T: PrimInt + Signed,
{
    pub model: &'a Model,
    pub incumbent: &'a SharedIncumbent<T>,
    pub monitor: &'a mut dyn SearchMonitor<T>,
    /// A warm-start solution to seed the worker's local incumbent with.
    pub warm_start: Option<&'a Solution<T>>,
}

impl<'a, T> PortfolioContext<'a, T>
where
    T: PrimInt + Signed,
{
    #[inline]
    pub fn new(
        model: &'a Model,
        incumbent: &'a SharedIncumbent<T>,
        monitor: &'a mut dyn SearchMonitor<T>,
        warm_start: Option<&'a Solution<T>>,
    ) -> Self {
        Self {
            model,
            incumbent,
            monitor,
            warm_start,
        }
    }
}

/// What one portfolio worker produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioWorkerResult<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    nodes_explored: u64,
    solutions_found: u64,
}

impl<T> PortfolioWorkerResult<T> {
    #[inline]
    pub fn new(
        result: SolverResult<T>,
        termination_reason: TerminationReason,
        nodes_explored: u64,
        solutions_found: u64,
    ) -> Self {
        Self {
            result,
            termination_reason,
            nodes_explored,
            solutions_found,
        }
    }

    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }

    #[inline]
    pub fn solutions_found(&self) -> u64 {
        self.solutions_found
    }
}

/// A search strategy that can run as one worker of a portfolio.
pub trait PortfolioSolver<T>
where
    T: PrimInt + Signed,
{
    /// Runs the strategy to completion (or until the monitor terminates
    /// it) and reports the result.
    fn invoke(&mut self, context: PortfolioContext<'_, T>) -> PortfolioWorkerResult<T>;

    /// Returns the strategy's display name.
    fn name(&self) -> &str;
}
