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

/// Aggregate statistics over one whole solve (all portfolio workers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatistics {
    pub solutions_found: u64,
    pub nodes_explored: u64,
    pub used_workers: usize,
    pub solve_duration: std::time::Duration,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solver Statistics:")?;
        writeln!(f, "  Solutions found: {}", self.solutions_found)?;
        writeln!(f, "  Nodes explored:  {}", self.nodes_explored)?;
        writeln!(f, "  Workers used:    {}", self.used_workers)?;
        writeln!(f, "  Solve duration:  {:.2?}", self.solve_duration)?;
        Ok(())
    }
}

/// Builder for `SolverStatistics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverStatisticsBuilder {
    solutions_found: u64,
    nodes_explored: u64,
    used_workers: usize,
    solve_duration: std::time::Duration,
}

impl Default for SolverStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverStatisticsBuilder {
    pub fn new() -> Self {
        Self {
            solutions_found: 0,
            nodes_explored: 0,
            used_workers: 1,
            solve_duration: std::time::Duration::ZERO,
        }
    }

    pub fn solutions_found(mut self, solutions_found: u64) -> Self {
        self.solutions_found = solutions_found;
        self
    }

    pub fn nodes_explored(mut self, nodes_explored: u64) -> Self {
        self.nodes_explored = nodes_explored;
        self
    }

    pub fn used_workers(mut self, used_workers: usize) -> Self {
        self.used_workers = used_workers;
        self
    }

    pub fn solve_duration(mut self, solve_duration: std::time::Duration) -> Self {
        self.solve_duration = solve_duration;
        self
    }

    pub fn build(self) -> SolverStatistics {
        SolverStatistics {
            solutions_found: self.solutions_found,
            nodes_explored: self.nodes_explored,
            used_workers: self.used_workers,
            solve_duration: self.solve_duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let stats = SolverStatisticsBuilder::new().build();
        assert_eq!(stats.solutions_found, 0);
        assert_eq!(stats.nodes_explored, 0);
        assert_eq!(stats.used_workers, 1);
        assert_eq!(stats.solve_duration, std::time::Duration::ZERO);
    }

    #[test]
    fn test_builder_sets_fields() {
        let stats = SolverStatisticsBuilder::new()
            .solutions_found(3)
            .nodes_explored(100)
            .used_workers(2)
            .solve_duration(std::time::Duration::from_millis(12))
            .build();
        assert_eq!(stats.solutions_found, 3);
        assert_eq!(stats.nodes_explored, 100);
        assert_eq!(stats.used_workers, 2);
        assert_eq!(stats.solve_duration, std::time::Duration::from_millis(12));
    }
}
