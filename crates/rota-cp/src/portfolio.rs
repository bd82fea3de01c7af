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

//! Running the branch-and-bound engine as a portfolio worker.

use crate::{
    bnb::CpSolver, branching::decision::DecisionBuilder, eval::evaluator::ObjectiveEvaluator,
    tree_search_monitor::SearchMonitorBridge,
};
use rota_search::{
    num::SolverNumeric,
    portfolio::{PortfolioContext, PortfolioSolver, PortfolioWorkerResult},
};

/// Wires one (decision builder, evaluator) pair into the portfolio
/// contract. Each worker owns its engine; only the incumbent is shared.
#[derive(Debug, Clone)]
pub struct CpPortfolioSolver<T, B, E> {
    solver: CpSolver<T>,
    builder: B,
    evaluator: E,
    name: String,
}

impl<T, B, E> CpPortfolioSolver<T, B, E>
where
    T: SolverNumeric,
    B: DecisionBuilder<T>,
    E: ObjectiveEvaluator<T>,
{
    /// Creates a portfolio worker around a builder and an evaluator.
    pub fn new(builder: B, evaluator: E) -> Self {
        let name = format!("cp({})", builder.name());
        Self {
            solver: CpSolver::new(),
            builder,
            evaluator,
            name,
        }
    }
}

impl<T, B, E> PortfolioSolver<T> for CpPortfolioSolver<T, B, E>
where
    T: SolverNumeric,
    B: DecisionBuilder<T>,
    E: ObjectiveEvaluator<T>,
{
    fn invoke(&mut self, context: PortfolioContext<'_, T>) -> PortfolioWorkerResult<T> {
        let outcome = self.solver.solve_with_context(
            context.model,
            &mut self.builder,
            &mut self.evaluator,
            SearchMonitorBridge::new(context.monitor),
            context.warm_start,
            Some(context.incumbent),
        );
        outcome.into()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::input_order::InputOrderBuilder;
    use crate::eval::weighted::{CostWeights, WeightedCostEvaluator};
    use rota_model::model::ModelBuilder;
    use rota_search::incumbent::SharedIncumbent;
    use rota_search::monitor::search_monitor::DummyMonitor;
    use rota_search::result::SolverResult;

    type IntegerType = i64;

    #[test]
    fn test_worker_solves_and_installs_incumbent() {
        let model = ModelBuilder::new(1, 1, 8).build();
        let incumbent = SharedIncumbent::<IntegerType>::new();
        let mut monitor = DummyMonitor::new();

        let mut worker = CpPortfolioSolver::new(
            InputOrderBuilder,
            WeightedCostEvaluator::<IntegerType>::new(CostWeights::default()),
        );
        let result = worker.invoke(PortfolioContext::new(&model, &incumbent, &mut monitor, None));

        assert!(matches!(result.result(), SolverResult::Optimal(_)));
        assert_eq!(incumbent.upper_bound(), 1010);
        assert!(result.nodes_explored() > 0);
    }

    #[test]
    fn test_worker_name_carries_builder_name() {
        let worker = CpPortfolioSolver::new(
            InputOrderBuilder,
            WeightedCostEvaluator::<IntegerType>::new(CostWeights::default()),
        );
        assert_eq!(worker.name(), "cp(InputOrderBuilder)");
    }
}
