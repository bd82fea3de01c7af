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

use criterion::{Criterion, criterion_group, criterion_main};
use rota_cp::{
    bnb::CpSolver,
    branching::input_order::InputOrderBuilder,
    eval::weighted::{CostWeights, WeightedCostEvaluator},
    tree_search_monitor::NoOperationMonitor,
    warmstart::greedy_schedule,
};
use rota_model::{
    index::{PatientIndex, UnitIndex},
    model::{Model, ModelBuilder},
};

/// A clinic-shaped instance: a handful of patients, a handful of units
/// with mixed durations and priorities, staggered arrivals.
fn clinic_model(num_patients: usize, num_units: usize) -> Model {
    let mut builder = ModelBuilder::new(num_units, num_patients, 40);
    for p in 0..num_patients {
        builder.set_patient_arrival_cell(PatientIndex::new(p), (p % 3) * 2);
    }
    for u in 0..num_units {
        let unit = UnitIndex::new(u);
        builder.set_unit_duration_cells(unit, 1 + (u % 2));
        builder.set_unit_priority(unit, (u % 4) as i64);
    }
    builder.build()
}

fn bench_exact_solve(c: &mut Criterion) {
    let model = clinic_model(3, 4);

    c.bench_function("exact_solve_3x4", |b| {
        b.iter(|| {
            let mut solver = CpSolver::<i64>::new();
            let mut builder = InputOrderBuilder;
            let mut evaluator = WeightedCostEvaluator::new(CostWeights::default());
            let mut warm_evaluator = WeightedCostEvaluator::new(CostWeights::default());
            let warm = greedy_schedule(&model, &mut warm_evaluator);
            solver.solve_with_context(
                &model,
                &mut builder,
                &mut evaluator,
                NoOperationMonitor::new(),
                warm.as_ref(),
                None,
            )
        })
    });
}

fn bench_greedy_warm_start(c: &mut Criterion) {
    let model = clinic_model(5, 4);

    c.bench_function("greedy_warm_start_5x4", |b| {
        b.iter(|| {
            let mut evaluator = WeightedCostEvaluator::<i64>::new(CostWeights::default());
            greedy_schedule(&model, &mut evaluator)
        })
    });
}

criterion_group!(benches, bench_exact_solve, bench_greedy_warm_start);
criterion_main!(benches);
