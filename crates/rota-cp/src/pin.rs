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

//! Pinned visits.
//!
//! `PinnedVisit` is a compact value object fixing one visit to a concrete
//! start cell. Pins are applied beneath the root frame before the first
//! decision, in a deterministic total order, so identical requests walk
//! identical trees.
//!
//! Ordering
//! - Total order: by `start_cell`, then `visit`.

use rota_model::{index::VisitIndex, model::Model};

/// A fixed assignment of a visit to a start cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinnedVisit {
    /// The start cell the visit is fixed to.
    pub start_cell: usize,

    /// The pinned visit.
    pub visit: VisitIndex,
}

impl PinnedVisit {
    #[inline]
    pub fn new(start_cell: usize, visit: VisitIndex) -> Self {
        Self { start_cell, visit }
    }

    /// Collects the model's pins, sorted into application order.
    pub fn collect_sorted(model: &Model) -> Vec<PinnedVisit> {
        let mut pins: Vec<PinnedVisit> = (0..model.num_visits())
            .filter_map(|v| {
                let visit = VisitIndex::new(v);
                model
                    .visit_pinned_start(visit)
                    .get()
                    .map(|start| PinnedVisit::new(start as usize, visit))
            })
            .collect();
        pins.sort();
        pins
    }
}

impl PartialOrd for PinnedVisit {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PinnedVisit {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start_cell
            .cmp(&other.start_cell)
            .then(self.visit.cmp(&other.visit))
    }
}

impl std::fmt::Display for PinnedVisit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PinnedVisit(visit: {}, start_cell: {})",
            self.visit, self.start_cell
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_model::index::{PatientIndex, UnitIndex};
    use rota_model::model::ModelBuilder;

    #[test]
    fn test_collect_sorted_orders_by_start_then_visit() {
        let mut builder = ModelBuilder::new(2, 2, 8);
        builder.pin_visit(PatientIndex::new(1), UnitIndex::new(0), 1);
        builder.pin_visit(PatientIndex::new(0), UnitIndex::new(1), 4);
        builder.pin_visit(PatientIndex::new(0), UnitIndex::new(0), 1);
        let model = builder.build();

        let pins = PinnedVisit::collect_sorted(&model);
        let as_pairs: Vec<(usize, usize)> =
            pins.iter().map(|p| (p.start_cell, p.visit.get())).collect();
        assert_eq!(as_pairs, vec![(1, 0), (1, 2), (4, 1)]);
    }

    #[test]
    fn test_model_without_pins_collects_nothing() {
        let model = ModelBuilder::new(2, 2, 8).build();
        assert!(PinnedVisit::collect_sorted(&model).is_empty());
    }
}
