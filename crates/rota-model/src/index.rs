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

use rota_core::utils::index::{TypedIndex, TypedIndexTag};

/// A tag type for patient indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct PatientIndexTag;

impl TypedIndexTag for PatientIndexTag {
    const NAME: &'static str = "PatientIndex";
}

/// A typed index for patients, in request input order.
pub type PatientIndex = TypedIndex<PatientIndexTag>;

/// A tag type for schedulable-unit indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct UnitIndexTag;

impl TypedIndexTag for UnitIndexTag {
    const NAME: &'static str = "UnitIndex";
}

/// A typed index for schedulable units, in request input order.
pub type UnitIndex = TypedIndex<UnitIndexTag>;

/// A tag type for visit indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VisitIndexTag;

impl TypedIndexTag for VisitIndexTag {
    const NAME: &'static str = "VisitIndex";
}

/// A typed index for visits.
///
/// A visit is one (patient, unit) pair; visit indices flatten the pair in
/// row-major patient × unit order (see `Model::visit_index`).
pub type VisitIndex = TypedIndex<VisitIndexTag>;
