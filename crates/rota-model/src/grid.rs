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

//! The uniform time grid.
//!
//! One scheduling day is quantized into `H` cells of `W` minutes each,
//! labeled with caller-supplied `H:MM` strings. Every duration and arrival
//! time in the solver is an integer count of cells; this module owns the
//! label ↔ cell mapping and the rounding rule.

use regex::Regex;
use std::collections::HashMap;

/// Minimum number of time slots in a grid.
pub const MIN_SLOTS: usize = 2;

/// Maximum number of time slots in a grid.
pub const MAX_SLOTS: usize = 192;

/// Errors raised while building a `TimeGrid` from labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeGridError {
    /// Fewer than `MIN_SLOTS` labels were supplied.
    TooFewSlots(usize),
    /// More than `MAX_SLOTS` labels were supplied.
    TooManySlots(usize),
    /// A label does not match the `H:MM` clock format.
    BadLabel(String),
    /// The same label appears more than once.
    DuplicateLabel(String),
    /// Labels are not strictly increasing in time.
    NotIncreasing { previous: String, label: String },
    /// The spacing between two consecutive labels differs from the grid width.
    NonUniform {
        expected_minutes: u32,
        found_minutes: u32,
        label: String,
    },
}

impl std::fmt::Display for TimeGridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewSlots(n) => {
                write!(f, "time_slots must contain at least {} labels, got {}", MIN_SLOTS, n)
            }
            Self::TooManySlots(n) => {
                write!(f, "time_slots must contain at most {} labels, got {}", MAX_SLOTS, n)
            }
            Self::BadLabel(label) => {
                write!(f, "time slot '{}' is not a valid H:MM label", label)
            }
            Self::DuplicateLabel(label) => {
                write!(f, "time slot '{}' appears more than once", label)
            }
            Self::NotIncreasing { previous, label } => {
                write!(f, "time slot '{}' does not come after '{}'", label, previous)
            }
            Self::NonUniform {
                expected_minutes,
                found_minutes,
                label,
            } => write!(
                f,
                "time slot '{}' breaks the uniform {}-minute spacing (gap of {} minutes)",
                label, expected_minutes, found_minutes
            ),
        }
    }
}

impl std::error::Error for TimeGridError {}

/// An ordered sequence of equally-spaced labeled cells covering one day.
///
/// The grid is immutable once built. `cell` and `label` are exact
/// inverses for labels contained in the grid.
#[derive(Debug, Clone)]
pub struct TimeGrid {
    labels: Vec<String>,
    cell_width_minutes: u32,
    lookup: HashMap<String, usize>,
}

impl TimeGrid {
    /// Builds a grid from caller-supplied `H:MM` labels.
    ///
    /// The labels must be between `MIN_SLOTS` and `MAX_SLOTS` in number,
    /// strictly increasing, and uniformly spaced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rota_model::grid::TimeGrid;
    ///
    /// let grid = TimeGrid::from_labels(&["8:00".into(), "8:30".into(), "9:00".into()]).unwrap();
    /// assert_eq!(grid.horizon(), 3);
    /// assert_eq!(grid.cell_width_minutes(), 30);
    /// assert_eq!(grid.cell("8:30"), Some(1));
    /// assert_eq!(grid.label(2), "9:00");
    /// ```
    pub fn from_labels(labels: &[String]) -> Result<Self, TimeGridError> {
        if labels.len() < MIN_SLOTS {
            return Err(TimeGridError::TooFewSlots(labels.len()));
        }
        if labels.len() > MAX_SLOTS {
            return Err(TimeGridError::TooManySlots(labels.len()));
        }

        // The unwrap is safe: the pattern is a constant.
        let pattern = Regex::new(r"^([01]?\d|2[0-3]):([0-5]\d)$").unwrap();

        let mut minutes = Vec::with_capacity(labels.len());
        for label in labels {
            let captures = pattern
                .captures(label)
                .ok_or_else(|| TimeGridError::BadLabel(label.clone()))?;
            let hours: u32 = captures[1].parse().unwrap();
            let mins: u32 = captures[2].parse().unwrap();
            minutes.push(hours * 60 + mins);
        }

        let mut lookup = HashMap::with_capacity(labels.len());
        for (index, label) in labels.iter().enumerate() {
            if lookup.insert(label.clone(), index).is_some() {
                return Err(TimeGridError::DuplicateLabel(label.clone()));
            }
        }

        let cell_width_minutes = match minutes[1].checked_sub(minutes[0]) {
            Some(width) if width > 0 => width,
            _ => {
                return Err(TimeGridError::NotIncreasing {
                    previous: labels[0].clone(),
                    label: labels[1].clone(),
                });
            }
        };

        for window in 1..minutes.len() {
            let (prev, next) = (minutes[window - 1], minutes[window]);
            if next <= prev {
                return Err(TimeGridError::NotIncreasing {
                    previous: labels[window - 1].clone(),
                    label: labels[window].clone(),
                });
            }
            let gap = next - prev;
            if gap != cell_width_minutes {
                return Err(TimeGridError::NonUniform {
                    expected_minutes: cell_width_minutes,
                    found_minutes: gap,
                    label: labels[window].clone(),
                });
            }
        }

        Ok(Self {
            labels: labels.to_vec(),
            cell_width_minutes,
            lookup,
        })
    }

    /// Returns the number of cells in the grid (the horizon `H`).
    #[inline]
    pub fn horizon(&self) -> usize {
        self.labels.len()
    }

    /// Returns the uniform cell width `W` in minutes.
    #[inline]
    pub fn cell_width_minutes(&self) -> u32 {
        self.cell_width_minutes
    }

    /// Maps a label to its cell index, or `None` for unknown labels.
    #[inline]
    pub fn cell(&self, label: &str) -> Option<usize> {
        self.lookup.get(label).copied()
    }

    /// Maps a cell index back to its label.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is not in `0..horizon()`.
    #[inline]
    pub fn label(&self, cell: usize) -> &str {
        debug_assert!(
            cell < self.horizon(),
            "called `TimeGrid::label` with cell out of bounds: the horizon is {} but the cell is {}",
            self.horizon(),
            cell
        );

        &self.labels[cell]
    }

    /// Returns all labels in grid order.
    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Converts a duration in minutes into cells, rounding up, minimum 1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use rota_model::grid::TimeGrid;
    ///
    /// let grid = TimeGrid::from_labels(&["8:00".into(), "8:15".into()]).unwrap();
    /// assert_eq!(grid.cells_for_duration(15), 1);
    /// assert_eq!(grid.cells_for_duration(16), 2);
    /// assert_eq!(grid.cells_for_duration(1), 1);
    /// ```
    #[inline]
    pub fn cells_for_duration(&self, duration_minutes: u32) -> usize {
        let cells = duration_minutes.div_ceil(self.cell_width_minutes);
        cells.max(1) as usize
    }
}
