//! Insertion planning.
//!
//! Inserting several pages one at a time shifts the position of everything
//! after each insertion point. Applying the requests from the highest
//! destination to the lowest means no insertion moves a position that a
//! later one still depends on, so every destination can be read as a
//! position in the *original* target sequence.
//!
//! The planner works on any page handle type. The `insert` command runs it
//! over lopdf object ids; the tests run it over plain labels.

use std::fmt;
use tracing::{debug, warn};

use crate::error::{PdfToolsError, Result};

/// One source page to place at one position in the target, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionRequest {
    /// Index into the source page sequence.
    pub source_index: usize,
    /// Position in the target page sequence.
    pub destination_index: usize,
}

impl InsertionRequest {
    /// Create a request from zero-based indices.
    pub fn new(source_index: usize, destination_index: usize) -> Self {
        Self {
            source_index,
            destination_index,
        }
    }
}

/// Pair zero-based source pages with zero-based destinations, position by position.
///
/// # Errors
///
/// Returns [`PdfToolsError::MismatchedSelections`] if the lengths differ.
pub fn pair_requests(pages: &[usize], locations: &[usize]) -> Result<Vec<InsertionRequest>> {
    if pages.len() != locations.len() {
        return Err(PdfToolsError::MismatchedSelections {
            pages: pages.len(),
            locations: locations.len(),
        });
    }

    Ok(pages
        .iter()
        .zip(locations)
        .map(|(&source, &destination)| InsertionRequest::new(source, destination))
        .collect())
}

/// A request that points outside the source or the output sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutOfRange {
    /// The source page does not exist.
    Source {
        /// Offending zero-based source index.
        index: usize,
        /// Number of source pages.
        len: usize,
    },
    /// The destination lies beyond the final sequence.
    Destination {
        /// Offending zero-based destination index.
        index: usize,
        /// Length of the final sequence.
        len: usize,
    },
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source { index, len } => {
                write!(f, "source page {} of {len}", index + 1)
            }
            Self::Destination { index, len } => {
                write!(f, "destination {} of {len}", index + 1)
            }
        }
    }
}

/// Requests in the order they must be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionPlan {
    steps: Vec<InsertionRequest>,
    target_len: usize,
}

impl InsertionPlan {
    /// Check every request against the sequence sizes and order them for application.
    ///
    /// A source index must be below `source_len`. A destination must be below
    /// `target_len + requests.len()`, the length of the final sequence.
    ///
    /// Requests are sorted by destination, highest first. The sort is stable,
    /// so requests sharing a destination are applied in request order; each
    /// lands in front of the one applied before it, and the last request for
    /// a position ends up first.
    ///
    /// # Errors
    ///
    /// Returns the first request that is out of range.
    pub fn new(
        requests: &[InsertionRequest],
        source_len: usize,
        target_len: usize,
    ) -> std::result::Result<Self, OutOfRange> {
        let output_len = target_len + requests.len();

        for request in requests {
            if request.source_index >= source_len {
                return Err(OutOfRange::Source {
                    index: request.source_index,
                    len: source_len,
                });
            }
            if request.destination_index >= output_len {
                return Err(OutOfRange::Destination {
                    index: request.destination_index,
                    len: output_len,
                });
            }
        }

        let mut steps = requests.to_vec();
        steps.sort_by(|a, b| b.destination_index.cmp(&a.destination_index));

        debug!(requests = steps.len(), target_len, "planned insertions");

        Ok(Self { steps, target_len })
    }

    /// Requests in application order.
    pub fn steps(&self) -> &[InsertionRequest] {
        &self.steps
    }

    /// Length of the sequence after applying the plan.
    pub fn output_len(&self) -> usize {
        self.target_len + self.steps.len()
    }

    /// Apply the plan, obtaining each inserted item from `fetch`.
    ///
    /// `fetch` receives the source index of each step, in application order.
    /// A destination past the end of the sequence appends.
    pub fn apply_with<T, E, F>(
        &self,
        target: &mut Vec<T>,
        mut fetch: F,
    ) -> std::result::Result<(), E>
    where
        F: FnMut(usize) -> std::result::Result<T, E>,
    {
        for step in &self.steps {
            let item = fetch(step.source_index)?;
            let at = step.destination_index.min(target.len());

            if at != step.destination_index {
                warn!(
                    requested = step.destination_index + 1,
                    appended_at = at + 1,
                    "insertion position past the end, appending"
                );
            }

            debug!(source = step.source_index + 1, at = at + 1, "inserting page");
            target.insert(at, item);
        }

        Ok(())
    }

    /// Apply the plan with items cloned from `source`.
    ///
    /// # Errors
    ///
    /// Fails if `source` is shorter than a planned source index.
    pub fn apply<T: Clone>(&self, target: &mut Vec<T>, source: &[T]) -> Result<()> {
        self.apply_with(target, |index| {
            source.get(index).cloned().ok_or_else(|| {
                PdfToolsError::operation_failed(format!(
                    "source sequence has no item {}",
                    index + 1
                ))
            })
        })
    }
}
