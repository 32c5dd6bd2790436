//! Penalty-guided 2-opt local search.
//!
//! Moves are compared on an augmented distance basis (true distance plus
//! weighted penalties) while the reported cost always uses true distances.
//!
//! - [`TourState`]: flat node array plus position index, O(1) neighbor queries
//! - [`optimize`]: candidate-restricted 2-opt with don't-look bits
//! - [`MovePolicy`]: first- or best-improvement per node scan

mod tour;
mod two_opt;

pub use tour::TourState;
pub use two_opt::{optimize, LocalSearchOutcome, LocalSearchStats, MovePolicy};
