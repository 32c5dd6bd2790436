//! Instance data and the cost model.
//!
//! - [`SquareMatrix`]: flat `n×n` storage for distances, penalties and usage
//! - [`Instance`]: coordinates plus the symmetric true distance matrix
//! - [`tour_cost`]: closed-tour length on true distances

mod cost;
mod instance;
mod matrix;

pub use cost::{average_edge_length, is_permutation, tour_cost};
pub use instance::Instance;
pub use matrix::{DistanceMatrix, SquareMatrix, UsageMatrix};
