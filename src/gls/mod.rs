//! Guided Local Search (GLS) driver.
//!
//! Alternates 2-opt local search on an augmented distance basis with a
//! pluggable guidance step and a double-bridge kick. Acceptance of the
//! incumbent always uses true distances.
//!
//! # Algorithm
//!
//! ```text
//! CONSTRUCT     nearest-neighbor tour, 2-opt on true distances, seed incumbent
//! loop until deadline / iteration cap / cancel:
//!   GUIDE_UPDATE  usage += edges(current); basis <- guidance(basis, current, usage)
//!   PERTURB       double-bridge × perturbation_moves
//!   LOCAL_SEARCH  2-opt on the augmented basis
//!   ACCEPT        replace incumbent on strict true-cost improvement
//! ```
//!
//! # Complexity
//!
//! Candidate lists: O(n² log n) once. Each iteration: O(n²) for the basis
//! update plus the local search, which is near-linear in practice with
//! candidate lists and don't-look bits.
//!
//! # References
//!
//! - Voudouris & Tsang (1999), "Guided local search and its application to
//!   the traveling salesman problem"
//! - Arnold & Sörensen (2019), "Knowledge-guided local search for the
//!   vehicle routing problem"

mod config;
mod runner;

pub use config::GlsConfig;
pub use runner::{GlsResult, GlsRunner};
