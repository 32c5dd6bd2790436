//! Edge guidance: the pluggable step between local searches.
//!
//! After every local optimum the engine records which edges it used, hands
//! the current basis, the tour and the usage counts to a [`Guidance`], and
//! folds the returned matrix back into the [`PenaltyState`].
//!
//! # Policies
//!
//! - [`BasisPolicy::Replace`]: the returned matrix is the next augmented basis
//! - [`BasisPolicy::PenalizeTopEdges`]: the most-raised edges get one penalty unit
//! - [`UsagePolicy`]: whether usage counts reset after each local optimum
//!
//! # References
//!
//! - Voudouris, C. & Tsang, E. (1999). "Guided local search and its
//!   application to the traveling salesman problem"
//! - Liu, F. et al. (2024). "Evolution of Heuristics: Towards Efficient
//!   Automatic Algorithm Design Using Large Language Model"

mod builtin;
mod hook;
mod penalty;
mod types;

pub use builtin::{IdentityGuidance, UsageScaledGuidance, UtilityPenaltyGuidance};
pub use hook::{invoke_guidance, MAX_BASIS_WEIGHT};
pub use penalty::{BasisPolicy, PenaltyState, UsagePolicy};
pub use types::{FnGuidance, Guidance};
