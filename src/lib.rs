//! Guided Local Search engine for the symmetric Traveling Salesman Problem.
//!
//! The engine runs a fixed search skeleton and exposes exactly one plug-in
//! point, a [`Guidance`](guidance::Guidance) function that rewrites the
//! edge-weight basis after every local optimum. Heuristic-design systems
//! score candidate guidances by how close the resulting tours come to
//! known optima.
//!
//! - **Model**: instances, flat `n×n` matrices and the tour cost model.
//! - **Candidates**: per-node k-nearest-neighbor lists.
//! - **Construct**: two-ended nearest-neighbor tour builder.
//! - **Local search**: candidate-restricted 2-opt with don't-look bits on an
//!   augmented basis.
//! - **Guidance**: the callback trait, built-in guidances, penalty state.
//! - **Perturb**: double-bridge kicks.
//! - **GLS**: the search driver tying the above together.
//! - **Evaluate**: batch scoring of a guidance over benchmark instances.
//!
//! # Example
//!
//! ```
//! use u_gls::gls::{GlsConfig, GlsRunner};
//! use u_gls::guidance::UsageScaledGuidance;
//! use u_gls::model::Instance;
//! use u_gls::random::create_rng;
//!
//! let instance = Instance::random_uniform(50, &mut create_rng(42));
//! let config = GlsConfig::default().with_max_iterations(50).with_seed(42);
//! let result = GlsRunner::run(&instance, &UsageScaledGuidance, &config).unwrap();
//! assert!(result.best_cost <= result.initial_cost);
//! ```

pub mod candidates;
pub mod construct;
pub mod error;
pub mod evaluate;
pub mod gls;
pub mod guidance;
pub mod local_search;
pub mod model;
pub mod perturb;
pub mod random;

pub use error::{GlsError, GuidanceError, Result};
