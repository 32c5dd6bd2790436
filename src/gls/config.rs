//! GLS configuration.

use crate::candidates::DEFAULT_CANDIDATES;
use crate::guidance::{BasisPolicy, UsagePolicy};
use crate::local_search::MovePolicy;

/// Configuration for a Guided Local Search run.
///
/// # Defaults
///
/// ```
/// use u_gls::gls::GlsConfig;
///
/// let config = GlsConfig::default();
/// assert_eq!(config.max_iterations, 1000);
/// assert_eq!(config.perturbation_moves, 1);
/// assert_eq!(config.candidates, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_gls::gls::GlsConfig;
/// use u_gls::guidance::BasisPolicy;
///
/// let config = GlsConfig::default()
///     .with_max_iterations(200)
///     .with_time_limit_ms(5_000)
///     .with_basis_policy(BasisPolicy::PenalizeTopEdges { count: 2 })
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlsConfig {
    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at the top of each iteration; a local search already in
    /// progress runs to completion, so the run may overshoot by one
    /// iteration. `None` disables time-based termination (the default).
    pub time_limit_ms: Option<u64>,

    /// Maximum number of guide/perturb/re-optimize iterations after
    /// construction. `0` returns the construction-phase local optimum.
    pub max_iterations: usize,

    /// Double-bridge moves applied per perturbation.
    pub perturbation_moves: usize,

    /// Candidate-list size `k` (capped at `n - 1`).
    pub candidates: usize,

    /// Move selection policy of the 2-opt search.
    pub move_policy: MovePolicy,

    /// Node the nearest-neighbor builder starts from.
    pub start_node: usize,

    /// Scales λ relative to the average edge length of the first local
    /// optimum. Typical range: 0.1–0.3.
    pub lambda_factor: f64,

    /// How guidance output is folded into the penalties.
    pub basis_policy: BasisPolicy,

    /// When edge usage counts reset.
    pub usage_policy: UsagePolicy,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GlsConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: None,
            max_iterations: 1000,
            perturbation_moves: 1,
            candidates: DEFAULT_CANDIDATES,
            move_policy: MovePolicy::BestImprovement,
            start_node: 0,
            lambda_factor: 0.2,
            basis_policy: BasisPolicy::Replace,
            usage_policy: UsagePolicy::PerLocalOptimum,
            seed: None,
        }
    }
}

impl GlsConfig {
    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the number of double-bridge moves per perturbation.
    pub fn with_perturbation_moves(mut self, moves: usize) -> Self {
        self.perturbation_moves = moves;
        self
    }

    /// Sets the candidate-list size.
    pub fn with_candidates(mut self, k: usize) -> Self {
        self.candidates = k;
        self
    }

    /// Sets the 2-opt move policy.
    pub fn with_move_policy(mut self, policy: MovePolicy) -> Self {
        self.move_policy = policy;
        self
    }

    /// Sets the construction start node.
    pub fn with_start_node(mut self, node: usize) -> Self {
        self.start_node = node;
        self
    }

    /// Sets the λ factor.
    pub fn with_lambda_factor(mut self, factor: f64) -> Self {
        self.lambda_factor = factor;
        self
    }

    /// Sets the basis policy.
    pub fn with_basis_policy(mut self, policy: BasisPolicy) -> Self {
        self.basis_policy = policy;
        self
    }

    /// Sets the usage reset policy.
    pub fn with_usage_policy(mut self, policy: UsagePolicy) -> Self {
        self.usage_policy = policy;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset used for heuristic benchmarking.
    ///
    /// - Time limit: 100s, Iterations: 1000
    /// - One double-bridge move per perturbation
    pub fn benchmark() -> Self {
        Self {
            time_limit_ms: Some(100_000),
            max_iterations: 1000,
            perturbation_moves: 1,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.candidates == 0 {
            return Err("candidates must be at least 1".into());
        }
        if !self.lambda_factor.is_finite() || self.lambda_factor <= 0.0 {
            return Err("lambda_factor must be positive and finite".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        if let BasisPolicy::PenalizeTopEdges { count: 0 } = self.basis_policy {
            return Err("PenalizeTopEdges count must be at least 1".into());
        }
        Ok(())
    }
}
