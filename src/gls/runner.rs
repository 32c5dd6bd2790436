//! GLS execution loop.

use super::config::GlsConfig;
use crate::candidates::CandidateLists;
use crate::construct::nearest_neighbor_two_end;
use crate::error::{GlsError, Result};
use crate::guidance::{Guidance, PenaltyState};
use crate::local_search::optimize;
use crate::model::{average_edge_length, Instance};
use crate::perturb::perturb;
use crate::random::rng_from;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of a Guided Local Search run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlsResult {
    /// The best tour found.
    pub best: Vec<usize>,

    /// True cost of the best tour.
    pub best_cost: f64,

    /// True cost of the construction-phase local optimum.
    pub initial_cost: f64,

    /// Completed guide/perturb/re-optimize iterations.
    pub iterations: usize,

    /// Iteration that produced the best tour (0 = construction).
    pub best_iteration: usize,

    /// Incumbent cost after construction and after every iteration.
    pub cost_history: Vec<f64>,

    /// Penalty weight λ used for the run.
    pub lambda: f64,

    /// Whether the time limit stopped the run.
    pub timed_out: bool,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Executes Guided Local Search on one instance.
pub struct GlsRunner;

impl GlsRunner {
    /// Runs GLS optimization.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_gls::gls::{GlsConfig, GlsRunner};
    /// use u_gls::guidance::IdentityGuidance;
    /// use u_gls::model::Instance;
    ///
    /// let inst = Instance::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
    /// let config = GlsConfig::default().with_max_iterations(10).with_seed(1);
    /// let result = GlsRunner::run(&inst, &IdentityGuidance, &config).unwrap();
    /// assert!((result.best_cost - 4.0).abs() < 1e-9);
    /// ```
    pub fn run<G: Guidance + ?Sized>(
        instance: &Instance,
        guidance: &G,
        config: &GlsConfig,
    ) -> Result<GlsResult> {
        Self::run_with_cancel(instance, guidance, config, None)
    }

    /// Runs GLS with an optional cancellation token.
    ///
    /// The flag is checked at the top of each iteration, next to the
    /// deadline. A cancelled run still returns the incumbent.
    ///
    /// # Errors
    ///
    /// - [`GlsError::InvalidConfig`] if `config.validate()` fails
    /// - [`GlsError::InvalidStartNode`] if the start node is out of range
    /// - [`GlsError::Guidance`] if the guidance fails on any iteration;
    ///   no partial result is returned
    pub fn run_with_cancel<G: Guidance + ?Sized>(
        instance: &Instance,
        guidance: &G,
        config: &GlsConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GlsResult> {
        config.validate().map_err(GlsError::InvalidConfig)?;

        let started = Instant::now();
        let deadline = config
            .time_limit_ms
            .map(|ms| started + Duration::from_millis(ms));
        let distances = instance.distances();
        let n = instance.len();

        // CONSTRUCT
        let initial = nearest_neighbor_two_end(distances, config.start_node)?;
        if n < 2 {
            return Ok(GlsResult {
                best: initial,
                best_cost: 0.0,
                initial_cost: 0.0,
                iterations: 0,
                best_iteration: 0,
                cost_history: vec![0.0],
                lambda: 0.0,
                timed_out: false,
                cancelled: false,
                elapsed: started.elapsed(),
            });
        }

        let mut rng = rng_from(config.seed);
        let candidates = CandidateLists::build(distances, config.candidates);
        let first = optimize(
            &initial,
            distances,
            distances,
            &candidates,
            config.move_policy,
        );
        let mut current = first.tour;
        let initial_cost = first.cost;

        let mut lambda = config.lambda_factor * average_edge_length(distances, &current);
        if lambda <= 0.0 {
            // All nodes coincide; any positive weight will do.
            lambda = config.lambda_factor;
        }
        let mut penalties =
            PenaltyState::new(distances, lambda, config.basis_policy, config.usage_policy);

        let mut best = current.clone();
        let mut best_cost = initial_cost;
        let mut best_iteration = 0usize;
        let mut cost_history = vec![best_cost];
        let mut iterations = 0usize;
        let mut timed_out = false;
        let mut cancelled = false;

        tracing::debug!(
            n,
            guidance = guidance.name(),
            lambda,
            initial_cost,
            "GLS run started"
        );

        while iterations < config.max_iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                timed_out = true;
                break;
            }

            // GUIDE_UPDATE
            if let Err(err) = penalties.guide(guidance, distances, &current) {
                tracing::warn!(iteration = iterations + 1, error = %err, "GLS run aborted");
                return Err(err.into());
            }

            // PERTURB
            perturb(&mut current, config.perturbation_moves, &mut rng);

            // LOCAL_SEARCH
            let outcome = optimize(
                &current,
                distances,
                penalties.augmented(),
                &candidates,
                config.move_policy,
            );
            current = outcome.tour;
            iterations += 1;

            if outcome.cost < best_cost {
                best.clone_from(&current);
                best_cost = outcome.cost;
                best_iteration = iterations;
                tracing::debug!(iteration = iterations, best_cost, "new incumbent");
            }
            cost_history.push(best_cost);
        }

        let elapsed = started.elapsed();
        tracing::debug!(
            iterations,
            best_cost,
            best_iteration,
            timed_out,
            cancelled,
            elapsed_ms = elapsed.as_millis() as u64,
            "GLS run finished"
        );

        Ok(GlsResult {
            best,
            best_cost,
            initial_cost,
            iterations,
            best_iteration,
            cost_history,
            lambda,
            timed_out,
            cancelled,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GuidanceError;
    use crate::guidance::{
        BasisPolicy, FnGuidance, IdentityGuidance, UsagePolicy, UsageScaledGuidance,
        UtilityPenaltyGuidance,
    };
    use crate::local_search::MovePolicy;
    use crate::model::{is_permutation, tour_cost, DistanceMatrix, UsageMatrix};
    use crate::random::create_rng;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    fn square() -> Instance {
        Instance::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap()
    }

    fn random_instance(n: usize, seed: u64) -> Instance {
        Instance::random_uniform(n, &mut create_rng(seed))
    }

    #[test]
    fn test_gls_square_converges() {
        let config = GlsConfig::default().with_max_iterations(20).with_seed(42);
        let result = GlsRunner::run(&square(), &IdentityGuidance, &config).unwrap();
        assert!(
            (result.best_cost - 4.0).abs() < 1e-9,
            "expected 4.0, got {}",
            result.best_cost
        );
        assert!(is_permutation(&result.best, 4));
    }

    #[test]
    fn test_gls_zero_perturbation_keeps_incumbent() {
        let inst = random_instance(60, 3);
        let seen = Mutex::new(Vec::new());
        let g = FnGuidance::new("recording", |b: &DistanceMatrix, t: &[usize], _: &UsageMatrix| {
            seen.lock().unwrap().push(t.to_vec());
            Ok(b.clone())
        });
        let config = GlsConfig::default()
            .with_max_iterations(30)
            .with_perturbation_moves(0)
            .with_seed(42);
        let result = GlsRunner::run(&inst, &g, &config).unwrap();

        assert_eq!(result.iterations, 30);
        assert_eq!(result.best_iteration, 0, "no iteration should improve");
        assert!(
            result
                .cost_history
                .iter()
                .all(|&c| c == result.initial_cost),
            "cost history should stay at the construction cost: {:?}",
            result.cost_history
        );
        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 30);
        for (i, tour) in seen.iter().enumerate() {
            assert_eq!(tour, &result.best, "iteration {} saw a different tour", i + 1);
        }
    }

    #[test]
    fn test_gls_long_usage_scaled_run_finishes() {
        let config = GlsConfig::default()
            .with_max_iterations(2000)
            .with_time_limit_ms(2000)
            .with_seed(7);
        let result = GlsRunner::run(&square(), &UsageScaledGuidance, &config).unwrap();
        assert!(result.iterations > 0);
        assert!((result.best_cost - 4.0).abs() < 1e-9);
        assert!(is_permutation(&result.best, 4));
    }

    #[test]
    fn test_gls_cumulative_usage_scaled_stays_finite() {
        let inst = random_instance(6, 1);
        let config = GlsConfig::default()
            .with_usage_policy(UsagePolicy::Cumulative)
            .with_seed(1);
        let result = GlsRunner::run(&inst, &UsageScaledGuidance, &config).unwrap();
        assert_eq!(result.iterations, config.max_iterations);
        assert!(result.best_cost.is_finite());
        assert!(is_permutation(&result.best, 6));
    }

    #[test]
    fn test_gls_zero_iterations_returns_construction() {
        let inst = random_instance(50, 11);
        let calls = AtomicUsize::new(0);
        let g = FnGuidance::new("counting", |b: &DistanceMatrix, _: &[usize], _: &UsageMatrix| {
            calls.fetch_add(1, Ordering::Relaxed);
            Ok(b.clone())
        });
        let config = GlsConfig::default().with_max_iterations(0).with_seed(1);
        let result = GlsRunner::run(&inst, &g, &config).unwrap();

        let initial = nearest_neighbor_two_end(inst.distances(), 0).unwrap();
        let cand = CandidateLists::build(inst.distances(), 100);
        let expected = optimize(
            &initial,
            inst.distances(),
            inst.distances(),
            &cand,
            MovePolicy::BestImprovement,
        );
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best, expected.tour);
        assert_eq!(result.best_cost, expected.cost);
        assert_eq!(result.cost_history, vec![expected.cost]);
        assert_eq!(calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_gls_guidance_failure_aborts() {
        let inst = random_instance(30, 5);
        let calls = AtomicUsize::new(0);
        let g = FnGuidance::new("fails-third", |b: &DistanceMatrix, _: &[usize], _: &UsageMatrix| {
            if calls.fetch_add(1, Ordering::Relaxed) == 2 {
                Err(GuidanceError::failed("fails-third", "gave up"))
            } else {
                Ok(b.clone())
            }
        });
        let config = GlsConfig::default().with_max_iterations(10).with_seed(2);
        let err = GlsRunner::run(&inst, &g, &config).unwrap_err();
        assert_eq!(
            err,
            GlsError::Guidance(GuidanceError::failed("fails-third", "gave up"))
        );
        assert_eq!(calls.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_gls_guidance_wrong_shape_aborts() {
        let inst = random_instance(12, 5);
        let g = FnGuidance::new("tiny", |_: &DistanceMatrix, _: &[usize], _: &UsageMatrix| {
            Ok(DistanceMatrix::filled(2, 1.0))
        });
        let config = GlsConfig::default().with_max_iterations(5).with_seed(2);
        let err = GlsRunner::run(&inst, &g, &config).unwrap_err();
        assert!(matches!(
            err,
            GlsError::Guidance(GuidanceError::WrongShape { expected: 12, actual: 2, .. })
        ));
    }

    #[test]
    fn test_gls_cancellation() {
        let inst = random_instance(40, 8);
        let config = GlsConfig::default().with_seed(42);
        // Set before running so cancellation is deterministic.
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            GlsRunner::run_with_cancel(&inst, &IdentityGuidance, &config, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
        assert!(is_permutation(&result.best, 40));
    }

    #[test]
    fn test_gls_time_limit() {
        let inst = random_instance(200, 4);
        let config = GlsConfig::default()
            .with_max_iterations(usize::MAX)
            .with_time_limit_ms(100)
            .with_seed(42);
        let result = GlsRunner::run(&inst, &IdentityGuidance, &config).unwrap();
        assert!(result.timed_out);
        assert!(result.iterations > 0);
    }

    #[test]
    fn test_gls_reproducible_with_seed() {
        let inst = random_instance(80, 13);
        let config = GlsConfig::default().with_max_iterations(40).with_seed(99);
        let a = GlsRunner::run(&inst, &UsageScaledGuidance, &config).unwrap();
        let b = GlsRunner::run(&inst, &UsageScaledGuidance, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.cost_history, b.cost_history);
    }

    #[test]
    fn test_gls_cost_history_non_increasing() {
        let inst = random_instance(100, 21);
        let config = GlsConfig::default()
            .with_max_iterations(50)
            .with_usage_policy(UsagePolicy::Cumulative)
            .with_seed(42);
        let result = GlsRunner::run(&inst, &UsageScaledGuidance, &config).unwrap();
        assert_eq!(result.cost_history.len(), result.iterations + 1);
        for w in result.cost_history.windows(2) {
            assert!(w[1] <= w[0], "history increased: {} -> {}", w[0], w[1]);
        }
        assert_eq!(*result.cost_history.last().unwrap(), result.best_cost);
    }

    #[test]
    fn test_gls_penalize_top_edges_improves() {
        let inst = random_instance(120, 17);
        let config = GlsConfig::default()
            .with_max_iterations(100)
            .with_candidates(10)
            .with_basis_policy(BasisPolicy::PenalizeTopEdges { count: 1 })
            .with_seed(42);
        let result = GlsRunner::run(&inst, &UtilityPenaltyGuidance::default(), &config).unwrap();
        assert!(result.best_cost <= result.initial_cost);
        assert!(is_permutation(&result.best, 120));
        assert!((tour_cost(inst.distances(), &result.best) - result.best_cost).abs() < 1e-9);
    }

    #[test]
    fn test_gls_best_matches_reported_cost() {
        let inst = random_instance(70, 6);
        for policy in [MovePolicy::FirstImprovement, MovePolicy::BestImprovement] {
            let config = GlsConfig::default()
                .with_max_iterations(25)
                .with_move_policy(policy)
                .with_seed(5);
            let result = GlsRunner::run(&inst, &UsageScaledGuidance, &config).unwrap();
            assert!((tour_cost(inst.distances(), &result.best) - result.best_cost).abs() < 1e-9);
            assert!(result.lambda > 0.0);
        }
    }

    #[test]
    fn test_gls_degenerate_instances() {
        let empty = Instance::from_coords(vec![]).unwrap();
        let result = GlsRunner::run(&empty, &IdentityGuidance, &GlsConfig::default()).unwrap();
        assert!(result.best.is_empty());
        assert_eq!(result.best_cost, 0.0);

        let single = Instance::from_coords(vec![(3.0, 4.0)]).unwrap();
        let result = GlsRunner::run(&single, &IdentityGuidance, &GlsConfig::default()).unwrap();
        assert_eq!(result.best, vec![0]);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_gls_invalid_inputs() {
        let inst = square();
        let err = GlsRunner::run(
            &inst,
            &IdentityGuidance,
            &GlsConfig::default().with_candidates(0),
        )
        .unwrap_err();
        assert!(matches!(err, GlsError::InvalidConfig(_)));

        let err = GlsRunner::run(
            &inst,
            &IdentityGuidance,
            &GlsConfig::default().with_start_node(9),
        )
        .unwrap_err();
        assert_eq!(err, GlsError::InvalidStartNode { start: 9, n: 4 });
    }

    #[test]
    fn test_gls_accepts_trait_object() {
        let guidance: Box<dyn Guidance> = Box::new(UsageScaledGuidance);
        let config = GlsConfig::default().with_max_iterations(5).with_seed(3);
        let result = GlsRunner::run(&square(), guidance.as_ref(), &config).unwrap();
        assert!((result.best_cost - 4.0).abs() < 1e-9);
    }
}
