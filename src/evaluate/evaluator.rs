//! Batch runner over a set of benchmark instances.

use super::report::{
    optimality_gap, BenchmarkInstance, EvaluationOutcome, EvaluationReport, InstanceReport,
};
use crate::gls::{GlsConfig, GlsRunner};
use crate::guidance::Guidance;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Configuration for batch evaluation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationConfig {
    /// Per-instance GLS settings. Its `seed` is ignored.
    pub gls: GlsConfig,

    /// Base seed; instance `i` runs with `seed + i`.
    pub seed: u64,

    /// Whether to run instances in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            gls: GlsConfig::benchmark(),
            seed: 0,
            parallel: true,
        }
    }
}

impl EvaluationConfig {
    /// Sets the per-instance GLS configuration.
    pub fn with_gls(mut self, gls: GlsConfig) -> Self {
        self.gls = gls;
        self
    }

    /// Sets the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Runs one guidance over many instances and aggregates the results.
pub struct Evaluator;

impl Evaluator {
    /// Solves every instance and collects the outcomes in input order.
    ///
    /// A failing run is recorded as [`EvaluationOutcome::Failed`] and does
    /// not stop the others.
    pub fn evaluate<G: Guidance + ?Sized>(
        instances: &[BenchmarkInstance],
        guidance: &G,
        config: &EvaluationConfig,
    ) -> EvaluationReport {
        let solve = |(index, bench): (usize, &BenchmarkInstance)| {
            solve_one(index, bench, guidance, config)
        };

        #[cfg(feature = "parallel")]
        let reports: Vec<InstanceReport> = if config.parallel {
            instances.par_iter().enumerate().map(solve).collect()
        } else {
            instances.iter().enumerate().map(solve).collect()
        };

        #[cfg(not(feature = "parallel"))]
        let reports: Vec<InstanceReport> = instances.iter().enumerate().map(solve).collect();

        let report = EvaluationReport { instances: reports };
        tracing::debug!(
            instances = instances.len(),
            failures = report.failures(),
            mean_gap = ?report.mean_gap(),
            "evaluation finished"
        );
        report
    }

    /// Mean optimality gap of `guidance` over `instances`.
    ///
    /// `None` if any run failed or any instance lacks an optimum.
    pub fn score<G: Guidance + ?Sized>(
        instances: &[BenchmarkInstance],
        guidance: &G,
        config: &EvaluationConfig,
    ) -> Option<f64> {
        Self::evaluate(instances, guidance, config).mean_gap()
    }
}

fn solve_one<G: Guidance + ?Sized>(
    index: usize,
    bench: &BenchmarkInstance,
    guidance: &G,
    config: &EvaluationConfig,
) -> InstanceReport {
    let gls = config
        .gls
        .clone()
        .with_seed(config.seed.wrapping_add(index as u64));

    let outcome = match GlsRunner::run(&bench.instance, guidance, &gls) {
        Ok(result) => EvaluationOutcome::Solved {
            cost: result.best_cost,
            gap: bench
                .optimal_cost
                .map(|opt| optimality_gap(result.best_cost, opt)),
            iterations: result.iterations,
        },
        Err(err) => {
            tracing::warn!(instance = %bench.name, error = %err, "instance failed");
            EvaluationOutcome::Failed(err.to_string())
        }
    };

    InstanceReport {
        name: bench.name.clone(),
        outcome,
    }
}
