//! Per-instance outcomes and aggregate scores.

use crate::model::Instance;

/// Relative excess of `best` over `optimal`, in percent.
///
/// ```text
/// gap = (best / optimal - 1) · 100
/// ```
///
/// # Examples
///
/// ```
/// use u_gls::evaluate::optimality_gap;
///
/// assert!((optimality_gap(105.0, 100.0) - 5.0).abs() < 1e-12);
/// ```
pub fn optimality_gap(best: f64, optimal: f64) -> f64 {
    (best / optimal - 1.0) * 100.0
}

/// A named instance with its known optimal tour cost, if any.
#[derive(Debug, Clone)]
pub struct BenchmarkInstance {
    /// Display name.
    pub name: String,
    /// Instance data.
    pub instance: Instance,
    /// Known optimal cost, used for the gap.
    pub optimal_cost: Option<f64>,
}

impl BenchmarkInstance {
    /// Creates a benchmark entry without a known optimum.
    pub fn new(name: impl Into<String>, instance: Instance) -> Self {
        Self {
            name: name.into(),
            instance,
            optimal_cost: None,
        }
    }

    /// Attaches the known optimal cost.
    pub fn with_optimal_cost(mut self, cost: f64) -> Self {
        self.optimal_cost = Some(cost);
        self
    }
}

/// What happened on one instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvaluationOutcome {
    /// The run finished.
    Solved {
        /// True cost of the best tour.
        cost: f64,
        /// Optimality gap in percent, when the optimum is known.
        gap: Option<f64>,
        /// Completed GLS iterations.
        iterations: usize,
    },
    /// The run aborted; holds the error message.
    Failed(String),
}

impl EvaluationOutcome {
    /// Returns `true` for [`EvaluationOutcome::Solved`].
    pub fn is_solved(&self) -> bool {
        matches!(self, EvaluationOutcome::Solved { .. })
    }
}

/// Outcome for one named instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceReport {
    pub name: String,
    pub outcome: EvaluationOutcome,
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationReport {
    pub instances: Vec<InstanceReport>,
}

impl EvaluationReport {
    /// Number of failed runs.
    pub fn failures(&self) -> usize {
        self.instances
            .iter()
            .filter(|r| !r.outcome.is_solved())
            .count()
    }

    /// Mean optimality gap over all instances.
    ///
    /// `None` if the batch is empty, any run failed, or any instance has no
    /// known optimum. A failed run never contributes a penalty value.
    pub fn mean_gap(&self) -> Option<f64> {
        self.mean_of(|outcome| match outcome {
            EvaluationOutcome::Solved { gap, .. } => *gap,
            EvaluationOutcome::Failed(_) => None,
        })
    }

    /// Mean best cost over all instances; `None` if empty or any run failed.
    pub fn mean_cost(&self) -> Option<f64> {
        self.mean_of(|outcome| match outcome {
            EvaluationOutcome::Solved { cost, .. } => Some(*cost),
            EvaluationOutcome::Failed(_) => None,
        })
    }

    fn mean_of(&self, value: impl Fn(&EvaluationOutcome) -> Option<f64>) -> Option<f64> {
        if self.instances.is_empty() {
            return None;
        }
        let mut sum = 0.0;
        for report in &self.instances {
            sum += value(&report.outcome)?;
        }
        Some(sum / self.instances.len() as f64)
    }
}
