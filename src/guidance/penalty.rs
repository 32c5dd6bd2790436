//! Penalty state owned by one run.
//!
//! Holds the edge penalties `P`, the augmented basis `A = D + λ·P` that
//! local search compares moves on, and the edge usage counts handed to the
//! guidance callback.

use super::hook::invoke_guidance;
use super::types::Guidance;
use crate::error::GuidanceError;
use crate::model::{DistanceMatrix, SquareMatrix, UsageMatrix};

/// How a guidance result is folded back into the penalty state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BasisPolicy {
    /// The callback sees the current augmented basis and its output
    /// becomes the next one.
    #[default]
    Replace,
    /// The callback sees the true distances; the `count` edges it raised
    /// most receive one more unit of penalty.
    PenalizeTopEdges {
        /// Edges penalized per update.
        count: usize,
    },
}

/// When edge usage counts are cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UsagePolicy {
    /// Counts only the edges of the most recent local optimum.
    #[default]
    PerLocalOptimum,
    /// Counts accumulate over the whole run.
    Cumulative,
}

/// Penalties, augmented basis and edge usage of one run.
#[derive(Debug, Clone)]
pub struct PenaltyState {
    lambda: f64,
    penalties: DistanceMatrix,
    augmented: DistanceMatrix,
    usage: UsageMatrix,
    basis_policy: BasisPolicy,
    usage_policy: UsagePolicy,
}

impl PenaltyState {
    /// Starts with zero penalties, so the augmented basis equals `distances`.
    pub fn new(
        distances: &DistanceMatrix,
        lambda: f64,
        basis_policy: BasisPolicy,
        usage_policy: UsagePolicy,
    ) -> Self {
        let n = distances.dim();
        Self {
            lambda,
            penalties: SquareMatrix::filled(n, 0.0),
            augmented: distances.clone(),
            usage: SquareMatrix::filled(n, 0),
            basis_policy,
            usage_policy,
        }
    }

    /// Penalty weight λ.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Penalty matrix `P`.
    ///
    /// Under [`BasisPolicy::PenalizeTopEdges`] entries are non-negative unit
    /// counts. Under [`BasisPolicy::Replace`] `P` is derived as `(A - D) / λ`:
    /// it is negative wherever the guidance lowered a weight below its true
    /// distance, and saturates at `±f64::MAX` for weights near
    /// [`MAX_BASIS_WEIGHT`](super::MAX_BASIS_WEIGHT) on small λ.
    pub fn penalties(&self) -> &DistanceMatrix {
        &self.penalties
    }

    /// Augmented basis `A` used for move evaluation.
    pub fn augmented(&self) -> &DistanceMatrix {
        &self.augmented
    }

    /// Edge usage counts.
    pub fn usage(&self) -> &UsageMatrix {
        &self.usage
    }

    /// Counts every edge of `tour` (both orientations) as used once more.
    pub fn record_local_optimum(&mut self, tour: &[usize]) {
        if self.usage_policy == UsagePolicy::PerLocalOptimum {
            self.usage.fill(0);
        }
        let n = tour.len();
        if n < 2 {
            return;
        }
        for i in 0..n {
            let (a, b) = (tour[i], tour[(i + 1) % n]);
            let count = self.usage.get(a, b).saturating_add(1);
            self.usage.set_symmetric(a, b, count);
        }
    }

    /// One GUIDE_UPDATE step: record usage, call the guidance, fold its
    /// result in according to the basis policy.
    ///
    /// On error the state is left with updated usage but an unchanged basis;
    /// the driver aborts the run anyway.
    pub fn guide<G: Guidance + ?Sized>(
        &mut self,
        guidance: &G,
        distances: &DistanceMatrix,
        tour: &[usize],
    ) -> Result<(), GuidanceError> {
        self.record_local_optimum(tour);

        match self.basis_policy {
            BasisPolicy::Replace => {
                let guided = invoke_guidance(guidance, &self.augmented, tour, &self.usage)?;
                self.replace_basis(&guided, distances);
            }
            BasisPolicy::PenalizeTopEdges { count } => {
                let guided = invoke_guidance(guidance, distances, tour, &self.usage)?;
                self.penalize_top_edges(&guided, distances, count);
            }
        }

        tracing::trace!(
            guidance = guidance.name(),
            policy = ?self.basis_policy,
            "basis updated"
        );
        Ok(())
    }

    /// `A = (G + Gᵀ) / 2`, `P = (A - D) / λ` kept finite.
    fn replace_basis(&mut self, guided: &DistanceMatrix, distances: &DistanceMatrix) {
        let n = distances.dim();
        for i in 0..n {
            for j in i..n {
                let a = 0.5 * (guided.get(i, j) + guided.get(j, i));
                self.augmented.set_symmetric(i, j, a);
                let p = (a - distances.get(i, j)) / self.lambda;
                self.penalties
                    .set_symmetric(i, j, p.clamp(-f64::MAX, f64::MAX));
            }
        }
    }

    fn penalize_top_edges(
        &mut self,
        guided: &DistanceMatrix,
        distances: &DistanceMatrix,
        count: usize,
    ) {
        let n = distances.dim();
        let mut raised: Vec<(f64, usize, usize)> = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                let gap = (guided.get(i, j) - distances.get(i, j))
                    .max(guided.get(j, i) - distances.get(j, i));
                if gap > 0.0 {
                    raised.push((gap, i, j));
                }
            }
        }
        // Largest gap first, ties by edge index.
        raised.sort_by(|x, y| y.0.total_cmp(&x.0).then((x.1, x.2).cmp(&(y.1, y.2))));

        for &(_, i, j) in raised.iter().take(count) {
            let p = self.penalties.get(i, j) + 1.0;
            self.penalties.set_symmetric(i, j, p);
            self.augmented
                .set_symmetric(i, j, distances.get(i, j) + self.lambda * p);
        }
    }
}
