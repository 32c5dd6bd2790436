//! Ready-made guidance functions.
//!
//! - [`IdentityGuidance`]: leaves the basis untouched (plain iterated local search)
//! - [`UsageScaledGuidance`]: scales tour edges by how often they were used
//! - [`UtilityPenaltyGuidance`]: classical GLS max-utility edge penalization

use super::hook::MAX_BASIS_WEIGHT;
use super::types::Guidance;
use crate::error::GuidanceError;
use crate::model::{DistanceMatrix, UsageMatrix};

/// Closed-tour edges `(tour[i], tour[i+1])`, including last → first.
fn tour_edges(tour: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let n = tour.len();
    (0..n).map(move |i| (tour[i], tour[(i + 1) % n]))
}

/// Returns the basis unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityGuidance;

impl Guidance for IdentityGuidance {
    fn name(&self) -> &str {
        "identity"
    }

    fn update(
        &self,
        basis: &DistanceMatrix,
        _tour: &[usize],
        _usage: &UsageMatrix,
    ) -> Result<DistanceMatrix, GuidanceError> {
        Ok(basis.clone())
    }
}

/// Multiplies every edge of the local optimum by `1 + usage(i, j)`.
///
/// Edges that keep reappearing in local optima grow quickly, pushing the
/// next local search toward unused connections. Scaled weights saturate at
/// [`MAX_BASIS_WEIGHT`], so long runs and cumulative usage stay valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsageScaledGuidance;

impl Guidance for UsageScaledGuidance {
    fn name(&self) -> &str {
        "usage-scaled"
    }

    fn update(
        &self,
        basis: &DistanceMatrix,
        tour: &[usize],
        usage: &UsageMatrix,
    ) -> Result<DistanceMatrix, GuidanceError> {
        let mut out = basis.clone();
        if tour.len() < 2 {
            return Ok(out);
        }
        for (i, j) in tour_edges(tour) {
            let scaled = basis.get(i, j) * (1.0 + usage.get(i, j) as f64);
            out.set_symmetric(i, j, scaled.clamp(-MAX_BASIS_WEIGHT, MAX_BASIS_WEIGHT));
        }
        Ok(out)
    }
}

/// Classical GLS: raise the tour edges of maximal utility.
///
/// ```text
/// util(i, j) = w(i, j) / (1 + usage(i, j))
/// ```
///
/// Every tour edge whose utility is within `1e-12` of the maximum has its
/// weight multiplied by `1 + increment`, saturating at [`MAX_BASIS_WEIGHT`].
///
/// # Reference
///
/// Voudouris, C. & Tsang, E. (1999). "Guided local search and its
/// application to the traveling salesman problem", *European Journal of
/// Operational Research* 113(2), 469-499.
#[derive(Debug, Clone, Copy)]
pub struct UtilityPenaltyGuidance {
    /// Relative weight increase applied to max-utility edges.
    pub increment: f64,
}

impl Default for UtilityPenaltyGuidance {
    fn default() -> Self {
        Self { increment: 0.1 }
    }
}

impl UtilityPenaltyGuidance {
    /// Creates the guidance with a custom relative increment.
    pub fn new(increment: f64) -> Self {
        Self { increment }
    }
}

impl Guidance for UtilityPenaltyGuidance {
    fn name(&self) -> &str {
        "utility-penalty"
    }

    fn update(
        &self,
        basis: &DistanceMatrix,
        tour: &[usize],
        usage: &UsageMatrix,
    ) -> Result<DistanceMatrix, GuidanceError> {
        if !self.increment.is_finite() || self.increment < 0.0 {
            return Err(GuidanceError::failed(
                self.name(),
                format!("increment must be finite and non-negative, got {}", self.increment),
            ));
        }
        let mut out = basis.clone();
        if tour.len() < 2 {
            return Ok(out);
        }

        let utility = |i: usize, j: usize| basis.get(i, j) / (1.0 + usage.get(i, j) as f64);
        let max_util = tour_edges(tour)
            .map(|(i, j)| utility(i, j))
            .fold(f64::NEG_INFINITY, f64::max);

        for (i, j) in tour_edges(tour) {
            if utility(i, j) >= max_util - 1e-12 {
                let raised = basis.get(i, j) * (1.0 + self.increment);
                out.set_symmetric(i, j, raised.clamp(-MAX_BASIS_WEIGHT, MAX_BASIS_WEIGHT));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Instance, SquareMatrix};

    fn square() -> Instance {
        Instance::from_coords(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap()
    }

    #[test]
    fn test_identity_returns_copy() {
        let inst = square();
        let usage = SquareMatrix::filled(4, 3);
        let out = IdentityGuidance
            .update(inst.distances(), &[0, 1, 2, 3], &usage)
            .unwrap();
        assert_eq!(&out, inst.distances());
    }

    #[test]
    fn test_usage_scaled_only_touches_tour_edges() {
        let inst = square();
        let mut usage = SquareMatrix::filled(4, 0);
        usage.set_symmetric(0, 1, 2);
        usage.set_symmetric(3, 0, 1);
        let out = UsageScaledGuidance
            .update(inst.distances(), &[0, 1, 2, 3], &usage)
            .unwrap();
        assert!((out.get(0, 1) - 3.0).abs() < 1e-12);
        assert!((out.get(1, 0) - 3.0).abs() < 1e-12);
        assert!((out.get(0, 3) - 2.0).abs() < 1e-12);
        assert!((out.get(1, 2) - 1.0).abs() < 1e-12);
        // Diagonal is not on the tour.
        assert!((out.get(0, 2) - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_usage_scaled_saturates() {
        let m = DistanceMatrix::from_fn(4, |i, j| if i == j { 0.0 } else { MAX_BASIS_WEIGHT });
        let usage = SquareMatrix::filled(4, u32::MAX);
        let out = UsageScaledGuidance.update(&m, &[0, 1, 2, 3], &usage).unwrap();
        assert_eq!(out.get(0, 1), MAX_BASIS_WEIGHT);
        assert_eq!(out.get(3, 0), MAX_BASIS_WEIGHT);
        assert!(out.as_slice().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_utility_penalty_saturates() {
        let m = DistanceMatrix::from_fn(4, |i, j| if i == j { 0.0 } else { MAX_BASIS_WEIGHT });
        let usage = SquareMatrix::filled(4, 0);
        let out = UtilityPenaltyGuidance::new(3.0)
            .update(&m, &[0, 1, 2, 3], &usage)
            .unwrap();
        assert_eq!(out.get(1, 2), MAX_BASIS_WEIGHT);
    }

    #[test]
    fn test_utility_penalty_raises_max_utility_edge() {
        let m = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 5.0, 2.0],
            vec![1.0, 0.0, 1.0, 5.0],
            vec![5.0, 1.0, 0.0, 1.0],
            vec![2.0, 5.0, 1.0, 0.0],
        ])
        .unwrap();
        let usage = SquareMatrix::filled(4, 0);
        let out = UtilityPenaltyGuidance::new(0.5)
            .update(&m, &[0, 1, 2, 3], &usage)
            .unwrap();
        // Edge (3, 0) has the largest weight on the tour.
        assert!((out.get(3, 0) - 3.0).abs() < 1e-12);
        assert!((out.get(0, 3) - 3.0).abs() < 1e-12);
        assert!((out.get(0, 1) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_utility_penalty_usage_lowers_utility() {
        let m = DistanceMatrix::from_fn(4, |i, j| if i == j { 0.0 } else { 1.0 });
        let mut usage = SquareMatrix::filled(4, 0);
        usage.set_symmetric(0, 1, 4);
        let out = UtilityPenaltyGuidance::new(1.0)
            .update(&m, &[0, 1, 2, 3], &usage)
            .unwrap();
        assert!((out.get(0, 1) - 1.0).abs() < 1e-12);
        assert!((out.get(1, 2) - 2.0).abs() < 1e-12);
        assert!((out.get(3, 0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_utility_penalty_rejects_negative_increment() {
        let inst = square();
        let usage = SquareMatrix::filled(4, 0);
        let err = UtilityPenaltyGuidance::new(-1.0)
            .update(inst.distances(), &[0, 1, 2, 3], &usage)
            .unwrap_err();
        assert!(matches!(err, GuidanceError::Failed { .. }));
    }
}
