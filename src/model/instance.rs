//! Problem instance: node coordinates and the symmetric distance matrix.

use super::matrix::DistanceMatrix;
use crate::error::{GlsError, Result};
use rand::Rng;

/// Absolute tolerance when checking a supplied matrix for symmetry.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// A symmetric TSP instance.
///
/// Immutable once built. Coordinates are kept for geometric use (instance
/// generation, plotting by callers); the engine itself only reads the
/// distance matrix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    coords: Vec<(f64, f64)>,
    distances: DistanceMatrix,
}

impl Instance {
    /// Builds an instance with Euclidean distances between `coords`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_gls::model::Instance;
    ///
    /// let inst = Instance::from_coords(vec![(0.0, 0.0), (3.0, 4.0)]).unwrap();
    /// assert_eq!(inst.len(), 2);
    /// assert!((inst.distance(0, 1) - 5.0).abs() < 1e-12);
    /// ```
    pub fn from_coords(coords: Vec<(f64, f64)>) -> Result<Self> {
        if let Some(i) = coords
            .iter()
            .position(|&(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(GlsError::InvalidInstance(format!(
                "coordinate {i} is not finite"
            )));
        }
        let distances = DistanceMatrix::from_fn(coords.len(), |i, j| {
            euclidean(coords[i], coords[j])
        });
        Ok(Self { coords, distances })
    }

    /// Builds an instance from an explicit distance matrix.
    ///
    /// The matrix must be square with the same dimension as `coords`,
    /// finite, non-negative, symmetric and zero on the diagonal. Pairs that
    /// differ within the symmetry tolerance are replaced by their mean, so
    /// the stored matrix is exactly symmetric.
    pub fn from_matrix(coords: Vec<(f64, f64)>, distances: DistanceMatrix) -> Result<Self> {
        let n = distances.dim();
        if coords.len() != n {
            return Err(GlsError::InvalidInstance(format!(
                "{} coordinates for a {n}x{n} distance matrix",
                coords.len()
            )));
        }
        for (i, j, &d) in distances.iter() {
            if !d.is_finite() || d < 0.0 {
                return Err(GlsError::InvalidInstance(format!(
                    "distance ({i}, {j}) = {d} is not a finite non-negative value"
                )));
            }
            if i == j && d != 0.0 {
                return Err(GlsError::InvalidInstance(format!(
                    "diagonal entry ({i}, {i}) = {d} is not zero"
                )));
            }
            if j > i && (d - distances.get(j, i)).abs() > SYMMETRY_TOLERANCE {
                return Err(GlsError::InvalidInstance(format!(
                    "distance ({i}, {j}) differs from ({j}, {i})"
                )));
            }
        }
        let distances =
            DistanceMatrix::from_fn(n, |i, j| 0.5 * (distances.get(i, j) + distances.get(j, i)));
        Ok(Self { coords, distances })
    }

    /// Generates `n` nodes uniformly at random in the unit square.
    pub fn random_uniform<R: Rng>(n: usize, rng: &mut R) -> Self {
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
            .collect();
        let distances = DistanceMatrix::from_fn(n, |i, j| euclidean(coords[i], coords[j]));
        Self { coords, distances }
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Returns `true` if the instance has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Node coordinates.
    pub fn coords(&self) -> &[(f64, f64)] {
        &self.coords
    }

    /// True distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// True distance between `i` and `j`.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances.get(i, j)
    }
}

fn euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}
