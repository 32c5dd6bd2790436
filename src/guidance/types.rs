//! Core trait for edge guidance functions.

use crate::error::GuidanceError;
use crate::model::{DistanceMatrix, UsageMatrix};

/// Rewrites the edge-weight basis after each local optimum.
///
/// This is the single plug-in point of the engine: every externally
/// evolved heuristic is an implementation of this trait. The engine does
/// not interpret the returned matrix beyond checking that it has the
/// instance's dimension and only finite entries.
///
/// # Contract
///
/// - Pure: the result depends only on the three inputs
/// - The inputs are borrowed immutably and cannot be modified
/// - Must return an `n×n` matrix of finite values
/// - Errors and panics abort the run
///
/// # Examples
///
/// ```
/// use u_gls::guidance::Guidance;
/// use u_gls::model::{DistanceMatrix, UsageMatrix};
/// use u_gls::GuidanceError;
///
/// struct Doubling;
///
/// impl Guidance for Doubling {
///     fn name(&self) -> &str { "doubling" }
///
///     fn update(
///         &self,
///         basis: &DistanceMatrix,
///         _tour: &[usize],
///         _usage: &UsageMatrix,
///     ) -> Result<DistanceMatrix, GuidanceError> {
///         Ok(DistanceMatrix::from_fn(basis.dim(), |i, j| 2.0 * basis.get(i, j)))
///     }
/// }
/// ```
pub trait Guidance: Send + Sync {
    /// Returns a human-readable name used in errors and logs.
    fn name(&self) -> &str;

    /// Produces the replacement edge-weight matrix.
    ///
    /// # Arguments
    /// * `basis` - Current edge weights (see `BasisPolicy` for which matrix)
    /// * `tour` - The most recent local-optimum tour
    /// * `usage` - How often each edge appeared in local optima
    fn update(
        &self,
        basis: &DistanceMatrix,
        tour: &[usize],
        usage: &UsageMatrix,
    ) -> Result<DistanceMatrix, GuidanceError>;
}

impl<G: Guidance + ?Sized> Guidance for &G {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn update(
        &self,
        basis: &DistanceMatrix,
        tour: &[usize],
        usage: &UsageMatrix,
    ) -> Result<DistanceMatrix, GuidanceError> {
        (**self).update(basis, tour, usage)
    }
}

impl<G: Guidance + ?Sized> Guidance for Box<G> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn update(
        &self,
        basis: &DistanceMatrix,
        tour: &[usize],
        usage: &UsageMatrix,
    ) -> Result<DistanceMatrix, GuidanceError> {
        (**self).update(basis, tour, usage)
    }
}

/// Adapts a closure with the guidance signature into a [`Guidance`].
///
/// # Examples
///
/// ```
/// use u_gls::guidance::{FnGuidance, Guidance};
///
/// let g = FnGuidance::new("copy", |basis, _tour, _usage| Ok(basis.clone()));
/// assert_eq!(g.name(), "copy");
/// ```
pub struct FnGuidance<F> {
    name: String,
    f: F,
}

impl<F> FnGuidance<F>
where
    F: Fn(&DistanceMatrix, &[usize], &UsageMatrix) -> Result<DistanceMatrix, GuidanceError>
        + Send
        + Sync,
{
    /// Wraps `f` under the given name.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Guidance for FnGuidance<F>
where
    F: Fn(&DistanceMatrix, &[usize], &UsageMatrix) -> Result<DistanceMatrix, GuidanceError>
        + Send
        + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn update(
        &self,
        basis: &DistanceMatrix,
        tour: &[usize],
        usage: &UsageMatrix,
    ) -> Result<DistanceMatrix, GuidanceError> {
        (self.f)(basis, tour, usage)
    }
}
