//! Invocation boundary between the engine and a [`Guidance`].
//!
//! The callback is untrusted: its errors, panics and malformed matrices
//! are all turned into a [`GuidanceError`] here so the driver can abort the
//! run cleanly.

use super::types::Guidance;
use crate::error::GuidanceError;
use crate::model::{DistanceMatrix, UsageMatrix};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Largest accepted basis weight.
///
/// Any four weights of at most this magnitude sum without overflow, which
/// keeps every 2-opt delta finite.
pub const MAX_BASIS_WEIGHT: f64 = f64::MAX / 4.0;

/// Calls `guidance.update` and validates the returned matrix.
///
/// # Errors
///
/// - [`GuidanceError::Failed`] or any error the callback returns itself
/// - [`GuidanceError::Panicked`] if the callback panics
/// - [`GuidanceError::WrongShape`] if the dimension differs from `basis`
/// - [`GuidanceError::NonFinite`] on the first NaN or infinite entry
/// - [`GuidanceError::OutOfRange`] on the first entry above [`MAX_BASIS_WEIGHT`]
///   in magnitude
pub fn invoke_guidance<G: Guidance + ?Sized>(
    guidance: &G,
    basis: &DistanceMatrix,
    tour: &[usize],
    usage: &UsageMatrix,
) -> Result<DistanceMatrix, GuidanceError> {
    let name = guidance.name();
    let guided = catch_unwind(AssertUnwindSafe(|| guidance.update(basis, tour, usage)))
        .map_err(|payload| GuidanceError::Panicked {
            name: name.to_string(),
            message: panic_message(&*payload),
        })??;

    validate(name, &guided, basis.dim())?;
    Ok(guided)
}

fn validate(name: &str, guided: &DistanceMatrix, expected: usize) -> Result<(), GuidanceError> {
    if guided.dim() != expected {
        return Err(GuidanceError::WrongShape {
            name: name.to_string(),
            expected,
            actual: guided.dim(),
        });
    }
    if let Some((row, col, &value)) = guided.iter().find(|(_, _, v)| !v.is_finite()) {
        return Err(GuidanceError::NonFinite {
            name: name.to_string(),
            row,
            col,
            value,
        });
    }
    if let Some((row, col, &value)) = guided
        .iter()
        .find(|(_, _, v)| v.abs() > MAX_BASIS_WEIGHT)
    {
        return Err(GuidanceError::OutOfRange {
            name: name.to_string(),
            row,
            col,
            value,
            limit: MAX_BASIS_WEIGHT,
        });
    }
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidance::{FnGuidance, IdentityGuidance};
    use crate::model::SquareMatrix;

    fn basis() -> DistanceMatrix {
        DistanceMatrix::from_fn(4, |i, j| (i as f64 - j as f64).abs())
    }

    #[test]
    fn test_valid_output_passes_through() {
        let usage = SquareMatrix::filled(4, 0);
        let out = invoke_guidance(&IdentityGuidance, &basis(), &[0, 1, 2, 3], &usage).unwrap();
        assert_eq!(out, basis());
    }

    #[test]
    fn test_callback_error_propagates() {
        let g = FnGuidance::new("failing", |_: &DistanceMatrix, _: &[usize], _: &UsageMatrix| {
            Err(GuidanceError::failed("failing", "no luck"))
        });
        let usage = SquareMatrix::filled(4, 0);
        let err = invoke_guidance(&g, &basis(), &[0, 1, 2, 3], &usage).unwrap_err();
        assert_eq!(err, GuidanceError::failed("failing", "no luck"));
    }

    #[test]
    fn test_panic_is_caught() {
        let g = FnGuidance::new(
            "panicky",
            |_: &DistanceMatrix, _: &[usize], _: &UsageMatrix| -> Result<DistanceMatrix, GuidanceError> {
                panic!("index out of bounds")
            },
        );
        let usage = SquareMatrix::filled(4, 0);
        let err = invoke_guidance(&g, &basis(), &[0, 1, 2, 3], &usage).unwrap_err();
        match err {
            GuidanceError::Panicked { name, message } => {
                assert_eq!(name, "panicky");
                assert!(message.contains("index out of bounds"));
            }
            other => panic!("expected Panicked, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_shape_rejected() {
        let g = FnGuidance::new("small", |_: &DistanceMatrix, _: &[usize], _: &UsageMatrix| {
            Ok(DistanceMatrix::filled(3, 1.0))
        });
        let usage = SquareMatrix::filled(4, 0);
        let err = invoke_guidance(&g, &basis(), &[0, 1, 2, 3], &usage).unwrap_err();
        assert_eq!(
            err,
            GuidanceError::WrongShape {
                name: "small".into(),
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let g = FnGuidance::new("nan", |b: &DistanceMatrix, _: &[usize], _: &UsageMatrix| {
            let mut out = b.clone();
            out.set(2, 1, f64::NAN);
            Ok(out)
        });
        let usage = SquareMatrix::filled(4, 0);
        let err = invoke_guidance(&g, &basis(), &[0, 1, 2, 3], &usage).unwrap_err();
        assert!(matches!(
            err,
            GuidanceError::NonFinite { row: 2, col: 1, .. }
        ));
    }

    #[test]
    fn test_infinity_rejected() {
        let g = FnGuidance::new("inf", |b: &DistanceMatrix, _: &[usize], _: &UsageMatrix| {
            let mut out = b.clone();
            out.set(0, 3, f64::INFINITY);
            Ok(out)
        });
        let usage = SquareMatrix::filled(4, 0);
        assert!(invoke_guidance(&g, &basis(), &[0, 1, 2, 3], &usage).is_err());
    }

    #[test]
    fn test_huge_weight_rejected() {
        let g = FnGuidance::new("huge", |b: &DistanceMatrix, _: &[usize], _: &UsageMatrix| {
            let mut out = b.clone();
            out.set_symmetric(1, 3, 1e308);
            Ok(out)
        });
        let usage = SquareMatrix::filled(4, 0);
        let err = invoke_guidance(&g, &basis(), &[0, 1, 2, 3], &usage).unwrap_err();
        assert!(matches!(
            err,
            GuidanceError::OutOfRange { row: 1, col: 3, .. }
        ));
    }

    #[test]
    fn test_weight_at_limit_accepted() {
        let g = FnGuidance::new("limit", |b: &DistanceMatrix, _: &[usize], _: &UsageMatrix| {
            let mut out = b.clone();
            out.set_symmetric(0, 2, MAX_BASIS_WEIGHT);
            out.set_symmetric(1, 2, -MAX_BASIS_WEIGHT);
            Ok(out)
        });
        let usage = SquareMatrix::filled(4, 0);
        assert!(invoke_guidance(&g, &basis(), &[0, 1, 2, 3], &usage).is_ok());
    }
}
