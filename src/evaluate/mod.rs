//! Batch evaluation of a guidance over benchmark instances.
//!
//! Each instance is solved independently with its own seed; the report
//! averages optimality gaps. Any failed run voids the aggregate score.

mod evaluator;
mod report;

pub use evaluator::{EvaluationConfig, Evaluator};
pub use report::{
    optimality_gap, BenchmarkInstance, EvaluationOutcome, EvaluationReport, InstanceReport,
};
