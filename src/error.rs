use thiserror::Error;

use crate::transform::Role;

#[derive(Debug, Error)]
pub enum FernError {
    #[error("transform table needs exactly 4 transforms, found {found}")]
    TransformCount { found: usize },

    #[error("{role} weight {weight} is outside [0, 1]")]
    InvalidWeight { role: Role, weight: f64 },

    #[error("transform weights sum to {sum}, expected 1.0")]
    WeightSum { sum: f64 },

    #[error("{role} has a non-finite coefficient")]
    NonFiniteCoefficient { role: Role },

    #[error("start point ({x}, {y}) is not finite")]
    NonFiniteStart { x: f64, y: f64 },

    #[error("step {step}: {role} produced non-finite point ({x}, {y})")]
    NumericAnomaly { step: u64, role: Role, x: f64, y: f64 },

    #[error("render failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, FernError>;
