// src/error.rs

use thiserror::Error;

/// Errors raised by the policy, simulation and evaluation engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InventoryError {
    /// A parameter is outside its valid domain. Raised before any state is touched.
    #[error("invalid parameter: {0}")]
    Domain(String),

    /// Service level asked for over a run with no realized demand.
    #[error("service level is undefined: total realized demand is zero")]
    DivideByZero,

    /// The optional demand forecaster could not train or predict.
    #[error("forecaster unavailable: {0}")]
    CollaboratorUnavailable(String),
}

pub type Result<T, E = InventoryError> = std::result::Result<T, E>;

/// Returns `Err(InventoryError::Domain(..))` if `$cond` is false.
#[macro_export]
macro_rules! ensure_domain {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::error::InventoryError::Domain(format!($($msg)*)));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positive(x: f64) -> Result<f64> {
        ensure_domain!(x > 0.0, "x must be positive, got {x}");
        Ok(x)
    }

    #[test]
    fn ensure_domain_short_circuits() {
        assert_eq!(positive(1.5), Ok(1.5));
        assert_eq!(
            positive(-1.0),
            Err(InventoryError::Domain("x must be positive, got -1".into()))
        );
    }

    #[test]
    fn messages_render() {
        assert_eq!(
            InventoryError::DivideByZero.to_string(),
            "service level is undefined: total realized demand is zero"
        );
        assert_eq!(
            InventoryError::CollaboratorUnavailable("too short".into()).to_string(),
            "forecaster unavailable: too short"
        );
    }
}
