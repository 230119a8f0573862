pub mod models;

pub use models::{
    Adjustment, DemandClassification, DriverId, LoyaltyTier, PointOfSale, PricingInputs,
    PricingResult,
};

/// A single out-of-domain input field, reported before any pricing runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("operating cost must be positive, got {0}")]
    NonPositiveCost(f64),
    #[error("minimum profit margin must lie strictly inside (0, 1), got {0}")]
    MarginOutOfRange(f64),
    #[error("seat capacity must be at least 1")]
    ZeroCapacity,
    #[error("{remaining} seats remaining exceeds capacity of {total}")]
    InventoryInconsistent { remaining: u32, total: u32 },
    #[error("hours to departure must be positive, got {0}")]
    NonPositiveHorizon(f64),
    #[error("booking velocity must be non-negative, got {0}")]
    NegativeVelocity(f64),
    #[error("competitor fare must be positive, got {0}")]
    NonPositiveCompetitorFare(f64),
    #[error("demand index must lie in [0, 1], got {0}")]
    DemandIndexOutOfRange(f64),
    #[error("historical load factor must lie in [0, 1], got {0}")]
    LoadFactorOutOfRange(f64),
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("ceiling multiplier must be at least 1.0, got {0}")]
    CeilingBelowFloor(f64),
    #[error("reference velocity must be positive, got {0}")]
    NonPositiveReferenceVelocity(f64),
}

impl ValidationError {
    /// True when the violation would force a division by zero or a
    /// non-finite value somewhere in the computation, rather than merely
    /// being out of business range.
    pub fn is_degenerate(&self) -> bool {
        match self {
            ValidationError::MarginOutOfRange(m) => *m >= 1.0,
            ValidationError::ZeroCapacity => true,
            ValidationError::NonFinite { .. } => true,
            // Divides booking velocity; zero velocity over zero reference
            // would reach the drivers as NaN.
            ValidationError::NonPositiveReferenceVelocity(_) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FareError {
    #[error("validation failed: {0}")]
    Validation(ValidationError),
    #[error("degenerate arithmetic rejected: {0}")]
    Degenerate(ValidationError),
}

impl From<ValidationError> for FareError {
    fn from(err: ValidationError) -> Self {
        if err.is_degenerate() {
            FareError::Degenerate(err)
        } else {
            FareError::Validation(err)
        }
    }
}

pub type FareResult<T> = Result<T, FareError>;
