use fare_core::{FareResult, ValidationError};
use serde::{Deserialize, Serialize};

/// Tunable weights and bands for the pricing drivers. Defaults are the
/// production calibration; callers may deserialize an override from their
/// own config source, the engine itself never touches files or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Hard cap on the recommendation as a multiple of the base price.
    pub ceiling_multiplier: f64,

    /// Sales rate (seats/hour) treated as neutral momentum.
    pub reference_velocity: f64,

    /// Peak premium when the cabin is fully sold out (scarcity 1.0).
    pub scarcity_weight: f64,

    /// Hours at which urgency decays to half strength.
    pub urgency_half_life_hours: f64,
    /// Interaction coefficient between urgency and scarcity. Time pressure
    /// is urgency * scarcity * this, so it never double-counts scarcity
    /// already priced by the inventory driver.
    pub time_coupling: f64,
    /// Departures further out than this qualify for the early-booking
    /// stimulus, provided scarcity is still below `low_scarcity_threshold`.
    pub early_booking_window_hours: f64,
    pub early_booking_discount: f64,
    pub low_scarcity_threshold: f64,

    /// Slope of the momentum factor per unit of velocity ratio above 1.0.
    pub velocity_slope: f64,
    pub velocity_floor: f64,
    pub velocity_cap: f64,

    /// Dead band around the competitor fare, as a fraction of it.
    pub competitor_tolerance: f64,
    /// Fraction of the overshoot (relative to the running price) corrected
    /// when we price above the competitor band.
    pub competitor_correction_slope: f64,
    pub competitor_correction_cap: f64,
    /// Cap on the premium recaptured when we price below the band, so the
    /// recommendation never chases the competitor upward unbounded.
    pub competitor_premium_cap: f64,

    pub demand_weight: f64,

    /// Historical load factor treated as structurally neutral.
    pub load_factor_pivot: f64,
    pub load_factor_slope: f64,
}

impl PricingConfig {
    /// Reject calibrations the engine cannot price under: a ceiling below
    /// the margin floor would invert the clamp bounds, and a non-positive
    /// reference velocity would turn the momentum ratio into NaN.
    pub fn validate(&self) -> FareResult<()> {
        if !self.ceiling_multiplier.is_finite() {
            return Err(ValidationError::NonFinite {
                field: "ceiling_multiplier",
                value: self.ceiling_multiplier,
            }
            .into());
        }
        if self.ceiling_multiplier < 1.0 {
            return Err(ValidationError::CeilingBelowFloor(self.ceiling_multiplier).into());
        }
        if !self.reference_velocity.is_finite() || self.reference_velocity <= 0.0 {
            return Err(
                ValidationError::NonPositiveReferenceVelocity(self.reference_velocity).into(),
            );
        }
        Ok(())
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            ceiling_multiplier: 2.5,
            reference_velocity: 2.0,
            scarcity_weight: 0.45,
            urgency_half_life_hours: 48.0,
            time_coupling: 0.30,
            early_booking_window_hours: 336.0,
            early_booking_discount: 0.04,
            low_scarcity_threshold: 0.35,
            velocity_slope: 0.08,
            velocity_floor: -0.06,
            velocity_cap: 0.18,
            competitor_tolerance: 0.15,
            competitor_correction_slope: 0.5,
            competitor_correction_cap: 0.12,
            competitor_premium_cap: 0.05,
            demand_weight: 0.25,
            load_factor_pivot: 0.65,
            load_factor_slope: 0.20,
        }
    }
}
