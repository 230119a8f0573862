use fare_core::{DemandClassification, PricingInputs};

use crate::config::PricingConfig;

// Blend weights for the composite signal. Velocity is normalized against
// twice the reference rate so the term saturates instead of dominating.
const DEMAND_SHARE: f64 = 0.45;
const SCARCITY_SHARE: f64 = 0.35;
const VELOCITY_SHARE: f64 = 0.20;

const MODERATE_AT: f64 = 0.30;
const HIGH_AT: f64 = 0.55;
const PEAK_AT: f64 = 0.75;

/// Label the demand regime from the input snapshot alone. This summarizes
/// what the market looks like, not what the bounded price came out to, so
/// it is computed independently of the clamping stage.
pub fn classify_demand(inputs: &PricingInputs, config: &PricingConfig) -> DemandClassification {
    let velocity_ratio = (inputs.booking_velocity / config.reference_velocity).min(2.0) / 2.0;
    let composite = DEMAND_SHARE * inputs.demand_index
        + SCARCITY_SHARE * inputs.scarcity_ratio()
        + VELOCITY_SHARE * velocity_ratio;

    if composite < MODERATE_AT {
        DemandClassification::Low
    } else if composite < HIGH_AT {
        DemandClassification::Moderate
    } else if composite < PEAK_AT {
        DemandClassification::High
    } else {
        DemandClassification::Peak
    }
}
