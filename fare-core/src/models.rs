use serde::{Deserialize, Serialize};

use crate::{FareResult, ValidationError};

/// Market of sale. Closed set so a new region is a compile-checked addition
/// to every lookup that matches on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PointOfSale {
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "Europe")]
    Europe,
    #[serde(rename = "Latin America")]
    LatinAmerica,
    #[serde(rename = "Middle East")]
    MiddleEast,
    #[serde(rename = "Asia Pacific")]
    AsiaPacific,
}

impl PointOfSale {
    pub fn label(&self) -> &'static str {
        match self {
            PointOfSale::NorthAmerica => "North America",
            PointOfSale::Europe => "Europe",
            PointOfSale::LatinAmerica => "Latin America",
            PointOfSale::MiddleEast => "Middle East",
            PointOfSale::AsiaPacific => "Asia Pacific",
        }
    }
}

impl std::fmt::Display for PointOfSale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Customer loyalty tier. The derived ordering is the program rank:
/// None < Silver < Gold < Platinum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoyaltyTier {
    None,
    Silver,
    Gold,
    Platinum,
}

impl LoyaltyTier {
    pub fn label(&self) -> &'static str {
        match self {
            LoyaltyTier::None => "None",
            LoyaltyTier::Silver => "Silver",
            LoyaltyTier::Gold => "Gold",
            LoyaltyTier::Platinum => "Platinum",
        }
    }
}

impl std::fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Stable identifier for each pricing driver. Wire form is the snake_case
/// variant name, so audit consumers can key on it across releases.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DriverId {
    InventoryPressure,
    TimePressure,
    BookingVelocity,
    CompetitivePosition,
    DemandIndex,
    HistoricalLoad,
    PointOfSale,
    LoyaltyTier,
}

impl DriverId {
    /// Every configured driver, in evaluation order.
    pub const ALL: [DriverId; 8] = [
        DriverId::InventoryPressure,
        DriverId::TimePressure,
        DriverId::BookingVelocity,
        DriverId::CompetitivePosition,
        DriverId::DemandIndex,
        DriverId::HistoricalLoad,
        DriverId::PointOfSale,
        DriverId::LoyaltyTier,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DriverId::InventoryPressure => "Inventory Pressure",
            DriverId::TimePressure => "Time Pressure",
            DriverId::BookingVelocity => "Booking Velocity",
            DriverId::CompetitivePosition => "Competitive Position",
            DriverId::DemandIndex => "Demand Index",
            DriverId::HistoricalLoad => "Historical Load Factor",
            DriverId::PointOfSale => "Point of Sale",
            DriverId::LoyaltyTier => "Loyalty Tier",
        }
    }
}

/// Demand regime summarizing input-side signal strength.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DemandClassification {
    Low,
    Moderate,
    High,
    Peak,
}

impl std::fmt::Display for DemandClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DemandClassification::Low => "Low",
            DemandClassification::Moderate => "Moderate",
            DemandClassification::High => "High",
            DemandClassification::Peak => "Peak",
        };
        f.write_str(label)
    }
}

/// Immutable snapshot of the signals a single pricing call sees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingInputs {
    /// Per-seat operating cost, the hard cost floor.
    pub operating_cost: f64,
    /// Required markup over cost, fraction in (0, 1).
    pub minimum_profit_margin: f64,
    pub seats_total: u32,
    pub seats_remaining: u32,
    pub hours_to_departure: f64,
    /// Recent sales rate in seats per hour.
    pub booking_velocity: f64,
    pub competitor_fare: f64,
    /// Aggregate demand-strength signal in [0, 1].
    pub demand_index: f64,
    /// Typical fill rate for comparable departures, in [0, 1].
    pub historical_load_factor: f64,
    pub point_of_sale: PointOfSale,
    pub loyalty_tier: LoyaltyTier,
}

impl PricingInputs {
    /// Reject any out-of-domain field before pricing arithmetic runs. The
    /// whole snapshot is checked here once; the engine assumes validated
    /// values everywhere after this.
    pub fn validate(&self) -> FareResult<()> {
        check_finite("operating_cost", self.operating_cost)?;
        check_finite("minimum_profit_margin", self.minimum_profit_margin)?;
        check_finite("hours_to_departure", self.hours_to_departure)?;
        check_finite("booking_velocity", self.booking_velocity)?;
        check_finite("competitor_fare", self.competitor_fare)?;
        check_finite("demand_index", self.demand_index)?;
        check_finite("historical_load_factor", self.historical_load_factor)?;

        if self.operating_cost <= 0.0 {
            return Err(ValidationError::NonPositiveCost(self.operating_cost).into());
        }
        if self.minimum_profit_margin <= 0.0 || self.minimum_profit_margin >= 1.0 {
            return Err(ValidationError::MarginOutOfRange(self.minimum_profit_margin).into());
        }
        if self.seats_total == 0 {
            return Err(ValidationError::ZeroCapacity.into());
        }
        if self.seats_remaining > self.seats_total {
            return Err(ValidationError::InventoryInconsistent {
                remaining: self.seats_remaining,
                total: self.seats_total,
            }
            .into());
        }
        if self.hours_to_departure <= 0.0 {
            return Err(ValidationError::NonPositiveHorizon(self.hours_to_departure).into());
        }
        if self.booking_velocity < 0.0 {
            return Err(ValidationError::NegativeVelocity(self.booking_velocity).into());
        }
        if self.competitor_fare <= 0.0 {
            return Err(ValidationError::NonPositiveCompetitorFare(self.competitor_fare).into());
        }
        if !(0.0..=1.0).contains(&self.demand_index) {
            return Err(ValidationError::DemandIndexOutOfRange(self.demand_index).into());
        }
        if !(0.0..=1.0).contains(&self.historical_load_factor) {
            return Err(ValidationError::LoadFactorOutOfRange(self.historical_load_factor).into());
        }
        Ok(())
    }

    /// Fraction of capacity already sold, in [0, 1]. Only meaningful on a
    /// validated snapshot (seats_total >= 1).
    pub fn scarcity_ratio(&self) -> f64 {
        1.0 - self.seats_remaining as f64 / self.seats_total as f64
    }

    /// Reference mid-haul snapshot used as the default working example and
    /// as the anchor the stress scenarios below perturb.
    pub fn baseline() -> Self {
        Self {
            operating_cost: 180.0,
            minimum_profit_margin: 0.22,
            seats_total: 180,
            seats_remaining: 64,
            hours_to_departure: 144.0,
            booking_velocity: 3.2,
            competitor_fare: 249.0,
            demand_index: 0.56,
            historical_load_factor: 0.74,
            point_of_sale: PointOfSale::NorthAmerica,
            loyalty_tier: LoyaltyTier::Gold,
        }
    }

    /// Stress preset: inventory drops to the final cluster with little time
    /// left and accelerating sales.
    pub fn last_minute_spike(&self) -> Self {
        Self {
            seats_remaining: ((self.seats_total as f64 * 0.05).round() as u32).max(4),
            hours_to_departure: (self.hours_to_departure / 4.0).max(1.0),
            booking_velocity: self.booking_velocity * 1.6,
            ..self.clone()
        }
    }

    /// Stress preset: a rival publishes a flash sale below our base price.
    /// The margin-grossed floor is derived from this snapshot's own cost
    /// and margin so the perturbation cannot pair with a foreign base.
    pub fn competitor_undercut(&self) -> Self {
        let base_price = self.operating_cost / (1.0 - self.minimum_profit_margin);
        Self {
            competitor_fare: (self.operating_cost + 40.0).max(base_price * 0.75),
            demand_index: (self.demand_index - 0.1).max(0.35),
            ..self.clone()
        }
    }

    /// Stress preset: a city-wide event lifts search volume and
    /// willingness to pay.
    pub fn demand_surge(&self) -> Self {
        Self {
            demand_index: (self.demand_index + 0.2).min(0.95),
            booking_velocity: self.booking_velocity * 1.9,
            historical_load_factor: (self.historical_load_factor + 0.08).min(0.98),
            ..self.clone()
        }
    }
}

fn check_finite(field: &'static str, value: f64) -> FareResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { field, value }.into())
    }
}

/// One driver's contribution to the recommendation, kept for audit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Adjustment {
    pub id: DriverId,
    pub label: String,
    /// Signed weight the driver chose.
    pub factor: f64,
    /// Fraction of the base price this driver shifts the running total by.
    pub impact: f64,
    /// Explanation synthesized from the numbers that produced the factor.
    pub rationale: String,
}

/// Output of one pricing call. Adjustments are in evaluation order and
/// describe the pre-clamp decomposition; when the recommendation is clamped
/// their sum deliberately does not reconcile with the final delta.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingResult {
    pub base_price: f64,
    pub floor_price: f64,
    pub ceiling_price: f64,
    pub recommended_price: f64,
    pub demand_classification: DemandClassification,
    pub adjustments: Vec<Adjustment>,
}
