use fare_core::{
    Adjustment, DriverId, FareResult, LoyaltyTier, PointOfSale, PricingInputs, PricingResult,
};

use crate::classify::classify_demand;
use crate::config::PricingConfig;

/// Deterministic fare recommendation engine. Stateless apart from its
/// configuration; every call owns its inputs and outputs outright, so
/// concurrent callers need no coordination.
pub struct PricingEngine {
    config: PricingConfig,
}

/// Price a snapshot with the default calibration.
pub fn compute_price(inputs: &PricingInputs) -> FareResult<PricingResult> {
    PricingEngine::default().price(inputs)
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Map one validated snapshot to a bounded recommendation plus the
    /// per-driver decomposition. Validation failures surface before any
    /// arithmetic runs; no partial result is ever produced.
    pub fn price(&self, inputs: &PricingInputs) -> FareResult<PricingResult> {
        self.config.validate()?;
        inputs.validate()?;

        let base_price = inputs.operating_cost / (1.0 - inputs.minimum_profit_margin);

        let inventory = self.inventory_pressure(inputs);
        let time = self.time_pressure(inputs);
        let velocity = self.booking_velocity(inputs);
        // The competitive driver reads the price as adjusted so far, not the
        // final one; downstream drivers stay independent of it.
        let upstream = inventory.impact + time.impact + velocity.impact;
        let competitive = self.competitive_position(inputs, base_price, upstream);
        let demand = self.demand_index(inputs);
        let historical = self.historical_load(inputs);
        let market = self.point_of_sale(inputs);
        let loyalty = self.loyalty_tier(inputs);

        let adjustments = vec![
            inventory,
            time,
            velocity,
            competitive,
            demand,
            historical,
            market,
            loyalty,
        ];
        let total_impact: f64 = adjustments.iter().map(|a| a.impact).sum();

        // Impacts compose additively on the fractional scale so each stays
        // independently interpretable in the audit trail.
        let raw_price = base_price * (1.0 + total_impact);
        let floor_price = base_price;
        let ceiling_price = base_price * self.config.ceiling_multiplier;
        let recommended_price = raw_price.clamp(floor_price, ceiling_price);

        let demand_classification = classify_demand(inputs, &self.config);

        tracing::debug!(
            base_price,
            raw_price,
            recommended_price,
            total_impact,
            classification = %demand_classification,
            "priced snapshot"
        );

        Ok(PricingResult {
            base_price,
            floor_price,
            ceiling_price,
            recommended_price,
            demand_classification,
            adjustments,
        })
    }

    fn adjustment(&self, id: DriverId, factor: f64, rationale: String) -> Adjustment {
        Adjustment {
            id,
            label: id.label().to_string(),
            factor,
            impact: factor,
            rationale,
        }
    }

    /// Convex scarcity premium: the last seats command disproportionately
    /// more than the first ones sold.
    fn inventory_pressure(&self, inputs: &PricingInputs) -> Adjustment {
        let scarcity = inputs.scarcity_ratio();
        let factor = scarcity * scarcity * self.config.scarcity_weight;
        let sold = inputs.seats_total - inputs.seats_remaining;
        let rationale = format!(
            "{} of {} seats sold (scarcity ratio {:.2}); convex inventory pressure adds {:+.1}%",
            sold,
            inputs.seats_total,
            scarcity,
            factor * 100.0
        );
        self.adjustment(DriverId::InventoryPressure, factor, rationale)
    }

    /// Urgency coupled multiplicatively with scarcity, so time pressure
    /// amplifies real shortage instead of re-counting it. A far-out
    /// departure with a mostly empty cabin gets the early-booking stimulus
    /// instead.
    fn time_pressure(&self, inputs: &PricingInputs) -> Adjustment {
        let scarcity = inputs.scarcity_ratio();
        let urgency =
            1.0 / (1.0 + inputs.hours_to_departure / self.config.urgency_half_life_hours);
        let coupled = urgency * scarcity * self.config.time_coupling;

        let early = inputs.hours_to_departure > self.config.early_booking_window_hours
            && scarcity < self.config.low_scarcity_threshold;
        let factor = if early {
            coupled - self.config.early_booking_discount
        } else {
            coupled
        };

        let rationale = if early {
            format!(
                "{:.0}h out with scarcity only {:.2}; early-booking stimulus nets {:+.1}%",
                inputs.hours_to_departure,
                scarcity,
                factor * 100.0
            )
        } else {
            format!(
                "{:.0}h to departure (urgency {:.2}) on scarcity {:.2} adds {:+.1}%",
                inputs.hours_to_departure,
                urgency,
                scarcity,
                factor * 100.0
            )
        };
        self.adjustment(DriverId::TimePressure, factor, rationale)
    }

    fn booking_velocity(&self, inputs: &PricingInputs) -> Adjustment {
        let ratio = inputs.booking_velocity / self.config.reference_velocity;
        let factor = ((ratio - 1.0) * self.config.velocity_slope)
            .clamp(self.config.velocity_floor, self.config.velocity_cap);
        let rationale = format!(
            "selling {:.1} seats/h against a {:.1} seats/h reference ({:.2}x); momentum {:+.1}%",
            inputs.booking_velocity,
            self.config.reference_velocity,
            ratio,
            factor * 100.0
        );
        self.adjustment(DriverId::BookingVelocity, factor, rationale)
    }

    /// Correct toward the competitor band. Overshoot is measured relative
    /// to the running price so the correction can temper, but never
    /// overwhelm, upstream scarcity pressure; the premium side is capped so
    /// the recommendation never simply chases the competitor upward.
    fn competitive_position(
        &self,
        inputs: &PricingInputs,
        base_price: f64,
        upstream_impact: f64,
    ) -> Adjustment {
        let running = base_price * (1.0 + upstream_impact);
        let band_top = inputs.competitor_fare * (1.0 + self.config.competitor_tolerance);
        let band_floor = inputs.competitor_fare * (1.0 - self.config.competitor_tolerance);

        let (factor, rationale) = if running > band_top {
            let overshoot = 1.0 - band_top / running;
            let factor = -(self.config.competitor_correction_slope * overshoot)
                .min(self.config.competitor_correction_cap);
            (
                factor,
                format!(
                    "running fare {:.2} tops the competitor band ceiling {:.2} (fare {:.2}); correcting {:+.1}%",
                    running,
                    band_top,
                    inputs.competitor_fare,
                    factor * 100.0
                ),
            )
        } else if running < band_floor {
            let headroom = band_floor / running - 1.0;
            let factor = (self.config.competitor_correction_slope * headroom)
                .min(self.config.competitor_premium_cap);
            (
                factor,
                format!(
                    "running fare {:.2} trails the competitor band floor {:.2} (fare {:.2}); recapturing {:+.1}%",
                    running,
                    band_floor,
                    inputs.competitor_fare,
                    factor * 100.0
                ),
            )
        } else {
            (
                0.0,
                format!(
                    "running fare {:.2} sits within {:.0}% of competitor {:.2}; no correction",
                    running,
                    self.config.competitor_tolerance * 100.0,
                    inputs.competitor_fare
                ),
            )
        };
        self.adjustment(DriverId::CompetitivePosition, factor, rationale)
    }

    fn demand_index(&self, inputs: &PricingInputs) -> Adjustment {
        let factor = inputs.demand_index * self.config.demand_weight;
        let rationale = format!(
            "demand index {:.2} scales willingness-to-pay by {:+.1}%",
            inputs.demand_index,
            factor * 100.0
        );
        self.adjustment(DriverId::DemandIndex, factor, rationale)
    }

    fn historical_load(&self, inputs: &PricingInputs) -> Adjustment {
        let factor = (inputs.historical_load_factor - self.config.load_factor_pivot)
            * self.config.load_factor_slope;
        let rationale = format!(
            "historical load factor {:.2} against a {:.2} pivot biases the fare {:+.1}%",
            inputs.historical_load_factor,
            self.config.load_factor_pivot,
            factor * 100.0
        );
        self.adjustment(DriverId::HistoricalLoad, factor, rationale)
    }

    fn point_of_sale(&self, inputs: &PricingInputs) -> Adjustment {
        let factor = market_offset(inputs.point_of_sale);
        let rationale = format!(
            "{} market carries a {:+.1}% willingness-to-pay offset",
            inputs.point_of_sale,
            factor * 100.0
        );
        self.adjustment(DriverId::PointOfSale, factor, rationale)
    }

    fn loyalty_tier(&self, inputs: &PricingInputs) -> Adjustment {
        let factor = tier_discount(inputs.loyalty_tier);
        let rationale = format!(
            "{} tier earns a {:+.1}% loyalty concession",
            inputs.loyalty_tier,
            factor * 100.0
        );
        self.adjustment(DriverId::LoyaltyTier, factor, rationale)
    }
}

/// Regional willingness-to-pay offsets. Exhaustive on purpose: adding a
/// market forces a calibration decision here.
fn market_offset(pos: PointOfSale) -> f64 {
    match pos {
        PointOfSale::NorthAmerica => 0.03,
        PointOfSale::Europe => 0.02,
        PointOfSale::LatinAmerica => -0.02,
        PointOfSale::MiddleEast => 0.05,
        PointOfSale::AsiaPacific => 0.04,
    }
}

/// Tier concessions, monotone in program rank.
fn tier_discount(tier: LoyaltyTier) -> f64 {
    match tier {
        LoyaltyTier::None => 0.0,
        LoyaltyTier::Silver => -0.02,
        LoyaltyTier::Gold => -0.04,
        LoyaltyTier::Platinum => -0.07,
    }
}
