use fare_core::{
    DriverId, FareError, LoyaltyTier, PointOfSale, PricingInputs, ValidationError,
};
use fare_pricing::{compute_price, PricingConfig, PricingEngine};

fn price(inputs: &PricingInputs) -> fare_core::PricingResult {
    compute_price(inputs).expect("valid snapshot should price")
}

#[test]
fn baseline_scenario() {
    let result = price(&PricingInputs::baseline());

    let expected_base = 180.0 / (1.0 - 0.22);
    assert!((result.base_price - expected_base).abs() < 1e-9);
    assert!((result.base_price - 230.77).abs() < 0.01);

    assert_eq!(result.floor_price, result.base_price);
    assert!(result.recommended_price >= result.floor_price);
    assert!(result.recommended_price <= result.ceiling_price);
    assert_eq!(result.adjustments.len(), 8);
}

#[test]
fn near_sellout_near_departure_prices_above_baseline() {
    let baseline = price(&PricingInputs::baseline());
    let crunch = PricingInputs {
        seats_remaining: 9,
        hours_to_departure: 2.0,
        booking_velocity: 5.1,
        ..PricingInputs::baseline()
    };
    let result = price(&crunch);

    assert!(result.recommended_price > baseline.recommended_price);

    // Inventory pressure must be the dominant positive contributor.
    let largest_positive = result
        .adjustments
        .iter()
        .filter(|a| a.impact > 0.0)
        .max_by(|a, b| a.impact.abs().partial_cmp(&b.impact.abs()).unwrap())
        .expect("a sellout snapshot has positive drivers");
    assert_eq!(largest_positive.id, DriverId::InventoryPressure);
}

#[test]
fn invalid_margin_yields_no_result() {
    let inputs = PricingInputs {
        minimum_profit_margin: 1.0,
        ..PricingInputs::baseline()
    };
    match compute_price(&inputs) {
        Err(FareError::Degenerate(ValidationError::MarginOutOfRange(m))) => assert_eq!(m, 1.0),
        other => panic!("expected degenerate margin rejection, got {:?}", other),
    }
}

#[test]
fn inventory_inconsistency_yields_no_result() {
    let inputs = PricingInputs {
        seats_total: 150,
        seats_remaining: 151,
        ..PricingInputs::baseline()
    };
    assert!(matches!(
        compute_price(&inputs),
        Err(FareError::Validation(ValidationError::InventoryInconsistent { .. }))
    ));
}

#[test]
fn repeated_calls_are_bit_identical() {
    let inputs = PricingInputs::baseline();
    let first = price(&inputs);
    let second = price(&inputs);

    assert_eq!(
        first.recommended_price.to_bits(),
        second.recommended_price.to_bits()
    );
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn selling_seats_never_cheapens_the_fare() {
    let mut previous = f64::NEG_INFINITY;
    for remaining in (0..=180).rev() {
        let inputs = PricingInputs {
            seats_remaining: remaining,
            ..PricingInputs::baseline()
        };
        let result = price(&inputs);
        assert!(
            result.recommended_price >= previous - 1e-9,
            "fare dropped from {} to {} at {} seats remaining",
            previous,
            result.recommended_price,
            remaining
        );
        previous = result.recommended_price;
    }
}

#[test]
fn selling_seats_never_cheapens_the_fare_far_from_departure() {
    // Crossing the low-scarcity threshold drops the early-booking stimulus;
    // the fare may step up there but must never step down.
    let mut previous = f64::NEG_INFINITY;
    for remaining in (0..=180).rev() {
        let inputs = PricingInputs {
            seats_remaining: remaining,
            hours_to_departure: 400.0,
            ..PricingInputs::baseline()
        };
        let result = price(&inputs);
        assert!(result.recommended_price >= previous - 1e-9);
        previous = result.recommended_price;
    }
}

#[test]
fn stronger_demand_never_cheapens_the_fare() {
    let mut previous = f64::NEG_INFINITY;
    for step in 0..=40 {
        let inputs = PricingInputs {
            demand_index: step as f64 / 40.0,
            ..PricingInputs::baseline()
        };
        let result = price(&inputs);
        assert!(result.recommended_price >= previous - 1e-9);
        previous = result.recommended_price;
    }
}

#[test]
fn higher_loyalty_never_raises_the_fare() {
    let tiers = [
        LoyaltyTier::None,
        LoyaltyTier::Silver,
        LoyaltyTier::Gold,
        LoyaltyTier::Platinum,
    ];
    let mut previous = f64::INFINITY;
    for tier in tiers {
        let inputs = PricingInputs {
            loyalty_tier: tier,
            ..PricingInputs::baseline()
        };
        let result = price(&inputs);
        assert!(result.recommended_price <= previous + 1e-9);
        previous = result.recommended_price;
    }
}

#[test]
fn margin_guarantee_holds_across_a_grid() {
    for cost in [60.0, 180.0, 420.0] {
        for margin in [0.05, 0.22, 0.6] {
            for remaining in [0, 20, 90, 180] {
                for tier in [LoyaltyTier::None, LoyaltyTier::Platinum] {
                    let inputs = PricingInputs {
                        operating_cost: cost,
                        minimum_profit_margin: margin,
                        seats_remaining: remaining,
                        loyalty_tier: tier,
                        ..PricingInputs::baseline()
                    };
                    let result = price(&inputs);
                    let guaranteed = cost / (1.0 - margin);
                    assert!(result.recommended_price >= guaranteed - 1e-9);
                }
            }
        }
    }
}

#[test]
fn results_round_trip_through_json() {
    let result = price(&PricingInputs::baseline());
    let json = serde_json::to_string(&result).unwrap();
    let back: fare_core::PricingResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);

    // Enum fields travel as their fixed labels.
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["demand_classification"], "High");
    assert_eq!(value["adjustments"][0]["id"], "inventory_pressure");
}

#[test]
fn every_market_and_tier_prices_cleanly() {
    for pos in [
        PointOfSale::NorthAmerica,
        PointOfSale::Europe,
        PointOfSale::LatinAmerica,
        PointOfSale::MiddleEast,
        PointOfSale::AsiaPacific,
    ] {
        for tier in [
            LoyaltyTier::None,
            LoyaltyTier::Silver,
            LoyaltyTier::Gold,
            LoyaltyTier::Platinum,
        ] {
            let inputs = PricingInputs {
                point_of_sale: pos,
                loyalty_tier: tier,
                ..PricingInputs::baseline()
            };
            let result = price(&inputs);
            assert!(result.recommended_price >= result.floor_price);
            assert!(result.recommended_price <= result.ceiling_price);
            assert_eq!(result.adjustments.len(), 8);
        }
    }
}

#[test]
fn last_minute_spike_prices_above_its_anchor() {
    let anchor = PricingInputs::baseline();
    let baseline = price(&anchor);
    let spike = price(&anchor.last_minute_spike());
    assert!(spike.recommended_price > baseline.recommended_price);
}

#[test]
fn competitor_undercut_pulls_the_fare_down() {
    let anchor = PricingInputs::baseline();
    let baseline = price(&anchor);
    let undercut = price(&anchor.competitor_undercut());
    assert!(undercut.recommended_price < baseline.recommended_price);

    let competitive = undercut
        .adjustments
        .iter()
        .find(|a| a.id == DriverId::CompetitivePosition)
        .expect("competitive driver always reports");
    assert!(competitive.impact < 0.0);
}

#[test]
fn demand_surge_pushes_the_fare_up() {
    let anchor = PricingInputs::baseline();
    let baseline = price(&anchor);
    let surge = price(&anchor.demand_surge());
    assert!(surge.recommended_price > baseline.recommended_price);
}

#[test]
fn custom_calibration_flows_through() {
    let engine = PricingEngine::new(PricingConfig {
        ceiling_multiplier: 1.05,
        ..PricingConfig::default()
    });
    let result = engine
        .price(&PricingInputs::baseline())
        .expect("valid snapshot");
    assert_eq!(result.recommended_price, result.ceiling_price);
    assert!((result.ceiling_price - result.base_price * 1.05).abs() < 1e-9);
}
