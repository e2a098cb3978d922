//! Cost and CO₂ estimation.
//!
//! Both totals are additive over legs: each leg contributes its distance in
//! kilometres times the rate for its mode. Modes without a rate contribute
//! nothing.

use std::collections::HashMap;

use crate::domain::{ConnectorMode, Leg, LegMode};

/// Estimated totals for a sequence of legs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Estimate {
    pub cost_units: f64,
    pub co2_grams: f64,
}

/// Per-mode rate tables.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTables {
    /// Currency units per kilometre.
    pub cost_per_km: HashMap<LegMode, f64>,

    /// Grams of CO₂ per kilometre.
    pub co2_grams_per_km: HashMap<LegMode, f64>,
}

impl RateTables {
    /// Tables with no rates at all: every estimate is zero.
    pub fn empty() -> Self {
        Self {
            cost_per_km: HashMap::new(),
            co2_grams_per_km: HashMap::new(),
        }
    }

    /// Set the rates for one mode.
    pub fn with_rate(mut self, mode: LegMode, cost_per_km: f64, co2_grams_per_km: f64) -> Self {
        self.cost_per_km.insert(mode, cost_per_km);
        self.co2_grams_per_km.insert(mode, co2_grams_per_km);
        self
    }

    fn cost_rate(&self, mode: LegMode) -> f64 {
        self.cost_per_km.get(&mode).copied().unwrap_or(0.0)
    }

    fn co2_rate(&self, mode: LegMode) -> f64 {
        self.co2_grams_per_km.get(&mode).copied().unwrap_or(0.0)
    }
}

impl Default for RateTables {
    /// Ride-hail fares for driving, metro fares for the trunk; walking and
    /// cycling are free and emission-free.
    fn default() -> Self {
        Self::empty()
            .with_rate(ConnectorMode::Walking.into(), 0.0, 0.0)
            .with_rate(ConnectorMode::Bicycling.into(), 0.0, 0.0)
            .with_rate(ConnectorMode::Driving.into(), 28.0, 170.0)
            .with_rate(LegMode::Trunk, 5.0, 30.0)
    }
}

/// Total cost and CO₂ for a sequence of legs.
pub fn estimate(legs: &[Leg], rates: &RateTables) -> Estimate {
    legs.iter().fold(Estimate::default(), |acc, leg| {
        let km = leg.distance_km();
        Estimate {
            cost_units: acc.cost_units + km * rates.cost_rate(leg.mode()),
            co2_grams: acc.co2_grams + km * rates.co2_rate(leg.mode()),
        }
    })
}
