//! Itinerary types.
//!
//! An `Itinerary` is a complete origin-to-destination trip stitched from a
//! connector leg, a trunk leg between two hubs, and a second connector leg.

use std::fmt;

use super::{DomainError, HubId, Leg};

/// Every stitched itinerary changes vehicle exactly once, at the hubs.
pub const TRANSFER_COUNT: u32 = 1;

/// Display label assigned by rank position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItineraryLabel {
    #[default]
    Recommended,
    Fastest,
    Cheapest,
    LowestCo2,
    FewestTransfers,
}

impl ItineraryLabel {
    /// Labels in rank order.
    pub const POSITIONAL: [ItineraryLabel; 5] = [
        ItineraryLabel::Recommended,
        ItineraryLabel::Fastest,
        ItineraryLabel::Cheapest,
        ItineraryLabel::LowestCo2,
        ItineraryLabel::FewestTransfers,
    ];

    /// Label for a zero-based rank position. Positions past the list
    /// fall back to `Recommended`.
    pub fn for_position(position: usize) -> Self {
        Self::POSITIONAL
            .get(position)
            .copied()
            .unwrap_or(ItineraryLabel::Recommended)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItineraryLabel::Recommended => "Recommended",
            ItineraryLabel::Fastest => "Fastest",
            ItineraryLabel::Cheapest => "Cheapest",
            ItineraryLabel::LowestCo2 => "Lowest CO₂",
            ItineraryLabel::FewestTransfers => "Fewest transfers",
        }
    }
}

impl fmt::Display for ItineraryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A three-leg stitched itinerary.
///
/// # Invariants
///
/// - Exactly three legs: connector, trunk, connector
/// - `total_duration_seconds` is the sum of the leg durations
/// - `reliability_score` is within 0..=1
///
/// Created unscored with the default label; scoring and labeling consume
/// the value and return an updated one.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    id: String,
    legs: [Leg; 3],
    from_hub: HubId,
    to_hub: HubId,
    total_duration_seconds: f64,
    total_cost_units: f64,
    total_co2_grams: f64,
    reliability_score: f64,
    raw_score: f64,
    label: ItineraryLabel,
}

impl Itinerary {
    /// Assemble an unscored itinerary from its legs and estimated totals.
    pub fn new(
        id: impl Into<String>,
        legs: [Leg; 3],
        from_hub: HubId,
        to_hub: HubId,
        total_cost_units: f64,
        total_co2_grams: f64,
        reliability_score: f64,
    ) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&reliability_score) {
            return Err(DomainError::InvalidReliability);
        }

        let total_duration_seconds = legs.iter().map(Leg::duration_seconds).sum();

        Ok(Self {
            id: id.into(),
            legs,
            from_hub,
            to_hub,
            total_duration_seconds,
            total_cost_units,
            total_co2_grams,
            reliability_score,
            raw_score: 0.0,
            label: ItineraryLabel::default(),
        })
    }

    /// Returns this itinerary with its composite score set.
    pub fn with_raw_score(mut self, raw_score: f64) -> Self {
        self.raw_score = raw_score;
        self
    }

    /// Returns this itinerary with its display label set.
    pub fn with_label(mut self, label: ItineraryLabel) -> Self {
        self.label = label;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn legs(&self) -> &[Leg; 3] {
        &self.legs
    }

    /// Hub where the first connector meets the trunk.
    pub fn from_hub(&self) -> &HubId {
        &self.from_hub
    }

    /// Hub where the trunk meets the last connector.
    pub fn to_hub(&self) -> &HubId {
        &self.to_hub
    }

    pub fn total_duration_seconds(&self) -> f64 {
        self.total_duration_seconds
    }

    pub fn total_cost_units(&self) -> f64 {
        self.total_cost_units
    }

    pub fn total_co2_grams(&self) -> f64 {
        self.total_co2_grams
    }

    pub fn total_distance_meters(&self) -> f64 {
        self.legs.iter().map(Leg::distance_meters).sum()
    }

    pub fn transfer_count(&self) -> u32 {
        TRANSFER_COUNT
    }

    pub fn reliability_score(&self) -> f64 {
        self.reliability_score
    }

    pub fn raw_score(&self) -> f64 {
        self.raw_score
    }

    pub fn label(&self) -> ItineraryLabel {
        self.label
    }
}
