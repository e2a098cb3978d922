//! Leg type.
//!
//! A `Leg` is one resolved segment of an itinerary: a connector trip to or
//! from a hub, or the trunk between two hubs.

use super::{DomainError, LegMode};

/// A resolved leg with its travel mode, distance and duration.
///
/// # Invariants
///
/// - `distance_meters` and `duration_seconds` are finite and non-negative
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    mode: LegMode,
    distance_meters: f64,
    duration_seconds: f64,
}

impl Leg {
    /// Construct a leg, validating distance and duration.
    ///
    /// # Examples
    ///
    /// ```
    /// use stitch_server::domain::{ConnectorMode, Leg, LegMode};
    ///
    /// let leg = Leg::new(ConnectorMode::Walking.into(), 1_200.0, 900.0).unwrap();
    /// assert_eq!(leg.distance_km(), 1.2);
    ///
    /// assert!(Leg::new(LegMode::Trunk, -1.0, 10.0).is_err());
    /// ```
    pub fn new(
        mode: LegMode,
        distance_meters: f64,
        duration_seconds: f64,
    ) -> Result<Self, DomainError> {
        if !distance_meters.is_finite() || distance_meters < 0.0 {
            return Err(DomainError::InvalidLeg(
                "distance must be finite and non-negative",
            ));
        }
        if !duration_seconds.is_finite() || duration_seconds < 0.0 {
            return Err(DomainError::InvalidLeg(
                "duration must be finite and non-negative",
            ));
        }
        Ok(Self {
            mode,
            distance_meters,
            duration_seconds,
        })
    }

    pub fn mode(&self) -> LegMode {
        self.mode
    }

    pub fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }
}
