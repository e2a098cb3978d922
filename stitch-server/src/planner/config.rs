//! Configuration for the itinerary planner.
//!
//! `PlannerConfig` holds server-wide settings; `PlanOptions` holds the
//! per-request knobs a caller may change.

use std::time::Duration;

use crate::domain::{ConnectorMode, Priority};

use super::estimate::RateTables;
use super::plan::PlanError;

/// Server-wide planner settings.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Maximum leg resolutions in flight per plan.
    pub max_concurrent: usize,

    /// Timeout for a single leg resolution (seconds).
    /// A leg that takes longer is treated as unavailable.
    pub leg_timeout_secs: u64,

    /// Reliability score given to every stitched itinerary.
    pub default_reliability: f64,

    /// Per-mode cost and emission rates.
    pub rates: RateTables,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        max_concurrent: usize,
        leg_timeout_secs: u64,
        default_reliability: f64,
        rates: RateTables,
    ) -> Self {
        Self {
            max_concurrent,
            leg_timeout_secs,
            default_reliability,
            rates,
        }
    }

    /// Returns the leg timeout as a Duration.
    pub fn leg_timeout(&self) -> Duration {
        Duration::from_secs(self.leg_timeout_secs)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 8,
            leg_timeout_secs: 10,
            default_reliability: 0.8,
            rates: RateTables::default(),
        }
    }
}

/// Per-request planning options.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOptions {
    /// Number of nearest hubs considered on each side.
    pub hub_fanout: usize,

    /// Connector modes tried for both the first and the last leg.
    pub connector_modes: Vec<ConnectorMode>,

    /// Dimension that receives the scoring bonus.
    pub priority: Priority,

    /// Maximum number of itineraries returned.
    pub top_k: usize,
}

impl PlanOptions {
    pub fn with_hub_fanout(mut self, hub_fanout: usize) -> Self {
        self.hub_fanout = hub_fanout;
        self
    }

    /// Set the connector modes. Duplicates are dropped, keeping first occurrence.
    pub fn with_connector_modes(mut self, modes: impl IntoIterator<Item = ConnectorMode>) -> Self {
        let mut unique = Vec::new();
        for mode in modes {
            if !unique.contains(&mode) {
                unique.push(mode);
            }
        }
        self.connector_modes = unique;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Validate the options before any external call is made.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.top_k == 0 {
            return Err(PlanError::InvalidOptions("top_k must be at least 1".to_string()));
        }
        if self.hub_fanout == 0 {
            return Err(PlanError::InvalidOptions(
                "hub_fanout must be at least 1".to_string(),
            ));
        }
        if self.connector_modes.is_empty() {
            return Err(PlanError::InvalidOptions(
                "connector_modes must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            hub_fanout: 2,
            connector_modes: ConnectorMode::ALL.to_vec(),
            priority: Priority::Time,
            top_k: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.max_concurrent, 8);
        assert_eq!(config.leg_timeout_secs, 10);
        assert_eq!(config.default_reliability, 0.8);
    }

    #[test]
    fn duration_methods() {
        let config = PlannerConfig::default();
        assert_eq!(config.leg_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(2, 3, 0.9, RateTables::empty());

        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.leg_timeout_secs, 3);
        assert_eq!(config.default_reliability, 0.9);
    }

    #[test]
    fn default_options() {
        let options = PlanOptions::default();

        assert_eq!(options.hub_fanout, 2);
        assert_eq!(
            options.connector_modes,
            vec![ConnectorMode::Driving, ConnectorMode::Walking, ConnectorMode::Bicycling]
        );
        assert_eq!(options.priority, Priority::Time);
        assert_eq!(options.top_k, 5);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn connector_modes_are_deduplicated() {
        let options = PlanOptions::default().with_connector_modes([
            ConnectorMode::Walking,
            ConnectorMode::Driving,
            ConnectorMode::Walking,
        ]);
        assert_eq!(
            options.connector_modes,
            vec![ConnectorMode::Walking, ConnectorMode::Driving]
        );
    }

    #[test]
    fn validate_rejects_bad_options() {
        let zero_k = PlanOptions::default().with_top_k(0);
        assert!(matches!(zero_k.validate(), Err(PlanError::InvalidOptions(_))));

        let zero_fanout = PlanOptions::default().with_hub_fanout(0);
        assert!(matches!(zero_fanout.validate(), Err(PlanError::InvalidOptions(_))));

        let no_modes = PlanOptions::default().with_connector_modes([]);
        assert!(matches!(no_modes.validate(), Err(PlanError::InvalidOptions(_))));
    }
}
