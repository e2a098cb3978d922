//! Nearest-hub lookup.

use crate::domain::{Coordinate, Hub};

use super::registry::HubRegistry;

/// Finds the hubs closest to a point by great-circle distance.
#[derive(Debug, Clone)]
pub struct HubLocator {
    registry: HubRegistry,
}

impl HubLocator {
    pub fn new(registry: HubRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &HubRegistry {
        &self.registry
    }

    /// The `count` hubs nearest to `point`, closest first.
    ///
    /// Returns `min(count, registry size)` hubs. Hubs at equal distance keep
    /// their registry order.
    pub fn nearest_hubs(&self, point: Coordinate, count: usize) -> Vec<Hub> {
        let mut by_distance: Vec<(f64, &Hub)> = self
            .registry
            .hubs()
            .iter()
            .map(|hub| (point.distance_to(&hub.coordinate), hub))
            .collect();

        by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));

        by_distance
            .into_iter()
            .take(count)
            .map(|(_, hub)| hub.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hubs::{HubRegistryBuilder, dhaka_hubs};

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn ids(hubs: &[Hub]) -> Vec<&str> {
        hubs.iter().map(|h| h.id.as_str()).collect()
    }

    #[test]
    fn nearest_first() {
        let locator = HubLocator::new(dhaka_hubs());

        // Just north of Farmgate
        let hubs = locator.nearest_hubs(coord(23.7560, 90.3920), 2);
        assert_eq!(ids(&hubs), vec!["dhk_farmgate", "dmrt_agargaon"]);
    }

    #[test]
    fn ordered_by_ascending_distance() {
        let locator = HubLocator::new(dhaka_hubs());
        let point = coord(23.80, 90.40);
        let hubs = locator.nearest_hubs(point, 6);

        assert_eq!(hubs.len(), 6);
        for pair in hubs.windows(2) {
            assert!(
                point.distance_to(&pair[0].coordinate) <= point.distance_to(&pair[1].coordinate)
            );
        }
    }

    #[test]
    fn count_is_capped_by_registry_size() {
        let locator = HubLocator::new(dhaka_hubs());
        assert_eq!(locator.nearest_hubs(coord(23.75, 90.40), 50).len(), 6);
        assert!(locator.nearest_hubs(coord(23.75, 90.40), 0).is_empty());
    }

    #[test]
    fn empty_registry_returns_nothing() {
        let locator = HubLocator::new(HubRegistryBuilder::new().build());
        assert!(locator.nearest_hubs(coord(0.0, 0.0), 2).is_empty());
    }

    #[test]
    fn ties_keep_registry_order() {
        let registry = HubRegistryBuilder::new()
            .add("east", "East", 0.0, 1.0)
            .add("west", "West", 0.0, -1.0)
            .add("far", "Far", 0.0, 5.0)
            .build();
        let locator = HubLocator::new(registry);

        let hubs = locator.nearest_hubs(coord(0.0, 0.0), 2);
        assert_eq!(ids(&hubs), vec!["east", "west"]);
    }

    #[test]
    fn deterministic() {
        let locator = HubLocator::new(dhaka_hubs());
        let p = coord(23.78, 90.39);
        assert_eq!(locator.nearest_hubs(p, 3), locator.nearest_hubs(p, 3));
    }
}
