//! The immutable hub registry.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{Coordinate, Hub, HubId};

use super::error::HubRegistryError;

/// An immutable, cheaply clonable list of hubs.
///
/// Hub ids are unique. Order is preserved and used to break distance ties.
#[derive(Debug, Clone)]
pub struct HubRegistry {
    hubs: Arc<[Hub]>,
}

impl HubRegistry {
    /// Create a registry, rejecting duplicate ids.
    pub fn new(hubs: Vec<Hub>) -> Result<Self, HubRegistryError> {
        let mut seen = HashSet::with_capacity(hubs.len());
        for hub in &hubs {
            if !seen.insert(hub.id.clone()) {
                return Err(HubRegistryError::DuplicateId(hub.id.to_string()));
            }
        }
        Ok(Self { hubs: hubs.into() })
    }

    /// Create an empty registry.
    pub fn empty() -> Self {
        Self {
            hubs: Vec::new().into(),
        }
    }

    pub fn hubs(&self) -> &[Hub] {
        &self.hubs
    }

    /// Look up a hub by id.
    pub fn get(&self, id: &HubId) -> Option<&Hub> {
        self.hubs.iter().find(|h| &h.id == id)
    }

    pub fn len(&self) -> usize {
        self.hubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty()
    }
}

impl Default for HubRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

/// Builder for creating hub registries.
///
/// Provides a fluent API for adding hubs. Entries with an invalid id, name
/// or coordinate, or with an id already added, are skipped.
#[derive(Debug, Default)]
pub struct HubRegistryBuilder {
    hubs: Vec<Hub>,
}

impl HubRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hub.
    pub fn add(mut self, id: &str, name: &str, lat: f64, lng: f64) -> Self {
        let hub = HubId::parse(id).and_then(|id| {
            let coordinate = Coordinate::new(lat, lng)?;
            Hub::new(id, name, coordinate)
        });
        if let Ok(hub) = hub
            && !self.hubs.iter().any(|h| h.id == hub.id)
        {
            self.hubs.push(hub);
        }
        self
    }

    pub fn build(self) -> HubRegistry {
        HubRegistry {
            hubs: self.hubs.into(),
        }
    }
}

/// The default registry: Dhaka bus and metro interchanges.
pub fn dhaka_hubs() -> HubRegistry {
    HubRegistryBuilder::new()
        .add("dhk_motijheel", "Motijheel Bus Hub", 23.7339, 90.4142)
        .add("dmrt_uttara_north", "Uttara North (Metro)", 23.8760, 90.3862)
        .add("dmrt_agargaon", "Agargaon (Metro)", 23.7779, 90.3778)
        .add("dhk_farmgate", "Farmgate", 23.7523, 90.3933)
        .add("dhk_gulistan", "Gulistan", 23.7254, 90.4116)
        .add("dhk_mirpur10", "Mirpur 10", 23.8049, 90.3667)
        .build()
}
