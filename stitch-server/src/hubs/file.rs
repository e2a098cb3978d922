//! Loading a hub registry from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, Hub, HubId};

use super::error::HubRegistryError;
use super::registry::HubRegistry;

/// On-disk representation of a hub.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubDto {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl HubDto {
    fn into_hub(self) -> Result<Hub, HubRegistryError> {
        let invalid = |source| HubRegistryError::InvalidHub {
            id: self.id.clone(),
            source,
        };
        let id = HubId::parse(&self.id).map_err(invalid)?;
        let coordinate = Coordinate::new(self.lat, self.lng).map_err(invalid)?;
        Hub::new(id, self.name.clone(), coordinate).map_err(invalid)
    }
}

impl From<&Hub> for HubDto {
    fn from(hub: &Hub) -> Self {
        Self {
            id: hub.id.to_string(),
            name: hub.name.clone(),
            lat: hub.coordinate.latitude(),
            lng: hub.coordinate.longitude(),
        }
    }
}

impl HubRegistry {
    /// Parse a registry from a JSON array of `{id, name, lat, lng}` objects.
    ///
    /// Unlike the builder, invalid entries are an error rather than skipped.
    pub fn from_json_str(json: &str) -> Result<Self, HubRegistryError> {
        let dtos: Vec<HubDto> = serde_json::from_str(json).map_err(|e| HubRegistryError::Json {
            message: e.to_string(),
        })?;

        let hubs = dtos
            .into_iter()
            .map(HubDto::into_hub)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(hubs)
    }

    /// Load a registry from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, HubRegistryError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| HubRegistryError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&contents)
    }

    /// Serialize the registry in the format read by `from_json_str`.
    pub fn to_json(&self) -> Result<String, HubRegistryError> {
        let dtos: Vec<HubDto> = self.hubs().iter().map(HubDto::from).collect();
        serde_json::to_string_pretty(&dtos).map_err(|e| HubRegistryError::Json {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hubs::dhaka_hubs;
    use tempfile::tempdir;

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hubs.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "north", "name": "North Terminal", "lat": 51.5, "lng": -0.1},
                {"id": "south", "name": "South Terminal", "lat": 51.4, "lng": -0.1}
            ]"#,
        )
        .unwrap();

        let registry = HubRegistry::from_json_file(&path).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.hubs()[0].name, "North Terminal");
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = HubRegistry::from_json_file("/nonexistent/path/hubs.json");
        assert!(matches!(result, Err(HubRegistryError::Io { .. })));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let result = HubRegistry::from_json_str("{not json");
        assert!(matches!(result, Err(HubRegistryError::Json { .. })));
    }

    #[test]
    fn invalid_coordinate_is_rejected() {
        let result =
            HubRegistry::from_json_str(r#"[{"id": "x", "name": "X", "lat": 120.0, "lng": 0.0}]"#);
        assert!(matches!(result, Err(HubRegistryError::InvalidHub { id, .. }) if id == "x"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = HubRegistry::from_json_str(
            r#"[{"id": "x", "name": "X", "lat": 0.0, "lng": 0.0},
                {"id": "x", "name": "Y", "lat": 1.0, "lng": 1.0}]"#,
        );
        assert!(matches!(result, Err(HubRegistryError::DuplicateId(_))));
    }

    #[test]
    fn empty_array_is_empty_registry() {
        let registry = HubRegistry::from_json_str("[]").unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn written_file_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dhaka.json");
        let original = dhaka_hubs();

        std::fs::write(&path, original.to_json().unwrap()).unwrap();
        let loaded = HubRegistry::from_json_file(&path).unwrap();

        assert_eq!(loaded.hubs(), original.hubs());
    }
}
