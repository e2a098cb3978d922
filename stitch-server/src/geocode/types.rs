//! Geocoding result types and service DTOs.

use std::fmt;

use serde::Deserialize;

use crate::domain::Coordinate;

/// Which service produced a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceSource {
    Nominatim,
    Photon,
}

impl PlaceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceSource::Nominatim => "nominatim",
            PlaceSource::Photon => "photon",
        }
    }
}

impl fmt::Display for PlaceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extent of an area result, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

/// A geocoded place.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// `source:native_id`, e.g. `nominatim:1234`
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub bbox: Option<BoundingBox>,
    pub source: PlaceSource,
    /// Service-specific type such as `city` or `suburb`
    pub place_type: Option<String>,
}

/// One Nominatim search hit. Nominatim sends coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlaceDto {
    pub place_id: Option<u64>,
    pub display_name: Option<String>,
    pub lat: String,
    pub lon: String,
    /// `[south, north, west, east]`
    pub boundingbox: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub place_type: Option<String>,
}

/// Nominatim reverse lookup response.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimReverseDto {
    pub display_name: Option<String>,
}

/// Photon search response (GeoJSON feature collection).
#[derive(Debug, Clone, Deserialize)]
pub struct PhotonResponseDto {
    #[serde(default)]
    pub features: Vec<PhotonFeatureDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotonFeatureDto {
    pub geometry: Option<PhotonGeometryDto>,
    #[serde(default)]
    pub properties: PhotonPropertiesDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotonGeometryDto {
    /// `[lon, lat]`
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotonPropertiesDto {
    pub osm_id: Option<i64>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub label: Option<String>,
    /// `[west, south, east, north]`
    pub extent: Option<Vec<f64>>,
    #[serde(rename = "type")]
    pub place_type: Option<String>,
}

impl NominatimPlaceDto {
    /// Convert to a `Place`. Returns `None` if the coordinates are unusable.
    pub fn into_place(self) -> Option<Place> {
        let lat: f64 = self.lat.trim().parse().ok()?;
        let lng: f64 = self.lon.trim().parse().ok()?;
        let coordinate = Coordinate::new(lat, lng).ok()?;

        let bbox = self.boundingbox.as_deref().and_then(|b| {
            let values: Vec<f64> = b.iter().filter_map(|v| v.trim().parse().ok()).collect();
            match values.as_slice() {
                &[south, north, west, east] => Some(BoundingBox {
                    south,
                    north,
                    west,
                    east,
                }),
                _ => None,
            }
        });

        let id = match self.place_id {
            Some(id) => format!("nominatim:{id}"),
            None => format!("nominatim:{},{}", self.lat.trim(), self.lon.trim()),
        };

        Some(Place {
            id,
            name: self.display_name.unwrap_or_default(),
            coordinate,
            bbox,
            source: PlaceSource::Nominatim,
            place_type: self.place_type,
        })
    }
}

impl PhotonFeatureDto {
    /// Convert to a `Place`. `index` stands in for the id when the feature
    /// has no OSM id.
    pub fn into_place(self, index: usize) -> Option<Place> {
        let coordinates = self.geometry?.coordinates;
        let (lng, lat) = match coordinates.as_slice() {
            &[lng, lat, ..] => (lng, lat),
            _ => return None,
        };
        let coordinate = Coordinate::new(lat, lng).ok()?;

        let props = self.properties;

        let name = match &props.name {
            Some(name) => {
                let mut full = name.clone();
                if let Some(city) = &props.city {
                    full.push_str(", ");
                    full.push_str(city);
                }
                if let Some(country) = &props.country {
                    full.push_str(", ");
                    full.push_str(country);
                }
                full
            }
            None => props.label.clone().unwrap_or_else(|| "Unnamed".to_string()),
        };

        let bbox = match props.extent.as_deref() {
            Some(&[west, south, east, north]) => Some(BoundingBox {
                south,
                north,
                west,
                east,
            }),
            _ => None,
        };

        let id = match props.osm_id {
            Some(osm_id) => format!("photon:{osm_id}"),
            None => format!("photon:{index}"),
        };

        Some(Place {
            id,
            name,
            coordinate,
            bbox,
            source: PlaceSource::Photon,
            place_type: props.place_type,
        })
    }
}
