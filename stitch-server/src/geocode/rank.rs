//! Relevance ranking for geocoding results.

use std::collections::HashSet;

use super::types::Place;

/// Place types that name a whole settlement.
const SETTLEMENT_TYPES: [&str; 2] = ["city", "town"];

/// Place types that name a part of a settlement.
const DISTRICT_TYPES: [&str; 6] = [
    "suburb",
    "district",
    "neighbourhood",
    "quarter",
    "ward",
    "thana",
];

/// Names that make a result more likely to be what the user meant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacePreferences {
    pub country_name: String,
    pub city_name: String,
}

impl PlacePreferences {
    pub fn new(country_name: impl Into<String>, city_name: impl Into<String>) -> Self {
        Self {
            country_name: country_name.into(),
            city_name: city_name.into(),
        }
    }
}

impl Default for PlacePreferences {
    fn default() -> Self {
        Self::new("Bangladesh", "Dhaka")
    }
}

/// Relevance of a place. Higher is better.
pub fn relevance(place: &Place, prefs: &PlacePreferences) -> u32 {
    let name = place.name.to_lowercase();
    let mut score = 0;

    if !prefs.country_name.is_empty() && name.contains(&prefs.country_name.to_lowercase()) {
        score += 3;
    }
    if !prefs.city_name.is_empty() && name.contains(&prefs.city_name.to_lowercase()) {
        score += 2;
    }

    let place_type = place.place_type.as_deref().unwrap_or_default().to_lowercase();
    if SETTLEMENT_TYPES.contains(&place_type.as_str()) {
        score += 2;
    }
    if DISTRICT_TYPES.contains(&place_type.as_str()) {
        score += 1;
    }

    if place.bbox.is_some() {
        score += 1;
    }

    score
}

/// Drop places with the same name at the same spot (to 6 decimal places),
/// keeping the first.
pub fn dedupe(places: Vec<Place>) -> Vec<Place> {
    let mut seen = HashSet::new();
    places
        .into_iter()
        .filter(|place| {
            seen.insert(format!(
                "{}|{:.6}|{:.6}",
                place.name,
                place.coordinate.latitude(),
                place.coordinate.longitude()
            ))
        })
        .collect()
}

/// Dedupe, order by descending relevance (stable), and keep `limit`.
pub fn rank_places(places: Vec<Place>, prefs: &PlacePreferences, limit: usize) -> Vec<Place> {
    let mut places = dedupe(places);
    places.sort_by_key(|place| std::cmp::Reverse(relevance(place, prefs)));
    places.truncate(limit);
    places
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use crate::geocode::{BoundingBox, PlaceSource};

    fn place(name: &str, lat: f64, lng: f64, place_type: Option<&str>, bbox: bool) -> Place {
        Place {
            id: format!("nominatim:{name}"),
            name: name.to_string(),
            coordinate: Coordinate::new(lat, lng).unwrap(),
            bbox: bbox.then_some(BoundingBox {
                south: lat - 0.01,
                north: lat + 0.01,
                west: lng - 0.01,
                east: lng + 0.01,
            }),
            source: PlaceSource::Nominatim,
            place_type: place_type.map(str::to_string),
        }
    }

    #[test]
    fn relevance_scoring() {
        let prefs = PlacePreferences::default();

        let best = place("Gulshan, Dhaka, Bangladesh", 23.79, 90.41, Some("suburb"), true);
        // 3 + 2 + 1 + 1
        assert_eq!(relevance(&best, &prefs), 7);

        let city = place("Chittagong, Bangladesh", 22.35, 91.78, Some("city"), false);
        assert_eq!(relevance(&city, &prefs), 5);

        let shop = place("Dhaka Shop, London", 51.5, -0.1, Some("shop"), false);
        assert_eq!(relevance(&shop, &prefs), 2);
    }

    #[test]
    fn relevance_is_case_insensitive() {
        let prefs = PlacePreferences::default();
        let p = place("DHAKA", 23.7, 90.4, Some("City"), false);
        assert_eq!(relevance(&p, &prefs), 4);
    }

    #[test]
    fn dedupe_by_name_and_position() {
        let places = vec![
            place("Farmgate", 23.752_300_1, 90.3933, None, false),
            place("Farmgate", 23.752_300_2, 90.3933, None, true),
            place("Farmgate", 23.7600, 90.3933, None, false),
            place("Farmgate Bus Stop", 23.7523, 90.3933, None, false),
        ];

        let result = dedupe(places);

        assert_eq!(result.len(), 3);
        assert!(result[0].bbox.is_none());
    }

    #[test]
    fn rank_is_stable_and_truncated() {
        let prefs = PlacePreferences::default();
        let places = vec![
            place("First plain", 1.0, 1.0, None, false),
            place("Dhaka A", 2.0, 2.0, None, false),
            place("Second plain", 3.0, 3.0, None, false),
            place("Dhaka B", 4.0, 4.0, None, false),
        ];

        let ranked = rank_places(places, &prefs, 3);
        let names: Vec<&str> = ranked.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Dhaka A", "Dhaka B", "First plain"]);
    }
}
