//! Place search and reverse geocoding.
//!
//! Turns free-text place names into coordinates for the planner, using
//! OpenStreetMap services. Results are re-ranked to prefer places in the
//! configured country and city.

mod client;
mod error;
mod rank;
mod types;

pub use client::{GeocodeClient, GeocodeConfig, SearchParams};
pub use error::GeocodeError;
pub use rank::{PlacePreferences, dedupe, rank_places, relevance};
pub use types::{BoundingBox, Place, PlaceSource};
