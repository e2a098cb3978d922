//! Domain types for the itinerary planner.
//!
//! This module contains the value types that represent validated
//! geographic and itinerary data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod coordinate;
mod error;
mod hub;
mod itinerary;
mod leg;
mod mode;
mod priority;

pub use coordinate::{Coordinate, haversine_meters};
pub use error::DomainError;
pub use hub::{Hub, HubId};
pub use itinerary::{Itinerary, ItineraryLabel, TRANSFER_COUNT};
pub use leg::Leg;
pub use mode::{ConnectorMode, InvalidMode, LegMode};
pub use priority::{InvalidPriority, Priority};
