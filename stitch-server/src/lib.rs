//! Multi-modal itinerary planner server.
//!
//! A web application that answers: "How do I get from here to there by
//! riding to a hub, taking the trunk line, and riding on from the far hub?"

pub mod cache;
pub mod directions;
pub mod domain;
pub mod geocode;
pub mod hubs;
pub mod planner;
pub mod web;
