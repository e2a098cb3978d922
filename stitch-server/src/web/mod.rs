//! Web layer for the itinerary planner.
//!
//! Provides HTTP endpoints for place search, hub listing and itinerary
//! planning.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
