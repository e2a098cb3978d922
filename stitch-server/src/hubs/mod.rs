//! Hub registry and nearest-hub lookup.
//!
//! The registry is an immutable list of interchange points, built once at
//! startup (from the built-in table or a JSON file) and shared read-only.

mod error;
mod file;
mod locator;
mod registry;

pub use error::HubRegistryError;
pub use file::HubDto;
pub use locator::HubLocator;
pub use registry::{HubRegistry, HubRegistryBuilder, dhaka_hubs};
