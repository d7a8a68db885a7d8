//! Proximo - reactive nearby-entity radius filtering for interactive maps
//!
//! The core is a pure haversine distance engine plus a reactive controller
//! that turns (position, radius, candidate set) into a filtered marker list
//! for a map-rendering collaborator. Entity sourcing and geolocation are
//! injected through provider traits, so the pipeline is fully testable
//! without any UI framework.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod providers;
pub mod render;

// Re-export commonly used types
pub use crate::core::{filter_within_radius, haversine_distance_km, LocationFilterController};
pub use crate::error::Error;
pub use crate::models::{Entity, GeoEvent, GeoPoint, GeoStatus};
pub use crate::providers::{EntityProvider, StaticEntityProvider};
pub use crate::render::{MapSink, MapView};
