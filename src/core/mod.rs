// Core algorithm exports
pub mod controller;
pub mod distance;

pub use controller::{FilterSnapshot, LocationFilterController};
pub use distance::{bounding_box, filter_within_radius, haversine_distance_km};
