// Model exports
pub mod domain;

pub use domain::{
    BoundingBox, Entity, EntityRecord, GeoEvent, GeoPoint, GeoStatus, PositionUpdate,
    DEFAULT_RADIUS_KM, RADIUS_MENU_KM,
};
