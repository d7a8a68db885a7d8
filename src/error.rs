use thiserror::Error;

/// Errors surfaced by the filtering core and its data boundaries
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid radius: {0} km (must be a positive, finite number)")]
    InvalidRadius(f64),

    #[error("invalid coordinate: lat={latitude}, lon={longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("geolocation is not supported in this environment")]
    CapabilityUnavailable,

    #[error("location permission was denied")]
    PermissionDenied,

    #[error("entity data error: {0}")]
    EntityData(String),
}
