use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Error;

/// A validated latitude/longitude pair in degrees
///
/// Construction rejects non-finite values and out-of-range coordinates,
/// so every `GeoPoint` held by the core is known to be well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        if !lat_ok || !lon_ok {
            return Err(Error::InvalidCoordinate { latitude, longitude });
        }
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// An entity eligible for radius filtering
///
/// Created at data-load time and never mutated; identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub position: GeoPoint,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

impl Entity {
    pub fn new(id: impl Into<String>, position: GeoPoint, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position,
            display_name: display_name.into(),
        }
    }
}

/// On-disk form of an entity, validated before conversion to [`Entity`]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EntityRecord {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(rename = "displayName")]
    #[validate(length(min = 1))]
    pub display_name: String,
}

impl TryFrom<EntityRecord> for Entity {
    type Error = Error;

    fn try_from(record: EntityRecord) -> Result<Self, Error> {
        let position = GeoPoint::new(record.latitude, record.longitude)?;
        Ok(Entity::new(record.id, position, record.display_name))
    }
}

/// A coordinate delivery from the geolocation collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub point: GeoPoint,
    pub at: chrono::DateTime<chrono::Utc>,
}

impl PositionUpdate {
    pub fn now(point: GeoPoint) -> Self {
        Self {
            point,
            at: chrono::Utc::now(),
        }
    }
}

/// Position-acquisition status, mirroring the geolocation collaborator's contract
///
/// `Denied` and `Unsupported` are terminal for the session. Once `Active`,
/// the controller stays `Active`; coordinate updates may recur indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeoStatus {
    AwaitingPermission,
    AwaitingFix,
    Active,
    Denied,
    Unsupported,
}

impl GeoStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GeoStatus::Denied | GeoStatus::Unsupported)
    }
}

/// An update emitted by the geolocation collaborator
///
/// The collaborator resolves availability and permission asynchronously and
/// then delivers coordinate fixes; the controller folds these events into its
/// [`GeoStatus`] state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoEvent {
    Unsupported,
    PermissionDenied,
    PermissionGranted,
    Fix(PositionUpdate),
}

/// Geospatial bounding box, used for map viewport fitting only
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(rename = "minLat")]
    pub min_lat: f64,
    #[serde(rename = "maxLat")]
    pub max_lat: f64,
    #[serde(rename = "minLon")]
    pub min_lon: f64,
    #[serde(rename = "maxLon")]
    pub max_lon: f64,
}

/// Radius values offered by the UI menu, in kilometers
///
/// The engine accepts any positive float; this menu only constrains what the
/// radius control displays.
pub const RADIUS_MENU_KM: [f64; 5] = [10.0, 20.0, 30.0, 40.0, 300.0];

/// Default search radius in kilometers
pub const DEFAULT_RADIUS_KM: f64 = 10.0;
