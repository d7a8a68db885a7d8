use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::core::{bounding_box, FilterSnapshot};
use crate::models::{BoundingBox, GeoPoint};

/// A single map marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub position: GeoPoint,
    pub label: String,
}

/// Payload handed to the map-rendering collaborator
///
/// The collaborator is responsible purely for visual rendering; the core
/// never depends on rendering completing. `bounds` is a viewport hint sized
/// to the selected radius.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapView {
    #[serde(rename = "referencePoint")]
    pub reference_point: GeoPoint,
    pub markers: Vec<Marker>,
    #[serde(rename = "radiusKm")]
    pub radius_km: f64,
    pub bounds: BoundingBox,
}

impl MapView {
    pub fn from_snapshot(snapshot: &FilterSnapshot) -> Self {
        let markers = snapshot
            .entities
            .iter()
            .map(|entity| Marker {
                id: entity.id.clone(),
                position: entity.position,
                label: entity.display_name.clone(),
            })
            .collect();

        Self {
            reference_point: snapshot.reference,
            markers,
            radius_km: snapshot.radius_km,
            bounds: bounding_box(snapshot.reference, snapshot.radius_km),
        }
    }
}

/// Rendering surface for map views
pub trait MapSink {
    fn render(&mut self, view: &MapView);
}

/// Writes each map view as one JSON line
///
/// The demo binary points this at stdout; tests point it at a buffer.
pub struct JsonMapSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonMapSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> MapSink for JsonMapSink<W> {
    fn render(&mut self, view: &MapView) {
        match serde_json::to_string(view) {
            Ok(line) => {
                if let Err(e) = writeln!(self.writer, "{}", line) {
                    tracing::warn!("map sink write failed: {}", e);
                }
            }
            Err(e) => tracing::warn!("map view serialization failed: {}", e),
        }
    }
}
