use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;
use validator::Validate;

use crate::error::Error;
use crate::models::{Entity, EntityRecord, GeoPoint};

/// Source of filter candidates
///
/// The controller treats whatever a provider returns as the wholesale
/// candidate set; providers never pre-apply the radius filter, they only
/// decide which entities are eligible at all.
pub trait EntityProvider {
    fn candidates(&self, reference: GeoPoint, radius_km: f64) -> Vec<Entity>;
}

/// A fixed entity list, independent of position and radius
#[derive(Debug, Clone)]
pub struct StaticEntityProvider {
    entities: Vec<Entity>,
}

impl StaticEntityProvider {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    /// Load entities from a TOML file of the form:
    ///
    /// ```toml
    /// [[entities]]
    /// id = "e1"
    /// latitude = 44.395
    /// longitude = 19.114
    /// displayName = "Sample One"
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::EntityData(format!("read {}: {}", path.as_ref().display(), e)))?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, Error> {
        #[derive(Deserialize)]
        struct EntityFile {
            entities: Vec<EntityRecord>,
        }

        let file: EntityFile =
            toml::from_str(raw).map_err(|e| Error::EntityData(format!("parse: {}", e)))?;

        let mut entities = Vec::with_capacity(file.entities.len());
        for record in file.entities {
            record
                .validate()
                .map_err(|e| Error::EntityData(format!("record {}: {}", record.id, e)))?;
            entities.push(Entity::try_from(record)?);
        }

        debug!(count = entities.len(), "loaded entity file");
        Ok(Self::new(entities))
    }

    /// Built-in synthetic sample set around Loznica, Serbia
    ///
    /// Six entities scattered within ~40km of (44.50, 19.15) and six more in
    /// the Belgrade area ~130km away, so the default 10km radius and the
    /// widest 300km menu step both produce interesting results.
    pub fn sample() -> Self {
        let raw = [
            ("1", 44.395, 19.114, "Mira Petrov"),
            ("2", 44.381, 19.100, "Luka Savic"),
            ("3", 44.520, 19.150, "Ana Kovac"),
            ("4", 44.620, 19.200, "Ivan Lukic"),
            ("5", 44.720, 19.200, "Sara Ilic"),
            ("6", 44.220, 19.200, "Marko Simic"),
            ("7", 44.8197, 20.458, "Jana Popov"),
            ("8", 44.8171, 20.4369, "Filip Babic"),
            ("9", 44.6333, 20.7167, "Nina Tadic"),
            ("10", 44.9500, 20.4700, "Vuk Matic"),
            ("11", 44.7000, 20.3000, "Lena Antic"),
            ("12", 44.6000, 20.1000, "Petar Zoric"),
        ];

        let entities = raw
            .iter()
            .map(|(id, lat, lon, name)| {
                // Static coordinates above are all in range
                let position = GeoPoint::new(*lat, *lon).unwrap_or_else(|_| {
                    unreachable!("sample coordinates are valid by construction")
                });
                Entity::new(*id, position, *name)
            })
            .collect();

        Self::new(entities)
    }
}

impl EntityProvider for StaticEntityProvider {
    fn candidates(&self, _reference: GeoPoint, _radius_km: f64) -> Vec<Entity> {
        self.entities.clone()
    }
}

/// Entities pre-bucketed per radius tier
///
/// The candidate set for a selected radius is the concatenation of every tier
/// whose threshold is at most that radius, tiers in ascending threshold order
/// and insertion order within a tier. This is a candidate-sourcing strategy
/// only; the distance filter downstream stays authoritative.
#[derive(Debug, Clone, Default)]
pub struct TieredEntityProvider {
    // Tier thresholds in whole kilometers, kept sorted by the map
    tiers: BTreeMap<u32, Vec<Entity>>,
}

impl TieredEntityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tier(mut self, threshold_km: u32, entities: Vec<Entity>) -> Self {
        self.add_tier(threshold_km, entities);
        self
    }

    pub fn add_tier(&mut self, threshold_km: u32, entities: Vec<Entity>) {
        self.tiers.entry(threshold_km).or_default().extend(entities);
    }
}

impl EntityProvider for TieredEntityProvider {
    fn candidates(&self, _reference: GeoPoint, radius_km: f64) -> Vec<Entity> {
        self.tiers
            .iter()
            .take_while(|(threshold, _)| **threshold as f64 <= radius_km)
            .flat_map(|(_, entities)| entities.iter().cloned())
            .collect()
    }
}

/// Places one synthetic entity per name inside a disc around the reference
///
/// Each tier's entities are scattered uniformly over a disc whose radius is
/// the tier's nominal distance. The offset formula does not guarantee the
/// generated point lands within that distance of the reference (longitude
/// shrink near the poles skews it), so callers must not assume tier
/// membership; the downstream filter decides what is actually in range.
/// Seeded, so a given seed always produces the same layout.
#[derive(Debug, Clone)]
pub struct RandomizedTierProvider {
    tiers: BTreeMap<u32, Vec<String>>,
    seed: u64,
}

impl RandomizedTierProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            tiers: BTreeMap::new(),
            seed,
        }
    }

    pub fn with_tier<S: Into<String>>(
        mut self,
        distance_km: u32,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.tiers
            .entry(distance_km)
            .or_default()
            .extend(names.into_iter().map(Into::into));
        self
    }

    fn scatter(rng: &mut StdRng, reference: GeoPoint, distance_km: f64) -> GeoPoint {
        let radius_in_degrees = distance_km / 111.0;
        let u: f64 = rng.gen();
        let v: f64 = rng.gen();
        let w = radius_in_degrees * u.sqrt();
        let t = 2.0 * std::f64::consts::PI * v;

        let latitude = reference.latitude() + w * t.cos();
        let longitude =
            reference.longitude() + (w * t.sin()) / reference.latitude().to_radians().cos();

        // Clamp rather than fail: a reference near a pole or the antimeridian
        // can push the raw offset out of range
        let latitude = latitude.clamp(-90.0, 90.0);
        let longitude = longitude.clamp(-180.0, 180.0);

        GeoPoint::new(latitude, longitude)
            .unwrap_or_else(|_| unreachable!("clamped coordinates are in range"))
    }
}

impl EntityProvider for RandomizedTierProvider {
    fn candidates(&self, reference: GeoPoint, radius_km: f64) -> Vec<Entity> {
        // One rng for the whole layout: the same seed and tier configuration
        // always yield the same positions, regardless of the selected radius
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut entities = Vec::new();
        let mut next_id = 1u32;

        for (distance_km, names) in &self.tiers {
            for name in names {
                let position = Self::scatter(&mut rng, reference, *distance_km as f64);
                let include = *distance_km as f64 <= radius_km;
                if include {
                    entities.push(Entity::new(next_id.to_string(), position, name.clone()));
                }
                next_id += 1;
            }
        }

        entities
    }
}
