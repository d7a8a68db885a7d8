use crate::core::distance::filter_within_radius;
use crate::error::Error;
use crate::models::{Entity, GeoEvent, GeoPoint, GeoStatus, DEFAULT_RADIUS_KM};
use tracing::{debug, warn};

/// Snapshot handed to subscribers after each recomputation
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSnapshot {
    pub reference: GeoPoint,
    pub radius_km: f64,
    pub entities: Vec<Entity>,
}

type Subscriber = Box<dyn FnMut(&FilterSnapshot)>;

/// Reactive state holder turning (position, radius, candidates) into a filter result
///
/// Reacts synchronously to discrete external events; `recompute` is a
/// deterministic transformation with no side effects beyond updating `result`
/// and notifying subscribers. If several setters fire before a consumer reads
/// the result, only the final state is observable (last-write-wins).
pub struct LocationFilterController {
    status: GeoStatus,
    position: Option<GeoPoint>,
    radius_km: f64,
    candidates: Vec<Entity>,
    result: Vec<Entity>,
    subscribers: Vec<Subscriber>,
    torn_down: bool,
}

impl LocationFilterController {
    pub fn new() -> Self {
        Self {
            status: GeoStatus::AwaitingPermission,
            position: None,
            radius_km: DEFAULT_RADIUS_KM,
            candidates: Vec::new(),
            result: Vec::new(),
            subscribers: Vec::new(),
            torn_down: false,
        }
    }

    /// Create a controller with a non-default starting radius
    pub fn with_radius(radius_km: f64) -> Result<Self, Error> {
        let mut controller = Self::new();
        controller.set_radius(radius_km)?;
        Ok(controller)
    }

    pub fn status(&self) -> GeoStatus {
        self.status
    }

    pub fn position(&self) -> Option<GeoPoint> {
        self.position
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// The current filter result; empty until a position has been delivered
    pub fn result(&self) -> &[Entity] {
        &self.result
    }

    /// Register a callback invoked with a fresh snapshot after each recompute
    ///
    /// Snapshots are only produced once a reference point exists.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&FilterSnapshot) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Fold a geolocation collaborator event into the state machine
    pub fn apply(&mut self, event: GeoEvent) {
        if self.torn_down {
            debug!("geo event ignored: controller torn down");
            return;
        }

        match event {
            GeoEvent::Unsupported => match self.status {
                GeoStatus::AwaitingPermission | GeoStatus::AwaitingFix => {
                    warn!("geolocation unsupported; no positions will be delivered");
                    self.status = GeoStatus::Unsupported;
                }
                _ => debug!(status = ?self.status, "unsupported event ignored"),
            },
            GeoEvent::PermissionDenied => match self.status {
                GeoStatus::AwaitingPermission | GeoStatus::AwaitingFix => {
                    warn!("location permission denied for this session");
                    self.status = GeoStatus::Denied;
                }
                _ => debug!(status = ?self.status, "denied event ignored"),
            },
            GeoEvent::PermissionGranted => match self.status {
                GeoStatus::AwaitingPermission => {
                    debug!("permission granted, awaiting first fix");
                    self.status = GeoStatus::AwaitingFix;
                }
                _ => debug!(status = ?self.status, "grant event ignored"),
            },
            GeoEvent::Fix(update) => self.set_position(update.point),
        }
    }

    /// Update the reference point; the first delivery transitions to Active
    pub fn set_position(&mut self, point: GeoPoint) {
        if self.torn_down {
            debug!("position update ignored: controller torn down");
            return;
        }
        if self.status.is_terminal() {
            debug!(status = ?self.status, "position update ignored in terminal state");
            return;
        }

        if self.status != GeoStatus::Active {
            debug!(
                lat = point.latitude(),
                lon = point.longitude(),
                "first fix acquired"
            );
            self.status = GeoStatus::Active;
        }
        self.position = Some(point);
        self.recompute();
    }

    /// Update the search radius
    ///
    /// # Errors
    /// `Error::InvalidRadius` for zero, negative, or non-finite values; the
    /// previous radius and result are retained and no recompute happens.
    pub fn set_radius(&mut self, radius_km: f64) -> Result<(), Error> {
        if self.torn_down {
            debug!("radius change ignored: controller torn down");
            return Ok(());
        }
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(Error::InvalidRadius(radius_km));
        }

        self.radius_km = radius_km;
        self.recompute();
        Ok(())
    }

    /// Replace the candidate set wholesale
    ///
    /// Callers must never mutate a shared collection in place; replacement
    /// keeps recomputation deterministic.
    pub fn set_candidates(&mut self, candidates: Vec<Entity>) {
        if self.torn_down {
            debug!("candidate update ignored: controller torn down");
            return;
        }

        self.candidates = candidates;
        self.recompute();
    }

    /// Detach the controller; every subsequent event is a no-op
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.subscribers.clear();
    }

    fn recompute(&mut self) {
        let Some(reference) = self.position else {
            self.result.clear();
            return;
        };

        // radius_km is validated at the setter boundary, so the filter
        // cannot actually reject it
        match filter_within_radius(reference, &self.candidates, self.radius_km) {
            Ok(filtered) => self.result = filtered,
            Err(e) => {
                warn!("recompute skipped: {}", e);
                return;
            }
        }

        if !self.subscribers.is_empty() {
            let snapshot = FilterSnapshot {
                reference,
                radius_km: self.radius_km,
                entities: self.result.clone(),
            };
            for subscriber in &mut self.subscribers {
                subscriber(&snapshot);
            }
        }
    }
}

impl Default for LocationFilterController {
    fn default() -> Self {
        Self::new()
    }
}
