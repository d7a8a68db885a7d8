use tracing::debug;

use crate::core::LocationFilterController;
use crate::models::{GeoEvent, GeoPoint, PositionUpdate};

/// Source of geolocation collaborator events
///
/// Implementations own the underlying sensor/API; the core only consumes the
/// resulting event stream. `next_event` returns `None` once the feed is
/// exhausted (terminal status or no more scripted steps).
pub trait GeolocationFeed {
    fn next_event(&mut self) -> Option<GeoEvent>;
}

/// Replays a fixed sequence of geolocation events
///
/// Used by the demo binary and integration tests to drive the controller the
/// way a real permission prompt plus GPS fix sequence would.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGeoFeed {
    events: std::collections::VecDeque<GeoEvent>,
}

impl ScriptedGeoFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant, then deliver fixes at the given points
    pub fn granted_with_fixes(points: impl IntoIterator<Item = GeoPoint>) -> Self {
        let mut feed = Self::new();
        feed.push(GeoEvent::PermissionGranted);
        for point in points {
            feed.push(GeoEvent::Fix(PositionUpdate::now(point)));
        }
        feed
    }

    pub fn denied() -> Self {
        let mut feed = Self::new();
        feed.push(GeoEvent::PermissionDenied);
        feed
    }

    pub fn unsupported() -> Self {
        let mut feed = Self::new();
        feed.push(GeoEvent::Unsupported);
        feed
    }

    pub fn push(&mut self, event: GeoEvent) {
        self.events.push_back(event);
    }

    /// Drain the feed into a controller
    pub fn drive(&mut self, controller: &mut LocationFilterController) {
        while let Some(event) = self.next_event() {
            debug!(?event, "delivering geolocation event");
            controller.apply(event);
        }
    }
}

impl GeolocationFeed for ScriptedGeoFeed {
    fn next_event(&mut self) -> Option<GeoEvent> {
        self.events.pop_front()
    }
}
