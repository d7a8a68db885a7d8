// Integration tests: geolocation feed -> controller -> map view

use proximo::core::{FilterSnapshot, LocationFilterController};
use proximo::models::{Entity, GeoEvent, GeoPoint, GeoStatus, PositionUpdate};
use proximo::providers::{
    EntityProvider, ScriptedGeoFeed, StaticEntityProvider, TieredEntityProvider,
};
use proximo::render::{JsonMapSink, MapSink, MapView};
use std::cell::RefCell;
use std::rc::Rc;

fn point(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon).unwrap()
}

fn entity(id: &str, lat: f64, lon: f64) -> Entity {
    Entity::new(id, point(lat, lon), format!("Entity {}", id))
}

#[test]
fn test_end_to_end_session_with_sample_entities() {
    let provider = StaticEntityProvider::sample();
    let reference = point(44.50, 19.15);

    let mut controller = LocationFilterController::new();
    controller.set_candidates(provider.candidates(reference, 10.0));

    let mut feed = ScriptedGeoFeed::granted_with_fixes([reference]);
    feed.drive(&mut controller);

    assert_eq!(controller.status(), GeoStatus::Active);
    let at_10km = controller.result().len();
    assert!(at_10km >= 1, "some sample entities sit inside 10km");

    controller.set_radius(300.0).unwrap();
    let at_300km = controller.result().len();
    assert!(at_300km > at_10km, "widening the radius admits more entities");

    // Everything included at 10km is still included at 300km
    controller.set_radius(10.0).unwrap();
    let narrow: Vec<String> = controller.result().iter().map(|e| e.id.clone()).collect();
    controller.set_radius(300.0).unwrap();
    for id in narrow {
        assert!(controller.result().iter().any(|e| e.id == id));
    }
}

#[test]
fn test_denied_session_stays_empty() {
    let provider = StaticEntityProvider::sample();
    let reference = point(44.50, 19.15);

    let mut controller = LocationFilterController::new();
    controller.set_candidates(provider.candidates(reference, 300.0));
    controller.set_radius(300.0).unwrap();

    ScriptedGeoFeed::denied().drive(&mut controller);

    assert_eq!(controller.status(), GeoStatus::Denied);
    assert!(controller.result().is_empty());
}

#[test]
fn test_unsupported_session_never_recomputes() {
    let mut controller = LocationFilterController::new();
    ScriptedGeoFeed::unsupported().drive(&mut controller);

    controller.set_candidates(vec![entity("1", 44.52, 19.15)]);
    controller.set_position(point(44.50, 19.15));

    assert_eq!(controller.status(), GeoStatus::Unsupported);
    assert!(controller.result().is_empty());
}

#[test]
fn test_tiered_provider_feeds_the_same_filter() {
    let provider = TieredEntityProvider::new()
        .with_tier(10, vec![entity("near-a", 44.51, 19.15), entity("near-b", 44.52, 19.15)])
        .with_tier(300, vec![entity("far", 44.95, 20.47)]);

    let reference = point(44.50, 19.15);
    let mut controller = LocationFilterController::new();
    controller.set_position(reference);

    // 10km tier only
    controller.set_candidates(provider.candidates(reference, 10.0));
    assert_eq!(controller.result().len(), 2);

    // Widen: the far tier enters the candidate set and survives the filter
    controller.set_radius(300.0).unwrap();
    controller.set_candidates(provider.candidates(reference, 300.0));
    assert_eq!(controller.result().len(), 3);
}

#[test]
fn test_moving_reference_updates_membership() {
    let mut controller = LocationFilterController::new();
    controller.set_candidates(vec![
        entity("loznica", 44.52, 19.15),
        entity("belgrade", 44.8197, 20.458),
    ]);

    let mut feed = ScriptedGeoFeed::granted_with_fixes([
        point(44.50, 19.15),    // near Loznica
        point(44.8171, 20.4369), // near Belgrade
    ]);
    feed.drive(&mut controller);

    // Only the last fix matters
    let ids: Vec<&str> = controller.result().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["belgrade"]);
}

#[test]
fn test_subscriber_receives_map_ready_snapshots() {
    let snapshots: Rc<RefCell<Vec<FilterSnapshot>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&snapshots);

    let mut controller = LocationFilterController::new();
    controller.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.clone()));
    controller.set_candidates(vec![entity("1", 44.52, 19.15)]);
    controller.apply(GeoEvent::PermissionGranted);
    controller.apply(GeoEvent::Fix(PositionUpdate::now(point(44.50, 19.15))));

    let captured = snapshots.borrow();
    let last = captured.last().expect("a snapshot after the first fix");

    let view = MapView::from_snapshot(last);
    assert_eq!(view.reference_point, point(44.50, 19.15));
    assert_eq!(view.markers.len(), 1);
    assert_eq!(view.markers[0].label, "Entity 1");
    assert_eq!(view.radius_km, 10.0);
}

#[test]
fn test_json_sink_renders_full_pipeline_output() {
    let buffer: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));

    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);
    impl std::io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let mut sink = JsonMapSink::new(SharedBuffer(Rc::clone(&buffer)));

    let mut controller = LocationFilterController::new();
    controller.subscribe(move |snapshot| sink.render(&MapView::from_snapshot(snapshot)));
    controller.set_candidates(vec![entity("1", 44.52, 19.15)]);
    controller.set_position(point(44.50, 19.15));

    let output = String::from_utf8(buffer.borrow().clone()).unwrap();
    assert!(output.contains("\"referencePoint\""));
    assert!(output.contains("\"Entity 1\""));
}

#[test]
fn test_teardown_stops_late_position_events() {
    let mut controller = LocationFilterController::new();
    controller.set_candidates(vec![entity("1", 44.52, 19.15)]);
    controller.set_position(point(44.50, 19.15));
    assert_eq!(controller.result().len(), 1);

    controller.teardown();
    controller.apply(GeoEvent::Fix(PositionUpdate::now(point(10.0, 10.0))));

    // Result is frozen at its pre-teardown value
    assert_eq!(controller.result().len(), 1);
}
