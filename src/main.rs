use proximo::config::Settings;
use proximo::core::LocationFilterController;
use proximo::error::Error;
use proximo::models::{GeoEvent, GeoPoint, PositionUpdate};
use proximo::providers::{EntityProvider, RandomizedTierProvider, StaticEntityProvider};
use proximo::render::{JsonMapSink, MapSink, MapView};
use tracing::info;

fn build_provider(settings: &Settings) -> Result<Box<dyn EntityProvider>, Error> {
    match settings.entities.source.as_str() {
        "file" => {
            let path = settings.entities.path.as_deref().ok_or_else(|| {
                Error::EntityData("entities.source = \"file\" requires entities.path".into())
            })?;
            Ok(Box::new(StaticEntityProvider::from_toml_file(path)?))
        }
        "randomized" => {
            let provider = RandomizedTierProvider::new(settings.entities.seed)
                .with_tier(10, ["Mira Petrov", "Luka Savic"])
                .with_tier(20, ["Ana Kovac"])
                .with_tier(30, ["Ivan Lukic"])
                .with_tier(40, ["Sara Ilic"])
                .with_tier(
                    300,
                    [
                        "Jana Popov",
                        "Filip Babic",
                        "Nina Tadic",
                        "Vuk Matic",
                        "Lena Antic",
                        "Petar Zoric",
                        "Marko Simic",
                    ],
                );
            Ok(Box::new(provider))
        }
        _ => Ok(Box::new(StaticEntityProvider::sample())),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging; map views go to stdout, logs to stderr
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Proximo nearby-entity demo...");

    // Load configuration
    let settings = Settings::load()?;
    info!(
        default_radius_km = settings.radius.default_km,
        source = %settings.entities.source,
        "Configuration loaded"
    );

    let provider = build_provider(&settings)?;

    info!(
        zoom = settings.map.zoom,
        tile_url = %settings.map.tile_url,
        "Map collaborator hints"
    );

    let mut controller = LocationFilterController::with_radius(settings.radius.default_km)?;

    // Every recompute goes to the map collaborator as one JSON line
    let mut sink = JsonMapSink::new(std::io::stdout());
    controller.subscribe(move |snapshot| {
        sink.render(&MapView::from_snapshot(snapshot));
    });

    // Simulated geolocation session: permission prompt resolves, then a fix
    // arrives near Loznica, Serbia
    controller.apply(GeoEvent::PermissionGranted);

    let start = GeoPoint::new(44.50, 19.15)?;
    controller.set_candidates(provider.candidates(start, controller.radius_km()));
    controller.apply(GeoEvent::Fix(PositionUpdate::now(start)));

    info!(
        status = ?controller.status(),
        within = controller.result().len(),
        "First fix applied"
    );

    // Walk the radius menu the way the UI dropdown would
    for &radius_km in &settings.radius.menu_km {
        controller.set_radius(radius_km)?;
        controller.set_candidates(provider.candidates(start, radius_km));
        info!(
            radius_km,
            within = controller.result().len(),
            "Radius selected"
        );
    }

    controller.teardown();
    info!("Session ended");

    Ok(())
}
