//! Runs the campus map against a live DigiBuddy server without a browser.
//!
//! The map is kept in memory and the user position is simulated. Usage:
//!
//! ```text
//! cargo run --example headless -- http://localhost:5000 Schloss
//! ```

use digibuddy::backend::{HttpBackend, TravelMode};
use digibuddy::digibuddy_types::latlng;
use digibuddy::feature_store::Category;
use digibuddy::surface::{HeadlessSurface, Layer, MapEvent};
use digibuddy::{App, AppConfig, ControlEvent, StatusLine};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let backend_url = args
        .next()
        .unwrap_or_else(|| "http://localhost:5000".to_string());
    let building = args.next();

    let config = AppConfig::default().with_backend_url(backend_url);
    let backend = HttpBackend::new(&config.backend_url).expect("failed to create HTTP client");
    let status = StatusLine::default();

    let app = App::bootstrap(config, HeadlessSurface::new(), backend, status.clone()).await;
    println!("Server: {}", app.config().backend_url);
    print_status(&status);

    app.handle_map_event(MapEvent::LocationFound {
        position: latlng!(51.9607, 7.6257),
        accuracy: 30.0,
    })
    .await;

    let building = building.or_else(|| app.university_names().into_iter().next());
    let Some(building) = building else {
        println!("No university buildings to route to");
        return;
    };

    for mode in [TravelMode::FootWalking, TravelMode::CyclingRegular] {
        app.handle_control(ControlEvent::TravelModeChanged(mode))
            .await;
        app.handle_control(ControlEvent::RouteToBuilding(building.clone()))
            .await;
        print_status(&status);

        if let Some(request) = app.route_request() {
            println!(
                "{mode}: ({:.5}, {:.5}) -> ({:.5}, {:.5})",
                request.start.lat(),
                request.start.lng(),
                request.end.lat(),
                request.end.lng(),
            );
        }
    }

    app.handle_control(ControlEvent::CategoryChanged(Category::Amenity))
        .await;
    print_status(&status);

    app.with_surface(|surface| {
        let shapes = surface
            .layers()
            .filter(|(_, layer)| matches!(layer, Layer::Shape(_)))
            .count();
        println!("{} layers on the map, {shapes} of them shapes", surface.len());
    });
}

fn print_status(status: &StatusLine) {
    if let Some(message) = status.current() {
        println!("Status: {message}");
    }
}
