//! Marker of the user position and its accuracy circle.

use digibuddy_types::LatLng;

use crate::error::DigibuddyError;
use crate::style::ShapeStyle;
use crate::surface::{Circle, Layer, LayerId, LocateOptions, MapSurface, Marker};

/// Last known position of the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserPosition {
    /// Position.
    pub location: LatLng,
    /// Radius of the accuracy circle in metres.
    pub accuracy_radius: f64,
}

#[derive(Debug, Clone, Copy)]
struct PositionLayers {
    marker: LayerId,
    circle: LayerId,
}

/// Tracks the user position reported by the map surface.
#[derive(Debug, Default)]
pub struct GeolocationTracker {
    position: Option<UserPosition>,
    layers: Option<PositionLayers>,
}

impl GeolocationTracker {
    /// Creates a tracker without a known position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known position.
    pub fn position(&self) -> Option<UserPosition> {
        self.position
    }

    /// Position marker layer, once a position is known.
    pub fn marker_layer(&self) -> Option<LayerId> {
        self.layers.map(|layers| layers.marker)
    }

    /// Accuracy circle layer, once a position is known.
    pub fn circle_layer(&self) -> Option<LayerId> {
        self.layers.map(|layers| layers.circle)
    }

    /// Starts geolocation on the surface.
    pub fn start(&self, surface: &mut impl MapSurface, options: &LocateOptions) {
        log::debug!("Starting location tracking");
        surface.locate(options);
    }

    /// Handles a position update. `accuracy` is the raw value reported by the geolocation API,
    /// the shown radius is half of it.
    pub fn location_found(
        &mut self,
        location: LatLng,
        accuracy: f64,
        surface: &mut impl MapSurface,
    ) -> UserPosition {
        let position = UserPosition {
            location,
            accuracy_radius: accuracy / 2.0,
        };

        let marker = Layer::Marker(Marker::new(location));
        let circle = Layer::Circle(Circle {
            center: location,
            radius: position.accuracy_radius,
            style: ShapeStyle::ACCURACY,
        });

        let updated = self.layers.is_some_and(|layers| {
            surface.update_layer(layers.marker, marker.clone()).is_some()
                && surface.update_layer(layers.circle, circle.clone()).is_some()
        });
        if !updated {
            if let Some(stale) = self.layers.take() {
                surface.remove_layer(stale.marker);
                surface.remove_layer(stale.circle);
            }
            self.layers = Some(PositionLayers {
                marker: surface.add_layer(marker),
                circle: surface.add_layer(circle),
            });
        }

        log::debug!("Location found: {position:?}");
        self.position = Some(position);
        position
    }

    /// Handles a geolocation failure. The last known position stays unchanged.
    pub fn location_error(&self, message: &str) -> DigibuddyError {
        log::error!("Location error: {message}");
        DigibuddyError::LocationUnavailable(message.to_string())
    }

    /// "Locate me" action: centers the view on the known position, or restarts geolocation if
    /// the position is not known yet.
    pub fn locate_me(&self, surface: &mut impl MapSurface, zoom: u8, options: &LocateOptions) {
        match self.position {
            Some(position) => surface.set_view(position.location, zoom),
            None => self.start(surface, options),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;
    use digibuddy_types::latlng;

    use super::*;
    use crate::surface::HeadlessSurface;

    #[test]
    fn second_update_moves_existing_marker() {
        let mut surface = HeadlessSurface::new();
        let mut tracker = GeolocationTracker::new();

        tracker.location_found(latlng!(51.96, 7.62), 40.0, &mut surface);
        let marker = tracker.marker_layer().expect("marker is created");
        let circle = tracker.circle_layer().expect("circle is created");

        let position = tracker.location_found(latlng!(51.97, 7.63), 10.0, &mut surface);
        assert_relative_eq!(position.accuracy_radius, 5.0);

        assert_eq!(surface.len(), 2);
        assert_eq!(tracker.marker_layer(), Some(marker));
        assert_eq!(
            surface.layer(marker),
            Some(&Layer::Marker(Marker::new(latlng!(51.97, 7.63))))
        );
        assert_matches!(
            surface.layer(circle),
            Some(Layer::Circle(Circle { center, radius, .. })) if *center == latlng!(51.97, 7.63) && *radius == 5.0
        );
    }

    #[test]
    fn radius_is_half_of_accuracy() {
        let mut surface = HeadlessSurface::new();
        let mut tracker = GeolocationTracker::new();

        tracker.location_found(latlng!(51.96, 7.62), 30.0, &mut surface);
        assert_eq!(
            tracker.position(),
            Some(UserPosition {
                location: latlng!(51.96, 7.62),
                accuracy_radius: 15.0,
            })
        );
    }

    #[test]
    fn error_keeps_position() {
        let mut surface = HeadlessSurface::new();
        let mut tracker = GeolocationTracker::new();
        tracker.location_found(latlng!(51.96, 7.62), 30.0, &mut surface);

        let err = tracker.location_error("User denied Geolocation");
        assert_matches!(err, DigibuddyError::LocationUnavailable(_));
        assert!(tracker.position().is_some());
        assert_eq!(surface.len(), 2);
    }

    #[test]
    fn locate_me() {
        let mut surface = HeadlessSurface::new();
        let mut tracker = GeolocationTracker::new();
        let options = LocateOptions::default();

        tracker.locate_me(&mut surface, 17, &options);
        assert_eq!(surface.locate_requests().len(), 1);
        assert_eq!(surface.view(), None);

        tracker.location_found(latlng!(51.96, 7.62), 30.0, &mut surface);
        tracker.locate_me(&mut surface, 17, &options);
        assert_eq!(surface.locate_requests().len(), 1);
        assert_eq!(surface.view(), Some((latlng!(51.96, 7.62), 17)));
    }
}
