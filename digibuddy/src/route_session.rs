//! Route shown on the map together with its endpoint markers.
//!
//! A session is either idle (nothing on the map), pending (endpoint markers are placed and the
//! backend is calculating the route) or active (route line and both markers are shown).
//! Starting a new route always clears the previous one first, so at most one route with its
//! markers is ever visible.
//!
//! Calculating a route is asynchronous, and the user may start another route before the
//! previous response arrives. Every request gets a [`RouteToken`]; only the response carrying
//! the token of the latest request is applied, all others are dropped.

use digibuddy_types::BoundingBox;

use crate::backend::{RouteRequest, RouteShape};
use crate::error::DigibuddyError;
use crate::style::ShapeStyle;
use crate::surface::{Layer, LayerId, MapSurface, Marker, Shape};

/// Identifies a routing request issued by [`RouteSession::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteToken(u64);

/// Observable state of a [`RouteSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No route and no markers.
    Idle,
    /// Markers are placed, the route is being calculated.
    Pending,
    /// Route and markers are shown.
    Active,
}

/// Result of applying a backend response with [`RouteSession::complete`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteCompletion {
    /// The route is drawn. Contains the route bounds.
    Rendered(BoundingBox),
    /// A newer request was started or the session was cleared, the response was dropped.
    Stale,
}

/// Owner of the route layer and the endpoint markers.
#[derive(Debug, Default)]
pub struct RouteSession {
    route: Option<LayerId>,
    markers: Vec<LayerId>,
    request: Option<RouteRequest>,
    pending: Option<RouteToken>,
    next_token: u64,
}

impl RouteSession {
    /// Creates an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        match (self.route, self.pending) {
            (Some(_), _) => SessionState::Active,
            (None, Some(_)) => SessionState::Pending,
            (None, None) => SessionState::Idle,
        }
    }

    /// Request the shown (or pending) route was created with.
    pub fn request(&self) -> Option<&RouteRequest> {
        self.request.as_ref()
    }

    /// Endpoint markers currently on the map, start first.
    pub fn markers(&self) -> &[LayerId] {
        &self.markers
    }

    /// Route layer currently on the map.
    pub fn route_layer(&self) -> Option<LayerId> {
        self.route
    }

    /// Removes the route and the markers from the map. Any pending response becomes stale.
    pub fn clear(&mut self, surface: &mut impl MapSurface) {
        if let Some(route) = self.route.take() {
            surface.remove_layer(route);
        }
        for marker in self.markers.drain(..) {
            surface.remove_layer(marker);
        }
        if let Some(token) = self.pending.take() {
            log::debug!("Route request {token:?} is superseded");
        }
        self.request = None;
    }

    /// Starts a new route: clears the current one, places the endpoint markers and returns the
    /// token the backend response must be completed with.
    pub fn begin(&mut self, request: RouteRequest, surface: &mut impl MapSurface) -> RouteToken {
        self.clear(surface);

        self.markers = vec![
            surface.add_layer(Layer::Marker(Marker::new(request.start))),
            surface.add_layer(Layer::Marker(Marker::new(request.end))),
        ];
        self.request = Some(request);

        let token = RouteToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(token);

        log::debug!("Route request {token:?} started: {request:?}");
        token
    }

    /// Applies the backend response for the request identified by `token`.
    ///
    /// A response of a superseded request is dropped, whether it succeeded or not. A failed
    /// current request clears the session and returns the error.
    pub fn complete(
        &mut self,
        token: RouteToken,
        result: Result<RouteShape, DigibuddyError>,
        surface: &mut impl MapSurface,
    ) -> Result<RouteCompletion, DigibuddyError> {
        if self.pending != Some(token) {
            log::debug!("Dropping response of stale route request {token:?}");
            return Ok(RouteCompletion::Stale);
        }
        self.pending = None;

        match result {
            Ok(shape) => {
                let bounds = shape.bounds();
                let layer = Layer::Shape(Shape {
                    geometry: shape.geometry().clone(),
                    style: ShapeStyle::ROUTE,
                    popup: None,
                });
                self.route = Some(surface.add_layer(layer));

                Ok(RouteCompletion::Rendered(bounds))
            }
            Err(err) => {
                log::error!("Error calculating route: {err}");
                self.clear(surface);
                Err(err)
            }
        }
    }
}
