//! Application controller: owns the map state and reacts to map and UI events.

use std::sync::Arc;

use digibuddy_types::{resolve_target, LatLng};
use parking_lot::Mutex;

use crate::backend::{Backend, RouteRequest, TravelMode};
use crate::config::AppConfig;
use crate::error::DigibuddyError;
use crate::feature_store::{Category, FeatureStore};
use crate::geolocation::{GeolocationTracker, UserPosition};
use crate::rendering::FeatureRenderer;
use crate::route_session::{RouteCompletion, RouteSession, SessionState};
use crate::status::StatusReporter;
use crate::surface::{Layer, MapEvent, MapSurface};

/// Event of a UI control outside of the map.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// The feature filter selector changed.
    CategoryChanged(Category),
    /// The travel mode selector changed.
    TravelModeChanged(TravelMode),
    /// The "locate me" button was pressed.
    LocateMe,
    /// A building was picked by name, e.g. in the sidebar list.
    RouteToBuilding(String),
}

/// How the view reacts to a newly drawn route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FitView {
    Keep,
    Route,
}

struct AppState<S> {
    surface: S,
    store: FeatureStore,
    session: RouteSession,
    renderer: FeatureRenderer,
    tracker: GeolocationTracker,
    category: Category,
    travel_mode: TravelMode,
}

/// The map application.
///
/// `App` is a cheap handle: clones share the same state, so every UI callback can own one.
/// The state lock is never held while waiting for the backend, which means a route request
/// can be overtaken by a newer one. Such stale responses are dropped by the [`RouteSession`].
pub struct App<S, B> {
    state: Arc<Mutex<AppState<S>>>,
    backend: Arc<B>,
    status: Arc<dyn StatusReporter>,
    config: Arc<AppConfig>,
}

impl<S, B> Clone for App<S, B> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            backend: self.backend.clone(),
            status: self.status.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S, B> App<S, B>
where
    S: MapSurface + 'static,
    B: Backend + 'static,
{
    /// Initializes the map and loads the building data.
    ///
    /// Steps run one after another: the view and the tile layer are set up, geolocation is
    /// started, the buildings are fetched and all of them are drawn. A failed fetch is reported
    /// to the user and leaves the map without features; the returned app is usable either way.
    pub async fn bootstrap(
        config: AppConfig,
        mut surface: S,
        backend: B,
        status: impl StatusReporter + 'static,
    ) -> Self {
        log::info!("Initializing map...");
        surface.set_view(config.center, config.zoom);
        surface.add_layer(Layer::Tiles {
            url_template: config.tile_url.clone(),
            max_zoom: config.max_zoom,
        });

        let app = Self {
            state: Arc::new(Mutex::new(AppState {
                surface,
                store: FeatureStore::default(),
                session: RouteSession::new(),
                renderer: FeatureRenderer::new(),
                tracker: GeolocationTracker::new(),
                category: Category::All,
                travel_mode: config.travel_mode,
            })),
            backend: Arc::new(backend),
            status: Arc::new(status),
            config: Arc::new(config),
        };

        {
            let mut state = app.state.lock();
            let state = &mut *state;
            state.tracker.start(&mut state.surface, &app.config.locate);
        }

        match app.reload_buildings().await {
            Ok(count) => log::info!("Building data received: {count} features"),
            Err(err) => app.report(&err),
        }

        log::info!("Application initialized successfully");
        app
    }

    /// Configuration the app was started with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Fetches the building data, replaces the stored features and redraws the current
    /// category. Returns the number of stored features.
    ///
    /// Layers of the previous set are removed together with it, so the popup of a feature that
    /// is gone can no longer start a route.
    pub async fn reload_buildings(&self) -> Result<usize, DigibuddyError> {
        log::debug!("Loading building data...");
        let features = self.backend.fetch_buildings().await?;

        let (stored, shown) = {
            let mut state = self.state.lock();
            let state = &mut *state;
            state.store.load(features);
            let shown = state
                .renderer
                .render(state.category, &state.store, &mut state.surface);
            (state.store.len(), shown)
        };
        self.status.report(&format!("{shown} features displayed"));

        Ok(stored)
    }

    /// Draws the features of the category instead of the currently drawn ones.
    pub fn show_category(&self, category: Category) -> usize {
        let count = {
            let mut state = self.state.lock();
            let state = &mut *state;
            state.category = category;
            state
                .renderer
                .render(category, &state.store, &mut state.surface)
        };

        self.status.report(&format!("{count} features displayed"));
        count
    }

    /// Handles an event of the map widget.
    pub async fn handle_map_event(&self, event: MapEvent) {
        match event {
            MapEvent::Click(target) => {
                if let Err(err) = self.route_from_user(target, FitView::Keep).await {
                    self.report(&err);
                }
            }
            MapEvent::LocationFound { position, accuracy } => {
                {
                    let mut state = self.state.lock();
                    let state = &mut *state;
                    state
                        .tracker
                        .location_found(position, accuracy, &mut state.surface);
                }
                self.status.report("Location found");
            }
            MapEvent::LocationError(message) => {
                let err = self.state.lock().tracker.location_error(&message);
                self.report(&err);
            }
            MapEvent::PointerEnter(layer) => {
                let mut state = self.state.lock();
                let state = &mut *state;
                state.renderer.pointer_enter(layer, &mut state.surface);
            }
            MapEvent::PointerLeave(layer) => {
                let mut state = self.state.lock();
                let state = &mut *state;
                state.renderer.pointer_leave(layer, &mut state.surface);
            }
            MapEvent::LayerClick(layer) => {
                let mut state = self.state.lock();
                let state = &mut *state;
                state.renderer.select(layer, &mut state.surface);
            }
            MapEvent::PopupAction(layer) => {
                let target = {
                    let state = self.state.lock();
                    state
                        .renderer
                        .feature_index(layer)
                        .and_then(|index| state.store.get(index))
                        .map(|feature| resolve_target(feature.geometry()))
                };

                let result = match target {
                    Some(Ok(target)) => self.route_from_user(target, FitView::Route).await,
                    Some(Err(err)) => Err(err.into()),
                    None => Err(DigibuddyError::BuildingNotFound(format!("layer {layer:?}"))),
                };
                if let Err(err) = result {
                    self.report(&err);
                }
            }
        }
    }

    /// Handles an event of a UI control.
    pub async fn handle_control(&self, event: ControlEvent) {
        match event {
            ControlEvent::CategoryChanged(category) => {
                self.show_category(category);
            }
            ControlEvent::TravelModeChanged(mode) => self.change_travel_mode(mode).await,
            ControlEvent::LocateMe => {
                let mut state = self.state.lock();
                let state = &mut *state;
                state.tracker.locate_me(
                    &mut state.surface,
                    self.config.locate_me_zoom,
                    &self.config.locate,
                );
            }
            ControlEvent::RouteToBuilding(name) => {
                if let Err(err) = self.route_to_building(&name).await {
                    self.report(&err);
                }
            }
        }
    }

    /// Routes from the user position to the feature with the given name.
    pub async fn route_to_building(&self, name: &str) -> Result<RouteCompletion, DigibuddyError> {
        let target = {
            let state = self.state.lock();
            if state.tracker.position().is_none() {
                return Err(DigibuddyError::NoActivePosition);
            }

            let feature = state
                .store
                .find_by_name(name)
                .ok_or_else(|| DigibuddyError::BuildingNotFound(name.to_string()))?;
            resolve_target(feature.geometry())?
        };

        self.route_from_user(target, FitView::Route).await
    }

    /// Routes between two points with the given travel mode.
    ///
    /// The current route is removed first. If the request is overtaken by a newer one before
    /// the backend answers, the answer is dropped and [`RouteCompletion::Stale`] is returned.
    pub async fn request_route(
        &self,
        start: LatLng,
        end: LatLng,
        mode: TravelMode,
    ) -> Result<RouteCompletion, DigibuddyError> {
        self.route(RouteRequest { start, end, mode }, FitView::Keep)
            .await
    }

    async fn change_travel_mode(&self, mode: TravelMode) {
        let active_request = {
            let mut state = self.state.lock();
            state.travel_mode = mode;
            match state.session.state() {
                SessionState::Active => state.session.request().copied(),
                _ => None,
            }
        };

        let Some(request) = active_request else {
            log::debug!("Travel mode set to {mode}");
            return;
        };

        match self.route(RouteRequest { mode, ..request }, FitView::Route).await {
            Ok(RouteCompletion::Rendered(_)) => {
                self.status.report("Route updated for new travel mode")
            }
            Ok(RouteCompletion::Stale) => {}
            Err(err) => {
                log::error!("Error updating route: {err}");
                self.status
                    .report("Failed to update route for new travel mode");
            }
        }
    }

    async fn route_from_user(
        &self,
        target: LatLng,
        fit: FitView,
    ) -> Result<RouteCompletion, DigibuddyError> {
        let (position, mode) = {
            let state = self.state.lock();
            (state.tracker.position(), state.travel_mode)
        };
        let position = position.ok_or(DigibuddyError::NoActivePosition)?;

        let completion = self
            .route(
                RouteRequest {
                    start: position.location,
                    end: target,
                    mode,
                },
                fit,
            )
            .await?;

        if let RouteCompletion::Rendered(_) = completion {
            self.status.report("Route calculated");
        }
        Ok(completion)
    }

    async fn route(
        &self,
        request: RouteRequest,
        fit: FitView,
    ) -> Result<RouteCompletion, DigibuddyError> {
        let token = {
            let mut state = self.state.lock();
            let state = &mut *state;
            state.session.begin(request, &mut state.surface)
        };

        let result = self.backend.get_route(&request).await;

        let mut state = self.state.lock();
        let state = &mut *state;
        let completion = state.session.complete(token, result, &mut state.surface)?;
        if let (RouteCompletion::Rendered(bounds), FitView::Route) = (completion, fit) {
            state.surface.fit_bounds(bounds, self.config.fit_padding);
        }

        Ok(completion)
    }

    fn report(&self, err: &DigibuddyError) {
        log::error!("{err}");
        self.status.report(err.status_message());
    }

    /// Last known user position.
    pub fn position(&self) -> Option<UserPosition> {
        self.state.lock().tracker.position()
    }

    /// State of the route session.
    pub fn session_state(&self) -> SessionState {
        self.state.lock().session.state()
    }

    /// Request of the shown or pending route.
    pub fn route_request(&self) -> Option<RouteRequest> {
        self.state.lock().session.request().copied()
    }

    /// Currently selected travel mode.
    pub fn travel_mode(&self) -> TravelMode {
        self.state.lock().travel_mode
    }

    /// Currently shown feature category.
    pub fn category(&self) -> Category {
        self.state.lock().category
    }

    /// Names of university features for the sidebar list.
    pub fn university_names(&self) -> Vec<String> {
        self.state
            .lock()
            .store
            .names_in(Category::University)
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Gives read access to the map surface.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.lock().surface)
    }
}
