use std::collections::BTreeMap;

use digibuddy_types::{BoundingBox, LatLng};

use super::{Layer, LayerId, LocateOptions, MapSurface};

/// Map surface without any rendering.
///
/// Keeps layers in memory in the order they were added and remembers every view change. Used
/// to run the application without a browser (command line tools, tests).
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    layers: BTreeMap<LayerId, Layer>,
    next_id: u64,
    view: Option<(LatLng, u8)>,
    locate_requests: Vec<LocateOptions>,
    fitted_bounds: Option<(BoundingBox, u32)>,
}

impl HeadlessSurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over the layers from bottom to top.
    pub fn layers(&self) -> impl Iterator<Item = (LayerId, &Layer)> + '_ {
        self.layers.iter().map(|(id, layer)| (*id, layer))
    }

    /// Number of layers on the surface.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if there are no layers on the surface.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Current center and zoom, if the view was ever set.
    pub fn view(&self) -> Option<(LatLng, u8)> {
        self.view
    }

    /// All geolocation requests made so far.
    pub fn locate_requests(&self) -> &[LocateOptions] {
        &self.locate_requests
    }

    /// Box and padding of the last [`MapSurface::fit_bounds`] call.
    pub fn fitted_bounds(&self) -> Option<(BoundingBox, u32)> {
        self.fitted_bounds
    }
}

impl MapSurface for HeadlessSurface {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.view = Some((center, zoom));
    }

    fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.layers.insert(id, layer);

        id
    }

    fn update_layer(&mut self, id: LayerId, layer: Layer) -> Option<Layer> {
        let entry = self.layers.get_mut(&id)?;
        Some(std::mem::replace(entry, layer))
    }

    fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        self.layers.remove(&id)
    }

    fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    fn locate(&mut self, options: &LocateOptions) {
        self.locate_requests.push(options.clone());
    }

    fn fit_bounds(&mut self, bounds: BoundingBox, padding: u32) {
        if let Some(zoom) = self.view.map(|(_, zoom)| zoom) {
            self.view = Some((bounds.center(), zoom));
        }
        self.fitted_bounds = Some((bounds, padding));
    }
}
