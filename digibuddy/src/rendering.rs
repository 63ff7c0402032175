//! Drawing of the stored features on the map surface.

use digibuddy_types::Geometry;

use crate::feature_store::{Category, Feature, FeatureStore};
use crate::popup::{Popup, POPUP_ROWS, ROUTE_ACTION_LABEL};
use crate::style::{Icon, ShapeStyle};
use crate::surface::{Layer, LayerId, MapSurface, Marker, Shape};

/// Icon of a point feature. The first present property of `amenity`, `tourism` and
/// `university` decides the icon.
pub fn marker_icon(feature: &Feature) -> Icon {
    if feature.property_text("amenity").is_some() {
        Icon::square("/static/icons/amenity.png", 50)
    } else if feature.property_text("tourism").is_some() {
        Icon::square("/static/icons/tourism.png", 45)
    } else if feature.property_text("university").is_some() {
        Icon::square("/static/icons/university.png", 25)
    } else {
        Icon::square("/static/icons/default.png", 25)
    }
}

/// Popup summarizing the known properties of the feature.
pub fn feature_popup(feature: &Feature) -> Popup {
    Popup {
        title: feature.name().to_string(),
        rows: POPUP_ROWS
            .iter()
            .filter_map(|(key, label)| {
                feature
                    .property_text(key)
                    .map(|value| (label.to_string(), value))
            })
            .collect(),
        action: Some(ROUTE_ACTION_LABEL.to_string()),
    }
}

fn feature_layer(feature: &Feature) -> Layer {
    let popup = Some(feature_popup(feature));
    match feature.geometry() {
        Geometry::Point(position) => Layer::Marker(Marker {
            position: *position,
            icon: Some(marker_icon(feature)),
            popup,
        }),
        geometry => Layer::Shape(Shape {
            geometry: geometry.clone(),
            style: ShapeStyle::BUILDING,
            popup,
        }),
    }
}

#[derive(Debug, Clone, Copy)]
struct RenderedFeature {
    layer: LayerId,
    feature_index: usize,
}

/// Keeps track of the feature layers on the map and of the pointer interaction with them.
#[derive(Debug, Default)]
pub struct FeatureRenderer {
    rendered: Vec<RenderedFeature>,
    selected: Option<LayerId>,
}

impl FeatureRenderer {
    /// Creates a renderer with nothing drawn.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the drawn features with the ones of the category. Returns the number of drawn
    /// features.
    pub fn render(
        &mut self,
        category: Category,
        store: &FeatureStore,
        surface: &mut impl MapSurface,
    ) -> usize {
        self.clear(surface);

        self.rendered = store
            .filter(category)
            .map(|(feature_index, feature)| RenderedFeature {
                layer: surface.add_layer(feature_layer(feature)),
                feature_index,
            })
            .collect();

        log::debug!(
            "Rendered {} features of category '{category}'",
            self.rendered.len()
        );
        self.rendered.len()
    }

    /// Removes all drawn features from the map.
    pub fn clear(&mut self, surface: &mut impl MapSurface) {
        for rendered in self.rendered.drain(..) {
            surface.remove_layer(rendered.layer);
        }
        self.selected = None;
    }

    /// Index in the [`FeatureStore`] of the feature drawn as `layer`.
    pub fn feature_index(&self, layer: LayerId) -> Option<usize> {
        self.rendered
            .iter()
            .find(|rendered| rendered.layer == layer)
            .map(|rendered| rendered.feature_index)
    }

    /// Layers of the drawn features in drawing order.
    pub fn layers(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.rendered.iter().map(|rendered| rendered.layer)
    }

    /// Currently selected feature layer.
    pub fn selected(&self) -> Option<LayerId> {
        self.selected
    }

    /// Highlights the shape under the pointer.
    pub fn pointer_enter(&mut self, layer: LayerId, surface: &mut impl MapSurface) {
        if self.feature_index(layer).is_some() {
            set_shape_style(surface, layer, ShapeStyle::BUILDING_HIGHLIGHT);
        }
    }

    /// Restores the style of the shape the pointer left, unless it is selected.
    pub fn pointer_leave(&mut self, layer: LayerId, surface: &mut impl MapSurface) {
        if self.selected != Some(layer) && self.feature_index(layer).is_some() {
            set_shape_style(surface, layer, ShapeStyle::BUILDING);
        }
    }

    /// Marks the shape as selected. The previously selected shape loses its highlight.
    pub fn select(&mut self, layer: LayerId, surface: &mut impl MapSurface) {
        if self.feature_index(layer).is_none() {
            return;
        }

        if let Some(previous) = self.selected.replace(layer) {
            if previous != layer {
                set_shape_style(surface, previous, ShapeStyle::BUILDING);
            }
        }
        set_shape_style(surface, layer, ShapeStyle::BUILDING_HIGHLIGHT);
    }
}

fn set_shape_style(surface: &mut impl MapSurface, id: LayerId, style: ShapeStyle) {
    if let Some(Layer::Shape(shape)) = surface.layer(id) {
        if shape.style != style {
            let updated = Shape {
                style,
                ..shape.clone()
            };
            surface.update_layer(id, Layer::Shape(updated));
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::feature_store::RawFeature;
    use crate::surface::HeadlessSurface;

    fn point(properties: serde_json::Value) -> RawFeature {
        RawFeature {
            geometry: Some(json!({"type": "Point", "coordinates": [7.62, 51.96]})),
            properties: properties.as_object().cloned(),
        }
    }

    fn building(name: &str) -> RawFeature {
        RawFeature {
            geometry: Some(json!({
                "type": "Polygon",
                "coordinates": [[[7.60, 51.96], [7.61, 51.96], [7.61, 51.97], [7.60, 51.96]]]
            })),
            properties: json!({"name": name, "university": "yes"}).as_object().cloned(),
        }
    }

    fn store() -> FeatureStore {
        let mut store = FeatureStore::default();
        store.load(vec![
            point(json!({"name": "Pizza", "amenity": "restaurant", "tourism": "yes"})),
            point(json!({"name": "Dom", "tourism": "attraction", "addr:street": "Domplatz"})),
            building("Schloss"),
            building("Hörsaal"),
        ]);
        store
    }

    fn style(surface: &HeadlessSurface, id: LayerId) -> ShapeStyle {
        match surface.layer(id) {
            Some(Layer::Shape(shape)) => shape.style,
            other => panic!("expected a shape, got {other:?}"),
        }
    }

    #[test]
    fn icon_precedence() {
        let store = store();
        let icons: Vec<_> = store
            .filter(Category::All)
            .map(|(_, feature)| marker_icon(feature).url)
            .collect();

        assert_eq!(
            icons,
            vec![
                "/static/icons/amenity.png",
                "/static/icons/tourism.png",
                "/static/icons/university.png",
                "/static/icons/university.png",
            ]
        );
        assert_eq!(
            marker_icon(&Feature::new(Geometry::Point(Default::default()), Default::default())),
            Icon::square("/static/icons/default.png", 25)
        );
    }

    #[test]
    fn popup_lists_known_properties() {
        let store = store();
        let dom = store.find_by_name("Dom").expect("loaded");

        let popup = feature_popup(dom);
        assert_eq!(popup.title, "Dom");
        assert_eq!(
            popup.rows,
            vec![
                ("Tourism".to_string(), "attraction".to_string()),
                ("Address".to_string(), "Domplatz".to_string()),
            ]
        );
        assert_eq!(popup.action.as_deref(), Some(ROUTE_ACTION_LABEL));
    }

    #[test]
    fn render_replaces_previous_layers() {
        let store = store();
        let mut surface = HeadlessSurface::new();
        let mut renderer = FeatureRenderer::new();

        assert_eq!(renderer.render(Category::All, &store, &mut surface), 4);
        assert_eq!(surface.len(), 4);

        assert_eq!(renderer.render(Category::University, &store, &mut surface), 2);
        assert_eq!(surface.len(), 2);
        assert!(surface
            .layers()
            .all(|(_, layer)| matches!(layer, Layer::Shape(_))));

        let layers: Vec<_> = renderer.layers().collect();
        assert_eq!(renderer.feature_index(layers[0]), Some(2));
        assert_eq!(renderer.feature_index(layers[1]), Some(3));

        assert_eq!(renderer.render(Category::Unknown, &store, &mut surface), 0);
        assert!(surface.is_empty());
    }

    #[test]
    fn point_features_become_markers() {
        let store = store();
        let mut surface = HeadlessSurface::new();
        let mut renderer = FeatureRenderer::new();

        renderer.render(Category::Amenity, &store, &mut surface);
        let layer = renderer.layers().next().expect("one feature");

        assert_matches!(
            surface.layer(layer),
            Some(Layer::Marker(Marker { icon: Some(icon), popup: Some(_), .. })) if icon.size == [50, 50]
        );
    }

    #[test]
    fn hover_and_selection() {
        let store = store();
        let mut surface = HeadlessSurface::new();
        let mut renderer = FeatureRenderer::new();
        renderer.render(Category::University, &store, &mut surface);
        let layers: Vec<_> = renderer.layers().collect();
        let (first, second) = (layers[0], layers[1]);

        renderer.pointer_enter(first, &mut surface);
        assert_eq!(style(&surface, first), ShapeStyle::BUILDING_HIGHLIGHT);
        renderer.pointer_leave(first, &mut surface);
        assert_eq!(style(&surface, first), ShapeStyle::BUILDING);

        renderer.select(first, &mut surface);
        renderer.pointer_leave(first, &mut surface);
        assert_eq!(style(&surface, first), ShapeStyle::BUILDING_HIGHLIGHT);
        assert_eq!(renderer.selected(), Some(first));

        renderer.select(second, &mut surface);
        assert_eq!(renderer.selected(), Some(second));
        assert_eq!(style(&surface, first), ShapeStyle::BUILDING);
        assert_eq!(style(&surface, second), ShapeStyle::BUILDING_HIGHLIGHT);
    }

    #[test]
    fn foreign_layers_are_ignored() {
        let store = store();
        let mut surface = HeadlessSurface::new();
        let mut renderer = FeatureRenderer::new();
        renderer.render(Category::University, &store, &mut surface);

        let route = surface.add_layer(Layer::Shape(Shape {
            geometry: Geometry::LineString(vec![]),
            style: ShapeStyle::ROUTE,
            popup: None,
        }));
        renderer.select(route, &mut surface);
        renderer.pointer_enter(route, &mut surface);

        assert_eq!(renderer.selected(), None);
        assert_eq!(style(&surface, route), ShapeStyle::ROUTE);
    }
}
