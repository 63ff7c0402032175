//! In-memory storage of the building features received from the backend.

use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use digibuddy_types::Geometry;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Name given to features without a `name` property.
pub const UNNAMED_FEATURE: &str = "Unnamed Feature";

/// Values of the `amenity` property shown by the [`Category::Amenity`] filter.
pub const FOOD_AMENITIES: [&str; 6] = [
    "restaurant",
    "bar",
    "cafe",
    "fast_food",
    "food_court",
    "ice_cream",
];

/// Feature as it arrives from the backend, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeature {
    /// GeoJSON geometry object. Kept undecoded so that one malformed geometry only drops its
    /// own feature. Features without geometry are not stored.
    #[serde(default)]
    pub geometry: Option<Value>,
    /// Free-form properties.
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

/// A named building, point of interest or area.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    name: String,
    geometry: Geometry,
    properties: Map<String, Value>,
}

impl Feature {
    /// Creates a new feature. The name is taken from the `name` property.
    pub fn new(geometry: Geometry, properties: Map<String, Value>) -> Self {
        let name = properties
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNNAMED_FEATURE)
            .to_string();

        Self {
            name,
            geometry,
            properties,
        }
    }

    /// Display name of the feature.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geometry of the feature.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// All properties of the feature.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Returns true if the property exists and is not `null`.
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.get(key).is_some_and(|value| !value.is_null())
    }

    /// Text of a property for display. Empty, `null`, `false` and zero values are treated as
    /// absent, matching how the popups have always been filled.
    pub fn property_text(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            value @ (Value::Array(_) | Value::Object(_)) => Some(value.to_string()),
            _ => None,
        }
    }
}

/// Feature filter selected in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    /// Every feature.
    #[default]
    All,
    /// Food and drink places, see [`FOOD_AMENITIES`].
    Amenity,
    /// Features with a `tourism` property.
    Tourism,
    /// Features with a `university` property.
    University,
    /// Selector value the application does not know. Matches nothing.
    Unknown,
}

impl Category {
    /// Returns true if the feature passes the filter.
    pub fn matches(&self, feature: &Feature) -> bool {
        match self {
            Category::All => true,
            Category::Amenity => feature
                .properties()
                .get("amenity")
                .and_then(Value::as_str)
                .is_some_and(|amenity| FOOD_AMENITIES.contains(&amenity)),
            Category::Tourism => feature.has_property("tourism"),
            Category::University => feature.has_property("university"),
            Category::Unknown => false,
        }
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "all" => Category::All,
            "amenity" => Category::Amenity,
            "tourism" => Category::Tourism,
            "university" => Category::University,
            other => {
                log::warn!("Unknown feature category '{other}'");
                Category::Unknown
            }
        })
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Category::All => "all",
            Category::Amenity => "amenity",
            Category::Tourism => "tourism",
            Category::University => "university",
            Category::Unknown => "unknown",
        })
    }
}

fn decode_geometry(value: Value) -> Result<Geometry, String> {
    let geometry = geojson::Geometry::from_json_value(value).map_err(|err| err.to_string())?;
    Geometry::try_from(&geometry).map_err(|err| err.to_string())
}

/// Last fetched set of features.
#[derive(Debug, Default)]
pub struct FeatureStore {
    features: Vec<Feature>,
}

impl FeatureStore {
    /// Replaces all stored features with the given set.
    ///
    /// Features without a geometry or with an invalid one are skipped.
    pub fn load(&mut self, features: impl IntoIterator<Item = RawFeature>) {
        self.features = features
            .into_iter()
            .filter_map(|raw| {
                let properties = raw.properties.unwrap_or_default();
                let Some(geometry) = raw.geometry else {
                    log::warn!("Skipping feature without geometry: {properties:?}");
                    return None;
                };

                match decode_geometry(geometry) {
                    Ok(geometry) => Some(Feature::new(geometry, properties)),
                    Err(reason) => {
                        log::warn!("Skipping feature with invalid geometry: {reason}");
                        None
                    }
                }
            })
            .collect();

        log::debug!("Feature store loaded with {} features", self.features.len());
    }

    /// Features passing the category filter, in load order.
    pub fn filter(&self, category: Category) -> impl Iterator<Item = (usize, &Feature)> + '_ {
        self.features
            .iter()
            .enumerate()
            .filter(move |(_, feature)| category.matches(feature))
    }

    /// Names of the features passing the category filter.
    pub fn names_in(&self, category: Category) -> Vec<&str> {
        self.filter(category).map(|(_, f)| f.name()).collect()
    }

    /// First feature with exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|feature| feature.name() == name)
    }

    /// Feature at the given load position.
    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    /// Number of stored features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if no features are stored.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
