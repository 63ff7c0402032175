//! Visual styles of map layers: colors, shape strokes/fills and marker icons.

use serde::{Deserialize, Serialize};

/// RGB color, serialized as a CSS hex string (`#RRGGBB`).
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from_hex(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<Color> for String {
    fn from(val: Color) -> Self {
        val.to_hex()
    }
}

impl Color {
    /// Constructs color from its RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts the color into a CSS hex string: `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parses a color from `#RRGGBB` string.
    pub fn try_from_hex(hex_string: &str) -> Option<Self> {
        if hex_string.len() != 7 || !hex_string.starts_with('#') {
            return None;
        }

        let r = u8::from_str_radix(hex_string.get(1..3)?, 16).ok()?;
        let g = u8::from_str_radix(hex_string.get(3..5)?, 16).ok()?;
        let b = u8::from_str_radix(hex_string.get(5..7)?, 16).ok()?;

        Some(Self { r, g, b })
    }

    /// Parses a color from `#RRGGBB` string at compile time.
    ///
    /// # Panics
    ///
    /// Panics if the parsing fails.
    pub const fn from_hex(hex_string: &'static str) -> Self {
        let bytes = hex_string.as_bytes();
        if bytes.len() != 7 || bytes[0] != b'#' {
            panic!("Invalid color hex string");
        }

        Self {
            r: decode_byte(bytes[1], bytes[2]),
            g: decode_byte(bytes[3], bytes[4]),
            b: decode_byte(bytes[5], bytes[6]),
        }
    }
}

const fn decode_byte(high: u8, low: u8) -> u8 {
    decode_char(high) * 16 + decode_char(low)
}

const fn decode_char(byte: u8) -> u8 {
    match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        b'A'..=b'F' => byte - b'A' + 10,
        _ => panic!("Invalid hex character"),
    }
}

/// Stroke and fill of a vector shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub weight: f32,
    /// Stroke opacity, `0.0..=1.0`.
    pub opacity: f32,
    /// Fill color. Lines are not filled.
    pub fill_color: Option<Color>,
    /// Fill opacity, `0.0..=1.0`.
    pub fill_opacity: f32,
}

impl ShapeStyle {
    /// Default building outline.
    pub const BUILDING: ShapeStyle = ShapeStyle {
        color: Color::from_hex("#2c5282"),
        weight: 2.0,
        opacity: 1.0,
        fill_color: Some(Color::from_hex("#4299e1")),
        fill_opacity: 0.2,
    };

    /// Building under the pointer or selected by the user.
    pub const BUILDING_HIGHLIGHT: ShapeStyle = ShapeStyle {
        color: Color::from_hex("#c05621"),
        weight: 3.0,
        opacity: 1.0,
        fill_color: Some(Color::from_hex("#ed8936")),
        fill_opacity: 0.4,
    };

    /// Calculated route line.
    pub const ROUTE: ShapeStyle = ShapeStyle {
        color: Color::from_hex("#3498db"),
        weight: 8.0,
        opacity: 1.0,
        fill_color: None,
        fill_opacity: 0.0,
    };

    /// Geolocation accuracy circle.
    pub const ACCURACY: ShapeStyle = ShapeStyle {
        color: Color::from_hex("#4299e1"),
        weight: 2.0,
        opacity: 1.0,
        fill_color: Some(Color::from_hex("#4299e1")),
        fill_opacity: 0.15,
    };
}

/// Image used to draw a point marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    /// Image url.
    pub url: String,
    /// Width and height of the image in pixels.
    pub size: [u32; 2],
}

impl Icon {
    /// Creates a square icon.
    pub fn square(url: impl Into<String>, size: u32) -> Self {
        Self {
            url: url.into(),
            size: [size, size],
        }
    }
}
