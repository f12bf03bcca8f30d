/*
 * Engine-agnostic style descriptions. These are what configuration files and
 * the built-in style sheet are written in; the concrete style factories turn
 * them into engine objects at mount time. Everything here is plain data with
 * serde support so a style sheet can round-trip through JSON.
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    Bevel,
    #[default]
    Round,
    Miter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillSpec {
    pub color: Color,
}

/*
 * Describes a stroke. `width` must be a positive, finite number and every
 * entry of `line_dash` must be non-negative; the engine rejects anything else
 * at creation time.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeSpec {
    pub color: Color,
    pub width: f32,
    #[serde(default)]
    pub line_cap: LineCap,
    #[serde(default)]
    pub line_join: LineJoin,
    #[serde(default)]
    pub line_dash: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleSpec {
    pub radius: f32,
    #[serde(default)]
    pub fill: Option<FillSpec>,
    #[serde(default)]
    pub stroke: Option<StrokeSpec>,
}

// A full feature style combining the parts above.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    #[serde(default)]
    pub fill: Option<FillSpec>,
    #[serde(default)]
    pub stroke: Option<StrokeSpec>,
    #[serde(default)]
    pub circle: Option<CircleSpec>,
    #[serde(default)]
    pub z_index: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_alpha_defaults_to_opaque() {
        let color: Color = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
        assert_eq!(color, Color::rgb(1, 2, 3));
        assert_eq!(color.a, 255);
    }

    #[test]
    fn test_stroke_spec_defaults() {
        let spec: StrokeSpec =
            serde_json::from_str(r#"{"color":{"r":0,"g":0,"b":0},"width":1.5}"#).unwrap();
        assert_eq!(spec.line_cap, LineCap::Round);
        assert_eq!(spec.line_join, LineJoin::Round);
        assert!(spec.line_dash.is_empty());
    }

    #[test]
    fn test_line_cap_uses_snake_case_names() {
        assert_eq!(serde_json::to_string(&LineCap::Square).unwrap(), r#""square""#);
        let join: LineJoin = serde_json::from_str(r#""miter""#).unwrap();
        assert_eq!(join, LineJoin::Miter);
    }
}
