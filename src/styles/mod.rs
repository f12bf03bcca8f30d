/*
 * Concrete styles built on the style lifecycle: engine-agnostic descriptions
 * (`primitives`), the engine objects they become (`engine`), the factories
 * that build them (`concrete`), serializable definitions and the `StyleNode`
 * view used to drive them (`definition`), and the default style sheet
 * (`theme`).
 */
pub mod concrete;
pub mod definition;
pub mod engine;
pub mod primitives;
pub mod theme;

pub use concrete::{BoxStyle, CircleStyle, FillStyle, IconStyle, StrokeStyle};
pub use definition::{StyleDefinition, StyleNode};
pub use primitives::{BoxSpec, CircleSpec, Color, FillSpec, LineCap, LineJoin, StrokeSpec};
pub use theme::default_style_sheet;
