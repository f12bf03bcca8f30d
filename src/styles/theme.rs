/*
 * The built-in style sheet, used when no configuration file provides one.
 * Colors and stroke settings live here in one place so the default look of
 * the demo can be changed without touching the lifecycle code.
 */
use super::definition::StyleDefinition;
use super::primitives::{BoxSpec, CircleSpec, Color, FillSpec, LineCap, LineJoin, StrokeSpec};

/*
 * Returns the "Neon Night" style sheet: translucent dark fills with bright
 * outlines, plus a point marker drawn as a circle.
 */
pub fn default_style_sheet() -> Vec<StyleDefinition> {
    // --- Color Palette ---
    let fill_dark = Color::rgba(30, 30, 30, 160);
    let outline_cyan = Color::rgb(0, 220, 255);
    let outline_orange = Color::rgb(255, 165, 0);
    let marker_fill = Color::rgb(255, 100, 100);

    let outline = StrokeSpec {
        color: outline_cyan,
        width: 2.0,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        line_dash: Vec::new(),
    };
    let dashed_outline = StrokeSpec {
        color: outline_orange,
        width: 1.5,
        line_cap: LineCap::Butt,
        line_join: LineJoin::Miter,
        line_dash: vec![6.0, 4.0],
    };

    vec![
        StyleDefinition::Fill(FillSpec { color: fill_dark }),
        StyleDefinition::Stroke(outline.clone()),
        StyleDefinition::Circle(CircleSpec {
            radius: 6.0,
            fill: Some(FillSpec { color: marker_fill }),
            stroke: Some(outline.clone()),
        }),
        // Region highlight
        StyleDefinition::Box(BoxSpec {
            fill: Some(FillSpec { color: fill_dark }),
            stroke: Some(dashed_outline),
            circle: None,
            z_index: Some(10),
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sheet_mounts_cleanly() {
        for definition in default_style_sheet() {
            let mut node = definition.instantiate();
            node.mount()
                .unwrap_or_else(|e| panic!("{} failed to mount: {e}", node.name()));
            assert!(node.describe_style().is_some());
        }
    }
}
