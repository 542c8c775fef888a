//! Renders a [`Scene`] as a standalone SVG document.

use std::fmt::Write;

use crate::overlay::LineOverlay;
use crate::projection::ViewTransform;
use crate::render::{CIRCLE_OPACITY, CIRCLE_STROKE, CIRCLE_STROKE_WIDTH, Scene};

/// Fill colors by flow bucket: arrivals-dominant, balanced,
/// departures-dominant.
fn bucket_fill(flow_bucket: f64) -> &'static str {
    if flow_bucket < 0.25 {
        "steelblue"
    } else if flow_bucket < 0.75 {
        "mediumpurple"
    } else {
        "darkorange"
    }
}

/// Serializes the scene's circles into an SVG string.
///
/// Overlay layers are listed in a leading comment: their geojson lives on
/// external endpoints and is drawn by the map surface, not here.
pub fn render_svg(scene: &Scene, view: &ViewTransform, overlays: &[LineOverlay]) -> String {
    let mut doc = String::new();

    let _ = writeln!(
        doc,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        view.width, view.height, view.width, view.height
    );

    if !overlays.is_empty() {
        let _ = writeln!(doc, "  <!-- line overlays (drawn by the map surface):");
        for layer in overlays {
            let _ = writeln!(
                doc,
                "       {} color={} width={} opacity={} source={}",
                layer.id, layer.color, layer.width, layer.opacity, layer.source_url
            );
        }
        let _ = writeln!(doc, "  -->");
    }

    let _ = writeln!(doc, "  <text x=\"12\" y=\"24\">{}</text>", scene.time_label);

    for circle in &scene.circles {
        let _ = writeln!(
            doc,
            r#"  <circle data-station="{}" cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" stroke="{}" stroke-width="{}" opacity="{}"/>"#,
            circle.station_id,
            circle.cx,
            circle.cy,
            circle.radius,
            bucket_fill(circle.flow_bucket),
            CIRCLE_STROKE,
            CIRCLE_STROKE_WIDTH,
            CIRCLE_OPACITY,
        );
    }

    doc.push_str("</svg>\n");
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::builtin_overlays;
    use crate::render::Circle;

    fn scene() -> Scene {
        Scene {
            circles: vec![
                Circle {
                    station_id: "A32000".to_string(),
                    cx: 500.0,
                    cy: 400.0,
                    radius: 25.0,
                    flow_bucket: 1.0,
                },
                Circle {
                    station_id: "B32006".to_string(),
                    cx: 120.5,
                    cy: 93.25,
                    radius: 4.0,
                    flow_bucket: 0.0,
                },
            ],
            time_label: "8:10 AM".to_string(),
            tooltip: None,
        }
    }

    fn view() -> ViewTransform {
        ViewTransform {
            center_lon: -71.09415,
            center_lat: 42.36027,
            zoom: 12.0,
            width: 1000.0,
            height: 800.0,
        }
    }

    #[test]
    fn test_svg_document_shape() {
        let svg = render_svg(&scene(), &view(), &builtin_overlays());

        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<circle ").count(), 2);
        assert!(svg.contains("8:10 AM"));
    }

    #[test]
    fn test_circle_attributes() {
        let svg = render_svg(&scene(), &view(), &[]);

        assert!(svg.contains(r#"data-station="A32000""#));
        assert!(svg.contains(r#"stroke="white""#));
        assert!(svg.contains(r#"opacity="0.8""#));
        // departures-dominant and arrivals-dominant fills
        assert!(svg.contains(r#"fill="darkorange""#));
        assert!(svg.contains(r#"fill="steelblue""#));
    }

    #[test]
    fn test_overlays_listed_in_comment() {
        let svg = render_svg(&scene(), &view(), &builtin_overlays());
        assert!(svg.contains("bike-lanes-cambridge"));
        assert!(svg.contains("hotpink"));

        let svg = render_svg(&scene(), &view(), &[]);
        assert!(!svg.contains("<!--"));
    }
}
