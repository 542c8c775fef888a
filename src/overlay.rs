//! Static bike-lane overlay layers.
//!
//! Pure passthrough configuration for the map surface: source URL plus
//! line paint properties. The geojson itself is fetched and drawn by the
//! map, not by this crate.

use serde::Serialize;

/// One line overlay sourced from an external geojson endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LineOverlay {
    pub id: &'static str,
    pub source_url: &'static str,
    pub color: &'static str,
    pub width: f64,
    pub opacity: f64,
}

/// The two built-in bike-network layers.
pub fn builtin_overlays() -> Vec<LineOverlay> {
    vec![
        LineOverlay {
            id: "bike-lanes",
            source_url: "https://bostonopendata-boston.opendata.arcgis.com/datasets/boston::existing-bike-network-2022.geojson",
            color: "hotpink",
            width: 5.0,
            opacity: 0.6,
        },
        LineOverlay {
            id: "bike-lanes-cambridge",
            source_url: "https://raw.githubusercontent.com/cambridgegis/cambridgegis_data/main/Recreation/Bike_Facilities/RECREATION_BikeFacilities.geojson",
            color: "hotpink",
            width: 5.0,
            opacity: 0.6,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_overlays() {
        let overlays = builtin_overlays();
        assert_eq!(overlays.len(), 2);
        for layer in &overlays {
            assert!(layer.source_url.ends_with(".geojson"));
            assert_eq!(layer.color, "hotpink");
        }
    }
}
