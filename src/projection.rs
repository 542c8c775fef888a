//! Web Mercator view transform: geographic position to screen pixels.

use std::f64::consts::PI;

/// Pixel width of the world at zoom 0, matching mapbox-gl's 512px tiles so
/// zoom levels read the same as the map's.
const TILE_SIZE: f64 = 512.0;

/// The current map view: center, zoom, and viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub center_lon: f64,
    pub center_lat: f64,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewTransform {
    /// Projects a longitude/latitude to screen coordinates under this view.
    /// The view center lands at the middle of the viewport.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let world = TILE_SIZE * self.zoom.exp2();
        let (wx, wy) = world_coords(lon, lat, world);
        let (cx, cy) = world_coords(self.center_lon, self.center_lat, world);
        (wx - cx + self.width / 2.0, wy - cy + self.height / 2.0)
    }
}

fn world_coords(lon: f64, lat: f64, world: f64) -> (f64, f64) {
    let x = (lon + 180.0) / 360.0 * world;
    let lat_rad = lat.to_radians();
    let y = (1.0 - ((PI / 4.0 + lat_rad / 2.0).tan().ln()) / PI) / 2.0 * world;
    (x, y)
}
