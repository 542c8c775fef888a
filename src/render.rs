//! Event-driven render driver.
//!
//! Models the interactive loop — slider drags, map movement, hover — as an
//! explicit event enum with a single state-update function, so the scene is
//! always a pure function of (stations, trips, time filter, view).

use crate::clock::format_time_of_day;
use crate::filter::{TimeFilter, filter_trips};
use crate::model::{Station, StationStats, Trip};
use crate::projection::ViewTransform;
use crate::scale::{
    FILTERED_RADIUS_RANGE, SqrtScale, UNFILTERED_RADIUS_RANGE, flow_ratio_bucket,
};
use crate::traffic::compute_station_stats;

/// Label shown when no time filter is active.
pub const ANY_TIME_LABEL: &str = "(any time)";

/// One-time circle style, applied when an element first appears.
pub const CIRCLE_STROKE: &str = "white";
pub const CIRCLE_STROKE_WIDTH: f64 = 1.0;
pub const CIRCLE_OPACITY: f64 = 0.8;

/// Tooltip offset from the pointer, in pixels.
const TOOLTIP_OFFSET: (f64, f64) = (10.0, -28.0);

/// A user interaction the driver reacts to.
#[derive(Debug, Clone)]
pub enum Event {
    /// The time slider moved.
    SliderInput(TimeFilter),
    /// The map was panned, zoomed, or resized.
    ViewChanged(ViewTransform),
    /// The pointer entered a station's circle.
    HoverEnter {
        station_id: String,
        pointer: (f64, f64),
    },
    /// The pointer left the hovered circle.
    HoverLeave,
}

/// One station's visual element.
#[derive(Debug, Clone)]
pub struct Circle {
    pub station_id: String,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    /// Quantized departure dominance: 0.0, 0.5, or 1.0.
    pub flow_bucket: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Everything the driver currently wants on screen.
#[derive(Debug, Clone)]
pub struct Scene {
    pub circles: Vec<Circle>,
    pub time_label: String,
    pub tooltip: Option<Tooltip>,
}

/// Orchestrates filtering, aggregation, scaling, and projection.
pub struct RenderDriver {
    stations: Vec<Station>,
    trips: Vec<Trip>,
    view: ViewTransform,
    time_filter: TimeFilter,
    radius_scale: SqrtScale,
    stats: Vec<StationStats>,
    scene: Scene,
}

impl RenderDriver {
    /// Builds the initial, unfiltered scene. The size scale's domain is
    /// fixed here, from the unfiltered maximum total traffic, and never
    /// recomputed afterwards.
    pub fn new(stations: Vec<Station>, trips: Vec<Trip>, view: ViewTransform) -> Self {
        let stats = compute_station_stats(&stations, &trips);
        let domain_max = stats.iter().map(|s| s.total).max().unwrap_or(0) as f64;
        let radius_scale = SqrtScale::new(domain_max, UNFILTERED_RADIUS_RANGE);

        let mut driver = Self {
            stations,
            trips,
            view,
            time_filter: TimeFilter::AnyTime,
            radius_scale,
            stats,
            scene: Scene {
                circles: Vec::new(),
                time_label: ANY_TIME_LABEL.to_string(),
                tooltip: None,
            },
        };
        driver.rebuild_circles();
        driver
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn time_filter(&self) -> TimeFilter {
        self.time_filter
    }

    /// Single entry point for all interactions.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::SliderInput(filter) => self.on_slider(filter),
            Event::ViewChanged(view) => self.on_view_changed(view),
            Event::HoverEnter {
                station_id,
                pointer,
            } => self.on_hover_enter(&station_id, pointer),
            Event::HoverLeave => self.scene.tooltip = None,
        }
    }

    /// Re-filters against the full trip list and re-aggregates against the
    /// full station list. Never reuses a previous filtered result, so
    /// aggregates cannot compound.
    fn on_slider(&mut self, filter: TimeFilter) {
        self.time_filter = filter;

        let filtered = filter_trips(&self.trips, filter);
        self.stats = compute_station_stats(&self.stations, &filtered);

        let range = if filter.is_active() {
            FILTERED_RADIUS_RANGE
        } else {
            UNFILTERED_RADIUS_RANGE
        };
        self.radius_scale = self.radius_scale.with_range(range);

        self.scene.time_label = match filter {
            TimeFilter::AnyTime => ANY_TIME_LABEL.to_string(),
            TimeFilter::AtMinute(m) => format_time_of_day(m),
        };

        self.rebuild_circles();
    }

    /// Re-projects positions only; aggregation state is untouched.
    fn on_view_changed(&mut self, view: ViewTransform) {
        self.view = view;
        for circle in &mut self.scene.circles {
            let stats = self
                .stats
                .iter()
                .find(|s| s.short_name == circle.station_id);
            if let Some(s) = stats {
                let (cx, cy) = self.view.project(s.lon, s.lat);
                circle.cx = cx;
                circle.cy = cy;
            }
        }
    }

    fn on_hover_enter(&mut self, station_id: &str, pointer: (f64, f64)) {
        self.scene.tooltip = self
            .stats
            .iter()
            .find(|s| s.short_name == station_id)
            .map(|s| Tooltip {
                text: tooltip_text(s),
                x: pointer.0 + TOOLTIP_OFFSET.0,
                y: pointer.1 + TOOLTIP_OFFSET.1,
            });
    }

    fn rebuild_circles(&mut self) {
        self.scene.circles = self
            .stats
            .iter()
            .map(|s| {
                let (cx, cy) = self.view.project(s.lon, s.lat);
                Circle {
                    station_id: s.short_name.clone(),
                    cx,
                    cy,
                    radius: self.radius_scale.apply(s.total as f64),
                    flow_bucket: flow_ratio_bucket(s.departures, s.total),
                }
            })
            .collect();
    }
}

/// Hover tooltip body for one station.
pub fn tooltip_text(stats: &StationStats) -> String {
    format!(
        "{}\n{} trips\n{} departures\n{} arrivals",
        stats.name, stats.total, stats.departures, stats.arrivals
    )
}
