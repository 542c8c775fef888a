//! Scales mapping traffic aggregates to visual attributes.

/// Circle radius range when no time filter is active.
pub const UNFILTERED_RADIUS_RANGE: (f64, f64) = (0.0, 25.0);

/// Circle radius range when a time filter is active. Filtered counts are
/// typically much smaller, so the range is widened to keep circles legible.
pub const FILTERED_RADIUS_RANGE: (f64, f64) = (3.0, 50.0);

/// Square-root scale from traffic counts to circle radii.
///
/// The domain maximum is fixed once, from the unfiltered dataset, so
/// relative sizing stays comparable across filter changes. Only the output
/// range switches with filter state.
#[derive(Debug, Clone, Copy)]
pub struct SqrtScale {
    domain_max: f64,
    range: (f64, f64),
}

impl SqrtScale {
    pub fn new(domain_max: f64, range: (f64, f64)) -> Self {
        Self { domain_max, range }
    }

    /// Replaces the output range, keeping the domain.
    pub fn with_range(self, range: (f64, f64)) -> Self {
        Self { range, ..self }
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        if self.domain_max <= 0.0 {
            return r0;
        }
        let t = (value / self.domain_max).clamp(0.0, 1.0).sqrt();
        r0 + (r1 - r0) * t
    }
}

/// Quantizing scale over the fixed domain `[0, 1]` with three output
/// buckets `{0.0, 0.5, 1.0}`: thirds of the domain, upper bucket closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantizeScale;

impl QuantizeScale {
    const BUCKETS: [f64; 3] = [0.0, 0.5, 1.0];

    pub fn apply(&self, value: f64) -> f64 {
        let t = value.clamp(0.0, 1.0);
        let idx = ((t * Self::BUCKETS.len() as f64) as usize).min(Self::BUCKETS.len() - 1);
        Self::BUCKETS[idx]
    }
}

/// Quantized departure dominance for one station.
///
/// A station with no traffic is treated as "not departure-dominant" and
/// maps to bucket `0.0` without invoking the scale.
pub fn flow_ratio_bucket(departures: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    QuantizeScale.apply(departures as f64 / total as f64)
}
