//! Visual scales: data extents mapped to marker radius and fill color.

use eframe::egui::Color32;

/// Minimum and maximum of an iterator of values, `None` when empty.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut result: Option<(f64, f64)> = None;
    for value in values {
        let (min, max) = result.get_or_insert((value, value));
        *min = min.min(value);
        *max = max.max(value);
    }
    result
}

/// Normalized position of `value` within `[d0, d1]`, clamped to `[0, 1]`.
/// A degenerate domain maps everything to the midpoint.
fn normalize(d0: f64, d1: f64, value: f64) -> f32 {
    if d1 > d0 {
        (((value - d0) / (d1 - d0)).clamp(0.0, 1.0)) as f32
    } else {
        0.5
    }
}

/// Square-root scale from a case-count extent to a pixel radius range,
/// so marker *area* tracks the value. Monotonic non-decreasing.
#[derive(Debug, Clone, Copy)]
pub struct RadiusScale {
    sqrt_d0: f64,
    sqrt_d1: f64,
    r0: f32,
    r1: f32,
    domain: (f64, f64),
}

impl RadiusScale {
    pub fn new(domain: (f64, f64), range: [f32; 2]) -> Self {
        Self {
            sqrt_d0: domain.0.max(0.0).sqrt(),
            sqrt_d1: domain.1.max(0.0).sqrt(),
            r0: range[0],
            r1: range[1],
            domain,
        }
    }

    pub fn radius(&self, value: f64) -> f32 {
        let t = normalize(self.sqrt_d0, self.sqrt_d1, value.max(0.0).sqrt());
        self.r0 + t * (self.r1 - self.r0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }
}

/// Sequential scale over a death-count extent using the OrRd ramp.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    d0: f64,
    d1: f64,
}

impl ColorScale {
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            d0: domain.0,
            d1: domain.1,
        }
    }

    pub fn color(&self, value: f64) -> Color32 {
        or_rd(normalize(self.d0, self.d1, value))
    }

    /// Ramp color at normalized position `t`; used by the legend.
    pub fn color_at(&self, t: f32) -> Color32 {
        or_rd(t.clamp(0.0, 1.0))
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.d0, self.d1)
    }
}

/// OrRd ramp (ColorBrewer control points), piecewise-linear.
fn or_rd(t: f32) -> Color32 {
    const C: [(u8, u8, u8); 9] = [
        (255, 247, 236),
        (254, 232, 200),
        (253, 212, 158),
        (253, 187, 132),
        (252, 141, 89),
        (239, 101, 72),
        (215, 48, 31),
        (179, 0, 0),
        (127, 0, 0),
    ];
    let segs = (C.len() - 1) as f32;
    let x = t.clamp(0.0, 1.0) * segs;
    let i = x.floor() as usize;
    if i >= C.len() - 1 {
        let (r, g, b) = C[C.len() - 1];
        return Color32::from_rgb(r, g, b);
    }
    let f = x - i as f32;
    let (r0, g0, b0) = C[i];
    let (r1, g1, b1) = C[i + 1];
    let r = (r0 as f32 + f * (r1 as f32 - r0 as f32)).round() as u8;
    let g = (g0 as f32 + f * (g1 as f32 - g0 as f32)).round() as u8;
    let b = (b0 as f32 + f * (b1 as f32 - b0 as f32)).round() as u8;
    Color32::from_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_of_values() {
        assert_eq!(extent([3.0, 1.0, 2.0]), Some((1.0, 3.0)));
        assert_eq!(extent([]), None);
    }

    #[test]
    fn radius_maps_domain_ends_to_range_ends() {
        let scale = RadiusScale::new((10.0, 100.0), [1.0, 20.0]);
        assert_eq!(scale.radius(10.0), 1.0);
        assert_eq!(scale.radius(100.0), 20.0);
    }

    #[test]
    fn radius_is_monotonic() {
        let scale = RadiusScale::new((0.0, 1000.0), [1.0, 20.0]);
        let mut last = 0.0;
        for value in [0.0, 1.0, 10.0, 250.0, 999.0, 1000.0] {
            let r = scale.radius(value);
            assert!(r >= last, "radius({value}) = {r} < {last}");
            last = r;
        }
    }

    #[test]
    fn radius_tracks_square_root() {
        // Quarter of the max maps halfway up the sqrt-space domain.
        let scale = RadiusScale::new((0.0, 100.0), [1.0, 20.0]);
        assert_eq!(scale.radius(25.0), 10.5);
    }

    #[test]
    fn degenerate_domain_maps_to_midpoint() {
        let scale = RadiusScale::new((5.0, 5.0), [1.0, 20.0]);
        assert_eq!(scale.radius(5.0), 10.5);

        let colors = ColorScale::new((2.0, 2.0));
        assert_eq!(colors.color(2.0), colors.color_at(0.5));
    }

    #[test]
    fn color_depends_only_on_value() {
        let scale = ColorScale::new((0.0, 50.0));
        assert_eq!(scale.color(25.0), scale.color(25.0));
        assert_ne!(scale.color(0.0), scale.color(50.0));
    }

    #[test]
    fn color_endpoints_match_ramp() {
        let scale = ColorScale::new((1.0, 50.0));
        assert_eq!(scale.color(1.0), Color32::from_rgb(255, 247, 236));
        assert_eq!(scale.color(50.0), Color32::from_rgb(127, 0, 0));
    }
}
