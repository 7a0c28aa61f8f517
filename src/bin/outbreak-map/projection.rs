//! Geographic projection: Albers equal-area conic fitted to the canvas.

use eframe::egui::{Pos2, Rect, pos2};
use outbreak_map::BoundaryCollection;

/// Standard parallels for the conterminous United States.
const PARALLEL_LOWER: f64 = 29.5;
const PARALLEL_UPPER: f64 = 45.5;

/// Reference meridian; longitudes are measured relative to it.
const ORIGIN_LON: f64 = -96.0;

/// Padding around the boundary extent when deciding what is projectable,
/// so data points sitting exactly on the hull are not rejected.
const DOMAIN_PADDING_DEG: f64 = 0.5;

/// An Albers equal-area conic projection, fitted once to the boundary
/// extent and a canvas frame.
///
/// `project` is a pure function from geographic degrees to canvas
/// coordinates; coordinates outside the fitted geographic domain (or
/// non-finite ones) have no projection.
#[derive(Debug, Clone, Copy)]
pub struct Albers {
    // Conic parameters.
    n: f64,
    c: f64,
    rho0: f64,
    // Geographic domain (boundary extent, padded).
    lon_min: f64,
    lon_max: f64,
    lat_min: f64,
    lat_max: f64,
    // Affine fit: raw projection plane -> canvas frame.
    raw_cx: f64,
    raw_cy: f64,
    scale: f64,
    frame_cx: f64,
    frame_cy: f64,
}

impl Albers {
    /// Fit the projection so the boundary extent fills `frame`, preserving
    /// aspect ratio and centering the extent.
    pub fn fit(frame: Rect, boundaries: &BoundaryCollection) -> Self {
        let sy0 = PARALLEL_LOWER.to_radians().sin();
        let sy1 = PARALLEL_UPPER.to_radians().sin();
        let n = (sy0 + sy1) / 2.0;
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        let rho0 = c.sqrt() / n;

        let mut lon_min = f64::INFINITY;
        let mut lon_max = f64::NEG_INFINITY;
        let mut lat_min = f64::INFINITY;
        let mut lat_max = f64::NEG_INFINITY;
        let mut raw_x_min = f64::INFINITY;
        let mut raw_x_max = f64::NEG_INFINITY;
        let mut raw_y_min = f64::INFINITY;
        let mut raw_y_max = f64::NEG_INFINITY;

        for feature in boundaries {
            for ring in &feature.rings {
                for &[long, lat] in ring {
                    lon_min = lon_min.min(long);
                    lon_max = lon_max.max(long);
                    lat_min = lat_min.min(lat);
                    lat_max = lat_max.max(lat);

                    let (x, y) = raw_project(n, c, rho0, long, lat);
                    raw_x_min = raw_x_min.min(x);
                    raw_x_max = raw_x_max.max(x);
                    raw_y_min = raw_y_min.min(y);
                    raw_y_max = raw_y_max.max(y);
                }
            }
        }

        let raw_w = raw_x_max - raw_x_min;
        let raw_h = raw_y_max - raw_y_min;
        let scale = if raw_w > 0.0 && raw_h > 0.0 {
            (f64::from(frame.width()) / raw_w).min(f64::from(frame.height()) / raw_h)
        } else {
            1.0
        };

        Self {
            n,
            c,
            rho0,
            lon_min: lon_min - DOMAIN_PADDING_DEG,
            lon_max: lon_max + DOMAIN_PADDING_DEG,
            lat_min: lat_min - DOMAIN_PADDING_DEG,
            lat_max: lat_max + DOMAIN_PADDING_DEG,
            raw_cx: (raw_x_min + raw_x_max) / 2.0,
            raw_cy: (raw_y_min + raw_y_max) / 2.0,
            scale,
            frame_cx: f64::from(frame.center().x),
            frame_cy: f64::from(frame.center().y),
        }
    }

    /// Project a geographic coordinate to canvas coordinates, or `None`
    /// when the coordinate lies outside the projectable domain.
    pub fn project(&self, long: f64, lat: f64) -> Option<Pos2> {
        if !long.is_finite() || !lat.is_finite() {
            return None;
        }
        if long < self.lon_min || long > self.lon_max || lat < self.lat_min || lat > self.lat_max {
            return None;
        }

        let (x, y) = raw_project(self.n, self.c, self.rho0, long, lat);
        // The raw plane has y growing northward; the canvas has y growing
        // downward.
        let px = self.frame_cx + (x - self.raw_cx) * self.scale;
        let py = self.frame_cy - (y - self.raw_cy) * self.scale;
        Some(pos2(px as f32, py as f32))
    }
}

fn raw_project(n: f64, c: f64, rho0: f64, long: f64, lat: f64) -> (f64, f64) {
    let theta = n * (long - ORIGIN_LON).to_radians();
    let rho = (c - 2.0 * n * lat.to_radians().sin()).sqrt() / n;
    (rho * theta.sin(), rho0 - rho * theta.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_map::BoundaryFeature;

    fn conus_box() -> outbreak_map::BoundaryCollection {
        vec![BoundaryFeature {
            name: "box".to_string(),
            rings: vec![vec![
                [-125.0, 24.0],
                [-66.0, 24.0],
                [-66.0, 50.0],
                [-125.0, 50.0],
                [-125.0, 24.0],
            ]],
        }]
    }

    fn fitted() -> Albers {
        let frame = Rect::from_min_max(pos2(50.0, 50.0), pos2(750.0, 750.0));
        Albers::fit(frame, &conus_box())
    }

    #[test]
    fn interior_point_projects_inside_frame() {
        let projection = fitted();
        let p = projection.project(-100.0, 40.0).unwrap();
        assert!(p.x > 50.0 && p.x < 750.0);
        assert!(p.y > 50.0 && p.y < 750.0);
    }

    #[test]
    fn boundary_extent_fits_frame() {
        let projection = fitted();
        let frame = Rect::from_min_max(pos2(50.0, 50.0), pos2(750.0, 750.0)).expand(1.0);
        for &[long, lat] in &conus_box()[0].rings[0] {
            let p = projection.project(long, lat).unwrap();
            assert!(frame.contains(p), "({long}, {lat}) projected to {p:?}");
        }
    }

    #[test]
    fn out_of_domain_is_unprojectable() {
        let projection = fitted();
        assert!(projection.project(999.0, 999.0).is_none());
        assert!(projection.project(-130.0, 40.0).is_none());
        assert!(projection.project(-100.0, 55.0).is_none());
    }

    #[test]
    fn non_finite_is_unprojectable() {
        let projection = fitted();
        assert!(projection.project(f64::NAN, 40.0).is_none());
        assert!(projection.project(-100.0, f64::INFINITY).is_none());
    }

    #[test]
    fn orientation_is_east_right_north_up() {
        let projection = fitted();
        let west = projection.project(-100.0, 40.0).unwrap();
        let east = projection.project(-90.0, 40.0).unwrap();
        assert!(east.x > west.x);

        let south = projection.project(-100.0, 35.0).unwrap();
        let north = projection.project(-100.0, 45.0).unwrap();
        assert!(north.y < south.y);
    }
}
