//! Static basemap: boundary outlines projected once at startup.

use crate::colors;
use crate::projection::Albers;
use crate::view::ViewTransform;
use eframe::egui::{Painter, Pos2, Shape, Stroke};
use outbreak_map::BoundaryCollection;

/// Boundary outlines in canvas coordinates. Projected once; boundaries
/// never change after the initial build.
pub struct Basemap {
    paths: Vec<Vec<Pos2>>,
}

impl Basemap {
    pub fn build(boundaries: &BoundaryCollection, projection: &Albers) -> Self {
        let mut paths = Vec::new();
        for feature in boundaries {
            for ring in &feature.rings {
                let points: Vec<Pos2> = ring
                    .iter()
                    .filter_map(|&[long, lat]| projection.project(long, lat))
                    .collect();
                if points.len() >= 2 {
                    paths.push(points);
                }
            }
        }
        Self { paths }
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Draw every outline under the current view transform. The stroke is
    /// authored as `1/k` in canvas units and scaled back up by the
    /// container, so outlines do not thicken as the view zooms.
    pub fn draw(&self, painter: &Painter, view: &ViewTransform, origin: Pos2) {
        let stroke = Stroke::new(
            view.stroke_width() * view.scale,
            colors::BOUNDARY_STROKE,
        );
        for path in &self.paths {
            let points: Vec<Pos2> = path.iter().map(|&p| view.to_screen(origin, p)).collect();
            painter.add(Shape::closed_line(points, stroke));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{Rect, pos2};
    use outbreak_map::BoundaryFeature;

    #[test]
    fn projects_one_path_per_ring() {
        let boundaries = vec![
            BoundaryFeature {
                name: "a".to_string(),
                rings: vec![vec![
                    [-120.0, 30.0],
                    [-110.0, 30.0],
                    [-110.0, 40.0],
                    [-120.0, 40.0],
                ]],
            },
            BoundaryFeature {
                name: "b".to_string(),
                rings: vec![
                    vec![[-100.0, 30.0], [-90.0, 30.0], [-90.0, 40.0]],
                    vec![[-85.0, 32.0], [-80.0, 32.0], [-80.0, 36.0]],
                ],
            },
        ];
        let frame = Rect::from_min_max(pos2(50.0, 50.0), pos2(750.0, 750.0));
        let projection = Albers::fit(frame, &boundaries);
        let basemap = Basemap::build(&boundaries, &projection);
        assert_eq!(basemap.path_count(), 3);
    }
}
