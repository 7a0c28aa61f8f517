//! Post-load session state, built once when both datasets have resolved.

use crate::basemap::Basemap;
use crate::bubbles::BubbleLayer;
use crate::constants::{CANVAS_MARGIN, CANVAS_SIZE, RADIUS_RANGE};
use crate::projection::Albers;
use crate::scales::{ColorScale, RadiusScale, extent};
use eframe::egui::{Rect, pos2};
use outbreak_map::{BoundaryCollection, CaseRecord};

/// Everything derived from the two datasets: the projected basemap, the
/// scales, and the bubble layer. Immutable after construction except for
/// the bubble layer's render state.
pub struct Scene {
    pub basemap: Basemap,
    pub bubbles: BubbleLayer,
    pub radius_scale: RadiusScale,
    pub color_scale: ColorScale,
    /// Records discarded because their coordinates do not project.
    pub dropped_records: usize,
}

impl Scene {
    /// Fit the projection to the margin-inset canvas, discard unprojectable
    /// records, derive both scales from the retained set, project the
    /// basemap, and run the initial bubble render.
    pub fn build(boundaries: BoundaryCollection, records: Vec<CaseRecord>) -> Self {
        let frame = Rect::from_min_max(
            pos2(CANVAS_MARGIN, CANVAS_MARGIN),
            pos2(CANVAS_SIZE - CANVAS_MARGIN, CANVAS_SIZE - CANVAS_MARGIN),
        );
        let projection = Albers::fit(frame, &boundaries);

        let total = records.len();
        let retained: Vec<CaseRecord> = records
            .into_iter()
            .filter(|record| projection.project(record.long, record.lat).is_some())
            .collect();
        let dropped_records = total - retained.len();

        let case_extent =
            extent(retained.iter().map(|r| r.cases as f64)).unwrap_or((0.0, 0.0));
        let death_extent =
            extent(retained.iter().map(|r| r.deaths as f64)).unwrap_or((0.0, 0.0));
        let radius_scale = RadiusScale::new(case_extent, RADIUS_RANGE);
        let color_scale = ColorScale::new(death_extent);

        let basemap = Basemap::build(&boundaries, &projection);
        let mut bubbles = BubbleLayer::new(retained, projection, radius_scale, color_scale);
        bubbles.render(1.0);

        Self {
            basemap,
            bubbles,
            radius_scale,
            color_scale,
            dropped_records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_map::BoundaryFeature;

    fn record(county: &str, state: &str, long: f64, lat: f64, cases: u64, deaths: u64) -> CaseRecord {
        CaseRecord {
            county: county.to_string(),
            state: state.to_string(),
            long,
            lat,
            cases,
            deaths,
        }
    }

    fn conus_box() -> BoundaryCollection {
        vec![BoundaryFeature {
            name: "box".to_string(),
            rings: vec![vec![
                [-125.0, 24.0],
                [-66.0, 24.0],
                [-66.0, 50.0],
                [-125.0, 50.0],
            ]],
        }]
    }

    #[test]
    fn unprojectable_records_are_excluded_everywhere() {
        // The out-of-domain record must affect neither the marker set nor
        // the scale domains.
        let records = vec![
            record("A", "X", -100.0, 40.0, 10, 1),
            record("B", "Y", -90.0, 35.0, 100, 50),
            record("Nowhere", "ZZ", 999.0, 999.0, 100_000, 9_999),
        ];
        let scene = Scene::build(conus_box(), records);

        assert_eq!(scene.dropped_records, 1);
        assert_eq!(scene.bubbles.marker_count(), 2);
        assert_eq!(scene.radius_scale.domain(), (10.0, 100.0));
        assert_eq!(scene.color_scale.domain(), (1.0, 50.0));

        // With the outlier out of the domain, B holds the maximum radius.
        assert_eq!(scene.bubbles.markers[0].radius, 1.0);
        assert_eq!(scene.bubbles.markers[1].radius, 20.0);
    }

    #[test]
    fn builds_basemap_and_initial_render() {
        let scene = Scene::build(conus_box(), vec![record("A", "X", -100.0, 40.0, 5, 0)]);
        assert_eq!(scene.basemap.path_count(), 1);
        assert_eq!(scene.bubbles.marker_count(), 1);
    }
}
