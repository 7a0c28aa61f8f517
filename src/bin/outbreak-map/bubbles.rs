//! Bubble markers for case records, plus the hover tooltip they control.

use crate::colors;
use crate::constants::TOOLTIP_OFFSET;
use crate::projection::Albers;
use crate::scales::{ColorScale, RadiusScale};
use crate::view::ViewTransform;
use eframe::egui::{Color32, Painter, Pos2, Stroke, Vec2};
use outbreak_map::{CaseRecord, RecordKey};
use std::collections::HashMap;

/// One circular marker backed by a case record.
#[derive(Debug, Clone)]
pub struct Marker {
    pub key: RecordKey,
    /// Index of the backing record in the layer's dataset.
    pub record: usize,
    /// Projected position in canvas coordinates.
    pub center: Pos2,
    /// Radius in canvas units, compensated for the current zoom factor so
    /// the apparent size stays constant.
    pub radius: f32,
    pub fill: Color32,
}

/// Hover tooltip state: one exclusive visibility flag plus the text fields
/// of the hovered record.
#[derive(Debug, Clone, Default)]
pub struct Tooltip {
    visible: bool,
    pub name: String,
    pub cases: String,
    pub deaths: String,
    /// Screen position, adjacent to the pointer.
    pub pos: Pos2,
}

impl Tooltip {
    fn show(&mut self, record: &CaseRecord, pos: Pos2) {
        self.visible = true;
        self.name = format!("{}, {}", record.county, record.state);
        self.cases = format!("Cases: {}", record.cases);
        self.deaths = format!("Deaths: {}", record.deaths);
        self.pos = pos;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }
}

/// Renders one marker per case record and keeps the set responsive to zoom.
///
/// Owns the (immutable after load) record set, a copy of the shared
/// projection and both scales, the reconciled marker set, and the tooltip.
pub struct BubbleLayer {
    records: Vec<CaseRecord>,
    projection: Albers,
    radius_scale: RadiusScale,
    color_scale: ColorScale,
    pub(crate) markers: Vec<Marker>,
    tooltip: Tooltip,
}

impl BubbleLayer {
    /// `records` must already be filtered to projectable coordinates.
    pub fn new(
        records: Vec<CaseRecord>,
        projection: Albers,
        radius_scale: RadiusScale,
        color_scale: ColorScale,
    ) -> Self {
        Self {
            records,
            projection,
            radius_scale,
            color_scale,
            markers: Vec::new(),
            tooltip: Tooltip::default(),
        }
    }

    /// Reconcile markers against the record set and re-derive their visual
    /// attributes for the given zoom factor.
    ///
    /// Markers are keyed by `(county, state)`: records added since the last
    /// call gain a marker, records removed lose theirs, and surviving
    /// markers are updated in place. Radius is divided by the zoom factor
    /// so the apparent size is invariant under the container scale.
    pub fn render(&mut self, zoom_factor: f32) {
        let mut previous: HashMap<RecordKey, Marker> = self
            .markers
            .drain(..)
            .map(|marker| (marker.key.clone(), marker))
            .collect();

        for (index, record) in self.records.iter().enumerate() {
            // Unprojectable records were discarded at load time.
            let Some(center) = self.projection.project(record.long, record.lat) else {
                continue;
            };
            let key = record.key();
            let mut marker = previous.remove(&key).unwrap_or(Marker {
                key,
                record: index,
                center,
                radius: 0.0,
                fill: Color32::TRANSPARENT,
            });
            marker.record = index;
            marker.center = center;
            marker.radius = self.radius_scale.radius(record.cases as f64) / zoom_factor;
            marker.fill = self.color_scale.color(record.deaths as f64);
            self.markers.push(marker);
        }
        // Markers whose records disappeared are dropped with `previous`.
    }

    /// Update tooltip state from the pointer: hovering a marker shows the
    /// tooltip next to the pointer, anything else hides it.
    ///
    /// `pointer` carries the position in canvas space (for hit-testing) and
    /// in screen space (for tooltip placement).
    pub fn update_hover(&mut self, pointer: Option<(Pos2, Pos2)>) {
        let Some((canvas_pos, screen_pos)) = pointer else {
            self.tooltip.hide();
            return;
        };
        match self.hit_index(canvas_pos) {
            Some(index) => {
                let record = &self.records[self.markers[index].record];
                self.tooltip
                    .show(record, screen_pos + Vec2::splat(TOOLTIP_OFFSET));
            }
            None => self.tooltip.hide(),
        }
    }

    /// Topmost marker containing `canvas_pos`, if any. Later markers draw
    /// on top, so the search runs back to front.
    fn hit_index(&self, canvas_pos: Pos2) -> Option<usize> {
        self.markers
            .iter()
            .rposition(|marker| marker.center.distance(canvas_pos) <= marker.radius)
    }

    /// Draw all markers under the current view transform. Radii were
    /// authored divided by the zoom factor, so scaling by the container
    /// restores a constant apparent size.
    pub fn draw(&self, painter: &Painter, view: &ViewTransform, origin: Pos2) {
        let stroke = Stroke::new(view.stroke_width() * view.scale, colors::BUBBLE_STROKE);
        for marker in &self.markers {
            painter.circle(
                view.to_screen(origin, marker.center),
                marker.radius * view.scale,
                marker.fill,
                stroke,
            );
        }
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}
