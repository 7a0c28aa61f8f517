//! Pan/zoom state applied to the whole drawing container.

use crate::constants::{BASE_STROKE_WIDTH, CANVAS_SIZE, ZOOM_MAX, ZOOM_MIN};
use eframe::egui::{Pos2, Vec2};

/// Current pan translation and uniform zoom factor.
///
/// The transform moves the basemap and the bubbles together. Gesture state
/// (whether a drag is in progress) lives in the input layer; this type only
/// receives the resulting deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub translation: Vec2,
    pub scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    /// Map a canvas-space point to screen space relative to `origin`.
    pub fn to_screen(&self, origin: Pos2, canvas: Pos2) -> Pos2 {
        origin + self.translation + canvas.to_vec2() * self.scale
    }

    /// Map a screen-space point back into canvas space.
    pub fn to_canvas(&self, origin: Pos2, screen: Pos2) -> Pos2 {
        ((screen - origin - self.translation) / self.scale).to_pos2()
    }

    /// Stroke width in canvas units, compensated so outlines keep their
    /// apparent width under zoom.
    pub fn stroke_width(&self) -> f32 {
        BASE_STROKE_WIDTH / self.scale
    }

    /// Pan by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.translation += delta;
    }

    /// Zoom by `factor`, keeping the canvas point under `anchor`
    /// (origin-relative screen coordinates) stationary. The resulting scale
    /// is clamped to `[ZOOM_MIN, ZOOM_MAX]`; returns whether it changed.
    pub fn zoom_by(&mut self, factor: f32, anchor: Vec2) -> bool {
        let new_scale = (self.scale * factor).clamp(ZOOM_MIN, ZOOM_MAX);
        if new_scale == self.scale {
            return false;
        }
        let ratio = new_scale / self.scale;
        self.translation = anchor - (anchor - self.translation) * ratio;
        self.scale = new_scale;
        true
    }

    /// Zoom by `factor` around the canvas center (keyboard zoom).
    pub fn zoom_from_center(&mut self, factor: f32) -> bool {
        let anchor = self.translation + Vec2::splat(CANVAS_SIZE / 2.0) * self.scale;
        self.zoom_by(factor, anchor)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    #[test]
    fn default_is_identity() {
        let view = ViewTransform::default();
        let origin = pos2(10.0, 10.0);
        assert_eq!(view.to_screen(origin, pos2(5.0, 7.0)), pos2(15.0, 17.0));
        assert_eq!(view.to_canvas(origin, pos2(15.0, 17.0)), pos2(5.0, 7.0));
    }

    #[test]
    fn scale_is_clamped_to_allowed_range() {
        let mut view = ViewTransform::default();
        assert!(view.zoom_by(100.0, Vec2::ZERO));
        assert_eq!(view.scale, ZOOM_MAX);
        assert!(!view.zoom_by(2.0, Vec2::ZERO));
        assert_eq!(view.scale, ZOOM_MAX);

        assert!(view.zoom_by(0.001, Vec2::ZERO));
        assert_eq!(view.scale, ZOOM_MIN);
        assert!(!view.zoom_by(0.5, Vec2::ZERO));
    }

    #[test]
    fn stroke_width_compensates_zoom() {
        let mut view = ViewTransform::default();
        assert_eq!(view.stroke_width(), 1.0);
        view.zoom_by(4.0, Vec2::ZERO);
        assert_eq!(view.stroke_width(), 0.25);
    }

    #[test]
    fn zoom_keeps_anchor_point_fixed() {
        let mut view = ViewTransform::default();
        view.pan(vec2(30.0, -20.0));

        let origin = pos2(0.0, 0.0);
        let anchor = vec2(100.0, 150.0);
        let canvas_under_anchor = view.to_canvas(origin, origin + anchor);

        view.zoom_by(2.0, anchor);

        let after = view.to_screen(origin, canvas_under_anchor);
        assert!((after - (origin + anchor)).length() < 1e-3);
    }

    #[test]
    fn pan_accumulates() {
        let mut view = ViewTransform::default();
        view.pan(vec2(5.0, 5.0));
        view.pan(vec2(-2.0, 3.0));
        assert_eq!(view.translation, vec2(3.0, 8.0));
    }
}
