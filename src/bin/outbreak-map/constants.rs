/// Logical canvas size (square) in canvas units.
pub const CANVAS_SIZE: f32 = 800.0;

/// Margin reserved on each side of the canvas when fitting the projection.
pub const CANVAS_MARGIN: f32 = 50.0;

/// Width of the legend sidebar in pixels.
pub const SIDEBAR_WIDTH: f32 = 200.0;

/// Minimum zoom factor (1.0 = the fitted view).
pub const ZOOM_MIN: f32 = 1.0;

/// Maximum zoom factor.
pub const ZOOM_MAX: f32 = 8.0;

/// Zoom speed multiplier for scroll/keyboard zoom.
pub const ZOOM_SPEED: f32 = 1.2;

/// Marker radius range in canvas units at zoom factor 1.
pub const RADIUS_RANGE: [f32; 2] = [1.0, 20.0];

/// Boundary stroke width in canvas units at zoom factor 1.
pub const BASE_STROKE_WIDTH: f32 = 1.0;

/// Offset of the tooltip from the pointer, in pixels.
pub const TOOLTIP_OFFSET: f32 = 12.0;
