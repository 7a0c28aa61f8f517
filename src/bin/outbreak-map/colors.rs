//! Color constants for the basemap and UI elements.

use eframe::egui::Color32;

// Basemap
pub const CANVAS_FILL: Color32 = Color32::from_rgb(245, 246, 248);
pub const BOUNDARY_STROKE: Color32 = Color32::from_rgb(140, 144, 150);

// Bubble markers
pub const BUBBLE_STROKE: Color32 = Color32::from_rgb(110, 60, 40);

// Legend
pub const LEGEND_OUTLINE: Color32 = Color32::from_rgb(110, 114, 120);
