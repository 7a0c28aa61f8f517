//! UI rendering methods for the outbreak map application.

use crate::bubbles::Tooltip;
use crate::colors;
use crate::constants::{CANVAS_SIZE, SIDEBAR_WIDTH, ZOOM_SPEED};
use crate::scene::Scene;
use crate::view::ViewTransform;
use crate::{AppState, OutbreakMapApp};
use eframe::egui;

impl OutbreakMapApp {
    /// Handles keyboard shortcuts for zoom and view reset.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        let mut zoomed = false;
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals) {
                zoomed |= self.view.zoom_from_center(ZOOM_SPEED);
            }
            if i.key_pressed(egui::Key::Minus) {
                zoomed |= self.view.zoom_from_center(1.0 / ZOOM_SPEED);
            }
            if i.key_pressed(egui::Key::Num0) {
                self.view.reset();
                zoomed = true;
            }
        });

        if zoomed && let AppState::Ready(scene) = &mut self.state {
            scene.bubbles.render(self.view.scale);
        }
    }

    /// Renders the bottom status bar with controls hint and dataset info.
    pub fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Scroll: Zoom | Drag: Pan | +/-: Zoom | 0: Reset");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    match &self.state {
                        AppState::Loading { .. } => {
                            ui.label("Loading data…");
                        }
                        AppState::Ready(scene) => {
                            ui.label(format!(
                                "{} counties | zoom {:.1}x",
                                scene.bubbles.marker_count(),
                                self.view.scale
                            ));
                        }
                        AppState::Failed(_) => {
                            ui.label("Load failed");
                        }
                    }
                });
            });
        });
    }

    /// Renders the left legend sidebar.
    pub fn show_sidebar(&self, ctx: &egui::Context) {
        egui::SidePanel::left("legend")
            .exact_width(SIDEBAR_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                match &self.state {
                    AppState::Ready(scene) => show_legend(ui, scene),
                    AppState::Loading { .. } => {
                        ui.label("Loading data…");
                    }
                    AppState::Failed(_) => {
                        ui.label("No data.");
                    }
                }
            });
    }

    /// Renders the central panel containing the map canvas.
    pub fn show_central_panel(&mut self, ctx: &egui::Context) {
        let Self { state, view, .. } = self;
        egui::CentralPanel::default().show(ctx, |ui| match state {
            AppState::Loading { .. } => {
                ui.centered_and_justified(|ui| ui.spinner());
            }
            AppState::Failed(message) => {
                ui.centered_and_justified(|ui| {
                    ui.label(format!("Failed to load data: {message}"));
                });
            }
            AppState::Ready(scene) => show_map(ui, view, scene),
        });
    }
}

/// Draws the basemap and bubbles under the view transform and feeds
/// zoom/pan/hover events back into them.
fn show_map(ui: &mut egui::Ui, view: &mut ViewTransform, scene: &mut Scene) {
    let (canvas_rect, response) = ui.allocate_exact_size(
        egui::Vec2::splat(CANVAS_SIZE),
        egui::Sense::click_and_drag(),
    );
    let origin = canvas_rect.min;

    let zoomed = handle_scroll_zoom(ui, view, canvas_rect);
    if response.dragged() {
        view.pan(response.drag_delta());
    }
    if zoomed {
        // Re-derive marker radii so their apparent size stays constant.
        scene.bubbles.render(view.scale);
    }

    ui.set_clip_rect(canvas_rect);
    let painter = ui.painter();
    painter.rect_filled(canvas_rect, 0.0, colors::CANVAS_FILL);
    scene.basemap.draw(painter, view, origin);
    scene.bubbles.draw(painter, view, origin);

    let pointer = response
        .hover_pos()
        .filter(|pos| canvas_rect.contains(*pos))
        .map(|pos| (view.to_canvas(origin, pos), pos));
    scene.bubbles.update_hover(pointer);

    show_tooltip(ui.ctx(), scene.bubbles.tooltip());
}

/// Handles scroll wheel zoom, zooming towards the pointer position.
fn handle_scroll_zoom(ui: &egui::Ui, view: &mut ViewTransform, canvas_rect: egui::Rect) -> bool {
    let hover_pos = ui.input(|i| i.pointer.hover_pos());
    let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);

    let Some(hover) = hover_pos.filter(|pos| canvas_rect.contains(*pos)) else {
        return false;
    };
    if scroll_delta == 0.0 {
        return false;
    }

    let factor = if scroll_delta > 0.0 {
        ZOOM_SPEED
    } else {
        1.0 / ZOOM_SPEED
    };
    view.zoom_by(factor, hover - canvas_rect.min)
}

/// Renders the floating tooltip next to the pointer while a marker is
/// hovered.
fn show_tooltip(ctx: &egui::Context, tooltip: &Tooltip) {
    if !tooltip.visible() {
        return;
    }
    egui::Area::new(egui::Id::new("map_tooltip"))
        .fixed_pos(tooltip.pos)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.strong(&tooltip.name);
                ui.label(&tooltip.cases);
                ui.label(&tooltip.deaths);
            });
        });
}

/// Renders the size and color legends for the two scales.
fn show_legend(ui: &mut egui::Ui, scene: &Scene) {
    ui.strong("Cases");
    ui.separator();

    let (case_min, case_max) = scene.radius_scale.domain();
    // Sample at the extremes and the sqrt-space midpoint, matching how
    // values spread across the radius range.
    let case_mid = ((case_min.sqrt() + case_max.sqrt()) / 2.0).powi(2);
    for value in [case_min, case_mid, case_max] {
        ui.horizontal(|ui| {
            let radius = scene.radius_scale.radius(value);
            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(44.0, (2.0 * radius).max(14.0)),
                egui::Sense::hover(),
            );
            ui.painter().circle_stroke(
                rect.center(),
                radius,
                egui::Stroke::new(1.0, colors::LEGEND_OUTLINE),
            );
            ui.label(format!("{value:.0}"));
        });
    }

    ui.add_space(12.0);
    ui.strong("Deaths");
    ui.separator();

    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width() - 8.0, 12.0),
        egui::Sense::hover(),
    );
    const STEPS: usize = 32;
    let step_width = rect.width() / STEPS as f32;
    for i in 0..STEPS {
        let t = i as f32 / (STEPS - 1) as f32;
        let strip = egui::Rect::from_min_size(
            egui::pos2(rect.min.x + i as f32 * step_width, rect.min.y),
            egui::vec2(step_width + 0.5, rect.height()),
        );
        ui.painter()
            .rect_filled(strip, 0.0, scene.color_scale.color_at(t));
    }

    let (death_min, death_max) = scene.color_scale.domain();
    ui.horizontal(|ui| {
        ui.label(format!("{death_min:.0}"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(format!("{death_max:.0}"));
        });
    });
}
