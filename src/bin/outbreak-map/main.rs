#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod assets;
mod basemap;
mod bubbles;
mod colors;
mod constants;
mod projection;
mod scales;
mod scene;
mod ui;
mod view;

use assets::LoadState;
use constants::{CANVAS_SIZE, SIDEBAR_WIDTH};
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use outbreak_map::{BoundaryCollection, CaseRecord};
use scene::Scene;
use view::ViewTransform;

/// Main application state for the outbreak map viewer.
pub struct OutbreakMapApp {
    state: AppState,
    view: ViewTransform,
    toasts: Toasts,
}

/// Startup state machine: both datasets must resolve before anything
/// renders; either failure is terminal.
enum AppState {
    Loading {
        boundaries: LoadState<BoundaryCollection>,
        cases: LoadState<Vec<CaseRecord>>,
    },
    Ready(Scene),
    Failed(String),
}

impl OutbreakMapApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let toasts = Toasts::new()
            .anchor(egui::Align2::RIGHT_TOP, (-10.0, 10.0))
            .direction(egui::Direction::TopDown);

        // Parse both datasets concurrently; the scene is built once both
        // have arrived.
        let state = AppState::Loading {
            boundaries: assets::spawn_load(cc.egui_ctx.clone(), assets::load_boundaries),
            cases: assets::spawn_load(cc.egui_ctx.clone(), assets::load_cases),
        };

        Self {
            state,
            view: ViewTransform::default(),
            toasts,
        }
    }

    /// Advance the startup join: poll both loads, fail if either failed,
    /// build the scene once both are ready.
    fn poll_loads(&mut self) {
        let (failure, ready) = match &mut self.state {
            AppState::Loading { boundaries, cases } => {
                boundaries.poll();
                cases.poll();
                let failure = boundaries
                    .error()
                    .or_else(|| cases.error())
                    .map(str::to_owned);
                (failure, boundaries.is_ready() && cases.is_ready())
            }
            _ => return,
        };

        if let Some(message) = failure {
            log::error!("startup load failed: {message}");
            self.toasts.add(Toast {
                kind: ToastKind::Error,
                text: message.clone().into(),
                options: ToastOptions::default()
                    .duration_in_seconds(10.0)
                    .show_icon(true),
                ..Default::default()
            });
            self.state = AppState::Failed(message);
            return;
        }

        if ready {
            let state = std::mem::replace(&mut self.state, AppState::Failed(String::new()));
            let AppState::Loading {
                boundaries: LoadState::Ready(boundaries),
                cases: LoadState::Ready(cases),
            } = state
            else {
                return;
            };

            let scene = Scene::build(boundaries, cases);
            log::info!(
                "scene ready: {} boundary paths, {} markers ({} records unprojectable)",
                scene.basemap.path_count(),
                scene.bubbles.marker_count(),
                scene.dropped_records,
            );
            self.state = AppState::Ready(scene);
        }
    }
}

impl eframe::App for OutbreakMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loads();
        self.handle_keyboard_input(ctx);

        self.show_status_bar(ctx);
        self.show_sidebar(ctx);
        self.show_central_panel(ctx);

        self.toasts.show(ctx);
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([CANVAS_SIZE + SIDEBAR_WIDTH + 16.0, CANVAS_SIZE + 40.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Outbreak Map",
        options,
        Box::new(|cc| Ok(Box::new(OutbreakMapApp::new(cc)))),
    )
}
