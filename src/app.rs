use eframe::egui;

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RouteMileageApp {
    pub state: AppState,
}

impl RouteMileageApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Files dropped onto the window count as an upload.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        if let Some(path) = &file.path {
            self.state.open_path(path);
        } else if let Some(bytes) = &file.bytes {
            self.state.open_bytes(&file.name, bytes);
        }
    }
}

impl eframe::App for RouteMileageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // Nothing could be loaded: only the error and File → Open… remain.
        if let Some(err) = &self.state.load_error {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::error_block(ui, err);
            });
            return;
        }

        // ---- Left side panel: route selector ----
        egui::SidePanel::left("route_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: route page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::route_page(ui, &mut self.state);
        });
    }
}
