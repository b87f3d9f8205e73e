mod app;
mod cli;
mod config;
mod data;
mod error;
mod headless;
mod state;
mod ui;

use anyhow::Result;
use app::RouteMileageApp;
use clap::Parser;
use cli::Args;
use config::AppConfig;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref())?;

    if let Some(target) = &args.export {
        return headless::export(&args, &config, target);
    }

    let mut state = AppState::new(&config);
    state.load_initial(args.file.as_deref());
    if let Some(route) = &args.route {
        state.route = Some(route.clone());
    }
    state.keyword = args.keyword.clone().unwrap_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Route Mileage Lookup",
        options,
        Box::new(move |cc| {
            ui::fonts::install_cjk_fallback(&cc.egui_ctx);
            Ok(Box::new(RouteMileageApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}
