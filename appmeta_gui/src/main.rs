#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
use appmeta_core::{AppCommand, AppEvent, run_backend};
use eframe::egui;
use std::thread;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

mod app;
mod ui;

use app::MyApp;

fn main() -> Result<(), eframe::Error> {
    // 0. Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // 1. Create channels
    let (tx_cmd, rx_cmd) = mpsc::channel::<AppCommand>(100);
    let (tx_event, rx_event) = mpsc::channel::<AppEvent>(100);

    // 2. Spawn Backend thread
    thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!("Cannot start backend runtime: {}", e);
                return;
            }
        };

        rt.block_on(async move {
            run_backend(rx_cmd, tx_event).await;
        });
    });

    // 3. Configure window options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([620.0, 580.0])
            .with_resizable(false),
        ..Default::default()
    };

    // 4. Run App
    eframe::run_native(
        "PS4 AppMeta Manager",
        options,
        Box::new(move |cc| {
            // Initialize phosphor icons font
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(MyApp::new(tx_cmd, rx_event)))
        }),
    )
}
