#![warn(clippy::all, rust_2018_idioms)]

use app_core::backend::BackendEventLoop;
use splot::{BackendAppState, Config, EguiApp};

const WINDOW_NAME: &str = "Splot >>";
const WINDOW_WIDTH: f32 = 900.0;
const WINDOW_HEIGHT: f32 = 620.0;

fn main() -> eframe::Result {
    env_logger::init();

    // start backend loop
    let (request_tx, request_rx) = std::sync::mpsc::channel();
    let config = if let Ok(config) = Config::from_config_file() {
        config
    } else {
        log::warn!("unable to load config file \".splot\" from home directory");
        Config::default()
    };
    let backend_state = BackendAppState::new();
    let eventloop_handle = BackendEventLoop::new(request_rx, backend_state).run();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_NAME,
        native_options,
        Box::new(|cc| {
            Ok(Box::new(EguiApp::new(
                cc,
                config,
                request_tx,
                eventloop_handle,
            )))
        }),
    )
}
