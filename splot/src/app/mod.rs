mod components;
pub mod config;
mod events;

use std::{sync::mpsc::Sender, thread::JoinHandle};

use app_core::backend::BackendRequest;
use config::Config;
use events::{EventQueue, OpenFileRequested};

use crate::BackendAppState;

use self::components::{
    build_scene, DatasetAction, DatasetHandler, DatasetUpdate, Plotter, RenderRequest,
};

pub type DynRequestSender = Sender<Box<dyn BackendRequest<BackendAppState>>>;

pub struct EguiApp {
    config: Config,
    backend_thread_handle: Option<JoinHandle<()>>,
    dataset: DatasetHandler,
    plotter: Plotter,
    request_tx: DynRequestSender,
    shortcuts_modal_open: bool,
    ui_selection: UISelection,
    event_queue: EventQueue<Self>,
    request_redraw: Option<()>,
}

#[derive(Debug, PartialEq, Eq)]
enum UISelection {
    Plot,
    Preferences,
}

impl EguiApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: Config,
        mut request_tx: Sender<Box<dyn BackendRequest<BackendAppState>>>,
        backend_thread_handle: JoinHandle<()>,
    ) -> Self {
        let mut dataset = DatasetHandler::default();
        // The configured startup dataset wins over the bundled example.
        if let Some(path) = config.dataset_path.clone() {
            dataset.load_path(&path, &mut request_tx);
        } else {
            dataset.load_bundled(&mut request_tx);
        }

        Self {
            config,
            backend_thread_handle: Some(backend_thread_handle),
            dataset,
            plotter: Plotter::new(),
            request_tx,
            shortcuts_modal_open: false,
            ui_selection: UISelection::Plot,
            event_queue: EventQueue::<Self>::new(),
            request_redraw: None,
        }
    }

    fn reset_state(&mut self) {
        self.dataset.reset();
        self.plotter.clear_scene();
        self.event_queue.discard_events();
    }

    fn update_state(&mut self) {
        self.run_events();
        match self.dataset.try_update() {
            // A new table invalidates any scene built from the old one.
            DatasetUpdate::Loaded => {
                self.plotter.clear_scene();
                self.request_redraw();
            }
            // A failed parse keeps the previous scene on screen; only the
            // side panel (status, row counter, render button) reflects the
            // error.
            DatasetUpdate::Failed => self.request_redraw(),
            DatasetUpdate::None => (),
        }
    }

    pub fn request_redraw(&mut self) {
        self.request_redraw = Some(());
    }

    /// Tear down the previous scene and build a fresh one from the current
    /// table and field mapping.
    fn rebuild_scene(&mut self) {
        let Ok(table) = self.dataset.table() else {
            self.dataset.set_status("load a dataset first");
            return;
        };
        if !self.dataset.mapping().is_complete() {
            self.dataset.set_status("select X, Y and color fields first");
            return;
        }
        let request = RenderRequest {
            table,
            mapping: self.dataset.mapping(),
        };
        match build_scene(&request) {
            Ok(scene) => {
                self.plotter.replace_scene(scene);
                let status = format!("rendered {} marks", self.plotter.mark_count());
                self.dataset.set_status(&status);
            }
            Err(msg) => {
                log::warn!("unable to build scene: {msg}");
                self.dataset.set_status(&msg);
            }
        }
    }

    fn open_file_dialog(&mut self) {
        log::debug!("open dialog to select data file");
        let handle = std::thread::spawn(|| {
            rfd::FileDialog::new()
                .add_filter("tabular data", &["csv", "json"])
                .pick_file()
        });
        let event = OpenFileRequested::new(Some(handle));
        self.event_queue.queue_event(Box::new(event));
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.request_redraw.take().is_some() {
            ctx.request_repaint();
        }

        self.update_state();

        let mut should_quit = false;
        let mut should_reload = false;

        // Handle keyboard input.
        ctx.input(|i| {
            // Help window.
            if i.key_pressed(egui::Key::F1) {
                self.shortcuts_modal_open = !self.shortcuts_modal_open;
            }
            // Close app.
            if i.key_pressed(egui::Key::F10) {
                // Quitting cannot be requested from within here, the UI stops,
                // but not the backend thread.
                should_quit = true;
            }
            // Reload current dataset.
            if i.key_pressed(egui::Key::F5) {
                should_reload = true;
            }
            // Open preferences.
            if i.key_pressed(egui::Key::F12) {
                self.ui_selection = UISelection::Preferences;
            }
        });
        if ctx.input(|i| i.key_pressed(egui::Key::O) && i.modifiers.ctrl) {
            self.open_file_dialog();
        }
        if should_reload {
            self.dataset.reload(&mut self.request_tx);
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.render_shortcut_modal(ctx);
            self.menu(ui, ctx);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.central_panel(ui, ctx);
        });

        if should_quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(handle) = self.backend_thread_handle.take() {
            app_core::backend::request_stop(&self.request_tx, handle);
        }
    }
}

impl EguiApp {
    fn central_panel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        match self.ui_selection {
            UISelection::Plot => {
                let action = self.dataset.render(&mut self.request_tx, ctx);
                match action {
                    DatasetAction::OpenFile => self.open_file_dialog(),
                    DatasetAction::Render => self.rebuild_scene(),
                    DatasetAction::Reset => self.reset_state(),
                    DatasetAction::None => (),
                }
                self.plotter.render(&self.dataset, &self.config, ui);
            }
            UISelection::Preferences => {
                if self.config.render(ui) {
                    self.ui_selection = UISelection::Plot;
                }
            }
        }
    }

    fn menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::menu::bar(ui, |ui| {
            {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Data File").clicked() {
                        self.open_file_dialog();
                    }
                    if ui.button("Load Bundled Example").clicked() {
                        self.dataset.load_bundled(&mut self.request_tx);
                    }
                    if ui.button("Reload").clicked() {
                        self.dataset.reload(&mut self.request_tx);
                    }
                    if ui.button("Reset Session").clicked() {
                        self.reset_state();
                    };
                    if ui.button("Preferences").clicked() {
                        self.ui_selection = UISelection::Preferences
                    };
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                // Selection of ui view.
                ui.menu_button("View", |ui| {
                    ui.selectable_value(&mut self.ui_selection, UISelection::Plot, "Plot");
                    ui.selectable_value(
                        &mut self.ui_selection,
                        UISelection::Preferences,
                        "Preferences",
                    );
                });

                ui.toggle_value(&mut self.shortcuts_modal_open, "Help (F1)");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::widgets::global_theme_preference_buttons(ui);
                });
            };
        });
    }

    fn render_shortcut_modal(&mut self, ctx: &egui::Context) {
        if self.shortcuts_modal_open
            && egui::Modal::new("shortcut_modal".into())
                .show(ctx, |ui| {
                    ui.heading("Keyboard Shortcuts");
                    ui.separator();
                    ui.label("CTRL + O = Open Data File");
                    ui.separator();
                    ui.label("F1 = Show Keyboard Shortcuts");
                    ui.separator();
                    ui.label("F5 = Reload Current Dataset");
                    ui.separator();
                    ui.label("F10 = Quit App");
                    ui.separator();
                    ui.label("F12 = Open Preferences");
                    ui.separator();
                    ui.label("Hover a mark to see its image field.");
                    ui.label("Click a mark to highlight its category, click empty space to clear.");
                })
                .should_close()
        {
            self.shortcuts_modal_open = false;
        };
    }
}
