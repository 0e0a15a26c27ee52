use crate::app::DynRequestSender;

use super::{DatasetAction, DatasetHandler};

impl DatasetHandler {
    pub(crate) fn render(
        &mut self,
        request_tx: &mut DynRequestSender,
        ctx: &egui::Context,
    ) -> DatasetAction {
        let mut action = DatasetAction::None;

        let side_panel = egui::panel::SidePanel::left("dataset_controls").min_width(230.0);
        side_panel.show(ctx, |ui| {
            ui.heading("Data");
            ui.horizontal(|ui| {
                if ui.button("Open File").clicked() {
                    action = DatasetAction::OpenFile;
                }
                if ui.button("Bundled Example").clicked() {
                    self.load_bundled(request_tx);
                }
            });
            ui.label(format!("Rows: {}", self.row_count()));

            ui.separator();
            ui.heading("Field Mapping");
            field_combo(ui, "X", &mut self.mapping.x, &self.options.position);
            field_combo(ui, "Y", &mut self.mapping.y, &self.options.position);
            field_combo(ui, "Color", &mut self.mapping.color, &self.options.color);
            field_combo(ui, "Image", &mut self.mapping.image, &self.options.image);

            ui.separator();
            ui.horizontal(|ui| {
                let render_button = egui::Button::new("Render");
                if ui
                    .add_enabled(self.render_enabled(), render_button)
                    .on_disabled_hover_text("select X, Y and color fields first")
                    .clicked()
                {
                    action = DatasetAction::Render;
                }
                if ui.button("Reset").clicked() {
                    action = DatasetAction::Reset;
                }
            });

            ui.separator();
            ui.label(self.status());
        });

        action
    }
}

fn field_combo(
    ui: &mut egui::Ui,
    label: &str,
    selection: &mut Option<String>,
    options: &[String],
) {
    let selected_text = selection.clone().unwrap_or_else(|| "select field".into());
    egui::ComboBox::from_label(label)
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            ui.selectable_value(selection, None, "select field");
            for name in options {
                ui.selectable_value(selection, Some(name.clone()), name);
            }
        });
}
