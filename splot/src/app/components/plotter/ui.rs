use egui_plot::{Legend, PlotBounds, PlotPoint, Points};

use crate::app::components::dataset::DatasetHandler;
use crate::app::config::Config;

use super::interact::{CategoryHighlight, Interaction};
use super::{Highlight, Scene};

/// Marks within this screen distance of the cursor count as hovered.
const HOVER_RADIUS_SQ: f32 = 64.0;

impl super::Plotter {
    pub fn render(&mut self, dataset: &DatasetHandler, config: &Config, ui: &mut egui::Ui) {
        let Some(scene) = &self.scene else {
            ui.centered_and_justified(|ui| {
                ui.label("Load data, pick fields, then hit Render.");
            });
            return;
        };

        // The records backing the scene; the scene is cleared whenever a new
        // table arrives, so indices always line up.
        let records = match dataset.table() {
            Ok(table) => table.records(),
            Err(_) => &[],
        };
        let behavior = CategoryHighlight {
            color_field: scene.mapping.color.clone().unwrap_or_default(),
            image_field: scene.mapping.image.clone(),
        };

        // Highlight summary line with a clear button.
        let mut clear_highlight = false;
        if let Some(hl) = &self.highlight {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "highlighted {} marks with {} = {}",
                    hl.rows.len(),
                    behavior.color_field,
                    hl.category
                ));
                if ui.small_button("clear").clicked() {
                    clear_highlight = true;
                }
            });
        }

        let highlight = self.highlight.as_ref();
        let mut pending_bounds = self.pending_bounds;

        let response = egui_plot::Plot::new("scatter")
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                if pending_bounds {
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                        [scene.xscale.start(), scene.yscale.start()],
                        [scene.xscale.stop(), scene.yscale.stop()],
                    ));
                    pending_bounds = false;
                }

                plot_marks(plot_ui, scene, highlight, config);

                // Find the mark under the cursor, measured in screen
                // coordinates so the hover radius is in pixels.
                let pointer = plot_ui
                    .ctx()
                    .input(|i| i.pointer.hover_pos())
                    .filter(|_| plot_ui.response().contains_pointer());
                pointer.and_then(|cursor| {
                    let transform = plot_ui.transform();
                    let mut best: Option<(usize, f32)> = None;
                    for (idx, mark) in scene.marks.iter().enumerate() {
                        let position = transform.position_from_point(&PlotPoint::new(
                            scene.xscale.clamp(mark.x),
                            scene.yscale.clamp(mark.y),
                        ));
                        let dist_sq = position.distance_sq(cursor);
                        if dist_sq <= HOVER_RADIUS_SQ
                            && best.map_or(true, |(_, bd)| dist_sq < bd)
                        {
                            best = Some((idx, dist_sq));
                        }
                    }
                    best.map(|(idx, _)| idx)
                })
            });

        let hovered_mark = response.inner;
        let plot_clicked = response.response.clicked();

        // Hover: tooltip with the image-field value, if one is configured.
        if let Some(content) = hovered_mark
            .and_then(|idx| records.get(scene.marks[idx].row))
            .and_then(|record| behavior.hover_content(record))
        {
            response.response.on_hover_ui_at_pointer(|ui| {
                ui.label(content);
            });
        }

        // Click: route the clicked mark through the highlight behavior;
        // clicking empty plot space clears the selection.
        let mut new_highlight: Option<Option<Highlight>> = None;
        if plot_clicked {
            match hovered_mark {
                Some(idx) => {
                    let mark = &scene.marks[idx];
                    if let Some(record) = records.get(mark.row) {
                        let rows = behavior.highlight_set(record, records);
                        log::debug!(
                            "highlighting {} marks for category '{}'",
                            rows.len(),
                            mark.category
                        );
                        new_highlight = Some(Some(Highlight {
                            category: mark.category.clone(),
                            rows,
                        }));
                    }
                }
                None => new_highlight = Some(None),
            }
        }

        self.pending_bounds = pending_bounds;
        if let Some(hl) = new_highlight {
            self.highlight = hl;
        }
        if clear_highlight {
            self.highlight = None;
        }
    }
}

/// Draw one point series per category (which also produces the legend).
/// While a highlight is active, selected marks grow and the rest dim.
fn plot_marks(
    plot_ui: &mut egui_plot::PlotUi,
    scene: &Scene,
    highlight: Option<&Highlight>,
    config: &Config,
) {
    for category in scene.colors.domain() {
        let color = scene.colors.color_of(category);
        let mut selected: Vec<[f64; 2]> = Vec::new();
        let mut rest: Vec<[f64; 2]> = Vec::new();
        for mark in scene.marks.iter().filter(|m| &m.category == category) {
            let position = [scene.xscale.clamp(mark.x), scene.yscale.clamp(mark.y)];
            match highlight {
                Some(hl) if hl.rows.contains(&mark.row) => selected.push(position),
                _ => rest.push(position),
            }
        }
        if !rest.is_empty() {
            let color = if highlight.is_some() {
                color.gamma_multiply(0.25)
            } else {
                color
            };
            plot_ui.points(
                Points::new(rest)
                    .color(color)
                    .radius(config.point_radius)
                    .name(category),
            );
        }
        if !selected.is_empty() {
            plot_ui.points(
                Points::new(selected)
                    .color(color)
                    .radius(config.highlight_radius)
                    .name(category),
            );
        }
    }
}
