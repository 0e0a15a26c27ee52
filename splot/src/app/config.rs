use app_core::string_error::ErrorStringExt;
use std::{io::Read, path::PathBuf, str::FromStr};

#[derive(Debug)]
pub struct Config {
    /// Optional dataset loaded at startup instead of the bundled example.
    pub dataset_path: Option<PathBuf>,
    pub point_radius: f32,
    pub highlight_radius: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: None,
            point_radius: 2.5,
            highlight_radius: 4.5,
        }
    }
}

impl Config {
    pub fn from_config_file() -> Result<Self, String> {
        let mut config = Self::default();
        #[allow(deprecated)]
        let Some(home) = std::env::home_dir() else {
            return Err("could not determine home directory to load config file".into());
        };
        let config_raw = {
            let path = home.join(PathBuf::from(".splot"));
            let mut file = std::fs::File::open(path).err_to_string("could not open config file")?;
            let mut buf = String::new();
            file.read_to_string(&mut buf)
                .err_to_string("could not load config file")?;
            buf
        };
        for line in config_raw.lines() {
            // Lines starting with "#" are considered comments.
            if line.starts_with("#") {
                continue;
            }
            let mut iter = line.split("=");
            let key = iter.next();
            let val = iter.next();
            match (key, val) {
                (Some("dataset_path"), Some(path_str)) => {
                    let path = PathBuf::from_str(path_str)
                        .expect("could not parse 'dataset_path' as file name");
                    config.dataset_path = Some(path);
                }
                (Some("point_radius"), Some(radius_str)) => {
                    if let Ok(radius) = radius_str.parse::<f32>() {
                        config.point_radius = radius;
                    } else {
                        log::warn!("could not parse 'point_radius' as number")
                    }
                }
                (Some("highlight_radius"), Some(radius_str)) => {
                    if let Ok(radius) = radius_str.parse::<f32>() {
                        config.highlight_radius = radius;
                    } else {
                        log::warn!("could not parse 'highlight_radius' as number")
                    }
                }
                _ => continue,
            }
        }
        Ok(config)
    }

    /// Preferences view. Returns true when the user wants to go back to the
    /// plot.
    pub fn render(&mut self, ui: &mut egui::Ui) -> bool {
        ui.heading("Preferences");
        ui.separator();
        ui.horizontal(|ui| {
            ui.label("Point radius:");
            ui.add(egui::DragValue::new(&mut self.point_radius).range(0.5..=20.0));
        });
        ui.horizontal(|ui| {
            ui.label("Highlight radius:");
            ui.add(egui::DragValue::new(&mut self.highlight_radius).range(0.5..=20.0));
        });
        ui.horizontal(|ui| {
            ui.label("Startup dataset:");
            match &self.dataset_path {
                Some(path) => ui.monospace(format!("{}", path.display())),
                None => ui.label("bundled example"),
            };
        });
        ui.separator();
        ui.button("Back to Plot").clicked()
    }
}
