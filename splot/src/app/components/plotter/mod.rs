mod interact;
mod logic;
mod scale;
mod ui;

pub use logic::{build_scene, RenderRequest};

use std::collections::HashSet;

use super::dataset::FieldMapping;
use scale::{ColorScale, LinearScale};

pub struct Plotter {
    scene: Option<Scene>,
    highlight: Option<Highlight>,
    /// Apply the scene's nice domain as plot bounds on the next frame.
    pending_bounds: bool,
}

/// The complete visual state of one render cycle: marks, scales and the
/// field mapping they were built from. Replaced wholesale on re-render.
#[derive(Debug)]
pub struct Scene {
    pub marks: Vec<Mark>,
    pub xscale: LinearScale,
    pub yscale: LinearScale,
    pub colors: ColorScale,
    pub mapping: FieldMapping,
}

/// One rendered point, tied back to its source row.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub category: String,
}

/// The selection produced by clicking a mark.
struct Highlight {
    category: String,
    rows: HashSet<usize>,
}

impl Plotter {
    pub fn new() -> Self {
        Self {
            scene: None,
            highlight: None,
            pending_bounds: false,
        }
    }

    pub fn replace_scene(&mut self, scene: Scene) {
        self.scene = Some(scene);
        self.highlight = None;
        self.pending_bounds = true;
    }

    pub fn clear_scene(&mut self) {
        self.scene = None;
        self.highlight = None;
        self.pending_bounds = false;
    }

    pub fn mark_count(&self) -> usize {
        self.scene.as_ref().map(|s| s.marks.len()).unwrap_or(0)
    }
}

impl Default for Plotter {
    fn default() -> Self {
        Self::new()
    }
}
