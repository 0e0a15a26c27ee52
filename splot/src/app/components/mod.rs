mod dataset;
mod plotter;

pub use dataset::{DatasetAction, DatasetHandler, DatasetUpdate};
pub(in crate::app) use dataset::FieldMapping;
pub use plotter::{build_scene, Plotter, RenderRequest};
