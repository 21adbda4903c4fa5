mod component;
#[cfg(test)]
mod fixtures;
mod interaction;
mod model;
mod render;
pub mod scale;
mod scene;
mod simulation;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use types::TechniqueGraph;
