mod component;
mod interaction;
mod layout;
mod legend;
mod scene;
mod surface;
mod types;

pub use component::AtlasMatrix;
pub use types::MatrixPayload;
