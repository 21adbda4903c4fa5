pub mod force_graph;
pub mod geometry;
pub mod matrix;
pub mod palette;
pub mod reconcile;
pub mod tooltip;

/// Route of a technique's detail page.
pub fn technique_path(id: &str) -> String {
	format!("/technique/{id}")
}
