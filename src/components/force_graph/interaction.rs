//! Pointer state machine for the technique graph.
//!
//! The pointer is `Idle`, `Dragging` a node or `Panning` the view. Hover
//! highlighting is tracked beside that mode rather than inside it, so a drag
//! keeps whatever highlight was showing when it started. Transitions never
//! touch the simulation themselves; they return [`Effect`]s for the owner to
//! apply.

use std::collections::BTreeSet;

use super::model::{GraphModel, Link};
use crate::components::geometry::Point;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 4.0;
/// Pointer travel (screen px) below which a press-release is a click.
pub const CLICK_SLOP: f64 = 4.0;

pub const DIMMED_NODE_OPACITY: f64 = 0.15;
pub const EMPHASIZED_EDGE_OPACITY: f64 = 0.9;
pub const DIMMED_EDGE_OPACITY: f64 = 0.08;
pub const DEFAULT_EDGE_OPACITY: f64 = 0.6;

/// Screen projection of graph coordinates: `screen = graph * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_graph(&self, p: Point) -> Point {
		Point::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
	}

	/// Scales by `factor` around the screen point `anchor`, which stays fixed.
	pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
		let new_k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.k;
		self.x = anchor.x - (anchor.x - self.x) * ratio;
		self.y = anchor.y - (anchor.y - self.y) * ratio;
		self.k = new_k;
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragGesture {
	pub node: usize,
	pub start: Point,
	pub node_start: Point,
	pub travel: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanGesture {
	pub start: Point,
	pub transform_start: ViewTransform,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerMode {
	#[default]
	Idle,
	Dragging(DragGesture),
	Panning(PanGesture),
}

/// The hovered node and its direct neighbors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Highlight {
	pub node: usize,
	pub neighbors: BTreeSet<usize>,
}

impl Highlight {
	pub fn of(node: usize, model: &GraphModel) -> Self {
		Self {
			node,
			neighbors: model.neighbors(node).clone(),
		}
	}

	pub fn includes(&self, slot: usize) -> bool {
		slot == self.node || self.neighbors.contains(&slot)
	}

	pub fn emphasizes(&self, link: &Link) -> bool {
		link.touches(self.node)
	}
}

/// Requests produced by pointer transitions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
	DragStart { node: usize, at: Point },
	DragMove { node: usize, at: Point },
	DragEnd { node: usize },
	Navigate { node: usize },
}

#[derive(Clone, Debug, Default)]
pub struct GraphInteraction {
	pub transform: ViewTransform,
	mode: PointerMode,
	highlight: Option<Highlight>,
}

impl GraphInteraction {
	pub fn mode(&self) -> PointerMode {
		self.mode
	}

	pub fn highlight(&self) -> Option<&Highlight> {
		self.highlight.as_ref()
	}

	/// Replaces the highlight with the one for `target`. Returns whether it changed.
	pub fn hover(&mut self, target: Option<usize>, model: &GraphModel) -> bool {
		if self.highlight.as_ref().map(|h| h.node) == target {
			return false;
		}
		self.highlight = target.map(|node| Highlight::of(node, model));
		true
	}

	/// `hit` is the node under the pointer and its current graph position.
	pub fn press(&mut self, screen: Point, hit: Option<(usize, Point)>) -> Vec<Effect> {
		match hit {
			Some((node, node_start)) => {
				self.mode = PointerMode::Dragging(DragGesture {
					node,
					start: screen,
					node_start,
					travel: 0.0,
				});
				vec![Effect::DragStart {
					node,
					at: node_start,
				}]
			}
			None => {
				self.mode = PointerMode::Panning(PanGesture {
					start: screen,
					transform_start: self.transform,
				});
				Vec::new()
			}
		}
	}

	/// Pointer moved. `hit` is the node under the pointer, used for hover
	/// only while idle.
	pub fn moved(&mut self, screen: Point, hit: Option<usize>, model: &GraphModel) -> Vec<Effect> {
		if self.mode == PointerMode::Idle {
			self.hover(hit, model);
			return Vec::new();
		}
		match &mut self.mode {
			PointerMode::Dragging(drag) => {
				let k = self.transform.k;
				drag.travel = drag.travel.max(drag.start.distance(screen));
				let at = Point::new(
					drag.node_start.x + (screen.x - drag.start.x) / k,
					drag.node_start.y + (screen.y - drag.start.y) / k,
				);
				vec![Effect::DragMove {
					node: drag.node,
					at,
				}]
			}
			PointerMode::Panning(pan) => {
				self.transform.x = pan.transform_start.x + (screen.x - pan.start.x);
				self.transform.y = pan.transform_start.y + (screen.y - pan.start.y);
				Vec::new()
			}
			PointerMode::Idle => Vec::new(),
		}
	}

	pub fn release(&mut self) -> Vec<Effect> {
		match std::mem::take(&mut self.mode) {
			PointerMode::Dragging(drag) => {
				let mut effects = vec![Effect::DragEnd { node: drag.node }];
				if drag.travel < CLICK_SLOP {
					effects.push(Effect::Navigate { node: drag.node });
				}
				effects
			}
			PointerMode::Panning(_) | PointerMode::Idle => Vec::new(),
		}
	}

	/// Pointer left the canvas: ends any gesture and clears the highlight.
	pub fn leave(&mut self) -> Vec<Effect> {
		let effects = match std::mem::take(&mut self.mode) {
			PointerMode::Dragging(drag) => vec![Effect::DragEnd { node: drag.node }],
			_ => Vec::new(),
		};
		self.highlight = None;
		effects
	}

	pub fn wheel(&mut self, screen: Point, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		self.transform.zoom_at(screen, factor);
	}

	pub fn node_opacity(&self, slot: usize) -> f64 {
		match &self.highlight {
			Some(h) if !h.includes(slot) => DIMMED_NODE_OPACITY,
			_ => 1.0,
		}
	}

	pub fn reset(&mut self) {
		*self = Self::default();
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::force_graph::fixtures::{abc, edge, node};
	use crate::components::force_graph::types::TechniqueGraph;

	fn star() -> GraphModel {
		// A - B - C, D isolated, E linked to D.
		GraphModel::new(&TechniqueGraph {
			nodes: ["A", "B", "C", "D", "E"].iter().map(|id| node(id, 1)).collect(),
			edges: vec![edge("A", "B", 1), edge("B", "C", 1), edge("D", "E", 1)],
		})
	}

	#[test]
	fn hover_highlights_node_and_neighbors() {
		let model = star();
		let mut ui = GraphInteraction::default();
		ui.moved(Point::new(1.0, 1.0), Some(1), &model);
		let h = ui.highlight().unwrap();
		assert_eq!(h.node, 1);
		assert_eq!(h.neighbors.iter().copied().collect::<Vec<_>>(), vec![0, 2]);
		assert_eq!(ui.node_opacity(0), 1.0);
		assert_eq!(ui.node_opacity(3), DIMMED_NODE_OPACITY);
	}

	#[test]
	fn hovering_a_second_node_replaces_the_first() {
		let model = star();
		let mut ui = GraphInteraction::default();
		ui.moved(Point::default(), Some(0), &model);
		ui.moved(Point::default(), Some(4), &model);
		assert_eq!(ui.highlight(), Some(&Highlight::of(4, &model)));
		for slot in [0, 1, 2] {
			assert_eq!(ui.node_opacity(slot), DIMMED_NODE_OPACITY);
		}
	}

	#[test]
	fn leave_clears_everything() {
		let model = GraphModel::new(&abc());
		let mut ui = GraphInteraction::default();
		ui.moved(Point::default(), Some(0), &model);
		assert!(ui.leave().is_empty());
		assert_eq!(ui.highlight(), None);
		assert_eq!(ui.node_opacity(2), 1.0);
	}

	#[test]
	fn press_release_without_travel_is_a_click() {
		let mut ui = GraphInteraction::default();
		let at = Point::new(50.0, 60.0);
		ui.press(Point::new(10.0, 10.0), Some((2, at)));
		ui.moved(Point::new(11.0, 11.0), None, &GraphModel::new(&abc()));
		assert_eq!(
			ui.release(),
			vec![Effect::DragEnd { node: 2 }, Effect::Navigate { node: 2 }]
		);
		assert_eq!(ui.mode(), PointerMode::Idle);
	}

	#[test]
	fn drag_moves_in_graph_space_and_keeps_highlight() {
		let model = GraphModel::new(&abc());
		let mut ui = GraphInteraction::default();
		ui.moved(Point::default(), Some(1), &model);
		ui.transform.k = 2.0;
		ui.press(Point::new(100.0, 100.0), Some((1, Point::new(10.0, 10.0))));
		let effects = ui.moved(Point::new(140.0, 120.0), None, &model);
		assert_eq!(
			effects,
			vec![Effect::DragMove {
				node: 1,
				at: Point::new(30.0, 20.0)
			}]
		);
		assert_eq!(ui.highlight().map(|h| h.node), Some(1));
		assert_eq!(ui.release(), vec![Effect::DragEnd { node: 1 }]);
	}

	#[test]
	fn background_drag_pans() {
		let model = GraphModel::new(&abc());
		let mut ui = GraphInteraction::default();
		ui.press(Point::new(0.0, 0.0), None);
		ui.moved(Point::new(30.0, -5.0), None, &model);
		assert_eq!((ui.transform.x, ui.transform.y), (30.0, -5.0));
		assert!(ui.release().is_empty());
	}

	#[test]
	fn zoom_is_clamped_and_anchored() {
		let mut ui = GraphInteraction::default();
		let anchor = Point::new(200.0, 100.0);
		for _ in 0..100 {
			ui.wheel(anchor, -1.0);
		}
		assert_eq!(ui.transform.k, MAX_ZOOM);
		let g = ui.transform.screen_to_graph(anchor);
		assert!((g.x * ui.transform.k + ui.transform.x - anchor.x).abs() < 1e-9);
		for _ in 0..200 {
			ui.wheel(anchor, 1.0);
		}
		assert_eq!(ui.transform.k, MIN_ZOOM);
	}

	#[test]
	fn leaving_mid_drag_ends_the_drag() {
		let mut ui = GraphInteraction::default();
		ui.press(Point::default(), Some((0, Point::default())));
		assert_eq!(ui.leave(), vec![Effect::DragEnd { node: 0 }]);
		assert_eq!(ui.mode(), PointerMode::Idle);
	}
}
