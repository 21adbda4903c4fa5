//! Retained sprites for the technique graph, keyed by technique id.

use super::interaction::{
	DEFAULT_EDGE_OPACITY, DIMMED_EDGE_OPACITY, EMPHASIZED_EDGE_OPACITY, GraphInteraction,
};
use super::model::GraphModel;
use super::simulation::ForceSimulation;
use crate::components::geometry::Point;

pub const DEFAULT_EDGE_COLOR: &str = "#374151";
pub const NODE_STROKE: &str = "#111827";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SceneKey {
	Edge(String, String),
	Node(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
	Normal,
	Hovered,
	Neighbor,
	Dimmed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Sprite {
	Edge {
		from: Point,
		to: Point,
		width: f64,
		stroke: &'static str,
		opacity: f64,
	},
	Node {
		center: Point,
		radius: f64,
		fill: &'static str,
		opacity: f64,
		emphasis: Emphasis,
		/// Drawn next to hovered and neighboring nodes.
		label: Option<String>,
	},
}

/// Desired sprites in paint order: every edge, then every node.
pub fn describe(
	model: &GraphModel,
	simulation: &ForceSimulation,
	interaction: &GraphInteraction,
) -> Vec<(SceneKey, Sprite)> {
	let highlight = interaction.highlight();
	let position = |slot: usize| simulation.position(slot).unwrap_or_default();
	let mut sprites = Vec::with_capacity(model.links().len() + model.nodes().len());

	for (i, link) in model.links().iter().enumerate() {
		let (stroke, opacity) = match highlight {
			None => (DEFAULT_EDGE_COLOR, DEFAULT_EDGE_OPACITY),
			Some(h) if h.emphasizes(link) => (model.node(h.node).color(), EMPHASIZED_EDGE_OPACITY),
			Some(_) => (DEFAULT_EDGE_COLOR, DIMMED_EDGE_OPACITY),
		};
		let (source, target) = (model.node(link.source), model.node(link.target));
		sprites.push((
			SceneKey::Edge(source.id.clone(), target.id.clone()),
			Sprite::Edge {
				from: position(link.source),
				to: position(link.target),
				width: model.width(i),
				stroke,
				opacity,
			},
		));
	}

	for (slot, node) in model.nodes().iter().enumerate() {
		let emphasis = match highlight {
			None => Emphasis::Normal,
			Some(h) if h.node == slot => Emphasis::Hovered,
			Some(h) if h.includes(slot) => Emphasis::Neighbor,
			Some(_) => Emphasis::Dimmed,
		};
		let label =
			matches!(emphasis, Emphasis::Hovered | Emphasis::Neighbor).then(|| node.name.clone());
		sprites.push((
			SceneKey::Node(node.id.clone()),
			Sprite::Node {
				center: position(slot),
				radius: model.radius(slot),
				fill: node.color(),
				opacity: interaction.node_opacity(slot),
				emphasis,
				label,
			},
		));
	}
	sprites
}
