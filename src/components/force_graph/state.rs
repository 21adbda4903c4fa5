use log::debug;

use super::interaction::{Effect, GraphInteraction, ViewTransform};
use super::model::GraphModel;
use super::scene::{self, SceneKey, Sprite};
use super::simulation::ForceSimulation;
use super::types::TechniqueGraph;
use crate::catalog::Maturity;
use crate::components::geometry::{Point, Viewport};
use crate::components::reconcile::{PatchCounts, Reconciler};
use crate::components::tooltip::{self, TOOLTIP_SIZE, Tooltip, TooltipFact};

/// Smallest pick radius in graph units, so tiny nodes stay easy to grab.
pub const MIN_HIT_RADIUS: f64 = 8.0;

/// Everything one mounted graph owns: the validated data, the simulation,
/// the pointer state and the retained scene the painter draws from.
pub struct ForceGraphState {
	model: GraphModel,
	simulation: ForceSimulation,
	interaction: GraphInteraction,
	scene: Reconciler<SceneKey, Sprite>,
	viewport: Viewport,
	tooltip: Option<Tooltip>,
	dirty: bool,
}

impl ForceGraphState {
	pub fn new(data: &TechniqueGraph, viewport: Viewport) -> Self {
		let model = GraphModel::new(data);
		let simulation = ForceSimulation::new(&model, viewport);
		let mut state = Self {
			model,
			simulation,
			interaction: GraphInteraction::default(),
			scene: Reconciler::new(),
			viewport,
			tooltip: None,
			dirty: false,
		};
		state.sync();
		state
	}

	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	pub fn transform(&self) -> ViewTransform {
		self.interaction.transform
	}

	pub fn scene(&self) -> &Reconciler<SceneKey, Sprite> {
		&self.scene
	}

	pub fn tooltip(&self) -> Option<&Tooltip> {
		self.tooltip.as_ref()
	}

	/// Advances the simulation and refreshes the scene. Returns whether a
	/// repaint is needed.
	pub fn tick(&mut self, dt: f64) -> bool {
		let moved = self.simulation.tick(dt);
		if !(moved || self.dirty) {
			return false;
		}
		let repaint = std::mem::take(&mut self.dirty);
		!self.sync().is_empty() || repaint
	}

	/// Rebuilds the layout from scratch for a new container size.
	pub fn resize(&mut self, viewport: Viewport) -> PatchCounts {
		if viewport == self.viewport {
			return PatchCounts::default();
		}
		debug!(
			"graph resized to {}x{}, rebuilding",
			viewport.width(),
			viewport.height()
		);
		self.simulation.stop();
		self.simulation = ForceSimulation::new(&self.model, viewport);
		self.viewport = viewport;
		self.interaction.reset();
		self.tooltip = None;
		self.scene.invalidate();
		self.dirty = true;
		self.sync()
	}

	/// Halts the simulation; the state stays readable but inert.
	pub fn stop(&mut self) {
		self.simulation.stop();
	}

	/// Topmost node under a screen point.
	pub fn node_at(&self, screen: Point) -> Option<usize> {
		let p = self.interaction.transform.screen_to_graph(screen);
		(0..self.model.nodes().len()).rev().find(|&slot| {
			self.simulation
				.position(slot)
				.is_some_and(|c| c.distance(p) <= self.model.radius(slot).max(MIN_HIT_RADIUS))
		})
	}

	pub fn pointer_down(&mut self, screen: Point) {
		let hit = self
			.node_at(screen)
			.and_then(|slot| Some((slot, self.simulation.position(slot)?)));
		let effects = self.interaction.press(screen, hit);
		self.apply(effects);
	}

	/// `client` is the pointer in window coordinates, `window` the browser
	/// viewport the tooltip must stay inside.
	pub fn pointer_move(&mut self, screen: Point, client: Point, window: Option<Viewport>) {
		let before = self.hovered();
		let transform = self.interaction.transform;
		let hit = self.node_at(screen);
		let effects = self.interaction.moved(screen, hit, &self.model);
		let moved_something = !effects.is_empty();
		self.apply(effects);

		let hovered = self.hovered();
		if hovered != before {
			self.tooltip = hovered
				.zip(window)
				.map(|(slot, window)| self.node_tooltip(slot, client, window));
			self.dirty = true;
		} else if let (Some(tip), Some(window)) = (self.tooltip.as_mut(), window) {
			tip.follow(client, window);
		}
		if moved_something || transform != self.interaction.transform {
			self.dirty = true;
		}
	}

	/// Returns the technique to open when the release completed a click.
	pub fn pointer_up(&mut self) -> Option<String> {
		let effects = self.interaction.release();
		self.apply(effects)
	}

	pub fn pointer_leave(&mut self) {
		let effects = self.interaction.leave();
		self.apply(effects);
		self.tooltip = None;
		self.dirty = true;
	}

	pub fn wheel(&mut self, screen: Point, delta_y: f64) {
		self.interaction.wheel(screen, delta_y);
		self.dirty = true;
	}

	fn hovered(&self) -> Option<usize> {
		self.interaction.highlight().map(|h| h.node)
	}

	fn node_tooltip(&self, slot: usize, client: Point, window: Viewport) -> Tooltip {
		let node = self.model.node(slot);
		let mut facts = Vec::with_capacity(2);
		if node.maturity == Maturity::Absent {
			facts.push(TooltipFact::Maturity(Maturity::Absent));
		}
		facts.push(TooltipFact::CaseStudies(node.case_study_count));
		Tooltip {
			id: node.id.clone(),
			name: node.name.clone(),
			accent: node.color(),
			maturity: node.maturity,
			facts,
			position: tooltip::place(client, TOOLTIP_SIZE, window),
		}
	}

	fn apply(&mut self, effects: Vec<Effect>) -> Option<String> {
		let mut navigate = None;
		for effect in effects {
			match effect {
				Effect::DragStart { node, at } => {
					self.simulation.pin(node, at);
					self.simulation.reheat();
				}
				Effect::DragMove { node, at } => self.simulation.pin(node, at),
				Effect::DragEnd { node } => {
					self.simulation.unpin(node);
					self.simulation.cool();
				}
				Effect::Navigate { node } => navigate = Some(self.model.node(node).id.clone()),
			}
		}
		navigate
	}

	fn sync(&mut self) -> PatchCounts {
		let desired = scene::describe(&self.model, &self.simulation, &self.interaction);
		PatchCounts::of(&self.scene.reconcile(desired))
	}
}
