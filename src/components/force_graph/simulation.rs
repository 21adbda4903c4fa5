use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::model::GraphModel;
use crate::components::geometry::{Point, Viewport};

/// Tuning for [`ForceSimulation`].
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationSettings {
	/// Rest length of every link, in graph units.
	pub link_distance: f64,
	/// Extra spacing added to each node radius by the collision force.
	pub collision_padding: f64,
	pub collision_strength: f64,
	/// Repulsion handed to `force_graph`'s many-body term.
	pub charge: f32,
	pub alpha_min: f64,
	pub alpha_decay: f64,
	/// Energy target while a node is being dragged.
	pub drag_alpha_target: f64,
}

impl Default for SimulationSettings {
	fn default() -> Self {
		Self {
			link_distance: 120.0,
			collision_padding: 4.0,
			collision_strength: 0.7,
			charge: 150.0,
			alpha_min: 0.001,
			// Cools from 1 to `alpha_min` in about 300 ticks.
			alpha_decay: 1.0 - 0.001f64.powf(1.0 / 300.0),
			drag_alpha_target: 0.3,
		}
	}
}

#[derive(Clone, Copy, Debug)]
struct Spring {
	source: usize,
	target: usize,
	strength: f64,
	bias: f64,
}

/// Force-directed layout over one [`GraphModel`].
///
/// The simulation owns every node position. Repulsion and integration run
/// in `force_graph`; link, collision and centering forces are applied on
/// top of each step, scaled by the current energy `alpha`. Pinned nodes are
/// `force_graph` anchors and are skipped by every force. Each force_graph
/// node carries its slot in the model as user data.
pub struct ForceSimulation {
	graph: ForceGraph<usize, ()>,
	settings: SimulationSettings,
	viewport: Viewport,
	handles: Vec<DefaultNodeIdx>,
	radii: Vec<f64>,
	springs: Vec<Spring>,
	positions: Vec<Point>,
	pinned: Vec<bool>,
	alpha: f64,
	alpha_target: f64,
	stopped: bool,
}

impl ForceSimulation {
	pub fn new(model: &GraphModel, viewport: Viewport) -> Self {
		Self::with_settings(model, viewport, SimulationSettings::default())
	}

	pub fn with_settings(
		model: &GraphModel,
		viewport: Viewport,
		settings: SimulationSettings,
	) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: settings.charge,
			// Springs are applied here with a rest length, not by force_graph.
			force_spring: 0.0,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let count = model.nodes().len();
		let center = viewport.center();
		let ring = viewport.width().min(viewport.height()) * 0.35;
		let mut handles = Vec::with_capacity(count);
		let mut positions = Vec::with_capacity(count);

		for slot in 0..count {
			let angle = (slot as f64) * 2.0 * PI / count as f64;
			let p = Point::new(center.x + ring * angle.cos(), center.y + ring * angle.sin());
			let idx = graph.add_node(NodeData {
				x: p.x as f32,
				y: p.y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: slot,
			});
			handles.push(idx);
			positions.push(p);
		}

		// force_graph gets the topology too so its graph mirrors ours.
		for link in model.links() {
			if link.source != link.target {
				graph.add_edge(handles[link.source], handles[link.target], EdgeData::default());
			}
		}

		let springs = model
			.links()
			.iter()
			.filter(|l| l.source != l.target)
			.map(|l| {
				let (ds, dt) = (model.degree(l.source) as f64, model.degree(l.target) as f64);
				Spring {
					source: l.source,
					target: l.target,
					strength: 1.0 / ds.min(dt).max(1.0),
					bias: ds / (ds + dt).max(1.0),
				}
			})
			.collect();

		debug!("simulation built: {count} nodes, {} links", model.links().len());

		Self {
			graph,
			settings,
			viewport,
			handles,
			radii: (0..count).map(|slot| model.radius(slot)).collect(),
			springs,
			positions,
			pinned: vec![false; count],
			alpha: 1.0,
			alpha_target: 0.0,
			stopped: false,
		}
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// At rest once the energy decayed below `alpha_min` and nothing reheats it.
	pub fn is_settled(&self) -> bool {
		self.alpha < self.settings.alpha_min && self.alpha_target < self.settings.alpha_min
	}

	pub fn position(&self, slot: usize) -> Option<Point> {
		self.positions.get(slot).copied()
	}

	pub fn positions(&self) -> &[Point] {
		&self.positions
	}

	pub fn is_pinned(&self, slot: usize) -> bool {
		self.pinned.get(slot).copied().unwrap_or(false)
	}

	/// Advances one step. Returns `false` when nothing moved.
	pub fn tick(&mut self, dt: f64) -> bool {
		if self.stopped || self.positions.is_empty() || self.is_settled() {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.settings.alpha_decay;

		self.graph.update((dt * self.alpha) as f32);
		self.pull();

		self.apply_links();
		self.apply_collisions();
		self.apply_centering();
		self.contain();

		self.push();
		true
	}

	/// Raises the energy target while a gesture is in progress.
	pub fn reheat(&mut self) {
		if self.stopped {
			return;
		}
		self.alpha_target = self.settings.drag_alpha_target;
		self.alpha = self.alpha.max(self.alpha_target);
	}

	/// Lets the layout decay back to rest.
	pub fn cool(&mut self) {
		self.alpha_target = 0.0;
	}

	/// Fixes a node at `at`, removing it from force influence.
	pub fn pin(&mut self, slot: usize, at: Point) {
		let Some(&handle) = self.handles.get(slot) else {
			return;
		};
		self.pinned[slot] = true;
		self.positions[slot] = at;
		self.graph.visit_nodes_mut(|node| {
			if node.index() == handle {
				node.data.x = at.x as f32;
				node.data.y = at.y as f32;
				node.data.is_anchor = true;
			}
		});
	}

	pub fn unpin(&mut self, slot: usize) {
		let Some(&handle) = self.handles.get(slot) else {
			return;
		};
		self.pinned[slot] = false;
		self.graph.visit_nodes_mut(|node| {
			if node.index() == handle {
				node.data.is_anchor = false;
			}
		});
	}

	/// Halts the simulation for good; later ticks are no-ops.
	pub fn stop(&mut self) {
		if !self.stopped {
			debug!("simulation stopped at alpha {:.4}", self.alpha);
		}
		self.stopped = true;
		self.alpha_target = 0.0;
	}

	/// Copies positions integrated by force_graph into the arena.
	fn pull(&mut self) {
		let center = self.viewport.center();
		let (pinned, positions) = (&self.pinned, &mut self.positions);
		self.graph.visit_nodes(|node| {
			let slot = node.data.user_data;
			if pinned[slot] {
				return;
			}
			let (x, y) = (node.x() as f64, node.y() as f64);
			positions[slot] = if x.is_finite() && y.is_finite() {
				Point::new(x, y)
			} else {
				// Coincident nodes can blow up the charge term; restart near the center.
				Point::new(center.x + slot as f64, center.y - slot as f64)
			};
		});
	}

	fn push(&mut self) {
		let positions = &self.positions;
		self.graph.visit_nodes_mut(|node| {
			let p = positions[node.data.user_data];
			node.data.x = p.x as f32;
			node.data.y = p.y as f32;
		});
	}

	fn apply_links(&mut self) {
		let distance = self.settings.link_distance;
		for spring in &self.springs {
			let (s, t) = (self.positions[spring.source], self.positions[spring.target]);
			let (mut dx, mut dy) = (t.x - s.x, t.y - s.y);
			let len = dx.hypot(dy);
			if len < 1e-9 {
				continue;
			}
			let l = (len - distance) / len * self.alpha * spring.strength;
			dx *= l;
			dy *= l;

			let pins = (self.pinned[spring.source], self.pinned[spring.target]);
			let (move_target, move_source) = match pins {
				(true, true) => (0.0, 0.0),
				(true, false) => (1.0, 0.0),
				(false, true) => (0.0, 1.0),
				(false, false) => (spring.bias, 1.0 - spring.bias),
			};
			self.positions[spring.target].x -= dx * move_target;
			self.positions[spring.target].y -= dy * move_target;
			self.positions[spring.source].x += dx * move_source;
			self.positions[spring.source].y += dy * move_source;
		}
	}

	fn apply_collisions(&mut self) {
		let n = self.positions.len();
		let pad = self.settings.collision_padding;
		for i in 0..n {
			for j in (i + 1)..n {
				let (ri, rj) = (self.radii[i] + pad, self.radii[j] + pad);
				let min = ri + rj;
				let (a, b) = (self.positions[i], self.positions[j]);
				let (mut dx, mut dy) = (b.x - a.x, b.y - a.y);
				let mut dist = dx.hypot(dy);
				if dist >= min {
					continue;
				}
				if dist < 1e-9 {
					// Deterministic nudge so identical points separate.
					dx = 1e-3 * (j - i) as f64;
					dy = 1e-3;
					dist = dx.hypot(dy);
				}
				let push = (min - dist) / dist * self.settings.collision_strength;
				let (wi, wj) = match (self.pinned[i], self.pinned[j]) {
					(true, true) => (0.0, 0.0),
					(true, false) => (0.0, 1.0),
					(false, true) => (1.0, 0.0),
					(false, false) => {
						let (ri2, rj2) = (ri * ri, rj * rj);
						(rj2 / (ri2 + rj2), ri2 / (ri2 + rj2))
					}
				};
				self.positions[i].x -= dx * push * wi;
				self.positions[i].y -= dy * push * wi;
				self.positions[j].x += dx * push * wj;
				self.positions[j].y += dy * push * wj;
			}
		}
	}

	fn apply_centering(&mut self) {
		let n = self.positions.len() as f64;
		let (sx, sy) = self
			.positions
			.iter()
			.fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
		let center = self.viewport.center();
		let (shift_x, shift_y) = (center.x - sx / n, center.y - sy / n);
		for (p, pinned) in self.positions.iter_mut().zip(&self.pinned) {
			if !pinned {
				p.x += shift_x;
				p.y += shift_y;
			}
		}
	}

	/// Keeps free nodes inside the viewport.
	fn contain(&mut self) {
		let (w, h) = (self.viewport.width(), self.viewport.height());
		for ((p, &r), pinned) in self.positions.iter_mut().zip(&self.radii).zip(&self.pinned) {
			if *pinned {
				continue;
			}
			p.x = if w > 2.0 * r { p.x.clamp(r, w - r) } else { w / 2.0 };
			p.y = if h > 2.0 * r { p.y.clamp(r, h - r) } else { h / 2.0 };
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::fixtures::{abc, edge, node};
	use crate::components::force_graph::types::TechniqueGraph;

	fn viewport() -> Viewport {
		Viewport::new(800.0, 600.0).unwrap()
	}

	fn run(sim: &mut ForceSimulation, ticks: usize) -> usize {
		(0..ticks).filter(|_| sim.tick(0.016)).count()
	}

	#[test]
	fn empty_simulation_is_inert() {
		let model = GraphModel::new(&TechniqueGraph::default());
		let mut sim = ForceSimulation::new(&model, viewport());
		assert!(!sim.tick(0.016));
		assert!(sim.positions().is_empty());
		sim.reheat();
		assert!(!sim.tick(0.016));
	}

	#[test]
	fn energy_decays_to_rest() {
		let model = GraphModel::new(&abc());
		let mut sim = ForceSimulation::new(&model, viewport());
		let moved = run(&mut sim, 1000);
		assert!(moved > 250 && moved < 400, "moved for {moved} ticks");
		assert!(sim.is_settled());
		assert!(!sim.tick(0.016));
	}

	#[test]
	fn drag_reheats_and_release_cools() {
		let model = GraphModel::new(&abc());
		let mut sim = ForceSimulation::new(&model, viewport());
		run(&mut sim, 1000);
		sim.reheat();
		assert!(sim.tick(0.016));
		assert!(sim.alpha() >= 0.29);
		sim.cool();
		run(&mut sim, 1000);
		assert!(sim.is_settled());
	}

	#[test]
	fn pinned_nodes_stay_put() {
		let model = GraphModel::new(&abc());
		let mut sim = ForceSimulation::new(&model, viewport());
		let at = Point::new(42.0, 84.0);
		sim.pin(1, at);
		sim.reheat();
		run(&mut sim, 50);
		assert_eq!(sim.position(1), Some(at));
		sim.unpin(1);
		assert!(!sim.is_pinned(1));
	}

	#[test]
	fn free_nodes_stay_inside_the_viewport() {
		let graph = TechniqueGraph {
			nodes: (0..12).map(|i| node(&format!("T{i}"), i * 3)).collect(),
			edges: (1..12)
				.map(|i| edge(&format!("T{i}"), &format!("T{}", i / 2), i))
				.collect(),
		};
		let model = GraphModel::new(&graph);
		let mut sim = ForceSimulation::new(&model, viewport());
		run(&mut sim, 400);
		for (slot, p) in sim.positions().iter().enumerate() {
			let r = model.radius(slot);
			assert!(p.x.is_finite() && p.y.is_finite());
			assert!(p.x >= r && p.x <= 800.0 - r, "{slot}: {p:?}");
			assert!(p.y >= r && p.y <= 600.0 - r, "{slot}: {p:?}");
		}
	}

	#[test]
	fn stopped_simulation_never_moves_again() {
		let model = GraphModel::new(&abc());
		let mut sim = ForceSimulation::new(&model, viewport());
		sim.tick(0.016);
		sim.stop();
		let before = sim.positions().to_vec();
		sim.reheat();
		assert!(!sim.tick(0.016));
		assert_eq!(sim.positions(), before.as_slice());
	}
}
