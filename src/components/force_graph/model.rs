use std::collections::{BTreeSet, HashMap};

use log::debug;

use super::scale::{RadiusScale, WidthScale};
use super::types::{TechniqueGraph, TechniqueNode};

/// An edge whose endpoints are both present, as indices into the node list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
	pub source: usize,
	pub target: usize,
	pub weight: u32,
}

impl Link {
	pub fn touches(&self, node: usize) -> bool {
		self.source == node || self.target == node
	}
}

/// Validated, immutable snapshot of one technique graph payload.
///
/// Edges naming an unknown node are dropped here, before anything is laid
/// out; later stages can index `nodes` with any `Link` endpoint.
#[derive(Clone, Debug)]
pub struct GraphModel {
	nodes: Vec<TechniqueNode>,
	index: HashMap<String, usize>,
	links: Vec<Link>,
	adjacency: Vec<BTreeSet<usize>>,
	radii: Vec<f64>,
	widths: Vec<f64>,
}

impl GraphModel {
	pub fn new(data: &TechniqueGraph) -> Self {
		let mut nodes = Vec::with_capacity(data.nodes.len());
		let mut index = HashMap::with_capacity(data.nodes.len());
		for node in &data.nodes {
			if index.contains_key(&node.id) {
				continue;
			}
			index.insert(node.id.clone(), nodes.len());
			nodes.push(node.clone());
		}

		let links: Vec<Link> = data
			.edges
			.iter()
			.filter_map(|edge| {
				Some(Link {
					source: *index.get(&edge.source)?,
					target: *index.get(&edge.target)?,
					weight: edge.weight.max(1),
				})
			})
			.collect();
		let dropped = data.edges.len() - links.len();
		if dropped > 0 {
			debug!("dropped {dropped} edge(s) with unknown endpoints");
		}

		let mut adjacency = vec![BTreeSet::new(); nodes.len()];
		for link in &links {
			if link.source != link.target {
				adjacency[link.source].insert(link.target);
				adjacency[link.target].insert(link.source);
			}
		}

		let radius = RadiusScale::fit(nodes.iter().map(|n| n.case_study_count));
		let width = WidthScale::fit(links.iter().map(|l| l.weight));
		let radii = nodes.iter().map(|n| radius.radius(n.case_study_count)).collect();
		let widths = links.iter().map(|l| width.width(l.weight)).collect();

		Self {
			nodes,
			index,
			links,
			adjacency,
			radii,
			widths,
		}
	}

	pub fn nodes(&self) -> &[TechniqueNode] {
		&self.nodes
	}

	pub fn node(&self, slot: usize) -> &TechniqueNode {
		&self.nodes[slot]
	}

	pub fn slot(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	pub fn links(&self) -> &[Link] {
		&self.links
	}

	pub fn neighbors(&self, slot: usize) -> &BTreeSet<usize> {
		&self.adjacency[slot]
	}

	/// Number of links attached to a node, self-loops excluded.
	pub fn degree(&self, slot: usize) -> usize {
		self.adjacency[slot].len()
	}

	pub fn radius(&self, slot: usize) -> f64 {
		self.radii[slot]
	}

	pub fn width(&self, link: usize) -> f64 {
		self.widths[link]
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}
