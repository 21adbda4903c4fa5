use serde::Deserialize;

use crate::catalog::Maturity;
use crate::components::palette;

/// A technique as a graph node. Identity is `id`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TechniqueNode {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub tactic_ids: Vec<String>,
	#[serde(default)]
	pub maturity: Maturity,
	#[serde(default)]
	pub case_study_count: u32,
}

impl TechniqueNode {
	pub fn primary_tactic(&self) -> Option<&str> {
		self.tactic_ids.first().map(String::as_str)
	}

	pub fn color(&self) -> &'static str {
		palette::tactic_color(self.primary_tactic().unwrap_or_default())
	}
}

/// Co-occurrence of two techniques across case studies.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TechniqueEdge {
	pub source: String,
	pub target: String,
	#[serde(default = "default_weight")]
	pub weight: u32,
}

fn default_weight() -> u32 {
	1
}

/// Payload of `/api/techniques/graph`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TechniqueGraph {
	#[serde(default)]
	pub nodes: Vec<TechniqueNode>,
	#[serde(default)]
	pub edges: Vec<TechniqueEdge>,
}
