//! Dataset builders for the graph engine tests.

use super::types::{TechniqueEdge, TechniqueGraph, TechniqueNode};
use crate::catalog::Maturity;

pub fn node(id: &str, cases: u32) -> TechniqueNode {
	TechniqueNode {
		id: id.into(),
		name: format!("Technique {id}"),
		tactic_ids: vec!["AML.TA0004".into()],
		maturity: Maturity::Demonstrated,
		case_study_count: cases,
	}
}

pub fn edge(source: &str, target: &str, weight: u32) -> TechniqueEdge {
	TechniqueEdge {
		source: source.into(),
		target: target.into(),
		weight,
	}
}

/// `A - B - C` plus an edge to the missing node `D`.
pub fn abc() -> TechniqueGraph {
	TechniqueGraph {
		nodes: vec![node("A", 1), node("B", 4), node("C", 2)],
		edges: vec![edge("A", "B", 2), edge("B", "C", 5), edge("A", "D", 1)],
	}
}
