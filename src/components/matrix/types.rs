use std::collections::HashMap;

use serde::Deserialize;

use crate::catalog::TechniqueSummary;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TacticSummary {
	pub id: String,
	pub name: String,
	/// Left-to-right position in the matrix.
	pub matrix_order: i64,
	#[serde(default)]
	pub technique_count: u32,
}

/// `GET /api/matrix` response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MatrixPayload {
	pub version: String,
	pub tactics: Vec<TacticSummary>,
	/// Techniques listed under each tactic id, subtechniques included.
	#[serde(default)]
	pub tactic_techniques: HashMap<String, Vec<TechniqueSummary>>,
}
