//! ATLAS catalog entities shared by the matrix, the graph and detail pages.

use serde::{Deserialize, Deserializer};

/// Observed real-world occurrence level of a technique.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Maturity {
	Feasible,
	Demonstrated,
	Realized,
	#[default]
	Absent,
}

impl Maturity {
	/// Levels offered by the matrix filter, in legend order.
	pub const LEVELS: [Maturity; 3] = [Self::Feasible, Self::Demonstrated, Self::Realized];

	pub fn parse(raw: &str) -> Self {
		match raw.trim().to_ascii_lowercase().as_str() {
			"feasible" => Self::Feasible,
			"demonstrated" => Self::Demonstrated,
			"realized" => Self::Realized,
			_ => Self::Absent,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Feasible => "feasible",
			Self::Demonstrated => "demonstrated",
			Self::Realized => "realized",
			Self::Absent => "absent",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Feasible => "Feasible",
			Self::Demonstrated => "Demonstrated",
			Self::Realized => "Realized",
			Self::Absent => "N/A",
		}
	}
}

impl<'de> Deserialize<'de> for Maturity {
	// `null` and unknown levels both mean "absent".
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = Option::<String>::deserialize(deserializer)?;
		Ok(raw.as_deref().map(Maturity::parse).unwrap_or_default())
	}
}

/// Technique row as listed under a tactic.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TechniqueSummary {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub is_subtechnique: bool,
	#[serde(default)]
	pub maturity: Maturity,
	#[serde(default)]
	pub tactic_ids: Vec<String>,
}

impl TechniqueSummary {
	/// Parent id of a subtechnique: the id minus its trailing `.<digits>` segment.
	pub fn parent_id(&self) -> Option<&str> {
		if !self.is_subtechnique {
			return None;
		}
		parent_technique_id(&self.id)
	}
}

pub fn parent_technique_id(id: &str) -> Option<&str> {
	let (parent, suffix) = id.rsplit_once('.')?;
	(!suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit())).then_some(parent)
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MitigationRef {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub category: Option<String>,
	#[serde(default)]
	pub usage: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CaseStudySummary {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub incident_date: Option<String>,
	#[serde(default)]
	pub case_study_type: Option<String>,
	#[serde(default)]
	pub target: Option<String>,
}

/// Full technique record from `/api/techniques/{id}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TechniqueDetail {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub is_subtechnique: bool,
	#[serde(default)]
	pub parent_technique_id: Option<String>,
	#[serde(default)]
	pub maturity: Maturity,
	#[serde(default)]
	pub attck_id: Option<String>,
	#[serde(default)]
	pub attck_url: Option<String>,
	#[serde(default)]
	pub tactic_ids: Vec<String>,
	#[serde(default)]
	pub subtechniques: Vec<TechniqueSummary>,
	#[serde(default)]
	pub mitigations: Vec<MitigationRef>,
	#[serde(default)]
	pub case_studies: Vec<CaseStudySummary>,
	#[serde(default)]
	pub created_date: Option<String>,
	#[serde(default)]
	pub modified_date: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn maturity_accepts_null_and_unknown_levels() {
		let parsed: Vec<Maturity> =
			serde_json::from_str(r#"["realized", null, "speculative", "Feasible"]"#).unwrap();
		assert_eq!(
			parsed,
			vec![
				Maturity::Realized,
				Maturity::Absent,
				Maturity::Absent,
				Maturity::Feasible
			]
		);
	}

	#[test]
	fn missing_maturity_field_is_absent() {
		let tech: TechniqueSummary =
			serde_json::from_str(r#"{"id":"AML.T0000","name":"Search"}"#).unwrap();
		assert_eq!(tech.maturity, Maturity::Absent);
		assert!(tech.tactic_ids.is_empty());
	}

	#[test]
	fn parent_id_strips_numeric_suffix_only() {
		assert_eq!(parent_technique_id("AML.T0051.001"), Some("AML.T0051"));
		assert_eq!(parent_technique_id("AML.T0051"), None);
		assert_eq!(parent_technique_id("AML.T0051.x1"), None);
		assert_eq!(parent_technique_id("AML.T0051."), None);
	}
}
