//! Color lookup for tactics and maturity levels.

use crate::catalog::Maturity;

pub const NEUTRAL: &str = "#6b7280";

/// Tactics in the order the legends list them, with display labels.
pub const TACTICS: &[(&str, &str)] = &[
	("AML.TA0002", "Reconnaissance"),
	("AML.TA0003", "Resource Development"),
	("AML.TA0004", "Initial Access"),
	("AML.TA0000", "ML Model Access"),
	("AML.TA0005", "Execution"),
	("AML.TA0006", "Persistence"),
	("AML.TA0012", "Privilege Escalation"),
	("AML.TA0007", "Defense Evasion"),
	("AML.TA0013", "Credential Access"),
	("AML.TA0008", "Discovery"),
	("AML.TA0015", "Lateral Movement"),
	("AML.TA0009", "Collection"),
	("AML.TA0001", "ML Attack Staging"),
	("AML.TA0014", "Command and Control"),
	("AML.TA0010", "Exfiltration"),
	("AML.TA0011", "Impact"),
];

pub fn tactic_color(tactic_id: &str) -> &'static str {
	match tactic_id {
		"AML.TA0002" => "#6366f1",
		"AML.TA0003" => "#8b5cf6",
		"AML.TA0004" => "#ec4899",
		"AML.TA0000" => "#ef4444",
		"AML.TA0005" => "#f97316",
		"AML.TA0006" => "#eab308",
		"AML.TA0012" => "#84cc16",
		"AML.TA0007" => "#22c55e",
		"AML.TA0013" => "#14b8a6",
		"AML.TA0008" => "#06b6d4",
		"AML.TA0015" => "#0ea5e9",
		"AML.TA0009" => "#3b82f6",
		"AML.TA0001" => "#a855f7",
		"AML.TA0014" => "#d946ef",
		"AML.TA0010" => "#f43f5e",
		"AML.TA0011" => "#dc2626",
		_ => NEUTRAL,
	}
}

pub fn tactic_label(tactic_id: &str) -> Option<&'static str> {
	TACTICS.iter().find(|(id, _)| *id == tactic_id).map(|&(_, label)| label)
}

/// `None` for techniques without a recorded maturity.
pub fn maturity_color(maturity: Maturity) -> Option<&'static str> {
	match maturity {
		Maturity::Feasible => Some("#fbbf24"),
		Maturity::Demonstrated => Some("#f97316"),
		Maturity::Realized => Some("#ef4444"),
		Maturity::Absent => None,
	}
}

/// Appends a two-digit hex alpha to a `#rrggbb` color.
pub fn with_alpha(color: &str, alpha: u8) -> String {
	format!("{color}{alpha:02x}")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_listed_tactic_has_its_own_color() {
		for (id, _) in TACTICS {
			assert_ne!(tactic_color(id), NEUTRAL, "{id}");
		}
		assert_eq!(tactic_color("AML.TA9999"), NEUTRAL);
		assert_eq!(tactic_color(""), NEUTRAL);
	}

	#[test]
	fn labels_come_from_the_tactic_table() {
		assert_eq!(tactic_label("AML.TA0000"), Some("ML Model Access"));
		assert_eq!(tactic_label("AML.TA9999"), None);
	}

	#[test]
	fn absent_maturity_has_no_color() {
		assert_eq!(maturity_color(Maturity::Absent), None);
		assert_eq!(maturity_color(Maturity::Realized), Some("#ef4444"));
	}

	#[test]
	fn alpha_suffix_is_two_hex_digits() {
		assert_eq!(with_alpha("#6366f1", 0x15), "#6366f115");
		assert_eq!(with_alpha("#6366f1", 0x80), "#6366f180");
	}
}
