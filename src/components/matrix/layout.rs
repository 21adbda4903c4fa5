//! Grid geometry for the ATLAS matrix.
//!
//! Tactics are columns ordered by `matrix_order`; parent techniques are the
//! rows beneath them. [`MatrixLayout::compute`] is a pure function of the
//! payload and the maturity filter, so the component simply recomputes it
//! whenever either changes.

use std::collections::{HashMap, HashSet};

use super::types::{MatrixPayload, TacticSummary};
use crate::catalog::{Maturity, TechniqueSummary};
use crate::components::geometry::{Point, Rect};
use crate::components::palette;

pub const COLUMN_WIDTH: f64 = 170.0;
pub const COLUMN_GAP: f64 = 8.0;
pub const HEADER_HEIGHT: f64 = 72.0;
pub const CELL_HEIGHT: f64 = 52.0;
pub const CELL_GAP: f64 = 4.0;
pub const PADDING: f64 = 16.0;

/// Cell labels longer than this many characters are cut.
pub const LABEL_BUDGET: usize = 22;
/// Header names longer than this many characters wrap onto a second line.
pub const HEADER_WRAP: usize = 18;

/// Cuts `name` to `LABEL_BUDGET - 1` characters plus `...` when it is too long.
pub fn truncate_label(name: &str) -> String {
	if name.chars().count() <= LABEL_BUDGET {
		return name.to_string();
	}
	let mut label: String = name.chars().take(LABEL_BUDGET - 1).collect();
	label.push_str("...");
	label
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderLines {
	Single(String),
	Wrapped(String, String),
}

/// Breaks at the last space at or before `HEADER_WRAP`, or hard-splits there
/// when the name has no usable space.
pub fn wrap_header(name: &str) -> HeaderLines {
	let chars: Vec<char> = name.chars().collect();
	if chars.len() <= HEADER_WRAP {
		return HeaderLines::Single(name.to_string());
	}
	let line = |range: &[char]| range.iter().collect::<String>();
	match chars[..=HEADER_WRAP].iter().rposition(|&c| c == ' ') {
		Some(space) if space > 0 => {
			HeaderLines::Wrapped(line(&chars[..space]), line(&chars[space + 1..]))
		}
		_ => HeaderLines::Wrapped(line(&chars[..HEADER_WRAP]), line(&chars[HEADER_WRAP..])),
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatrixCell {
	pub technique: TechniqueSummary,
	pub label: String,
	/// Subtechniques of this technique anywhere in the catalog.
	pub subtechniques: usize,
	pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TacticColumn {
	pub tactic: TacticSummary,
	pub color: &'static str,
	pub header: HeaderLines,
	pub header_rect: Rect,
	pub cells: Vec<MatrixCell>,
}

impl TacticColumn {
	pub fn count_label(&self) -> String {
		let n = self.cells.len();
		format!("{n} technique{}", if n == 1 { "" } else { "s" })
	}
}

/// What a point in the matrix lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatrixTarget {
	Header { column: usize },
	Cell { column: usize, row: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatrixLayout {
	pub columns: Vec<TacticColumn>,
	pub filter: Option<Maturity>,
	/// Tallest filtered column, never below one.
	pub rows: usize,
	pub width: f64,
	pub height: f64,
}

impl MatrixLayout {
	pub fn compute(payload: &MatrixPayload, filter: Option<Maturity>) -> Self {
		let subtechniques = subtechnique_counts(payload);

		let mut tactics: Vec<&TacticSummary> = payload.tactics.iter().collect();
		tactics.sort_by_key(|tactic| tactic.matrix_order);

		let columns: Vec<TacticColumn> = tactics
			.into_iter()
			.enumerate()
			.map(|(i, tactic)| {
				let x = PADDING + i as f64 * (COLUMN_WIDTH + COLUMN_GAP);
				let cells = payload
					.tactic_techniques
					.get(&tactic.id)
					.into_iter()
					.flatten()
					.filter(|t| !t.is_subtechnique)
					.filter(|t| filter.is_none_or(|level| t.maturity == level))
					.enumerate()
					.map(|(row, technique)| MatrixCell {
						label: truncate_label(&technique.name),
						subtechniques: subtechniques
							.get(technique.id.as_str())
							.copied()
							.unwrap_or(0),
						rect: Rect::new(x, cell_top(row), COLUMN_WIDTH, CELL_HEIGHT),
						technique: technique.clone(),
					})
					.collect();
				TacticColumn {
					color: palette::tactic_color(&tactic.id),
					header: wrap_header(&tactic.name),
					header_rect: Rect::new(x, PADDING, COLUMN_WIDTH, HEADER_HEIGHT),
					tactic: tactic.clone(),
					cells,
				}
			})
			.collect();

		let rows = columns.iter().map(|c| c.cells.len()).max().unwrap_or(0).max(1);
		let span = (columns.len() as f64 * (COLUMN_WIDTH + COLUMN_GAP) - COLUMN_GAP).max(0.0);
		Self {
			width: span + PADDING * 2.0,
			height: HEADER_HEIGHT + rows as f64 * (CELL_HEIGHT + CELL_GAP) + PADDING * 2.0,
			columns,
			filter,
			rows,
		}
	}

	/// Distinct techniques shown across all columns.
	pub fn technique_total(&self) -> usize {
		self.columns
			.iter()
			.flat_map(|c| &c.cells)
			.map(|cell| cell.technique.id.as_str())
			.collect::<HashSet<_>>()
			.len()
	}

	pub fn hit_test(&self, p: Point) -> Option<MatrixTarget> {
		self.columns.iter().enumerate().find_map(|(column, col)| {
			if col.header_rect.contains(p) {
				return Some(MatrixTarget::Header { column });
			}
			col.cells
				.iter()
				.position(|cell| cell.rect.contains(p))
				.map(|row| MatrixTarget::Cell { column, row })
		})
	}

	pub fn column(&self, column: usize) -> Option<&TacticColumn> {
		self.columns.get(column)
	}

	pub fn cell(&self, column: usize, row: usize) -> Option<&MatrixCell> {
		self.columns.get(column)?.cells.get(row)
	}
}

fn cell_top(row: usize) -> f64 {
	PADDING + HEADER_HEIGHT + CELL_GAP + row as f64 * (CELL_HEIGHT + CELL_GAP)
}

/// Subtechnique totals per parent id over the unfiltered payload. A
/// subtechnique listed under several tactics counts once.
fn subtechnique_counts(payload: &MatrixPayload) -> HashMap<&str, usize> {
	let mut seen = HashSet::new();
	let mut counts = HashMap::new();
	for technique in payload.tactic_techniques.values().flatten() {
		let Some(parent) = technique.parent_id() else {
			continue;
		};
		if seen.insert(technique.id.as_str()) {
			*counts.entry(parent).or_insert(0) += 1;
		}
	}
	counts
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use proptest::prelude::*;

	use super::*;

	fn tactic(id: &str, name: &str, order: i64) -> TacticSummary {
		TacticSummary {
			id: id.into(),
			name: name.into(),
			matrix_order: order,
			technique_count: 0,
		}
	}

	fn technique(id: &str, maturity: Maturity) -> TechniqueSummary {
		TechniqueSummary {
			id: id.into(),
			name: format!("Technique {id}"),
			is_subtechnique: crate::catalog::parent_technique_id(id).is_some(),
			maturity,
			tactic_ids: Vec::new(),
		}
	}

	fn payload() -> MatrixPayload {
		MatrixPayload {
			version: "4.9.0".into(),
			tactics: vec![
				tactic("AML.TA0003", "Resource Development", 2),
				tactic("AML.TA0002", "Reconnaissance", 1),
				tactic("AML.TA0004", "Initial Access", 3),
			],
			tactic_techniques: HashMap::from([
				(
					"AML.TA0002".to_string(),
					vec![
						technique("AML.T0000", Maturity::Realized),
						technique("AML.T0000.000", Maturity::Feasible),
						technique("AML.T0000.001", Maturity::Feasible),
						technique("AML.T0001", Maturity::Demonstrated),
					],
				),
				(
					"AML.TA0003".to_string(),
					vec![
						technique("AML.T0002", Maturity::Realized),
						technique("AML.T0000.001", Maturity::Feasible),
					],
				),
			]),
		}
	}

	fn column_ids(layout: &MatrixLayout) -> Vec<&str> {
		layout.columns.iter().map(|c| c.tactic.id.as_str()).collect()
	}

	#[test]
	fn columns_follow_matrix_order() {
		let layout = MatrixLayout::compute(&payload(), None);
		assert_eq!(column_ids(&layout), vec!["AML.TA0002", "AML.TA0003", "AML.TA0004"]);
		assert_eq!(layout.columns[1].header_rect.x, PADDING + COLUMN_WIDTH + COLUMN_GAP);
	}

	#[test]
	fn ties_keep_payload_order() {
		let mut data = payload();
		for t in &mut data.tactics {
			t.matrix_order = 7;
		}
		let layout = MatrixLayout::compute(&data, None);
		assert_eq!(column_ids(&layout), vec!["AML.TA0003", "AML.TA0002", "AML.TA0004"]);
	}

	#[test]
	fn subtechniques_are_counted_not_shown() {
		let layout = MatrixLayout::compute(&payload(), None);
		let recon = &layout.columns[0];
		let ids: Vec<_> = recon.cells.iter().map(|c| c.technique.id.as_str()).collect();
		assert_eq!(ids, vec!["AML.T0000", "AML.T0001"]);
		// AML.T0000.001 is listed under two tactics but counted once.
		assert_eq!(recon.cells[0].subtechniques, 2);
		assert_eq!(recon.cells[1].subtechniques, 0);
		assert_eq!(recon.count_label(), "2 techniques");
	}

	#[test]
	fn subtechnique_counts_ignore_the_filter() {
		let layout = MatrixLayout::compute(&payload(), Some(Maturity::Realized));
		assert_eq!(layout.columns[0].cells.len(), 1);
		assert_eq!(layout.columns[0].cells[0].subtechniques, 2);
		assert_eq!(layout.columns[0].count_label(), "1 technique");
	}

	#[test]
	fn geometry_tracks_tallest_column() {
		let layout = MatrixLayout::compute(&payload(), None);
		assert_eq!(layout.rows, 2);
		assert_eq!(layout.width, 3.0 * 178.0 - 8.0 + 32.0);
		assert_eq!(layout.height, 72.0 + 2.0 * 56.0 + 32.0);
		assert_eq!(layout.columns[0].cells[1].rect.y, 16.0 + 72.0 + 4.0 + 56.0);
	}

	#[test]
	fn empty_payload_keeps_one_row() {
		let layout = MatrixLayout::compute(&MatrixPayload::default(), None);
		assert!(layout.columns.is_empty());
		assert_eq!(layout.rows, 1);
		assert_eq!(layout.width, 32.0);
		assert_eq!(layout.height, 72.0 + 56.0 + 32.0);
		assert_eq!(layout.technique_total(), 0);
		assert_eq!(layout.hit_test(Point::new(20.0, 20.0)), None);
	}

	#[test]
	fn filter_with_no_matches_still_has_one_row() {
		let mut data = payload();
		data.tactic_techniques.clear();
		let layout = MatrixLayout::compute(&data, Some(Maturity::Feasible));
		assert_eq!(layout.columns.len(), 3);
		assert_eq!(layout.rows, 1);
	}

	#[test]
	fn technique_total_counts_distinct_visible_ids() {
		let mut data = payload();
		data.tactic_techniques
			.get_mut("AML.TA0003")
			.unwrap()
			.push(technique("AML.T0000", Maturity::Realized));
		assert_eq!(MatrixLayout::compute(&data, None).technique_total(), 3);
		assert_eq!(MatrixLayout::compute(&data, Some(Maturity::Demonstrated)).technique_total(), 1);
	}

	#[test]
	fn labels_are_truncated_past_the_budget() {
		assert_eq!(truncate_label("Exactly twenty-two chr"), "Exactly twenty-two chr");
		assert_eq!(
			truncate_label("Craft Adversarial Data Offline"),
			"Craft Adversarial Dat..."
		);
		assert_eq!(
			truncate_label("Ünïcödé names are cut by chars"),
			"Ünïcödé names are cut..."
		);
	}

	#[test]
	fn headers_wrap_at_the_last_space() {
		assert_eq!(wrap_header("ML Model Access"), HeaderLines::Single("ML Model Access".into()));
		assert_eq!(
			wrap_header("Resource Development"),
			HeaderLines::Wrapped("Resource".into(), "Development".into())
		);
		assert_eq!(
			wrap_header("Command and Control"),
			HeaderLines::Wrapped("Command and".into(), "Control".into())
		);
		assert_eq!(
			wrap_header("aaaaaaaaaaaaaaaaaa bbb"),
			HeaderLines::Wrapped("aaaaaaaaaaaaaaaaaa".into(), "bbb".into())
		);
	}

	#[test]
	fn headers_without_a_space_split_hard() {
		assert_eq!(
			wrap_header("Reconnaissanceandmore"),
			HeaderLines::Wrapped("Reconnaissanceandm".into(), "ore".into())
		);
		assert_eq!(
			wrap_header(" Leadingspaceonlyhere"),
			HeaderLines::Wrapped(" Leadingspaceonlyh".into(), "ere".into())
		);
	}

	#[test]
	fn hit_test_finds_headers_and_cells() {
		let layout = MatrixLayout::compute(&payload(), None);
		assert_eq!(
			layout.hit_test(Point::new(20.0, 20.0)),
			Some(MatrixTarget::Header { column: 0 })
		);
		let second_row = layout.columns[0].cells[1].rect;
		assert_eq!(
			layout.hit_test(Point::new(second_row.x + 5.0, second_row.y + 5.0)),
			Some(MatrixTarget::Cell { column: 0, row: 1 })
		);
		// Padding, the gap between columns and the space below the last cell.
		assert_eq!(layout.hit_test(Point::new(4.0, 4.0)), None);
		assert_eq!(layout.hit_test(Point::new(PADDING + COLUMN_WIDTH + 2.0, 40.0)), None);
		assert_eq!(layout.hit_test(Point::new(20.0, layout.height - 2.0)), None);
	}

	fn arb_maturity() -> impl Strategy<Value = Maturity> {
		prop_oneof![
			Just(Maturity::Feasible),
			Just(Maturity::Demonstrated),
			Just(Maturity::Realized),
			Just(Maturity::Absent),
		]
	}

	fn arb_payload() -> impl Strategy<Value = MatrixPayload> {
		(
			prop::collection::vec(-3i64..3, 0..8),
			prop::collection::vec((0usize..8, arb_maturity(), any::<bool>()), 0..40),
		)
			.prop_map(|(orders, techniques)| {
				let tactics: Vec<_> = orders
					.iter()
					.enumerate()
					.map(|(i, &order)| tactic(&format!("AML.TA{i:04}"), "Tactic", order))
					.collect();
				let mut tactic_techniques: HashMap<String, Vec<TechniqueSummary>> = HashMap::new();
				for (n, (column, maturity, sub)) in techniques.into_iter().enumerate() {
					let id = if sub {
						format!("AML.T{:04}.{n:03}", n % 5)
					} else {
						format!("AML.T{n:04}")
					};
					tactic_techniques
						.entry(format!("AML.TA{column:04}"))
						.or_default()
						.push(technique(&id, maturity));
				}
				MatrixPayload {
					version: "test".into(),
					tactics,
					tactic_techniques,
				}
			})
	}

	proptest! {
		#[test]
		fn filtering_only_changes_row_counts(data in arb_payload(), level in arb_maturity()) {
			let all = MatrixLayout::compute(&data, None);
			let filtered = MatrixLayout::compute(&data, Some(level));
			prop_assert_eq!(column_ids(&all), column_ids(&filtered));
			prop_assert_eq!(all.width, filtered.width);
			prop_assert!(filtered.rows >= 1 && filtered.rows <= all.rows);
			for (a, f) in all.columns.iter().zip(&filtered.columns) {
				prop_assert!(f.cells.len() <= a.cells.len());
				prop_assert!(f.cells.iter().all(|c| c.technique.maturity == level));
			}
			let orders: Vec<i64> = filtered.columns.iter().map(|c| c.tactic.matrix_order).collect();
			prop_assert!(orders.windows(2).all(|w| w[0] <= w[1]));
		}

		#[test]
		fn recompute_is_deterministic(
			data in arb_payload(),
			level in prop::option::of(arb_maturity()),
		) {
			prop_assert_eq!(
				MatrixLayout::compute(&data, level),
				MatrixLayout::compute(&data, level)
			);
		}
	}
}
