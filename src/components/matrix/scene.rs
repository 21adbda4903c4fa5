//! Desired matrix elements, keyed by tactic and technique id.

use super::interaction::MatrixInteraction;
use super::layout::{HeaderLines, MatrixLayout, MatrixTarget};
use crate::catalog::Maturity;
use crate::components::geometry::Rect;
use crate::components::palette;

pub const CELL_FILL: &str = "#111827";
pub const CELL_STROKE: &str = "#1f2937";
pub const CELL_HOVER_FILL: &str = "#1f2937";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MatrixKey {
	Header(String),
	/// Tactic id, technique id.
	Cell(String, String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum MatrixSprite {
	Header {
		rect: Rect,
		color: &'static str,
		hovered: bool,
		tactic_id: String,
		lines: HeaderLines,
		count: String,
	},
	Cell {
		rect: Rect,
		accent: &'static str,
		hovered: bool,
		technique_id: String,
		label: String,
		maturity: Maturity,
		subtechniques: usize,
	},
}

impl MatrixSprite {
	pub fn fill(&self) -> String {
		match self {
			Self::Header { color, .. } => palette::with_alpha(color, 0x15),
			Self::Cell { hovered: true, .. } => CELL_HOVER_FILL.to_string(),
			Self::Cell { .. } => CELL_FILL.to_string(),
		}
	}

	pub fn stroke(&self) -> String {
		match self {
			Self::Header { color, hovered: true, .. } => color.to_string(),
			Self::Header { .. } => "transparent".to_string(),
			Self::Cell { accent, hovered: true, .. } => palette::with_alpha(accent, 0x80),
			Self::Cell { .. } => CELL_STROKE.to_string(),
		}
	}

	/// True when `next` differs from `self` in hover state alone.
	pub fn restyles_only(&self, next: &Self) -> bool {
		self.at_rest() == next.at_rest()
	}

	fn at_rest(&self) -> Self {
		let mut sprite = self.clone();
		match &mut sprite {
			Self::Header { hovered, .. } | Self::Cell { hovered, .. } => *hovered = false,
		}
		sprite
	}
}

/// Headers first, then every column's cells top to bottom.
pub fn describe(
	layout: &MatrixLayout,
	interaction: &MatrixInteraction,
) -> Vec<(MatrixKey, MatrixSprite)> {
	let hovered = interaction.hovered();
	let mut sprites = Vec::new();
	for (column, col) in layout.columns.iter().enumerate() {
		sprites.push((
			MatrixKey::Header(col.tactic.id.clone()),
			MatrixSprite::Header {
				rect: col.header_rect,
				color: col.color,
				hovered: hovered == Some(MatrixTarget::Header { column }),
				tactic_id: col.tactic.id.clone(),
				lines: col.header.clone(),
				count: col.count_label(),
			},
		));
	}
	for (column, col) in layout.columns.iter().enumerate() {
		for (row, cell) in col.cells.iter().enumerate() {
			sprites.push((
				MatrixKey::Cell(col.tactic.id.clone(), cell.technique.id.clone()),
				MatrixSprite::Cell {
					rect: cell.rect,
					accent: col.color,
					hovered: hovered == Some(MatrixTarget::Cell { column, row }),
					technique_id: cell.technique.id.clone(),
					label: cell.label.clone(),
					maturity: cell.technique.maturity,
					subtechniques: cell.subtechniques,
				},
			));
		}
	}
	sprites
}
