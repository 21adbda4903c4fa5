//! Hover and click handling for the matrix.
//!
//! Only one target is ever hovered: a column header or a single cell.
//! Moving onto another target replaces it; there is no adjacency between
//! columns.

use super::layout::{MatrixLayout, MatrixTarget};
use crate::components::geometry::{Point, Viewport};
use crate::components::tooltip::{self, TOOLTIP_SIZE, Tooltip, TooltipFact};

#[derive(Clone, Debug, Default)]
pub struct MatrixInteraction {
	hovered: Option<MatrixTarget>,
	tooltip: Option<Tooltip>,
}

impl MatrixInteraction {
	pub fn hovered(&self) -> Option<MatrixTarget> {
		self.hovered
	}

	pub fn tooltip(&self) -> Option<&Tooltip> {
		self.tooltip.as_ref()
	}

	/// `local` is the pointer in matrix coordinates, `client` in window
	/// coordinates. Returns whether the hovered target changed.
	pub fn pointer_move(
		&mut self,
		layout: &MatrixLayout,
		local: Point,
		client: Point,
		window: Option<Viewport>,
	) -> bool {
		let target = layout.hit_test(local);
		if target == self.hovered {
			if let (Some(tip), Some(window)) = (self.tooltip.as_mut(), window) {
				tip.follow(client, window);
			}
			return false;
		}
		self.hovered = target;
		self.tooltip = match (target, window) {
			(Some(MatrixTarget::Cell { column, row }), Some(window)) => {
				cell_tooltip(layout, column, row, client, window)
			}
			_ => None,
		};
		true
	}

	/// Returns whether anything was hovered.
	pub fn pointer_leave(&mut self) -> bool {
		self.tooltip = None;
		self.hovered.take().is_some()
	}

	/// Technique to open for a click at `local`; headers are not clickable.
	pub fn click(&self, layout: &MatrixLayout, local: Point) -> Option<String> {
		match layout.hit_test(local)? {
			MatrixTarget::Cell { column, row } => {
				Some(layout.cell(column, row)?.technique.id.clone())
			}
			MatrixTarget::Header { .. } => None,
		}
	}

	/// Forgets the hover; indices from an older layout are meaningless.
	pub fn reset(&mut self) {
		*self = Self::default();
	}
}

fn cell_tooltip(
	layout: &MatrixLayout,
	column: usize,
	row: usize,
	client: Point,
	window: Viewport,
) -> Option<Tooltip> {
	let col = layout.column(column)?;
	let cell = col.cells.get(row)?;
	let technique = &cell.technique;
	let mut facts = Vec::new();
	if cell.subtechniques > 0 {
		facts.push(TooltipFact::Subtechniques(cell.subtechniques));
	}
	if technique.tactic_ids.len() > 1 {
		facts.push(TooltipFact::Tactics(technique.tactic_ids.len()));
	}
	Some(Tooltip {
		id: technique.id.clone(),
		name: technique.name.clone(),
		accent: col.color,
		maturity: technique.maturity,
		facts,
		position: tooltip::place(client, TOOLTIP_SIZE, window),
	})
}
