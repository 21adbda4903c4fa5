//! Floating technique tooltip shared by the graph and the matrix.

use leptos::prelude::*;

use super::geometry::{Point, Size, Viewport};
use crate::catalog::Maturity;
use crate::components::palette;

/// Rendered box size; the stylesheet pins `.technique-tooltip` to these bounds.
pub const TOOLTIP_SIZE: Size = Size::new(260.0, 120.0);

const OFFSET_X: f64 = 16.0;
const OFFSET_Y: f64 = 8.0;

/// Top-left corner for a tooltip of `size` near `pointer`.
///
/// Prefers the lower right of the pointer, flips to the left or above when
/// that would overflow, then clamps into the viewport.
pub fn place(pointer: Point, size: Size, viewport: Viewport) -> Point {
	let (vw, vh) = (viewport.width(), viewport.height());

	let mut left = pointer.x + OFFSET_X;
	if left + size.width > vw {
		left = pointer.x - OFFSET_X - size.width;
	}
	let mut top = pointer.y - OFFSET_Y;
	if top + size.height > vh {
		top = pointer.y + OFFSET_Y - size.height;
	}

	Point::new(
		left.clamp(0.0, (vw - size.width).max(0.0)),
		top.clamp(0.0, (vh - size.height).max(0.0)),
	)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TooltipFact {
	/// Spelled out when there is no colored maturity chip to show.
	Maturity(Maturity),
	CaseStudies(u32),
	Subtechniques(usize),
	Tactics(usize),
}

impl TooltipFact {
	fn text(self) -> String {
		let plural = |n: usize| if n == 1 { "" } else { "s" };
		match self {
			Self::Maturity(m) => format!("Maturity: {}", m.label()),
			Self::CaseStudies(n) => format!("Cases: {n}"),
			Self::Subtechniques(n) => format!("{n} subtechnique{}", plural(n)),
			Self::Tactics(n) => format!("{n} tactic{}", plural(n)),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub id: String,
	pub name: String,
	pub accent: &'static str,
	pub maturity: Maturity,
	pub facts: Vec<TooltipFact>,
	pub position: Point,
}

impl Tooltip {
	/// Moves the tooltip next to a new pointer position.
	pub fn follow(&mut self, pointer: Point, viewport: Viewport) {
		self.position = place(pointer, TOOLTIP_SIZE, viewport);
	}
}

#[component]
pub fn TechniqueTooltip(#[prop(into)] tooltip: Signal<Option<Tooltip>>) -> impl IntoView {
	move || {
		tooltip.get().map(|t| {
			let maturity = palette::maturity_color(t.maturity).map(|color| {
				view! {
					<span
						class="tooltip-chip tooltip-maturity"
						style=format!("background-color: {}; color: {};", palette::with_alpha(color, 0x20), color)
					>
						{t.maturity.as_str()}
					</span>
				}
			});
			view! {
				<div
					class="technique-tooltip"
					style=format!("left: {}px; top: {}px;", t.position.x, t.position.y)
				>
					<div class="tooltip-accent" style=format!("background-color: {};", t.accent) />
					<p class="tooltip-id">{t.id.clone()}</p>
					<p class="tooltip-name">{t.name.clone()}</p>
					<div class="tooltip-chips">
						{maturity}
						{t.facts.iter().map(|fact| view! { <span class="tooltip-chip">{fact.text()}</span> }).collect_view()}
					</div>
					<p class="tooltip-hint">"Click to view details"</p>
				</div>
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn viewport() -> Viewport {
		Viewport::new(1280.0, 720.0).unwrap()
	}

	fn assert_inside(p: Point, vp: Viewport) {
		assert!(p.x >= 0.0 && p.y >= 0.0, "{p:?}");
		assert!(p.x + TOOLTIP_SIZE.width <= vp.width(), "{p:?}");
		assert!(p.y + TOOLTIP_SIZE.height <= vp.height(), "{p:?}");
	}

	#[test]
	fn prefers_lower_right_of_pointer() {
		let p = place(Point::new(100.0, 100.0), TOOLTIP_SIZE, viewport());
		assert_eq!(p, Point::new(116.0, 92.0));
	}

	#[test]
	fn stays_inside_at_all_four_corners() {
		let vp = viewport();
		for corner in [
			Point::new(0.0, 0.0),
			Point::new(vp.width(), 0.0),
			Point::new(0.0, vp.height()),
			Point::new(vp.width(), vp.height()),
		] {
			assert_inside(place(corner, TOOLTIP_SIZE, vp), vp);
		}
	}

	#[test]
	fn flips_left_near_right_edge() {
		let p = place(Point::new(1200.0, 100.0), TOOLTIP_SIZE, viewport());
		assert_eq!(p.x, 1200.0 - 16.0 - 260.0);
	}

	#[test]
	fn fact_labels_pluralise() {
		assert_eq!(TooltipFact::Subtechniques(1).text(), "1 subtechnique");
		assert_eq!(TooltipFact::Subtechniques(3).text(), "3 subtechniques");
		assert_eq!(TooltipFact::CaseStudies(0).text(), "Cases: 0");
		assert_eq!(TooltipFact::Maturity(Maturity::Absent).text(), "Maturity: N/A");
	}

	proptest! {
		#[test]
		fn never_leaves_the_viewport(
			w in 300.0f64..3000.0,
			h in 150.0f64..2000.0,
			fx in 0.0f64..=1.0,
			fy in 0.0f64..=1.0,
		) {
			let vp = Viewport::new(w, h).unwrap();
			let p = place(Point::new(fx * w, fy * h), TOOLTIP_SIZE, vp);
			prop_assert!(p.x >= 0.0 && p.y >= 0.0);
			prop_assert!(p.x + TOOLTIP_SIZE.width <= w + 1e-9);
			prop_assert!(p.y + TOOLTIP_SIZE.height <= h + 1e-9);
		}
	}
}
