//! Applies matrix patches to SVG elements.

use std::collections::HashMap;

use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use super::layout::{CELL_HEIGHT, COLUMN_WIDTH, HEADER_HEIGHT, HeaderLines};
use super::scene::{MatrixKey, MatrixSprite};
use crate::components::palette;
use crate::components::reconcile::{Patch, PatchCounts, Reconciler};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const CELL_PADDING_X: f64 = 10.0;
const CELL_PADDING_Y: f64 = 8.0;

type Attrs<'a> = [(&'a str, String)];

/// A rendered `<g>` with the background rect that carries hover styling.
struct Drawn {
	group: Element,
	background: Element,
	sprite: MatrixSprite,
}

/// One `<g>` per scene key, owned under the root `<svg>`.
pub struct SvgSurface {
	document: Document,
	root: Element,
	scene: Reconciler<MatrixKey, MatrixSprite>,
	drawn: HashMap<MatrixKey, Drawn>,
}

impl SvgSurface {
	pub fn new(root: Element) -> Result<Self, JsValue> {
		let document = root
			.owner_document()
			.ok_or_else(|| JsValue::from_str("svg root is not attached to a document"))?;
		Ok(Self {
			document,
			root,
			scene: Reconciler::new(),
			drawn: HashMap::new(),
		})
	}

	/// Drops every element on the next render.
	pub fn invalidate(&mut self) {
		self.scene.invalidate();
	}

	pub fn render(
		&mut self,
		desired: Vec<(MatrixKey, MatrixSprite)>,
	) -> Result<PatchCounts, JsValue> {
		let patches = self.scene.reconcile(desired);
		let counts = PatchCounts::of(&patches);
		for patch in patches {
			self.apply(patch)?;
		}
		if !counts.is_empty() {
			debug!(
				"matrix patched: +{} ~{} -{}",
				counts.created, counts.updated, counts.removed
			);
		}
		Ok(counts)
	}

	fn apply(&mut self, patch: Patch<MatrixKey, MatrixSprite>) -> Result<(), JsValue> {
		match patch {
			Patch::Create { key, attrs } => {
				let drawn = self.build(attrs)?;
				self.root.append_child(&drawn.group)?;
				self.drawn.insert(key, drawn);
			}
			Patch::Update { key, attrs } => {
				if let Some(drawn) = self.drawn.get_mut(&key) {
					if drawn.sprite.restyles_only(&attrs) {
						drawn.background.set_attribute("fill", &attrs.fill())?;
						drawn.background.set_attribute("stroke", &attrs.stroke())?;
						drawn.sprite = attrs;
						return Ok(());
					}
				}
				let fresh = self.build(attrs)?;
				match self.drawn.get(&key) {
					Some(old) => old.group.replace_with_with_node_1(&fresh.group)?,
					None => {
						self.root.append_child(&fresh.group)?;
					}
				}
				self.drawn.insert(key, fresh);
			}
			Patch::Remove { key } => {
				if let Some(drawn) = self.drawn.remove(&key) {
					drawn.group.remove();
				}
			}
		}
		Ok(())
	}

	fn element(&self, parent: &Element, name: &str, attrs: &Attrs) -> Result<Element, JsValue> {
		let el = self.document.create_element_ns(Some(SVG_NS), name)?;
		for (attr, value) in attrs {
			el.set_attribute(attr, value)?;
		}
		parent.append_child(&el)?;
		Ok(el)
	}

	fn text(&self, parent: &Element, content: &str, attrs: &Attrs) -> Result<(), JsValue> {
		let el = self.element(parent, "text", attrs)?;
		el.set_text_content(Some(content));
		Ok(())
	}

	fn build(&self, sprite: MatrixSprite) -> Result<Drawn, JsValue> {
		let group = self.document.create_element_ns(Some(SVG_NS), "g")?;
		let background = match &sprite {
			MatrixSprite::Header {
				rect,
				color,
				tactic_id,
				lines,
				count,
				..
			} => {
				group.set_attribute("transform", &format!("translate({}, {})", rect.x, rect.y))?;
				let frame = [
					("width", COLUMN_WIDTH.to_string()),
					("height", HEADER_HEIGHT.to_string()),
					("rx", "8".into()),
					("fill", sprite.fill()),
					("stroke", sprite.stroke()),
					("stroke-width", "1.5".into()),
				];
				let background = self.element(&group, "rect", &frame)?;
				let accent = [
					("width", COLUMN_WIDTH.to_string()),
					("height", "3".into()),
					("rx", "1.5".into()),
					("fill", color.to_string()),
				];
				self.element(&group, "rect", &accent)?;

				let centered = |y: f64, fill: &str, size: &str| {
					vec![
						("x", (COLUMN_WIDTH / 2.0).to_string()),
						("y", y.to_string()),
						("text-anchor", "middle".to_string()),
						("fill", fill.to_string()),
						("font-size", size.to_string()),
					]
				};
				let mut id_attrs = centered(22.0, *color, "10px");
				id_attrs.push(("font-family", "monospace".into()));
				id_attrs.push(("opacity", "0.8".into()));
				self.text(&group, tactic_id, &id_attrs)?;

				let name_lines: Vec<(f64, &str)> = match lines {
					HeaderLines::Single(name) => vec![(42.0, name.as_str())],
					HeaderLines::Wrapped(first, second) => {
						vec![(38.0, first.as_str()), (51.0, second.as_str())]
					}
				};
				for (y, line) in name_lines {
					let mut attrs = centered(y, "#f3f4f6", "11px");
					attrs.push(("font-weight", "600".into()));
					self.text(&group, line, &attrs)?;
				}
				let count_attrs = centered(HEADER_HEIGHT - 6.0, palette::NEUTRAL, "9px");
				self.text(&group, count, &count_attrs)?;
				background
			}
			MatrixSprite::Cell {
				rect,
				accent,
				technique_id,
				label,
				maturity,
				subtechniques,
				..
			} => {
				group.set_attribute("transform", &format!("translate({}, {})", rect.x, rect.y))?;
				group.set_attribute("class", "matrix-cell")?;
				let frame = [
					("class", "cell-bg".into()),
					("width", COLUMN_WIDTH.to_string()),
					("height", CELL_HEIGHT.to_string()),
					("rx", "6".into()),
					("fill", sprite.fill()),
					("stroke", sprite.stroke()),
					("stroke-width", "1".into()),
				];
				let background = self.element(&group, "rect", &frame)?;

				let id_attrs = [
					("x", CELL_PADDING_X.to_string()),
					("y", (CELL_PADDING_Y + 10.0).to_string()),
					("fill", palette::NEUTRAL.into()),
					("font-size", "9px".into()),
					("font-family", "monospace".into()),
				];
				self.text(&group, technique_id, &id_attrs)?;

				if let Some(dot) = palette::maturity_color(*maturity) {
					let dot_attrs = [
						("cx", (COLUMN_WIDTH - CELL_PADDING_X - 4.0).to_string()),
						("cy", (CELL_PADDING_Y + 6.0).to_string()),
						("r", "3.5".into()),
						("fill", dot.into()),
						("opacity", "0.9".into()),
					];
					self.element(&group, "circle", &dot_attrs)?;
				}

				let label_attrs = [
					("x", CELL_PADDING_X.to_string()),
					("y", (CELL_PADDING_Y + 28.0).to_string()),
					("fill", "#d1d5db".into()),
					("font-size", "11px".into()),
					("font-weight", "500".into()),
				];
				self.text(&group, label, &label_attrs)?;

				if *subtechniques > 0 {
					let more_attrs = [
						("x", (COLUMN_WIDTH - CELL_PADDING_X).to_string()),
						("y", (CELL_PADDING_Y + 28.0).to_string()),
						("text-anchor", "end".into()),
						("fill", "#4b5563".into()),
						("font-size", "9px".into()),
					];
					self.text(&group, &format!("+{subtechniques}"), &more_attrs)?;
				}

				let bar = [
					("x", "0".into()),
					("y", "6".into()),
					("width", "3".into()),
					("height", (CELL_HEIGHT - 12.0).to_string()),
					("rx", "1.5".into()),
					("fill", accent.to_string()),
					("opacity", "0.5".into()),
				];
				self.element(&group, "rect", &bar)?;
				background
			}
		};
		Ok(Drawn {
			group,
			background,
			sprite,
		})
	}
}
