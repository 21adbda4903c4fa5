use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scene::{Emphasis, NODE_STROKE, Sprite};
use super::state::ForceGraphState;

const BACKGROUND: &str = "#030712";

/// Paints the retained scene. Sprites are drawn in scene order, so edges
/// always sit under nodes.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let viewport = state.viewport();
	let t = state.transform();
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, viewport.width(), viewport.height());
	ctx.save();
	let _ = ctx.translate(t.x, t.y);
	let _ = ctx.scale(t.k, t.k);
	for (_, sprite) in state.scene().elements() {
		match sprite {
			Sprite::Edge { .. } => draw_edge(sprite, ctx),
			Sprite::Node { .. } => draw_node(sprite, ctx, t.k),
		}
	}
	ctx.set_global_alpha(1.0);
	ctx.restore();
}

fn draw_edge(sprite: &Sprite, ctx: &CanvasRenderingContext2d) {
	let Sprite::Edge {
		from,
		to,
		width,
		stroke,
		opacity,
	} = sprite
	else {
		return;
	};
	if from.distance(*to) < 0.001 {
		return;
	}
	ctx.set_global_alpha(*opacity);
	ctx.set_stroke_style_str(stroke);
	ctx.set_line_width(*width);
	ctx.begin_path();
	ctx.move_to(from.x, from.y);
	ctx.line_to(to.x, to.y);
	ctx.stroke();
}

fn draw_node(sprite: &Sprite, ctx: &CanvasRenderingContext2d, k: f64) {
	let Sprite::Node {
		center,
		radius,
		fill,
		opacity,
		emphasis,
		label,
	} = sprite
	else {
		return;
	};
	let (x, y, radius) = (center.x, center.y, *radius);

	let glow = match emphasis {
		Emphasis::Hovered => Some((radius * 1.8, 0.35)),
		Emphasis::Neighbor => Some((radius * 1.4, 0.2)),
		Emphasis::Normal | Emphasis::Dimmed => None,
	};
	if let Some((glow_radius, alpha)) = glow {
		if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
			let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {alpha})"));
			let _ = gradient.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
			let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
			ctx.set_global_alpha(1.0);
			ctx.begin_path();
			let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill();
		}
	}

	ctx.set_global_alpha(*opacity);
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(fill);
	ctx.fill();
	ctx.set_stroke_style_str(NODE_STROKE);
	ctx.set_line_width(1.5);
	ctx.stroke();

	if *emphasis == Emphasis::Hovered {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
		ctx.set_line_width(1.5 / k);
		ctx.stroke();
	}

	if let Some(label) = label {
		ctx.set_fill_style_str("white");
		ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
		let _ = ctx.fill_text(label, x + radius + 4.0, y + 4.0);
	}
}
