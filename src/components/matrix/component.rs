use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use log::{debug, info, warn};
use web_sys::{Element, MouseEvent};

use super::interaction::MatrixInteraction;
use super::layout::MatrixLayout;
use super::legend::MatrixLegend;
use super::scene;
use super::surface::SvgSurface;
use super::types::MatrixPayload;
use crate::catalog::Maturity;
use crate::components::geometry::{Point, Viewport};
use crate::components::technique_path;
use crate::components::tooltip::{TechniqueTooltip, Tooltip};

type SharedSurface = Rc<RefCell<Option<SvgSurface>>>;

fn window_viewport() -> Option<Viewport> {
	let window = web_sys::window()?;
	Viewport::new(
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	)
}

fn repaint(surface: &SharedSurface, layout: &MatrixLayout, interaction: &MatrixInteraction) {
	if let Some(surface) = surface.borrow_mut().as_mut() {
		if let Err(err) = surface.render(scene::describe(layout, interaction)) {
			warn!("matrix render failed: {err:?}");
		}
	}
}

/// The ATLAS matrix: legend, SVG grid and hover tooltip.
///
/// Changing the filter patches cells by key; a new payload rebuilds the
/// whole grid.
#[component]
pub fn AtlasMatrix(#[prop(into)] payload: Signal<MatrixPayload>) -> impl IntoView {
	let filter = RwSignal::new(None::<Maturity>);
	let layout = Memo::new(move |_| payload.with(|p| MatrixLayout::compute(p, filter.get())));
	// Bumped on every new payload so the surface knows to start over.
	let generation = Memo::new(move |previous: Option<&u64>| {
		payload.track();
		previous.map_or(0, |g| g + 1)
	});

	let svg_ref = NodeRef::<leptos::svg::Svg>::new();
	let interaction = Rc::new(RefCell::new(MatrixInteraction::default()));
	let surface: SharedSurface = Rc::new(RefCell::new(None));
	let tooltip = RwSignal::new(None::<Tooltip>);
	let navigate = use_navigate();

	let (interaction_fx, surface_fx) = (interaction.clone(), surface.clone());
	Effect::new(move |rendered: Option<u64>| {
		let current = generation.get();
		let Some(svg) = svg_ref.get() else {
			return current;
		};
		let fresh_surface = surface_fx.borrow().is_none();
		{
			let mut slot = surface_fx.borrow_mut();
			if fresh_surface {
				match SvgSurface::new(Element::from(svg)) {
					Ok(fresh) => *slot = Some(fresh),
					Err(err) => {
						warn!("matrix surface unavailable: {err:?}");
						return current;
					}
				}
			} else if rendered.is_some_and(|r| r != current) {
				debug!("matrix dataset replaced, rebuilding");
				if let Some(surface) = slot.as_mut() {
					surface.invalidate();
				}
			}
		}
		interaction_fx.borrow_mut().reset();
		tooltip.set(None);
		layout.with(|layout| {
			if fresh_surface {
				info!(
					"matrix mounted: {} tactics, {} techniques",
					layout.columns.len(),
					layout.technique_total()
				);
			}
			repaint(&surface_fx, layout, &interaction_fx.borrow());
		});
		current
	});

	let local_point = move |ev: &MouseEvent| {
		let svg = svg_ref.get_untracked()?;
		let rect = svg.get_bounding_client_rect();
		Some(Point::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let (interaction_mm, surface_mm) = (interaction.clone(), surface.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some(local) = local_point(&ev) else {
			return;
		};
		let client = Point::new(ev.client_x() as f64, ev.client_y() as f64);
		let mut ui = interaction_mm.borrow_mut();
		layout.with_untracked(|layout| {
			if ui.pointer_move(layout, local, client, window_viewport()) {
				repaint(&surface_mm, layout, &ui);
			}
		});
		let next = ui.tooltip().cloned();
		if tooltip.with_untracked(|current| *current != next) {
			tooltip.set(next);
		}
	};

	let (interaction_ml, surface_ml) = (interaction.clone(), surface);
	let on_mouseleave = move |_: MouseEvent| {
		let mut ui = interaction_ml.borrow_mut();
		if ui.pointer_leave() {
			layout.with_untracked(|layout| repaint(&surface_ml, layout, &ui));
		}
		tooltip.set(None);
	};

	let on_click = move |ev: MouseEvent| {
		let Some(local) = local_point(&ev) else {
			return;
		};
		let target = layout.with_untracked(|layout| interaction.borrow().click(layout, local));
		if let Some(id) = target {
			debug!("opening technique {id}");
			tooltip.set(None);
			navigate(&technique_path(&id), Default::default());
		}
	};

	view! {
		<div class="atlas-matrix">
			<MatrixLegend
				version=Signal::derive(move || payload.with(|p| p.version.clone()))
				tactic_count=Signal::derive(move || layout.with(|l| l.columns.len()))
				technique_count=Signal::derive(move || layout.with(MatrixLayout::technique_total))
				filter=filter
			/>
			<div class="matrix-scroll">
				<svg
					node_ref=svg_ref
					class="matrix-svg"
					width=move || layout.with(|l| l.width.to_string())
					height=move || layout.with(|l| l.height.to_string())
					style:cursor=move || if tooltip.with(Option::is_some) { "pointer" } else { "default" }
					on:mousemove=on_mousemove
					on:mouseleave=on_mouseleave
					on:click=on_click
				/>
			</div>
			<TechniqueTooltip tooltip=tooltip />
		</div>
	}
}
