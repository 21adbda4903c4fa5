use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::ForceGraphState;
use super::types::TechniqueGraph;
use crate::components::geometry::{Point, Viewport};
use crate::components::technique_path;
use crate::components::tooltip::{TechniqueTooltip, Tooltip};
use crate::error::MountError;

/// Frame delta used before two timestamps are known.
const FIRST_FRAME_DT: f64 = 0.016;
/// Longest step fed to the simulation, so a backgrounded tab does not explode it.
const MAX_FRAME_DT: f64 = 0.05;

type Engine = Rc<RefCell<ForceGraphState>>;
type Slot = Rc<RefCell<Option<Mounted>>>;

/// One live engine bound to the canvas.
struct Mounted {
	engine: Engine,
	alive: Arc<AtomicBool>,
}

impl Mounted {
	fn retire(&self) {
		self.alive.store(false, Ordering::Relaxed);
		self.engine.borrow_mut().stop();
	}
}

/// Self-rescheduling `requestAnimationFrame` loop. It owns the resize
/// listener and detaches it on the first frame after teardown.
struct FrameLoop {
	engine: Engine,
	ctx: CanvasRenderingContext2d,
	alive: Arc<AtomicBool>,
	page_alive: Arc<AtomicBool>,
	on_resize: Closure<dyn FnMut()>,
	last: Option<f64>,
	painted: bool,
}

impl FrameLoop {
	fn schedule(self) {
		let Some(window) = web_sys::window() else {
			return;
		};
		let callback = Closure::once_into_js(move |timestamp: f64| self.frame(timestamp));
		if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
			warn!("animation frame rejected: {err:?}");
		}
	}

	fn frame(mut self, timestamp: f64) {
		if !(self.alive.load(Ordering::Relaxed) && self.page_alive.load(Ordering::Relaxed)) {
			self.teardown();
			return;
		}
		let dt = self
			.last
			.map_or(FIRST_FRAME_DT, |last| ((timestamp - last) / 1000.0).clamp(0.0, MAX_FRAME_DT));
		self.last = Some(timestamp);

		let repaint = self.engine.borrow_mut().tick(dt);
		if repaint || !self.painted {
			render::render(&self.engine.borrow(), &self.ctx);
			self.painted = true;
		}
		self.schedule();
	}

	fn teardown(self) {
		self.engine.borrow_mut().stop();
		if let Some(window) = web_sys::window() {
			let listener = self.on_resize.as_ref().unchecked_ref();
			let _ = window.remove_event_listener_with_callback("resize", listener);
		}
		debug!("force graph frame loop stopped");
	}
}

fn measure(canvas: &HtmlCanvasElement) -> Result<Viewport, MountError> {
	let (width, height) = canvas
		.parent_element()
		.map(|parent| (parent.client_width() as f64, parent.client_height() as f64))
		.unwrap_or_default();
	Viewport::new(width, height).ok_or(MountError::EmptyContainer { width, height })
}

fn fit_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) {
	canvas.set_width(viewport.width() as u32);
	canvas.set_height(viewport.height() as u32);
}

fn window_viewport() -> Option<Viewport> {
	let window = web_sys::window()?;
	Viewport::new(
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	)
}

fn mount(
	canvas: &HtmlCanvasElement,
	graph: &TechniqueGraph,
	page_alive: Arc<AtomicBool>,
	tooltip: RwSignal<Option<Tooltip>>,
) -> Result<Mounted, MountError> {
	let window = web_sys::window().ok_or(MountError::NoWindow)?;
	let viewport = measure(canvas)?;
	fit_canvas(canvas, viewport);
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
		.ok_or(MountError::NoContext)?;

	let engine = Rc::new(RefCell::new(ForceGraphState::new(graph, viewport)));
	let alive = Arc::new(AtomicBool::new(true));

	let on_resize = {
		let (engine, canvas, alive) = (engine.clone(), canvas.clone(), alive.clone());
		Closure::<dyn FnMut()>::new(move || {
			if !alive.load(Ordering::Relaxed) {
				return;
			}
			match measure(&canvas) {
				Ok(viewport) => {
					fit_canvas(&canvas, viewport);
					engine.borrow_mut().resize(viewport);
					tooltip.set(None);
				}
				Err(err) => debug!("resize skipped: {err}"),
			}
		})
	};
	if let Err(err) =
		window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
	{
		warn!("resize listener not attached: {err:?}");
	}

	info!(
		"force graph mounted: {} nodes, {} edges, {}x{}",
		graph.nodes.len(),
		graph.edges.len(),
		viewport.width(),
		viewport.height()
	);
	FrameLoop {
		engine: engine.clone(),
		ctx,
		alive: alive.clone(),
		page_alive,
		on_resize,
		last: None,
		painted: false,
	}
	.schedule();

	Ok(Mounted { engine, alive })
}

/// Pointer position relative to the canvas' top-left corner.
fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn with_engine<R>(slot: &Slot, f: impl FnOnce(&mut ForceGraphState) -> R) -> Option<R> {
	let slot = slot.borrow();
	let mounted = slot.as_ref()?;
	let mut engine = mounted.engine.borrow_mut();
	Some(f(&mut engine))
}

/// Interactive technique graph drawn on a canvas that fills its parent.
///
/// A new dataset tears down the running engine and mounts a fresh one; so
/// does unmounting, through the liveness flag checked every frame.
#[component]
pub fn ForceGraphCanvas(#[prop(into)] data: Signal<TechniqueGraph>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let slot: Slot = Rc::new(RefCell::new(None));
	let tooltip = RwSignal::new(None::<Tooltip>);
	let page_alive = Arc::new(AtomicBool::new(true));
	let navigate = use_navigate();

	{
		let page_alive = page_alive.clone();
		on_cleanup(move || page_alive.store(false, Ordering::Relaxed));
	}

	let slot_init = slot.clone();
	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if let Some(previous) = slot_init.borrow_mut().take() {
			previous.retire();
		}
		tooltip.set(None);
		match mount(&canvas, &graph, page_alive.clone(), tooltip) {
			Ok(mounted) => *slot_init.borrow_mut() = Some(mounted),
			Err(err) => warn!("force graph not mounted: {err}"),
		}
	});

	let slot_md = slot.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some(screen) = local_point(canvas_ref, &ev) {
			with_engine(&slot_md, |s| s.pointer_down(screen));
		}
	};

	let slot_mm = slot.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(screen) = local_point(canvas_ref, &ev) else {
			return;
		};
		let client = Point::new(ev.client_x() as f64, ev.client_y() as f64);
		let next = with_engine(&slot_mm, |s| {
			s.pointer_move(screen, client, window_viewport());
			s.tooltip().cloned()
		});
		if let Some(next) = next {
			if tooltip.with_untracked(|current| *current != next) {
				tooltip.set(next);
			}
		}
	};

	let slot_mu = slot.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(id) = with_engine(&slot_mu, |s| s.pointer_up()).flatten() {
			debug!("opening technique {id}");
			tooltip.set(None);
			navigate(&technique_path(&id), Default::default());
		}
	};

	let slot_ml = slot.clone();
	let on_mouseleave = move |_: MouseEvent| {
		with_engine(&slot_ml, |s| s.pointer_leave());
		tooltip.set(None);
	};

	let slot_wh = slot;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(screen) = local_point(canvas_ref, &ev) {
			with_engine(&slot_wh, |s| s.wheel(screen, ev.delta_y()));
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style:cursor=move || if tooltip.with(Option::is_some) { "pointer" } else { "grab" }
		/>
		<TechniqueTooltip tooltip=tooltip />
	}
}
