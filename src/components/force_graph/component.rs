use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::CanvasState;
use crate::config::VisualizerOptions;
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::interaction::TapOutcome;
use crate::style::NodeInfo;

type SharedState = Rc<RefCell<Option<CanvasState>>>;

fn canvas_error(reason: impl Into<String>) -> Error {
	Error::Canvas {
		reason: reason.into(),
	}
}

fn global_window() -> Result<Window> {
	web_sys::window().ok_or_else(|| canvas_error("no global window"))
}

fn window_size(window: &Window) -> Result<(f64, f64)> {
	let width = window.inner_width().ok().and_then(|v| v.as_f64());
	let height = window.inner_height().ok().and_then(|v| v.as_f64());
	width
		.zip(height)
		.ok_or_else(|| canvas_error("window size unavailable"))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
		.ok_or_else(|| canvas_error("2d context unavailable"))
}

fn pointer(canvas: Option<HtmlCanvasElement>, ev: &MouseEvent) -> Option<Point> {
	let rect = canvas?.get_bounding_client_rect();
	Some(Point::new(
		(f64::from(ev.client_x()) - rect.left()) as f32,
		(f64::from(ev.client_y()) - rect.top()) as f32,
	))
}

/// Canvas view of a keyed adjacency map.
///
/// Drag to pan, scroll to zoom, click to select. `on_select` receives the
/// selected key, or `None` when the selection is cleared.
#[component]
pub fn GraphVisualizerCanvas(
	#[prop(into)] adjacency: Signal<IndexMap<String, Vec<String>>>,
	#[prop(into, optional)] node_info: Signal<IndexMap<String, NodeInfo>>,
	#[prop(into, optional)] options: Signal<VisualizerOptions>,
	#[prop(optional)] on_select: Option<Callback<Option<String>>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	let mount = move |canvas: HtmlCanvasElement| -> Result<()> {
		let window = global_window()?;
		let (w, h) = if fullscreen {
			window_size(&window)?
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| f64::from(p.client_width()))
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| f64::from(p.client_height()))
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let ctx = context_2d(&canvas)?;

		*state_init.borrow_mut() = Some(CanvasState::new(
			&adjacency.get_untracked(),
			&node_info.get_untracked(),
			options.get_untracked(),
			w,
			h,
		));

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let size = global_window().and_then(|win| window_size(&win));
				let Ok((nw, nh)) = size else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.take_dirty() {
					render::render(s, &ctx);
				}
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
		Ok(())
	};

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if let Err(err) = mount(canvas.into()) {
			error!("graph canvas: {err}");
		}
	});

	let state_data = state.clone();
	Effect::new(move |_| {
		let (adjacency, node_info, options) = (adjacency.get(), node_info.get(), options.get());
		if let Some(ref mut s) = *state_data.borrow_mut() {
			let update = s.update(&adjacency, &node_info, options);
			debug!("graph canvas input changed: {update:?}");
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(point) = pointer(canvas_ref.get().map(Into::into), &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press(point);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(point) = pointer(canvas_ref.get().map(Into::into), &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.drag_to(point);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(point) = pointer(canvas_ref.get().map(Into::into), &ev) else {
			return;
		};
		let selection = {
			let mut guard = state_mu.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			match s.release(point) {
				Some(TapOutcome::Selected(_) | TapOutcome::Cleared) => Some(s.selected_key().cloned()),
				_ => None,
			}
		};
		if let (Some(key), Some(cb)) = (selection, on_select) {
			cb.run(key);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.cancel();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(point) = pointer(canvas_ref.get().map(Into::into), &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.wheel(point, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-visualizer-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
