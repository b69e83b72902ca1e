use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

use super::render;
use super::state::{LineageState, Step, TimestampSelection};
use crate::components::graph::Snapshot;
use crate::components::graph::canvas::{context_2d, fit_canvas, pointer_position};

/// Timeline of the whole lineage: one row per timestamp, one box per node.
///
/// Click picks a timestamp, shift-click picks the subtree under the cursor,
/// and the arrow keys walk the selection up and down.
#[component]
pub fn LineageView(
	#[prop(into)] data: Signal<Snapshot>,
	#[prop(optional, into)] on_select_timestamp: Option<Callback<TimestampSelection>>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let focus_ref = NodeRef::<leptos::html::Div>::new();
	let state: Rc<RefCell<Option<LineageState>>> = Rc::new(RefCell::new(None));
	let ctx: Rc<RefCell<Option<CanvasRenderingContext2d>>> = Rc::new(RefCell::new(None));
	let status = RwSignal::new(String::from("Lineage canvas initialized"));

	let (state_init, ctx_init) = (state.clone(), ctx.clone());
	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = fit_canvas(&canvas, width, height);
		let Some(context) = context_2d(&canvas) else {
			warn!("lineage view: no 2d context");
			return;
		};

		status.set("Drawing lineage.".into());
		let mut slot = state_init.borrow_mut();
		let s = slot.get_or_insert_with(|| {
			let mut s = LineageState::new(w, h);
			if let Some(cb) = on_select_timestamp {
				s.on_select_timestamp(move |sel| cb.run(sel.clone()));
			}
			s
		});
		s.resize(w, h);
		s.load(graph);
		render::render(s, &context);
		status.set(s.status_text());
		*ctx_init.borrow_mut() = Some(context);
	});

	// Runs `f` against the live state, then repaints and refreshes the status line.
	let with_state = {
		let (state, ctx) = (state.clone(), ctx.clone());
		move |f: &dyn Fn(&mut LineageState)| {
			let mut slot = state.borrow_mut();
			let Some(s) = slot.as_mut() else {
				return;
			};
			f(s);
			if let Some(context) = ctx.borrow().as_ref() {
				render::render(s, context);
			}
			status.set(s.status_text());
		}
	};

	let model_point = {
		let state = state.clone();
		move |ev: &MouseEvent| {
			let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
			let (x, y) = pointer_position(&canvas, ev);
			state.borrow().as_ref().map(|s| s.frame.to_model(x, y))
		}
	};

	let focus_keys = move || {
		if let Some(target) = focus_ref.get() {
			let _ = target.focus();
		}
	};

	let (with_mm, point_mm) = (with_state.clone(), model_point.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some(p) = point_mm(&ev) else {
			return;
		};
		with_mm(&|s: &mut LineageState| s.hover(p));
		focus_keys();
	};

	let with_ml = with_state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		with_ml(&|s: &mut LineageState| s.clear_hover());
	};

	let (with_click, point_click) = (with_state.clone(), model_point);
	let on_click = move |ev: MouseEvent| {
		let Some(p) = point_click(&ev) else {
			return;
		};
		if ev.shift_key() {
			debug!("lineage shift click at {:.2},{:.2}", p.x, p.y);
			with_click(&|s: &mut LineageState| {
				s.select_lineage_at(p);
			});
		} else {
			debug!("lineage click at {:.2},{:.2}", p.x, p.y);
			with_click(&|s: &mut LineageState| {
				s.select_at(p);
			});
		}
		focus_keys();
	};

	let with_key = with_state;
	let on_keydown = move |ev: KeyboardEvent| {
		let step = match ev.key().as_str() {
			"ArrowUp" => Step::Up,
			"ArrowDown" => Step::Down,
			_ => return,
		};
		let moved = std::cell::Cell::new(false);
		with_key(&|s: &mut LineageState| moved.set(s.step(step).is_some()));
		if moved.get() {
			ev.prevent_default();
		}
	};

	view! {
		<div node_ref=focus_ref class="lineage-view" tabindex="0" on:keydown=on_keydown style="outline: none;">
			<canvas
				node_ref=canvas_ref
				class="lineage-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				on:click=on_click
				style="display: block; cursor: crosshair;"
			/>
			<div class="lineage-status">{move || status.get()}</div>
		</div>
	}
}
