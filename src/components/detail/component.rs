use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::{DetailState, SelectionStatus};
use crate::components::graph::Snapshot;
use crate::components::graph::canvas::{context_2d, fit_canvas, pointer_position};

/// Node graph around one timestamp, with the highlighted lineage outlined.
///
/// `special_ids` seeds the selection on every load; clicking a node toggles it.
/// A value pushed through `selections` replaces the selection without
/// notifying `on_status_change`.
#[component]
pub fn DetailView(
	#[prop(into)] data: Signal<Snapshot>,
	#[prop(into)] special_ids: Signal<BTreeSet<String>>,
	#[prop(optional, into)] selections: Option<Signal<SelectionStatus>>,
	#[prop(optional, into)] on_status_change: Option<Callback<SelectionStatus>>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<DetailState>>> = Rc::new(RefCell::new(None));
	let ctx: Rc<RefCell<Option<CanvasRenderingContext2d>>> = Rc::new(RefCell::new(None));
	let status = RwSignal::new(String::from("timeslice detail canvas initialized"));

	let (state_init, ctx_init) = (state.clone(), ctx.clone());
	Effect::new(move |_| {
		let (graph, special) = (data.get(), special_ids.get());
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = fit_canvas(&canvas, width, height);
		let Some(context) = context_2d(&canvas) else {
			warn!("detail view: no 2d context");
			return;
		};

		status.set("Drawing timeslice.".into());
		let mut slot = state_init.borrow_mut();
		let s = slot.get_or_insert_with(|| {
			let mut s = DetailState::new(w, h);
			if let Some(cb) = on_status_change {
				s.on_status_change(move |st| cb.run(st.clone()));
			}
			s
		});
		s.resize(w, h);
		s.load(graph, &special);
		render::render(s, &context);
		status.set(s.status_text());
		*ctx_init.borrow_mut() = Some(context);
	});

	let with_state = {
		let (state, ctx) = (state.clone(), ctx.clone());
		move |f: &dyn Fn(&mut DetailState)| {
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

	if let Some(selections) = selections {
		let with_sync = with_state.clone();
		Effect::new(move |prev: Option<()>| {
			let imposed = selections.get();
			// the initial value is not an imposed selection
			if prev.is_none() {
				return;
			}
			debug!(
				"detail update_selections: {} children, {} ancestors",
				imposed.children.len(),
				imposed.ancestors.len()
			);
			with_sync(&|s: &mut DetailState| s.update_selections(&imposed.children, &imposed.ancestors));
		});
	}

	let model_point = {
		let state = state.clone();
		move |ev: &MouseEvent| {
			let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
			let (x, y) = pointer_position(&canvas, ev);
			state.borrow().as_ref().map(|s| s.frame.to_model(x, y))
		}
	};

	let (with_mm, point_mm) = (with_state.clone(), model_point.clone());
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(p) = point_mm(&ev) {
			with_mm(&|s: &mut DetailState| s.hover(p));
		}
	};

	let with_ml = with_state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		with_ml(&|s: &mut DetailState| s.clear_hover());
	};

	let with_click = with_state;
	let on_click = move |ev: MouseEvent| {
		let Some(p) = model_point(&ev) else {
			return;
		};
		debug!("detail click at {:.2},{:.2}", p.x, p.y);
		with_click(&|s: &mut DetailState| {
			s.toggle_at(p);
		});
	};

	view! {
		<div class="detail-view">
			<canvas
				node_ref=canvas_ref
				class="detail-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				on:click=on_click
				style="display: block; cursor: pointer;"
			/>
			<div class="detail-status">{move || status.get()}</div>
		</div>
	}
}
