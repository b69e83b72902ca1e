use std::f64::consts::FRAC_PI_2;

use web_sys::CanvasRenderingContext2d;

use super::state::DetailState;
use crate::components::graph::canvas::{SEMI_TRANSPARENT, fill_rect, line, stroke_rect};
use crate::components::graph::color::invert_color;
use crate::components::graph::frame::Point;

const BACKGROUND: &str = "#ffffff";
const DEFAULT_NODE: &str = "rgb(100,100,100)";
const DEFAULT_LABEL: &str = "XXX";
const LABEL_FALLBACK_COLOR: &str = "white";
const LABEL_FONT: &str = "12pt Tahoma";
const LINK: &str = "#333";
const CHILD_OUTLINE: &str = "black";
const ANCESTOR_OUTLINE: &str = "silver";
const NODE_BOX: (f64, f64, f64, f64) = (0.2, 0.2, 0.9, 0.8);

fn node_box(x: f64, y: f64) -> (f64, f64, f64, f64) {
	let (dx, dy, w, h) = NODE_BOX;
	(x + dx, y + dy, w, h)
}

pub fn render(state: &DetailState, ctx: &CanvasRenderingContext2d) {
	let (frame, graph) = (&state.frame, &state.graph);

	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, frame.width, frame.height);

	for node in graph.id_to_node.values() {
		let color = node.color.as_deref().unwrap_or(DEFAULT_NODE);
		fill_rect(ctx, frame, color, node_box(node.x, node.y));

		let label_color = invert_color(color);
		let label = node
			.label
			.as_ref()
			.map(ToString::to_string)
			.unwrap_or_else(|| DEFAULT_LABEL.into());
		let (tx, ty) = frame.to_screen(Point::new(node.x + 0.5, node.y + 0.6));
		ctx.save();
		let _ = ctx.translate(tx, ty);
		let _ = ctx.rotate(-FRAC_PI_2);
		ctx.set_fill_style_str(label_color.as_deref().unwrap_or(LABEL_FALLBACK_COLOR));
		ctx.set_font(LABEL_FONT);
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&label, 0.0, 0.0);
		ctx.restore();
	}

	for node in graph.id_to_node.values() {
		if let Some(parent) = graph.parent_of(node) {
			line(
				ctx,
				frame,
				LINK,
				Point::new(node.x + 0.5, node.y + 0.8),
				Point::new(parent.x + 0.5, parent.y + 0.2),
			);
		}
	}

	for node in state.selected.iter().filter_map(|id| graph.node(id)) {
		let outline = if node.is_child {
			CHILD_OUTLINE
		} else {
			ANCESTOR_OUTLINE
		};
		stroke_rect(ctx, frame, outline, 3.0, node_box(node.x, node.y));
	}

	if let Some(node) = state.hovered.as_deref().and_then(|id| graph.node(id)) {
		fill_rect(ctx, frame, SEMI_TRANSPARENT, (node.x, node.y, 1.0, 1.0));
	}
}
