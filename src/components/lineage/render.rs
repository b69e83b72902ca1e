use web_sys::CanvasRenderingContext2d;

use super::state::LineageState;
use crate::components::graph::canvas::{SEMI_TRANSPARENT, fill_rect, line, set_dash, stroke_rect};
use crate::components::graph::frame::Point;

const BACKGROUND: &str = "#ffffff";
const STRIPE: &str = "#ddd";
const OUTLINE: &str = "#777";
const DEFAULT_NODE: &str = "#999";
const LINK: &str = "#333";
const SELECTED_ROW: &str = "black";
const NODE_SIZE: f64 = 0.8;
const NODE_INSET: f64 = 0.1;

pub fn render(state: &LineageState, ctx: &CanvasRenderingContext2d) {
	let frame = &state.frame;
	let graph = &state.graph;
	let (width, height) = (graph.width, graph.height);

	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, frame.width, frame.height);

	for row in (0..=height).step_by(2) {
		fill_rect(ctx, frame, STRIPE, (0.0, row as f64, width, 1.0));
	}
	stroke_rect(ctx, frame, OUTLINE, 1.0, (0.0, 0.0, width, height as f64));

	if let Some(sub) = &state.special {
		fill_rect(ctx, frame, SEMI_TRANSPARENT, sub.extent.bounds());
		set_dash(ctx, Some((4.0, 3.0)));
		stroke_rect(ctx, frame, OUTLINE, 1.0, sub.extent.bounds());
		set_dash(ctx, None);
	}

	draw_nodes(state, ctx);

	if let Some(row) = state.hovered_ts {
		fill_rect(ctx, frame, SEMI_TRANSPARENT, (0.0, row as f64, width, 1.0));
	}
	if let Some(row) = state.selected_ts {
		stroke_rect(ctx, frame, SELECTED_ROW, 2.0, (0.0, row as f64, width, 1.0));
	}
}

fn draw_nodes(state: &LineageState, ctx: &CanvasRenderingContext2d) {
	let (frame, graph) = (&state.frame, &state.graph);
	for node in graph.id_to_node.values() {
		let (x, y) = (node.offset, node.timestamp_ordinal as f64);
		let color = node.color.as_deref().unwrap_or(DEFAULT_NODE);
		fill_rect(
			ctx,
			frame,
			color,
			(x + NODE_INSET, y + NODE_INSET, NODE_SIZE, NODE_SIZE),
		);

		if let Some(parent) = graph.parent_of(node) {
			let (px, py) = (parent.offset, parent.timestamp_ordinal as f64);
			line(
				ctx,
				frame,
				LINK,
				Point::new(px + 0.5, py + 0.8),
				Point::new(x + 0.5, y + 0.2),
			);
		}
	}
}
