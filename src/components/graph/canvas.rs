//! Browser-side helpers shared by the two canvas views.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::frame::{Frame, Point};

pub const SEMI_TRANSPARENT: &str = "rgba(0,0,0,0.1)";

const FALLBACK_WIDTH: f64 = 800.0;
const FALLBACK_HEIGHT: f64 = 600.0;

/// Size the canvas from explicit props, else from its parent element.
pub fn fit_canvas(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let (w, h) = (
		width.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or(FALLBACK_WIDTH)
		}),
		height.unwrap_or_else(|| {
			canvas
				.parent_element()
				.map(|p| p.client_height() as f64)
				.filter(|h| *h > 0.0)
				.unwrap_or(FALLBACK_HEIGHT)
		}),
	);
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	(w, h)
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Pointer position relative to the canvas' top-left corner, in pixels.
pub fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

pub fn fill_rect(ctx: &CanvasRenderingContext2d, frame: &Frame, color: &str, (x, y, w, h): (f64, f64, f64, f64)) {
	let r = frame.rect(x, y, w, h);
	ctx.set_fill_style_str(color);
	ctx.fill_rect(r.x, r.y, r.w, r.h);
}

pub fn stroke_rect(
	ctx: &CanvasRenderingContext2d,
	frame: &Frame,
	color: &str,
	line_width: f64,
	(x, y, w, h): (f64, f64, f64, f64),
) {
	let r = frame.rect(x, y, w, h);
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(line_width);
	ctx.stroke_rect(r.x, r.y, r.w, r.h);
}

pub fn line(ctx: &CanvasRenderingContext2d, frame: &Frame, color: &str, from: Point, to: Point) {
	let ((x1, y1), (x2, y2)) = (frame.to_screen(from), frame.to_screen(to));
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(1.0);
	ctx.begin_path();
	ctx.move_to(x1, y1);
	ctx.line_to(x2, y2);
	ctx.stroke();
}

pub fn set_dash(ctx: &CanvasRenderingContext2d, dash: Option<(f64, f64)>) {
	let pattern = match dash {
		Some((on, off)) => js_sys::Array::of2(&JsValue::from_f64(on), &JsValue::from_f64(off)),
		None => js_sys::Array::new(),
	};
	let _ = ctx.set_line_dash(&pattern);
}
