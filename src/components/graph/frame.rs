//! Linear mapping between canvas pixels and model coordinates.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance_sq(&self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		dx * dx + dy * dy
	}
}

/// Axis-aligned rectangle in screen pixels, always with non-negative size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
	pub x: f64,
	pub y: f64,
	pub w: f64,
	pub h: f64,
}

/// Maps a model-space window onto a `width` x `height` pixel surface.
///
/// `y_top` is the model y shown at the top edge and `y_bottom` the one at the
/// bottom edge, so passing them in descending order gives a y-up frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
	pub width: f64,
	pub height: f64,
	x_left: f64,
	x_right: f64,
	y_top: f64,
	y_bottom: f64,
}

impl Frame {
	pub fn new(width: f64, height: f64, (x_left, x_right): (f64, f64), (y_top, y_bottom): (f64, f64)) -> Self {
		Self {
			width,
			height,
			x_left,
			x_right,
			y_top,
			y_bottom,
		}
	}

	fn x_scale(&self) -> f64 {
		self.width / (self.x_right - self.x_left)
	}

	fn y_scale(&self) -> f64 {
		self.height / (self.y_bottom - self.y_top)
	}

	pub fn to_screen(&self, p: Point) -> (f64, f64) {
		(
			(p.x - self.x_left) * self.x_scale(),
			(p.y - self.y_top) * self.y_scale(),
		)
	}

	pub fn to_model(&self, sx: f64, sy: f64) -> Point {
		Point::new(
			self.x_left + sx / self.x_scale(),
			self.y_top + sy / self.y_scale(),
		)
	}

	/// Screen rectangle covering the model rectangle `[x, x + w] x [y, y + h]`.
	pub fn rect(&self, x: f64, y: f64, w: f64, h: f64) -> ScreenRect {
		let (x1, y1) = self.to_screen(Point::new(x, y));
		let (x2, y2) = self.to_screen(Point::new(x + w, y + h));
		ScreenRect {
			x: x1.min(x2),
			y: y1.min(y2),
			w: (x2 - x1).abs(),
			h: (y2 - y1).abs(),
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn y_down_frame_round_trips_corners() {
		let frame = Frame::new(400.0, 200.0, (-1.0, 3.0), (-1.0, 3.0));
		assert_eq!(frame.to_screen(Point::new(-1.0, -1.0)), (0.0, 0.0));
		assert_eq!(frame.to_screen(Point::new(3.0, 3.0)), (400.0, 200.0));
		assert_eq!(frame.to_model(200.0, 100.0), Point::new(1.0, 1.0));
	}

	#[test]
	fn y_up_frame_normalizes_rects() {
		let frame = Frame::new(100.0, 100.0, (0.0, 10.0), (10.0, 0.0));
		let r = frame.rect(2.0, 2.0, 1.0, 1.0);
		assert_eq!(r, ScreenRect { x: 20.0, y: 70.0, w: 10.0, h: 10.0 });
		assert_eq!(frame.to_model(20.0, 80.0), Point::new(2.0, 2.0));
	}
}
