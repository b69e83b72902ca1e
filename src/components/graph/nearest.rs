//! Nearest-row and nearest-point lookups shared by both views.

use super::frame::Point;

/// Row under model coordinate `y`, clamped to `[0, max_row]`.
pub fn nearest_row(y: f64, max_row: i64) -> i64 {
	let row = y.floor();
	if row.is_nan() || row < 0.0 {
		return 0;
	}
	if row > max_row as f64 {
		return max_row.max(0);
	}
	row as i64
}

/// Item whose anchor is closest to `to`. On an exact tie the earliest item wins.
pub fn nearest<T>(items: impl IntoIterator<Item = (T, Point)>, to: Point) -> Option<T> {
	let mut best: Option<(T, f64)> = None;
	for (item, anchor) in items {
		let d = anchor.distance_sq(to);
		match best {
			Some((_, min)) if min <= d => {}
			_ => best = Some((item, d)),
		}
	}
	best.map(|(item, _)| item)
}
