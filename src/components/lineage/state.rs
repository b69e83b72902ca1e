use std::collections::BTreeSet;

use log::debug;

use super::tree::{Extent, LineageTree};
use crate::components::graph::Snapshot;
use crate::components::graph::frame::{Frame, Point};
use crate::components::graph::nearest::nearest_row;

/// Payload handed to the host whenever a timestamp is picked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimestampSelection {
	pub timestamp: i64,
	pub special_ids: BTreeSet<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
	Up,
	Down,
}

/// Subtree picked with shift-click, boxed on the timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Subtree {
	pub root: String,
	pub ids: BTreeSet<String>,
	pub extent: Extent,
}

type SelectListener = Box<dyn Fn(&TimestampSelection)>;

pub struct LineageState {
	pub graph: Snapshot,
	pub tree: LineageTree,
	pub frame: Frame,
	pub hovered_ts: Option<i64>,
	pub selected_ts: Option<i64>,
	pub special: Option<Subtree>,
	on_select: Option<SelectListener>,
}

impl LineageState {
	pub fn new(width: f64, height: f64) -> Self {
		let graph = Snapshot::default();
		Self {
			frame: lineage_frame(&graph, width, height),
			tree: LineageTree::default(),
			graph,
			hovered_ts: None,
			selected_ts: None,
			special: None,
			on_select: None,
		}
	}

	pub fn on_select_timestamp(&mut self, listener: impl Fn(&TimestampSelection) + 'static) {
		self.on_select = Some(Box::new(listener));
	}

	/// Replace the graph and forget every hover, selection and highlight.
	pub fn load(&mut self, graph: Snapshot) {
		debug!(
			"lineage load: {} nodes, {}x{}",
			graph.id_to_node.len(),
			graph.width,
			graph.height
		);
		self.tree = LineageTree::build(&graph);
		self.frame = lineage_frame(&graph, self.frame.width, self.frame.height);
		self.graph = graph;
		self.hovered_ts = None;
		self.selected_ts = None;
		self.special = None;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.frame = lineage_frame(&self.graph, width, height);
	}

	pub fn row_at(&self, p: Point) -> i64 {
		nearest_row(p.y, self.graph.height)
	}

	/// Hover the row under `p`; leaving the plot area clears the hover.
	pub fn hover(&mut self, p: Point) {
		self.hovered_ts = self.graph.contains(p).then(|| self.row_at(p));
	}

	pub fn clear_hover(&mut self) {
		self.hovered_ts = None;
	}

	/// Plain click: select the row under `p`. Clicks in the margin are ignored.
	pub fn select_at(&mut self, p: Point) -> Option<TimestampSelection> {
		if !self.graph.contains(p) {
			return None;
		}
		Some(self.focus_ts(self.row_at(p)))
	}

	/// Shift-click: highlight the subtree of the node under `p`, or clear the highlight.
	pub fn select_lineage_at(&mut self, p: Point) -> Option<TimestampSelection> {
		if !self.graph.contains(p) {
			return None;
		}
		let row = self.row_at(p);
		self.special = self
			.graph
			.id_to_node
			.iter()
			.filter(|(_, n)| n.timestamp_ordinal == row)
			.find_map(|(id, _)| {
				let extent = self.tree.extent(id).filter(|e| e.contains_x(p.x))?;
				Some(Subtree {
					root: id.clone(),
					ids: self.tree.descendants(id).cloned().unwrap_or_default(),
					extent: *extent,
				})
			});
		match &self.special {
			Some(sub) => debug!("special subtree {} ({} nodes)", sub.root, sub.ids.len()),
			None => debug!("special subtree cleared"),
		}
		let ts = self.selected_ts?;
		Some(self.focus_ts(ts))
	}

	/// Arrow-key navigation; `None` when the move is blocked at a boundary.
	pub fn step(&mut self, step: Step) -> Option<TimestampSelection> {
		let next = match (self.selected_ts, step) {
			(None, _) => 0,
			(Some(ts), Step::Up) if ts > 0 => ts - 1,
			(Some(ts), Step::Down) if ts < self.graph.height => ts + 1,
			_ => return None,
		};
		Some(self.focus_ts(next))
	}

	pub fn special_ids(&self) -> BTreeSet<String> {
		self.special.as_ref().map(|s| s.ids.clone()).unwrap_or_default()
	}

	fn focus_ts(&mut self, ts: i64) -> TimestampSelection {
		self.selected_ts = Some(ts);
		let selection = TimestampSelection {
			timestamp: ts,
			special_ids: self.special_ids(),
		};
		if let Some(listener) = &self.on_select {
			listener(&selection);
		}
		selection
	}

	pub fn status_text(&self) -> String {
		let mut status = String::from("Lineage time stamps: ");
		if let Some(s) = self.selected_ts {
			status.push_str(&format!(" Selected {s};"));
		}
		if let Some(h) = self.hovered_ts {
			status.push_str(&format!(" Hover {h};"));
		}
		status
	}
}

/// Row 0 at the top, one unit of margin around the event area.
fn lineage_frame(graph: &Snapshot, width: f64, height: f64) -> Frame {
	Frame::new(
		width,
		height,
		(-1.0, graph.width + 1.0),
		(-1.0, graph.height as f64 + 1.0),
	)
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use pretty_assertions::assert_eq;

	use super::*;

	fn example() -> Snapshot {
		Snapshot::from_json(
			r#"{"width":3,"height":2,"id_to_node":{
				"A":{"offset":1,"timestamp_ordinal":0},
				"B":{"offset":1,"timestamp_ordinal":1,"parent_id":"A"}
			}}"#,
		)
		.unwrap()
	}

	fn loaded() -> (LineageState, Rc<RefCell<Vec<TimestampSelection>>>) {
		let mut state = LineageState::new(300.0, 200.0);
		let fired = Rc::new(RefCell::new(Vec::new()));
		let sink = fired.clone();
		state.on_select_timestamp(move |sel| sink.borrow_mut().push(sel.clone()));
		state.load(example());
		(state, fired)
	}

	fn ids(ids: &[&str]) -> BTreeSet<String> {
		ids.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn shift_click_selects_subtree_of_node_on_row() {
		let (mut state, fired) = loaded();
		assert_eq!(state.select_lineage_at(Point::new(1.0, 0.4)), None);
		assert_eq!(state.special_ids(), ids(&["A", "B"]));
		assert_eq!(state.special.as_ref().unwrap().extent.bounds(), (1.0, 0.0, 1.0, 2.0));

		state.select_lineage_at(Point::new(1.5, 1.2));
		assert_eq!(state.special_ids(), ids(&["B"]));
		assert!(fired.borrow().is_empty());
	}

	#[test]
	fn shift_click_outside_extents_clears_special() {
		let (mut state, _) = loaded();
		state.select_lineage_at(Point::new(1.0, 0.0));
		assert!(state.special_ids().contains("B"));
		state.select_lineage_at(Point::new(2.5, 0.0));
		assert_eq!(state.special, None);
		assert!(state.special_ids().is_empty());
	}

	#[test]
	fn shift_click_reannounces_current_selection() {
		let (mut state, fired) = loaded();
		state.select_at(Point::new(0.0, 1.3));
		let again = state.select_lineage_at(Point::new(1.2, 0.5)).unwrap();
		assert_eq!(again.timestamp, 1);
		assert_eq!(again.special_ids, ids(&["A", "B"]));
		assert_eq!(fired.borrow().len(), 2);
	}

	#[test]
	fn arrow_down_moves_one_row_and_fires() {
		let (mut state, fired) = loaded();
		state.select_at(Point::new(0.0, 0.5));
		let sel = state.step(Step::Down).unwrap();
		assert_eq!(sel, TimestampSelection { timestamp: 1, special_ids: BTreeSet::new() });
		assert_eq!(fired.borrow().last(), Some(&sel));
		assert_eq!(state.selected_ts, Some(1));
	}

	#[test]
	fn arrow_keys_stay_within_rows() {
		let (mut state, fired) = loaded();
		assert_eq!(state.step(Step::Up).map(|s| s.timestamp), Some(0));
		assert_eq!(state.step(Step::Up), None);
		assert_eq!(state.step(Step::Down).map(|s| s.timestamp), Some(1));
		assert_eq!(state.step(Step::Down).map(|s| s.timestamp), Some(2));
		assert_eq!(state.step(Step::Down), None);
		assert_eq!(state.selected_ts, Some(2));
		assert_eq!(fired.borrow().len(), 3);
	}

	#[test]
	fn clicks_clamp_to_row_range() {
		let (mut state, _) = loaded();
		assert_eq!(state.select_at(Point::new(0.0, 0.0)).map(|s| s.timestamp), Some(0));
		assert_eq!(state.select_at(Point::new(3.0, 2.0)).map(|s| s.timestamp), Some(2));
	}

	#[test]
	fn margin_clicks_are_inert() {
		let (mut state, fired) = loaded();
		state.select_at(Point::new(1.0, 1.0));
		state.select_lineage_at(Point::new(1.0, 0.5));
		let before = (state.selected_ts, state.special.clone());

		// top-left corner of the canvas sits in the margin
		let corner = state.frame.to_model(2.0, 2.0);
		state.hover(corner);
		assert_eq!(state.hovered_ts, None);
		assert_eq!(state.select_at(corner), None);
		assert_eq!(state.select_lineage_at(corner), None);
		assert_eq!(state.select_at(Point::new(0.5, 2.9)), None);
		assert_eq!(state.select_at(Point::new(-0.2, 1.0)), None);

		assert_eq!((state.selected_ts, state.special.clone()), before);
		assert_eq!(fired.borrow().len(), 2);
	}

	#[test]
	fn moving_into_margin_clears_hover() {
		let (mut state, _) = loaded();
		state.hover(Point::new(1.0, 1.5));
		assert_eq!(state.hovered_ts, Some(1));
		state.hover(Point::new(3.5, 1.5));
		assert_eq!(state.hovered_ts, None);
	}

	#[test]
	fn hover_updates_status_and_leave_clears() {
		let (mut state, _) = loaded();
		state.hover(Point::new(0.0, 1.5));
		state.select_at(Point::new(0.0, 0.1));
		assert_eq!(state.status_text(), "Lineage time stamps:  Selected 0; Hover 1;");
		state.clear_hover();
		assert_eq!(state.hovered_ts, None);
		assert_eq!(state.status_text(), "Lineage time stamps:  Selected 0;");
	}

	#[test]
	fn load_resets_view_state() {
		let (mut state, _) = loaded();
		state.hover(Point::new(0.0, 1.0));
		state.select_at(Point::new(0.0, 1.0));
		state.select_lineage_at(Point::new(1.0, 0.0));
		state.load(example());
		assert_eq!((state.hovered_ts, state.selected_ts), (None, None));
		assert_eq!(state.special, None);
	}

	#[test]
	fn frame_maps_rows_top_down() {
		let (state, _) = loaded();
		// model y spans [-1, 3] over 200px
		assert_eq!(state.row_at(state.frame.to_model(10.0, 60.0)), 0);
		assert_eq!(state.row_at(state.frame.to_model(10.0, 110.0)), 1);
	}
}
