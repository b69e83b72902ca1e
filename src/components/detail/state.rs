use std::collections::BTreeSet;

use log::debug;

use crate::components::graph::frame::{Frame, Point};
use crate::components::graph::nearest::nearest;
use crate::components::graph::{GraphNode, Snapshot};

/// Selected nodes of the detail view, split by whether they sit on the chosen timestamp.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionStatus {
	pub children: Vec<String>,
	pub ancestors: Vec<String>,
}

impl SelectionStatus {
	pub fn is_empty(&self) -> bool {
		self.children.is_empty() && self.ancestors.is_empty()
	}
}

type StatusListener = Box<dyn Fn(&SelectionStatus)>;

pub struct DetailState {
	pub graph: Snapshot,
	pub frame: Frame,
	pub hovered: Option<String>,
	pub selected: BTreeSet<String>,
	last_child: Option<String>,
	last_ancestor: Option<String>,
	on_status: Option<StatusListener>,
}

impl DetailState {
	pub fn new(width: f64, height: f64) -> Self {
		let graph = Snapshot::default();
		Self {
			frame: detail_frame(&graph, width, height),
			graph,
			hovered: None,
			selected: BTreeSet::new(),
			last_child: None,
			last_ancestor: None,
			on_status: None,
		}
	}

	/// Register the status listener; it fires at once if something is already selected.
	pub fn on_status_change(&mut self, listener: impl Fn(&SelectionStatus) + 'static) {
		let status = self.status();
		if !status.is_empty() {
			listener(&status);
		}
		self.on_status = Some(Box::new(listener));
	}

	pub fn load(&mut self, graph: Snapshot, special_ids: &BTreeSet<String>) -> SelectionStatus {
		debug!(
			"detail load: {} nodes, {} special",
			graph.id_to_node.len(),
			special_ids.len()
		);
		self.selected = special_ids
			.iter()
			.filter(|id| graph.id_to_node.contains_key(*id))
			.cloned()
			.collect();
		self.frame = detail_frame(&graph, self.frame.width, self.frame.height);
		self.graph = graph;
		self.hovered = None;
		self.last_child = None;
		self.last_ancestor = None;
		self.notify()
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.frame = detail_frame(&self.graph, width, height);
	}

	pub fn node_at(&self, p: Point) -> Option<&GraphNode> {
		nearest(
			self.graph.id_to_node.values().map(|n| (n, Point::new(n.x + 0.5, n.y + 0.5))),
			p,
		)
	}

	/// Hover the node nearest `p`; leaving the plot area clears the hover.
	pub fn hover(&mut self, p: Point) {
		self.hovered = if self.graph.contains(p) {
			self.node_at(p).map(|n| n.identity.clone())
		} else {
			None
		};
	}

	pub fn clear_hover(&mut self) {
		self.hovered = None;
	}

	/// Toggle the node nearest `p` in or out of the selection. Clicks in the margin are ignored.
	pub fn toggle_at(&mut self, p: Point) -> Option<SelectionStatus> {
		if !self.graph.contains(p) {
			return None;
		}
		let (id, is_child) = {
			let node = self.node_at(p)?;
			(node.identity.clone(), node.is_child)
		};
		if is_child {
			self.last_child = Some(id.clone());
		} else {
			self.last_ancestor = Some(id.clone());
		}
		if !self.selected.remove(&id) {
			self.selected.insert(id);
		}
		Some(self.notify())
	}

	/// Impose a selection from outside; the listener is not told.
	pub fn update_selections(&mut self, children: &[String], ancestors: &[String]) {
		self.selected = children
			.iter()
			.chain(ancestors)
			.filter(|id| self.graph.id_to_node.contains_key(*id))
			.cloned()
			.collect();
	}

	pub fn status(&self) -> SelectionStatus {
		let mut status = SelectionStatus::default();
		for node in self.selected.iter().filter_map(|id| self.graph.node(id)) {
			if node.is_child {
				status.children.push(node.identity.clone());
			} else {
				status.ancestors.push(node.identity.clone());
			}
		}
		status
	}

	fn notify(&self) -> SelectionStatus {
		let status = self.status();
		if let Some(listener) = &self.on_status {
			listener(&status);
		}
		status
	}

	pub fn status_text(&self) -> String {
		let mut text = String::new();
		if let Some(c) = self.last_child.as_deref().and_then(|id| self.graph.node(id)) {
			let parent = c
				.parent()
				.map(|p| format!("[{p}]"))
				.unwrap_or_else(|| "(no parent)".into());
			text.push_str(&format!("Child {} {parent}; ", c.identity));
		}
		if let Some(a) = &self.last_ancestor {
			text.push_str(&format!("Ancestor {a}; "));
		}
		if let Some(h) = &self.hovered {
			text.push_str(&format!("Hover {h}; "));
		}
		text
	}
}

/// y-up frame: larger `y` is drawn higher, one unit of margin on each side.
fn detail_frame(graph: &Snapshot, width: f64, height: f64) -> Frame {
	Frame::new(
		width,
		height,
		(-1.0, graph.width + 1.0),
		(graph.height as f64 + 1.0, -1.0),
	)
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use pretty_assertions::assert_eq;

	use super::*;

	fn region() -> Snapshot {
		Snapshot::from_json(
			r#"{"width":3,"height":2,"id_to_node":{
				"p":{"x":1,"y":1,"timestamp_ordinal":4},
				"c1":{"x":0,"y":0,"timestamp_ordinal":5,"parent_id":"p","is_child":true},
				"c2":{"x":2,"y":0,"timestamp_ordinal":5,"parent_id":"p","is_child":true},
				"q":{"x":2,"y":1,"timestamp_ordinal":4}
			}}"#,
		)
		.unwrap()
	}

	fn ids(ids: &[&str]) -> BTreeSet<String> {
		ids.iter().map(|s| s.to_string()).collect()
	}

	fn strings(ids: &[&str]) -> Vec<String> {
		ids.iter().map(|s| s.to_string()).collect()
	}

	fn recording() -> (DetailState, Rc<RefCell<Vec<SelectionStatus>>>) {
		let mut state = DetailState::new(300.0, 200.0);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		state.on_status_change(move |s| sink.borrow_mut().push(s.clone()));
		(state, seen)
	}

	#[test]
	fn load_partitions_special_ids() {
		let (mut state, seen) = recording();
		let status = state.load(region(), &ids(&["p", "c2", "elsewhere"]));
		let expected = SelectionStatus {
			children: strings(&["c2"]),
			ancestors: strings(&["p"]),
		};
		assert_eq!(status, expected);
		assert_eq!(*seen.borrow(), vec![expected]);
	}

	#[test]
	fn load_fires_even_when_nothing_selected() {
		let (mut state, seen) = recording();
		state.load(region(), &BTreeSet::new());
		assert_eq!(*seen.borrow(), vec![SelectionStatus::default()]);
	}

	#[test]
	fn late_listener_hears_existing_selection() {
		let mut state = DetailState::new(100.0, 100.0);
		state.load(region(), &ids(&["c1"]));
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = seen.clone();
		state.on_status_change(move |s| sink.borrow_mut().push(s.children.clone()));
		assert_eq!(*seen.borrow(), vec![strings(&["c1"])]);
	}

	#[test]
	fn nearest_node_uses_cell_centers() {
		let (mut state, _) = recording();
		state.load(region(), &BTreeSet::new());
		assert_eq!(state.node_at(Point::new(0.4, 0.6)).map(|n| n.identity.as_str()), Some("c1"));
		assert_eq!(state.node_at(Point::new(2.9, 1.9)).map(|n| n.identity.as_str()), Some("q"));
		// equidistant from c1 and c2's centers: id order decides
		assert_eq!(state.node_at(Point::new(1.5, -3.0)).map(|n| n.identity.as_str()), Some("c1"));
	}

	#[test]
	fn clicking_twice_restores_selection() {
		let (mut state, seen) = recording();
		state.load(region(), &ids(&["p"]));
		let before = state.selected.clone();

		let first = state.toggle_at(Point::new(2.5, 0.5)).unwrap();
		assert_eq!(first.children, strings(&["c2"]));
		let second = state.toggle_at(Point::new(2.5, 0.5)).unwrap();
		assert!(second.children.is_empty());

		assert_eq!(state.selected, before);
		assert_eq!(seen.borrow().len(), 3);
	}

	#[test]
	fn click_on_empty_graph_is_ignored() {
		let (mut state, seen) = recording();
		assert_eq!(state.toggle_at(Point::new(0.0, 0.0)), None);
		state.hover(Point::new(0.0, 0.0));
		assert_eq!(state.hovered, None);
		assert!(seen.borrow().is_empty());
	}

	#[test]
	fn margin_clicks_are_inert() {
		let (mut state, seen) = recording();
		state.load(region(), &ids(&["p"]));
		let before = state.selected.clone();

		// top-left corner of the canvas sits in the margin
		let corner = state.frame.to_model(2.0, 2.0);
		assert_eq!(state.toggle_at(corner), None);
		assert_eq!(state.toggle_at(Point::new(-0.5, 0.5)), None);
		assert_eq!(state.toggle_at(Point::new(2.5, 2.5)), None);

		assert_eq!(state.selected, before);
		assert_eq!(state.status_text(), "");
		assert_eq!(seen.borrow().len(), 1);
	}

	#[test]
	fn moving_into_margin_clears_hover() {
		let (mut state, _) = recording();
		state.load(region(), &BTreeSet::new());
		state.hover(Point::new(0.5, 0.5));
		assert_eq!(state.hovered.as_deref(), Some("c1"));
		state.hover(Point::new(0.5, -0.5));
		assert_eq!(state.hovered, None);
	}

	#[test]
	fn update_selections_is_silent_and_drops_unknown_ids() {
		let (mut state, seen) = recording();
		state.load(region(), &BTreeSet::new());
		state.update_selections(&strings(&["c1", "nope"]), &strings(&["q"]));
		assert_eq!(state.selected, ids(&["c1", "q"]));
		assert_eq!(
			state.status(),
			SelectionStatus {
				children: strings(&["c1"]),
				ancestors: strings(&["q"]),
			}
		);
		assert_eq!(seen.borrow().len(), 1);
	}

	#[test]
	fn status_text_reports_last_clicks_and_hover() {
		let (mut state, _) = recording();
		state.load(region(), &BTreeSet::new());
		state.toggle_at(Point::new(0.5, 0.5));
		state.toggle_at(Point::new(1.5, 1.5));
		state.hover(Point::new(2.5, 1.5));
		assert_eq!(state.status_text(), "Child c1 [p]; Ancestor p; Hover q; ");
		state.clear_hover();
		assert_eq!(state.status_text(), "Child c1 [p]; Ancestor p; ");
	}

	#[test]
	fn frame_draws_larger_y_higher() {
		let (mut state, _) = recording();
		state.load(region(), &BTreeSet::new());
		let top = state.frame.to_model(150.0, 10.0);
		let bottom = state.frame.to_model(150.0, 190.0);
		assert!(top.y > bottom.y);
	}
}
