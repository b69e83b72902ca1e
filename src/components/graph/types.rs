use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use super::frame::Point;

/// Node label as supplied by the data side; segmentation labels arrive as integers.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Label {
	Number(i64),
	Text(String),
}

impl fmt::Display for Label {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Label::Number(n) => write!(f, "{n}"),
			Label::Text(s) => f.write_str(s),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphNode {
	#[serde(default)]
	pub identity: String,
	#[serde(default)]
	pub offset: f64,
	#[serde(default)]
	pub timestamp_ordinal: i64,
	#[serde(default)]
	pub x: f64,
	#[serde(default)]
	pub y: f64,
	#[serde(default)]
	pub parent_id: Option<String>,
	#[serde(default)]
	pub color: Option<String>,
	#[serde(default)]
	pub label: Option<Label>,
	#[serde(default)]
	pub is_child: bool,
}

impl GraphNode {
	pub fn parent(&self) -> Option<&str> {
		self.parent_id.as_deref().filter(|p| !p.is_empty())
	}
}

/// One graph load: the whole lineage, or the region around one timestamp.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Snapshot {
	pub width: f64,
	pub height: i64,
	#[serde(default)]
	pub id_to_node: BTreeMap<String, GraphNode>,
	#[serde(default)]
	pub ordinals: Vec<i64>,
}

impl Snapshot {
	pub fn from_json(text: &str) -> serde_json::Result<Self> {
		let mut snapshot: Snapshot = serde_json::from_str(text)?;
		for (id, node) in snapshot.id_to_node.iter_mut() {
			if node.identity.is_empty() {
				node.identity = id.clone();
			}
		}
		Ok(snapshot)
	}

	pub fn is_empty(&self) -> bool {
		self.id_to_node.is_empty()
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.id_to_node.get(id)
	}

	/// Whether `p` lies on the plot area `[0, width] x [0, height]`, margins excluded.
	pub fn contains(&self, p: Point) -> bool {
		(0.0..=self.width).contains(&p.x) && (0.0..=self.height as f64).contains(&p.y)
	}

	/// Parent of `node`, if it names a node present in this snapshot.
	pub fn parent_of(&self, node: &GraphNode) -> Option<&GraphNode> {
		node.parent().and_then(|pid| self.id_to_node.get(pid))
	}
}
