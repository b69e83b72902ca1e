use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::warn;

use crate::components::graph::Snapshot;

/// Horizontal and vertical reach of a node together with all its descendants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
	pub left: f64,
	pub right: f64,
	pub top: i64,
	pub depth: i64,
}

impl Extent {
	/// Rectangle `(x, y, w, h)` in lineage model space boxing the subtree.
	pub fn bounds(&self) -> (f64, f64, f64, f64) {
		(
			self.left,
			self.top as f64,
			self.right - self.left + 1.0,
			(self.depth - self.top + 1) as f64,
		)
	}

	/// Node rectangles span one unit to the right of their offset.
	///
	/// Half-open: `x == right + 1` is outside, so two abutting subtrees never both
	/// claim a point. Callers scan a row in id order and take the first match.
	pub fn contains_x(&self, x: f64) -> bool {
		self.left <= x && x < self.right + 1.0
	}
}

/// Descendant closures and subtree extents derived from one snapshot.
#[derive(Clone, Debug, Default)]
pub struct LineageTree {
	descendants: BTreeMap<String, BTreeSet<String>>,
	extents: BTreeMap<String, Extent>,
}

impl LineageTree {
	pub fn build(graph: &Snapshot) -> Self {
		// Children are only complete after every node has been visited.
		let mut children: BTreeMap<String, BTreeSet<String>> =
			graph.id_to_node.keys().map(|id| (id.clone(), BTreeSet::new())).collect();
		for (id, node) in &graph.id_to_node {
			let Some(pid) = node.parent() else {
				continue;
			};
			match children.get_mut(pid) {
				Some(siblings) => {
					siblings.insert(id.clone());
				}
				None => warn!("node {id} names missing parent {pid}"),
			}
		}

		let descendants = descendant_closures(&children);

		let extents = descendants
			.iter()
			.filter_map(|(id, family)| {
				let node = graph.node(id)?;
				let mut extent = Extent {
					left: node.offset,
					right: node.offset,
					top: node.timestamp_ordinal,
					depth: node.timestamp_ordinal,
				};
				for member in family.iter().filter_map(|m| graph.node(m)) {
					extent.left = extent.left.min(member.offset);
					extent.right = extent.right.max(member.offset);
					extent.depth = extent.depth.max(member.timestamp_ordinal);
				}
				Some((id.clone(), extent))
			})
			.collect();

		Self {
			descendants,
			extents,
		}
	}

	/// The node itself plus every transitive child.
	pub fn descendants(&self, id: &str) -> Option<&BTreeSet<String>> {
		self.descendants.get(id)
	}

	pub fn extent(&self, id: &str) -> Option<&Extent> {
		self.extents.get(id)
	}
}

/// Post-order walk over the child map, memoizing each closure once.
fn descendant_closures(children: &BTreeMap<String, BTreeSet<String>>) -> BTreeMap<String, BTreeSet<String>> {
	let mut memo: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
	let mut open: HashSet<&str> = HashSet::new();

	for root in children.keys() {
		let mut stack: Vec<(&str, bool)> = vec![(root.as_str(), false)];
		while let Some((id, expanded)) = stack.pop() {
			if memo.contains_key(id) {
				continue;
			}
			let kids = children.get(id).into_iter().flatten();
			if expanded {
				let mut family = BTreeSet::from([id.to_string()]);
				for kid in kids {
					if let Some(sub) = memo.get(kid) {
						family.extend(sub.iter().cloned());
					}
				}
				open.remove(id);
				memo.insert(id.to_string(), family);
			} else if open.insert(id) {
				stack.push((id, true));
				for kid in kids {
					if open.contains(kid.as_str()) {
						warn!("parent cycle through {kid}, ignoring edge from {id}");
					} else if !memo.contains_key(kid) {
						stack.push((kid.as_str(), false));
					}
				}
			}
		}
	}
	memo
}
