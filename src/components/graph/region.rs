use std::collections::{BTreeMap, BTreeSet};

use super::types::{GraphNode, Snapshot};

/// Slice of `lineage` shown in the detail view for `ordinal`.
///
/// Includes the timestamp itself, the one before it, and every timestamp back
/// to the oldest parent of a node at `ordinal`. Nodes are placed on a compact
/// grid: `x` is the rank of the node's offset, `y` counts up from the newest
/// timestamp at the bottom.
pub fn timestamp_region(lineage: &Snapshot, ordinal: i64) -> Snapshot {
	let all_ordinals: BTreeSet<i64> = lineage
		.id_to_node
		.values()
		.map(|n| n.timestamp_ordinal)
		.collect();
	if !all_ordinals.contains(&ordinal) {
		return Snapshot {
			width: 1.0,
			height: 1,
			..Snapshot::default()
		};
	}

	let farthest = lineage
		.id_to_node
		.values()
		.filter(|n| n.timestamp_ordinal == ordinal)
		.filter_map(|n| lineage.parent_of(n))
		.map(|p| p.timestamp_ordinal)
		.fold(ordinal, i64::min);

	let mut ordinals: BTreeSet<i64> = all_ordinals.range(farthest..=ordinal).copied().collect();
	if let Some(&pred) = all_ordinals.range(..ordinal).next_back() {
		ordinals.insert(pred);
	}
	let ordinals: Vec<i64> = ordinals.into_iter().collect();

	let members: Vec<(&String, &GraphNode)> = lineage
		.id_to_node
		.iter()
		.filter(|(_, n)| ordinals.binary_search(&n.timestamp_ordinal).is_ok())
		.collect();

	let mut offsets: Vec<f64> = members.iter().map(|(_, n)| n.offset).collect();
	offsets.sort_by(f64::total_cmp);
	offsets.dedup();

	let height = ordinals.len() as i64;
	let id_to_node: BTreeMap<String, GraphNode> = members
		.into_iter()
		.map(|(id, node)| {
			let column = offsets.partition_point(|o| *o < node.offset);
			let row = ordinals.partition_point(|o| *o < node.timestamp_ordinal) as i64;
			let placed = GraphNode {
				x: column as f64,
				y: (height - row - 1) as f64,
				is_child: node.timestamp_ordinal == ordinal,
				..node.clone()
			};
			(id.clone(), placed)
		})
		.collect();

	Snapshot {
		width: offsets.len() as f64,
		height,
		id_to_node,
		ordinals,
	}
}
