use leptos::prelude::*;
use log::{error, info};
use web_sys::MouseEvent;

use crate::components::detail::{DetailView, SelectionStatus};
use crate::components::graph::Snapshot;
use crate::components::graph::region::timestamp_region;
use crate::components::lineage::{LineageView, TimestampSelection};

const SAMPLE_LINEAGE: &str = include_str!("../../assets/sample_lineage.json");
const VIEW_SIZE: f64 = 480.0;

/// Bundled sample lineage; an unreadable sample yields an empty timeline.
fn load_sample() -> Snapshot {
	match Snapshot::from_json(SAMPLE_LINEAGE) {
		Ok(snapshot) => snapshot,
		Err(e) => {
			error!("sample lineage: {e}");
			Snapshot::default()
		}
	}
}

fn empty_region() -> Snapshot {
	Snapshot {
		width: 1.0,
		height: 1,
		..Snapshot::default()
	}
}

/// Default Home Page: lineage timeline on the left, timestamp detail on the right.
#[component]
pub fn Home() -> impl IntoView {
	let lineage = RwSignal::new(load_sample());
	let selection = RwSignal::new(None::<TimestampSelection>);
	let status = RwSignal::new(SelectionStatus::default());
	let imposed = RwSignal::new(SelectionStatus::default());

	let detail = Memo::new(move |_| match selection.get() {
		Some(sel) => lineage.with(|l| timestamp_region(l, sel.timestamp)),
		None => empty_region(),
	});
	let special = Memo::new(move |_| {
		selection
			.get()
			.map(|sel| sel.special_ids)
			.unwrap_or_default()
	});

	let on_select_timestamp = move |sel: TimestampSelection| {
		info!(
			"timestamp {} selected with {} special ids",
			sel.timestamp,
			sel.special_ids.len()
		);
		selection.set(Some(sel));
	};
	let on_status_change = move |st: SelectionStatus| status.set(st);
	let clear_selection = move |_: MouseEvent| {
		imposed.set(SelectionStatus::default());
		status.set(SelectionStatus::default());
	};

	let empty = Memo::new(move |_| lineage.with(Snapshot::is_empty));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="lineage-page">
				<h1>"Lineage viewer"</h1>
				<p class="subtitle">
					"Click a row to pick a timestamp, shift-click a node to highlight its lineage, use the arrow keys to step through time. Click nodes on the right to toggle them."
				</p>
				<Show when=move || empty.get()>
					<p class="warning">"No lineage data loaded."</p>
				</Show>
				<div class="panels" style="display: flex; gap: 1em;">
					<LineageView
						data=lineage
						on_select_timestamp=on_select_timestamp
						width=Some(VIEW_SIZE)
						height=Some(VIEW_SIZE)
					/>
					<DetailView
						data=detail
						special_ids=special
						selections=imposed
						on_status_change=on_status_change
						width=Some(VIEW_SIZE)
						height=Some(VIEW_SIZE)
					/>
				</div>
				<div class="selection-status">
					<p>"Children: " {move || status.with(|s| s.children.join(", "))}</p>
					<p>"Ancestors: " {move || status.with(|s| s.ancestors.join(", "))}</p>
					<button on:click=clear_selection>"Clear selection"</button>
				</div>
			</div>
		</ErrorBoundary>
	}
}
