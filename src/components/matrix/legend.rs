use leptos::prelude::*;

use crate::catalog::Maturity;
use crate::components::palette;

/// Filter after clicking `clicked`. Clicking the active level again clears it.
pub fn toggle(active: Option<Maturity>, clicked: Option<Maturity>) -> Option<Maturity> {
	match clicked {
		Some(level) if active == Some(level) => None,
		other => other,
	}
}

fn button_class(selected: bool) -> &'static str {
	if selected {
		"legend-filter active"
	} else {
		"legend-filter"
	}
}

/// Catalog summary and maturity filter shown above the matrix.
#[component]
pub fn MatrixLegend(
	#[prop(into)] version: Signal<String>,
	#[prop(into)] tactic_count: Signal<usize>,
	#[prop(into)] technique_count: Signal<usize>,
	filter: RwSignal<Option<Maturity>>,
) -> impl IntoView {
	let levels = Maturity::LEVELS
		.iter()
		.map(|&level| {
			let dot = palette::maturity_color(level).unwrap_or(palette::NEUTRAL);
			view! {
				<button
					class=move || button_class(filter.get() == Some(level))
					on:click=move |_| filter.update(|f| *f = toggle(*f, Some(level)))
				>
					<span class="legend-dot" style=format!("background-color: {dot};") />
					{level.label()}
				</button>
			}
		})
		.collect_view();

	view! {
		<div class="matrix-legend">
			<div>
				<h2>"ATLAS Matrix"</h2>
				<p class="legend-summary">
					{move || {
						format!(
							"MITRE ATLAS v{} · {} tactics, {} techniques",
							version.get(),
							tactic_count.get(),
							technique_count.get(),
						)
					}}
				</p>
			</div>
			<div class="legend-filters">
				<button
					class=move || button_class(filter.get().is_none())
					on:click=move |_| filter.set(None)
				>
					"All"
				</button>
				{levels}
			</div>
		</div>
	}
}
