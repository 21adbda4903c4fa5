use leptos::prelude::*;

use super::{Loader, Remote, StatusMessage, app_config};
use crate::api;
use crate::components::force_graph::{ForceGraphCanvas, TechniqueGraph};
use crate::components::palette;

#[component]
fn TacticLegend() -> impl IntoView {
	view! {
		<div class="graph-legend">
			<div class="graph-legend-title">"Tactic Colors"</div>
			<div class="graph-legend-grid">
				{palette::TACTICS
					.iter()
					.map(|&(id, label)| {
						view! {
							<div class="graph-legend-item" title=id>
								<span
									class="legend-dot"
									style=format!("background-color: {};", palette::tactic_color(id))
								/>
								<span>{label}</span>
							</div>
						}
					})
					.collect_view()}
			</div>
		</div>
	}
}

/// Technique relationship graph page.
#[component]
pub fn GraphPage() -> impl IntoView {
	let config = app_config();
	let loader = Loader::<TechniqueGraph>::new();
	loader.load("technique graph", async move { api::technique_graph(&config).await });
	let state = loader.state();

	view! {
		<div class="graph-page">
			{move || match state.get() {
				Remote::Loading => {
					view! { <StatusMessage text="Loading technique graph..." /> }.into_any()
				}
				Remote::Failed(message) => {
					view! { <StatusMessage text=format!("Error: {message}") error=true /> }.into_any()
				}
				Remote::Ready(graph) => {
					let summary = format!(
						"{} techniques · {} connections",
						graph.nodes.len(),
						graph.edges.len()
					);
					view! {
						<div class="graph-header">
							<div>
								<h2>"Technique Relationship Graph"</h2>
								<p class="subtitle">
									"Techniques connected by co-occurrence in case studies. Node size = case study count. Edge thickness = co-occurrence weight."
								</p>
							</div>
							<div class="graph-summary">{summary}</div>
						</div>
						<div class="graph-surface">
							<ForceGraphCanvas data=graph />
							<TacticLegend />
						</div>
					}
						.into_any()
				}
			}}
		</div>
	}
}
