use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use super::{Loader, Remote, StatusMessage, app_config};
use crate::api;
use crate::catalog::{Maturity, TechniqueDetail};
use crate::components::{palette, technique_path};

fn maturity_badge(maturity: Maturity) -> Option<impl IntoView> {
	let color = palette::maturity_color(maturity)?;
	Some(view! {
		<span
			class="badge"
			style=format!("background-color: {}; color: {color};", palette::with_alpha(color, 0x20))
		>
			{maturity.as_str()}
		</span>
	})
}

fn tactic_badge(tactic_id: String) -> impl IntoView {
	let color = palette::tactic_color(&tactic_id);
	let title = palette::tactic_label(&tactic_id).unwrap_or_default();
	view! {
		<span
			class="tactic-badge"
			title=title
			style=format!(
				"background-color: {}; color: {color}; border: 1px solid {};",
				palette::with_alpha(color, 0x15),
				palette::with_alpha(color, 0x30),
			)
		>
			{tactic_id}
		</span>
	}
}

fn detail_view(t: TechniqueDetail) -> impl IntoView {
	let attck = t.attck_url.clone().map(|url| {
		let label = format!("ATT&CK Reference: {}", t.attck_id.clone().unwrap_or_default());
		view! {
			<a class="external-link" href=url target="_blank" rel="noopener noreferrer">
				{label}
			</a>
		}
	});
	let description = (!t.description.is_empty()).then(|| {
		view! {
			<section>
				<h2>"Description"</h2>
				<div class="description">{t.description.clone()}</div>
			</section>
		}
	});
	let parent = t.parent_technique_id.clone().map(|parent| {
		let href = technique_path(&parent);
		view! {
			<section>
				<h2>"Parent Technique"</h2>
				<A href=href>{parent}</A>
			</section>
		}
	});
	let subtechniques = (!t.subtechniques.is_empty()).then(|| {
		view! {
			<section>
				<h2>{format!("Subtechniques ({})", t.subtechniques.len())}</h2>
				<ul class="detail-list">
					{t.subtechniques
						.iter()
						.map(|s| {
							let (id, name, maturity) = (s.id.clone(), s.name.clone(), s.maturity);
							let href = technique_path(&id);
							view! {
								<li>
									<A href=href>
										<span class="mono">{id}</span>
										" "
										{name}
									</A>
									{maturity_badge(maturity)}
								</li>
							}
						})
						.collect_view()}
				</ul>
			</section>
		}
	});
	let case_studies = (!t.case_studies.is_empty()).then(|| {
		view! {
			<section>
				<h2>{format!("Case Studies ({})", t.case_studies.len())}</h2>
				<ul class="detail-list">
					{t.case_studies
						.iter()
						.map(|c| {
							view! {
								<li>
									<span class="mono">{c.id.clone()}</span>
									" "
									{c.name.clone()}
									{c.incident_date.clone().map(|d| view! { <span class="muted">{d}</span> })}
								</li>
							}
						})
						.collect_view()}
				</ul>
			</section>
		}
	});
	let mitigations = (!t.mitigations.is_empty()).then(|| {
		view! {
			<section>
				<h2>{format!("Mitigations ({})", t.mitigations.len())}</h2>
				<ul class="detail-list">
					{t.mitigations
						.iter()
						.map(|m| {
							view! {
								<li>
									<span class="mono">{m.id.clone()}</span>
									" "
									{m.name.clone()}
									{m.category.clone().map(|c| view! { <span class="muted">{c}</span> })}
									{m.usage.clone().map(|u| view! { <p class="usage">{u}</p> })}
								</li>
							}
						})
						.collect_view()}
				</ul>
			</section>
		}
	});
	let dates = [("Created", &t.created_date), ("Modified", &t.modified_date)]
		.into_iter()
		.filter_map(|(label, date)| {
			let text = format!("{label}: {}", date.as_ref()?);
			Some(view! { <span>{text}</span> })
		})
		.collect_view();

	view! {
		<div class="technique-detail">
			<A href="/">"Back to Matrix"</A>
			<header>
				<div class="badges">
					<span class="mono muted">{t.id.clone()}</span>
					{maturity_badge(t.maturity)}
					{t.is_subtechnique.then(|| view! { <span class="badge">"subtechnique"</span> })}
				</div>
				<h1>{t.name.clone()}</h1>
				<div class="badges">{t.tactic_ids.clone().into_iter().map(tactic_badge).collect_view()}</div>
				{attck}
			</header>
			{description}
			{parent}
			{subtechniques}
			{case_studies}
			{mitigations}
			<footer class="detail-dates">{dates}</footer>
		</div>
	}
}

/// Detail page for `/technique/:id`.
#[component]
pub fn TechniquePage() -> impl IntoView {
	let params = use_params_map();
	let id = Memo::new(move |_| params.with(|p| p.get("id").unwrap_or_default()));
	let config = app_config();
	let loader = Loader::<TechniqueDetail>::new();
	let state = loader.state();

	Effect::new(move |_| {
		let (id, config) = (id.get(), config.clone());
		loader.load("technique", async move { api::technique(&config, &id).await });
	});

	move || match state.get() {
		Remote::Loading => view! { <StatusMessage text="Loading technique..." /> }.into_any(),
		Remote::Failed(_) => view! {
			<div class="not-found">
				<h2>"Technique Not Found"</h2>
				<p>
					"Could not load technique " <code>{id.get()}</code> ". The backend may not be running."
				</p>
				<A href="/">"Back to Matrix"</A>
			</div>
		}
		.into_any(),
		Remote::Ready(technique) => detail_view(technique).into_any(),
	}
}
