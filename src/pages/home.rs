use leptos::prelude::*;

use super::{Loader, Remote, StatusMessage, app_config};
use crate::api;
use crate::components::matrix::{AtlasMatrix, MatrixPayload};

/// Matrix page, the landing route.
#[component]
pub fn Home() -> impl IntoView {
	let config = app_config();
	let loader = Loader::<MatrixPayload>::new();
	loader.load("matrix", async move { api::matrix(&config).await });
	let state = loader.state();

	view! {
		<div class="matrix-page">
			{move || match state.get() {
				Remote::Loading => view! { <StatusMessage text="Loading ATLAS matrix..." /> }.into_any(),
				Remote::Failed(message) => {
					view! { <StatusMessage text=format!("Error: {message}") error=true /> }.into_any()
				}
				Remote::Ready(payload) => view! { <AtlasMatrix payload=payload /> }.into_any(),
			}}
		</div>
	}
}
