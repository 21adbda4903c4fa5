use leptos::prelude::*;
use leptos_router::components::A;

/// 404 page.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"Page Not Found"</h1>
			<p>"Nothing lives at this address."</p>
			<A href="/">"Back to Matrix"</A>
		</div>
	}
}
