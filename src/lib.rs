//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod api;
mod catalog;
mod components;
mod config;
mod error;
mod pages;

// Top-Level pages
use crate::config::AppConfig;
use crate::pages::graph::GraphPage;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::pages::technique::TechniquePage;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// The app shell: navigation header plus the matrix, graph and technique routes.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let config = AppConfig::from_env();
	info!("API base URL: {}", config.api_base_url);
	provide_context(config);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="ATLAS Explorer" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<header class="app-header">
				<A href="/">
					<span class="brand">"ATLAS Explorer"</span>
				</A>
				<nav>
					<A href="/">"Matrix"</A>
					<A href="/graph">"Graph"</A>
				</nav>
			</header>
			<main class="app-main">
				<Routes fallback=|| view! { <NotFound /> }>
					<Route path=path!("/") view=Home />
					<Route path=path!("/graph") view=GraphPage />
					<Route path=path!("/technique/:id") view=TechniquePage />
				</Routes>
			</main>
		</Router>
	}
}
