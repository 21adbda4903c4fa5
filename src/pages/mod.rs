//! Routed pages hosting the two engines and the technique detail view.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};

use crate::config::AppConfig;
use crate::error::Result;

pub mod graph;
pub mod home;
pub mod not_found;
pub mod technique;

/// State of a backend fetch as the page sees it.
#[derive(Clone, Debug, PartialEq)]
pub enum Remote<T> {
	Loading,
	Ready(T),
	Failed(String),
}

const UNMOUNTED: u64 = u64::MAX;

/// Claims the next request token, or `None` once the page is gone.
fn begin(latest: &AtomicU64) -> Option<u64> {
	latest
		.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| match current {
			UNMOUNTED => None,
			_ => Some(current + 1),
		})
		.ok()
		.map(|previous| previous + 1)
}

/// Whether a response for `token` may still be published.
fn accepts(latest: &AtomicU64, token: u64) -> bool {
	latest.load(Ordering::Relaxed) == token
}

/// Runs fetches for a page and publishes the latest result.
///
/// Responses that arrive after the page is gone, or after a newer request
/// was started, are dropped.
pub struct Loader<T: 'static> {
	state: RwSignal<Remote<T>>,
	latest: Arc<AtomicU64>,
}

impl<T: 'static> Clone for Loader<T> {
	fn clone(&self) -> Self {
		Self {
			state: self.state,
			latest: self.latest.clone(),
		}
	}
}

impl<T: Clone + Send + Sync + 'static> Loader<T> {
	pub fn new() -> Self {
		let latest = Arc::new(AtomicU64::new(0));
		let on_unmount = latest.clone();
		on_cleanup(move || on_unmount.store(UNMOUNTED, Ordering::Relaxed));
		Self {
			state: RwSignal::new(Remote::Loading),
			latest,
		}
	}

	pub fn state(&self) -> RwSignal<Remote<T>> {
		self.state
	}

	pub fn load<F>(&self, what: &'static str, fetch: F)
	where
		F: Future<Output = Result<T>> + 'static,
	{
		let Some(token) = begin(&self.latest) else {
			return;
		};
		self.state.set(Remote::Loading);
		let (latest, state) = (self.latest.clone(), self.state);
		spawn_local(async move {
			let result = fetch.await;
			if !accepts(&latest, token) {
				debug!("dropping stale {what} response");
				return;
			}
			state.set(match result {
				Ok(value) => Remote::Ready(value),
				Err(err) => {
					warn!("loading {what} failed: {err}");
					Remote::Failed(err.to_string())
				}
			});
		});
	}
}

/// Backend settings provided by the app shell.
pub fn app_config() -> AppConfig {
	use_context::<AppConfig>().unwrap_or_default()
}

#[component]
pub fn StatusMessage(
	#[prop(into)] text: String,
	#[prop(default = false)] error: bool,
) -> impl IntoView {
	view! {
		<div class="status">
			<div class=if error { "status-text error" } else { "status-text" }>{text}</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn newer_request_supersedes_older_one() {
		let latest = AtomicU64::new(0);
		let first = begin(&latest).unwrap();
		let second = begin(&latest).unwrap();
		assert!(second > first);
		assert!(!accepts(&latest, first));
		assert!(accepts(&latest, second));
	}

	#[test]
	fn unmounted_page_rejects_new_and_in_flight_requests() {
		let latest = AtomicU64::new(0);
		let in_flight = begin(&latest).unwrap();
		latest.store(UNMOUNTED, Ordering::Relaxed);
		assert!(!accepts(&latest, in_flight));
		assert_eq!(begin(&latest), None);
		assert_eq!(latest.load(Ordering::Relaxed), UNMOUNTED);
	}
}
