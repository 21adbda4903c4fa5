//! Fetch wrappers for the backend JSON contract.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::catalog::TechniqueDetail;
use crate::components::force_graph::TechniqueGraph;
use crate::components::matrix::MatrixPayload;
use crate::config::AppConfig;
use crate::error::{ApiError, Result};

async fn fetch_json<T: DeserializeOwned>(config: &AppConfig, path: &str) -> Result<T> {
	let url = config.endpoint(path);
	let window = web_sys::window().ok_or(ApiError::NoWindow)?;
	let response: Response = JsFuture::from(window.fetch_with_str(&url))
		.await
		.map_err(ApiError::network)?
		.dyn_into()
		.map_err(ApiError::network)?;

	if !response.ok() {
		warn!("GET {url} -> {}", response.status());
		return Err(ApiError::Status {
			status: response.status(),
			status_text: response.status_text(),
		});
	}

	let text = JsFuture::from(response.text().map_err(ApiError::body)?)
		.await
		.map_err(ApiError::body)?
		.as_string()
		.ok_or_else(|| ApiError::Body("response text was not a string".into()))?;
	debug!("GET {url} -> {} bytes", text.len());
	decode(&text)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
	Ok(serde_json::from_str(body)?)
}

pub async fn technique_graph(config: &AppConfig) -> Result<TechniqueGraph> {
	fetch_json(config, "/api/techniques/graph").await
}

pub async fn matrix(config: &AppConfig) -> Result<MatrixPayload> {
	fetch_json(config, "/api/matrix").await
}

pub async fn technique(config: &AppConfig, id: &str) -> Result<TechniqueDetail> {
	fetch_json(config, &format!("/api/techniques/{id}")).await
}
