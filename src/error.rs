//! Error types for backend access and engine mounting.

use thiserror::Error;

/// Result alias for API calls.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Failures surfaced to the user in place of a visualization.
#[derive(Debug, Error)]
pub enum ApiError {
	/// No `window` object (not running in a browser).
	#[error("browser window unavailable")]
	NoWindow,

	/// The request never produced a response.
	#[error("network error: {0}")]
	Network(String),

	/// The backend answered with a non-2xx status.
	#[error("API error: {status} {status_text}")]
	Status { status: u16, status_text: String },

	/// The response body could not be read.
	#[error("unreadable response body: {0}")]
	Body(String),

	/// The body was not the expected JSON shape.
	#[error("unexpected payload: {0}")]
	Decode(#[from] serde_json::Error),
}

impl ApiError {
	/// Stringifies a JS exception into a network error.
	pub fn network(err: wasm_bindgen::JsValue) -> Self {
		Self::Network(js_error_message(&err))
	}

	pub fn body(err: wasm_bindgen::JsValue) -> Self {
		Self::Body(js_error_message(&err))
	}
}

/// Reasons the graph canvas could not be brought up.
#[derive(Debug, Error, PartialEq)]
pub enum MountError {
	#[error("browser window unavailable")]
	NoWindow,

	#[error("canvas has no 2d context")]
	NoContext,

	/// The container has not been laid out yet, or is hidden.
	#[error("container is {width}x{height}")]
	EmptyContainer { width: f64, height: f64 },
}

fn js_error_message(err: &wasm_bindgen::JsValue) -> String {
	use wasm_bindgen::JsCast;

	if let Some(error) = err.dyn_ref::<js_sys::Error>() {
		return String::from(error.message());
	}
	err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_errors_read_like_the_backend_reply() {
		let err = ApiError::Status {
			status: 503,
			status_text: "Service Unavailable".into(),
		};
		assert_eq!(err.to_string(), "API error: 503 Service Unavailable");
	}

	#[test]
	fn empty_container_reports_its_size() {
		let err = MountError::EmptyContainer {
			width: 0.0,
			height: 480.0,
		};
		assert_eq!(err.to_string(), "container is 0x480");
	}

	#[test]
	fn decode_errors_convert_from_serde() {
		let err: ApiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
		assert!(matches!(err, ApiError::Decode(_)));
	}
}
