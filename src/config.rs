//! Runtime configuration shared through the Leptos context.

/// Backend used when `ATLAS_API_URL` was not set at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Application-wide settings, resolved once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
	pub api_base_url: String,
}

impl AppConfig {
	/// Reads `ATLAS_API_URL` baked in by the build (e.g. `ATLAS_API_URL=... trunk build`).
	pub fn from_env() -> Self {
		Self::with_base_url(option_env!("ATLAS_API_URL").unwrap_or(DEFAULT_API_URL))
	}

	pub fn with_base_url(url: &str) -> Self {
		let trimmed = url.trim().trim_end_matches('/');
		let api_base_url = if trimmed.is_empty() {
			DEFAULT_API_URL.to_string()
		} else {
			trimmed.to_string()
		};
		Self { api_base_url }
	}

	/// Joins an absolute API path (`/api/...`) onto the base URL.
	pub fn endpoint(&self, path: &str) -> String {
		format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
	}
}

impl Default for AppConfig {
	fn default() -> Self {
		Self::from_env()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn trailing_slashes_are_trimmed() {
		let config = AppConfig::with_base_url("https://atlas.example.org/");
		assert_eq!(config.api_base_url, "https://atlas.example.org");
		assert_eq!(
			config.endpoint("/api/matrix"),
			"https://atlas.example.org/api/matrix"
		);
	}

	#[test]
	fn blank_url_falls_back_to_default() {
		let config = AppConfig::with_base_url("   ");
		assert_eq!(config.api_base_url, DEFAULT_API_URL);
	}
}
