//! Router configuration.
//!
//! All fields have defaults, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! default_path = "/"
//! external_prefixes = ["http", "//", "mailto:"]
//! warn_on_unsynced = true
//! ```

use serde::{Deserialize, Serialize};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The document is not valid TOML or has fields of the wrong type.
	#[error("invalid router configuration: {0}")]
	Parse(#[from] toml::de::Error),
	/// `default_path` must be an absolute path.
	#[error("default_path must start with '/', got '{0}'")]
	InvalidDefaultPath(String),
}

/// Settings consumed by [`NavigationStore`](crate::router::NavigationStore)
/// and [`Link`](crate::router::Link).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
	/// Pathname used when the host refuses to report the current location.
	pub default_path: String,
	/// Link targets starting with any of these are left to the browser.
	pub external_prefixes: Vec<String>,
	/// Whether refused history updates are logged as warnings.
	pub warn_on_unsynced: bool,
}

impl Default for RouterConfig {
	fn default() -> Self {
		Self {
			default_path: "/".to_string(),
			external_prefixes: vec!["http".to_string(), "//".to_string(), "mailto:".to_string()],
			warn_on_unsynced: true,
		}
	}
}

impl RouterConfig {
	/// Parses a configuration from a TOML document.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::Parse`] for malformed TOML and
	/// [`ConfigError::InvalidDefaultPath`] when `default_path` is relative.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if !self.default_path.starts_with('/') {
			return Err(ConfigError::InvalidDefaultPath(self.default_path.clone()));
		}
		Ok(())
	}

	/// Returns true if `to` points outside the application.
	pub fn is_external(&self, to: &str) -> bool {
		self.external_prefixes
			.iter()
			.any(|prefix| to.starts_with(prefix.as_str()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_default_config() {
		let config = RouterConfig::default();
		assert_eq!(config.default_path, "/");
		assert!(config.warn_on_unsynced);
		assert_eq!(config.external_prefixes.len(), 3);
	}

	#[rstest]
	fn test_empty_document_uses_defaults() {
		let config = RouterConfig::from_toml_str("").unwrap();
		assert_eq!(config, RouterConfig::default());
	}

	#[rstest]
	fn test_partial_document() {
		let config = RouterConfig::from_toml_str(
			r#"
			default_path = "/console"
			warn_on_unsynced = false
			"#,
		)
		.unwrap();

		assert_eq!(config.default_path, "/console");
		assert!(!config.warn_on_unsynced);
		assert_eq!(
			config.external_prefixes,
			RouterConfig::default().external_prefixes
		);
	}

	#[rstest]
	fn test_relative_default_path_rejected() {
		let result = RouterConfig::from_toml_str(r#"default_path = "console""#);
		assert!(matches!(result, Err(ConfigError::InvalidDefaultPath(p)) if p == "console"));
	}

	#[rstest]
	fn test_malformed_toml_rejected() {
		let result = RouterConfig::from_toml_str("warn_on_unsynced = \"yes\"");
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}

	#[rstest]
	#[case("https://example.com", true)]
	#[case("http://example.com", true)]
	#[case("//cdn.example.com/app.js", true)]
	#[case("mailto:ops@example.com", true)]
	#[case("/console", false)]
	#[case("console/settings", false)]
	fn test_is_external(#[case] to: &str, #[case] expected: bool) {
		assert_eq!(RouterConfig::default().is_external(to), expected);
	}
}
