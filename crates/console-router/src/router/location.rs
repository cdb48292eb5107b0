//! The current location.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where the application currently is.
///
/// A pathname plus the opaque payload attached at navigation time. It is
/// independent of whether the browser's address bar agrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
	pathname: String,
	state: Value,
}

impl Location {
	/// Creates a location.
	pub fn new(pathname: impl Into<String>, state: Value) -> Self {
		Self {
			pathname: pathname.into(),
			state,
		}
	}

	/// Returns the path component, query and hash included if present.
	pub fn pathname(&self) -> &str {
		&self.pathname
	}

	/// Returns the navigation payload (`Value::Null` when none was attached).
	pub fn state(&self) -> &Value {
		&self.state
	}
}

impl Default for Location {
	fn default() -> Self {
		Self::new("/", Value::Null)
	}
}
