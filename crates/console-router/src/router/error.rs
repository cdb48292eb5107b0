//! Error types for client-side routing.

/// Error raised by a [`HistoryBackend`](super::HistoryBackend).
///
/// The store never propagates it: a refused update degrades to
/// [`NavigationOutcome::Unsynced`](super::NavigationOutcome::Unsynced).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
	/// No window or history object is reachable.
	#[error("session history is unavailable")]
	Unavailable,
	/// The host threw a security exception (sandboxed iframe, blob origin).
	#[error("session history access denied: {0}")]
	SecurityDenied(String),
	/// Any other refusal.
	#[error("session history rejected the update: {0}")]
	Rejected(String),
}

/// Error type for typed path parameter access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
	/// The current location has no trailing segment.
	#[error("path parameter 'id' is empty")]
	Missing,
	/// Failed to parse the parameter value.
	#[error("failed to parse path parameter '{raw_value}' as {param_type}: {reason}")]
	ParseError {
		/// Expected type name.
		param_type: &'static str,
		/// Raw string value that failed to parse.
		raw_value: String,
		/// Error message from parsing.
		reason: String,
	},
}
