//! Route pattern grammar.
//!
//! A pattern is one of:
//!
//! - `/console/settings` - literal, exact match only
//! - `/console/*` - wildcard suffix, any path sharing the prefix before `/*`
//! - `/console/projects/:id` - single trailing parameter, any path strictly
//!   longer than the prefix before `/:`
//! - `*` - catch-all
//!
//! Matching is string based and evaluates the rules in a fixed order. The
//! wildcard and parameter rules are not exclusive: `/a/:id/*` tries the
//! wildcard rule with base `/a/:id` and then the parameter rule with base
//! `/a`.

use std::fmt;

const WILDCARD_SUFFIX: &str = "/*";
const PARAM_MARKER: &str = "/:";
const CATCH_ALL: &str = "*";

/// The rule by which a pattern accepted a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
	/// Pattern and path are identical.
	Exact,
	/// Path starts with the text before `/*`.
	Wildcard,
	/// Path extends the text before `/:`.
	Parameter,
	/// Pattern is `*`.
	CatchAll,
}

/// A route pattern, pre-split so matching does not re-scan the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
	/// The original pattern string.
	raw: String,
	/// Text before a trailing `/*`.
	wildcard_base: Option<String>,
	/// Text before the first `/:`.
	param_base: Option<String>,
	/// Text after the first `/:`.
	param_name: Option<String>,
}

impl RoutePattern {
	/// Creates a pattern. Every string is a valid pattern.
	pub fn new(pattern: impl Into<String>) -> Self {
		let raw = pattern.into();
		let wildcard_base = raw.strip_suffix(WILDCARD_SUFFIX).map(str::to_string);
		let (param_base, param_name) = match raw.split_once(PARAM_MARKER) {
			Some((base, name)) => (Some(base.to_string()), Some(name.to_string())),
			None => (None, None),
		};

		Self {
			raw,
			wildcard_base,
			param_base,
			param_name,
		}
	}

	/// Returns the original pattern string.
	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Returns the declared parameter name (`id` for `/projects/:id`).
	///
	/// The name is informational: [`use_params`](super::use_params) always
	/// reports the trailing segment as `id`.
	pub fn param_name(&self) -> Option<&str> {
		self.param_name.as_deref()
	}

	/// Returns true for the `*` pattern.
	pub fn is_catch_all(&self) -> bool {
		self.raw == CATCH_ALL
	}

	/// Tests `path` against the rules in order: exact, wildcard, parameter,
	/// catch-all. Returns the first rule that accepts it.
	pub fn matches(&self, path: &str) -> Option<MatchKind> {
		if self.raw == path {
			return Some(MatchKind::Exact);
		}

		if let Some(base) = &self.wildcard_base
			&& path.starts_with(base.as_str())
		{
			return Some(MatchKind::Wildcard);
		}

		if let Some(base) = &self.param_base
			&& path.starts_with(base.as_str())
			&& path.len() > base.len()
		{
			return Some(MatchKind::Parameter);
		}

		if self.is_catch_all() {
			return Some(MatchKind::CatchAll);
		}

		None
	}
}

impl From<&str> for RoutePattern {
	fn from(pattern: &str) -> Self {
		Self::new(pattern)
	}
}

impl From<String> for RoutePattern {
	fn from(pattern: String) -> Self {
		Self::new(pattern)
	}
}

impl fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.raw)
	}
}
