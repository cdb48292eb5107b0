//! Route tables and ordered resolution.
//!
//! Table order is a total precedence order, not "most specific wins": the
//! first entry whose pattern accepts the path is the match. Callers must list
//! specific literal routes before the broader wildcard or parameter routes
//! that also cover them, otherwise the broader route silently wins.

use super::pattern::{MatchKind, RoutePattern};

/// A single `(pattern, view)` pair.
///
/// The view is opaque to the router; it is handed back untouched on a match.
#[derive(Debug, Clone)]
pub struct RouteEntry<V> {
	pattern: RoutePattern,
	view: V,
}

impl<V> RouteEntry<V> {
	/// Creates a route entry.
	pub fn new(pattern: impl Into<RoutePattern>, view: V) -> Self {
		Self {
			pattern: pattern.into(),
			view,
		}
	}

	/// Returns the pattern.
	pub fn pattern(&self) -> &RoutePattern {
		&self.pattern
	}

	/// Returns the view.
	pub fn view(&self) -> &V {
		&self.view
	}
}

/// An ordered list of route entries.
///
/// # Example
///
/// ```
/// use console_router::router::RouteTable;
///
/// let table = RouteTable::new()
///     .route("/console/settings", "settings")
///     .route("/console/projects/:id", "project")
///     .route("/console/*", "console")
///     .route("*", "not-found");
///
/// assert_eq!(table.resolve("/console/projects/42").view(), Some(&"project"));
/// assert_eq!(table.resolve("/elsewhere").view(), Some(&"not-found"));
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable<V> {
	entries: Vec<RouteEntry<V>>,
}

impl<V> Default for RouteTable<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V> RouteTable<V> {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
		}
	}

	/// Appends a route, lowest precedence so far.
	pub fn route(mut self, pattern: impl Into<RoutePattern>, view: V) -> Self {
		self.push(pattern, view);
		self
	}

	/// Appends a route in place.
	pub fn push(&mut self, pattern: impl Into<RoutePattern>, view: V) {
		self.entries.push(RouteEntry::new(pattern, view));
	}

	/// Returns the entries in precedence order.
	pub fn entries(&self) -> &[RouteEntry<V>] {
		&self.entries
	}

	/// Returns the number of routes.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if the table has no routes.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Resolves `path` against this table. See [`resolve`].
	pub fn resolve(&self, path: &str) -> Resolution<'_, V> {
		resolve(self, path)
	}
}

impl<V, P: Into<RoutePattern>> FromIterator<(P, V)> for RouteTable<V> {
	fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
		Self {
			entries: iter
				.into_iter()
				.map(|(pattern, view)| RouteEntry::new(pattern, view))
				.collect(),
		}
	}
}

/// Result of resolving a path.
#[derive(Debug)]
pub enum Resolution<'a, V> {
	/// The earliest entry, in table order, that accepted the path.
	Matched {
		/// Position of the entry in the table.
		index: usize,
		/// The matching entry.
		entry: &'a RouteEntry<V>,
		/// The rule that accepted the path.
		kind: MatchKind,
	},
	/// No entry accepted the path; the caller picks a fallback.
	NoMatch,
}

// Manual impls: a derive would require `V: Clone`.
impl<V> Clone for Resolution<'_, V> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<V> Copy for Resolution<'_, V> {}

impl<'a, V> Resolution<'a, V> {
	/// Returns the matched view, if any.
	pub fn view(&self) -> Option<&'a V> {
		match self {
			Self::Matched { entry, .. } => Some(entry.view()),
			Self::NoMatch => None,
		}
	}

	/// Returns the matched entry's table index, if any.
	pub fn index(&self) -> Option<usize> {
		match self {
			Self::Matched { index, .. } => Some(*index),
			Self::NoMatch => None,
		}
	}

	/// Returns the rule that matched, if any.
	pub fn kind(&self) -> Option<MatchKind> {
		match self {
			Self::Matched { kind, .. } => Some(*kind),
			Self::NoMatch => None,
		}
	}

	/// Returns true on a match.
	pub fn is_match(&self) -> bool {
		matches!(self, Self::Matched { .. })
	}
}

/// Resolves `path` to at most one entry of `table`.
///
/// Entries are scanned in order and each is tested with the exact,
/// wildcard, parameter and catch-all rules; the first entry accepted by any
/// rule is returned. This never panics and never reports more than one
/// entry.
pub fn resolve<'a, V>(table: &'a RouteTable<V>, path: &str) -> Resolution<'a, V> {
	table
		.entries
		.iter()
		.enumerate()
		.find_map(|(index, entry)| {
			entry
				.pattern
				.matches(path)
				.map(|kind| Resolution::Matched { index, entry, kind })
		})
		.unwrap_or(Resolution::NoMatch)
}
