//! Core Router Implementation.
//!
//! [`Router`] pairs a caller-owned [`RouteTable`] with the navigation store.
//! It caches nothing: every call to [`Router::current`] re-resolves the
//! store's pathname against the table as it is at that moment, so swapping
//! the table between renders can never leave a stale view behind.

use std::cell::RefCell;

use super::matcher::{Resolution, RouteTable, resolve};
use super::store::{NavigateOptions, NavigationOutcome, NavigationStore};
use crate::debug_log;

/// What to do when no route matches.
#[derive(Debug, Clone)]
pub enum Fallback<V> {
	/// Render nothing.
	Empty,
	/// Render this view.
	View(V),
	/// Replace the current entry with this path, then resolve once more.
	Redirect(String),
}

/// A route table bound to a navigation store.
///
/// # Example
///
/// ```
/// use console_router::router::{MemoryHistory, NavigationStore, RouteTable, Router};
///
/// let store = NavigationStore::init(MemoryHistory::new("/console/projects/42"));
/// let router = Router::new(
///     store.clone(),
///     RouteTable::new()
///         .route("/console/projects/:id", "project")
///         .route("/console/*", "console"),
/// )
/// .redirect_unmatched("/console");
///
/// assert_eq!(router.current(), Some(&"project"));
///
/// let _ = store.push("/somewhere-else");
/// assert_eq!(router.current(), Some(&"console"));
/// assert_eq!(store.pathname(), "/console");
/// ```
#[derive(Debug)]
pub struct Router<V> {
	/// Registered routes.
	table: RouteTable<V>,
	/// Shared location.
	store: NavigationStore,
	/// Unmatched-path handling.
	fallback: Fallback<V>,
	/// Outcome of the most recent fallback redirect.
	last_redirect: RefCell<Option<NavigationOutcome>>,
}

impl<V> Router<V> {
	/// Creates a router with an empty fallback.
	pub fn new(store: NavigationStore, table: RouteTable<V>) -> Self {
		Self {
			table,
			store,
			fallback: Fallback::Empty,
			last_redirect: RefCell::new(None),
		}
	}

	/// Renders `view` when no route matches.
	pub fn not_found(mut self, view: V) -> Self {
		self.fallback = Fallback::View(view);
		self
	}

	/// Redirects to `to` when no route matches.
	pub fn redirect_unmatched(mut self, to: impl Into<String>) -> Self {
		self.fallback = Fallback::Redirect(to.into());
		self
	}

	/// Returns the store.
	pub fn store(&self) -> &NavigationStore {
		&self.store
	}

	/// Returns the route table.
	pub fn table(&self) -> &RouteTable<V> {
		&self.table
	}

	/// Swaps in a new route table.
	pub fn set_table(&mut self, table: RouteTable<V>) {
		self.table = table;
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.table.len()
	}

	/// Returns the outcome of the last redirect [`Router::current`] applied.
	///
	/// `None` until the redirect fallback has fired at least once.
	pub fn last_redirect(&self) -> Option<NavigationOutcome> {
		self.last_redirect.borrow().clone()
	}

	/// Resolves the current pathname without applying the fallback.
	pub fn resolve_current(&self) -> Resolution<'_, V> {
		resolve(&self.table, &self.store.pathname())
	}

	/// Returns the view for the current pathname.
	///
	/// On no match the fallback applies. A redirect replaces the current
	/// history entry and resolves once more; if the redirect target does
	/// not match either, nothing is rendered.
	pub fn current(&self) -> Option<&V> {
		let path = self.store.pathname();
		if let Some(view) = resolve(&self.table, &path).view() {
			return Some(view);
		}

		match &self.fallback {
			Fallback::Empty => None,
			Fallback::View(view) => Some(view),
			Fallback::Redirect(to) => {
				if *to == path {
					return None;
				}
				debug_log!("no route for '{}', redirecting to '{}'", path, to);
				let outcome = self
					.store
					.navigate(to, NavigateOptions::new().replace(true));
				*self.last_redirect.borrow_mut() = Some(outcome);
				resolve(&self.table, to).view()
			}
		}
	}
}
