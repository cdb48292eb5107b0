//! The navigation store.
//!
//! [`NavigationStore`] owns the single [`Location`] of the application and
//! keeps it in step with session history. It is a cheap cloneable handle;
//! every clone sees the same location and the same subscribers.
//!
//! The location changes from exactly two places, [`NavigationStore::navigate`]
//! and [`NavigationStore::handle_pop_state`], and both run to completion
//! before returning. There is no queue: a second navigation before anyone
//! rendered simply overwrites the first.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use serde_json::Value;

use super::error::HistoryError;
use super::history::{HistoryBackend, NavigationType};
use super::location::Location;
use crate::config::RouterConfig;
use crate::{debug_log, warn_log};

/// Options for [`NavigationStore::navigate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigateOptions {
	/// Replace the current history entry instead of pushing a new one.
	pub replace: bool,
	/// Payload attached to the new location.
	pub state: Value,
}

impl NavigateOptions {
	/// Push navigation without state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets whether to replace the current history entry.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Attaches a state payload.
	pub fn state(mut self, state: impl Into<Value>) -> Self {
		self.state = state.into();
		self
	}
}

/// How far a navigation got.
///
/// The in-app location is updated in both cases; `Unsynced` only means the
/// address bar may no longer agree with it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "the outcome reports whether the address bar was updated"]
pub enum NavigationOutcome {
	/// Session history accepted the update.
	Synced,
	/// Session history refused the update.
	Unsynced(HistoryError),
}

impl NavigationOutcome {
	/// Returns true when the address bar reflects the new location.
	pub fn is_synced(&self) -> bool {
		matches!(self, Self::Synced)
	}

	/// Returns the refusal, if any.
	pub fn error(&self) -> Option<&HistoryError> {
		match self {
			Self::Synced => None,
			Self::Unsynced(err) => Some(err),
		}
	}
}

type Listener = Rc<dyn Fn(&Location)>;

struct StoreState {
	location: Location,
	listeners: Vec<(u64, Listener)>,
	next_listener_id: u64,
	// Bumped by every publish; a nested publish supersedes the outer one.
	generation: u64,
	popstate_attached: bool,
}

/// Shared navigation state plus its history backend.
#[derive(Clone)]
pub struct NavigationStore {
	backend: Rc<dyn HistoryBackend>,
	config: Rc<RouterConfig>,
	state: Rc<RefCell<StoreState>>,
}

impl fmt::Debug for NavigationStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("NavigationStore")
			.field("location", &state.location)
			.field("listeners", &state.listeners.len())
			.field("config", &self.config)
			.finish()
	}
}

impl NavigationStore {
	/// Seeds the store from `backend` with the default configuration.
	pub fn init(backend: impl HistoryBackend + 'static) -> Self {
		Self::with_config(backend, RouterConfig::default())
	}

	/// Seeds the store from `backend`.
	///
	/// If the host refuses to report the pathname, the store starts at
	/// `config.default_path`; an unreadable state payload becomes `Null`.
	pub fn with_config(backend: impl HistoryBackend + 'static, config: RouterConfig) -> Self {
		let location = read_location(&backend, &config);
		debug_log!("navigation store seeded at '{}'", location.pathname());

		Self {
			backend: Rc::new(backend),
			config: Rc::new(config),
			state: Rc::new(RefCell::new(StoreState {
				location,
				listeners: Vec::new(),
				next_listener_id: 0,
				generation: 0,
				popstate_attached: false,
			})),
		}
	}

	/// Creates the store for the current host and wires up back/forward.
	///
	/// On WASM this reads `window.location` and subscribes to `popstate`.
	/// Elsewhere it starts an in-memory history at `/`.
	///
	/// Call this once per application. Each call creates an independent
	/// store with its own `popstate` listener.
	#[cfg(target_arch = "wasm32")]
	pub fn mount(config: RouterConfig) -> Self {
		let store = Self::with_config(super::history::BrowserHistory::new(), config);
		if let Err(err) = super::history::attach_popstate_listener(&store) {
			warn_log!("back/forward navigation will not be tracked: {}", err);
		}
		store
	}

	/// Creates the store for the current host and wires up back/forward.
	///
	/// On WASM this reads `window.location` and subscribes to `popstate`.
	/// Elsewhere it starts an in-memory history at `config.default_path`.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn mount(config: RouterConfig) -> Self {
		let backend = super::history::MemoryHistory::new(config.default_path.clone());
		Self::with_config(backend, config)
	}

	/// Returns a snapshot of the current location.
	pub fn location(&self) -> Location {
		self.state.borrow().location.clone()
	}

	/// Returns the current pathname.
	pub fn pathname(&self) -> String {
		self.state.borrow().location.pathname().to_string()
	}

	/// Returns the configuration the store was created with.
	pub fn config(&self) -> &RouterConfig {
		&self.config
	}

	/// Navigates to `to`.
	///
	/// Session history is updated on a best-effort basis. Whatever the
	/// backend says, the location becomes `to` with `options.state` and
	/// subscribers are notified before this returns.
	pub fn navigate(&self, to: &str, options: NavigateOptions) -> NavigationOutcome {
		let nav_type = if options.replace {
			NavigationType::Replace
		} else {
			NavigationType::Push
		};

		let result = match nav_type {
			NavigationType::Push => self.backend.push_state(&options.state, to),
			NavigationType::Replace => self.backend.replace_state(&options.state, to),
		};

		let outcome = match result {
			Ok(()) => NavigationOutcome::Synced,
			Err(err) => {
				if self.config.warn_on_unsynced {
					warn_log!(
						"{} to '{}' failed, navigating in memory only: {}",
						nav_type,
						to,
						err
					);
				}
				NavigationOutcome::Unsynced(err)
			}
		};

		self.publish(Location::new(to, options.state));
		outcome
	}

	/// Navigates to `to` with a new history entry and no state.
	pub fn push(&self, to: &str) -> NavigationOutcome {
		self.navigate(to, NavigateOptions::new())
	}

	/// Navigates to `to` replacing the current history entry.
	pub fn replace(&self, to: &str) -> NavigationOutcome {
		self.navigate(to, NavigateOptions::new().replace(true))
	}

	/// Re-reads the location from the backend and republishes it.
	///
	/// This is the handler for back/forward traversal; it only reads
	/// history, never writes it.
	pub fn handle_pop_state(&self) {
		let location = read_location(self.backend.as_ref(), &self.config);
		debug_log!("popstate to '{}'", location.pathname());
		self.publish(location);
	}

	/// Registers `listener` to run after every location change.
	///
	/// The listener stays registered until the returned [`Subscription`]
	/// is dropped. Listeners may read the store and may navigate.
	pub fn subscribe<F>(&self, listener: F) -> Subscription
	where
		F: Fn(&Location) + 'static,
	{
		let mut state = self.state.borrow_mut();
		let id = state.next_listener_id;
		state.next_listener_id += 1;
		state.listeners.push((id, Rc::new(listener)));

		Subscription {
			state: Rc::downgrade(&self.state),
			id: Some(id),
		}
	}

	/// Returns the number of live subscriptions.
	pub fn subscriber_count(&self) -> usize {
		self.state.borrow().listeners.len()
	}

	/// Marks the `popstate` listener as registered for this store.
	///
	/// Returns false if it already was, shared across clones.
	#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
	pub(crate) fn claim_popstate_listener(&self) -> bool {
		let mut state = self.state.borrow_mut();
		!std::mem::replace(&mut state.popstate_attached, true)
	}

	#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
	pub(crate) fn release_popstate_listener(&self) {
		self.state.borrow_mut().popstate_attached = false;
	}

	fn publish(&self, location: Location) {
		// Release the borrow before calling out so listeners can re-enter.
		let (generation, listeners) = {
			let mut state = self.state.borrow_mut();
			state.location = location.clone();
			state.generation += 1;
			let listeners: Vec<Listener> = state
				.listeners
				.iter()
				.map(|(_, listener)| Rc::clone(listener))
				.collect();
			(state.generation, listeners)
		};

		for listener in listeners {
			// A listener navigated; the nested publish already notified
			// everyone with the newer location.
			if self.state.borrow().generation != generation {
				debug_log!("'{}' superseded during notification", location.pathname());
				break;
			}
			listener(&location);
		}
	}
}

fn read_location<B: HistoryBackend + ?Sized>(backend: &B, config: &RouterConfig) -> Location {
	let pathname = backend.pathname().unwrap_or_else(|err| {
		warn_log!(
			"cannot read location, falling back to '{}': {}",
			config.default_path,
			err
		);
		config.default_path.clone()
	});
	let state = backend.state().unwrap_or_else(|err| {
		warn_log!("cannot read history state, using null: {}", err);
		Value::Null
	});
	Location::new(pathname, state)
}

/// Handle returned by [`NavigationStore::subscribe`].
///
/// Dropping it unregisters the listener.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
	state: Weak<RefCell<StoreState>>,
	id: Option<u64>,
}

impl Subscription {
	/// Keeps the listener registered for the lifetime of the store.
	pub fn detach(mut self) {
		self.id = None;
	}

	/// Unregisters the listener now.
	pub fn unsubscribe(self) {
		drop(self);
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription").field("id", &self.id).finish()
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(id) = self.id.take()
			&& let Some(state) = self.state.upgrade()
		{
			state
				.borrow_mut()
				.listeners
				.retain(|(listener_id, _)| *listener_id != id);
		}
	}
}

/// Reads the current location.
pub fn use_location(store: &NavigationStore) -> Location {
	store.location()
}

/// Returns a navigate function bound to `store`.
pub fn use_navigate(store: &NavigationStore) -> impl Fn(&str, NavigateOptions) -> NavigationOutcome {
	let store = store.clone();
	move |to: &str, options: NavigateOptions| store.navigate(to, options)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::router::history::MemoryHistory;
	use rstest::rstest;
	use serde_json::json;
	use std::cell::Cell;

	#[rstest]
	fn test_init_reads_backend() {
		let history = MemoryHistory::with_entry(Location::new("/console", json!({"tab": 2})));
		let store = NavigationStore::init(history);

		assert_eq!(store.pathname(), "/console");
		assert_eq!(store.location().state(), &json!({"tab": 2}));
	}

	#[rstest]
	fn test_init_falls_back_when_reads_denied() {
		let history = MemoryHistory::with_entry(Location::new("/console", json!(1)));
		history.deny_reads(true);

		let store = NavigationStore::init(history);
		assert_eq!(store.location(), Location::default());
	}

	#[rstest]
	fn test_init_fallback_uses_configured_default_path() {
		let history = MemoryHistory::default();
		history.deny_reads(true);
		let config = RouterConfig {
			default_path: "/console".to_string(),
			..RouterConfig::default()
		};

		let store = NavigationStore::with_config(history, config);
		assert_eq!(store.pathname(), "/console");
	}

	#[rstest]
	fn test_navigate_pushes_and_updates_location() {
		let history = MemoryHistory::default();
		let store = NavigationStore::init(history.clone());

		let outcome = store.navigate(
			"/console/deployments",
			NavigateOptions::new().state(json!({"region": "eu"})),
		);

		assert!(outcome.is_synced());
		assert_eq!(store.pathname(), "/console/deployments");
		assert_eq!(store.location().state(), &json!({"region": "eu"}));
		assert_eq!(history.len(), 2);
	}

	#[rstest]
	fn test_replace_does_not_grow_history() {
		let history = MemoryHistory::default();
		let store = NavigationStore::init(history.clone());

		assert!(store.replace("/login").is_synced());
		assert_eq!(history.len(), 1);
		assert_eq!(history.pathname().unwrap(), "/login");
	}

	#[rstest]
	fn test_denied_write_still_updates_location() {
		let history = MemoryHistory::default();
		history.deny_writes(true);
		let store = NavigationStore::init(history.clone());

		let outcome = store.push("/console/settings");

		assert!(matches!(
			outcome,
			NavigationOutcome::Unsynced(HistoryError::SecurityDenied(_))
		));
		assert!(outcome.error().is_some());
		assert_eq!(store.pathname(), "/console/settings");
		assert_eq!(history.pathname().unwrap(), "/");
	}

	#[rstest]
	fn test_pop_state_restores_previous_entry() {
		let history = MemoryHistory::default();
		let store = NavigationStore::init(history.clone());
		let _ = store.navigate("/console", NavigateOptions::new().state(json!("a")));
		let _ = store.navigate("/console/settings", NavigateOptions::new());

		history.back();
		store.handle_pop_state();

		assert_eq!(store.location(), Location::new("/console", json!("a")));
	}

	#[rstest]
	fn test_pop_state_does_not_write_history() {
		let history = MemoryHistory::default();
		let store = NavigationStore::init(history.clone());
		let _ = store.push("/a");
		history.back();

		store.handle_pop_state();
		assert_eq!(history.len(), 2);
		assert_eq!(history.index(), 0);
	}

	#[rstest]
	fn test_subscribers_notified_synchronously() {
		let store = NavigationStore::init(MemoryHistory::default());
		let seen = Rc::new(RefCell::new(Vec::new()));
		let _subscription = {
			let seen = Rc::clone(&seen);
			store.subscribe(move |location| seen.borrow_mut().push(location.pathname().to_string()))
		};

		let _ = store.push("/a");
		let _ = store.push("/b");

		assert_eq!(*seen.borrow(), vec!["/a".to_string(), "/b".to_string()]);
	}

	#[rstest]
	fn test_redirect_inside_listener_is_last_location_seen() {
		let store = NavigationStore::init(MemoryHistory::default());
		let _redirect = {
			let inner = store.clone();
			store.subscribe(move |location| {
				if location.pathname() == "/old" {
					let _ = inner.replace("/new");
				}
			})
		};
		let rendered = Rc::new(RefCell::new(Vec::new()));
		let _renderer = {
			let rendered = Rc::clone(&rendered);
			store.subscribe(move |location| {
				rendered.borrow_mut().push(location.pathname().to_string())
			})
		};

		let _ = store.push("/old");

		assert_eq!(store.pathname(), "/new");
		assert_eq!(rendered.borrow().last().map(String::as_str), Some("/new"));
		assert!(!rendered.borrow().iter().any(|path| path == "/old"));
	}

	#[rstest]
	fn test_earlier_listeners_see_both_locations_in_order() {
		let store = NavigationStore::init(MemoryHistory::default());
		let seen = Rc::new(RefCell::new(Vec::new()));
		let _recorder = {
			let seen = Rc::clone(&seen);
			store.subscribe(move |location| seen.borrow_mut().push(location.pathname().to_string()))
		};
		let _redirect = {
			let inner = store.clone();
			store.subscribe(move |location| {
				if location.pathname() == "/old" {
					let _ = inner.replace("/new");
				}
			})
		};

		let _ = store.push("/old");

		assert_eq!(*seen.borrow(), vec!["/old".to_string(), "/new".to_string()]);
	}

	#[rstest]
	fn test_popstate_listener_claimed_once_per_store() {
		let store = NavigationStore::init(MemoryHistory::default());
		let clone = store.clone();

		assert!(store.claim_popstate_listener());
		assert!(!clone.claim_popstate_listener());

		clone.release_popstate_listener();
		assert!(store.claim_popstate_listener());
	}

	#[rstest]
	fn test_dropping_subscription_unsubscribes() {
		let store = NavigationStore::init(MemoryHistory::default());
		let calls = Rc::new(Cell::new(0));
		let subscription = {
			let calls = Rc::clone(&calls);
			store.subscribe(move |_| calls.set(calls.get() + 1))
		};

		let _ = store.push("/a");
		subscription.unsubscribe();
		let _ = store.push("/b");

		assert_eq!(calls.get(), 1);
		assert_eq!(store.subscriber_count(), 0);
	}

	#[rstest]
	fn test_detached_subscription_survives() {
		let store = NavigationStore::init(MemoryHistory::default());
		let calls = Rc::new(Cell::new(0));
		{
			let calls = Rc::clone(&calls);
			store.subscribe(move |_| calls.set(calls.get() + 1)).detach();
		}

		let _ = store.push("/a");
		assert_eq!(calls.get(), 1);
		assert_eq!(store.subscriber_count(), 1);
	}

	#[rstest]
	fn test_listener_can_read_and_navigate() {
		let store = NavigationStore::init(MemoryHistory::default());
		let inner = store.clone();
		let _subscription = store.subscribe(move |location| {
			if location.pathname() == "/old" {
				let _ = inner.replace("/new");
			}
			assert_eq!(inner.pathname(), inner.location().pathname());
		});

		let _ = store.push("/old");
		assert_eq!(store.pathname(), "/new");
	}

	#[rstest]
	fn test_last_write_wins() {
		let store = NavigationStore::init(MemoryHistory::default());
		let _ = store.push("/first");
		let _ = store.push("/second");
		assert_eq!(use_location(&store).pathname(), "/second");
	}

	#[rstest]
	fn test_use_navigate_binds_store() {
		let store = NavigationStore::init(MemoryHistory::default());
		let navigate = use_navigate(&store);

		assert!(navigate("/console", NavigateOptions::new()).is_synced());
		assert_eq!(store.pathname(), "/console");
	}

	#[rstest]
	fn test_mount_starts_at_default_path() {
		let store = NavigationStore::mount(RouterConfig::default());
		assert_eq!(store.pathname(), "/");
	}
}
