//! Session history backends.
//!
//! [`HistoryBackend`] is the seam between the navigation store and the host:
//! [`BrowserHistory`] talks to `window.history` on WASM, [`MemoryHistory`]
//! keeps an in-process stack and is the default on native targets.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use super::error::HistoryError;
use super::location::Location;

/// Type of navigation operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// Push a new history entry.
	Push,
	/// Replace the current history entry.
	Replace,
}

impl fmt::Display for NavigationType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Push => f.write_str("pushState"),
			Self::Replace => f.write_str("replaceState"),
		}
	}
}

/// Access to the host's session history.
///
/// Reads never mutate; writes may be refused by the host.
pub trait HistoryBackend {
	/// Returns the current pathname.
	fn pathname(&self) -> Result<String, HistoryError>;

	/// Returns the state payload of the current entry.
	fn state(&self) -> Result<Value, HistoryError>;

	/// Pushes a new entry for `url` carrying `state`.
	fn push_state(&self, state: &Value, url: &str) -> Result<(), HistoryError>;

	/// Replaces the current entry with `url` carrying `state`.
	fn replace_state(&self, state: &Value, url: &str) -> Result<(), HistoryError>;
}

#[derive(Debug)]
struct MemoryStack {
	entries: Vec<Location>,
	cursor: usize,
	deny_writes: bool,
	deny_reads: bool,
}

/// In-process session history.
///
/// Clones share the same stack, so a test can keep a handle while the store
/// owns another and drive back/forward traversal from outside. Traversal
/// does not notify anyone: as in a browser, the caller follows it with
/// [`NavigationStore::handle_pop_state`](super::NavigationStore::handle_pop_state).
#[derive(Debug, Clone)]
pub struct MemoryHistory {
	stack: Rc<RefCell<MemoryStack>>,
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl MemoryHistory {
	/// Creates a history with a single entry at `initial_path` and no state.
	pub fn new(initial_path: impl Into<String>) -> Self {
		Self::with_entry(Location::new(initial_path, Value::Null))
	}

	/// Creates a history with a single entry.
	pub fn with_entry(entry: Location) -> Self {
		Self {
			stack: Rc::new(RefCell::new(MemoryStack {
				entries: vec![entry],
				cursor: 0,
				deny_writes: false,
				deny_reads: false,
			})),
		}
	}

	/// Makes every subsequent push/replace fail with
	/// [`HistoryError::SecurityDenied`], as a sandboxed iframe would.
	pub fn deny_writes(&self, deny: bool) {
		self.stack.borrow_mut().deny_writes = deny;
	}

	/// Makes every subsequent read fail with [`HistoryError::SecurityDenied`].
	pub fn deny_reads(&self, deny: bool) {
		self.stack.borrow_mut().deny_reads = deny;
	}

	/// Moves the cursor by `delta` entries. Returns false, leaving the
	/// cursor untouched, when the target is out of range.
	pub fn go(&self, delta: isize) -> bool {
		let mut stack = self.stack.borrow_mut();
		match stack.cursor.checked_add_signed(delta) {
			Some(target) if target < stack.entries.len() => {
				stack.cursor = target;
				true
			}
			_ => false,
		}
	}

	/// Equivalent to `go(-1)`.
	pub fn back(&self) -> bool {
		self.go(-1)
	}

	/// Equivalent to `go(1)`.
	pub fn forward(&self) -> bool {
		self.go(1)
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.stack.borrow().entries.len()
	}

	/// Always false: a history has at least one entry.
	pub fn is_empty(&self) -> bool {
		self.stack.borrow().entries.is_empty()
	}

	/// Returns the cursor position.
	pub fn index(&self) -> usize {
		self.stack.borrow().cursor
	}

	/// Returns a copy of the entry under the cursor.
	pub fn current(&self) -> Location {
		let stack = self.stack.borrow();
		stack.entries[stack.cursor].clone()
	}

	fn check_read(&self) -> Result<(), HistoryError> {
		if self.stack.borrow().deny_reads {
			return Err(HistoryError::SecurityDenied(
				"reading location is not allowed".to_string(),
			));
		}
		Ok(())
	}

	fn write(&self, nav_type: NavigationType, entry: Location) -> Result<(), HistoryError> {
		let mut stack = self.stack.borrow_mut();
		if stack.deny_writes {
			return Err(HistoryError::SecurityDenied(format!(
				"{} is not allowed in this context",
				nav_type
			)));
		}

		match nav_type {
			NavigationType::Push => {
				let keep = stack.cursor + 1;
				stack.entries.truncate(keep);
				stack.entries.push(entry);
				stack.cursor = keep;
			}
			NavigationType::Replace => {
				let cursor = stack.cursor;
				stack.entries[cursor] = entry;
			}
		}
		Ok(())
	}
}

impl HistoryBackend for MemoryHistory {
	fn pathname(&self) -> Result<String, HistoryError> {
		self.check_read()?;
		Ok(self.current().pathname().to_string())
	}

	fn state(&self) -> Result<Value, HistoryError> {
		self.check_read()?;
		Ok(self.current().state().clone())
	}

	fn push_state(&self, state: &Value, url: &str) -> Result<(), HistoryError> {
		self.write(NavigationType::Push, Location::new(url, state.clone()))
	}

	fn replace_state(&self, state: &Value, url: &str) -> Result<(), HistoryError> {
		self.write(NavigationType::Replace, Location::new(url, state.clone()))
	}
}

#[cfg(target_arch = "wasm32")]
pub use self::browser::{BrowserHistory, attach_popstate_listener};

#[cfg(target_arch = "wasm32")]
mod browser {
	use serde_json::Value;
	use wasm_bindgen::JsCast;
	use wasm_bindgen::prelude::*;

	use super::HistoryBackend;
	use crate::router::error::HistoryError;
	use crate::router::store::NavigationStore;

	/// Session history of the current browser window.
	#[derive(Debug, Default, Clone, Copy)]
	pub struct BrowserHistory;

	impl BrowserHistory {
		/// Creates a backend bound to `window.history`.
		pub fn new() -> Self {
			Self
		}

		fn window() -> Result<web_sys::Window, HistoryError> {
			web_sys::window().ok_or(HistoryError::Unavailable)
		}

		fn history() -> Result<web_sys::History, HistoryError> {
			Self::window()?.history().map_err(js_error)
		}
	}

	impl HistoryBackend for BrowserHistory {
		fn pathname(&self) -> Result<String, HistoryError> {
			Self::window()?.location().pathname().map_err(js_error)
		}

		fn state(&self) -> Result<Value, HistoryError> {
			let raw = Self::history()?.state().map_err(js_error)?;
			from_js(&raw)
		}

		fn push_state(&self, state: &Value, url: &str) -> Result<(), HistoryError> {
			Self::history()?
				.push_state_with_url(&to_js(state)?, "", Some(url))
				.map_err(js_error)
		}

		fn replace_state(&self, state: &Value, url: &str) -> Result<(), HistoryError> {
			Self::history()?
				.replace_state_with_url(&to_js(state)?, "", Some(url))
				.map_err(js_error)
		}
	}

	/// Republishes the browser location into `store` on every `popstate`.
	///
	/// The listener lives for the rest of the page. Calling this again for
	/// the same store does not register a second one.
	///
	/// # Errors
	///
	/// Returns [`HistoryError::Unavailable`] when there is no window, or the
	/// host's error if the listener cannot be registered.
	pub fn attach_popstate_listener(store: &NavigationStore) -> Result<(), HistoryError> {
		let window = web_sys::window().ok_or(HistoryError::Unavailable)?;
		if !store.claim_popstate_listener() {
			return Ok(());
		}
		let store = store.clone();
		let owner = store.clone();

		let handler = Closure::wrap(Box::new(move |_event: web_sys::Event| {
			store.handle_pop_state();
		}) as Box<dyn FnMut(_)>);

		if let Err(err) =
			window.add_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref())
		{
			owner.release_popstate_listener();
			return Err(js_error(err));
		}
		// Keep the closure alive for the lifetime of the page
		handler.forget();

		Ok(())
	}

	fn to_js(state: &Value) -> Result<JsValue, HistoryError> {
		if state.is_null() {
			return Ok(JsValue::NULL);
		}
		let json =
			serde_json::to_string(state).map_err(|e| HistoryError::Rejected(e.to_string()))?;
		js_sys::JSON::parse(&json).map_err(js_error)
	}

	fn from_js(raw: &JsValue) -> Result<Value, HistoryError> {
		if raw.is_null() || raw.is_undefined() {
			return Ok(Value::Null);
		}
		let json = js_sys::JSON::stringify(raw)
			.map_err(js_error)?
			.as_string()
			.unwrap_or_default();
		serde_json::from_str(&json).map_err(|e| HistoryError::Rejected(e.to_string()))
	}

	fn js_error(value: JsValue) -> HistoryError {
		if let Some(exception) = value.dyn_ref::<web_sys::DomException>() {
			if exception.name() == "SecurityError" {
				return HistoryError::SecurityDenied(exception.message());
			}
			return HistoryError::Rejected(format!("{}: {}", exception.name(), exception.message()));
		}
		HistoryError::Rejected(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
	}
}
