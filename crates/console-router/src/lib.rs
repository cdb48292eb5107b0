//! console-router - History-API routing for single-page dashboards
//!
//! A small, dependency-light router: a route table resolved by a fixed
//! precedence order, a navigation store kept in sync with the browser's
//! session history, and the link/redirect helpers views use to move around.
//!
//! ## Architecture
//!
//! - [`router::RouteTable`] / [`router::resolve`]: ordered `(pattern, view)`
//!   pairs; the first entry that accepts a path wins
//! - [`router::NavigationStore`]: the single current [`router::Location`],
//!   with subscribe/notify
//! - [`router::HistoryBackend`]: `window.history` on WASM, an in-memory stack
//!   elsewhere
//! - [`router::Link`] / [`router::Navigate`]: click interception and
//!   declarative redirects
//! - [`router::use_params`]: the single `id` path parameter
//! - [`config`]: [`RouterConfig`](config::RouterConfig)
//! - [`logging`]: `debug_log!`, `info_log!`, `warn_log!`, `error_log!`
//!
//! ## Example
//!
//! ```
//! use console_router::router::{
//!     MemoryHistory, NavigateOptions, NavigationStore, RouteTable, use_params,
//! };
//!
//! let store = NavigationStore::init(MemoryHistory::default());
//! let table = RouteTable::new()
//!     .route("/console/settings", "settings")
//!     .route("/console/projects/:id", "project")
//!     .route("*", "home");
//!
//! let _ = store.navigate("/console/projects/42", NavigateOptions::new());
//!
//! assert_eq!(table.resolve(&store.pathname()).view(), Some(&"project"));
//! assert_eq!(use_params(&store).id, "42");
//! ```
//!
//! On WASM, [`router::NavigationStore::mount`] binds the store to the
//! browser window and subscribes it to `popstate`.

#![warn(missing_docs)]

pub mod config;
pub mod logging;
pub mod router;

pub use config::{ConfigError, RouterConfig};
pub use router::{
	Link, Location, NavigateOptions, NavigationOutcome, NavigationStore, Navigate, Params,
	RouteTable, Router, use_location, use_navigate, use_params,
};

// Logging macros are automatically exported via #[macro_export]
// Users can access them as: console_router::warn_log!, etc.

#[doc(hidden)]
pub mod __private {
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
