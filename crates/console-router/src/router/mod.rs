//! Client-side routing.
//!
//! - [`pattern`]: route pattern grammar
//! - [`matcher`]: route tables and ordered resolution
//! - [`history`]: session history backends
//! - [`store`]: the shared location and navigation
//! - [`params`]: the `id` path parameter
//! - [`components`]: `Link`, `Navigate`, `RequireAuth`
//! - [`core`](mod@core): `Router`, a table bound to a store

pub mod components;
pub mod core;
pub mod error;
pub mod history;
pub mod location;
pub mod matcher;
pub mod params;
pub mod pattern;
pub mod store;

pub use self::components::{
	ClickEvent, Gate, Link, LinkOutcome, Modifiers, Navigate, RequireAuth,
};
pub use self::core::{Fallback, Router};
pub use self::error::{HistoryError, PathError};
#[cfg(target_arch = "wasm32")]
pub use self::history::{BrowserHistory, attach_popstate_listener};
pub use self::history::{HistoryBackend, MemoryHistory, NavigationType};
pub use self::location::Location;
pub use self::matcher::{Resolution, RouteEntry, RouteTable, resolve};
pub use self::params::{Params, extract_id, use_params};
pub use self::pattern::{MatchKind, RoutePattern};
pub use self::store::{
	NavigateOptions, NavigationOutcome, NavigationStore, Subscription, use_location, use_navigate,
};
