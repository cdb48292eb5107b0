//! Browser History WASM Tests
//!
//! Exercise `BrowserHistory` and the navigation store against a real
//! `window.history`.
//!
//! **Run with**: `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use console_router::RouterConfig;
use console_router::router::{
	BrowserHistory, HistoryBackend, NavigateOptions, NavigationStore, RouteTable,
	attach_popstate_listener, use_params,
};
use std::cell::Cell;
use std::rc::Rc;
use serde_json::json;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_browser_history_reads_pathname() {
	let pathname = BrowserHistory::new().pathname().unwrap();
	assert!(pathname.starts_with('/'));
}

#[wasm_bindgen_test]
fn test_navigate_updates_address_bar() {
	let history = BrowserHistory::new();
	let store = NavigationStore::init(history);

	let outcome = store.navigate(
		"/console/projects/42",
		NavigateOptions::new().state(json!({"from": "wizard"})),
	);

	assert!(outcome.is_synced());
	assert_eq!(history.pathname().unwrap(), "/console/projects/42");
	assert_eq!(history.state().unwrap(), json!({"from": "wizard"}));
	assert_eq!(use_params(&store).id, "42");
}

#[wasm_bindgen_test]
fn test_pop_state_rereads_window() {
	let history = BrowserHistory::new();
	let store = NavigationStore::init(history);

	let _ = store.push("/console");
	// Change the entry behind the store's back, as traversal would.
	history
		.replace_state(&json!("external"), "/console/settings")
		.unwrap();
	store.handle_pop_state();

	assert_eq!(store.pathname(), "/console/settings");
	assert_eq!(store.location().state(), &json!("external"));
}

#[wasm_bindgen_test]
fn test_mount_seeds_from_window() {
	let _ = BrowserHistory::new().replace_state(&json!(null), "/console/settings");
	let store = NavigationStore::mount(RouterConfig::default());
	let table = RouteTable::new()
		.route("/console/settings", "settings")
		.route("*", "fallback");

	assert_eq!(table.resolve(&store.pathname()).view(), Some(&"settings"));
}

#[wasm_bindgen_test]
fn test_popstate_listener_attached_once_per_store() {
	let history = BrowserHistory::new();
	let store = NavigationStore::init(history);
	attach_popstate_listener(&store).unwrap();
	attach_popstate_listener(&store).unwrap();

	let calls = Rc::new(Cell::new(0));
	let _subscription = {
		let calls = Rc::clone(&calls);
		store.subscribe(move |_| calls.set(calls.get() + 1))
	};
	let event = web_sys::Event::new("popstate").unwrap();
	web_sys::window().unwrap().dispatch_event(&event).unwrap();

	assert_eq!(calls.get(), 1);
}
