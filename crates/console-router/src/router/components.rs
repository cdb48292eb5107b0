//! Navigation components.
//!
//! [`Link`] intercepts clicks on in-app anchors, [`Navigate`] performs a
//! declarative redirect, and [`RequireAuth`] is the single authentication
//! gate in front of protected views.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use super::store::{NavigateOptions, NavigationOutcome, NavigationStore};

/// Modifier keys held during a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
	/// Meta (Command on macOS).
	pub meta: bool,
	/// Control.
	pub ctrl: bool,
	/// Shift.
	pub shift: bool,
	/// Alt (Option on macOS).
	pub alt: bool,
}

impl Modifiers {
	/// Returns true if any modifier is held.
	pub fn any(&self) -> bool {
		self.meta || self.ctrl || self.shift || self.alt
	}
}

/// The parts of a click event a [`Link`] needs.
pub trait ClickEvent {
	/// Returns the modifier keys held during the click.
	fn modifiers(&self) -> Modifiers;

	/// Cancels the browser's default anchor navigation.
	fn prevent_default(&self);

	/// Keeps outer click handlers from seeing the event.
	fn stop_propagation(&self);
}

#[cfg(target_arch = "wasm32")]
impl ClickEvent for web_sys::MouseEvent {
	fn modifiers(&self) -> Modifiers {
		Modifiers {
			meta: self.meta_key(),
			ctrl: self.ctrl_key(),
			shift: self.shift_key(),
			alt: self.alt_key(),
		}
	}

	fn prevent_default(&self) {
		web_sys::Event::prevent_default(self);
	}

	fn stop_propagation(&self) {
		web_sys::Event::stop_propagation(self);
	}
}

/// What a [`Link`] did with a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
	/// The target leaves the application; the browser handles the click.
	External,
	/// A modifier key was held; the browser opens a new tab or window.
	Modified,
	/// The click was intercepted and the store navigated.
	Navigated(NavigationOutcome),
}

type ClickCallback = Rc<dyn Fn()>;

/// An anchor that navigates through the store instead of reloading the page.
///
/// # Example
///
/// ```ignore
/// use console_router::router::Link;
///
/// let link = Link::new("/console/projects/42").on_click(close_menu);
/// anchor.set_href(link.to());
/// // in the anchor's click listener:
/// link.handle_click(&store, &mouse_event);
/// ```
#[derive(Clone)]
pub struct Link {
	/// The destination path.
	to: String,
	/// Whether to replace the current history entry.
	replace: bool,
	/// Payload attached to the destination.
	state: Value,
	/// Caller hook, run before navigating.
	on_click: Option<ClickCallback>,
}

impl fmt::Debug for Link {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Link")
			.field("to", &self.to)
			.field("replace", &self.replace)
			.field("state", &self.state)
			.field("has_on_click", &self.on_click.is_some())
			.finish()
	}
}

impl Link {
	/// Creates a new link.
	pub fn new(to: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			replace: false,
			state: Value::Null,
			on_click: None,
		}
	}

	/// Sets whether to replace the current history entry.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Attaches a state payload to the destination.
	pub fn state(mut self, state: impl Into<Value>) -> Self {
		self.state = state.into();
		self
	}

	/// Sets a hook run on intercepted clicks, before navigation.
	pub fn on_click<F>(mut self, on_click: F) -> Self
	where
		F: Fn() + 'static,
	{
		self.on_click = Some(Rc::new(on_click));
		self
	}

	/// Returns the destination path, suitable for the `href` attribute.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Returns whether this is a replace navigation.
	pub fn is_replace(&self) -> bool {
		self.replace
	}

	/// Handles a click on the anchor.
	///
	/// External targets and modified clicks are left alone so the browser
	/// can follow or open them. Any other click has its default action and
	/// propagation cancelled, runs the `on_click` hook, then navigates.
	pub fn handle_click<E>(&self, store: &NavigationStore, event: &E) -> LinkOutcome
	where
		E: ClickEvent + ?Sized,
	{
		if store.config().is_external(&self.to) {
			return LinkOutcome::External;
		}

		if event.modifiers().any() {
			return LinkOutcome::Modified;
		}

		event.prevent_default();
		event.stop_propagation();

		if let Some(on_click) = &self.on_click {
			on_click();
		}

		LinkOutcome::Navigated(store.navigate(
			&self.to,
			NavigateOptions::new()
				.replace(self.replace)
				.state(self.state.clone()),
		))
	}
}

/// A declarative redirect.
///
/// Navigates when mounted and again whenever its target changes.
#[derive(Debug, Clone)]
pub struct Navigate {
	/// The destination path.
	to: String,
	/// Whether to replace the current history entry.
	replace: bool,
	/// Payload attached to the destination.
	state: Value,
	/// Target of the last navigation performed.
	applied: Option<String>,
}

impl Navigate {
	/// Creates a redirect to `to` that pushes a new entry.
	pub fn new(to: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			replace: false,
			state: Value::Null,
			applied: None,
		}
	}

	/// Sets whether to replace the current history entry.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Attaches a state payload to the destination.
	pub fn state(mut self, state: impl Into<Value>) -> Self {
		self.state = state.into();
		self
	}

	/// Returns the destination path.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Returns whether this is a replace navigation.
	pub fn is_replace(&self) -> bool {
		self.replace
	}

	/// Performs the redirect.
	pub fn mount(&mut self, store: &NavigationStore) -> NavigationOutcome {
		self.applied = Some(self.to.clone());
		store.navigate(
			&self.to,
			NavigateOptions::new()
				.replace(self.replace)
				.state(self.state.clone()),
		)
	}

	/// Points the redirect at `to`, navigating again only if the target
	/// differs from the one last applied.
	pub fn update(
		&mut self,
		store: &NavigationStore,
		to: impl Into<String>,
	) -> Option<NavigationOutcome> {
		self.to = to.into();
		if self.applied.as_deref() == Some(self.to.as_str()) {
			return None;
		}
		Some(self.mount(store))
	}
}

/// Result of [`RequireAuth::gate`].
#[derive(Debug, Clone)]
pub enum Gate<V> {
	/// The check passed; render the view.
	Allow(V),
	/// The check failed; mount this redirect instead.
	Redirect(Navigate),
}

/// The authentication check in front of protected views.
///
/// The check itself lives outside the router; this only turns its answer
/// into a redirect that replaces the current entry.
pub struct RequireAuth<F> {
	check: F,
	login_path: String,
}

impl<F> fmt::Debug for RequireAuth<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RequireAuth")
			.field("login_path", &self.login_path)
			.finish()
	}
}

impl<F> RequireAuth<F>
where
	F: Fn() -> bool,
{
	/// Creates a gate redirecting to `login_path` when `check` returns false.
	pub fn new(login_path: impl Into<String>, check: F) -> Self {
		Self {
			check,
			login_path: login_path.into(),
		}
	}

	/// Returns the login path.
	pub fn login_path(&self) -> &str {
		&self.login_path
	}

	/// Runs the check.
	pub fn gate<V>(&self, view: V) -> Gate<V> {
		if (self.check)() {
			Gate::Allow(view)
		} else {
			Gate::Redirect(Navigate::new(self.login_path.clone()).replace(true))
		}
	}
}
