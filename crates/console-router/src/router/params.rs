//! Path parameter extraction.
//!
//! Exactly one dynamic segment is supported and it is always reported as
//! `id`: the last segment of the current pathname. Routes such as
//! `/console/projects/:id` rely on the parameter being the final segment.

use std::any::type_name;
use std::fmt::Display;
use std::str::FromStr;

use super::error::PathError;
use super::store::NavigationStore;

/// The parameter derived from the current location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
	/// Last segment of the pathname, possibly empty.
	pub id: String,
}

impl Params {
	/// Derives the parameter from `pathname`.
	pub fn from_pathname(pathname: &str) -> Self {
		Self {
			id: extract_id(pathname),
		}
	}

	/// Returns the raw `id`.
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Parses `id` into `T`.
	///
	/// # Errors
	///
	/// Returns [`PathError::Missing`] when `id` is empty and
	/// [`PathError::ParseError`] when `T::from_str` fails.
	///
	/// # Example
	///
	/// ```
	/// use console_router::router::Params;
	///
	/// let params = Params::from_pathname("/console/projects/42");
	/// assert_eq!(params.parse::<u32>().unwrap(), 42);
	/// ```
	pub fn parse<T>(&self) -> Result<T, PathError>
	where
		T: FromStr,
		T::Err: Display,
	{
		if self.id.is_empty() {
			return Err(PathError::Missing);
		}

		self.id.parse::<T>().map_err(|e| PathError::ParseError {
			param_type: type_name::<T>(),
			raw_value: self.id.clone(),
			reason: e.to_string(),
		})
	}
}

/// Returns the last segment of `pathname`.
///
/// Everything from the first `?` is dropped, then one trailing `/` unless
/// the path is exactly `/`. Never fails; the result may be empty.
pub fn extract_id(pathname: &str) -> String {
	let path = match pathname.split_once('?') {
		Some((path, _query)) => path,
		None => pathname,
	};

	let path = if path == "/" {
		path
	} else {
		path.strip_suffix('/').unwrap_or(path)
	};

	path.rsplit('/').next().unwrap_or_default().to_string()
}

/// Reads the parameter of the current location.
pub fn use_params(store: &NavigationStore) -> Params {
	Params::from_pathname(&store.pathname())
}
