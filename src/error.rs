//! Error types for widget mounting.
//!
//! Only contract violations are errors: a missing required prop, a missing
//! provider scope, or a missing runtime/base URL when client-side mounting is
//! expected. Soft misses (unknown prefetch key, no captured nodes, no nested
//! placeholder) are ordinary `Option` branches and never surface here.
//! Failures inside the widget runtime itself are out of contract; the runtime
//! is expected to degrade gracefully.

use thiserror::Error;

use crate::dom::DomError;

/// A contract violation detected while rendering or mounting a widget.
///
/// All variants abort the affected component instance; this layer defines no
/// retry. Render-phase variants are raised before any DOM mutation occurs.
#[derive(Debug, Error)]
pub enum WidgetError {
	/// `LiveWidget` was constructed with an empty `name`.
	#[error("mandatory prop 'name' is missing")]
	MissingName,

	/// `PrefetchedWidget` was constructed with an empty `prefetch_key`.
	#[error("mandatory prop 'prefetch_key' was not provided")]
	MissingPrefetchKey,

	/// No [`WidgetContext`](crate::context::WidgetContext) is in scope.
	#[error("{0} must be nested within a widget provider scope")]
	MissingContext(&'static str),

	/// Client-side mounting was attempted without a runtime handle.
	///
	/// This fires only once markup is about to be manipulated, never during
	/// the server render pass (which legitimately has no runtime).
	#[error("widget runtime not configured; provide one to the widget provider on the client side")]
	MissingRuntime,

	/// Client-side mounting was attempted without a base URL on the provider.
	#[error("the widget provider must have a defined base URL to mount this widget")]
	MissingBaseUrl,

	/// The component's render phase did not produce a single root element.
	#[error("the widget root must render to a single element")]
	NotAnElement,

	/// A DOM operation failed while committing the view.
	#[error(transparent)]
	Dom(#[from] DomError),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_missing_name_display() {
		assert_eq!(
			WidgetError::MissingName.to_string(),
			"mandatory prop 'name' is missing"
		);
	}

	#[test]
	fn test_missing_context_names_the_component() {
		let err = WidgetError::MissingContext("LiveWidget");
		assert!(err.to_string().starts_with("LiveWidget"));
	}

	#[test]
	fn test_dom_error_is_transparent() {
		let err = WidgetError::from(DomError::AppendChild);
		assert_eq!(err.to_string(), DomError::AppendChild.to_string());
	}
}
