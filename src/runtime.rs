//! Widget runtime collaborator seam.
//!
//! The runtime is the external client library that turns widget descriptors
//! into markup and upgrades inert placeholder elements in place. This crate
//! only consumes its interface: a synchronous `build` returning a markup
//! string, and an asynchronous, callback-based `render_nested_component`.
//! Runtime failures are out of this crate's contract; the runtime is
//! expected to degrade gracefully (e.g. return partial markup).

use std::rc::Rc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::dom::Element;

/// Tag of the inert placeholder element a widget's markup may contain.
pub const PLACEHOLDER_TAG: &str = "oc-component";

/// Marker attribute the runtime flips to `"true"` once it has rendered a
/// placeholder. This layer only ever reads it.
pub const RENDERED_ATTR: &str = "data-rendered";

/// Descriptor passed to the runtime's `build` operation.
///
/// Serializes to the camelCase shape the client runtime consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
	/// Base URL of the widget registry.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub base_url: Option<String>,
	/// Widget name.
	pub name: String,
	/// Requested widget version, if pinned.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
	/// Language tag forwarded to the widget.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub lang: Option<String>,
	/// Widget parameters.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub parameters: Option<Map<String, Value>>,
}

/// The widget runtime interface consumed by this crate.
pub trait WidgetRuntime {
	/// Synthesizes markup for a widget descriptor. Synchronous: the string is
	/// returned immediately, never deferred.
	fn build(&self, request: &BuildRequest) -> String;

	/// Asynchronously upgrades one placeholder element in place. `done` fires
	/// once the runtime has finished; the runtime itself flips
	/// [`RENDERED_ATTR`], never this layer.
	fn render_nested_component(&self, element: &Element, done: Box<dyn FnOnce()>);
}

/// Shared handle to the widget runtime. Execution is single-threaded and
/// cooperative, so a plain `Rc` suffices.
pub type RuntimeHandle = Rc<dyn WidgetRuntime>;

#[cfg(target_arch = "wasm32")]
pub use oc_client::OcClientRuntime;

#[cfg(target_arch = "wasm32")]
mod oc_client {
	use js_sys::{Function, Reflect};
	use wasm_bindgen::closure::Closure;
	use wasm_bindgen::{JsCast, JsValue};

	use super::{BuildRequest, WidgetRuntime};
	use crate::dom::Element;

	/// Binding to the global `oc` client object the host page loads from the
	/// widget registry.
	pub struct OcClientRuntime {
		oc: JsValue,
	}

	impl OcClientRuntime {
		/// Looks up the global `oc` object, returning `None` when the client
		/// script has not been loaded.
		pub fn from_window() -> Option<Self> {
			let window = web_sys::window()?;
			let oc: JsValue = window.get("oc")?.into();
			if oc.is_undefined() || oc.is_null() {
				return None;
			}
			Some(Self { oc })
		}

		fn method(&self, name: &str) -> Option<Function> {
			Reflect::get(&self.oc, &JsValue::from_str(name))
				.ok()
				.and_then(|value| value.dyn_into::<Function>().ok())
		}
	}

	impl WidgetRuntime for OcClientRuntime {
		fn build(&self, request: &BuildRequest) -> String {
			let Some(build) = self.method("build") else {
				crate::error_log!("oc client has no build() method");
				return String::new();
			};
			let json = match serde_json::to_string(request) {
				Ok(json) => json,
				Err(err) => {
					crate::error_log!("failed to serialize build request: {}", err);
					return String::new();
				}
			};
			let Ok(options) = js_sys::JSON::parse(&json) else {
				return String::new();
			};
			build
				.call1(&self.oc, &options)
				.ok()
				.and_then(|value| value.as_string())
				.unwrap_or_default()
		}

		fn render_nested_component(&self, element: &Element, done: Box<dyn FnOnce()>) {
			let Some(render) = self.method("renderNestedComponent") else {
				crate::error_log!("oc client has no renderNestedComponent() method");
				return;
			};
			// Hand the element through the runtime's own DOM wrapper when
			// available, as its API expects.
			let target: JsValue = match self.method("$") {
				Some(dollar) => dollar
					.call1(&self.oc, element.inner())
					.unwrap_or_else(|_| element.inner().clone().into()),
				None => element.inner().clone().into(),
			};
			let callback = Closure::once_into_js(done);
			if render.call2(&self.oc, &target, &callback).is_err() {
				crate::error_log!("renderNestedComponent() threw");
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_build_request_serializes_camel_case() {
		let mut parameters = Map::new();
		parameters.insert("hello".to_string(), json!("world"));
		let request = BuildRequest {
			base_url: Some("http://localhost/".to_string()),
			name: "my-widget".to_string(),
			version: Some("1.X.X".to_string()),
			lang: Some("en-GB".to_string()),
			parameters: Some(parameters),
		};

		let value = serde_json::to_value(&request).expect("serialize");
		assert_eq!(
			value,
			json!({
				"baseUrl": "http://localhost/",
				"name": "my-widget",
				"version": "1.X.X",
				"lang": "en-GB",
				"parameters": {"hello": "world"},
			})
		);
	}

	#[test]
	fn test_build_request_omits_absent_fields() {
		let request = BuildRequest {
			name: "my-widget".to_string(),
			..BuildRequest::default()
		};
		let value = serde_json::to_value(&request).expect("serialize");
		assert_eq!(value, json!({"name": "my-widget"}));
	}
}
