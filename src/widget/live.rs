//! Live-fetch widget component.

use serde_json::{Map, Value};

use crate::context::{WidgetContext, use_widget_context};
use crate::dom::Element;
use crate::error::WidgetError;
use crate::mount::WidgetComponent;
use crate::runtime::BuildRequest;
use crate::view::{ElementView, IntoView, View};

use super::upgrade::{dispatch_upgrade, find_unrendered_placeholder};

/// A widget whose markup is synthesized on demand by the client runtime.
///
/// During the server pass no runtime exists, so the render phase produces an
/// empty container and the post-commit hook synthesizes markup once the
/// client mounts over it. With a runtime present at render time the markup
/// is built synchronously and injected as trusted content.
///
/// # Example
///
/// ```ignore
/// use oc_embed::{LiveWidget, mount_widget};
///
/// let widget = LiveWidget::new("header")
///     .version("1.X.X")
///     .lang("en-US")
///     .capture_as("header");
/// let mounted = mount_widget(widget, &body)?;
/// ```
#[derive(Debug)]
pub struct LiveWidget {
	name: String,
	version: Option<String>,
	parameters: Option<Map<String, Value>>,
	lang: Option<String>,
	id: Option<String>,
	class_name: Option<String>,
	capture_as: Option<String>,

	// Render-phase state carried into the post-commit hook.
	context: Option<WidgetContext>,
	captured: Option<Vec<crate::dom::Node>>,
	resolved_lang: Option<String>,
	last_markup: Option<String>,
	mounted: bool,
}

impl LiveWidget {
	/// Creates a widget descriptor for the named widget.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			version: None,
			parameters: None,
			lang: None,
			id: None,
			class_name: None,
			capture_as: None,
			context: None,
			captured: None,
			resolved_lang: None,
			last_markup: None,
			mounted: false,
		}
	}

	/// Pins the widget version.
	pub fn version(mut self, version: impl Into<String>) -> Self {
		self.version = Some(version.into());
		self
	}

	/// Sets the widget parameters.
	pub fn parameters(mut self, parameters: Map<String, Value>) -> Self {
		self.parameters = Some(parameters);
		self
	}

	/// Overrides the provider-level language tag for this widget.
	pub fn lang(mut self, lang: impl Into<String>) -> Self {
		self.lang = Some(lang.into());
		self
	}

	/// Sets the container element id.
	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	/// Sets the container element class.
	pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
		self.class_name = Some(class_name.into());
		self
	}

	/// Names a capture key: once mounted, the container's children are
	/// stored under this key and replayed identically on remounts.
	pub fn capture_as(mut self, key: impl Into<String>) -> Self {
		self.capture_as = Some(key.into());
		self
	}

	fn build_request(&self, base_url: Option<&str>) -> BuildRequest {
		BuildRequest {
			base_url: base_url.map(str::to_string),
			name: self.name.clone(),
			version: self.version.clone(),
			lang: self.resolved_lang.clone(),
			parameters: self.parameters.clone(),
		}
	}

	fn container_view(&self, markup: String) -> View {
		let mut root = ElementView::new("div")
			.raw_inner_html(markup)
			.suppress_hydration_warning();
		if let Some(id) = &self.id {
			root = root.attr("id", id.clone());
		}
		if let Some(class_name) = &self.class_name {
			root = root.attr("class", class_name.clone());
		}
		root.into_view()
	}
}

impl WidgetComponent for LiveWidget {
	fn render(&mut self) -> Result<View, WidgetError> {
		if self.name.is_empty() {
			return Err(WidgetError::MissingName);
		}
		let Some(context) = use_widget_context() else {
			return Err(WidgetError::MissingContext("LiveWidget"));
		};
		self.resolved_lang = self
			.lang
			.clone()
			.or_else(|| context.lang().map(str::to_string));
		self.captured = match (&self.capture_as, self.mounted) {
			(Some(key), false) => context.captured(key),
			_ => None,
		};

		let markup = if self.captured.is_some() {
			// The post-commit hook replays the captured nodes; rendering
			// nothing keeps the declarative pass away from them.
			String::new()
		} else if self.mounted {
			// Already mounted: re-declare the committed markup so the host's
			// diffing never clobbers DOM the runtime mutated out-of-band.
			self.last_markup.clone().unwrap_or_default()
		} else if let Some(runtime) = context.runtime() {
			runtime.build(&self.build_request(context.base_url()))
		} else {
			// Server pass: no client runtime exists yet.
			String::new()
		};

		self.context = Some(context);
		self.last_markup = Some(markup.clone());
		Ok(self.container_view(markup))
	}

	fn did_mount(&mut self, container: &Element) -> Result<(), WidgetError> {
		let Some(context) = self.context.clone() else {
			return Err(WidgetError::MissingContext("LiveWidget"));
		};
		let Some(runtime) = context.runtime().cloned() else {
			return Err(WidgetError::MissingRuntime);
		};
		let Some(base_url) = context.base_url().map(str::to_string) else {
			return Err(WidgetError::MissingBaseUrl);
		};

		if let Some(nodes) = self.captured.take() {
			// Replay: re-parent the identical node objects, preserving order
			// and whatever state the widget accumulated on them.
			container.clear_children();
			for node in &nodes {
				container.append_child(node)?;
			}
			self.mounted = true;
			return Ok(());
		}

		if container.child_nodes().is_empty() {
			// The render phase ran without a runtime (hydration over a
			// server-rendered empty container). The host has already
			// committed the empty container and will not re-diff it, so
			// assign the markup directly.
			let markup = runtime.build(&self.build_request(Some(&base_url)));
			container.set_inner_html(&markup);
			self.last_markup = Some(markup);
		}

		match find_unrendered_placeholder(container) {
			Some(placeholder) => dispatch_upgrade(
				&runtime,
				&context,
				container,
				&placeholder,
				self.capture_as.as_deref(),
			),
			None => {
				if let Some(key) = &self.capture_as {
					context.save_captured(key, container.child_nodes());
				}
			}
		}
		self.mounted = true;
		Ok(())
	}
}
