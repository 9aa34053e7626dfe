//! Prefetched widget component.

use crate::context::{WidgetContext, use_widget_context};
use crate::dom::Element;
use crate::error::WidgetError;
use crate::mount::WidgetComponent;
use crate::view::{ElementView, IntoView, View};

use super::upgrade::{dispatch_upgrade, find_unrendered_placeholder};

/// A widget whose markup was computed ahead of time by a server-side
/// prefetch step and supplied to the provider under a logical key.
///
/// Unlike [`LiveWidget`](super::LiveWidget), this component has no synthesis
/// capability: a missing key renders the fallback (or nothing), and that is
/// terminal for the mount. The fallback branch legitimately differs between
/// server and client passes, so hydration-mismatch warnings are suppressed.
pub struct PrefetchedWidget {
	prefetch_key: String,
	fallback: Option<String>,
	id: Option<String>,
	class_name: Option<String>,
	capture_as: Option<String>,

	// Render-phase state carried into the post-commit hook.
	context: Option<WidgetContext>,
	captured: Option<Vec<crate::dom::Node>>,
	last_markup: Option<String>,
	mounted: bool,
}

impl PrefetchedWidget {
	/// Creates a widget bound to a prefetch key.
	pub fn new(prefetch_key: impl Into<String>) -> Self {
		Self {
			prefetch_key: prefetch_key.into(),
			fallback: None,
			id: None,
			class_name: None,
			capture_as: None,
			context: None,
			captured: None,
			last_markup: None,
			mounted: false,
		}
	}

	/// Markup rendered when the prefetch key is not found.
	pub fn fallback(mut self, markup: impl Into<String>) -> Self {
		self.fallback = Some(markup.into());
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

impl WidgetComponent for PrefetchedWidget {
	fn render(&mut self) -> Result<View, WidgetError> {
		if self.prefetch_key.is_empty() {
			return Err(WidgetError::MissingPrefetchKey);
		}
		let Some(context) = use_widget_context() else {
			return Err(WidgetError::MissingContext("PrefetchedWidget"));
		};
		self.captured = match (&self.capture_as, self.mounted) {
			(Some(key), false) => context.captured(key),
			_ => None,
		};

		let markup = if self.captured.is_some() {
			String::new()
		} else if self.mounted {
			// Re-render of a mounted instance with an unchanged key: the
			// lookup is pure, so re-declare the committed markup untouched.
			self.last_markup.clone().unwrap_or_default()
		} else {
			context
				.markup_for(&self.prefetch_key)
				.or_else(|| self.fallback.clone())
				.unwrap_or_default()
		};

		self.context = Some(context);
		self.last_markup = Some(markup.clone());
		Ok(self.container_view(markup))
	}

	fn did_mount(&mut self, container: &Element) -> Result<(), WidgetError> {
		let Some(context) = self.context.clone() else {
			return Err(WidgetError::MissingContext("PrefetchedWidget"));
		};

		if let Some(nodes) = self.captured.take() {
			container.clear_children();
			for node in &nodes {
				container.append_child(node)?;
			}
			self.mounted = true;
			return Ok(());
		}

		// Capture the committed children right away; a pending upgrade
		// re-saves afterwards and supersedes this snapshot.
		if let Some(key) = &self.capture_as {
			context.save_captured(key, container.child_nodes());
		}

		if let Some(placeholder) = find_unrendered_placeholder(container) {
			match context.runtime() {
				Some(runtime) => dispatch_upgrade(
					runtime,
					&context,
					container,
					&placeholder,
					self.capture_as.as_deref(),
				),
				None => crate::warn_log!(
					"unrendered <{}> placeholder found but no widget runtime is configured",
					placeholder.tag_name()
				),
			}
		}
		self.mounted = true;
		Ok(())
	}
}
