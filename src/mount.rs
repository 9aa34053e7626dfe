//! Component lifecycle driver.
//!
//! Mounting is two-phase: the pure render phase produces a [`View`], the
//! commit phase writes it to the DOM, and the post-commit hook runs with the
//! attached container. Re-renders go through [`MountedWidget::update`], which
//! compares the markup a component *declares* across renders rather than the
//! live DOM: the runtime and nested upgrades mutate the committed tree
//! out-of-band, and a re-render that declares the same string must leave
//! those mutations alone.

use crate::dom::{Document, Element};
use crate::error::WidgetError;
use crate::view::{ElementView, View};

/// A component with a post-commit lifecycle hook.
///
/// `render` must be pure with respect to the DOM; all DOM work belongs in
/// `did_mount`, which runs exactly once per mount with the committed
/// container element.
pub trait WidgetComponent {
	/// Produces the component's view. Must render to a single root element.
	fn render(&mut self) -> Result<View, WidgetError>;

	/// Runs after the view has been committed and attached.
	fn did_mount(&mut self, container: &Element) -> Result<(), WidgetError>;
}

fn root_element_view(view: &View) -> Result<&ElementView, WidgetError> {
	match view {
		View::Element(el) => Ok(el),
		_ => Err(WidgetError::NotAnElement),
	}
}

fn apply_attrs(root: &ElementView, container: &Element) -> Result<(), WidgetError> {
	for (name, value) in root.attrs() {
		container.set_attribute(name, value)?;
	}
	Ok(())
}

/// Renders a component, commits its container under `parent`, and runs the
/// post-commit hook.
pub fn mount_widget<C: WidgetComponent>(
	mut component: C,
	parent: &Element,
) -> Result<MountedWidget<C>, WidgetError> {
	let view = component.render()?;
	let root = root_element_view(&view)?;
	let doc = Document::get()?;
	let container = root.create(&doc)?;
	parent.append_child(&container.as_node())?;
	let last_markup = root.raw_html().map(str::to_string);
	component.did_mount(&container)?;
	Ok(MountedWidget {
		component,
		container,
		last_markup,
	})
}

/// Adopts a server-rendered container instead of creating a fresh one.
///
/// The declared markup is compared against the container's existing content.
/// On mismatch the declared markup wins and a warning is logged, unless the
/// root opts out via
/// [`suppress_hydration_warning`](ElementView::suppress_hydration_warning),
/// in which case the server-rendered content is kept as-is.
pub fn hydrate_widget<C: WidgetComponent>(
	mut component: C,
	container: &Element,
) -> Result<MountedWidget<C>, WidgetError> {
	let view = component.render()?;
	let root = root_element_view(&view)?;
	apply_attrs(root, container)?;

	let declared = root.raw_html().unwrap_or_default();
	if container.inner_html() != declared && !root.suppresses_hydration_warning() {
		crate::warn_log!(
			"hydration mismatch on <{}>; replacing server content",
			root.tag_name()
		);
		container.set_inner_html(declared);
	}

	let last_markup = root.raw_html().map(str::to_string);
	component.did_mount(container)?;
	Ok(MountedWidget {
		component,
		container: container.clone(),
		last_markup,
	})
}

/// A mounted component plus the state needed to drive re-renders.
#[derive(Debug)]
pub struct MountedWidget<C: WidgetComponent> {
	component: C,
	container: Element,
	last_markup: Option<String>,
}

impl<C: WidgetComponent> MountedWidget<C> {
	/// The committed container element.
	pub fn container(&self) -> &Element {
		&self.container
	}

	/// The mounted component.
	pub fn component(&self) -> &C {
		&self.component
	}

	/// Mutable access to the mounted component, for prop changes between
	/// updates.
	pub fn component_mut(&mut self) -> &mut C {
		&mut self.component
	}

	/// Re-renders the component into the existing container.
	///
	/// When the newly declared raw markup equals the previously declared one
	/// the container's children are left untouched, even if the runtime has
	/// since rewritten them. The post-commit hook does not run again.
	pub fn update(&mut self) -> Result<(), WidgetError> {
		let view = self.component.render()?;
		let root = root_element_view(&view)?;
		apply_attrs(root, &self.container)?;

		let declared = root.raw_html().map(str::to_string);
		if declared == self.last_markup {
			return Ok(());
		}
		match &declared {
			Some(markup) => self.container.set_inner_html(markup),
			None => {
				self.container.clear_children();
				let doc = Document::get()?;
				root.commit_children(&self.container, &doc)?;
			}
		}
		self.last_markup = declared;
		Ok(())
	}
}
