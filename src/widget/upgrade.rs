//! Nested-placeholder upgrade protocol.
//!
//! A widget's returned markup may itself contain one inert placeholder
//! element (`<oc-component>` without `data-rendered="true"`). This layer's
//! responsibility is detection, dispatch, and post-completion capture. It
//! never inspects or retries the runtime's own rendering.

use crate::context::WidgetContext;
use crate::dom::Element;
use crate::runtime::{PLACEHOLDER_TAG, RENDERED_ATTR, RuntimeHandle};

/// Finds the unrendered placeholder in a mount container, if and only if it
/// is the sole top-level child.
pub fn find_unrendered_placeholder(container: &Element) -> Option<Element> {
	let children = container.child_nodes();
	if children.len() != 1 {
		return None;
	}
	let element = children[0].as_element()?;
	if element.tag_name() != PLACEHOLDER_TAG {
		return None;
	}
	if element.get_attribute(RENDERED_ATTR).as_deref() == Some("true") {
		return None;
	}
	Some(element)
}

/// Hands a placeholder to the runtime's nested-render operation.
///
/// The completion continuation is single-shot. If `capture_as` is given, it
/// snapshots the container's top-level children into the capture store once
/// the runtime finishes, strictly after and never before. No cancellation
/// exists for an in-flight upgrade; if the component unmounted mid-flight
/// the continuation fires into a detached tree, so it re-checks that the
/// placeholder is still parented by this container before capturing.
pub(crate) fn dispatch_upgrade(
	runtime: &RuntimeHandle,
	context: &WidgetContext,
	container: &Element,
	placeholder: &Element,
	capture_as: Option<&str>,
) {
	crate::info_log!("upgrading nested <{}> placeholder", placeholder.tag_name());
	let done: Box<dyn FnOnce()> = {
		let context = context.clone();
		let container = container.clone();
		let placeholder = placeholder.clone();
		let capture_as = capture_as.map(str::to_string);
		Box::new(move || {
			let Some(key) = capture_as else {
				return;
			};
			let still_attached = placeholder
				.as_node()
				.parent_element()
				.is_some_and(|parent| parent.same_element(&container));
			if still_attached {
				context.save_captured(&key, container.child_nodes());
			}
		})
	};
	runtime.render_nested_component(placeholder, done);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::Document;

	fn container_with(html: &str) -> Element {
		let el = Document::get()
			.expect("document")
			.create_element("div")
			.expect("element");
		el.set_inner_html(html);
		el
	}

	#[test]
	fn test_detects_sole_unrendered_placeholder() {
		let container =
			container_with("<oc-component data-rendered=\"false\"></oc-component>");
		let placeholder = find_unrendered_placeholder(&container).expect("placeholder");
		assert_eq!(placeholder.tag_name(), "oc-component");
	}

	#[test]
	fn test_missing_marker_attribute_counts_as_unrendered() {
		let container =
			container_with("<oc-component src=\"http://localhost/w\"></oc-component>");
		assert!(find_unrendered_placeholder(&container).is_some());
	}

	#[test]
	fn test_rendered_placeholder_is_ignored() {
		let container =
			container_with("<oc-component data-rendered=\"true\"></oc-component>");
		assert!(find_unrendered_placeholder(&container).is_none());
	}

	#[test]
	fn test_other_tags_are_ignored() {
		let container = container_with("<div></div>");
		assert!(find_unrendered_placeholder(&container).is_none());
	}

	#[test]
	fn test_multiple_children_are_ignored() {
		let container = container_with(
			"<oc-component></oc-component><oc-component></oc-component>",
		);
		assert!(find_unrendered_placeholder(&container).is_none());
	}

	#[test]
	fn test_empty_container() {
		let container = container_with("");
		assert!(find_unrendered_placeholder(&container).is_none());
	}
}
