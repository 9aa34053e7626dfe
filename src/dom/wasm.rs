//! Browser DOM bindings (thin wrappers over `web_sys`).

use wasm_bindgen::JsCast;

use super::DomError;

/// Handle to the browser document.
#[derive(Clone)]
pub struct Document {
	inner: web_sys::Document,
}

impl Document {
	/// Returns the window's document.
	pub fn get() -> Result<Document, DomError> {
		let inner = web_sys::window()
			.and_then(|window| window.document())
			.ok_or(DomError::NoDocument)?;
		Ok(Document { inner })
	}

	/// Creates a detached element.
	pub fn create_element(&self, tag: &str) -> Result<Element, DomError> {
		self.inner
			.create_element(tag)
			.map(|inner| Element { inner })
			.map_err(|_| DomError::CreateElement(tag.to_string()))
	}

	/// Creates a detached text node.
	pub fn create_text_node(&self, text: &str) -> Node {
		Node {
			inner: self.inner.create_text_node(text).into(),
		}
	}
}

/// A DOM node reference (element or text).
#[derive(Clone)]
pub struct Node {
	inner: web_sys::Node,
}

/// A DOM element reference.
#[derive(Clone)]
pub struct Element {
	inner: web_sys::Element,
}

impl Node {
	/// Downcasts to an element reference, if this node is an element.
	pub fn as_element(&self) -> Option<Element> {
		self.inner
			.dyn_ref::<web_sys::Element>()
			.map(|inner| Element { inner: inner.clone() })
	}

	/// Reference identity: true iff both refer to the same DOM node.
	pub fn same_node(&self, other: &Node) -> bool {
		self.inner.is_same_node(Some(&other.inner))
	}

	/// The element currently holding this node as a child, if any.
	pub fn parent_element(&self) -> Option<Element> {
		self.inner.parent_element().map(|inner| Element { inner })
	}

	/// Concatenated text of this node and its descendants.
	pub fn text_content(&self) -> String {
		self.inner.text_content().unwrap_or_default()
	}

	/// The wrapped `web_sys` node.
	pub fn inner(&self) -> &web_sys::Node {
		&self.inner
	}
}

impl Element {
	/// The lowercase tag name.
	pub fn tag_name(&self) -> String {
		self.inner.tag_name().to_ascii_lowercase()
	}

	/// Returns the attribute value, if set.
	pub fn get_attribute(&self, name: &str) -> Option<String> {
		self.inner.get_attribute(name)
	}

	/// Sets (or overwrites) an attribute.
	pub fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
		self.inner
			.set_attribute(name, value)
			.map_err(|_| DomError::SetAttribute(name.to_string()))
	}

	/// The current top-level child nodes, in order.
	pub fn child_nodes(&self) -> Vec<Node> {
		let list = self.inner.child_nodes();
		(0..list.length())
			.filter_map(|i| list.get(i))
			.map(|inner| Node { inner })
			.collect()
	}

	/// Appends a node; the browser re-parents it away from any previous
	/// parent automatically.
	pub fn append_child(&self, node: &Node) -> Result<(), DomError> {
		self.inner
			.append_child(&node.inner)
			.map(|_| ())
			.map_err(|_| DomError::AppendChild)
	}

	/// Removes all children.
	pub fn clear_children(&self) {
		self.inner.set_inner_html("");
	}

	/// The serialized child markup.
	pub fn inner_html(&self) -> String {
		self.inner.inner_html()
	}

	/// Replaces the children with the parsed markup fragment.
	pub fn set_inner_html(&self, html: &str) {
		self.inner.set_inner_html(html);
	}

	/// Reference identity for elements.
	pub fn same_element(&self, other: &Element) -> bool {
		let other_node: &web_sys::Node = other.inner.as_ref();
		self.inner.is_same_node(Some(other_node))
	}

	/// This element as a [`Node`].
	pub fn as_node(&self) -> Node {
		Node {
			inner: self.inner.clone().into(),
		}
	}

	/// The wrapped `web_sys` element (for runtime interop).
	pub fn inner(&self) -> &web_sys::Element {
		&self.inner
	}
}

impl std::fmt::Debug for Element {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Element")
			.field("tag", &self.tag_name())
			.finish()
	}
}

impl std::fmt::Debug for Node {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Node")
			.field("name", &self.inner.node_name())
			.finish()
	}
}
