//! In-memory DOM for native targets (server rendering and tests).
//!
//! Nodes are `Rc`-backed so that identity is observable: cloning a [`Node`]
//! clones a reference to the same underlying node, and [`Node::same_node`]
//! is `Rc::ptr_eq`. [`Element::append_child`] re-parents, removing the node
//! from its previous parent first, so moving captured nodes between
//! containers is a single ownership transfer that leaves the old container
//! empty.
//!
//! `set_inner_html` parses the markup fragment with the `tl` crate; a parse
//! failure falls back to storing the markup as a single text node.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::DomError;

/// Entry point for creating detached nodes.
pub struct Document;

impl Document {
	/// Returns the document handle. Always available on native targets.
	pub fn get() -> Result<Document, DomError> {
		Ok(Document)
	}

	/// Creates a detached element. Tag names are normalized to lowercase.
	pub fn create_element(&self, tag: &str) -> Result<Element, DomError> {
		Ok(Element {
			data: Rc::new(RefCell::new(ElementData {
				tag: tag.to_ascii_lowercase(),
				attrs: Vec::new(),
				children: Vec::new(),
				parent: None,
			})),
		})
	}

	/// Creates a detached text node.
	pub fn create_text_node(&self, text: &str) -> Node {
		Node {
			repr: Repr::Text(Rc::new(RefCell::new(TextData {
				text: text.to_string(),
				parent: None,
			}))),
		}
	}
}

struct ElementData {
	tag: String,
	attrs: Vec<(String, String)>,
	children: Vec<Node>,
	parent: Option<Weak<RefCell<ElementData>>>,
}

struct TextData {
	text: String,
	parent: Option<Weak<RefCell<ElementData>>>,
}

#[derive(Clone)]
enum Repr {
	Element(Rc<RefCell<ElementData>>),
	Text(Rc<RefCell<TextData>>),
}

/// A DOM node reference (element or text).
#[derive(Clone)]
pub struct Node {
	repr: Repr,
}

/// A DOM element reference.
#[derive(Clone)]
pub struct Element {
	data: Rc<RefCell<ElementData>>,
}

impl Node {
	/// Downcasts to an element reference, if this node is an element.
	pub fn as_element(&self) -> Option<Element> {
		match &self.repr {
			Repr::Element(data) => Some(Element { data: data.clone() }),
			Repr::Text(_) => None,
		}
	}

	/// Reference identity: true iff both refer to the same underlying node.
	pub fn same_node(&self, other: &Node) -> bool {
		match (&self.repr, &other.repr) {
			(Repr::Element(a), Repr::Element(b)) => Rc::ptr_eq(a, b),
			(Repr::Text(a), Repr::Text(b)) => Rc::ptr_eq(a, b),
			_ => false,
		}
	}

	/// The element currently holding this node as a child, if any.
	pub fn parent_element(&self) -> Option<Element> {
		let parent = match &self.repr {
			Repr::Element(data) => data.borrow().parent.clone(),
			Repr::Text(data) => data.borrow().parent.clone(),
		};
		parent.and_then(|weak| weak.upgrade()).map(|data| Element { data })
	}

	/// Concatenated text of this node and its descendants.
	pub fn text_content(&self) -> String {
		match &self.repr {
			Repr::Text(data) => data.borrow().text.clone(),
			Repr::Element(data) => {
				let mut out = String::new();
				for child in &data.borrow().children {
					out.push_str(&child.text_content());
				}
				out
			}
		}
	}

	fn set_parent(&self, parent: Option<Weak<RefCell<ElementData>>>) {
		match &self.repr {
			Repr::Element(data) => data.borrow_mut().parent = parent,
			Repr::Text(data) => data.borrow_mut().parent = parent,
		}
	}

	fn detach(&self) {
		if let Some(parent) = self.parent_element() {
			parent
				.data
				.borrow_mut()
				.children
				.retain(|child| !child.same_node(self));
		}
		self.set_parent(None);
	}
}

impl Element {
	/// The lowercase tag name.
	pub fn tag_name(&self) -> String {
		self.data.borrow().tag.clone()
	}

	/// Returns the attribute value, if set.
	pub fn get_attribute(&self, name: &str) -> Option<String> {
		self.data
			.borrow()
			.attrs
			.iter()
			.find(|(attr, _)| attr == name)
			.map(|(_, value)| value.clone())
	}

	/// Sets (or overwrites) an attribute.
	pub fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
		let mut data = self.data.borrow_mut();
		match data.attrs.iter_mut().find(|(attr, _)| attr == name) {
			Some((_, existing)) => *existing = value.to_string(),
			None => data.attrs.push((name.to_string(), value.to_string())),
		}
		Ok(())
	}

	/// The current top-level child nodes, in order.
	pub fn child_nodes(&self) -> Vec<Node> {
		self.data.borrow().children.clone()
	}

	/// Appends a node, re-parenting it away from any previous parent.
	pub fn append_child(&self, node: &Node) -> Result<(), DomError> {
		node.detach();
		node.set_parent(Some(Rc::downgrade(&self.data)));
		self.data.borrow_mut().children.push(node.clone());
		Ok(())
	}

	/// Removes all children, leaving them detached.
	pub fn clear_children(&self) {
		let children: Vec<Node> = self.data.borrow_mut().children.drain(..).collect();
		for child in &children {
			child.set_parent(None);
		}
	}

	/// Serializes the children to an HTML string.
	pub fn inner_html(&self) -> String {
		let mut out = String::new();
		for child in &self.data.borrow().children {
			serialize_node(child, &mut out);
		}
		out
	}

	/// Replaces the children with the parsed markup fragment.
	pub fn set_inner_html(&self, html: &str) {
		self.clear_children();
		if html.is_empty() {
			return;
		}
		let doc = Document;
		match tl::parse(html, tl::ParserOptions::default()) {
			Ok(dom) => {
				let parser = dom.parser();
				for handle in dom.children() {
					if let Some(node) = convert_tl_node(*handle, parser, &doc) {
						// append_child on a freshly created node cannot fail natively
						let _ = self.append_child(&node);
					}
				}
			}
			Err(_) => {
				let _ = self.append_child(&doc.create_text_node(html));
			}
		}
	}

	/// Reference identity for elements.
	pub fn same_element(&self, other: &Element) -> bool {
		Rc::ptr_eq(&self.data, &other.data)
	}

	/// This element as a [`Node`].
	pub fn as_node(&self) -> Node {
		Node {
			repr: Repr::Element(self.data.clone()),
		}
	}
}

impl std::fmt::Debug for Element {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Element")
			.field("tag", &self.tag_name())
			.field("children", &self.child_nodes().len())
			.finish()
	}
}

impl std::fmt::Debug for Node {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.repr {
			Repr::Element(data) => f
				.debug_struct("Element")
				.field("tag", &data.borrow().tag)
				.finish(),
			Repr::Text(data) => f.debug_tuple("Text").field(&data.borrow().text).finish(),
		}
	}
}

fn convert_tl_node(handle: tl::NodeHandle, parser: &tl::Parser, doc: &Document) -> Option<Node> {
	let node = handle.get(parser)?;
	match node {
		tl::Node::Tag(tag) => {
			let element = doc
				.create_element(&tag.name().as_utf8_str())
				.ok()?;
			for (name, value) in tag.attributes().iter() {
				let value = value.map(|v| v.to_string()).unwrap_or_default();
				let _ = element.set_attribute(name.as_ref(), &value);
			}
			for child_handle in tag.children().top().iter() {
				if let Some(child) = convert_tl_node(*child_handle, parser, doc) {
					let _ = element.append_child(&child);
				}
			}
			Some(element.as_node())
		}
		tl::Node::Raw(bytes) => {
			let text = decode_entities(&bytes.as_utf8_str());
			Some(doc.create_text_node(&text))
		}
		tl::Node::Comment(_) => None,
	}
}

fn serialize_node(node: &Node, out: &mut String) {
	match node.as_element() {
		Some(element) => {
			let tag = element.tag_name();
			out.push('<');
			out.push_str(&tag);
			for (name, value) in &element.data.borrow().attrs {
				out.push(' ');
				out.push_str(name);
				out.push_str("=\"");
				out.push_str(&escape_html(value));
				out.push('"');
			}
			let children = element.child_nodes();
			if is_void(&tag) && children.is_empty() {
				out.push_str(" />");
			} else {
				out.push('>');
				for child in &children {
					serialize_node(child, out);
				}
				out.push_str("</");
				out.push_str(&tag);
				out.push('>');
			}
		}
		None => out.push_str(&escape_html(&node.text_content())),
	}
}

fn is_void(tag: &str) -> bool {
	matches!(
		tag,
		"area"
			| "base" | "br"
			| "col" | "embed"
			| "hr" | "img"
			| "input" | "link"
			| "meta" | "source"
			| "track" | "wbr"
	)
}

fn escape_html(s: &str) -> String {
	let mut escaped = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			_ => escaped.push(c),
		}
	}
	escaped
}

fn decode_entities(s: &str) -> String {
	// Only the entities our own serializer emits; markup is trusted input.
	s.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&quot;", "\"")
		.replace("&#x27;", "'")
		.replace("&#39;", "'")
		.replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn doc() -> Document {
		Document::get().expect("document")
	}

	#[test]
	fn test_create_element_normalizes_tag() {
		let el = doc().create_element("DIV").expect("element");
		assert_eq!(el.tag_name(), "div");
	}

	#[test]
	fn test_set_attribute_overwrites() {
		let el = doc().create_element("div").expect("element");
		el.set_attribute("id", "a").expect("set");
		el.set_attribute("id", "b").expect("set");
		assert_eq!(el.get_attribute("id").as_deref(), Some("b"));
	}

	#[test]
	fn test_append_child_reparents() {
		let d = doc();
		let old_parent = d.create_element("div").expect("element");
		let new_parent = d.create_element("div").expect("element");
		let child = d.create_element("span").expect("element").as_node();

		old_parent.append_child(&child).expect("append");
		assert_eq!(old_parent.child_nodes().len(), 1);

		new_parent.append_child(&child).expect("append");
		assert!(old_parent.child_nodes().is_empty());
		assert_eq!(new_parent.child_nodes().len(), 1);
		assert!(new_parent.child_nodes()[0].same_node(&child));
		assert!(
			child
				.parent_element()
				.expect("parent")
				.same_element(&new_parent)
		);
	}

	#[test]
	fn test_same_node_is_reference_identity() {
		let d = doc();
		let a = d.create_element("span").expect("element").as_node();
		let b = d.create_element("span").expect("element").as_node();
		assert!(a.same_node(&a.clone()));
		assert!(!a.same_node(&b));
	}

	#[test]
	fn test_set_inner_html_round_trip() {
		let el = doc().create_element("div").expect("element");
		el.set_inner_html("<h1 class=\"title\">Hi</h1>");
		assert_eq!(el.inner_html(), "<h1 class=\"title\">Hi</h1>");
		assert_eq!(el.child_nodes().len(), 1);
		let child = el.child_nodes()[0].as_element().expect("element child");
		assert_eq!(child.tag_name(), "h1");
		assert_eq!(child.as_node().text_content(), "Hi");
	}

	#[test]
	fn test_set_inner_html_nested_and_mixed() {
		let el = doc().create_element("div").expect("element");
		el.set_inner_html("<span>span</span>hello<div>div</div>");
		assert_eq!(el.child_nodes().len(), 3);
		assert!(el.child_nodes()[1].as_element().is_none());
		assert_eq!(el.inner_html(), "<span>span</span>hello<div>div</div>");
	}

	#[test]
	fn test_set_inner_html_empty_clears() {
		let el = doc().create_element("div").expect("element");
		el.set_inner_html("<p>x</p>");
		el.set_inner_html("");
		assert!(el.child_nodes().is_empty());
		assert_eq!(el.inner_html(), "");
	}

	#[test]
	fn test_clear_children_detaches() {
		let el = doc().create_element("div").expect("element");
		let child = doc().create_element("span").expect("element").as_node();
		el.append_child(&child).expect("append");
		el.clear_children();
		assert!(child.parent_element().is_none());
		assert!(el.child_nodes().is_empty());
	}

	#[test]
	fn test_text_entities_round_trip() {
		let el = doc().create_element("div").expect("element");
		el.set_inner_html("<span>a &amp; b</span>");
		assert_eq!(el.child_nodes()[0].text_content(), "a & b");
		assert_eq!(el.inner_html(), "<span>a &amp; b</span>");
	}

	#[test]
	fn test_placeholder_markup_preserves_attributes() {
		let el = doc().create_element("div").expect("element");
		el.set_inner_html("<oc-component src=\"http://localhost/widget\" data-rendered=\"false\"></oc-component>");
		let child = el.child_nodes()[0].as_element().expect("element");
		assert_eq!(child.tag_name(), "oc-component");
		assert_eq!(
			child.get_attribute("src").as_deref(),
			Some("http://localhost/widget")
		);
		assert_eq!(child.get_attribute("data-rendered").as_deref(), Some("false"));
	}
}
