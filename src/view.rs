//! View types for component rendering.
//!
//! The render phase of a widget component is pure: it produces a [`View`]
//! describing the desired container, and the lifecycle driver commits it to
//! the real DOM afterwards. [`ElementView::raw_inner_html`] is the trusted
//! injection escape hatch widget markup requires: the content bypasses the
//! escaping that ordinary text children get, so it must only ever carry
//! markup from the widget runtime or the server-side prefetch step.

use std::borrow::Cow;

use crate::dom::{Document, DomError, Element};

/// A unified representation of renderable content.
#[derive(Debug)]
pub enum View {
	/// A DOM element.
	Element(ElementView),
	/// A text node.
	Text(Cow<'static, str>),
	/// A fragment containing multiple views (no wrapper element).
	Fragment(Vec<View>),
	/// An empty view (renders nothing).
	Empty,
}

/// Represents a DOM element in the view tree.
#[derive(Debug)]
pub struct ElementView {
	tag: Cow<'static, str>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
	children: Vec<View>,
	is_void: bool,
	raw_html: Option<String>,
	suppress_hydration_warning: bool,
}

impl ElementView {
	/// Creates a new element view.
	pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
		let tag = tag.into();
		let is_void = matches!(
			tag.as_ref(),
			"area"
				| "base" | "br"
				| "col" | "embed"
				| "hr" | "img"
				| "input" | "link"
				| "meta" | "source"
				| "track" | "wbr"
		);
		Self {
			tag,
			attrs: Vec::new(),
			children: Vec::new(),
			is_void,
			raw_html: None,
			suppress_hydration_warning: false,
		}
	}

	/// Adds an attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds a child view.
	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}

	/// Adds multiple child views.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoView>) -> Self {
		self.children
			.extend(children.into_iter().map(|c| c.into_view()));
		self
	}

	/// Declares the element's content as trusted, unescaped markup.
	///
	/// The markup replaces any declared children; it is injected verbatim
	/// into both the SSR output and the committed DOM.
	pub fn raw_inner_html(mut self, markup: impl Into<String>) -> Self {
		self.raw_html = Some(markup.into());
		self
	}

	/// Marks this element as one whose server and client markup may
	/// legitimately differ; hydration keeps the existing DOM silently.
	pub fn suppress_hydration_warning(mut self) -> Self {
		self.suppress_hydration_warning = true;
		self
	}

	/// Returns the tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Returns the attributes.
	pub fn attrs(&self) -> &[(Cow<'static, str>, Cow<'static, str>)] {
		&self.attrs
	}

	/// Returns the child views.
	pub fn child_views(&self) -> &[View] {
		&self.children
	}

	/// Returns whether this is a void element.
	pub fn is_void(&self) -> bool {
		self.is_void
	}

	/// Returns the declared raw markup, if any.
	pub fn raw_html(&self) -> Option<&str> {
		self.raw_html.as_deref()
	}

	/// Returns whether hydration mismatches are expected for this element.
	pub fn suppresses_hydration_warning(&self) -> bool {
		self.suppress_hydration_warning
	}

	/// Commits this element to a detached DOM element.
	pub(crate) fn create(&self, doc: &Document) -> Result<Element, DomError> {
		let element = doc.create_element(&self.tag)?;
		for (name, value) in &self.attrs {
			element.set_attribute(name, value)?;
		}
		match &self.raw_html {
			Some(markup) => {
				if !self.children.is_empty() {
					crate::warn_log!(
						"<{}> declares both raw markup and children; children are ignored",
						self.tag
					);
				}
				element.set_inner_html(markup);
			}
			None => self.commit_children(&element, doc)?,
		}
		Ok(element)
	}

	pub(crate) fn commit_children(&self, parent: &Element, doc: &Document) -> Result<(), DomError> {
		for child in &self.children {
			child.commit_with(parent, doc)?;
		}
		Ok(())
	}
}

impl View {
	/// Creates an element view.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> ElementView {
		ElementView::new(tag)
	}

	/// Creates a text view.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Creates a fragment view.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoView>) -> Self {
		Self::Fragment(children.into_iter().map(|c| c.into_view()).collect())
	}

	/// Creates an empty view.
	pub fn empty() -> Self {
		Self::Empty
	}

	/// Renders the view to an HTML string (the SSR output).
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.render_to_string_inner(&mut output);
		output
	}

	fn render_to_string_inner(&self, output: &mut String) {
		match self {
			View::Element(el) => {
				output.push('<');
				output.push_str(el.tag_name());

				for (name, value) in el.attrs() {
					output.push(' ');
					output.push_str(name);
					output.push_str("=\"");
					output.push_str(&html_escape(value));
					output.push('"');
				}

				if el.is_void() {
					output.push_str(" />");
				} else {
					output.push('>');
					match el.raw_html() {
						Some(markup) => output.push_str(markup),
						None => {
							for child in el.child_views() {
								child.render_to_string_inner(output);
							}
						}
					}
					output.push_str("</");
					output.push_str(el.tag_name());
					output.push('>');
				}
			}
			View::Text(text) => {
				output.push_str(&html_escape(text));
			}
			View::Fragment(children) => {
				for child in children {
					child.render_to_string_inner(output);
				}
			}
			View::Empty => {}
		}
	}

	/// Commits the view to a real DOM parent.
	pub fn commit(&self, parent: &Element) -> Result<(), DomError> {
		let doc = Document::get()?;
		self.commit_with(parent, &doc)
	}

	fn commit_with(&self, parent: &Element, doc: &Document) -> Result<(), DomError> {
		match self {
			View::Element(el) => {
				let element = el.create(doc)?;
				parent.append_child(&element.as_node())?;
			}
			View::Text(text) => {
				parent.append_child(&doc.create_text_node(text))?;
			}
			View::Fragment(children) => {
				for child in children {
					child.commit_with(parent, doc)?;
				}
			}
			View::Empty => {}
		}
		Ok(())
	}
}

/// Trait for types that can be converted into a View.
pub trait IntoView {
	/// Converts self into a View.
	fn into_view(self) -> View;
}

impl IntoView for View {
	fn into_view(self) -> View {
		self
	}
}

impl IntoView for ElementView {
	fn into_view(self) -> View {
		View::Element(self)
	}
}

impl IntoView for String {
	fn into_view(self) -> View {
		View::Text(Cow::Owned(self))
	}
}

impl IntoView for &'static str {
	fn into_view(self) -> View {
		View::Text(Cow::Borrowed(self))
	}
}

impl<T: IntoView> IntoView for Option<T> {
	fn into_view(self) -> View {
		match self {
			Some(v) => v.into_view(),
			None => View::Empty,
		}
	}
}

impl<T: IntoView> IntoView for Vec<T> {
	fn into_view(self) -> View {
		View::Fragment(self.into_iter().map(|v| v.into_view()).collect())
	}
}

impl IntoView for () {
	fn into_view(self) -> View {
		View::Empty
	}
}

/// Escapes HTML special characters.
fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}
