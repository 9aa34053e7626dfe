#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use oc_embed::{BuildRequest, Element, RENDERED_ATTR, WidgetRuntime};

/// Scripted widget runtime for lifecycle tests.
///
/// `build` returns a fixed markup string and records every request. Nested
/// upgrades either complete synchronously (default) or queue up until the
/// test fires them, which is how the capture-after-upgrade ordering and the
/// detached-tree guard get exercised.
pub struct MockRuntime {
	markup: String,
	nested_markup: String,
	deferred: bool,
	build_calls: RefCell<Vec<BuildRequest>>,
	pending: RefCell<Vec<(Element, Box<dyn FnOnce()>)>>,
}

impl MockRuntime {
	pub fn new(markup: impl Into<String>) -> Rc<Self> {
		Rc::new(Self {
			markup: markup.into(),
			nested_markup: "<p>nested</p>".to_string(),
			deferred: false,
			build_calls: RefCell::new(Vec::new()),
			pending: RefCell::new(Vec::new()),
		})
	}

	/// Like [`new`](Self::new), but nested upgrades wait for
	/// [`fire_next`](Self::fire_next).
	pub fn deferred(markup: impl Into<String>) -> Rc<Self> {
		Rc::new(Self {
			markup: markup.into(),
			nested_markup: "<p>nested</p>".to_string(),
			deferred: true,
			build_calls: RefCell::new(Vec::new()),
			pending: RefCell::new(Vec::new()),
		})
	}

	pub fn build_count(&self) -> usize {
		self.build_calls.borrow().len()
	}

	pub fn last_build(&self) -> Option<BuildRequest> {
		self.build_calls.borrow().last().cloned()
	}

	pub fn pending_upgrades(&self) -> usize {
		self.pending.borrow().len()
	}

	/// Completes the oldest queued upgrade: rewrites the placeholder, flips
	/// its rendered marker, then invokes the completion continuation.
	pub fn fire_next(&self) {
		let (element, done) = self.pending.borrow_mut().remove(0);
		self.upgrade(&element);
		done();
	}

	fn upgrade(&self, element: &Element) {
		element.set_inner_html(&self.nested_markup);
		element
			.set_attribute(RENDERED_ATTR, "true")
			.expect("set rendered marker");
	}
}

impl WidgetRuntime for MockRuntime {
	fn build(&self, request: &BuildRequest) -> String {
		self.build_calls.borrow_mut().push(request.clone());
		self.markup.clone()
	}

	fn render_nested_component(&self, element: &Element, done: Box<dyn FnOnce()>) {
		if self.deferred {
			self.pending.borrow_mut().push((element.clone(), done));
		} else {
			self.upgrade(element);
			done();
		}
	}
}
