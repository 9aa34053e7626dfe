//! Widget context: the tree-scoped value coordinating markup lookup and
//! captured-DOM storage.
//!
//! A [`WidgetProvider`] owns one [`WidgetContext`] for its full mount
//! duration. The context carries the runtime handle, the registry base URL,
//! a language tag, the server-supplied prefetched-markup map, and the
//! capture store. The capture store is shared mutable state between widget
//! instances: values are live DOM node references (never copies), entries
//! survive subtree re-renders, and re-saving under a key overwrites
//! (last-writer-wins). Saves notify subscribers so the host can schedule a
//! re-render of the consuming subtree; the write happens before any
//! listener runs, so subscribers always observe the saved entry.
//!
//! Consumers resolve the context implicitly via [`use_widget_context`],
//! scoped by the RAII guard [`provide_widget_context`] returns. No context
//! in scope is a contract violation for the widget components, not a
//! silent default.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::dom::Node;
use crate::runtime::RuntimeHandle;

type CaptureListener = Rc<dyn Fn(&str)>;

/// The context value widget components consume.
///
/// Cheap to clone: all state is shared with the owning provider.
#[derive(Clone)]
pub struct WidgetContext {
	runtime: Option<RuntimeHandle>,
	base_url: Option<String>,
	lang: Option<String>,
	prefetched: Rc<HashMap<String, String>>,
	captures: Rc<RefCell<HashMap<String, Vec<Node>>>>,
	listeners: Rc<RefCell<Vec<CaptureListener>>>,
}

impl WidgetContext {
	/// The widget runtime handle, absent during the server render pass.
	pub fn runtime(&self) -> Option<&RuntimeHandle> {
		self.runtime.as_ref()
	}

	/// The widget registry base URL.
	pub fn base_url(&self) -> Option<&str> {
		self.base_url.as_deref()
	}

	/// The provider-level language tag.
	pub fn lang(&self) -> Option<&str> {
		self.lang.as_deref()
	}

	/// Pure lookup of prefetched markup by logical key. No fallback
	/// synthesis: an unknown key is a soft miss.
	pub fn markup_for(&self, key: &str) -> Option<String> {
		self.prefetched.get(key).cloned()
	}

	/// The captured node references stored under `key`, if any.
	pub fn captured(&self, key: &str) -> Option<Vec<Node>> {
		self.captures.borrow().get(key).cloned()
	}

	/// Stores live node references under `key`, overwriting any previous
	/// entry, then notifies subscribers.
	pub fn save_captured(&self, key: &str, nodes: Vec<Node>) {
		crate::debug_log!("capturing {} node(s) under '{}'", nodes.len(), key);
		self.captures.borrow_mut().insert(key.to_string(), nodes);
		// Snapshot the listener list so a listener registering another
		// listener does not re-enter the borrow.
		let listeners: Vec<CaptureListener> = self.listeners.borrow().iter().cloned().collect();
		for listener in &listeners {
			listener(key);
		}
	}

	/// Subscribes to capture saves. The host uses this to schedule a
	/// re-render of the consuming subtree instead of polling the store.
	pub fn on_capture_saved(&self, listener: impl Fn(&str) + 'static) {
		self.listeners.borrow_mut().push(Rc::new(listener));
	}
}

impl std::fmt::Debug for WidgetContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WidgetContext")
			.field("has_runtime", &self.runtime.is_some())
			.field("base_url", &self.base_url)
			.field("lang", &self.lang)
			.field("prefetched_keys", &self.prefetched.len())
			.field("captured_keys", &self.captures.borrow().len())
			.finish()
	}
}

/// Construction options for a [`WidgetProvider`].
#[derive(Default)]
pub struct WidgetProviderOptions {
	runtime: Option<RuntimeHandle>,
	base_url: Option<String>,
	lang: Option<String>,
	prefetched_markup: HashMap<String, String>,
}

impl WidgetProviderOptions {
	/// Creates empty options (server pass without prefetched markup).
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the client-side widget runtime handle.
	pub fn runtime(mut self, runtime: RuntimeHandle) -> Self {
		self.runtime = Some(runtime);
		self
	}

	/// Sets the widget registry base URL.
	pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = Some(base_url.into());
		self
	}

	/// Sets the provider-level language tag.
	pub fn lang(mut self, lang: impl Into<String>) -> Self {
		self.lang = Some(lang.into());
		self
	}

	/// Sets the prefetched key-to-markup map computed by the server-side
	/// prefetch step.
	pub fn prefetched_markup(mut self, markup: HashMap<String, String>) -> Self {
		self.prefetched_markup = markup;
		self
	}

	/// Loads the prefetched map from embedded JSON state, the shape the
	/// server ships alongside its rendered page.
	pub fn prefetched_from_json(self, json: &str) -> Result<Self, serde_json::Error> {
		let markup: HashMap<String, String> = serde_json::from_str(json)?;
		Ok(self.prefetched_markup(markup))
	}
}

/// Owns a [`WidgetContext`] for the duration of its mount.
///
/// The capture store lives exactly as long as the provider: it is not
/// cleared between re-renders of the subtree, only dropped with the
/// provider itself.
pub struct WidgetProvider {
	context: WidgetContext,
}

impl WidgetProvider {
	/// Creates a provider from options.
	pub fn new(options: WidgetProviderOptions) -> Self {
		Self {
			context: WidgetContext {
				runtime: options.runtime,
				base_url: options.base_url,
				lang: options.lang,
				prefetched: Rc::new(options.prefetched_markup),
				captures: Rc::new(RefCell::new(HashMap::new())),
				listeners: Rc::new(RefCell::new(Vec::new())),
			},
		}
	}

	/// A clone of the provider's context value (shares all state).
	pub fn context(&self) -> WidgetContext {
		self.context.clone()
	}

	/// Installs this provider's context for the current scope.
	pub fn provide(&self) -> ContextGuard {
		provide_widget_context(self.context.clone())
	}
}

thread_local! {
	static WIDGET_CONTEXT: RefCell<Vec<WidgetContext>> = const { RefCell::new(Vec::new()) };
}

/// Installs a context for the current scope; dropped guards restore the
/// previous scope. Guards nest: the innermost provider wins.
#[must_use = "the context is removed when the guard is dropped"]
pub fn provide_widget_context(context: WidgetContext) -> ContextGuard {
	WIDGET_CONTEXT.with(|stack| stack.borrow_mut().push(context));
	ContextGuard { _private: () }
}

/// Reads the innermost provided context, if any.
pub fn use_widget_context() -> Option<WidgetContext> {
	WIDGET_CONTEXT.with(|stack| stack.borrow().last().cloned())
}

/// RAII guard returned by [`provide_widget_context`].
pub struct ContextGuard {
	_private: (),
}

impl Drop for ContextGuard {
	fn drop(&mut self) {
		WIDGET_CONTEXT.with(|stack| {
			stack.borrow_mut().pop();
		});
	}
}
