//! Embed externally served, pre-rendered HTML widgets in a component tree.
//!
//! Widgets are self-contained HTML fragments produced outside the host
//! application, either synthesized on demand by a client-side runtime
//! ([`LiveWidget`]) or computed ahead of time by a server-side prefetch step
//! ([`PrefetchedWidget`]). The fundamental tension this crate resolves is
//! that the host reconciles the DOM declaratively while widget markup is
//! runtime-mutated, imperative content: containers declare their markup as
//! trusted raw HTML, mounted re-renders re-declare the same string so the
//! host never clobbers runtime mutations, and captured subtrees are replayed
//! by reference identity across remounts.
//!
//! # Quick start
//!
//! ```ignore
//! use std::rc::Rc;
//! use oc_embed::{
//!     LiveWidget, OcClientRuntime, WidgetProvider, WidgetProviderOptions,
//!     mount_widget,
//! };
//!
//! let runtime = OcClientRuntime::from_window().expect("oc client loaded");
//! let provider = WidgetProvider::new(
//!     WidgetProviderOptions::new()
//!         .runtime(Rc::new(runtime))
//!         .base_url("https://widgets.example.com/")
//!         .lang("en-US"),
//! );
//! let _scope = provider.provide();
//!
//! let mounted = mount_widget(LiveWidget::new("header"), &body)?;
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod dom;
pub mod error;
mod logging;
pub mod mount;
pub mod runtime;
pub mod view;
pub mod widget;

pub use context::{
	ContextGuard, WidgetContext, WidgetProvider, WidgetProviderOptions, provide_widget_context,
	use_widget_context,
};
pub use dom::{Document, DomError, Element, Node};
pub use error::WidgetError;
pub use mount::{MountedWidget, WidgetComponent, hydrate_widget, mount_widget};
#[cfg(target_arch = "wasm32")]
pub use runtime::OcClientRuntime;
pub use runtime::{BuildRequest, PLACEHOLDER_TAG, RENDERED_ATTR, RuntimeHandle, WidgetRuntime};
pub use view::{ElementView, IntoView, View};
pub use widget::{LiveWidget, PrefetchedWidget, find_unrendered_placeholder};
