//! DOM abstraction layer.
//!
//! Both widget components manipulate real DOM nodes after the host commits
//! their container: raw markup injection, child inspection, and re-parenting
//! of captured nodes. On WASM the types here wrap `web_sys`; on native
//! targets they are a working in-memory DOM so that server rendering and the
//! test suite exercise the same identity semantics a browser would
//! (re-parenting moves the *same* node object, `same_node` is reference
//! equality).

use thiserror::Error;

/// A DOM operation failed.
///
/// On native targets the in-memory DOM is infallible, so these only surface
/// from the browser bindings.
#[derive(Debug, Clone, Error)]
pub enum DomError {
	/// Window or document object not available.
	#[error("document object not available")]
	NoDocument,
	/// Failed to create an element.
	#[error("failed to create element '{0}'")]
	CreateElement(String),
	/// Failed to set an attribute.
	#[error("failed to set attribute '{0}'")]
	SetAttribute(String),
	/// Failed to append a child node.
	#[error("failed to append child node")]
	AppendChild,
}

#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
pub use wasm::{Document, Element, Node};

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(not(target_arch = "wasm32"))]
pub use native::{Document, Element, Node};
