//! Logging abstraction for oc-embed.
//!
//! These macros work on both WASM and native targets and compile to no-ops in
//! release builds.
//!
//! | Macro | Debug assertions | Feature required | WASM | Non-WASM |
//! |-------|------------------|------------------|------|----------|
//! | `debug_log!` | Required | `debug-widgets` | `console.debug` | `eprintln!` |
//! | `info_log!` | Required | None | `console.info` | `eprintln!` |
//! | `warn_log!` | Required | None | `console.warn` | `eprintln!` |
//! | `error_log!` | Required | None | `console.error` | `eprintln!` |

/// Logs a capture/upgrade tracing message (requires the `debug-widgets`
/// feature and `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-widgets", target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		web_sys::console::debug_1(&format!($($arg)*).into());
	}};
}

/// Logs a capture/upgrade tracing message (requires the `debug-widgets`
/// feature and `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-widgets", not(target_arch = "wasm32")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		eprintln!("[DEBUG] {}", format!($($arg)*));
	}};
}

/// No-op debug_log when conditions are not met
#[macro_export]
#[cfg(not(all(debug_assertions, feature = "debug-widgets")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs an informational message, e.g. when a nested placeholder upgrade is
/// dispatched (requires `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		web_sys::console::info_1(&format!($($arg)*).into());
	}};
}

/// Logs an informational message (requires `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		eprintln!("[INFO] {}", format!($($arg)*));
	}};
}

/// No-op info_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! info_log {
	($($arg:tt)*) => {{}};
}

/// Logs a warning, e.g. a hydration mismatch or an inert placeholder that
/// cannot be upgraded (requires `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		web_sys::console::warn_1(&format!($($arg)*).into());
	}};
}

/// Logs a warning (requires `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		eprintln!("[WARN] {}", format!($($arg)*));
	}};
}

/// No-op warn_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! warn_log {
	($($arg:tt)*) => {{}};
}

/// Logs an error that was swallowed by a degrade-gracefully path, e.g. a
/// runtime interop failure (requires `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		web_sys::console::error_1(&format!($($arg)*).into());
	}};
}

/// Logs an error that was swallowed by a degrade-gracefully path (requires
/// `debug_assertions`).
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		eprintln!("[ERROR] {}", format!($($arg)*));
	}};
}

/// No-op error_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! error_log {
	($($arg:tt)*) => {{}};
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	#[rstest]
	fn test_logging_macros_compile() {
		crate::debug_log!("capture store: {} entries", 0);
		crate::info_log!("upgrading placeholder {}", "oc-component");
		crate::warn_log!("hydration mismatch: {:?}", ("a", "b"));
		crate::error_log!("runtime interop failed: {}", "oops");
	}

	#[rstest]
	fn test_logging_macros_no_args() {
		crate::debug_log!("debug");
		crate::info_log!("info");
		crate::warn_log!("warn");
		crate::error_log!("error");
	}
}
