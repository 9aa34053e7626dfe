mod common;

use std::collections::HashMap;

use common::MockRuntime;
use oc_embed::{
	Document, Element, PrefetchedWidget, WidgetComponent, WidgetError, WidgetProvider,
	WidgetProviderOptions, mount_widget,
};
use rstest::rstest;

fn body() -> Element {
	Document::get()
		.expect("document")
		.create_element("body")
		.expect("element")
}

fn provider_with_markup(key: &str, markup: &str) -> WidgetProvider {
	let mut map = HashMap::new();
	map.insert(key.to_string(), markup.to_string());
	WidgetProvider::new(WidgetProviderOptions::new().prefetched_markup(map))
}

#[rstest]
fn test_known_key_injects_prefetched_markup() {
	let provider = provider_with_markup("greeting", "<h1>Hi</h1>");
	let _scope = provider.provide();

	let parent = body();
	let mounted = mount_widget(PrefetchedWidget::new("greeting"), &parent).expect("mount");

	assert_eq!(mounted.container().inner_html(), "<h1>Hi</h1>");
}

#[rstest]
fn test_unknown_key_renders_fallback() {
	let provider = WidgetProvider::new(WidgetProviderOptions::new());
	let _scope = provider.provide();

	let parent = body();
	let mounted = mount_widget(
		PrefetchedWidget::new("missing").fallback("<p>Unavailable</p>"),
		&parent,
	)
	.expect("mount");

	assert_eq!(mounted.container().inner_html(), "<p>Unavailable</p>");
}

#[rstest]
fn test_unknown_key_without_fallback_renders_nothing() {
	let provider = WidgetProvider::new(WidgetProviderOptions::new());
	let _scope = provider.provide();

	let parent = body();
	let mounted = mount_widget(PrefetchedWidget::new("missing"), &parent).expect("mount");

	assert_eq!(mounted.container().inner_html(), "");
}

#[rstest]
fn test_empty_key_is_rejected() {
	let provider = WidgetProvider::new(WidgetProviderOptions::new());
	let _scope = provider.provide();

	let err = PrefetchedWidget::new("").render().unwrap_err();
	assert!(matches!(err, WidgetError::MissingPrefetchKey));
}

#[rstest]
fn test_render_outside_provider_scope_is_rejected() {
	let err = PrefetchedWidget::new("greeting").render().unwrap_err();
	assert!(matches!(err, WidgetError::MissingContext("PrefetchedWidget")));
}

#[rstest]
fn test_mounts_without_runtime_or_base_url() {
	// Prefetched markup never needs synthesis, so a provider carrying only
	// the markup map is a complete client configuration.
	let provider = provider_with_markup("greeting", "<h1>Hi</h1>");
	let _scope = provider.provide();

	let parent = body();
	assert!(mount_widget(PrefetchedWidget::new("greeting"), &parent).is_ok());
}

#[rstest]
fn test_placeholder_stays_inert_without_runtime() {
	let provider = provider_with_markup("outer", "<oc-component></oc-component>");
	let _scope = provider.provide();

	let parent = body();
	let mounted = mount_widget(PrefetchedWidget::new("outer"), &parent).expect("mount");

	let placeholder = mounted.container().child_nodes()[0]
		.as_element()
		.expect("element");
	assert_ne!(placeholder.get_attribute("data-rendered").as_deref(), Some("true"));
}

#[rstest]
fn test_placeholder_upgraded_when_runtime_present() {
	let runtime = MockRuntime::new("");
	let provider = WidgetProvider::new(
		WidgetProviderOptions::new()
			.runtime(runtime)
			.prefetched_markup(HashMap::from([(
				"outer".to_string(),
				"<oc-component></oc-component>".to_string(),
			)])),
	);
	let _scope = provider.provide();

	let parent = body();
	let mounted = mount_widget(PrefetchedWidget::new("outer"), &parent).expect("mount");

	let placeholder = mounted.container().child_nodes()[0]
		.as_element()
		.expect("element");
	assert_eq!(placeholder.get_attribute("data-rendered").as_deref(), Some("true"));
}

#[rstest]
fn test_update_preserves_widget_mutations() {
	let provider = provider_with_markup("greeting", "<h1>Hi</h1>");
	let _scope = provider.provide();

	let parent = body();
	let mut mounted = mount_widget(PrefetchedWidget::new("greeting"), &parent).expect("mount");

	mounted.container().set_inner_html("<h1>Mutated</h1>");
	mounted.update().expect("update");

	assert_eq!(mounted.container().inner_html(), "<h1>Mutated</h1>");
}

#[rstest]
fn test_capture_saved_on_mount() {
	let provider = provider_with_markup("greeting", "<h1>Hi</h1>");
	let context = provider.context();
	let _scope = provider.provide();

	let parent = body();
	let mounted = mount_widget(
		PrefetchedWidget::new("greeting").capture_as("greeting"),
		&parent,
	)
	.expect("mount");

	let captured = context.captured("greeting").expect("captured");
	assert_eq!(captured.len(), 1);
	assert!(captured[0].same_node(&mounted.container().child_nodes()[0]));
}
