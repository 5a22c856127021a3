#[cfg(target_arch = "wasm32")]
use storefront_web::dom;
use storefront_web::{PageContext, PageError, logging};

#[cfg(target_arch = "wasm32")]
#[test]
fn dom_helpers_find_window() {
    assert!(dom::window().is_some());
    assert!(dom::document().is_some());
}

#[test]
fn page_context_loads_embedded_data() {
    let ctx = PageContext::load();
    assert_eq!(ctx.reconciler.table().len(), 9);
    assert_eq!(ctx.config.restore_delays(), vec![50, 200]);
}

#[test]
fn log_level_follows_debug_flag() {
    assert_eq!(
        logging::level_for_search("?test=1&debug=1"),
        log::LevelFilter::Debug
    );
    assert_eq!(logging::level_for_search("?debug=0"), log::LevelFilter::Info);
}

#[test]
fn page_errors_compare_by_variant() {
    assert_eq!(PageError::Missing("nav"), PageError::Missing("nav"));
    assert_ne!(PageError::Missing("nav"), PageError::Js("nav".into()));
}
