#![forbid(unsafe_code)]
//! Browser side of the storefront: wires the product page's DOM to the
//! state derivations in `storefront-core`.
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod accordion;
pub mod cart;
pub mod context;
pub mod dom;
pub mod error;
pub mod gallery;
pub mod logging;
pub mod nav;
pub mod scroll;
pub mod search;
pub mod stats;
pub mod styles;
pub mod subscription;
pub mod test_bridge;

pub use context::PageContext;
pub use error::PageError;

/// Wire every component present on the page. Components whose markup is
/// missing are skipped; the rest still initialize.
pub fn init_all(ctx: &Rc<PageContext>) {
    let run = |component: &str, result: Result<(), PageError>| {
        if let Err(err) = result {
            err.report(component);
        }
    };

    run("keyframes", styles::inject_keyframes());

    let drawer = nav::NavDrawer::find();
    match &drawer {
        Ok(drawer) => run("nav", nav::init_drawer(drawer)),
        Err(err) => err.report("nav"),
    }
    run("dropdowns", nav::init_dropdowns(ctx, drawer.as_ref().ok()));
    run("search", search::init(ctx));
    run("gallery", gallery::init(ctx));
    run("subscription", subscription::init(ctx));
    run("cart", cart::init(ctx));
    run("stats", stats::init(ctx));
    run("smooth-scroll", scroll::init_smooth_scroll(ctx));
    run("accordion", accordion::init());
    run("header", scroll::init_header_effect(ctx));
    run("test-bridge", test_bridge::install(ctx));
    log::debug!("storefront initialized");
}

/// Re-derive the plan blocks and cart link from whatever the browser
/// currently holds checked, without attaching any listeners.
pub fn reconcile(ctx: &PageContext) {
    subscription::update_collapse_state();
    cart::refresh(ctx);
}

/// Pages restored from the back/forward cache keep their listeners but may
/// carry different checked radios.
fn watch_page_restore(ctx: &Rc<PageContext>) {
    use wasm_bindgen::JsCast;

    let Some(win) = dom::window() else {
        return;
    };
    let ctx = Rc::clone(ctx);
    dom::listen(&win, "pageshow", move |event| {
        let persisted = event
            .dyn_ref::<web_sys::PageTransitionEvent>()
            .is_some_and(web_sys::PageTransitionEvent::persisted);
        if persisted {
            log::debug!("page restored from cache, reconciling");
            reconcile(&ctx);
        }
    });
}

/// Initialize now, or once the DOM has been parsed.
pub fn boot(ctx: Rc<PageContext>) {
    let Some(doc) = dom::document() else {
        dom::console_error("storefront: no document");
        return;
    };
    watch_page_restore(&ctx);
    if doc.ready_state() == "loading" {
        let pending = std::cell::Cell::new(Some(ctx));
        dom::listen(&doc, "DOMContentLoaded", move |_| {
            if let Some(ctx) = pending.take() {
                init_all(&ctx);
            }
        });
    } else {
        init_all(&ctx);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(logging::level_for_search(&dom::location_search()));
    boot(Rc::new(PageContext::load()));
}
