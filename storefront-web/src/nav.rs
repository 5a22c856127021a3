//! Mobile navigation drawer and header dropdown menus.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use storefront_core::{DropdownSet, KeyAction, NavMenu, key_action};
use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent};

use crate::context::PageContext;
use crate::dom;
use crate::error::PageError;

const ACTIVE: &str = "active";
const MENU_OPEN: &str = "menu-open";
const NAV_LINK: &str = ".header__nav-link";
const DROPDOWN_ITEM: &str = ".header__nav-item--dropdown";
const DROPDOWN_MENU: &str = ".header__dropdown-menu";
const DROPDOWN_LINK: &str = ".header__dropdown-link";

/// Drawer elements plus their shared open state.
#[derive(Clone)]
pub struct NavDrawer {
    hamburger: Option<Element>,
    nav: Element,
    overlay: Option<Element>,
    state: Rc<RefCell<NavMenu>>,
}

impl NavDrawer {
    /// # Errors
    /// Returns `PageError::Missing` when the page has no `#nav`.
    pub fn find() -> Result<Self, PageError> {
        let doc = dom::document().ok_or(PageError::Missing("document"))?;
        Ok(Self {
            hamburger: doc.get_element_by_id("hamburger"),
            nav: dom::require_id(&doc, "nav")?,
            overlay: doc.get_element_by_id("overlay"),
            state: Rc::new(RefCell::new(NavMenu::default())),
        })
    }

    fn render(&self) {
        let open = self.state.borrow().is_open();
        if let Some(hamburger) = &self.hamburger {
            dom::set_class(hamburger, ACTIVE, open);
        }
        dom::set_class(&self.nav, ACTIVE, open);
        if let Some(overlay) = &self.overlay {
            dom::set_class(overlay, ACTIVE, open);
        }
        if let Some(body) = dom::body() {
            dom::set_class(&body, MENU_OPEN, open);
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    pub fn toggle(&self) {
        self.state.borrow_mut().toggle();
        self.render();
    }

    pub fn close(&self) {
        if self.state.borrow_mut().close() {
            self.render();
        }
    }
}

/// # Errors
/// Returns `PageError::Missing` when the page has no navigation drawer.
pub fn init_drawer(drawer: &NavDrawer) -> Result<(), PageError> {
    let doc = dom::document().ok_or(PageError::Missing("document"))?;

    if let Some(hamburger) = &drawer.hamburger {
        let drawer = drawer.clone();
        dom::listen(hamburger, "click", move |_| drawer.toggle());
    }
    if let Some(close) = doc.get_element_by_id("nav-close") {
        let drawer = drawer.clone();
        dom::listen(&close, "click", move |_| drawer.close());
    }
    if let Some(overlay) = &drawer.overlay {
        let drawer = drawer.clone();
        dom::listen(overlay, "click", move |_| drawer.close());
    }

    for link in dom::query_all(&doc, NAV_LINK) {
        let in_dropdown = link.closest(DROPDOWN_ITEM).ok().flatten().is_some();
        if !in_dropdown {
            let drawer = drawer.clone();
            dom::listen(&link, "click", move |_| drawer.close());
        }
    }

    let on_key = drawer.clone();
    dom::listen(&doc, "keydown", move |event| {
        let dismiss = event
            .dyn_ref::<KeyboardEvent>()
            .and_then(|e| key_action(&e.key()))
            == Some(KeyAction::Dismiss);
        if dismiss && on_key.is_open() {
            on_key.close();
        }
    });
    Ok(())
}

struct DropdownItem {
    item: Element,
    link: Element,
    menu: Element,
}

#[derive(Clone)]
struct Dropdowns {
    items: Rc<Vec<DropdownItem>>,
    state: Rc<RefCell<DropdownSet>>,
}

impl Dropdowns {
    fn render(&self) {
        let state = self.state.borrow();
        for (idx, entry) in self.items.iter().enumerate() {
            let active = state.is_active(idx);
            dom::set_class(&entry.item, ACTIVE, active);
            dom::set_class(&entry.menu, ACTIVE, active);
        }
    }

    fn update(&self, f: impl FnOnce(&mut DropdownSet)) {
        f(&mut self.state.borrow_mut());
        self.render();
    }
}

/// # Errors
/// Returns `PageError::Missing` when the header has no dropdown items.
pub fn init_dropdowns(ctx: &Rc<PageContext>, drawer: Option<&NavDrawer>) -> Result<(), PageError> {
    let doc = dom::document().ok_or(PageError::Missing("document"))?;
    let items: Vec<DropdownItem> = dom::query_all(&doc, DROPDOWN_ITEM)
        .into_iter()
        .filter_map(|item| {
            let link = dom::query_in(&item, NAV_LINK)?;
            let menu = dom::query_in(&item, DROPDOWN_MENU)?;
            Some(DropdownItem { item, link, menu })
        })
        .collect();
    if items.is_empty() {
        return Err(PageError::Missing(DROPDOWN_ITEM));
    }

    let dropdowns = Dropdowns {
        state: Rc::new(RefCell::new(DropdownSet::new(items.len()))),
        items: Rc::new(items),
    };

    for (idx, entry) in dropdowns.items.iter().enumerate() {
        let on_link = dropdowns.clone();
        dom::listen(&entry.link, "click", move |event| {
            event.prevent_default();
            event.stop_propagation();
            on_link.update(|set| {
                set.toggle(idx);
            });
        });

        for dropdown_link in dom::query_all_in(&entry.menu, DROPDOWN_LINK) {
            let on_pick = dropdowns.clone();
            let drawer = drawer.cloned();
            dom::listen(&dropdown_link, "click", move |_| {
                if let Some(drawer) = &drawer {
                    drawer.close();
                }
                on_pick.update(|set| set.close(idx));
            });
        }

        dom::listen(&entry.menu, "click", |event| {
            if dom::event_closest(&event, DROPDOWN_LINK).is_none() {
                event.stop_propagation();
            }
        });
    }

    let on_outside = dropdowns.clone();
    dom::listen(&doc, "click", move |event| {
        on_outside.update(|set| {
            for (idx, entry) in on_outside.items.iter().enumerate() {
                if !dom::event_within(&event, &entry.item) {
                    set.close(idx);
                }
            }
        });
    });

    if let Some(win) = dom::window() {
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let debounce_ms = ctx.config.dropdown_resize_debounce_ms;
        let on_resize = dropdowns;
        dom::listen(&win, "resize", move |_| {
            if let Some(handle) = pending.take() {
                dom::clear_timeout(handle);
            }
            let dropdowns = on_resize.clone();
            let handle = dom::set_timeout(debounce_ms, move || {
                dropdowns.update(DropdownSet::close_all);
            });
            pending.set(handle);
        });
    }
    Ok(())
}
