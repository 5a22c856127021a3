//! Product image carousel: thumbnails, pager dots, arrows and keyboard.
use std::cell::RefCell;
use std::rc::Rc;

use storefront_core::scroll::{Rect, fully_in_viewport};
use storefront_core::{Gallery, KeyAction, key_action};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement, KeyboardEvent};

use crate::context::PageContext;
use crate::dom;
use crate::error::PageError;

const ACTIVE: &str = "active";

#[derive(Clone)]
struct Carousel {
    main: HtmlImageElement,
    images: Rc<Vec<String>>,
    thumbnails: Rc<Vec<Element>>,
    dots: Rc<Vec<Element>>,
    state: Rc<RefCell<Gallery>>,
    fade_ms: u32,
}

impl Carousel {
    fn show(&self, index: isize) {
        let current = self.state.borrow_mut().go_to(index);
        self.render(current);
    }

    fn step(&self, action: KeyAction) {
        let current = {
            let mut state = self.state.borrow_mut();
            match action {
                KeyAction::Previous => state.prev(),
                KeyAction::Next => state.next(),
                KeyAction::Dismiss => return,
            }
        };
        self.render(current);
    }

    fn select_dot(&self, dot: usize) {
        let current = self.state.borrow_mut().select_dot(dot);
        self.render(current);
    }

    fn render(&self, current: usize) {
        dom::set_style(&self.main, "opacity", "0");
        dom::set_style(&self.main, "transition", "opacity 0.3s ease");
        if let Some(src) = self.images.get(current).cloned() {
            let main = self.main.clone();
            dom::set_timeout(self.fade_ms, move || {
                main.set_src(&src);
                dom::set_style(&main, "opacity", "1");
            });
        }

        for (idx, thumb) in self.thumbnails.iter().enumerate() {
            dom::set_class(thumb, ACTIVE, idx == current);
        }
        let active_dot = self.state.borrow().active_dot();
        for (idx, dot) in self.dots.iter().enumerate() {
            dom::set_class(dot, ACTIVE, Some(idx) == active_dot);
        }
    }

    fn main_in_view(&self) -> bool {
        let Some(win) = dom::window() else {
            return false;
        };
        let rect = self.main.get_bounding_client_rect();
        let width = win
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or_default();
        let height = win
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or_default();
        fully_in_viewport(
            Rect {
                top: rect.top(),
                left: rect.left(),
                bottom: rect.bottom(),
                right: rect.right(),
            },
            width,
            height,
        )
    }
}

fn thumbnail_sources(thumbnails: &[Element]) -> Vec<String> {
    thumbnails
        .iter()
        .filter_map(|thumb| dom::query_in(thumb, "img"))
        .filter_map(|img| img.dyn_into::<HtmlImageElement>().ok())
        .map(|img| img.src())
        .filter(|src| !src.is_empty())
        .collect()
}

fn index_arg(idx: usize) -> isize {
    isize::try_from(idx).unwrap_or(isize::MAX)
}

/// # Errors
/// Returns `PageError::Missing` when the main image, thumbnails, or their
/// image sources are absent.
pub fn init(ctx: &Rc<PageContext>) -> Result<(), PageError> {
    let doc = dom::document().ok_or(PageError::Missing("document"))?;
    let main = dom::require_id(&doc, "main-product-image")?
        .dyn_into::<HtmlImageElement>()
        .map_err(|_| PageError::Missing("main-product-image"))?;
    let thumbnails = dom::query_all(&doc, ".product__thumbnail");
    let images = thumbnail_sources(&thumbnails);
    let dots = dom::query_all(&doc, ".product__dot");
    let state =
        Gallery::new(images.len(), dots.len()).ok_or(PageError::Missing(".product__thumbnail img"))?;

    if let Some(first) = images.first() {
        main.set_src(first);
    }

    let carousel = Carousel {
        main,
        images: Rc::new(images),
        thumbnails: Rc::new(thumbnails),
        dots: Rc::new(dots),
        state: Rc::new(RefCell::new(state)),
        fade_ms: ctx.config.gallery_fade_ms,
    };

    for (idx, thumb) in carousel.thumbnails.iter().enumerate() {
        let on_thumb = carousel.clone();
        dom::listen(thumb, "click", move |event| {
            event.prevent_default();
            on_thumb.show(index_arg(idx));
        });
    }

    for (idx, dot) in carousel.dots.iter().enumerate() {
        let on_dot = carousel.clone();
        dom::listen(dot, "click", move |event| {
            event.prevent_default();
            on_dot.select_dot(idx);
        });
    }

    for (id, action) in [
        ("gallery-prev", KeyAction::Previous),
        ("gallery-next", KeyAction::Next),
    ] {
        if let Some(button) = doc.get_element_by_id(id) {
            let on_arrow = carousel.clone();
            dom::listen(&button, "click", move |event| {
                event.prevent_default();
                on_arrow.step(action);
            });
        }
    }

    let on_key = carousel;
    dom::listen(&doc, "keydown", move |event| {
        let Some(action) = event
            .dyn_ref::<KeyboardEvent>()
            .and_then(|e| key_action(&e.key()))
        else {
            return;
        };
        if action != KeyAction::Dismiss && on_key.main_in_view() {
            event.prevent_default();
            on_key.step(action);
        }
    });
    Ok(())
}
