//! Anchor scrolling and header scroll thresholds.

/// Axis-aligned box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

/// Fragment selector of an in-page link, skipping the bare `#`.
#[must_use]
pub fn anchor_selector(href: &str) -> Option<&str> {
    (href.starts_with('#') && href.len() > 1).then_some(href)
}

/// Header height to offset by; a zero-height header uses `fallback`.
#[must_use]
pub fn header_offset(measured: Option<f64>, fallback: f64) -> f64 {
    measured.filter(|h| *h > 0.0).unwrap_or(fallback)
}

/// Document scroll position that puts `target_top` just below the header.
#[must_use]
pub fn anchor_scroll_top(target_top: f64, page_y_offset: f64, header_height: f64) -> f64 {
    target_top + page_y_offset - header_height
}

#[must_use]
pub fn header_scrolled(page_y_offset: f64, threshold: f64) -> bool {
    page_y_offset > threshold
}

/// Whether `rect` lies entirely within a `width` × `height` viewport.
#[must_use]
pub fn fully_in_viewport(rect: Rect, width: f64, height: f64) -> bool {
    rect.top >= 0.0 && rect.left >= 0.0 && rect.bottom <= height && rect.right <= width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_selector_skips_bare_hash() {
        assert_eq!(anchor_selector("#"), None);
        assert_eq!(anchor_selector("#faq"), Some("#faq"));
        assert_eq!(anchor_selector("/shop#faq"), None);
    }

    #[test]
    fn header_offset_uses_fallback_for_zero_height() {
        assert!((header_offset(Some(0.0), 70.0) - 70.0).abs() < f64::EPSILON);
        assert!((header_offset(None, 70.0) - 70.0).abs() < f64::EPSILON);
        assert!((header_offset(Some(88.0), 70.0) - 88.0).abs() < f64::EPSILON);
    }

    #[test]
    fn anchor_target_accounts_for_header() {
        let top = anchor_scroll_top(400.0, 1_000.0, 70.0);
        assert!((top - 1_330.0).abs() < f64::EPSILON);
    }

    #[test]
    fn header_scrolled_is_strictly_past_threshold() {
        assert!(!header_scrolled(50.0, 50.0));
        assert!(header_scrolled(50.5, 50.0));
    }

    #[test]
    fn viewport_check_requires_full_containment() {
        let inside = Rect { top: 10.0, left: 0.0, bottom: 500.0, right: 300.0 };
        assert!(fully_in_viewport(inside, 800.0, 600.0));
        let clipped = Rect { bottom: 700.0, ..inside };
        assert!(!fully_in_viewport(clipped, 800.0, 600.0));
    }
}
