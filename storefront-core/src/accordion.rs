//! Single-open accordion for the collection section.

/// Tracks which accordion item, if any, is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accordion {
    open: Option<usize>,
}

impl Accordion {
    #[must_use]
    pub const fn new() -> Self {
        Self { open: None }
    }

    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Clicking an item closes every item and opens the clicked one,
    /// unless it was the open item already.
    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        self.open = if self.is_open(index) { None } else { Some(index) };
        self.open
    }

    /// Value for an item's `aria-expanded` attribute.
    #[must_use]
    pub fn aria_expanded(&self, index: usize) -> &'static str {
        if self.is_open(index) { "true" } else { "false" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_keeps_a_single_item_open() {
        let mut acc = Accordion::new();
        assert_eq!(acc.toggle(1), Some(1));
        assert_eq!(acc.toggle(2), Some(2));
        assert!(!acc.is_open(1));
        assert_eq!(acc.aria_expanded(2), "true");
        assert_eq!(acc.aria_expanded(1), "false");
    }

    #[test]
    fn toggling_the_open_item_closes_it() {
        let mut acc = Accordion::new();
        acc.toggle(0);
        assert_eq!(acc.toggle(0), None);
        assert!(!acc.is_open(0));
    }
}
