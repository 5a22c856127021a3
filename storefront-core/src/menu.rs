//! Open/closed state for the header's navigation, dropdowns and search popup.

/// Mobile navigation drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Returns whether anything changed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}

/// Header dropdowns, at most one of which is open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropdownSet {
    len: usize,
    active: Option<usize>,
}

impl DropdownSet {
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { len, active: None }
    }

    #[must_use]
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Close the others and flip `index`. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        if index < self.len {
            self.active = if self.is_active(index) { None } else { Some(index) };
        }
        self.active
    }

    pub fn close(&mut self, index: usize) {
        if self.is_active(index) {
            self.active = None;
        }
    }

    pub fn close_all(&mut self) {
        self.active = None;
    }
}

/// Full-screen search overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchPopup {
    open: bool,
}

impl SearchPopup {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Returns whether anything changed.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_menu_toggles_and_reports_close() {
        let mut nav = NavMenu::default();
        assert!(nav.toggle());
        assert!(nav.close());
        assert!(!nav.close());
        assert!(nav.toggle());
        assert!(nav.is_open());
    }

    #[test]
    fn dropdowns_are_mutually_exclusive() {
        let mut set = DropdownSet::new(3);
        assert_eq!(set.toggle(0), Some(0));
        assert_eq!(set.toggle(2), Some(2));
        assert!(!set.is_active(0));
        assert_eq!(set.toggle(2), None);
        assert_eq!(set.toggle(7), None);
    }

    #[test]
    fn closing_other_dropdown_keeps_active_one() {
        let mut set = DropdownSet::new(2);
        set.toggle(1);
        set.close(0);
        assert_eq!(set.active(), Some(1));
        set.close_all();
        assert_eq!(set.active(), None);
    }

    #[test]
    fn search_popup_close_is_idempotent() {
        let mut popup = SearchPopup::default();
        assert!(popup.toggle());
        assert!(popup.close());
        assert!(!popup.close());
        assert!(!popup.is_open());
    }
}
