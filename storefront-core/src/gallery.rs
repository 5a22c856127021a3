//! Product image carousel position.
use serde::{Deserialize, Serialize};

/// Current image of a gallery with `len` images and `dots` pager dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    len: usize,
    dots: usize,
    current: usize,
}

impl Gallery {
    /// `None` for an empty gallery; there is nothing to navigate.
    #[must_use]
    pub const fn new(len: usize, dots: usize) -> Option<Self> {
        if len == 0 {
            None
        } else {
            Some(Self {
                len,
                dots,
                current: 0,
            })
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Move to `index`, wrapping past either end. Returns the new position.
    ///
    /// Any index at or past the end lands on the first image and any
    /// negative index on the last one.
    pub fn go_to(&mut self, index: isize) -> usize {
        self.current = match usize::try_from(index) {
            Ok(i) if i < self.len => i,
            Ok(_) => 0,
            Err(_) => self.len - 1,
        };
        self.current
    }

    pub fn next(&mut self) -> usize {
        self.go_to(self.offset(1))
    }

    pub fn prev(&mut self) -> usize {
        self.go_to(self.offset(-1))
    }

    fn offset(&self, delta: isize) -> isize {
        isize::try_from(self.current).unwrap_or(isize::MAX).saturating_add(delta)
    }

    /// Images represented by each dot.
    #[must_use]
    pub const fn images_per_dot(&self) -> usize {
        if self.dots == 0 {
            self.len
        } else {
            self.len.div_ceil(self.dots)
        }
    }

    #[must_use]
    pub const fn active_dot(&self) -> Option<usize> {
        if self.dots == 0 {
            None
        } else {
            Some(self.current / self.images_per_dot())
        }
    }

    /// First image of the group a dot stands for.
    #[must_use]
    pub const fn image_for_dot(&self, dot: usize) -> usize {
        dot * self.images_per_dot()
    }

    pub fn select_dot(&mut self, dot: usize) -> usize {
        let target = isize::try_from(self.image_for_dot(dot)).unwrap_or(isize::MAX);
        self.go_to(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_gallery_is_inert() {
        assert!(Gallery::new(0, 4).is_none());
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut g = Gallery::new(8, 4).unwrap();
        assert_eq!(g.prev(), 7);
        assert_eq!(g.next(), 0);
        assert_eq!(g.go_to(8), 0);
        assert_eq!(g.go_to(-3), 7);
        assert_eq!(g.go_to(5), 5);
    }

    #[test]
    fn dots_group_images() {
        let mut g = Gallery::new(8, 4).unwrap();
        assert_eq!(g.images_per_dot(), 2);
        g.go_to(5);
        assert_eq!(g.active_dot(), Some(2));
        assert_eq!(g.select_dot(3), 6);
        assert_eq!(g.active_dot(), Some(3));
    }

    #[test]
    fn uneven_groups_round_up() {
        let mut g = Gallery::new(7, 3).unwrap();
        assert_eq!(g.images_per_dot(), 3);
        g.go_to(6);
        assert_eq!(g.active_dot(), Some(2));
        // a dot past the end wraps to the first image
        let mut g = Gallery::new(3, 5).unwrap();
        assert_eq!(g.select_dot(4), 0);
    }

    #[test]
    fn no_dots_means_no_active_dot() {
        let g = Gallery::new(3, 0).unwrap();
        assert_eq!(g.active_dot(), None);
        assert_eq!(g.len(), 3);
        assert_eq!(g.current(), 0);
    }
}
