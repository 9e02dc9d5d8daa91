//! Detail-page image gallery with a wrapping main-image pointer.

use storefront_core::{DomainError, DomainResult};

/// Ordered image references and the index of the main image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    images: Vec<String>,
    index: usize,
}

impl Gallery {
    pub fn new(images: Vec<String>) -> Self {
        Self { images, index: 0 }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn main(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Thumbnails and arrows only make sense with two or more images.
    pub fn can_navigate(&self) -> bool {
        self.images.len() > 1
    }

    pub fn next(&mut self) -> usize {
        if self.can_navigate() {
            self.index = (self.index + 1) % self.images.len();
        }
        self.index
    }

    pub fn prev(&mut self) -> usize {
        if self.can_navigate() {
            self.index = if self.index == 0 {
                self.images.len() - 1
            } else {
                self.index - 1
            };
        }
        self.index
    }

    /// Make `index` the main image (thumbnail click).
    pub fn select(&mut self, index: usize) -> DomainResult<()> {
        if index >= self.images.len() {
            return Err(DomainError::validation(format!(
                "image index {index} out of range (gallery has {})",
                self.images.len()
            )));
        }
        self.index = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery(n: usize) -> Gallery {
        Gallery::new((0..n).map(|i| format!("images/{i}.jpg")).collect())
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut g = gallery(3);
        g.select(2).unwrap();
        assert_eq!(g.next(), 0);
        assert_eq!(g.prev(), 2);
        assert_eq!(g.main(), Some("images/2.jpg"));
    }

    #[test]
    fn single_and_empty_galleries_do_not_move() {
        let mut one = gallery(1);
        assert!(!one.can_navigate());
        assert_eq!(one.next(), 0);
        assert_eq!(one.prev(), 0);

        let mut none = gallery(0);
        assert_eq!(none.next(), 0);
        assert_eq!(none.main(), None);
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let mut g = gallery(2);
        let err = g.select(2).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(g.index(), 0);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: next then prev returns to the starting image.
            #[test]
            fn next_prev_roundtrip(n in 2usize..20, start in 0usize..20) {
                let mut g = gallery(n);
                g.select(start % n).unwrap();
                let before = g.index();
                g.next();
                prop_assert_eq!(g.prev(), before);
            }

            /// Property: n steps forward visit every image and come back.
            #[test]
            fn full_cycle_returns_home(n in 1usize..20) {
                let mut g = gallery(n);
                for _ in 0..n {
                    g.next();
                }
                prop_assert_eq!(g.index(), 0);
            }
        }
    }
}
