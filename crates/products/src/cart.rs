//! Add-to-cart button feedback.
//!
//! There is no cart: pressing the button only flips its label to "added"
//! for a short moment.

use chrono::{DateTime, Duration, Utc};

use storefront_core::{DomainError, DomainResult};

use crate::sizes::SizeSelection;

/// How long the "added" label stays up.
pub const ADDED_LABEL_SECS: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartLabel {
    /// No size picked yet (always the case for products without sizes).
    Disabled,
    Ready,
    Added,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartButton {
    pressed_at: Option<DateTime<Utc>>,
}

impl CartButton {
    pub fn press(&mut self, sizes: &SizeSelection, now: DateTime<Utc>) -> DomainResult<()> {
        if !sizes.can_add_to_cart() {
            return Err(DomainError::invariant("pick a size first"));
        }
        self.pressed_at = Some(now);
        Ok(())
    }

    pub fn label(&self, sizes: &SizeSelection, now: DateTime<Utc>) -> CartLabel {
        if !sizes.can_add_to_cart() {
            return CartLabel::Disabled;
        }
        match self.pressed_at {
            Some(at) if now - at < Duration::seconds(ADDED_LABEL_SECS) => CartLabel::Added,
            _ => CartLabel::Ready,
        }
    }
}
