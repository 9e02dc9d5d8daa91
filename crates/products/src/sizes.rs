//! Size picker state: one exclusive selection among the in-stock sizes.

use storefront_core::{CategoryKey, DomainError, DomainResult, ProductId};

use crate::product::StockEntry;

/// Reference size runs per category key.
pub fn size_table(category: &CategoryKey) -> &'static [&'static str] {
    match category.as_str() {
        "ayakkabi" => &["37", "38", "39", "40", "41", "42"],
        "tshirt" => &["XS", "S", "M", "L", "XL"],
        "sweat" => &["S", "M", "L", "XL"],
        "sapka" => &["Standart"],
        _ => &[],
    }
}

/// Stock entries of one product plus the currently picked size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeSelection {
    entries: Vec<StockEntry>,
    selected: Option<usize>,
}

/// Acknowledgement shown after "notify me" on an out-of-stock size.
///
/// Nothing is sent anywhere; this only carries what the popup says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyAck {
    pub product_id: ProductId,
    pub size: String,
}

impl NotifyAck {
    pub fn message(&self) -> String {
        format!(
            "You will be notified when size \"{}\" of product \"{}\" is back in stock.",
            self.size, self.product_id
        )
    }
}

impl SizeSelection {
    pub fn new(entries: Vec<StockEntry>) -> Self {
        Self {
            entries,
            selected: None,
        }
    }

    /// Entries in source order.
    pub fn entries(&self) -> &[StockEntry] {
        &self.entries
    }

    pub fn has_sizes(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn selected(&self) -> Option<&StockEntry> {
        self.selected.and_then(|i| self.entries.get(i))
    }

    pub fn can_add_to_cart(&self) -> bool {
        self.selected.is_some()
    }

    /// Pick `size`, replacing any earlier pick.
    pub fn select(&mut self, size: &str) -> DomainResult<&StockEntry> {
        let index = self.position(size)?;
        if !self.entries[index].is_available {
            return Err(DomainError::invariant(format!("size {size} is out of stock")));
        }
        self.selected = Some(index);
        Ok(&self.entries[index])
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// "Notify me" on an out-of-stock size.
    pub fn notify(&self, product_id: &ProductId, size: &str) -> DomainResult<NotifyAck> {
        let index = self.position(size)?;
        if self.entries[index].is_available {
            return Err(DomainError::invariant(format!("size {size} is in stock")));
        }
        Ok(NotifyAck {
            product_id: product_id.clone(),
            size: self.entries[index].size.clone(),
        })
    }

    fn position(&self, size: &str) -> DomainResult<usize> {
        self.entries
            .iter()
            .position(|e| e.size == size)
            .ok_or_else(|| DomainError::not_found(format!("size {size}")))
    }
}
