//! Rating lookup for the listing page and the filter → sort pipeline.

use std::collections::HashMap;

use storefront_core::ProductId;

use crate::filter::{FilterState, apply_filter, apply_sort};
use crate::product::Product;
use crate::rating::RatingSummary;

/// Rating summaries keyed by product id, loaded once per listing page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingIndex {
    summaries: HashMap<ProductId, RatingSummary>,
    static_fallback: bool,
}

impl RatingIndex {
    /// `static_fallback` lets a product's own `rating` field stand in when
    /// the index has no summary for it.
    pub fn new(summaries: HashMap<ProductId, RatingSummary>, static_fallback: bool) -> Self {
        Self {
            summaries,
            static_fallback,
        }
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    pub fn summary(&self, id: &ProductId) -> Option<&RatingSummary> {
        self.summaries.get(id)
    }

    /// Average used for display, filtering and sorting.
    pub fn average(&self, product: &Product) -> f64 {
        if let Some(summary) = self.summaries.get(&product.id) {
            return summary.avg;
        }
        if self.static_fallback {
            return product.rating.unwrap_or(0.0);
        }
        0.0
    }

    /// Number of votes behind the average (0 when unknown).
    pub fn total(&self, product: &Product) -> u64 {
        self.summaries.get(&product.id).map_or(0, |s| s.total)
    }
}

/// Products to show for the current controls: filtered, then sorted.
pub fn catalog_view<'a>(
    products: &'a [Product],
    state: &FilterState,
    ratings: &RatingIndex,
) -> Vec<&'a Product> {
    let mut visible = apply_filter(products, state, ratings);
    apply_sort(&mut visible, state.sort, ratings);
    tracing::debug!(
        total = products.len(),
        visible = visible.len(),
        sort = state.sort.as_str(),
        "catalog view computed"
    );
    visible
}
