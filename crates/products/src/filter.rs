//! Listing filters and sort orders.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::CategoryKey;

use crate::catalog::RatingIndex;
use crate::product::Product;

/// Which categories the listing shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategorySelection {
    #[default]
    All,
    Only(CategoryKey),
}

impl CategorySelection {
    /// Parse a category button value; `"all"` (or blank) is the sentinel.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return CategorySelection::All;
        }
        CategoryKey::new(value).map_or(CategorySelection::All, CategorySelection::Only)
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategorySelection::All => true,
            CategorySelection::Only(key) => product.in_category(key),
        }
    }
}

/// Listing sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Keep the backend order.
    #[default]
    Original,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Original => "original",
            SortMode::PriceAsc => "price-asc",
            SortMode::PriceDesc => "price-desc",
            SortMode::RatingDesc => "rating-desc",
        }
    }

    /// Parse a select value; anything unrecognised keeps the backend order.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "original" | "" => Ok(SortMode::Original),
            "price-asc" => Ok(SortMode::PriceAsc),
            "price-desc" => Ok(SortMode::PriceDesc),
            "rating-desc" => Ok(SortMode::RatingDesc),
            other => Err(format!("unknown sort mode: {other}")),
        }
    }
}

/// Current state of the listing controls.
///
/// Numeric bounds mirror what the form inputs produce: blank, unparsable
/// and zero values mean "no bound" for the maximum price and the rating
/// threshold, and zero for the minimum price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub category: CategorySelection,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub sort: SortMode,
}

impl FilterState {
    pub fn effective_min_price(&self) -> f64 {
        self.min_price.filter(|v| !v.is_nan()).unwrap_or(0.0)
    }

    pub fn effective_max_price(&self) -> f64 {
        self.max_price
            .filter(|v| !v.is_nan() && *v != 0.0)
            .unwrap_or(f64::INFINITY)
    }

    /// Rating threshold, if one is active. A threshold of 0 filters nothing.
    pub fn rating_threshold(&self) -> Option<f64> {
        self.min_rating.filter(|v| !v.is_nan() && *v != 0.0)
    }

    fn accepts(&self, product: &Product, ratings: &RatingIndex) -> bool {
        if !self.category.matches(product) {
            return false;
        }
        if product.price < self.effective_min_price() || product.price > self.effective_max_price() {
            return false;
        }
        match self.rating_threshold() {
            Some(threshold) => ratings.average(product) >= threshold,
            None => true,
        }
    }
}

/// Keep the products that pass every active filter, in input order.
pub fn apply_filter<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    state: &FilterState,
    ratings: &RatingIndex,
) -> Vec<&'a Product> {
    products
        .into_iter()
        .filter(|p| state.accepts(p, ratings))
        .collect()
}

/// Stable in-place sort; equal keys keep their relative order.
pub fn apply_sort(products: &mut [&Product], mode: SortMode, ratings: &RatingIndex) {
    match mode {
        SortMode::Original => {}
        SortMode::PriceAsc => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortMode::PriceDesc => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortMode::RatingDesc => {
            products.sort_by(|a, b| ratings.average(b).total_cmp(&ratings.average(a)))
        }
    }
}
