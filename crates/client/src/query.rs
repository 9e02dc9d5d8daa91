//! Detail page query string (`?id=..&cat=..`) and the links that produce it.

use thiserror::Error;
use url::form_urlencoded;

use storefront_core::{CategoryKey, ProductId};
use storefront_products::Product;

/// A required detail-page parameter that was absent or blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingParameter {
    #[error("missing query parameter `id`")]
    Id,
    #[error("missing query parameter `cat`")]
    Cat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailQuery {
    pub category: CategoryKey,
    pub product_id: ProductId,
}

impl DetailQuery {
    pub fn new(category: CategoryKey, product_id: ProductId) -> Self {
        Self {
            category,
            product_id,
        }
    }

    /// Parse a query string with or without the leading `?`.
    pub fn parse(query: &str) -> Result<Self, MissingParameter> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut id = None;
        let mut cat = None;
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "id" if id.is_none() => id = ProductId::new(value.into_owned()).ok(),
                "cat" if cat.is_none() => cat = CategoryKey::new(value.into_owned()).ok(),
                _ => {}
            }
        }
        let product_id = id.ok_or(MissingParameter::Id)?;
        let category = cat.ok_or(MissingParameter::Cat)?;
        Ok(Self::new(category, product_id))
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("id", self.product_id.as_str())
            .append_pair("cat", self.category.as_str())
            .finish()
    }
}

/// Link from a listing card to its detail page.
///
/// Products without a category key cannot be opened and get no link.
pub fn detail_link(product: &Product) -> Option<String> {
    let category = product.category_key.clone()?;
    let query = DetailQuery::new(category, product.id.clone());
    Some(format!("product.html?{}", query.to_query_string()))
}
