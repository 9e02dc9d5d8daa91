//! In-memory backend for unit tests.

use std::collections::HashMap;

use async_trait::async_trait;
use url::Url;

use storefront_core::{CategoryKey, ProductId};
use storefront_products::{Comment, Product, RatingSummary, StockEntry};

use crate::backend::{CommentDocument, StorefrontBackend};
use crate::error::FetchError;

pub(crate) struct MemoryBackend {
    pub origin: Url,
    pub products: Vec<Product>,
    pub products_error: Option<FetchError>,
    pub comments: HashMap<CategoryKey, CommentDocument>,
    pub comments_error: Option<FetchError>,
    pub failing_categories: Vec<CategoryKey>,
    pub summaries: HashMap<ProductId, RatingSummary>,
    pub summary_error: Option<FetchError>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            origin: Url::parse("http://127.0.0.1:8001/").unwrap(),
            products: Vec::new(),
            products_error: None,
            comments: HashMap::new(),
            comments_error: None,
            failing_categories: Vec::new(),
            summaries: HashMap::new(),
            summary_error: None,
        }
    }

    pub fn add_comments(&mut self, category: &str, id: &str, comments: Vec<Comment>) {
        self.comments
            .entry(category.parse().unwrap())
            .or_default()
            .insert(id.parse().unwrap(), comments);
    }
}

#[async_trait]
impl StorefrontBackend for MemoryBackend {
    fn origin(&self) -> &Url {
        &self.origin
    }

    async fn all_products(&self) -> Result<Vec<Product>, FetchError> {
        match &self.products_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.products.clone()),
        }
    }

    async fn category_products(&self, category: &CategoryKey) -> Result<Vec<Product>, FetchError> {
        if let Some(error) = &self.products_error {
            return Err(error.clone());
        }
        let products: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.in_category(category))
            .cloned()
            .collect();
        if products.is_empty() {
            return Err(FetchError::Status(404));
        }
        Ok(products)
    }

    async fn category_comments(&self, category: &CategoryKey) -> Result<CommentDocument, FetchError> {
        if let Some(error) = &self.comments_error {
            return Err(error.clone());
        }
        if self.failing_categories.contains(category) {
            return Err(FetchError::Status(500));
        }
        self.comments
            .get(category)
            .cloned()
            .ok_or(FetchError::Status(404))
    }

    async fn rating_summary(
        &self,
        _category: &CategoryKey,
        product_id: &ProductId,
    ) -> Result<Option<RatingSummary>, FetchError> {
        match &self.summary_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.summaries.get(product_id).cloned()),
        }
    }

    async fn flat_rating_summaries(&self) -> Result<HashMap<ProductId, RatingSummary>, FetchError> {
        match &self.summary_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.summaries.clone()),
        }
    }
}

pub(crate) fn product(id: &str, category: &str, price: f64, rating: Option<f64>) -> Product {
    Product {
        id: id.parse().unwrap(),
        name: format!("Product {id}"),
        price,
        category: category.to_string(),
        category_key: Some(category.parse().unwrap()),
        images: vec![format!("images/{id}.jpg"), format!("images/{id}_2.jpg")],
        stock: Some(vec![
            StockEntry { size: "S".to_string(), is_available: true },
            StockEntry { size: "M".to_string(), is_available: false },
        ]),
        rating,
        description: String::new(),
    }
}

pub(crate) fn comment(rating: f64, text: &str) -> Comment {
    Comment {
        user: "tester".to_string(),
        rating: Some(rating.into()),
        text: Some(text.to_string()),
    }
}
