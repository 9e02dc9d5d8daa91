//! Listing page: load once, then filter and sort locally.

use std::collections::HashMap;

use futures::future::join_all;
use url::Url;

use storefront_core::ProductId;
use storefront_products::{
    CategorySelection, FilterState, Product, RatingIndex, RatingSummary, SortMode, catalog_view,
    display_average, star_count,
};

use crate::backend::StorefrontBackend;
use crate::config::{RatingSource, StorefrontPolicy};
use crate::images::{CacheBuster, resolve_image};
use crate::query::detail_link;

/// Loads listing pages from a backend according to a theme policy.
pub struct CatalogAggregator<B> {
    backend: B,
    policy: StorefrontPolicy,
}

impl<B: StorefrontBackend> CatalogAggregator<B> {
    pub fn new(backend: B, policy: StorefrontPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn policy(&self) -> &StorefrontPolicy {
        &self.policy
    }

    /// Fetch products and ratings concurrently.
    ///
    /// Never fails: a failed product fetch gives an empty listing and a
    /// failed rating fetch gives an empty rating index.
    pub async fn load_catalog(&self) -> CatalogPage {
        let (products, summaries) = tokio::join!(self.load_products(), self.load_ratings());

        tracing::info!(
            products = products.len(),
            ratings = summaries.len(),
            "catalog loaded"
        );

        CatalogPage {
            products,
            ratings: RatingIndex::new(summaries, self.policy.static_rating_fallback),
            filter: FilterState::default(),
            origin: self.backend.origin().clone(),
        }
    }

    async fn load_products(&self) -> Vec<Product> {
        match self.backend.all_products().await {
            Ok(products) => products,
            Err(error) => {
                tracing::error!(%error, "failed to load products");
                Vec::new()
            }
        }
    }

    async fn load_ratings(&self) -> HashMap<ProductId, RatingSummary> {
        match &self.policy.rating_source {
            RatingSource::FlatSummary => match self.backend.flat_rating_summaries().await {
                Ok(summaries) => summaries,
                Err(error) => {
                    tracing::warn!(%error, "failed to load rating summaries");
                    HashMap::new()
                }
            },
            RatingSource::CommentDocuments { categories } => {
                let fetches = categories.iter().map(|category| async move {
                    (category, self.backend.category_comments(category).await)
                });

                let mut summaries = HashMap::new();
                for (category, result) in join_all(fetches).await {
                    match result {
                        Ok(document) => {
                            summaries.extend(RatingSummary::for_comment_document(&document));
                        }
                        Err(error) => {
                            tracing::warn!(%category, %error, "skipping category comments");
                        }
                    }
                }
                summaries
            }
        }
    }
}

/// One listing page session: the loaded snapshot plus the current controls.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    products: Vec<Product>,
    ratings: RatingIndex,
    filter: FilterState,
    origin: Url,
}

/// What a listing card renders for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard<'a> {
    pub product: &'a Product,
    pub average: f64,
    pub display_average: f64,
    pub stars: usize,
    pub total: u64,
    pub image_url: Option<Url>,
    pub detail_link: Option<String>,
}

impl CatalogPage {
    pub fn new(products: Vec<Product>, ratings: RatingIndex, origin: Url) -> Self {
        Self {
            products,
            ratings,
            filter: FilterState::default(),
            origin,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn ratings(&self) -> &RatingIndex {
        &self.ratings
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    pub fn set_category(&mut self, category: CategorySelection) {
        self.filter.category = category;
    }

    pub fn set_price_range(&mut self, min: Option<f64>, max: Option<f64>) {
        self.filter.min_price = min;
        self.filter.max_price = max;
    }

    pub fn set_min_rating(&mut self, threshold: Option<f64>) {
        self.filter.min_rating = threshold;
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.filter.sort = sort;
    }

    pub fn rating_average(&self, product: &Product) -> f64 {
        self.ratings.average(product)
    }

    /// Products for the current controls, filtered then sorted.
    pub fn visible(&self) -> Vec<&Product> {
        catalog_view(&self.products, &self.filter, &self.ratings)
    }

    /// Cards for the visible products; `stamp` is shared by the whole pass.
    pub fn cards(&self, stamp: CacheBuster) -> Vec<ProductCard<'_>> {
        self.visible()
            .into_iter()
            .map(|product| {
                let average = self.ratings.average(product);
                ProductCard {
                    product,
                    average,
                    display_average: display_average(average),
                    stars: star_count(average),
                    total: self.ratings.total(product),
                    image_url: product
                        .primary_image()
                        .and_then(|path| resolve_image(&self.origin, path, stamp)),
                    detail_link: detail_link(product),
                }
            })
            .collect()
    }
}
