//! Detail page: one product with its ratings, comments, gallery and sizes.

use chrono::{DateTime, Utc};
use url::Url;

use storefront_core::{CategoryKey, DomainResult, ProductId};
use storefront_products::{
    CartButton, CartLabel, Comment, CommentCursor, CommentPage, CommentPolicy, DistributionRow,
    Gallery, NotifyAck, Product, RatingSummary, SizeSelection, StockEntry, display_average,
    eligible_comments, size_table, star_count,
};

use crate::backend::{CommentDocument, StorefrontBackend};
use crate::config::StorefrontPolicy;
use crate::error::FetchError;
use crate::images::{CacheBuster, resolve_image};
use crate::query::{DetailQuery, MissingParameter};

/// Loads detail pages from a backend according to a theme policy.
pub struct DetailAggregator<B> {
    backend: B,
    policy: StorefrontPolicy,
}

/// Result of loading a detail page.
#[derive(Debug, Clone)]
pub enum DetailOutcome {
    Loaded(Box<DetailPage>),
    /// `id` or `cat` was missing; nothing was fetched.
    MissingParameter(MissingParameter),
    /// The category listing does not contain the product.
    NotFound {
        category: CategoryKey,
        product_id: ProductId,
    },
    /// The product or comment fetch failed.
    LoadFailed(FetchError),
}

impl DetailOutcome {
    pub fn page(&self) -> Option<&DetailPage> {
        match self {
            DetailOutcome::Loaded(page) => Some(page),
            _ => None,
        }
    }

    pub fn into_page(self) -> Option<DetailPage> {
        match self {
            DetailOutcome::Loaded(page) => Some(*page),
            _ => None,
        }
    }
}

/// Where the detail page's rating summary came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySource {
    Backend,
    /// Computed from the product's comments after the backend had none.
    Derived,
}

impl<B: StorefrontBackend> DetailAggregator<B> {
    pub fn new(backend: B, policy: StorefrontPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load from a raw `?id=..&cat=..` query string.
    pub async fn load_from_query(&self, query: &str) -> DetailOutcome {
        match DetailQuery::parse(query) {
            Ok(q) => self.load_detail(&q.category, &q.product_id).await,
            Err(missing) => {
                tracing::info!(%missing, "detail page opened without required parameters");
                DetailOutcome::MissingParameter(missing)
            }
        }
    }

    /// Fetch the category products, its comments and the rating summary
    /// concurrently, then assemble the page.
    pub async fn load_detail(&self, category: &CategoryKey, product_id: &ProductId) -> DetailOutcome {
        let (products, comments, summary) = tokio::join!(
            self.backend.category_products(category),
            self.backend.category_comments(category),
            self.backend.rating_summary(category, product_id),
        );

        let products = match products {
            Ok(products) => Some(products),
            Err(error) if error.is_not_found() => None,
            Err(error) => {
                tracing::error!(%category, %product_id, %error, "failed to load products");
                return DetailOutcome::LoadFailed(error);
            }
        };

        let mut document = match comments {
            Ok(document) => document,
            Err(error) if error.is_not_found() => CommentDocument::new(),
            Err(error) => {
                tracing::error!(%category, %product_id, %error, "failed to load comments");
                return DetailOutcome::LoadFailed(error);
            }
        };

        let Some(mut product) = products
            .into_iter()
            .flatten()
            .find(|p| &p.id == product_id)
        else {
            tracing::info!(%category, %product_id, "product not found");
            return DetailOutcome::NotFound {
                category: category.clone(),
                product_id: product_id.clone(),
            };
        };
        if product.category_key.is_none() {
            product.category_key = Some(category.clone());
        }

        let fetched = match summary {
            Ok(summary) => summary,
            Err(error) => {
                tracing::warn!(%category, %product_id, %error, "rating summary unavailable, deriving from comments");
                None
            }
        };
        let source = if fetched.is_some() {
            SummarySource::Backend
        } else {
            SummarySource::Derived
        };

        let comments = document.remove(product_id).unwrap_or_default();
        let summary = RatingSummary::resolve(fetched, &comments);

        tracing::debug!(
            %category,
            %product_id,
            comments = comments.len(),
            ratings = summary.total,
            ?source,
            "detail loaded"
        );

        DetailOutcome::Loaded(Box::new(DetailPage::new(
            product,
            comments,
            summary,
            source,
            &self.policy,
            self.backend.origin().clone(),
        )))
    }
}

/// One detail page session.
///
/// Created per load; reloading starts a fresh comment cursor, gallery and
/// size selection.
#[derive(Debug, Clone)]
pub struct DetailPage {
    product: Product,
    comments: Vec<Comment>,
    summary: RatingSummary,
    summary_source: SummarySource,
    comment_policy: CommentPolicy,
    static_rating_fallback: bool,
    origin: Url,
    cursor: CommentCursor,
    gallery: Gallery,
    sizes: SizeSelection,
    cart: CartButton,
}

impl DetailPage {
    pub fn new(
        product: Product,
        comments: Vec<Comment>,
        summary: RatingSummary,
        summary_source: SummarySource,
        policy: &StorefrontPolicy,
        origin: Url,
    ) -> Self {
        let gallery = Gallery::new(product.images.clone());
        let sizes = SizeSelection::new(product.stock_entries().to_vec());
        Self {
            product,
            comments,
            summary,
            summary_source,
            comment_policy: policy.comment_policy,
            static_rating_fallback: policy.static_rating_fallback,
            origin,
            cursor: CommentCursor::new(),
            gallery,
            sizes,
            cart: CartButton::default(),
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn summary(&self) -> &RatingSummary {
        &self.summary
    }

    pub fn summary_source(&self) -> SummarySource {
        self.summary_source
    }

    /// All comments of the product, displayable or not.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Average shown in the header; the static product rating stands in for
    /// an empty summary when the policy allows it.
    pub fn average(&self) -> f64 {
        if self.summary.total == 0 && self.static_rating_fallback {
            return self.product.rating.unwrap_or(0.0);
        }
        self.summary.avg
    }

    pub fn display_average(&self) -> f64 {
        display_average(self.average())
    }

    pub fn stars(&self) -> usize {
        star_count(self.average())
    }

    pub fn distribution(&self) -> Vec<DistributionRow> {
        self.summary.distribution()
    }

    pub fn comment_page(&self) -> CommentPage<'_> {
        self.cursor
            .page(eligible_comments(&self.comments, self.comment_policy))
    }

    pub fn show_more_comments(&mut self) -> CommentPage<'_> {
        self.cursor.show_more();
        self.comment_page()
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn next_image(&mut self) -> usize {
        self.gallery.next()
    }

    pub fn prev_image(&mut self) -> usize {
        self.gallery.prev()
    }

    pub fn select_image(&mut self, index: usize) -> DomainResult<()> {
        self.gallery.select(index)
    }

    /// Gallery images as absolute URLs, all stamped with `stamp`.
    pub fn image_urls(&self, stamp: CacheBuster) -> Vec<Url> {
        self.gallery
            .images()
            .iter()
            .filter_map(|path| resolve_image(&self.origin, path, stamp))
            .collect()
    }

    pub fn main_image_url(&self, stamp: CacheBuster) -> Option<Url> {
        self.gallery
            .main()
            .and_then(|path| resolve_image(&self.origin, path, stamp))
    }

    pub fn sizes(&self) -> &SizeSelection {
        &self.sizes
    }

    /// Reference size run for the product's category.
    pub fn size_table(&self) -> &'static [&'static str] {
        match &self.product.category_key {
            Some(key) => size_table(key),
            None => &[],
        }
    }

    pub fn select_size(&mut self, size: &str) -> DomainResult<&StockEntry> {
        self.sizes.select(size)
    }

    pub fn notify_me(&self, size: &str) -> DomainResult<NotifyAck> {
        self.sizes.notify(&self.product.id, size)
    }

    pub fn add_to_cart(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.cart.press(&self.sizes, now)?;
        tracing::info!(product_id = %self.product.id, size = ?self.sizes.selected().map(|s| &s.size), "added to cart");
        Ok(())
    }

    pub fn cart_label(&self, now: DateTime<Utc>) -> CartLabel {
        self.cart.label(&self.sizes, now)
    }
}
