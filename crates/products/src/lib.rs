//! Catalog and product-detail rules for the storefront.
//!
//! This crate contains the storefront's business rules, implemented purely as
//! deterministic logic (no IO, no HTTP, no rendering): rating aggregation,
//! catalog filtering/sorting, comment pagination, gallery navigation and
//! size selection.

pub mod cart;
pub mod catalog;
pub mod comments;
pub mod filter;
pub mod gallery;
pub mod product;
pub mod rating;
pub mod sizes;

pub use cart::{CartButton, CartLabel};
pub use catalog::{RatingIndex, catalog_view};
pub use comments::{COMMENT_PAGE_SIZE, CommentCursor, CommentPage, CommentPolicy, eligible_comments};
pub use filter::{CategorySelection, FilterState, SortMode, apply_filter, apply_sort};
pub use gallery::Gallery;
pub use product::{Comment, Product, RawRating, StockEntry};
pub use rating::{DistributionRow, RatingSummary, display_average, star_count};
pub use sizes::{NotifyAck, SizeSelection, size_table};
