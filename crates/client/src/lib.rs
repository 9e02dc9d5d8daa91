//! `storefront-client`
//!
//! **Responsibility:** page-level aggregation for the storefront themes.
//!
//! This crate provides:
//! - A typed client for the storefront REST backend
//! - The listing page session (load, filter, sort)
//! - The detail page session (load, rating fallback, comment pages, gallery,
//!   size picker)
//!
//! The backend is an external collaborator; everything here is read-only.

pub mod backend;
pub mod catalog;
pub mod config;
pub mod detail;
pub mod error;
pub mod images;
pub mod query;

#[cfg(test)]
mod testing;

pub use backend::{CommentDocument, HttpBackend, StorefrontBackend};
pub use catalog::{CatalogAggregator, CatalogPage, ProductCard};
pub use config::{ConfigError, RatingSource, StorefrontConfig, StorefrontPolicy, Theme};
pub use detail::{DetailAggregator, DetailOutcome, DetailPage, SummarySource};
pub use error::FetchError;
pub use images::{CacheBuster, resolve_image};
pub use query::{DetailQuery, MissingParameter, detail_link};
