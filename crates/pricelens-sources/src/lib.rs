//! Platform source adapters and the concurrent aggregation pipeline.
//!
//! Each adapter knows how to fetch one SKU from one platform's API and tag
//! the response with its origin; the [`Aggregator`] fans fetches out to all
//! configured adapters at once and collects whatever arrives, isolating
//! per-platform failures.

mod adapter;
mod aggregator;
mod amazon;
mod client;
mod error;
mod flipkart;
mod retry;
mod shopify;

pub use adapter::{FetchSettings, Gateway, SourceAdapter};
pub use aggregator::Aggregator;
pub use amazon::AmazonAdapter;
pub use error::SourceError;
pub use flipkart::FlipkartAdapter;
pub use shopify::ShopifyAdapter;
