//! Crawler module
//!
//! This module contains the sequential crawl logic:
//! - HTTP fetching with fixed headers and timeout
//! - Pagination traversal and per-article processing
//! - The top-level failure boundary that guarantees an output artifact

mod coordinator;
mod fetcher;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_page};
