//! Newsletter acquisition.
//!
//! - [`fetch`]: the page fetcher behind the [`PageSource`] seam
//! - [`extract`]: post-link extraction from the fetched HTML

pub mod extract;
pub mod fetch;

pub use extract::{POST_DOMAIN, extract_post_links};
pub use fetch::{PageSource, WebFetcher};
