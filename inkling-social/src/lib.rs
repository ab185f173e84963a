//! Social network clients and the fetchers built on them.
//!
//! Only the Twitter/X pipeline exists: a thin API client, the lenient post text
//! fetcher used for newsletter links, and thread reconstruction.
pub mod twitter;
