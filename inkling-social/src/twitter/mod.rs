//! Twitter/X integration surface used by the session.
//!
//! [`TwitterRead`] is the seam between the fetchers and the network; the
//! fetchers in [`posts`] and [`thread`] never see HTTP details.
pub mod client;
pub mod posts;
pub mod thread;
pub mod traits;
pub mod types;

pub use client::{TwitterApi, TwitterCredentials};
pub use posts::{fetch_post_text, fetch_post_texts, post_id_from_url};
pub use thread::{Thread, fetch_thread, thread_query};
pub use traits::TwitterRead;
