//! YouTube Data API v3 client library.
//!
//! This module covers the read-only, API-key authenticated part of the YouTube Data API that
//! the picker needs: searching for recently published videos and looking up the statistics of
//! individual videos and channels.
//!
//! # Call Pattern
//!
//! A single search yields up to 50 [`search::SearchResult`]s. Search results carry no view or
//! subscriber counts, so each one is followed by one `videos.list` lookup and, if the video is
//! popular enough to be ranked, one `channels.list` lookup. Nothing is batched.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use video_picker::youtube_api::YouTubeClient;
//!
//! # async fn example() -> eyre::Result<()> {
//! let client = YouTubeClient::new("my-api-key", reqwest::Client::new());
//! let since = "2025-01-01T00:00:00Z".parse()?;
//! for result in client.search("cats", since, 50).await? {
//!     let views = client.fetch_view_count(&result.video_id).await?;
//!     println!("{}: {views} views", result.snippet.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod client;
pub mod search;
pub mod types;
pub mod videos;

pub use client::{DEFAULT_BASE_URL, YouTubeClient};
pub use search::{SearchResult, SearchResultSnippet};
