//! Core YouTube API client functionality.

use crate::youtube_api::{
    channels::ChannelListResponse,
    search::{SearchListResponse, SearchResult},
    types::parse_count,
    videos::VideoListResponse,
};
use eyre::Context;
use http::Method;
use jiff::Timestamp;
use std::fmt;
use tracing::instrument;

/// Where the YouTube Data API v3 lives.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// The largest page `search.list` will return.
pub const MAX_SEARCH_RESULTS: u32 = 50;

/// Client for interacting with the YouTube Data API v3.
///
/// Requests are authenticated with a plain API key rather than OAuth, which is sufficient for
/// the public search, video and channel endpoints this client calls.
#[derive(Clone)]
pub struct YouTubeClient {
    /// API key sent as the `key` query parameter on every request.
    api_key: String,
    /// Base URL of the API, without a trailing slash.
    base_url: String,
    /// HTTP client for API requests
    client: reqwest::Client,
}

// the API key must never end up in logs
impl fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl YouTubeClient {
    /// Creates a new YouTube API client that talks to [`DEFAULT_BASE_URL`].
    ///
    /// # Arguments
    ///
    /// * `api_key` - A YouTube Data API key
    /// * `client` - Shared HTTP client for making API requests
    pub fn new(api_key: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        }
    }

    /// Points the client at a different API root, such as a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Makes a key-authenticated HTTP request to the YouTube API with common error handling.
    ///
    /// The API key is appended here so that it never shows up in the traced query parameters.
    /// reqwest errors carry the request URL, key included, so the URL is stripped from them.
    /// Any non-success status is turned into an error that carries the status code and the
    /// response body, which is where YouTube explains quota and key problems.
    #[instrument(skip(self), level = tracing::Level::TRACE)]
    async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> eyre::Result<reqwest::Response> {
        let url = format!("{}/{endpoint}", self.base_url);

        let response = self
            .client
            .request(method.clone(), &url)
            .query(query_params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("send {method} request to YouTube API: {endpoint}"))?;

        let status_code = response.status();
        if !status_code.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(eyre::eyre!(
                "YouTube API {} {} request failed with status {}: {}",
                method,
                endpoint,
                status_code,
                error_text
            ));
        }

        Ok(response)
    }

    /// Searches for videos matching `term` that were published after `published_after`.
    ///
    /// Results are ordered by view count as YouTube reports it, and only the first page of at
    /// most `max_results` (capped at [`MAX_SEARCH_RESULTS`]) is fetched. Results that are not
    /// videos are dropped.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self), level = tracing::Level::DEBUG)]
    pub async fn search(
        &self,
        term: &str,
        published_after: Timestamp,
        max_results: u32,
    ) -> eyre::Result<Vec<SearchResult>> {
        let max_results_string = max_results.clamp(1, MAX_SEARCH_RESULTS).to_string();
        let published_after_string = published_after.strftime("%Y-%m-%dT%H:%M:%SZ").to_string();
        let query_params = [
            ("part", "snippet"),
            ("type", "video"),
            ("order", "viewCount"),
            ("maxResults", max_results_string.as_str()),
            ("q", term),
            ("publishedAfter", published_after_string.as_str()),
        ];

        let response = self
            .make_request(Method::GET, "search", &query_params)
            .await?;

        let search: SearchListResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("parse YouTube search API response as JSON")?;

        tracing::debug!(
            term,
            total_results = search.page_info.total_results,
            returned_items = search.items.len(),
            "fetched search results"
        );

        let mut results = Vec::with_capacity(search.items.len());
        for resource in search.items {
            let kind = resource.id.kind.clone();
            match SearchResult::from_resource(resource) {
                Some(result) => results.push(result),
                None => {
                    tracing::warn!(term, kind = %kind, "search returned a result without a video id")
                }
            }
        }
        Ok(results)
    }

    /// Looks up the current view count of a single video.
    ///
    /// Videos whose owner hides the view count are treated as having no views.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self), ret, level = tracing::Level::DEBUG)]
    pub async fn fetch_view_count(&self, video_id: &str) -> eyre::Result<u64> {
        let query_params = [("part", "statistics"), ("id", video_id)];

        let response = self
            .make_request(Method::GET, "videos", &query_params)
            .await?;

        let videos: VideoListResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("parse YouTube videos API response as JSON")?;

        let video = videos
            .items
            .into_iter()
            .next()
            .ok_or_else(|| eyre::eyre!("video not found: {}", video_id))?;

        match video.statistics.view_count {
            Some(views) => parse_count("viewCount", &views),
            None => {
                tracing::debug!(video_id, "video hides its view count");
                Ok(0)
            }
        }
    }

    /// Looks up the subscriber count of a channel.
    ///
    /// Channels can hide their subscriber count, in which case `hidden_sentinel` is returned in
    /// place of the real number.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self), ret, level = tracing::Level::DEBUG)]
    pub async fn fetch_subscriber_count(
        &self,
        channel_id: &str,
        hidden_sentinel: u64,
    ) -> eyre::Result<u64> {
        let query_params = [("part", "statistics"), ("id", channel_id)];

        let response = self
            .make_request(Method::GET, "channels", &query_params)
            .await?;

        let channels: ChannelListResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)
            .context("parse YouTube channels API response as JSON")?;

        let channel = channels
            .items
            .into_iter()
            .next()
            .ok_or_else(|| eyre::eyre!("channel not found: {}", channel_id))?;

        if channel.statistics.hidden_subscriber_count {
            tracing::debug!(channel_id, "channel hides its subscriber count");
            return Ok(hidden_sentinel);
        }

        let subscribers = channel
            .statistics
            .subscriber_count
            .ok_or_else(|| eyre::eyre!("channel {channel_id} has no subscriber count"))?;
        parse_count("subscriberCount", &subscribers)
    }
}
