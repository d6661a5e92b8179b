//! YouTube Search API types and functionality.

use crate::youtube_api::types::PageInfo;
use jiff::Timestamp;
use serde::Deserialize;
use std::collections::VecDeque;

/// Response structure for the `search.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list>
#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    /// A list of results that match the search criteria.
    #[serde(default)]
    pub items: VecDeque<SearchResultResource>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
}

/// A `searchResult` resource as returned by the API.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#resource>
#[derive(Debug, Deserialize)]
pub struct SearchResultResource {
    pub id: SearchResultId,
    pub snippet: SearchResultSnippet,
}

/// Identifies the resource that matched the search request.
#[derive(Debug, Deserialize)]
pub struct SearchResultId {
    /// The type of the resource, e.g. `youtube#video`.
    pub kind: String,
    /// Only present when `kind` is `youtube#video`.
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

/// Basic details about a search result.
///
/// This is a subset of the full snippet, containing only the fields used for ranking.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#snippet>
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResultSnippet {
    /// The creation date and time of the resource.
    #[serde(rename = "publishedAt")]
    pub published_at: Timestamp,
    /// The ID of the channel that published the video.
    #[serde(rename = "channelId")]
    pub channel_id: String,
    pub title: String,
    /// The title of the channel that published the video.
    #[serde(rename = "channelTitle")]
    pub channel_title: String,
}

/// A video that matched a search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub video_id: String,
    pub snippet: SearchResultSnippet,
}

impl SearchResult {
    /// Turns an API resource into a [`SearchResult`], if it refers to a video.
    pub fn from_resource(resource: SearchResultResource) -> Option<Self> {
        Some(Self {
            video_id: resource.id.video_id?,
            snippet: resource.snippet,
        })
    }

    pub fn video_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }

    pub fn channel_url(&self) -> String {
        format!("https://www.youtube.com/channel/{}", self.snippet.channel_id)
    }
}
