//! YouTube Videos API types.

use serde::Deserialize;
use std::collections::VecDeque;

/// Response structure for the `videos.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    /// At most one video, since lookups are by a single id.
    #[serde(default)]
    pub items: VecDeque<Video>,
}

/// A `video` resource with only its `statistics` part.
#[derive(Debug, Deserialize)]
pub struct Video {
    pub statistics: VideoStatistics,
}

/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Deserialize)]
pub struct VideoStatistics {
    /// Decimal string; absent when the owner hides it.
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserialize_full_video_payload() {
        let response: VideoListResponse = serde_json::from_value(serde_json::json!({
            "kind": "youtube#videoListResponse",
            "pageInfo": { "totalResults": 1, "resultsPerPage": 1 },
            "items": [{
                "kind": "youtube#video",
                "id": "abc123",
                "statistics": {
                    "viewCount": "10000",
                    "likeCount": "12",
                    "favoriteCount": "0",
                    "commentCount": "3"
                }
            }]
        }))
        .unwrap();
        assert_eq!(response.items[0].statistics.view_count.as_deref(), Some("10000"));

        let hidden: VideoListResponse = serde_json::from_value(serde_json::json!({
            "items": [{ "id": "abc123", "statistics": { "likeCount": "12" } }]
        }))
        .unwrap();
        assert_eq!(hidden.items[0].statistics.view_count, None);
    }
}
