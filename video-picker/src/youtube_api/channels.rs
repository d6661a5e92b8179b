//! YouTube Channels API types.

use serde::Deserialize;
use std::collections::VecDeque;

/// Response structure for the `channels.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels/list>
#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: VecDeque<Channel>,
}

/// A `channel` resource with only its `statistics` part.
#[derive(Debug, Deserialize)]
pub struct Channel {
    pub statistics: ChannelStatistics,
}

/// Statistics about the channel.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#statistics>
#[derive(Debug, Deserialize)]
pub struct ChannelStatistics {
    /// The number of subscribers that the channel has.
    ///
    /// The API rounds this down to three significant figures, and omits it entirely
    /// when [`Self::hidden_subscriber_count`] is set.
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: Option<String>,
    /// Indicates whether the channel's subscriber count is publicly visible.
    #[serde(rename = "hiddenSubscriberCount", default)]
    pub hidden_subscriber_count: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserialize_full_channel_payload() {
        let response: ChannelListResponse = serde_json::from_value(serde_json::json!({
            "kind": "youtube#channelListResponse",
            "etag": "abc",
            "pageInfo": { "totalResults": 2, "resultsPerPage": 5 },
            "items": [
                {
                    "kind": "youtube#channel",
                    "id": "UCpublic",
                    "statistics": {
                        "viewCount": "123456",
                        "subscriberCount": "2000",
                        "hiddenSubscriberCount": false,
                        "videoCount": "42"
                    }
                },
                {
                    "kind": "youtube#channel",
                    "id": "UCsecret",
                    "statistics": {
                        "viewCount": "99",
                        "hiddenSubscriberCount": true,
                        "videoCount": "1"
                    }
                }
            ]
        }))
        .unwrap();

        let stats: Vec<_> = response.items.iter().map(|c| &c.statistics).collect();
        assert_eq!(stats[0].subscriber_count.as_deref(), Some("2000"));
        assert!(!stats[0].hidden_subscriber_count);
        assert_eq!(stats[1].subscriber_count, None);
        assert!(stats[1].hidden_subscriber_count);
    }
}
