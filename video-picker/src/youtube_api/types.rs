//! Types shared between the YouTube API list responses.

/// Paging details for lists of resources.
///
/// Only the first page is ever requested, so only the total is of interest.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Default, serde::Deserialize)]
pub struct PageInfo {
    /// The (approximate) total number of results in the result set.
    #[serde(rename = "totalResults", default)]
    pub total_results: u32,
}

/// Parses one of the decimal-string counters the API uses for statistics.
///
/// The API encodes `unsigned long` values as JSON strings.
pub(crate) fn parse_count(field: &str, value: &str) -> eyre::Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| eyre::eyre!("parse {field} '{value}' as a count: {e}"))
}
