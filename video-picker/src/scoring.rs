//! Turns raw search results into ranked [`VideoRecord`]s.
//!
//! The score favours videos that draw many views relative to the size of their channel and
//! relative to how long they have been online:
//!
//! ```text
//! score = views × min(views / subscribers, 5) / max(1, days since published)
//! ```
//!
//! Capping the ratio at 5 keeps a single viral hit on a tiny channel from dominating the
//! ranking on ratio alone.

use crate::youtube_api::{SearchResult, YouTubeClient, client::MAX_SEARCH_RESULTS};
use eyre::Context;
use jiff::{SignedDuration, Span, Timestamp, tz::TimeZone};
use tracing::instrument;

/// Videos with this many views or fewer are never ranked.
pub const DEFAULT_VIEWS_THRESHOLD: u64 = 5000;

/// Subscriber count assumed for channels that hide theirs.
///
/// This is a stand-in for "a large channel", not a measurement. It feeds straight into the
/// ratio, so channels that hide their count are ranked as if they had this many subscribers.
pub const DEFAULT_HIDDEN_SUBSCRIBER_COUNT: u64 = 1_000_000;

/// Upper bound on the view/subscriber ratio used in the score.
pub const MAX_RATIO: f64 = 5.0;

/// Tunables of the scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Minimum number of views (exclusive) for a video to be ranked.
    pub views_threshold: u64,
    /// Subscriber count used for channels that hide theirs.
    pub hidden_subscriber_count: u64,
    /// How many search results to request per term.
    pub max_results: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            views_threshold: DEFAULT_VIEWS_THRESHOLD,
            hidden_subscriber_count: DEFAULT_HIDDEN_SUBSCRIBER_COUNT,
            max_results: MAX_SEARCH_RESULTS,
        }
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoRecord {
    pub title: String,
    pub video_url: String,
    pub score: f64,
    pub views: u64,
    pub channel_name: String,
    /// May be the hidden-count stand-in rather than a real count.
    pub subscribers: u64,
    /// View/subscriber ratio, already capped at [`MAX_RATIO`].
    pub ratio: f64,
    pub channel_url: String,
    pub published_at: Timestamp,
    pub days_since_published: i64,
}

impl VideoRecord {
    /// Scores a search result given its view and subscriber counts.
    pub fn from_search_result(
        result: SearchResult,
        views: u64,
        subscribers: u64,
        now: Timestamp,
    ) -> Self {
        let days = days_since_published(result.snippet.published_at, now);
        let ratio = view_to_subscriber_ratio(views, subscribers);
        let score = custom_score(views, ratio, days);

        Self {
            video_url: result.video_url(),
            channel_url: result.channel_url(),
            title: result.snippet.title,
            score,
            views,
            channel_name: result.snippet.channel_title,
            subscribers,
            ratio: ratio.min(MAX_RATIO),
            published_at: result.snippet.published_at,
            days_since_published: days,
        }
    }
}

/// Whole days between `published` and `now`, never less than one.
///
/// Same-day uploads count as one day old so that they can be divided by.
pub fn days_since_published(published: Timestamp, now: Timestamp) -> i64 {
    let age = now.duration_since(published);
    let days = age
        .as_secs()
        .div_euclid(SignedDuration::from_hours(24).as_secs());
    days.max(1)
}

/// Views per subscriber, or zero for channels without subscribers.
pub fn view_to_subscriber_ratio(views: u64, subscribers: u64) -> f64 {
    if subscribers == 0 {
        return 0.0;
    }
    views as f64 / subscribers as f64
}

/// `views × min(ratio, 5) / days`.
pub fn custom_score(views: u64, ratio: f64, days_since_published: i64) -> f64 {
    let ratio = ratio.min(MAX_RATIO);
    (views as f64 * ratio) / days_since_published.max(1) as f64
}

/// Sorts by score, highest first, keeping discovery order among equal scores.
pub fn sort_by_score(records: &mut [VideoRecord]) {
    records.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Midnight (UTC) at the start of the day `days` days before `now`.
///
/// This is the `publishedAfter` bound of a search.
pub fn start_of_search_period(now: Timestamp, days: u32) -> eyre::Result<Timestamp> {
    let today = now.to_zoned(TimeZone::UTC).date();
    let span = Span::new()
        .try_days(i64::from(days))
        .with_context(|| format!("search period of {days} days is too long"))?;
    let start = today
        .checked_sub(span)
        .with_context(|| format!("go back {days} days from {today}"))?;
    let start = start
        .to_zoned(TimeZone::UTC)
        .with_context(|| format!("find midnight UTC on {start}"))?;
    Ok(start.timestamp())
}

/// Searches for `term` and scores every result that clears the view threshold.
///
/// Each result costs one view-count lookup, and each result above the threshold one more
/// subscriber-count lookup. Any failing lookup aborts the whole term.
#[instrument(skip(client, config, now), level = tracing::Level::DEBUG)]
pub async fn rank_search_results(
    client: &YouTubeClient,
    term: &str,
    published_after: Timestamp,
    config: &ScoringConfig,
    now: Timestamp,
) -> eyre::Result<Vec<VideoRecord>> {
    let results = client
        .search(term, published_after, config.max_results)
        .await
        .wrap_err_with(|| format!("search YouTube for '{term}'"))?;
    let candidates = results.len();

    let mut records = Vec::new();
    for result in results {
        let views = client
            .fetch_view_count(&result.video_id)
            .await
            .wrap_err_with(|| format!("fetch view count of video {}", result.video_id))?;

        if views <= config.views_threshold {
            tracing::trace!(
                video_id = result.video_id,
                views,
                "skipping video below view threshold"
            );
            continue;
        }

        let subscribers = client
            .fetch_subscriber_count(&result.snippet.channel_id, config.hidden_subscriber_count)
            .await
            .wrap_err_with(|| {
                format!(
                    "fetch subscriber count of channel {}",
                    result.snippet.channel_id
                )
            })?;

        records.push(VideoRecord::from_search_result(result, views, subscribers, now));
    }

    sort_by_score(&mut records);

    tracing::info!(term, candidates, ranked = records.len(), "ranked search results");

    Ok(records)
}
