use crate::config::PickerConfig;
use crate::report::Leaderboard;
use crate::youtube_api::YouTubeClient;
use eyre::Context;
use jiff::Timestamp;
use std::io::Write;

pub mod config;
pub mod report;
pub mod scoring;
pub mod youtube_api;

/// Searches every configured term, ranks the results, and prints the leaderboards to `out`.
///
/// Terms are searched one after the other, in the order given, and every API call is awaited
/// before the next one is made. Any failing call aborts the run. `now` is the reference time for
/// both the search window and the age of each video.
///
/// Returns the leaderboard that was printed.
pub async fn run(
    config: PickerConfig,
    now: Timestamp,
    out: &mut impl Write,
) -> eyre::Result<Leaderboard> {
    let client = YouTubeClient::new(config.api_key, reqwest::Client::new())
        .with_base_url(config.api_base_url);

    let published_after = scoring::start_of_search_period(now, config.search_period_days)
        .context("compute start of search period")?;
    tracing::info!(
        %published_after,
        terms = config.search_terms.len(),
        "searching for videos"
    );

    let mut results = Vec::with_capacity(config.search_terms.len());
    for term in config.search_terms {
        let videos =
            scoring::rank_search_results(&client, &term, published_after, &config.scoring, now)
                .await
                .wrap_err_with(|| format!("rank videos for search term '{term}'"))?;
        results.push((term, videos));
    }

    let leaderboard = Leaderboard::new(results);
    leaderboard
        .print(out, config.num_to_print)
        .context("write leaderboard")?;

    Ok(leaderboard)
}
