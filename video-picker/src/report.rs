//! Per-term and overall leaderboards.

use crate::scoring::{VideoRecord, sort_by_score};
use indexmap::IndexMap;
use std::io::{self, Write};

/// Key under which [`Leaderboard::get`] returns the overall ranking.
pub const OVERALL_KEY: &str = "top_videos";

const SEPARATOR: &str = "==========================";

/// Ranked videos for every search term, plus the ranking across all of them.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    /// Per-term rankings, in the order the terms were searched.
    terms: IndexMap<String, Vec<VideoRecord>>,
    /// Every per-term ranking merged and re-ranked by score.
    overall: Vec<VideoRecord>,
}

impl Leaderboard {
    /// Builds a leaderboard from each term's scored videos.
    ///
    /// Each term's videos are sorted by score, and the overall ranking is the score-sorted
    /// concatenation of all of them, so it does not depend on the order of the terms beyond
    /// breaking exact ties. If a term appears twice, the later results replace the earlier ones
    /// in the per-term view, but both contribute to the overall ranking.
    pub fn new(results: impl IntoIterator<Item = (String, Vec<VideoRecord>)>) -> Self {
        let mut terms = IndexMap::new();
        let mut overall = Vec::new();
        for (term, mut videos) in results {
            sort_by_score(&mut videos);
            overall.extend(videos.iter().cloned());
            terms.insert(term, videos);
        }
        sort_by_score(&mut overall);
        Self { terms, overall }
    }

    pub fn overall(&self) -> &[VideoRecord] {
        &self.overall
    }

    pub fn term(&self, term: &str) -> Option<&[VideoRecord]> {
        self.terms.get(term).map(Vec::as_slice)
    }

    /// Looks up a term's ranking, or the overall ranking for [`OVERALL_KEY`].
    pub fn get(&self, key: &str) -> Option<&[VideoRecord]> {
        if key == OVERALL_KEY {
            return Some(&self.overall);
        }
        self.term(key)
    }

    /// Iterates over the per-term rankings in search order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &[VideoRecord])> {
        self.terms
            .iter()
            .map(|(term, videos)| (term.as_str(), videos.as_slice()))
    }

    /// Writes the overall top `num_to_print`, then the top `num_to_print` of each term.
    pub fn print(&self, out: &mut impl Write, num_to_print: usize) -> io::Result<()> {
        writeln!(out, "THE TOP VIDEOS OVERALL ARE:")?;
        print_top_videos(out, &self.overall, num_to_print)?;
        writeln!(out, "{SEPARATOR}")?;
        writeln!(out)?;

        for (term, videos) in self.terms() {
            writeln!(out, "THE TOP VIDEOS FOR SEARCH TERM '{term}':")?;
            print_top_videos(out, videos, num_to_print)?;
        }
        Ok(())
    }
}

/// Writes up to `num_to_print` videos with their rank, or a notice if there are none.
pub fn print_top_videos(
    out: &mut impl Write,
    videos: &[VideoRecord],
    num_to_print: usize,
) -> io::Result<()> {
    let shown = &videos[..videos.len().min(num_to_print)];
    if shown.is_empty() {
        writeln!(out, "No video results found")?;
        return Ok(());
    }

    for (i, video) in shown.iter().enumerate() {
        writeln!(out, "Video #{}:", i + 1)?;
        writeln!(
            out,
            "The video '{}' has {} views, from a channel with {} subscribers \
             and can be viewed here: {}",
            video.title, video.views, video.subscribers, video.video_url
        )?;
        writeln!(out)?;
        writeln!(out, "{SEPARATOR}")?;
        writeln!(out)?;
    }
    Ok(())
}
