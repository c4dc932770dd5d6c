use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::channel::resolve_channel_id;
use crate::chapters::{merge_chapter_sets, BrowserLauncher, ChapterScraper, ChapterSet, ChapterStore};
use crate::config::OutputConfig;
use crate::error::Result;
use crate::output;
use crate::playlists::build_playlist_index;
use crate::videos::{sort_newest_first, VideoEnricher};
use crate::youtube::YouTubeApi;

/// Outcome of one pipeline run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Entities attempted: channels, videos, or merge inputs
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Rows or records written to `output`
    pub records: usize,
    pub output: PathBuf,
    /// Where the failed entities were listed, if any failed
    pub failed_list: Option<PathBuf>,
    pub total_time: Duration,
}

impl RunSummary {
    /// Log the closing report of a run
    pub fn report(&self, what: &str) {
        info!("🎉 {} complete!", what);
        info!(
            "📊 Total: {}, Succeeded: {}, Failed: {}",
            self.total, self.succeeded, self.failed
        );
        info!("💾 Saved {} records to {}", self.records, self.output.display());
        if let Some(failed_list) = &self.failed_list {
            warn!(
                "{} failed. IDs saved to {}",
                self.failed,
                failed_list.display()
            );
        }
        info!("⏱️ Total time: {:.2}s", self.total_time.as_secs_f64());
    }
}

/// Channel-level pipelines over the Data API
pub struct ChannelPipeline<'a, A: ?Sized> {
    api: &'a A,
    output: &'a OutputConfig,
}

impl<'a, A> ChannelPipeline<'a, A>
where
    A: YouTubeApi + ?Sized,
{
    pub fn new(api: &'a A, output: &'a OutputConfig) -> Self {
        Self { api, output }
    }

    /// Resolve a channel, recording it as failed when it does not exist.
    /// Transport errors still abort the run.
    async fn resolve(&self, username: &str, failed: &mut Vec<String>) -> Result<Option<String>> {
        match resolve_channel_id(self.api, username).await {
            Ok(channel_id) => Ok(Some(channel_id)),
            Err(e) if e.is_per_entity() => {
                error!("❌ {}", e);
                failed.push(username.to_string());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn write_failed_channels(&self, failed: &[String]) -> Result<Option<PathBuf>> {
        if failed.is_empty() {
            return Ok(None);
        }
        let path = self.output.resolve(&self.output.failed_channels_file);
        output::write_id_list(&path, failed).await?;
        Ok(Some(path))
    }

    /// Every video of every channel, enriched and cross-referenced with the
    /// channel's playlists, written newest first to the video table.
    pub async fn run_videos(&self, usernames: &[String]) -> Result<RunSummary> {
        let start_time = Instant::now();
        info!("🚀 Starting video scrape for {} channel(s)", usernames.len());

        let mut enricher = VideoEnricher::new(self.api);
        let mut videos = Vec::new();
        let mut failed = Vec::new();

        for username in usernames {
            let Some(channel_id) = self.resolve(username, &mut failed).await? else {
                continue;
            };
            let playlists = build_playlist_index(self.api, &channel_id).await?;
            videos.extend(enricher.collect_videos(&channel_id, &playlists).await?);
        }

        sort_newest_first(&mut videos);
        let path = self.output.resolve(&self.output.video_csv);
        let records = output::write_videos_csv(&path, &videos)?;

        Ok(RunSummary {
            total: usernames.len(),
            succeeded: usernames.len() - failed.len(),
            failed: failed.len(),
            records,
            output: path,
            failed_list: self.write_failed_channels(&failed).await?,
            total_time: start_time.elapsed(),
        })
    }

    /// Every video of every channel mapped to its playlist URLs
    pub async fn run_playlist_links(&self, usernames: &[String]) -> Result<RunSummary> {
        let start_time = Instant::now();
        info!("🚀 Starting playlist link scrape for {} channel(s)", usernames.len());

        let mut enricher = VideoEnricher::new(self.api);
        let mut rows = Vec::new();
        let mut failed = Vec::new();

        for username in usernames {
            let Some(channel_id) = self.resolve(username, &mut failed).await? else {
                continue;
            };
            let playlists = build_playlist_index(self.api, &channel_id).await?;
            rows.extend(enricher.collect_link_rows(&channel_id, &playlists).await?);
        }

        let path = self.output.resolve(&self.output.playlist_links_csv);
        let records = output::write_playlist_links_csv(&path, &rows)?;

        Ok(RunSummary {
            total: usernames.len(),
            succeeded: usernames.len() - failed.len(),
            failed: failed.len(),
            records,
            output: path,
            failed_list: self.write_failed_channels(&failed).await?,
            total_time: start_time.elapsed(),
        })
    }
}

/// Scrape chapters for every ID listed in `ids_path`. The chapter set is
/// rewritten to `output_path` after each video; failed IDs go to
/// `failed_path` at the end.
pub async fn run_chapters<L: BrowserLauncher>(
    scraper: &ChapterScraper<L>,
    ids_path: &Path,
    output_path: &Path,
    failed_path: &Path,
) -> Result<RunSummary> {
    let start_time = Instant::now();
    let video_ids = output::read_id_list(ids_path).await?;
    info!("📋 Loaded {} video IDs from {}", video_ids.len(), ids_path.display());

    let store = ChapterStore::new(output_path);
    let mut chapters = ChapterSet::new();
    if video_ids.is_empty() {
        warn!("No video IDs to scrape");
        store.save(&chapters).await?;
    }

    let report = scraper.scrape_all(&video_ids, &mut chapters, &store).await?;

    let failed_list = if report.failed_ids.is_empty() {
        None
    } else {
        output::write_id_list(failed_path, &report.failed_ids).await?;
        Some(failed_path.to_path_buf())
    };

    Ok(RunSummary {
        total: report.total,
        succeeded: report.succeeded,
        failed: report.failed_ids.len(),
        records: chapters.len(),
        output: output_path.to_path_buf(),
        failed_list,
        total_time: start_time.elapsed(),
    })
}

/// Merge chapter set files in order, earliest file winning on duplicate IDs
pub async fn run_merge(inputs: &[PathBuf], output_path: &Path) -> Result<RunSummary> {
    let start_time = Instant::now();

    let mut sets = Vec::with_capacity(inputs.len());
    for input in inputs {
        let set = ChapterStore::new(input).load().await?;
        info!("📂 {}: {} videos", input.display(), set.len());
        sets.push(set);
    }

    let merged = merge_chapter_sets(sets);
    info!("Total videos with chapter data: {}", merged.len());
    ChapterStore::new(output_path).save(&merged).await?;

    Ok(RunSummary {
        total: inputs.len(),
        succeeded: inputs.len(),
        failed: 0,
        records: merged.len(),
        output: output_path.to_path_buf(),
        failed_list: None,
        total_time: start_time.elapsed(),
    })
}
