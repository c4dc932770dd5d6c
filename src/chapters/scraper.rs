//! Browser-driven chapter scraper for YouTube watch pages
//!
//! Each video gets its own browser session. The session walks the chapter
//! carousel page by page:
//!
//! ```text
//! Opening ─▶ Extracting ─▶ Paging ─▶ Done
//!                ▲            │
//!                └── next ────┘
//! any step error ─▶ Failed
//! ```
//!
//! Chapters read so far are recorded after every page, so a video that fails
//! halfway keeps what was already extracted.
use super::browser::{BrowserLauncher, BrowserSession};
use super::store::ChapterStore;
use super::{ChapterRecord, ChapterSet};
use crate::config::BrowserConfig;
use crate::error::Result;
use crate::videos::watch_url;
use std::time::Duration;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapePhase {
    Opening,
    Extracting,
    Paging,
    Done,
    Failed,
}

impl ScrapePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, ScrapePhase::Done | ScrapePhase::Failed)
    }
}

/// Result of scraping one video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOutcome {
    pub video_id: String,
    pub phase: ScrapePhase,
    /// Carousel pages read
    pub pages: usize,
    /// Chapter titles recorded
    pub chapters: usize,
}

impl ScrapeOutcome {
    pub fn succeeded(&self) -> bool {
        self.phase == ScrapePhase::Done
    }
}

/// Totals for one scraping run
#[derive(Debug, Clone, Default)]
pub struct ChapterRunReport {
    pub total: usize,
    pub succeeded: usize,
    /// In input order
    pub failed_ids: Vec<String>,
}

struct VideoProgress {
    record: ChapterRecord,
    pages: usize,
}

pub struct ChapterScraper<L> {
    launcher: L,
    description_xpath: String,
    timestamp_xpath: String,
    chapter_title_xpath: String,
    next_page_xpath: String,
    settle_delay: Duration,
    max_pages: usize,
}

impl<L: BrowserLauncher> ChapterScraper<L> {
    pub fn new(launcher: L, config: &BrowserConfig) -> Self {
        Self {
            launcher,
            description_xpath: config.description_xpath.clone(),
            timestamp_xpath: config.timestamp_xpath.clone(),
            chapter_title_xpath: config.chapter_title_xpath.clone(),
            next_page_xpath: config.next_page_xpath.clone(),
            settle_delay: Duration::from_millis(config.settle_delay_ms),
            max_pages: config.max_chapter_pages.max(1),
        }
    }

    /// Scrape every video in order, flushing `chapters` to `store` after each
    /// one. Per-video failures are collected in the report; only a failed
    /// flush aborts the run.
    pub async fn scrape_all(
        &self,
        video_ids: &[String],
        chapters: &mut ChapterSet,
        store: &ChapterStore,
    ) -> Result<ChapterRunReport> {
        let total = video_ids.len();
        info!("🎞️ Scraping chapters for {} videos", total);

        let mut report = ChapterRunReport {
            total,
            ..Default::default()
        };

        for (index, video_id) in video_ids.iter().enumerate() {
            let outcome = self.scrape_video(video_id, chapters).await;
            if outcome.succeeded() {
                report.succeeded += 1;
            } else {
                report.failed_ids.push(video_id.clone());
            }

            store.save(chapters).await?;
            info!("[{}/{}] {}", index + 1, total, video_id);
        }

        info!(
            "✅ Chapter scraping complete: {} succeeded, {} failed",
            report.succeeded,
            report.failed_ids.len()
        );
        Ok(report)
    }

    /// Scrape one video in a fresh browser session. The session is always
    /// closed before returning, whether or not the scrape succeeded.
    pub async fn scrape_video(&self, video_id: &str, chapters: &mut ChapterSet) -> ScrapeOutcome {
        let mut progress = VideoProgress {
            record: ChapterRecord::default(),
            pages: 0,
        };

        let mut session = match self.launcher.launch().await {
            Ok(session) => session,
            Err(e) => {
                error!("Error launching browser for video {}: {}", video_id, e);
                return self.outcome(video_id, ScrapePhase::Failed, &progress);
            }
        };

        let mut phase = ScrapePhase::Opening;
        while !phase.is_terminal() {
            phase = match self
                .step(phase, session.as_mut(), video_id, &mut progress, chapters)
                .await
            {
                Ok(next) => next,
                Err(e) => {
                    error!("Error processing video {}: {}", video_id, e);
                    ScrapePhase::Failed
                }
            };
        }

        if let Err(e) = session.quit().await {
            warn!("Failed to close browser session for {}: {}", video_id, e);
        }

        self.outcome(video_id, phase, &progress)
    }

    async fn step(
        &self,
        phase: ScrapePhase,
        session: &mut dyn BrowserSession,
        video_id: &str,
        progress: &mut VideoProgress,
        chapters: &mut ChapterSet,
    ) -> Result<ScrapePhase> {
        match phase {
            ScrapePhase::Opening => {
                // a failed navigation often still leaves a usable page
                if let Err(e) = session.open(&watch_url(video_id)).await {
                    error!("Error opening video {}: {}", video_id, e);
                }
                self.settle().await;
                session.click(&self.description_xpath).await?;
                self.settle().await;
                Ok(ScrapePhase::Extracting)
            }
            ScrapePhase::Extracting => {
                let timestamps = session.texts(&self.timestamp_xpath).await?;
                let titles = session.texts(&self.chapter_title_xpath).await?;
                progress.pages += 1;
                debug!(
                    "Video {} page {}: {} timestamps, {} titles",
                    video_id,
                    progress.pages,
                    timestamps.len(),
                    titles.len()
                );

                progress.record.timestamps.extend(timestamps);
                progress.record.chapters.extend(titles);
                chapters.insert(video_id.to_string(), progress.record.clone());
                Ok(ScrapePhase::Paging)
            }
            ScrapePhase::Paging => {
                if progress.pages >= self.max_pages {
                    warn!(
                        "Video {}: stopping after {} chapter pages",
                        video_id, progress.pages
                    );
                    return Ok(ScrapePhase::Done);
                }
                if !session.can_activate(&self.next_page_xpath).await? {
                    debug!("Video {}: last chapter page reached", video_id);
                    return Ok(ScrapePhase::Done);
                }
                session.click(&self.next_page_xpath).await?;
                self.settle().await;
                Ok(ScrapePhase::Extracting)
            }
            terminal => Ok(terminal),
        }
    }

    async fn settle(&self) {
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }
    }

    fn outcome(&self, video_id: &str, phase: ScrapePhase, progress: &VideoProgress) -> ScrapeOutcome {
        ScrapeOutcome {
            video_id: video_id.to_string(),
            phase,
            pages: progress.pages,
            chapters: progress.record.chapters.len(),
        }
    }
}
