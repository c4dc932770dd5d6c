/// YouTube channel scraper
///
/// Collects per-video metadata for a channel through the YouTube Data API v3,
/// cross-references videos with the channel's playlists, scrapes chapter
/// markers from watch pages through a WebDriver-controlled browser, and merges
/// chapter data collected across scraping sessions.

pub mod channel;
pub mod chapters;
pub mod config;
pub mod error;
pub mod join;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod playlists;
pub mod videos;
pub mod youtube;

// Re-export main types for easy access
pub use crate::chapters::{ChapterRecord, ChapterScraper, ChapterSet, WebDriverLauncher};
pub use crate::config::{ApiKey, Config, ConfigBuilder};
pub use crate::error::{Result, ScraperError};
pub use crate::pipeline::{ChannelPipeline, RunSummary};
pub use crate::playlists::Playlist;
pub use crate::videos::{PlaylistLinkRow, Video, VideoEnricher};
pub use crate::youtube::{YouTubeApi, YouTubeClient};
