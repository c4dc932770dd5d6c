/// Chapter extraction and management module
///
/// Chapter markers come from two places: a regex heuristic over video
/// descriptions (`markers`), and a browser-driven scrape of the chapter
/// carousel on the watch page (`scraper`). Scraped chapters are persisted as a
/// JSON map keyed by video ID (`store`) and can be combined across scraping
/// sessions (`merge`).

pub mod browser;
pub mod markers;
pub mod merge;
pub mod scraper;
pub mod store;

pub use browser::{BrowserLauncher, BrowserSession, WebDriverLauncher};
pub use markers::extract_chapter_markers;
pub use merge::merge_chapter_sets;
pub use scraper::{ChapterRunReport, ChapterScraper, ScrapeOutcome, ScrapePhase};
pub use store::ChapterStore;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Chapters scraped for one video. The two lists are parallel: the n-th
/// timestamp labels the n-th chapter title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    #[serde(default)]
    pub timestamps: Vec<String>,
    #[serde(default)]
    pub chapters: Vec<String>,
}

impl ChapterRecord {
    pub fn new(timestamps: Vec<String>, chapters: Vec<String>) -> Self {
        Self {
            timestamps,
            chapters,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty() && self.chapters.is_empty()
    }
}

/// Video ID → scraped chapters, in the order videos were first recorded
pub type ChapterSet = IndexMap<String, ChapterRecord>;
