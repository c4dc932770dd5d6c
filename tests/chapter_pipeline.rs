use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

use yt_channel_scraper::chapters::{BrowserLauncher, BrowserSession, ChapterStore};
use yt_channel_scraper::config::BrowserConfig;
use yt_channel_scraper::pipeline::{run_chapters, run_merge};
use yt_channel_scraper::{ChapterRecord, ChapterScraper, ChapterSet, Result, ScraperError};

/// Chapter carousel pages per video ID: (timestamps, titles)
type Catalogue = HashMap<&'static str, Vec<(Vec<&'static str>, Vec<&'static str>)>>;

struct CatalogueLauncher {
    catalogue: Arc<Catalogue>,
    open_sessions: Arc<AtomicUsize>,
}

#[async_trait]
impl BrowserLauncher for CatalogueLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        self.open_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CatalogueSession {
            catalogue: self.catalogue.clone(),
            open_sessions: self.open_sessions.clone(),
            video: None,
            page: 0,
        }))
    }
}

struct CatalogueSession {
    catalogue: Arc<Catalogue>,
    open_sessions: Arc<AtomicUsize>,
    video: Option<String>,
    page: usize,
}

impl CatalogueSession {
    fn pages(&self) -> &[(Vec<&'static str>, Vec<&'static str>)] {
        self.video
            .as_deref()
            .and_then(|id| self.catalogue.get(id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[async_trait]
impl BrowserSession for CatalogueSession {
    async fn open(&mut self, url: &str) -> Result<()> {
        self.video = url.split("v=").nth(1).map(str::to_string);
        Ok(())
    }

    async fn click(&mut self, xpath: &str) -> Result<()> {
        if xpath.contains("right-arrow") {
            self.page += 1;
        }
        Ok(())
    }

    async fn texts(&mut self, xpath: &str) -> Result<Vec<String>> {
        let Some((timestamps, titles)) = self.pages().get(self.page) else {
            return Err(ScraperError::Browser(format!("timed out waiting for {}", xpath)));
        };
        let found = if xpath.contains("@id='time'") { timestamps } else { titles };
        Ok(found.iter().map(|s| s.to_string()).collect())
    }

    async fn can_activate(&mut self, _xpath: &str) -> Result<bool> {
        Ok(self.page + 1 < self.pages().len())
    }

    async fn quit(&mut self) -> Result<()> {
        self.open_sessions.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_scrape_then_merge() {
    let temp_dir = TempDir::new().unwrap();
    let ids_path = temp_dir.path().join("filtered_video_ids.txt");
    let chapters_path = temp_dir.path().join("data_s2.json");
    let failed_path = temp_dir.path().join("failed_video_ids.txt");
    std::fs::write(&ids_path, "alpha\n\n  beta  \ngamma\n").unwrap();

    let mut catalogue = Catalogue::new();
    catalogue.insert(
        "alpha",
        vec![
            (vec!["0:00", "3:10"], vec!["Intro", "Border"]),
            (vec!["9:40"], vec!["Night train"]),
        ],
    );
    catalogue.insert("gamma", vec![(vec!["0:00"], vec!["Only chapter"])]);

    let open_sessions = Arc::new(AtomicUsize::new(0));
    let launcher = CatalogueLauncher {
        catalogue: Arc::new(catalogue),
        open_sessions: open_sessions.clone(),
    };
    let config = BrowserConfig {
        settle_delay_ms: 0,
        ..Default::default()
    };
    let scraper = ChapterScraper::new(launcher, &config);

    let summary = run_chapters(&scraper, &ids_path, &chapters_path, &failed_path)
        .await
        .unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failed_list.as_deref(), Some(failed_path.as_path()));
    assert_eq!(std::fs::read_to_string(&failed_path).unwrap(), "beta\n");
    assert_eq!(open_sessions.load(Ordering::SeqCst), 0);

    let scraped = ChapterStore::new(&chapters_path).load().await.unwrap();
    assert_eq!(
        scraped["alpha"],
        ChapterRecord::new(
            strings(&["0:00", "3:10", "9:40"]),
            strings(&["Intro", "Border", "Night train"])
        )
    );
    assert!(!scraped.contains_key("beta"));

    // an earlier session already holds a different alpha and a video we lost
    let earlier_path = temp_dir.path().join("data_s.json");
    let mut earlier = ChapterSet::new();
    earlier.insert(
        "alpha".into(),
        ChapterRecord::new(strings(&["0:00"]), strings(&["Old intro"])),
    );
    earlier.insert(
        "delta".into(),
        ChapterRecord::new(strings(&["0:00"]), strings(&["Delta"])),
    );
    ChapterStore::new(&earlier_path).save(&earlier).await.unwrap();

    let merged_path = temp_dir.path().join("datafinal.json");
    let merge = run_merge(&[earlier_path, chapters_path], &merged_path)
        .await
        .unwrap();

    assert_eq!(merge.records, 3);
    let merged = ChapterStore::new(&merged_path).load().await.unwrap();
    assert_eq!(merged["alpha"].chapters, strings(&["Old intro"]));
    assert_eq!(merged["gamma"].chapters, strings(&["Only chapter"]));
    assert!(merged.contains_key("delta"));
}

#[tokio::test]
async fn test_no_failures_writes_no_failed_list() {
    let temp_dir = TempDir::new().unwrap();
    let ids_path = temp_dir.path().join("ids.txt");
    let chapters_path = temp_dir.path().join("out/chapters.json");
    let failed_path = temp_dir.path().join("failed.txt");
    std::fs::write(&ids_path, "gamma\n").unwrap();

    let mut catalogue = Catalogue::new();
    catalogue.insert("gamma", vec![(vec!["0:00"], vec!["Only chapter"])]);
    let launcher = CatalogueLauncher {
        catalogue: Arc::new(catalogue),
        open_sessions: Arc::new(AtomicUsize::new(0)),
    };
    let config = BrowserConfig {
        settle_delay_ms: 0,
        ..Default::default()
    };

    let summary = run_chapters(
        &ChapterScraper::new(launcher, &config),
        &ids_path,
        &chapters_path,
        &failed_path,
    )
    .await
    .unwrap();

    assert_eq!(summary.failed, 0);
    assert!(summary.failed_list.is_none());
    assert!(!failed_path.exists());
    assert!(chapters_path.exists());
}
