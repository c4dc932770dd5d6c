use crate::error::{Result, ScraperError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable holding the YouTube Data API key
pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";

/// Configuration for the channel scraper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// YouTube Data API settings
    pub api: ApiConfig,

    /// WebDriver settings for the chapter scraper
    pub browser: BrowserConfig,

    /// Output file locations
    pub output: OutputConfig,

    /// Log sinks
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the YouTube Data API v3
    pub base_url: String,

    /// Results requested per list page (API maximum is 50)
    pub page_size: u32,

    /// HTTP request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// WebDriver endpoint (chromedriver, geckodriver, selenium)
    pub webdriver_url: String,

    /// Run the browser without a window
    pub headless: bool,

    /// How long to wait for an element before giving up
    pub wait_timeout_seconds: u64,

    /// Pause after navigation and clicks so the page can render
    pub settle_delay_ms: u64,

    /// Element that expands the video description
    pub description_xpath: String,

    /// Chapter timestamp labels
    pub timestamp_xpath: String,

    /// Chapter title labels
    pub chapter_title_xpath: String,

    /// "Next page" control of the chapter carousel
    pub next_page_xpath: String,

    /// Upper bound on carousel pages read per video
    pub max_chapter_pages: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory every relative file below is resolved against
    pub data_dir: PathBuf,

    pub video_csv: PathBuf,
    pub playlist_links_csv: PathBuf,
    pub failed_channels_file: PathBuf,

    /// Newline-delimited video IDs fed to the chapter scraper
    pub chapter_ids_file: PathBuf,
    pub chapters_json: PathBuf,
    pub failed_ids_file: PathBuf,

    /// Chapter sets merged in order, first one wins
    pub merge_inputs: Vec<PathBuf>,
    pub merged_json: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Console filter directive, e.g. "info" or "yt_channel_scraper=debug"
    pub level: String,

    /// Receives info and above
    pub info_log: PathBuf,

    /// Receives errors only
    pub error_log: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            page_size: 50,
            timeout_seconds: 30,
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:4444".to_string(),
            headless: false,
            wait_timeout_seconds: 5,
            settle_delay_ms: 2000,
            description_xpath: r#"//div[@id="description-inner"]"#.to_string(),
            timestamp_xpath: "//div[@id='time']".to_string(),
            chapter_title_xpath:
                "//h4[@class='macro-markers style-scope ytd-macro-markers-list-item-renderer']"
                    .to_string(),
            next_page_xpath: r#"//div[@id="right-arrow"]"#.to_string(),
            max_chapter_pages: 100,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            video_csv: PathBuf::from("combined_video_data.csv"),
            playlist_links_csv: PathBuf::from("video_playlist_link_data.csv"),
            failed_channels_file: PathBuf::from("failed_channels.txt"),
            chapter_ids_file: PathBuf::from("filtered_video_ids.txt"),
            chapters_json: PathBuf::from("data_s2.json"),
            failed_ids_file: PathBuf::from("failed_video_ids.txt"),
            merge_inputs: vec![PathBuf::from("data_s.json"), PathBuf::from("data_s2.json")],
            merged_json: PathBuf::from("datafinal.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            info_log: PathBuf::from("info.log"),
            error_log: PathBuf::from("error.log"),
        }
    }
}

impl OutputConfig {
    /// Resolve a configured file name against the data directory.
    /// Absolute paths are returned untouched.
    pub fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir.join(file)
        }
    }
}

impl Config {
    /// Load configuration from an explicit file, or from the first default
    /// location that exists. Environment overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => Self::from_default_locations()?,
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_default_locations() -> Result<Self> {
        let config_paths = ["channel-scraper.toml", "config/channel-scraper.toml"];

        for path in &config_paths {
            let path = Path::new(path);
            if path.exists() {
                return Self::from_file(path);
            }
        }

        tracing::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config = toml::from_str(&config_str).map_err(|e| {
            ScraperError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Override settings from environment variables. The lookup is injected so
    /// tests don't have to mutate the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("CHANNEL_SCRAPER_DATA_DIR") {
            self.output.data_dir = PathBuf::from(dir);
        }

        if let Some(url) = lookup("CHANNEL_SCRAPER_WEBDRIVER_URL") {
            self.browser.webdriver_url = url;
        }

        if let Some(level) = lookup("CHANNEL_SCRAPER_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_str = toml::to_string_pretty(self)
            .map_err(|e| ScraperError::Config(e.to_string()))?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.page_size == 0 || self.api.page_size > 50 {
            return Err(ScraperError::Config(format!(
                "api.page_size must be between 1 and 50, got {}",
                self.api.page_size
            )));
        }

        url::Url::parse(&self.api.base_url).map_err(|e| {
            ScraperError::Config(format!("api.base_url '{}': {}", self.api.base_url, e))
        })?;

        url::Url::parse(&self.browser.webdriver_url).map_err(|e| {
            ScraperError::Config(format!(
                "browser.webdriver_url '{}': {}",
                self.browser.webdriver_url, e
            ))
        })?;

        if self.browser.wait_timeout_seconds == 0 {
            return Err(ScraperError::Config(
                "browser.wait_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.browser.max_chapter_pages == 0 {
            return Err(ScraperError::Config(
                "browser.max_chapter_pages must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "Channel Scraper Configuration:\n\
            - API: {} (page size {})\n\
            - WebDriver: {} (headless: {})\n\
            - Data Directory: {}\n\
            - Logs: {} / {}",
            self.api.base_url,
            self.api.page_size,
            self.browser.webdriver_url,
            self.browser.headless,
            self.output.data_dir.display(),
            self.logging.info_log.display(),
            self.logging.error_log.display(),
        )
    }
}

/// The static API key used for every Data API request
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Read the key from the process environment. Call `dotenv::dotenv()`
    /// beforehand to pick up a local `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_value(std::env::var(API_KEY_VAR).ok())
    }

    /// A missing or blank value is a fatal configuration error
    pub fn from_value(value: Option<String>) -> Result<Self> {
        match value {
            Some(key) if !key.trim().is_empty() => Ok(Self(key.trim().to_string())),
            _ => Err(ScraperError::MissingApiKey),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.config.output.data_dir = dir;
        self
    }

    pub fn with_webdriver_url(mut self, url: String) -> Self {
        self.config.browser.webdriver_url = url;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.config.api.page_size = page_size;
        self
    }

    pub fn with_log_level(mut self, level: String) -> Self {
        self.config.logging.level = level;
        self
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.config.browser.headless = headless;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
