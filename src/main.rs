use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, error, info};

use yt_channel_scraper::chapters::{ChapterScraper, WebDriverLauncher};
use yt_channel_scraper::pipeline::{self, ChannelPipeline, RunSummary};
use yt_channel_scraper::{logging, ApiKey, Config, ConfigBuilder, ScraperError, YouTubeClient};

#[derive(Parser)]
#[command(name = "channel-scraper")]
#[command(version, author = "TigreRoll")]
#[command(about = "Scrape YouTube channel videos, playlist membership and chapters")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: channel-scraper.toml or config/channel-scraper.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory output files are resolved against
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Results requested per Data API page (1-50)
    #[arg(long, global = true, value_name = "N")]
    page_size: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every video of the channels, with stats, chapter markers and playlists
    Videos {
        /// Channel names to look up
        #[arg(required = true)]
        channels: Vec<String>,
    },
    /// Write each video's title with the URLs of the playlists containing it
    PlaylistLinks {
        /// Channel names to look up
        #[arg(required = true)]
        channels: Vec<String>,
    },
    /// Scrape chapter lists from watch pages with a WebDriver browser
    Chapters {
        /// Newline-delimited video IDs
        #[arg(long, value_name = "FILE")]
        ids: Option<PathBuf>,
        /// Chapter JSON output
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Where to list videos that could not be scraped
        #[arg(long, value_name = "FILE")]
        failed: Option<PathBuf>,
        /// WebDriver server URL
        #[arg(long, value_name = "URL")]
        webdriver_url: Option<String>,
        /// Run the browser without a window
        #[arg(long)]
        headless: bool,
    },
    /// Merge chapter JSON files; the first file wins on duplicate videos
    Merge {
        /// Input file, repeatable, in precedence order
        #[arg(long = "input", value_name = "FILE")]
        inputs: Vec<PathBuf>,
        /// Merged JSON output
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let mut builder = ConfigBuilder::from_config(config);

    if let Some(dir) = &cli.data_dir {
        builder = builder.with_data_dir(dir.clone());
    }
    if let Some(page_size) = cli.page_size {
        builder = builder.with_page_size(page_size);
    }
    if cli.verbose {
        builder = builder.with_log_level("debug".to_string());
    }
    if let Commands::Chapters {
        webdriver_url,
        headless,
        ..
    } = &cli.command
    {
        if let Some(url) = webdriver_url {
            builder = builder.with_webdriver_url(url.clone());
        }
        if *headless {
            builder = builder.headless(true);
        }
    }

    let config = builder.build();
    config.validate()?;
    Ok(config)
}

fn api_client(config: &Config) -> Result<YouTubeClient> {
    let api_key = ApiKey::from_env()?;
    Ok(YouTubeClient::new(api_key, &config.api)?)
}

/// Configuration problems found before any work started
fn is_startup_error(e: &anyhow::Error) -> bool {
    e.chain()
        .filter_map(|cause| cause.downcast_ref::<ScraperError>())
        .any(ScraperError::is_fatal_config)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let log_guards = logging::init(&config.logging)?;

    info!("🚀 YouTube channel scraper starting...");
    debug!("{}", config.summary());

    let result = run(&cli, &config).await;
    if let Err(e) = &result {
        if is_startup_error(e) {
            error!("❌ {}", e);
            error!("Nothing was scraped; fix the configuration and rerun.");
            drop(log_guards);
            std::process::exit(2);
        }
    }
    result
}

async fn run(cli: &Cli, config: &Config) -> Result<()> {
    let output = &config.output;
    let (what, summary): (&str, RunSummary) = match &cli.command {
        Commands::Videos { channels } => {
            let client = api_client(config)?;
            let summary = ChannelPipeline::new(&client, output)
                .run_videos(channels)
                .await?;
            ("Video scrape", summary)
        }
        Commands::PlaylistLinks { channels } => {
            let client = api_client(config)?;
            let summary = ChannelPipeline::new(&client, output)
                .run_playlist_links(channels)
                .await?;
            ("Playlist link scrape", summary)
        }
        Commands::Chapters {
            ids,
            output: chapters_json,
            failed,
            ..
        } => {
            let ids = ids
                .clone()
                .unwrap_or_else(|| output.resolve(&output.chapter_ids_file));
            let chapters_json = chapters_json
                .clone()
                .unwrap_or_else(|| output.resolve(&output.chapters_json));
            let failed = failed
                .clone()
                .unwrap_or_else(|| output.resolve(&output.failed_ids_file));

            let scraper = ChapterScraper::new(WebDriverLauncher::new(&config.browser), &config.browser);
            let summary = pipeline::run_chapters(&scraper, &ids, &chapters_json, &failed)
                .await
                .with_context(|| format!("Chapter scrape of {} failed", ids.display()))?;
            ("Chapter scrape", summary)
        }
        Commands::Merge {
            inputs,
            output: merged_json,
        } => {
            let inputs: Vec<PathBuf> = if inputs.is_empty() {
                output.merge_inputs.iter().map(|p| output.resolve(p)).collect()
            } else {
                inputs.clone()
            };
            let merged_json = merged_json
                .clone()
                .unwrap_or_else(|| output.resolve(&output.merged_json));

            let summary = pipeline::run_merge(&inputs, &merged_json)
                .await
                .context("Chapter merge failed")?;
            ("Chapter merge", summary)
        }
    };

    summary.report(what);
    Ok(())
}
