//! File outputs: the video table, the playlist-link table and plain ID lists.

use crate::error::Result;
use crate::videos::{PlaylistLinkRow, Video};
use serde::Serialize;
use std::path::Path;
use tracing::info;

pub const VIDEO_COLUMNS: [&str; 9] = [
    "Title",
    "ID",
    "URL",
    "Published Date",
    "View Count",
    "Duration",
    "Chapter Markers",
    "Description",
    "Playlists",
];

pub const PLAYLIST_LINK_COLUMNS: [&str; 2] = ["Video Title", "Playlist URLs"];

#[derive(Serialize)]
struct VideoRow<'a> {
    title: &'a str,
    id: &'a str,
    url: String,
    published: &'a str,
    view_count: &'a str,
    duration: &'a str,
    chapter_markers: String,
    description: &'a str,
    playlists: &'a str,
}

impl<'a> From<&'a Video> for VideoRow<'a> {
    fn from(video: &'a Video) -> Self {
        Self {
            title: &video.title,
            id: &video.id,
            url: video.url(),
            published: &video.published,
            view_count: &video.view_count,
            duration: &video.duration,
            chapter_markers: video.chapter_markers.join(", "),
            description: &video.description,
            playlists: &video.playlists,
        }
    }
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Serialize rows under an explicit header, so an empty table still gets
/// its header line.
fn write_table<R, I>(path: &Path, header: &[&str], rows: I) -> Result<usize>
where
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    create_parent_dir(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(header)?;
    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Write the video table, one row per video in the given order
pub fn write_videos_csv(path: &Path, videos: &[Video]) -> Result<usize> {
    let count = write_table(path, &VIDEO_COLUMNS, videos.iter().map(VideoRow::from))?;
    info!("💾 Saved {} videos to {}", count, path.display());
    Ok(count)
}

pub fn write_playlist_links_csv(path: &Path, rows: &[PlaylistLinkRow]) -> Result<usize> {
    let count = write_table(path, &PLAYLIST_LINK_COLUMNS, rows)?;
    info!("💾 Saved {} rows to {}", count, path.display());
    Ok(count)
}

/// Newline-delimited IDs. Lines are trimmed and blank lines dropped.
pub async fn read_id_list(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// One ID per line, replacing any existing file
pub async fn write_id_list(path: &Path, ids: &[String]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut content = String::with_capacity(ids.iter().map(|id| id.len() + 1).sum());
    for id in ids {
        content.push_str(id);
        content.push('\n');
    }
    tokio::fs::write(path, content).await?;
    Ok(())
}
