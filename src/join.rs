//! Video → playlist cross-reference.
//!
//! A linear scan over the playlist index with a membership test per
//! playlist. Channel-sized inputs (hundreds of playlists and videos) keep
//! this cheap; it is not meant for larger catalogues.

use crate::playlists::Playlist;

/// Playlists containing `video_id`, in the order they were discovered
pub fn playlists_containing<'a>(
    video_id: &'a str,
    playlists: &'a [Playlist],
) -> impl Iterator<Item = &'a Playlist> + 'a {
    playlists.iter().filter(move |p| p.contains(video_id))
}

/// Comma-joined titles of the playlists containing `video_id`
pub fn playlist_titles(video_id: &str, playlists: &[Playlist]) -> String {
    playlists_containing(video_id, playlists)
        .map(|p| p.title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comma-joined URLs of the playlists containing `video_id`
pub fn playlist_urls(video_id: &str, playlists: &[Playlist]) -> String {
    playlists_containing(video_id, playlists)
        .map(|p| p.url())
        .collect::<Vec<_>>()
        .join(", ")
}
