use super::ChapterSet;

/// Union of chapter sets. When a video ID appears in more than one set the
/// record from the earliest set wins; later duplicates are ignored whole,
/// never combined.
pub fn merge_chapter_sets<I>(sets: I) -> ChapterSet
where
    I: IntoIterator<Item = ChapterSet>,
{
    let mut merged = ChapterSet::new();
    for set in sets {
        for (video_id, record) in set {
            merged.entry(video_id).or_insert(record);
        }
    }
    merged
}
