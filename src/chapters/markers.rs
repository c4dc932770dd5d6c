use regex::Regex;
use std::sync::LazyLock;

/// Any `M:SS` / `MM:SS` shaped run of text. Hours are not understood: the
/// pattern is applied as-is, so `1:23:45` yields `1:23` and `:45`.
static TIMESTAMP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{0,2}:\d{2}").expect("timestamp pattern is valid"));

/// Extract chapter markers from a free-text video description.
///
/// This is a text heuristic, not a parser: every timestamp-shaped substring
/// matches, including ones that are not chapter markers (prices, scores,
/// ratios). Matches are leftmost-first and non-overlapping, in text order.
pub fn extract_chapter_markers(description: &str) -> Vec<String> {
    TIMESTAMP_PATTERN
        .find_iter(description)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typical_chapter_list() {
        let description = "Trip to Chernobyl\n\n0:00 Intro\n2:15 Checkpoint\n14:03 Pripyat\n";
        assert_eq!(
            extract_chapter_markers(description),
            vec!["0:00", "2:15", "14:03"]
        );
    }

    #[test]
    fn test_hour_timestamps_are_split() {
        assert_eq!(
            extract_chapter_markers("Intro 0:00 Chapter 1 1:23:45"),
            vec!["0:00", "1:23", ":45"]
        );
    }

    #[test]
    fn test_false_positives_are_kept() {
        // a kick-off time is not a chapter, but it looks like one
        assert_eq!(
            extract_chapter_markers("Match starts at 19:30 sharp"),
            vec!["19:30"]
        );
        // three leading digits: only the last two are taken
        assert_eq!(extract_chapter_markers("123:45"), vec!["23:45"]);
    }

    #[test]
    fn test_no_markers() {
        assert!(extract_chapter_markers("").is_empty());
        assert!(extract_chapter_markers("no timestamps 1:2 here").is_empty());
    }
}
