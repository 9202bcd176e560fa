//! Freeform "Title by Artist" parsing
//!
//! Seed input and LLM output arrive as loosely formatted strings like
//! "Lahore by Guru Randhawa", "Song - Artist1, Artist2", or
//! "Title | Artist". Parsing never fails: when nothing looks like a
//! separator, the whole string is the title and artist info is absent.

use once_cell::sync::Lazy;
use regex::Regex;

/// First-level separators between title and artist credit.
static TITLE_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+by\s+|\s+-\s+|\s+–\s+|\s+—\s+|\s*\|\s*").expect("valid separator pattern")
});

/// Delimiters between individual artist names. The alphabetic ones match as
/// standalone words so names containing "ft"/"with" as substrings survive.
static ARTIST_DELIMITER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i),|&|\b(?:feat|ft)\b\.?|\bwith\b").expect("valid delimiter pattern")
});

/// Split a freeform string into a title and an optional artist list.
///
/// The text before the first separator is the title; the whole remainder is
/// split on artist delimiters into trimmed names with empty fragments
/// dropped. `None` (rather than an empty list) means the input carried no
/// artist information at all, so callers can distinguish "no artist given"
/// from "artist segment present but empty".
pub fn parse_title_and_artists(text: &str) -> (String, Option<Vec<String>>) {
    let Some(separator) = TITLE_SEPARATOR.find(text) else {
        return (text.trim().to_string(), None);
    };

    let title = text[..separator.start()].trim().to_string();
    let remainder = &text[separator.end()..];

    let artists: Vec<String> = ARTIST_DELIMITER
        .split(remainder)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(String::from)
        .collect();

    if artists.is_empty() {
        (title, None)
    } else {
        (title, Some(artists))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_by() {
        let (title, artists) = parse_title_and_artists("Lahore by Guru Randhawa");
        assert_eq!(title, "Lahore");
        assert_eq!(artists, Some(vec!["Guru Randhawa".to_string()]));
    }

    #[test]
    fn splits_on_hyphen_and_comma() {
        let (title, artists) = parse_title_and_artists("Song - Artist1, Artist2");
        assert_eq!(title, "Song");
        assert_eq!(
            artists,
            Some(vec!["Artist1".to_string(), "Artist2".to_string()])
        );
    }

    #[test]
    fn no_separator_means_absent_artists() {
        let (title, artists) = parse_title_and_artists("JustATitle");
        assert_eq!(title, "JustATitle");
        assert!(artists.is_none());
    }

    #[test]
    fn splits_on_pipe_and_dashes() {
        let (title, artists) = parse_title_and_artists("Tere Bin|Simba Nagpal");
        assert_eq!(title, "Tere Bin");
        assert_eq!(artists, Some(vec!["Simba Nagpal".to_string()]));

        let (title, artists) = parse_title_and_artists("Levitating – Dua Lipa");
        assert_eq!(title, "Levitating");
        assert_eq!(artists, Some(vec!["Dua Lipa".to_string()]));
    }

    #[test]
    fn by_is_case_insensitive() {
        let (title, artists) = parse_title_and_artists("Lahore BY Guru Randhawa");
        assert_eq!(title, "Lahore");
        assert_eq!(artists, Some(vec!["Guru Randhawa".to_string()]));
    }

    #[test]
    fn featured_artists_split_as_words() {
        let (_, artists) = parse_title_and_artists("Song by A feat. B ft C with D & E");
        assert_eq!(
            artists,
            Some(vec![
                "A".to_string(),
                "B".to_string(),
                "C".to_string(),
                "D".to_string(),
                "E".to_string(),
            ])
        );
    }

    #[test]
    fn ft_inside_a_name_does_not_split() {
        let (title, artists) = parse_title_and_artists("Anti-Hero by Taylor Swift");
        assert_eq!(title, "Anti-Hero");
        assert_eq!(artists, Some(vec!["Taylor Swift".to_string()]));
    }

    #[test]
    fn empty_artist_segment_degrades_to_absent() {
        let (title, artists) = parse_title_and_artists("Song by , ");
        assert_eq!(title, "Song");
        assert!(artists.is_none());
    }

    #[test]
    fn remainder_after_second_separator_stays_artist_text() {
        let (title, artists) = parse_title_and_artists("Song by A - B");
        assert_eq!(title, "Song");
        assert_eq!(artists, Some(vec!["A - B".to_string()]));
    }

    #[test]
    fn hyphenated_title_without_spacing_is_untouched() {
        let (title, artists) = parse_title_and_artists("Anti-Hero");
        assert_eq!(title, "Anti-Hero");
        assert!(artists.is_none());
    }
}
