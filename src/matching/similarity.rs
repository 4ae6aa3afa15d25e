//! Pairwise scores between one track and one candidate.
//!
//! Both scores are distances: lower means closer.

use crate::error::Result;
use crate::model::{Candidate, TrackMetadata};

pub use crate::model::parse_duration;

/// Levenshtein edit distance with unit costs, over Unicode scalar values.
///
/// Case-sensitive and computed over the full strings. Keeps a single row
/// sized to the shorter input.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, lc) in long.iter().enumerate() {
        // row[j] still holds the previous row's value until overwritten
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let substitution = diagonal + usize::from(lc != sc);
            let deletion = row[j + 1] + 1;
            let insertion = row[j] + 1;
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(deletion).min(insertion);
        }
    }

    row[short.len()]
}

/// Edit distance between the track title and the candidate's display name.
pub fn text_distance(track: &TrackMetadata, candidate: &Candidate) -> usize {
    levenshtein(&track.title, &candidate.display_name)
}

/// Absolute difference in seconds between declared and actual duration.
///
/// Fails if the track's duration string is malformed.
pub fn duration_distance(track: &TrackMetadata, candidate: &Candidate) -> Result<u32> {
    let declared = track.duration_seconds()?;
    Ok(declared.abs_diff(candidate.duration_seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_levenshtein_known_values() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn test_levenshtein_is_case_sensitive() {
        assert_eq!(levenshtein("Intro", "intro"), 1);
    }

    #[test]
    fn test_levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein("café", "cafe"), 1);
        assert_eq!(levenshtein("日本", "日本語"), 1);
    }

    #[test]
    fn test_text_distance_uses_display_name() {
        let track = TrackMetadata::new("1", "Intro", "00:30");
        let candidate = Candidate::new("01-Intro.mp3", 30);
        // "Intro" -> "01 Intro": three insertions
        assert_eq!(text_distance(&track, &candidate), 3);
    }

    #[test]
    fn test_duration_distance() {
        let track = TrackMetadata::new("1", "Intro", "01:15");
        assert_eq!(duration_distance(&track, &Candidate::new("a.mp3", 70)).unwrap(), 5);
        assert_eq!(duration_distance(&track, &Candidate::new("b.mp3", 80)).unwrap(), 5);
        assert_eq!(duration_distance(&track, &Candidate::new("c.mp3", 75)).unwrap(), 0);
    }

    #[test]
    fn test_duration_distance_malformed_fails() {
        let track = TrackMetadata::new("1", "Intro", "115");
        let result = duration_distance(&track, &Candidate::new("a.mp3", 70));
        assert!(matches!(result, Err(Error::DurationParse(_))));
    }
}

/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn levenshtein_zero_iff_equal(a in "[a-c]{0,8}", b in "[a-c]{0,8}") {
            prop_assert_eq!(levenshtein(&a, &b) == 0, a == b);
        }

        #[test]
        fn levenshtein_is_symmetric(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
        }

        #[test]
        fn levenshtein_triangle_inequality(
            a in "[a-d ]{0,10}",
            b in "[a-d ]{0,10}",
            c in "[a-d ]{0,10}",
        ) {
            prop_assert!(levenshtein(&a, &c) <= levenshtein(&a, &b) + levenshtein(&b, &c));
        }

        #[test]
        fn levenshtein_bounded_by_longer_length(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            let longest = a.chars().count().max(b.chars().count());
            prop_assert!(levenshtein(&a, &b) <= longest);
        }
    }
}
