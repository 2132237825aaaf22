use super::phrase_comparer::PhraseComparer;
use super::phrase_occurrence::PhraseOccurrence;
use super::word_timeline::TimedWord;

/// Phrases shorter than this (in chars, after normalization) carry too
/// little signal for fuzzy comparison and are skipped rather than matched.
pub const MIN_PHRASE_CHARS: usize = 4;

/// Outcome of scanning the timeline for one phrase.
#[derive(Debug, PartialEq, Eq)]
pub enum PhraseSearch {
    /// The normalized phrase was below [`MIN_PHRASE_CHARS`]; nothing was
    /// scanned. A policy decision, not an error.
    TooShort,
    Matches(Vec<PhraseOccurrence>),
}

/// Slides an N-word window (N = the phrase's word count) across the timeline
/// and collects every window the comparer accepts. The subject is bound once
/// per call; overlapping matches are all kept — grouping happens at
/// reporting time.
pub fn find_phrase(
    comparer: &mut dyn PhraseComparer,
    phrase: &str,
    timeline: &[TimedWord],
) -> PhraseSearch {
    if phrase.chars().count() < MIN_PHRASE_CHARS {
        return PhraseSearch::TooShort;
    }

    let words_in_phrase = phrase.split(' ').count();
    comparer.set_subject(phrase);

    let mut matches = Vec::new();
    for (i, window) in timeline.windows(words_in_phrase).enumerate() {
        let candidate = window
            .iter()
            .map(|w| w.word.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        if comparer.is_not_similar_to(&candidate) {
            continue;
        }

        let accuracy = comparer.similarity_percent(&candidate);
        matches.push(PhraseOccurrence {
            phrase: phrase.to_string(),
            found_at: timeline[i].start,
            accuracy,
            message: format!("Phrase >{phrase}< is similar to >{candidate}< in {accuracy}%"),
        });
    }

    PhraseSearch::Matches(matches)
}
