use std::time::Duration;

use crate::transcript::domain::transcript_segment::TranscriptSegment;

use super::normalizer;

/// One normalized token of the transcript. All words of a segment share that
/// segment's start/end; the timeline's insertion order is the transcript's
/// chronological order and is the search space for the sliding window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedWord {
    pub word: String,
    pub start: Duration,
    pub end: Duration,
}

/// Flattens the transcript into a time-ordered word stream. Segments whose
/// normalized text is empty contribute nothing.
pub fn build_timeline(segments: &[TranscriptSegment]) -> Vec<TimedWord> {
    let mut words = Vec::new();
    for segment in segments {
        let sentence = normalizer::normalize(&segment.text);
        if sentence.is_empty() {
            continue;
        }
        for word in sentence.split(' ') {
            words.push(TimedWord {
                word: word.to_string(),
                start: segment.start,
                end: segment.end,
            });
        }
    }
    words
}
