use std::sync::Arc;

use crate::matching::domain::normalizer;
use crate::matching::domain::phrase_comparer::PhraseComparer;
use crate::matching::domain::phrase_matcher::{find_phrase, PhraseSearch};
use crate::matching::domain::phrase_occurrence::PhraseOccurrence;
use crate::matching::domain::word_timeline::{build_timeline, TimedWord};
use crate::shared::constants::TRANSCRIPT_ECHO_LINES;
use crate::shared::time_format::clock;
use crate::transcript::domain::transcript_line::render_line;
use crate::transcript::domain::transcript_segment::TranscriptSegment;

use super::message_writer::MessageWriter;

const DOUBLE_RULE: &str = "====================================================";
const SINGLE_RULE: &str = "----------------------------------------------------";

/// Audits a transcript against the configured desired and prohibited phrase
/// lists and renders the report through the message sink.
///
/// One `check` call owns all state; occurrence sets are cleared and rebuilt
/// on every run. Not safe for concurrent checks through a shared instance —
/// use independent instances instead.
pub struct TranscriptAuditor {
    desired_phrases: Vec<String>,
    prohibited_phrases: Vec<String>,
    show_details: bool,
    comparer: Box<dyn PhraseComparer>,
    writer: Arc<dyn MessageWriter>,
    timeline: Vec<TimedWord>,
    occurrences_of_desired: Vec<PhraseOccurrence>,
    occurrences_of_prohibited: Vec<PhraseOccurrence>,
}

impl TranscriptAuditor {
    pub fn new(
        desired_phrases: Vec<String>,
        prohibited_phrases: Vec<String>,
        show_details: bool,
        comparer: Box<dyn PhraseComparer>,
        writer: Arc<dyn MessageWriter>,
    ) -> Self {
        Self {
            desired_phrases,
            prohibited_phrases,
            show_details,
            comparer,
            writer,
            timeline: Vec::new(),
            occurrences_of_desired: Vec::new(),
            occurrences_of_prohibited: Vec::new(),
        }
    }

    /// Runs both checks over the transcript and renders the report.
    /// Degenerate inputs (empty transcript, empty phrase lists) produce an
    /// informational report, never an error.
    pub fn check(&mut self, transcript: &[TranscriptSegment]) {
        log::info!("Transcript check started");

        let desired = normalize_phrases(&self.desired_phrases);
        let prohibited = normalize_phrases(&self.prohibited_phrases);
        self.occurrences_of_desired.clear();
        self.occurrences_of_prohibited.clear();

        self.timeline = build_timeline(transcript);

        self.echo_transcript(transcript);

        log::info!("Asserting that desired phrases occur");
        self.assert_includes(&desired);

        log::info!("Asserting that prohibited phrases are absent");
        self.assert_does_not_include(&prohibited);

        log::info!("Transcript check finished");
    }

    pub fn occurrences_of_desired(&self) -> &[PhraseOccurrence] {
        &self.occurrences_of_desired
    }

    pub fn occurrences_of_prohibited(&self) -> &[PhraseOccurrence] {
        &self.occurrences_of_prohibited
    }

    fn echo_transcript(&self, transcript: &[TranscriptSegment]) {
        self.writer.write_empty_line();
        self.writer.write_notification(&format!(
            "First {TRANSCRIPT_ECHO_LINES} lines of transcript"
        ));
        for segment in transcript.iter().take(TRANSCRIPT_ECHO_LINES) {
            self.writer
                .write(&render_line(segment.start, segment.end, &segment.text));
        }
    }

    fn assert_includes(&mut self, desired: &[String]) {
        self.writer.write("");
        self.writer.write(DOUBLE_RULE);
        self.writer.write("Checking existence of desired phrases:");

        if self.timeline.is_empty() {
            self.writer
                .write_internal_error("Looks like the transcript is empty");
            self.writer.write(SINGLE_RULE);
            return;
        }

        if desired.is_empty() {
            self.writer
                .write_notification("The list of desired phrases is empty.");
            self.writer.write(SINGLE_RULE);
            return;
        }

        let occurrences = self.find_all(desired);

        let mut missing = phrases_without_occurrence(desired, &occurrences);
        missing.sort();

        if !missing.is_empty() {
            self.writer.write_failure("WARNING: Desired phrases missing:");
            for phrase in &missing {
                self.writer.write(&format!("\t{phrase}"));
            }
        }

        if !occurrences.is_empty() {
            if missing.is_empty() {
                self.writer
                    .write_success("SUCCESS: Found occurrences of all desired phrases");
            } else {
                self.writer
                    .write_warn("WARNING: Only some desired phrases have been found");
            }
            self.write_groups(&occurrences);
            self.occurrences_of_desired = occurrences;
        }

        self.writer.write(SINGLE_RULE);
    }

    fn assert_does_not_include(&mut self, prohibited: &[String]) {
        self.writer.write("");
        self.writer.write(DOUBLE_RULE);
        self.writer
            .write("Checking lack of existence of prohibited phrases:");

        if self.timeline.is_empty() {
            self.writer
                .write_internal_error("Looks like the transcript is empty");
            self.writer.write(SINGLE_RULE);
            return;
        }

        if prohibited.is_empty() {
            self.writer
                .write_notification("The list of prohibited phrases is empty.");
            self.writer.write(SINGLE_RULE);
            return;
        }

        let occurrences = self.find_all(prohibited);

        let mut not_found = phrases_without_occurrence(prohibited, &occurrences);
        not_found.sort();

        if occurrences.is_empty() {
            self.writer
                .write_success("SUCCESS: None of the prohibited phrases has been found");
            for phrase in &not_found {
                self.writer.write(&format!("\t{phrase}"));
            }
        } else {
            self.writer
                .write_failure("WARNING: Found occurrences of not expected phrases");
            self.write_groups(&occurrences);

            if !not_found.is_empty() {
                self.writer
                    .write_warn("WARNING: Only some prohibited phrases do not exist");
                for phrase in &not_found {
                    self.writer.write(&format!("\t{phrase}"));
                }
            }

            self.occurrences_of_prohibited = occurrences;
        }

        self.writer.write(SINGLE_RULE);
    }

    fn find_all(&mut self, phrases: &[String]) -> Vec<PhraseOccurrence> {
        let mut occurrences = Vec::new();
        for phrase in phrases {
            match find_phrase(self.comparer.as_mut(), phrase, &self.timeline) {
                PhraseSearch::TooShort => self.writer.write_warn(&format!(
                    "WARNING: Phrase is too short: {phrase}. It will not be checked"
                )),
                PhraseSearch::Matches(matches) => occurrences.extend(matches),
            }
        }
        occurrences
    }

    fn write_groups(&self, occurrences: &[PhraseOccurrence]) {
        for (phrase, group) in group_occurrences(occurrences) {
            let summary = format!("{} - occurred {} times.", phrase, group.len());
            if self.show_details {
                self.writer
                    .write(&format!("{summary}\n{}", detail_lines(&group)));
            } else {
                self.writer.write(&summary);
            }
        }
    }
}

/// Normalizes configured phrases and drops the ones that end up blank.
fn normalize_phrases(phrases: &[String]) -> Vec<String> {
    phrases
        .iter()
        .map(|p| normalizer::normalize(p))
        .filter(|p| !p.is_empty())
        .collect()
}

/// The normalized phrases with no occurrence of their own, preserving input
/// order and dropping duplicates of already-reported phrases.
fn phrases_without_occurrence(
    phrases: &[String],
    occurrences: &[PhraseOccurrence],
) -> Vec<String> {
    let mut absent: Vec<String> = Vec::new();
    for phrase in phrases {
        if occurrences.iter().any(|o| &o.phrase == phrase) {
            continue;
        }
        if !absent.contains(phrase) {
            absent.push(phrase.clone());
        }
    }
    absent
}

/// Groups occurrences by phrase; groups ordered by the earliest occurrence
/// within each, ties broken lexicographically by phrase text.
fn group_occurrences(occurrences: &[PhraseOccurrence]) -> Vec<(String, Vec<PhraseOccurrence>)> {
    let mut groups: Vec<(String, Vec<PhraseOccurrence>)> = Vec::new();
    for occurrence in occurrences {
        match groups.iter_mut().find(|(p, _)| p == &occurrence.phrase) {
            Some((_, group)) => group.push(occurrence.clone()),
            None => groups.push((occurrence.phrase.clone(), vec![occurrence.clone()])),
        }
    }
    groups.sort_by(|a, b| {
        let earliest_a = a.1.iter().map(|o| o.found_at).min();
        let earliest_b = b.1.iter().map(|o| o.found_at).min();
        earliest_a.cmp(&earliest_b).then_with(|| a.0.cmp(&b.0))
    });
    groups
}

/// Detail lines for one group: accuracy descending, then found_at ascending.
fn detail_lines(group: &[PhraseOccurrence]) -> String {
    let mut ordered = group.to_vec();
    ordered.sort_by(|a, b| {
        b.accuracy
            .cmp(&a.accuracy)
            .then_with(|| a.found_at.cmp(&b.found_at))
    });
    ordered
        .iter()
        .map(|o| format!("\t{} {}", clock(o.found_at), o.message))
        .collect::<Vec<_>>()
        .join("\n")
}
