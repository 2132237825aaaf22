use std::time::Duration;

/// One time-stamped piece of recognized speech, as produced by the
/// transcriber. Segments are assumed ordered by non-decreasing start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptSegment {
    pub start: Duration,
    pub end: Duration,
    pub text: String,
}
