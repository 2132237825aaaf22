use std::time::Duration;

/// One window of the transcript that satisfied the active match policy for
/// one configured phrase. `phrase` is the normalized phrase text; `accuracy`
/// is the similarity percentage the window scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseOccurrence {
    pub phrase: String,
    pub found_at: Duration,
    pub accuracy: u32,
    pub message: String,
}
