use std::error::Error;
use std::path::Path;

use crate::transcript::domain::transcript_segment::TranscriptSegment;

/// End-to-end transcription of a media file, audio preparation included.
pub trait MediaTranscriber: Send {
    fn transcribe_media(&self, media: &Path) -> Result<Vec<TranscriptSegment>, Box<dyn Error>>;
}
