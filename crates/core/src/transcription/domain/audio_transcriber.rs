use std::error::Error;
use std::path::Path;

use crate::transcript::domain::transcript_segment::TranscriptSegment;

/// Converts prepared audio into time-stamped transcript segments.
pub trait AudioTranscriber: Send {
    fn transcribe(&self, audio: &Path) -> Result<Vec<TranscriptSegment>, Box<dyn Error>>;
}
