use super::transcript_segment::TranscriptSegment;

/// Domain interface for transcript persistence.
///
/// Implementations resolve bare file names against their own storage root;
/// the line format is the one defined in `transcript_line`.
pub trait TranscriptStore: Send {
    fn load(&self, file_name: &str) -> Result<Vec<TranscriptSegment>, Box<dyn std::error::Error>>;

    fn save(
        &self,
        segments: &[TranscriptSegment],
        file_name: &str,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
