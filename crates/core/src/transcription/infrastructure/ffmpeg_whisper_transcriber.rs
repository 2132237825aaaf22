use std::error::Error;
use std::path::Path;

use crate::transcript::domain::transcript_segment::TranscriptSegment;
use crate::transcription::domain::audio_preparer::AudioPreparer;
use crate::transcription::domain::audio_transcriber::AudioTranscriber;
use crate::transcription::domain::media_transcriber::MediaTranscriber;

/// Media transcription as audio preparation followed by transcription of
/// the prepared file.
pub struct FfmpegWhisperTranscriber {
    preparer: Box<dyn AudioPreparer>,
    transcriber: Box<dyn AudioTranscriber>,
}

impl FfmpegWhisperTranscriber {
    pub fn new(preparer: Box<dyn AudioPreparer>, transcriber: Box<dyn AudioTranscriber>) -> Self {
        Self {
            preparer,
            transcriber,
        }
    }
}

impl MediaTranscriber for FfmpegWhisperTranscriber {
    fn transcribe_media(&self, media: &Path) -> Result<Vec<TranscriptSegment>, Box<dyn Error>> {
        let audio = self.preparer.prepare(media)?;
        self.transcriber.transcribe(&audio)
    }
}
