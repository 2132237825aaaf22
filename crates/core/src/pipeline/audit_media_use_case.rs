use std::error::Error;
use std::path::Path;

use crate::audit::domain::transcript_auditor::TranscriptAuditor;
use crate::transcription::domain::media_transcriber::MediaTranscriber;

/// Runs the whole check for one media file: transcribe, then audit the
/// transcript against the configured phrase lists.
pub struct AuditMediaUseCase {
    transcriber: Box<dyn MediaTranscriber>,
    auditor: TranscriptAuditor,
}

impl AuditMediaUseCase {
    pub fn new(transcriber: Box<dyn MediaTranscriber>, auditor: TranscriptAuditor) -> Self {
        Self {
            transcriber,
            auditor,
        }
    }

    pub fn run(&mut self, media: &Path) -> Result<(), Box<dyn Error>> {
        log::info!("Checking {}", media.display());
        let transcript = self.transcriber.transcribe_media(media)?;
        self.auditor.check(&transcript);
        log::info!("Check of {} finished", media.display());
        Ok(())
    }

    pub fn auditor(&self) -> &TranscriptAuditor {
        &self.auditor
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::audit::domain::message_writer::MessageWriter;
    use crate::matching::domain::phrase_comparer::MatchPolicy;
    use crate::matching::infrastructure::levenshtein_comparer::LevenshteinComparer;
    use crate::transcript::domain::transcript_segment::TranscriptSegment;

    struct StubTranscriber {
        segments: Vec<TranscriptSegment>,
        calls: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl MediaTranscriber for StubTranscriber {
        fn transcribe_media(
            &self,
            media: &Path,
        ) -> Result<Vec<TranscriptSegment>, Box<dyn Error>> {
            self.calls.lock().unwrap().push(media.to_path_buf());
            Ok(self.segments.clone())
        }
    }

    struct FailingTranscriber;

    impl MediaTranscriber for FailingTranscriber {
        fn transcribe_media(
            &self,
            _media: &Path,
        ) -> Result<Vec<TranscriptSegment>, Box<dyn Error>> {
            Err("transcription broke".into())
        }
    }

    #[derive(Default)]
    struct SilentWriter;

    impl MessageWriter for SilentWriter {
        fn write(&self, _text: &str) {}
        fn write_empty_line(&self) {}
        fn write_notification(&self, _text: &str) {}
        fn write_main_notification(&self, _text: &str) {}
        fn write_success(&self, _text: &str) {}
        fn write_warn(&self, _text: &str) {}
        fn write_failure(&self, _text: &str) {}
        fn write_header(&self, _text: &str) {}
        fn write_internal_error(&self, _text: &str) {}
    }

    fn auditor(desired: &[&str]) -> TranscriptAuditor {
        TranscriptAuditor::new(
            desired.iter().map(|s| s.to_string()).collect(),
            Vec::new(),
            false,
            Box::new(LevenshteinComparer::new(MatchPolicy {
                max_distance: 1,
                min_similarity_percent: 0,
            })),
            Arc::new(SilentWriter),
        )
    }

    #[test]
    fn transcribes_then_audits_the_transcript() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let segments = vec![TranscriptSegment {
            start: Duration::ZERO,
            end: Duration::from_secs(2),
            text: "thank you for watching".to_string(),
        }];
        let mut use_case = AuditMediaUseCase::new(
            Box::new(StubTranscriber {
                segments,
                calls: Arc::clone(&calls),
            }),
            auditor(&["thank you"]),
        );

        use_case.run(Path::new("media/talk.mp4")).unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec![PathBuf::from("media/talk.mp4")]
        );
        assert_eq!(use_case.auditor().occurrences_of_desired().len(), 1);
    }

    #[test]
    fn transcription_failure_surfaces_and_skips_the_audit() {
        let mut use_case = AuditMediaUseCase::new(
            Box::new(FailingTranscriber),
            auditor(&["thank you"]),
        );

        let result = use_case.run(Path::new("media/talk.mp4"));

        assert!(result.is_err());
        assert!(use_case.auditor().occurrences_of_desired().is_empty());
    }
}
