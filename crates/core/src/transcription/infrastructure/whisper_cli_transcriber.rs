use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::config::WhisperModel;
use crate::shared::constants::PREPARED_AUDIO_SUFFIX;
use crate::shared::downloads::{self, DownloadError};
use crate::shared::time_format::parse_clock;
use crate::transcript::domain::transcript_segment::TranscriptSegment;
use crate::transcript::domain::transcript_store::TranscriptStore;
use crate::transcription::domain::audio_transcriber::AudioTranscriber;

/// Segment lines on whisper.cpp stdout:
/// `[00:00:00.000 --> 00:00:04.200]   spoken text`
static SEGMENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(?P<from>[0-9:.]+) --> (?P<to>[0-9:.]+)\]\s+(?P<text>.*)$")
        .expect("segment pattern is valid")
});

#[derive(Error, Debug)]
pub enum TranscribeError {
    #[error("audio path has no file name: {0}")]
    InvalidAudio(PathBuf),
    #[error("failed to obtain model {model}: {source}")]
    ModelDownload {
        model: WhisperModel,
        #[source]
        source: DownloadError,
    },
    #[error("failed to create model directory {path}: {source}")]
    ModelDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("whisper exited with {status}: {stderr}")]
    Whisper {
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Transcribes prepared audio by running the whisper.cpp CLI, downloading
/// the ggml model on first use and caching transcripts through the store so
/// repeated checks of the same recording skip the expensive run.
pub struct WhisperCliTranscriber {
    whisper_path: PathBuf,
    whisper_dir: PathBuf,
    model: WhisperModel,
    language: String,
    forced: bool,
    store: Box<dyn TranscriptStore>,
}

impl WhisperCliTranscriber {
    pub fn new(
        whisper_path: PathBuf,
        whisper_dir: PathBuf,
        model: WhisperModel,
        language: String,
        forced: bool,
        store: Box<dyn TranscriptStore>,
    ) -> Self {
        Self {
            whisper_path,
            whisper_dir,
            model,
            language,
            forced,
            store,
        }
    }

    fn run(&self, audio: &Path) -> Result<Vec<TranscriptSegment>, Box<dyn Error>> {
        let transcript_name = transcript_file_name(audio, self.model)
            .ok_or_else(|| TranscribeError::InvalidAudio(audio.to_path_buf()))?;

        if !self.forced {
            if let Ok(segments) = self.store.load(&transcript_name) {
                log::info!("Transcript {transcript_name} already exists, reusing it");
                return Ok(segments);
            }
        }

        let model_path = self.ensure_model()?;

        log::info!(
            "Transcribing {} with the {} model",
            audio.display(),
            self.model
        );
        let started = Instant::now();
        let output = Command::new(&self.whisper_path)
            .arg("-m")
            .arg(&model_path)
            .arg("-f")
            .arg(audio)
            .args(["-l", &self.language])
            .output()
            .map_err(|e| TranscribeError::Spawn {
                command: self.whisper_path.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(TranscribeError::Whisper {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }

        let segments = parse_whisper_output(&String::from_utf8_lossy(&output.stdout));
        report_speed(&segments, started.elapsed().as_secs_f64());

        self.store.save(&segments, &transcript_name)?;
        Ok(segments)
    }

    fn ensure_model(&self) -> Result<PathBuf, TranscribeError> {
        let model_path = self.whisper_dir.join(self.model.file_name());
        if model_path.exists() {
            return Ok(model_path);
        }

        log::warn!(
            "Model {} not found at {}, downloading it",
            self.model,
            model_path.display()
        );
        fs::create_dir_all(&self.whisper_dir).map_err(|e| TranscribeError::ModelDir {
            path: self.whisper_dir.clone(),
            source: e,
        })?;
        downloads::download(
            &self.model.download_url(),
            &model_path,
            Some(downloads::ten_percent_steps(&self.model.file_name())),
        )
        .map_err(|e| TranscribeError::ModelDownload {
            model: self.model,
            source: e,
        })?;
        Ok(model_path)
    }
}

impl AudioTranscriber for WhisperCliTranscriber {
    fn transcribe(&self, audio: &Path) -> Result<Vec<TranscriptSegment>, Box<dyn Error>> {
        self.run(audio)
    }
}

/// `{stem}.speech-{model}.txt`, with the prepared-audio suffix stripped so
/// the transcript is named after the original recording.
pub fn transcript_file_name(audio: &Path, model: WhisperModel) -> Option<String> {
    let file_name = audio.file_name()?.to_str()?;
    let stem = file_name
        .strip_suffix(PREPARED_AUDIO_SUFFIX)
        .unwrap_or_else(|| file_name.rsplit_once('.').map_or(file_name, |(s, _)| s));
    Some(format!("{stem}.speech-{model}.txt"))
}

/// Picks the segment lines out of whisper.cpp stdout, ignoring everything
/// else the tool prints around them.
pub fn parse_whisper_output(stdout: &str) -> Vec<TranscriptSegment> {
    stdout
        .lines()
        .filter_map(|line| {
            let captures = SEGMENT_PATTERN.captures(line)?;
            let start = parse_clock(&captures["from"])?;
            let end = parse_clock(&captures["to"])?;
            Some(TranscriptSegment {
                start,
                end,
                text: captures["text"].trim().to_string(),
            })
        })
        .collect()
}

fn report_speed(segments: &[TranscriptSegment], elapsed_secs: f64) {
    if elapsed_secs <= 0.0 {
        return;
    }
    let audio_secs = segments
        .last()
        .map(|s| s.end.as_secs_f64())
        .unwrap_or(0.0);
    log::info!(">>> Speed: {:.2}x", audio_secs / elapsed_secs);
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use rstest::rstest;

    struct StubStore {
        segments: Vec<TranscriptSegment>,
        saved: Arc<Mutex<Vec<String>>>,
    }

    impl TranscriptStore for StubStore {
        fn load(&self, _file_name: &str) -> Result<Vec<TranscriptSegment>, Box<dyn Error>> {
            if self.segments.is_empty() {
                Err("no transcript".into())
            } else {
                Ok(self.segments.clone())
            }
        }

        fn save(
            &self,
            _segments: &[TranscriptSegment],
            file_name: &str,
        ) -> Result<(), Box<dyn Error>> {
            self.saved.lock().unwrap().push(file_name.to_string());
            Ok(())
        }
    }

    fn segment(start_ms: u64, end_ms: u64, text: &str) -> TranscriptSegment {
        TranscriptSegment {
            start: Duration::from_millis(start_ms),
            end: Duration::from_millis(end_ms),
            text: text.to_string(),
        }
    }

    #[rstest]
    #[case("talk.prepared.wav", "talk.speech-tiny.txt")]
    #[case("talk.wav", "talk.speech-tiny.txt")]
    #[case("no-extension", "no-extension.speech-tiny.txt")]
    fn transcript_names_follow_the_recording(#[case] audio: &str, #[case] expected: &str) {
        let name = transcript_file_name(Path::new(audio), WhisperModel::Tiny).unwrap();
        assert_eq!(name, expected);
    }

    #[test]
    fn transcript_name_carries_the_model() {
        let name =
            transcript_file_name(Path::new("talk.prepared.wav"), WhisperModel::BaseEn).unwrap();
        assert_eq!(name, "talk.speech-base.en.txt");
    }

    #[test]
    fn parses_segment_lines_and_skips_tool_chatter() {
        let stdout = "\
whisper_init_from_file_with_params_no_state: loading model\n\
system_info: n_threads = 4\n\
\n\
[00:00:00.000 --> 00:00:04.200]   Hello there everyone\n\
[00:00:04.200 --> 00:00:07.500]   and welcome back.\n\
whisper_print_timings: total time = 1923.44 ms\n";

        let segments = parse_whisper_output(stdout);

        assert_eq!(
            segments,
            vec![
                segment(0, 4_200, "Hello there everyone"),
                segment(4_200, 7_500, "and welcome back."),
            ]
        );
    }

    #[test]
    fn malformed_timestamps_are_dropped() {
        let stdout = "[00:00:xx.000 --> 00:00:04.200]   broken\n";
        assert!(parse_whisper_output(stdout).is_empty());
    }

    #[test]
    fn cached_transcript_short_circuits_the_whisper_run() {
        let cached = vec![segment(0, 1_000, "cached text")];
        let saved = Arc::new(Mutex::new(Vec::new()));
        let transcriber = WhisperCliTranscriber::new(
            PathBuf::from("whisper-binary-that-does-not-exist"),
            PathBuf::from("models-that-do-not-exist"),
            WhisperModel::Tiny,
            "auto".to_string(),
            false,
            Box::new(StubStore {
                segments: cached.clone(),
                saved: Arc::clone(&saved),
            }),
        );

        let segments = transcriber
            .transcribe(Path::new("talk.prepared.wav"))
            .unwrap();

        assert_eq!(segments, cached);
        assert!(saved.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_transcription_reports_no_segments() {
        assert!(parse_whisper_output("").is_empty());
    }
}
