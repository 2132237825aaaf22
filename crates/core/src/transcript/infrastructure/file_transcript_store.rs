use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::transcript::domain::transcript_line::{parse_line, render_line};
use crate::transcript::domain::transcript_segment::TranscriptSegment;
use crate::transcript::domain::transcript_store::TranscriptStore;

#[derive(Error, Debug)]
pub enum TranscriptStoreError {
    #[error("transcript file does not exist: {0}")]
    Missing(PathBuf),
    #[error("failed to read transcript {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write transcript {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Transcript store backed by line files under one output directory.
pub struct FileTranscriptStore {
    output_dir: PathBuf,
}

impl FileTranscriptStore {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    fn file_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    fn load_file(&self, file_name: &str) -> Result<Vec<TranscriptSegment>, TranscriptStoreError> {
        let path = self.file_path(file_name);
        if !path.exists() {
            return Err(TranscriptStoreError::Missing(path));
        }

        log::info!("Loading transcript from {}", path.display());

        let content = fs::read_to_string(&path).map_err(|e| TranscriptStoreError::Read {
            path: path.clone(),
            source: e,
        })?;

        let mut segments = Vec::new();
        for line in content.lines() {
            match parse_line(line) {
                Some(segment) => segments.push(segment),
                None => log::debug!("Line omitted: {line}"),
            }
        }
        Ok(segments)
    }

    fn save_file(
        &self,
        segments: &[TranscriptSegment],
        file_name: &str,
    ) -> Result<(), TranscriptStoreError> {
        let path = self.file_path(file_name);

        fs::create_dir_all(&self.output_dir).map_err(|e| TranscriptStoreError::Write {
            path: self.output_dir.clone(),
            source: e,
        })?;

        log::info!("Saving transcript to {}", path.display());

        let mut content = String::new();
        for segment in segments {
            content.push_str(&render_line(segment.start, segment.end, &segment.text));
            content.push('\n');
        }

        fs::write(&path, content).map_err(|e| TranscriptStoreError::Write { path, source: e })
    }
}

impl TranscriptStore for FileTranscriptStore {
    fn load(&self, file_name: &str) -> Result<Vec<TranscriptSegment>, Box<dyn std::error::Error>> {
        Ok(self.load_file(file_name)?)
    }

    fn save(
        &self,
        segments: &[TranscriptSegment],
        file_name: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        Ok(self.save_file(segments, file_name)?)
    }
}
