use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::shared::constants::{FFMPEG_BINARY_NAME, PREPARED_AUDIO_SUFFIX};
use crate::shared::downloads::{self, DownloadError};
use crate::transcription::domain::audio_preparer::AudioPreparer;

#[derive(Error, Debug)]
pub enum AudioPrepareError {
    #[error("media file does not exist: {0}")]
    MissingMedia(PathBuf),
    #[error("media path has no file name: {0}")]
    InvalidMedia(PathBuf),
    #[error("failed to obtain ffmpeg: {0}")]
    FfmpegDownload(#[from] DownloadError),
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
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
    #[error("ffmpeg exited with {status}: {stderr}")]
    Ffmpeg {
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Extracts a mono 16 kHz PCM WAV from a media file by spawning ffmpeg,
/// downloading the ffmpeg release archive on first use when the configured
/// binary does not exist.
pub struct FfmpegAudioPreparer {
    ffmpeg_path: PathBuf,
    ffmpeg_zip_url: String,
    output_dir: PathBuf,
    forced: bool,
}

impl FfmpegAudioPreparer {
    pub fn new(
        ffmpeg_path: PathBuf,
        ffmpeg_zip_url: String,
        output_dir: PathBuf,
        forced: bool,
    ) -> Self {
        Self {
            ffmpeg_path,
            ffmpeg_zip_url,
            output_dir,
            forced,
        }
    }

    /// Where the prepared WAV for `media` lands in the output directory.
    pub fn prepared_path(&self, media: &Path) -> Result<PathBuf, AudioPrepareError> {
        let stem = media
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| AudioPrepareError::InvalidMedia(media.to_path_buf()))?;
        Ok(self
            .output_dir
            .join(format!("{stem}{PREPARED_AUDIO_SUFFIX}")))
    }

    fn prepare_audio(&self, media: &Path) -> Result<PathBuf, AudioPrepareError> {
        if !media.exists() {
            return Err(AudioPrepareError::MissingMedia(media.to_path_buf()));
        }

        let prepared = self.prepared_path(media)?;
        if !self.forced && prepared.exists() {
            log::info!(
                "Prepared audio {} already exists, reusing it",
                prepared.display()
            );
            return Ok(prepared);
        }

        self.ensure_ffmpeg()?;

        fs::create_dir_all(&self.output_dir).map_err(|e| AudioPrepareError::OutputDir {
            path: self.output_dir.clone(),
            source: e,
        })?;

        log::info!(
            "Extracting audio from {} to {}",
            media.display(),
            prepared.display()
        );
        let output = Command::new(&self.ffmpeg_path)
            .arg("-y")
            .arg("-i")
            .arg(media)
            .args(["-acodec", "pcm_s16le", "-ac", "1", "-ar", "16000"])
            .arg(&prepared)
            .output()
            .map_err(|e| AudioPrepareError::Spawn {
                command: self.ffmpeg_path.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(AudioPrepareError::Ffmpeg {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        log::info!("Audio extraction finished");
        Ok(prepared)
    }

    fn ensure_ffmpeg(&self) -> Result<(), AudioPrepareError> {
        if self.ffmpeg_path.exists() {
            return Ok(());
        }

        log::warn!(
            "ffmpeg not found at {}, downloading a release build",
            self.ffmpeg_path.display()
        );
        let dir = self
            .ffmpeg_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| AudioPrepareError::OutputDir {
            path: dir.clone(),
            source: e,
        })?;

        let archive = dir.join("ffmpeg.zip");
        downloads::download(
            &self.ffmpeg_zip_url,
            &archive,
            Some(downloads::ten_percent_steps("ffmpeg")),
        )?;
        downloads::extract_zip_entry(&archive, FFMPEG_BINARY_NAME, &self.ffmpeg_path)?;

        if let Err(e) = fs::remove_file(&archive) {
            log::debug!("Could not remove {}: {e}", archive.display());
        }
        Ok(())
    }
}

impl AudioPreparer for FfmpegAudioPreparer {
    fn prepare(&self, media: &Path) -> Result<PathBuf, Box<dyn Error>> {
        Ok(self.prepare_audio(media)?)
    }
}
