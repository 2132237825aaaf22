use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::matching::domain::phrase_comparer::MatchPolicy;
use crate::shared::constants::{DEFAULT_FFMPEG_ZIP_URL, FFMPEG_BINARY_NAME, WHISPER_MODEL_BASE_URL};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write configuration template {path}: {source}")]
    WriteTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("configuration must list at least one desired or prohibited phrase (edit {0})")]
    NoPhrases(PathBuf),
}

/// whisper.cpp ggml model flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum WhisperModel {
    #[serde(rename = "tiny")]
    Tiny,
    #[serde(rename = "tiny.en")]
    TinyEn,
    #[serde(rename = "base")]
    Base,
    #[serde(rename = "base.en")]
    BaseEn,
    #[serde(rename = "small")]
    Small,
    #[serde(rename = "small.en")]
    SmallEn,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "medium.en")]
    MediumEn,
    #[serde(rename = "large-v3")]
    LargeV3,
}

impl std::fmt::Display for WhisperModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WhisperModel::Tiny => "tiny",
            WhisperModel::TinyEn => "tiny.en",
            WhisperModel::Base => "base",
            WhisperModel::BaseEn => "base.en",
            WhisperModel::Small => "small",
            WhisperModel::SmallEn => "small.en",
            WhisperModel::Medium => "medium",
            WhisperModel::MediumEn => "medium.en",
            WhisperModel::LargeV3 => "large-v3",
        };
        write!(f, "{name}")
    }
}

impl WhisperModel {
    pub fn file_name(&self) -> String {
        format!("ggml-{self}.bin")
    }

    pub fn download_url(&self) -> String {
        format!("{WHISPER_MODEL_BASE_URL}/{}", self.file_name())
    }
}

/// Validated, strongly-typed configuration. Built from a TOML file; the
/// engine never re-parses or re-validates any of this at check time.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// ffmpeg binary; downloaded from `ffmpeg_zip_url` on first use when
    /// the file does not exist.
    pub ffmpeg_path: PathBuf,
    pub ffmpeg_zip_url: String,
    /// whisper.cpp CLI binary.
    pub whisper_path: PathBuf,
    /// Directory ggml models are downloaded into.
    pub whisper_dir: PathBuf,
    pub output_dir: PathBuf,
    pub language: String,
    pub model: WhisperModel,
    pub desired_phrases: Vec<String>,
    pub prohibited_phrases: Vec<String>,
    /// Re-run transcription even when a saved transcript exists.
    pub forced_transcription: bool,
    /// Re-extract audio even when a prepared WAV exists.
    pub forced_audio_extraction: bool,
    pub show_details_in_report: bool,
    pub max_distance: usize,
    /// Minimum similarity percentage; a value in (0,100] switches the match
    /// policy to percent mode, 0 leaves distance mode active.
    pub min_similarity_percent: u32,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: Path::new("ffmpeg").join(FFMPEG_BINARY_NAME),
            ffmpeg_zip_url: DEFAULT_FFMPEG_ZIP_URL.to_string(),
            whisper_path: PathBuf::from("whisper/whisper-cli"),
            whisper_dir: PathBuf::from("whisper"),
            output_dir: PathBuf::from("output"),
            language: "auto".to_string(),
            model: WhisperModel::Tiny,
            desired_phrases: Vec::new(),
            prohibited_phrases: Vec::new(),
            forced_transcription: true,
            forced_audio_extraction: true,
            show_details_in_report: true,
            max_distance: 2,
            min_similarity_percent: 0,
        }
    }
}

impl AuditConfig {
    /// Loads the configuration, writing a commented template first when the
    /// file does not exist. The template's empty phrase lists fail
    /// validation, so a first run tells the user what to fill in.
    pub fn load_or_init(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::warn!(
                "Configuration {} not found, writing template",
                path.display()
            );
            fs::write(path, template()).map_err(|e| ConfigError::WriteTemplate {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: AuditConfig =
            toml::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        if self.desired_phrases.is_empty() && self.prohibited_phrases.is_empty() {
            return Err(ConfigError::NoPhrases(path.to_path_buf()));
        }
        Ok(())
    }

    pub fn policy(&self) -> MatchPolicy {
        MatchPolicy {
            max_distance: self.max_distance,
            min_similarity_percent: self.min_similarity_percent,
        }
    }
}

fn template() -> String {
    format!(
        r#"# speechcheck configuration

# Phrases that must appear in the speech, and phrases that must not.
# At least one of the two lists has to be non-empty.
desired_phrases = []
prohibited_phrases = []

# ffmpeg binary used for audio extraction; downloaded from ffmpeg_zip_url
# on first use when the file does not exist.
ffmpeg_path = "ffmpeg/{ffmpeg}"
ffmpeg_zip_url = "{ffmpeg_url}"

# whisper.cpp CLI binary and the directory ggml models are stored in.
whisper_path = "whisper/whisper-cli"
whisper_dir = "whisper"

# Prepared audio, transcripts and reports are written here.
output_dir = "output"

# Transcription language ("auto" detects) and ggml model
# (tiny, tiny.en, base, base.en, small, small.en, medium, medium.en, large-v3).
language = "auto"
model = "tiny"

# Redo work even when prepared audio / a saved transcript already exists.
forced_audio_extraction = true
forced_transcription = true

show_details_in_report = true

# Match policy: min_similarity_percent in (0,100] switches to percent mode,
# 0 keeps the absolute edit-distance cap below.
max_distance = 2
min_similarity_percent = 0
"#,
        ffmpeg = FFMPEG_BINARY_NAME,
        ffmpeg_url = DEFAULT_FFMPEG_ZIP_URL,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("speechcheck.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_minimal_config_with_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "desired_phrases = [\"hello there\"]\n");

        let config = AuditConfig::load_or_init(&path).unwrap();

        assert_eq!(config.desired_phrases, vec!["hello there"]);
        assert!(config.prohibited_phrases.is_empty());
        assert_eq!(config.language, "auto");
        assert_eq!(config.model, WhisperModel::Tiny);
        assert_eq!(config.max_distance, 2);
        assert!(!config.policy().percent_mode());
    }

    #[test]
    fn parses_full_config() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            r#"
desired_phrases = ["good phrase"]
prohibited_phrases = ["bad phrase"]
ffmpeg_path = "/usr/bin/ffmpeg"
whisper_path = "/usr/bin/whisper-cli"
whisper_dir = "/var/lib/whisper"
output_dir = "/tmp/out"
language = "en"
model = "base.en"
forced_transcription = false
forced_audio_extraction = false
show_details_in_report = false
max_distance = 1
min_similarity_percent = 80
"#,
        );

        let config = AuditConfig::load_or_init(&path).unwrap();

        assert_eq!(config.model, WhisperModel::BaseEn);
        assert_eq!(config.model.file_name(), "ggml-base.en.bin");
        assert!(!config.forced_transcription);
        assert!(config.policy().percent_mode());
        assert_eq!(config.policy().min_similarity_percent, 80);
    }

    #[test]
    fn missing_file_writes_template_then_fails_phrase_validation() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("speechcheck.toml");

        let err = AuditConfig::load_or_init(&path).unwrap_err();

        assert!(matches!(err, ConfigError::NoPhrases(_)));
        assert!(path.exists());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("desired_phrases"));
    }

    #[test]
    fn template_is_valid_toml_with_default_values() {
        let parsed: AuditConfig = toml::from_str(&template()).unwrap();
        let defaults = AuditConfig::default();
        assert_eq!(parsed.ffmpeg_path, defaults.ffmpeg_path);
        assert_eq!(parsed.output_dir, defaults.output_dir);
        assert_eq!(parsed.max_distance, defaults.max_distance);
        assert_eq!(parsed.min_similarity_percent, defaults.min_similarity_percent);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            "desired_phrases = [\"x y z t\"]\nmystery_knob = 3\n",
        );

        let err = AuditConfig::load_or_init(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn both_lists_empty_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "language = \"en\"\n");

        let err = AuditConfig::load_or_init(&path).unwrap_err();
        assert!(matches!(err, ConfigError::NoPhrases(_)));
    }

    #[test]
    fn model_urls_point_at_their_ggml_file() {
        assert!(WhisperModel::LargeV3
            .download_url()
            .ends_with("/ggml-large-v3.bin"));
        assert_eq!(WhisperModel::MediumEn.to_string(), "medium.en");
    }
}
