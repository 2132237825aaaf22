/// Suffix appended to the media file stem for the prepared mono 16 kHz WAV.
pub const PREPARED_AUDIO_SUFFIX: &str = ".prepared.wav";

/// How many transcript lines the report echoes before the checks.
pub const TRANSCRIPT_ECHO_LINES: usize = 15;

/// Base URL for whisper.cpp ggml model files, `ggml-{model}.bin` appended.
pub const WHISPER_MODEL_BASE_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

#[cfg(target_os = "windows")]
pub const DEFAULT_FFMPEG_ZIP_URL: &str =
    "https://github.com/BtbN/FFmpeg-Builds/releases/download/latest/ffmpeg-master-latest-win64-gpl.zip";
#[cfg(not(target_os = "windows"))]
pub const DEFAULT_FFMPEG_ZIP_URL: &str =
    "https://github.com/BtbN/FFmpeg-Builds/releases/download/latest/ffmpeg-master-latest-linux64-gpl.zip";

/// Name of the ffmpeg executable inside the release archive.
#[cfg(target_os = "windows")]
pub const FFMPEG_BINARY_NAME: &str = "ffmpeg.exe";
#[cfg(not(target_os = "windows"))]
pub const FFMPEG_BINARY_NAME: &str = "ffmpeg";
