pub mod audio_preparer;
pub mod audio_transcriber;
pub mod media_transcriber;
