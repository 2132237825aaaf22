pub mod ffmpeg_audio_preparer;
pub mod ffmpeg_whisper_transcriber;
pub mod whisper_cli_transcriber;
