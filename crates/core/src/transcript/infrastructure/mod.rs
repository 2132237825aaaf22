pub mod file_transcript_store;
