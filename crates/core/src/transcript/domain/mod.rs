pub mod transcript_line;
pub mod transcript_segment;
pub mod transcript_store;
