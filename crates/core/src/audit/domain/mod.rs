pub mod message_writer;
pub mod transcript_auditor;
