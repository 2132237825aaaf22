pub mod audit;
pub mod config;
pub mod matching;
pub mod pipeline;
pub mod shared;
pub mod transcript;
pub mod transcription;
