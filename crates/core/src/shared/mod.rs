pub mod constants;
pub mod downloads;
pub mod time_format;
