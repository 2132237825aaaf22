use std::error::Error;
use std::path::{Path, PathBuf};

/// Turns an arbitrary media file into audio the transcriber can consume,
/// returning the path of the prepared file.
pub trait AudioPreparer: Send {
    fn prepare(&self, media: &Path) -> Result<PathBuf, Box<dyn Error>>;
}
