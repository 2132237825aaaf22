use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("download of {url} interrupted: {source}")]
    Stream {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("archive {path} does not contain an entry named {name}")]
    MissingEntry { path: PathBuf, name: String },
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Downloads `url` to `dest`, streaming the body in chunks into a `.part`
/// temp file that is renamed on completion, so a failed download never
/// leaves a partial file behind. Model files run into the gigabytes; the
/// body is never held in memory.
pub fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), DownloadError> {
    log::info!("Downloading {url} to {}", dest.display());

    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| DownloadError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);

    let temp_path = dest.with_extension("part");
    let mut file = fs::File::create(&temp_path).map_err(|e| DownloadError::Write {
        path: temp_path.clone(),
        source: e,
    })?;

    if let Err(e) = copy_with_progress(&mut response, &mut file, total, progress.as_ref()) {
        drop(file);
        let _ = fs::remove_file(&temp_path);
        return Err(DownloadError::Stream {
            url: url.to_string(),
            source: e,
        });
    }
    drop(file);

    fs::rename(&temp_path, dest).map_err(|e| DownloadError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;

    log::info!("Download of {} finished", dest.display());
    Ok(())
}

fn copy_with_progress(
    reader: &mut dyn Read,
    writer: &mut dyn Write,
    total: u64,
    progress: Option<&ProgressFn>,
) -> std::io::Result<()> {
    let mut buffer = [0u8; 64 * 1024];
    let mut downloaded: u64 = 0;
    loop {
        let read = reader.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        writer.write_all(&buffer[..read])?;
        downloaded += read as u64;
        if let Some(cb) = progress {
            cb(downloaded, total);
        }
    }
    writer.flush()
}

/// Yields each newly crossed 10 % step once; chunk boundaries never have to
/// land exactly on a decile for it to be reported.
struct TenPercentSteps {
    last_decile: u64,
}

impl TenPercentSteps {
    fn new() -> Self {
        Self { last_decile: 0 }
    }

    fn advance(&mut self, downloaded: u64, total: u64) -> Option<u64> {
        if total == 0 {
            return None;
        }
        let decile = (downloaded * 10 / total).min(10);
        if decile <= self.last_decile {
            return None;
        }
        self.last_decile = decile;
        Some(decile * 10)
    }
}

/// Progress callback that logs each completed 10 % step exactly once.
pub fn ten_percent_steps(label: &str) -> ProgressFn {
    let label = label.to_string();
    let steps = std::sync::Mutex::new(TenPercentSteps::new());
    Box::new(move |downloaded, total| {
        if let Some(percent) = steps.lock().unwrap().advance(downloaded, total) {
            log::info!("Downloading {label}: {percent}% done");
        }
    })
}

/// Extracts the single archive entry whose file name is `entry_name`
/// (ignoring any directory prefix inside the archive) to `dest`. Extracted
/// binaries get the executable bit on unix.
pub fn extract_zip_entry(
    archive_path: &Path,
    entry_name: &str,
    dest: &Path,
) -> Result<(), DownloadError> {
    log::info!(
        "Extracting {entry_name} from {} to {}",
        archive_path.display(),
        dest.display()
    );

    let file = fs::File::open(archive_path).map_err(|e| DownloadError::Write {
        path: archive_path.to_path_buf(),
        source: e,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| DownloadError::Archive {
        path: archive_path.to_path_buf(),
        source: e,
    })?;

    let full_name = archive
        .file_names()
        .find(|name| {
            Path::new(name)
                .file_name()
                .map(|f| f == entry_name)
                .unwrap_or(false)
        })
        .map(|name| name.to_string())
        .ok_or_else(|| DownloadError::MissingEntry {
            path: archive_path.to_path_buf(),
            name: entry_name.to_string(),
        })?;

    let mut entry = archive
        .by_name(&full_name)
        .map_err(|e| DownloadError::Archive {
            path: archive_path.to_path_buf(),
            source: e,
        })?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| DownloadError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut out = fs::File::create(dest).map_err(|e| DownloadError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;
    std::io::copy(&mut entry, &mut out).map_err(|e| DownloadError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dest, fs::Permissions::from_mode(0o755)).map_err(|e| {
            DownloadError::Write {
                path: dest.to_path_buf(),
                source: e,
            }
        })?;
    }

    Ok(())
}
