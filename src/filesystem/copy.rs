use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};

use snafu::{ResultExt, Snafu};

use crate::ext::PathDisplayExt;

/// Copies `source` to `destination` byte for byte, then carries over the
/// access and modification times. Permissions are copied by [`fs::copy`].
/// Returns the number of bytes copied.
pub fn copy_preserving_metadata(source: &Path, destination: &Path) -> Result<u64, CopyError> {
    let bytes = fs::copy(source, destination).context(FileCopySnafu {
        source_path: source.to_path_buf(),
        destination: destination.to_path_buf(),
    })?;

    let metadata = fs::metadata(source).context(TimesSnafu {
        path: source.to_path_buf(),
    })?;

    let mut times = FileTimes::new();
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }

    // Read-only is enough to set explicit times, and the copy may have
    // inherited a read-only mode from the source
    File::open(destination)
        .and_then(|file| file.set_times(times))
        .context(TimesSnafu {
            path: destination.to_path_buf(),
        })?;

    Ok(bytes)
}

#[derive(Debug, Snafu)]
pub enum CopyError {
    #[snafu(display(
        "Failed to copy {} to {}",
        source_path.best_effort_display(),
        destination.best_effort_display()
    ))]
    FileCopyError {
        source_path: PathBuf,
        destination: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to carry over timestamps for {}", path.best_effort_display()))]
    TimesError {
        path: PathBuf,
        source: std::io::Error,
    },
}
