use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use derive_more::Display;
use snafu::{ResultExt, Snafu};
use tracing::{debug, warn};

use crate::ext::PathDisplayExt;

/// How a file is handled, decided by its extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FileKind {
    #[display("JPEG")]
    Jpeg,
    #[display("PNG")]
    Png,
    #[display("COPY")]
    Other,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Self {
        let Some(extension) = path.extension().and_then(OsStr::to_str) else {
            return FileKind::Other;
        };

        if extension.eq_ignore_ascii_case("jpg") || extension.eq_ignore_ascii_case("jpeg") {
            FileKind::Jpeg
        } else if extension.eq_ignore_ascii_case("png") {
            FileKind::Png
        } else {
            FileKind::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Path relative to both roots.
    pub relative: PathBuf,
    pub kind: FileKind,
}

/// Every directory and regular file found under an input root, paired with
/// its location under the output root. Entries are sorted by name within each
/// directory, parents before children.
#[derive(Debug, Clone, Default)]
pub struct MirrorTree {
    /// Destination directories, the output root first.
    pub directories: Vec<PathBuf>,
    pub files: Vec<MirrorFile>,
}

impl MirrorTree {
    pub fn walk(input: &Path, output: &Path) -> Result<Self, WalkError> {
        let metadata = fs::metadata(input).context(InputSnafu {
            path: input.to_path_buf(),
        })?;
        if !metadata.is_dir() {
            return Err(WalkError::InputNotDirectory {
                path: input.to_path_buf(),
            });
        }

        // Only resolvable when the output already exists, e.g. from a previous run
        let excluded = output.canonicalize().ok();
        if excluded.is_some() && input.canonicalize().ok() == excluded {
            return Err(WalkError::OutputIsInput {
                input: input.to_path_buf(),
                output: output.to_path_buf(),
            });
        }

        let mut tree = MirrorTree::default();
        tree.directories.push(output.to_path_buf());
        tree.walk_directory(input, output, Path::new(""), excluded.as_deref())?;

        debug!(
            "Walked {}: {} directories, {} files",
            input.best_effort_display(),
            tree.directories.len(),
            tree.files.len()
        );
        Ok(tree)
    }

    fn walk_directory(
        &mut self,
        source_dir: &Path,
        output_root: &Path,
        relative_dir: &Path,
        excluded: Option<&Path>,
    ) -> Result<(), WalkError> {
        let mut entries = fs::read_dir(source_dir)
            .context(ReadDirSnafu {
                path: source_dir.to_path_buf(),
            })?
            .collect::<Result<Vec<_>, _>>()
            .context(ReadDirSnafu {
                path: source_dir.to_path_buf(),
            })?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let source = entry.path();
            let relative = relative_dir.join(entry.file_name());
            let file_type = entry.file_type().context(ReadDirSnafu {
                path: source.clone(),
            })?;

            // Symlinks are judged by what they point at
            let is_dir = if file_type.is_symlink() {
                source.is_dir()
            } else {
                file_type.is_dir()
            };

            if is_dir {
                if file_type.is_symlink() {
                    warn!(
                        "Skipping symlinked directory {}",
                        source.best_effort_display()
                    );
                    continue;
                }
                let is_excluded = excluded
                    .is_some_and(|excluded| source.canonicalize().ok().as_deref() == Some(excluded));
                if is_excluded {
                    debug!(
                        "Skipping {}, it is the output directory",
                        source.best_effort_display()
                    );
                    continue;
                }
                self.directories.push(output_root.join(&relative));
                self.walk_directory(&source, output_root, &relative, excluded)?;
            } else if source.is_file() {
                self.files.push(MirrorFile {
                    kind: FileKind::from_path(&source),
                    destination: output_root.join(&relative),
                    source,
                    relative,
                });
            } else {
                debug!("Skipping special file {}", source.best_effort_display());
            }
        }

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum WalkError {
    #[snafu(display("Cannot access input directory {}", path.best_effort_display()))]
    InputError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Input {} is not a directory", path.best_effort_display()))]
    InputNotDirectory { path: PathBuf },
    #[snafu(display(
        "Output {} is the input directory {}",
        output.best_effort_display(),
        input.best_effort_display()
    ))]
    OutputIsInput { input: PathBuf, output: PathBuf },
    #[snafu(display("Failed to list {}", path.best_effort_display()))]
    ReadDirError {
        path: PathBuf,
        source: std::io::Error,
    },
}
