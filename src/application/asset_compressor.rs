use std::path::PathBuf;

use compio::fs;
use snafu::{ResultExt, Snafu};
use tracing::{debug, error, info};

use crate::application::progress::print_progress;
use crate::application::summary::{CompressionSummary, FileOutcome};
use crate::codecs::{JpegError, JpegReencoder, PngCompressionError, PngPipeline};
use crate::ext::PathDisplayExt;
use crate::filesystem::{CopyError, FileKind, MirrorFile, MirrorTree, copy_preserving_metadata};

/// Processes a walked [`MirrorTree`] file by file.
pub struct AssetCompressor {
    jpeg: JpegReencoder,
    png: PngPipeline,
    strict: bool,
}

impl AssetCompressor {
    pub fn new(jpeg: JpegReencoder, png: PngPipeline, strict: bool) -> Self {
        Self { jpeg, png, strict }
    }

    pub async fn mirror(&self, tree: &MirrorTree) -> Result<CompressionSummary, ProcessError> {
        for directory in &tree.directories {
            fs::create_dir_all(directory).await.context(CreateDirSnafu {
                path: directory.clone(),
            })?;
        }

        let mut summary = CompressionSummary::default();
        for file in &tree.files {
            let outcome = match self.process_file(file).await {
                Ok(outcome) => outcome,
                Err(err) if err.is_transcode_failure() && !self.strict => {
                    error!(
                        "Copying {} unchanged: {}",
                        file.source.best_effort_display(),
                        snafu::Report::from_error(&err)
                    );
                    copy_preserving_metadata(&file.source, &file.destination)
                        .context(CopyFileSnafu)?;
                    FileOutcome::PassedThrough(file.kind)
                }
                Err(err) => return Err(err),
            };

            let (input_bytes, output_bytes) = file_sizes(file)?;
            debug!(
                "{} -> {} ({:?}): {} -> {} bytes",
                file.source.best_effort_display(),
                file.destination.best_effort_display(),
                outcome,
                input_bytes,
                output_bytes
            );
            summary.record(outcome, input_bytes, output_bytes);
        }

        info!("{summary}");
        Ok(summary)
    }

    async fn process_file(&self, file: &MirrorFile) -> Result<FileOutcome, ProcessError> {
        match file.kind {
            FileKind::Jpeg => {
                print_progress(file.kind, &file.relative.file_name_display());
                self.compress_jpeg(file).await?;
                Ok(FileOutcome::Jpeg)
            }
            FileKind::Png => {
                print_progress(file.kind, &file.relative.file_name_display());
                let outcome = self
                    .png
                    .compress(&file.source, &file.destination)
                    .await
                    .context(PngTranscodeSnafu {
                        path: file.source.clone(),
                    })?;
                Ok(FileOutcome::Png(outcome))
            }
            FileKind::Other => {
                copy_preserving_metadata(&file.source, &file.destination).context(CopyFileSnafu)?;
                Ok(FileOutcome::Copied)
            }
        }
    }

    async fn compress_jpeg(&self, file: &MirrorFile) -> Result<(), ProcessError> {
        let bytes = fs::read(&file.source).await.context(ReadSnafu {
            path: file.source.clone(),
        })?;
        let encoded = self.jpeg.reencode(&bytes).context(JpegTranscodeSnafu {
            path: file.source.clone(),
        })?;
        fs::write(&file.destination, encoded)
            .await
            .0
            .context(WriteSnafu {
                path: file.destination.clone(),
            })?;
        Ok(())
    }
}

fn file_sizes(file: &MirrorFile) -> Result<(u64, u64), ProcessError> {
    let input = file.source.metadata().context(ReadSnafu {
        path: file.source.clone(),
    })?;
    let output = file.destination.metadata().context(ReadSnafu {
        path: file.destination.clone(),
    })?;
    Ok((input.len(), output.len()))
}

#[derive(Debug, Snafu)]
pub enum ProcessError {
    #[snafu(display("Failed to create directory {}", path.best_effort_display()))]
    CreateDirError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to read {}", path.best_effort_display()))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to write {}", path.best_effort_display()))]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to copy file"))]
    CopyFileError { source: CopyError },
    #[snafu(display("Failed to transcode JPEG {}", path.best_effort_display()))]
    JpegTranscodeError { path: PathBuf, source: JpegError },
    #[snafu(display("Failed to compress PNG {}", path.best_effort_display()))]
    PngTranscodeError {
        path: PathBuf,
        source: PngCompressionError,
    },
}

impl ProcessError {
    /// Failures caused by the image data itself. Anything else is a
    /// filesystem problem that ends the run.
    pub fn is_transcode_failure(&self) -> bool {
        match self {
            ProcessError::JpegTranscodeError { .. } => true,
            ProcessError::PngTranscodeError { source, .. } => source.is_transcode_failure(),
            _ => false,
        }
    }
}
