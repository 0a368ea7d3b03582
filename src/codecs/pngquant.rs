use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use compio::process::Command;
use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::codecs::png_compressor::{PngCompressionError, QuantizationSnafu};
use crate::codecs::{PngCompressor, QualityRange};
use crate::ext::PathDisplayExt;

const EXECUTABLE_NAME: &str = "pngquant";

/// Lossy palette quantization through an external `pngquant` executable.
#[derive(Debug, Clone)]
pub struct Pngquant {
    executable: PathBuf,
    quality: QualityRange,
}

impl Pngquant {
    pub fn new(executable: impl Into<PathBuf>, quality: QualityRange) -> Self {
        Self {
            executable: executable.into(),
            quality,
        }
    }

    /// Looks `pngquant` up in the directories of a `PATH`-style list.
    pub fn discover_in(path_var: &OsStr, quality: QualityRange) -> Option<Self> {
        let executable = search_path(EXECUTABLE_NAME, path_var)?;
        debug!("Found {} at {}", EXECUTABLE_NAME, executable.display());
        Some(Self::new(executable, quality))
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// `--quality MIN-MAX --speed 1 --force --output DESTINATION SOURCE`
    fn arguments(&self, source: &Path, destination: &Path) -> Vec<OsString> {
        vec![
            "--quality".into(),
            self.quality.to_string().into(),
            "--speed".into(),
            "1".into(),
            "--force".into(),
            "--output".into(),
            destination.as_os_str().to_owned(),
            source.as_os_str().to_owned(),
        ]
    }

    fn create_command(&self, source: &Path, destination: &Path) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.args(self.arguments(source, destination));
        let _ = cmd.stdin(Stdio::null());
        let _ = cmd.stdout(Stdio::null());
        let _ = cmd.stderr(Stdio::null());
        cmd
    }
}

impl PngCompressor for Pngquant {
    async fn compress(
        &self,
        source: &Path,
        destination: &Path,
    ) -> Result<(), PngCompressionError> {
        let executable = self.executable.display().to_string();
        let mut cmd = self.create_command(source, destination);

        let mut handle = cmd
            .spawn()
            .context(SpawnSnafu {
                executable: executable.clone(),
            })
            .context(QuantizationSnafu)?;

        let status = handle
            .wait()
            .await
            .context(WaitSnafu {
                executable: executable.clone(),
            })
            .context(QuantizationSnafu)?;

        if status.success() {
            debug!(
                "Quantized {} at quality {}",
                source.best_effort_display(),
                self.quality
            );
            Ok(())
        } else {
            Err(PngCompressionError::QuantizationError {
                source: QuantizeError::UnsuccessfulExecution {
                    executable,
                    status: status.code().unwrap_or(-1),
                },
            })
        }
    }

    fn name(&self) -> &'static str {
        EXECUTABLE_NAME
    }
}

/// Finds the first executable named `name` in the directories of `path_var`.
fn search_path(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidate_names(name).map(move |candidate| dir.join(candidate)))
        .find(|candidate| is_executable(candidate))
}

fn candidate_names(name: &str) -> impl Iterator<Item = String> {
    #[cfg(target_family = "windows")]
    {
        [format!("{name}.exe"), name.to_string()].into_iter()
    }
    #[cfg(not(target_family = "windows"))]
    {
        std::iter::once(name.to_string())
    }
}

pub(crate) fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = path.metadata() else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(target_family = "unix")]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(target_family = "unix"))]
    {
        true
    }
}

#[derive(Debug, Snafu)]
pub enum QuantizeError {
    #[snafu(display("Failed to spawn '{}'", executable))]
    SpawnError {
        executable: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to wait for '{}'", executable))]
    WaitError {
        executable: String,
        source: std::io::Error,
    },
    #[snafu(display("'{}' failed with exit code {}", executable, status))]
    UnsuccessfulExecution { executable: String, status: i32 },
}
