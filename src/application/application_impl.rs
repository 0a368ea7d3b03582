use std::ffi::OsString;

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::application::asset_compressor::{AssetCompressor, ProcessError};
use crate::application::runtime_config::{CompressConfig, CountConfig, QuantizerSource};
use crate::application::summary::CompressionSummary;
use crate::codecs::{
    JpegReencoder, LosslessPng, PngPipeline, Pngquant, QualityRange, QualityRangeError,
    is_executable,
};
use crate::ext::PathDisplayExt;
use crate::filesystem::{MirrorTree, WalkError};
use crate::variations::{ScanError, VariationTable};

pub struct Application;

impl Application {
    /// Mirrors `config.input` into `config.output`, recompressing images.
    pub async fn compress(
        config: impl Into<CompressConfig>,
    ) -> Result<CompressionSummary, ApplicationError> {
        let config: CompressConfig = config.into();
        debug!("Compression config: {:?}", config);

        let quality =
            QualityRange::new(config.png_min, config.png_max).context(QualityRangeSnafu)?;
        let quantizer =
            Self::resolve_quantizer(&config.quantizer, quality, std::env::var_os("PATH"));
        let png = PngPipeline::new(quantizer, LosslessPng::default());
        debug!(
            "PNG quantizer: {:?}",
            png.quantizer().map(Pngquant::executable)
        );

        let tree = MirrorTree::walk(&config.input, &config.output).context(WalkSnafu)?;
        info!(
            "Mirroring {} files from {} to {}",
            tree.files.len(),
            config.input.best_effort_display(),
            config.output.best_effort_display()
        );

        AssetCompressor::new(JpegReencoder::new(config.jpeg_quality), png, config.strict)
            .mirror(&tree)
            .await
            .context(ProcessSnafu)
    }

    /// Counts PNG variations under `config.base` and renders them as a table
    /// literal.
    pub fn count_variations(config: impl Into<CountConfig>) -> Result<String, ApplicationError> {
        let config: CountConfig = config.into();
        debug!("Counting config: {:?}", config);

        let table = VariationTable::scan(&config.base).context(ScanSnafu)?;
        info!("Counted variations for {} keys", table.len());
        Ok(table.render(&config.name))
    }

    fn resolve_quantizer(
        source: &QuantizerSource,
        quality: QualityRange,
        path_var: Option<OsString>,
    ) -> Option<Pngquant> {
        match source {
            QuantizerSource::Discover => {
                let found = path_var
                    .and_then(|path_var| Pngquant::discover_in(&path_var, quality));
                if found.is_none() {
                    warn!("pngquant not found; PNG compression will be weaker");
                }
                found
            }
            QuantizerSource::Explicit(path) if is_executable(path) => {
                Some(Pngquant::new(path.clone(), quality))
            }
            QuantizerSource::Explicit(path) => {
                warn!(
                    "{} is not an executable; PNG compression will be weaker",
                    path.best_effort_display()
                );
                None
            }
            QuantizerSource::Disabled => {
                info!("Quantization disabled, PNG files are optimized losslessly");
                None
            }
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Invalid PNG quality range"))]
    QualityRangeError { source: QualityRangeError },
    #[snafu(display("Critical failure encountered while walking the input directory"))]
    WalkError { source: WalkError },
    #[snafu(display("Critical failure encountered while mirroring files"))]
    ProcessError { source: ProcessError },
    #[snafu(display("Critical failure encountered while counting variations"))]
    ScanError { source: ScanError },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::fixtures;
    use crate::test_support::CapturedLogs;
    use image::ImageFormat;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn lossless_config(input: &Path, output: &Path) -> CompressConfig {
        CompressConfig {
            quantizer: QuantizerSource::Disabled,
            ..CompressConfig::new(input, output)
        }
    }

    fn write(root: &Path, relative: &str, bytes: &[u8]) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, bytes).unwrap();
        path
    }

    fn relative_files(root: &Path) -> Vec<PathBuf> {
        let tree = MirrorTree::walk(root, Path::new("")).unwrap();
        tree.files.into_iter().map(|file| file.relative).collect()
    }

    #[compio::test]
    async fn test_compress_mixed_tree() {
        let input = TempDir::new().expect("Failed to create temp directory");
        let output = TempDir::new().expect("Failed to create temp directory");
        let jpeg = fixtures::encode(&fixtures::gradient_rgb(40, 30), ImageFormat::Jpeg);
        let png = fixtures::encode(&fixtures::translucent_rgba(20, 10), ImageFormat::Png);
        write(input.path(), "a.jpg", &jpeg);
        write(input.path(), "b.png", &png);
        write(input.path(), "c.txt", b"plain text stays plain");

        let summary = Application::compress(lossless_config(input.path(), output.path()))
            .await
            .expect("Compression failed");

        assert_eq!(relative_files(output.path()), relative_files(input.path()));
        assert_eq!(summary.jpeg, 1);
        assert_eq!(summary.png_lossless, 1);
        assert_eq!(summary.copied, 1);
        assert_eq!(summary.passed_through, 0);

        let a = fs::read(output.path().join("a.jpg")).unwrap();
        assert_eq!(image::guess_format(&a).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&a).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 30));

        let b = image::open(output.path().join("b.png")).unwrap();
        assert_eq!((b.width(), b.height()), (20, 10));

        assert_eq!(
            fs::read(output.path().join("c.txt")).unwrap(),
            b"plain text stays plain"
        );
    }

    #[compio::test]
    async fn test_compress_mirrors_nested_and_empty_directories() {
        let input = TempDir::new().expect("Failed to create temp directory");
        let output = TempDir::new().expect("Failed to create temp directory");
        let target = output.path().join("dist");
        let png = fixtures::encode(&fixtures::gradient_rgb(4, 4), ImageFormat::Png);
        write(input.path(), "letters/A/1.PNG", &png);
        write(input.path(), "docs/readme.md", b"# assets");
        fs::create_dir_all(input.path().join("empty")).unwrap();

        Application::compress(lossless_config(input.path(), &target))
            .await
            .expect("Compression failed");

        assert!(target.join("empty").is_dir());
        assert!(image::open(target.join("letters/A/1.PNG")).is_ok());
        assert_eq!(fs::read(target.join("docs/readme.md")).unwrap(), b"# assets");
    }

    #[compio::test]
    async fn test_malformed_image_is_passed_through() {
        let input = TempDir::new().expect("Failed to create temp directory");
        let output = TempDir::new().expect("Failed to create temp directory");
        write(input.path(), "broken.jpg", b"not really a jpeg");
        write(input.path(), "broken.png", b"not really a png");

        let summary = Application::compress(lossless_config(input.path(), output.path()))
            .await
            .expect("Malformed images should not abort the run");

        assert_eq!(summary.passed_through, 2);
        assert_eq!(
            fs::read(output.path().join("broken.jpg")).unwrap(),
            b"not really a jpeg"
        );
        assert_eq!(
            fs::read(output.path().join("broken.png")).unwrap(),
            b"not really a png"
        );
    }

    #[compio::test]
    async fn test_malformed_image_aborts_in_strict_mode() {
        let input = TempDir::new().expect("Failed to create temp directory");
        let output = TempDir::new().expect("Failed to create temp directory");
        write(input.path(), "broken.jpg", b"not really a jpeg");

        let config = CompressConfig {
            strict: true,
            ..lossless_config(input.path(), output.path())
        };
        let error = Application::compress(config).await.unwrap_err();

        match error {
            ApplicationError::ProcessError { source } => assert!(source.is_transcode_failure()),
            other => panic!("Expected ProcessError, got {other:?}"),
        }
    }

    #[compio::test]
    async fn test_inverted_quality_range_is_rejected() {
        let input = TempDir::new().expect("Failed to create temp directory");
        let output = TempDir::new().expect("Failed to create temp directory");

        let config = CompressConfig {
            png_min: 90,
            png_max: 10,
            ..lossless_config(input.path(), output.path())
        };
        let error = Application::compress(config).await.unwrap_err();

        assert!(matches!(error, ApplicationError::QualityRangeError { .. }));
    }

    #[compio::test]
    async fn test_missing_input_is_rejected() {
        let output = TempDir::new().expect("Failed to create temp directory");

        let config = lossless_config(Path::new("/this/path/does/not/exist"), output.path());
        let error = Application::compress(config).await.unwrap_err();

        assert!(matches!(error, ApplicationError::WalkError { .. }));
    }

    #[cfg(target_family = "unix")]
    #[compio::test]
    async fn test_failing_quantizer_still_produces_png() {
        use crate::codecs::pngquant_test_support::{FAILING_QUANTIZER, write_script};

        let tools = TempDir::new().expect("Failed to create temp directory");
        let input = TempDir::new().expect("Failed to create temp directory");
        let output = TempDir::new().expect("Failed to create temp directory");
        let script = write_script(tools.path(), "pngquant", FAILING_QUANTIZER);
        let png = fixtures::encode(&fixtures::gradient_rgb(16, 16), ImageFormat::Png);
        write(input.path(), "icon.png", &png);

        let config = CompressConfig {
            quantizer: QuantizerSource::Explicit(script),
            ..CompressConfig::new(input.path(), output.path())
        };
        let summary = Application::compress(config).await.unwrap();

        assert_eq!(summary.png_lossless, 1);
        assert!(image::open(output.path().join("icon.png")).is_ok());
    }

    #[test]
    fn test_explicit_quantizer_must_be_executable() {
        let quantizer = Application::resolve_quantizer(
            &QuantizerSource::Explicit(PathBuf::from("/this/path/does/not/exist")),
            QualityRange::default(),
            None,
        );

        assert!(quantizer.is_none());
    }

    #[test]
    fn test_missing_quantizer_is_reported_once_at_startup() {
        let empty = TempDir::new().expect("Failed to create temp directory");
        let (logs, _guard) = CapturedLogs::install();

        let quantizer = Application::resolve_quantizer(
            &QuantizerSource::Discover,
            QualityRange::default(),
            Some(empty.path().as_os_str().to_owned()),
        );

        assert!(quantizer.is_none());
        let contents = logs.contents();
        assert_eq!(contents.matches("pngquant not found").count(), 1);
        assert!(contents.contains("WARN"));
    }

    #[cfg(target_family = "unix")]
    #[test]
    fn test_quantizer_is_discovered_on_search_path() {
        use crate::codecs::pngquant_test_support::{FAILING_QUANTIZER, write_script};

        let tools = TempDir::new().expect("Failed to create temp directory");
        let script = write_script(tools.path(), "pngquant", FAILING_QUANTIZER);

        let quantizer = Application::resolve_quantizer(
            &QuantizerSource::Discover,
            QualityRange::default(),
            Some(tools.path().as_os_str().to_owned()),
        )
        .expect("Quantizer should be found");

        assert_eq!(quantizer.executable(), script);
    }

    #[compio::test]
    async fn test_output_equal_to_input_is_rejected_without_touching_files() {
        let input = TempDir::new().expect("Failed to create temp directory");
        let notes = write(input.path(), "notes.txt", b"precious");

        let error = Application::compress(lossless_config(input.path(), input.path()))
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            ApplicationError::WalkError {
                source: WalkError::OutputIsInput { .. }
            }
        ));
        assert_eq!(fs::read(notes).unwrap(), b"precious");
    }

    #[test]
    fn test_count_variations() {
        let base = TempDir::new().expect("Failed to create temp directory");
        write(base.path(), "A/1.png", b"");
        write(base.path(), "A/2.png", b"");
        write(base.path(), "A/3.png", b"");
        write(base.path(), "A/4.jpg", b"");
        write(base.path(), "3/only.png", b"");

        let rendered = Application::count_variations(CountConfig {
            base: base.path().to_path_buf(),
            name: "VARIATION_COUNTS".to_string(),
        })
        .unwrap();

        assert_eq!(rendered, "VARIATION_COUNTS = {\n  \"3\": 1,\n  \"A\": 3,\n}\n");
    }
}
