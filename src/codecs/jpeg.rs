use jpeg_encoder::{ColorType, Encoder, EncodingError};
use snafu::{OptionExt, ResultExt, Snafu};
use tracing::debug;

/// Re-encodes images as progressive JPEG with optimized Huffman tables.
///
/// Input bytes may hold any format the decoder recognizes. Alpha and palette
/// data is flattened to opaque RGB, including grayscale with alpha; plain
/// grayscale input stays grayscale.
#[derive(Debug, Clone, Copy)]
pub struct JpegReencoder {
    quality: u8,
}

impl JpegReencoder {
    pub const DEFAULT_QUALITY: u8 = 85;

    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn reencode(&self, bytes: &[u8]) -> Result<Vec<u8>, JpegError> {
        let image = image::load_from_memory(bytes).context(DecodeSnafu)?;
        let (width, height) = (image.width(), image.height());
        debug!(
            "Decoded {width}x{height} {:?} image, re-encoding at quality {}",
            image.color(),
            self.quality
        );

        let dimensions = u16::try_from(width)
            .ok()
            .zip(u16::try_from(height).ok())
            .context(TooLargeSnafu { width, height })?;

        let color = image.color();
        let (pixels, color_type) = if color.has_color() || color.has_alpha() {
            (image.into_rgb8().into_raw(), ColorType::Rgb)
        } else {
            (image.into_luma8().into_raw(), ColorType::Luma)
        };

        let mut encoded = Vec::with_capacity(bytes.len());
        let mut encoder = Encoder::new(&mut encoded, self.quality);
        encoder.set_progressive(true);
        encoder.set_optimized_huffman_tables(true);
        encoder
            .encode(&pixels, dimensions.0, dimensions.1, color_type)
            .context(EncodeSnafu)?;

        Ok(encoded)
    }
}

impl Default for JpegReencoder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUALITY)
    }
}

#[derive(Debug, Snafu)]
pub enum JpegError {
    #[snafu(display("Failed to decode image"))]
    DecodeError { source: image::ImageError },
    #[snafu(display("Image of {width}x{height} exceeds the JPEG size limit"))]
    TooLargeError { width: u32, height: u32 },
    #[snafu(display("Failed to encode JPEG"))]
    EncodeError { source: EncodingError },
}
