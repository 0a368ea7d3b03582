use derive_more::Display;
use snafu::{Snafu, ensure};

/// Inclusive quality bounds handed to the quantizer, e.g. `60-80`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("{min}-{max}")]
pub struct QualityRange {
    min: u8,
    max: u8,
}

impl QualityRange {
    pub const MAX_QUALITY: u8 = 100;

    pub fn new(min: u8, max: u8) -> Result<Self, QualityRangeError> {
        ensure!(
            max <= Self::MAX_QUALITY,
            OutOfBoundsSnafu { value: max }
        );
        ensure!(min <= max, InvertedSnafu { min, max });
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }
}

impl Default for QualityRange {
    fn default() -> Self {
        Self { min: 60, max: 80 }
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum QualityRangeError {
    #[snafu(display("Quality {value} is above {}", QualityRange::MAX_QUALITY))]
    OutOfBounds { value: u8 },
    #[snafu(display("Minimum quality {min} is greater than maximum quality {max}"))]
    Inverted { min: u8, max: u8 },
}
