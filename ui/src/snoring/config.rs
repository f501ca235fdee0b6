//! Detector tuning.

use serde::Deserialize;
use tracing::warn;

/// Mean-magnitude threshold on the 0-255 byte spectrum scale.
pub const DEFAULT_THRESHOLD: u8 = 30;
/// Analyser window; the byte spectrum has half as many bins.
pub const DEFAULT_FFT_SIZE: usize = 2048;

const MIN_FFT_SIZE: usize = 32;
const MAX_FFT_SIZE: usize = 32_768;

/// When the cumulative snoring count goes back to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountRetention {
    /// Kept when tracking stops, cleared when the next session starts.
    #[default]
    PerSession,
    /// Never cleared for the lifetime of the page.
    Cumulative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SnoringConfig {
    pub threshold: u8,
    pub fft_size: usize,
    pub count_retention: CountRetention,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("fft size {0} is not a power of two")]
    FftNotPowerOfTwo(usize),
    #[error("fft size {0} outside 32..=32768")]
    FftOutOfRange(usize),
}

/// Analyser windows must be a power of two in `32..=32768`.
pub fn check_fft_size(fft_size: usize) -> Result<(), ConfigError> {
    if !(MIN_FFT_SIZE..=MAX_FFT_SIZE).contains(&fft_size) {
        return Err(ConfigError::FftOutOfRange(fft_size));
    }
    if !fft_size.is_power_of_two() {
        return Err(ConfigError::FftNotPowerOfTwo(fft_size));
    }
    Ok(())
}

impl SnoringConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_fft_size(self.fft_size)
    }

    /// This config if it validates, otherwise the defaults.
    pub fn validated(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(err) => {
                warn!(%err, "invalid snoring config, using defaults");
                Self::default()
            }
        }
    }

    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }
}

impl Default for SnoringConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            fft_size: DEFAULT_FFT_SIZE,
            count_retention: CountRetention::PerSession,
        }
    }
}
