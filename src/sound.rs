//! Sound - mono samples with a sample rate.
//!
//! A plain in-memory container for offline work: tests, demos and baking a
//! formant track from a recorded clip. Live capture never goes through it;
//! the analyzer reads the capture ring buffer directly.

use ndarray::Array1;

use crate::analyzer::AnalysisParams;
use crate::error::{Error, Result};
use crate::track::{sound_to_formant_track, FormantTrack};

/// Mono audio samples with sample rate.
///
/// # Example
///
/// ```
/// use lipformant::Sound;
///
/// let sound = Sound::from_slice(&[0.0; 16_000], 16_000.0).unwrap();
/// assert_eq!(sound.duration(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Sound {
    /// Samples, nominally in [-1.0, 1.0].
    samples: Array1<f64>,

    /// Sample rate in Hz.
    sample_rate: f64,
}

impl Sound {
    /// Create a Sound from samples and sample rate.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidParameter` if the sample rate is not positive and finite
    pub fn new(samples: Array1<f64>, sample_rate: f64) -> Result<Self> {
        if !(sample_rate > 0.0 && sample_rate.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "sample rate must be positive, got {}",
                sample_rate
            )));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Create a Sound from a slice of samples.
    ///
    /// Copies the data. Use `new()` with an Array1 to avoid the copy.
    pub fn from_slice(samples: &[f64], sample_rate: f64) -> Result<Self> {
        Self::new(Array1::from_vec(samples.to_vec()), sample_rate)
    }

    /// Get the audio samples.
    #[inline]
    pub fn samples(&self) -> &Array1<f64> {
        &self.samples
    }

    /// Get the sample rate in Hz.
    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Get the number of samples.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    /// Get the total duration in seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Compute a formant track.
    ///
    /// The sample rate in `params` is replaced by this sound's rate.
    ///
    /// # Arguments
    ///
    /// * `frame_len` - Analysis frame length `N` in samples
    /// * `hop` - Samples between successive frame starts
    /// * `params` - Analysis parameters
    pub fn to_formant_track(
        &self,
        frame_len: usize,
        hop: usize,
        params: &AnalysisParams,
    ) -> Result<FormantTrack> {
        sound_to_formant_track(self, frame_len, hop, params)
    }
}
