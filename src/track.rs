//! Track - run the analyzer over a whole sound.
//!
//! Frames start every `hop` samples and span `frame_len` samples. One
//! analyzer and one spectral state serve the whole sound, so envelope
//! smoothing and the silence carry-over behave exactly as in a live session
//! fed the same frames. Frame times are frame centres.

use log::debug;
use ndarray::Array1;

use crate::analyzer::{AnalysisParams, FormantAnalyzer, FormantPair};
use crate::error::{Error, Result};
use crate::peaks::FormantResult;
use crate::sound::Sound;

/// Analysis results for a single frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackFrame {
    /// Time of the frame centre in seconds.
    pub time: f64,
    /// Results of both extraction methods.
    pub formants: FormantPair,
}

/// Formant results over time.
#[derive(Debug, Clone)]
pub struct FormantTrack {
    frames: Vec<TrackFrame>,
    time_step: f64,
    frame_len: usize,
}

impl FormantTrack {
    /// Create a new FormantTrack.
    pub fn new(frames: Vec<TrackFrame>, time_step: f64, frame_len: usize) -> Self {
        Self {
            frames,
            time_step,
            frame_len,
        }
    }

    /// Get the frames.
    #[inline]
    pub fn frames(&self) -> &[TrackFrame] {
        &self.frames
    }

    /// Get the number of frames.
    #[inline]
    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    /// Get the time step between frames in seconds.
    #[inline]
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Get the analysis frame length in samples.
    #[inline]
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Get array of frame times.
    pub fn times(&self) -> Array1<f64> {
        Array1::from_iter(self.frames.iter().map(|f| f.time))
    }

    /// Get array of frame volumes.
    pub fn volumes(&self) -> Array1<f64> {
        Array1::from_iter(self.frames.iter().map(|f| f.formants.peaks.volume))
    }

    /// Envelope-peak frequencies for one formant.
    ///
    /// # Arguments
    ///
    /// * `formant_number` - Formant number (1 = F1, 2 = F2, 3 = F3)
    ///
    /// # Returns
    ///
    /// Array of frequencies, NaN where the formant was not found
    pub fn formant_values(&self, formant_number: usize) -> Array1<f64> {
        self.values(formant_number, |pair| &pair.peaks)
    }

    /// Curvature-minimum frequencies for one formant.
    ///
    /// Same layout as [`FormantTrack::formant_values`].
    pub fn curvature_values(&self, formant_number: usize) -> Array1<f64> {
        self.values(formant_number, |pair| &pair.curvature)
    }

    fn values<F>(&self, formant_number: usize, select: F) -> Array1<f64>
    where
        F: Fn(&FormantPair) -> &FormantResult,
    {
        Array1::from_iter(self.frames.iter().map(|frame| {
            select(&frame.formants)
                .get_formant(formant_number)
                .unwrap_or(f64::NAN)
        }))
    }
}

/// Compute a formant track for a sound.
///
/// # Arguments
///
/// * `sound` - Sound object
/// * `frame_len` - Analysis frame length `N` in samples
/// * `hop` - Samples between successive frame starts
/// * `params` - Analysis parameters; its sample rate is replaced by the
///   sound's
///
/// # Returns
///
/// A FormantTrack with one frame per full window that fits in the sound.
/// A sound shorter than one frame gives an empty track.
///
/// # Errors
///
/// - `Error::InvalidParameter` if `hop` is zero, or the frame length or
///   parameters are rejected by [`FormantAnalyzer::new`] /
///   [`AnalysisParams::validate`]
pub fn sound_to_formant_track(
    sound: &Sound,
    frame_len: usize,
    hop: usize,
    params: &AnalysisParams,
) -> Result<FormantTrack> {
    if hop == 0 {
        return Err(Error::InvalidParameter(
            "hop must be at least 1".to_string(),
        ));
    }

    let params = params.with_sample_rate(sound.sample_rate());
    params.validate(frame_len)?;
    let mut analyzer = FormantAnalyzer::new(frame_len, params.lpc_order)?;
    let mut state = analyzer.new_state();

    let n_samples = sound.n_samples();
    let n_frames = if n_samples < frame_len {
        0
    } else {
        (n_samples - frame_len) / hop + 1
    };
    let time_step = hop as f64 / sound.sample_rate();

    debug!(
        "formant track: {} frames of {} samples, hop {} ({:.4}s)",
        n_frames, frame_len, hop, time_step
    );

    let samples = sound.samples();
    let mut frame = vec![0.0; frame_len];
    let mut pair = FormantPair::default();
    let mut frames = Vec::with_capacity(n_frames);

    for i in 0..n_frames {
        let start = i * hop;
        for (dst, &src) in frame.iter_mut().zip(samples.iter().skip(start)) {
            *dst = src;
        }
        analyzer.analyze(&frame, 0, &params, &mut state, &mut pair);

        let time = (start as f64 + frame_len as f64 / 2.0) / sound.sample_rate();
        frames.push(TrackFrame {
            time,
            formants: pair,
        });
    }

    Ok(FormantTrack::new(frames, time_step, frame_len))
}
