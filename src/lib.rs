//! # lipformant
//!
//! Per-frame spectral fingerprint of speech for real-time lip sync.
//!
//! Each call takes one frame of audio and reports the frame's RMS loudness
//! and up to three formant frequencies. The formants come from an LPC model
//! of the frame: autocorrelation, Levinson-Durbin, the all-pole magnitude
//! response, a one-pole smoothed envelope carried across frames, and two
//! independent peak pickers over that envelope.
//!
//! The crate stops at numbers. Capturing audio, deciding when to analyze,
//! and turning formants into mouth shapes belong to the caller.
//!
//! # Quick Start
//!
//! ```
//! use lipformant::{AnalysisParams, FormantAnalyzer, FormantPair};
//!
//! let n = 512;
//! let params = AnalysisParams::default()   // order 32, 16 kHz
//!     .with_filter_h(0.5);
//! params.validate(n).unwrap();
//!
//! let mut analyzer = FormantAnalyzer::new(n, params.lpc_order).unwrap();
//! let mut state = analyzer.new_state();
//! let mut out = FormantPair::default();
//!
//! // Once per audio frame: the capture ring buffer and its oldest sample.
//! let ring = vec![0.0; n];
//! analyzer.analyze(&ring, 0, &params, &mut state, &mut out);
//!
//! println!("F1 {} Hz, F2 {} Hz, volume {}", out.peaks.f1, out.peaks.f2, out.peaks.volume);
//! ```
//!
//! # Module Organization
//!
//! Each pipeline stage has its own module with a free function that does the
//! work in caller-provided buffers. [`FormantAnalyzer`] strings them together
//! and owns the buffers.
//!
//! - `volume`: RMS and the silence gate
//! - `window`: circular unroll and Hamming taper
//! - `lpc`: autocorrelation and Levinson-Durbin
//! - `response`: all-pole magnitude response
//! - `envelope`: smoothed envelope and derivatives ([`SpectralState`])
//! - `peaks`: the two formant pickers ([`FormantResult`])
//! - `track`: offline analysis of a whole [`Sound`]

pub mod analyzer;
pub mod envelope;
pub mod error;
pub mod lpc;
pub mod peaks;
pub mod response;
pub mod sound;
pub mod track;
pub mod volume;
pub mod window;

// WASM bindings (enabled with "wasm" feature)
#[cfg(feature = "wasm")]
pub mod wasm;

/// Error types for lipformant operations.
pub use error::{Error, Result};

/// Per-frame analysis.
///
/// - `FormantAnalyzer`: owns scratch buffers, runs the pipeline
/// - `AnalysisParams`: per-call parameters
/// - `FormantPair`: results of both pickers
/// - `FrameOutcome`: whether the frame was gated
pub use analyzer::{AnalysisParams, FormantAnalyzer, FormantPair, FrameOutcome};

/// Smoothed envelope carried across calls.
pub use envelope::SpectralState;

/// Formant result record.
pub use peaks::FormantResult;

/// Offline analysis.
///
/// - `Sound`: mono samples with sample rate
/// - `FormantTrack`: results over time
/// - `sound_to_formant_track`: analyze a whole sound
pub use sound::Sound;
pub use track::{sound_to_formant_track, FormantTrack, TrackFrame};
