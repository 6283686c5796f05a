//! Audio capture and clip preparation.
//!
//! # Pipeline
//!
//! ```text
//! Microphone → cpal callback → downmix → resample → AudioChunk (mpsc)
//!           → RecordingSession (ceiling) → 16-bit WAV → AudioClip
//! ```
//!
//! Pre-recorded files skip the session: [`AudioClip::from_file`] reads the
//! bytes and infers the MIME type from the extension.
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use fluent_flow::audio::RecordingSession;
//!
//! let mut session = RecordingSession::new(16_000, Duration::from_secs(20));
//! let now = Instant::now();
//! session.start(now);
//! session.push(&[0.0_f32; 1_600], now);
//! let clip = session.finish().unwrap();
//! assert_eq!(clip.mime_type, "audio/wav");
//! ```

pub mod capture;
pub mod clip;
pub mod recorder;
pub mod resample;
pub mod wav;

pub use capture::{AudioCapture, AudioChunk, CaptureError, StreamHandle};
pub use clip::{mime_for_path, AudioClip};
pub use recorder::{RecordingError, RecordingPhase, RecordingSession, StopReason};
pub use resample::{downmix, resample};
pub use wav::{encode_pcm16, WAV_MIME_TYPE};
