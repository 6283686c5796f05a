//! Recording session state machine.
//!
//! A [`RecordingSession`] is owned by the task driving capture.  It buffers
//! mono samples only while recording and enforces the duration ceiling,
//! either when audio arrives ([`RecordingSession::push`]) or on a timer
//! ([`RecordingSession::tick`]).
//!
//! | Phase | Entered by | Buffers audio |
//! |-------|-----------|---------------|
//! | `Idle` | construction | no |
//! | `Recording { started }` | `start` | yes |
//! | `Stopped { reason }` | `stop` (User), ceiling (Timeout) | no |

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::RecordingConfig;

use super::clip::AudioClip;
use super::wav::{encode_pcm16, WAV_MIME_TYPE};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("no audio was recorded")]
    Empty,

    #[error("unsupported audio file type: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read audio file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode WAV: {0}")]
    Encode(#[from] hound::Error),
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The learner ended the recording.
    User,
    /// The duration ceiling was reached.
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingPhase {
    Idle,
    Recording { started: Instant },
    Stopped { reason: StopReason },
}

// ---------------------------------------------------------------------------
// RecordingSession
// ---------------------------------------------------------------------------

pub struct RecordingSession {
    phase: RecordingPhase,
    samples: Vec<f32>,
    sample_rate: u32,
    max_duration: Duration,
}

impl RecordingSession {
    pub fn new(sample_rate: u32, max_duration: Duration) -> Self {
        Self {
            phase: RecordingPhase::Idle,
            samples: Vec::new(),
            sample_rate,
            max_duration,
        }
    }

    /// Build a session from `[recording]` settings.
    ///
    /// A ceiling that is not a positive, representable number of seconds
    /// falls back to the default.
    pub fn from_config(config: &RecordingConfig) -> Self {
        let max_duration = Duration::try_from_secs_f32(config.max_duration_secs)
            .ok()
            .filter(|d| !d.is_zero())
            .unwrap_or_else(|| {
                let fallback = RecordingConfig::default().max_duration_secs;
                log::warn!(
                    "recording.max_duration_secs = {} is not usable; using {fallback}s",
                    config.max_duration_secs
                );
                Duration::from_secs_f32(fallback)
            });
        Self::new(config.sample_rate, max_duration)
    }

    pub fn phase(&self) -> RecordingPhase {
        self.phase
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.phase, RecordingPhase::Recording { .. })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn max_duration(&self) -> Duration {
        self.max_duration
    }

    /// Seconds of audio currently buffered.
    pub fn buffered_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Wall-clock time since `start`, or zero when not recording.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.phase {
            RecordingPhase::Recording { started } => now.saturating_duration_since(started),
            _ => Duration::ZERO,
        }
    }

    /// Begin a new recording, discarding any previous buffer.
    ///
    /// Returns `false` (and changes nothing) when already recording.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_recording() {
            return false;
        }
        self.samples.clear();
        self.phase = RecordingPhase::Recording { started: now };
        log::info!("recording started (ceiling {:?})", self.max_duration);
        true
    }

    /// Buffer mono samples at the session rate.
    ///
    /// Ignored outside `Recording`.  Samples past the ceiling are dropped
    /// and the session stops with [`StopReason::Timeout`]; the return value
    /// is `Some(Timeout)` exactly when this call caused the stop.
    pub fn push(&mut self, samples: &[f32], now: Instant) -> Option<StopReason> {
        if !self.is_recording() {
            return None;
        }

        let room = self.max_samples().saturating_sub(self.samples.len());
        let take = samples.len().min(room);
        self.samples.extend_from_slice(&samples[..take]);

        if take < samples.len() || self.samples.len() >= self.max_samples() {
            return Some(self.timeout());
        }
        self.tick(now)
    }

    /// Check the ceiling against wall-clock time.
    pub fn tick(&mut self, now: Instant) -> Option<StopReason> {
        if self.is_recording() && self.elapsed(now) >= self.max_duration {
            return Some(self.timeout());
        }
        None
    }

    /// End the recording at the learner's request.
    ///
    /// Returns `false` when not recording.
    pub fn stop(&mut self) -> bool {
        if !self.is_recording() {
            return false;
        }
        self.phase = RecordingPhase::Stopped {
            reason: StopReason::User,
        };
        log::info!("recording stopped ({:.1}s buffered)", self.buffered_secs());
        true
    }

    /// Encode the buffered audio as a 16-bit mono WAV clip.
    ///
    /// A session still recording is stopped first.  The buffer is consumed.
    ///
    /// # Errors
    /// [`RecordingError::Empty`] when nothing was buffered.
    pub fn finish(&mut self) -> Result<AudioClip, RecordingError> {
        self.stop();
        let samples = std::mem::take(&mut self.samples);
        if samples.is_empty() {
            return Err(RecordingError::Empty);
        }
        let bytes = encode_pcm16(&samples, self.sample_rate)?;
        log::debug!(
            "recording encoded: {} samples -> {} bytes",
            samples.len(),
            bytes.len()
        );
        Ok(AudioClip::new(bytes, WAV_MIME_TYPE))
    }

    fn max_samples(&self) -> usize {
        (self.max_duration.as_secs_f64() * self.sample_rate as f64).round() as usize
    }

    fn timeout(&mut self) -> StopReason {
        self.phase = RecordingPhase::Stopped {
            reason: StopReason::Timeout,
        };
        log::info!(
            "recording reached the {:?} ceiling; stopped automatically",
            self.max_duration
        );
        StopReason::Timeout
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
