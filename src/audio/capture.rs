//! Microphone capture via `cpal`.
//!
//! [`AudioCapture`] opens the default input device and, once started,
//! delivers [`AudioChunk`]s that are already mono at the target rate.  The
//! returned [`StreamHandle`] is a RAII guard: dropping it stops the stream.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::Sample;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use super::resample::{downmix, resample};

// ---------------------------------------------------------------------------
// AudioChunk
// ---------------------------------------------------------------------------

/// Mono `f32` samples in `[-1.0, 1.0]` at the capture target rate.
#[derive(Debug, Clone)]
pub struct AudioChunk {
    pub samples: Vec<f32>,
}

// ---------------------------------------------------------------------------
// StreamHandle
// ---------------------------------------------------------------------------

/// Keeps the cpal stream alive until dropped.
pub struct StreamHandle {
    _stream: cpal::Stream,
}

// ---------------------------------------------------------------------------
// CaptureError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Microphone access denied or not available. Please ensure your microphone is connected and permissions are granted.")]
    NoDevice,

    #[error("failed to query default input config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("unsupported input sample format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

// ---------------------------------------------------------------------------
// AudioCapture
// ---------------------------------------------------------------------------

/// Default-input-device wrapper.
pub struct AudioCapture {
    device: cpal::Device,
    config: cpal::StreamConfig,
    sample_format: cpal::SampleFormat,
    target_rate: u32,
}

impl AudioCapture {
    /// Open the system default input device.
    ///
    /// `target_rate` is the rate chunks are resampled to before delivery.
    ///
    /// # Errors
    /// [`CaptureError::NoDevice`] when there is no input device, or
    /// [`CaptureError::DefaultConfig`] when it cannot report a configuration.
    pub fn new(target_rate: u32) -> Result<Self, CaptureError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(CaptureError::NoDevice)?;

        let supported = device.default_input_config()?;
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        log::debug!(
            "capture: device {:?}, {} Hz, {} ch, {:?}",
            device.name().unwrap_or_default(),
            config.sample_rate.0,
            config.channels,
            sample_format
        );

        Ok(Self {
            device,
            config,
            sample_format,
            target_rate,
        })
    }

    /// Start streaming; each hardware buffer is down-mixed, resampled and
    /// sent to `tx`.
    ///
    /// Send errors (receiver dropped) are ignored on the audio thread.
    pub fn start(&self, tx: UnboundedSender<AudioChunk>) -> Result<StreamHandle, CaptureError> {
        let stream = match self.sample_format {
            cpal::SampleFormat::F32 => self.build_stream::<f32>(tx)?,
            cpal::SampleFormat::I16 => self.build_stream::<i16>(tx)?,
            cpal::SampleFormat::U16 => self.build_stream::<u16>(tx)?,
            other => return Err(CaptureError::UnsupportedFormat(format!("{other:?}"))),
        };

        stream.play()?;
        Ok(StreamHandle { _stream: stream })
    }

    /// Native device rate in Hz.
    pub fn device_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    pub fn target_rate(&self) -> u32 {
        self.target_rate
    }

    fn build_stream<T>(&self, tx: UnboundedSender<AudioChunk>) -> Result<cpal::Stream, CaptureError>
    where
        T: cpal::SizedSample,
        f32: cpal::FromSample<T>,
    {
        let device_rate = self.config.sample_rate.0;
        let channels = self.config.channels;
        let target_rate = self.target_rate;

        let stream = self.device.build_input_stream(
            &self.config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let raw: Vec<f32> = data.iter().map(|s| s.to_sample::<f32>()).collect();
                let mono = downmix(&raw, channels);
                let samples = resample(&mono, device_rate, target_rate);
                let _ = tx.send(AudioChunk { samples });
            },
            |err: cpal::StreamError| {
                log::error!("cpal stream error: {err}");
            },
            None,
        )?;
        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_chunk_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<AudioChunk>();
    }

    #[test]
    fn no_device_message_is_learner_facing() {
        assert!(CaptureError::NoDevice
            .to_string()
            .starts_with("Microphone access denied or not available."));
    }
}
