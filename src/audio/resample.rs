//! Channel down-mix and sample-rate conversion for captured audio.
//!
//! The transcription clip is always mono at the configured rate (16 kHz by
//! default).  Capture devices usually deliver interleaved stereo at 44.1 or
//! 48 kHz, so every chunk goes through [`downmix`] then [`resample`] before
//! it is buffered.

// ---------------------------------------------------------------------------
// downmix
// ---------------------------------------------------------------------------

/// Average interleaved `channels` into a single mono channel.
///
/// A trailing partial frame is dropped.  `channels == 0` yields an empty
/// vector.
///
/// ```rust
/// use fluent_flow::audio::downmix;
///
/// let mono = downmix(&[1.0_f32, -1.0, 0.5, 0.5], 2);
/// assert_eq!(mono, vec![0.0, 0.5]);
/// ```
pub fn downmix(samples: &[f32], channels: u16) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => samples.to_vec(),
        n => {
            let n = n as usize;
            samples
                .chunks_exact(n)
                .map(|frame| frame.iter().sum::<f32>() / n as f32)
                .collect()
        }
    }
}

// ---------------------------------------------------------------------------
// resample
// ---------------------------------------------------------------------------

/// Linear-interpolation resampler from `from_rate` to `to_rate` Hz.
///
/// Equal rates, an empty input, or a zero rate return the input unchanged
/// (or empty).  The output length is `ceil(len * to_rate / from_rate)`.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }
    if from_rate == 0 || to_rate == 0 {
        return Vec::new();
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let output_len = (samples.len() as f64 * ratio).ceil() as usize;
    let last = samples.len() - 1;

    (0..output_len)
        .map(|i| {
            let pos = i as f64 / ratio;
            let idx = (pos as usize).min(last);
            let frac = (pos - idx as f64) as f32;
            match samples.get(idx + 1) {
                Some(&next) => samples[idx] * (1.0 - frac) + next * frac,
                None => samples[idx],
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_mono_is_identity() {
        let input = vec![0.1_f32, 0.2, 0.3];
        assert_eq!(downmix(&input, 1), input);
    }

    #[test]
    fn downmix_drops_partial_frame() {
        let out = downmix(&[0.2_f32, 0.4, 0.6], 2);
        assert_eq!(out.len(), 1);
        assert!((out[0] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn downmix_zero_channels_is_empty() {
        assert!(downmix(&[1.0_f32], 0).is_empty());
    }

    #[test]
    fn same_rate_is_noop() {
        let input: Vec<f32> = (0..32).map(|i| i as f32).collect();
        assert_eq!(resample(&input, 16_000, 16_000), input);
    }

    #[test]
    fn downsample_48k_to_16k_length() {
        assert_eq!(resample(&vec![0.0_f32; 480], 48_000, 16_000).len(), 160);
    }

    #[test]
    fn downsample_44k1_is_about_one_second() {
        let out = resample(&vec![0.0_f32; 44_100], 44_100, 16_000);
        assert!(out.len().abs_diff(16_000) <= 1, "got {}", out.len());
    }

    #[test]
    fn upsample_doubles_length_and_interpolates() {
        let out = resample(&[0.0_f32, 1.0], 8_000, 16_000);
        assert_eq!(out.len(), 4);
        assert!((out[1] - 0.5).abs() < 1e-6);
        assert!((out[3] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn dc_signal_keeps_amplitude() {
        for s in resample(&vec![0.25_f32; 441], 44_100, 16_000) {
            assert!((s - 0.25).abs() < 1e-5);
        }
    }

    #[test]
    fn zero_rate_yields_empty() {
        assert!(resample(&[0.5_f32], 0, 16_000).is_empty());
    }
}
