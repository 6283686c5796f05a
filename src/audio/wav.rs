//! In-memory WAV encoding.
//!
//! Gemini accepts inline audio as base64; the recorder hands it a complete
//! RIFF/WAVE file (mono, 16-bit signed PCM) built with `hound` into a
//! `Vec<u8>`.

use std::io::Cursor;

/// MIME type of clips produced by [`encode_pcm16`].
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// Encode mono `f32` samples in `[-1.0, 1.0]` as a 16-bit PCM WAV file.
///
/// Out-of-range samples are clamped.
///
/// # Errors
/// Propagates `hound` write errors (only possible on an invalid spec).
pub fn encode_pcm16(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, hound::Error> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for &s in samples {
            writer.write_sample(to_i16(s))?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_describes_mono_16bit() {
        let bytes = encode_pcm16(&[0.0, 0.5, -0.5], 16_000).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");

        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len(), 3);
    }

    #[test]
    fn samples_are_scaled_and_clamped() {
        let bytes = encode_pcm16(&[1.0, -1.0, 2.0, 0.0], 16_000).unwrap();
        let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, vec![i16::MAX, -i16::MAX, i16::MAX, 0]);
    }

    #[test]
    fn empty_input_has_no_samples() {
        let bytes = encode_pcm16(&[], 16_000).unwrap();
        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.len(), 0);
    }
}
