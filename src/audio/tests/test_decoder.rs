//! Тесты декодера: raw PCM интерпретация, base64 и круговое
//! декодирование WAV-контейнера.

use std::f32::consts::PI;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::audio::buffer::SampleBuffer;
use crate::audio::decoder::{decode_audio, decode_base64_audio, decode_raw_pcm};
use crate::audio::encoder::encode_wav;
use crate::config::RawPcmFormat;

/// Создает тестовый синусоидальный сигнал
fn create_sine_wave(freq: f32, duration_sec: f32, sample_rate: u32) -> Vec<f32> {
    let num_samples = (duration_sec * sample_rate as f32) as usize;
    let mut samples = Vec::with_capacity(num_samples);

    for i in 0..num_samples {
        let t = i as f32 / sample_rate as f32;
        samples.push((2.0 * PI * freq * t).sin() * 0.5);
    }

    samples
}

/// Переводит i16-семплы в байты little-endian
fn to_le_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

#[test]
fn test_raw_pcm_fallback() {
    // Пара 16-битных семплов: 16384 и -16384 => примерно [0.5, -0.5]
    let data = to_le_bytes(&[16384, -16384]);
    let buffer = decode_audio(&data, &RawPcmFormat::default()).unwrap();

    assert_eq!(buffer.channel_count(), 1, "Запасной формат по умолчанию — моно");
    assert_eq!(buffer.sample_rate(), 24000, "Запасная частота по умолчанию — 24 кГц");
    assert_eq!(buffer.frame_count(), 2);

    let samples = buffer.channel(0).unwrap();
    assert!((samples[0] - 0.5).abs() < 1e-6);
    assert!((samples[1] + 0.5).abs() < 1e-6);
}

#[test]
fn test_empty_payload() {
    // Пустые данные — корректный буфер нулевой длины, а не ошибка
    let buffer = decode_audio(&[], &RawPcmFormat::default()).unwrap();
    assert_eq!(buffer.frame_count(), 0);
    assert_eq!(buffer.channel_count(), 1);
    assert_eq!(buffer.sample_rate(), 24000);
}

#[test]
fn test_odd_length_fails() {
    // Нечетная длина не образует целого числа 16-битных семплов
    assert!(decode_raw_pcm(&[0x01, 0x02, 0x03], &RawPcmFormat::default()).is_err());

    // Обе стратегии не удались — decode_audio тоже возвращает ошибку
    assert!(decode_audio(&[0x01, 0x02, 0x03], &RawPcmFormat::default()).is_err());
}

#[test]
fn test_raw_pcm_format_validation() {
    let data = to_le_bytes(&[0, 0]);

    // Разрядность кроме 16 бит отклоняется
    let format = RawPcmFormat {
        bits_per_sample: 24,
        ..RawPcmFormat::default()
    };
    assert!(decode_raw_pcm(&data, &format).is_err());

    // Ноль каналов отклоняется
    let format = RawPcmFormat {
        channels: 0,
        ..RawPcmFormat::default()
    };
    assert!(decode_raw_pcm(&data, &format).is_err());

    // Нулевая частота отклоняется
    let format = RawPcmFormat {
        sample_rate: 0,
        ..RawPcmFormat::default()
    };
    assert!(decode_raw_pcm(&data, &format).is_err());
}

#[test]
fn test_raw_pcm_stereo_deinterleave() {
    // Interleaved-стерео: L0 R0 L1 R1
    let data = to_le_bytes(&[16384, -16384, 8192, -8192]);
    let format = RawPcmFormat {
        channels: 2,
        ..RawPcmFormat::default()
    };
    let buffer = decode_raw_pcm(&data, &format).unwrap();

    assert_eq!(buffer.channel_count(), 2);
    assert_eq!(buffer.frame_count(), 2);

    let left = buffer.channel(0).unwrap();
    let right = buffer.channel(1).unwrap();
    assert!((left[0] - 0.5).abs() < 1e-6);
    assert!((left[1] - 0.25).abs() < 1e-6);
    assert!((right[0] + 0.5).abs() < 1e-6);
    assert!((right[1] + 0.25).abs() < 1e-6);
}

#[test]
fn test_raw_pcm_stereo_incomplete_frame_fails() {
    // Три семпла не делятся на два канала
    let data = to_le_bytes(&[1, 2, 3]);
    let format = RawPcmFormat {
        channels: 2,
        ..RawPcmFormat::default()
    };
    assert!(decode_raw_pcm(&data, &format).is_err());
}

#[test]
fn test_wav_container_round_trip() {
    // Кодируем буфер в WAV и декодируем обратно через контейнерную ветку
    let samples = create_sine_wave(440.0, 0.05, 24000);
    let original = SampleBuffer::from_mono(samples, 24000);

    let wav_bytes = encode_wav(&original).unwrap();
    let decoded = decode_audio(&wav_bytes, &RawPcmFormat::default()).unwrap();

    assert_eq!(decoded.sample_rate(), original.sample_rate());
    assert_eq!(decoded.channel_count(), original.channel_count());
    assert_eq!(decoded.frame_count(), original.frame_count());

    // Расхождение не должно превышать шага 16-битного квантования
    let tolerance = 2.0 / 32768.0;
    for (a, b) in original
        .channel(0)
        .unwrap()
        .iter()
        .zip(decoded.channel(0).unwrap())
    {
        assert!(
            (a - b).abs() < tolerance,
            "Семплы после кругового преобразования расходятся: {} и {}",
            a,
            b
        );
    }
}

#[test]
fn test_wav_container_round_trip_stereo() {
    let left = create_sine_wave(440.0, 0.02, 24000);
    let right = create_sine_wave(880.0, 0.02, 24000);
    let original = SampleBuffer::new(vec![left, right], 24000).unwrap();

    let wav_bytes = encode_wav(&original).unwrap();
    let decoded = decode_audio(&wav_bytes, &RawPcmFormat::default()).unwrap();

    assert_eq!(decoded.channel_count(), 2);
    assert_eq!(decoded.frame_count(), original.frame_count());
    assert_eq!(decoded.sample_rate(), 24000);

    let tolerance = 2.0 / 32768.0;
    for channel in 0..2 {
        for (a, b) in original
            .channel(channel)
            .unwrap()
            .iter()
            .zip(decoded.channel(channel).unwrap())
        {
            assert!((a - b).abs() < tolerance);
        }
    }
}

#[test]
fn test_decode_base64_audio() {
    let bytes = [0x00u8, 0x40, 0x00, 0xC0];
    let encoded = STANDARD.encode(bytes);

    assert_eq!(decode_base64_audio(&encoded).unwrap(), bytes);

    // Пробельные символы по краям допустимы
    assert_eq!(decode_base64_audio(&format!("  {}\n", encoded)).unwrap(), bytes);

    // Невалидный base64 — ошибка
    assert!(decode_base64_audio("это не base64!!!").is_err());
}
