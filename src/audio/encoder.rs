//! # WAV Encoder
//!
//! Модуль для кодирования [`SampleBuffer`] в RIFF/WAVE контейнер в памяти.
//!
//! Результат — канонический 16-битный целочисленный PCM WAV:
//! 44-байтовый заголовок и interleaved-семплы, все многобайтовые поля
//! little-endian. Формат выходного файла фиксирован и является внешним
//! контрактом: для одного и того же буфера результат совпадает
//! байт-в-байт.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};
use log::info;

use crate::audio::buffer::SampleBuffer;
use crate::error::Result;

/// Кодирует [`SampleBuffer`] в полный WAV-файл в памяти.
///
/// Длина результата всегда равна
/// `frame_count * channel_count * 2 + 44` байт. Семплы ограничиваются
/// диапазоном [-1.0, 1.0] и квантуются в 16 бит; буфер с нулевым
/// количеством семплов дает корректный пустой WAV из одного заголовка.
///
/// # Аргументы
///
/// * `buffer` - Декодированное аудио
///
/// # Возвращает
///
/// Байты WAV-файла, готовые к сохранению или передаче
/// (MIME-тип `audio/wav`)
pub fn encode_wav(buffer: &SampleBuffer) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels: buffer.channel_count() as u16,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut bytes = Vec::with_capacity(44 + buffer.frame_count() * buffer.channel_count() * 2);
    let mut writer = WavWriter::new(Cursor::new(&mut bytes), spec)?;

    // Interleaved-порядок: для каждого кадра — семпл каждого канала
    for frame in 0..buffer.frame_count() {
        for channel in buffer.channels() {
            writer.write_sample(quantize_sample(channel[frame]))?;
        }
    }

    writer.finalize()?;

    info!(
        "Закодирован WAV: {} байт ({} семплов, {} каналов, {} Гц)",
        bytes.len(),
        buffer.frame_count(),
        buffer.channel_count(),
        buffer.sample_rate()
    );
    Ok(bytes)
}

/// Квантует f32-семпл в знаковый 16-битный.
///
/// Масштабирование асимметричное: отрицательные значения умножаются
/// на 32768, неотрицательные на 32767. Так -1.0 использует весь
/// отрицательный диапазон i16 (-32768), а +1.0 не переполняет
/// положительный (32767). Симметричное масштабирование изменило бы
/// байты результата для отрицательных семплов полной амплитуды.
fn quantize_sample(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped < 0.0 {
        (clamped * 32768.0) as i16
    } else {
        (clamped * 32767.0) as i16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_full_scale() {
        assert_eq!(quantize_sample(1.0), 32767);
        assert_eq!(quantize_sample(-1.0), -32768);
        assert_eq!(quantize_sample(0.0), 0);
    }

    #[test]
    fn test_quantize_midpoints() {
        assert_eq!(quantize_sample(0.5), 16383);
        assert_eq!(quantize_sample(-0.5), -16384);
    }

    #[test]
    fn test_quantize_clamps_out_of_range() {
        // Значения за пределами [-1.0, 1.0] ограничиваются до квантования
        assert_eq!(quantize_sample(1.5), 32767);
        assert_eq!(quantize_sample(-2.0), -32768);
        assert_eq!(quantize_sample(f32::INFINITY), 32767);
        assert_eq!(quantize_sample(f32::NEG_INFINITY), -32768);
    }
}
