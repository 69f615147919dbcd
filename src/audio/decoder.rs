//! # PCM Decoder
//!
//! Модуль для декодирования аудио-ответа TTS API в канонический
//! [`SampleBuffer`].
//!
//! Провайдер в зависимости от модели возвращает либо аудио в стандартном
//! контейнере (WAV, MP3 и т.д.), либо поток raw PCM без заголовка.
//! Декодер пробует обе интерпретации: сначала универсальное декодирование
//! контейнера через Symphonia, затем ручную интерпретацию как raw PCM
//! с явно заданным форматом. Ошибка возвращается только если обе
//! стратегии не удались.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{info, warn};
use symphonia::core::audio::SampleBuffer as SymphoniaSampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::probe::Hint;

use crate::audio::buffer::SampleBuffer;
use crate::config::RawPcmFormat;
use crate::error::{Result, TtsStudioError};

/// Декодирует base64-представление аудио-данных в байты.
///
/// TTS API передает аудио внутри JSON-ответа в виде base64-строки;
/// это транспортное кодирование снимается до декодирования самих данных.
pub fn decode_base64_audio(encoded: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(encoded.trim())?)
}

/// Декодирует аудио-данные неизвестного формата в [`SampleBuffer`].
///
/// Сначала данные интерпретируются как стандартный аудио-контейнер.
/// Если контейнерное декодирование не удалось, данные интерпретируются
/// как raw PCM с форматом `fallback` (по умолчанию — моно, 24 кГц, 16 бит,
/// соглашение используемого провайдера).
///
/// # Аргументы
///
/// * `payload` - Байты аудио-данных (уже без base64)
/// * `fallback` - Формат для запасной raw PCM интерпретации
///
/// # Возвращает
///
/// [`SampleBuffer`] с сохранением каналов и частоты дискретизации источника
///
/// # Ошибки
///
/// Возвращает `TtsStudioError::AudioDecoding`, если обе стратегии
/// декодирования не удались. Пустые данные ошибкой не считаются:
/// результатом будет буфер нулевой длины.
pub fn decode_audio(payload: &[u8], fallback: &RawPcmFormat) -> Result<SampleBuffer> {
    match decode_container(payload) {
        Ok(buffer) => {
            info!(
                "Декодирован аудио-контейнер: {} каналов, {} Гц, {} семплов",
                buffer.channel_count(),
                buffer.sample_rate(),
                buffer.frame_count()
            );
            Ok(buffer)
        }
        Err(container_error) => {
            warn!(
                "Не удалось декодировать данные как контейнер ({}), интерпретируем как raw PCM",
                container_error
            );
            decode_raw_pcm(payload, fallback)
        }
    }
}

/// Декодирует аудио в стандартном контейнере через Symphonia.
///
/// Формат определяется пробой без подсказки по расширению, так как
/// источник данных — ответ API, а не файл. Каналы сохраняются как есть,
/// без сведения в моно. Ошибки отдельных пакетов пропускаются.
fn decode_container(data: &[u8]) -> Result<SampleBuffer> {
    // Создаем клон данных для владения
    let data_owned = data.to_vec();
    let cursor = Cursor::new(data_owned);
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let format_opts = FormatOptions {
        enable_gapless: false,
        ..Default::default()
    };

    // Пробуем формат
    let probed = symphonia::default::get_probe()
        .format(&Hint::new(), mss, &format_opts, &Default::default())
        .map_err(|e| TtsStudioError::AudioDecoding(format!("Ошибка проверки формата: {}", e)))?;

    // Получаем формат и первый аудио-трек
    let mut format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| TtsStudioError::AudioDecoding("Не найден аудио-трек".to_string()))?;

    // Создаем декодер для трека
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| TtsStudioError::AudioDecoding(format!("Не удалось создать декодер: {}", e)))?;

    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);

    // Планарные каналы; размер становится известен из первого декодированного пакета
    let mut channels: Vec<Vec<f32>> = Vec::new();

    while let Ok(packet) = format.next_packet() {
        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                let channel_count = spec.channels.count();
                if channel_count == 0 {
                    continue;
                }
                if channels.is_empty() {
                    channels = vec![Vec::new(); channel_count];
                }
                if sample_rate == 0 {
                    sample_rate = spec.rate;
                }

                let mut sample_buf =
                    SymphoniaSampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                sample_buf.copy_planar_ref(decoded);
                let samples = sample_buf.samples();

                let frames = samples.len() / channels.len();
                for (index, channel) in channels.iter_mut().enumerate() {
                    channel.extend_from_slice(&samples[index * frames..(index + 1) * frames]);
                }
            }
            Err(e) => {
                warn!("Ошибка декодирования пакета: {}", e);
                continue;
            }
        }
    }

    if channels.is_empty() {
        return Err(TtsStudioError::AudioDecoding(
            "Декодер не вернул ни одного семпла".to_string(),
        ));
    }

    SampleBuffer::new(channels, sample_rate)
}

/// Интерпретирует байты как raw PCM с явно заданным форматом.
///
/// Поддерживается только 16-битный знаковый little-endian PCM;
/// многоканальные данные считаются interleaved. Каждая пара байтов
/// читается как i16 и линейно масштабируется в f32 делением на 32768.0.
///
/// # Ошибки
///
/// * `TtsStudioError::Configuration` - формат задан некорректно
///   (нулевая частота, ноль каналов, разрядность кроме 16 бит)
/// * `TtsStudioError::AudioDecoding` - длина данных не кратна размеру
///   кадра (например, нечетное количество байтов)
pub fn decode_raw_pcm(data: &[u8], format: &RawPcmFormat) -> Result<SampleBuffer> {
    if format.bits_per_sample != 16 {
        return Err(TtsStudioError::Configuration(format!(
            "Неподдерживаемая разрядность raw PCM: {} бит (поддерживается только 16)",
            format.bits_per_sample
        )));
    }
    if format.channels == 0 {
        return Err(TtsStudioError::Configuration(
            "Количество каналов raw PCM должно быть больше нуля".to_string(),
        ));
    }
    if format.sample_rate == 0 {
        return Err(TtsStudioError::Configuration(
            "Частота дискретизации raw PCM должна быть больше нуля".to_string(),
        ));
    }

    if data.len() % 2 != 0 {
        return Err(TtsStudioError::AudioDecoding(format!(
            "Длина raw PCM данных ({} байт) не кратна размеру 16-битного семпла",
            data.len()
        )));
    }

    let channel_count = format.channels as usize;
    let total_samples = data.len() / 2;
    if total_samples % channel_count != 0 {
        return Err(TtsStudioError::AudioDecoding(format!(
            "Количество семплов ({}) не кратно числу каналов ({})",
            total_samples, channel_count
        )));
    }

    let mut samples = Vec::with_capacity(total_samples);
    for pair in data.chunks_exact(2) {
        let value = i16::from_le_bytes([pair[0], pair[1]]);
        samples.push(value as f32 / 32768.0);
    }

    info!(
        "Интерпретировано {} семплов raw PCM ({} каналов, {} Гц)",
        total_samples, channel_count, format.sample_rate
    );

    if channel_count == 1 {
        return Ok(SampleBuffer::from_mono(samples, format.sample_rate));
    }

    // Де-интерливинг в планарные каналы
    let frames = total_samples / channel_count;
    let mut channels = vec![Vec::with_capacity(frames); channel_count];
    for frame in samples.chunks_exact(channel_count) {
        for (channel, &sample) in channels.iter_mut().zip(frame.iter()) {
            channel.push(sample);
        }
    }

    SampleBuffer::new(channels, format.sample_rate)
}
