//! Основной файл библиотеки tts-studio
//!
//! Эта библиотека предоставляет инструменты для генерации речи из текста
//! через API провайдера TTS: декодирование полученного аудио в буфер
//! семплов, кодирование буфера в WAV-контейнер и сохранение артефактов.

pub mod audio;
pub mod config;
pub mod error;
pub mod storage;
pub mod tts;

use std::path::{Path, PathBuf};

// Публично экспортируем основные типы для удобства использования
pub use crate::audio::buffer::SampleBuffer;
pub use crate::config::{RawPcmFormat, SpeechStyle, TargetLanguage, TtsStudioConfig};
pub use crate::error::{Result, TtsStudioError};

/// Основная структура для работы с библиотекой
pub struct TtsStudio {
    /// Конфигурация библиотеки
    config: TtsStudioConfig,
}

impl TtsStudio {
    /// Создать новый экземпляр TtsStudio с указанной конфигурацией
    pub fn new(config: TtsStudioConfig) -> Self {
        Self { config }
    }

    /// Создать экземпляр TtsStudio с API ключом и настройками по умолчанию
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::new(TtsStudioConfig::with_api_key(api_key))
    }

    /// Конфигурация экземпляра
    pub fn config(&self) -> &TtsStudioConfig {
        &self.config
    }

    /// Генерирует речь из текста и декодирует ее в буфер семплов.
    ///
    /// Полный конвейер до воспроизведения: запрос к API провайдера,
    /// снятие base64-кодирования, декодирование аудио (контейнер либо
    /// raw PCM согласно `config.raw_pcm_fallback`).
    pub async fn synthesize(&self, text: &str) -> Result<SampleBuffer> {
        log::info!("Начало синтеза речи для текста: '{}'", text);

        let payload = tts::generate_speech(&self.config, text).await?;
        let buffer = audio::decoder::decode_audio(&payload, &self.config.raw_pcm_fallback)?;

        log::info!(
            "Синтез завершен: {:.2} с аудио ({} Гц)",
            buffer.duration_in_seconds(),
            buffer.sample_rate()
        );
        Ok(buffer)
    }

    /// Генерирует речь из текста и кодирует ее в WAV-файл в памяти
    pub async fn synthesize_to_wav(&self, text: &str) -> Result<Vec<u8>> {
        let buffer = self.synthesize(text).await?;
        audio::encoder::encode_wav(&buffer)
    }

    /// Генерирует речь из текста и сохраняет WAV-файл по указанному пути
    pub async fn synthesize_to_file<P: AsRef<Path>>(
        &self,
        text: &str,
        output_path: P,
    ) -> Result<PathBuf> {
        let wav_bytes = self.synthesize_to_wav(text).await?;
        storage::save_wav_file(&wav_bytes, output_path)
    }
}

/// Публичный API для удобного использования: генерация речи в WAV-файл
pub async fn generate_speech_wav(
    text: &str,
    api_key: &str,
    output_path: &str,
) -> Result<PathBuf> {
    let studio = TtsStudio::with_api_key(api_key);
    studio.synthesize_to_file(text, output_path).await
}
