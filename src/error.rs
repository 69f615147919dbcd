//! Модуль обработки ошибок библиотеки tts-studio
//!
//! Этот модуль содержит типы ошибок, которые могут возникнуть при работе библиотеки.

use thiserror::Error;

/// Ошибки библиотеки tts-studio
#[derive(Debug, Error)]
pub enum TtsStudioError {
    /// Ошибка HTTP запроса
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Ошибка ввода-вывода
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка сериализации/десериализации JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Ошибка генерации TTS: провайдер вернул отказ или ответ без аудио-данных
    #[error("TTS generation error: {0}")]
    TtsGeneration(String),

    /// Ошибка декодирования аудио: ни контейнерная, ни raw PCM интерпретация не удалась
    #[error("Audio decoding error: {0}")]
    AudioDecoding(String),

    /// Ошибка WAV-кодирования
    #[error("WAV encoding error: {0}")]
    WavEncoding(#[from] hound::Error),

    /// Ошибка декодирования base64
    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Ошибка конфигурации
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Неверный формат данных
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Другая ошибка
    #[error("Other error: {0}")]
    Other(String),
}

impl From<&str> for TtsStudioError {
    fn from(s: &str) -> Self {
        TtsStudioError::Other(s.to_string())
    }
}

impl From<String> for TtsStudioError {
    fn from(s: String) -> Self {
        TtsStudioError::Other(s)
    }
}

/// Тип Result для библиотеки tts-studio
pub type Result<T> = std::result::Result<T, TtsStudioError>;
