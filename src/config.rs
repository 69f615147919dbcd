//! Модуль конфигурации библиотеки tts-studio
//!
//! Этот модуль содержит структуры и перечисления для настройки библиотеки:
//! параметры голоса и стиля речи, целевой язык, а также формат
//! raw PCM данных, используемый декодером в качестве запасной интерпретации.

use serde::{Deserialize, Serialize};

/// Целевой язык синтезируемой речи
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TargetLanguage {
    /// Испанский язык
    Spanish,
    /// Английский язык
    English,
}

impl Default for TargetLanguage {
    fn default() -> Self {
        Self::Spanish
    }
}

impl TargetLanguage {
    /// Получить строковое представление языка
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spanish => "es",
            Self::English => "en",
        }
    }
}

/// Стиль синтезируемой речи
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpeechStyle {
    /// Нейтральная речь
    Natural,
    /// Радостная речь
    Joyful,
    /// Грустная речь
    Sad,
    /// Шепот
    Whisper,
    /// Речь рассказчика
    Storyteller,
}

impl Default for SpeechStyle {
    fn default() -> Self {
        Self::Natural
    }
}

impl SpeechStyle {
    /// Получить строковое представление стиля
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Natural => "natural",
            Self::Joyful => "joyful",
            Self::Sad => "sad",
            Self::Whisper => "whisper",
            Self::Storyteller => "storyteller",
        }
    }

    /// Все доступные стили речи
    pub fn all() -> &'static [SpeechStyle] {
        &[
            Self::Natural,
            Self::Joyful,
            Self::Sad,
            Self::Whisper,
            Self::Storyteller,
        ]
    }
}

/// Формат raw PCM данных для запасной интерпретации декодера.
///
/// Некоторые модели TTS возвращают аудио без контейнера: просто поток
/// 16-битных семплов. Формат такого потока невозможно определить по самим
/// данным, поэтому он задается явно. Значения по умолчанию воспроизводят
/// соглашение используемого провайдера (моно, 24 кГц, 16 бит) и являются
/// слоем совместимости, а не универсальным декодером.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawPcmFormat {
    /// Частота дискретизации в Гц
    pub sample_rate: u32,
    /// Количество каналов (interleaved-раскладка для многоканальных данных)
    pub channels: u16,
    /// Разрядность семпла в битах (поддерживается только 16)
    pub bits_per_sample: u16,
}

impl Default for RawPcmFormat {
    fn default() -> Self {
        Self {
            sample_rate: 24000,
            channels: 1,
            bits_per_sample: 16,
        }
    }
}

/// Конфигурация библиотеки
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsStudioConfig {
    /// API ключ провайдера TTS
    pub api_key: String,
    /// Базовый URL API
    pub base_url: String,
    /// Путь эндпоинта синтеза речи
    pub endpoint_path: String,
    /// Идентификатор голоса
    pub voice: String,
    /// Стиль речи
    pub style: SpeechStyle,
    /// Целевой язык
    pub target_language: TargetLanguage,
    /// Региональный акцент (например, "es-MX")
    pub accent_region: String,
    /// Формат raw PCM для запасной интерпретации декодера
    pub raw_pcm_fallback: RawPcmFormat,
    /// Максимальное количество попыток запроса к API
    pub max_attempts: u32,
    /// Таймаут HTTP запроса в секундах
    pub request_timeout_secs: u64,
    /// Использовать кэширование результатов синтеза
    pub use_caching: bool,
}

impl Default for TtsStudioConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com".to_string(),
            endpoint_path: "/v1/audio/speech".to_string(),
            voice: "alloy".to_string(),
            style: SpeechStyle::default(),
            target_language: TargetLanguage::default(),
            accent_region: "neutral".to_string(),
            raw_pcm_fallback: RawPcmFormat::default(),
            max_attempts: 3,
            request_timeout_secs: 30,
            use_caching: true,
        }
    }
}

impl TtsStudioConfig {
    /// Создать конфигурацию с указанным API ключом и настройками по умолчанию
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}
