//! Пример использования библиотеки tts-studio
//!
//! Этот пример генерирует речь из текста, сохраняет WAV-файл
//! и показывает подготовку параметров воспроизведения.

use tts_studio::{
    audio::playback::PlaybackParams,
    storage,
    SpeechStyle, TargetLanguage, TtsStudio, TtsStudioConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Инициализируем логирование
    env_logger::init();

    // Получаем API ключ из переменной окружения
    let api_key = std::env::var("TTS_API_KEY").expect("TTS_API_KEY must be set");

    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Hola, ¿cómo estás?".to_string());

    println!("Пример 1: Генерация речи с настройками по умолчанию");

    let studio = TtsStudio::with_api_key(&api_key);
    let output_path = storage::wav_filename(&text);
    let saved = studio.synthesize_to_file(&text, &output_path).await?;

    println!("Речь сохранена в файл: {}", saved.display());

    println!("\nПример 2: Настраиваемая конфигурация и буфер для воспроизведения");

    // Создаем конфигурацию
    let config = TtsStudioConfig {
        api_key,
        voice: "alloy".to_string(),
        style: SpeechStyle::Storyteller,
        target_language: TargetLanguage::Spanish,
        accent_region: "es-MX".to_string(),
        ..TtsStudioConfig::default()
    };

    let studio = TtsStudio::new(config);
    let buffer = studio.synthesize(&text).await?;

    println!(
        "Получено {:.2} с аудио ({} каналов, {} Гц)",
        buffer.duration_in_seconds(),
        buffer.channel_count(),
        buffer.sample_rate()
    );

    // Параметры для движка воспроизведения: чуть быстрее и на полтона выше
    let params = PlaybackParams::new(1.1, 100)?;
    println!(
        "Итоговая скорость воспроизведения: {:.3}",
        params.effective_rate()
    );

    Ok(())
}
