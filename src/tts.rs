//! # TTS Integration
//!
//! Модуль для взаимодействия с API генеративного синтеза речи.
//! Отправляет текст с параметрами голоса, стиля и акцента и возвращает
//! байты аудио-данных; формат данных определяет декодер
//! (см. [`crate::audio::decoder`]).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use log::{error, info, warn};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};

use crate::audio::decoder::decode_base64_audio;
use crate::config::TtsStudioConfig;
use crate::error::{Result, TtsStudioError};

// Кеш для хранения уже сгенерированных аудио-данных
static TTS_CACHE: Lazy<Mutex<HashMap<String, Vec<u8>>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Параметры запроса к API синтеза речи
#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    input: &'a str,
    voice: &'a str,
    style: &'a str,
    language: &'a str,
    accent: &'a str,
    response_format: &'a str,
}

/// Генерирует речь из текста через API провайдера.
///
/// Ответ API — JSON с base64-строкой аудио-данных; транспортное
/// кодирование снимается здесь, а формат полученных байтов (контейнер
/// или raw PCM) остается неизвестным до декодирования.
///
/// Запрос повторяется до `config.max_attempts` раз с экспоненциальной
/// задержкой при сетевых ошибках и статусах 429/5xx. Отказ провайдера
/// (включая фильтрацию контента) возвращается как
/// `TtsStudioError::TtsGeneration` без повторов.
///
/// # Аргументы
///
/// * `config` - Конфигурация с API ключом и параметрами голоса
/// * `text` - Текст для озвучивания
///
/// # Возвращает
///
/// Байты сгенерированного аудио
pub async fn generate_speech(config: &TtsStudioConfig, text: &str) -> Result<Vec<u8>> {
    if config.api_key.is_empty() {
        return Err(TtsStudioError::Configuration(
            "Не задан API ключ провайдера TTS".to_string(),
        ));
    }

    let cache_key = format!(
        "{}:{}:{}:{}:{}",
        text,
        config.voice,
        config.style.as_str(),
        config.target_language.as_str(),
        config.accent_region
    );

    // Проверяем кеш
    if config.use_caching {
        let cache = TTS_CACHE.lock().unwrap();
        if let Some(cached_audio) = cache.get(&cache_key) {
            info!("Используем кешированный TTS для текста: '{}'", text);
            return Ok(cached_audio.clone());
        }
    }

    // Подготовка текста перед отправкой
    let processed_text = preprocess_text(text);

    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    let endpoint = format!(
        "{}{}",
        config.base_url.trim_end_matches('/'),
        config.endpoint_path
    );

    let request_body = SpeechRequest {
        input: &processed_text,
        voice: &config.voice,
        style: config.style.as_str(),
        language: config.target_language.as_str(),
        accent: &config.accent_region,
        response_format: "pcm",
    };

    // Отправка запроса с повторными попытками
    let mut attempts = 0;
    let max_attempts = config.max_attempts.max(1);

    while attempts < max_attempts {
        info!(
            "Отправка TTS запроса для текста: '{}' (попытка {}/{})",
            processed_text,
            attempts + 1,
            max_attempts
        );

        let response = client
            .post(&endpoint)
            .bearer_auth(&config.api_key)
            .json(&request_body)
            .send()
            .await;

        match response {
            Ok(resp) => {
                let status = resp.status();

                if status.is_success() {
                    let body: Value = resp.json().await?;
                    let audio_data = extract_audio_payload(&body)?;

                    info!(
                        "Успешно получен аудио-ответ от TTS API: {} байт",
                        audio_data.len()
                    );

                    // Кешируем результат
                    if config.use_caching {
                        let mut cache = TTS_CACHE.lock().unwrap();
                        cache.insert(cache_key, audio_data.clone());
                    }

                    return Ok(audio_data);
                } else {
                    // Обработка ошибки
                    let error_text = resp
                        .text()
                        .await
                        .unwrap_or_else(|_| "Не удалось получить текст ошибки".to_string());
                    let error_json: Value = serde_json::from_str(&error_text)
                        .unwrap_or_else(|_| json!({"error": {"message": error_text}}));

                    let error_message = error_json["error"]["message"]
                        .as_str()
                        .unwrap_or("Неизвестная ошибка API");

                    error!("Ошибка TTS API (статус {}): {}", status, error_message);

                    // Проверяем, стоит ли повторить запрос
                    if status.as_u16() == 429 || status.as_u16() >= 500 {
                        attempts += 1;
                        if attempts < max_attempts {
                            let wait_time = Duration::from_secs(2u64.pow(attempts));
                            warn!("Повтор запроса через {} секунд...", wait_time.as_secs());
                            tokio::time::sleep(wait_time).await;
                            continue;
                        }
                    }

                    return Err(TtsStudioError::TtsGeneration(format!(
                        "Ошибка API ({}): {}",
                        status, error_message
                    )));
                }
            }
            Err(e) => {
                error!("Ошибка HTTP при запросе к TTS API: {}", e);

                // Повторяем запрос при ошибках сети
                attempts += 1;
                if attempts < max_attempts {
                    let wait_time = Duration::from_secs(2u64.pow(attempts));
                    warn!("Повтор запроса через {} секунд...", wait_time.as_secs());
                    tokio::time::sleep(wait_time).await;
                    continue;
                }

                return Err(TtsStudioError::Http(e));
            }
        }
    }

    Err(TtsStudioError::TtsGeneration(
        "Превышено максимальное количество попыток".to_string(),
    ))
}

/// Извлекает base64-аудио из JSON-ответа провайдера.
///
/// Поле с аудио принимается под распространенными именами;
/// ответ без аудио-данных считается отказом генерации.
fn extract_audio_payload(body: &Value) -> Result<Vec<u8>> {
    for key in ["audio", "audioContent", "audio_content", "data"] {
        if let Some(encoded) = body.get(key).and_then(Value::as_str) {
            return decode_base64_audio(encoded);
        }
    }
    Err(TtsStudioError::TtsGeneration(
        "Ответ API не содержит аудио-данных".to_string(),
    ))
}

/// Предобрабатывает текст перед отправкой в API TTS.
fn preprocess_text(text: &str) -> String {
    let mut result = text.trim().to_string();

    // Обработка многоточий
    result = result.replace("...", ". ");

    // Удаление дублирующихся пробелов
    while result.contains("  ") {
        result = result.replace("  ", " ");
    }

    // Добавляем точку в конце, если отсутствует завершающий знак препинания
    if !result.is_empty() && !".!?".contains(result.chars().last().unwrap()) {
        result.push('.');
    }

    // Нормализация переводов строк
    result = result.replace('\n', " ");

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    #[test]
    fn test_preprocess_text() {
        assert_eq!(preprocess_text("Hola  mundo"), "Hola mundo.");
        assert_eq!(preprocess_text("Hola mundo!"), "Hola mundo!");
        assert_eq!(preprocess_text("Línea 1\nLínea 2"), "Línea 1 Línea 2.");
        assert_eq!(preprocess_text("Texto con...puntos"), "Texto con. puntos.");
    }

    #[test]
    fn test_extract_audio_payload() {
        let encoded = STANDARD.encode([1u8, 2, 3, 4]);

        // Поле с аудио принимается под разными именами
        let bodies = [
            json!({ "audio": encoded }),
            json!({ "audioContent": encoded }),
            json!({ "data": encoded }),
        ];
        for body in &bodies {
            let payload = extract_audio_payload(body).unwrap();
            assert_eq!(payload, vec![1, 2, 3, 4]);
        }

        // Ответ без аудио — отказ генерации
        let body = json!({"status": "blocked"});
        assert!(matches!(
            extract_audio_payload(&body),
            Err(TtsStudioError::TtsGeneration(_))
        ));
    }

    #[test]
    fn test_generate_speech_requires_api_key() {
        let config = TtsStudioConfig::default();
        let result = tokio_test::block_on(generate_speech(&config, "Hola"));
        assert!(matches!(result, Err(TtsStudioError::Configuration(_))));
    }
}
