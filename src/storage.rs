//! # Storage
//!
//! Модуль сохранения WAV-артефактов: запись готовых байтов на диск
//! и формирование имени файла для скачивания.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;

/// MIME-тип WAV-артефактов
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// Максимальная длина основы имени файла
const MAX_FILENAME_STEM_LEN: usize = 48;

/// Сохраняет байты WAV-файла по указанному пути.
///
/// Родительские директории создаются при необходимости.
///
/// # Аргументы
///
/// * `wav_bytes` - Готовые байты WAV-файла (см. [`crate::audio::encoder::encode_wav`])
/// * `output_path` - Путь для сохранения
///
/// # Возвращает
///
/// Путь сохраненного файла
pub fn save_wav_file<P: AsRef<Path>>(wav_bytes: &[u8], output_path: P) -> Result<PathBuf> {
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, wav_bytes)?;
    info!(
        "Сохранен WAV-файл: {} ({} байт)",
        path.display(),
        wav_bytes.len()
    );
    Ok(path.to_path_buf())
}

/// Формирует имя WAV-файла из фрагмента текста.
///
/// Символы, недопустимые в именах файлов, заменяются подчеркиванием;
/// длинный текст усекается. Для пустого текста возвращается "speech.wav".
pub fn wav_filename(stem: &str) -> String {
    let sanitized: String = stem
        .trim()
        .chars()
        .take(MAX_FILENAME_STEM_LEN)
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let sanitized = sanitized.trim_matches('_');

    if sanitized.is_empty() {
        "speech.wav".to_string()
    } else {
        format!("{}.wav", sanitized)
    }
}
