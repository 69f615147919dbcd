//! # Audio модуль
//!
//! Аудио-ядро библиотеки: декодирование ответа TTS API в канонический
//! буфер семплов, кодирование буфера в WAV-контейнер и параметры
//! воспроизведения.

pub mod buffer;
pub mod decoder;
pub mod encoder;
pub mod playback;

// Публично экспортируем основные типы и API для удобства использования
pub use buffer::SampleBuffer;
pub use decoder::{decode_audio, decode_base64_audio, decode_raw_pcm};
pub use encoder::encode_wav;
pub use playback::{PlaybackParams, PlaybackSink};

#[cfg(test)]
mod tests {
    mod test_decoder;
    mod test_encoder;
    mod test_playback;
}
