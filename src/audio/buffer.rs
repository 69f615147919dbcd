//! # Sample Buffer
//!
//! Каноническое представление декодированного аудио в памяти:
//! планарные каналы f32-семплов и частота дискретизации.
//! Буфер создается один раз декодером и далее используется только на чтение.

use crate::error::{Result, TtsStudioError};

/// Декодированное аудио: планарные каналы семплов и частота дискретизации.
///
/// Инвариант: каждый канал содержит ровно `frame_count()` семплов.
/// Семплы номинально лежат в диапазоне [-1.0, 1.0], но не обязаны —
/// кодировщик выполняет ограничение при квантовании.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Создает буфер из планарных каналов с проверкой инварианта.
    ///
    /// # Ошибки
    ///
    /// Возвращает `TtsStudioError::InvalidFormat`, если каналов нет,
    /// частота дискретизации нулевая или каналы имеют разную длину.
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        if channels.is_empty() {
            return Err(TtsStudioError::InvalidFormat(
                "Буфер должен содержать хотя бы один канал".to_string(),
            ));
        }
        if sample_rate == 0 {
            return Err(TtsStudioError::InvalidFormat(
                "Частота дискретизации должна быть больше нуля".to_string(),
            ));
        }
        let frame_count = channels[0].len();
        if channels.iter().any(|channel| channel.len() != frame_count) {
            return Err(TtsStudioError::InvalidFormat(
                "Все каналы должны содержать одинаковое количество семплов".to_string(),
            ));
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Создает одноканальный буфер. Инвариант выполняется по построению.
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            channels: vec![samples],
            sample_rate,
        }
    }

    /// Количество каналов
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Количество семплов в каждом канале
    pub fn frame_count(&self) -> usize {
        self.channels[0].len()
    }

    /// Частота дискретизации в Гц
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Семплы указанного канала, либо `None`, если канала нет
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Все каналы в планарной раскладке
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Длительность аудио в секундах
    pub fn duration_in_seconds(&self) -> f32 {
        self.frame_count() as f32 / self.sample_rate as f32
    }
}
