//! # Playback Parameters
//!
//! Параметры реального времени для движка воспроизведения.
//! Сам движок — внешний компонент (платформенный аудио-вывод);
//! библиотека определяет только его интерфейс и валидацию параметров.

use crate::audio::buffer::SampleBuffer;
use crate::error::{Result, TtsStudioError};

/// Нижняя граница расстройки высоты тона в центах
pub const MIN_DETUNE_CENTS: i32 = -1200;
/// Верхняя граница расстройки высоты тона в центах
pub const MAX_DETUNE_CENTS: i32 = 1200;

/// Параметры воспроизведения: скорость и расстройка высоты тона.
///
/// Расстройка задается в центах (1/100 полутона); диапазон ±1200 центов
/// соответствует ±1 октаве.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackParams {
    /// Скорость воспроизведения (положительный множитель, 1.0 — без изменений)
    pub rate: f32,
    /// Расстройка высоты тона в центах
    pub detune_cents: i32,
}

impl Default for PlaybackParams {
    fn default() -> Self {
        Self {
            rate: 1.0,
            detune_cents: 0,
        }
    }
}

impl PlaybackParams {
    /// Создает параметры воспроизведения с проверкой диапазонов
    pub fn new(rate: f32, detune_cents: i32) -> Result<Self> {
        let params = Self { rate, detune_cents };
        params.validate()?;
        Ok(params)
    }

    /// Проверяет, что параметры лежат в допустимых диапазонах.
    ///
    /// # Ошибки
    ///
    /// Возвращает `TtsStudioError::Configuration`, если скорость
    /// не положительна или не конечна, либо расстройка выходит
    /// за пределы [-1200, 1200] центов.
    pub fn validate(&self) -> Result<()> {
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(TtsStudioError::Configuration(format!(
                "Скорость воспроизведения должна быть положительной: {}",
                self.rate
            )));
        }
        if self.detune_cents < MIN_DETUNE_CENTS || self.detune_cents > MAX_DETUNE_CENTS {
            return Err(TtsStudioError::Configuration(format!(
                "Расстройка должна лежать в диапазоне [{}, {}] центов: {}",
                MIN_DETUNE_CENTS, MAX_DETUNE_CENTS, self.detune_cents
            )));
        }
        Ok(())
    }

    /// Итоговый множитель скорости с учетом расстройки.
    ///
    /// Расстройка сводится к изменению скорости по формуле
    /// `rate * 2^(cents / 1200)`: +1200 центов удваивает скорость,
    /// -1200 — уменьшает вдвое.
    pub fn effective_rate(&self) -> f32 {
        self.rate * 2f32.powf(self.detune_cents as f32 / 1200.0)
    }
}

/// Интерфейс движка воспроизведения.
///
/// Реализуется платформенным аудио-выводом; библиотека передает ему
/// готовый буфер и параметры, не управляя самим воспроизведением.
pub trait PlaybackSink {
    /// Воспроизводит буфер с указанными параметрами
    fn play(&mut self, buffer: &SampleBuffer, params: &PlaybackParams) -> Result<()>;
}
