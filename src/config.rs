//! Construction parameters.

use embassy_time::Duration;

use crate::color::ColorPresets;
use crate::constants::{DEBOUNCE_MS, DEFAULT_FADE_RATE};
use crate::fade::FadeRate;

/// Settings applied when an [`RgbEncoder`](crate::RgbEncoder) is built.
///
/// Pin assignment stays with the platform code; this only carries what
/// changes the driver's behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// The board has RC debounce on the encoder lines. When `false` the
    /// platform should enable the MCU's internal pull-ups instead.
    pub hardware_debounce: bool,
    /// Minimum time between accepted button presses.
    pub debounce: Duration,
    /// Initial fade divisor. `None` picks [`DEFAULT_FADE_RATE`] when any LED
    /// channel is connected and disables fading otherwise.
    pub fade_rate: Option<FadeRate>,
    /// Initial colours for press, clockwise and counterclockwise events.
    pub presets: ColorPresets,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            hardware_debounce: false,
            debounce: Duration::from_millis(DEBOUNCE_MS),
            fade_rate: None,
            presets: ColorPresets::default(),
        }
    }
}

impl EncoderConfig {
    /// Whether the encoder lines need the internal pull-ups.
    pub fn needs_pull_up(&self) -> bool {
        !self.hardware_debounce
    }

    /// Fade rate to start with, given whether LEDs are attached.
    pub fn initial_fade_rate(&self, leds_connected: bool) -> FadeRate {
        match self.fade_rate {
            Some(rate) => rate,
            None if leds_connected => FadeRate::new(DEFAULT_FADE_RATE),
            None => FadeRate::DISABLED,
        }
    }
}
