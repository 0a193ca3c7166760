//! RGB values and the event-triggered colour presets.

use crate::constants::{
    DEFAULT_CLOCKWISE_COLOR, DEFAULT_COUNTER_CLOCKWISE_COLOR, DEFAULT_PRESS_COLOR, LED_OFF,
};
use crate::quadrature::Direction;

/// Three 8-bit channel brightnesses, 255 = off and 0 = fully on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// All three channels off.
    pub const OFF: Rgb = Rgb::new(LED_OFF, LED_OFF, LED_OFF);

    /// Colour from inverted channel values, `0` full and `255` off.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Whether every channel is dark.
    pub const fn is_off(&self) -> bool {
        self.r == LED_OFF && self.g == LED_OFF && self.b == LED_OFF
    }

    /// Channels in red, green, blue order.
    pub const fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Inverse of [`channels`](Self::channels).
    pub const fn from_channels(channels: [u8; 3]) -> Self {
        Self::new(channels[0], channels[1], channels[2])
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::OFF
    }
}

/// An input event that selects a colour preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorEvent {
    Press,
    Clockwise,
    CounterClockwise,
}

impl From<Direction> for ColorEvent {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Clockwise => ColorEvent::Clockwise,
            Direction::CounterClockwise => ColorEvent::CounterClockwise,
        }
    }
}

/// Colours assigned to the fade targets when each event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorPresets {
    pub press: Rgb,
    pub clockwise: Rgb,
    pub counter_clockwise: Rgb,
}

impl Default for ColorPresets {
    fn default() -> Self {
        Self {
            press: DEFAULT_PRESS_COLOR,
            clockwise: DEFAULT_CLOCKWISE_COLOR,
            counter_clockwise: DEFAULT_COUNTER_CLOCKWISE_COLOR,
        }
    }
}

impl ColorPresets {
    /// Preset started by `event`.
    pub fn for_event(&self, event: ColorEvent) -> Rgb {
        match event {
            ColorEvent::Press => self.press,
            ColorEvent::Clockwise => self.clockwise,
            ColorEvent::CounterClockwise => self.counter_clockwise,
        }
    }

    /// Replace the preset started by `event`.
    pub fn set(&mut self, event: ColorEvent, color: Rgb) {
        match event {
            ColorEvent::Press => self.press = color,
            ColorEvent::Clockwise => self.clockwise = color,
            ColorEvent::CounterClockwise => self.counter_clockwise = color,
        }
    }
}
