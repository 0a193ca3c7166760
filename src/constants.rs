//! Fixed values shared by the decoder, debouncer and fade engine.
//!
//! The quadrature signature tables are indexed by a 4-bit value built as
//! `(previous_sample << 2) | current_sample`, where each sample packs the
//! A line into bit 1 and the B line into bit 0.

use crate::color::Rgb;

// ---------------------------------------------------------------------------
// Quadrature signatures
// ---------------------------------------------------------------------------

/// Signatures produced by one valid clockwise step.
pub const CLOCKWISE_SIGNATURES: [u8; 4] = [0b1101, 0b0100, 0b0010, 0b1011];

/// Signatures produced by one valid counterclockwise step.
pub const COUNTER_CLOCKWISE_SIGNATURES: [u8; 4] = [0b1110, 0b0111, 0b0001, 0b1000];

// ---------------------------------------------------------------------------
// Pushbutton
// ---------------------------------------------------------------------------

/// Minimum time between two accepted button presses, in milliseconds.
pub const DEBOUNCE_MS: u64 = 150;

// ---------------------------------------------------------------------------
// LED channels
// ---------------------------------------------------------------------------

/// Channel brightness that turns an LED fully off.
///
/// The LEDs share a common anode, so the PWM value is inverted: 255 is off
/// and 0 is full brightness.
pub const LED_OFF: u8 = 255;

/// Channel brightness for a fully lit LED.
pub const LED_FULL: u8 = 0;

/// Default colour shown on a button press (pure red).
pub const DEFAULT_PRESS_COLOR: Rgb = Rgb::new(LED_FULL, LED_OFF, LED_OFF);

/// Default colour shown on a clockwise step (pure green).
pub const DEFAULT_CLOCKWISE_COLOR: Rgb = Rgb::new(LED_OFF, LED_FULL, LED_OFF);

/// Default colour shown on a counterclockwise step (pure blue).
pub const DEFAULT_COUNTER_CLOCKWISE_COLOR: Rgb = Rgb::new(LED_OFF, LED_OFF, LED_FULL);

// ---------------------------------------------------------------------------
// Fade timer
// ---------------------------------------------------------------------------

/// Fade divisor used when at least one LED channel is connected.
pub const DEFAULT_FADE_RATE: u8 = 1;

/// Compare value for the first periodic tick phase.
pub const TICK_PHASE_A: u8 = 0x40;

/// Compare value for the second periodic tick phase, half a period after A.
pub const TICK_PHASE_B: u8 = 0xC0;
