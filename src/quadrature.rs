//! Quadrature decoding for the two encoder lines.
//!
//! Every edge on either line produces a [`QuadratureSample`]. The decoder
//! joins it with the previous sample into a 4-bit signature and classifies
//! that signature against the clockwise and counterclockwise tables in
//! [`constants`](crate::constants). Anything else (a repeated sample, a
//! skipped state, contact bounce) is ignored.

use embedded_hal::digital::InputPin;

use crate::constants::{CLOCKWISE_SIGNATURES, COUNTER_CLOCKWISE_SIGNATURES};
use crate::error::EncoderError;

/// Rotation direction of one valid quadrature step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Signed step applied to the rotation count.
    pub fn delta(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// Levels of both encoder lines packed as `0b_AB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureSample(u8);

impl QuadratureSample {
    /// Build a sample from the two line levels.
    pub const fn new(a: bool, b: bool) -> Self {
        Self(((a as u8) << 1) | b as u8)
    }

    /// Build a sample from the low two bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b11)
    }

    /// Sample both encoder lines.
    ///
    /// # Errors
    /// * [`EncoderError::Input`] if either line cannot be read
    pub fn read<A, B>(a: &mut A, b: &mut B) -> Result<Self, EncoderError>
    where
        A: InputPin,
        B: InputPin,
    {
        let a = a.is_high().map_err(EncoderError::input)?;
        let b = b.is_high().map_err(EncoderError::input)?;
        Ok(Self::new(a, b))
    }

    /// Packed levels, line A in bit 1 and line B in bit 0.
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Classify a 4-bit `(previous << 2) | current` signature.
pub fn classify(signature: u8) -> Option<Direction> {
    let signature = signature & 0b1111;
    if CLOCKWISE_SIGNATURES.contains(&signature) {
        Some(Direction::Clockwise)
    } else if COUNTER_CLOCKWISE_SIGNATURES.contains(&signature) {
        Some(Direction::CounterClockwise)
    } else {
        None
    }
}

/// Transition-history decoder.
///
/// Holds only the last observed sample. It must be fed from a single
/// context; the edge handler of both lines is never re-entered.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureDecoder {
    last: QuadratureSample,
}

impl QuadratureDecoder {
    /// Decoder with both lines assumed low.
    pub const fn new() -> Self {
        Self {
            last: QuadratureSample::from_bits(0),
        }
    }

    /// Feed the next sample and return the step it completes, if any.
    ///
    /// The sample becomes the new history whatever the classification.
    pub fn update(&mut self, sample: QuadratureSample) -> Option<Direction> {
        let signature = (self.last.bits() << 2) | sample.bits();
        self.last = sample;
        classify(signature)
    }

    /// Last sample seen by [`update`](Self::update).
    pub fn last_sample(&self) -> QuadratureSample {
        self.last
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
