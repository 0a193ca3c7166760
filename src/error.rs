//! Error types for the encoder driver.

use core::fmt;

use embedded_hal::{digital, pwm};

/// Errors raised by the hardware collaborators around the encoder.
///
/// Decoding and debouncing never fail on their own: unknown quadrature
/// signatures and bounced presses are dropped silently. The only failures
/// are pin reads and LED channel writes reported by the platform HAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderError {
    /// Reading an encoder line failed.
    Input(digital::ErrorKind),

    /// Writing an LED channel duty cycle failed.
    Output(pwm::ErrorKind),
}

impl EncoderError {
    /// Wrap any `embedded-hal` digital error.
    pub fn input<E: digital::Error>(error: E) -> Self {
        EncoderError::Input(error.kind())
    }

    /// Wrap any `embedded-hal` PWM error.
    pub fn output<E: pwm::Error>(error: E) -> Self {
        EncoderError::Output(error.kind())
    }
}

impl fmt::Display for EncoderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncoderError::Input(kind) => write!(f, "encoder line read failed: {}", kind),
            EncoderError::Output(kind) => write!(f, "LED channel write failed: {}", kind),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EncoderError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            EncoderError::Input(_) => defmt::write!(f, "Encoder line read failed"),
            EncoderError::Output(_) => defmt::write!(f, "LED channel write failed"),
        }
    }
}
