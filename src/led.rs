//! Output side: where channel values end up.

use embedded_hal::pwm::SetDutyCycle;

use crate::color::Rgb;
use crate::constants::LED_OFF;
use crate::error::EncoderError;

/// Destination for the three channel values.
pub trait LedSink {
    /// Show `color`. Values use the inverted convention, 255 = off.
    fn write(&mut self, color: Rgb) -> Result<(), EncoderError>;

    /// Whether any channel is wired. Fading is pointless without LEDs.
    fn is_connected(&self) -> bool {
        true
    }
}

impl<S: LedSink + ?Sized> LedSink for &mut S {
    fn write(&mut self, color: Rgb) -> Result<(), EncoderError> {
        (**self).write(color)
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }
}

/// RGB LED on up to three PWM channels.
///
/// A channel left as `None` is not wired and is skipped on write. The value
/// is written as a `value / 255` duty fraction, so 255 keeps the pin high
/// and, with the common-anode LED, dark.
pub struct PwmLed<P> {
    channels: [Option<P>; 3],
}

impl<P> PwmLed<P>
where
    P: SetDutyCycle,
{
    /// Wrap the PWM channels, `None` for any colour that is not wired.
    ///
    /// Each channel should run with its full-scale duty meaning "pin high".
    pub fn new(red: Option<P>, green: Option<P>, blue: Option<P>) -> Self {
        Self {
            channels: [red, green, blue],
        }
    }

    /// Give the PWM channels back.
    pub fn release(self) -> [Option<P>; 3] {
        self.channels
    }
}

impl<P> LedSink for PwmLed<P>
where
    P: SetDutyCycle,
{
    fn write(&mut self, color: Rgb) -> Result<(), EncoderError> {
        for (channel, value) in self.channels.iter_mut().zip(color.channels()) {
            if let Some(pwm) = channel {
                pwm.set_duty_cycle_fraction(u16::from(value), u16::from(LED_OFF))
                    .map_err(EncoderError::output)?;
            }
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.channels.iter().any(Option::is_some)
    }
}
