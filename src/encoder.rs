//! Interrupt-safe handle around [`EncoderState`].
//!
//! [`RgbEncoder`] owns the state block, the LED output and the fade tick
//! source behind a `critical_section::Mutex`. Every method takes `&self`, so
//! a single `&'static RgbEncoder` can be handed to the edge handlers, the
//! timer handler and the main loop at once. Nothing is global: a board with
//! two illuminated encoders simply builds two instances.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Instant;
use embedded_hal::digital::InputPin;

use crate::color::{ColorEvent, ColorPresets, Rgb};
use crate::config::EncoderConfig;
use crate::error::EncoderError;
use crate::fade::FadeRate;
use crate::led::LedSink;
use crate::quadrature::QuadratureSample;
use crate::state::EncoderState;
use crate::tick::{TickPhases, TickSource};

struct Inner<L, T> {
    state: EncoderState,
    led: L,
    ticker: T,
}

impl<L, T> Inner<L, T>
where
    L: LedSink,
{
    fn show(&mut self, color: Option<Rgb>) -> Result<(), EncoderError> {
        match color {
            Some(color) => self.led.write(color),
            None => Ok(()),
        }
    }
}

/// Illuminated rotary encoder with pushbutton.
///
/// # Wiring the handlers
///
/// | Event                         | Call                                   |
/// |-------------------------------|----------------------------------------|
/// | Any edge on line A or B       | [`on_rotate`](Self::on_rotate) or [`on_rotate_pins`](Self::on_rotate_pins) |
/// | Rising edge on the button     | [`on_button`](Self::on_button)         |
/// | Periodic tick (both phases)   | [`on_tick`](Self::on_tick)             |
///
/// # Example
///
/// ```ignore
/// static ENCODER: StaticCell<RgbEncoder<PwmLed<PwmOutput<'static>>, &'static TickGate>> =
///     StaticCell::new();
///
/// let encoder = ENCODER.init(RgbEncoder::new(led, &TICK_GATE, EncoderConfig::default())?);
///
/// // In the edge handler of either encoder line:
/// encoder.on_rotate_pins(&mut line_a, &mut line_b)?;
///
/// // In the main loop:
/// let position = encoder.rotation();
/// let presses = encoder.take_presses();
/// ```
pub struct RgbEncoder<L, T> {
    inner: Mutex<RefCell<Inner<L, T>>>,
}

impl<L, T> RgbEncoder<L, T>
where
    L: LedSink,
    T: TickSource,
{
    /// Build the driver, blank the LEDs and arm the tick source if fading.
    ///
    /// # Errors
    /// * [`EncoderError::Output`] if blanking the LEDs fails
    pub fn new(mut led: L, mut ticker: T, config: EncoderConfig) -> Result<Self, EncoderError> {
        let state = EncoderState::new(&config, led.is_connected());

        led.write(Rgb::OFF)?;
        if state.fade_rate().is_enabled() {
            ticker.start(TickPhases::default());
        } else {
            ticker.stop();
        }

        Ok(Self {
            inner: Mutex::new(RefCell::new(Inner { state, led, ticker })),
        })
    }

    fn with<R>(&self, f: impl FnOnce(&mut Inner<L, T>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    // -----------------------------------------------------------------------
    // Interrupt handlers
    // -----------------------------------------------------------------------

    /// Decode an edge from an already sampled pin pair.
    ///
    /// Valid transitions step the rotation count by one and start the
    /// matching preset colour. In immediate mode the new colour is written
    /// before returning.
    ///
    /// # Arguments
    /// * `sample` — Levels of lines A and B read right after the edge
    ///
    /// # Errors
    /// * [`EncoderError::Output`] if writing the colour fails; the count is
    ///   already updated
    pub fn on_rotate(&self, sample: QuadratureSample) -> Result<(), EncoderError> {
        self.with(|inner| {
            let color = inner.state.rotate(sample);
            inner.show(color)
        })
    }

    /// Sample both encoder lines and decode the edge.
    ///
    /// # Arguments
    /// * `a` — Encoder line A
    /// * `b` — Encoder line B
    ///
    /// # Errors
    /// * [`EncoderError::Input`] if either line cannot be read
    /// * [`EncoderError::Output`] if writing the colour fails
    pub fn on_rotate_pins<A, B>(&self, a: &mut A, b: &mut B) -> Result<(), EncoderError>
    where
        A: InputPin,
        B: InputPin,
    {
        let sample = QuadratureSample::read(a, b)?;
        self.on_rotate(sample)
    }

    /// Handle a rising edge of the button line seen at `now`.
    ///
    /// Edges closer than the debounce window to the last accepted press are
    /// dropped.
    ///
    /// # Errors
    /// * [`EncoderError::Output`] if writing the colour fails
    pub fn on_button(&self, now: Instant) -> Result<(), EncoderError> {
        self.with(|inner| {
            let color = inner.state.press(now);
            inner.show(color)
        })
    }

    /// Run one fade step. Call on both phases of the tick source.
    ///
    /// # Errors
    /// * [`EncoderError::Output`] if writing the colour fails
    pub fn on_tick(&self) -> Result<(), EncoderError> {
        self.with(|inner| {
            let color = inner.state.tick();
            inner.show(color)
        })
    }

    // -----------------------------------------------------------------------
    // Host accessors
    // -----------------------------------------------------------------------

    /// Net detent steps since construction or the last
    /// [`set_rotation`](Self::set_rotation). Clockwise counts up.
    pub fn rotation(&self) -> i32 {
        self.with(|inner| inner.state.rotation())
    }

    /// Overwrite the rotation count.
    ///
    /// # Example
    /// ```ignore
    /// // Re-zero the knob
    /// encoder.set_rotation(0);
    /// ```
    pub fn set_rotation(&self, value: i32) {
        self.with(|inner| inner.state.set_rotation(value))
    }

    /// Presses since the last call. Read and reset happen atomically, so a
    /// press landing in between is never lost.
    pub fn take_presses(&self) -> u16 {
        self.with(|inner| inner.state.take_presses())
    }

    /// Whether anything was rotated or pressed since the last call.
    pub fn take_changed(&self) -> bool {
        self.with(|inner| inner.state.take_changed())
    }

    /// Whether colour output is switched on.
    pub fn led_enabled(&self) -> bool {
        self.with(|inner| inner.state.led_enabled())
    }

    /// Switch the LED output on or off.
    ///
    /// Off forces all channels dark and freezes every colour operation until
    /// the output is switched back on, which rewrites the current colour.
    ///
    /// # Errors
    /// * [`EncoderError::Output`] if writing the colour fails
    pub fn set_led_enabled(&self, enabled: bool) -> Result<(), EncoderError> {
        #[cfg(feature = "defmt")]
        defmt::debug!("LED output {}", if enabled { "on" } else { "off" });

        self.with(|inner| {
            let color = inner.state.set_led_enabled(enabled);
            inner.show(color)
        })
    }

    /// Current fade divisor.
    pub fn fade_rate(&self) -> FadeRate {
        self.with(|inner| inner.state.fade_rate())
    }

    /// Set the fade divisor; [`FadeRate::DISABLED`] switches to immediate
    /// colour changes.
    ///
    /// Both tick phases are armed or disarmed together.
    pub fn set_fade_rate(&self, rate: FadeRate) {
        #[cfg(feature = "defmt")]
        defmt::debug!("fade rate set to {}", rate.get());

        self.with(|inner| {
            inner.state.set_fade_rate(rate);
            if rate.is_enabled() {
                inner.ticker.start(TickPhases::default());
            } else {
                inner.ticker.stop();
            }
        })
    }

    /// Show `color` now (immediate mode) or from the next fade tick.
    ///
    /// Ignored while the LED output is off.
    ///
    /// # Errors
    /// * [`EncoderError::Output`] if writing the colour fails
    pub fn set_color(&self, color: Rgb) -> Result<(), EncoderError> {
        self.with(|inner| {
            let color = inner.state.set_color(color);
            inner.show(color)
        })
    }

    /// Colour started by an accepted button press.
    pub fn set_press_color(&self, color: Rgb) {
        self.set_preset(ColorEvent::Press, color)
    }

    /// Colour started by a clockwise step.
    pub fn set_clockwise_color(&self, color: Rgb) {
        self.set_preset(ColorEvent::Clockwise, color)
    }

    /// Colour started by a counterclockwise step.
    pub fn set_counter_clockwise_color(&self, color: Rgb) {
        self.set_preset(ColorEvent::CounterClockwise, color)
    }

    /// Replace the preset for `event`. Takes effect on the next such event.
    ///
    /// # Arguments
    /// * `event` — Which input the colour belongs to
    /// * `color` — Inverted channel values, `0` full and `255` off
    pub fn set_preset(&self, event: ColorEvent, color: Rgb) {
        self.with(|inner| inner.state.set_preset(event, color))
    }

    /// Snapshot of all three presets.
    pub fn presets(&self) -> ColorPresets {
        self.with(|inner| *inner.state.presets())
    }

    /// Colour currently shown.
    pub fn color(&self) -> Rgb {
        self.with(|inner| inner.state.color())
    }

    /// Colour the fade is heading for.
    pub fn target(&self) -> Rgb {
        self.with(|inner| inner.state.target())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
