//! Async loops that drive the handlers when the platform hands out
//! `embedded-hal-async` pins instead of raw interrupt vectors.
//!
//! These are plain `async fn`s, **not** Embassy `#[task]`s. Embassy tasks
//! cannot be generic, so callers wrap each one in a thin concrete task:
//!
//! ```ignore
//! #[embassy_executor::task]
//! async fn fade(encoder: &'static Encoder, gate: &'static TickGate) {
//!     fade_task(encoder, gate, FADE_TICK_PERIOD).await;
//! }
//! ```

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Ticker};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

use crate::encoder::RgbEncoder;
use crate::error::EncoderError;
use crate::led::LedSink;
use crate::tick::{TickGate, TickSource};

/// Period between fade ticks: two ticks per millisecond, matching the two
/// compare phases of a hardware tick source.
pub const FADE_TICK_PERIOD: Duration = Duration::from_micros(500);

// ---------------------------------------------------------------------------
// Single steps
// ---------------------------------------------------------------------------

/// Wait for one edge on either encoder line, then sample and decode.
///
/// # Errors
/// * [`EncoderError::Input`] if waiting on or reading a line fails
/// * [`EncoderError::Output`] if writing the colour fails
pub async fn rotation_edge<L, T, A, B>(
    encoder: &RgbEncoder<L, T>,
    line_a: &mut A,
    line_b: &mut B,
) -> Result<(), EncoderError>
where
    L: LedSink,
    T: TickSource,
    A: InputPin + Wait,
    B: InputPin + Wait,
{
    match select(line_a.wait_for_any_edge(), line_b.wait_for_any_edge()).await {
        Either::First(result) => result.map_err(EncoderError::input)?,
        Either::Second(result) => result.map_err(EncoderError::input)?,
    }
    encoder.on_rotate_pins(line_a, line_b)
}

/// Wait for one rising edge of the button and hand it to the debouncer.
///
/// # Errors
/// * [`EncoderError::Input`] if waiting on the line fails
/// * [`EncoderError::Output`] if writing the colour fails
pub async fn button_press<L, T, P>(encoder: &RgbEncoder<L, T>, button: &mut P) -> Result<(), EncoderError>
where
    L: LedSink,
    T: TickSource,
    P: Wait,
{
    button.wait_for_rising_edge().await.map_err(EncoderError::input)?;
    encoder.on_button(Instant::now())
}

/// Run one fade tick if `gate` is open.
///
/// # Returns
/// `true` if the fade handler ran, `false` if the gate was closed.
///
/// # Errors
/// * [`EncoderError::Output`] if writing the colour fails
pub fn fade_step<L, T>(encoder: &RgbEncoder<L, T>, gate: &TickGate) -> Result<bool, EncoderError>
where
    L: LedSink,
    T: TickSource,
{
    if !gate.is_running() {
        return Ok(false);
    }
    encoder.on_tick().map(|()| true)
}

// ---------------------------------------------------------------------------
// Loops
// ---------------------------------------------------------------------------

/// Decode every edge on either encoder line. Failures are logged and the
/// loop carries on with the next edge.
pub async fn rotation_task<L, T, A, B>(encoder: &RgbEncoder<L, T>, mut line_a: A, mut line_b: B)
where
    L: LedSink,
    T: TickSource,
    A: InputPin + Wait,
    B: InputPin + Wait,
{
    loop {
        if let Err(_e) = rotation_edge(encoder, &mut line_a, &mut line_b).await {
            #[cfg(feature = "defmt")]
            defmt::warn!("rotation handler failed: {}", _e);
        }
    }
}

/// Feed every rising edge of the button line to the debouncer.
pub async fn button_task<L, T, P>(encoder: &RgbEncoder<L, T>, mut button: P)
where
    L: LedSink,
    T: TickSource,
    P: Wait,
{
    loop {
        if let Err(_e) = button_press(encoder, &mut button).await {
            #[cfg(feature = "defmt")]
            defmt::warn!("button handler failed: {}", _e);
        }
    }
}

/// Run the fade engine every `period` while `gate` is open.
///
/// `gate` must be the [`TickGate`] given to the encoder as its tick source,
/// so [`RgbEncoder::set_fade_rate`] can pause this loop.
pub async fn fade_task<L, T>(encoder: &RgbEncoder<L, T>, gate: &TickGate, period: Duration)
where
    L: LedSink,
    T: TickSource,
{
    let mut ticker = Ticker::every(period);
    loop {
        ticker.next().await;
        if let Err(_e) = fade_step(encoder, gate) {
            #[cfg(feature = "defmt")]
            defmt::warn!("fade tick failed: {}", _e);
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
