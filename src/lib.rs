//! Interrupt-driven driver for an illuminated RGB rotary encoder.
//!
//! Targets the common 12 mm quadrature encoders with a clear shaft, an RGB
//! LED behind it and a pushbutton (EC12-style parts). The driver decodes
//! rotation from the two encoder lines, debounces the button, and fades the
//! LED toward a per-event colour on a periodic tick.
//!
//! # Architecture
//!
//! - **[`EncoderState`]** holds the shared state block and all decoding,
//!   debouncing and fading logic. It touches no hardware and is what the
//!   unit tests exercise.
//! - **[`RgbEncoder`]** wraps that state together with the LED output
//!   ([`LedSink`]) and the fade tick source ([`TickSource`]) in a
//!   `critical_section::Mutex`, and exposes the interrupt handlers and host
//!   accessors on `&self`.
//! - **`task`** *(feature)* provides async loops for platforms that expose
//!   pins through `embedded-hal-async` instead of raw interrupt vectors.
//!
//! # Quick start
//!
//! ```ignore
//! use rgb_encoder_driver::{EncoderConfig, PwmLed, RgbEncoder, TickGate};
//!
//! static GATE: TickGate = TickGate::new();
//!
//! let led = PwmLed::new(Some(red), Some(green), Some(blue));
//! let encoder = RgbEncoder::new(led, &GATE, EncoderConfig::default())?;
//!
//! // Edge interrupt on either encoder line:
//! encoder.on_rotate_pins(&mut line_a, &mut line_b)?;
//! // Rising edge on the button:
//! encoder.on_button(Instant::now())?;
//! // Periodic tick, twice per millisecond:
//! encoder.on_tick()?;
//!
//! // Host side:
//! let position = encoder.rotation();
//! let presses = encoder.take_presses();
//! ```
//!
//! # Features
//!
//! - **`defmt`** — [`defmt::Format`] implementations and driver logging.
//! - **`task`** — async handler loops built on `embedded-hal-async` and
//!   `embassy-time`.

#![no_std]

#[cfg(test)]
extern crate std;

pub use color::{ColorEvent, ColorPresets, Rgb};
pub use config::EncoderConfig;
pub use debounce::Debouncer;
pub use encoder::RgbEncoder;
pub use error::EncoderError;
pub use fade::{Channel, FadeEngine, FadeRate};
pub use led::{LedSink, PwmLed};
pub use quadrature::{Direction, QuadratureDecoder, QuadratureSample};
pub use state::EncoderState;
pub use tick::{TickGate, TickPhases, TickSource};

pub mod color;
pub mod config;
pub mod constants;
pub mod debounce;
mod encoder;
mod error;
pub mod fade;
mod led;
pub mod quadrature;
mod state;
#[cfg(feature = "task")]
pub mod task;
mod tick;
