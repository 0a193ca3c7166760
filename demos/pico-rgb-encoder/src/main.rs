//! Illuminated encoder demo
//!
//! Drives an EC12-style RGB rotary encoder from a Raspberry Pi Pico 2.
//! Turning the knob flashes green (clockwise) or blue (counterclockwise),
//! pressing it flashes red. Every press also steps the fade speed through
//! fast → slow → off (immediate colours) and back.
//!
//! # Wiring
//!
//! | Signal     | Pico 2 Pin | Notes                              |
//! |------------|------------|------------------------------------|
//! | ENC A      | GP2        | Pull-up unless RC debounce fitted  |
//! | ENC B      | GP3        | Pull-up unless RC debounce fitted  |
//! | BUTTON     | GP4        | Active-high, pull-down enabled     |
//! | LED RED    | GP10       | PWM5 A, common anode               |
//! | LED GREEN  | GP11       | PWM5 B, common anode               |
//! | LED BLUE   | GP12       | PWM6 A, common anode               |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::pwm::{self, Pwm, PwmOutput};
use embassy_time::{Duration, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use rgb_encoder_driver::task::{button_task, fade_task, rotation_task, FADE_TICK_PERIOD};
use rgb_encoder_driver::{EncoderConfig, FadeRate, PwmLed, RgbEncoder, TickGate};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

type Encoder = RgbEncoder<PwmLed<PwmOutput<'static>>, &'static TickGate>;

/// Opened and closed by the driver when fading is switched on or off.
static TICK_GATE: TickGate = TickGate::new();

static ENCODER: StaticCell<Encoder> = StaticCell::new();

/// Fade speeds cycled by the button.
const FADE_STEPS: [FadeRate; 3] = [FadeRate::FASTEST, FadeRate::new(6), FadeRate::DISABLED];

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[embassy_executor::task]
async fn rotation(encoder: &'static Encoder, line_a: Input<'static>, line_b: Input<'static>) {
    rotation_task(encoder, line_a, line_b).await;
}

#[embassy_executor::task]
async fn button(encoder: &'static Encoder, button: Input<'static>) {
    button_task(encoder, button).await;
}

#[embassy_executor::task]
async fn fade(encoder: &'static Encoder) {
    fade_task(encoder, &TICK_GATE, FADE_TICK_PERIOD).await;
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("pico-rgb-encoder starting");

    let config = EncoderConfig::default();

    // --- Encoder lines and button ---
    let pull = if config.needs_pull_up() { Pull::Up } else { Pull::None };
    let line_a = Input::new(p.PIN_2, pull);
    let line_b = Input::new(p.PIN_3, pull);
    let push = Input::new(p.PIN_4, Pull::Down);

    // --- LED channels, 8-bit PWM so duty == channel value ---
    let mut pwm_config = pwm::Config::default();
    pwm_config.top = 255;
    let (red, green) = Pwm::new_output_ab(p.PWM_SLICE5, p.PIN_10, p.PIN_11, pwm_config.clone()).split();
    let (blue, _) = Pwm::new_output_a(p.PWM_SLICE6, p.PIN_12, pwm_config).split();
    let led = PwmLed::new(red, green, blue);

    let encoder = match RgbEncoder::new(led, &TICK_GATE, config) {
        Ok(encoder) => ENCODER.init(encoder),
        Err(e) => {
            error!("Encoder init failed: {}", e);
            return;
        }
    };

    spawner.spawn(unwrap!(rotation(encoder, line_a, line_b)));
    spawner.spawn(unwrap!(button(encoder, push)));
    spawner.spawn(unwrap!(fade(encoder)));

    info!("Encoder demo started, turn or press the knob");

    // Host loop: poll at our own cadence, independent of the handlers.
    let mut fade_step = 0;
    loop {
        Timer::after(Duration::from_millis(50)).await;

        if !encoder.take_changed() {
            continue;
        }

        let presses = encoder.take_presses();
        if presses > 0 {
            fade_step = (fade_step + usize::from(presses)) % FADE_STEPS.len();
            encoder.set_fade_rate(FADE_STEPS[fade_step]);
            info!("{} press(es), fade rate now {}", presses, FADE_STEPS[fade_step].get());
        }

        info!("Position: {}", encoder.rotation());
    }
}
