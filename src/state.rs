//! The shared state block behind the interrupt handlers.
//!
//! [`EncoderState`] holds every field the edge, button and timer handlers
//! touch and implements their logic without any hardware. Each operation
//! that can change what the LED should show returns `Some(color)` when that
//! colour must be written right away; the caller owns the output.

use embassy_time::Instant;

use crate::color::{ColorEvent, ColorPresets, Rgb};
use crate::config::EncoderConfig;
use crate::debounce::Debouncer;
use crate::fade::{FadeEngine, FadeRate};
use crate::quadrature::{QuadratureDecoder, QuadratureSample};

#[derive(Debug, Clone, Copy)]
pub struct EncoderState {
    rotation: i32,
    decoder: QuadratureDecoder,
    presses: u16,
    debouncer: Debouncer,
    fade: FadeEngine,
    presets: ColorPresets,
    led_enabled: bool,
    changed: bool,
}

impl Default for EncoderState {
    fn default() -> Self {
        Self::new(&EncoderConfig::default(), true)
    }
}

impl EncoderState {
    /// Fresh state: zero counts, LEDs off, output enabled.
    ///
    /// # Arguments
    /// * `config` — Debounce window, presets and optional fade rate
    /// * `leds_connected` — Picks the fade rate when `config` leaves it
    ///   unset
    pub fn new(config: &EncoderConfig, leds_connected: bool) -> Self {
        Self {
            rotation: 0,
            decoder: QuadratureDecoder::new(),
            presses: 0,
            debouncer: Debouncer::new(config.debounce),
            fade: FadeEngine::new(config.initial_fade_rate(leds_connected)),
            presets: config.presets,
            led_enabled: true,
            changed: false,
        }
    }

    // ── Interrupt-side operations ────────────────────────────────────

    /// Handle an edge on either encoder line.
    pub fn rotate(&mut self, sample: QuadratureSample) -> Option<Rgb> {
        let direction = self.decoder.update(sample)?;
        self.rotation = self.rotation.saturating_add(direction.delta());
        self.changed = true;
        self.apply_event(direction.into())
    }

    /// Handle a rising edge on the button line at time `now`.
    pub fn press(&mut self, now: Instant) -> Option<Rgb> {
        if !self.debouncer.accept(now) {
            #[cfg(feature = "defmt")]
            defmt::trace!("button bounce dropped at {} ms", now.as_millis());
            return None;
        }
        self.presses = self.presses.saturating_add(1);
        self.changed = true;
        self.apply_event(ColorEvent::Press)
    }

    /// Handle one periodic timer tick.
    pub fn tick(&mut self) -> Option<Rgb> {
        if !self.led_enabled {
            return None;
        }
        self.fade.tick()
    }

    fn apply_event(&mut self, event: ColorEvent) -> Option<Rgb> {
        if !self.led_enabled {
            return None;
        }
        let color = self.presets.for_event(event);
        if self.fade.rate().is_enabled() {
            self.fade.retarget(color);
            None
        } else {
            self.fade.snap(color);
            Some(color)
        }
    }

    // ── Rotation and button ──────────────────────────────────────────

    /// Net detent steps, clockwise positive.
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    /// Overwrite the rotation count.
    pub fn set_rotation(&mut self, value: i32) {
        self.rotation = value;
    }

    /// Number of accepted presses since the last call; resets the count.
    pub fn take_presses(&mut self) -> u16 {
        core::mem::take(&mut self.presses)
    }

    /// Whether a rotation or press was accepted since the last call.
    pub fn take_changed(&mut self) -> bool {
        core::mem::take(&mut self.changed)
    }

    // ── LED control ──────────────────────────────────────────────────

    /// Whether colour output is switched on.
    pub fn led_enabled(&self) -> bool {
        self.led_enabled
    }

    /// Switch the LED output on or off.
    ///
    /// Returns the colour to write: all-off when disabling, the current
    /// actual colour when enabling.
    pub fn set_led_enabled(&mut self, enabled: bool) -> Option<Rgb> {
        self.led_enabled = enabled;
        if enabled {
            Some(self.fade.actual())
        } else {
            Some(Rgb::OFF)
        }
    }

    /// Current fade divisor.
    pub fn fade_rate(&self) -> FadeRate {
        self.fade.rate()
    }

    /// Change the fade divisor. Arming the tick source is up to the caller.
    pub fn set_fade_rate(&mut self, rate: FadeRate) {
        self.fade.set_rate(rate);
    }

    /// Show `color` directly, bypassing the presets.
    ///
    /// With fading enabled the colour appears on the next qualifying tick
    /// and then fades out like any other. Ignored while the LED is off.
    pub fn set_color(&mut self, color: Rgb) -> Option<Rgb> {
        if !self.led_enabled {
            return None;
        }
        self.fade.snap(color);
        if self.fade.rate().is_enabled() {
            None
        } else {
            Some(color)
        }
    }

    /// Colours started by each input event.
    pub fn presets(&self) -> &ColorPresets {
        &self.presets
    }

    /// Replace the preset for `event`.
    pub fn set_preset(&mut self, event: ColorEvent, color: Rgb) {
        self.presets.set(event, color);
    }

    /// Colour currently shown.
    pub fn color(&self) -> Rgb {
        self.fade.actual()
    }

    /// Colour being faded toward.
    pub fn target(&self) -> Rgb {
        self.fade.target()
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEBOUNCE_MS;

    fn immediate() -> EncoderState {
        EncoderState::new(&EncoderConfig::default(), false)
    }

    fn clockwise_step(state: &mut EncoderState) -> Option<Rgb> {
        // From the 00 rest position 00 -> 10 is one clockwise step.
        state.rotate(QuadratureSample::from_bits(0b00));
        state.rotate(QuadratureSample::from_bits(0b10))
    }

    fn press_at(state: &mut EncoderState, ms: u64) -> Option<Rgb> {
        state.press(Instant::from_millis(ms))
    }

    // ── Defaults ─────────────────────────────────────────────────────

    #[test]
    fn default_state() {
        let mut state = EncoderState::default();
        assert_eq!(state.rotation(), 0);
        assert_eq!(state.take_presses(), 0);
        assert!(!state.take_changed());
        assert!(state.led_enabled());
        assert_eq!(state.fade_rate(), FadeRate::FASTEST);
        assert_eq!(state.color(), Rgb::OFF);
        assert_eq!(state.target(), Rgb::OFF);
    }

    #[test]
    fn no_leds_defaults_to_immediate_mode() {
        assert_eq!(immediate().fade_rate(), FadeRate::DISABLED);
    }

    // ── Rotation ─────────────────────────────────────────────────────

    #[test]
    fn clockwise_step_increments_and_targets_preset() {
        let mut state = EncoderState::default();
        assert_eq!(clockwise_step(&mut state), None);
        assert_eq!(state.rotation(), 1);
        assert_eq!(state.target(), state.presets().clockwise);
        // Fading: the actual colour has not moved yet.
        assert_eq!(state.color(), Rgb::OFF);
        assert!(state.take_changed());
        assert!(!state.take_changed());
    }

    #[test]
    fn counter_clockwise_step_decrements_and_targets_preset() {
        let mut state = EncoderState::default();
        state.rotate(QuadratureSample::from_bits(0b01));
        assert_eq!(state.rotation(), -1);
        assert_eq!(state.target(), state.presets().counter_clockwise);
    }

    #[test]
    fn invalid_signature_changes_nothing() {
        let mut state = immediate();
        assert_eq!(state.rotate(QuadratureSample::from_bits(0b00)), None);
        assert_eq!(state.rotate(QuadratureSample::from_bits(0b11)), None);
        assert_eq!(state.rotation(), 0);
        assert_eq!(state.target(), Rgb::OFF);
        assert!(!state.take_changed());
    }

    #[test]
    fn rotation_saturates() {
        let mut state = EncoderState::default();
        state.set_rotation(i32::MAX);
        clockwise_step(&mut state);
        assert_eq!(state.rotation(), i32::MAX);
    }

    #[test]
    fn set_rotation_seeds_the_count() {
        let mut state = EncoderState::default();
        state.set_rotation(-40);
        clockwise_step(&mut state);
        assert_eq!(state.rotation(), -39);
    }

    // ── Button ───────────────────────────────────────────────────────

    #[test]
    fn press_counts_and_targets_preset() {
        let mut state = EncoderState::default();
        assert_eq!(press_at(&mut state, 1_000), None);
        assert_eq!(state.target(), state.presets().press);
        assert_eq!(state.take_presses(), 1);
        assert_eq!(state.take_presses(), 0);
    }

    #[test]
    fn bounced_press_is_dropped() {
        let mut state = EncoderState::default();
        press_at(&mut state, 1_000);
        state.take_changed();
        state.set_preset(ColorEvent::Press, Rgb::new(9, 9, 9));
        press_at(&mut state, 1_000 + DEBOUNCE_MS);
        assert_eq!(state.take_presses(), 1);
        assert!(!state.take_changed());
        assert_eq!(state.target(), Rgb::new(0, 255, 255));

        press_at(&mut state, 1_001 + DEBOUNCE_MS);
        assert_eq!(state.take_presses(), 1);
        assert_eq!(state.target(), Rgb::new(9, 9, 9));
    }

    // ── Immediate mode ───────────────────────────────────────────────

    #[test]
    fn immediate_mode_emits_on_the_same_call() {
        let mut state = immediate();
        let cw = state.presets().clockwise;
        assert_eq!(clockwise_step(&mut state), Some(cw));
        assert_eq!(state.color(), cw);

        let press = state.presets().press;
        assert_eq!(press_at(&mut state, 500), Some(press));
        assert_eq!(state.color(), press);

        assert_eq!(state.set_color(Rgb::new(1, 2, 3)), Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn immediate_mode_tick_is_inert() {
        let mut state = immediate();
        clockwise_step(&mut state);
        assert_eq!(state.tick(), None);
        assert_eq!(state.color(), state.presets().clockwise);
    }

    // ── Fade mode ────────────────────────────────────────────────────

    #[test]
    fn fade_mode_steps_on_tick() {
        let mut state = EncoderState::default();
        press_at(&mut state, 1_000);
        assert_eq!(state.tick(), Some(Rgb::new(254, 255, 255)));
        assert_eq!(state.tick(), Some(Rgb::new(253, 255, 255)));
    }

    #[test]
    fn set_color_in_fade_mode_waits_for_tick() {
        let mut state = EncoderState::default();
        assert_eq!(state.set_color(Rgb::new(50, 60, 70)), None);
        assert_eq!(state.color(), Rgb::new(50, 60, 70));
        assert_eq!(state.tick(), Some(Rgb::new(50, 60, 70)));
    }

    // ── LED output switch ────────────────────────────────────────────

    #[test]
    fn disabling_forces_off_and_freezes_colour() {
        let mut state = immediate();
        assert_eq!(state.set_led_enabled(false), Some(Rgb::OFF));

        assert_eq!(clockwise_step(&mut state), None);
        assert_eq!(press_at(&mut state, 1_000), None);
        assert_eq!(state.set_color(Rgb::new(0, 0, 0)), None);
        assert_eq!(state.tick(), None);
        assert_eq!(state.color(), Rgb::OFF);

        // Counting carries on regardless.
        assert_eq!(state.rotation(), 1);
        assert_eq!(state.take_presses(), 1);
    }

    #[test]
    fn enabling_restores_current_colour() {
        let mut state = immediate();
        state.set_color(Rgb::new(10, 20, 30));
        state.set_led_enabled(false);
        assert_eq!(state.set_led_enabled(true), Some(Rgb::new(10, 20, 30)));
        assert_eq!(clockwise_step(&mut state), Some(state.presets().clockwise));
    }
}
