//! Timer-driven colour interpolation.
//!
//! Each of the three channels carries an `actual` value (what the LED shows)
//! and a `target`. On every qualifying tick `actual` moves one unit toward
//! `target`. Once a channel arrives, a target other than [`LED_OFF`] is
//! pushed one unit further, so the channel keeps dimming until it is off.
//! A preset therefore flashes in and fades back out rather than holding.
//!
//! ```text
//! target  0 ─┐                       ┌──────── 255
//! actual 255 ╲___________________/╱
//!              fade in          fade out
//! ```

use core::num::NonZeroU8;

use crate::color::Rgb;
use crate::constants::LED_OFF;

/// Fade speed as a tick divisor.
///
/// `0` disables fading: colours are applied immediately. `1` steps on every
/// tick, `n` on every n-th tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FadeRate(u8);

impl FadeRate {
    /// Immediate colour changes, no interpolation.
    pub const DISABLED: FadeRate = FadeRate(0);

    /// Step on every tick.
    pub const FASTEST: FadeRate = FadeRate(1);

    /// Step on every `divisor`-th tick; `0` disables fading.
    pub const fn new(divisor: u8) -> Self {
        Self(divisor)
    }

    /// Whether colour changes are interpolated.
    pub const fn is_enabled(&self) -> bool {
        self.0 != 0
    }

    /// The modulus for the tick gate; `None` when fading is disabled.
    pub fn divisor(&self) -> Option<NonZeroU8> {
        NonZeroU8::new(self.0)
    }

    /// Raw divisor.
    pub const fn get(&self) -> u8 {
        self.0
    }
}

impl From<u8> for FadeRate {
    fn from(divisor: u8) -> Self {
        Self(divisor)
    }
}

/// One LED channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel {
    pub actual: u8,
    pub target: u8,
}

impl Default for Channel {
    fn default() -> Self {
        Self {
            actual: LED_OFF,
            target: LED_OFF,
        }
    }
}

impl Channel {
    /// Move `actual` one unit toward `target`, then re-extend a reached
    /// target that is not yet off.
    pub fn advance(&mut self) {
        if self.actual < self.target {
            self.actual += 1;
        } else if self.actual > self.target {
            self.actual -= 1;
        }

        if self.target != LED_OFF && self.actual == self.target {
            self.target += 1;
        }
    }
}

/// Actual/target state of all three channels plus the tick gate.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FadeEngine {
    channels: [Channel; 3],
    rate: FadeRate,
    changed: bool,
    /// Position within the divisor cycle, always below the divisor.
    phase: u8,
}

impl Default for FadeEngine {
    fn default() -> Self {
        Self::new(FadeRate::FASTEST)
    }
}

impl FadeEngine {
    /// All channels off. The first qualifying tick writes that state out.
    pub fn new(rate: FadeRate) -> Self {
        Self {
            channels: [Channel::default(); 3],
            rate,
            changed: true,
            phase: 0,
        }
    }

    /// Current tick divisor.
    pub fn rate(&self) -> FadeRate {
        self.rate
    }

    /// Change the divisor. Channel state is kept, so a running fade
    /// continues at the new speed.
    pub fn set_rate(&mut self, rate: FadeRate) {
        self.rate = rate;
    }

    /// Red, green and blue channel state.
    pub fn channels(&self) -> &[Channel; 3] {
        &self.channels
    }

    /// Colour currently shown.
    pub fn actual(&self) -> Rgb {
        Rgb::new(
            self.channels[0].actual,
            self.channels[1].actual,
            self.channels[2].actual,
        )
    }

    /// Colour being faded toward.
    pub fn target(&self) -> Rgb {
        Rgb::new(
            self.channels[0].target,
            self.channels[1].target,
            self.channels[2].target,
        )
    }

    /// Start a transition toward `color` from whatever is shown now.
    pub fn retarget(&mut self, color: Rgb) {
        for (channel, value) in self.channels.iter_mut().zip(color.channels()) {
            channel.target = value;
        }
        self.changed = true;
    }

    /// Show `color` at once, with no transition.
    pub fn snap(&mut self, color: Rgb) {
        for (channel, value) in self.channels.iter_mut().zip(color.channels()) {
            channel.actual = value;
            channel.target = value;
        }
        self.changed = true;
    }

    /// Run one periodic tick.
    ///
    /// Returns the colour to write to the LEDs when the tick qualifies, and
    /// `None` when fading is disabled, when there is nothing to show, or when
    /// the rate divisor skips this tick.
    pub fn tick(&mut self) -> Option<Rgb> {
        let divisor = self.rate.divisor()?.get();

        let phase = self.phase % divisor;
        self.phase = (phase + 1) % divisor;

        if !self.changed && self.actual().is_off() {
            return None;
        }
        if phase != 0 {
            return None;
        }

        self.changed = false;
        for channel in &mut self.channels {
            channel.advance();
        }
        Some(self.actual())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_settled(engine: &mut FadeEngine, max_ticks: usize) -> usize {
        let mut emitted = 0;
        for _ in 0..max_ticks {
            if engine.tick().is_some() {
                emitted += 1;
            }
        }
        emitted
    }

    // ── FadeRate ─────────────────────────────────────────────────────

    #[test]
    fn zero_rate_is_disabled() {
        assert!(!FadeRate::DISABLED.is_enabled());
        assert!(FadeRate::DISABLED.divisor().is_none());
        assert_eq!(FadeRate::from(5).divisor().map(|d| d.get()), Some(5));
    }

    // ── Channel ──────────────────────────────────────────────────────

    #[test]
    fn channel_steps_down_toward_target() {
        let mut ch = Channel { actual: 255, target: 250 };
        ch.advance();
        assert_eq!(ch, Channel { actual: 254, target: 250 });
    }

    #[test]
    fn channel_steps_up_toward_target() {
        let mut ch = Channel { actual: 10, target: 20 };
        ch.advance();
        assert_eq!(ch, Channel { actual: 11, target: 20 });
    }

    #[test]
    fn reached_target_is_extended() {
        let mut ch = Channel { actual: 101, target: 100 };
        ch.advance();
        assert_eq!(ch, Channel { actual: 100, target: 101 });
        ch.advance();
        assert_eq!(ch, Channel { actual: 101, target: 102 });
    }

    #[test]
    fn off_target_is_never_extended() {
        let mut ch = Channel { actual: 254, target: 255 };
        ch.advance();
        assert_eq!(ch, Channel { actual: 255, target: 255 });
        ch.advance();
        assert_eq!(ch, Channel { actual: 255, target: 255 });
    }

    // ── Engine gating ────────────────────────────────────────────────

    #[test]
    fn disabled_engine_never_emits() {
        let mut engine = FadeEngine::new(FadeRate::DISABLED);
        engine.retarget(Rgb::new(0, 0, 0));
        assert_eq!(run_until_settled(&mut engine, 100), 0);
        assert_eq!(engine.actual(), Rgb::OFF);
    }

    #[test]
    fn idle_engine_emits_once_then_sleeps() {
        let mut engine = FadeEngine::default();
        // Fresh engine is flagged changed so the first tick pushes "off".
        assert_eq!(engine.tick(), Some(Rgb::OFF));
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.tick(), None);
    }

    #[test]
    fn divisor_skips_ticks() {
        let mut engine = FadeEngine::new(FadeRate::new(4));
        engine.retarget(Rgb::new(0, 255, 255));
        let emitted: usize = (0..16).filter(|_| engine.tick().is_some()).count();
        assert_eq!(emitted, 4);
        assert_eq!(engine.actual(), Rgb::new(251, 255, 255));
    }

    #[test]
    fn cadence_stays_regular_over_long_runs() {
        let mut engine = FadeEngine::new(FadeRate::new(7));
        engine.retarget(Rgb::new(0, 0, 0));
        for i in 0..700 {
            assert_eq!(engine.tick().is_some(), i % 7 == 0, "tick {}", i);
            assert!(engine.phase < 7);
        }
    }

    #[test]
    fn shrinking_divisor_keeps_phase_in_range() {
        let mut engine = FadeEngine::new(FadeRate::new(10));
        engine.retarget(Rgb::new(0, 255, 255));
        for _ in 0..6 {
            engine.tick();
        }
        assert_eq!(engine.phase, 6);

        engine.set_rate(FadeRate::new(3));
        // 6 is a multiple of 3, so the next tick steps.
        assert!(engine.tick().is_some());
        assert!(engine.tick().is_none());
        assert!(engine.tick().is_none());
        assert!(engine.tick().is_some());
    }

    // ── Full fade cycle ──────────────────────────────────────────────

    #[test]
    fn press_colour_fades_in_then_out() {
        let mut engine = FadeEngine::default();
        engine.retarget(Rgb::new(0, 255, 255));

        // 255 steps down to full brightness.
        for expected in (0..255u8).rev() {
            assert_eq!(engine.tick(), Some(Rgb::new(expected, 255, 255)));
        }
        assert_eq!(engine.channels()[0].target, 1);

        // 255 steps back up to off.
        for expected in 1..=255u8 {
            assert_eq!(engine.tick(), Some(Rgb::new(expected, 255, 255)));
        }
        assert_eq!(engine.target(), Rgb::OFF);

        // Settled and off: the gate closes.
        assert_eq!(engine.tick(), None);
    }

    #[test]
    fn all_channels_fade_symmetrically() {
        // Blue used to compare its target against itself and ran the wrong
        // way; every channel must follow the same path.
        let mut engine = FadeEngine::default();
        engine.retarget(Rgb::new(200, 200, 200));
        let mut steps = 0;
        while let Some(shown) = engine.tick() {
            assert_eq!(shown.r, shown.g);
            assert_eq!(shown.g, shown.b);
            steps += 1;
            assert!(steps <= 110, "fade did not settle");
        }
        // 55 steps in, 55 steps back out.
        assert_eq!(steps, 110);
        assert_eq!(engine.actual(), Rgb::OFF);
    }

    #[test]
    fn blue_channel_fades_up_from_below_target() {
        let mut engine = FadeEngine::default();
        engine.snap(Rgb::new(255, 255, 10));
        engine.retarget(Rgb::new(255, 255, 20));
        engine.tick();
        assert_eq!(engine.actual().b, 11);
    }

    #[test]
    fn snap_shows_colour_on_next_tick_then_fades_out() {
        let mut engine = FadeEngine::default();
        engine.snap(Rgb::new(100, 255, 255));
        // Actual == target != off, so the target is pushed and actual follows.
        assert_eq!(engine.tick(), Some(Rgb::new(100, 255, 255)));
        assert_eq!(engine.target(), Rgb::new(101, 255, 255));
        assert_eq!(engine.tick(), Some(Rgb::new(101, 255, 255)));
    }

    #[test]
    fn retarget_mid_fade_reverses_direction() {
        let mut engine = FadeEngine::default();
        engine.retarget(Rgb::new(0, 255, 255));
        for _ in 0..10 {
            engine.tick();
        }
        assert_eq!(engine.actual().r, 245);
        engine.retarget(Rgb::OFF);
        engine.tick();
        assert_eq!(engine.actual().r, 246);
    }

    #[test]
    fn settles_within_bound() {
        let mut engine = FadeEngine::default();
        engine.retarget(Rgb::new(0, 0, 0));
        let emitted = run_until_settled(&mut engine, 2_000);
        assert_eq!(emitted, 255 + 255);
        assert_eq!(engine.actual(), Rgb::OFF);
    }
}
