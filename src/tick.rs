//! The periodic tick that drives the fade engine.
//!
//! On a typical MCU this is a free-running hardware timer with two compare
//! channels set half a period apart, so the fade handler runs twice per
//! timer period. The driver only needs to switch it on and off as a unit.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::constants::{TICK_PHASE_A, TICK_PHASE_B};

/// Compare offsets of the two tick interrupts within one timer period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickPhases {
    pub a: u8,
    pub b: u8,
}

impl Default for TickPhases {
    fn default() -> Self {
        Self {
            a: TICK_PHASE_A,
            b: TICK_PHASE_B,
        }
    }
}

/// A periodic interrupt source that can be armed and disarmed.
///
/// Implementations must switch both phases in one step (typically with
/// interrupts masked) so the fade handler never runs at half rate.
pub trait TickSource {
    /// Arm both compare phases.
    fn start(&mut self, phases: TickPhases);

    /// Disarm both compare phases.
    fn stop(&mut self);
}

impl<T: TickSource + ?Sized> TickSource for &mut T {
    fn start(&mut self, phases: TickPhases) {
        (**self).start(phases)
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}

/// Software tick source for setups where the tick is a task loop.
///
/// The loop checks [`is_running`](Self::is_running) before calling the fade
/// handler. Phases are irrelevant here; the loop period sets the cadence.
#[derive(Debug, Default)]
pub struct TickGate {
    running: AtomicBool,
}

impl TickGate {
    /// Closed gate. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
        }
    }

    /// Whether the fade loop should call the handler.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

impl TickSource for &TickGate {
    fn start(&mut self, _phases: TickPhases) {
        self.running.store(true, Ordering::Relaxed);
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}
