/*++

Licensed under the Apache-2.0 license.

File Name:

    touch.rs

Abstract:

    File contains the physical presence gate built on the touch sensor and
    the one-shot timer.

--*/

use crate::memory_layout::{
    TIMER_CTRL, TIMER_CTRL_START, TIMER_CTRL_STOP, TIMER_PRESCALER, TIMER_STATUS,
    TIMER_STATUS_RUNNING, TIMER_TIMER, TK1_CPU_FREQUENCY, TOUCH_STATUS, TOUCH_STATUS_EVENT,
};
use crate::tk1::{Led, Tk1};
use crate::{cprintln, mmio};

/// Outcome of a presence wait
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Presence {
    Confirmed,
    TimedOut,
}

/// Blocks until the user confirms presence or `timeout_secs` elapse
pub trait PresenceGate {
    fn await_presence(&mut self, timeout_secs: u32) -> Presence;
}

pub struct Touch {
    tk1: Tk1,
    idle: Led,
}

impl Touch {
    /// # Safety
    ///
    /// Only valid on TK1 hardware (or its emulator); the timer and touch
    /// register blocks must not be driven by anyone else.
    pub unsafe fn new(tk1: Tk1, idle: Led) -> Self {
        Self { tk1, idle }
    }

    fn touched(&self) -> bool {
        unsafe { mmio::read32(TOUCH_STATUS) & TOUCH_STATUS_EVENT != 0 }
    }

    fn clear_touch(&mut self) {
        unsafe { mmio::write32(TOUCH_STATUS, 0) }
    }

    fn timer_running(&self) -> bool {
        unsafe { mmio::read32(TIMER_STATUS) & TIMER_STATUS_RUNNING != 0 }
    }

    fn timer_remaining(&self) -> u32 {
        unsafe { mmio::read32(TIMER_TIMER) }
    }

    fn start_timer(&mut self, secs: u32) {
        unsafe {
            mmio::write32(TIMER_CTRL, TIMER_CTRL_STOP);
            mmio::write32(TIMER_PRESCALER, TK1_CPU_FREQUENCY);
            mmio::write32(TIMER_TIMER, secs);
            mmio::write32(TIMER_CTRL, TIMER_CTRL_START);
        }
    }

    fn stop_timer(&mut self) {
        unsafe { mmio::write32(TIMER_CTRL, TIMER_CTRL_STOP) }
    }
}

impl PresenceGate for Touch {
    fn await_presence(&mut self, timeout_secs: u32) -> Presence {
        // A touch from before the request does not count.
        self.clear_touch();
        self.start_timer(timeout_secs);

        let mut last = self.timer_remaining();
        let mut lit = true;
        self.tk1.set_led(Led::Green);

        let presence = loop {
            if self.touched() {
                self.clear_touch();
                break Presence::Confirmed;
            }
            if !self.timer_running() {
                break Presence::TimedOut;
            }
            let now = self.timer_remaining();
            if now != last {
                last = now;
                lit = !lit;
                self.tk1.set_led(if lit { Led::Green } else { Led::Off });
            }
        };

        self.stop_timer();
        self.tk1.set_led(self.idle);
        if presence == Presence::TimedOut {
            cprintln!("[touch] No touch within {} s", timeout_secs);
        }
        presence
    }
}
