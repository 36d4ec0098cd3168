// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Frame timer on TIM3.
//!
//! TIM3 counts `0..=FRAME_TOP` and wraps. Three interrupt sources map onto scheduler events:
//!
//! - update (overflow) -> `FrameStart`
//! - CC1 match -> `OnMatch`
//! - CC2 match -> `OffMatch`
//!
//! Compare registers are written without preload, so a new value is live immediately. A disarmed
//! compare is parked above the auto-reload value where the counter never reaches it.

use stm32f7xx_hal::pac;

use crate::config::{FRAME_TOP, TIMER_PRESCALER};
use crate::scheduler::{Event, FrameScheduler, OutputBank};
use crate::timing::SharedTiming;

/// Compare value the counter never reaches.
const DISARMED: u32 = 0xFFFF;

pub struct FrameTimer {
    tim: pac::TIM3,
}

impl FrameTimer {
    /// Configure TIM3 as the frame timer. The counter stays stopped until [`start`](Self::start).
    pub fn tim3(tim3: pac::TIM3) -> Self {
        let tim = tim3;

        // Clock the timer
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim3en().set_bit());

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        tim.psc.write(|w| unsafe { w.bits(TIMER_PRESCALER as u32) });
        tim.arr.write(|w| unsafe { w.bits(FRAME_TOP as u32) });
        tim.ccr1.write(|w| unsafe { w.bits(DISARMED) });
        tim.ccr2.write(|w| unsafe { w.bits(DISARMED) });

        // Latch PSC/ARR, then drop the update flag that generates
        tim.egr.write(|w| w.ug().set_bit());
        tim.sr.write(|w| unsafe { w.bits(0) });
        tim.cnt.write(|w| unsafe { w.bits(0) });

        tim.dier
            .modify(|_, w| w.uie().set_bit().cc1ie().set_bit().cc2ie().set_bit());

        Self { tim }
    }

    /// Load both compare registers.
    #[inline]
    pub fn load(&mut self, on: Option<u16>, off: Option<u16>) {
        let on = on.map_or(DISARMED, u32::from);
        let off = off.map_or(DISARMED, u32::from);
        self.tim.ccr1.write(|w| unsafe { w.bits(on) });
        self.tim.ccr2.write(|w| unsafe { w.bits(off) });
    }

    /// Enable the counter.
    #[inline]
    pub fn start(&mut self) {
        self.tim.cr1.modify(|_, w| w.cen().set_bit());
    }

    /// Take the oldest pending event and clear its flag.
    ///
    /// An off-match at the top of the frame happens before the overflow that follows it, so CC2 is
    /// served before the update flag.
    pub fn next_event(&mut self) -> Option<Event> {
        let sr = self.tim.sr.read();
        if sr.cc2if().bit_is_set() {
            self.tim.sr.modify(|_, w| w.cc2if().clear_bit());
            Some(Event::OffMatch)
        } else if sr.cc1if().bit_is_set() {
            self.tim.sr.modify(|_, w| w.cc1if().clear_bit());
            Some(Event::OnMatch)
        } else if sr.uif().bit_is_set() {
            self.tim.sr.modify(|_, w| w.uif().clear_bit());
            Some(Event::FrameStart)
        } else {
            None
        }
    }
}

/// Everything the TIM3 interrupt owns: timer, scheduler and output pins.
pub struct FrameDriver<O: OutputBank> {
    timer: FrameTimer,
    scheduler: FrameScheduler,
    outputs: O,
}

impl<O: OutputBank> FrameDriver<O> {
    pub fn new(timer: FrameTimer, outputs: O) -> Self {
        Self {
            timer,
            scheduler: FrameScheduler::new(),
            outputs,
        }
    }

    /// Drive the first frame start and let the counter run.
    pub fn start(&mut self, timing: &SharedTiming) {
        self.scheduler.start(timing, &mut self.outputs);
        self.timer
            .load(self.scheduler.on_compare(), self.scheduler.off_compare());
        self.timer.start();
    }

    /// Serve every pending timer event. Call from the TIM3 interrupt.
    pub fn service(&mut self, timing: &SharedTiming) {
        while let Some(event) = self.timer.next_event() {
            self.scheduler.advance(event, timing, &mut self.outputs);
            self.timer
                .load(self.scheduler.on_compare(), self.scheduler.off_compare());
        }
    }
}
