// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Off-time table shared between the main loop and the frame interrupt.
//!
//! Access discipline:
//! - each entry has exactly one writer, the update protocol in the main loop;
//! - each entry has exactly one reader, the off-match handling of the frame scheduler;
//! - every access goes through a critical section spanning a single 16-bit load or store, so the
//!   interrupt can never observe half of an old value and half of a new one.
//!
//! On-times are not stored: they are fixed by [`Channel::phase_offset`].

use core::cell::Cell;

use critical_section::Mutex;

use crate::config::{CHANNEL_COUNT, DEFAULT_DUTY};
use crate::timing::window::{duty_from_off_time, off_time};
use crate::timing::Channel;

pub struct SharedTiming {
    off: [Mutex<Cell<u16>>; CHANNEL_COUNT],
}

impl SharedTiming {
    /// Table with every channel at [`DEFAULT_DUTY`]. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            off: [
                Mutex::new(Cell::new(off_time(Channel::Ch0, DEFAULT_DUTY))),
                Mutex::new(Cell::new(off_time(Channel::Ch1, DEFAULT_DUTY))),
                Mutex::new(Cell::new(off_time(Channel::Ch2, DEFAULT_DUTY))),
                Mutex::new(Cell::new(off_time(Channel::Ch3, DEFAULT_DUTY))),
            ],
        }
    }

    /// Committed off-time of `channel`.
    #[inline]
    pub fn off_time(&self, channel: Channel) -> u16 {
        critical_section::with(|cs| self.off[channel.index()].borrow(cs).get())
    }

    /// Publish a new off-time for `channel`.
    ///
    /// `off` must come from [`off_time`]; the critical section covers the store only.
    #[inline]
    pub fn commit(&self, channel: Channel, off: u16) {
        critical_section::with(|cs| self.off[channel.index()].borrow(cs).set(off));
    }

    /// Committed duty of `channel`, i.e. the off-time with the window bias removed.
    pub fn duty(&self, channel: Channel) -> u16 {
        duty_from_off_time(channel, self.off_time(channel))
    }

    /// All committed off-times in channel order.
    pub fn snapshot(&self) -> [u16; CHANNEL_COUNT] {
        Channel::ALL.map(|ch| self.off_time(ch))
    }
}

impl Default for SharedTiming {
    fn default() -> Self {
        Self::new()
    }
}
