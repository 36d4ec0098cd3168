// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Duty-cycle update protocol.
//!
//! Runs in the main loop and moves completed bus writes into the scheduler's off-time table:
//!
//! 1. consume the register file's completion marker;
//! 2. decode the channel's two raw bytes and clamp them to [`DUTY_MAX`](crate::config::DUTY_MAX);
//! 3. bias the duty into the channel window and commit it (critical section, one 16-bit store);
//! 4. mirror the two received bytes into the read side of the register file, so a bus read
//!    returns exactly what the master wrote.
//!
//! Polling with nothing pending does nothing, so the loop can spin on [`Updater::poll`].

use crate::registers::RegisterFile;
use crate::timing::{clamp_duty, off_time, Channel, SharedTiming};

/// Result of one accepted update, for logging.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Accepted {
    pub channel: Channel,
    /// Value as received on the bus; this is what reads back.
    pub raw: u16,
    /// Value after clamping; this is what drives the pulse.
    pub duty: u16,
    /// Absolute falling edge now committed.
    pub off_time: u16,
}

impl Accepted {
    #[inline]
    pub fn was_clamped(&self) -> bool {
        self.raw != self.duty
    }
}

pub struct Updater<'a> {
    registers: &'a RegisterFile,
    timing: &'a SharedTiming,
}

impl<'a> Updater<'a> {
    pub fn new(registers: &'a RegisterFile, timing: &'a SharedTiming) -> Self {
        Self { registers, timing }
    }

    /// Commit the pending update, if any.
    pub fn poll(&self) -> Option<Accepted> {
        let channel = self.registers.take_completed()?;

        let raw = self.registers.pending_raw(channel);
        let duty = clamp_duty(raw);
        let off = off_time(channel, duty);

        self.timing.commit(channel, off);
        self.registers.mirror(channel, raw);

        Some(Accepted {
            channel,
            raw,
            duty,
            off_time: off,
        })
    }
}
