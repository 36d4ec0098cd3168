// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Bus-facing register file.
//!
//! Two banks of `REGISTER_COUNT` bytes:
//! - `rx` receives raw bytes from the bus master, in the bus interrupt;
//! - `tx` holds the last value the update protocol accepted for each channel, and is what the bus
//!   master reads back.
//!
//! Address `2c` is the high byte and `2c + 1` the low byte of channel `c`. Writing the low byte
//! completes the pair and sets a single-slot marker. A second completion before the main loop
//! consumes the first overwrites the marker, so the earlier update is skipped.
//!
//! Every field is an atomic byte. There is one producer per bank (bus interrupt for `rx`, main loop
//! for `tx`), so no lock is taken here.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::config::{DEFAULT_DUTY, REGISTER_COUNT};
use crate::error::Error;
use crate::timing::Channel;

/// Marker value meaning "no completed pair".
const NO_SLOT: u8 = u8::MAX;

pub struct RegisterFile {
    rx: [AtomicU8; REGISTER_COUNT],
    tx: [AtomicU8; REGISTER_COUNT],
    completed: AtomicU8,
}

const fn default_bank() -> [AtomicU8; REGISTER_COUNT] {
    let [hi, lo] = DEFAULT_DUTY.to_be_bytes();
    [
        AtomicU8::new(hi),
        AtomicU8::new(lo),
        AtomicU8::new(hi),
        AtomicU8::new(lo),
        AtomicU8::new(hi),
        AtomicU8::new(lo),
        AtomicU8::new(hi),
        AtomicU8::new(lo),
    ]
}

#[inline]
fn check(address: u8) -> Result<usize, Error> {
    let idx = address as usize;
    if idx < REGISTER_COUNT {
        Ok(idx)
    } else {
        Err(Error::AddressOutOfRange(address))
    }
}

impl RegisterFile {
    /// Register file with both banks holding [`DEFAULT_DUTY`] for every channel.
    pub const fn new() -> Self {
        Self {
            rx: default_bank(),
            tx: default_bank(),
            completed: AtomicU8::new(NO_SLOT),
        }
    }

    /// Store a byte written by the bus master.
    ///
    /// Writing an odd (low byte) address marks its channel as complete.
    pub fn write(&self, address: u8, byte: u8) -> Result<(), Error> {
        let idx = check(address)?;
        self.rx[idx].store(byte, Ordering::Relaxed);
        if idx % 2 == 1 {
            self.completed.store((idx / 2) as u8, Ordering::Release);
        }
        Ok(())
    }

    /// Byte returned to the bus master: always from the accepted (`tx`) bank.
    pub fn read(&self, address: u8) -> Result<u8, Error> {
        let idx = check(address)?;
        Ok(self.tx[idx].load(Ordering::Relaxed))
    }

    /// Consume the completion marker.
    pub fn take_completed(&self) -> Option<Channel> {
        let slot = self.completed.swap(NO_SLOT, Ordering::Acquire);
        Channel::from_index(slot as usize)
    }

    /// Channel currently marked complete, without consuming it.
    pub fn peek_completed(&self) -> Option<Channel> {
        Channel::from_index(self.completed.load(Ordering::Acquire) as usize)
    }

    /// Raw value most recently written for `channel`, committed or not.
    pub fn pending_raw(&self, channel: Channel) -> u16 {
        let base = channel.register() as usize;
        u16::from_be_bytes([
            self.rx[base].load(Ordering::Relaxed),
            self.rx[base + 1].load(Ordering::Relaxed),
        ])
    }

    /// Publish the accepted value of `channel` to the read side.
    pub fn mirror(&self, channel: Channel, value: u16) {
        let base = channel.register() as usize;
        let [hi, lo] = value.to_be_bytes();
        self.tx[base].store(hi, Ordering::Relaxed);
        self.tx[base + 1].store(lo, Ordering::Relaxed);
    }

    /// Accepted value of `channel` as the bus master would read it.
    pub fn readback(&self, channel: Channel) -> u16 {
        let base = channel.register() as usize;
        u16::from_be_bytes([
            self.tx[base].load(Ordering::Relaxed),
            self.tx[base + 1].load(Ordering::Relaxed),
        ])
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_defaults_and_nothing_pending() {
        let regs = RegisterFile::new();
        for ch in Channel::ALL {
            assert_eq!(regs.readback(ch), DEFAULT_DUTY);
            assert_eq!(regs.pending_raw(ch), DEFAULT_DUTY);
        }
        assert_eq!(regs.read(0), Ok(0x0F));
        assert_eq!(regs.read(1), Ok(0xFF));
        assert_eq!(regs.take_completed(), None);
    }

    #[test]
    fn low_byte_completes_pair() {
        let regs = RegisterFile::new();
        regs.write(4, 0x12).unwrap();
        assert_eq!(regs.peek_completed(), None);

        regs.write(5, 0x34).unwrap();
        assert_eq!(regs.pending_raw(Channel::Ch2), 0x1234);
        assert_eq!(regs.take_completed(), Some(Channel::Ch2));
        assert_eq!(regs.take_completed(), None);
    }

    #[test]
    fn reads_never_show_uncommitted_bytes() {
        let regs = RegisterFile::new();
        regs.write(2, 0xAA).unwrap();
        regs.write(3, 0xBB).unwrap();

        assert_eq!(regs.read(2), Ok(0x0F));
        assert_eq!(regs.read(3), Ok(0xFF));

        regs.mirror(Channel::Ch1, 0x0102);
        assert_eq!(regs.read(2), Ok(0x01));
        assert_eq!(regs.read(3), Ok(0x02));
    }

    #[test]
    fn out_of_range_addresses_are_rejected() {
        let regs = RegisterFile::new();
        assert_eq!(regs.write(8, 1), Err(Error::AddressOutOfRange(8)));
        assert_eq!(regs.read(0xFF), Err(Error::AddressOutOfRange(0xFF)));
        assert_eq!(regs.peek_completed(), None);
    }

    #[test]
    fn second_completion_overwrites_first() {
        let regs = RegisterFile::new();
        regs.write(0, 0x00).unwrap();
        regs.write(1, 0x10).unwrap();
        regs.write(6, 0x00).unwrap();
        regs.write(7, 0x20).unwrap();

        assert_eq!(regs.take_completed(), Some(Channel::Ch3));
        assert_eq!(regs.take_completed(), None);
    }

    #[test]
    fn low_byte_alone_completes_with_stale_high_byte() {
        let regs = RegisterFile::new();
        regs.write(1, 0x00).unwrap();

        assert_eq!(regs.take_completed(), Some(Channel::Ch0));
        assert_eq!(regs.pending_raw(Channel::Ch0), 0x0F00);
    }
}
