// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Wire layout of the PPM register space and the host-side message encoder.
//!
//! A bus write is `[register, data...]`: the first byte sets the register pointer and each data
//! byte lands at the pointer, which then auto-increments. Channel `c` occupies registers `2c`
//! (high byte) and `2c + 1` (low byte); the high byte must be sent first.

use crate::config::{CHANNEL_COUNT, HOST_DUTY_MAX, REGISTER_COUNT};
use crate::timing::Channel;

/// First register of the space.
pub const START_REGISTER: u8 = 0;

/// Longest message: pointer plus every register.
pub const MAX_MESSAGE_LEN: usize = 1 + REGISTER_COUNT;

/// Clamp a host value to what the device expects on the wire.
#[inline]
pub fn clamp_host(value: u16) -> u16 {
    value.min(HOST_DUTY_MAX)
}

/// One bus write transaction, ready to hand to the bus driver.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Message {
    buf: [u8; MAX_MESSAGE_LEN],
    len: usize,
}

impl Message {
    /// Update a single channel: `[2c, hi, lo]`.
    pub fn single(channel: Channel, value: u16) -> Self {
        let [hi, lo] = clamp_host(value).to_be_bytes();
        let mut buf = [0; MAX_MESSAGE_LEN];
        buf[..3].copy_from_slice(&[channel.register(), hi, lo]);
        Self { buf, len: 3 }
    }

    /// Update every channel in one transaction starting at register 0.
    pub fn full_refresh(values: [u16; CHANNEL_COUNT]) -> Self {
        let mut buf = [0; MAX_MESSAGE_LEN];
        buf[0] = START_REGISTER;
        for (pair, value) in buf[1..].chunks_exact_mut(2).zip(values) {
            pair.copy_from_slice(&clamp_host(value).to_be_bytes());
        }
        Self {
            buf,
            len: MAX_MESSAGE_LEN,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Register the transaction starts at.
    #[inline]
    pub fn register(&self) -> u8 {
        self.buf[0]
    }
}

/// Decode a full read of the register space into per-channel values.
pub fn decode_readback(bytes: [u8; REGISTER_COUNT]) -> [u16; CHANNEL_COUNT] {
    let mut out = [0; CHANNEL_COUNT];
    for (value, pair) in out.iter_mut().zip(bytes.chunks_exact(2)) {
        *value = u16::from_be_bytes([pair[0], pair[1]]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_channel_message() {
        let msg = Message::single(Channel::Ch2, 0x0123);
        assert_eq!(msg.as_bytes(), &[4, 0x01, 0x23]);
        assert_eq!(msg.register(), 4);
    }

    #[test]
    fn host_values_are_clamped() {
        assert_eq!(Message::single(Channel::Ch0, 9000).as_bytes(), &[0, 0x1F, 0xFF]);
        assert_eq!(clamp_host(8191), 8191);
    }

    #[test]
    fn full_refresh_covers_all_registers() {
        let msg = Message::full_refresh([0, 1, 0x0200, u16::MAX]);
        assert_eq!(
            msg.as_bytes(),
            &[0, 0x00, 0x00, 0x00, 0x01, 0x02, 0x00, 0x1F, 0xFF]
        );
    }

    #[test]
    fn readback_decodes_pairs() {
        let bytes = [0x0F, 0xFF, 0x00, 0x00, 0x1F, 0xFE, 0x00, 0x2A];
        assert_eq!(decode_readback(bytes), [4095, 0, 8190, 42]);
    }
}
