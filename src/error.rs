// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Error type shared by the register file and channel helpers.

use core::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Bus address outside the register space.
    AddressOutOfRange(u8),
    /// Channel index outside `0..CHANNEL_COUNT`.
    InvalidChannel(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AddressOutOfRange(addr) => write!(f, "register address {addr:#04x} out of range"),
            Error::InvalidChannel(idx) => write!(f, "channel {idx} does not exist"),
        }
    }
}
