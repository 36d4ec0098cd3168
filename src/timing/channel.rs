// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Output channel identities.

use crate::config::{CHANNEL_COUNT, UNIT};
use crate::error::Error;

/// One of the four PPM outputs. Channel `n` owns the `n`-th quarter of the frame.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Channel {
    Ch0,
    Ch1,
    Ch2,
    Ch3,
}

impl Channel {
    /// All channels in frame order.
    pub const ALL: [Channel; CHANNEL_COUNT] = [Channel::Ch0, Channel::Ch1, Channel::Ch2, Channel::Ch3];

    /// Look up a channel by index.
    #[inline]
    pub const fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Channel::Ch0),
            1 => Some(Channel::Ch1),
            2 => Some(Channel::Ch2),
            3 => Some(Channel::Ch3),
            _ => None,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Phase offset of this channel inside the frame, in ticks.
    #[inline]
    pub const fn phase_offset(self) -> u16 {
        self as u16 * UNIT
    }

    /// Register address of the high byte. The low byte follows at `+1`.
    #[inline]
    pub const fn register(self) -> u8 {
        2 * self as u8
    }

    /// Channel whose register pair contains `address`.
    #[inline]
    pub const fn for_register(address: u8) -> Option<Self> {
        Self::from_index(address as usize / 2)
    }

    /// Next channel in frame order, wrapping from `Ch3` to `Ch0`.
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Channel::Ch0 => Channel::Ch1,
            Channel::Ch1 => Channel::Ch2,
            Channel::Ch2 => Channel::Ch3,
            Channel::Ch3 => Channel::Ch0,
        }
    }
}

impl TryFrom<usize> for Channel {
    type Error = Error;

    fn try_from(idx: usize) -> Result<Self, Self::Error> {
        Self::from_index(idx).ok_or(Error::InvalidChannel(idx))
    }
}
