// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Output pin abstraction for the scheduler.
//!
//! The board's four push-pull pins implement this in `hw::pins`; the simulator's
//! [`PinLevels`](crate::scheduler::sim::PinLevels) implements it on the host.

use crate::timing::Channel;

/// Four digital outputs addressed by channel.
///
/// Called from interrupt context, so implementations must not block.
pub trait OutputBank {
    fn set_high(&mut self, channel: Channel);
    fn set_low(&mut self, channel: Channel);
}
