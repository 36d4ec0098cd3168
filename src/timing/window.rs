// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Windowing transform from raw duty values to absolute edge times.
//!
//! All four channels share one ascending frame counter and one off-compare register. To keep their
//! edges from colliding, each channel's falling edge is biased into the channel's own window:
//!
//! ```text
//! on_time(c)  = c * UNIT
//! off_time(c) = c * UNIT + 1 + clamp(raw, 0, DUTY_MAX)
//! ```
//!
//! With `DUTY_MAX = UNIT - 2` this gives `on_time(c) < off_time(c) < on_time(c + 1)` for every
//! `u16` input, where `on_time(4)` is the frame period. The scheduler relies on this and never
//! checks it at run time.

use crate::config::DUTY_MAX;
use crate::timing::Channel;

/// Clamp a raw wire value into the accepted duty range.
#[inline]
pub const fn clamp_duty(raw: u16) -> u16 {
    if raw > DUTY_MAX {
        DUTY_MAX
    } else {
        raw
    }
}

/// Rising edge of `channel`, in ticks from frame start.
#[inline]
pub const fn on_time(channel: Channel) -> u16 {
    channel.phase_offset()
}

/// Falling edge of `channel` for a raw duty value, in ticks from frame start.
#[inline]
pub const fn off_time(channel: Channel, raw: u16) -> u16 {
    on_time(channel) + 1 + clamp_duty(raw)
}

/// Recover the (clamped) duty value from an off-time produced by [`off_time`].
#[inline]
pub const fn duty_from_off_time(channel: Channel, off: u16) -> u16 {
    off - on_time(channel) - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FRAME_PERIOD, UNIT};

    fn window_end(ch: Channel) -> u32 {
        match ch {
            Channel::Ch3 => FRAME_PERIOD,
            _ => u32::from(on_time(ch.next())),
        }
    }

    #[test]
    fn every_raw_value_lands_inside_its_window() {
        for ch in Channel::ALL {
            for raw in 0..=u16::MAX {
                let off = off_time(ch, raw);
                assert!(on_time(ch) < off, "{ch:?} raw {raw}: off {off} not after on");
                assert!(
                    u32::from(off) < window_end(ch),
                    "{ch:?} raw {raw}: off {off} reaches next window"
                );
            }
        }
    }

    #[test]
    fn boundary_values() {
        for ch in Channel::ALL {
            assert_eq!(off_time(ch, 0), on_time(ch) + 1);
            assert_eq!(off_time(ch, UNIT - 1), on_time(ch) + UNIT - 1);
            assert_eq!(off_time(ch, UNIT - 1), off_time(ch, DUTY_MAX));
        }
        assert_eq!(off_time(Channel::Ch3, u16::MAX), 0x7FFF);
    }

    #[test]
    fn duty_recovered_from_off_time() {
        for ch in Channel::ALL {
            for raw in [0, 1, 4095, DUTY_MAX] {
                assert_eq!(duty_from_off_time(ch, off_time(ch, raw)), raw);
            }
            assert_eq!(duty_from_off_time(ch, off_time(ch, 60_000)), DUTY_MAX);
        }
    }
}
