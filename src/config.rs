// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compile-time configuration for the PPM slave.
//!
//! Frame geometry is fixed: four channels share one 2^15-tick frame, each channel owning a quarter
//! of it (one time unit). At a 8 MHz timer clock a frame lasts 4.096 ms.

/// Number of output channels.
pub const CHANNEL_COUNT: usize = 4;

/// Length of one frame in timer ticks. The counter runs `0..FRAME_PERIOD`.
pub const FRAME_PERIOD: u32 = 1 << 15;

/// Length of one time unit (a quarter frame) in ticks.
pub const UNIT: u16 = (FRAME_PERIOD / CHANNEL_COUNT as u32) as u16;

/// Top value of the frame counter (auto-reload register).
pub const FRAME_TOP: u16 = (FRAME_PERIOD - 1) as u16;

/// Largest duty value the device accepts. Anything above is clamped.
///
/// The falling edge sits at `on_time + 1 + duty`, so `UNIT - 2` is the last value that keeps it
/// strictly below the next channel's rising edge.
pub const DUTY_MAX: u16 = UNIT - 2;

/// Largest value a bus master sends on the wire.
pub const HOST_DUTY_MAX: u16 = UNIT - 1;

/// Power-on duty for every channel: the midpoint of the valid window.
pub const DEFAULT_DUTY: u16 = DUTY_MAX / 2;

/// Size of the bus register space (high/low byte per channel).
pub const REGISTER_COUNT: usize = 2 * CHANNEL_COUNT;

/// 7-bit slave address on the bus.
pub const SLAVE_ADDRESS: u8 = 0x1A;

/// TIM3 prescaler. TIM3 runs from the 16 MHz HSI, so `PSC = 1` gives 8 MHz ticks.
pub const TIMER_PRESCALER: u16 = 1;

/// I2C1 TIMINGR word for 100 kHz with a 16 MHz kernel clock (RM0410, table 220).
pub const I2C_TIMING: u32 = 0x3042_0F13;

/// Debug terminal baud rate.
pub const USART_BAUD: u32 = 115_200;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_splits_into_four_units() {
        assert_eq!(UNIT, 8192);
        assert_eq!(u32::from(UNIT) * CHANNEL_COUNT as u32, FRAME_PERIOD);
        assert_eq!(FRAME_TOP, 0x7FFF);
    }

    #[test]
    fn default_duty_is_window_midpoint() {
        assert_eq!(DUTY_MAX, 8190);
        assert_eq!(DEFAULT_DUTY, 4095);
        assert!(HOST_DUTY_MAX > DUTY_MAX);
    }
}
