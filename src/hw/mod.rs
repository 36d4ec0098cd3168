// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! STM32F777 hardware layer.
//!
//! | Module | Peripheral |
//! | ------ | ---------- |
//! | [`pins`] | Board pin map and the four channel outputs |
//! | [`timer`] | TIM3 as the frame timer, driving the scheduler |
//! | [`i2c`] | I2C1 in slave mode, feeding the register file |
//! | [`usart`] | USART1 debug terminal |

pub mod i2c;
pub mod pins;
pub mod timer;
pub mod usart;

pub use i2c::I2cSlave;
pub use pins::{BoardPins, ChannelPins};
pub use timer::{FrameDriver, FrameTimer};
pub use usart::Usart;
