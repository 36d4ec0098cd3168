// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # quadppm Firmware
//!
//! Four-channel PPM slave: a bus master writes per-channel values into a small register space,
//! and the device turns them into a phase-multiplexed pulse train for four ESC-style outputs.
//! Targets an STM32F777 MCU; everything except [`hw`] builds and tests on the host.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`config`] | Frame geometry, defaults, bus and clock constants |
//! | [`registers`] | Bus-facing register file with the completion marker |
//! | [`protocol`] | Bus session (device side) and message encoder (host side) |
//! | [`timing`] | Channels, window bias, shared off-time table |
//! | [`update`] | Main-loop update protocol: decode, bias, commit, mirror |
//! | [`scheduler`] | Frame scheduler state machine and host simulator |
//! | `hw` | TIM3 frame timer, I2C1 slave, output pins, USART log (target only) |
//!
//! ## Frame Layout
//!
//! ```text
//! tick   0        U        2U       3U       4U
//!        |--ch0-_|--ch1-_|--ch2-_|--ch3-_|
//! ```
//!
//! Each channel rises at the start of its quarter and falls `1 + duty` ticks later.
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod protocol;
pub mod registers;
pub mod scheduler;
pub mod timing;
pub mod update;

#[cfg(target_os = "none")]
pub mod hw;

pub use error::Error;
