// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Frame Scheduler
//!
//! Turns the three frame-timer interrupts into channel edges.
//!
//! ## Modules
//!
//! - [`frame`] - The scheduler state machine.
//! - [`outputs`] - `OutputBank`, the seam between the scheduler and the four output pins.
//! - [`sim`] - Tick-by-tick frame simulator that injects timer events on the host.

pub mod frame;
pub mod outputs;
pub mod sim;

pub use frame::{Edge, Event, FrameScheduler, Level};
pub use outputs::OutputBank;
pub use sim::{EdgeRecord, FrameSim};
