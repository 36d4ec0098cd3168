// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Frame Timing Model
//!
//! Channel identities, the fixed on-schedule, the off-time windowing transform and the off-time
//! table shared between the main loop and the frame interrupt.
//!
//! ## Modules
//!
//! - [`channel`] - The four output channels and their phase offsets.
//! - [`window`] - Mapping from a raw duty value to an absolute off-time inside the channel window.
//! - [`shared`] - Critical-section guarded off-time table.

pub mod channel;
pub mod shared;
pub mod window;

pub use channel::Channel;
pub use shared::SharedTiming;
pub use window::{clamp_duty, duty_from_off_time, off_time, on_time};
