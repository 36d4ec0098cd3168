// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Register protocol spoken on the bus.
//!
//! - [`messages`] - Wire layout and the host-side message encoder.
//! - [`parser`] - Device-side session that applies bus transactions to the register file.

pub mod messages;
pub mod parser;

pub use messages::Message;
pub use parser::BusSession;
