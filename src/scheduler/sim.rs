// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host-side frame simulator.
//!
//! Emulates the frame timer one tick at a time: `FrameStart` at tick 0, and `OnMatch` / `OffMatch`
//! whenever the counter equals the compare value the scheduler armed. Every driven edge is
//! recorded with its tick, so tests can check edge order and pulse widths without hardware.
//!
//! ```
//! use quadppm::scheduler::sim::{FrameSim, PinLevels};
//! use quadppm::timing::{Channel, SharedTiming};
//!
//! let timing = SharedTiming::new();
//! let mut sim = FrameSim::new(&timing, PinLevels::default());
//! let edges = sim.run_frame();
//! assert_eq!(edges.len(), 8);
//! assert_eq!(FrameSim::<PinLevels>::pulse_width(&edges, Channel::Ch0), Some(4096));
//! ```

use heapless::Vec;

use crate::config::{CHANNEL_COUNT, FRAME_PERIOD};
use crate::timing::{Channel, SharedTiming};

use super::{Event, FrameScheduler, Level, OutputBank};

/// Edges a well-formed frame produces.
pub const EDGES_PER_FRAME: usize = 2 * CHANNEL_COUNT;

/// Recorded edges of one frame. Sized with headroom so a malformed frame is still visible.
pub type FrameEdges = Vec<EdgeRecord, { 2 * EDGES_PER_FRAME }>;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EdgeRecord {
    pub tick: u16,
    pub channel: Channel,
    pub level: Level,
}

/// Output bank that just remembers pin levels.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PinLevels {
    high: [bool; CHANNEL_COUNT],
}

impl PinLevels {
    #[inline]
    pub fn is_high(&self, channel: Channel) -> bool {
        self.high[channel.index()]
    }

    #[inline]
    pub fn any_high(&self) -> bool {
        self.high.iter().any(|&h| h)
    }
}

impl OutputBank for PinLevels {
    fn set_high(&mut self, channel: Channel) {
        self.high[channel.index()] = true;
    }

    fn set_low(&mut self, channel: Channel) {
        self.high[channel.index()] = false;
    }
}

pub struct FrameSim<'a, O: OutputBank> {
    scheduler: FrameScheduler,
    timing: &'a SharedTiming,
    outputs: O,
}

impl<'a, O: OutputBank> FrameSim<'a, O> {
    pub fn new(timing: &'a SharedTiming, outputs: O) -> Self {
        Self {
            scheduler: FrameScheduler::new(),
            timing,
            outputs,
        }
    }

    #[inline]
    pub fn outputs(&self) -> &O {
        &self.outputs
    }

    #[inline]
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Run one full frame, ticks `0..FRAME_PERIOD`, and return the edges in the order driven.
    pub fn run_frame(&mut self) -> FrameEdges {
        let mut edges = FrameEdges::new();
        for tick in 0..FRAME_PERIOD {
            let tick = tick as u16;
            if tick == 0 {
                self.fire(Event::FrameStart, tick, &mut edges);
            }
            if self.scheduler.off_compare() == Some(tick) {
                self.fire(Event::OffMatch, tick, &mut edges);
            }
            if self.scheduler.on_compare() == Some(tick) {
                self.fire(Event::OnMatch, tick, &mut edges);
            }
        }
        edges
    }

    fn fire(&mut self, event: Event, tick: u16, edges: &mut FrameEdges) {
        if let Some(edge) = self.scheduler.advance(event, self.timing, &mut self.outputs) {
            // Overflow only happens for a malformed frame; the length check in tests catches it.
            let _ = edges.push(EdgeRecord {
                tick,
                channel: edge.channel,
                level: edge.level,
            });
        }
    }

    /// Tick of the first `level` edge on `channel`.
    pub fn edge_tick(edges: &[EdgeRecord], channel: Channel, level: Level) -> Option<u16> {
        edges
            .iter()
            .find(|e| e.channel == channel && e.level == level)
            .map(|e| e.tick)
    }

    /// High time of `channel` in ticks, from its rising to its falling edge.
    pub fn pulse_width(edges: &[EdgeRecord], channel: Channel) -> Option<u16> {
        let rise = Self::edge_tick(edges, channel, Level::High)?;
        let fall = Self::edge_tick(edges, channel, Level::Low)?;
        fall.checked_sub(rise)
    }
}
