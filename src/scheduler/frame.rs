// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Frame scheduler state machine.
//!
//! One ascending frame counter drives three events:
//!
//! | event | source | action |
//! | ----- | ------ | ------ |
//! | `FrameStart` | counter overflow | Ch0 high, counters reset, arm on-compare at `on(1)` and off-compare at `off(0)` |
//! | `OnMatch` | on-compare match | next channel high, arm on-compare at the following rising edge |
//! | `OffMatch` | off-compare match | next channel low, arm off-compare at the following falling edge |
//!
//! Within a frame the edges come in the order `on0 < off0 < on1 < off1 < on2 < off2 < on3 < off3`,
//! which the window bias in [`crate::timing::window`] guarantees. Nothing here checks it.
//!
//! The scheduler only decides *what* happens; the interrupt handler owns the hardware timer and
//! loads [`FrameScheduler::on_compare`] / [`FrameScheduler::off_compare`] after every event.

use crate::timing::{on_time, Channel, SharedTiming};

use super::OutputBank;

/// Frame timer interrupt sources.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Event {
    FrameStart,
    OnMatch,
    OffMatch,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Level {
    High,
    Low,
}

/// One output transition.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Edge {
    pub channel: Channel,
    pub level: Level,
}

pub struct FrameScheduler {
    /// Index of the next channel to raise.
    on_counter: usize,
    /// Index of the next channel to drop.
    off_counter: usize,
    on_compare: Option<u16>,
    off_compare: Option<u16>,
}

impl FrameScheduler {
    /// Idle scheduler: no compare armed until [`start`](Self::start) or the first `FrameStart`.
    pub const fn new() -> Self {
        Self {
            on_counter: Channel::ALL.len(),
            off_counter: Channel::ALL.len(),
            on_compare: None,
            off_compare: None,
        }
    }

    /// Begin the first frame. Call once, before the frame timer is enabled.
    pub fn start<O: OutputBank>(&mut self, timing: &SharedTiming, outputs: &mut O) -> Edge {
        self.frame_start(timing, outputs)
    }

    /// Advance the state machine on a timer event.
    ///
    /// Returns the edge driven, or `None` for a spurious match after the last channel.
    pub fn advance<O: OutputBank>(
        &mut self,
        event: Event,
        timing: &SharedTiming,
        outputs: &mut O,
    ) -> Option<Edge> {
        match event {
            Event::FrameStart => Some(self.frame_start(timing, outputs)),
            Event::OnMatch => self.on_match(outputs),
            Event::OffMatch => self.off_match(timing, outputs),
        }
    }

    /// Value for the on-compare register, `None` when disarmed.
    #[inline]
    pub fn on_compare(&self) -> Option<u16> {
        self.on_compare
    }

    /// Value for the off-compare register, `None` when disarmed.
    #[inline]
    pub fn off_compare(&self) -> Option<u16> {
        self.off_compare
    }

    /// Next channel to be raised in this frame.
    #[inline]
    pub fn next_on(&self) -> Option<Channel> {
        Channel::from_index(self.on_counter)
    }

    /// Next channel to be dropped in this frame.
    #[inline]
    pub fn next_off(&self) -> Option<Channel> {
        Channel::from_index(self.off_counter)
    }

    fn frame_start<O: OutputBank>(&mut self, timing: &SharedTiming, outputs: &mut O) -> Edge {
        outputs.set_high(Channel::Ch0);
        self.on_counter = 1;
        self.off_counter = 0;
        self.on_compare = Some(on_time(Channel::Ch1));
        self.off_compare = Some(timing.off_time(Channel::Ch0));
        Edge {
            channel: Channel::Ch0,
            level: Level::High,
        }
    }

    fn on_match<O: OutputBank>(&mut self, outputs: &mut O) -> Option<Edge> {
        let channel = self.next_on()?;
        outputs.set_high(channel);
        self.on_counter += 1;
        self.on_compare = self.next_on().map(on_time);
        Some(Edge {
            channel,
            level: Level::High,
        })
    }

    fn off_match<O: OutputBank>(&mut self, timing: &SharedTiming, outputs: &mut O) -> Option<Edge> {
        let channel = self.next_off()?;
        outputs.set_low(channel);
        self.off_counter += 1;
        self.off_compare = self.next_off().map(|ch| timing.off_time(ch));
        Some(Edge {
            channel,
            level: Level::Low,
        })
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::sim::PinLevels;
    use crate::timing::off_time;

    #[test]
    fn idle_until_started() {
        let sched = FrameScheduler::new();
        assert_eq!(sched.on_compare(), None);
        assert_eq!(sched.off_compare(), None);
        assert_eq!(sched.next_on(), None);
    }

    #[test]
    fn start_raises_channel_zero_and_arms_both_compares() {
        let timing = SharedTiming::new();
        let mut pins = PinLevels::default();
        let mut sched = FrameScheduler::new();

        let edge = sched.start(&timing, &mut pins);

        assert_eq!(edge, Edge { channel: Channel::Ch0, level: Level::High });
        assert!(pins.is_high(Channel::Ch0));
        assert_eq!(sched.on_compare(), Some(8192));
        assert_eq!(sched.off_compare(), Some(timing.off_time(Channel::Ch0)));
        assert_eq!(sched.next_on(), Some(Channel::Ch1));
        assert_eq!(sched.next_off(), Some(Channel::Ch0));
    }

    #[test]
    fn full_event_sequence_walks_every_channel() {
        let timing = SharedTiming::new();
        let mut pins = PinLevels::default();
        let mut sched = FrameScheduler::new();
        sched.advance(Event::FrameStart, &timing, &mut pins);

        for ch in Channel::ALL {
            if ch != Channel::Ch0 {
                assert_eq!(sched.on_compare(), Some(on_time(ch)));
                let edge = sched.advance(Event::OnMatch, &timing, &mut pins);
                assert_eq!(edge, Some(Edge { channel: ch, level: Level::High }));
            }
            assert_eq!(sched.off_compare(), Some(timing.off_time(ch)));
            let edge = sched.advance(Event::OffMatch, &timing, &mut pins);
            assert_eq!(edge, Some(Edge { channel: ch, level: Level::Low }));
            assert!(!pins.is_high(ch));
        }

        assert_eq!(sched.on_compare(), None);
        assert_eq!(sched.off_compare(), None);
    }

    #[test]
    fn spurious_matches_after_last_channel_are_ignored() {
        let timing = SharedTiming::new();
        let mut pins = PinLevels::default();
        let mut sched = FrameScheduler::new();

        assert_eq!(sched.advance(Event::OnMatch, &timing, &mut pins), None);
        assert_eq!(sched.advance(Event::OffMatch, &timing, &mut pins), None);
        assert_eq!(pins, PinLevels::default());
    }

    #[test]
    fn off_compare_reads_table_when_armed() {
        let timing = SharedTiming::new();
        let mut pins = PinLevels::default();
        let mut sched = FrameScheduler::new();
        sched.start(&timing, &mut pins);

        // Ch1's off-time changes before Ch0 falls: the new value is picked up this frame.
        timing.commit(Channel::Ch1, off_time(Channel::Ch1, 0));
        sched.advance(Event::OffMatch, &timing, &mut pins);
        assert_eq!(sched.off_compare(), Some(8193));

        // Ch1 is already armed; a later commit waits for the next frame.
        timing.commit(Channel::Ch1, off_time(Channel::Ch1, 500));
        assert_eq!(sched.off_compare(), Some(8193));
        sched.advance(Event::FrameStart, &timing, &mut pins);
        sched.advance(Event::OffMatch, &timing, &mut pins);
        assert_eq!(sched.off_compare(), Some(8192 + 501));
    }
}
