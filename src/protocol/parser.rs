// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Device-side bus session.
//!
//! The bus peripheral does address matching and clocking; this module only sees the bytes of one
//! transaction and what direction it goes. For a write, the first byte is the register pointer and
//! the rest are data. For a read, bytes come from the register pointer left by the last write.
//! The pointer auto-increments after every data byte, wrapping at the end of the register space.

use crate::config::REGISTER_COUNT;
use crate::error::Error;
use crate::registers::RegisterFile;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum State {
    Idle,
    WaitPointer,
    Writing,
    Reading,
    /// Bad pointer: drop the rest of the transaction.
    Discard,
}

pub struct BusSession {
    state: State,
    pointer: u8,
}

#[inline]
fn wrap(pointer: u8) -> u8 {
    (pointer.wrapping_add(1) as usize % REGISTER_COUNT) as u8
}

impl BusSession {
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            pointer: 0,
        }
    }

    /// Our address matched with the master writing.
    pub fn begin_write(&mut self) {
        self.state = State::WaitPointer;
    }

    /// Our address matched with the master reading.
    pub fn begin_read(&mut self) {
        self.state = State::Reading;
    }

    /// Stop condition: transaction over.
    pub fn stop(&mut self) {
        self.state = State::Idle;
    }

    /// Current register pointer.
    #[inline]
    pub fn pointer(&self) -> u8 {
        self.pointer
    }

    /// Handle a byte received from the master.
    ///
    /// An out-of-range pointer is reported once and the remaining bytes of the transaction are
    /// dropped.
    pub fn push(&mut self, byte: u8, registers: &RegisterFile) -> Result<(), Error> {
        match self.state {
            State::WaitPointer => {
                if byte as usize >= REGISTER_COUNT {
                    self.state = State::Discard;
                    return Err(Error::AddressOutOfRange(byte));
                }
                self.pointer = byte;
                self.state = State::Writing;
            }
            State::Writing => {
                registers.write(self.pointer, byte)?;
                self.pointer = wrap(self.pointer);
            }
            State::Idle | State::Reading | State::Discard => {}
        }
        Ok(())
    }

    /// Next byte to send to the master.
    pub fn next_read(&mut self, registers: &RegisterFile) -> u8 {
        // The pointer is always in range; see `push` and `wrap`.
        let byte = registers.read(self.pointer).unwrap_or(0xFF);
        self.pointer = wrap(self.pointer);
        byte
    }
}

impl Default for BusSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Message;
    use crate::timing::Channel;

    fn send(session: &mut BusSession, regs: &RegisterFile, bytes: &[u8]) -> Result<(), Error> {
        session.begin_write();
        for &b in bytes {
            session.push(b, regs)?;
        }
        session.stop();
        Ok(())
    }

    #[test]
    fn single_message_lands_in_its_pair() {
        let regs = RegisterFile::new();
        let mut session = BusSession::new();

        send(&mut session, &regs, Message::single(Channel::Ch1, 0x0A0B).as_bytes()).unwrap();

        assert_eq!(regs.pending_raw(Channel::Ch1), 0x0A0B);
        assert_eq!(regs.take_completed(), Some(Channel::Ch1));
        assert_eq!(session.pointer(), 4);
    }

    #[test]
    fn full_refresh_wraps_pointer_and_leaves_last_completion() {
        let regs = RegisterFile::new();
        let mut session = BusSession::new();

        send(&mut session, &regs, Message::full_refresh([1, 2, 3, 4]).as_bytes()).unwrap();

        for (ch, value) in Channel::ALL.into_iter().zip([1, 2, 3, 4]) {
            assert_eq!(regs.pending_raw(ch), value);
        }
        // Without a poll between pairs only the last completion survives.
        assert_eq!(regs.take_completed(), Some(Channel::Ch3));
        assert_eq!(session.pointer(), 0);
    }

    #[test]
    fn read_uses_pointer_from_previous_write() {
        let regs = RegisterFile::new();
        regs.mirror(Channel::Ch3, 0x1234);
        let mut session = BusSession::new();

        send(&mut session, &regs, &[6]).unwrap();
        session.begin_read();
        assert_eq!(session.next_read(&regs), 0x12);
        assert_eq!(session.next_read(&regs), 0x34);
        // Wraps back to Ch0's high byte.
        assert_eq!(session.next_read(&regs), 0x0F);
    }

    #[test]
    fn bad_pointer_discards_transaction() {
        let regs = RegisterFile::new();
        let mut session = BusSession::new();

        session.begin_write();
        assert_eq!(session.push(9, &regs), Err(Error::AddressOutOfRange(9)));
        assert_eq!(session.push(0x00, &regs), Ok(()));
        assert_eq!(session.push(0x01, &regs), Ok(()));
        session.stop();

        assert_eq!(regs.peek_completed(), None);
        assert_eq!(regs.pending_raw(Channel::Ch0), 0x0FFF);
    }

    #[test]
    fn reset_mid_pair_drops_rest_of_write() {
        let regs = RegisterFile::new();
        let mut session = BusSession::new();

        session.begin_write();
        session.push(Channel::Ch1.register(), &regs).unwrap();
        session.push(0x0A, &regs).unwrap();

        // Bus error: the session is dropped before the low byte arrives.
        session.stop();
        session.push(0x0B, &regs).unwrap();

        assert_eq!(regs.peek_completed(), None);
        assert_eq!(regs.pending_raw(Channel::Ch1), 0x0AFF);

        // The next transaction starts from a fresh pointer byte.
        send(&mut session, &regs, Message::single(Channel::Ch2, 7).as_bytes()).unwrap();
        assert_eq!(regs.take_completed(), Some(Channel::Ch2));
        assert_eq!(regs.pending_raw(Channel::Ch2), 7);
    }

    #[test]
    fn bytes_outside_a_write_are_ignored() {
        let regs = RegisterFile::new();
        let mut session = BusSession::new();

        assert_eq!(session.push(0x55, &regs), Ok(()));
        session.begin_read();
        assert_eq!(session.push(0x55, &regs), Ok(()));
        assert_eq!(regs.peek_completed(), None);
    }
}
