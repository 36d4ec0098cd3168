// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! I2C1 slave transport.
//!
//! The peripheral matches our own address and handles clock stretching; this wrapper moves bytes
//! between the data registers and a [`BusSession`], which applies them to the register file.
//! Serve [`I2cSlave::on_event`] from `I2C1_EV` and [`I2cSlave::clear_errors`] from `I2C1_ER`;
//! the event vector calls [`I2cSlave::reset`] before its next byte once an error was seen.

use stm32f7xx_hal::pac;

use crate::config::I2C_TIMING;
use crate::error::Error;
use crate::hw::pins::I2c1Pins;
use crate::protocol::BusSession;
use crate::registers::RegisterFile;

pub struct I2cSlave {
    i2c: pac::I2C1,
    session: BusSession,
    _pins: I2c1Pins,
}

impl I2cSlave {
    /// Enable I2C1 as a slave at the 7-bit `address`, with event and error interrupts on.
    pub fn i2c1(i2c1: pac::I2C1, pins: I2c1Pins, address: u8) -> Self {
        let i2c = i2c1;

        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.i2c1en().set_bit());

        // Peripheral must be disabled to change timing and own address
        i2c.cr1.modify(|_, w| w.pe().clear_bit());
        i2c.timingr.write(|w| unsafe { w.bits(I2C_TIMING) });

        i2c.oar1.write(|w| w.oa1en().clear_bit());
        i2c.oar1
            .write(|w| unsafe { w.oa1().bits((address as u16) << 1).oa1en().set_bit() });

        i2c.cr1.modify(|_, w| {
            w.addrie()
                .set_bit()
                .rxie()
                .set_bit()
                .txie()
                .set_bit()
                .stopie()
                .set_bit()
                .nackie()
                .set_bit()
                .errie()
                .set_bit()
                .pe()
                .set_bit()
        });

        Self {
            i2c,
            session: BusSession::new(),
            _pins: pins,
        }
    }

    /// Handle an event interrupt.
    ///
    /// Returns the protocol error, if any, of a received byte. The byte is dropped either way and
    /// the bus keeps running.
    pub fn on_event(&mut self, registers: &RegisterFile) -> Result<(), Error> {
        let isr = self.i2c.isr.read();
        let mut result = Ok(());

        if isr.addr().bit_is_set() {
            if isr.dir().bit_is_set() {
                // Master reads: flush whatever is left in TXDR
                self.session.begin_read();
                self.i2c.isr.write(|w| w.txe().set_bit());
            } else {
                self.session.begin_write();
            }
            self.i2c.icr.write(|w| w.addrcf().set_bit());
        }

        if isr.rxne().bit_is_set() {
            let byte = self.i2c.rxdr.read().rxdata().bits();
            result = self.session.push(byte, registers);
        }

        if isr.txis().bit_is_set() {
            let byte = self.session.next_read(registers);
            self.i2c.txdr.write(|w| w.txdata().bits(byte));
        }

        if isr.nackf().bit_is_set() {
            // End of a read: master NACKs the last byte
            self.i2c.icr.write(|w| w.nackcf().set_bit());
        }

        if isr.stopf().bit_is_set() {
            self.i2c.icr.write(|w| w.stopcf().set_bit());
            self.session.stop();
        }

        result
    }

    /// Drop the transaction in progress. The event handler calls this after an error interrupt.
    #[inline]
    pub fn reset(&mut self) {
        self.session.stop();
    }

    /// Clear bus error, arbitration loss and overrun. Call from the error interrupt.
    ///
    /// Touches only the clear register, so the error vector needs no access to the `I2cSlave`
    /// owned by the event vector.
    pub fn clear_errors() {
        let i2c = unsafe { &*pac::I2C1::ptr() };
        i2c.icr
            .write(|w| w.berrcf().set_bit().arlocf().set_bit().ovrcf().set_bit());
    }
}
