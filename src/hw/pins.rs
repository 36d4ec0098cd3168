// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F777 PPM slave.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpiod, Alternate, OpenDrain, Output, PushPull},
    pac,
    prelude::*,
};

use crate::scheduler::OutputBank;
use crate::timing::Channel;

/// All board pins. Construct this once at startup using:
///
/// ```rust
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub channels: ChannelPins,
    pub usart1: Usart1Pins,
    pub i2c1: I2c1Pins,
}

/// PPM outputs, one per channel. All start low.
pub struct ChannelPins {
    pub ch0: gpiod::PD12<Output<PushPull>>,
    pub ch1: gpiod::PD13<Output<PushPull>>,
    pub ch2: gpiod::PD14<Output<PushPull>>,
    pub ch3: gpiod::PD15<Output<PushPull>>,
}

// USART1 TX/RX
pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// I2C1 SCL/SDA, open drain with external pull-ups.
pub struct I2c1Pins {
    pub scl: gpiob::PB8<Alternate<4, OpenDrain>>,
    pub sda: gpiob::PB9<Alternate<4, OpenDrain>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpiob: pac::GPIOB, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();

        let mut channels = ChannelPins {
            ch0: gpiod.pd12.into_push_pull_output(),
            ch1: gpiod.pd13.into_push_pull_output(),
            ch2: gpiod.pd14.into_push_pull_output(),
            ch3: gpiod.pd15.into_push_pull_output(),
        };
        for ch in Channel::ALL {
            channels.set_low(ch);
        }

        Self {
            channels,

            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            i2c1: I2c1Pins {
                scl: gpiob.pb8.into_alternate_open_drain::<4>(),
                sda: gpiob.pb9.into_alternate_open_drain::<4>(),
            },
        }
    }
}

impl OutputBank for ChannelPins {
    #[inline]
    fn set_high(&mut self, channel: Channel) {
        match channel {
            Channel::Ch0 => self.ch0.set_high(),
            Channel::Ch1 => self.ch1.set_high(),
            Channel::Ch2 => self.ch2.set_high(),
            Channel::Ch3 => self.ch3.set_high(),
        }
    }

    #[inline]
    fn set_low(&mut self, channel: Channel) {
        match channel {
            Channel::Ch0 => self.ch0.set_low(),
            Channel::Ch1 => self.ch1.set_low(),
            Channel::Ch2 => self.ch2.set_low(),
            Channel::Ch3 => self.ch3.set_low(),
        }
    }
}
