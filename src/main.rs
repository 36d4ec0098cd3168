#![cfg_attr(target_os = "none", no_main)]
#![cfg_attr(target_os = "none", no_std)]

#[cfg(target_os = "none")]
mod app {
    use core::cell::RefCell;
    use core::fmt::Write as _;
    use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    use cortex_m_rt::entry;
    use critical_section::Mutex;
    use panic_halt as _;

    use hal::{
        pac::{self, interrupt},
        prelude::*,
        serial::{Config, Serial},
    };
    use stm32f7xx_hal as hal;

    use quadppm::config::{DEFAULT_DUTY, SLAVE_ADDRESS, USART_BAUD};
    use quadppm::hw::{BoardPins, ChannelPins, FrameDriver, FrameTimer, I2cSlave, Usart};
    use quadppm::registers::RegisterFile;
    use quadppm::timing::SharedTiming;
    use quadppm::update::Updater;

    /// Off-time table: written by the main loop, read by TIM3.
    static TIMING: SharedTiming = SharedTiming::new();

    /// Register file: written by I2C1_EV, consumed by the main loop.
    static REGISTERS: RegisterFile = RegisterFile::new();

    /// Hand-off slot; TIM3 moves the driver out on its first entry.
    static FRAME: Mutex<RefCell<Option<FrameDriver<ChannelPins>>>> =
        Mutex::new(RefCell::new(None));

    /// Hand-off slot; I2C1_EV moves the slave out on its first entry.
    static BUS: Mutex<RefCell<Option<I2cSlave>>> = Mutex::new(RefCell::new(None));

    /// Set by I2C1_ER, consumed by I2C1_EV.
    static BUS_RESET: AtomicBool = AtomicBool::new(false);

    /// Protocol errors seen by the bus interrupt, reported from the main loop.
    static BUS_ERRORS: AtomicU32 = AtomicU32::new(0);

    // Upper nibble only on this core. Lower value preempts.
    const FRAME_PRIORITY: u8 = 0x10;
    const BUS_PRIORITY: u8 = 0x20;

    #[entry]
    fn main() -> ! {
        // Peripherals
        let mut cp = pac::CorePeripherals::take().unwrap();
        let dp = pac::Peripherals::take().unwrap();

        // Clocks (16 MHz HSI; TIM3 and I2C1 both run from PCLK1)
        let rcc = dp.RCC.constrain();
        let clocks = rcc.cfgr.freeze();

        // GPIO
        let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD);

        // USART1 (DBG)
        let usart_cfg = Config {
            baud_rate: USART_BAUD.bps(),
            ..Default::default()
        };
        let serial = Serial::new(
            dp.USART1,
            (pins.usart1.tx, pins.usart1.rx),
            &clocks,
            usart_cfg,
        );
        let mut log = cfg!(feature = "uart-log").then(|| Usart::new(serial));

        // TIM3 frame timer and I2C1 slave
        let mut frame = FrameDriver::new(FrameTimer::tim3(dp.TIM3), pins.channels);
        let bus = I2cSlave::i2c1(dp.I2C1, pins.i2c1, SLAVE_ADDRESS);

        // All channels start at the window midpoint before any interrupt can fire.
        critical_section::with(|cs| {
            frame.start(&TIMING);
            FRAME.borrow(cs).replace(Some(frame));
            BUS.borrow(cs).replace(Some(bus));
        });

        // Edges outrank the bus; both I2C vectors share a level so neither preempts the other.
        unsafe {
            cp.NVIC.set_priority(pac::Interrupt::TIM3, FRAME_PRIORITY);
            cp.NVIC.set_priority(pac::Interrupt::I2C1_EV, BUS_PRIORITY);
            cp.NVIC.set_priority(pac::Interrupt::I2C1_ER, BUS_PRIORITY);
            pac::NVIC::unmask(pac::Interrupt::TIM3);
            pac::NVIC::unmask(pac::Interrupt::I2C1_EV);
            pac::NVIC::unmask(pac::Interrupt::I2C1_ER);
        }

        if let Some(usart) = log.as_mut() {
            let _ = write!(
                usart,
                "quadppm: slave {:#04x}, default duty {}\r\n",
                SLAVE_ADDRESS, DEFAULT_DUTY
            );
        }

        let updater = Updater::new(&REGISTERS, &TIMING);
        let mut reported_errors = 0;

        loop {
            if let Some(accepted) = updater.poll() {
                if let Some(usart) = log.as_mut() {
                    usart.log_accepted(&accepted);
                }
            }

            let errors = BUS_ERRORS.load(Ordering::Relaxed);
            if errors != reported_errors {
                reported_errors = errors;
                if let Some(usart) = log.as_mut() {
                    let _ = write!(usart, "bus: {} protocol errors\r\n", errors);
                }
            }
        }
    }

    #[interrupt]
    fn TIM3() {
        static mut DRIVER: Option<FrameDriver<ChannelPins>> = None;

        if DRIVER.is_none() {
            *DRIVER = critical_section::with(|cs| FRAME.borrow(cs).take());
        }
        if let Some(driver) = DRIVER.as_mut() {
            driver.service(&TIMING);
        }
    }

    #[interrupt]
    fn I2C1_EV() {
        static mut SLAVE: Option<I2cSlave> = None;

        if SLAVE.is_none() {
            *SLAVE = critical_section::with(|cs| BUS.borrow(cs).take());
        }
        if let Some(bus) = SLAVE.as_mut() {
            if BUS_RESET.swap(false, Ordering::Acquire) {
                bus.reset();
            }
            if bus.on_event(&REGISTERS).is_err() {
                BUS_ERRORS.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    #[interrupt]
    fn I2C1_ER() {
        I2cSlave::clear_errors();
        BUS_RESET.store(true, Ordering::Release);
    }
}

/// Host builds carry the library only; the firmware image targets `thumbv7em-none-eabihf`.
#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("quadppm firmware builds for thumbv7em-none-eabihf; run `cargo test` for the host tests");
}
