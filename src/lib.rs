//! This Rust `embedded-hal`-based library is a simple way to control the AW9106 LED driver.
//! The AW9106 is a 6-channel LED driver with 256-step dimming and a breathing/blink engine. It is
//! controlled via I2C and has an optional active-low reset line. This driver is designed for the
//! `no_std` environment, so it can be used in embedded systems.
//!
//! All six channels are driven in lock-step as a single LED: every brightness write goes to all
//! six dimming registers.
//! ## Usage
//! Add this to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! aw9106 = "0.1"
//! ```
//! Then to create a new driver:
//! ```rust
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::i2c::I2c;
//! use aw9106::{AW9106Driver, BreathTiming, Config};
//!
//! // board setup
//! let i2c = ...; // I2C peripheral
//! let delay = ...; // DelayNs implementation
//! let reset = ...; // optional OutputPin wired to the RSTN pin
//!
//! let config = Config::builder()
//!     .name("aw9106_led")
//!     .imax(3)
//!     .brightness(0)
//!     .max_brightness(255)
//!     .timing(BreathTiming::new(2, 3, 1, 5))
//!     .build()?;
//!
//! // create the driver, pulse the reset line and check the chip id
//! let mut driver = AW9106Driver::new(i2c, delay, config).with_reset_pin(reset);
//! if let Err(e) = driver.init() {
//!    panic!("Error initializing AW9106 driver: {:?}", e);
//! }
//! ```
//! ## Features
//! ### Static mode
//! ```rust
//! driver.set_static(128)?;
//! ```
//! ### Blink mode
//! The breathing engine fades in over `rise`, holds for `on`, fades out over `fall` and stays
//! off for `off`, using the timer codes from the configuration.
//! ```rust
//! driver.set_blink(true)?;
//! // back to static mode with all channels off
//! driver.set_blink(false)?;
//! ```
//! ### Shared access
//! [`SharedAW9106`] serializes every register sequence behind a mutex and defers brightness
//! changes to a worker, so brightness can be requested from contexts that must not block on
//! the bus.
//! ## License
//! This library is licensed under the MIT license.

#![no_std]

#[cfg(test)]
extern crate std;

// must come first so the logging macros are in scope for the other modules
#[macro_use]
mod fmt;

pub mod config;
mod control;
mod error;
pub mod registers;
mod shared;

use core::convert::Infallible;

use embedded_hal::{
    delay::DelayNs,
    digital::{self, OutputPin, StatefulOutputPin},
    i2c,
};

use crate::registers::*;

pub use crate::config::{BreathTiming, Config, ConfigBuilder, ConfigError};
pub use crate::error::AW9106Error;
pub use crate::shared::SharedAW9106;

/// Attempts made for every bus transfer before giving up.
const I2C_RETRIES: u8 = 5;
const I2C_RETRY_DELAY_MS: u32 = 5;
/// Attempts made to read a matching chip id.
const CHIP_ID_RETRIES: u8 = 5;
const CHIP_ID_RETRY_DELAY_MS: u32 = 5;
const RESET_DELAY_MS: u32 = 1;

/// Placeholder reset line type for a driver built without one. It has no values, so a driver
/// using it never has a reset line to drive.
#[derive(Debug)]
pub enum NoResetPin {}

impl digital::ErrorType for NoResetPin {
    type Error = Infallible;
}

impl OutputPin for NoResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        match *self {}
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        match *self {}
    }
}

impl StatefulOutputPin for NoResetPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        match *self {}
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        match *self {}
    }
}

pub struct AW9106Driver<I2C, DELAY, RST = NoResetPin>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
    RST: OutputPin,
{
    i2c: I2C,
    address: u8,
    delay: DELAY,
    reset: Option<RST>,
    chip_id: Option<u8>,
    config: Config,
}

impl<I2C, DELAY> AW9106Driver<I2C, DELAY, NoResetPin>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
{
    /// Create a new AW9106 driver with the default address (0x58) and no reset line.
    pub fn new(i2c: I2C, delay: DELAY, config: Config) -> Self {
        Self::new_with_address(i2c, delay, config, Self::default_address())
    }

    /// Create a new AW9106 driver with a specific address.
    /// The address is selected by the AD0 and AD1 pins:
    /// - 0x58 when AD1 and AD0 are connected to GND
    /// - 0x59 when AD1 is connected to GND and AD0 to VDD
    /// - 0x5A when AD1 is connected to VDD and AD0 to GND
    /// - 0x5B when AD1 and AD0 are connected to VDD
    pub fn new_with_address(i2c: I2C, delay: DELAY, mut config: Config, address: u8) -> Self {
        config.brightness = config.brightness.min(config.max_brightness);
        Self {
            i2c,
            address,
            delay,
            reset: None,
            chip_id: None,
            config,
        }
    }

    /// Attach the output pin wired to the RSTN pin. The pin is active low.
    pub fn with_reset_pin<RST: OutputPin>(self, reset: RST) -> AW9106Driver<I2C, DELAY, RST> {
        AW9106Driver {
            i2c: self.i2c,
            address: self.address,
            delay: self.delay,
            reset: Some(reset),
            chip_id: self.chip_id,
            config: self.config,
        }
    }
}

impl<I2C, DELAY, RST> AW9106Driver<I2C, DELAY, RST>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
    RST: OutputPin,
{
    /// Default address for the AW9106. This is the address when AD0 and AD1 are connected to GND.
    pub fn default_address() -> u8 {
        0x58
    }

    /// Get a mutable reference to the I2C bus used by the driver
    pub fn i2c(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Give back the bus, the delay and the reset line, if any.
    pub fn release(self) -> (I2C, DELAY, Option<RST>) {
        (self.i2c, self.delay, self.reset)
    }

    /// The chip id, once [`Self::identify`] has succeeded.
    pub fn chip_id(&self) -> Option<u8> {
        self.chip_id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Name of the LED endpoint.
    pub fn name(&self) -> &str {
        self.config.name.as_str()
    }

    /// Current brightness: the last value stored or applied, or the configured initial brightness.
    pub fn brightness(&self) -> u8 {
        self.config.brightness
    }

    pub fn max_brightness(&self) -> u8 {
        self.config.max_brightness
    }

    pub fn has_reset_pin(&self) -> bool {
        self.reset.is_some()
    }

    /// Bring the chip up: pulse the reset line if there is one, then check the chip id.
    /// The device must not be used if this fails.
    pub fn init(&mut self) -> Result<&mut Self, AW9106Error<I2C::Error>> {
        match self.reset() {
            Ok(_) | Err(AW9106Error::UnsupportedCapability) => {}
            Err(e) => return Err(e),
        }
        self.identify()?;
        info!("aw9106 init completed");
        Ok(self)
    }

    /// Write a register, retrying failed transfers. The last bus error is returned once all
    /// attempts have failed.
    pub fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<&mut Self, AW9106Error<I2C::Error>> {
        let mut attempt = 0;
        loop {
            match self.i2c.write(self.address, &[register, value]) {
                Ok(()) => return Ok(self),
                Err(e) => {
                    attempt += 1;
                    error!(
                        "i2c write reg {=u8:#x} attempt {} failed",
                        register, attempt
                    );
                    if attempt >= I2C_RETRIES {
                        return Err(AW9106Error::I2CError(e));
                    }
                    self.delay.delay_ms(I2C_RETRY_DELAY_MS);
                }
            }
        }
    }

    /// Read a register, retrying failed transfers the same way as [`Self::write_register`].
    pub fn read_register(&mut self, register: u8) -> Result<u8, AW9106Error<I2C::Error>> {
        let mut buffer = [0u8; 1];
        let mut attempt = 0;
        loop {
            match self.i2c.write_read(self.address, &[register], &mut buffer) {
                Ok(()) => return Ok(buffer[0]),
                Err(e) => {
                    attempt += 1;
                    error!("i2c read reg {=u8:#x} attempt {} failed", register, attempt);
                    if attempt >= I2C_RETRIES {
                        return Err(AW9106Error::I2CError(e));
                    }
                    self.delay.delay_ms(I2C_RETRY_DELAY_MS);
                }
            }
        }
    }

    /// Read `register`, keep the bits in `mask`, set the bits in `value` and write it back.
    /// The read and the write are separate transfers.
    pub fn update_register_bits(
        &mut self,
        register: u8,
        mask: u8,
        value: u8,
    ) -> Result<&mut Self, AW9106Error<I2C::Error>> {
        let current = self.read_register(register)?;
        self.write_register(register, (current & mask) | value)
    }

    /// Read the chip id until it matches the AW9106 id. A bus failure ends the search at once.
    pub fn identify(&mut self) -> Result<u8, AW9106Error<I2C::Error>> {
        let mut last = 0;
        for attempt in 0..CHIP_ID_RETRIES {
            if attempt > 0 {
                self.delay.delay_ms(CHIP_ID_RETRY_DELAY_MS);
            }
            last = self.read_register(REGISTER_ID)?;
            if last == CHIP_ID {
                info!("aw9106 detected");
                self.chip_id = Some(last);
                return Ok(last);
            }
            warn!("unsupported device revision ({=u8:#x})", last);
        }
        Err(AW9106Error::IdentityMismatch(last))
    }

    /// Issue a software reset. All registers return to their power-on values.
    pub fn soft_reset(&mut self) -> Result<&mut Self, AW9106Error<I2C::Error>> {
        self.write_register(REGISTER_SOFTWARE_RESET, SOFTWARE_RESET_VALUE)
    }

    /// Record a new brightness, clamped to the configured maximum, without touching the bus.
    /// The next [`Self::set_blink`] uses it; [`Self::set_static`] writes it out.
    pub fn store_brightness(&mut self, brightness: u8) -> u8 {
        self.config.brightness = brightness.min(self.config.max_brightness);
        self.config.brightness
    }

    /// Put all channels in static mode at `brightness`, clamped to the configured maximum.
    pub fn set_static(&mut self, brightness: u8) -> Result<&mut Self, AW9106Error<I2C::Error>> {
        let brightness = self.store_brightness(brightness);
        self.write_static_sequence(brightness)
    }

    /// Start the breathing engine on all channels, or return to static mode with all channels
    /// off. Turning blink off leaves the stored brightness untouched.
    pub fn set_blink(&mut self, enabled: bool) -> Result<&mut Self, AW9106Error<I2C::Error>> {
        if !enabled {
            return self.write_static_sequence(0);
        }

        let brightness = self.config.brightness.min(self.config.max_brightness);
        let timing = self.config.timing;
        let imax = self.config.imax & FIELD_MASK;

        self.write_register(REGISTER_WORK_MODE_P0, WORK_MODE_LED)?
            .write_register(REGISTER_WORK_MODE_P1, WORK_MODE_LED)?
            .write_register(REGISTER_BREATH_ENABLE, BREATH_ENABLE_ALL)?
            .write_register(REGISTER_CONFIG_P0, CONFIG_P0_BLINK)?
            .write_register(REGISTER_CONFIG_P1, CONFIG_P1_BLINK)?
            .write_register(REGISTER_FADE_TIME, timing.fade_time())?
            .write_register(REGISTER_FULL_TIME, timing.full_time())?
            .write_dimming(brightness)?
            // the control write starts the engine, so it goes last
            .write_register(REGISTER_CONTROL, CONTROL_BLINK_ENABLE | imax)
    }

    /// Pulse the reset line: low for 1 ms, then high for 1 ms.
    pub fn reset(&mut self) -> Result<&mut Self, AW9106Error<I2C::Error>> {
        debug!("aw9106 hw reset");
        let Some(reset) = self.reset.as_mut() else {
            error!("aw9106 hw reset failed: no reset line");
            return Err(AW9106Error::UnsupportedCapability);
        };
        reset.set_low().map_err(pin_error)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        reset.set_high().map_err(pin_error)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        Ok(self)
    }

    /// Hold the chip in reset by driving the reset line low.
    pub fn power_off(&mut self) -> Result<&mut Self, AW9106Error<I2C::Error>> {
        debug!("aw9106 hw off");
        let Some(reset) = self.reset.as_mut() else {
            error!("aw9106 hw off failed: no reset line");
            return Err(AW9106Error::UnsupportedCapability);
        };
        reset.set_low().map_err(pin_error)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        Ok(self)
    }

    /// The static-mode sequence shared by [`Self::set_static`] and `set_blink(false)`. Private method.
    fn write_static_sequence(&mut self, brightness: u8) -> Result<&mut Self, AW9106Error<I2C::Error>> {
        self.write_register(REGISTER_WORK_MODE_P0, WORK_MODE_LED)?
            .write_register(REGISTER_WORK_MODE_P1, WORK_MODE_LED)?
            .write_register(REGISTER_BREATH_ENABLE, BREATH_DISABLE_ALL)?
            .write_register(REGISTER_CONTROL, CONTROL_IMAX_DEFAULT)?
            .write_dimming(brightness)
    }

    /// Write the same level to all six dimming registers. Private method.
    fn write_dimming(&mut self, level: u8) -> Result<&mut Self, AW9106Error<I2C::Error>> {
        for register in DIMMING_REGISTERS {
            self.write_register(register, level)?;
        }
        Ok(self)
    }
}

impl<I2C, DELAY, RST> AW9106Driver<I2C, DELAY, RST>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
    RST: StatefulOutputPin,
{
    /// Logic level the reset line is currently driven to.
    pub fn reset_line_level(&mut self) -> Result<bool, AW9106Error<I2C::Error>> {
        let reset = self
            .reset
            .as_mut()
            .ok_or(AW9106Error::UnsupportedCapability)?;
        reset.is_set_high().map_err(pin_error)
    }
}

fn pin_error<P: digital::Error, E>(error: P) -> AW9106Error<E> {
    AW9106Error::ResetPin(error.kind())
}


#[cfg(test)]
mod tests {
    use super::test_utils::*;
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction},
        i2c::{Mock as I2cMock, Transaction as I2cTransaction},
    };

    fn failed_write(register: u8, value: u8) -> I2cTransaction {
        write_reg(register, value).with_error(ErrorKind::Other)
    }

    #[test]
    fn test_register_values() {
        assert_eq!(CHIP_ID, 0x23);
        assert_eq!(BREATH_ENABLE_ALL, 0x3f);
        assert_eq!(CONTROL_BLINK_ENABLE, 0x80);
        assert_eq!(CONTROL_IMAX_DEFAULT, 0x03);
    }

    #[test]
    fn test_set_static() {
        let i2c = I2cMock::new(&static_sequence(100));
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config());
        driver.set_static(100).unwrap();
        assert_eq!(driver.brightness(), 100);
        driver.i2c().done();
    }

    #[test]
    fn test_set_static_clamps_to_max_brightness() {
        let mut expectations = static_sequence(200);
        expectations.extend(static_sequence(200));
        let i2c = I2cMock::new(&expectations);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config());
        driver.set_static(201).unwrap();
        assert_eq!(driver.brightness(), 200);
        driver.set_static(255).unwrap();
        assert_eq!(driver.brightness(), 200);
        driver.i2c().done();
    }

    #[test]
    fn test_set_blink_enable() {
        let mut config = test_config();
        config.brightness = 150;
        let mut expectations = std::vec![
            write_reg(REGISTER_WORK_MODE_P0, 0x00),
            write_reg(REGISTER_WORK_MODE_P1, 0x00),
            write_reg(REGISTER_BREATH_ENABLE, 0x3f),
            write_reg(REGISTER_CONFIG_P0, 0x03),
            write_reg(REGISTER_CONFIG_P1, 0x0f),
            write_reg(REGISTER_FADE_TIME, 0x0A),
            write_reg(REGISTER_FULL_TIME, 0x2B),
        ];
        expectations.extend(DIMMING_REGISTERS.iter().map(|r| write_reg(*r, 150)));
        expectations.push(write_reg(REGISTER_CONTROL, 0x83));

        let i2c = I2cMock::new(&expectations);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, config);
        driver.set_blink(true).unwrap();
        driver.i2c().done();
    }

    #[test]
    fn test_set_blink_masks_imax() {
        let mut config = test_config();
        config.imax = 0b1111_1010;
        let mut expectations = std::vec![
            write_reg(REGISTER_WORK_MODE_P0, 0x00),
            write_reg(REGISTER_WORK_MODE_P1, 0x00),
            write_reg(REGISTER_BREATH_ENABLE, 0x3f),
            write_reg(REGISTER_CONFIG_P0, 0x03),
            write_reg(REGISTER_CONFIG_P1, 0x0f),
            write_reg(REGISTER_FADE_TIME, 0x0A),
            write_reg(REGISTER_FULL_TIME, 0x2B),
        ];
        expectations.extend(DIMMING_REGISTERS.iter().map(|r| write_reg(*r, 0)));
        expectations.push(write_reg(REGISTER_CONTROL, 0x82));

        let i2c = I2cMock::new(&expectations);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, config);
        driver.set_blink(true).unwrap();
        driver.i2c().done();
    }

    #[test]
    fn test_set_blink_disable_matches_static_off() {
        let mut config = test_config();
        config.brightness = 80;
        let i2c = I2cMock::new(&static_sequence(0));
        let mut driver = AW9106Driver::new(i2c, NoopDelay, config);
        driver.set_blink(false).unwrap();
        assert_eq!(driver.brightness(), 80);
        driver.i2c().done();
    }

    #[test]
    fn test_store_brightness_clamps_without_bus_traffic() {
        let i2c = I2cMock::new(&[]);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config());
        assert_eq!(driver.store_brightness(120), 120);
        assert_eq!(driver.store_brightness(230), 200);
        assert_eq!(driver.brightness(), 200);
        driver.i2c().done();
    }

    #[test]
    fn test_initial_brightness_is_clamped() {
        let mut config = test_config();
        config.brightness = 250;
        let i2c = I2cMock::new(&[]);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, config);
        assert_eq!(driver.brightness(), 200);
        driver.i2c().done();
    }

    #[test]
    fn test_write_retries_until_fifth_attempt() {
        let expectations = [
            failed_write(REGISTER_OUTPUT_P0, 0x55),
            failed_write(REGISTER_OUTPUT_P0, 0x55),
            failed_write(REGISTER_OUTPUT_P0, 0x55),
            failed_write(REGISTER_OUTPUT_P0, 0x55),
            write_reg(REGISTER_OUTPUT_P0, 0x55),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config());
        assert!(driver.write_register(REGISTER_OUTPUT_P0, 0x55).is_ok());
        driver.i2c().done();
    }

    #[test]
    fn test_write_gives_up_after_five_attempts() {
        let expectations = [
            failed_write(REGISTER_OUTPUT_P0, 0x55),
            failed_write(REGISTER_OUTPUT_P0, 0x55),
            failed_write(REGISTER_OUTPUT_P0, 0x55),
            failed_write(REGISTER_OUTPUT_P0, 0x55),
            failed_write(REGISTER_OUTPUT_P0, 0x55),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config());
        assert!(matches!(
            driver.write_register(REGISTER_OUTPUT_P0, 0x55),
            Err(AW9106Error::I2CError(ErrorKind::Other))
        ));
        driver.i2c().done();
    }

    #[test]
    fn test_read_retries_until_fifth_attempt() {
        let expectations = [
            read_reg(REGISTER_INPUT_P1, 0x00).with_error(ErrorKind::Other),
            read_reg(REGISTER_INPUT_P1, 0x00).with_error(ErrorKind::Other),
            read_reg(REGISTER_INPUT_P1, 0x00).with_error(ErrorKind::Other),
            read_reg(REGISTER_INPUT_P1, 0x00).with_error(ErrorKind::Other),
            read_reg(REGISTER_INPUT_P1, 0xA5),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config());
        assert_eq!(driver.read_register(REGISTER_INPUT_P1).unwrap(), 0xA5);
        driver.i2c().done();
    }

    #[test]
    fn test_read_gives_up_after_five_attempts() {
        let expectations = [
            read_reg(REGISTER_INPUT_P1, 0x00).with_error(ErrorKind::Other),
            read_reg(REGISTER_INPUT_P1, 0x00).with_error(ErrorKind::Other),
            read_reg(REGISTER_INPUT_P1, 0x00).with_error(ErrorKind::Other),
            read_reg(REGISTER_INPUT_P1, 0x00).with_error(ErrorKind::Other),
            read_reg(REGISTER_INPUT_P1, 0x00).with_error(ErrorKind::Other),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config());
        assert!(matches!(
            driver.read_register(REGISTER_INPUT_P1),
            Err(AW9106Error::I2CError(ErrorKind::Other))
        ));
        driver.i2c().done();
    }

    #[test]
    fn test_sequence_stops_at_failed_write() {
        let expectations = [
            write_reg(REGISTER_WORK_MODE_P0, 0x00),
            failed_write(REGISTER_WORK_MODE_P1, 0x00),
            failed_write(REGISTER_WORK_MODE_P1, 0x00),
            failed_write(REGISTER_WORK_MODE_P1, 0x00),
            failed_write(REGISTER_WORK_MODE_P1, 0x00),
            failed_write(REGISTER_WORK_MODE_P1, 0x00),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config());
        assert!(driver.set_static(10).is_err());
        driver.i2c().done();
    }

    #[test]
    fn test_update_register_bits() {
        let expectations = [
            read_reg(REGISTER_CONTROL, 0b1000_0011),
            write_reg(REGISTER_CONTROL, 0b0000_0011 | 0b0001_0000),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config());
        driver
            .update_register_bits(REGISTER_CONTROL, 0b0000_1111, 0b0001_0000)
            .unwrap();
        driver.i2c().done();
    }

    #[test]
    fn test_identify() {
        let expectations = [read_reg(REGISTER_ID, 0x00), read_reg(REGISTER_ID, 0x23)];
        let i2c = I2cMock::new(&expectations);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config());
        assert_eq!(driver.chip_id(), None);
        assert_eq!(driver.identify().unwrap(), 0x23);
        assert_eq!(driver.chip_id(), Some(0x23));
        driver.i2c().done();
    }

    #[test]
    fn test_identify_mismatch() {
        let expectations = [
            read_reg(REGISTER_ID, 0x00),
            read_reg(REGISTER_ID, 0x22),
            read_reg(REGISTER_ID, 0x24),
            read_reg(REGISTER_ID, 0xFF),
            read_reg(REGISTER_ID, 0x13),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config());
        assert!(matches!(
            driver.identify(),
            Err(AW9106Error::IdentityMismatch(0x13))
        ));
        assert_eq!(driver.chip_id(), None);
        driver.i2c().done();
    }

    #[test]
    fn test_identify_bus_failure_is_fatal() {
        let mut expectations = std::vec![read_reg(REGISTER_ID, 0x00)];
        expectations.extend(
            (0..5).map(|_| read_reg(REGISTER_ID, 0x00).with_error(ErrorKind::Other)),
        );
        let i2c = I2cMock::new(&expectations);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config());
        assert!(matches!(
            driver.identify(),
            Err(AW9106Error::I2CError(ErrorKind::Other))
        ));
        driver.i2c().done();
    }

    #[test]
    fn test_soft_reset() {
        let i2c = I2cMock::new(&[write_reg(REGISTER_SOFTWARE_RESET, 0x00)]);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config());
        driver.soft_reset().unwrap();
        driver.i2c().done();
    }

    #[test]
    fn test_reset_without_pin() {
        let i2c = I2cMock::new(&[]);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config());
        assert!(!driver.has_reset_pin());
        assert!(matches!(
            driver.reset(),
            Err(AW9106Error::UnsupportedCapability)
        ));
        assert!(matches!(
            driver.power_off(),
            Err(AW9106Error::UnsupportedCapability)
        ));
        driver.i2c().done();
    }

    #[test]
    fn test_reset_and_power_off() {
        let pin_expectations = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ];
        let i2c = I2cMock::new(&[]);
        let pin = PinMock::new(&pin_expectations);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config()).with_reset_pin(pin);
        driver.reset().unwrap().power_off().unwrap();

        let (mut i2c, _, pin) = driver.release();
        i2c.done();
        pin.unwrap().done();
    }

    #[test]
    fn test_init_resets_then_identifies() {
        let pin_expectations = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let i2c = I2cMock::new(&[read_reg(REGISTER_ID, 0x23)]);
        let pin = PinMock::new(&pin_expectations);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config()).with_reset_pin(pin);
        driver.init().unwrap();
        assert_eq!(driver.chip_id(), Some(0x23));

        let (mut i2c, _, pin) = driver.release();
        i2c.done();
        pin.unwrap().done();
    }

    #[test]
    fn test_init_without_reset_pin() {
        let i2c = I2cMock::new(&[read_reg(REGISTER_ID, 0x23)]);
        let mut driver = AW9106Driver::new(i2c, NoopDelay, test_config());
        driver.init().unwrap();
        driver.i2c().done();
    }
}
