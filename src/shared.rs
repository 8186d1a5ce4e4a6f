//! Serialized access to an [`AW9106Driver`] with deferred brightness updates.
//!
//! Every register sequence runs with the driver locked, so a brightness update can never
//! interleave with a blink toggle or a control surface write. Brightness requests go through a
//! single-slot [`Signal`]: posting never touches the bus, and a request that arrives before the
//! worker has run replaces the pending one.
use core::cell::RefCell;

use embassy_sync::{
    blocking_mutex::{raw::RawMutex, Mutex},
    signal::Signal,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, i2c};

use crate::{AW9106Driver, AW9106Error, NoResetPin};

/// An [`AW9106Driver`] behind a blocking mutex, with a brightness worker.
///
/// The lock is held for a whole register sequence, retry delays included, which can take
/// hundreds of milliseconds when the bus misbehaves. With `CriticalSectionRawMutex` that means
/// interrupts stay masked for that long; prefer `ThreadModeRawMutex` or `NoopRawMutex` when the
/// device is only used from thread mode or a single executor.
pub struct SharedAW9106<M, I2C, DELAY, RST = NoResetPin>
where
    M: RawMutex,
    I2C: i2c::I2c,
    DELAY: DelayNs,
    RST: OutputPin,
{
    driver: Mutex<M, RefCell<AW9106Driver<I2C, DELAY, RST>>>,
    brightness_request: Signal<M, u8>,
}

impl<M, I2C, DELAY, RST> SharedAW9106<M, I2C, DELAY, RST>
where
    M: RawMutex,
    I2C: i2c::I2c,
    DELAY: DelayNs,
    RST: OutputPin,
{
    /// Wrap an initialized driver.
    pub fn new(driver: AW9106Driver<I2C, DELAY, RST>) -> Self {
        Self {
            driver: Mutex::new(RefCell::new(driver)),
            brightness_request: Signal::new(),
        }
    }

    /// Run `f` with exclusive access to the driver.
    ///
    /// `f` must not call back into this `SharedAW9106`: the driver is already borrowed and the
    /// nested borrow panics.
    pub fn with_driver<R>(&self, f: impl FnOnce(&mut AW9106Driver<I2C, DELAY, RST>) -> R) -> R {
        self.driver.lock(|driver| f(&mut driver.borrow_mut()))
    }

    /// Request a new static brightness. The clamped level is stored at once, so a following
    /// blink uses it, but the register writes are left to the brightness worker.
    pub fn set_brightness(&self, brightness: u8) {
        let brightness = self.with_driver(|driver| driver.store_brightness(brightness));
        self.brightness_request.signal(brightness);
    }

    /// Apply the pending brightness request, if there is one. Returns whether one was applied.
    pub fn apply_pending_brightness(&self) -> bool {
        match self.brightness_request.try_take() {
            Some(brightness) => {
                self.apply_brightness(brightness);
                true
            }
            None => false,
        }
    }

    /// Wait for the next brightness request and apply it.
    pub async fn process_brightness_request(&self) {
        let brightness = self.brightness_request.wait().await;
        self.apply_brightness(brightness);
    }

    /// Brightness worker loop. Spawn this once per device.
    pub async fn run_brightness_worker(&self) -> ! {
        loop {
            self.process_brightness_request().await;
        }
    }

    /// Start or stop blinking. Runs on the calling context.
    pub fn blink(&self, enabled: bool) -> Result<(), AW9106Error<I2C::Error>> {
        self.with_driver(|driver| driver.set_blink(enabled).map(|_| ()))
    }

    pub fn store_reg(&self, input: &str) -> Result<(), AW9106Error<I2C::Error>> {
        self.with_driver(|driver| driver.store_reg(input))
    }

    pub fn show_reg<W: core::fmt::Write>(
        &self,
        out: &mut W,
    ) -> Result<(), AW9106Error<I2C::Error>> {
        self.with_driver(|driver| driver.show_reg(out))
    }

    pub fn store_hwen(&self, input: &str) -> Result<(), AW9106Error<I2C::Error>> {
        self.with_driver(|driver| driver.store_hwen(input))
    }

    pub fn store_blink(&self, input: &str) -> Result<(), AW9106Error<I2C::Error>> {
        self.with_driver(|driver| driver.store_blink(input))
    }

    pub fn show_blink<W: core::fmt::Write>(
        &self,
        out: &mut W,
    ) -> Result<(), AW9106Error<I2C::Error>> {
        self.with_driver(|driver| driver.show_blink(out))
    }

    /// Take the driver back. Any pending brightness request is dropped.
    pub fn into_inner(self) -> AW9106Driver<I2C, DELAY, RST> {
        self.driver.into_inner().into_inner()
    }

    /// Nobody is waiting on the worker, so failures end here.
    fn apply_brightness(&self, brightness: u8) {
        debug!("aw9106 brightness {}", brightness);
        if let Err(_e) = self.with_driver(|driver| driver.set_static(brightness).map(|_| ())) {
            error!("aw9106 failed to apply brightness {}", brightness);
        }
    }
}

impl<M, I2C, DELAY, RST> SharedAW9106<M, I2C, DELAY, RST>
where
    M: RawMutex,
    I2C: i2c::I2c,
    DELAY: DelayNs,
    RST: embedded_hal::digital::StatefulOutputPin,
{
    pub fn show_hwen<W: core::fmt::Write>(
        &self,
        out: &mut W,
    ) -> Result<(), AW9106Error<I2C::Error>> {
        self.with_driver(|driver| driver.show_hwen(out))
    }
}
