//! Text control surface: the `reg`, `hwen` and `blink` attributes.
//!
//! `store_*` handlers take the text written by the user, `show_*` handlers render into any
//! [`core::fmt::Write`] sink.
use core::fmt::Write;

use embedded_hal::{
    delay::DelayNs,
    digital::{OutputPin, StatefulOutputPin},
    i2c,
};

use crate::registers::readable_registers;
use crate::{AW9106Driver, AW9106Error};

const BLINK_HELP: &str = "aw9106_blink()\necho 0 > blink\necho 1 > blink\n";

/// Parse a hex integer with an optional `0x` prefix.
fn parse_hex_u32(token: &str) -> Option<u32> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u32::from_str_radix(digits, 16).ok()
}

/// Register addresses and values are truncated to their low 8 bits.
fn parse_hex(token: &str) -> Option<u8> {
    parse_hex_u32(token).map(|value| value as u8)
}

impl<I2C, DELAY, RST> AW9106Driver<I2C, DELAY, RST>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
    RST: OutputPin,
{
    /// `reg` write: `"REG VAL"` as two hex integers. The value is written as-is, read-only
    /// registers included.
    pub fn store_reg(&mut self, input: &str) -> Result<(), AW9106Error<I2C::Error>> {
        let mut tokens = input.split_whitespace();
        let (Some(register), Some(value)) = (
            tokens.next().and_then(parse_hex),
            tokens.next().and_then(parse_hex),
        ) else {
            return Err(AW9106Error::InvalidInput);
        };
        self.write_register(register, value)?;
        Ok(())
    }

    /// `reg` read: one `reg:0xRR=0xVV` line per readable register, in address order.
    pub fn show_reg<W: Write>(&mut self, out: &mut W) -> Result<(), AW9106Error<I2C::Error>> {
        for register in readable_registers() {
            let value = self.read_register(register)?;
            writeln!(out, "reg:0x{:02x}=0x{:02x}", register, value)?;
        }
        Ok(())
    }

    /// `hwen` write: a hex integer. Nonzero pulses the reset line, zero holds the chip in reset.
    pub fn store_hwen(&mut self, input: &str) -> Result<(), AW9106Error<I2C::Error>> {
        let enable = input
            .split_whitespace()
            .next()
            .and_then(parse_hex_u32)
            .ok_or(AW9106Error::InvalidInput)?;
        if enable != 0 {
            self.reset()?;
        } else {
            self.power_off()?;
        }
        Ok(())
    }

    /// `blink` write: a decimal integer. Nonzero starts blinking, zero turns all channels off.
    pub fn store_blink(&mut self, input: &str) -> Result<(), AW9106Error<I2C::Error>> {
        let blink = input
            .split_whitespace()
            .next()
            .and_then(|token| token.parse::<i32>().ok())
            .ok_or(AW9106Error::InvalidInput)?;
        self.set_blink(blink != 0)?;
        Ok(())
    }

    /// `blink` read: usage text.
    pub fn show_blink<W: Write>(&self, out: &mut W) -> Result<(), AW9106Error<I2C::Error>> {
        out.write_str(BLINK_HELP)?;
        Ok(())
    }
}

impl<I2C, DELAY, RST> AW9106Driver<I2C, DELAY, RST>
where
    I2C: i2c::I2c,
    DELAY: DelayNs,
    RST: StatefulOutputPin,
{
    /// `hwen` read: `hwen=<level>` for the reset line.
    pub fn show_hwen<W: Write>(&mut self, out: &mut W) -> Result<(), AW9106Error<I2C::Error>> {
        let level = self.reset_line_level()?;
        writeln!(out, "hwen={}", u8::from(level))?;
        Ok(())
    }
}
