use core::fmt;

use embedded_hal::digital;

use crate::config::ConfigError;

/// Errors generated by the AW9106 driver
#[derive(Debug)]
pub enum AW9106Error<E> {
    /// I2C bus error, the last one seen after all retries were used
    I2CError(E),
    /// The identity register never returned the AW9106 chip id. Holds the last value read.
    IdentityMismatch(u8),
    /// The device configuration is incomplete or malformed
    Configuration(ConfigError),
    /// The operation needs a reset line and none was configured
    UnsupportedCapability,
    /// The reset line could not be driven
    ResetPin(digital::ErrorKind),
    /// Control surface input could not be parsed
    InvalidInput,
    /// Control surface output could not be written
    Format,
}

impl<E> AW9106Error<E> {
    fn message(&self) -> &'static str {
        match self {
            AW9106Error::I2CError(_) => "I2C error",
            AW9106Error::IdentityMismatch(_) => "AW9106 not found",
            AW9106Error::Configuration(_) => "configuration error",
            AW9106Error::UnsupportedCapability => "no reset line configured",
            AW9106Error::ResetPin(_) => "reset line error",
            AW9106Error::InvalidInput => "invalid input",
            AW9106Error::Format => "output buffer full",
        }
    }
}

impl<E> From<ConfigError> for AW9106Error<E> {
    fn from(error: ConfigError) -> Self {
        AW9106Error::Configuration(error)
    }
}

impl<E> From<fmt::Error> for AW9106Error<E> {
    fn from(_: fmt::Error) -> Self {
        AW9106Error::Format
    }
}

impl<E> fmt::Display for AW9106Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AW9106Error::IdentityMismatch(id) => write!(f, "{} (id 0x{:02x})", self.message(), id),
            AW9106Error::Configuration(error) => write!(f, "{}: {}", self.message(), error),
            _ => f.write_str(self.message()),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for AW9106Error<E> {}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for AW9106Error<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            AW9106Error::IdentityMismatch(id) => {
                defmt::write!(fmt, "{} (id {=u8:#x})", self.message(), id)
            }
            AW9106Error::Configuration(error) => {
                defmt::write!(fmt, "{}: {}", self.message(), error)
            }
            _ => defmt::write!(fmt, "{}", self.message()),
        }
    }
}

#[cfg(feature = "ufmt")]
impl<E> ufmt::uDisplay for AW9106Error<E> {
    fn fmt<W>(&self, w: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        match self {
            AW9106Error::IdentityMismatch(id) => {
                ufmt::uwrite!(w, "{} (id {})", self.message(), id)
            }
            AW9106Error::Configuration(error) => {
                ufmt::uwrite!(w, "{}: {}", self.message(), error)
            }
            _ => ufmt::uwrite!(w, "{}", self.message()),
        }
    }
}
