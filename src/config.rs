//! Device configuration supplied when the AW9106 is attached.
//!
//! A [`Config`] is either built field by field with [`ConfigBuilder`], or parsed from the
//! `aw9106,*` key/value properties a board description carries for the LED node:
//!
//! ```rust
//! let config = Config::from_properties([
//!     ("aw9106,name", "aw9106_led"),
//!     ("aw9106,imax", "3"),
//!     ("aw9106,brightness", "128"),
//!     ("aw9106,max_brightness", "255"),
//!     ("aw9106,rise_time", "2"),
//!     ("aw9106,on_time", "3"),
//!     ("aw9106,fall_time", "1"),
//!     ("aw9106,off_time", "5"),
//! ])?;
//! ```
use core::fmt;

use heapless::String;

/// Capacity of the LED endpoint name.
pub const NAME_CAPACITY: usize = 32;

const PROPERTY_NAME: &str = "aw9106,name";
const PROPERTY_IMAX: &str = "aw9106,imax";
const PROPERTY_BRIGHTNESS: &str = "aw9106,brightness";
const PROPERTY_MAX_BRIGHTNESS: &str = "aw9106,max_brightness";
const PROPERTY_RISE_TIME: &str = "aw9106,rise_time";
const PROPERTY_ON_TIME: &str = "aw9106,on_time";
const PROPERTY_FALL_TIME: &str = "aw9106,fall_time";
const PROPERTY_OFF_TIME: &str = "aw9106,off_time";

/// Errors produced while assembling a [`Config`]. Each variant names the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field was never supplied
    Missing(&'static str),
    /// A field value could not be parsed or does not fit in a register
    Invalid(&'static str),
    /// The LED name does not fit in [`NAME_CAPACITY`] bytes
    NameTooLong,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(field) => write!(f, "missing {}", field),
            ConfigError::Invalid(field) => write!(f, "invalid {}", field),
            ConfigError::NameTooLong => f.write_str("name too long"),
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ConfigError::Missing(field) => defmt::write!(fmt, "missing {}", field),
            ConfigError::Invalid(field) => defmt::write!(fmt, "invalid {}", field),
            ConfigError::NameTooLong => defmt::write!(fmt, "name too long"),
        }
    }
}

#[cfg(feature = "ufmt")]
impl ufmt::uDisplay for ConfigError {
    fn fmt<W>(&self, w: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        match self {
            ConfigError::Missing(field) => ufmt::uwrite!(w, "missing {}", *field),
            ConfigError::Invalid(field) => ufmt::uwrite!(w, "invalid {}", *field),
            ConfigError::NameTooLong => ufmt::uwrite!(w, "name too long"),
        }
    }
}

/// Breathing timer codes. Each is a 3-bit hardware field; higher bits are dropped when
/// the value is packed into a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BreathTiming {
    /// Fade-in duration code
    pub rise: u8,
    /// Full-brightness hold code
    pub on: u8,
    /// Fade-out duration code
    pub fall: u8,
    /// Off hold code
    pub off: u8,
}

impl BreathTiming {
    pub fn new(rise: u8, on: u8, fall: u8, off: u8) -> Self {
        Self {
            rise,
            on,
            fall,
            off,
        }
    }

    /// Value of the fade time register: fall in bits 5:3, rise in bits 2:0.
    pub fn fade_time(&self) -> u8 {
        pack_fields(self.fall, self.rise)
    }

    /// Value of the full time register: off in bits 5:3, on in bits 2:0.
    pub fn full_time(&self) -> u8 {
        pack_fields(self.off, self.on)
    }
}

fn pack_fields(high: u8, low: u8) -> u8 {
    use crate::registers::FIELD_MASK;
    ((high & FIELD_MASK) << 3) | (low & FIELD_MASK)
}

/// Attach-time parameters of one AW9106 LED endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name of the LED endpoint
    pub name: String<NAME_CAPACITY>,
    /// Current drive limit code written with blink mode
    pub imax: u8,
    /// Initial brightness
    pub brightness: u8,
    /// Upper bound for every brightness value written to the dimming registers
    pub max_brightness: u8,
    /// Breathing timer codes
    pub timing: BreathTiming,
}

impl Config {
    pub fn builder<'a>() -> ConfigBuilder<'a> {
        ConfigBuilder::default()
    }

    /// Parse a configuration from `aw9106,*` properties. Unknown keys are ignored. Numbers are
    /// decimal, or hexadecimal with a `0x` prefix.
    pub fn from_properties<'a, I>(properties: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut builder = ConfigBuilder::default();
        for (key, value) in properties {
            builder = match key.trim() {
                PROPERTY_NAME => builder.name(value.trim()),
                PROPERTY_IMAX => builder.imax(parse_u8(value, "imax")?),
                PROPERTY_BRIGHTNESS => builder.brightness(parse_u8(value, "brightness")?),
                PROPERTY_MAX_BRIGHTNESS => {
                    builder.max_brightness(parse_u8(value, "max_brightness")?)
                }
                PROPERTY_RISE_TIME => builder.rise_time(parse_u8(value, "rise_time")?),
                PROPERTY_ON_TIME => builder.on_time(parse_u8(value, "on_time")?),
                PROPERTY_FALL_TIME => builder.fall_time(parse_u8(value, "fall_time")?),
                PROPERTY_OFF_TIME => builder.off_time(parse_u8(value, "off_time")?),
                _ => builder,
            };
        }
        builder.build()
    }
}

fn parse_u8(value: &str, field: &'static str) -> Result<u8, ConfigError> {
    let value = value.trim();
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse::<u32>(),
    };
    parsed
        .ok()
        .and_then(|number| u8::try_from(number).ok())
        .ok_or(ConfigError::Invalid(field))
}

/// Field-by-field construction of a [`Config`]. Every field is required.
#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder<'a> {
    name: Option<&'a str>,
    imax: Option<u8>,
    brightness: Option<u8>,
    max_brightness: Option<u8>,
    rise_time: Option<u8>,
    on_time: Option<u8>,
    fall_time: Option<u8>,
    off_time: Option<u8>,
}

impl<'a> ConfigBuilder<'a> {
    pub fn name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    pub fn imax(mut self, imax: u8) -> Self {
        self.imax = Some(imax);
        self
    }

    pub fn brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    pub fn max_brightness(mut self, max_brightness: u8) -> Self {
        self.max_brightness = Some(max_brightness);
        self
    }

    pub fn rise_time(mut self, rise_time: u8) -> Self {
        self.rise_time = Some(rise_time);
        self
    }

    pub fn on_time(mut self, on_time: u8) -> Self {
        self.on_time = Some(on_time);
        self
    }

    pub fn fall_time(mut self, fall_time: u8) -> Self {
        self.fall_time = Some(fall_time);
        self
    }

    pub fn off_time(mut self, off_time: u8) -> Self {
        self.off_time = Some(off_time);
        self
    }

    /// Sets all four breathing timer codes at once.
    pub fn timing(self, timing: BreathTiming) -> Self {
        self.rise_time(timing.rise)
            .on_time(timing.on)
            .fall_time(timing.fall)
            .off_time(timing.off)
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let name_str = self.name.ok_or(ConfigError::Missing("name"))?;
        let mut name = String::new();
        name.push_str(name_str)
            .map_err(|_| ConfigError::NameTooLong)?;

        Ok(Config {
            name,
            imax: self.imax.ok_or(ConfigError::Missing("imax"))?,
            brightness: self.brightness.ok_or(ConfigError::Missing("brightness"))?,
            max_brightness: self
                .max_brightness
                .ok_or(ConfigError::Missing("max_brightness"))?,
            timing: BreathTiming {
                rise: self.rise_time.ok_or(ConfigError::Missing("rise_time"))?,
                on: self.on_time.ok_or(ConfigError::Missing("on_time"))?,
                fall: self.fall_time.ok_or(ConfigError::Missing("fall_time"))?,
                off: self.off_time.ok_or(ConfigError::Missing("off_time"))?,
            },
        })
    }
}
