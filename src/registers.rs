//! AW9106 register map and the per-register access table.
#![allow(dead_code, clippy::unusual_byte_groupings)]

pub const REGISTER_INPUT_P0: u8 = 0x00;
pub const REGISTER_INPUT_P1: u8 = 0x01;
pub const REGISTER_OUTPUT_P0: u8 = 0x02;
pub const REGISTER_OUTPUT_P1: u8 = 0x03;
pub const REGISTER_CONFIG_P0: u8 = 0x04;
pub const REGISTER_CONFIG_P1: u8 = 0x05;
pub const REGISTER_INT_P0: u8 = 0x06;
pub const REGISTER_INT_P1: u8 = 0x07;
pub const REGISTER_ID: u8 = 0x10;
pub const REGISTER_CONTROL: u8 = 0x11;
pub const REGISTER_WORK_MODE_P0: u8 = 0x12;
pub const REGISTER_WORK_MODE_P1: u8 = 0x13;
pub const REGISTER_BREATH_ENABLE: u8 = 0x14;
pub const REGISTER_FADE_TIME: u8 = 0x15;
pub const REGISTER_FULL_TIME: u8 = 0x16;
pub const REGISTER_DELAY0_BREATH: u8 = 0x17;
pub const REGISTER_DELAY1_BREATH: u8 = 0x18;
pub const REGISTER_DELAY2_BREATH: u8 = 0x19;
pub const REGISTER_DELAY3_BREATH: u8 = 0x1a;
pub const REGISTER_DELAY4_BREATH: u8 = 0x1b;
pub const REGISTER_DELAY5_BREATH: u8 = 0x1c;
pub const REGISTER_DIM00: u8 = 0x20;
pub const REGISTER_DIM01: u8 = 0x21;
pub const REGISTER_DIM02: u8 = 0x22;
pub const REGISTER_DIM03: u8 = 0x23;
pub const REGISTER_DIM04: u8 = 0x24;
pub const REGISTER_DIM05: u8 = 0x25;
pub const REGISTER_SOFTWARE_RESET: u8 = 0x7F;

/// Dimming registers, one per output channel. They are always written with the same value.
pub const DIMMING_REGISTERS: [u8; 6] = [
    REGISTER_DIM00,
    REGISTER_DIM01,
    REGISTER_DIM02,
    REGISTER_DIM03,
    REGISTER_DIM04,
    REGISTER_DIM05,
];

/// Value read back from `REGISTER_ID` on a genuine AW9106.
pub const CHIP_ID: u8 = 0x23;

// work mode registers
pub const WORK_MODE_LED: u8 = 0x00;

// breath enable register, one bit per channel
pub const BREATH_DISABLE_ALL: u8 = 0b00_000000;
pub const BREATH_ENABLE_ALL: u8 = 0b00_111111;

// config registers, breath timer stage per port
pub const CONFIG_P0_BLINK: u8 = 0x03;
pub const CONFIG_P1_BLINK: u8 = 0x0f;

// control register
pub const CONTROL_BLINK_ENABLE: u8 = 0b1_0000_000;
pub const CONTROL_IMAX_DEFAULT: u8 = 0b0_0000_011;

/// Every timing and current field is 3 bits wide in hardware.
pub const FIELD_MASK: u8 = 0b111;

pub const SOFTWARE_RESET_VALUE: u8 = 0x00;

/// Permitted access directions of a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access(u8);

impl Access {
    pub const NONE: Access = Access(0b00);
    pub const READ: Access = Access(0b01);
    pub const WRITE: Access = Access(0b10);
    pub const READ_WRITE: Access = Access(0b11);

    pub const fn is_readable(self) -> bool {
        self.0 & Self::READ.0 != 0
    }

    pub const fn is_writable(self) -> bool {
        self.0 & Self::WRITE.0 != 0
    }
}

/// Known registers in address order, with their access direction.
pub const REGISTER_ACCESS: [(u8, Access); 28] = [
    (REGISTER_INPUT_P0, Access::READ),
    (REGISTER_INPUT_P1, Access::READ),
    (REGISTER_OUTPUT_P0, Access::READ_WRITE),
    (REGISTER_OUTPUT_P1, Access::READ_WRITE),
    (REGISTER_CONFIG_P0, Access::READ_WRITE),
    (REGISTER_CONFIG_P1, Access::READ_WRITE),
    (REGISTER_INT_P0, Access::READ_WRITE),
    (REGISTER_INT_P1, Access::READ_WRITE),
    (REGISTER_ID, Access::READ),
    (REGISTER_CONTROL, Access::READ_WRITE),
    (REGISTER_WORK_MODE_P0, Access::READ_WRITE),
    (REGISTER_WORK_MODE_P1, Access::READ_WRITE),
    (REGISTER_BREATH_ENABLE, Access::READ_WRITE),
    (REGISTER_FADE_TIME, Access::READ_WRITE),
    (REGISTER_FULL_TIME, Access::READ_WRITE),
    (REGISTER_DELAY0_BREATH, Access::READ_WRITE),
    (REGISTER_DELAY1_BREATH, Access::READ_WRITE),
    (REGISTER_DELAY2_BREATH, Access::READ_WRITE),
    (REGISTER_DELAY3_BREATH, Access::READ_WRITE),
    (REGISTER_DELAY4_BREATH, Access::READ_WRITE),
    (REGISTER_DELAY5_BREATH, Access::READ_WRITE),
    (REGISTER_DIM00, Access::WRITE),
    (REGISTER_DIM01, Access::WRITE),
    (REGISTER_DIM02, Access::WRITE),
    (REGISTER_DIM03, Access::WRITE),
    (REGISTER_DIM04, Access::WRITE),
    (REGISTER_DIM05, Access::WRITE),
    (REGISTER_SOFTWARE_RESET, Access::WRITE),
];

/// Access direction of `register`. Unknown addresses have no access.
pub fn access(register: u8) -> Access {
    REGISTER_ACCESS
        .iter()
        .find(|(address, _)| *address == register)
        .map(|(_, access)| *access)
        .unwrap_or(Access::NONE)
}

/// Iterate the readable registers in address order.
pub fn readable_registers() -> impl Iterator<Item = u8> {
    REGISTER_ACCESS
        .iter()
        .filter(|(_, access)| access.is_readable())
        .map(|(address, _)| *address)
}
