//! RM3100 register addresses

use constants;

/// Device I2C address (7-bit)
pub const ADDRESS: u8 = constants::RM3100_I2C_ADDRESS_7BIT;

/// Device I2C address in the 8-bit (shifted) form some HALs expect
pub const ADDRESS_8BIT: u8 = constants::RM3100_I2C_ADDRESS_8BIT;

/// Revision ID reported by a genuine RM3100
pub const REVID_EXPECTED: u8 = constants::RM3100_VER_EXPECTED;

/// MagI2C register map
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Register {
    /// Polls for a single measurement
    POLL = 0x00,
    /// Continuous measurement mode
    CMM = 0x01,
    /// Cycle count X, MSB
    CCX_1 = 0x04,
    /// Cycle count X, LSB
    CCX_0 = 0x05,
    /// Cycle count Y, MSB
    CCY_1 = 0x06,
    /// Cycle count Y, LSB
    CCY_0 = 0x07,
    /// Cycle count Z, MSB
    CCZ_1 = 0x08,
    /// Cycle count Z, LSB
    CCZ_0 = 0x09,
    /// Number of samples
    NOS = 0x0A,
    /// CMM data rate
    TMRC = 0x0B,
    /// Measurement X, MSB
    MX_2 = 0x24,
    /// Measurement X, middle byte
    MX_1 = 0x25,
    /// Measurement X, LSB
    MX_0 = 0x26,
    /// Measurement Y, MSB
    MY_2 = 0x27,
    /// Measurement Y, middle byte
    MY_1 = 0x28,
    /// Measurement Y, LSB
    MY_0 = 0x29,
    /// Measurement Z, MSB
    MZ_2 = 0x2A,
    /// Measurement Z, middle byte
    MZ_1 = 0x2B,
    /// Measurement Z, LSB
    MZ_0 = 0x2C,
    /// Built-in self test
    BIST = 0x33,
    /// DRDY status
    STATUS = 0x34,
    /// Handshake
    HSHAKE = 0x35,
    /// Revision identification
    REVID = 0x36,
    /// LR oscillator adjust
    LROSCADJ = 0x63,
    /// Test register 3
    TEST3 = 0x72,
}

impl Register {
    /// Start of the X/Y/Z measurement block
    pub const XYZ: Register = Register::MX_2;
    /// X measurement
    pub const MX: Register = Register::MX_2;
    /// Y measurement
    pub const MY: Register = Register::MY_2;
    /// Z measurement
    pub const MZ: Register = Register::MZ_2;
    /// Cycle count block, X/Y/Z MSB first
    pub const CC: Register = Register::CCX_1;

    /// Register address
    pub fn addr(&self) -> u8 {
        *self as u8
    }
}
