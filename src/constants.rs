//! Raw RM3100 constants
//!
//! Values from Table 5-1 "MagI2C Register Map" of the "RM3100 & RM2100 Sensor
//! Suite User Manual" (PNI Sensor Corporation, Doc 1017252 R07). The typed
//! equivalents used by the driver live in [`register`] and [`conf`].
//!
//! [`register`]: ../register/index.html
//! [`conf`]: ../conf/index.html

/// Largest payload of a single I2C write
pub const MAX_I2C_WRITE: usize = 32;

/// Sensor attached to the local bus
pub const LOCAL: u8 = 0;
/// Sensor attached to a remote bus
pub const REMOTE: u8 = 1;

/// Raspberry Pi I2C bus 0
pub const RASPI_I2C_BUS0: u8 = 0;
/// Raspberry Pi I2C bus 1
pub const RASPI_I2C_BUS1: u8 = 1;

// Continuous Measurement Mode (CMM register)

/// Starts continuous measurement
pub const CMMMODE_START: u8 = 1;
/// DRDY on every axis measurement. Don't use.
pub const CMMMODE_DRDM: u8 = 4;
/// Measure X axis in CMM
pub const CMMMODE_CMX: u8 = 16;
/// Measure Y axis in CMM
pub const CMMMODE_CMY: u8 = 32;
/// Measure Z axis in CMM
pub const CMMMODE_CMZ: u8 = 64;
/// Start CMM on every axis
pub const CMMMODE_ALL: u8 =
    CMMMODE_START | CMMMODE_CMX | CMMMODE_CMY | CMMMODE_CMZ;

// Polled Measurement Mode (POLL register)

/// Poll X axis
pub const PMMODE_CMX: u8 = 16;
/// Poll Y axis
pub const PMMODE_CMY: u8 = 32;
/// Poll Z axis
pub const PMMODE_CMZ: u8 = 64;
/// Poll every axis
pub const PMMODE_ALL: u8 = PMMODE_CMX | PMMODE_CMY | PMMODE_CMZ;

/// Standard mode I2C clock, Hz
pub const I2C_STANDARD: u32 = 100000;
/// Fast mode I2C clock, Hz
pub const I2C_FASTMODE: u32 = 1000000;
/// High speed I2C clock, Hz
pub const I2C_HIGHSPEED: u32 = 3400000;

/// Low byte of the default (200) cycle count
pub const CCP0: u8 = 0xC8;
/// High byte of the default (200) cycle count
pub const CCP1: u8 = 0x00;

/// 50 cycles
pub const CC_50: u32 = 0x32;
/// 100 cycles
pub const CC_100: u32 = 0x64;
/// 200 cycles (default)
pub const CC_200: u32 = 0xC8;
/// 300 cycles
pub const CC_300: u32 = 0x12C;
/// 400 cycles
pub const CC_400: u32 = 0x190;
/// 800 cycles
pub const CC_800: u32 = 0x320;

/// Gain at 50 cycles, LSB/uT
pub const GAIN_20: u16 = 20;
/// Gain at 100 cycles, LSB/uT
pub const GAIN_38: u16 = 38;
/// Gain at 200 cycles, LSB/uT
pub const GAIN_75: u16 = 75;
/// Gain at 300 cycles, LSB/uT
pub const GAIN_113: u16 = 113;
/// Gain at 400 cycles, LSB/uT
pub const GAIN_150: u16 = 150;
/// Gain at 800 cycles, LSB/uT
pub const GAIN_300: u16 = 300;

// CMM update rates (TMRC register). The cycle count bounds the real rate: at
// 200 cycles a single axis tops out around 430 Hz, so 0x92 yields ~430 Hz.

/// ~600 Hz, ~1.7 ms between readings
pub const TMRC_VAL_600: u8 = 0x92;
/// ~300 Hz, ~3 ms between readings
pub const TMRC_VAL_300: u8 = 0x93;
/// ~150 Hz, ~7 ms between readings
pub const TMRC_VAL_150: u8 = 0x94;
/// ~75 Hz, ~13 ms between readings
pub const TMRC_VAL_75: u8 = 0x95;
/// ~37 Hz, ~27 ms between readings
pub const TMRC_VAL_37: u8 = 0x96;
/// ~18 Hz, ~55 ms between readings
pub const TMRC_VAL_18: u8 = 0x97;
/// ~9 Hz, ~110 ms between readings
pub const TMRC_VAL_9: u8 = 0x98;
/// ~4.5 Hz, ~220 ms between readings
pub const TMRC_VAL_4P5: u8 = 0x99;
/// ~2.3 Hz, ~440 ms between readings
pub const TMRC_VAL_2P3: u8 = 0x9A;
/// ~1.2 Hz, ~0.8 s between readings
pub const TMRC_VAL_1P2: u8 = 0x9B;
/// ~0.6 Hz, ~1.6 s between readings
pub const TMRC_VAL_0P6: u8 = 0x9C;
/// ~0.3 Hz, ~3.3 s between readings
pub const TMRC_VAL_0P3: u8 = 0x9D;
/// ~0.15 Hz, ~6.7 s between readings
pub const TMRC_VAL_0P15: u8 = 0x9E;
/// ~0.075 Hz, ~13 s between readings
pub const TMRC_VAL_0P07: u8 = 0x9F;

// BIST bit positions

/// LR periods, bit 0
pub const BIST_BP0: u8 = 0;
/// LR periods, bit 1. BP0 only = 1 period, BP1 only = 2, both = 4.
pub const BIST_BP1: u8 = 1;
/// Timeout, bit 0
pub const BIST_BW0: u8 = 2;
/// Timeout, bit 1. BW0 only = 30 us, BW1 only = 60 us, both = 120 us.
pub const BIST_BW1: u8 = 3;
/// X axis passed. Read only, valid when STE = 1.
pub const BIST_XOK: u8 = 4;
/// Y axis passed. Read only, valid when STE = 1.
pub const BIST_YOK: u8 = 5;
/// Z axis passed. Read only, valid when STE = 1.
pub const BIST_ZOK: u8 = 6;
/// Self-test enable. The test runs on the next POLL write and ends with DRDY
/// going high.
pub const BIST_STE: u8 = 7;

/// Device address
pub const RM3100_I2C_ADDRESS: u8 = 0x20;
/// Device address, 7-bit form
pub const RM3100_I2C_ADDRESS_7BIT: u8 = 0x20;
/// Device address, 8-bit form
pub const RM3100_I2C_ADDRESS_8BIT: u8 = 0x20 << 1;

/// Expected REVID contents
pub const RM3100_VER_EXPECTED: u8 = 0x22;

/// POLL register
pub const RM3100_MAG_POLL: u8 = 0x00;
/// CMM register
pub const RM3100I2C_CMM: u8 = 0x01;
/// Cycle count X, MSB
pub const RM3100I2C_CCX_1: u8 = 0x04;
/// Cycle count X, LSB
pub const RM3100I2C_CCX_0: u8 = 0x05;
/// Cycle count Y, MSB
pub const RM3100I2C_CCY_1: u8 = 0x06;
/// Cycle count Y, LSB
pub const RM3100I2C_CCY_0: u8 = 0x07;
/// Cycle count Z, MSB
pub const RM3100I2C_CCZ_1: u8 = 0x08;
/// Cycle count Z, LSB
pub const RM3100I2C_CCZ_0: u8 = 0x09;
/// Number of samples (undocumented)
pub const RM3100I2C_NOS: u8 = 0x0A;
/// TMRC register
pub const RM3100I2C_TMRC: u8 = 0x0B;

/// Start of the 9-byte measurement block
pub const RM3100I2C_XYZ: u8 = 0x24;

/// X measurement
pub const RM3100I2C_MX: u8 = 0x24;
/// X measurement, MSB
pub const RM3100I2C_MX_2: u8 = 0x24;
/// X measurement, middle byte
pub const RM3100I2C_MX_1: u8 = 0x25;
/// X measurement, LSB
pub const RM3100I2C_MX_0: u8 = 0x26;

/// Y measurement
pub const RM3100I2C_MY: u8 = 0x27;
/// Y measurement, MSB
pub const RM3100I2C_MY_2: u8 = 0x27;
/// Y measurement, middle byte
pub const RM3100I2C_MY_1: u8 = 0x28;
/// Y measurement, LSB
pub const RM3100I2C_MY_0: u8 = 0x29;

/// Z measurement
pub const RM3100I2C_MZ: u8 = 0x2A;
/// Z measurement, MSB
pub const RM3100I2C_MZ_2: u8 = 0x2A;
/// Z measurement, middle byte
pub const RM3100I2C_MZ_1: u8 = 0x2B;
/// Z measurement, LSB
pub const RM3100I2C_MZ_0: u8 = 0x2C;

/// BIST register
pub const RM3100I2C_BIST_WR: u8 = 0x33;
/// STATUS register
pub const RM3100I2C_STATUS: u8 = 0x34;
/// Handshake register
pub const RM3100I2C_HSHAKE: u8 = 0x35;
/// Revision ID register
pub const RM3100I2C_REVID: u8 = 0x36;

/// Read bit of the register address. Used by the SPI transport only; I2C
/// reads leave it clear.
pub const RM3100I2C_READMASK: u8 = 0x80;

/// Poll X
pub const RM3100I2C_POLLX: u8 = 0x10;
/// Poll Y
pub const RM3100I2C_POLLY: u8 = 0x20;
/// Poll Z
pub const RM3100I2C_POLLZ: u8 = 0x40;
/// Poll X, Y and Z
pub const RM3100I2C_POLLXYZ: u8 = 0x70;

/// DRDY bit of the STATUS register
pub const RM3100I2C_STATUS_DRDY: u8 = 0x80;

/// Calibration timeout, ms
pub const CALIBRATION_TIMEOUT: u16 = 5000;

/// 180 / pi, truncated to 8 bits
pub const DEG_PER_RAD: u8 = 57;

// Undocumented test registers and values

/// Self-test enabled code
pub const RM3100I2C_ENABLED: u8 = 0x79;
/// Self-test disabled code
pub const RM3100I2C_DISABLED: u8 = 0x00;

/// TEST3 register
pub const RM3100_TEST3_REG: u8 = 0x72;
/// Oscillator adjust register
pub const RM3100_LROSCADJ_REG: u8 = 0x63;

/// LR oscillator adjust value
pub const RM3100_LROSCADJ_VALUE: u8 = 0xA7;
/// Sleep oscillator adjust value
pub const RM3100_SLPOSCADJ_VALUE: u8 = 0x08;
