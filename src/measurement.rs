//! Measurement results

use cast::{f32, i32};

use constants::{BIST_XOK, BIST_YOK, BIST_ZOK};

/// Decodes a big endian 24-bit two's complement value
pub fn decode_i24(bytes: [u8; 3]) -> i32 {
    // shift into the top of the word, then back down to sign-extend
    ((i32(bytes[0]) << 24) | (i32(bytes[1]) << 16) | (i32(bytes[2]) << 8)) >> 8
}

/// Raw counts of the three axes
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct RawMeasurement {
    /// X axis
    pub x: i32,
    /// Y axis
    pub y: i32,
    /// Z axis
    pub z: i32,
}

impl RawMeasurement {
    /// Decodes the `MX_2..=MZ_0` register block
    pub fn from_bytes(buffer: [u8; 9]) -> Self {
        RawMeasurement { x: decode_i24([buffer[0], buffer[1], buffer[2]]),
                         y: decode_i24([buffer[3], buffer[4], buffer[5]]),
                         z: decode_i24([buffer[6], buffer[7], buffer[8]]), }
    }

    /// Converts counts to microtesla using `gain` (LSB/uT)
    pub fn to_micro_tesla(&self, gain: u16) -> MicroTesla {
        self.to_micro_tesla_per_axis([gain; 3])
    }

    /// Like `to_micro_tesla` with a separate X/Y/Z gain
    pub fn to_micro_tesla_per_axis(&self, gains: [u16; 3]) -> MicroTesla {
        MicroTesla { x: f32(self.x) / f32(gains[0]),
                     y: f32(self.y) / f32(gains[1]),
                     z: f32(self.z) / f32(gains[2]), }
    }
}

/// Magnetic field in microtesla
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct MicroTesla {
    /// X axis
    pub x: f32,
    /// Y axis
    pub y: f32,
    /// Z axis
    pub z: f32,
}

/// Per-axis outcome of the built-in self test
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SelfTestResult {
    /// X axis LR oscillator in range
    pub x_ok: bool,
    /// Y axis LR oscillator in range
    pub y_ok: bool,
    /// Z axis LR oscillator in range
    pub z_ok: bool,
}

impl SelfTestResult {
    /// Reads the XOK/YOK/ZOK bits of a BIST register value
    pub fn from_bist(bist: u8) -> Self {
        SelfTestResult { x_ok: bist & (1 << BIST_XOK) != 0,
                         y_ok: bist & (1 << BIST_YOK) != 0,
                         z_ok: bist & (1 << BIST_ZOK) != 0, }
    }

    /// All three axes passed
    pub fn passed(&self) -> bool {
        self.x_ok && self.y_ok && self.z_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i24_sign_extension() {
        assert_eq!(decode_i24([0x00, 0x00, 0x00]), 0);
        assert_eq!(decode_i24([0x00, 0x00, 0x01]), 1);
        assert_eq!(decode_i24([0x7F, 0xFF, 0xFF]), 8_388_607);
        assert_eq!(decode_i24([0xFF, 0xFF, 0xFF]), -1);
        assert_eq!(decode_i24([0x80, 0x00, 0x00]), -8_388_608);
        assert_eq!(decode_i24([0x01, 0x02, 0x03]), 0x010203);
    }

    #[test]
    fn measurement_block() {
        let m = RawMeasurement::from_bytes([0x00, 0x00, 0x4B,
                                            0xFF, 0xFF, 0xB5,
                                            0x00, 0x01, 0x00]);
        assert_eq!(m, RawMeasurement { x: 75, y: -75, z: 256 });

        let ut = m.to_micro_tesla(75);
        assert_eq!(ut.x, 1.0);
        assert_eq!(ut.y, -1.0);
        assert!((ut.z - 3.413_333).abs() < 1e-4);

        let ut = m.to_micro_tesla_per_axis([75, 75, 256]);
        assert_eq!(ut.z, 1.0);
    }

    #[test]
    fn self_test_bits() {
        let r = SelfTestResult::from_bist(0xF0);
        assert!(r.passed());

        let r = SelfTestResult::from_bist(0x80 | 0x10 | 0x40);
        assert_eq!(r, SelfTestResult { x_ok: true, y_ok: false, z_ok: true });
        assert!(!r.passed());
    }
}
