use core::ops::BitOr;

use cast::u16;

use constants::*;

pub(crate) trait RegisterBits {
    fn value(&self) -> u8;
}

/// Splits a cycle count into its `[MSB, LSB]` register bytes
pub fn split_cycle_count(cc: u16) -> [u8; 2] {
    [(cc >> 8) as u8, cc as u8]
}

/// Joins `[MSB, LSB]` cycle count register bytes
pub fn combine_cycle_count(bytes: [u8; 2]) -> u16 {
    (u16(bytes[0]) << 8) | u16(bytes[1])
}

/// Cycle count, sets the integration time of each axis
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum CycleCount {
    /// 50 cycles
    _50 = CC_50 as isize,
    /// 100 cycles
    _100 = CC_100 as isize,
    /// 200 cycles
    _200 = CC_200 as isize,
    /// 300 cycles
    _300 = CC_300 as isize,
    /// 400 cycles
    _400 = CC_400 as isize,
    /// 800 cycles
    _800 = CC_800 as isize,
}

impl Default for CycleCount {
    fn default() -> Self {
        CycleCount::_200
    }
}

impl CycleCount {
    /// Register value
    pub fn value(&self) -> u16 {
        *self as u16
    }

    /// Gain at this cycle count, LSB/uT
    pub fn gain(&self) -> u16 {
        match *self {
            CycleCount::_50 => GAIN_20,
            CycleCount::_100 => GAIN_38,
            CycleCount::_200 => GAIN_75,
            CycleCount::_300 => GAIN_113,
            CycleCount::_400 => GAIN_150,
            CycleCount::_800 => GAIN_300,
        }
    }

    /// Looks up a register value
    pub fn from_u16(v: u16) -> Option<Self> {
        match u32::from(v) {
            CC_50 => Some(CycleCount::_50),
            CC_100 => Some(CycleCount::_100),
            CC_200 => Some(CycleCount::_200),
            CC_300 => Some(CycleCount::_300),
            CC_400 => Some(CycleCount::_400),
            CC_800 => Some(CycleCount::_800),
            _ => None,
        }
    }

    /// `[MSB, LSB]` as stored in the `CC?_1`/`CC?_0` pair
    pub fn to_bytes(&self) -> [u8; 2] {
        split_cycle_count(self.value())
    }
}

/// CMM update rate (TMRC register)
///
/// The cycle count caps the achievable rate: at 200 cycles a single axis
/// tops out near 430 Hz whatever TMRC requests.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum UpdateRate {
    /// ~600 Hz
    _600_Hz = TMRC_VAL_600 as isize,
    /// ~300 Hz
    _300_Hz = TMRC_VAL_300 as isize,
    /// ~150 Hz
    _150_Hz = TMRC_VAL_150 as isize,
    /// ~75 Hz
    _75_Hz = TMRC_VAL_75 as isize,
    /// ~37 Hz
    _37_Hz = TMRC_VAL_37 as isize,
    /// ~18 Hz
    _18_Hz = TMRC_VAL_18 as isize,
    /// ~9 Hz
    _9_Hz = TMRC_VAL_9 as isize,
    /// ~4.5 Hz
    _4_5_Hz = TMRC_VAL_4P5 as isize,
    /// ~2.3 Hz
    _2_3_Hz = TMRC_VAL_2P3 as isize,
    /// ~1.2 Hz
    _1_2_Hz = TMRC_VAL_1P2 as isize,
    /// ~0.6 Hz
    _0_6_Hz = TMRC_VAL_0P6 as isize,
    /// ~0.3 Hz
    _0_3_Hz = TMRC_VAL_0P3 as isize,
    /// ~0.15 Hz
    _0_15_Hz = TMRC_VAL_0P15 as isize,
    /// ~0.075 Hz
    _0_075_Hz = TMRC_VAL_0P07 as isize,
}

impl Default for UpdateRate {
    fn default() -> Self {
        UpdateRate::_37_Hz
    }
}

impl RegisterBits for UpdateRate {
    fn value(&self) -> u8 {
        *self as u8
    }
}

impl UpdateRate {
    /// Looks up a TMRC code
    pub fn from_u8(v: u8) -> Option<Self> {
        let rates = [UpdateRate::_600_Hz,
                     UpdateRate::_300_Hz,
                     UpdateRate::_150_Hz,
                     UpdateRate::_75_Hz,
                     UpdateRate::_37_Hz,
                     UpdateRate::_18_Hz,
                     UpdateRate::_9_Hz,
                     UpdateRate::_4_5_Hz,
                     UpdateRate::_2_3_Hz,
                     UpdateRate::_1_2_Hz,
                     UpdateRate::_0_6_Hz,
                     UpdateRate::_0_3_Hz,
                     UpdateRate::_0_15_Hz,
                     UpdateRate::_0_075_Hz];
        rates.iter().cloned().find(|r| r.value() == v)
    }
}

/// Axis selection for POLL and CMM
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Axes(u8);

impl Axes {
    /// X axis
    pub const X: Axes = Axes(RM3100I2C_POLLX);
    /// Y axis
    pub const Y: Axes = Axes(RM3100I2C_POLLY);
    /// Z axis
    pub const Z: Axes = Axes(RM3100I2C_POLLZ);
    /// All three axes
    pub const ALL: Axes = Axes(RM3100I2C_POLLXYZ);

    /// Raw flags
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// `true` if every axis in `other` is selected
    pub fn contains(&self, other: Axes) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for Axes {
    fn default() -> Self {
        Axes::ALL
    }
}

impl BitOr for Axes {
    type Output = Axes;

    fn bitor(self, rhs: Axes) -> Axes {
        Axes(self.0 | rhs.0)
    }
}

/// Number of LR periods the self test measures
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BistPeriods {
    /// 1 period
    One = 1 << BIST_BP0,
    /// 2 periods
    Two = 1 << BIST_BP1,
    /// 4 periods
    Four = (1 << BIST_BP0) | (1 << BIST_BP1),
}

impl Default for BistPeriods {
    fn default() -> Self {
        BistPeriods::One
    }
}

impl RegisterBits for BistPeriods {
    fn value(&self) -> u8 {
        *self as u8
    }
}

/// Self test timeout, in sleep oscillator cycles
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum BistTimeout {
    /// 30 us
    _30_us = 1 << BIST_BW0,
    /// 60 us
    _60_us = 1 << BIST_BW1,
    /// 120 us
    _120_us = (1 << BIST_BW0) | (1 << BIST_BW1),
}

impl Default for BistTimeout {
    fn default() -> Self {
        BistTimeout::_30_us
    }
}

impl RegisterBits for BistTimeout {
    fn value(&self) -> u8 {
        *self as u8
    }
}

/// Configuration of Rm3100
#[derive(Copy, Clone, Debug, Default)]
pub struct Rm3100Config {
    pub(crate) cycle_count: Option<CycleCount>,
    pub(crate) update_rate: Option<UpdateRate>,
    pub(crate) continuous: Option<Axes>,
}

impl Rm3100Config {
    /// Creates a configuration that leaves every register at its power-on
    /// default: [`CycleCount`] 200, [`UpdateRate`] ~37 Hz and no continuous
    /// measurement.
    ///
    /// [`CycleCount`]: ./enum.CycleCount.html
    /// [`UpdateRate`]: ./enum.UpdateRate.html
    pub fn new() -> Self {
        Rm3100Config { cycle_count: None,
                       update_rate: None,
                       continuous: None, }
    }

    /// Sets the cycle count of all axes ([`CycleCount`])
    ///
    /// [`CycleCount`]: ./enum.CycleCount.html
    pub fn cycle_count(&mut self, cycle_count: CycleCount) -> &mut Self {
        self.cycle_count = Some(cycle_count);
        self
    }

    /// Sets the CMM update rate ([`UpdateRate`])
    ///
    /// [`UpdateRate`]: ./enum.UpdateRate.html
    pub fn update_rate(&mut self, update_rate: UpdateRate) -> &mut Self {
        self.update_rate = Some(update_rate);
        self
    }

    /// Starts continuous measurement on `axes` once configured
    pub fn continuous(&mut self, axes: Axes) -> &mut Self {
        self.continuous = Some(axes);
        self
    }
}
