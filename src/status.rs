//! Power modes, status codes and driver errors

/// Sensor power mode
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SensorPowerMode {
    /// Powered down
    PowerDown = 0,
    /// Idle between single measurements
    Suspend = 1,
    /// Continuous measurement
    Active = 255,
}

impl Default for SensorPowerMode {
    fn default() -> Self {
        SensorPowerMode::Suspend
    }
}

impl SensorPowerMode {
    /// Numeric code
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Parses a numeric code
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(SensorPowerMode::PowerDown),
            1 => Some(SensorPowerMode::Suspend),
            255 => Some(SensorPowerMode::Active),
            _ => None,
        }
    }
}

/// Outcome of a sensor operation
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SensorStatus {
    /// Sensor responded with expected data
    Ok = 0,
    /// Sensor has been initialized
    Initialized = 1,
    /// An unknown error has occurred
    UnknownError = 2,
    /// Sensor did not ACK
    ErrorNonExistent = 3,
    /// A different sensor was detected at the address
    ErrorUnexpectedDevice = 4,
    /// Reserved for internal use
    Pending = 255,
}

impl SensorStatus {
    /// Numeric code
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Parses a numeric code
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(SensorStatus::Ok),
            1 => Some(SensorStatus::Initialized),
            2 => Some(SensorStatus::UnknownError),
            3 => Some(SensorStatus::ErrorNonExistent),
            4 => Some(SensorStatus::ErrorUnexpectedDevice),
            255 => Some(SensorStatus::Pending),
            _ => None,
        }
    }

    /// `true` for `Ok` and `Initialized`
    pub fn is_ok(&self) -> bool {
        match *self {
            SensorStatus::Ok | SensorStatus::Initialized => true,
            _ => false,
        }
    }
}

/// Driver error
#[derive(Debug, PartialEq)]
pub enum Error<E> {
    /// I2C bus error
    I2c(E),
    /// REVID did not match; holds the value read
    UnexpectedDevice(u8),
    /// DRDY did not go high in time
    Timeout,
    /// Cycle count register holds a value outside the supported table
    InvalidCycleCount(u16),
}

impl<E> Error<E> {
    /// Status code reported for this error
    pub fn status(&self) -> SensorStatus {
        match *self {
            Error::I2c(_) => SensorStatus::ErrorNonExistent,
            Error::UnexpectedDevice(_) => SensorStatus::ErrorUnexpectedDevice,
            Error::Timeout | Error::InvalidCycleCount(_) => {
                SensorStatus::UnknownError
            }
        }
    }
}
