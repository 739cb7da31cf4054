//! Error types for gauge-stepper.
//!
//! Errors only arise while building profiles, axes and configuration. The
//! motion core itself (`update`, `advance`, `set_position`, `zero`) resolves
//! every request by clamping and never fails.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all gauge-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Acceleration table construction error
    Profile(ProfileError),
    /// Gauge construction error
    Gauge(GaugeError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Gauge name not found in configuration
    GaugeNotFound(heapless::String<32>),
    /// Profile name not found in configuration
    ProfileNotFound(heapless::String<32>),
    /// A gauge references a profile that is not defined
    UnknownProfile {
        /// Gauge name
        gauge: heapless::String<32>,
        /// Referenced profile name
        profile: heapless::String<32>,
    },
    /// A profile table in the configuration is malformed
    InvalidProfile {
        /// Profile name
        profile: heapless::String<32>,
        /// What is wrong with it
        reason: ProfileError,
    },
    /// Total step count too small (must be >= 2)
    InvalidTotalSteps(u32),
    /// Addressable range outside the mechanical range or inverted
    InvalidRange {
        /// Lowest addressable step
        min: u32,
        /// Highest addressable step
        max: u32,
        /// Mechanical step count
        total_steps: u32,
    },
    /// Velocity cap must be >= 1
    InvalidMaxVelocity(u16),
    /// Homing step period must be >= 1 µs
    InvalidHomingPeriod(u32),
    /// Needle sweep must be > 0 degrees
    InvalidSweep(f32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Acceleration table errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileError {
    /// The table has no entries
    Empty,
    /// The table has more entries than fit in a profile
    TooManyEntries(usize),
    /// A velocity is not strictly greater than the one before it
    NotIncreasing {
        /// Index of the offending entry
        index: usize,
        /// Velocity of the previous entry
        previous: u16,
        /// Velocity of the offending entry
        velocity: u16,
    },
    /// A delay is longer than the one before it (tables must speed up)
    DelayIncreases {
        /// Index of the offending entry
        index: usize,
        /// Delay of the previous entry
        previous: u32,
        /// Delay of the offending entry
        delay_us: u32,
    },
    /// The last entry has velocity 0, leaving no room to move
    ZeroMaxVelocity,
}

/// Gauge construction errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GaugeError {
    /// A required builder field was not supplied
    MissingField(&'static str),
    /// Total step count too small (must be >= 2)
    InvalidTotalSteps(u32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Profile(e) => write!(f, "Profile error: {}", e),
            Error::Gauge(e) => write!(f, "Gauge error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::GaugeNotFound(name) => write!(f, "Gauge '{}' not found", name),
            ConfigError::ProfileNotFound(name) => write!(f, "Profile '{}' not found", name),
            ConfigError::UnknownProfile { gauge, profile } => {
                write!(f, "Gauge '{}' references unknown profile '{}'", gauge, profile)
            }
            ConfigError::InvalidProfile { profile, reason } => {
                write!(f, "Profile '{}' is invalid: {}", profile, reason)
            }
            ConfigError::InvalidTotalSteps(v) => {
                write!(f, "Invalid total steps: {}. Must be >= 2", v)
            }
            ConfigError::InvalidRange { min, max, total_steps } => write!(
                f,
                "Invalid range [{}, {}] for a gauge of {} steps",
                min, max, total_steps
            ),
            ConfigError::InvalidMaxVelocity(v) => {
                write!(f, "Invalid max velocity: {}. Must be >= 1", v)
            }
            ConfigError::InvalidHomingPeriod(v) => {
                write!(f, "Invalid homing period: {} us. Must be >= 1", v)
            }
            ConfigError::InvalidSweep(v) => write!(f, "Invalid sweep: {} degrees. Must be > 0", v),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::Empty => write!(f, "Acceleration table is empty"),
            ProfileError::TooManyEntries(n) => write!(
                f,
                "Acceleration table has {} entries (max {})",
                n,
                crate::motion::MAX_PROFILE_ENTRIES
            ),
            ProfileError::NotIncreasing { index, previous, velocity } => write!(
                f,
                "Entry {} has velocity {} which does not exceed previous velocity {}",
                index, velocity, previous
            ),
            ProfileError::DelayIncreases { index, previous, delay_us } => write!(
                f,
                "Entry {} has delay {} us which exceeds previous delay {} us",
                index, delay_us, previous
            ),
            ProfileError::ZeroMaxVelocity => write!(f, "Last table entry must have velocity >= 1"),
        }
    }
}

impl fmt::Display for GaugeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GaugeError::MissingField(field) => write!(f, "{} is required", field),
            GaugeError::InvalidTotalSteps(v) => {
                write!(f, "Invalid total steps: {}. Must be >= 2", v)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<ProfileError> for Error {
    fn from(e: ProfileError) -> Self {
        Error::Profile(e)
    }
}

impl From<GaugeError> for Error {
    fn from(e: GaugeError) -> Self {
        Error::Gauge(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for ProfileError {}

#[cfg(feature = "std")]
impl std::error::Error for GaugeError {}
