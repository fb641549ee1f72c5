//! Error types for night time calculations.

use core::fmt;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Maximum absolute latitude (degrees) for which transition times can be solved.
///
/// Beyond this limit the fixed-point iteration no longer produces meaningful
/// sunrise/sunset times (polar day and polar night dominate).
pub const POLAR_LATITUDE_LIMIT: f64 = 67.0;

/// First year of the ephemeris validity window.
pub const MIN_YEAR: i32 = 1901;

/// Last year of the ephemeris validity window.
pub const MAX_YEAR: i32 = 2099;

/// Errors that can occur during night time calculations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Latitude outside the polar validity limit of the solver.
    InvalidLatitude {
        /// The invalid latitude value provided.
        value: f64,
    },
    /// Unrecognized zenith name.
    UnknownZenith,
    /// Date outside the validity window of the ephemeris formulas.
    DateOutOfRange {
        /// The out-of-range year.
        year: i32,
    },
    /// Day-by-day transition search exceeded its bound.
    ///
    /// Occurs for inputs at the edge of validity that produce permanent
    /// day or permanent night.
    NoTransitionFound {
        /// Number of calendar days searched before giving up.
        days: u32,
    },
    /// Departure/arrival interval violates the split contract.
    InvalidInterval {
        /// Description of the interval constraint violation.
        message: &'static str,
    },
    /// Boundary-crossing interval too long for the single-crossing model.
    IntervalTooLong {
        /// The elapsed interval in hours.
        hours: f64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(
                    f,
                    "invalid latitude {value}° (must be between -{POLAR_LATITUDE_LIMIT}° and +{POLAR_LATITUDE_LIMIT}°)"
                )
            }
            Self::UnknownZenith => {
                write!(
                    f,
                    "unknown zenith name (expected one of: official, civil, nautical, amateur, astronomical)"
                )
            }
            Self::DateOutOfRange { year } => {
                write!(
                    f,
                    "year {year} is outside the supported range {MIN_YEAR} to {MAX_YEAR}"
                )
            }
            Self::NoTransitionFound { days } => {
                write!(f, "no sunrise/sunset transition found within {days} days")
            }
            Self::InvalidInterval { message } => {
                write!(f, "invalid interval: {message}")
            }
            Self::IntervalTooLong { hours } => {
                write!(
                    f,
                    "interval of {hours:.1} hours crosses day/night but is too long for a single-crossing split"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Creates an invalid latitude error.
    #[must_use]
    pub const fn invalid_latitude(value: f64) -> Self {
        Self::InvalidLatitude { value }
    }

    /// Creates an unknown zenith error.
    #[must_use]
    pub const fn unknown_zenith() -> Self {
        Self::UnknownZenith
    }

    /// Creates a date out of range error.
    #[must_use]
    pub const fn date_out_of_range(year: i32) -> Self {
        Self::DateOutOfRange { year }
    }

    /// Creates a transition search failure error.
    #[must_use]
    pub const fn no_transition_found(days: u32) -> Self {
        Self::NoTransitionFound { days }
    }

    /// Creates an invalid interval error.
    #[must_use]
    pub const fn invalid_interval(message: &'static str) -> Self {
        Self::InvalidInterval { message }
    }

    /// Creates an interval too long error.
    #[must_use]
    pub const fn interval_too_long(hours: f64) -> Self {
        Self::IntervalTooLong { hours }
    }
}

/// Validates latitude is within the polar validity limit.
///
/// # Errors
/// Returns `InvalidLatitude` if |latitude| exceeds [`POLAR_LATITUDE_LIMIT`]
/// or the value is not finite.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-POLAR_LATITUDE_LIMIT..=POLAR_LATITUDE_LIMIT).contains(&latitude) {
        return Err(Error::invalid_latitude(latitude));
    }
    Ok(())
}

/// Validates a year is within the ephemeris validity window.
///
/// # Errors
/// Returns `DateOutOfRange` if the year is outside [`MIN_YEAR`] to [`MAX_YEAR`].
pub fn check_year(year: i32) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(Error::date_out_of_range(year));
    }
    Ok(())
}
