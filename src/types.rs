//! Core data types for night time calculations.

use crate::error::check_latitude;
use crate::{Error, Result};
use chrono::{DateTime, Duration, FixedOffset};
use core::fmt;
use core::str::FromStr;

/// Named zenith angles defining the day/night threshold.
///
/// Each variant corresponds to a solar altitude (degrees below the horizon)
/// at which the transition between day and night is considered to occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zenith {
    /// Standard sunrise/sunset (sun's upper limb touches the horizon,
    /// accounting for refraction)
    Official,
    /// Civil twilight (sun is 6° below the horizon). The usual threshold
    /// for aviation night time.
    Civil,
    /// Nautical twilight (sun is 12° below the horizon)
    Nautical,
    /// Amateur astronomical twilight (sun is 15° below the horizon)
    Amateur,
    /// Astronomical twilight (sun is 18° below the horizon)
    Astronomical,
}

impl Zenith {
    /// Gets the solar altitude angle in degrees for this zenith definition.
    ///
    /// Negative values indicate the sun is below the horizon.
    #[must_use]
    pub const fn altitude_angle(&self) -> f64 {
        match self {
            Self::Official => -0.833,
            Self::Civil => -6.0,
            Self::Nautical => -12.0,
            Self::Amateur => -15.0,
            Self::Astronomical => -18.0,
        }
    }

    /// Gets the canonical name of this zenith definition.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Official => "official",
            Self::Civil => "civil",
            Self::Nautical => "nautical",
            Self::Amateur => "amateur",
            Self::Astronomical => "astronomical",
        }
    }
}

impl FromStr for Zenith {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "official" => Ok(Self::Official),
            "civil" => Ok(Self::Civil),
            "nautical" => Ok(Self::Nautical),
            "amateur" => Ok(Self::Amateur),
            "astronomical" => Ok(Self::Astronomical),
            _ => Err(Error::unknown_zenith()),
        }
    }
}

impl fmt::Display for Zenith {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of day/night transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Transition from night to day.
    Sunrise,
    /// Transition from day to night.
    Sunset,
}

impl TransitionKind {
    /// Sign of the hour-angle correction in the solver: +1 selects the
    /// sunrise branch, -1 the sunset branch.
    pub(crate) const fn hour_angle_sign(self) -> f64 {
        match self {
            Self::Sunrise => 1.0,
            Self::Sunset => -1.0,
        }
    }
}

/// Geographic coordinate in degrees.
///
/// # Example
/// ```
/// # use night_hours::GeoPoint;
/// let london = GeoPoint::new(51.5074, -0.1278).unwrap();
/// assert_eq!(london.latitude(), 51.5074);
///
/// // Latitudes beyond the polar validity limit are rejected
/// assert!(GeoPoint::new(68.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees (|lat| within the polar validity limit)
    latitude: f64,
    /// Longitude in degrees (wrapped internally, unconstrained)
    longitude: f64,
}

impl GeoPoint {
    /// Creates a new geographic point.
    ///
    /// # Errors
    /// Returns `InvalidLatitude` if |latitude| exceeds the polar validity
    /// limit. Longitude is unconstrained; the solver wraps it internally.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        check_latitude(latitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Gets the latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Gets the longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Sunrise and sunset instants for one calendar date, location, and zenith.
///
/// Both instants carry the local clock time of the calendar date they were
/// computed for; there is no day rollover. Near the poles or around the
/// date line the sunset clock time can precede the sunrise clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPair {
    sunrise: DateTime<FixedOffset>,
    sunset: DateTime<FixedOffset>,
}

impl TransitionPair {
    /// Creates a transition pair from already-computed instants.
    #[must_use]
    pub const fn new(sunrise: DateTime<FixedOffset>, sunset: DateTime<FixedOffset>) -> Self {
        Self { sunrise, sunset }
    }

    /// Gets the sunrise instant.
    #[must_use]
    pub const fn sunrise(&self) -> DateTime<FixedOffset> {
        self.sunrise
    }

    /// Gets the sunset instant.
    #[must_use]
    pub const fn sunset(&self) -> DateTime<FixedOffset> {
        self.sunset
    }

    /// Gets the instant of the given transition kind.
    #[must_use]
    pub const fn get(&self, kind: TransitionKind) -> DateTime<FixedOffset> {
        match kind {
            TransitionKind::Sunrise => self.sunrise,
            TransitionKind::Sunset => self.sunset,
        }
    }
}

/// Day/night allocation of a flight interval.
///
/// The two durations always sum exactly to the elapsed time between
/// departure and arrival; rounding error is absorbed into one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightSplit {
    day: Duration,
    night: Duration,
    arrival_is_night: bool,
}

impl NightSplit {
    pub(crate) const fn new(day: Duration, night: Duration, arrival_is_night: bool) -> Self {
        Self {
            day,
            night,
            arrival_is_night,
        }
    }

    /// Gets the portion of the interval spent in daylight.
    #[must_use]
    pub const fn day(&self) -> Duration {
        self.day
    }

    /// Gets the portion of the interval spent in darkness.
    #[must_use]
    pub const fn night(&self) -> Duration {
        self.night
    }

    /// Checks whether the arrival occurred at night.
    #[must_use]
    pub const fn arrival_is_night(&self) -> bool {
        self.arrival_is_night
    }

    /// Gets the total elapsed time of the interval.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.day + self.night
    }
}
