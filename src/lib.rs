//! # Night Hours
//!
//! Sunrise/sunset calculation and day/night flight-time splitting for
//! aviation logbooks.
//!
//! Three layers, leaf first:
//! - [`riseset`]: computes the local sunrise and sunset instants for a
//!   calendar date, coordinate, and named zenith angle, by fixed-point
//!   iteration on a low-precision solar ephemeris.
//! - [`night::is_night`]: classifies an instant as day or night from the
//!   most recent transition at or before it.
//! - [`night::split`]: allocates a flight interval between two locations
//!   into day and night durations to the minute, locating the crossed
//!   sunrise or sunset by linear interpolation along the route.
//!
//! All computations are deterministic, stateless, and safe to call from
//! multiple threads. Times are handled as absolute instants with an
//! explicit UTC offset (`chrono::DateTime<FixedOffset>`); no timezone
//! database is consulted.
//!
//! ## Validity
//!
//! Latitudes within ±67° and years 1901 to 2099. Inputs outside those
//! ranges are rejected up front; see [`error::Error`].
//!
//! ## Feature Flags
//!
//! - `std` (default): native math functions
//! - `libm`: pure Rust math for `no_std` environments
//!
//! ## Quick Start
//!
//! ### Sunrise and sunset
//! ```rust
//! use chrono::{DateTime, FixedOffset};
//! use night_hours::{riseset, GeoPoint, Zenith};
//!
//! let date = "2023-06-21T12:00:00+01:00"
//!     .parse::<DateTime<FixedOffset>>()
//!     .unwrap();
//! let london = GeoPoint::new(51.5074, -0.1278).unwrap();
//!
//! let pair = riseset::transitions(date, london, Zenith::Official).unwrap();
//! println!("Sunrise: {}", pair.sunrise());
//! println!("Sunset:  {}", pair.sunset());
//! ```
//!
//! ### Night time of a flight
//! ```rust
//! use chrono::{DateTime, FixedOffset};
//! use night_hours::{night, GeoPoint, Zenith};
//!
//! let london = GeoPoint::new(51.5074, -0.1278).unwrap();
//! let vienna = GeoPoint::new(48.11, 16.57).unwrap();
//!
//! let dep = "2023-06-21T19:30:00+00:00"
//!     .parse::<DateTime<FixedOffset>>()
//!     .unwrap();
//! let arr = "2023-06-21T21:50:00+00:00"
//!     .parse::<DateTime<FixedOffset>>()
//!     .unwrap();
//!
//! let split = night::split(dep, london, arr, vienna, Zenith::Civil).unwrap();
//! assert_eq!(split.day() + split.night(), arr - dep);
//! println!("night minutes: {}", split.night().num_minutes());
//! ```
//!
//! ## Zenith definitions
//!
//! The day/night threshold is a named solar altitude: official (-0.833°),
//! civil (-6°), nautical (-12°), amateur (-15°), astronomical (-18°).
//! Aviation night time conventionally uses [`Zenith::Civil`].

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of mathematical constants in tests
)]

// Public API exports
pub use crate::error::{Error, Result};
pub use crate::types::{GeoPoint, NightSplit, TransitionKind, TransitionPair, Zenith};

// Algorithm modules
pub mod night;
pub mod riseset;

// Core modules
pub mod error;
pub mod types;

// Internal modules
mod math;
