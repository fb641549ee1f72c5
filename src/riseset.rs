//! Iterative sunrise/sunset solver.
//!
//! Computes the local sunrise and sunset instants for one calendar date by
//! fixed-point iteration on a low-precision solar ephemeris (mean longitude,
//! mean anomaly, equation of center, equation of time, obliquity-adjusted
//! declination). Accuracy is on the order of a minute for latitudes within
//! the polar validity limit and years 1901 to 2099.
//!
//! The solver works on the *local calendar date* of the input instant: the
//! UTC offset carried by the input is applied to the converged UT estimate
//! and the result is materialized on the same calendar date, with no day
//! rollover. Callers that need transitions adjacent to a day boundary search
//! across dates themselves (see [`crate::night`]).

use crate::error::{check_latitude, check_year};
use crate::math::{
    atan2, cos, fabs, normalize_radians_0_to_tau, round, sin, sqrt, trunc, PI, TAU,
};
use crate::types::{GeoPoint, TransitionKind, TransitionPair, Zenith};
use crate::Result;
use chrono::{DateTime, Datelike, FixedOffset, NaiveTime, Offset};

/// Iteration cap of the fixed-point solver.
const MAX_ITERATIONS: u32 = 35;

/// Convergence tolerance of the fixed-point solver, in radians of UT.
const CONVERGENCE_TOLERANCE: f64 = 0.001;

/// Days from the integer day-count epoch back to 2000-01-01 12:00 UT.
const EPOCH_OFFSET: f64 = 730_531.5;

/// Days per Julian century.
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Computes the sunrise and sunset instants for the local calendar date of
/// `datetime` at the given location and zenith.
///
/// Both transitions share the same ephemeris day count and differ only in
/// the sign of the hour-angle correction.
///
/// # Errors
/// Returns `InvalidLatitude` if the latitude exceeds the polar validity
/// limit, or `DateOutOfRange` if the year falls outside 1901 to 2099. Both
/// checks run before any iteration.
///
/// # Example
/// ```
/// use chrono::{DateTime, FixedOffset};
/// use night_hours::{riseset, GeoPoint, Zenith};
///
/// let date = "2023-06-21T12:00:00+01:00"
///     .parse::<DateTime<FixedOffset>>()
///     .unwrap();
/// let london = GeoPoint::new(51.5074, -0.1278).unwrap();
///
/// let pair = riseset::transitions(date, london, Zenith::Official).unwrap();
/// assert!(pair.sunrise() < pair.sunset());
/// ```
pub fn transitions(
    datetime: DateTime<FixedOffset>,
    geo: GeoPoint,
    zenith: Zenith,
) -> Result<TransitionPair> {
    check_latitude(geo.latitude())?;
    check_year(datetime.year())?;

    let ephem_day = ephemeris_day(datetime.year(), datetime.month(), datetime.day());
    let sunrise = solve_transition(ephem_day, geo, zenith, TransitionKind::Sunrise);
    let sunset = solve_transition(ephem_day, geo, zenith, TransitionKind::Sunset);

    Ok(TransitionPair::new(
        to_local_clock_time(&datetime, sunrise),
        to_local_clock_time(&datetime, sunset),
    ))
}

/// Computes a single transition instant for the local calendar date of
/// `datetime` at the given location and zenith.
///
/// # Errors
/// Same failure modes as [`transitions`].
pub fn transition(
    datetime: DateTime<FixedOffset>,
    geo: GeoPoint,
    zenith: Zenith,
    kind: TransitionKind,
) -> Result<DateTime<FixedOffset>> {
    check_latitude(geo.latitude())?;
    check_year(datetime.year())?;

    let ephem_day = ephemeris_day(datetime.year(), datetime.month(), datetime.day());
    let decimal_time = solve_transition(ephem_day, geo, zenith, kind);
    Ok(to_local_clock_time(&datetime, decimal_time))
}

/// Day count since the 2000-01-01 reference epoch, by integer day arithmetic.
fn ephemeris_day(year: i32, month: u32, day: u32) -> f64 {
    let y = i64::from(year);
    let m = i64::from(month);
    let d = i64::from(day);

    let whole_days = 367 * y - 7 * (y + (m + 9) / 12) / 4 + 275 * m / 9 + d;
    whole_days as f64 - EPOCH_OFFSET
}

/// Fixed-point iteration for one transition; returns decimal UT hours.
///
/// Converges when the UT estimate moves by no more than the tolerance, or
/// gives up after the iteration cap and returns the last estimate. The
/// hour-angle correction is clamped when the sun never reaches the zenith
/// altitude on this date (polar day/night adjacent behaviour).
fn solve_transition(ephem_day: f64, geo: GeoPoint, zenith: Zenith, kind: TransitionKind) -> f64 {
    let rs = kind.hour_angle_sign();
    let sin_alt = sin(zenith.altitude_angle().to_radians());
    let sin_phi = sin(geo.latitude().to_radians());
    let cos_phi = cos(geo.latitude().to_radians());
    let lon = geo.longitude().to_radians();

    let mut ut_old = PI;
    let mut ut_new = 0.0;
    let mut count = 0;

    while fabs(ut_old - ut_new) > CONVERGENCE_TOLERANCE && count < MAX_ITERATIONS {
        count += 1;
        ut_old = ut_new;

        let days = ephem_day + ut_old / TAU;
        let t = days / DAYS_PER_CENTURY;

        // Low-precision solar ephemeris: mean longitude, mean anomaly,
        // equation of center, ecliptic longitude, equation of time,
        // obliquity, declination. Coefficients are in radians.
        let ell = normalize_radians_0_to_tau(4.894_950_420_143_3 + 628.331_969_753_199 * t);
        let g = normalize_radians_0_to_tau(6.240_040_8 + 628.301_950_1 * t);
        let ec = 0.033_423 * sin(g) + 0.000_349_07 * sin(2.0 * g);
        let lam = ell + ec;
        let e = -ec + 0.043_039_8 * sin(2.0 * lam) - 0.000_925_02 * sin(4.0 * lam);
        let obl = 0.409_093 - 0.000_226_9 * t;
        let sin_delta = sin(obl) * sin(lam);
        let delta = atan2(sin_delta, sqrt(1.0 - sin_delta * sin_delta));

        let gha = ut_old - PI + e;
        let cos_c = (sin_alt - sin_phi * sin(delta)) / (cos_phi * cos(delta));

        let correction = if cos_c > 1.0 {
            // sun never reaches this altitude: permanent day
            0.0
        } else if cos_c < -1.0 {
            // sun never rises to this altitude: permanent night
            PI
        } else {
            atan2(sqrt(1.0 - cos_c * cos_c), cos_c)
        };

        ut_new = normalize_radians_0_to_tau(ut_old - (gha + lon + rs * correction));
    }

    ut_new.to_degrees() / 15.0
}

/// Materializes a decimal UT time as a local clock time on the calendar
/// date of `datetime`, using the UTC offset the input carries.
fn to_local_clock_time(datetime: &DateTime<FixedOffset>, decimal_ut: f64) -> DateTime<FixedOffset> {
    let offset = datetime.offset().fix();
    let offset_hours = f64::from(offset.local_minus_utc()) / 3600.0;

    let mut decimal_time = decimal_ut + offset_hours;
    if decimal_time < 0.0 {
        decimal_time += 24.0;
    } else if decimal_time >= 24.0 {
        decimal_time -= 24.0;
    }

    let hour = trunc(decimal_time);
    let tmp = (decimal_time - hour) * 60.0;
    let minute = trunc(tmp);
    let tmp = (tmp - minute) * 60.0;
    let second = trunc(tmp);
    let micro = (round((tmp - second) * 1_000_000.0) as u32).min(999_999);

    let time = NaiveTime::from_hms_micro_opt(hour as u32, minute as u32, second as u32, micro)
        .expect("decimal time is normalized into one day");

    datetime
        .date_naive()
        .and_time(time)
        .and_local_timezone(offset)
        .single()
        .expect("fixed offsets map local times uniquely")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn parse(s: &str) -> DateTime<FixedOffset> {
        s.parse().unwrap()
    }

    #[test]
    fn test_ephemeris_day_epoch() {
        // 2000-01-01 is half a day before the 12:00 UT reference epoch
        assert_eq!(ephemeris_day(2000, 1, 1), -0.5);
        assert_eq!(ephemeris_day(2000, 1, 2), 0.5);
    }

    #[test]
    fn test_ephemeris_day_is_contiguous() {
        // one whole day across month and year boundaries
        assert_eq!(
            ephemeris_day(2023, 3, 1) - ephemeris_day(2023, 2, 28),
            1.0
        );
        assert_eq!(
            ephemeris_day(2024, 2, 29) - ephemeris_day(2024, 2, 28),
            1.0
        );
        assert_eq!(
            ephemeris_day(2024, 1, 1) - ephemeris_day(2023, 12, 31),
            1.0
        );
    }

    #[test]
    fn test_london_summer_solstice() {
        let date = parse("2023-06-21T12:00:00+00:00");
        let london = GeoPoint::new(51.5074, -0.1278).unwrap();

        let pair = transitions(date, london, Zenith::Official).unwrap();

        assert!(pair.sunrise() < pair.sunset());
        assert_eq!(pair.sunrise().date_naive(), date.date_naive());
        assert_eq!(pair.sunset().date_naive(), date.date_naive());

        // ~03:43 UTC sunrise and ~20:21 UTC sunset
        let sunrise_hour = pair.sunrise().hour();
        let sunset_hour = pair.sunset().hour();
        assert!(
            (3..=4).contains(&sunrise_hour),
            "sunrise {}",
            pair.sunrise()
        );
        assert!(
            (20..=21).contains(&sunset_hour),
            "sunset {}",
            pair.sunset()
        );
    }

    #[test]
    fn test_london_winter_solstice() {
        let date = parse("2023-12-21T12:00:00+00:00");
        let london = GeoPoint::new(51.5074, -0.1278).unwrap();

        let pair = transitions(date, london, Zenith::Official).unwrap();

        // ~08:04 UTC sunrise and ~15:53 UTC sunset
        let sunrise_hour = pair.sunrise().hour();
        let sunset_hour = pair.sunset().hour();
        assert!(
            (7..=8).contains(&sunrise_hour),
            "sunrise {}",
            pair.sunrise()
        );
        assert!(
            (15..=16).contains(&sunset_hour),
            "sunset {}",
            pair.sunset()
        );
    }

    #[test]
    fn test_equator_day_length_is_stable() {
        let geo = GeoPoint::new(0.0, 0.0).unwrap();

        for month in [3_u32, 6, 9, 12] {
            let date = format!("2023-{month:02}-21T12:00:00+00:00")
                .parse::<DateTime<FixedOffset>>()
                .unwrap();
            let pair = transitions(date, geo, Zenith::Official).unwrap();
            let day_length = pair.sunset() - pair.sunrise();

            // Equatorial days stay close to 12 hours year round
            let minutes = day_length.num_minutes();
            assert!(
                (700..=740).contains(&minutes),
                "month {month}: day length {minutes} minutes"
            );
        }
    }

    #[test]
    fn test_offset_representation_does_not_move_the_instant() {
        let london = GeoPoint::new(51.5074, -0.1278).unwrap();

        let in_utc = parse("2023-06-21T12:00:00+00:00");
        let in_bst = parse("2023-06-21T13:00:00+01:00");

        let pair_utc = transitions(in_utc, london, Zenith::Official).unwrap();
        let pair_bst = transitions(in_bst, london, Zenith::Official).unwrap();

        let drift = (pair_utc.sunrise() - pair_bst.sunrise()).num_seconds().abs();
        assert!(drift <= 1, "sunrise drifted {drift}s between offsets");

        let drift = (pair_utc.sunset() - pair_bst.sunset()).num_seconds().abs();
        assert!(drift <= 1, "sunset drifted {drift}s between offsets");
    }

    #[test]
    fn test_single_transition_matches_pair() {
        let date = parse("2023-09-10T09:00:00+02:00");
        let geo = GeoPoint::new(48.21, 16.37).unwrap();

        let pair = transitions(date, geo, Zenith::Civil).unwrap();
        let sunrise = transition(date, geo, Zenith::Civil, TransitionKind::Sunrise).unwrap();
        let sunset = transition(date, geo, Zenith::Civil, TransitionKind::Sunset).unwrap();

        assert_eq!(pair.sunrise(), sunrise);
        assert_eq!(pair.sunset(), sunset);
    }

    #[test]
    fn test_polar_latitude_rejected_before_iteration() {
        assert_eq!(
            GeoPoint::new(68.0, 0.0),
            Err(crate::Error::invalid_latitude(68.0))
        );
        assert_eq!(
            GeoPoint::new(-68.0, 0.0),
            Err(crate::Error::invalid_latitude(-68.0))
        );
    }

    #[test]
    fn test_year_outside_validity_window_rejected() {
        let geo = GeoPoint::new(51.5, 0.0).unwrap();

        let too_early = parse("1900-06-21T12:00:00+00:00");
        assert_eq!(
            transitions(too_early, geo, Zenith::Official),
            Err(crate::Error::date_out_of_range(1900))
        );

        let too_late = parse("2100-06-21T12:00:00+00:00");
        assert_eq!(
            transitions(too_late, geo, Zenith::Official),
            Err(crate::Error::date_out_of_range(2100))
        );
    }

    #[test]
    fn test_determinism() {
        let date = parse("2023-06-21T12:00:00+00:00");
        let geo = GeoPoint::new(51.5074, -0.1278).unwrap();

        let first = transitions(date, geo, Zenith::Civil).unwrap();
        let second = transitions(date, geo, Zenith::Civil).unwrap();
        assert_eq!(first, second);
    }
}
