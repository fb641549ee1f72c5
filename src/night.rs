//! Day/night classification and flight-interval splitting.
//!
//! Builds on the [`crate::riseset`] solver: an instant is night exactly when
//! the most recent transition at or before it was a sunset. A flight that
//! departs in one state and arrives in the other crosses a single transition;
//! the crossing instant is interpolated linearly between the transition times
//! at the two endpoints and the interval is allocated to day and night
//! buckets to the minute.

use crate::math::{round, trunc};
use crate::riseset;
use crate::types::{GeoPoint, NightSplit, TransitionKind, Zenith};
use crate::{Error, Result};
use chrono::{DateTime, Duration, FixedOffset};

/// Bound on the day-by-day transition searches.
///
/// Ordinary inputs terminate within two steps; the bound guards against
/// permanent day/night at the edge of the latitude validity limit.
const MAX_SEARCH_DAYS: u32 = 7;

/// Longest boundary-crossing interval the single-crossing model accepts,
/// in hours. Longer intervals can cross more than one transition, which
/// would silently break the interpolation.
const MAX_CROSSING_HOURS: i64 = 20;

/// Direction of a day-by-day transition search.
#[derive(Debug, Clone, Copy)]
enum SearchDirection {
    /// First transition at or after the reference instant.
    Forward,
    /// Last transition at or before the reference instant.
    Backward,
}

/// Checks whether an instant is during the night at a location.
///
/// Walks backward one calendar day at a time from the day after the instant
/// until a date is found whose sunrise or sunset lies at or before the
/// instant; the later such transition decides the state. An instant exactly
/// at a transition takes the state that transition establishes: exactly at
/// sunset is night, exactly at sunrise is day.
///
/// # Errors
/// Propagates solver errors, and returns `NoTransitionFound` if no
/// qualifying transition exists within the search bound.
///
/// # Example
/// ```
/// use chrono::{DateTime, FixedOffset};
/// use night_hours::{night, GeoPoint, Zenith};
///
/// let london = GeoPoint::new(51.5074, -0.1278).unwrap();
/// let noon = "2023-06-21T12:00:00+00:00"
///     .parse::<DateTime<FixedOffset>>()
///     .unwrap();
///
/// assert!(!night::is_night(noon, london, Zenith::Civil).unwrap());
/// ```
pub fn is_night(
    instant: DateTime<FixedOffset>,
    geo: GeoPoint,
    zenith: Zenith,
) -> Result<bool> {
    let one_day = Duration::days(1);
    let mut working_date = instant + one_day;
    let mut pair = riseset::transitions(working_date, geo, zenith)?;
    let mut steps = 0;

    while pair.sunrise() > instant && pair.sunset() > instant {
        steps += 1;
        if steps > MAX_SEARCH_DAYS {
            return Err(Error::no_transition_found(MAX_SEARCH_DAYS));
        }
        working_date -= one_day;
        pair = riseset::transitions(working_date, geo, zenith)?;
    }

    if pair.sunrise() <= instant && pair.sunset() <= instant {
        // both transitions occurred; the later one decides
        Ok(pair.sunset() > pair.sunrise())
    } else {
        // only one transition occurred
        Ok(pair.sunset() <= instant)
    }
}

/// Splits a flight interval into day and night durations.
///
/// Both endpoints are classified with [`is_night`]. If they agree, the whole
/// interval lands in that bucket. If they differ, the crossed transition
/// (day to night crosses a sunset, night to day a sunrise) is bracketed at
/// both locations and the crossing instant is interpolated linearly along
/// the route, rounded to the nearest minute; the remainder of the interval
/// goes to the other bucket, so the two durations always sum exactly to the
/// elapsed time.
///
/// # Errors
/// Returns `InvalidInterval` if the arrival precedes the departure (use
/// [`add_arrival_days`] to normalize schedule-style times first), and
/// `IntervalTooLong` if a boundary-crossing interval exceeds the
/// single-crossing model's validity bound. Solver and search errors
/// propagate.
///
/// # Example
/// ```
/// use chrono::{DateTime, FixedOffset};
/// use night_hours::{night, GeoPoint, Zenith};
///
/// let london = GeoPoint::new(51.5074, -0.1278).unwrap();
/// let dep = "2023-06-21T10:00:00+00:00"
///     .parse::<DateTime<FixedOffset>>()
///     .unwrap();
/// let arr = "2023-06-21T22:00:00+00:00"
///     .parse::<DateTime<FixedOffset>>()
///     .unwrap();
///
/// let split = night::split(dep, london, arr, london, Zenith::Civil).unwrap();
/// assert!(split.arrival_is_night());
/// assert_eq!(split.day() + split.night(), arr - dep);
/// ```
pub fn split(
    dep: DateTime<FixedOffset>,
    dep_geo: GeoPoint,
    arr: DateTime<FixedOffset>,
    arr_geo: GeoPoint,
    zenith: Zenith,
) -> Result<NightSplit> {
    if arr < dep {
        return Err(Error::invalid_interval("arrival precedes departure"));
    }

    let total = arr - dep;
    let dep_is_night = is_night(dep, dep_geo, zenith)?;
    let arr_is_night = is_night(arr, arr_geo, zenith)?;

    if dep_is_night == arr_is_night {
        return Ok(if arr_is_night {
            NightSplit::new(Duration::zero(), total, true)
        } else {
            NightSplit::new(total, Duration::zero(), false)
        });
    }

    if total > Duration::hours(MAX_CROSSING_HOURS) {
        return Err(Error::interval_too_long(duration_seconds(total) / 3600.0));
    }

    // Day to night crosses a sunset, night to day a sunrise.
    let kind = if arr_is_night {
        TransitionKind::Sunset
    } else {
        TransitionKind::Sunrise
    };

    let ts1 = bracket_transition(dep, dep_geo, zenith, kind, SearchDirection::Forward)?;
    let ts2 = bracket_transition(arr, arr_geo, zenith, kind, SearchDirection::Backward)?;

    // tp1/tp2 are the endpoint instants, ts1/ts2 the transition instants at
    // the endpoint locations. Treating the transition time as linear in
    // position along the route, the crossing occurs at
    //   t - tp1 = (ts1 - tp1) * (tp2 - tp1) / ((tp2 - tp1) - (ts2 - ts1))
    let tdp = duration_seconds(total);
    let tds = duration_seconds(ts2 - ts1);
    let tdsp1 = duration_seconds(ts1 - dep);
    let crossing_seconds = tdsp1 * tdp / (tdp - tds);

    // Round the primary bucket first, then derive the other as the exact
    // remainder so the two buckets sum to the elapsed time.
    let primary = round_to_minute(crossing_seconds);

    Ok(if arr_is_night {
        NightSplit::new(primary, total - primary, true)
    } else {
        NightSplit::new(total - primary, primary, false)
    })
}

/// Adds whole days to a schedule-style arrival time until it is at or after
/// the departure, handling flights that land after midnight.
///
/// Logbook sources record arrival as a clock time on the departure date;
/// an arrival clock time earlier than departure means the flight landed the
/// next day.
#[must_use]
pub fn add_arrival_days(
    dep: DateTime<FixedOffset>,
    arr: DateTime<FixedOffset>,
) -> DateTime<FixedOffset> {
    let mut arr = arr;
    while arr < dep {
        arr += Duration::days(1);
    }
    arr
}

/// Day-by-day search for the transition of `kind` bracketing `instant`.
///
/// Forward: starts one day before the instant and walks forward until the
/// transition is at or after it. Backward: starts one day after and walks
/// back until the transition is at or before it. The inclusive comparisons
/// keep an instant exactly at a transition inside the bracket on both sides.
fn bracket_transition(
    instant: DateTime<FixedOffset>,
    geo: GeoPoint,
    zenith: Zenith,
    kind: TransitionKind,
    direction: SearchDirection,
) -> Result<DateTime<FixedOffset>> {
    let one_day = Duration::days(1);
    let (mut working_date, step) = match direction {
        SearchDirection::Forward => (instant - one_day, one_day),
        SearchDirection::Backward => (instant + one_day, -one_day),
    };

    for _ in 0..=MAX_SEARCH_DAYS {
        let ts = riseset::transition(working_date, geo, zenith, kind)?;
        let found = match direction {
            SearchDirection::Forward => ts >= instant,
            SearchDirection::Backward => ts <= instant,
        };
        if found {
            return Ok(ts);
        }
        working_date += step;
    }

    Err(Error::no_transition_found(MAX_SEARCH_DAYS))
}

/// Elapsed seconds of a duration, including the sub-second part.
fn duration_seconds(duration: Duration) -> f64 {
    duration
        .num_microseconds()
        .map_or_else(|| duration.num_milliseconds() as f64 / 1e3, |us| us as f64 / 1e6)
}

/// Rounds elapsed seconds to the nearest whole minute, half up, carrying a
/// rounded-up 60th minute into the hour.
fn round_to_minute(seconds: f64) -> Duration {
    let mut hours = trunc(seconds / 3600.0);
    let mut minutes = round((seconds - 3600.0 * hours) / 60.0);
    if minutes >= 60.0 {
        hours += 1.0;
        minutes = 0.0;
    }
    Duration::minutes((hours * 60.0 + minutes) as i64)
}
