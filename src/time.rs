use chrono::{DateTime, Datelike, NaiveDateTime, Timelike, Utc};
use hifitime::Epoch;

use crate::{constants::MJD, ingest_errors::ParseRowError};

/// Naive layouts accepted for `obsTime` when no zone designator is present.
/// ADES writes `T`; the space variant shows up in hand-edited files.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ADES `obsTime` value into an absolute UTC instant.
///
/// Argument
/// --------
/// * `obs_time`: an ISO-8601 extended timestamp in the UTC scale, e.g. `2025-04-27T21:51:58.890Z`.
///   The trailing `Z` is optional; a naive timestamp is read as UTC.
///
/// Return
/// ------
/// * the instant as a [`DateTime<Utc>`], or [`ParseRowError::InvalidTimestamp`] carrying the raw text
pub fn parse_obs_time(obs_time: &str) -> Result<DateTime<Utc>, ParseRowError> {
    let raw = obs_time.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = raw.strip_suffix(&['Z', 'z'][..]).unwrap_or(raw);
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(naive, layout).ok())
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ParseRowError::InvalidTimestamp(raw.to_string()))
}

/// Convert a UTC instant to a hifitime [`Epoch`] in the UTC time scale.
pub fn to_epoch(instant: &DateTime<Utc>) -> Epoch {
    // chrono encodes a leap second as nanosecond >= 1e9
    let nanos = instant.nanosecond().min(999_999_999);
    Epoch::from_gregorian_utc(
        instant.year(),
        instant.month() as u8,
        instant.day() as u8,
        instant.hour() as u8,
        instant.minute() as u8,
        instant.second() as u8,
        nanos,
    )
}

/// Transformation from a UTC instant to modified julian date (MJD, UTC scale)
pub fn to_mjd_utc(instant: &DateTime<Utc>) -> MJD {
    to_epoch(instant).to_mjd_utc_days()
}

#[cfg(test)]
mod time_test {
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, milli: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_milli_opt(h, mi, s, milli)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_parse_naive_obs_time() {
        let ts = parse_obs_time("1971-09-16T04:20:36.672").unwrap();
        assert_eq!(ts, utc(1971, 9, 16, 4, 20, 36, 672));
        assert_eq!(ts.offset().to_string(), "UTC");
    }

    #[test]
    fn test_parse_zulu_obs_time() {
        let ts = parse_obs_time("2025-04-27T21:51:58.890Z").unwrap();
        assert_eq!(ts, utc(2025, 4, 27, 21, 51, 58, 890));

        let ts = parse_obs_time(" 2025-04-27T21:51:58Z ").unwrap();
        assert_eq!(ts, utc(2025, 4, 27, 21, 51, 58, 0));
    }

    #[test]
    fn test_parse_offset_is_normalized() {
        let ts = parse_obs_time("2025-04-27T23:51:58.890+02:00").unwrap();
        assert_eq!(ts, utc(2025, 4, 27, 21, 51, 58, 890));
    }

    #[test]
    fn test_parse_space_separator() {
        let ts = parse_obs_time("2021-01-01 12:00:00.5").unwrap();
        assert_eq!(ts, utc(2021, 1, 1, 12, 0, 0, 500));
    }

    #[test]
    fn test_parse_invalid_obs_time() {
        assert_eq!(
            parse_obs_time("20xx-09-16T04:20:36"),
            Err(ParseRowError::InvalidTimestamp("20xx-09-16T04:20:36".into()))
        );
        assert!(parse_obs_time("").is_err());
        assert!(parse_obs_time("2021-13-01T00:00:00").is_err());
    }

    #[test]
    fn test_to_mjd_utc() {
        let mjd = to_mjd_utc(&utc(2021, 1, 1, 0, 0, 0, 0));
        assert_eq!(mjd, 59215.0);

        let mjd = to_mjd_utc(&utc(2021, 1, 2, 12, 0, 0, 0));
        assert_relative_eq!(mjd, 59216.5, epsilon = 1e-9);
    }
}
