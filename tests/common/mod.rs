#![allow(dead_code)]

use ades_ingest::{FileSystemStorage, Measurement};
use approx::assert_relative_eq;
use camino::Utf8PathBuf;
use chrono::{DateTime, NaiveDate, Utc};

pub const FIXTURE: &str = "ades_astrometry.psv";

pub fn data_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

pub fn fixture_storage() -> FileSystemStorage {
    FileSystemStorage::new(data_dir())
}

pub fn fixture_content() -> String {
    std::fs::read_to_string(data_dir().join(FIXTURE)).unwrap()
}

pub fn utc_millis(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, milli: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_milli_opt(h, mi, s, milli)
        .unwrap()
        .and_utc()
}

pub fn assert_position_close(actual: &Measurement, ra: f64, dec: f64, epsilon: f64) {
    assert_relative_eq!(actual.value.ra, ra, epsilon = epsilon);
    assert_relative_eq!(actual.value.dec, dec, epsilon = epsilon);
}
