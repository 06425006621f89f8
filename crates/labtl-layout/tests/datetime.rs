//! Tests for timestamp parsing.

use chrono::{NaiveDate, NaiveDateTime};
use labtl_layout::parse_timestamp;

fn at(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

#[test]
fn parse_minute_precision() {
    assert_eq!(
        parse_timestamp("2023-01-01T09:00").unwrap(),
        at(2023, 1, 1, 9, 0, 0)
    );
}

#[test]
fn parse_seconds_and_fraction() {
    assert_eq!(
        parse_timestamp("2023-01-01T09:00:30").unwrap(),
        at(2023, 1, 1, 9, 0, 30)
    );
    let parsed = parse_timestamp("2023-01-01T09:00:30.500").unwrap();
    assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
}

#[test]
fn parse_space_separator() {
    assert_eq!(
        parse_timestamp("2023-06-15 14:30").unwrap(),
        at(2023, 6, 15, 14, 30, 0)
    );
}

#[test]
fn parse_offsets_normalize_to_utc() {
    assert_eq!(
        parse_timestamp("2023-01-01T09:00:00Z").unwrap(),
        at(2023, 1, 1, 9, 0, 0)
    );
    assert_eq!(
        parse_timestamp("2023-01-01T09:00:00+02:00").unwrap(),
        at(2023, 1, 1, 7, 0, 0)
    );
    assert_eq!(
        parse_timestamp("2023-01-01T09:00:00.000+0000").unwrap(),
        at(2023, 1, 1, 9, 0, 0)
    );
}

#[test]
fn parse_date_only_is_midnight() {
    assert_eq!(parse_timestamp("2023-12-25").unwrap(), at(2023, 12, 25, 0, 0, 0));
}

#[test]
fn parse_rejects_garbage() {
    assert!(parse_timestamp("").is_err());
    assert!(parse_timestamp("   ").is_err());
    assert!(parse_timestamp("not a date").is_err());
    assert!(parse_timestamp("2023-13-01T09:00").is_err());
}
