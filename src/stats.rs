//! Descriptive statistics over a filtered trip table.
//!
//! Each reporter is a pure read of the table and returns
//! [`ExploreError::NoData`] when the table is empty, since mode, min and max
//! are undefined there. A non-empty table whose required column holds only
//! blanks is [`ExploreError::InvalidData`] naming that column.
//!
//! Ties in "most frequent" are broken deterministically: the smallest value
//! wins (lexicographic for text, numeric for numbers). Nulls are ignored.

use std::collections::BTreeMap;

use chrono::{Month, Weekday};
use polars::prelude::*;

use crate::error::{ExploreError, Result};
use crate::filters::{day_from_number, month_from_number};
use crate::loader::TripTable;
use crate::schema::{demographics, derived, trip};

#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    pub top_month: Month,
    pub top_day: Weekday,
    pub top_hour: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub start: String,
    pub end: String,
    pub trips: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub top_start: String,
    pub top_end: String,
    pub top_route: Route,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub trips: usize,
    pub total_seconds: f64,
    pub mean_seconds: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i64,
    pub latest: i64,
    pub most_common: i64,
}

/// `None` in an optional field means the city's file lacks that column
/// (or, for birth year, that no filtered row carries a value).
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub genders: Option<Vec<(String, usize)>>,
    pub birth_years: Option<BirthYearStats>,
}

// ── Reporters ───────────────────────────────────────────────────────────────

/// Most frequent month, day of week and start hour.
pub fn time_stats(table: &TripTable) -> Result<TimeStats> {
    let df = non_empty(table)?;

    // The derived columns are only null where Start Time was blank.
    let month_num =
        mode(int_values(df, derived::MONTH)?).ok_or_else(|| blank(trip::START_TIME))?;
    let day_num =
        mode(int_values(df, derived::DAY_OF_WEEK)?).ok_or_else(|| blank(trip::START_TIME))?;
    let top_hour =
        mode(int_values(df, derived::HOUR)?).ok_or_else(|| blank(trip::START_TIME))?;

    let top_month = month_from_number(month_num)
        .ok_or_else(|| ExploreError::InvalidData(format!("Month number {month_num}")))?;
    let top_day = day_from_number(day_num)
        .ok_or_else(|| ExploreError::InvalidData(format!("Day number {day_num}")))?;

    Ok(TimeStats {
        top_month,
        top_day,
        top_hour,
    })
}

/// Most popular start station, end station and start/end combination.
pub fn station_stats(table: &TripTable) -> Result<StationStats> {
    let df = non_empty(table)?;
    let starts = df.column(trip::START_STATION)?.str()?;
    let ends = df.column(trip::END_STATION)?.str()?;

    let top_start = mode(starts.into_iter()).ok_or_else(|| blank(trip::START_STATION))?;
    let top_end = mode(ends.into_iter()).ok_or_else(|| blank(trip::END_STATION))?;

    let pairs = starts
        .into_iter()
        .zip(ends.into_iter())
        .map(|(s, e)| s.zip(e));
    let ((start, end), trips) = counts(pairs)
        .into_iter()
        .min_by(|(ka, ca), (kb, cb)| cb.cmp(ca).then_with(|| ka.cmp(kb)))
        .ok_or_else(|| {
            ExploreError::InvalidData("No trip has both a start and an end station".to_string())
        })?;

    Ok(StationStats {
        top_start: top_start.to_string(),
        top_end: top_end.to_string(),
        top_route: Route {
            start: start.to_string(),
            end: end.to_string(),
            trips,
        },
    })
}

/// Total and mean trip duration in seconds.
pub fn duration_stats(table: &TripTable) -> Result<DurationStats> {
    let df = non_empty(table)?;
    let durations = df.column(trip::TRIP_DURATION)?.f64()?;

    let total_seconds = durations.sum().unwrap_or(0.0);
    let mean_seconds = durations
        .mean()
        .ok_or_else(|| blank(trip::TRIP_DURATION))?;

    Ok(DurationStats {
        trips: df.height(),
        total_seconds,
        mean_seconds,
    })
}

/// User type counts, plus gender counts and birth year extremes where the
/// city's file has those columns.
pub fn user_stats(table: &TripTable) -> Result<UserStats> {
    let df = non_empty(table)?;
    let schema = table.schema();

    let user_types = owned(value_counts(df.column(trip::USER_TYPE)?.str()?.into_iter()));

    let genders = if schema.has_gender {
        let gender = df.column(demographics::GENDER)?.str()?;
        Some(owned(value_counts(gender.into_iter())))
    } else {
        None
    };

    let birth_years = if schema.has_birth_year {
        birth_year_stats(df.column(demographics::BIRTH_YEAR)?.f64()?)
    } else {
        None
    };

    Ok(UserStats {
        user_types,
        genders,
        birth_years,
    })
}

fn birth_year_stats(years: &Float64Chunked) -> Option<BirthYearStats> {
    // Birth years are whole numbers stored as floats in the source files.
    let years: Vec<i64> = years.into_iter().flatten().map(|y| y as i64).collect();
    Some(BirthYearStats {
        earliest: *years.iter().min()?,
        latest: *years.iter().max()?,
        most_common: mode(years.iter().copied().map(Some))?,
    })
}

// ── Frequency helpers ───────────────────────────────────────────────────────

fn non_empty(table: &TripTable) -> Result<&DataFrame> {
    if table.is_empty() {
        Err(ExploreError::NoData)
    } else {
        Ok(table.frame())
    }
}

fn blank(column: &str) -> ExploreError {
    ExploreError::InvalidData(format!("Column '{column}' is blank for every selected trip"))
}

fn int_values(df: &DataFrame, column: &str) -> Result<Vec<Option<i32>>> {
    Ok(df.column(column)?.i32()?.into_iter().collect())
}

/// Occurrence count per non-null value, keyed in ascending value order.
fn counts<T: Ord>(values: impl IntoIterator<Item = Option<T>>) -> BTreeMap<T, usize> {
    let mut counts = BTreeMap::new();
    for value in values.into_iter().flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Most frequent non-null value; the smallest value wins a tie.
pub fn mode<T: Ord>(values: impl IntoIterator<Item = Option<T>>) -> Option<T> {
    let mut best: Option<(T, usize)> = None;
    // BTreeMap iterates in ascending order, so a strict `>` keeps the
    // smallest of equally frequent values.
    for (value, count) in counts(values) {
        if best.as_ref().map_or(true, |(_, c)| count > *c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Frequency table ordered by count descending, then value ascending.
pub fn value_counts<T: Ord>(values: impl IntoIterator<Item = Option<T>>) -> Vec<(T, usize)> {
    let mut table: Vec<(T, usize)> = counts(values).into_iter().collect();
    // Stable sort keeps the ascending value order within equal counts.
    table.sort_by(|(_, a), (_, b)| b.cmp(a));
    table
}

fn owned(table: Vec<(&str, usize)>) -> Vec<(String, usize)> {
    table
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}
