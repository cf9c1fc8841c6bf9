use std::path::Path;

use chrono::{Month, Weekday};
use polars::datatypes::TimeUnit;
use polars::prelude::StrptimeOptions;
use polars::prelude::*;
use tracing::info;

use crate::config::ExplorerConfig;
use crate::error::{ExploreError, Result};
use crate::filters::{day_number, month_number, Selection};
use crate::schema::{demographics, derived, trip};

/// Which optional columns a city's file carries, decided once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TripSchema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl TripSchema {
    fn detect(df: &DataFrame) -> Self {
        let schema = df.schema();
        Self {
            has_gender: schema.contains(demographics::GENDER),
            has_birth_year: schema.contains(demographics::BIRTH_YEAR),
        }
    }
}

/// Trip records for one city with the derived calendar columns attached.
#[derive(Debug, Clone)]
pub struct TripTable {
    df: DataFrame,
    schema: TripSchema,
}

impl TripTable {
    /// Build a table from a frame whose columns are all strings, as read
    /// from a city CSV.
    ///
    /// Parses `Start Time`, casts the numeric columns to Float64 and derives
    /// `month` (1-12), `day_of_week` (0 = Sunday) and `hour` from it.
    pub fn from_frame(raw: DataFrame) -> Result<Self> {
        require_columns(&raw, &trip::REQUIRED)?;
        let schema = TripSchema::detect(&raw);

        let df = parse_datetime_column(raw, trip::START_TIME, trip::TIMESTAMP_FORMAT)?;

        let mut numeric = vec![trip::TRIP_DURATION];
        if schema.has_birth_year {
            numeric.push(demographics::BIRTH_YEAR);
        }
        let df = cast_numeric_columns(df, &numeric)?;

        // weekday() is ISO (Monday = 1 .. Sunday = 7); mod 7 makes Sunday 0.
        let df = df
            .lazy()
            .with_columns([
                col(trip::START_TIME)
                    .dt()
                    .month()
                    .cast(DataType::Int32)
                    .alias(derived::MONTH),
                (col(trip::START_TIME).dt().weekday().cast(DataType::Int32) % lit(7))
                    .alias(derived::DAY_OF_WEEK),
                col(trip::START_TIME)
                    .dt()
                    .hour()
                    .cast(DataType::Int32)
                    .alias(derived::HOUR),
            ])
            .collect()?;

        Ok(Self { df, schema })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn schema(&self) -> TripSchema {
        self.schema
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn width(&self) -> usize {
        self.df.width()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Apply the optional month and day equality filters.
    pub fn filter(self, month: Option<Month>, day: Option<Weekday>) -> Result<Self> {
        let mut table = self;
        if let Some(month) = month {
            table = table.filter_by_month(month)?;
        }
        if let Some(day) = day {
            table = table.filter_by_day(day)?;
        }
        Ok(table)
    }

    pub fn filter_by_month(self, month: Month) -> Result<Self> {
        let table = self.keep_where(derived::MONTH, month_number(month))?;
        info!(rows = table.height(), columns = table.width(), "frame after month filter");
        Ok(table)
    }

    pub fn filter_by_day(self, day: Weekday) -> Result<Self> {
        let table = self.keep_where(derived::DAY_OF_WEEK, day_number(day))?;
        info!(rows = table.height(), columns = table.width(), "frame after day filter");
        Ok(table)
    }

    fn keep_where(self, column: &str, value: i32) -> Result<Self> {
        let Self { df, schema } = self;
        let df = df.lazy().filter(col(column).eq(lit(value))).collect()?;
        Ok(Self { df, schema })
    }
}

/// Load the selected city's trips and apply the selection's filters.
pub fn load_trips(config: &ExplorerConfig, selection: &Selection) -> Result<TripTable> {
    let path = config.city_path(selection.city)?;
    if !path.is_file() {
        return Err(ExploreError::MissingFile(path));
    }

    let table = TripTable::from_frame(read_csv_as_strings(&path)?)?;
    info!(
        city = %selection.city,
        rows = table.height(),
        columns = table.width(),
        "frame before filters"
    );

    table.filter(selection.month, selection.day)
}

/// Read a CSV file with all columns as String dtype.
/// Trims whitespace from column names.
pub fn read_csv_as_strings(path: &Path) -> Result<DataFrame> {
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // all columns as String
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let trimmed: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    df.set_column_names(trimmed.as_slice())?;

    Ok(df)
}

fn require_columns(df: &DataFrame, required: &[&str]) -> Result<()> {
    for &col_name in required {
        if df.column(col_name).is_err() {
            return Err(ExploreError::MissingColumn(col_name.to_string()));
        }
    }
    Ok(())
}

/// Cast string columns to Float64. Blank cells stay null; any other cell
/// that does not parse as a number fails the load.
fn cast_numeric_columns(df: DataFrame, columns: &[&str]) -> Result<DataFrame> {
    let nulls_before = columns
        .iter()
        .map(|name| Ok(df.column(name)?.null_count()))
        .collect::<Result<Vec<usize>>>()?;

    let casts: Vec<Expr> = columns
        .iter()
        .map(|name| col(*name).cast(DataType::Float64))
        .collect();
    let df = df.lazy().with_columns(casts).collect()?;

    for (name, before) in columns.iter().zip(nulls_before) {
        let after = df.column(name)?.null_count();
        if after > before {
            return Err(ExploreError::InvalidData(format!(
                "Column '{name}' has {} non-numeric values",
                after - before
            )));
        }
    }
    Ok(df)
}

/// Parse a string column to Datetime. Nulls stay null.
fn parse_datetime_column(df: DataFrame, column: &str, format: &str) -> Result<DataFrame> {
    let df = df
        .lazy()
        .with_columns([col(column)
            .str()
            .strip_chars(lit(" \t\r\n"))
            .str()
            .to_datetime(
                Some(TimeUnit::Microseconds),
                None,
                StrptimeOptions {
                    format: Some(format.into()),
                    strict: true,
                    ..Default::default()
                },
                lit("raise"),
            )])
        .collect()?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::City;
    use crate::testing::{sample_frame, write_city_csv, SAMPLE_CSV, WASHINGTON_CSV};

    /// Trip durations are unique in the sample, so they identify rows.
    fn row_keys(table: &TripTable) -> Vec<Option<f64>> {
        table
            .frame()
            .column(trip::TRIP_DURATION)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    fn int_column(table: &TripTable, name: &str) -> Vec<Option<i32>> {
        table.frame().column(name).unwrap().i32().unwrap().into_iter().collect()
    }

    #[test]
    fn test_derived_columns_follow_start_time() {
        let table = TripTable::from_frame(sample_frame()).unwrap();

        assert_eq!(
            int_column(&table, derived::MONTH),
            [3, 3, 3, 6, 6, 6, 1].map(Some).to_vec()
        );
        // 2017-03-05 is a Sunday, 2017-03-06 a Monday, 2017-03-10 a Friday
        assert_eq!(
            int_column(&table, derived::DAY_OF_WEEK),
            [0, 1, 5, 1, 5, 0, 1].map(Some).to_vec()
        );
        assert_eq!(
            int_column(&table, derived::HOUR),
            [8, 8, 17, 8, 17, 12, 8].map(Some).to_vec()
        );
    }

    #[test]
    fn test_all_filters_keep_every_row() {
        let table = TripTable::from_frame(sample_frame()).unwrap();
        let before = row_keys(&table);
        let filtered = table.filter(None, None).unwrap();
        assert_eq!(filtered.height(), 7);
        assert_eq!(row_keys(&filtered), before);
        assert_eq!(filtered.schema(), TripSchema { has_gender: true, has_birth_year: true });
    }

    #[test]
    fn test_month_and_day_filters_commute() {
        let base = TripTable::from_frame(sample_frame()).unwrap();
        for (month, day) in [
            (Month::March, Weekday::Mon),
            (Month::June, Weekday::Sun),
            (Month::January, Weekday::Fri),
        ] {
            let month_first = base
                .clone()
                .filter_by_month(month)
                .and_then(|t| t.filter_by_day(day))
                .unwrap();
            let day_first = base
                .clone()
                .filter_by_day(day)
                .and_then(|t| t.filter_by_month(month))
                .unwrap();
            assert_eq!(
                row_keys(&month_first),
                row_keys(&day_first),
                "{month:?}/{day:?} should commute"
            );
        }
    }

    #[test]
    fn test_filters_preserve_source_order() {
        let table = TripTable::from_frame(sample_frame()).unwrap();
        let mondays = table.filter(None, Some(Weekday::Mon)).unwrap();
        assert_eq!(
            row_keys(&mondays),
            vec![Some(600.0), Some(1200.0), Some(200.0)]
        );

        let table = TripTable::from_frame(sample_frame()).unwrap();
        let march_monday = table.filter(Some(Month::March), Some(Weekday::Mon)).unwrap();
        assert_eq!(march_monday.height(), 1);
    }

    #[test]
    fn test_missing_required_column_is_reported() {
        let raw = sample_frame().drop(trip::USER_TYPE).unwrap();
        let err = TripTable::from_frame(raw).unwrap_err();
        assert!(matches!(err, ExploreError::MissingColumn(ref c) if c == trip::USER_TYPE));
    }

    #[test]
    fn test_non_numeric_duration_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        write_city_csv(
            dir.path(),
            "washington.csv",
            "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-06-21 08:36:34,2017-06-21 08:44:43,abc,14th & Belmont St NW,15th & K St NW,Subscriber
2017-03-11 10:40:00,2017-03-11 10:46:00,n/a,Yuma St & Tenley Circle NW,15th & K St NW,Customer
",
        );
        let config = ExplorerConfig::new(dir.path());

        let selection = Selection::new(City::Washington, None, None);
        let err = load_trips(&config, &selection).unwrap_err();
        assert!(
            matches!(err, ExploreError::InvalidData(ref msg) if msg.contains(trip::TRIP_DURATION)),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_non_numeric_birth_year_fails_but_blank_is_allowed() {
        let mut raw = sample_frame();
        raw.with_column(Column::new(
            demographics::BIRTH_YEAR.into(),
            &[Some("1990"), None, Some("unknown"), None, None, None, None],
        ))
        .unwrap();
        let err = TripTable::from_frame(raw).unwrap_err();
        assert!(matches!(err, ExploreError::InvalidData(ref msg) if msg.contains("1 non-numeric")));

        // sample_frame already has blank birth years; those load as nulls.
        let table = TripTable::from_frame(sample_frame()).unwrap();
        let years = table.frame().column(demographics::BIRTH_YEAR).unwrap();
        assert_eq!(years.null_count(), 2);
    }

    #[test]
    fn test_load_trips_reads_city_file() {
        let dir = tempfile::tempdir().unwrap();
        write_city_csv(dir.path(), "chicago.csv", SAMPLE_CSV);
        let config = ExplorerConfig::new(dir.path());

        let all = load_trips(&config, &Selection::new(City::Chicago, None, None)).unwrap();
        assert_eq!(all.height(), 7);
        assert_eq!(
            all.schema(),
            TripSchema {
                has_gender: true,
                has_birth_year: true
            }
        );

        let june = Selection::new(City::Chicago, Some(Month::June), None);
        assert_eq!(load_trips(&config, &june).unwrap().height(), 3);
    }

    #[test]
    fn test_schema_without_demographics() {
        let dir = tempfile::tempdir().unwrap();
        write_city_csv(dir.path(), "washington.csv", WASHINGTON_CSV);
        let config = ExplorerConfig::new(dir.path());

        let table = load_trips(&config, &Selection::new(City::Washington, None, None)).unwrap();
        assert_eq!(table.schema(), TripSchema::default());
        assert!(!table.is_empty());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExplorerConfig::new(dir.path());
        let selection = Selection::new(City::NewYorkCity, None, None);
        let err = load_trips(&config, &selection).unwrap_err();
        assert!(matches!(err, ExploreError::MissingFile(_)));
    }
}
