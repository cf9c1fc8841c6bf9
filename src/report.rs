//! Terminal rendering for the statistics reporters.

use std::io::{self, Write};
use std::time::Instant;

use chrono::TimeDelta;
use tracing::debug;

use crate::error::Result;
use crate::filters::{day_name, month_name};
use crate::loader::TripTable;
use crate::prompt::SEPARATOR;
use crate::stats::{DurationStats, StationStats, TimeStats, UserStats};

/// A statistics result that knows its section heading and how to print
/// itself.
pub trait Render {
    const HEADING: &'static str;

    fn render<W: Write>(&self, out: &mut W) -> io::Result<()>;
}

/// Print the heading, compute and render one section, then the timing footer.
pub fn report<T, W>(
    out: &mut W,
    table: &TripTable,
    compute: fn(&TripTable) -> Result<T>,
) -> Result<()>
where
    T: Render,
    W: Write,
{
    writeln!(out, "\n{}\n", T::HEADING)?;
    let started = Instant::now();

    compute(table)?.render(out)?;

    let elapsed = started.elapsed();
    debug!(section = T::HEADING, ?elapsed, "section rendered");
    writeln!(out, "\nThis took {} seconds.", elapsed.as_secs_f64())?;
    writeln!(out, "{SEPARATOR}")?;
    Ok(())
}

impl Render for TimeStats {
    const HEADING: &'static str = "Calculating The Most Frequent Times of Travel...";

    fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "The top month is: {}", month_name(self.top_month))?;
        writeln!(out, "The top day is: {}", day_name(self.top_day))?;
        writeln!(out, "The top hour is: {}:00", self.top_hour)
    }
}

impl Render for StationStats {
    const HEADING: &'static str = "Calculating The Most Popular Stations and Trip...";

    fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Common start: {}", self.top_start)?;
        writeln!(out, "Common end: {}", self.top_end)?;
        writeln!(
            out,
            "Common route: {} -> {} ({} trips)",
            self.top_route.start, self.top_route.end, self.top_route.trips
        )
    }
}

impl Render for DurationStats {
    const HEADING: &'static str = "Calculating Trip Duration...";

    fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Total trip duration is {:.0} seconds ({}) and mean duration is {:.2} seconds ({})",
            self.total_seconds,
            humanize(self.total_seconds),
            self.mean_seconds,
            humanize(self.mean_seconds)
        )?;
        writeln!(out, "Trips counted: {}", self.trips)
    }
}

impl Render for UserStats {
    const HEADING: &'static str = "Calculating User Stats...";

    fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "User types are:")?;
        write_counts(out, &self.user_types)?;

        match &self.genders {
            Some(genders) => {
                writeln!(out, "\nReported gender is:")?;
                write_counts(out, genders)?;
            }
            None => writeln!(out, "\nNo gender data available for this city.")?,
        }

        match &self.birth_years {
            Some(years) => {
                writeln!(out, "\nFor birth year:")?;
                writeln!(out, "Earliest: {}", years.earliest)?;
                writeln!(out, "Latest: {}", years.latest)?;
                writeln!(out, "Most common: {}", years.most_common)
            }
            None => writeln!(out, "\nNo birth year data available for this city."),
        }
    }
}

fn write_counts<W: Write>(out: &mut W, counts: &[(String, usize)]) -> io::Result<()> {
    for (value, count) in counts {
        writeln!(out, "  {value}: {count}")?;
    }
    Ok(())
}

/// `3800.0` → `0 days 01:03:20`
fn humanize(seconds: f64) -> String {
    let delta = TimeDelta::milliseconds((seconds * 1000.0).round() as i64);
    format!(
        "{} days {:02}:{:02}:{:02}",
        delta.num_days(),
        delta.num_hours() % 24,
        delta.num_minutes() % 60,
        delta.num_seconds() % 60
    )
}
