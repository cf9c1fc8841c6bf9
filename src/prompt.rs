//! Interactive input collection.
//!
//! Invalid answers are retried indefinitely; the only error surfaced to the
//! caller is a closed input stream or a failed write.

use std::io::{BufRead, Write};

use chrono::{Month, Weekday};
use tracing::{debug, warn};

use crate::error::{ExploreError, Result};
use crate::filters::{parse_day, parse_month, City, Selection};

pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
pub const MISMATCH: &str = "Does not match options.";
pub const SEPARATOR: &str = "----------------------------------------";

const CITY_QUESTION: &str =
    "Choose a city by name from this list: Chicago, New York City, Washington: ";
const MONTH_QUESTION: &str = "Choose a month (e.g. January) or hit enter for all months: ";
const DAY_QUESTION: &str = "Choose a day (e.g. Monday) or hit enter for all days: ";

/// Where answers come from: piped stdin and test scripts (any `BufRead`),
/// or the line editor in [`crate::terminal`] when stdin is a terminal.
pub trait LineSource {
    /// Show `question` and read one line. `None` at end of input.
    fn next_line<W: Write>(&mut self, question: &str, output: &mut W) -> Result<Option<String>>;
}

impl<B: BufRead> LineSource for B {
    fn next_line<W: Write>(&mut self, question: &str, output: &mut W) -> Result<Option<String>> {
        write!(output, "{question}")?;
        output.flush()?;

        let mut line = String::new();
        if self.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Line-oriented prompter over a line source and a writer, so sessions can
/// be driven from a terminal, piped stdin or a scripted buffer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: LineSource, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask until a city name matches. There is no "all" shortcut.
    pub fn ask_city(&mut self) -> Result<City> {
        self.ask_until(CITY_QUESTION, City::parse)
    }

    /// Ask until a month name matches; an empty answer means no month filter.
    pub fn ask_month(&mut self) -> Result<Option<Month>> {
        self.ask_until(MONTH_QUESTION, |answer| optional(answer, parse_month))
    }

    /// Ask until a day name matches; an empty answer means no day filter.
    pub fn ask_day(&mut self) -> Result<Option<Weekday>> {
        self.ask_until(DAY_QUESTION, |answer| optional(answer, parse_day))
    }

    pub fn get_filters(&mut self) -> Result<Selection> {
        writeln!(self.output, "{GREETING}")?;
        let city = self.ask_city()?;
        let month = self.ask_month()?;
        let day = self.ask_day()?;
        let selection = Selection::new(city, month, day);

        writeln!(self.output, "Filters are - {selection}")?;
        writeln!(self.output, "{SEPARATOR}")?;
        debug!(%selection, "filters collected");
        Ok(selection)
    }

    /// Yes/no question. Only "yes" is affirmative; a closed input declines.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        match self.read_answer(question) {
            Ok(answer) => Ok(answer == "yes"),
            Err(ExploreError::InputClosed(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn ask_until<T>(&mut self, question: &str, parse: impl Fn(&str) -> Option<T>) -> Result<T> {
        loop {
            let answer = self.read_answer(question)?;
            if let Some(value) = parse(&answer) {
                return Ok(value);
            }
            warn!(answer = %answer, "rejected input");
            writeln!(self.output, "{MISMATCH}")?;
        }
    }

    /// Ask the question, read one line, return it trimmed and lowercased.
    fn read_answer(&mut self, question: &str) -> Result<String> {
        match self.input.next_line(question, &mut self.output)? {
            Some(line) => Ok(line.trim().to_lowercase()),
            None => Err(ExploreError::InputClosed(question.trim().to_string())),
        }
    }
}

/// Empty answer → `Some(None)` ("all"); a known name → `Some(Some(v))`.
fn optional<T>(answer: &str, parse: impl Fn(&str) -> Option<T>) -> Option<Option<T>> {
    if answer.is_empty() {
        Some(None)
    } else {
        parse(answer).map(Some)
    }
}
