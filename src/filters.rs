//! Filter selection: the city to load plus optional month and weekday
//! equality filters.
//!
//! Every value here is already validated. "all" is represented as `None`.

use std::fmt;

use chrono::{Month, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase display name, also the accepted input spelling.
    pub fn name(self) -> &'static str {
        match self {
            Self::Chicago => "chicago",
            Self::NewYorkCity => "new york city",
            Self::Washington => "washington",
        }
    }

    /// Case-insensitive match against the city names.
    pub fn parse(input: &str) -> Option<Self> {
        let needle = input.trim().to_lowercase();
        Self::ALL.into_iter().find(|city| city.name() == needle)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Calendar vocabulary ─────────────────────────────────────────────────────

const MONTHS: [(&str, Month); 12] = [
    ("january", Month::January),
    ("february", Month::February),
    ("march", Month::March),
    ("april", Month::April),
    ("may", Month::May),
    ("june", Month::June),
    ("july", Month::July),
    ("august", Month::August),
    ("september", Month::September),
    ("october", Month::October),
    ("november", Month::November),
    ("december", Month::December),
];

// Sunday first: the position in this table is the derived day_of_week number.
const DAYS: [(&str, Weekday); 7] = [
    ("sunday", Weekday::Sun),
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
];

pub fn parse_month(input: &str) -> Option<Month> {
    let needle = input.trim().to_lowercase();
    MONTHS
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, month)| *month)
}

pub fn parse_day(input: &str) -> Option<Weekday> {
    let needle = input.trim().to_lowercase();
    DAYS.iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, day)| *day)
}

pub fn month_name(month: Month) -> &'static str {
    MONTHS
        .iter()
        .find(|(_, m)| *m == month)
        .map_or("unknown", |(name, _)| name)
}

pub fn day_name(day: Weekday) -> &'static str {
    DAYS.iter()
        .find(|(_, d)| *d == day)
        .map_or("unknown", |(name, _)| name)
}

/// Month number as stored in the derived `month` column.
pub fn month_number(month: Month) -> i32 {
    month.number_from_month() as i32
}

/// Day number as stored in the derived `day_of_week` column.
pub fn day_number(day: Weekday) -> i32 {
    day.num_days_from_sunday() as i32
}

pub fn month_from_number(number: i32) -> Option<Month> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    MONTHS.get(index).map(|(_, month)| *month)
}

pub fn day_from_number(number: i32) -> Option<Weekday> {
    let index = usize::try_from(number).ok()?;
    DAYS.get(index).map(|(_, day)| *day)
}

// ── Selection ───────────────────────────────────────────────────────────────

/// What the user asked to explore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub city: City,
    pub month: Option<Month>,
    pub day: Option<Weekday>,
}

impl Selection {
    pub fn new(city: City, month: Option<Month>, day: Option<Weekday>) -> Self {
        Self { city, month, day }
    }

    pub fn month_label(&self) -> &'static str {
        self.month.map_or("all", month_name)
    }

    pub fn day_label(&self) -> &'static str {
        self.day.map_or("all", day_name)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "City: {}, Month: {}, Day: {}",
            self.city,
            self.month_label(),
            self.day_label()
        )
    }
}
