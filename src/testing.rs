//! Shared fixtures for unit tests.

use std::path::Path;

use polars::prelude::*;

use crate::loader::TripTable;
use crate::schema::{demographics, trip};

/// Seven Chicago-style trips, all columns as strings like a freshly read CSV.
pub(crate) fn sample_frame() -> DataFrame {
    df!(
        trip::START_TIME => &[
            "2017-03-05 08:10:00",
            "2017-03-06 08:20:00",
            "2017-03-10 17:05:00",
            "2017-06-05 08:30:00",
            "2017-06-09 17:45:00",
            "2017-06-11 12:00:00",
            "2017-01-02 08:00:00",
        ],
        trip::END_TIME => &[
            "2017-03-05 08:15:00",
            "2017-03-06 08:30:00",
            "2017-03-10 17:20:00",
            "2017-06-05 08:50:00",
            "2017-06-09 17:52:30",
            "2017-06-11 12:02:30",
            "2017-01-02 08:03:20",
        ],
        trip::TRIP_DURATION => &["300", "600", "900", "1200", "450", "150", "200"],
        trip::START_STATION => &[
            "Streeter Dr & Grand Ave",
            "Streeter Dr & Grand Ave",
            "Lake Shore Dr & Monroe St",
            "Clinton St & Washington Blvd",
            "Streeter Dr & Grand Ave",
            "Lake Shore Dr & Monroe St",
            "Streeter Dr & Grand Ave",
        ],
        trip::END_STATION => &[
            "Lake Shore Dr & Monroe St",
            "Lake Shore Dr & Monroe St",
            "Clinton St & Washington Blvd",
            "Streeter Dr & Grand Ave",
            "Clinton St & Washington Blvd",
            "Clinton St & Washington Blvd",
            "Lake Shore Dr & Monroe St",
        ],
        trip::USER_TYPE => &[
            "Subscriber",
            "Subscriber",
            "Customer",
            "Subscriber",
            "Customer",
            "Subscriber",
            "Subscriber",
        ],
        demographics::GENDER => &[
            Some("Male"),
            Some("Female"),
            None,
            Some("Male"),
            Some("Female"),
            Some("Male"),
            Some("Male"),
        ],
        demographics::BIRTH_YEAR => &[
            Some("1990.0"),
            Some("1985.0"),
            None,
            Some("1990.0"),
            Some("2000.0"),
            None,
            Some("1975.0"),
        ]
    )
    .unwrap()
}

pub(crate) fn sample_table() -> TripTable {
    TripTable::from_frame(sample_frame()).unwrap()
}

/// The same trips as `sample_frame`, as CSV text.
pub(crate) const SAMPLE_CSV: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
2017-03-05 08:10:00,2017-03-05 08:15:00,300,Streeter Dr & Grand Ave,Lake Shore Dr & Monroe St,Subscriber,Male,1990.0
2017-03-06 08:20:00,2017-03-06 08:30:00,600,Streeter Dr & Grand Ave,Lake Shore Dr & Monroe St,Subscriber,Female,1985.0
2017-03-10 17:05:00,2017-03-10 17:20:00,900,Lake Shore Dr & Monroe St,Clinton St & Washington Blvd,Customer,,
2017-06-05 08:30:00,2017-06-05 08:50:00,1200,Clinton St & Washington Blvd,Streeter Dr & Grand Ave,Subscriber,Male,1990.0
2017-06-09 17:45:00,2017-06-09 17:52:30,450,Streeter Dr & Grand Ave,Clinton St & Washington Blvd,Customer,Female,2000.0
2017-06-11 12:00:00,2017-06-11 12:02:30,150,Lake Shore Dr & Monroe St,Clinton St & Washington Blvd,Subscriber,Male,
2017-01-02 08:00:00,2017-01-02 08:03:20,200,Streeter Dr & Grand Ave,Lake Shore Dr & Monroe St,Subscriber,Male,1975.0
";

/// Washington files carry no gender or birth year.
pub(crate) const WASHINGTON_CSV: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber
2017-03-30 17:15:00,2017-03-30 17:33:51,1131.0,Columbus Circle / Union Station,Union Market / 6th St & Neal Pl NE,Customer
";

pub(crate) fn write_city_csv(dir: &Path, file: &str, contents: &str) {
    std::fs::write(dir.join(file), contents).unwrap();
}
