/// Column-name constants for the bikeshare trip files.
/// Single source of truth for the loader, the reporters and the viewer.

// ── Source columns ──────────────────────────────────────────────────────────
pub mod trip {
    pub const START_TIME: &str = "Start Time";
    pub const END_TIME: &str = "End Time";
    pub const TRIP_DURATION: &str = "Trip Duration";
    pub const START_STATION: &str = "Start Station";
    pub const END_STATION: &str = "End Station";
    pub const USER_TYPE: &str = "User Type";

    /// Columns every city file must carry.
    pub const REQUIRED: [&str; 5] = [
        START_TIME,
        TRIP_DURATION,
        START_STATION,
        END_STATION,
        USER_TYPE,
    ];

    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

// ── Optional demographic columns (presence varies by city) ──────────────────
pub mod demographics {
    pub const GENDER: &str = "Gender";
    pub const BIRTH_YEAR: &str = "Birth Year";
}

// ── Columns derived from Start Time ─────────────────────────────────────────
pub mod derived {
    /// 1 = January .. 12 = December
    pub const MONTH: &str = "month";
    /// 0 = Sunday .. 6 = Saturday
    pub const DAY_OF_WEEK: &str = "day_of_week";
    pub const HOUR: &str = "hour";
}
