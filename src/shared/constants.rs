/// User id recorded for complaints submitted without logging in
pub const ANONYMOUS_USER_ID: i32 = 0;

/// Display name shown when nobody is logged in
pub const ANONYMOUS_USER_NAME: &str = "Anonymous";

/// Maximum rows returned by the recent-reports query
pub const RECENT_REPORTS_LIMIT: i64 = 10;

/// Window of the recent-reports query
pub const RECENT_REPORTS_WINDOW_HOURS: i64 = 24;

/// Wall-clock format used in page headers, e.g. "04:05 PM"
pub const CLOCK_FORMAT: &str = "%I:%M %p";
