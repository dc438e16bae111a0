use chrono::{DateTime, Datelike, Timelike, Utc};

/// Convert UTC datetime to Julian Day (Gregorian calendar).
pub fn julian_day(dt: DateTime<Utc>) -> f64 {
    let mut year = dt.year() as f64;
    let mut month = dt.month() as f64;
    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }

    let hour_decimal = dt.hour() as f64
        + dt.minute() as f64 / 60.0
        + (dt.second() as f64 + dt.nanosecond() as f64 / 1e9) / 3600.0;
    let day = dt.day() as f64 + hour_decimal / 24.0;

    let century = (year / 100.0).floor();
    let gregorian = 2.0 - century + (century / 4.0).floor();

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + gregorian
        - 1524.5
}
