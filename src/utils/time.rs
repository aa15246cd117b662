use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};

/// This is the standard way of converting a date to a string in fitweek.
pub fn date_to_display(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns the first moment strictly after `now` whose local wall clock reads `at`. Wall clock
/// times skipped by a DST jump are moved to the following day.
pub fn next_occurrence(now: DateTime<Local>, at: NaiveTime) -> Option<DateTime<Local>> {
    let mut date = now.date_naive();
    for _ in 0..3 {
        if let Some(candidate) = Local.from_local_datetime(&date.and_time(at)).earliest() {
            if candidate > now {
                return Some(candidate);
            }
        }
        date = date.succ_opt()?;
    }
    None
}
