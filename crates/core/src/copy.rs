//! # Copy Arithmetic
//!
//! The pure parts of copying programs and schedules between channels:
//!
//! - [`TitleRegistry`] picks a title that does not collide with the titles
//!   already present in the target channel, appending `" (Copy N)"`.
//! - [`shift_to_date`] moves a schedule slot onto another calendar day while
//!   keeping its time of day and its duration.
//! - [`copy_note`] builds the note attached to a copied schedule.
//! - [`parse_target_date`] reads the target day of a schedule copy.
//!
//! Calendar days are taken in the guide timezone, passed in as a
//! [`chrono_tz::Tz`].

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::{EpgError, EpgResult};

/// Case-insensitive set of the titles taken in a channel.
#[derive(Debug, Clone, Default)]
pub struct TitleRegistry {
    taken: HashSet<String>,
}

impl TitleRegistry {
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            taken: titles
                .into_iter()
                .map(|title| title.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn contains(&self, title: &str) -> bool {
        self.taken.contains(&title.to_lowercase())
    }

    /// Returns `title` if it is free, otherwise the first free
    /// `"<title> (Copy N)"` for N = 1, 2, ...
    ///
    /// The returned title is recorded, so a later call with the same title
    /// gets the next number.
    pub fn claim(&mut self, title: &str) -> String {
        let mut candidate = title.to_string();
        let mut counter = 1u32;

        while self.contains(&candidate) {
            candidate = format!("{title} (Copy {counter})");
            counter += 1;
        }

        self.taken.insert(candidate.to_lowercase());
        candidate
    }
}

/// Midnight of `date` in `tz`, as a UTC instant.
///
/// Where midnight falls inside a DST gap the first valid hour of the day is
/// used instead.
pub fn day_start(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);

    (0..3)
        .filter_map(|hours| midnight.checked_add_signed(Duration::hours(hours)))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

/// Moves the slot `start..end` onto `target`, keeping its offset from the
/// start of its own day and its duration.
///
/// Offsets are measured as elapsed time since local midnight, so a slot that
/// crosses a DST change keeps its absolute length rather than its wall-clock
/// end.
///
/// # Errors
///
/// * `EpgError::InvalidRequest` - the shifted slot falls outside the range of
///   representable timestamps
pub fn shift_to_date(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    target: NaiveDate,
    tz: &Tz,
) -> EpgResult<(DateTime<Utc>, DateTime<Utc>)> {
    let source_day = start.with_timezone(tz).date_naive();
    let time_offset = start - day_start(source_day, tz);
    let duration = end - start;

    let new_start = day_start(target, tz).checked_add_signed(time_offset);
    let new_end = new_start.and_then(|new_start| new_start.checked_add_signed(duration));

    match (new_start, new_end) {
        (Some(new_start), Some(new_end)) => Ok((new_start, new_end)),
        _ => Err(EpgError::InvalidRequest(format!(
            "Invalid target date: {target}"
        ))),
    }
}

/// Note attached to a schedule copied out of `channel_name`.
pub fn copy_note(channel_name: &str, notes: Option<&str>) -> String {
    match notes.filter(|n| !n.is_empty()) {
        Some(notes) => format!("Copied from {channel_name}: {notes}"),
        None => format!("Copied from {channel_name}"),
    }
}

/// Reads the target day of a schedule copy.
///
/// Accepts a plain `YYYY-MM-DD` date, an RFC 3339 timestamp (converted to
/// `tz` before the day is taken) or a timestamp without offset, which is
/// read as local time in `tz`.
pub fn parse_target_date(raw: &str, tz: &Tz) -> EpgResult<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(tz).date_naive());
    }
    if let Ok(local) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(local.date());
    }

    Err(EpgError::InvalidRequest(format!("Invalid target date: {raw}")))
}
