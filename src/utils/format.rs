//! Display formatting for numbers and timestamps, driven by the stored
//! user preferences. All functions are pure; `time_since` additionally
//! reads the wall clock through an injectable variant.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike, Utc};
use regex::Regex;

pub const INVALID_TIME_FORMAT: &str = "Invalid date or time format";

/// Format a number using the user selected thousands-separator style.
///
/// The separator only applies from 1000 upwards; an unrecognized style tag
/// yields the plain decimal rendering.
pub fn number(n: u64, format: &str) -> String {
    let separator = match format {
        "1,000" => Some(','),
        "1 000" => Some(' '),
        "1.000" => Some('.'),
        "1'000" => Some('\''),
        _ => None,
    };

    let mut out = n.to_string();

    if n >= 1000 {
        if let Some(sep) = separator {
            // Group digits in triples from the right.
            let re = Regex::new(r"(\d+)(\d{3})").unwrap();
            while re.is_match(&out) {
                out = re
                    .replace(&out, |caps: &regex::Captures| {
                        format!("{}{}{}", &caps[1], sep, &caps[2])
                    })
                    .into_owned();
            }
        }
    }

    out
}

/// Convert a 14 digit archive timestamp (YYYYMMDDhhmmss) into ISO 8601
/// (YYYY-MM-DDThh:mm:ssZ). Input that is not a 14 digit timestamp is
/// returned unchanged.
pub fn timestamp_to_date(timestamp: &str) -> String {
    let re = Regex::new(r"^(\d{4})(\d{2})(\d{2})(\d{2})(\d{2})(\d{2})$").unwrap();
    re.replace(timestamp, "$1-$2-$3T$4:$5:$6Z").into_owned()
}

/// Render a date for display.
///
/// Recognized format tags: `Y/m/d`, `d/m/Y`, `m/d/Y` (and their spelled-out
/// aliases). Anything else falls back to "Month DD, YYYY". With
/// `convert_time_zone` the date is rendered in the local zone instead of UTC.
/// An unparseable input is returned as-is.
pub fn readable_date(date_string: &str, format: &str, convert_time_zone: bool) -> String {
    let Some(instant) = parse_instant(date_string, false) else {
        return date_string.to_string();
    };

    let pattern = match format {
        "Y/m/d" | "year/month/day" => "%Y/%m/%d",
        "d/m/Y" | "day/month/year" => "%d/%m/%Y",
        "m/d/Y" | "month/day/year" => "%m/%d/%Y",
        // default - April 04, 2018
        _ => "%B %d, %Y",
    };

    if convert_time_zone {
        instant.with_timezone(&Local).format(pattern).to_string()
    } else {
        instant.format(pattern).to_string()
    }
}

/// Render a time of day for display.
///
/// `g:i A` / `g:i:s A` are 12-hour formats (hour 0 becomes 12 AM, hours past
/// 12 wrap into PM), `H:i` / `H:i:s` are 24-hour. All components are
/// zero-padded. Any other tag, or an unparseable date, yields the
/// [`INVALID_TIME_FORMAT`] sentinel.
pub fn readable_time(date_string: &str, convert_time_zone: bool, format: &str) -> String {
    let Some(instant) = parse_instant(date_string, false) else {
        return INVALID_TIME_FORMAT.to_string();
    };

    let (hour, min, sec) = if convert_time_zone {
        let local = instant.with_timezone(&Local);
        (local.hour(), local.minute(), local.second())
    } else {
        (instant.hour(), instant.minute(), instant.second())
    };

    match format {
        "g:i A" | "g:i:s A" => {
            let (hour, meridiem) = if hour > 12 {
                (hour - 12, "PM")
            } else if hour == 0 {
                (12, "AM")
            } else {
                (hour, "AM")
            };

            if format == "g:i A" {
                format!("{:02}:{:02} {}", hour, min, meridiem)
            } else {
                format!("{:02}:{:02}:{:02} {}", hour, min, sec, meridiem)
            }
        }
        "H:i" => format!("{:02}:{:02}", hour, min),
        "H:i:s" => format!("{:02}:{:02}:{:02}", hour, min, sec),
        _ => INVALID_TIME_FORMAT.to_string(),
    }
}

/// Format a date as elapsed time, e.g. "1 hour ago".
///
/// The elapsed seconds are bucketed into the largest applicable unit, with
/// singular wording at exactly one. A date string without a zone designator
/// is read as UTC, or as local time when `convert_time_zone` is set.
pub fn time_since(date_string: &str, convert_time_zone: bool) -> String {
    time_since_at(date_string, convert_time_zone, Utc::now())
}

fn time_since_at(date_string: &str, convert_time_zone: bool, now: DateTime<Utc>) -> String {
    let Some(instant) = parse_instant(date_string, convert_time_zone) else {
        return INVALID_TIME_FORMAT.to_string();
    };

    let seconds = (now - instant).num_seconds().max(0);

    const UNITS: [(i64, &str); 5] = [
        (31_536_000, "year"),
        (2_592_000, "month"),
        (86_400, "day"),
        (3_600, "hour"),
        (60, "minute"),
    ];

    for (divisor, unit) in UNITS {
        let interval = seconds / divisor;
        if interval == 1 {
            return format!("1 {} ago", unit);
        }
        if interval > 1 {
            return format!("{} {}s ago", interval, unit);
        }
    }

    if seconds == 1 {
        "1 second ago".to_string()
    } else {
        format!("{} seconds ago", seconds)
    }
}

/// Parse a date string into an instant. RFC 3339 input is taken as written;
/// input without a zone designator is interpreted as UTC, or as local time
/// when `assume_local` is set.
fn parse_instant(date_string: &str, assume_local: bool) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(date_string) {
        return Some(parsed.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(date_string, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(date_string, "%Y-%m-%d %H:%M:%S"))
        .ok()?;

    if assume_local {
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|parsed| parsed.with_timezone(&Utc))
    } else {
        Some(Utc.from_utc_datetime(&naive))
    }
}
