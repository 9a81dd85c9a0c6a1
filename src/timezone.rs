//! Server timezone display string.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use chrono_tz::Tz;

/// `"<name> (<abbreviation>)"` for the server's timezone, e.g.
/// `"Europe/Berlin (CEST)"`.
///
/// Falls back to chrono's `Local` offset when the system zone cannot be resolved
/// to an IANA name.
pub fn server_timezone_str() -> String {
    let zone = iana_time_zone::get_timezone()
        .map_err(|e| e.to_string())
        .and_then(|name| name.parse::<Tz>().map_err(|e| e.to_string()));

    match zone {
        Ok(tz) => named_timezone_str(tz, Utc::now()),
        Err(e) => {
            tracing::debug!(error = %e, "System timezone has no IANA name, using offset");
            timezone_str(&Local::now())
        }
    }
}

/// `"<IANA name> (<abbreviation>)"` for `tz` at the instant `now`. The
/// abbreviation follows daylight saving time.
pub fn named_timezone_str(tz: Tz, now: DateTime<Utc>) -> String {
    format!("{} ({})", tz.name(), now.with_timezone(&tz).format("%Z"))
}

/// `"<name> (<offset>)"` for the timezone of `date`. The name is what the zone
/// reports for `%Z` (an abbreviation like `UTC`, or the offset for fixed zones).
pub fn timezone_str<O>(date: &DateTime<O>) -> String
where
    O: TimeZone,
    O::Offset: Display,
{
    format!("{} ({})", date.format("%Z"), date.format("%z"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_named_zone_follows_dst() {
        let summer = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(
            named_timezone_str(chrono_tz::Europe::Berlin, summer),
            "Europe/Berlin (CEST)"
        );
        assert_eq!(
            named_timezone_str(chrono_tz::Europe::Berlin, winter),
            "Europe/Berlin (CET)"
        );
        assert_eq!(
            named_timezone_str(chrono_tz::America::New_York, winter),
            "America/New_York (EST)"
        );
    }

    #[test]
    fn test_utc() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(timezone_str(&date), "UTC (+0000)");
    }

    #[test]
    fn test_fixed_offset() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let date = tz.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        assert_eq!(timezone_str(&date), "+02:00 (+0200)");
    }

    #[test]
    fn test_server_zone_has_both_parts() {
        let s = server_timezone_str();
        assert!(s.contains(" ("));
        assert!(s.ends_with(')'));
    }
}
