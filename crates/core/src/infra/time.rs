use chrono::{
  DateTime,
  Utc
};
use chrono_tz::Tz;

/// Wall-clock time of a cycle in the
/// configured zone, e.g.
/// `2024-03-01 09:30:00.250 CET`.
/// Out-of-range instants render as
/// `"invalid"`.
pub fn format_tick_time(
  epoch_ms: i64,
  zone: &Tz
) -> String {
  match DateTime::<Utc>::from_timestamp_millis(
    epoch_ms
  ) {
    | Some(at) => at
      .with_timezone(zone)
      .format("%Y-%m-%d %H:%M:%S%.3f %Z")
      .to_string(),
    | None => "invalid".to_string()
  }
}
