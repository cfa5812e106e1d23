// Display helpers shared by the renderer
use std::cmp::Ordering;

use chrono::NaiveDateTime;

pub fn format_time(time: NaiveDateTime) -> String {
    time.format("%d.%m %H:%M").to_string()
}

/// Renders a minute count as `2h5m`, `1h` or `59m`.
pub fn format_minutes(minutes: u64) -> String {
    let (hours, rest) = (minutes / 60, minutes % 60);
    match (hours, rest) {
        (0, rest) => format!("{rest}m"),
        (hours, 0) => format!("{hours}h"),
        (hours, rest) => format!("{hours}h{rest}m"),
    }
}

/// Shortest decimal form that keeps a fractional digit: `100.0`, `546.8`.
pub fn format_amount(amount: f64) -> String {
    format!("{amount:?}")
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Bracketed cost delta of `new` against `old`, empty when they are equal.
pub fn format_cost_diff(new: f64, old: f64) -> String {
    match new.partial_cmp(&old) {
        Some(Ordering::Greater) => format!("[+{}]", format_amount(round_cents(new - old))),
        Some(Ordering::Less) => format!("[{}]", format_amount(round_cents(new - old))),
        _ => String::new(),
    }
}

/// Formats `new` as `DD.MM HH:MM` with the calendar-day and time-of-day
/// shifts against `old` appended to the date and time parts.
///
/// The day shift ignores the time of day. The time shift projects `new`'s
/// time of day onto `old`'s date, so a flight moved to the next day and
/// one hour earlier reads `11.03 [+1d] 09:00 [-1h]`.
pub fn format_datetime_with_diff(new: NaiveDateTime, old: NaiveDateTime) -> String {
    let days = (new.date() - old.date()).num_days();
    let projected = old.date().and_time(new.time());
    let minutes = (projected - old).num_minutes();

    let day_diff = match days.cmp(&0) {
        Ordering::Greater => format!(" [+{days}d]"),
        Ordering::Equal => String::new(),
        Ordering::Less => format!(" [{days}d]"),
    };
    let time_diff = match minutes.cmp(&0) {
        Ordering::Greater => format!(" [+{}]", format_minutes(minutes.unsigned_abs())),
        Ordering::Equal => String::new(),
        Ordering::Less => format!(" [-{}]", format_minutes(minutes.unsigned_abs())),
    };

    format!(
        "{}{} {}{}",
        new.format("%d.%m"),
        day_diff,
        new.format("%H:%M"),
        time_diff
    )
}
