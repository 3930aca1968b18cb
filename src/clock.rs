use chrono::Local;

/// One day in seconds, used for midnight-crossing corrections.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Parse "HH:MM" or "HH:MM:SS" into seconds since midnight.
///
/// Each component is clamped into its valid range (hours 0-23,
/// minutes/seconds 0-59) instead of being rejected, and an unparseable
/// component reads as zero, so this never fails. An empty string yields 0.
pub fn parse_time_to_seconds(time: &str) -> u32 {
    if time.is_empty() {
        return 0;
    }
    let mut parts = time.splitn(3, ':');
    let h = clamp_component(parts.next(), 23);
    let m = clamp_component(parts.next(), 59);
    let s = clamp_component(parts.next(), 59);
    h * 3600 + m * 60 + s
}

fn clamp_component(part: Option<&str>, max: i64) -> u32 {
    part.and_then(|p| p.trim().parse::<i64>().ok())
        .map(|n| n.clamp(0, max) as u32)
        .unwrap_or(0)
}

/// Split a second count into (hours, minutes, seconds).
pub fn seconds_to_hms(total_seconds: u32) -> (u32, u32, u32) {
    let h = total_seconds / 3600;
    let rem = total_seconds % 3600;
    (h, rem / 60, rem % 60)
}

/// Format seconds as a human duration like "1h 5m 3s".
///
/// Zero-valued units are omitted; seconds are always shown when nothing
/// else is.
pub fn format_duration_human(total_seconds: i64) -> String {
    let (h, m, s) = seconds_to_hms(total_seconds.max(0) as u32);
    let mut parts = Vec::new();
    if h > 0 {
        parts.push(format!("{}h", h));
    }
    if m > 0 {
        parts.push(format!("{}m", m));
    }
    if s > 0 || parts.is_empty() {
        parts.push(format!("{}s", s));
    }
    parts.join(" ")
}

/// Duration from a start time to an end time, in seconds.
///
/// A negative raw difference means the end fell on the next day; one day
/// is added so the result is never negative.
pub fn compute_duration_seconds(start_time: &str, end_time: &str) -> u32 {
    let start = i64::from(parse_time_to_seconds(start_time));
    let end = i64::from(parse_time_to_seconds(end_time));
    let mut diff = end - start;
    if diff < 0 {
        diff += SECONDS_PER_DAY;
    }
    diff as u32
}

/// Signed delta between an actual end and the approximate end, in seconds.
///
/// Positive means finished late, negative early. The overnight correction
/// is applied only below -12h, so a small early finish stays negative
/// instead of reading as an almost-full-day overrun.
pub fn compute_delta_from_approx(approx_end: &str, actual_end: &str) -> i64 {
    let approx = i64::from(parse_time_to_seconds(approx_end));
    let actual = i64::from(parse_time_to_seconds(actual_end));
    let mut delta = actual - approx;
    if delta < -SECONDS_PER_DAY / 2 {
        delta += SECONDS_PER_DAY;
    }
    delta
}

/// Current local wall-clock time as "HH:MM:SS".
pub fn now_hms() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Render a wall-clock string as 12-hour with AM/PM, e.g. "1:05 PM".
pub fn format_time_12h(time: &str) -> String {
    if time.is_empty() {
        return String::new();
    }
    let (h24, m, _) = seconds_to_hms(parse_time_to_seconds(time));
    let period = if h24 >= 12 { "PM" } else { "AM" };
    let h12 = match h24 % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", h12, m, period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_time_to_seconds() {
        assert_eq!(parse_time_to_seconds("00:00"), 0);
        assert_eq!(parse_time_to_seconds("09:30"), 9 * 3600 + 30 * 60);
        assert_eq!(parse_time_to_seconds("23:59:59"), 86_399);
        assert_eq!(parse_time_to_seconds("10:05:30"), 10 * 3600 + 5 * 60 + 30);
    }

    #[test]
    fn test_parse_clamps_out_of_range_components() {
        // "25:99" reads as 23:59
        assert_eq!(parse_time_to_seconds("25:99"), 23 * 3600 + 59 * 60);
        assert_eq!(parse_time_to_seconds("-1:30"), 30 * 60);
        assert_eq!(parse_time_to_seconds("12:61:61"), 12 * 3600 + 59 * 60 + 59);
    }

    #[test]
    fn test_parse_tolerates_malformed_input() {
        assert_eq!(parse_time_to_seconds(""), 0);
        assert_eq!(parse_time_to_seconds("garbage"), 0);
        assert_eq!(parse_time_to_seconds("12:xx"), 12 * 3600);
        assert_eq!(parse_time_to_seconds(":30"), 30 * 60);
    }

    #[test]
    fn test_seconds_to_hms() {
        assert_eq!(seconds_to_hms(0), (0, 0, 0));
        assert_eq!(seconds_to_hms(3903), (1, 5, 3));
        assert_eq!(seconds_to_hms(86_399), (23, 59, 59));
    }

    #[test]
    fn test_format_duration_human() {
        assert_eq!(format_duration_human(3903), "1h 5m 3s");
        assert_eq!(format_duration_human(7200), "2h");
        assert_eq!(format_duration_human(7205), "2h 5s");
        assert_eq!(format_duration_human(45), "45s");
        assert_eq!(format_duration_human(0), "0s");
        assert_eq!(format_duration_human(-10), "0s");
    }

    #[test]
    fn test_compute_duration_seconds() {
        assert_eq!(compute_duration_seconds("09:00", "10:30"), 5400);
        assert_eq!(compute_duration_seconds("09:00", "09:00"), 0);
        // crosses midnight
        assert_eq!(compute_duration_seconds("23:30", "00:15"), 2700);
    }

    #[test]
    fn test_duration_is_difference_mod_one_day() {
        let pairs = [("00:00", "12:00"), ("18:45", "06:15"), ("23:59:59", "00:00:01")];
        for (start, end) in pairs {
            let raw = i64::from(parse_time_to_seconds(end)) - i64::from(parse_time_to_seconds(start));
            let expected = raw.rem_euclid(SECONDS_PER_DAY) as u32;
            assert_eq!(compute_duration_seconds(start, end), expected);
        }
    }

    #[test]
    fn test_compute_delta_from_approx() {
        // 15 minutes late, across midnight
        assert_eq!(compute_delta_from_approx("23:50", "00:05"), 900);
        // 5 minutes early stays negative
        assert_eq!(compute_delta_from_approx("10:00", "09:55"), -300);
        assert_eq!(compute_delta_from_approx("10:00", "10:00"), 0);
        assert_eq!(compute_delta_from_approx("10:00", "10:20"), 1200);
        // exactly 12 hours early is still early, not a wrap
        assert_eq!(compute_delta_from_approx("22:00", "10:00"), -43_200);
    }

    #[test]
    fn test_format_time_12h() {
        assert_eq!(format_time_12h("00:30"), "12:30 AM");
        assert_eq!(format_time_12h("09:05"), "9:05 AM");
        assert_eq!(format_time_12h("12:00"), "12:00 PM");
        assert_eq!(format_time_12h("13:05:20"), "1:05 PM");
        assert_eq!(format_time_12h(""), "");
    }
}
