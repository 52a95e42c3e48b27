use crate::error::ParseError;

const NOON_MINUTES: u16 = 12 * 60;

/// Minutes since midnight for a 12-hour clock string such as `09:00am`.
///
/// Hour is one or two digits, minute exactly two, and the `am`/`pm` suffix is
/// case-insensitive. A single space before the suffix is tolerated. Used as a
/// sort key only; the stored string stays the display and grouping key.
pub fn to_minutes(time: &str) -> Result<u16, ParseError> {
    let invalid = || ParseError::InvalidTime(time.to_string());

    let trimmed = time.trim();
    if trimmed.len() < 3 || !trimmed.is_char_boundary(trimmed.len() - 2) {
        return Err(invalid());
    }
    let (clock, suffix) = trimmed.split_at(trimmed.len() - 2);
    let pm = match suffix.to_ascii_lowercase().as_str() {
        "am" => false,
        "pm" => true,
        _ => return Err(invalid()),
    };

    let clock = clock.strip_suffix(' ').unwrap_or(clock);
    let (hour, minute) = clock.split_once(':').ok_or_else(invalid)?;
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 || !digits(hour) || !digits(minute) {
        return Err(invalid());
    }

    let hour: u16 = hour.parse().map_err(|_| invalid())?;
    let minute: u16 = minute.parse().map_err(|_| invalid())?;
    if hour > 12 || minute > 59 {
        return Err(invalid());
    }

    Ok((hour % 12) * 60 + minute + if pm { NOON_MINUTES } else { 0 })
}

/// Canonical `hh:mmam` spelling of a valid time, so equal times share one
/// chip and bucket.
pub fn normalize_time(time: &str) -> Result<String, ParseError> {
    let minutes = to_minutes(time)?;
    let hour = minutes / 60;
    let suffix = if hour >= 12 { "pm" } else { "am" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    Ok(format!("{:02}:{:02}{}", hour, minutes % 60, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_reference_times() {
        assert_eq!(to_minutes("09:00am"), Ok(540));
        assert_eq!(to_minutes("01:30pm"), Ok(810));
        assert_eq!(to_minutes("12:00am"), Ok(0));
        assert_eq!(to_minutes("12:00pm"), Ok(720));
        assert_eq!(to_minutes("11:59pm"), Ok(1439));
    }

    #[test]
    fn suffix_is_case_insensitive_and_hour_may_be_one_digit() {
        assert_eq!(to_minutes("8:15AM"), Ok(495));
        assert_eq!(to_minutes("08:15 Am"), Ok(495));
    }

    #[test]
    fn rejects_malformed_strings_with_the_input() {
        for bad in ["", "09:00", "0900am", "9:0am", "ab:cdpm", "13:00pm", "09:60am", "123:00am", "09:00xm"] {
            assert_eq!(
                to_minutes(bad),
                Err(ParseError::InvalidTime(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_ascii_without_panicking() {
        assert!(to_minutes("09:00ám").is_err());
        assert!(to_minutes("٠٩:٠٠am").is_err());
    }

    #[test]
    fn normalizing_removes_spacing_and_case_differences() {
        assert_eq!(normalize_time(" 09:00 am ").as_deref(), Ok("09:00am"));
        assert_eq!(normalize_time("9:00AM").as_deref(), Ok("09:00am"));
        assert_eq!(normalize_time("01:30 PM").as_deref(), Ok("01:30pm"));
        assert_eq!(normalize_time("12:05am").as_deref(), Ok("12:05am"));
        assert_eq!(normalize_time("12:00pm").as_deref(), Ok("12:00pm"));
        assert_eq!(
            normalize_time("noon"),
            Err(ParseError::InvalidTime("noon".to_string()))
        );
    }
}
