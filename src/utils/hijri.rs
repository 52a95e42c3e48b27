use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;

/// Islamic month names in English (index 0 = Muharram = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

fn hijri_month_name(month: usize) -> &'static str {
    if (1..=12).contains(&month) {
        HIJRI_MONTH_NAMES[month - 1]
    } else {
        "Unknown"
    }
}

fn to_hijri(date: NaiveDate) -> Option<HijriDate> {
    HijriDate::from_gr(date.year() as usize, date.month() as usize, date.day() as usize).ok()
}

/// The two Eids, as (hijri month, day, name).
const EIDS: [(usize, usize, &str); 2] = [(10, 1, "Eid al-Fitr"), (12, 10, "Eid al-Adha")];

/// Returns the Hijri date string for `date`, shifted by `offset_days`
/// for local moon sighting differences.
pub fn hijri_string(date: NaiveDate, offset_days: i32) -> String {
    let adjusted = date + Duration::days(offset_days as i64);
    match to_hijri(adjusted) {
        Some(hd) => format!("{} {} {}", hd.day(), hijri_month_name(hd.month()), hd.year()),
        None => {
            let hd = HijriDate::today();
            format!("{} {} {}", hd.day(), hijri_month_name(hd.month()), hd.year())
        }
    }
}

pub fn today_hijri_string(offset_days: i32) -> String {
    hijri_string(chrono::Local::now().date_naive(), offset_days)
}

/// Next Eid on or after `from`, with its name. A Hijri year is shorter than a
/// Gregorian one, so a year's search always finds one.
pub fn next_eid(from: NaiveDate, offset_days: i32) -> Option<(NaiveDate, &'static str)> {
    (0..=370).find_map(|ahead| {
        let day = from + Duration::days(ahead);
        let hd = to_hijri(day + Duration::days(offset_days as i64))?;
        EIDS.iter()
            .find(|(month, dom, _)| hd.month() == *month && hd.day() == *dom)
            .map(|(_, _, name)| (day, *name))
    })
}

/// "Eid al-Adha in 12 days", "Eid al-Fitr is today", or nothing.
pub fn eid_countdown(today: NaiveDate, offset_days: i32) -> Option<String> {
    let (date, name) = next_eid(today, offset_days)?;
    let days = (date - today).num_days();
    Some(match days {
        0 => format!("{} is today", name),
        1 => format!("{} is tomorrow", name),
        n => format!("{} in {} days", name, n),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_cover_the_year() {
        assert_eq!(hijri_month_name(1), "Muharram");
        assert_eq!(hijri_month_name(10), "Shawwal");
        assert_eq!(hijri_month_name(13), "Unknown");
    }

    #[test]
    fn next_eid_lands_on_an_eid_day() {
        let from = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let (date, name) = next_eid(from, 0).unwrap();
        assert!(date >= from);
        assert!((date - from).num_days() < 360);
        let hd = to_hijri(date).unwrap();
        let expected = EIDS.iter().find(|(_, _, n)| *n == name).unwrap();
        assert_eq!((hd.month(), hd.day()), (expected.0, expected.1));
    }

    #[test]
    fn countdown_is_zero_on_the_day() {
        let from = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let (date, name) = next_eid(from, 0).unwrap();
        assert_eq!(eid_countdown(date, 0), Some(format!("{} is today", name)));
    }
}
