use std::collections::HashMap;

use crate::error::ParseError;
use crate::models::{Location, PrayerType};
use crate::schedule::to_minutes;

/// Locations sharing one scheduled time string for the active prayer type.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeBucket {
    pub time: String,
    pub locations: Vec<Location>,
}

/// Buckets `locations` by their time for `prayer`, earliest bucket first.
///
/// Locations keep their input order within a bucket. If any time string fails
/// to parse the whole grouping fails, so callers never see a partially sorted
/// result.
pub fn group_by_time(
    locations: &[Location],
    prayer: PrayerType,
) -> Result<Vec<TimeBucket>, ParseError> {
    let mut buckets: Vec<TimeBucket> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for location in locations {
        let time = location.time_for(prayer);
        match index.get(time) {
            Some(&i) => buckets[i].locations.push(location.clone()),
            None => {
                index.insert(time, buckets.len());
                buckets.push(TimeBucket {
                    time: time.to_string(),
                    locations: vec![location.clone()],
                });
            }
        }
    }

    let mut keyed = buckets
        .into_iter()
        .map(|bucket| Ok((to_minutes(&bucket.time)?, bucket)))
        .collect::<Result<Vec<_>, ParseError>>()?;
    keyed.sort_by_key(|(minutes, _)| *minutes);

    Ok(keyed.into_iter().map(|(_, bucket)| bucket).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed_locations;
    use std::collections::HashSet;

    fn loc(id: i64, eid: &str) -> Location {
        Location {
            id,
            name: format!("Mosque {id}"),
            address: format!("Street {id}"),
            eid_time: eid.to_string(),
            jummah_time: "01:30pm".to_string(),
            lat: 9.0,
            lng: 7.4,
        }
    }

    #[test]
    fn empty_input_gives_no_buckets() {
        assert_eq!(group_by_time(&[], PrayerType::Eid), Ok(vec![]));
    }

    #[test]
    fn buckets_are_chronological_not_lexical() {
        let locations = vec![loc(1, "09:00am"), loc(2, "12:15pm"), loc(3, "10:00am"), loc(4, "08:30am")];
        let times: Vec<String> = group_by_time(&locations, PrayerType::Eid)
            .unwrap()
            .into_iter()
            .map(|b| b.time)
            .collect();
        assert_eq!(times, ["08:30am", "09:00am", "10:00am", "12:15pm"]);
    }

    #[test]
    fn keeps_first_seen_order_inside_a_bucket() {
        let locations = vec![loc(5, "09:00am"), loc(2, "08:00am"), loc(9, "09:00am"), loc(1, "09:00am")];
        let buckets = group_by_time(&locations, PrayerType::Eid).unwrap();
        let ids: Vec<i64> = buckets[1].locations.iter().map(|l| l.id).collect();
        assert_eq!(ids, [5, 9, 1]);
    }

    #[test]
    fn seed_data_partitions_into_sorted_buckets() {
        let seed = seed_locations();
        let buckets = group_by_time(&seed, PrayerType::Eid).unwrap();

        for pair in buckets.windows(2) {
            assert!(to_minutes(&pair[0].time).unwrap() <= to_minutes(&pair[1].time).unwrap());
        }

        let mut seen = HashSet::new();
        for bucket in &buckets {
            for location in &bucket.locations {
                assert_eq!(location.eid_time, bucket.time);
                assert!(seen.insert(location.id), "duplicate {}", location.id);
            }
        }
        assert_eq!(seen.len(), seed.len());

        let times: Vec<&str> = buckets.iter().map(|b| b.time.as_str()).collect();
        assert_eq!(times, ["08:00am", "08:15am", "08:30am", "08:45am", "09:00am"]);
    }

    #[test]
    fn jummah_seed_collapses_to_one_bucket() {
        let buckets = group_by_time(&seed_locations(), PrayerType::Jummah).unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].time, "01:30pm");
    }

    #[test]
    fn one_bad_time_fails_the_whole_grouping() {
        let locations = vec![loc(1, "09:00am"), loc(2, "after fajr"), loc(3, "08:00am")];
        assert_eq!(
            group_by_time(&locations, PrayerType::Eid),
            Err(ParseError::InvalidTime("after fajr".to_string()))
        );
    }
}
