use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::position::{Coordinates, DEFAULT_CENTER};
use crate::models::PrayerType;

/// A prayer ground or mosque.
///
/// Field names serialize in camelCase (`eidTime`, `jummahTime`) so the stored
/// list keeps the layout existing `mosqueData` blobs already use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub eid_time: String,
    pub jummah_time: String,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn time_for(&self, prayer: PrayerType) -> &str {
        match prayer {
            PrayerType::Eid => &self.eid_time,
            PrayerType::Jummah => &self.jummah_time,
        }
    }

    pub fn set_time_for(&mut self, prayer: PrayerType, time: String) {
        match prayer {
            PrayerType::Eid => self.eid_time = time,
            PrayerType::Jummah => self.jummah_time = time,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// Input collected by the add-mosque form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub name: String,
    pub address: String,
    pub eid_time: String,
    pub jummah_time: String,
    pub lat: f64,
    pub lng: f64,
}

impl Default for NewLocation {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            eid_time: "09:00am".to_string(),
            jummah_time: "01:30pm".to_string(),
            lat: DEFAULT_CENTER.lat,
            lng: DEFAULT_CENTER.lng,
        }
    }
}

impl NewLocation {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.chars().count() < 2 {
            return Err(ValidationError::new(
                "name",
                "Name must be at least 2 characters",
            ));
        }
        if self.address.chars().count() < 5 {
            return Err(ValidationError::new(
                "address",
                "Address must be at least 5 characters",
            ));
        }
        if self.eid_time.chars().count() < 5 {
            return Err(ValidationError::new(
                "eidTime",
                "Please enter a valid time (e.g., 09:00am)",
            ));
        }
        if self.jummah_time.chars().count() < 5 {
            return Err(ValidationError::new(
                "jummahTime",
                "Please enter a valid time (e.g., 01:30pm)",
            ));
        }
        // Range checks also reject NaN
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(ValidationError::new(
                "lat",
                "Latitude must be between -90 and 90",
            ));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(ValidationError::new(
                "lng",
                "Longitude must be between -180 and 180",
            ));
        }
        Ok(())
    }

    pub fn into_location(self, id: i64) -> Location {
        Location {
            id,
            name: self.name,
            address: self.address,
            eid_time: self.eid_time,
            jummah_time: self.jummah_time,
            lat: self.lat,
            lng: self.lng,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> NewLocation {
        NewLocation {
            name: "Garki Central".to_string(),
            address: "Area 11, Garki".to_string(),
            ..NewLocation::default()
        }
    }

    #[test]
    fn accepts_form_defaults_with_name_and_address() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn rejects_short_fields_with_field_name() {
        let err = NewLocation {
            name: "X".to_string(),
            ..valid()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field, "name");

        let err = NewLocation {
            jummah_time: "1pm".to_string(),
            ..valid()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field, "jummahTime");
    }

    #[test]
    fn rejects_out_of_range_and_nan_coordinates() {
        let err = NewLocation { lat: 91.0, ..valid() }.validate().unwrap_err();
        assert_eq!(err.field, "lat");
        let err = NewLocation {
            lng: f64::NAN,
            ..valid()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field, "lng");
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let loc = valid().into_location(7);
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(json["eidTime"], "09:00am");
        assert_eq!(json["jummahTime"], "01:30pm");
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn time_for_follows_prayer_type() {
        let mut loc = valid().into_location(1);
        assert_eq!(loc.time_for(PrayerType::Eid), "09:00am");
        loc.set_time_for(PrayerType::Jummah, "02:00pm".to_string());
        assert_eq!(loc.time_for(PrayerType::Jummah), "02:00pm");
        assert_eq!(loc.time_for(PrayerType::Eid), "09:00am");
    }
}
