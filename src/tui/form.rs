use crate::error::ValidationError;
use crate::models::{Coordinates, NewLocation};

pub const FIELD_LABELS: [&str; 4] = ["Name", "Address", "Eid time", "Jummah time"];

/// Text fields of the add-location popup, plus the point picked on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct AddForm {
    pub fields: [String; 4],
    pub focus: usize,
    pub coords: Coordinates,
    pub error: Option<ValidationError>,
}

impl AddForm {
    pub fn new(coords: Coordinates) -> Self {
        let defaults = NewLocation::default();
        Self {
            fields: [
                String::new(),
                String::new(),
                defaults.eid_time,
                defaults.jummah_time,
            ],
            focus: 0,
            coords,
            error: None,
        }
    }

    pub fn push(&mut self, c: char) {
        self.fields[self.focus].push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        self.fields[self.focus].pop();
        self.error = None;
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn is_last_field(&self) -> bool {
        self.focus == self.fields.len() - 1
    }

    pub fn to_new_location(&self) -> NewLocation {
        NewLocation {
            name: self.fields[0].trim().to_string(),
            address: self.fields[1].trim().to_string(),
            eid_time: self.fields[2].trim().to_string(),
            jummah_time: self.fields[3].trim().to_string(),
            lat: self.coords.lat,
            lng: self.coords.lng,
        }
    }

    /// Shows a rejected submit and moves focus to the offending field.
    pub fn reject(&mut self, err: ValidationError) {
        if let Some(idx) = field_index(err.field) {
            self.focus = idx;
        }
        self.error = Some(err);
    }

    pub fn error_for(&self, idx: usize) -> Option<&str> {
        self.error
            .as_ref()
            .filter(|e| field_index(e.field) == Some(idx))
            .map(|e| e.message.as_str())
    }
}

fn field_index(field: &str) -> Option<usize> {
    match field {
        "name" => Some(0),
        "address" => Some(1),
        "eidTime" => Some(2),
        "jummahTime" => Some(3),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_CENTER;

    #[test]
    fn starts_with_default_times_and_picked_point() {
        let form = AddForm::new(Coordinates::new(9.1, 7.4));
        let input = form.to_new_location();
        assert_eq!(input.eid_time, "09:00am");
        assert_eq!(input.jummah_time, "01:30pm");
        assert_eq!((input.lat, input.lng), (9.1, 7.4));
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = AddForm::new(DEFAULT_CENTER);
        for c in "Jabi".chars() {
            form.push(c);
        }
        form.next_field();
        form.push('x');
        form.backspace();
        form.prev_field();
        form.prev_field();
        assert!(form.is_last_field());
        assert_eq!(form.fields[0], "Jabi");
        assert_eq!(form.fields[1], "");
    }

    #[test]
    fn rejection_focuses_the_field() {
        let mut form = AddForm::new(DEFAULT_CENTER);
        form.next_field();
        let err = form.to_new_location().validate().unwrap_err();
        form.reject(err);
        assert_eq!(form.focus, 0);
        assert_eq!(form.error_for(0), Some("Name must be at least 2 characters"));
        assert_eq!(form.error_for(1), None);

        form.push('A');
        assert!(form.error.is_none());
    }
}
