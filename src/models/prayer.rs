use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which of the two congregational schedules a view is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerType {
    #[default]
    Eid,
    Jummah,
}

impl PrayerType {
    pub fn all() -> [PrayerType; 2] {
        [PrayerType::Eid, PrayerType::Jummah]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerType::Eid => "eid",
            PrayerType::Jummah => "jummah",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerType::Eid => "Eid",
            PrayerType::Jummah => "Jummah",
        }
    }

    /// Label used on the prayer-type tabs.
    pub fn tab_label(&self) -> &'static str {
        match self {
            PrayerType::Eid => "Eid Prayers",
            PrayerType::Jummah => "Jummah Prayers",
        }
    }

    pub fn toggled(&self) -> PrayerType {
        match self {
            PrayerType::Eid => PrayerType::Jummah,
            PrayerType::Jummah => PrayerType::Eid,
        }
    }
}

impl std::fmt::Display for PrayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PrayerType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eid" => Ok(PrayerType::Eid),
            "jummah" | "jumma" | "jumuah" | "friday" => Ok(PrayerType::Jummah),
            _ => Err(anyhow::anyhow!("Unknown prayer type: {}", s)),
        }
    }
}
