use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// The kind of room. The set is fixed.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoomType {
    #[default]
    Bedroom,
    Bathroom,
    Kitchen,
    LivingRoom,
    DiningRoom,
    Study,
    Balcony,
    Staircase,
}

impl RoomType {
    /// Human-readable name, used as the label of unnamed rooms.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Bedroom => "Bedroom",
            Self::Bathroom => "Bathroom",
            Self::Kitchen => "Kitchen",
            Self::LivingRoom => "Living Room",
            Self::DiningRoom => "Dining Room",
            Self::Study => "Study",
            Self::Balcony => "Balcony",
            Self::Staircase => "Staircase",
        }
    }

    /// The snake_case key used in saved plans and the API.
    pub fn key(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn there_are_eight_room_types() {
        assert_eq!(RoomType::iter().count(), 8);
    }

    #[test]
    fn keys_parse_back_to_the_same_type() {
        for room_type in RoomType::iter() {
            assert_eq!(RoomType::from_str(room_type.key()), Ok(room_type));
        }
        assert_eq!(RoomType::LivingRoom.key(), "living_room");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(RoomType::from_str("garage").is_err());
    }

    #[test]
    fn serde_uses_snake_case_keys() {
        let json = serde_json::to_value(RoomType::DiningRoom).unwrap();
        assert_eq!(json, "dining_room");
    }

    #[test]
    fn display_name_is_title_cased() {
        assert_eq!(RoomType::LivingRoom.to_string(), "Living Room");
        assert_eq!(RoomType::Study.to_string(), "Study");
    }
}
