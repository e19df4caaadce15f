use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Empty JSON object (`{}`) returned by mutations that have nothing to report.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Empty {}

/// Serde codec for the `YYYY-MM-DDTHH:MM:SS.mmmZ` timestamps used on the wire.
///
/// Output always carries milliseconds. Input accepts any fractional precision
/// (or none) but requires the trailing `Z`.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
    const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

    pub fn format(value: &DateTime<Utc>) -> String {
        value.format(OUTPUT_FORMAT).to_string()
    }

    pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        NaiveDateTime::parse_from_str(value, INPUT_FORMAT).map(|naive| naive.and_utc())
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|err| D::Error::custom(format!("invalid timestamp '{raw}': {err}")))
    }
}

pub mod event {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EventNew {
        pub name: String,
        #[serde(default)]
        pub description: String,
        pub venue: String,
        #[serde(with = "crate::timestamp")]
        pub time: DateTime<Utc>,
        pub duration: i32,
        /// Reference of the event in the external calendar.
        #[serde(rename = "fireId")]
        pub fire_id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EventUpdate {
        pub name: String,
        #[serde(default)]
        pub description: String,
        pub venue: String,
        #[serde(with = "crate::timestamp")]
        pub time: DateTime<Utc>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct EventView {
        pub id: i32,
        pub name: String,
        pub description: String,
        pub venue: String,
        #[serde(with = "crate::timestamp")]
        pub time: DateTime<Utc>,
        #[serde(rename = "fireId")]
        pub fire_id: String,
        pub duration: i32,
    }

    /// An event seen from an invited user.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvitedEventView {
        #[serde(flatten)]
        pub event: EventView,
        pub status: i32,
        /// `"<creator name> : <creator email>"`.
        #[serde(rename = "invitedBy")]
        pub invited_by: String,
    }
}

pub mod invitation {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InviteNew {
        pub email: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvitationStatusUpdate {
        pub status: i32,
    }

    /// A guest of an event. Also returned when a user is invited.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GuestView {
        pub id: i32,
        pub status: i32,
        pub name: String,
        pub email: String,
    }
}

pub mod expenditure {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenditureNew {
        pub name: String,
        pub organization: String,
        #[serde(default)]
        pub quantity: i32,
        #[serde(default, rename = "unitPrice")]
        pub unit_price: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenditureView {
        pub id: i32,
        pub name: String,
        pub organization: String,
        pub quantity: i32,
        #[serde(rename = "unitPrice")]
        pub unit_price: i32,
    }
}

pub mod usage {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Usage {
        pub created: u64,
        pub invited: u64,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn timestamp_is_written_with_milliseconds() {
        let time = Utc.with_ymd_and_hms(2021, 9, 21, 8, 18, 5).unwrap();
        assert_eq!(timestamp::format(&time), "2021-09-21T08:18:05.000Z");
    }

    #[test]
    fn timestamp_accepts_any_fraction() {
        let parsed = timestamp::parse("2021-09-21T08:18:05.123456Z").unwrap();
        assert_eq!(timestamp::format(&parsed), "2021-09-21T08:18:05.123Z");

        let parsed = timestamp::parse("2021-09-21T08:18:05Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2021, 9, 21, 8, 18, 5).unwrap());
    }

    #[test]
    fn timestamp_requires_utc_suffix() {
        assert!(timestamp::parse("2021-09-21T08:18:05.000+02:00").is_err());
        assert!(timestamp::parse("21/09/2021").is_err());
    }

    #[test]
    fn event_new_uses_wire_names() {
        let body = r#"{
            "name": "Launch",
            "venue": "Hall A",
            "time": "2030-01-01T10:00:00.000Z",
            "duration": 90,
            "fireId": "cal-42"
        }"#;
        let event: event::EventNew = serde_json::from_str(body).unwrap();
        assert_eq!(event.fire_id, "cal-42");
        assert_eq!(event.description, "");
    }

    #[test]
    fn invited_event_is_flattened() {
        let view = event::InvitedEventView {
            event: event::EventView {
                id: 7,
                name: "Launch".to_string(),
                description: String::new(),
                venue: "Hall A".to_string(),
                time: Utc.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap(),
                fire_id: "cal-42".to_string(),
                duration: 90,
            },
            status: 0,
            invited_by: "Ann : ann@example.com".to_string(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["time"], "2030-01-01T10:00:00.000Z");
        assert_eq!(json["invitedBy"], "Ann : ann@example.com");
    }

    #[test]
    fn expenditure_defaults_quantity_and_price() {
        let body = r#"{"name": "Chairs", "organization": "Rentals"}"#;
        let new: expenditure::ExpenditureNew = serde_json::from_str(body).unwrap();
        assert_eq!(new.quantity, 0);
        assert_eq!(new.unit_price, 0);
    }

    #[test]
    fn empty_is_an_object() {
        assert_eq!(serde_json::to_string(&Empty {}).unwrap(), "{}");
    }
}
