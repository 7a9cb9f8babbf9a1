//! Event-list wire model.
//!
//! Every field is optional on the wire: absent or `null` values fall back to
//! their defaults, so a gig with missing cosmetic fields still prints.
//! `id` and `fansOnEnts24` also accept either a string or a number.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single scheduled event returned by the event-list endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Gig {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "fansOnEnts24", deserialize_with = "lenient_count")]
    pub fans_on_ents24: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub headline: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub description: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub genre: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_time_string: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    pub end_time_string: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub last_update: String,
    pub price: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub has_moved: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_rescheduled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_free: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_cancelled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_postponed: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_sold_out: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub tickets_available: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub venue: Venue,
    #[serde(deserialize_with = "null_as_default")]
    pub web_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Venue {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: Address,
    pub location: Option<Location>,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub venue_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub web_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    #[serde(deserialize_with = "null_as_default")]
    pub street_address: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub town: String,
    #[serde(deserialize_with = "null_as_default")]
    pub county: String,
    #[serde(deserialize_with = "null_as_default")]
    pub postcode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub lon: f64,
}

impl Gig {
    /// `<venue name> <headline> <start date> <start time> <town>`
    pub fn summary_line(&self) -> String {
        [
            self.venue.name.as_str(),
            self.headline.as_str(),
            self.start_date.as_str(),
            self.start_time_string.as_str(),
            self.venue.address.town.as_str(),
        ]
        .join(" ")
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Whole numbers or numeric strings; anything else counts as 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_line_joins_with_spaces() {
        let gig: Gig = serde_json::from_value(json!({
            "headline": "Test Band",
            "startDate": "2024-06-01",
            "startTimeString": "20:00",
            "venue": {"name": "The Hall", "address": {"town": "Brighton"}}
        }))
        .unwrap();
        assert_eq!(gig.summary_line(), "The Hall Test Band 2024-06-01 20:00 Brighton");
    }

    #[test]
    fn nulls_and_missing_fields_default() {
        let gig: Gig = serde_json::from_value(json!({
            "headline": null,
            "venue": null,
            "genre": null,
            "isFree": null,
            "price": null
        }))
        .unwrap();
        assert_eq!(gig.headline, "");
        assert_eq!(gig.venue, Venue::default());
        assert!(gig.genre.is_empty());
        assert_eq!(gig.summary_line(), "    ");
    }

    #[test]
    fn mistyped_id_and_fan_count_do_not_fail_the_gig() {
        let gigs: Vec<Gig> = serde_json::from_value(json!([
            {"id": 12345, "fansOnEnts24": "17", "headline": "Numeric Id"},
            {"id": "e2", "fansOnEnts24": "lots", "headline": "Wordy Fans"},
            {"id": ["odd"], "fansOnEnts24": 3.0, "headline": "Array Id"}
        ]))
        .unwrap();

        assert_eq!(gigs.len(), 3);
        assert_eq!(gigs[0].id, "12345");
        assert_eq!(gigs[0].fans_on_ents24, 17);
        assert_eq!(gigs[1].fans_on_ents24, 0);
        assert_eq!(gigs[2].id, "");
        assert_eq!(gigs[2].fans_on_ents24, 3);
    }

    #[test]
    fn keeps_nested_venue_details() {
        let gig: Gig = serde_json::from_value(json!({
            "id": "e1",
            "fansOnEnts24": 42,
            "genre": ["rock", "indie"],
            "venue": {
                "id": "v1",
                "name": "Concorde 2",
                "type": "venue",
                "address": {"streetAddress": ["Madeira Drive"], "town": "Brighton", "postcode": "BN2 1EN"},
                "location": {"lat": 50.81, "lon": -0.12}
            }
        }))
        .unwrap();
        assert_eq!(gig.fans_on_ents24, 42);
        assert_eq!(gig.venue.venue_type, "venue");
        assert_eq!(gig.venue.address.street_address, vec!["Madeira Drive".to_string()]);
        assert_eq!(gig.venue.location, Some(Location { lat: 50.81, lon: -0.12 }));
    }
}
