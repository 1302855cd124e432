use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Deserializer, Serialize};

/// A single tab-switch record, as stored by the activity collector.
///
/// Records arrive as document-store JSON, so identity fields may be absent
/// and `_id`/`timestamp` may use the extended forms (`$oid`,
/// `$date.$numberLong`). Anything malformed degrades to an absent value;
/// deserialization itself never fails on those fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSwitchEvent {
    #[serde(rename = "_id", default, deserialize_with = "object_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub problem_id: Option<String>,
    #[serde(default)]
    pub problem_title: Option<String>,
    #[serde(
        rename = "timestamp",
        alias = "timestampMillis",
        default,
        deserialize_with = "timestamp_millis"
    )]
    pub timestamp_millis: Option<i64>,
    #[serde(default)]
    pub from_url: String,
    #[serde(default)]
    pub from_title: String,
    #[serde(default)]
    pub to_url: String,
    #[serde(default)]
    pub to_title: String,
    #[serde(default)]
    pub event_type: Option<String>,
}

impl TabSwitchEvent {
    /// Lower-cased platform name, or `None` when the record has none.
    pub fn platform_lower(&self) -> Option<String> {
        self.platform
            .as_ref()
            .filter(|p| !p.is_empty())
            .map(|p| p.to_lowercase())
    }

    /// The platform's own domain, derived as `{platform}.com`.
    pub fn platform_domain(&self) -> Option<String> {
        self.platform_lower().map(|p| format!("{p}.com"))
    }

    /// ISO-8601 timestamp, or `None` for absent/invalid epoch millis.
    pub fn timestamp_iso(&self) -> Option<String> {
        let millis = self.timestamp_millis?;
        let datetime = DateTime::from_timestamp_millis(millis)?;
        Some(datetime.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

/// `_id` may be a plain string or the extended `{"$oid": "..."}` form.
fn object_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Extended {
            #[serde(rename = "$oid")]
            oid: String,
        },
        Plain(String),
        Other(serde_json::Value),
    }

    Ok(Option::<Repr>::deserialize(deserializer)?.and_then(|repr| match repr {
        Repr::Extended { oid } => Some(oid),
        Repr::Plain(value) => Some(value),
        Repr::Other(_) => None,
    }))
}

/// Problem identifiers show up both as JSON strings and as numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Integer(i64),
        Other(serde_json::Value),
    }

    Ok(Option::<Repr>::deserialize(deserializer)?.and_then(|repr| match repr {
        Repr::Text(value) => Some(value),
        Repr::Integer(value) => Some(value.to_string()),
        Repr::Other(_) => None,
    }))
}

/// Timestamps may be plain epoch millis, `{"$date": <millis>}`, or
/// `{"$date": {"$numberLong": "<decimal string>"}}`.
fn timestamp_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Millis(i64),
        Extended {
            #[serde(rename = "$date")]
            date: DateRepr,
        },
        Other(serde_json::Value),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DateRepr {
        Millis(i64),
        NumberLong {
            #[serde(rename = "$numberLong")]
            number_long: String,
        },
        Other(serde_json::Value),
    }

    Ok(Option::<Repr>::deserialize(deserializer)?.and_then(|repr| match repr {
        Repr::Millis(millis) => Some(millis),
        Repr::Extended {
            date: DateRepr::Millis(millis),
        } => Some(millis),
        Repr::Extended {
            date: DateRepr::NumberLong { number_long },
        } => number_long.parse().ok(),
        Repr::Extended {
            date: DateRepr::Other(_),
        } => None,
        Repr::Other(_) => None,
    }))
}
