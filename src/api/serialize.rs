//! Serde helpers for the formats the Todoist API expects on the wire.
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Formats a UTC timestamp as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Serializes a [`DateTime`] the way Todoist sends them back.
pub fn todoist_rfc3339<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_datetime(dt))
}

/// Optional variant of [`todoist_rfc3339`], meant to be combined with `skip_serializing_if`.
pub fn todoist_rfc3339_opt<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => todoist_rfc3339(dt, serializer),
        None => serializer.serialize_none(),
    }
}

/// Deserialize null as empty vec
pub fn deserialize_null_as_empty_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt = Option::<Vec<T>>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}
