// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Field deserializers for records coming from outside the app. A value
//! that is null or of the wrong type falls back to the field's default
//! instead of failing the whole record.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::model::ServiceStatus;

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
    Ignored(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Or<T> {
    Value(T),
    Ignored(IgnoredAny),
}

/// Strings pass through and numbers are rendered; anything else is blank.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(value) => value,
        Loose::Integer(value) => value.to_string(),
        Loose::Float(value) => value.to_string(),
        Loose::Flag(_) | Loose::Ignored(_) => String::new(),
    })
}

pub(crate) fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(value) => Some(value),
        _ => None,
    })
}

/// Accepts `2020`, `2020.0` or `"2020"`.
pub(crate) fn year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Integer(value) => i32::try_from(value).ok(),
        Loose::Float(value)
            if value.fract() == 0.0
                && value >= f64::from(i32::MIN)
                && value <= f64::from(i32::MAX) =>
        {
            Some(value as i32)
        }
        Loose::Text(value) => value.trim().parse().ok(),
        _ => None,
    })
}

pub(crate) fn status<'de, D>(deserializer: D) -> Result<ServiceStatus, D::Error>
where
    D: Deserializer<'de>,
{
    string(deserializer).map(|value| ServiceStatus::parse(&value))
}

pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match Or::<T>::deserialize(deserializer)? {
        Or::Value(value) => value,
        Or::Ignored(_) => T::default(),
    })
}

#[cfg(test)]
mod tests {
    use crate::model::{ServiceStatus, VehicleSummary};
    use anyhow::Result;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "super::string")]
        text: String,
        #[serde(default, deserialize_with = "super::year")]
        year: Option<i32>,
        #[serde(default, deserialize_with = "super::status")]
        status: ServiceStatus,
        #[serde(default, deserialize_with = "super::or_default")]
        vehicle: VehicleSummary,
    }

    fn fields(value: serde_json::Value) -> Result<Fields> {
        Ok(serde_json::from_value(value)?)
    }

    #[test]
    fn numbers_become_text_and_junk_becomes_blank() -> Result<()> {
        assert_eq!(fields(json!({"text": 42}))?.text, "42");
        assert_eq!(fields(json!({"text": null}))?.text, "");
        assert_eq!(fields(json!({"text": ["a"]}))?.text, "");
        assert_eq!(fields(json!({"text": true}))?.text, "");
        Ok(())
    }

    #[test]
    fn year_accepts_whole_numbers_and_numeric_strings() -> Result<()> {
        assert_eq!(fields(json!({"year": 2020}))?.year, Some(2020));
        assert_eq!(fields(json!({"year": 2020.0}))?.year, Some(2020));
        assert_eq!(fields(json!({"year": " 2019 "}))?.year, Some(2019));
        assert_eq!(fields(json!({"year": 2020.5}))?.year, None);
        assert_eq!(fields(json!({"year": "soon"}))?.year, None);
        assert_eq!(fields(json!({"year": 99_999_999_999_i64}))?.year, None);
        assert_eq!(fields(json!({"year": {}}))?.year, None);
        Ok(())
    }

    #[test]
    fn status_of_wrong_type_is_blank_other() -> Result<()> {
        assert_eq!(
            fields(json!({"status": "completed"}))?.status,
            ServiceStatus::Completed
        );
        assert_eq!(
            fields(json!({"status": 7}))?.status,
            ServiceStatus::Other("7".to_owned())
        );
        assert_eq!(fields(json!({"status": null}))?.status, ServiceStatus::default());
        Ok(())
    }

    #[test]
    fn nested_struct_of_wrong_type_is_default() -> Result<()> {
        assert_eq!(
            fields(json!({"vehicle": "Camry"}))?.vehicle,
            VehicleSummary::default()
        );
        let vehicle = fields(json!({"vehicle": {"make": "Honda", "year": "2018"}}))?.vehicle;
        assert_eq!(vehicle.make, "Honda");
        assert_eq!(vehicle.year, Some(2018));
        Ok(())
    }
}
