//! Raw metadata exports and the merge into a `PostMeta`.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::content::PostMeta;
use crate::error::MetadataError;
use crate::text_utils::{alphabetize, date_time_from_millis, parse_date_time};
use crate::util::toml_date::toml_date_time;

/// A date as it appears in a metadata export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    /// Epoch milliseconds
    Millis(i64),
    Text(String),
    /// Already a date, e.g. a TOML date-time
    #[serde(skip_deserializing)]
    Value(NaiveDateTime),
}

impl DateValue {
    pub fn resolve(&self) -> Result<NaiveDateTime, String> {
        match self {
            DateValue::Millis(millis) => date_time_from_millis(*millis),
            DateValue::Text(text) => parse_date_time(text),
            DateValue::Value(date) => Ok(*date),
        }
    }

    fn from_toml(value: toml::Value) -> Result<Self, String> {
        match value {
            toml::Value::Datetime(date) => toml_date_time(&date).map(DateValue::Value),
            toml::Value::Integer(millis) => Ok(DateValue::Millis(millis)),
            toml::Value::String(text) => Ok(DateValue::Text(text)),
            other => Err(format!("{} is not a date", other)),
        }
    }

    fn describe(&self) -> String {
        match self {
            DateValue::Millis(millis) => millis.to_string(),
            DateValue::Text(text) => text.clone(),
            DateValue::Value(date) => date.to_string(),
        }
    }
}

/// Metadata export before validation. Unknown keys are ignored, so any superset
/// of the post fields is accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPostMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<DateValue>,
    #[serde(default, rename = "lastUpdated", alias = "last_updated")]
    pub last_updated: Option<DateValue>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub part: Option<u32>,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub draft: Option<bool>,
}

impl RawPostMeta {
    pub fn from_yaml(buf: &str) -> Result<Self, MetadataError> {
        if buf.trim().is_empty() {
            return Ok(RawPostMeta::default());
        }
        serde_yaml::from_str(buf).map_err(|e| MetadataError::parse("yaml", e))
    }

    /// TOML carries native dates, which serde cannot hand to an untagged enum,
    /// so the date keys are taken out and converted before the rest is deserialized.
    pub fn from_toml(mut table: toml::Table) -> Result<Self, MetadataError> {
        let date = table.remove("date")
            .map(DateValue::from_toml)
            .transpose()
            .map_err(MetadataError::InvalidDate)?;
        let last_updated = table.remove("lastUpdated")
            .or_else(|| table.remove("last_updated"))
            .map(DateValue::from_toml)
            .transpose()
            .map_err(MetadataError::InvalidLastUpdated)?;

        let mut raw: RawPostMeta = toml::Value::Table(table)
            .try_into()
            .map_err(|e| MetadataError::parse("toml", e))?;
        raw.date = date;
        raw.last_updated = last_updated;
        Ok(raw)
    }
}

impl PostMeta {
    /// Applies the defaults for every optional field.
    ///
    /// `date` is mandatory and parsed strictly. A missing title falls back to the
    /// last url segment, `my-first-post` becoming `My First Post`.
    pub fn merge(url: &str, raw: RawPostMeta) -> Result<PostMeta, MetadataError> {
        let date = match raw.date {
            None => return Err(MetadataError::MissingDate),
            Some(ref value) => value.resolve()
                .map_err(|_| MetadataError::InvalidDate(value.describe()))?,
        };

        let last_updated = match raw.last_updated {
            None => None,
            Some(ref value) => Some(value.resolve()
                .map_err(|_| MetadataError::InvalidLastUpdated(value.describe()))?),
        };

        let title = raw.title.unwrap_or_else(|| {
            let slug = url.rsplit('/').find(|segment| !segment.is_empty()).unwrap_or_default();
            alphabetize(slug)
        });

        Ok(PostMeta {
            title,
            description: raw.description,
            date,
            last_updated,
            tags: raw.tags.unwrap_or_default(),
            part: raw.part,
            series: raw.series,
            draft: raw.draft.unwrap_or(false),
        })
    }
}
